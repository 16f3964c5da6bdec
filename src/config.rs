use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::audio::envelope::VolumeEnvelope;
use crate::foundation::core::{Canvas, Fps};
use crate::foundation::error::{IntroError, IntroResult};

/// User-facing parameters of the intro.
///
/// Every field has a default, so a JSON file only needs the values it changes. Relative paths are
/// resolved against the directory of the file they were read from.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IntroConfig {
    /// Composition identifier.
    pub id: String,
    /// Output resolution.
    pub canvas: Canvas,
    /// Frame rate.
    pub fps: Fps,
    /// Total length in seconds.
    pub duration_secs: f64,
    /// Text typed by the title.
    pub title: String,
    /// Caption under the title.
    pub host_caption: String,
    /// Soundtrack file; `None` renders silently without the glow.
    pub audio: Option<PathBuf>,
    /// Extra directory scanned for `.ttf`/`.otf` fonts.
    pub fonts_dir: Option<PathBuf>,
    /// Soundtrack volume curve.
    pub envelope: VolumeEnvelope,
}

impl Default for IntroConfig {
    fn default() -> Self {
        Self {
            id: "PromptedIntro".to_owned(),
            canvas: Canvas {
                width: 1920,
                height: 1080,
            },
            fps: Fps { num: 30, den: 1 },
            duration_secs: 15.0,
            title: "PROMPTED".to_owned(),
            host_caption: "with Cory Silva".to_owned(),
            audio: Some(PathBuf::from("Prompted_intro.wav")),
            fonts_dir: None,
            envelope: VolumeEnvelope::default(),
        }
    }
}

impl IntroConfig {
    /// Parse a config from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> IntroResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| IntroError::serde(format!("parse intro config JSON: {e}")))
    }

    /// Parse a config file and resolve its relative paths against the file's directory.
    pub fn from_path(path: impl AsRef<Path>) -> IntroResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            IntroError::validation(format!("open intro config '{}': {e}", path.display()))
        })?;
        let cfg = Self::from_reader(BufReader::new(f))?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        Ok(cfg.resolve_paths(base))
    }

    /// Make relative asset paths relative to `base`.
    pub fn resolve_paths(mut self, base: &Path) -> Self {
        let resolve = |p: PathBuf| if p.is_relative() { base.join(p) } else { p };
        self.audio = self.audio.map(resolve);
        self.fonts_dir = self.fonts_dir.map(resolve);
        self
    }

    /// Check value ranges.
    pub fn validate(&self) -> IntroResult<()> {
        if self.id.trim().is_empty() {
            return Err(IntroError::validation("id must not be empty"));
        }
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(IntroError::validation("canvas width/height must be non-zero"));
        }
        Fps::new(self.fps.num, self.fps.den)?;
        if !self.duration_secs.is_finite() || self.duration_secs <= 0.0 {
            return Err(IntroError::validation("duration_secs must be > 0"));
        }
        if self.duration_frames() == 0 {
            return Err(IntroError::validation(
                "duration_secs is shorter than one frame",
            ));
        }
        let env = &self.envelope;
        if !(env.fade_in_secs > 0.0
            && env.fade_in_secs < env.fade_out_start_secs
            && env.fade_out_start_secs < env.end_secs)
        {
            return Err(IntroError::validation(
                "envelope must satisfy 0 < fade_in_secs < fade_out_start_secs < end_secs",
            ));
        }
        Ok(())
    }

    /// Total length in frames.
    pub fn duration_frames(&self) -> u64 {
        self.fps.secs_to_frames(self.duration_secs)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
