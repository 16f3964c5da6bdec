use std::collections::BTreeSet;

use crate::audio::envelope::VolumeEnvelope;
use crate::composition::timeline::{IntroComposition, Sequence};
use crate::foundation::core::{Canvas, Fps};
use crate::foundation::error::{IntroError, IntroResult};
use crate::scene::component::SceneComponent;

/// Builder for [`IntroComposition`].
///
/// Sequences are added bottom to top; their offsets are given in seconds and rounded to frames
/// with the builder's frame rate.
pub struct CompositionBuilder {
    id: String,
    fps: Fps,
    canvas: Canvas,
    duration: u64,
    envelope: VolumeEnvelope,
    sequences: Vec<Sequence>,
}

impl CompositionBuilder {
    /// Create a builder for a composition of `duration` frames.
    pub fn new(id: impl Into<String>, fps: Fps, canvas: Canvas, duration: u64) -> Self {
        Self {
            id: id.into(),
            fps,
            canvas,
            duration,
            envelope: VolumeEnvelope::default(),
            sequences: Vec::new(),
        }
    }

    /// Set the soundtrack volume curve.
    pub fn envelope(mut self, envelope: VolumeEnvelope) -> Self {
        self.envelope = envelope;
        self
    }

    /// Add a layer that is present from the first frame.
    pub fn layer(self, component: impl SceneComponent + 'static) -> Self {
        self.sequence(0.0, 0.0, component)
    }

    /// Add a layer starting at `from_secs`, premounted `premount_secs` ahead of it.
    pub fn sequence(
        mut self,
        from_secs: f64,
        premount_secs: f64,
        component: impl SceneComponent + 'static,
    ) -> Self {
        let from = self.fps.secs_to_frames(from_secs);
        let premount = self.fps.secs_to_frames(premount_secs);
        self.sequences
            .push(Sequence::new(from, premount, Box::new(component)));
        self
    }

    /// Validate and build.
    pub fn build(self) -> IntroResult<IntroComposition> {
        Fps::new(self.fps.num, self.fps.den)?;
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(IntroError::validation("canvas width/height must be non-zero"));
        }
        if self.duration == 0 {
            return Err(IntroError::validation("composition duration must be > 0"));
        }
        let mut names = BTreeSet::new();
        for seq in &self.sequences {
            if !names.insert(seq.name()) {
                return Err(IntroError::validation(format!(
                    "duplicate layer '{}'",
                    seq.name()
                )));
            }
        }
        Ok(IntroComposition::from_parts(
            self.id,
            self.fps,
            self.canvas,
            self.duration,
            self.envelope,
            self.sequences,
        ))
    }
}
