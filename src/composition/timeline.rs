use std::path::Path;

use crate::audio::envelope::VolumeEnvelope;
use crate::audio::spectrum::SpectrumSource;
use crate::audio::track::AudioTrack;
use crate::composition::builder::CompositionBuilder;
use crate::config::IntroConfig;
use crate::foundation::core::{Canvas, Fps, FrameIndex, FrameRange};
use crate::foundation::error::{IntroError, IntroResult};
use crate::scene::component::{FrameCtx, SceneComponent};
use crate::scene::components::{
    AudioReactiveGlow, Background, FadeOut, HostName, NodeNetwork, Particles, TypedTitle,
};
use crate::scene::model::FrameScene;

/// Where a frame falls relative to a sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SequenceState {
    /// Before the premount window.
    Hidden,
    /// Inside the premount window: not drawn yet.
    Premounted,
    /// Drawn, with the frame relative to the sequence start.
    Active {
        /// Sequence-local frame.
        local: u64,
    },
}

/// A component placed on the timeline. Sequences never end before the composition does.
pub struct Sequence {
    from: u64,
    premount: u64,
    component: Box<dyn SceneComponent>,
}

impl Sequence {
    /// Place `component` at frame `from` with a premount lead of `premount` frames.
    pub fn new(from: u64, premount: u64, component: Box<dyn SceneComponent>) -> Self {
        Self {
            from,
            premount,
            component,
        }
    }

    /// Layer name of the wrapped component.
    pub fn name(&self) -> &'static str {
        self.component.name()
    }

    /// First visible frame.
    pub fn from_frame(&self) -> u64 {
        self.from
    }

    /// Premount lead in frames.
    pub fn premount_frames(&self) -> u64 {
        self.premount
    }

    /// Classify `frame` for this sequence.
    pub fn state(&self, frame: FrameIndex) -> SequenceState {
        if frame.0 >= self.from {
            SequenceState::Active {
                local: frame.0 - self.from,
            }
        } else if frame.0 >= self.from.saturating_sub(self.premount) {
            SequenceState::Premounted
        } else {
            SequenceState::Hidden
        }
    }
}

impl std::fmt::Debug for Sequence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sequence")
            .field("name", &self.name())
            .field("from", &self.from)
            .field("premount", &self.premount)
            .finish()
    }
}

/// The intro: identity, output format, layered sequences and the soundtrack.
#[derive(Debug)]
pub struct IntroComposition {
    id: String,
    fps: Fps,
    canvas: Canvas,
    duration: u64,
    envelope: VolumeEnvelope,
    sequences: Vec<Sequence>,
    audio: Option<AudioTrack>,
}

impl IntroComposition {
    /// Start a custom composition.
    pub fn builder(id: impl Into<String>, fps: Fps, canvas: Canvas, duration: u64) -> CompositionBuilder {
        CompositionBuilder::new(id, fps, canvas, duration)
    }

    pub(crate) fn from_parts(
        id: String,
        fps: Fps,
        canvas: Canvas,
        duration: u64,
        envelope: VolumeEnvelope,
        sequences: Vec<Sequence>,
    ) -> Self {
        Self {
            id,
            fps,
            canvas,
            duration,
            envelope,
            sequences,
            audio: None,
        }
    }

    /// Lay out the seven intro layers for `config`. The soundtrack is not loaded; see [`Self::load`].
    pub fn from_config(config: &IntroConfig) -> IntroResult<Self> {
        config.validate()?;
        Self::builder(
            config.id.clone(),
            config.fps,
            config.canvas,
            config.duration_frames(),
        )
        .envelope(config.envelope)
        .layer(Background)
        .sequence(0.0, 0.5, NodeNetwork)
        .sequence(0.0, 0.5, Particles)
        .sequence(4.0, 1.0, TypedTitle::new(config.title.clone()))
        .sequence(8.0, 1.0, HostName::new(config.host_caption.clone()))
        .sequence(8.0, 1.0, AudioReactiveGlow)
        .sequence(13.0, 0.5, FadeOut)
        .build()
    }

    /// [`Self::from_config`] plus decoding the configured soundtrack, if any.
    #[tracing::instrument(skip(config), fields(id = %config.id))]
    pub fn load(config: &IntroConfig) -> IntroResult<Self> {
        let comp = Self::from_config(config)?;
        match config.audio.as_deref() {
            Some(path) => Ok(comp.with_audio(AudioTrack::load(path)?)),
            None => {
                tracing::info!("no soundtrack configured");
                Ok(comp)
            }
        }
    }

    /// Attach a decoded soundtrack; it inherits the composition's envelope.
    pub fn with_audio(mut self, track: AudioTrack) -> Self {
        self.audio = Some(track.with_envelope(self.envelope));
        self
    }

    /// Composition identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Frame rate.
    pub fn fps(&self) -> Fps {
        self.fps
    }

    /// Output canvas.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Length in frames.
    pub fn duration_frames(&self) -> u64 {
        self.duration
    }

    /// Every frame of the composition.
    pub fn range(&self) -> FrameRange {
        FrameRange {
            start: FrameIndex(0),
            end: FrameIndex(self.duration),
        }
    }

    /// Sequences bottom to top.
    pub fn sequences(&self) -> &[Sequence] {
        &self.sequences
    }

    /// Soundtrack, when one is attached.
    pub fn audio(&self) -> Option<&AudioTrack> {
        self.audio.as_ref()
    }

    /// Soundtrack file, when one is attached.
    pub fn audio_path(&self) -> Option<&Path> {
        self.audio.as_ref().map(AudioTrack::path)
    }

    /// Volume curve of the soundtrack.
    pub fn envelope(&self) -> &VolumeEnvelope {
        &self.envelope
    }

    /// Soundtrack volume at `frame`.
    pub fn volume_at(&self, frame: FrameIndex) -> f64 {
        self.envelope.gain_at(frame.0 as f64, self.fps)
    }

    /// Check that `range` lies within the composition.
    pub fn check_range(&self, range: FrameRange) -> IntroResult<()> {
        if range.end.0 > self.duration {
            return Err(IntroError::validation(format!(
                "frame range {}..{} exceeds composition duration {}",
                range.start.0, range.end.0, self.duration
            )));
        }
        Ok(())
    }

    /// Scene graph for one frame. Frames at or past the duration are rejected.
    pub fn evaluate(&self, frame: FrameIndex) -> IntroResult<FrameScene> {
        if frame.0 >= self.duration {
            return Err(IntroError::validation(format!(
                "frame {} is outside composition '{}' of {} frames",
                frame.0, self.id, self.duration
            )));
        }
        Ok(self.scene_at(frame))
    }

    /// Scene graphs for every frame of `range`, in order.
    #[tracing::instrument(skip(self), fields(id = %self.id))]
    pub fn evaluate_range(&self, range: FrameRange) -> IntroResult<Vec<FrameScene>> {
        self.check_range(range)?;
        let scenes: Vec<_> = (range.start.0..range.end.0)
            .map(|f| self.scene_at(FrameIndex(f)))
            .collect();
        tracing::debug!(frames = scenes.len(), "evaluated range");
        Ok(scenes)
    }

    fn scene_at(&self, frame: FrameIndex) -> FrameScene {
        let spectrum = self
            .audio
            .as_ref()
            .map(|t| t.spectrum() as &dyn SpectrumSource);
        let mut layers = Vec::with_capacity(self.sequences.len());
        let mut premounted = Vec::new();

        for seq in &self.sequences {
            match seq.state(frame) {
                SequenceState::Hidden => {}
                SequenceState::Premounted => premounted.push(seq.name().to_owned()),
                SequenceState::Active { local } => {
                    let ctx = FrameCtx {
                        frame: local,
                        global_frame: frame,
                        fps: self.fps,
                        canvas: self.canvas,
                        spectrum,
                    };
                    if let Some(layer) = seq.component.render(&ctx) {
                        layers.push(layer);
                    }
                }
            }
        }

        FrameScene {
            composition: self.id.clone(),
            canvas: self.canvas,
            fps: self.fps,
            frame,
            layers,
            premounted,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/timeline.rs"]
mod tests;
