//! `prompted-intro` composes the PromptedIntro video intro frame by frame.
//!
//! Every visual property is a pure function of `(frame, fps)` and a few static tables, so any
//! frame can be evaluated on its own, in any order:
//!
//! - Build an [`IntroComposition`] from an [`IntroConfig`]
//! - Evaluate a [`FrameScene`] per frame
//! - Rasterize scenes with a [`RenderBackend`] and stream a range into a [`FrameSink`]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod audio;
pub(crate) mod composition;
pub(crate) mod config;
pub(crate) mod layout;
pub(crate) mod scene;

/// Encoding sinks.
pub mod encode;
/// Rendering backend and range pipeline.
pub mod render;

pub use crate::foundation::core::{Canvas, Fps, FrameIndex, FrameRange, Point, Rgb8, Vec2};
pub use crate::foundation::error::{IntroError, IntroResult};

pub use crate::animation::drift::Drift;
pub use crate::animation::interpolate::{Extrapolate, Extrapolation, interpolate};
pub use crate::animation::spring::{SpringConfig, spring, tenths_to_frames};

pub use crate::layout::network::{
    CONNECTION_THRESHOLD, Connection, NODES, Node, connections, derive_connections,
};
pub use crate::layout::particles::{
    PARTICLE_COUNT, Particle, generate_particles, particle_seed, particles,
};

pub use crate::scene::component::{FrameCtx, SceneComponent};
pub use crate::scene::components::{
    AudioReactiveGlow, Background, FadeOut, HostName, NodeNetwork, Particles, TypedTitle,
};
pub use crate::scene::model::{
    Dash, Element, Font, FrameScene, GradientStop, Glow, Layer, Paint, RadialGradient, TextBlock,
    TextSpan,
};
pub use crate::scene::palette;

pub use crate::audio::envelope::VolumeEnvelope;
pub use crate::audio::pcm::{AudioPcm, MIX_SAMPLE_RATE, decode_audio_f32_stereo};
pub use crate::audio::spectrum::{
    SPECTRUM_BINS, SpectrumSource, WINDOW_SECS, WindowedSpectrum, bass_intensity,
};
pub use crate::audio::track::AudioTrack;

pub use crate::composition::builder::CompositionBuilder;
pub use crate::composition::timeline::{IntroComposition, Sequence, SequenceState};
pub use crate::config::IntroConfig;

pub use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts, is_ffmpeg_on_path};
pub use crate::encode::png::{PngSequenceSink, write_png};
pub use crate::encode::sink::{AudioInputConfig, FrameSink, InMemorySink, SinkConfig};
pub use crate::render::backend::{BackendKind, FrameRGBA, RenderBackend, RenderSettings, create_backend};
pub use crate::render::pipeline::{
    RenderOpts, RenderStats, RenderThreading, render_frame, render_frames, render_to_sink,
};
pub use crate::render::raster::SvgBackend;
