//! Encoding sinks.
//!
//! Sinks consume rendered frames in timeline order and are driven by
//! [`render_to_sink`](crate::render::pipeline::render_to_sink).

/// `ffmpeg`-based MP4 output via the system `ffmpeg`.
pub mod ffmpeg;
/// PNG files.
pub mod png;
/// Generic frame sink trait and the in-memory sink.
pub mod sink;
