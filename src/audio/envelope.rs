use crate::animation::interpolate::{Extrapolation, interpolate};
use crate::audio::pcm::{AudioPcm, frame_to_sample};
use crate::foundation::core::{Fps, FrameRange};

/// Volume curve of the soundtrack: ramp in, hold, ramp out to silence.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct VolumeEnvelope {
    /// End of the fade-in, in seconds.
    pub fade_in_secs: f64,
    /// Start of the fade-out, in seconds.
    pub fade_out_start_secs: f64,
    /// Time at which the volume reaches zero, in seconds.
    pub end_secs: f64,
}

impl Default for VolumeEnvelope {
    fn default() -> Self {
        Self {
            fade_in_secs: 0.5,
            fade_out_start_secs: 13.0,
            end_secs: 15.0,
        }
    }
}

impl VolumeEnvelope {
    /// Gain at a (possibly fractional) frame position.
    pub fn gain_at(&self, frame: f64, fps: Fps) -> f64 {
        let fps = fps.as_f64();
        interpolate(
            frame,
            [
                0.0,
                self.fade_in_secs * fps,
                self.fade_out_start_secs * fps,
                self.end_secs * fps,
            ],
            [0.0, 1.0, 1.0, 0.0],
            Extrapolation::CLAMP,
        )
    }

    /// Apply the envelope to `pcm` over `range`, with the track starting at composition frame 0.
    ///
    /// The output is interleaved in `pcm`'s channel layout and exactly as long as the range;
    /// a track shorter than the range is padded with silence.
    pub fn mix(&self, pcm: &AudioPcm, range: FrameRange, fps: Fps) -> Vec<f32> {
        let channels = usize::from(pcm.channels.max(1));
        let first = frame_to_sample(range.start.0, fps, pcm.sample_rate);
        let last = frame_to_sample(range.end.0, fps, pcm.sample_rate);
        let src_frames = pcm.len_frames() as u64;
        let samples_per_frame = f64::from(pcm.sample_rate) / fps.as_f64();

        let mut out = Vec::with_capacity((last.saturating_sub(first) as usize) * channels);
        for s in first..last {
            if s >= src_frames {
                out.extend(std::iter::repeat_n(0.0, channels));
                continue;
            }
            let gain = self.gain_at(s as f64 / samples_per_frame, fps) as f32;
            let base = s as usize * channels;
            out.extend(
                pcm.interleaved_f32[base..base + channels]
                    .iter()
                    .map(|v| (v * gain).clamp(-1.0, 1.0)),
            );
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/audio/envelope.rs"]
mod tests;
