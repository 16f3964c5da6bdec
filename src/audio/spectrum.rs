use std::f64::consts::TAU;
use std::ops::Range;
use std::sync::Arc;

use crate::foundation::core::{Fps, FrameIndex};

/// Number of frequency bins requested by the glow.
pub const SPECTRUM_BINS: usize = 128;
/// Length of the analysis window around the current frame.
pub const WINDOW_SECS: f64 = 30.0;

/// Per-frame frequency analysis of a soundtrack.
pub trait SpectrumSource: Send + Sync {
    /// `bins` amplitudes in `[0, 1]`, lowest frequency first.
    ///
    /// `None` means no analysis data covers `frame` (for example past the end of the track);
    /// callers treat that as "draw nothing", not as an error.
    fn frequencies(&self, frame: FrameIndex, fps: Fps, bins: usize) -> Option<Vec<f64>>;
}

/// Mean amplitude of the lowest quarter of `frequencies`.
pub fn bass_intensity(frequencies: &[f64]) -> f64 {
    let low = (frequencies.len() / 4).max(1).min(frequencies.len());
    if low == 0 {
        return 0.0;
    }
    frequencies[..low].iter().sum::<f64>() / low as f64
}

/// Spectrum analysis over a mono track held in memory.
///
/// Each frame is analysed with a Hann-windowed DFT of `2 * bins` samples centred on the frame.
/// The [`WINDOW_SECS`] window only bounds which samples are available to that block; for the
/// bin counts used here it never trims the block, so it does not change the amplitudes.
#[derive(Clone, Debug)]
pub struct WindowedSpectrum {
    samples: Arc<Vec<f32>>,
    sample_rate: u32,
}

impl WindowedSpectrum {
    /// Analyse `samples` recorded at `sample_rate`.
    pub fn new(samples: Arc<Vec<f32>>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// Centre sample of `frame`, or `None` when the frame lies past the end of the track.
    fn center_sample(&self, frame: FrameIndex, fps: Fps) -> Option<usize> {
        if self.sample_rate == 0 {
            return None;
        }
        let secs = fps.frames_to_secs(frame.0);
        let center = (secs * f64::from(self.sample_rate)).floor() as usize;
        (center < self.samples.len()).then_some(center)
    }

    /// Sample range available to the analysis of `frame`, clipped to the track.
    ///
    /// A data-availability bound: `None` past the end of the track, otherwise a range that
    /// covers every in-track sample of the frame's DFT block.
    pub fn window(&self, frame: FrameIndex, fps: Fps) -> Option<Range<usize>> {
        let center = self.center_sample(frame, fps)?;
        let half = (WINDOW_SECS / 2.0 * f64::from(self.sample_rate)) as usize;
        let start = center.saturating_sub(half);
        let end = center.saturating_add(half).min(self.samples.len());
        Some(start..end)
    }
}

impl SpectrumSource for WindowedSpectrum {
    fn frequencies(&self, frame: FrameIndex, fps: Fps, bins: usize) -> Option<Vec<f64>> {
        if bins == 0 {
            return Some(Vec::new());
        }
        let center = self.center_sample(frame, fps)?;
        let window = self.window(frame, fps)?;
        let data = &self.samples[window.clone()];

        let size = bins * 2;
        let start = center.saturating_sub(size / 2).max(window.start);
        let block: Vec<f64> = (0..size)
            .map(|i| {
                let idx = start + i;
                if idx < window.end {
                    f64::from(data[idx - window.start])
                } else {
                    0.0
                }
            })
            .collect();

        Some(dft_magnitudes(&block, bins))
    }
}

/// Hann-windowed DFT magnitudes for the first `bins` frequencies of `block`.
///
/// Magnitudes are scaled so a full-scale sine centred on a bin reads ~1.0, then clamped.
fn dft_magnitudes(block: &[f64], bins: usize) -> Vec<f64> {
    let n = block.len();
    let window: Vec<f64> = (0..n)
        .map(|i| 0.5 - 0.5 * (TAU * i as f64 / n as f64).cos())
        .collect();
    let gain: f64 = window.iter().sum::<f64>() / 2.0;
    if gain == 0.0 {
        return vec![0.0; bins];
    }

    (0..bins)
        .map(|k| {
            let (mut re, mut im) = (0.0, 0.0);
            for (i, (&x, &w)) in block.iter().zip(&window).enumerate() {
                let angle = TAU * (k * i) as f64 / n as f64;
                let v = x * w;
                re += v * angle.cos();
                im -= v * angle.sin();
            }
            ((re * re + im * im).sqrt() / gain).clamp(0.0, 1.0)
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/audio/spectrum.rs"]
mod tests;
