use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::audio::envelope::VolumeEnvelope;
use crate::audio::pcm::{AudioPcm, MIX_SAMPLE_RATE, decode_audio_f32_stereo};
use crate::audio::spectrum::WindowedSpectrum;
use crate::foundation::error::{IntroError, IntroResult};

/// The soundtrack: decoded once, played with its volume envelope and analysed for the glow.
#[derive(Clone, Debug)]
pub struct AudioTrack {
    path: PathBuf,
    pcm: Arc<AudioPcm>,
    spectrum: WindowedSpectrum,
    envelope: VolumeEnvelope,
}

impl AudioTrack {
    /// Decode the file at `path`.
    ///
    /// A missing or undecodable file is an error here, so that a glow without data at render
    /// time only ever means the frame is not covered by the track.
    #[tracing::instrument]
    pub fn load(path: &Path) -> IntroResult<Self> {
        if !path.is_file() {
            return Err(IntroError::audio(format!(
                "audio asset '{}' not found",
                path.display()
            )));
        }
        let pcm = decode_audio_f32_stereo(path, MIX_SAMPLE_RATE)?;
        if pcm.len_frames() == 0 {
            return Err(IntroError::audio(format!(
                "audio asset '{}' decoded to no samples",
                path.display()
            )));
        }
        tracing::info!(
            path = %path.display(),
            secs = pcm.duration_secs(),
            "decoded soundtrack"
        );
        Ok(Self::from_pcm(path, pcm))
    }

    /// Wrap already decoded PCM.
    pub fn from_pcm(path: impl Into<PathBuf>, pcm: AudioPcm) -> Self {
        let spectrum = WindowedSpectrum::new(Arc::new(pcm.downmix_mono()), pcm.sample_rate);
        Self {
            path: path.into(),
            pcm: Arc::new(pcm),
            spectrum,
            envelope: VolumeEnvelope::default(),
        }
    }

    /// Replace the volume envelope.
    pub fn with_envelope(mut self, envelope: VolumeEnvelope) -> Self {
        self.envelope = envelope;
        self
    }

    /// Source file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Decoded samples.
    pub fn pcm(&self) -> &AudioPcm {
        &self.pcm
    }

    /// Analysis used by the glow.
    pub fn spectrum(&self) -> &WindowedSpectrum {
        &self.spectrum
    }

    /// Playback volume curve.
    pub fn envelope(&self) -> &VolumeEnvelope {
        &self.envelope
    }
}
