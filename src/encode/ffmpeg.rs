use std::ffi::OsString;
use std::io::{Read as _, Write as _};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};
use std::thread::JoinHandle;

use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{FrameIndex, Rgb8};
use crate::foundation::error::{IntroError, IntroResult};
use crate::foundation::math::mul_div255_u16;
use crate::render::backend::FrameRGBA;

/// Options for [`FfmpegSink`] MP4 output.
#[derive(Clone, Debug)]
pub struct FfmpegSinkOpts {
    /// Output MP4 file path.
    pub out_path: PathBuf,
    /// Overwrite the output file if it already exists.
    pub overwrite: bool,
    /// Colour shown through transparent pixels; yuv420p has no alpha.
    pub background: Rgb8,
}

impl FfmpegSinkOpts {
    /// Options for writing an MP4 to `out_path` over black.
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            overwrite: true,
            background: Rgb8::new(0, 0, 0),
        }
    }

    /// Full `ffmpeg` argument list for a stream described by `cfg`.
    ///
    /// Video arrives on stdin as opaque `rgba` rawvideo; the optional soundtrack is read from
    /// the mixed `f32le` file and encoded as AAC, cut to the video length.
    pub fn ffmpeg_args(&self, cfg: &SinkConfig) -> IntroResult<Vec<OsString>> {
        let mut args = os_args(&[if self.overwrite { "-y" } else { "-n" }, "-loglevel", "error"]);
        args.extend(os_args(&[
            "-f",
            "rawvideo",
            "-pix_fmt",
            "rgba",
            "-s",
            &format!("{}x{}", cfg.width, cfg.height),
            // Rate before `-i` applies to the raw input.
            "-r",
            &format!("{}/{}", cfg.fps.num, cfg.fps.den),
            "-i",
            "pipe:0",
        ]));

        match &cfg.audio {
            Some(audio) => {
                if audio.sample_rate == 0 || audio.channels == 0 {
                    return Err(IntroError::validation(
                        "audio sample_rate and channels must be non-zero when audio is enabled",
                    ));
                }
                args.extend(os_args(&[
                    "-f",
                    "f32le",
                    "-ar",
                    &audio.sample_rate.to_string(),
                    "-ac",
                    &audio.channels.to_string(),
                    "-i",
                ]));
                args.push(audio.path.clone().into_os_string());
                args.extend(os_args(&["-c:a", "aac", "-shortest"]));
            }
            None => args.push(OsString::from("-an")),
        }

        args.extend(os_args(&[
            "-c:v",
            "libx264",
            "-pix_fmt",
            "yuv420p",
            "-movflags",
            "+faststart",
        ]));
        args.push(self.out_path.clone().into_os_string());
        Ok(args)
    }
}

fn os_args(items: &[&str]) -> Vec<OsString> {
    items.iter().map(OsString::from).collect()
}

/// A running `ffmpeg` process for one range render.
struct Encoder {
    child: Child,
    stdin: ChildStdin,
    stderr: JoinHandle<std::io::Result<String>>,
    width: u32,
    height: u32,
    last: Option<FrameIndex>,
    opaque: Vec<u8>,
}

impl Encoder {
    fn spawn(args: Vec<OsString>, cfg: &SinkConfig) -> IntroResult<Self> {
        let mut child = Command::new("ffmpeg")
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| IntroError::render(format!("failed to spawn ffmpeg: {e}")))?;

        let (Some(stdin), Some(mut stderr)) = (child.stdin.take(), child.stderr.take()) else {
            let _ = child.kill();
            return Err(IntroError::render("ffmpeg pipes were not opened"));
        };
        // A full stderr pipe would stall ffmpeg mid-stream.
        let stderr = std::thread::Builder::new()
            .name("ffmpeg-stderr".to_owned())
            .spawn(move || {
                let mut log = String::new();
                stderr.read_to_string(&mut log)?;
                Ok(log)
            })
            .map_err(|e| IntroError::render(format!("failed to start stderr reader: {e}")))?;

        Ok(Self {
            child,
            stdin,
            stderr,
            width: cfg.width,
            height: cfg.height,
            last: None,
            opaque: vec![0; cfg.width as usize * cfg.height as usize * 4],
        })
    }

    fn write(&mut self, idx: FrameIndex, frame: &FrameRGBA, background: Rgb8) -> IntroResult<()> {
        if self.last.is_some_and(|last| idx <= last) {
            return Err(IntroError::render(format!(
                "ffmpeg sink received frame {} out of order",
                idx.0
            )));
        }
        if (frame.width, frame.height) != (self.width, self.height) {
            return Err(IntroError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, self.width, self.height
            )));
        }
        flatten_over(&mut self.opaque, &frame.data, background)?;
        self.stdin
            .write_all(&self.opaque)
            .map_err(|e| IntroError::render(format!("failed to write frame {}: {e}", idx.0)))?;
        self.last = Some(idx);
        Ok(())
    }

    fn finish(self) -> IntroResult<()> {
        let Self {
            mut child,
            stdin,
            stderr,
            ..
        } = self;
        // Closing stdin signals end of stream.
        drop(stdin);
        let status = child
            .wait()
            .map_err(|e| IntroError::render(format!("failed to wait for ffmpeg: {e}")))?;
        let log = stderr
            .join()
            .map_err(|_| IntroError::render("ffmpeg stderr reader panicked"))?
            .map_err(|e| IntroError::render(format!("failed to read ffmpeg stderr: {e}")))?;
        if !status.success() {
            return Err(IntroError::render(format!(
                "ffmpeg exited with {status}: {}",
                log.trim()
            )));
        }
        Ok(())
    }
}

/// Sink that streams frames into the system `ffmpeg`, producing h264/yuv420p MP4 with an
/// optional AAC soundtrack.
pub struct FfmpegSink {
    opts: FfmpegSinkOpts,
    encoder: Option<Encoder>,
}

impl FfmpegSink {
    /// Sink writing to `opts.out_path`; nothing is spawned until `begin`.
    pub fn new(opts: FfmpegSinkOpts) -> Self {
        Self {
            opts,
            encoder: None,
        }
    }
}

impl std::fmt::Debug for FfmpegSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FfmpegSink")
            .field("opts", &self.opts)
            .field("running", &self.encoder.is_some())
            .finish()
    }
}

fn check_video_size(cfg: &SinkConfig) -> IntroResult<()> {
    if cfg.width == 0 || cfg.height == 0 {
        return Err(IntroError::validation("video size must be non-zero"));
    }
    if !cfg.width.is_multiple_of(2) || !cfg.height.is_multiple_of(2) {
        return Err(IntroError::validation(format!(
            "video size {}x{} must be even for yuv420p",
            cfg.width, cfg.height
        )));
    }
    Ok(())
}

impl FrameSink for FfmpegSink {
    #[tracing::instrument(skip_all, fields(out = %self.opts.out_path.display()))]
    fn begin(&mut self, cfg: SinkConfig) -> IntroResult<()> {
        if self.encoder.is_some() {
            return Err(IntroError::render("ffmpeg sink already started"));
        }
        check_video_size(&cfg)?;
        ensure_parent_dir(&self.opts.out_path)?;
        if !self.opts.overwrite && self.opts.out_path.exists() {
            return Err(IntroError::validation(format!(
                "output file '{}' already exists",
                self.opts.out_path.display()
            )));
        }
        if !is_ffmpeg_on_path() {
            return Err(IntroError::render(
                "ffmpeg is required for MP4 output but was not found on PATH",
            ));
        }

        let args = self.opts.ffmpeg_args(&cfg)?;
        self.encoder = Some(Encoder::spawn(args, &cfg)?);
        tracing::info!(
            width = cfg.width,
            height = cfg.height,
            audio = cfg.audio.is_some(),
            "ffmpeg started"
        );
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> IntroResult<()> {
        let background = self.opts.background;
        self.encoder
            .as_mut()
            .ok_or_else(|| IntroError::render("ffmpeg sink not started"))?
            .write(idx, frame, background)
    }

    fn end(&mut self) -> IntroResult<()> {
        self.encoder
            .take()
            .ok_or_else(|| IntroError::render("ffmpeg sink not started"))?
            .finish()?;
        tracing::info!(out = %self.opts.out_path.display(), "ffmpeg finished");
        Ok(())
    }
}

/// Composite premultiplied RGBA8 `src` over an opaque `background` into `dst`.
pub fn flatten_over(dst: &mut [u8], src: &[u8], background: Rgb8) -> IntroResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(IntroError::validation(
            "flatten expects equal-length rgba8 buffers",
        ));
    }
    let bg = [background.r, background.g, background.b].map(u16::from);
    for (out, px) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let cover = 255 - u16::from(px[3]);
        for c in 0..3 {
            out[c] = (u16::from(px[c]) + mul_div255_u16(bg[c], cover)).min(255) as u8;
        }
        out[3] = 255;
    }
    Ok(())
}

/// Create the parent directory of `path` when it has one.
pub fn ensure_parent_dir(path: &Path) -> IntroResult<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            std::fs::create_dir_all(parent).map_err(|e| {
                IntroError::render(format!(
                    "failed to create output directory '{}': {e}",
                    parent.display()
                ))
            })
        }
        _ => Ok(()),
    }
}

/// Return `true` when `ffmpeg` can be invoked from `PATH`.
pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok_and(|s| s.success())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
