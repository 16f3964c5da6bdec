use std::collections::HashMap;
use std::sync::Arc;

use rayon::prelude::*;

use crate::audio::pcm::write_f32le_file;
use crate::composition::timeline::IntroComposition;
use crate::encode::sink::{AudioInputConfig, FrameSink, InMemorySink, SinkConfig};
use crate::foundation::core::{FrameIndex, FrameRange};
use crate::foundation::error::{IntroError, IntroResult};
use crate::render::backend::{FrameRGBA, RenderBackend, RenderSettings};
use crate::render::fingerprint::{SceneFingerprint, fingerprint_scene};
use crate::render::raster::{SvgBackend, build_fontdb};
use crate::render::svg::output_size;
use crate::scene::model::FrameScene;

/// Evaluate and rasterize a single frame.
pub fn render_frame(
    comp: &IntroComposition,
    frame: FrameIndex,
    backend: &mut dyn RenderBackend,
) -> IntroResult<FrameRGBA> {
    let scene = comp.evaluate(frame)?;
    backend.render_scene(&scene)
}

/// Threading and chunking controls for multi-frame rendering.
#[derive(Clone, Debug)]
pub struct RenderThreading {
    /// Enable parallel rendering when `true`.
    pub parallel: bool,
    /// Chunk size in frames for batched scheduling.
    pub chunk_size: usize,
    /// Optional explicit worker thread count.
    pub threads: Option<usize>,
    /// Render frames with identical scenes once and reuse the pixels.
    pub static_frame_elision: bool,
}

impl Default for RenderThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 64,
            threads: None,
            static_frame_elision: false,
        }
    }
}

/// Aggregated rendering counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Total requested frames.
    pub frames_total: u64,
    /// Frames that were actually rasterized.
    pub frames_rendered: u64,
    /// Frames reused via static-frame elision.
    pub frames_elided: u64,
}

impl RenderStats {
    fn add(&mut self, other: RenderStats) {
        self.frames_total += other.frames_total;
        self.frames_rendered += other.frames_rendered;
        self.frames_elided += other.frames_elided;
    }
}

/// Options for [`render_to_sink`].
#[derive(Clone, Debug)]
pub struct RenderOpts {
    /// Frame range to render (start inclusive, end exclusive).
    pub range: FrameRange,
    /// Threading/chunking configuration.
    pub threading: RenderThreading,
    /// Hand the mixed soundtrack to the sink when the composition has one.
    pub audio: bool,
}

impl RenderOpts {
    /// Render `range` sequentially with audio.
    pub fn new(range: FrameRange) -> Self {
        Self {
            range,
            threading: RenderThreading::default(),
            audio: true,
        }
    }
}

/// Render a range of frames into `sink`, delivering them in strictly increasing order.
///
/// Parallel rendering needs [`RenderBackend::worker_render_settings`]; each rayon worker then
/// gets its own [`SvgBackend`] sharing one font database.
#[tracing::instrument(
    skip_all,
    fields(
        id = %comp.id(),
        start = opts.range.start.0,
        end = opts.range.end.0,
        parallel = opts.threading.parallel
    )
)]
pub fn render_to_sink(
    comp: &IntroComposition,
    backend: &mut dyn RenderBackend,
    sink: &mut dyn FrameSink,
    opts: &RenderOpts,
) -> IntroResult<RenderStats> {
    if opts.range.is_empty() {
        return Err(IntroError::validation("render range must be non-empty"));
    }
    comp.check_range(opts.range)?;

    let worker_settings = backend.worker_render_settings();
    let scale = worker_settings.as_ref().map_or(1.0, |s| s.scale);
    let (width, height) = output_size(comp.canvas(), scale)?;

    let mut workers = None;
    if opts.threading.parallel {
        let settings = worker_settings.ok_or_else(|| {
            IntroError::render("parallel render requires backend worker settings support")
        })?;
        let fontdb = build_fontdb(settings.fonts_dir.as_deref());
        workers = Some(Workers {
            pool: build_thread_pool(opts.threading.threads)?,
            settings,
            fontdb,
        });
    }

    let mut audio_tmp = TempFileGuard(None);
    let audio = if opts.audio {
        mix_audio_to_temp(comp, opts.range, &mut audio_tmp)?
    } else {
        None
    };

    sink.begin(SinkConfig {
        width,
        height,
        fps: comp.fps(),
        audio,
    })?;

    let chunk_size = normalized_chunk_size(opts.threading.chunk_size);
    let mut stats = RenderStats::default();
    let mut chunk_start = opts.range.start.0;
    while chunk_start < opts.range.end.0 {
        let chunk_end = (chunk_start + chunk_size).min(opts.range.end.0);
        let chunk = FrameRange::new(FrameIndex(chunk_start), FrameIndex(chunk_end))?;
        let scenes = comp.evaluate_range(chunk)?;
        let plan = ChunkPlan::new(&scenes, opts.threading.static_frame_elision)?;

        let unique_frames = match workers.as_ref() {
            Some(w) => w.render(&scenes, &plan.unique)?,
            None => plan
                .unique
                .iter()
                .map(|&i| backend.render_scene(&scenes[i]))
                .collect::<IntroResult<Vec<_>>>()?,
        };

        for (offset, &u) in plan.frame_to_unique.iter().enumerate() {
            let frame = unique_frames.get(u).ok_or_else(|| {
                IntroError::render("internal error: unique frame index out of range")
            })?;
            sink.push_frame(FrameIndex(chunk_start + offset as u64), frame)?;
        }

        stats.add(plan.stats());
        tracing::debug!(chunk_start, chunk_end, "chunk delivered");
        chunk_start = chunk_end;
    }

    sink.end()?;
    drop(audio_tmp);
    tracing::info!(
        frames = stats.frames_total,
        rendered = stats.frames_rendered,
        elided = stats.frames_elided,
        "render finished"
    );
    Ok(stats)
}

/// Render a range into memory.
pub fn render_frames(
    comp: &IntroComposition,
    range: FrameRange,
    backend: &mut dyn RenderBackend,
    threading: &RenderThreading,
) -> IntroResult<(Vec<FrameRGBA>, RenderStats)> {
    let mut sink = InMemorySink::new();
    let opts = RenderOpts {
        range,
        threading: threading.clone(),
        audio: false,
    };
    let stats = render_to_sink(comp, backend, &mut sink, &opts)?;
    let frames = sink.into_frames().into_iter().map(|(_, f)| f).collect();
    Ok((frames, stats))
}

struct Workers {
    pool: rayon::ThreadPool,
    settings: RenderSettings,
    fontdb: Arc<usvg::fontdb::Database>,
}

impl Workers {
    fn render(&self, scenes: &[FrameScene], unique: &[usize]) -> IntroResult<Vec<FrameRGBA>> {
        let rendered = self.pool.install(|| {
            unique
                .par_iter()
                .map_init(
                    || SvgBackend::with_fontdb(self.settings.clone(), self.fontdb.clone()),
                    |worker, &idx| -> IntroResult<FrameRGBA> {
                        match worker {
                            Ok(backend) => backend.render_scene(&scenes[idx]),
                            Err(e) => Err(IntroError::render(format!(
                                "failed to build worker backend: {e}"
                            ))),
                        }
                    },
                )
                .collect::<Vec<_>>()
        });
        rendered.into_iter().collect()
    }
}

/// Which scenes of a chunk need rasterizing, and which rendered frame each scene maps to.
struct ChunkPlan {
    unique: Vec<usize>,
    frame_to_unique: Vec<usize>,
}

impl ChunkPlan {
    fn new(scenes: &[FrameScene], elide: bool) -> IntroResult<Self> {
        let mut unique = Vec::with_capacity(scenes.len());
        let mut frame_to_unique = Vec::with_capacity(scenes.len());
        if !elide {
            unique.extend(0..scenes.len());
            frame_to_unique.extend(0..scenes.len());
            return Ok(Self {
                unique,
                frame_to_unique,
            });
        }

        let mut first = HashMap::<SceneFingerprint, usize>::new();
        for (idx, scene) in scenes.iter().enumerate() {
            let fp = fingerprint_scene(scene)?;
            let slot = *first.entry(fp).or_insert_with(|| {
                unique.push(idx);
                unique.len() - 1
            });
            frame_to_unique.push(slot);
        }
        Ok(Self {
            unique,
            frame_to_unique,
        })
    }

    fn stats(&self) -> RenderStats {
        let total = self.frame_to_unique.len() as u64;
        let rendered = self.unique.len() as u64;
        RenderStats {
            frames_total: total,
            frames_rendered: rendered,
            frames_elided: total - rendered,
        }
    }
}

fn mix_audio_to_temp(
    comp: &IntroComposition,
    range: FrameRange,
    guard: &mut TempFileGuard,
) -> IntroResult<Option<AudioInputConfig>> {
    let Some(track) = comp.audio() else {
        return Ok(None);
    };
    let pcm = track.pcm();
    let mixed = track.envelope().mix(pcm, range, comp.fps());
    let path = std::env::temp_dir().join(format!(
        "prompted_intro_audio_mix_{}_{}.f32le",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0)
    ));
    write_f32le_file(&mixed, &path)?;
    guard.0 = Some(path.clone());
    tracing::debug!(path = %path.display(), samples = mixed.len(), "soundtrack mixed");
    Ok(Some(AudioInputConfig {
        path,
        sample_rate: pcm.sample_rate,
        channels: pcm.channels,
    }))
}

fn build_thread_pool(threads: Option<usize>) -> IntroResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(IntroError::validation(
            "render threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| IntroError::render(format!("failed to build rayon thread pool: {e}")))
}

fn normalized_chunk_size(chunk_size: usize) -> u64 {
    chunk_size.max(1) as u64
}

struct TempFileGuard(Option<std::path::PathBuf>);

impl Drop for TempFileGuard {
    fn drop(&mut self) {
        if let Some(path) = self.0.take() {
            let _ = std::fs::remove_file(path);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
