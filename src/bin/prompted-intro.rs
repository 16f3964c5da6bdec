use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use sha2::Digest as _;

use prompted_intro::{
    FfmpegSink, FfmpegSinkOpts, Fps, FrameIndex, FrameRange, FrameSink, IntroComposition,
    IntroConfig, PngSequenceSink, RenderOpts, RenderSettings, RenderThreading, SvgBackend,
    connections, particles, render_frame, render_to_sink, write_png,
};

#[derive(Parser, Debug)]
#[command(name = "prompted-intro", version, about = "Render the PromptedIntro video intro")]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Args, Debug)]
struct GlobalArgs {
    /// Intro config JSON; defaults reproduce the original intro.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the frame rate (integer fps).
    #[arg(long, global = true)]
    fps: Option<u32>,

    /// Override the typed title.
    #[arg(long, global = true)]
    title: Option<String>,

    /// Override the caption under the title.
    #[arg(long, global = true)]
    caption: Option<String>,

    /// Override the soundtrack file.
    #[arg(long, global = true)]
    audio: Option<PathBuf>,

    /// Ignore the soundtrack (no glow, silent video).
    #[arg(long, global = true, default_value_t = false)]
    no_audio: bool,

    /// Extra font directory.
    #[arg(long, global = true)]
    fonts_dir: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print composition facts.
    Info(InfoArgs),
    /// Print the scene graph of one frame as JSON.
    Scene(SceneArgs),
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Render a range to MP4 (requires `ffmpeg` on PATH) or to a PNG sequence.
    Render(RenderArgs),
}

#[derive(Args, Debug)]
struct InfoArgs {
    /// Also report which font files the title and caption resolve to.
    #[arg(long, default_value_t = false)]
    fonts: bool,
}

#[derive(Args, Debug)]
struct SceneArgs {
    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Write to a file instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct FrameArgs {
    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Output pixels per canvas pixel.
    #[arg(long, default_value_t = 1.0)]
    scale: f64,
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Output MP4 path.
    #[arg(long, required_unless_present = "png_dir", conflicts_with = "png_dir")]
    out: Option<PathBuf>,

    /// Write numbered PNG files into this directory instead of an MP4.
    #[arg(long)]
    png_dir: Option<PathBuf>,

    /// Half-open frame range `a..b`; defaults to the whole intro.
    #[arg(long)]
    frames: Option<String>,

    /// Output pixels per canvas pixel.
    #[arg(long, default_value_t = 1.0)]
    scale: f64,

    /// Enable frame-level parallelism.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,

    /// Render chunk size.
    #[arg(long, default_value_t = 64)]
    chunk_size: usize,

    /// Rasterize identical scenes once per chunk.
    #[arg(long, default_value_t = false)]
    static_frame_elision: bool,

    /// Fail instead of replacing an existing MP4.
    #[arg(long, default_value_t = false)]
    no_overwrite: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.global.verbose);

    let cfg = load_config(&cli.global)?;
    match cli.cmd {
        Command::Info(args) => cmd_info(&cfg, args),
        Command::Scene(args) => cmd_scene(&cfg, args),
        Command::Frame(args) => cmd_frame(&cfg, args),
        Command::Render(args) => cmd_render(&cfg, args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();
}

fn load_config(g: &GlobalArgs) -> anyhow::Result<IntroConfig> {
    let mut cfg = match &g.config {
        Some(path) => IntroConfig::from_path(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => IntroConfig::default(),
    };
    if let Some(fps) = g.fps {
        cfg.fps = Fps::integer(fps)?;
    }
    if let Some(title) = &g.title {
        cfg.title = title.clone();
    }
    if let Some(caption) = &g.caption {
        cfg.host_caption = caption.clone();
    }
    if let Some(audio) = &g.audio {
        cfg.audio = Some(audio.clone());
    }
    if let Some(dir) = &g.fonts_dir {
        cfg.fonts_dir = Some(dir.clone());
    }
    if g.no_audio {
        cfg.audio = None;
    }
    cfg.validate().context("invalid intro config")?;
    Ok(cfg)
}

fn backend(cfg: &IntroConfig, scale: f64) -> anyhow::Result<SvgBackend> {
    SvgBackend::new(RenderSettings {
        scale,
        clear_rgba: None,
        fonts_dir: cfg.fonts_dir.clone(),
    })
    .context("create render backend")
}

fn cmd_info(cfg: &IntroConfig, args: InfoArgs) -> anyhow::Result<()> {
    let comp = IntroComposition::load(cfg)?;
    let fps = comp.fps();
    println!("id:          {}", comp.id());
    println!("canvas:      {}x{}", comp.canvas().width, comp.canvas().height);
    println!("fps:         {}/{}", fps.num, fps.den);
    println!(
        "duration:    {} frames ({:.2}s)",
        comp.duration_frames(),
        fps.frames_to_secs(comp.duration_frames())
    );
    println!("particles:   {}", particles().len());
    println!("connections: {}", connections().len());
    println!("layers:");
    for seq in comp.sequences() {
        println!(
            "  {:<13} from {:>4}  premount {:>3}",
            seq.name(),
            seq.from_frame(),
            seq.premount_frames()
        );
    }
    match comp.audio() {
        Some(track) => println!(
            "audio:       {} ({:.2}s, {} Hz, {} ch)",
            track.path().display(),
            track.pcm().duration_secs(),
            track.pcm().sample_rate,
            track.pcm().channels
        ),
        None => println!("audio:       none"),
    }

    if args.fonts {
        dump_font_diagnostics(cfg.fonts_dir.as_deref());
    }
    Ok(())
}

fn cmd_scene(cfg: &IntroConfig, args: SceneArgs) -> anyhow::Result<()> {
    let comp = IntroComposition::load(cfg)?;
    let scene = comp.evaluate(FrameIndex(args.frame))?;
    let json = serde_json::to_string_pretty(&scene).context("serialize scene")?;
    match args.out {
        Some(path) => {
            prompted_intro::encode::ffmpeg::ensure_parent_dir(&path)?;
            std::fs::write(&path, json)
                .with_context(|| format!("write scene '{}'", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn cmd_frame(cfg: &IntroConfig, args: FrameArgs) -> anyhow::Result<()> {
    let comp = IntroComposition::load(cfg)?;
    let mut backend = backend(cfg, args.scale)?;
    let frame = render_frame(&comp, FrameIndex(args.frame), &mut backend)
        .with_context(|| format!("render frame {}", args.frame))?;
    write_png(&args.out, &frame)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

/// Output of `render`: the sink, where it writes, and whether it takes a soundtrack.
struct RenderTarget {
    sink: Box<dyn FrameSink>,
    path: PathBuf,
    muxes_audio: bool,
}

impl RenderTarget {
    fn select(
        out: Option<PathBuf>,
        png_dir: Option<PathBuf>,
        no_overwrite: bool,
    ) -> anyhow::Result<Self> {
        match (out, png_dir) {
            (Some(out), _) => {
                let mut opts = FfmpegSinkOpts::new(&out);
                opts.overwrite = !no_overwrite;
                Ok(Self {
                    sink: Box::new(FfmpegSink::new(opts)),
                    path: out,
                    muxes_audio: true,
                })
            }
            // PNG frames carry no audio, so nothing is mixed for them.
            (None, Some(dir)) => Ok(Self {
                sink: Box::new(PngSequenceSink::new(&dir)),
                path: dir,
                muxes_audio: false,
            }),
            (None, None) => anyhow::bail!("either --out or --png-dir is required"),
        }
    }
}

fn cmd_render(cfg: &IntroConfig, args: RenderArgs) -> anyhow::Result<()> {
    let comp = IntroComposition::load(cfg)?;
    let range = match args.frames.as_deref() {
        Some(s) => FrameRange::parse(s)?,
        None => comp.range(),
    };
    let mut backend = backend(cfg, args.scale)?;

    let RenderTarget {
        mut sink,
        path: target,
        muxes_audio,
    } = RenderTarget::select(args.out, args.png_dir, args.no_overwrite)?;

    let opts = RenderOpts {
        range,
        threading: RenderThreading {
            parallel: args.parallel,
            chunk_size: args.chunk_size,
            threads: args.threads,
            static_frame_elision: args.static_frame_elision,
        },
        audio: muxes_audio && comp.audio().is_some(),
    };
    let stats = render_to_sink(&comp, &mut backend, sink.as_mut(), &opts)
        .with_context(|| format!("render {}..{}", range.start.0, range.end.0))?;

    eprintln!(
        "wrote {} ({} frames, {} rendered, {} elided)",
        target.display(),
        stats.frames_total,
        stats.frames_rendered,
        stats.frames_elided
    );
    Ok(())
}

fn dump_font_diagnostics(fonts_dir: Option<&Path>) {
    let db = prompted_intro::render::raster::build_fontdb(fonts_dir);
    eprintln!("font diagnostics ({} faces):", db.len());
    for (label, family, generic, weight) in [
        ("title", "JetBrains Mono", usvg::fontdb::Family::Monospace, 700),
        ("caption", "Montserrat", usvg::fontdb::Family::SansSerif, 400),
    ] {
        let families = [usvg::fontdb::Family::Name(family), generic];
        let query = usvg::fontdb::Query {
            families: &families,
            weight: usvg::fontdb::Weight(weight),
            ..Default::default()
        };
        let Some(id) = db.query(&query) else {
            eprintln!("  {label}: no face for '{family}'");
            continue;
        };
        let name = db
            .face(id)
            .and_then(|f| f.families.first().map(|(n, _)| n.clone()))
            .unwrap_or_default();
        let sha = db.with_face_data(id, |data, _| sha256_hex(data));
        eprintln!("  {label}:");
        eprintln!("    requested: {family}");
        eprintln!("    resolved:  {name}");
        eprintln!("    sha256:    {}", sha.unwrap_or_else(|| "-".to_owned()));
    }
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        out.push_str(&format!("{b:02x}"));
    }
    out
}
