use super::*;
use crate::encode::sink::AudioInputConfig;
use crate::foundation::core::Fps;

const SLATE: Rgb8 = Rgb8::new(10, 20, 30);

fn config(audio: Option<AudioInputConfig>) -> SinkConfig {
    SinkConfig {
        width: 1920,
        height: 1080,
        fps: Fps::integer(30).unwrap(),
        audio,
    }
}

fn args_of(opts: &FfmpegSinkOpts, cfg: &SinkConfig) -> Vec<String> {
    opts.ffmpeg_args(cfg)
        .unwrap()
        .into_iter()
        .map(|a| a.to_string_lossy().into_owned())
        .collect()
}

#[test]
fn transparent_pixels_become_background() {
    let mut dst = vec![0u8; 4];
    flatten_over(&mut dst, &[0, 0, 0, 0], SLATE).unwrap();
    assert_eq!(dst, vec![10, 20, 30, 255]);
}

#[test]
fn opaque_pixels_pass_through() {
    let src = vec![1u8, 2, 3, 255];
    let mut dst = vec![0u8; 4];
    flatten_over(&mut dst, &src, SLATE).unwrap();
    assert_eq!(dst, src);
}

#[test]
fn half_transparent_pixels_blend() {
    // 50% white premultiplied over black.
    let mut dst = vec![0u8; 4];
    flatten_over(&mut dst, &[128, 128, 128, 128], Rgb8::new(0, 0, 0)).unwrap();
    assert_eq!(dst, vec![128, 128, 128, 255]);
}

#[test]
fn mismatched_buffers_are_rejected() {
    let mut dst = vec![0u8; 8];
    assert!(flatten_over(&mut dst, &[0u8; 4], SLATE).is_err());
}

#[test]
fn silent_stream_drops_audio() {
    let args = args_of(&FfmpegSinkOpts::new("out/intro.mp4"), &config(None));
    assert_eq!(args[0], "-y");
    assert!(args.windows(2).any(|w| w == ["-s", "1920x1080"]));
    assert!(args.windows(2).any(|w| w == ["-r", "30/1"]));
    assert!(args.contains(&"-an".to_owned()));
    assert!(!args.contains(&"aac".to_owned()));
    assert_eq!(args.last().map(String::as_str), Some("out/intro.mp4"));
}

#[test]
fn soundtrack_is_muxed_as_aac() {
    let mut opts = FfmpegSinkOpts::new("intro.mp4");
    opts.overwrite = false;
    let cfg = config(Some(AudioInputConfig {
        path: PathBuf::from("mix.f32le"),
        sample_rate: 48_000,
        channels: 2,
    }));
    let args = args_of(&opts, &cfg);
    assert_eq!(args[0], "-n");
    assert!(args.windows(2).any(|w| w == ["-i", "mix.f32le"]));
    assert!(args.windows(2).any(|w| w == ["-ar", "48000"]));
    assert!(args.windows(2).any(|w| w == ["-c:a", "aac"]));
    assert!(args.contains(&"-shortest".to_owned()));
    assert!(!args.contains(&"-an".to_owned()));
}

#[test]
fn empty_audio_format_is_rejected() {
    let cfg = config(Some(AudioInputConfig {
        path: PathBuf::from("mix.f32le"),
        sample_rate: 0,
        channels: 2,
    }));
    assert!(FfmpegSinkOpts::new("intro.mp4").ffmpeg_args(&cfg).is_err());
}

#[test]
fn odd_sizes_are_rejected_before_spawning() {
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new(
        std::env::temp_dir().join("prompted_intro_odd.mp4"),
    ));
    let err = sink
        .begin(SinkConfig {
            width: 33,
            height: 20,
            fps: Fps::integer(30).unwrap(),
            audio: None,
        })
        .unwrap_err();
    assert!(err.to_string().contains("even"));
}

#[test]
fn push_and_end_before_begin_fail() {
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new("never.mp4"));
    let frame = FrameRGBA {
        width: 2,
        height: 2,
        data: vec![0; 16],
        premultiplied: true,
    };
    assert!(sink.push_frame(FrameIndex(0), &frame).is_err());
    assert!(sink.end().is_err());
}
