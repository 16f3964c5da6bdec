use super::*;
use crate::audio::pcm::AudioPcm;
use crate::audio::track::AudioTrack;
use crate::config::IntroConfig;
use crate::foundation::core::Canvas;
use crate::scene::components::Background;

fn small_intro() -> IntroComposition {
    IntroComposition::from_config(&IntroConfig::default()).unwrap()
}

fn backend() -> SvgBackend {
    SvgBackend::new(RenderSettings {
        scale: 0.1,
        ..RenderSettings::default()
    })
    .unwrap()
}

fn range(a: u64, b: u64) -> FrameRange {
    FrameRange::new(FrameIndex(a), FrameIndex(b)).unwrap()
}

#[test]
fn single_frame_has_scaled_size() {
    let frame = render_frame(&small_intro(), FrameIndex(200), &mut backend()).unwrap();
    assert_eq!((frame.width, frame.height), (192, 108));
    assert_eq!(frame.data.len(), 192 * 108 * 4);
}

#[test]
fn sink_receives_frames_in_order() {
    let comp = small_intro();
    let mut sink = InMemorySink::new();
    let mut opts = RenderOpts::new(range(100, 110));
    opts.threading.chunk_size = 3;
    let stats = render_to_sink(&comp, &mut backend(), &mut sink, &opts).unwrap();

    assert!(sink.is_finished());
    assert_eq!(stats.frames_total, 10);
    let idx: Vec<u64> = sink.frames().iter().map(|(i, _)| i.0).collect();
    assert_eq!(idx, (100..110).collect::<Vec<_>>());
    let cfg = sink.config().unwrap();
    assert_eq!((cfg.width, cfg.height), (192, 108));
    assert!(cfg.audio.is_none());
}

#[test]
fn parallel_matches_sequential() {
    let comp = small_intro();
    let r = range(110, 130);
    let (seq, _) = render_frames(&comp, r, &mut backend(), &RenderThreading::default()).unwrap();
    let threading = RenderThreading {
        parallel: true,
        chunk_size: 7,
        threads: Some(3),
        static_frame_elision: false,
    };
    let (par, stats) = render_frames(&comp, r, &mut backend(), &threading).unwrap();
    assert_eq!(stats.frames_rendered, 20);
    assert_eq!(seq.len(), par.len());
    for (a, b) in seq.iter().zip(&par) {
        assert_eq!(a, b);
    }
}

#[test]
fn identical_scenes_are_elided() {
    let comp = IntroComposition::builder(
        "still",
        crate::foundation::core::Fps::integer(30).unwrap(),
        Canvas {
            width: 32,
            height: 32,
        },
        60,
    )
    .layer(Background)
    .build()
    .unwrap();
    let threading = RenderThreading {
        static_frame_elision: true,
        chunk_size: 60,
        ..RenderThreading::default()
    };
    let (frames, stats) = render_frames(&comp, range(20, 60), &mut backend(), &threading).unwrap();
    // Background is fully faded in from frame 15 on.
    assert_eq!(frames.len(), 40);
    assert_eq!(stats.frames_rendered, 1);
    assert_eq!(stats.frames_elided, 39);
    assert!(frames.windows(2).all(|w| w[0] == w[1]));
}

#[test]
fn out_of_range_and_empty_ranges_fail() {
    let comp = small_intro();
    let mut sink = InMemorySink::new();
    let err = render_to_sink(&comp, &mut backend(), &mut sink, &RenderOpts::new(range(440, 460)))
        .unwrap_err();
    assert!(matches!(err, IntroError::Validation(_)));
    assert!(render_to_sink(&comp, &mut backend(), &mut sink, &RenderOpts::new(range(5, 5))).is_err());
    assert!(sink.config().is_none());
}

#[test]
fn zero_threads_is_rejected() {
    let threading = RenderThreading {
        parallel: true,
        threads: Some(0),
        ..RenderThreading::default()
    };
    assert!(render_frames(&small_intro(), range(0, 2), &mut backend(), &threading).is_err());
}

#[test]
fn soundtrack_is_mixed_for_the_sink() {
    let pcm = AudioPcm {
        sample_rate: 48_000,
        channels: 2,
        interleaved_f32: vec![0.25; 48_000 * 2],
    };
    let comp = small_intro().with_audio(AudioTrack::from_pcm("tone.wav", pcm));
    let mut sink = InMemorySink::new();
    render_to_sink(&comp, &mut backend(), &mut sink, &RenderOpts::new(range(0, 2))).unwrap();
    let audio = sink.config().and_then(|c| c.audio.clone()).unwrap();
    assert_eq!(audio.sample_rate, 48_000);
    assert_eq!(audio.channels, 2);
    // The temporary mix is removed once the render returns.
    assert!(!audio.path.exists());

    let mut silent = InMemorySink::new();
    let mut opts = RenderOpts::new(range(0, 2));
    opts.audio = false;
    render_to_sink(&comp, &mut backend(), &mut silent, &opts).unwrap();
    assert!(silent.config().unwrap().audio.is_none());
}
