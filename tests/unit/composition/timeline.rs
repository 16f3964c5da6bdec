use super::*;
use crate::audio::pcm::AudioPcm;

fn intro() -> IntroComposition {
    IntroComposition::from_config(&IntroConfig::default()).unwrap()
}

fn intro_at(fps: u32) -> IntroComposition {
    let cfg = IntroConfig {
        fps: Fps::integer(fps).unwrap(),
        ..IntroConfig::default()
    };
    IntroComposition::from_config(&cfg).unwrap()
}

fn layer_names(scene: &FrameScene) -> Vec<&str> {
    scene.layers.iter().map(|l| l.name.as_str()).collect()
}

#[test]
fn default_composition_identity() {
    let comp = intro();
    assert_eq!(comp.id(), "PromptedIntro");
    assert_eq!(comp.canvas(), Canvas { width: 1920, height: 1080 });
    assert_eq!(comp.fps(), Fps::integer(30).unwrap());
    assert_eq!(comp.duration_frames(), 450);
    let names: Vec<_> = comp.sequences().iter().map(Sequence::name).collect();
    assert_eq!(
        names,
        [
            "background",
            "node_network",
            "particles",
            "typed_title",
            "host_name",
            "audio_glow",
            "fade_out"
        ]
    );
}

#[test]
fn sequence_offsets_scale_with_fps() {
    for fps in [24_u32, 30, 60] {
        let comp = intro_at(fps);
        let title = &comp.sequences()[3];
        assert_eq!(title.from_frame(), u64::from(fps) * 4);
        assert_eq!(title.premount_frames(), u64::from(fps));
        let fade = &comp.sequences()[6];
        assert_eq!(fade.from_frame(), u64::from(fps) * 13);
        assert_eq!(fade.premount_frames(), Fps::integer(fps).unwrap().secs_to_frames(0.5));
    }
}

#[test]
fn layers_are_hidden_then_premounted_then_active() {
    let comp = intro();
    let title = &comp.sequences()[3];
    assert_eq!(title.state(FrameIndex(89)), SequenceState::Hidden);
    assert_eq!(title.state(FrameIndex(90)), SequenceState::Premounted);
    assert_eq!(title.state(FrameIndex(119)), SequenceState::Premounted);
    assert_eq!(title.state(FrameIndex(120)), SequenceState::Active { local: 0 });
    assert_eq!(title.state(FrameIndex(200)), SequenceState::Active { local: 80 });

    let early = comp.evaluate(FrameIndex(10)).unwrap();
    assert_eq!(layer_names(&early), ["background", "node_network", "particles"]);
    assert!(early.premounted.is_empty());

    let warming = comp.evaluate(FrameIndex(100)).unwrap();
    assert_eq!(warming.premounted, ["typed_title"]);
    assert!(!layer_names(&warming).contains(&"typed_title"));

    let late = comp.evaluate(FrameIndex(220)).unwrap();
    assert_eq!(late.premounted, ["host_name", "audio_glow"]);

    let end = comp.evaluate(FrameIndex(449)).unwrap();
    assert_eq!(
        layer_names(&end),
        ["background", "node_network", "particles", "typed_title", "host_name", "fade_out"]
    );
}

#[test]
fn evaluation_rejects_frames_past_the_end() {
    let comp = intro();
    let err = comp.evaluate(FrameIndex(450)).unwrap_err();
    assert!(matches!(err, IntroError::Validation(_)));
    assert!(comp
        .evaluate_range(FrameRange::new(FrameIndex(440), FrameIndex(451)).unwrap())
        .is_err());
}

#[test]
fn evaluation_order_does_not_matter() {
    let comp = intro();
    let frames = [449_u64, 0, 301, 120, 7, 300, 260];
    let shuffled: Vec<_> = frames
        .iter()
        .map(|&f| comp.evaluate(FrameIndex(f)).unwrap())
        .collect();

    let fresh = intro();
    let in_order = fresh
        .evaluate_range(FrameRange::new(FrameIndex(0), FrameIndex(450)).unwrap())
        .unwrap();
    for (scene, &f) in shuffled.iter().zip(&frames) {
        assert_eq!(scene, &in_order[f as usize]);
    }
}

fn tone_track(secs: f32) -> AudioTrack {
    let sr = 48_000_u32;
    let samples: Vec<f32> = (0..(sr as f32 * secs) as usize)
        .flat_map(|i| {
            let v = (2.0 * std::f32::consts::PI * 375.0 * i as f32 / sr as f32).sin() * 0.8;
            [v, v]
        })
        .collect();
    AudioTrack::from_pcm(
        "tone.wav",
        AudioPcm {
            sample_rate: sr,
            channels: 2,
            interleaved_f32: samples,
        },
    )
}

fn glow_layer(scene: &FrameScene) -> Option<&crate::scene::model::Layer> {
    scene.layers.iter().find(|l| l.name == "audio_glow")
}

#[test]
fn glow_needs_a_soundtrack() {
    let silent = intro();
    let scene = silent.evaluate(FrameIndex(300)).unwrap();
    assert!(!layer_names(&scene).contains(&"audio_glow"));

    let loud = intro().with_audio(tone_track(16.0));
    assert_eq!(loud.audio_path(), Some(Path::new("tone.wav")));
    let scene = loud.evaluate(FrameIndex(300)).unwrap();
    let glow = glow_layer(&scene).expect("glow layer");
    assert!(glow.scale > 1.0);
}

#[test]
fn glow_reads_the_track_from_its_own_start() {
    // Frame 300 is 10 s into the intro but 2 s into the glow sequence.
    let comp = intro().with_audio(tone_track(10.0));
    let scene = comp.evaluate(FrameIndex(300)).unwrap();
    assert!(glow_layer(&scene).expect("glow layer").scale > 1.0);

    // A 1 s track is exhausted by 2 s of glow time.
    let short = intro().with_audio(tone_track(1.0));
    assert!(glow_layer(&short.evaluate(FrameIndex(255)).unwrap()).is_some());
    assert!(glow_layer(&short.evaluate(FrameIndex(300)).unwrap()).is_none());
}

#[test]
fn volume_follows_envelope() {
    let comp = intro();
    assert_eq!(comp.volume_at(FrameIndex(0)), 0.0);
    assert!((comp.volume_at(FrameIndex(15)) - 1.0).abs() < 1e-12);
    assert!((comp.volume_at(FrameIndex(200)) - 1.0).abs() < 1e-12);
    assert!((comp.volume_at(FrameIndex(420)) - 0.5).abs() < 1e-12);
    assert_eq!(comp.volume_at(FrameIndex(450)), 0.0);
}

#[test]
fn builder_rejects_duplicate_layers() {
    let err = IntroComposition::builder(
        "dup",
        Fps::integer(30).unwrap(),
        Canvas { width: 64, height: 64 },
        10,
    )
    .layer(Background)
    .layer(Background)
    .build()
    .unwrap_err();
    assert!(err.to_string().contains("duplicate layer"));
}
