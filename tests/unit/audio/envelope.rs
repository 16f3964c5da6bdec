use super::*;
use crate::foundation::core::FrameIndex;

#[test]
fn envelope_boundaries_hold_for_common_rates() {
    let env = VolumeEnvelope::default();
    for n in [24u32, 30, 60] {
        let fps = Fps::integer(n).unwrap();
        let f = f64::from(n);
        assert_eq!(env.gain_at(0.0, fps), 0.0);
        assert_eq!(env.gain_at(0.5 * f, fps), 1.0);
        assert_eq!(env.gain_at(5.0 * f, fps), 1.0);
        assert_eq!(env.gain_at(13.0 * f, fps), 1.0);
        assert_eq!(env.gain_at(15.0 * f, fps), 0.0);
        assert_eq!(env.gain_at(20.0 * f, fps), 0.0);
        assert!((env.gain_at(0.25 * f, fps) - 0.5).abs() < 1e-12);
        assert!((env.gain_at(14.0 * f, fps) - 0.5).abs() < 1e-12);
    }
}

#[test]
fn mix_applies_gain_and_pads() {
    let fps = Fps::integer(10).unwrap();
    // 100 samples/s, 10 samples per frame, 2 s of full-scale stereo.
    let pcm = AudioPcm {
        sample_rate: 100,
        channels: 2,
        interleaved_f32: vec![1.0; 200 * 2],
    };
    let env = VolumeEnvelope {
        fade_in_secs: 1.0,
        fade_out_start_secs: 2.0,
        end_secs: 3.0,
    };
    let range = FrameRange::new(FrameIndex(0), FrameIndex(30)).unwrap();
    let out = env.mix(&pcm, range, fps);
    assert_eq!(out.len(), 300 * 2);
    assert_eq!(out[0], 0.0);
    assert!((out[50 * 2] - 0.5).abs() < 1e-6);
    assert_eq!(out[150 * 2], 1.0);
    assert!(out[250 * 2..].iter().all(|v| *v == 0.0));
}

#[test]
fn mix_honours_range_offset() {
    let fps = Fps::integer(10).unwrap();
    let pcm = AudioPcm {
        sample_rate: 100,
        channels: 1,
        interleaved_f32: vec![1.0; 300],
    };
    let env = VolumeEnvelope {
        fade_in_secs: 1.0,
        fade_out_start_secs: 2.0,
        end_secs: 3.0,
    };
    let range = FrameRange::new(FrameIndex(15), FrameIndex(20)).unwrap();
    let out = env.mix(&pcm, range, fps);
    assert_eq!(out.len(), 50);
    assert!(out.iter().all(|v| *v == 1.0));
}
