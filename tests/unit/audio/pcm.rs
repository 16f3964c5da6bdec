use super::*;

#[test]
fn frame_to_sample_uses_rational_fps() {
    let fps = Fps::new(30_000, 1001).unwrap();
    assert_eq!(frame_to_sample(0, fps, 48_000), 0);
    assert_eq!(frame_to_sample(1, fps, 48_000), 1602);
    let fps = Fps::integer(30).unwrap();
    assert_eq!(frame_to_sample(450, fps, 48_000), 720_000);
}

#[test]
fn f32le_roundtrips_and_rejects_ragged_input() {
    let mut bytes = Vec::new();
    for v in [0.25f32, -1.0, 0.5] {
        bytes.extend_from_slice(&v.to_le_bytes());
    }
    assert_eq!(f32le_to_samples(&bytes).unwrap(), vec![0.25, -1.0, 0.5]);
    assert!(f32le_to_samples(&bytes[..5]).is_err());
}

#[test]
fn downmix_averages_channels() {
    let pcm = AudioPcm {
        sample_rate: 4,
        channels: 2,
        interleaved_f32: vec![1.0, 0.0, 0.5, 0.5, -1.0, 1.0, 0.0, 0.0],
    };
    assert_eq!(pcm.len_frames(), 4);
    assert_eq!(pcm.duration_secs(), 1.0);
    assert_eq!(pcm.downmix_mono(), vec![0.5, 0.5, 0.0, 0.0]);
}

#[test]
fn write_f32le_file_creates_parent() {
    let dir = std::env::temp_dir().join(format!("prompted_intro_pcm_{}", std::process::id()));
    let path = dir.join("nested").join("mix.f32le");
    write_f32le_file(&[0.5, -0.5], &path).unwrap();
    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(f32le_to_samples(&bytes).unwrap(), vec![0.5, -0.5]);
    let _ = std::fs::remove_dir_all(dir);
}
