use super::*;

const RATE: u32 = 48_000;

fn tone(freq_hz: f64, secs: f64) -> Arc<Vec<f32>> {
    let n = (secs * f64::from(RATE)) as usize;
    Arc::new(
        (0..n)
            .map(|i| (TAU * freq_hz * i as f64 / f64::from(RATE)).sin() as f32)
            .collect(),
    )
}

fn fps30() -> Fps {
    Fps::integer(30).unwrap()
}

#[test]
fn bass_is_mean_of_lowest_quarter() {
    let mut f = vec![0.0; 128];
    for v in f.iter_mut().take(32) {
        *v = 0.5;
    }
    f[40] = 1.0;
    assert_eq!(bass_intensity(&f), 0.5);
    assert_eq!(bass_intensity(&[]), 0.0);
    assert_eq!(bass_intensity(&[0.3]), 0.3);
}

#[test]
fn low_tone_reads_as_more_bass_than_high_tone() {
    // Bin width is 48000 / 256 = 187.5 Hz.
    let low = WindowedSpectrum::new(tone(187.5 * 4.0, 2.0), RATE);
    let high = WindowedSpectrum::new(tone(187.5 * 100.0, 2.0), RATE);
    let f = FrameIndex(30);
    let low_bins = low.frequencies(f, fps30(), SPECTRUM_BINS).unwrap();
    let high_bins = high.frequencies(f, fps30(), SPECTRUM_BINS).unwrap();
    assert_eq!(low_bins.len(), SPECTRUM_BINS);
    assert!((low_bins[4] - 1.0).abs() < 0.05, "peak {}", low_bins[4]);
    assert!(bass_intensity(&low_bins) > 0.02);
    assert!(bass_intensity(&high_bins) < 1e-3);
    assert!(bass_intensity(&low_bins) > bass_intensity(&high_bins));
}

#[test]
fn silence_is_zero() {
    let quiet = WindowedSpectrum::new(Arc::new(vec![0.0; RATE as usize]), RATE);
    let bins = quiet.frequencies(FrameIndex(10), fps30(), 128).unwrap();
    assert!(bins.iter().all(|v| *v == 0.0));
}

#[test]
fn no_data_past_track_end() {
    let s = WindowedSpectrum::new(tone(440.0, 1.0), RATE);
    assert!(s.frequencies(FrameIndex(29), fps30(), 128).is_some());
    assert!(s.frequencies(FrameIndex(30), fps30(), 128).is_none());
    assert!(s.frequencies(FrameIndex(400), fps30(), 128).is_none());
}

#[test]
fn window_is_clipped_to_track() {
    let s = WindowedSpectrum::new(tone(440.0, 40.0), RATE);
    let w = s.window(FrameIndex(0), fps30()).unwrap();
    assert_eq!(w.start, 0);
    assert_eq!(w.end, 15 * RATE as usize);
    let w = s.window(FrameIndex(30 * 20), fps30()).unwrap();
    assert_eq!(w.start, 5 * RATE as usize);
    assert_eq!(w.end, 35 * RATE as usize);
}

#[test]
fn window_never_trims_the_analysis_block() {
    let samples = tone(200.0, 3.0);
    let len = samples.len();
    let s = WindowedSpectrum::new(samples, RATE);
    for f in [0, 1, 45, 89] {
        let center = f as usize * (RATE as usize / 30);
        let w = s.window(FrameIndex(f), fps30()).unwrap();
        assert!(w.start <= center.saturating_sub(128));
        assert!(w.end >= (center + 128).min(len));
    }
}

#[test]
fn analysis_is_frame_order_independent() {
    let s = WindowedSpectrum::new(tone(900.0, 3.0), RATE);
    let forward: Vec<_> = (0..60)
        .map(|f| s.frequencies(FrameIndex(f), fps30(), 64))
        .collect();
    for f in (0..60).rev() {
        assert_eq!(
            s.frequencies(FrameIndex(f), fps30(), 64),
            forward[f as usize]
        );
    }
}
