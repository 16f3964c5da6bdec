use super::*;

fn fps30() -> Fps {
    Fps::integer(30).unwrap()
}

#[test]
fn zero_until_release() {
    let cfg = SpringConfig::with_damping(12.0);
    for f in 0..=9 {
        assert_eq!(spring(f, fps30(), cfg, 9), 0.0);
    }
    assert!(spring(10, fps30(), cfg, 9) > 0.0);
}

#[test]
fn settles_at_one() {
    for damping in [12.0, 15.0, 200.0] {
        let v = spring(300, fps30(), SpringConfig::with_damping(damping), 0);
        assert!((v - 1.0).abs() < 1e-3, "damping {damping} settled at {v}");
    }
}

#[test]
fn underdamped_overshoots_unless_clamped() {
    let cfg = SpringConfig::with_damping(12.0);
    assert!(cfg.damping_ratio() < 1.0);
    let peak = (0..60)
        .map(|f| spring(f, fps30(), cfg, 0))
        .fold(f64::MIN, f64::max);
    assert!(peak > 1.0);

    let clamped = SpringConfig {
        overshoot_clamping: true,
        ..cfg
    };
    let peak = (0..60)
        .map(|f| spring(f, fps30(), clamped, 0))
        .fold(f64::MIN, f64::max);
    assert!(peak <= 1.0);
}

#[test]
fn heavy_damping_is_monotonic() {
    let cfg = SpringConfig::with_damping(200.0);
    let mut prev = 0.0;
    for f in 0..120 {
        let v = spring(f, fps30(), cfg, 0);
        assert!(v >= prev);
        assert!(v <= 1.0);
        prev = v;
    }
}

#[test]
fn same_seconds_same_value_across_fps() {
    let cfg = SpringConfig::with_damping(15.0);
    let a = spring(30, fps30(), cfg, 0);
    let b = spring(60, Fps::integer(60).unwrap(), cfg, 0);
    assert!((a - b).abs() < 1e-12);
}

#[test]
fn tenths_scale_with_fps() {
    assert_eq!(tenths_to_frames(3, fps30()), 9);
    assert_eq!(tenths_to_frames(3, Fps::integer(60).unwrap()), 18);
    assert_eq!(tenths_to_frames(5, Fps::integer(25).unwrap()), 13);
    assert_eq!(tenths_to_frames(0, fps30()), 0);
}
