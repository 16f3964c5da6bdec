use super::*;

#[test]
fn frame_range_contains_boundaries() {
    let r = FrameRange::new(FrameIndex(2), FrameIndex(5)).unwrap();
    assert!(!r.contains(FrameIndex(1)));
    assert!(r.contains(FrameIndex(2)));
    assert!(r.contains(FrameIndex(4)));
    assert!(!r.contains(FrameIndex(5)));
    assert_eq!(r.len_frames(), 3);
}

#[test]
fn frame_range_parses_cli_form() {
    let r = FrameRange::parse("10..40").unwrap();
    assert_eq!(r.start, FrameIndex(10));
    assert_eq!(r.end, FrameIndex(40));
    assert!(FrameRange::parse("40..10").is_err());
    assert!(FrameRange::parse("10-40").is_err());
    assert!(FrameRange::parse("a..3").is_err());
}

#[test]
fn fps_rejects_zero() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
}

#[test]
fn secs_to_frames_rounds_halves_up() {
    let fps = Fps::integer(30).unwrap();
    assert_eq!(fps.secs_to_frames(4.0), 120);
    assert_eq!(fps.secs_to_frames(0.5), 15);
    assert_eq!(fps.secs_to_frames(0.3), 9);

    let fps = Fps::integer(25).unwrap();
    // 0.5 * 25 = 12.5
    assert_eq!(fps.secs_to_frames(0.5), 13);
}

#[test]
fn hex_colours_roundtrip() {
    let c = Rgb8::from_hex("#00d4ff").unwrap();
    assert_eq!(c, Rgb8::new(0, 212, 255));
    assert_eq!(c.to_hex(), "#00d4ff");
    assert!(Rgb8::from_hex("#00d4f").is_err());
    assert!(Rgb8::from_hex("zzzzzz").is_err());
}
