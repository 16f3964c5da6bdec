use super::*;

#[test]
fn mul_div255_matches_rounded_division() {
    assert_eq!(mul_div255_u16(255, 255), 255);
    assert_eq!(mul_div255_u16(0, 200), 0);
    assert_eq!(mul_div255_u16(128, 255), 128);
    assert_eq!(mul_div255_u16(10, 128), 5);
}

#[test]
fn round_half_up_breaks_ties_upward() {
    assert_eq!(round_half_up(2.5), 3.0);
    assert_eq!(round_half_up(2.4), 2.0);
    assert_eq!(round_half_up(-2.5), -2.0);
    assert_eq!(round_half_up(7.0), 7.0);
}
