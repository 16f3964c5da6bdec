use super::*;

#[test]
fn maps_linearly_inside_domain() {
    let v = interpolate(5.0, [0.0, 10.0], [0.0, 1.0], Extrapolation::CLAMP);
    assert!((v - 0.5).abs() < 1e-12);
    let v = interpolate(0.25, [0.0, 1.0], [30.0, 0.0], Extrapolation::EXTEND);
    assert!((v - 22.5).abs() < 1e-12);
}

#[test]
fn clamped_sides_hold_boundary_values() {
    let input = [10.0, 20.0, 40.0];
    let output = [3.0, 7.0, -1.0];
    for x in [-1000.0, -1.0, 0.0, 9.999] {
        assert_eq!(interpolate(x, input, output, Extrapolation::CLAMP), 3.0);
    }
    for x in [40.001, 41.0, 1e9] {
        assert_eq!(interpolate(x, input, output, Extrapolation::CLAMP), -1.0);
    }
}

#[test]
fn extend_continues_outer_slope() {
    let v = interpolate(-5.0, [0.0, 10.0], [0.0, 1.0], Extrapolation::CLAMP_RIGHT);
    assert!((v + 0.5).abs() < 1e-12);
    let v = interpolate(15.0, [0.0, 10.0], [0.0, 1.0], Extrapolation::CLAMP_RIGHT);
    assert_eq!(v, 1.0);
    let v = interpolate(20.0, [0.0, 10.0], [0.0, 1.0], Extrapolation::EXTEND);
    assert!((v - 2.0).abs() < 1e-12);
}

#[test]
fn multi_segment_triangle() {
    let tri = |x: f64| interpolate(x, [0.0, 8.0, 16.0], [1.0, 0.0, 1.0], Extrapolation::CLAMP);
    assert_eq!(tri(0.0), 1.0);
    assert_eq!(tri(8.0), 0.0);
    assert_eq!(tri(16.0), 1.0);
    assert!((tri(4.0) - 0.5).abs() < 1e-12);
    assert!((tri(12.0) - 0.5).abs() < 1e-12);
}

#[test]
fn flat_output_is_constant() {
    for x in [-3.0, 0.0, 2.0, 50.0] {
        assert_eq!(
            interpolate(x, [0.0, 10.0], [4.0, 4.0], Extrapolation::EXTEND),
            4.0
        );
    }
}
