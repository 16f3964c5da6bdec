/// Behaviour of an interpolation outside its input domain.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Extrapolate {
    /// Continue the slope of the outermost segment.
    #[default]
    Extend,
    /// Hold the boundary output value.
    Clamp,
}

/// Per-side extrapolation settings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Extrapolation {
    /// Applied when `x` is below the first input point.
    pub left: Extrapolate,
    /// Applied when `x` is above the last input point.
    pub right: Extrapolate,
}

impl Extrapolation {
    /// Extend on both sides.
    pub const EXTEND: Self = Self {
        left: Extrapolate::Extend,
        right: Extrapolate::Extend,
    };
    /// Clamp on both sides.
    pub const CLAMP: Self = Self {
        left: Extrapolate::Clamp,
        right: Extrapolate::Clamp,
    };
    /// Extend left, clamp right.
    pub const CLAMP_RIGHT: Self = Self {
        left: Extrapolate::Extend,
        right: Extrapolate::Clamp,
    };
}

/// Map `x` piecewise-linearly from `input` control points onto `output`.
///
/// `input` must be strictly increasing. The segment is chosen as the first one whose upper bound
/// is `>= x`; outside the domain the outermost segment is extrapolated or clamped per side.
pub fn interpolate<const N: usize>(
    x: f64,
    input: [f64; N],
    output: [f64; N],
    extrapolation: Extrapolation,
) -> f64 {
    const { assert!(N >= 2, "interpolate needs at least two control points") };
    debug_assert!(
        input.windows(2).all(|w| w[0] < w[1]),
        "interpolate input must be strictly increasing: {input:?}"
    );

    let mut hi = 1;
    while hi < N - 1 && input[hi] < x {
        hi += 1;
    }
    let lo = hi - 1;

    segment(
        x,
        (input[lo], input[hi]),
        (output[lo], output[hi]),
        extrapolation,
    )
}

fn segment(
    x: f64,
    (in_min, in_max): (f64, f64),
    (out_min, out_max): (f64, f64),
    extrapolation: Extrapolation,
) -> f64 {
    if x < in_min && extrapolation.left == Extrapolate::Clamp {
        return out_min;
    }
    if x > in_max && extrapolation.right == Extrapolate::Clamp {
        return out_max;
    }
    if out_min == out_max {
        return out_min;
    }
    let t = (x - in_min) / (in_max - in_min);
    out_min + t * (out_max - out_min)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/interpolate.rs"]
mod tests;
