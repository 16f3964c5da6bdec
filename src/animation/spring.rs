use crate::foundation::core::Fps;

/// Physical parameters of a damped spring driving a 0→1 entrance.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SpringConfig {
    /// Mass of the simulated body.
    pub mass: f64,
    /// Spring constant.
    pub stiffness: f64,
    /// Damping coefficient.
    pub damping: f64,
    /// Never report values above the target.
    pub overshoot_clamping: bool,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            mass: 1.0,
            stiffness: 100.0,
            damping: 10.0,
            overshoot_clamping: false,
        }
    }
}

impl SpringConfig {
    /// Default mass/stiffness with a custom damping coefficient.
    pub const fn with_damping(damping: f64) -> Self {
        Self {
            mass: 1.0,
            stiffness: 100.0,
            damping,
            overshoot_clamping: false,
        }
    }

    /// `c / (2 * sqrt(k * m))`; `>= 1` means no oscillation.
    pub fn damping_ratio(&self) -> f64 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }
}

/// Entrance progress of a spring released at `delay` frames, sampled at `frame`.
///
/// Returns `0.0` up to and including the release frame and approaches `1.0` afterwards.
/// Underdamped configurations overshoot `1.0` unless `overshoot_clamping` is set.
pub fn spring(frame: u64, fps: Fps, config: SpringConfig, delay: u64) -> f64 {
    if frame <= delay {
        return 0.0;
    }
    let secs = fps.frames_to_secs(frame - delay);
    let value = spring_position(secs, config);
    if config.overshoot_clamping {
        value.min(1.0)
    } else {
        value
    }
}

/// Closed-form position of a unit-displacement spring starting at rest.
fn spring_position(t: f64, config: SpringConfig) -> f64 {
    let zeta = config.damping_ratio();
    let omega0 = (config.stiffness / config.mass).sqrt();
    // Displacement from the target at t=0.
    let x0 = 1.0;

    if zeta < 1.0 {
        let omega1 = omega0 * (1.0 - zeta * zeta).sqrt();
        let envelope = (-zeta * omega0 * t).exp();
        let frag = envelope
            * ((omega1 * t).sin() * ((zeta * omega0 * x0) / omega1) + x0 * (omega1 * t).cos());
        1.0 - frag
    } else {
        let envelope = (-omega0 * t).exp();
        1.0 - envelope * (x0 + omega0 * x0 * t)
    }
}

/// Convert a delay in tenths of a second to frames at `fps`.
pub fn tenths_to_frames(tenths: u32, fps: Fps) -> u64 {
    fps.secs_to_frames(f64::from(tenths) / 10.0)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/spring.rs"]
mod tests;
