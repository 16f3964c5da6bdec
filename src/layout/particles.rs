use std::sync::LazyLock;

use crate::foundation::core::{Point, Vec2};

/// Number of floating particles.
pub const PARTICLE_COUNT: usize = 30;

/// One floating particle.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Particle {
    /// Base position in scene units.
    pub position: Point,
    /// Diameter in scene units.
    pub size: f64,
    /// Opacity once fully entered.
    pub opacity: f64,
    /// Entrance delay in tenths of a second.
    pub delay: u32,
    /// Horizontal drift amplitude.
    pub drift_x: f64,
    /// Vertical drift amplitude (scaled down when animated).
    pub drift_y: f64,
    /// Oscillation speed in radians per second.
    pub speed: f64,
}

impl Particle {
    /// Derive particle `index` from its arithmetic seed.
    pub fn from_index(index: usize) -> Self {
        let seed = particle_seed(index);
        Self {
            position: Point::new((seed % 1920) as f64, ((seed * 3) % 1080) as f64),
            size: (2 + seed % 3) as f64,
            opacity: 0.15 + (seed % 35) as f64 / 100.0,
            delay: ((index % 12) * 3) as u32,
            drift_x: ((seed % 20) as f64 - 10.0) * 0.5,
            drift_y: -15.0 - (seed % 20) as f64,
            speed: 0.3 + (seed % 8) as f64 / 10.0,
        }
    }

    /// Drift amplitude as animated: the vertical component is damped to a tenth.
    pub fn drift_amplitude(&self) -> Vec2 {
        Vec2::new(self.drift_x, self.drift_y * 0.1)
    }
}

/// `(i * 7919 + 1301) mod 10000`.
pub fn particle_seed(index: usize) -> u64 {
    (index as u64 * 7919 + 1301) % 10_000
}

/// Build the full particle table. Same output on every call.
pub fn generate_particles() -> [Particle; PARTICLE_COUNT] {
    std::array::from_fn(Particle::from_index)
}

static PARTICLES: LazyLock<[Particle; PARTICLE_COUNT]> = LazyLock::new(generate_particles);

/// Process-wide particle table.
pub fn particles() -> &'static [Particle; PARTICLE_COUNT] {
    &PARTICLES
}

#[cfg(test)]
#[path = "../../tests/unit/layout/particles.rs"]
mod tests;
