use std::sync::LazyLock;

use crate::foundation::core::{Point, Vec2};

/// Maximum distance (exclusive) between two connected nodes.
pub const CONNECTION_THRESHOLD: f64 = 400.0;

/// One node of the circuit network.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Node {
    /// Index into [`NODES`].
    pub id: usize,
    /// Base position in scene units.
    pub position: Point,
    /// Radius once fully entered.
    pub size: f64,
    /// Entrance delay in tenths of a second.
    pub delay: u32,
    /// Drift amplitude per axis.
    pub drift: Vec2,
    /// Drift speed in radians per second.
    pub drift_speed: f64,
}

#[allow(clippy::too_many_arguments)]
const fn node(
    id: usize,
    x: f64,
    y: f64,
    size: f64,
    delay: u32,
    drift_x: f64,
    drift_y: f64,
    drift_speed: f64,
) -> Node {
    Node {
        id,
        position: Point::new(x, y),
        size,
        delay,
        drift: Vec2::new(drift_x, drift_y),
        drift_speed,
    }
}

/// Hand-placed nodes spread over a 1920x1080 canvas.
pub const NODES: [Node; 22] = [
    node(0, 120.0, 80.0, 5.0, 0, 12.0, 8.0, 0.8),
    node(1, 350.0, 180.0, 4.0, 3, -8.0, 10.0, 1.0),
    node(2, 180.0, 350.0, 6.0, 5, 10.0, -6.0, 0.7),
    node(3, 520.0, 120.0, 4.0, 8, -6.0, 12.0, 0.9),
    node(4, 680.0, 280.0, 5.0, 2, 8.0, -10.0, 1.1),
    node(5, 450.0, 420.0, 4.0, 10, -10.0, -8.0, 0.6),
    node(6, 900.0, 150.0, 6.0, 4, 6.0, 14.0, 0.8),
    node(7, 1050.0, 300.0, 4.0, 7, -12.0, 6.0, 1.0),
    node(8, 820.0, 480.0, 5.0, 1, 10.0, -12.0, 0.9),
    node(9, 1250.0, 100.0, 4.0, 6, -8.0, 10.0, 0.7),
    node(10, 1400.0, 250.0, 6.0, 9, 14.0, -8.0, 1.2),
    node(11, 1150.0, 480.0, 4.0, 3, -6.0, -14.0, 0.8),
    node(12, 1600.0, 180.0, 5.0, 11, -10.0, 12.0, 0.6),
    node(13, 1750.0, 350.0, 4.0, 2, 8.0, -6.0, 1.0),
    node(14, 1500.0, 500.0, 6.0, 5, -12.0, -10.0, 0.9),
    node(15, 300.0, 750.0, 4.0, 7, 10.0, 8.0, 0.7),
    node(16, 600.0, 850.0, 5.0, 4, -8.0, -12.0, 1.1),
    node(17, 950.0, 780.0, 4.0, 8, 12.0, 6.0, 0.8),
    node(18, 1300.0, 850.0, 6.0, 1, -14.0, 10.0, 0.6),
    node(19, 1650.0, 750.0, 4.0, 6, 6.0, -8.0, 1.0),
    node(20, 100.0, 600.0, 5.0, 10, -10.0, -6.0, 0.9),
    node(21, 1800.0, 600.0, 4.0, 3, 8.0, 12.0, 0.7),
];

/// An edge between two nearby nodes.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Connection {
    /// Lower node id.
    pub from: usize,
    /// Higher node id.
    pub to: usize,
    /// Euclidean distance between the base positions; used as the dash length when drawing in.
    pub length: f64,
}

/// Every node pair closer than `threshold`, each unordered pair once with `from < to`.
pub fn derive_connections(nodes: &[Node], threshold: f64) -> Vec<Connection> {
    let mut out = Vec::new();
    for (i, a) in nodes.iter().enumerate() {
        for b in &nodes[i + 1..] {
            let length = a.position.distance(b.position);
            if length < threshold {
                out.push(Connection {
                    from: a.id,
                    to: b.id,
                    length,
                });
            }
        }
    }
    out
}

static CONNECTIONS: LazyLock<Vec<Connection>> =
    LazyLock::new(|| derive_connections(&NODES, CONNECTION_THRESHOLD));

/// Process-wide connection table for [`NODES`].
pub fn connections() -> &'static [Connection] {
    &CONNECTIONS
}

#[cfg(test)]
#[path = "../../tests/unit/layout/network.rs"]
mod tests;
