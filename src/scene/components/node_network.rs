use crate::animation::drift::Drift;
use crate::animation::interpolate::{Extrapolation, interpolate};
use crate::animation::spring::{SpringConfig, spring, tenths_to_frames};
use crate::foundation::core::{Fps, Point};
use crate::layout::network::{NODES, Node, connections};
use crate::scene::component::{FrameCtx, SceneComponent};
use crate::scene::model::{Dash, Element, Glow, Layer};
use crate::scene::palette::CYAN;

const NODE_ENTRANCE: SpringConfig = SpringConfig::with_damping(12.0);
const LINE_ENTRANCE: SpringConfig = SpringConfig::with_damping(200.0);
/// Extra delay, in tenths, before a line starts drawing after its later endpoint.
const LINE_DELAY_BIAS: u32 = 5;
const DRIFT_Y_RATE: f64 = 0.7;
/// Standard deviation of the node halo.
const NODE_GLOW_STD_DEV: f64 = 3.0;

/// Circuit-board style graph: nodes pop in, then edges draw between them.
#[derive(Clone, Copy, Debug, Default)]
pub struct NodeNetwork;

fn node_position(node: &Node, frame: u64, fps: Fps) -> Point {
    Drift {
        amplitude: node.drift,
        speed: node.drift_speed,
        y_rate: DRIFT_Y_RATE,
    }
    .apply(node.position, frame, fps)
}

/// Draw-in progress of the edge between `a` and `b`.
pub(crate) fn line_progress(a: &Node, b: &Node, frame: u64, fps: Fps) -> f64 {
    let delay = a.delay.max(b.delay) + LINE_DELAY_BIAS;
    spring(frame, fps, LINE_ENTRANCE, tenths_to_frames(delay, fps))
}

impl SceneComponent for NodeNetwork {
    fn name(&self) -> &'static str {
        "node_network"
    }

    fn render(&self, ctx: &FrameCtx<'_>) -> Option<Layer> {
        let positions: Vec<Point> = NODES
            .iter()
            .map(|n| node_position(n, ctx.frame, ctx.fps))
            .collect();

        let conns = connections();
        let mut elements = Vec::with_capacity(conns.len() + NODES.len());

        for c in conns {
            let progress = line_progress(&NODES[c.from], &NODES[c.to], ctx.frame, ctx.fps);
            elements.push(Element::Line {
                from: positions[c.from],
                to: positions[c.to],
                color: CYAN,
                width: 1.0,
                opacity: interpolate(progress, [0.0, 1.0], [0.0, 0.15], Extrapolation::EXTEND),
                dash: Some(Dash {
                    array: c.length,
                    offset: interpolate(progress, [0.0, 1.0], [c.length, 0.0], Extrapolation::EXTEND),
                }),
            });
        }

        for node in &NODES {
            let entrance = spring(
                ctx.frame,
                ctx.fps,
                NODE_ENTRANCE,
                tenths_to_frames(node.delay, ctx.fps),
            );
            elements.push(Element::Circle {
                center: positions[node.id],
                radius: node.size * entrance,
                color: CYAN,
                opacity: interpolate(entrance, [0.0, 1.0], [0.0, 0.8], Extrapolation::EXTEND),
                glow: Some(Glow {
                    blur: NODE_GLOW_STD_DEV * 2.0,
                    color: CYAN,
                    opacity: 1.0,
                }),
            });
        }

        Some(Layer::new(self.name(), elements))
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/scene/node_network.rs"]
mod tests;
