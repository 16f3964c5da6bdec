use super::*;
use crate::scene::components::test_support::ctx;

#[test]
fn lines_wait_for_both_endpoints_plus_bias() {
    let fps = Fps::integer(30).unwrap();
    for c in connections() {
        let a = &NODES[c.from];
        let b = &NODES[c.to];
        let release = tenths_to_frames(a.delay.max(b.delay) + LINE_DELAY_BIAS, fps);
        assert_eq!(line_progress(a, b, release, fps), 0.0);
        assert!(line_progress(a, b, release + 1, fps) > 0.0);
        // Each endpoint has started entering by the time its edge starts drawing.
        assert!(release > tenths_to_frames(a.delay, fps));
        assert!(release > tenths_to_frames(b.delay, fps));
    }
}

#[test]
fn dash_offset_runs_from_length_to_zero() {
    let first = NodeNetwork.render(&ctx(0, 30)).unwrap();
    let last = NodeNetwork.render(&ctx(449, 30)).unwrap();
    let dashes = |layer: &Layer| -> Vec<Dash> {
        layer
            .elements
            .iter()
            .filter_map(|e| match e {
                Element::Line { dash, .. } => *dash,
                _ => None,
            })
            .collect()
    };
    let start = dashes(&first);
    let end = dashes(&last);
    assert_eq!(start.len(), connections().len());
    for (d, c) in start.iter().zip(connections()) {
        assert_eq!(d.array, c.length);
        assert_eq!(d.offset, c.length);
    }
    for d in end {
        assert!(d.offset.abs() < 1e-3 * d.array);
    }
}

#[test]
fn nodes_follow_lines_in_draw_order() {
    let layer = NodeNetwork.render(&ctx(120, 30)).unwrap();
    let n_lines = connections().len();
    assert_eq!(layer.elements.len(), n_lines + NODES.len());
    assert!(
        layer.elements[..n_lines]
            .iter()
            .all(|e| matches!(e, Element::Line { .. }))
    );
    assert!(
        layer.elements[n_lines..]
            .iter()
            .all(|e| matches!(e, Element::Circle { .. }))
    );
}

#[test]
fn node_zero_is_visible_first() {
    let layer = NodeNetwork.render(&ctx(3, 30)).unwrap();
    let n_lines = connections().len();
    let Element::Circle {
        radius, opacity, ..
    } = &layer.elements[n_lines]
    else {
        panic!("expected node circle");
    };
    assert!(*radius > 0.0);
    assert!(*opacity > 0.0);
    // Node 5 has a one-second delay.
    let Element::Circle { radius, .. } = &layer.elements[n_lines + 5] else {
        panic!("expected node circle");
    };
    assert_eq!(*radius, 0.0);
}
