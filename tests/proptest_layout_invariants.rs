//! Property-based invariant tests for the canvas builder and resolver.
//!
//! 1. Text height is a pure function of (text, width) and never below one row.
//! 2. Auto edge sides are always one of the four opposite pairs.
//! 3. Swapping endpoints flips the chosen pair (except on exact diagonals).
//! 4. Member-sized groups contain every member with padding and header room.
//! 5. A second resolver run after a single header push moves nothing, and
//!    the resolver only ever moves groups down or right.
//! 6. Node and edge ids never collide.

use std::collections::HashSet;

use canvas_forge::layout::{auto_edge_sides, estimate_text_height};
use canvas_forge::{
    Canvas, EdgeInput, GroupInput, LayoutConfig, Rect, Side, TextNodeInput,
};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn rect_strategy() -> impl Strategy<Value = Rect> {
    (-2000i64..=2000, -2000i64..=2000, 1i64..=600, 1i64..=600)
        .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
}

fn add_rect(canvas: &mut Canvas, id: &str, rect: Rect) {
    canvas
        .add_text_node(
            TextNodeInput::new(id, rect.x, rect.y)
                .with_width(rect.width)
                .with_height(rect.height)
                .with_id(id),
        )
        .unwrap();
}

const PAIRS: [(Side, Side); 4] = [
    (Side::Right, Side::Left),
    (Side::Left, Side::Right),
    (Side::Bottom, Side::Top),
    (Side::Top, Side::Bottom),
];

// ═════════════════════════════════════════════════════════════════════════
// 1. Height estimation
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn height_is_deterministic(text in ".{0,200}", width in -50i64..2000) {
        let config = LayoutConfig::default();
        let first = estimate_text_height(&text, width, &config);
        let second = estimate_text_height(&text, width, &config);
        prop_assert_eq!(first, second);
        prop_assert!(first >= config.text_base_height + config.text_line_height);
        prop_assert_eq!((first - config.text_base_height) % config.text_line_height, 0);
    }

    #[test]
    fn more_lines_never_shrink_height(text in "[a-z ]{0,80}", width in 1i64..600) {
        let config = LayoutConfig::default();
        let one = estimate_text_height(&text, width, &config);
        let two = estimate_text_height(&format!("{text}\n{text}"), width, &config);
        prop_assert!(two >= one);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2–3. Edge sides
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn sides_are_a_known_pair(a in rect_strategy(), b in rect_strategy()) {
        let pair = auto_edge_sides(&a, &b);
        prop_assert!(PAIRS.contains(&pair), "unexpected pair {:?}", pair);
    }

    #[test]
    fn swapping_endpoints_flips_sides(a in rect_strategy(), b in rect_strategy()) {
        let dx = (b.center_x() - a.center_x()).abs();
        let dy = (b.center_y() - a.center_y()).abs();
        // exact diagonals resolve vertically both ways
        prop_assume!(dx != dy);
        let (from, to) = auto_edge_sides(&a, &b);
        let (back_from, back_to) = auto_edge_sides(&b, &a);
        prop_assert_eq!((back_from, back_to), (to, from));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Group bounds
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn group_contains_members_with_padding(
        rects in prop::collection::vec(rect_strategy(), 1..6)
    ) {
        let config = LayoutConfig::default();
        let mut canvas = Canvas::new();
        let ids: Vec<String> = (0..rects.len()).map(|i| format!("n{i}")).collect();
        for (id, rect) in ids.iter().zip(&rects) {
            add_rect(&mut canvas, id, *rect);
        }
        let gid = canvas.add_group(GroupInput::around("g", ids.clone())).unwrap().unwrap();
        let group = canvas.node(&gid).unwrap().rect();
        let pad = config.group_padding;
        for rect in &rects {
            prop_assert!(group.contains(rect));
            prop_assert!(rect.left() - group.left() >= pad);
            prop_assert!(group.right() - rect.right() >= pad);
            prop_assert!(rect.top() - group.top() >= pad + config.group_header_height);
            prop_assert!(group.bottom() - rect.bottom() >= pad + config.group_bottom_buffer);
        }
        prop_assert_eq!(canvas.members(&gid), ids.as_slice());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Resolver stability
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn single_push_is_stable(node in rect_strategy(), group in rect_strategy()) {
        // one group: the horizontal pass has nothing to separate
        let mut canvas = Canvas::new();
        add_rect(&mut canvas, "n", node);
        canvas
            .add_group(
                GroupInput::new("g")
                    .with_bounds(group.x, group.y, group.width, group.height)
                    .with_id("g"),
            )
            .unwrap();
        canvas.resolve_layout();
        let settled: Vec<Rect> = canvas.nodes().iter().map(|n| n.rect()).collect();
        let second = canvas.resolve_layout();
        prop_assert!(second.is_empty(), "second run moved {:?}", second);
        let after: Vec<Rect> = canvas.nodes().iter().map(|n| n.rect()).collect();
        prop_assert_eq!(settled, after);
    }

    #[test]
    fn resolver_never_moves_standalone_nodes(
        nodes in prop::collection::vec(rect_strategy(), 1..6),
        groups in prop::collection::vec(rect_strategy(), 1..4),
    ) {
        let mut canvas = Canvas::new();
        for (i, rect) in nodes.iter().enumerate() {
            add_rect(&mut canvas, &format!("n{i}"), *rect);
        }
        for (i, rect) in groups.iter().enumerate() {
            canvas
                .add_group(
                    GroupInput::new("g")
                        .with_bounds(rect.x, rect.y, rect.width, rect.height)
                        .with_id(format!("g{i}")),
                )
                .unwrap();
        }
        canvas.resolve_layout();
        for (i, rect) in nodes.iter().enumerate() {
            prop_assert_eq!(canvas.node(&format!("n{i}")).unwrap().rect(), *rect);
        }
        for (i, rect) in groups.iter().enumerate() {
            let moved = canvas.node(&format!("g{i}")).unwrap().rect();
            prop_assert!(moved.x >= rect.x && moved.y >= rect.y);
            prop_assert_eq!((moved.width, moved.height), (rect.width, rect.height));
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Identifier uniqueness
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn generated_ids_are_unique(count in 1usize..40) {
        let mut canvas = Canvas::new();
        let mut ids = HashSet::new();
        let mut previous: Option<String> = None;
        for i in 0..count {
            let id = canvas
                .add_text_node(TextNodeInput::new(format!("n{i}"), 0, 0))
                .unwrap();
            if let Some(prev) = previous.take() {
                prop_assert!(ids.insert(canvas.add_edge(EdgeInput::new(prev, id.clone())).unwrap()));
            }
            prop_assert!(ids.insert(id.clone()));
            previous = Some(id);
        }
        prop_assert_eq!(ids.len(), canvas.nodes().len() + canvas.edges().len());
    }
}
