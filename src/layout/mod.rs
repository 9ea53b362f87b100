mod routing;
mod text;
pub(crate) mod types;
pub use routing::auto_edge_sides;
pub use text::estimate_text_height;
pub use types::*;

use crate::canvas::Canvas;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    /// Groups pushed down off non-member nodes under their label header.
    HeaderCollision,
    /// Groups pushed right off earlier groups sharing their rows.
    HorizontalSeparation,
}

/// One group move made by the resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupShift {
    pub group_id: String,
    pub pass: Pass,
    pub dx: i64,
    pub dy: i64,
}

/// Runs both overlap passes once, header collisions first.
///
/// Only groups and their recorded members move. There is no iteration to a
/// fixed point: a horizontal shift may reintroduce a header collision.
pub fn resolve_collisions(canvas: &mut Canvas) -> Vec<GroupShift> {
    let groups = group_indices(canvas);
    if groups.is_empty() {
        return Vec::new();
    }
    let mut shifts = resolve_header_collisions(canvas, &groups);
    shifts.extend(resolve_horizontal_overlaps(canvas, &groups));
    shifts
}

fn group_indices(canvas: &Canvas) -> Vec<usize> {
    canvas
        .nodes
        .iter()
        .enumerate()
        .filter(|(_, node)| node.is_group())
        .map(|(idx, _)| idx)
        .collect()
}

fn resolve_header_collisions(canvas: &mut Canvas, groups: &[usize]) -> Vec<GroupShift> {
    let standard: Vec<usize> = canvas
        .nodes
        .iter()
        .enumerate()
        .filter(|(_, node)| !node.is_group())
        .map(|(idx, _)| idx)
        .collect();
    let probe_height = canvas.config.header_probe_height();
    let push_gap = canvas.config.group_header_push_gap;

    let mut shifts = Vec::new();
    for &gi in groups {
        let group = canvas.node_at(gi);
        let probe = Rect::new(group.x, group.y, group.width, probe_height);
        let mut push = 0;
        for &ni in &standard {
            let node = canvas.node_at(ni);
            if canvas.is_member(&group.id, &node.id) {
                continue;
            }
            let rect = node.rect();
            if !probe.intersects(&rect) {
                continue;
            }
            push = push.max(rect.bottom() + push_gap - group.y);
        }
        if push > 0 {
            let group_id = group.id.clone();
            log::debug!("group {group_id}: header collision, moving down {push}");
            canvas.shift_group(&group_id, 0, push);
            shifts.push(GroupShift {
                group_id,
                pass: Pass::HeaderCollision,
                dx: 0,
                dy: push,
            });
        }
    }
    shifts
}

fn resolve_horizontal_overlaps(canvas: &mut Canvas, groups: &[usize]) -> Vec<GroupShift> {
    let gap = canvas.config.group_gap_between;
    let mut order = groups.to_vec();
    order.sort_by_key(|&idx| canvas.node_at(idx).x);

    let mut shifts = Vec::new();
    for pos in 1..order.len() {
        let current = canvas.node_at(order[pos]).rect();
        let max_right = order[..pos]
            .iter()
            .map(|&idx| canvas.node_at(idx).rect())
            .filter(|prev| current.shares_rows_with(prev))
            .map(|prev| prev.right())
            .max();
        let Some(max_right) = max_right else {
            continue;
        };
        let needed = max_right + gap;
        if current.x < needed {
            let dx = needed - current.x;
            let group_id = canvas.node_at(order[pos]).id.clone();
            log::debug!("group {group_id}: overlaps an earlier group, moving right {dx}");
            canvas.shift_group(&group_id, dx, 0);
            shifts.push(GroupShift {
                group_id,
                pass: Pass::HorizontalSeparation,
                dx,
                dy: 0,
            });
        }
    }
    shifts
}
