use crate::model::Side;

use super::Rect;

/// Picks attachment sides from the direction between the two centers.
/// Horizontal wins only when strictly dominant; ties attach vertically.
pub fn auto_edge_sides(from: &Rect, to: &Rect) -> (Side, Side) {
    let dx = to.center_x() - from.center_x();
    let dy = to.center_y() - from.center_y();
    let from_side = if dx.abs() > dy.abs() {
        if dx > 0.0 { Side::Right } else { Side::Left }
    } else if dy > 0.0 {
        Side::Bottom
    } else {
        Side::Top
    };
    (from_side, from_side.opposite())
}
