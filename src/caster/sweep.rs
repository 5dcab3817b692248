use glam::{IVec2, Vec2, ivec2, vec2};

use super::{CastRay, Hit, Side};
use crate::world::{Grid, wrap_degrees};

/// Below this a ray counts as parallel to a set of grid lines.
const PARALLEL_EPS: f32 = 1e-6;

/// Angle-based intersection search.
///
/// The ray angle decides two independent walks: one over the horizontal grid
/// lines (`y = k`, stepping `1 / tan` in x per row) and one over the vertical
/// grid lines (`x = k`, stepping `tan` in y per column).  Each walk stops on
/// an occupied tile or once it leaves the grid on either axis; the nearer
/// crossing wins.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sweep;

impl CastRay for Sweep {
    fn cast_ray(&self, grid: &Grid, origin: Vec2, dir: Vec2) -> Hit {
        let len = dir.length();
        if len == 0.0 {
            return Hit::miss(Side::Vertical, origin.floor().as_ivec2());
        }

        let angle = wrap_degrees(dir.y.atan2(dir.x).to_degrees()).to_radians();
        let (sin, cos) = angle.sin_cos();
        let tan = angle.tan();

        let h = horizontal_walk(grid, origin, sin, tan);
        let v = vertical_walk(grid, origin, cos, tan);
        let mut hit = if h.distance < v.distance { h } else { v };

        if !hit.is_miss() {
            hit.distance /= len;
        }
        hit
    }
}

/// Walk the `y = k` lines.
fn horizontal_walk(grid: &Grid, origin: Vec2, sin: f32, tan: f32) -> Hit {
    if sin.abs() < PARALLEL_EPS {
        return Hit::miss(Side::Horizontal, origin.floor().as_ivec2());
    }
    // y grows downwards, so a positive sine faces south
    let south = sin > 0.0;
    let step_y = if south { 1.0 } else { -1.0 };
    let first_y = if south {
        origin.y.floor() + 1.0
    } else {
        origin.y.floor()
    };

    let inv_tan = 1.0 / tan;
    let step = vec2(step_y * inv_tan, step_y);
    let mut p = vec2(origin.x + (first_y - origin.y) * inv_tan, first_y);

    loop {
        // the tile on the far side of the line
        let row = p.y.round() as i32 - if south { 0 } else { 1 };
        let tile = ivec2(p.x.floor() as i32, row);
        if let Some(hit) = probe(grid, origin, p, tile, Side::Horizontal) {
            return hit;
        }
        p += step;
    }
}

/// Walk the `x = k` lines.
fn vertical_walk(grid: &Grid, origin: Vec2, cos: f32, tan: f32) -> Hit {
    if cos.abs() < PARALLEL_EPS {
        return Hit::miss(Side::Vertical, origin.floor().as_ivec2());
    }
    let east = cos > 0.0;
    let step_x = if east { 1.0 } else { -1.0 };
    let first_x = if east {
        origin.x.floor() + 1.0
    } else {
        origin.x.floor()
    };

    let step = vec2(step_x, step_x * tan);
    let mut p = vec2(first_x, origin.y + (first_x - origin.x) * tan);

    loop {
        let col = p.x.round() as i32 - if east { 0 } else { 1 };
        let tile = ivec2(col, p.y.floor() as i32);
        if let Some(hit) = probe(grid, origin, p, tile, Side::Vertical) {
            return hit;
        }
        p += step;
    }
}

/// `Some` once the walk is over: a wall at `tile`, or `tile` outside the grid.
#[inline]
fn probe(grid: &Grid, origin: Vec2, p: Vec2, tile: IVec2, side: Side) -> Option<Hit> {
    if !grid.contains(tile.x, tile.y) {
        return Some(Hit::miss(side, tile));
    }
    let code = grid.tile(tile.x, tile.y);
    (code != 0).then(|| Hit {
        distance: (p - origin).length(),
        side,
        tile,
        code,
    })
}
