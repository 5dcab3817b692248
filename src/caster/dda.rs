use glam::{IVec2, Vec2};

use super::{CastRay, Hit, Side};
use crate::world::Grid;

/// Digital differential analyser: advance whichever axis reaches its next
/// grid line first until an occupied tile is entered.
#[derive(Clone, Copy, Debug, Default)]
pub struct Dda;

/// Per-axis stepping state.
#[derive(Clone, Copy)]
struct Axis {
    step: i32,
    /// ray length between two consecutive grid lines on this axis
    delta: f32,
    /// ray length to the next grid line on this axis
    side: f32,
}

impl Axis {
    fn new(origin: f32, tile: i32, dir: f32) -> Self {
        if dir == 0.0 {
            // parallel to this axis' grid lines – never crosses one
            return Self {
                step: 0,
                delta: f32::INFINITY,
                side: f32::INFINITY,
            };
        }
        let delta = (1.0 / dir).abs();
        if dir < 0.0 {
            Self {
                step: -1,
                delta,
                side: (origin - tile as f32) * delta,
            }
        } else {
            Self {
                step: 1,
                delta,
                side: (tile as f32 + 1.0 - origin) * delta,
            }
        }
    }
}

impl CastRay for Dda {
    fn cast_ray(&self, grid: &Grid, origin: Vec2, dir: Vec2) -> Hit {
        let mut map = origin.floor().as_ivec2();
        let mut ax = Axis::new(origin.x, map.x, dir.x);
        let mut ay = Axis::new(origin.y, map.y, dir.y);

        if ax.step == 0 && ay.step == 0 {
            return Hit::miss(Side::Vertical, map);
        }

        loop {
            let side = if ax.side < ay.side {
                ax.side += ax.delta;
                map.x += ax.step;
                Side::Vertical
            } else {
                ay.side += ay.delta;
                map.y += ay.step;
                Side::Horizontal
            };

            if !grid.contains(map.x, map.y) {
                return Hit::miss(side, map);
            }
            let code = grid.tile(map.x, map.y);
            if code != 0 {
                return Hit {
                    distance: face_distance(origin, dir, map, side, ax.step, ay.step),
                    side,
                    tile: map,
                    code,
                };
            }
        }
    }
}

/// Distance (in `dir` lengths) to the near face of `map` on the stepped axis.
/// Measured along one axis only, so camera-plane rays come out perpendicular.
#[inline]
fn face_distance(origin: Vec2, dir: Vec2, map: IVec2, side: Side, step_x: i32, step_y: i32) -> f32 {
    match side {
        Side::Vertical => (map.x as f32 - origin.x + (1 - step_x) as f32 * 0.5) / dir.x,
        Side::Horizontal => (map.y as f32 - origin.y + (1 - step_y) as f32 * 0.5) / dir.y,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::vec2;

    #[test]
    fn zero_direction_is_a_miss() {
        let grid = Grid::bordered(5);
        assert!(Dda.cast_ray(&grid, vec2(2.5, 2.5), Vec2::ZERO).is_miss());
    }

    #[test]
    fn skips_the_origin_tile() {
        // standing inside a wall tile still finds the next wall out
        let mut grid = Grid::bordered(6);
        grid.set_tile(2, 2, 1);
        let hit = Dda.cast_ray(&grid, vec2(2.5, 2.5), vec2(1.0, 0.0));
        assert_eq!(hit.tile, IVec2::new(5, 2));
        assert!((hit.distance - 2.5).abs() < 1e-5);
    }

    #[test]
    fn keeps_wall_variant_code() {
        let mut grid = Grid::bordered(6);
        grid.set_tile(4, 1, 3);
        let hit = Dda.cast_ray(&grid, vec2(1.5, 1.5), vec2(1.0, 0.0));
        assert_eq!(hit.code, 3);
        assert_eq!(hit.tile, IVec2::new(4, 1));
    }
}
