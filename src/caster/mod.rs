//! Ray casting against the tile grid.
//!
//! Two strategies live behind the one [`CastRay`] capability:
//!
//! * [`Dda`] – direction + camera-plane rays, stepped one grid line at a time.
//! * [`Sweep`] – evenly spaced ray angles, separate searches along the
//!   horizontal and the vertical grid lines.
//!
//! Both report distances in units of the ray direction's length, so they
//! agree for the same `(origin, dir)` pair.  The [`Caster`] enum picks one at
//! construction time and also builds the per-column ray fan for it.

mod dda;
mod sweep;

pub use dda::Dda;
pub use sweep::Sweep;

use glam::{IVec2, Vec2};

use crate::{
    config::Strategy,
    world::{Actor, EMPTY, Grid, Tile, wrap_degrees},
};

/// Distance reported for a ray that leaves the grid without hitting a wall.
pub const MAX_DISTANCE: f32 = f32::MAX;

/// Which kind of grid line the ray crossed to reach the wall.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    /// A vertical line `x = k` (east/west face).
    Vertical,
    /// A horizontal line `y = k` (north/south face).
    Horizontal,
}

/// Outcome of one ray.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
    /// `origin + distance * dir` lies on the wall face.
    pub distance: f32,
    pub side: Side,
    /// Wall tile, or the first tile outside the grid for a miss.
    pub tile: IVec2,
    /// Code of `tile`; [`EMPTY`] means the ray escaped.
    pub code: Tile,
}

impl Hit {
    /// Sentinel for a ray that left the grid.
    pub fn miss(side: Side, tile: IVec2) -> Self {
        Self {
            distance: MAX_DISTANCE,
            side,
            tile,
            code: EMPTY,
        }
    }

    #[inline]
    pub fn is_miss(&self) -> bool {
        self.code == EMPTY
    }

    /// World-space hit point; `None` for a miss.
    pub fn point(&self, origin: Vec2, dir: Vec2) -> Option<Vec2> {
        (!self.is_miss()).then(|| origin + dir * self.distance)
    }
}

/// Capability shared by every casting strategy.
pub trait CastRay {
    /// Walk from `origin` along `dir` (any non-zero length) to the first
    /// occupied tile.  Never loops forever: leaving the grid is a miss.
    fn cast_ray(&self, grid: &Grid, origin: Vec2, dir: Vec2) -> Hit;
}

/// Ray for one screen column.
#[derive(Clone, Copy, Debug)]
pub struct ColumnRay {
    pub dir: Vec2,
    /// Multiply the hit distance by this to get the perpendicular distance.
    pub correction: f32,
}

/// Strategy chosen at construction time.
#[derive(Clone, Copy, Debug)]
pub enum Caster {
    Dda(Dda),
    Sweep(Sweep),
}

impl Caster {
    pub fn new(strategy: Strategy) -> Self {
        match strategy {
            Strategy::Dda => Caster::Dda(Dda),
            Strategy::Sweep => Caster::Sweep(Sweep),
        }
    }

    pub fn strategy(&self) -> Strategy {
        match self {
            Caster::Dda(_) => Strategy::Dda,
            Caster::Sweep(_) => Strategy::Sweep,
        }
    }

    /// Ray through screen column `col` of a `width`-pixel view.
    pub fn column_ray(&self, actor: &Actor, col: usize, width: usize) -> ColumnRay {
        match self {
            Caster::Dda(_) => {
                // column → [-1, 1] across the camera plane
                let cx = 2.0 * col as f32 / width as f32 - 1.0;
                ColumnRay {
                    dir: actor.dir() + actor.plane() * cx,
                    correction: 1.0,
                }
            }
            Caster::Sweep(_) => {
                let start = actor.heading() - actor.fov() * 0.5;
                let angle = wrap_degrees(start + col as f32 * actor.fov() / width as f32);
                ColumnRay {
                    dir: Vec2::from_angle(angle.to_radians()),
                    // fisheye: project onto the view direction
                    correction: (angle - actor.heading()).to_radians().cos(),
                }
            }
        }
    }
}

impl CastRay for Caster {
    #[inline]
    fn cast_ray(&self, grid: &Grid, origin: Vec2, dir: Vec2) -> Hit {
        match self {
            Caster::Dda(c) => c.cast_ray(grid, origin, dir),
            Caster::Sweep(c) => c.cast_ray(grid, origin, dir),
        }
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use glam::vec2;

    const STRATEGIES: [Strategy; 2] = [Strategy::Dda, Strategy::Sweep];

    fn room() -> Grid {
        Grid::bordered(10)
    }

    #[test]
    fn strategies_agree_facing_east() {
        let grid = room();
        let origin = vec2(5.5, 5.5);
        let dir = Vec2::from_angle(0.0);
        let dda = Caster::new(Strategy::Dda).cast_ray(&grid, origin, dir);
        let sweep = Caster::new(Strategy::Sweep).cast_ray(&grid, origin, dir);
        assert!((dda.distance - 3.5).abs() < 1e-4);
        assert!((dda.distance - sweep.distance).abs() < 0.01);
        assert_eq!(dda.side, Side::Vertical);
        assert_eq!(sweep.side, Side::Vertical);
        assert_eq!(dda.tile, IVec2::new(9, 5));
    }

    #[test]
    fn strategies_agree_at_many_angles() {
        let grid = room();
        let origin = vec2(4.3, 6.1);
        for deg in [1.0f32, 30.0, 44.0, 89.5, 90.0, 120.0, 180.0, 211.0, 270.0, 300.0, 333.3] {
            let dir = Vec2::from_angle(deg.to_radians());
            let a = Dda.cast_ray(&grid, origin, dir);
            let b = Sweep.cast_ray(&grid, origin, dir);
            assert!(
                (a.distance - b.distance).abs() < 0.01,
                "angle {deg}: dda {} vs sweep {}",
                a.distance,
                b.distance
            );
        }
    }

    #[test]
    fn distance_scales_with_dir_length() {
        let grid = room();
        let origin = vec2(5.5, 5.5);
        let dir = vec2(0.6, -0.8);
        for s in STRATEGIES {
            let c = Caster::new(s);
            let unit = c.cast_ray(&grid, origin, dir);
            let long = c.cast_ray(&grid, origin, dir * 2.0);
            assert!((unit.distance - 2.0 * long.distance).abs() < 1e-3, "{s:?}");
        }
    }

    #[test]
    fn enclosed_room_always_hits() {
        let grid = room();
        let diagonal = 10.0 * std::f32::consts::SQRT_2;
        for s in STRATEGIES {
            let c = Caster::new(s);
            for step in 0..360 {
                let dir = Vec2::from_angle((step as f32 + 0.25).to_radians());
                let hit = c.cast_ray(&grid, vec2(5.5, 5.5), dir);
                assert!(!hit.is_miss(), "{s:?} missed at {step}°");
                assert!(hit.distance.is_finite());
                assert!(hit.distance > 0.0 && hit.distance < diagonal);
            }
        }
    }

    #[test]
    fn new_wall_shortens_ray() {
        let mut grid = room();
        let origin = vec2(5.5, 3.5);
        let west = vec2(-1.0, 0.0);
        for s in STRATEGIES {
            let c = Caster::new(s);
            let before = c.cast_ray(&grid, origin, west);
            grid.set_tile(3, 3, 0);
            grid.toggle(3, 3);
            let after = c.cast_ray(&grid, origin, west);
            grid.toggle(3, 3);

            assert!((before.distance - 4.5).abs() < 1e-3, "{s:?}");
            assert!(after.distance < before.distance);
            assert!((after.distance - 1.5).abs() < 1e-3, "{s:?}");
            assert_eq!(after.tile, IVec2::new(3, 3));
        }
    }

    #[test]
    fn gap_in_border_is_a_miss() {
        let mut grid = room();
        grid.set_tile(9, 5, EMPTY);
        for s in STRATEGIES {
            let hit = Caster::new(s).cast_ray(&grid, vec2(5.5, 5.5), vec2(1.0, 0.0));
            assert!(hit.is_miss(), "{s:?}");
            assert_eq!(hit.distance, MAX_DISTANCE);
            assert_eq!(hit.point(vec2(5.5, 5.5), vec2(1.0, 0.0)), None);
        }
    }

    #[test]
    fn horizontal_faces_report_horizontal_side() {
        let grid = room();
        for s in STRATEGIES {
            let hit = Caster::new(s).cast_ray(&grid, vec2(5.5, 5.5), vec2(0.0, 1.0));
            assert_eq!(hit.side, Side::Horizontal, "{s:?}");
            assert_eq!(hit.tile, IVec2::new(5, 9));
            assert!((hit.distance - 3.5).abs() < 1e-3);
        }
    }

    #[test]
    fn column_rays_span_the_fov() {
        let actor = Actor::new(vec2(5.5, 5.5), 0.0, 90.0);

        let dda = Caster::new(Strategy::Dda);
        let left = dda.column_ray(&actor, 0, 100);
        let centre = dda.column_ray(&actor, 50, 100);
        assert!((left.dir - vec2(1.0, -1.0)).length() < 1e-5);
        assert!((centre.dir - vec2(1.0, 0.0)).length() < 1e-5);
        assert_eq!(left.correction, 1.0);

        let sweep = Caster::new(Strategy::Sweep);
        let left = sweep.column_ray(&actor, 0, 100);
        assert!((left.dir - Vec2::from_angle(315f32.to_radians())).length() < 1e-5);
        assert!((left.correction - 45f32.to_radians().cos()).abs() < 1e-5);
        let centre = sweep.column_ray(&actor, 50, 100);
        assert!((centre.correction - 1.0).abs() < 1e-6);
    }

    #[test]
    fn perpendicular_distance_matches_across_fan() {
        // a flat wall must come out at the same perpendicular depth in every column
        let grid = room();
        let actor = Actor::new(vec2(5.5, 5.5), 0.0, 60.0);
        for s in STRATEGIES {
            let c = Caster::new(s);
            for col in [0, 20, 40, 63] {
                let ray = c.column_ray(&actor, col, 64);
                let hit = c.cast_ray(&grid, actor.position(), ray.dir);
                assert_eq!(hit.side, Side::Vertical);
                assert!((hit.distance * ray.correction - 3.5).abs() < 1e-3, "{s:?} col {col}");
            }
        }
    }
}
