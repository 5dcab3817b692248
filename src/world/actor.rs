use glam::{Vec2, vec2};

use crate::{input::InputCmd, world::grid::Grid};

/// Wrap an angle in degrees into `[0, 360)`.
#[inline]
pub fn wrap_degrees(deg: f32) -> f32 {
    let w = deg.rem_euclid(360.0);
    // rem_euclid rounds tiny negatives up to exactly 360.0
    if w >= 360.0 { 0.0 } else { w }
}

/// The player's view-point on the grid.
///
/// * Position is in tile units: `(2.5, 3.5)` is the centre of tile `(2, 3)`.
/// * The grid is y-down, so a heading of 0° faces east (+x) and 90° faces
///   south (+y); positive turns are clockwise on screen.
#[derive(Clone, Copy, Debug)]
pub struct Actor {
    pos: Vec2,
    heading: f32, // degrees, [0, 360)
    fov: f32,     // degrees
    pub move_speed: f32, // tiles / second
    pub turn_speed: f32, // degrees / second
    pub radius: f32,     // half-width of the collision box, tiles
}

impl Actor {
    /// New actor at `pos` facing `heading` degrees with horizontal FoV `fov` degrees.
    pub fn new(pos: Vec2, heading: f32, fov: f32) -> Self {
        Self {
            pos,
            heading: wrap_degrees(heading),
            fov,
            move_speed: 3.0,
            turn_speed: 90.0,
            radius: 0.2,
        }
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.pos
    }

    #[inline]
    pub fn heading(&self) -> f32 {
        self.heading
    }

    #[inline]
    pub fn fov(&self) -> f32 {
        self.fov
    }

    pub fn set_heading(&mut self, deg: f32) {
        self.heading = wrap_degrees(deg);
    }

    /// Tile the actor stands on.
    #[inline]
    pub fn tile(&self) -> (i32, i32) {
        (self.pos.x.floor() as i32, self.pos.y.floor() as i32)
    }

    /*──────────────────────── derived vectors ───────────────────────*/

    /// Unit view direction.
    #[inline(always)]
    pub fn dir(&self) -> Vec2 {
        Vec2::from_angle(self.heading.to_radians())
    }

    /// Unit vector to the actor's right (y-down, so a clockwise quarter turn).
    #[inline(always)]
    pub fn right(&self) -> Vec2 {
        self.dir().perp()
    }

    /// Camera plane: perpendicular to `dir`, length `tan(fov / 2)`.
    /// Column rays are `dir + plane * cx` with `cx ∈ [-1, 1]`.
    #[inline]
    pub fn plane(&self) -> Vec2 {
        self.right() * (self.fov * 0.5).to_radians().tan()
    }

    /*──────────────────────── movement helpers ──────────────────────*/

    /// Rotate by `delta` degrees (positive = clockwise / right).
    pub fn turn(&mut self, delta: f32) {
        self.heading = wrap_degrees(self.heading + delta);
    }

    /// Apply one frame of input, `dt` seconds long.
    pub fn apply(&mut self, cmd: &InputCmd, dt: f32, grid: &Grid) {
        self.turn(cmd.turn * self.turn_speed * dt);

        let speed = self.move_speed * if cmd.run { 2.0 } else { 1.0 } * dt;
        let delta = self.dir() * cmd.forward * speed + self.right() * cmd.strafe * speed;
        if delta != Vec2::ZERO {
            self.slide(delta, grid);
        }
    }

    /// Move by `delta`, one axis at a time so walls can be slid along.
    /// The result always stays inside the grid extents.
    pub fn slide(&mut self, delta: Vec2, grid: &Grid) {
        let lo = Vec2::splat(self.radius);
        let hi = Vec2::splat(grid.dim() as f32 - self.radius);

        let mut next = self.pos;
        next.x += delta.x;
        next = next.clamp(lo, hi);
        if self.overlaps_wall(next, grid) {
            next.x = self.pos.x;
        }
        next.y += delta.y;
        next = next.clamp(lo, hi);
        if self.overlaps_wall(next, grid) {
            next.y = self.pos.y;
        }
        self.pos = next;
    }

    fn overlaps_wall(&self, p: Vec2, grid: &Grid) -> bool {
        let r = self.radius;
        [vec2(-r, -r), vec2(r, -r), vec2(-r, r), vec2(r, r)]
            .into_iter()
            .map(|corner| (p + corner).floor())
            .any(|c| grid.is_solid(c.x as i32, c.y as i32))
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
