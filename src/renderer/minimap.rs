//! Top-down debug overlay drawn in the top-left corner of the frame.
//!
//! Shows every tile, the actor, its heading and a thinned-out fan of the
//! rays cast this frame.  Also maps mouse clicks back to tiles so the grid
//! can be edited live.

use glam::{IVec2, Vec2};

use super::{Colour, PixelBuffer, projector::wall_colour};
use crate::{
    caster::Side,
    world::{Actor, EMPTY, Grid},
};

const FLOOR_TILE: Colour = Colour::rgb(127, 127, 127);
const OUTLINE: Colour = Colour::BLACK;
const HEADING_LEN_PX: f32 = 25.0;
const ACTOR_DOT_PX: i32 = 5;

#[derive(Clone, Copy, Debug)]
pub struct Minimap {
    tile_px: usize,
    /// draw one ray out of every `ray_stride`
    ray_stride: usize,
}

impl Minimap {
    pub fn new(tile_px: usize) -> Self {
        Self {
            tile_px,
            ray_stride: 16,
        }
    }

    pub fn with_ray_stride(mut self, stride: usize) -> Self {
        self.ray_stride = stride.max(1);
        self
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.tile_px > 0
    }

    /// Edge length of the overlay in pixels.
    #[inline]
    pub fn size_px(&self, grid: &Grid) -> usize {
        grid.dim() * self.tile_px
    }

    /// Tile-space → overlay pixel.
    #[inline]
    pub fn to_px(&self, p: Vec2) -> IVec2 {
        (p * self.tile_px as f32).floor().as_ivec2()
    }

    /// Tile under overlay pixel `(px, py)`, `None` outside the overlay.
    pub fn tile_at(&self, grid: &Grid, px: i32, py: i32) -> Option<(i32, i32)> {
        if !self.is_enabled() {
            return None;
        }
        let size = self.size_px(grid) as i32;
        let inside = (0..size).contains(&px) && (0..size).contains(&py);
        let t = self.tile_px as i32;
        inside.then(|| (px / t, py / t))
    }

    /// Draw the overlay.  `ray_ends` are hit points in tile units, one per
    /// screen column.
    pub fn draw<I>(&self, buf: &mut PixelBuffer, grid: &Grid, actor: &Actor, ray_ends: I)
    where
        I: IntoIterator<Item = Vec2>,
    {
        if !self.is_enabled() {
            return;
        }
        let t = self.tile_px as i32;

        /* tiles ----------------------------------------------------------*/
        for y in 0..grid.dim() as i32 {
            for x in 0..grid.dim() as i32 {
                let fill = match grid.tile(x, y) {
                    EMPTY => FLOOR_TILE,
                    code => wall_colour(code, Side::Vertical),
                };
                buf.fill_rect(x * t, y * t, t, t, OUTLINE);
                buf.fill_rect(x * t + 1, y * t + 1, t - 2, t - 2, fill);
            }
        }

        /* rays -----------------------------------------------------------*/
        let eye = self.to_px(actor.position());
        for end in ray_ends.into_iter().step_by(self.ray_stride) {
            draw_line(buf, eye, self.to_px(end), Colour::BLUE);
        }

        /* actor + heading ------------------------------------------------*/
        let half = ACTOR_DOT_PX / 2;
        buf.fill_rect(eye.x - half, eye.y - half, ACTOR_DOT_PX, ACTOR_DOT_PX, Colour::WHITE);
        let tip = eye + (actor.dir() * HEADING_LEN_PX).as_ivec2();
        draw_line(buf, eye, tip, Colour::YELLOW);
    }
}

/// Integer Bresenham line‑drawing algorithm, clipped per pixel.
pub fn draw_line(buf: &mut PixelBuffer, from: IVec2, to: IVec2, colour: Colour) {
    let (mut x0, mut y0) = (from.x, from.y);
    let (x1, y1) = (to.x, to.y);

    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        buf.set_pixel(x0, y0, colour);
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            if x0 == x1 {
                break;
            }
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            if y0 == y1 {
                break;
            }
            err += dx;
            y0 += sy;
        }
    }
}
