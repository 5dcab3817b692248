//! Wall distance → vertical screen slice.
//!
//! ```text
//! height = scale / distance
//! start  = clamp(H/2 - height/2, 0, H)
//! end    = clamp(H/2 + height/2, 0, H)
//!
//!   0 ┬ ceiling
//! start ┼ wall       (two shades: one per Side)
//!   end ┼ floor
//!   H ┴
//! ```

use super::{Colour, PixelBuffer};
use crate::{
    caster::{Hit, Side},
    world::Tile,
};

/// Anything closer is treated as this far so the division stays finite.
pub const MIN_DISTANCE: f32 = 1e-4;

pub const CEILING: Colour = Colour::rgb(135, 206, 235);
pub const FLOOR: Colour = Colour::rgb(0, 153, 51);

/// `[light, dark]` per wall variant, starting at code 1.
const WALL_SHADES: [[Colour; 2]; 3] = [
    [Colour::rgb(255, 204, 102), Colour::rgb(255, 153, 51)],
    [Colour::rgb(200, 72, 60), Colour::rgb(150, 52, 44)],
    [Colour::rgb(112, 132, 204), Colour::rgb(80, 96, 150)],
];

/// Wall colour for a tile code seen from `side`.  Codes beyond the palette
/// wrap around it.
pub fn wall_colour(code: Tile, side: Side) -> Colour {
    let variant = (code.max(1) as usize - 1) % WALL_SHADES.len();
    let shade = match side {
        Side::Vertical => 0,
        Side::Horizontal => 1,
    };
    WALL_SHADES[variant][shade]
}

/// One column's vertical extents; rows `start..end` are wall.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Slice {
    pub start: usize,
    pub end: usize,
    pub wall: Colour,
}

impl Slice {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Projector {
    width: usize,
    height: usize,
    scale: f32,
}

impl Projector {
    /// `scale` is the wall height in pixels at distance 1.
    pub fn new(width: usize, height: usize, scale: f32) -> Self {
        Self {
            width,
            height,
            scale,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Unclipped wall height in pixels.
    #[inline]
    pub fn wall_height(&self, distance: f32) -> f32 {
        self.scale / distance.max(MIN_DISTANCE)
    }

    /// Clipped `(start, end)` rows for a wall `distance` away.
    pub fn span(&self, distance: f32) -> (usize, usize) {
        let h = self.wall_height(distance);
        let screen_h = self.height as f32;
        let mid = screen_h * 0.5;
        let start = (mid - h * 0.5).clamp(0.0, screen_h) as usize;
        let end = (mid + h * 0.5).clamp(0.0, screen_h) as usize;
        (start, end)
    }

    /// Slice for `hit`, whose distance must already be perpendicular.
    /// A miss gives an empty wall band at the horizon.
    pub fn slice(&self, hit: &Hit) -> Slice {
        let wall = wall_colour(hit.code, hit.side);
        if hit.is_miss() {
            let mid = self.height / 2;
            return Slice {
                start: mid,
                end: mid,
                wall,
            };
        }
        let (start, end) = self.span(hit.distance);
        Slice { start, end, wall }
    }

    /// Paint column `x`: ceiling, wall, floor.
    pub fn draw_column(&self, buf: &mut PixelBuffer, x: usize, slice: &Slice) {
        let x = x as i32;
        buf.fill_column(x, 0, slice.start, CEILING);
        buf.fill_column(x, slice.start, slice.end, slice.wall);
        buf.fill_column(x, slice.end, self.height, FLOOR);
    }
}

/*──────────────────────────────── Tests ───────────────────────────────*/
