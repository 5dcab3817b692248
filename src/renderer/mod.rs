//! Software frame-buffer and the presentation boundary.
//!
//! *The rest of the crate never talks to a window directly.*
//! It draws into a [`PixelBuffer`] and hands the finished bytes to a type
//! that implements [`Present`].
//!
//! * The buffer is **RGBA8**, row-major, top-left origin.
//! * Every pixel written through [`PixelBuffer::set_pixel`] is opaque.

pub mod minimap;
pub mod projector;

pub use minimap::Minimap;
pub use projector::{Projector, Slice};

/// Opaque 24-bit colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Colour {
    pub const BLACK: Colour = Colour::rgb(0, 0, 0);
    pub const WHITE: Colour = Colour::rgb(255, 255, 255);
    pub const RED: Colour = Colour::rgb(255, 0, 0);
    pub const BLUE: Colour = Colour::rgb(0, 0, 255);
    pub const YELLOW: Colour = Colour::rgb(255, 255, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `[r, g, b, 255]`
    #[inline]
    pub const fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

/// The frame-buffer every draw routine writes into.
#[derive(Clone, Debug)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    bytes: Vec<u8>,
}

impl PixelBuffer {
    /// Zeroed `width × height` buffer.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            bytes: vec![0; width * height * 4],
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

    /// Raw RGBA bytes, `width * height * 4` long.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Zero every byte (transparent black).
    pub fn clear(&mut self) {
        self.bytes.fill(0);
    }

    #[inline]
    fn offset(&self, x: i32, y: i32) -> Option<usize> {
        let inside = (0..self.width as i32).contains(&x) && (0..self.height as i32).contains(&y);
        inside.then(|| (y as usize * self.width + x as usize) * 4)
    }

    /// Write one opaque pixel; silently ignored outside the buffer.
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, colour: Colour) {
        if let Some(o) = self.offset(x, y) {
            self.bytes[o..o + 4].copy_from_slice(&colour.to_rgba());
        }
    }

    /// Fill rows `y0..y1` of column `x` (already clipped by the caller or not).
    pub fn fill_column(&mut self, x: i32, y0: usize, y1: usize, colour: Colour) {
        for y in y0..y1.min(self.height) {
            self.set_pixel(x, y as i32, colour);
        }
    }

    /// Fill the axis-aligned rectangle `[x, x + w) × [y, y + h)`, clipped.
    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, colour: Colour) {
        for py in y.max(0)..(y + h).min(self.height as i32) {
            for px in x.max(0)..(x + w).min(self.width as i32) {
                self.set_pixel(px, py, colour);
            }
        }
    }

    /// `[r, g, b, a]` at `(x, y)`, `None` outside.
    pub fn pixel(&self, x: i32, y: i32) -> Option<[u8; 4]> {
        self.offset(x, y).map(|o| {
            let mut px = [0; 4];
            px.copy_from_slice(&self.bytes[o..o + 4]);
            px
        })
    }

    /// Hand the finished frame to `target`.  The only call that crosses the
    /// display boundary.
    pub fn present<P: Present + ?Sized>(&self, target: &mut P) -> anyhow::Result<()> {
        target.present(&self.bytes, self.width, self.height)
    }
}

/// Something that can show a finished RGBA frame: a window, a file, a test
/// probe.
pub trait Present {
    /// Upload and display `rgba` (`width * height * 4` bytes).
    fn present(&mut self, rgba: &[u8], width: usize, height: usize) -> anyhow::Result<()>;
}

/// Pack RGBA bytes into `0x00RRGGBB` words, reusing `dst`.
pub fn rgba_to_rgb32(rgba: &[u8], dst: &mut Vec<u32>) {
    dst.clear();
    dst.extend(
        rgba.chunks_exact(4)
            .map(|p| (p[0] as u32) << 16 | (p[1] as u32) << 8 | p[2] as u32),
    );
}

/*──────────────────────────────── Tests ───────────────────────────────*/
#[cfg(test)]
mod tests {
    use super::*;

    /// Keeps a copy of whatever it was asked to show.
    #[derive(Default)]
    struct Probe {
        frames: usize,
        last: Vec<u8>,
        size: (usize, usize),
    }

    impl Present for Probe {
        fn present(&mut self, rgba: &[u8], width: usize, height: usize) -> anyhow::Result<()> {
            self.frames += 1;
            self.last = rgba.to_vec();
            self.size = (width, height);
            Ok(())
        }
    }

    #[test]
    fn set_pixel_is_opaque_and_bounds_checked() {
        let mut buf = PixelBuffer::new(4, 3);
        buf.set_pixel(1, 2, Colour::rgb(10, 20, 30));
        assert_eq!(buf.pixel(1, 2), Some([10, 20, 30, 255]));

        let before = buf.as_bytes().to_vec();
        for (x, y) in [(-1, 0), (4, 0), (0, 3), (0, -1)] {
            buf.set_pixel(x, y, Colour::WHITE);
            assert_eq!(buf.pixel(x, y), None);
        }
        assert_eq!(buf.as_bytes(), &before[..]);
    }

    #[test]
    fn clear_zeroes_everything() {
        let mut buf = PixelBuffer::new(3, 3);
        buf.fill_rect(-5, -5, 50, 50, Colour::RED);
        assert!(buf.as_bytes().chunks_exact(4).all(|p| p == [255, 0, 0, 255]));
        buf.clear();
        assert!(buf.as_bytes().iter().all(|&b| b == 0));
        assert_eq!(buf.as_bytes().len(), 3 * 3 * 4);
    }

    #[test]
    fn present_hands_over_raw_bytes() {
        let mut buf = PixelBuffer::new(2, 2);
        buf.set_pixel(0, 0, Colour::BLUE);
        let mut probe = Probe::default();
        buf.present(&mut probe).unwrap();
        assert_eq!(probe.frames, 1);
        assert_eq!(probe.size, (2, 2));
        assert_eq!(&probe.last[..4], &[0, 0, 255, 255]);
    }

    #[test]
    fn packs_rgb32() {
        let mut out = vec![7];
        rgba_to_rgb32(&[0x12, 0x34, 0x56, 0xFF, 0, 0, 0, 0], &mut out);
        assert_eq!(out, [0x00_12_34_56, 0]);
    }
}
