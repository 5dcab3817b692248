//! Immutable render configuration.
//!
//! Everything the grid, caster and projector need to know about the
//! screen and the camera lens lives here, so several configurations can be
//! built side by side (tests do exactly that).

use thiserror::Error;

/// Which ray-casting strategy builds the per-column rays.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Strategy {
    /// Direction + camera-plane rays walked with a DDA.
    #[default]
    Dda,
    /// Evenly spaced ray angles, horizontal/vertical intersection search.
    Sweep,
}

/// Things that make a configuration unusable.
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("screen size {width}x{height} must be non-zero")]
    ZeroSize { width: usize, height: usize },

    #[error("field of view {0}° must lie in (0, 180)")]
    Fov(f32),

    #[error("grid dimension {0} is too small (need at least 3)")]
    GridTooSmall(usize),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderConfig {
    width: usize,
    height: usize,
    fov_deg: f32,
    grid_dim: usize,
    strategy: Strategy,
    minimap_tile_px: usize,
    target_fps: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            fov_deg: 60.0,
            grid_dim: 20,
            strategy: Strategy::Dda,
            minimap_tile_px: 16,
            target_fps: 60,
        }
    }
}

impl RenderConfig {
    /// Validate and build a configuration. Minimap size and frame rate keep
    /// their defaults; use the `with_*` builders to change them.
    pub fn new(
        width: usize,
        height: usize,
        fov_deg: f32,
        grid_dim: usize,
        strategy: Strategy,
    ) -> Result<Self, ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::ZeroSize { width, height });
        }
        if !(fov_deg > 0.0 && fov_deg < 180.0) {
            return Err(ConfigError::Fov(fov_deg));
        }
        if grid_dim < 3 {
            return Err(ConfigError::GridTooSmall(grid_dim));
        }
        Ok(Self {
            width,
            height,
            fov_deg,
            grid_dim,
            strategy,
            ..Self::default()
        })
    }

    /// Pixel size of one minimap tile; `0` hides the overlay.
    pub fn with_minimap(mut self, tile_px: usize) -> Self {
        self.minimap_tile_px = tile_px;
        self
    }

    pub fn with_target_fps(mut self, fps: usize) -> Self {
        self.target_fps = fps;
        self
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }
    #[inline]
    pub fn fov_deg(&self) -> f32 {
        self.fov_deg
    }
    #[inline]
    pub fn grid_dim(&self) -> usize {
        self.grid_dim
    }
    #[inline]
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }
    #[inline]
    pub fn minimap_tile_px(&self) -> usize {
        self.minimap_tile_px
    }
    #[inline]
    pub fn target_fps(&self) -> usize {
        self.target_fps
    }

    /// Pixels of wall height per tile at distance 1.
    ///
    /// ```text
    /// Dda   : height
    /// Sweep : (width / 2) / tan(fov / 2)     (projection-plane distance)
    /// ```
    pub fn projection_scale(&self) -> f32 {
        match self.strategy {
            Strategy::Dda => self.height as f32,
            Strategy::Sweep => {
                (self.width as f32 * 0.5) / (self.fov_deg * 0.5).to_radians().tan()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let d = RenderConfig::default();
        let again = RenderConfig::new(d.width(), d.height(), d.fov_deg(), d.grid_dim(), d.strategy())
            .unwrap();
        assert_eq!(again, d);
    }

    #[test]
    fn rejects_bad_values() {
        assert_eq!(
            RenderConfig::new(0, 10, 60.0, 10, Strategy::Dda).unwrap_err(),
            ConfigError::ZeroSize { width: 0, height: 10 }
        );
        assert_eq!(
            RenderConfig::new(10, 10, 180.0, 10, Strategy::Dda).unwrap_err(),
            ConfigError::Fov(180.0)
        );
        assert!(matches!(
            RenderConfig::new(10, 10, f32::NAN, 10, Strategy::Dda),
            Err(ConfigError::Fov(_))
        ));
        assert_eq!(
            RenderConfig::new(10, 10, 60.0, 2, Strategy::Dda).unwrap_err(),
            ConfigError::GridTooSmall(2)
        );
    }

    #[test]
    fn projection_scale_per_strategy() {
        let dda = RenderConfig::new(640, 400, 90.0, 10, Strategy::Dda).unwrap();
        assert_eq!(dda.projection_scale(), 400.0);

        let sweep = RenderConfig::new(640, 400, 90.0, 10, Strategy::Sweep).unwrap();
        assert!((sweep.projection_scale() - 320.0).abs() < 1e-2);
    }
}
