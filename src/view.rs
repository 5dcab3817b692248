//! One frame of the first-person view: a ray per screen column, projected
//! into the pixel buffer.

use glam::Vec2;

use crate::{
    caster::{CastRay, Caster, ColumnRay, Hit},
    config::RenderConfig,
    renderer::{PixelBuffer, Projector},
    world::{Actor, Grid},
};

/// Per-column result kept for the minimap.
#[derive(Clone, Copy, Debug)]
pub struct ColumnHit {
    pub ray: ColumnRay,
    /// Raw hit, distance in ray-direction lengths (not fisheye corrected).
    pub hit: Hit,
}

impl ColumnHit {
    /// Perpendicular distance fed to the projector.
    #[inline]
    pub fn perpendicular(&self) -> f32 {
        if self.hit.is_miss() {
            self.hit.distance
        } else {
            self.hit.distance * self.ray.correction
        }
    }
}

pub struct View {
    caster: Caster,
    projector: Projector,
    columns: Vec<ColumnHit>,
}

impl View {
    pub fn new(config: &RenderConfig) -> Self {
        Self {
            caster: Caster::new(config.strategy()),
            projector: Projector::new(config.width(), config.height(), config.projection_scale()),
            columns: Vec::with_capacity(config.width()),
        }
    }

    #[inline]
    pub fn caster(&self) -> &Caster {
        &self.caster
    }

    #[inline]
    pub fn projector(&self) -> &Projector {
        &self.projector
    }

    /// Results of the last [`View::render`], left to right.
    #[inline]
    pub fn columns(&self) -> &[ColumnHit] {
        &self.columns
    }

    /// Hit points (tile units) of the last frame; misses are skipped.
    pub fn ray_ends<'a>(&'a self, origin: Vec2) -> impl Iterator<Item = Vec2> + 'a {
        self.columns
            .iter()
            .filter_map(move |c| c.hit.point(origin, c.ray.dir))
    }

    /// Clear `buf` and draw the whole view.  Only reads the grid and actor.
    pub fn render(&mut self, grid: &Grid, actor: &Actor, buf: &mut PixelBuffer) {
        debug_assert_eq!(buf.width(), self.projector.width());
        debug_assert_eq!(buf.height(), self.projector.height());

        buf.clear();
        self.columns.clear();

        let width = self.projector.width();
        let origin = actor.position();
        for col in 0..width {
            let ray = self.caster.column_ray(actor, col, width);
            let hit = self.caster.cast_ray(grid, origin, ray.dir);
            let column = ColumnHit { ray, hit };

            let mut projected = hit;
            projected.distance = column.perpendicular();
            let slice = self.projector.slice(&projected);
            self.projector.draw_column(buf, col, &slice);

            self.columns.push(column);
        }
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
