//! Grid raycaster in the Wolfenstein 3-D mould.
//!
//! Per frame: input → [`world::Actor`] update → one ray per column through
//! the [`world::Grid`] ([`caster`]) → [`renderer::Projector`] fills the
//! [`renderer::PixelBuffer`] → the buffer is presented.

pub mod caster;
pub mod config;
pub mod input;
pub mod renderer;
pub mod view;
pub mod world;

pub use config::{ConfigError, RenderConfig, Strategy};
