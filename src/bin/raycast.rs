//! First-person grid raycaster with a live-editable minimap.
//!
//! Controls  W/S ↑/↓ = forward/back  A/D ←/→ = turn  Q/E or Alt+←/→ = strafe
//!           Shift = run  LMB on minimap = toggle tile  RMB = cycle variant
//!           Esc = quit
//!
//! ```bash
//! cargo run --release -- --map assets/map.txt --strategy sweep
//! ```

use std::{
    path::PathBuf,
    time::{Duration, Instant},
};

use anyhow::Context;
use clap::Parser;
use glam::vec2;
use minifb::{Key, MouseButton, MouseMode, Window, WindowOptions};

use gridcast::{
    RenderConfig, Strategy,
    input::{Edit, EditKind, Held, InputCmd, InputSource},
    renderer::{Minimap, PixelBuffer, Present, rgba_to_rgb32},
    view::View,
    world::{Actor, Grid},
};

/// CLI options handled via `clap` derive.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Opts {
    /// Digit grid file; without it an empty walled room is used
    #[arg(long, value_name = "FILE")]
    map: Option<PathBuf>,

    /// Tiles per grid side
    #[arg(long, default_value_t = 20)]
    grid_size: usize,

    #[arg(long, default_value_t = 1280)]
    width: usize,

    #[arg(long, default_value_t = 720)]
    height: usize,

    /// Horizontal field of view in degrees
    #[arg(long, default_value_t = 60.0)]
    fov: f32,

    #[arg(long, value_enum, default_value_t = Strategy::Dda)]
    strategy: Strategy,

    /// Minimap tile size in pixels (0 hides it)
    #[arg(long, default_value_t = 16)]
    minimap: usize,

    #[arg(long, default_value_t = 60)]
    fps: usize,

    /// Spawn position in tiles
    #[arg(long, num_args = 2, value_names = ["X", "Y"], default_values_t = [2.5, 2.5])]
    start: Vec<f32>,

    /// Spawn heading in degrees (0 = east, 90 = south)
    #[arg(long, default_value_t = 0.0)]
    heading: f32,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let opts = Opts::parse();

    let config = RenderConfig::new(opts.width, opts.height, opts.fov, opts.grid_size, opts.strategy)
        .context("invalid render configuration")?
        .with_minimap(opts.minimap)
        .with_target_fps(opts.fps);

    // ─────────── load grid ────────────
    let mut grid = match &opts.map {
        Some(path) => Grid::from_file(path, config.grid_dim())
            .with_context(|| format!("cannot load map {}", path.display()))?,
        None => {
            log::info!("no --map given, using an empty {0}x{0} room", config.grid_dim());
            Grid::bordered(config.grid_dim())
        }
    };

    let mut actor = Actor::new(vec2(opts.start[0], opts.start[1]), opts.heading, config.fov_deg());
    let (tx, ty) = actor.tile();
    if grid.is_solid(tx, ty) || !grid.contains(tx, ty) {
        log::warn!("spawn tile ({tx}, {ty}) is not open floor; movement will be blocked");
    }

    log::info!(
        "{}x{} view, {}° FoV, {:?} caster, {}x{} grid",
        config.width(),
        config.height(),
        config.fov_deg(),
        config.strategy(),
        grid.dim(),
        grid.dim()
    );

    let mut view = View::new(&config);
    let minimap = Minimap::new(config.minimap_tile_px());
    let mut frame = PixelBuffer::new(config.width(), config.height());
    let mut screen = Screen::open(&config)?;

    // ────────────────── benchmarking state ──────────────────────────────
    let mut acc_time = Duration::ZERO; // cumulated render time
    let mut acc_frames = 0usize; // frames in the current window
    let mut last_print = Instant::now(); // when we printed last
    let mut last_tick = Instant::now();

    while screen.is_open() {
        let dt = last_tick.elapsed().as_secs_f32().min(0.1);
        last_tick = Instant::now();

        /* edits ------------------------------------------------------------ */
        if let Some(edit) = screen.edit_request() {
            if let Some((x, y)) = minimap.tile_at(&grid, edit.x, edit.y) {
                match edit.kind {
                    EditKind::Toggle => grid.toggle(x, y),
                    EditKind::Cycle => grid.cycle(x, y),
                }
                log::debug!("tile ({x}, {y}) is now {}", grid.tile(x, y));
            }
        }

        /* movement --------------------------------------------------------- */
        let cmd = InputCmd::from_held(screen.held());
        actor.apply(&cmd, dt, &grid);

        /* draw ------------------------------------------------------------- */
        let t0 = Instant::now(); // ┌─ frame timer start
        view.render(&grid, &actor, &mut frame);
        minimap.draw(&mut frame, &grid, &actor, view.ray_ends(actor.position()));
        acc_time += t0.elapsed();
        acc_frames += 1;

        frame.present(&mut screen)?;

        if last_print.elapsed() >= Duration::from_secs(3) {
            let avg_ms = acc_time.as_secs_f64() * 1000.0 / acc_frames as f64;
            let fps = 1000.0 / avg_ms;
            log::info!("avg render: {:.2} ms  ({:.1} FPS)", avg_ms, fps);
            acc_time = Duration::ZERO;
            acc_frames = 0;
            last_print = Instant::now();
        }
    }
    Ok(())
}

/*───────────────────────── minifb glue ─────────────────────────────*/

/// The window: presents frames and reports input.
struct Screen {
    window: Window,
    scratch: Vec<u32>,
    /// mouse buttons held last frame, for edge detection
    was_down: [bool; 2],
}

impl Screen {
    fn open(config: &RenderConfig) -> anyhow::Result<Self> {
        let mut window = Window::new(
            "gridcast",
            config.width(),
            config.height(),
            WindowOptions::default(),
        )?;
        window.set_target_fps(config.target_fps());
        Ok(Self {
            window,
            scratch: Vec::with_capacity(config.width() * config.height()),
            was_down: [false; 2],
        })
    }

    fn is_open(&self) -> bool {
        self.window.is_open() && !self.window.is_key_down(Key::Escape)
    }

    fn any_down(&self, keys: &[Key]) -> bool {
        keys.iter().any(|&k| self.window.is_key_down(k))
    }
}

impl InputSource for Screen {
    fn held(&self) -> Held {
        let mut held = Held::empty();
        let alt = self.any_down(&[Key::LeftAlt, Key::RightAlt]);

        held.set(Held::FORWARD, self.any_down(&[Key::W, Key::Up]));
        held.set(Held::BACK, self.any_down(&[Key::S, Key::Down]));
        /* Alt + ←/→ = strafe, plain ←/→ = turn */
        held.set(Held::LEFT, self.window.is_key_down(Key::A) || (!alt && self.window.is_key_down(Key::Left)));
        held.set(Held::RIGHT, self.window.is_key_down(Key::D) || (!alt && self.window.is_key_down(Key::Right)));
        held.set(Held::STRAFE_LEFT, self.window.is_key_down(Key::Q) || (alt && self.window.is_key_down(Key::Left)));
        held.set(Held::STRAFE_RIGHT, self.window.is_key_down(Key::E) || (alt && self.window.is_key_down(Key::Right)));
        held.set(Held::RUN, self.any_down(&[Key::LeftShift, Key::RightShift]));
        held
    }

    fn edit_request(&mut self) -> Option<Edit> {
        let down = [
            self.window.get_mouse_down(MouseButton::Left),
            self.window.get_mouse_down(MouseButton::Right),
        ];
        // fire on release, like a click
        let released = |i: usize| self.was_down[i] && !down[i];
        let kind = if released(0) {
            Some(EditKind::Toggle)
        } else if released(1) {
            Some(EditKind::Cycle)
        } else {
            None
        };
        self.was_down = down;

        let (mx, my) = self.window.get_mouse_pos(MouseMode::Discard)?;
        kind.map(|kind| Edit {
            kind,
            x: mx as i32,
            y: my as i32,
        })
    }
}

impl Present for Screen {
    fn present(&mut self, rgba: &[u8], width: usize, height: usize) -> anyhow::Result<()> {
        rgba_to_rgb32(rgba, &mut self.scratch);
        self.window.update_with_buffer(&self.scratch, width, height)?;
        Ok(())
    }
}
