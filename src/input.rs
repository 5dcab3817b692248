//! Logical input: which actions are held this frame, plus discrete tile edits.
//!
//! The window layer implements [`InputSource`]; the rest of the crate only
//! ever sees [`Held`] flags and the [`InputCmd`] built from them.

use bitflags::bitflags;

bitflags! {
    /// Logical keys held down during the current frame.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct Held: u8 {
        const FORWARD      = 1 << 0;
        const BACK         = 1 << 1;
        const LEFT         = 1 << 2; // rotate
        const RIGHT        = 1 << 3; // rotate
        const STRAFE_LEFT  = 1 << 4;
        const STRAFE_RIGHT = 1 << 5;
        const RUN          = 1 << 6;
    }
}

/// What a click on the minimap should do to the tile under it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditKind {
    /// empty ↔ wall
    Toggle,
    /// step through the wall variants
    Cycle,
}

/// A discrete edit request at a screen pixel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Edit {
    pub kind: EditKind,
    pub x: i32,
    pub y: i32,
}

/// Per-frame input provider.
pub trait InputSource {
    /// Logical keys currently held.
    fn held(&self) -> Held;

    /// Edge-triggered edit request, at most one per frame.
    fn edit_request(&mut self) -> Option<Edit>;
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputCmd {
    pub forward: f32, // –1 … +1
    pub strafe: f32,  // –1 … +1  (left / right)
    pub turn: f32,    // –1 … +1  (left / right)
    pub run: bool,
}

impl InputCmd {
    /// Collapse held keys into axis values; opposite keys cancel.
    pub fn from_held(held: Held) -> Self {
        let axis = |neg: Held, pos: Held| -> f32 {
            held.contains(pos) as i8 as f32 - held.contains(neg) as i8 as f32
        };
        Self {
            forward: axis(Held::BACK, Held::FORWARD),
            strafe: axis(Held::STRAFE_LEFT, Held::STRAFE_RIGHT),
            turn: axis(Held::LEFT, Held::RIGHT),
            run: held.contains(Held::RUN),
        }
    }

    pub fn is_idle(&self) -> bool {
        self.forward == 0.0 && self.strafe == 0.0 && self.turn == 0.0
    }
}
