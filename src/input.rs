//! Keyboard state to per-frame intent
//!
//! The platform layer feeds raw key names (DOM `KeyboardEvent.key` values)
//! into [`Keyboard`]; the game loop samples it once per frame.

use crate::sim::TickInput;

/// A logical game action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Fire,
    Restart,
    Quit,
    /// Toggle attract-mode autopilot
    Autopilot,
    /// Toggle sound
    Mute,
}

impl Action {
    /// Fixed key bindings
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "a" | "A" | "ArrowLeft" => Some(Action::MoveLeft),
            "d" | "D" | "ArrowRight" => Some(Action::MoveRight),
            " " | "Spacebar" => Some(Action::Fire),
            "r" | "R" => Some(Action::Restart),
            "Escape" => Some(Action::Quit),
            "i" | "I" => Some(Action::Autopilot),
            "m" | "M" => Some(Action::Mute),
            _ => None,
        }
    }
}

/// Currently held keys plus latched one-shot toggles
#[derive(Debug, Clone, Default)]
pub struct Keyboard {
    left: bool,
    right: bool,
    fire: bool,
    restart: bool,
    quit: bool,
    autopilot_toggled: bool,
    mute_toggled: bool,
}

impl Keyboard {
    /// Record a key press; returns the action it maps to, if any
    pub fn press(&mut self, key: &str) -> Option<Action> {
        let action = Action::from_key(key)?;
        match action {
            Action::MoveLeft => self.left = true,
            Action::MoveRight => self.right = true,
            Action::Fire => self.fire = true,
            Action::Restart => self.restart = true,
            Action::Quit => self.quit = true,
            Action::Autopilot => self.autopilot_toggled = true,
            Action::Mute => self.mute_toggled = true,
        }
        Some(action)
    }

    pub fn release(&mut self, key: &str) {
        match Action::from_key(key) {
            Some(Action::MoveLeft) => self.left = false,
            Some(Action::MoveRight) => self.right = false,
            Some(Action::Fire) => self.fire = false,
            Some(Action::Restart) => self.restart = false,
            // Quit and the toggles latch until consumed
            Some(Action::Quit) | Some(Action::Autopilot) | Some(Action::Mute) | None => {}
        }
    }

    /// Drop every held key (window lost focus)
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Intent for this frame
    pub fn intent(&self) -> TickInput {
        TickInput {
            move_left: self.left,
            move_right: self.right,
            fire: self.fire,
            restart: self.restart,
            quit: self.quit,
        }
    }

    /// Returns true once per autopilot key press
    pub fn take_autopilot_toggle(&mut self) -> bool {
        std::mem::take(&mut self.autopilot_toggled)
    }

    pub fn take_mute_toggle(&mut self) -> bool {
        std::mem::take(&mut self.mute_toggled)
    }
}
