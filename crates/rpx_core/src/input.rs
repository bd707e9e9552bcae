//! Button identity and per-frame edge detection.
//!
//! Every tracked button carries a level-triggered `down` flag, written by the
//! event translation step whenever the hardware reports a change, and two
//! edge-triggered flags (`pressed`, `released`) recomputed once per frame by
//! [`HardwareButton::advance`]. An edge is therefore visible for exactly one frame.
//! A press and release that both land between two `advance` calls cancel out.
//!
//! Only the left/right mouse buttons and the lowercase letters `a`..`z` are
//! tracked. Anything else resolves to no slot, and querying it yields the default
//! all-false button rather than an error.

use serde::Deserialize;

/// State of one physical button.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HardwareButton {
    /// Level: true while the button is held.
    pub down: bool,
    /// Edge: true only on the frame `down` went false -> true.
    pub pressed: bool,
    /// Edge: true only on the frame `down` went true -> false.
    pub released: bool,
    previous: bool,
}

impl HardwareButton {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute the edge flags from this frame's `down` and the last frame's.
    pub fn advance(&mut self) {
        self.pressed = self.down && !self.previous;
        self.released = !self.down && self.previous;
        self.previous = self.down;
    }
}

/// Identifies a mouse button (1-based index) or a keyboard key (character).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonId {
    Mouse(u8),
    Keyboard(char),
}

impl ButtonId {
    pub const LEFT: ButtonId = ButtonId::Mouse(1);
    pub const RIGHT: ButtonId = ButtonId::Mouse(2);

    const FIRST_MOUSE: u8 = 1;
    const LAST_MOUSE: u8 = 2;
    const FIRST_KEY: char = 'a';
    const LAST_KEY: char = 'z';

    pub const MOUSE_COUNT: usize = (Self::LAST_MOUSE - Self::FIRST_MOUSE + 1) as usize;
    pub const KEY_COUNT: usize = (Self::LAST_KEY as u8 - Self::FIRST_KEY as u8 + 1) as usize;

    /// Dense zero-based slot in this ID's category, or `None` if untracked.
    pub fn resolve(self) -> Option<usize> {
        match self {
            ButtonId::Mouse(index) if (Self::FIRST_MOUSE..=Self::LAST_MOUSE).contains(&index) => {
                Some(usize::from(index - Self::FIRST_MOUSE))
            }
            ButtonId::Keyboard(key) if (Self::FIRST_KEY..=Self::LAST_KEY).contains(&key) => {
                Some(key as usize - Self::FIRST_KEY as usize)
            }
            _ => None,
        }
    }

    pub fn is_valid(self) -> bool {
        self.resolve().is_some()
    }
}

impl From<char> for ButtonId {
    fn from(key: char) -> Self {
        ButtonId::Keyboard(key)
    }
}

/// A raw input event after translation from the windowing backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HardwareEvent {
    Quit,
    Down(ButtonId),
    Up(ButtonId),
}

/// Button state for every tracked mouse button and key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputState {
    mouse: [HardwareButton; ButtonId::MOUSE_COUNT],
    keyboard: [HardwareButton; ButtonId::KEY_COUNT],
}

impl InputState {
    pub fn new() -> Self {
        Self {
            mouse: [HardwareButton::new(); ButtonId::MOUSE_COUNT],
            keyboard: [HardwareButton::new(); ButtonId::KEY_COUNT],
        }
    }

    /// Set the raw level of `id`. Returns false if `id` is not tracked.
    pub fn set_down(&mut self, id: ButtonId, down: bool) -> bool {
        match self.slot_mut(id) {
            Some(button) => {
                button.down = down;
                true
            }
            None => false,
        }
    }

    /// Run the edge detector on every tracked button.
    pub fn advance(&mut self) {
        for button in self.mouse.iter_mut().chain(self.keyboard.iter_mut()) {
            button.advance();
        }
    }

    /// State of `id`, or the all-false default for untracked IDs.
    pub fn button(&self, id: ButtonId) -> HardwareButton {
        match (id, id.resolve()) {
            (ButtonId::Mouse(_), Some(index)) => self.mouse[index],
            (ButtonId::Keyboard(_), Some(index)) => self.keyboard[index],
            _ => HardwareButton::default(),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn slot_mut(&mut self, id: ButtonId) -> Option<&mut HardwareButton> {
        let index = id.resolve()?;
        match id {
            ButtonId::Mouse(_) => self.mouse.get_mut(index),
            ButtonId::Keyboard(_) => self.keyboard.get_mut(index),
        }
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}
