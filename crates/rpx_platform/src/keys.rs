//! Translation from winit input identities to engine button IDs.
//!
//! Keys map by physical position (US layout letters), so the same key always
//! produces the same ID regardless of Shift. Keys outside the letter row still
//! get an ID when a sensible character exists; the engine ignores the ones it
//! does not track.

use rpx_core::ButtonId;
use winit::event::MouseButton;
use winit::keyboard::{KeyCode, PhysicalKey};

pub fn map_key(key: PhysicalKey) -> Option<ButtonId> {
    let PhysicalKey::Code(code) = key else {
        return None;
    };
    let key = match code {
        KeyCode::KeyA => 'a',
        KeyCode::KeyB => 'b',
        KeyCode::KeyC => 'c',
        KeyCode::KeyD => 'd',
        KeyCode::KeyE => 'e',
        KeyCode::KeyF => 'f',
        KeyCode::KeyG => 'g',
        KeyCode::KeyH => 'h',
        KeyCode::KeyI => 'i',
        KeyCode::KeyJ => 'j',
        KeyCode::KeyK => 'k',
        KeyCode::KeyL => 'l',
        KeyCode::KeyM => 'm',
        KeyCode::KeyN => 'n',
        KeyCode::KeyO => 'o',
        KeyCode::KeyP => 'p',
        KeyCode::KeyQ => 'q',
        KeyCode::KeyR => 'r',
        KeyCode::KeyS => 's',
        KeyCode::KeyT => 't',
        KeyCode::KeyU => 'u',
        KeyCode::KeyV => 'v',
        KeyCode::KeyW => 'w',
        KeyCode::KeyX => 'x',
        KeyCode::KeyY => 'y',
        KeyCode::KeyZ => 'z',
        KeyCode::Digit0 => '0',
        KeyCode::Digit1 => '1',
        KeyCode::Digit2 => '2',
        KeyCode::Digit3 => '3',
        KeyCode::Digit4 => '4',
        KeyCode::Digit5 => '5',
        KeyCode::Digit6 => '6',
        KeyCode::Digit7 => '7',
        KeyCode::Digit8 => '8',
        KeyCode::Digit9 => '9',
        KeyCode::Space => ' ',
        KeyCode::Escape => '\u{1b}',
        KeyCode::Enter => '\r',
        _ => return None,
    };
    Some(ButtonId::Keyboard(key))
}

pub fn map_mouse_button(button: MouseButton) -> Option<ButtonId> {
    match button {
        MouseButton::Left => Some(ButtonId::LEFT),
        MouseButton::Right => Some(ButtonId::RIGHT),
        MouseButton::Middle => Some(ButtonId::Mouse(3)),
        _ => None,
    }
}
