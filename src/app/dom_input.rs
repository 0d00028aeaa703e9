//! Translates DOM pointer events into [`Input`] updates.
//!
//! The browser shell copies the fields it needs out of `MouseEvent` /
//! `WheelEvent` into a [`DomPointerEvent`]; everything after that is plain
//! data and runs on any target.

use crate::input::{ButtonState, Input, MouseButton, PIXELS_PER_LINE};

/// `WheelEvent.deltaMode` values.
pub const DOM_DELTA_PIXEL: u32 = 0;
pub const DOM_DELTA_LINE: u32 = 1;
pub const DOM_DELTA_PAGE: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DomPointerEvent {
    Down { button: i16, x: f32, y: f32 },
    Up { button: i16, x: f32, y: f32 },
    Move { x: f32, y: f32 },
    Wheel { delta_x: f32, delta_y: f32, delta_mode: u32 },
    Resize { width: u32, height: u32 },
}

/// Maps `MouseEvent.button` to the viewer's buttons.
#[must_use]
pub fn translate_dom_button(button: i16) -> MouseButton {
    match button {
        0 => MouseButton::Left,
        1 => MouseButton::Middle,
        2 => MouseButton::Right,
        other => MouseButton::Other(other.unsigned_abs()),
    }
}

/// Converts a wheel delta to line units with positive `y` meaning "zoom in".
///
/// DOM `deltaY` is positive when scrolling towards the user, the opposite
/// of [`Input::inject_scroll`]. Pages count as one line.
#[must_use]
pub fn wheel_to_scroll(delta_x: f32, delta_y: f32, delta_mode: u32) -> (f32, f32) {
    let scale = match delta_mode {
        DOM_DELTA_PIXEL => 1.0 / PIXELS_PER_LINE,
        _ => 1.0,
    };
    (-delta_x * scale, -delta_y * scale)
}

pub fn process_dom_event(input: &mut Input, event: DomPointerEvent) {
    match event {
        DomPointerEvent::Down { button, x, y } => {
            input.inject_cursor_position(x, y);
            input.inject_mouse_button(translate_dom_button(button), ButtonState::Pressed);
        }
        DomPointerEvent::Up { button, x, y } => {
            input.inject_cursor_position(x, y);
            input.inject_mouse_button(translate_dom_button(button), ButtonState::Released);
        }
        DomPointerEvent::Move { x, y } => input.inject_cursor_position(x, y),
        DomPointerEvent::Wheel {
            delta_x,
            delta_y,
            delta_mode,
        } => {
            let (dx, dy) = wheel_to_scroll(delta_x, delta_y, delta_mode);
            input.inject_scroll(dx, dy);
        }
        DomPointerEvent::Resize { width, height } => input.inject_resize(width, height),
    }
}
