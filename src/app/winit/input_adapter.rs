//! Translates winit window events into [`Input`] updates.

use winit::event::{ElementState, MouseScrollDelta, WindowEvent};
use winit::keyboard::{Key as WinitKey, NamedKey};

use crate::input::{ButtonState, Input, Key, MouseButton, PIXELS_PER_LINE};

/// Maps a logical key to the viewer's key set.
#[must_use]
pub fn translate_key(key: &WinitKey) -> Option<Key> {
    match key {
        WinitKey::Character(text) => text.chars().next().map(|c| Key::Character(c.to_ascii_lowercase())),
        WinitKey::Named(NamedKey::Space) => Some(Key::Space),
        WinitKey::Named(NamedKey::Enter) => Some(Key::Enter),
        WinitKey::Named(NamedKey::Escape) => Some(Key::Escape),
        _ => None,
    }
}

#[must_use]
pub fn translate_mouse_button(button: winit::event::MouseButton) -> MouseButton {
    match button {
        winit::event::MouseButton::Left => MouseButton::Left,
        winit::event::MouseButton::Right => MouseButton::Right,
        winit::event::MouseButton::Middle => MouseButton::Middle,
        winit::event::MouseButton::Back => MouseButton::Other(3),
        winit::event::MouseButton::Forward => MouseButton::Other(4),
        winit::event::MouseButton::Other(id) => MouseButton::Other(id),
    }
}

#[must_use]
pub fn translate_element_state(state: ElementState) -> ButtonState {
    match state {
        ElementState::Pressed => ButtonState::Pressed,
        ElementState::Released => ButtonState::Released,
    }
}

/// Feeds one window event into `input`. Returns the key if this was a fresh key press.
pub fn process_window_event(input: &mut Input, event: &WindowEvent) -> Option<Key> {
    match event {
        WindowEvent::KeyboardInput { event, .. } => {
            let key = translate_key(&event.logical_key)?;
            input.inject_key(key, translate_element_state(event.state));
            (event.state == ElementState::Pressed && !event.repeat).then_some(key)
        }
        WindowEvent::CursorMoved { position, .. } => {
            input.inject_cursor_position(position.x as f32, position.y as f32);
            None
        }
        WindowEvent::MouseInput { state, button, .. } => {
            input.inject_mouse_button(translate_mouse_button(*button), translate_element_state(*state));
            None
        }
        WindowEvent::MouseWheel { delta, .. } => {
            let (dx, dy) = match delta {
                MouseScrollDelta::LineDelta(x, y) => (*x, *y),
                MouseScrollDelta::PixelDelta(pos) => {
                    (pos.x as f32 / PIXELS_PER_LINE, pos.y as f32 / PIXELS_PER_LINE)
                }
            };
            input.inject_scroll(dx, dy);
            None
        }
        WindowEvent::Resized(size) => {
            input.inject_resize(size.width, size.height);
            None
        }
        _ => None,
    }
}
