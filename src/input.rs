//! Platform-agnostic input state.
//!
//! Window adapters translate platform events into the types here; the viewer
//! and orbit controls only ever read an [`Input`].

use std::collections::HashSet;

use glam::Vec2;

/// Pixel scroll deltas are divided by this to get line units.
pub const PIXELS_PER_LINE: f32 = 100.0;

/// Keys the viewer reacts to. Letters are stored lowercase.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Character(char),
    Space,
    Enter,
    Escape,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ButtonState {
    Pressed,
    Released,
}

/// Per-frame input snapshot.
///
/// Deltas accumulate between [`start_frame`](Self::start_frame) calls.
#[derive(Debug, Clone, Default)]
pub struct Input {
    pressed_keys: HashSet<Key>,
    just_pressed_keys: HashSet<Key>,

    pressed_mouse: HashSet<MouseButton>,

    cursor_position: Option<Vec2>,
    cursor_delta: Vec2,
    scroll_delta: Vec2,

    screen_size: Vec2,
}

impl Input {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears edge-triggered state and deltas.
    pub fn start_frame(&mut self) {
        self.just_pressed_keys.clear();
        self.cursor_delta = Vec2::ZERO;
        self.scroll_delta = Vec2::ZERO;
    }

    pub fn inject_key(&mut self, key: Key, state: ButtonState) {
        let key = match key {
            Key::Character(c) => Key::Character(c.to_ascii_lowercase()),
            other => other,
        };
        match state {
            ButtonState::Pressed => {
                if self.pressed_keys.insert(key) {
                    self.just_pressed_keys.insert(key);
                }
            }
            ButtonState::Released => {
                self.pressed_keys.remove(&key);
            }
        }
    }

    pub fn inject_mouse_button(&mut self, button: MouseButton, state: ButtonState) {
        match state {
            ButtonState::Pressed => {
                self.pressed_mouse.insert(button);
            }
            ButtonState::Released => {
                self.pressed_mouse.remove(&button);
            }
        }
    }

    /// The first position after startup establishes the origin and yields no delta.
    pub fn inject_cursor_position(&mut self, x: f32, y: f32) {
        let position = Vec2::new(x, y);
        if let Some(previous) = self.cursor_position {
            self.cursor_delta += position - previous;
        }
        self.cursor_position = Some(position);
    }

    /// Positive `dy` scrolls away from the user (zoom in).
    pub fn inject_scroll(&mut self, dx: f32, dy: f32) {
        self.scroll_delta += Vec2::new(dx, dy);
    }

    pub fn inject_resize(&mut self, width: u32, height: u32) {
        self.screen_size = Vec2::new(width as f32, height as f32);
    }

    #[must_use]
    pub fn is_key_pressed(&self, key: Key) -> bool {
        self.pressed_keys.contains(&key)
    }

    #[must_use]
    pub fn is_key_just_pressed(&self, key: Key) -> bool {
        self.just_pressed_keys.contains(&key)
    }

    #[must_use]
    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.pressed_mouse.contains(&button)
    }

    #[must_use]
    pub fn cursor_delta(&self) -> Vec2 {
        self.cursor_delta
    }

    #[must_use]
    pub fn scroll_delta(&self) -> Vec2 {
        self.scroll_delta
    }

    #[must_use]
    pub fn screen_size(&self) -> Vec2 {
        self.screen_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn just_pressed_lasts_one_frame() {
        let mut input = Input::new();
        input.inject_key(Key::Character('S'), ButtonState::Pressed);

        assert!(input.is_key_just_pressed(Key::Character('s')));
        input.start_frame();
        assert!(!input.is_key_just_pressed(Key::Character('s')));
        assert!(input.is_key_pressed(Key::Character('s')));
    }

    #[test]
    fn first_cursor_position_has_no_delta() {
        let mut input = Input::new();
        input.inject_cursor_position(100.0, 50.0);
        assert_eq!(input.cursor_delta(), Vec2::ZERO);

        input.inject_cursor_position(110.0, 45.0);
        assert_eq!(input.cursor_delta(), Vec2::new(10.0, -5.0));
    }
}
