//! Mouse state tracking for camera control.

use winit::event::MouseButton;

use tankview_render::ControlInput;

/// Buttons, modifiers and last cursor position inside the window.
#[derive(Debug, Default)]
pub(super) struct PointerState {
    /// None until the first move after the cursor enters the window.
    position: Option<(f64, f64)>,
    left_down: bool,
    right_down: bool,
    shift_down: bool,
}

impl PointerState {
    pub fn set_button(&mut self, button: MouseButton, pressed: bool) {
        match button {
            MouseButton::Left => self.left_down = pressed,
            MouseButton::Right => self.right_down = pressed,
            _ => {}
        }
    }

    pub fn set_shift(&mut self, down: bool) {
        self.shift_down = down;
    }

    /// Forgets the cursor position, so the next move starts a fresh drag.
    pub fn reset_position(&mut self) {
        self.position = None;
    }

    /// Records a cursor move and returns the gesture it makes, if any.
    ///
    /// Left drag rotates; right drag or shift+left drag pans.
    pub fn moved(&mut self, x: f64, y: f64) -> Option<ControlInput> {
        let (last_x, last_y) = self.position.replace((x, y))?;
        let dx = (x - last_x) as f32;
        let dy = (y - last_y) as f32;

        if self.right_down || (self.left_down && self.shift_down) {
            Some(ControlInput::Pan { dx, dy })
        } else if self.left_down {
            Some(ControlInput::Rotate { dx, dy })
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_move_only_records_position() {
        let mut pointer = PointerState::default();
        pointer.set_button(MouseButton::Left, true);
        assert_eq!(pointer.moved(100.0, 100.0), None);
        assert_eq!(
            pointer.moved(110.0, 95.0),
            Some(ControlInput::Rotate { dx: 10.0, dy: -5.0 })
        );
    }

    #[test]
    fn test_reentering_window_does_not_jump() {
        let mut pointer = PointerState::default();
        pointer.set_button(MouseButton::Left, true);
        pointer.moved(10.0, 10.0);
        pointer.moved(12.0, 10.0);

        // Cursor leaves on one side and comes back far away
        pointer.reset_position();
        assert_eq!(pointer.moved(700.0, 500.0), None);
        assert_eq!(
            pointer.moved(701.0, 500.0),
            Some(ControlInput::Rotate { dx: 1.0, dy: 0.0 })
        );
    }

    #[test]
    fn test_pan_gestures() {
        let mut pointer = PointerState::default();
        pointer.moved(0.0, 0.0);

        pointer.set_button(MouseButton::Right, true);
        assert_eq!(
            pointer.moved(3.0, 4.0),
            Some(ControlInput::Pan { dx: 3.0, dy: 4.0 })
        );
        pointer.set_button(MouseButton::Right, false);

        pointer.set_button(MouseButton::Left, true);
        pointer.set_shift(true);
        assert_eq!(
            pointer.moved(4.0, 4.0),
            Some(ControlInput::Pan { dx: 1.0, dy: 0.0 })
        );
    }

    #[test]
    fn test_hover_without_buttons_is_ignored() {
        let mut pointer = PointerState::default();
        pointer.moved(0.0, 0.0);
        assert_eq!(pointer.moved(50.0, 50.0), None);
    }
}
