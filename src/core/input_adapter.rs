use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{Key, KeyCode, NamedKey, PhysicalKey};

/// Step applied by the zoom shortcuts
pub const ZOOM_STEP: f32 = 0.1;
/// Step applied by the elevation shortcuts, in degrees
pub const ELEVATION_STEP_DEGREES: f32 = 5.0;

/// Keyboard shortcuts understood by the application
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewerCommand {
    ZoomBy(f32),
    ElevateBy(f32),
    ToggleTheme,
    Quit,
}

/// Pointer state gathered from winit events between frames
#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    /// Current cursor position in physical pixels
    position: Option<(f32, f32)>,
    dragging: bool,
    /// Drag movement since the last take
    drag_delta: (f32, f32),
    /// Wheel lines since the last take, positive away from the user
    wheel: f32,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a winit event. Returns true when the cursor moved.
    pub fn process_event(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                self.dragging = *state == ElementState::Pressed;
                false
            }
            WindowEvent::CursorMoved { position, .. } => {
                let new_pos = (position.x as f32, position.y as f32);
                if let (Some(old_pos), true) = (self.position, self.dragging) {
                    self.drag_delta.0 += new_pos.0 - old_pos.0;
                    self.drag_delta.1 += new_pos.1 - old_pos.1;
                }
                self.position = Some(new_pos);
                true
            }
            WindowEvent::CursorLeft { .. } => {
                self.position = None;
                self.dragging = false;
                false
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.wheel += match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 50.0,
                };
                false
            }
            _ => false,
        }
    }

    pub fn position(&self) -> Option<(f32, f32)> {
        self.position
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Drag movement accumulated since the previous call
    pub fn take_drag(&mut self) -> (f32, f32) {
        std::mem::take(&mut self.drag_delta)
    }

    /// Wheel movement accumulated since the previous call
    pub fn take_wheel(&mut self) -> f32 {
        std::mem::take(&mut self.wheel)
    }
}

/// Map a pressed key to a viewer command
pub fn command_for_key(physical: PhysicalKey, logical: &Key) -> Option<ViewerCommand> {
    if let Key::Character(text) = logical {
        match text.as_str() {
            "+" | "=" => return Some(ViewerCommand::ZoomBy(ZOOM_STEP)),
            "-" | "_" => return Some(ViewerCommand::ZoomBy(-ZOOM_STEP)),
            _ => {}
        }
    }
    if let Key::Named(NamedKey::Escape) = logical {
        return Some(ViewerCommand::Quit);
    }

    match physical {
        PhysicalKey::Code(KeyCode::NumpadAdd) => Some(ViewerCommand::ZoomBy(ZOOM_STEP)),
        PhysicalKey::Code(KeyCode::NumpadSubtract) => Some(ViewerCommand::ZoomBy(-ZOOM_STEP)),
        PhysicalKey::Code(KeyCode::ArrowUp) => {
            Some(ViewerCommand::ElevateBy(ELEVATION_STEP_DEGREES))
        }
        PhysicalKey::Code(KeyCode::ArrowDown) => {
            Some(ViewerCommand::ElevateBy(-ELEVATION_STEP_DEGREES))
        }
        PhysicalKey::Code(KeyCode::KeyT) => Some(ViewerCommand::ToggleTheme),
        PhysicalKey::Code(KeyCode::Escape) => Some(ViewerCommand::Quit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::event::DeviceId;

    // KeyEvent cannot be built outside winit, so tests go through the key mapping and
    // the pointer events that have public constructors.

    fn cursor(x: f64, y: f64) -> WindowEvent {
        WindowEvent::CursorMoved {
            device_id: DeviceId::dummy(),
            position: winit::dpi::PhysicalPosition::new(x, y),
        }
    }

    fn left(state: ElementState) -> WindowEvent {
        WindowEvent::MouseInput {
            device_id: DeviceId::dummy(),
            state,
            button: MouseButton::Left,
        }
    }

    #[test]
    fn test_new_tracker_empty() {
        let mut tracker = PointerTracker::new();
        assert_eq!(tracker.position(), None);
        assert!(!tracker.is_dragging());
        assert_eq!(tracker.take_drag(), (0.0, 0.0));
        assert_eq!(tracker.take_wheel(), 0.0);
    }

    #[test]
    fn test_drag_accumulates_only_while_pressed() {
        let mut tracker = PointerTracker::new();
        assert!(tracker.process_event(&cursor(10.0, 10.0)));
        tracker.process_event(&cursor(20.0, 10.0));
        assert_eq!(tracker.take_drag(), (0.0, 0.0));

        tracker.process_event(&left(ElementState::Pressed));
        tracker.process_event(&cursor(25.0, 14.0));
        tracker.process_event(&cursor(30.0, 18.0));
        assert_eq!(tracker.take_drag(), (10.0, 8.0));
        assert_eq!(tracker.take_drag(), (0.0, 0.0));

        tracker.process_event(&left(ElementState::Released));
        tracker.process_event(&cursor(50.0, 50.0));
        assert_eq!(tracker.take_drag(), (0.0, 0.0));
        assert_eq!(tracker.position(), Some((50.0, 50.0)));
    }

    #[test]
    fn test_wheel_lines() {
        let mut tracker = PointerTracker::new();
        tracker.process_event(&WindowEvent::MouseWheel {
            device_id: DeviceId::dummy(),
            delta: MouseScrollDelta::LineDelta(0.0, 2.0),
            phase: winit::event::TouchPhase::Moved,
        });
        assert_eq!(tracker.take_wheel(), 2.0);
        assert_eq!(tracker.take_wheel(), 0.0);
    }

    #[test]
    fn test_key_commands() {
        let unknown = PhysicalKey::Code(KeyCode::KeyZ);
        assert_eq!(
            command_for_key(unknown, &Key::Character("+".into())),
            Some(ViewerCommand::ZoomBy(ZOOM_STEP))
        );
        assert_eq!(
            command_for_key(unknown, &Key::Character("-".into())),
            Some(ViewerCommand::ZoomBy(-ZOOM_STEP))
        );
        assert_eq!(
            command_for_key(PhysicalKey::Code(KeyCode::ArrowUp), &Key::Named(NamedKey::ArrowUp)),
            Some(ViewerCommand::ElevateBy(5.0))
        );
        assert_eq!(
            command_for_key(PhysicalKey::Code(KeyCode::KeyT), &Key::Character("t".into())),
            Some(ViewerCommand::ToggleTheme)
        );
        assert_eq!(
            command_for_key(PhysicalKey::Code(KeyCode::Escape), &Key::Named(NamedKey::Escape)),
            Some(ViewerCommand::Quit)
        );
        assert_eq!(command_for_key(unknown, &Key::Character("z".into())), None);
    }
}
