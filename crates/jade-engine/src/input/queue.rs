/// Mouse buttons the engine tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

/// Input event types the engine understands.
/// Coordinates are window pixels; the engine maps them to render space.
#[derive(Debug, Clone, Copy)]
pub enum InputEvent {
    /// The cursor moved to window coordinates (x, y).
    PointerMove { x: i32, y: i32 },
    /// A mouse button went down at window coordinates (x, y).
    PointerDown { button: MouseButton, x: i32, y: i32 },
    /// A mouse button went up at window coordinates (x, y).
    PointerUp { button: MouseButton, x: i32, y: i32 },
    /// Vertical wheel motion (positive away from the user).
    Wheel { y: i32 },
    /// A key was pressed.
    KeyDown { key_code: u32 },
    /// A key was released.
    KeyUp { key_code: u32 },
    /// The host window was asked to close.
    Quit,
}

/// A queue of input events.
/// The host writes events into the queue; the engine drains them each frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    /// Push a new input event (called by the host's event pump).
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerDown {
            button: MouseButton::Left,
            x: 10,
            y: 20,
        });
        q.push(InputEvent::KeyDown { key_code: 32 });
        assert_eq!(q.len(), 2);
        let events = q.drain();
        assert_eq!(events.len(), 2);
        assert!(q.is_empty());
    }
}
