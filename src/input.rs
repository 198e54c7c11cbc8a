use crate::pos::Dir;
use ahash::AHashSet;
use winit::event::{ElementState, KeyboardInput, VirtualKeyCode, WindowEvent};
use winit_input_helper::WinitInputHelper;

/// What the player asked for with a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Turn(Dir),
    TogglePause,
    Restart,
    Quit,
}

const BINDINGS: &[(VirtualKeyCode, Intent)] = &[
    // Movement - arrow keys
    (VirtualKeyCode::Up, Intent::Turn(Dir::Up)),
    (VirtualKeyCode::Down, Intent::Turn(Dir::Down)),
    (VirtualKeyCode::Left, Intent::Turn(Dir::Left)),
    (VirtualKeyCode::Right, Intent::Turn(Dir::Right)),
    // Movement - WASD
    (VirtualKeyCode::W, Intent::Turn(Dir::Up)),
    (VirtualKeyCode::S, Intent::Turn(Dir::Down)),
    (VirtualKeyCode::A, Intent::Turn(Dir::Left)),
    (VirtualKeyCode::D, Intent::Turn(Dir::Right)),
    // Controls
    (VirtualKeyCode::P, Intent::TogglePause),
    (VirtualKeyCode::Space, Intent::Restart),
    (VirtualKeyCode::Escape, Intent::Quit),
    (VirtualKeyCode::Q, Intent::Quit),
];

pub fn intent_for_key(key: VirtualKeyCode) -> Option<Intent> {
    BINDINGS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|&(_, intent)| intent)
}

/// Turns key events into intents one by one, in the order the window
/// delivers them. Auto-repeat presses of a key already held down are dropped.
#[derive(Debug, Default)]
pub struct KeyTracker {
    held: AHashSet<VirtualKeyCode>,
}

impl KeyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: VirtualKeyCode) -> Option<Intent> {
        if !self.held.insert(key) {
            return None;
        }
        intent_for_key(key)
    }

    pub fn release(&mut self, key: VirtualKeyCode) {
        self.held.remove(&key);
    }

    pub fn on_window_event(&mut self, event: &WindowEvent) -> Option<Intent> {
        match event {
            WindowEvent::KeyboardInput {
                input:
                    KeyboardInput {
                        state,
                        virtual_keycode: Some(key),
                        ..
                    },
                ..
            } => match state {
                ElementState::Pressed => self.press(*key),
                ElementState::Released => {
                    self.release(*key);
                    None
                }
            },
            // Releases are not delivered to an unfocused window.
            WindowEvent::Focused(false) => {
                self.held.clear();
                None
            }
            _ => None,
        }
    }
}

/// `Quit` once the window has been asked to close or is gone.
pub fn window_intent(input: &WinitInputHelper) -> Option<Intent> {
    (input.close_requested() || input.destroyed()).then_some(Intent::Quit)
}
