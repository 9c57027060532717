//! Scripted platform input for the headless simulation.

use std::collections::VecDeque;

use dispatch::{EventSource, KeyCode, Pumped, WindowEvent, WindowId};

use crate::rng::Rng;

pub const KEY_SPACE: KeyCode = KeyCode(0x20);
pub const KEY_LEFT: KeyCode = KeyCode(0x25);
pub const KEY_UP: KeyCode = KeyCode(0x26);
pub const KEY_RIGHT: KeyCode = KeyCode(0x27);
pub const KEY_DOWN: KeyCode = KeyCode(0x28);

const ARROWS: [KeyCode; 4] = [KEY_LEFT, KEY_UP, KEY_RIGHT, KEY_DOWN];

/// Number of joysticks the script drives; joystick `n` controls bomber `n + 1`.
pub const JOYSTICKS: u8 = 4;

/// Emits a burst of input events, then one empty poll so the loop runs an
/// idle frame, then the next burst.
pub struct ScriptedInput {
    window: WindowId,
    rng: Rng,
    pending: VecDeque<Pumped>,
    held: Option<KeyCode>,
    idle_due: bool,
}

impl ScriptedInput {
    pub fn new(window: WindowId, seed: u64) -> Self {
        let pending = [
            WindowEvent::Create,
            WindowEvent::Resize {
                width: 960,
                height: 832,
            },
            WindowEvent::Activate,
        ]
        .into_iter()
        .map(|event| Pumped::message(window, event))
        .collect();
        Self {
            window,
            rng: Rng::new(seed),
            pending,
            held: None,
            idle_due: false,
        }
    }

    fn push(&mut self, event: WindowEvent) {
        self.pending.push_back(Pumped::message(self.window, event));
    }

    fn script_frame(&mut self) {
        if self.rng.one_in(6) {
            if let Some(key) = self.held.take() {
                self.push(WindowEvent::KeyUp { key });
            }
            let key = ARROWS[(self.rng.next_u32() % 4) as usize];
            self.held = Some(key);
            self.push(WindowEvent::KeyDown { key });
        }
        if self.rng.one_in(30) {
            self.push(WindowEvent::KeyDown { key: KEY_SPACE });
        }

        for joystick in 0..JOYSTICKS {
            if self.rng.one_in(8) {
                let axis = (self.rng.next_u32() % 2) as u8;
                let value = [i16::MIN, 0, i16::MAX][(self.rng.next_u32() % 3) as usize];
                self.push(WindowEvent::JoystickAxis {
                    joystick,
                    axis,
                    value,
                });
            }
            if self.rng.one_in(40) {
                self.push(WindowEvent::JoystickButton {
                    joystick,
                    button: 0,
                    pressed: true,
                });
            }
        }

        if self.rng.one_in(20) {
            self.push(WindowEvent::Paint);
        }
    }
}

impl EventSource for ScriptedInput {
    fn poll(&mut self) -> Option<Pumped> {
        if let Some(next) = self.pending.pop_front() {
            return Some(next);
        }
        if self.idle_due {
            self.idle_due = false;
            return None;
        }
        self.script_frame();
        let next = self.pending.pop_front();
        self.idle_due = next.is_some();
        next
    }
}
