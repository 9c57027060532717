//! Handler capability set and event routing.

use crate::event::{HatPosition, KeyCode, WindowEvent, WindowId};

/// Whether the loop should keep pumping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flow {
    #[default]
    Continue,
    Quit,
}

impl Flow {
    #[must_use]
    pub const fn is_quit(self) -> bool {
        matches!(self, Self::Quit)
    }
}

/// Game-side handler for one window.
///
/// Every method has a default that ignores the event, so handlers implement
/// only what they use. `on_close` quits by default.
#[allow(unused_variables)]
pub trait EventHandler {
    fn on_create(&mut self, window: WindowId) -> Flow {
        Flow::Continue
    }

    /// Focus gained (`true`) or lost (`false`).
    fn on_activate(&mut self, active: bool) -> Flow {
        Flow::Continue
    }

    fn on_resize(&mut self, width: u32, height: u32) -> Flow {
        Flow::Continue
    }

    fn on_move(&mut self, x: i32, y: i32) -> Flow {
        Flow::Continue
    }

    fn on_paint(&mut self) -> Flow {
        Flow::Continue
    }

    fn on_key_down(&mut self, key: KeyCode) -> Flow {
        Flow::Continue
    }

    fn on_key_up(&mut self, key: KeyCode) -> Flow {
        Flow::Continue
    }

    fn on_command(&mut self, id: u32) -> Flow {
        Flow::Continue
    }

    fn on_sys_command(&mut self, id: u32) -> Flow {
        Flow::Continue
    }

    fn on_close(&mut self) -> Flow {
        Flow::Quit
    }

    fn on_destroy(&mut self) -> Flow {
        Flow::Continue
    }

    fn on_joystick_axis(&mut self, joystick: u8, axis: u8, value: i16) -> Flow {
        Flow::Continue
    }

    fn on_joystick_hat(&mut self, joystick: u8, hat: u8, position: HatPosition) -> Flow {
        Flow::Continue
    }

    fn on_joystick_button(&mut self, joystick: u8, button: u8, pressed: bool) -> Flow {
        Flow::Continue
    }

    /// Called once per frame when no event is pending.
    fn on_idle(&mut self) -> Flow {
        Flow::Continue
    }
}

/// Routes one event to the matching handler method.
pub fn route(handler: &mut dyn EventHandler, window: WindowId, event: WindowEvent) -> Flow {
    match event {
        WindowEvent::Create => handler.on_create(window),
        WindowEvent::Activate => handler.on_activate(true),
        WindowEvent::Deactivate => handler.on_activate(false),
        WindowEvent::Resize { width, height } => handler.on_resize(width, height),
        WindowEvent::Move { x, y } => handler.on_move(x, y),
        WindowEvent::Paint => handler.on_paint(),
        WindowEvent::KeyDown { key } => handler.on_key_down(key),
        WindowEvent::KeyUp { key } => handler.on_key_up(key),
        WindowEvent::Command { id } => handler.on_command(id),
        WindowEvent::SysCommand { id } => handler.on_sys_command(id),
        WindowEvent::Close => handler.on_close(),
        WindowEvent::Destroy => handler.on_destroy(),
        WindowEvent::JoystickAxis {
            joystick,
            axis,
            value,
        } => handler.on_joystick_axis(joystick, axis, value),
        WindowEvent::JoystickHat {
            joystick,
            hat,
            position,
        } => handler.on_joystick_hat(joystick, hat, position),
        WindowEvent::JoystickButton {
            joystick,
            button,
            pressed,
        } => handler.on_joystick_button(joystick, button, pressed),
    }
}
