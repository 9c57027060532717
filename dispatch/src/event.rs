//! Semantic window and input events.

use std::fmt;

/// Opaque handle identifying a window or rendering context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WindowId(u32);

impl WindowId {
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "window#{}", self.0)
    }
}

/// Platform key code, passed through untranslated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyCode(pub u32);

/// Position of a joystick hat switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HatPosition {
    #[default]
    Centered,
    Up,
    RightUp,
    Right,
    RightDown,
    Down,
    LeftDown,
    Left,
    LeftUp,
}

/// Events delivered to a window's handler.
///
/// This is the fixed set the platform layer translates its native messages
/// into. Anything outside it is handled by the platform layer itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    /// The window was created and its handler attached.
    Create,
    /// The window gained focus.
    Activate,
    /// The window lost focus.
    Deactivate,
    /// Client area changed size.
    Resize { width: u32, height: u32 },
    /// Window moved on screen.
    Move { x: i32, y: i32 },
    /// Client area needs repainting.
    Paint,
    KeyDown { key: KeyCode },
    KeyUp { key: KeyCode },
    /// Menu or accelerator command.
    Command { id: u32 },
    /// System menu command.
    SysCommand { id: u32 },
    /// The user asked to close the window.
    Close,
    /// The window is being destroyed; its handler is detached afterwards.
    Destroy,
    JoystickAxis { joystick: u8, axis: u8, value: i16 },
    JoystickHat {
        joystick: u8,
        hat: u8,
        position: HatPosition,
    },
    JoystickButton {
        joystick: u8,
        button: u8,
        pressed: bool,
    },
}

/// One item pulled from an event source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pumped {
    /// An event addressed to a window.
    Message { window: WindowId, event: WindowEvent },
    /// The application should stop pumping.
    Quit,
}

impl Pumped {
    /// Shorthand for [`Pumped::Message`].
    #[must_use]
    pub const fn message(window: WindowId, event: WindowEvent) -> Self {
        Self::Message { window, event }
    }
}
