//! Window handle to handler association.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::{DispatchError, DispatchResult};
use crate::event::{WindowEvent, WindowId};
use crate::handler::{route, EventHandler, Flow};

/// Explicit map from window handle to its handler.
///
/// Handlers are owned by the registry. A window's handler is detached after
/// its `Destroy` event has been delivered.
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: BTreeMap<WindowId, Box<dyn EventHandler>>,
}

impl HandlerRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches `handler` to `window`.
    pub fn register(
        &mut self,
        window: WindowId,
        handler: Box<dyn EventHandler>,
    ) -> DispatchResult<()> {
        if self.handlers.contains_key(&window) {
            return Err(DispatchError::DuplicateWindow { window });
        }
        self.handlers.insert(window, handler);
        tracing::debug!(%window, "handler registered");
        Ok(())
    }

    /// Detaches and returns the handler for `window`, if any.
    pub fn unregister(&mut self, window: WindowId) -> Option<Box<dyn EventHandler>> {
        let removed = self.handlers.remove(&window);
        if removed.is_some() {
            tracing::debug!(%window, "handler unregistered");
        }
        removed
    }

    #[must_use]
    pub fn contains(&self, window: WindowId) -> bool {
        self.handlers.contains_key(&window)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Window handles in ascending order.
    pub fn windows(&self) -> impl Iterator<Item = WindowId> + '_ {
        self.handlers.keys().copied()
    }

    /// Delivers `event` to the handler registered for `window`.
    ///
    /// Events for unknown windows get default handling: they are logged and
    /// ignored.
    pub fn dispatch(&mut self, window: WindowId, event: WindowEvent) -> Flow {
        let Some(handler) = self.handlers.get_mut(&window) else {
            tracing::warn!(%window, ?event, "event for unregistered window ignored");
            return Flow::Continue;
        };
        tracing::trace!(%window, ?event, "dispatching event");
        let flow = route(handler.as_mut(), window, event);
        if event == WindowEvent::Destroy {
            self.unregister(window);
        }
        flow
    }

    /// Runs one idle frame over every handler, in window order.
    ///
    /// Every handler is called even if an earlier one asks to quit.
    pub fn idle(&mut self) -> Flow {
        let mut flow = Flow::Continue;
        for handler in self.handlers.values_mut() {
            if handler.on_idle().is_quit() {
                flow = Flow::Quit;
            }
        }
        flow
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("windows", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}
