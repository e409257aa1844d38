//! Ordered event → callback table.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A hook body. Receives the context the event is fired against.
pub type Callback<C> = Arc<dyn Fn(&mut C) + Send + Sync>;

/// A named callback registered under an event.
pub struct Hook<C> {
    name: String,
    callback: Callback<C>,
}

impl<C> Hook<C> {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run the callback against `ctx`.
    pub fn call(&self, ctx: &mut C) {
        (self.callback)(ctx)
    }
}

impl<C> Clone for Hook<C> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            callback: Arc::clone(&self.callback),
        }
    }
}

impl<C> fmt::Debug for Hook<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hook").field("name", &self.name).finish()
    }
}

/// A context that carries its own hook table.
pub trait HookHost: Sized {
    fn hooks(&self) -> &HookRegistry<Self>;
}

/// Invoke every callback of `event` on `ctx`, in registration order.
///
/// Callbacks may change `ctx.hooks()` while running; the firing works on a
/// snapshot taken beforehand.
pub fn fire<C: HookHost>(ctx: &mut C, event: &str) {
    for hook in ctx.hooks().snapshot(event) {
        hook.call(ctx);
    }
}

/// Mapping from event name to its callbacks, in registration order.
pub struct HookRegistry<C> {
    actions: HashMap<String, Vec<Hook<C>>>,
}

impl<C> Default for HookRegistry<C> {
    fn default() -> Self {
        Self {
            actions: HashMap::new(),
        }
    }
}

impl<C> fmt::Debug for HookRegistry<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.actions.iter()).finish()
    }
}

impl<C> HookRegistry<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `callback` under `event`.
    ///
    /// A blank name cannot be referred to later, so such registrations are
    /// dropped without error.
    pub fn add<F>(&mut self, event: &str, name: &str, callback: F)
    where
        F: Fn(&mut C) + Send + Sync + 'static,
    {
        self.add_callback(event, name, Arc::new(callback));
    }

    /// Append an already shared callback under `event`.
    pub fn add_callback(&mut self, event: &str, name: &str, callback: Callback<C>) {
        if name.trim().is_empty() {
            tracing::trace!(event, "Ignoring hook registration without a name");
            return;
        }

        self.actions.entry(event.to_string()).or_default().push(Hook {
            name: name.to_string(),
            callback,
        });
    }

    /// With no `name`: whether `event` has any callbacks.
    /// With a `name`: whether that callback is registered under `event`.
    pub fn exists(&self, event: &str, name: Option<&str>) -> bool {
        match (self.actions.get(event), name) {
            (Some(hooks), Some(name)) => hooks.iter().any(|h| h.name == name),
            (Some(hooks), None) => !hooks.is_empty(),
            (None, _) => false,
        }
    }

    /// With no `name`: drop every callback of `event`.
    /// With a `name`: drop all entries with that name, keeping the order of the rest.
    pub fn remove(&mut self, event: &str, name: Option<&str>) {
        match name {
            None => {
                self.actions.remove(event);
            }
            Some(name) => {
                if let Some(hooks) = self.actions.get_mut(event) {
                    hooks.retain(|h| h.name != name);
                }
            }
        }
    }

    /// Callbacks currently registered for `event`.
    pub fn snapshot(&self, event: &str) -> Vec<Hook<C>> {
        self.actions.get(event).cloned().unwrap_or_default()
    }

    /// Number of callbacks registered for `event`.
    pub fn len(&self, event: &str) -> usize {
        self.actions.get(event).map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.actions.values().all(Vec::is_empty)
    }
}
