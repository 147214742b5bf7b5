//! Dirty-state tracking with listener notification.
//!
//! An explicit observer: callers register callbacks and are notified only on
//! actual state transitions, never on redundant marks.

type Listener = Box<dyn Fn(bool)>;

#[derive(Default)]
pub struct UnsavedChangesTracker {
    listeners: Vec<Listener>,
    dirty: bool,
}

impl UnsavedChangesTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_dirty(&mut self) {
        self.update(true);
    }

    pub fn mark_clean(&mut self) {
        self.update(false);
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }

    /// Registers a callback invoked with the new state on every transition.
    pub fn on_change(&mut self, listener: impl Fn(bool) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    fn update(&mut self, new_state: bool) {
        if self.dirty == new_state {
            return;
        }
        self.dirty = new_state;
        for listener in &self.listeners {
            listener(new_state);
        }
    }
}
