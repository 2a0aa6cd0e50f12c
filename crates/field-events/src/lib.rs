//! Key event types and listener registry for the code field.
//!
//! The host delivers one [`KeyEvent`] per physical key press: the raw key
//! label string plus a ctrl/shift modifier mask. Labels follow the host
//! vocabulary the control was designed against: named keys are multi-word
//! strings (`"Arrow Left"`, `"Caps Lock"`, `"Numpad 5"`), printable keys are
//! single-character strings with letters uppercased.
//!
//! Observers subscribe through [`EventListeners`] rather than overriding
//! methods on the control, so several observers can coexist and the control
//! never exposes reassignable callbacks.

use std::fmt;

bitflags::bitflags! {
    /// Modifier mask attached to a key event. Derived per event, never stored.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        const CTRL  = 0b0000_0001;
        const SHIFT = 0b0000_0010;
    }
}

/// A single keyboard event as delivered by the host toolkit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub label: String,
    pub mods: Modifiers,
}

impl KeyEvent {
    pub fn new(label: impl Into<String>, mods: Modifiers) -> Self {
        Self {
            label: label.into(),
            mods,
        }
    }

    /// Key press with no modifiers held.
    pub fn plain(label: impl Into<String>) -> Self {
        Self::new(label, Modifiers::empty())
    }

    /// Key press with ctrl held.
    pub fn with_ctrl(label: impl Into<String>) -> Self {
        Self::new(label, Modifiers::CTRL)
    }

    /// Key press with shift held.
    pub fn with_shift(label: impl Into<String>) -> Self {
        Self::new(label, Modifiers::SHIFT)
    }

    pub fn ctrl(&self) -> bool {
        self.mods.contains(Modifiers::CTRL)
    }

    pub fn shift(&self) -> bool {
        self.mods.contains(Modifiers::SHIFT)
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}{:?}", self.label, self.mods)
    }
}

/// Callback invoked when the control gains or loses focus.
pub type FocusListener = Box<dyn FnMut(bool)>;
/// Callback invoked after every successful insertion or deletion, with the
/// current buffer text.
pub type ChangeListener = Box<dyn FnMut(&str)>;

/// Registered observers of the control. Listeners run in registration order;
/// a paste of N characters invokes change listeners N times (one per
/// primitive mutation).
#[derive(Default)]
pub struct EventListeners {
    focus: Vec<FocusListener>,
    change: Vec<ChangeListener>,
}

impl EventListeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_focus(&mut self, listener: impl FnMut(bool) + 'static) {
        self.focus.push(Box::new(listener));
    }

    pub fn on_change(&mut self, listener: impl FnMut(&str) + 'static) {
        self.change.push(Box::new(listener));
    }

    pub fn emit_focus(&mut self, focused: bool) {
        tracing::trace!(target: "field.events", focused, listeners = self.focus.len(), "emit_focus");
        for listener in &mut self.focus {
            listener(focused);
        }
    }

    pub fn emit_change(&mut self, text: &str) {
        tracing::trace!(target: "field.events", text_len = text.len(), listeners = self.change.len(), "emit_change");
        for listener in &mut self.change {
            listener(text);
        }
    }
}

impl fmt::Debug for EventListeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventListeners")
            .field("focus", &self.focus.len())
            .field("change", &self.change.len())
            .finish()
    }
}
