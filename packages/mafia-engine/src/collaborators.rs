//! What the session needs from whatever is driving it.
//!
//! The engine never talks to a terminal, a window or the OS clipboard itself.
//! A front end implements these and hands them to the operations that need
//! them.

/// Yes/no gate in front of a destructive action. Returning `false` aborts the
/// action with no state committed.
pub trait Confirm {
    fn confirm(&mut self, title: &str, message: &str) -> bool;
}

/// Fire-and-forget message to the operator.
pub trait Notify {
    fn notify(&mut self, title: &str, message: &str);
}

pub trait Clipboard {
    fn copy(&mut self, text: &str);
}

/// A front end that provides all three.
pub trait Host: Confirm + Notify + Clipboard {}

impl<T: Confirm + Notify + Clipboard> Host for T {}
