//! Unsaved-changes guard for leaving the journal
//!
//! Acquired from a [`JournalForm`](crate::form::JournalForm) when an
//! interactive session starts and dropped when it ends. While held, every
//! attempt to leave asks the guard whether the user must confirm first.

use std::cell::Cell;
use std::rc::Rc;

use tracing::debug;

/// What to do with an attempt to leave
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Leave {
    /// Nothing would be lost
    Allow,
    /// Unsaved changes exist; ask before leaving
    Confirm,
}

/// Scoped watcher over the form's unsaved-changes flag
#[derive(Debug)]
pub struct LeaveGuard {
    unsaved: Rc<Cell<bool>>,
}

impl LeaveGuard {
    pub(crate) fn new(unsaved: Rc<Cell<bool>>) -> Self {
        debug!("LeaveGuard: armed");
        Self { unsaved }
    }

    /// Decide whether leaving right now needs confirmation
    pub fn check(&self) -> Leave {
        if self.unsaved.get() { Leave::Confirm } else { Leave::Allow }
    }
}

impl Drop for LeaveGuard {
    fn drop(&mut self) {
        debug!("LeaveGuard: released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_follows_flag() {
        let flag = Rc::new(Cell::new(false));
        let guard = LeaveGuard::new(flag.clone());
        assert_eq!(guard.check(), Leave::Allow);

        flag.set(true);
        assert_eq!(guard.check(), Leave::Confirm);

        flag.set(false);
        assert_eq!(guard.check(), Leave::Allow);
    }

    #[test]
    fn test_dropping_guard_releases_flag() {
        let flag = Rc::new(Cell::new(true));
        let guard = LeaveGuard::new(flag.clone());
        assert_eq!(Rc::strong_count(&flag), 2);
        drop(guard);
        assert_eq!(Rc::strong_count(&flag), 1);
    }
}
