//! Process-wide session registry
//!
//! Lets other components find the synchronizer of a session. Sessions add
//! themselves when opened and remove themselves when dropped; the registry
//! only holds weak references.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use crate::model::Synchronizer;

/// Identifies a glance session (one per host project/window)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(pub u64);

thread_local! {
    static SESSIONS: RefCell<HashMap<SessionId, Weak<RefCell<Synchronizer>>>> =
        RefCell::new(HashMap::new());
}

pub(crate) fn register(id: SessionId, synchronizer: &Rc<RefCell<Synchronizer>>) {
    SESSIONS.with(|sessions| {
        let previous = sessions
            .borrow_mut()
            .insert(id, Rc::downgrade(synchronizer));
        if previous.is_some() {
            tracing::warn!(session = ?id, "Session registered twice, replacing");
        }
    });
}

pub(crate) fn unregister(id: SessionId) {
    SESSIONS.with(|sessions| {
        sessions.borrow_mut().remove(&id);
    });
}

/// Synchronizer of a live session
pub fn lookup(id: SessionId) -> Option<Rc<RefCell<Synchronizer>>> {
    SESSIONS.with(|sessions| sessions.borrow().get(&id).and_then(Weak::upgrade))
}

/// Ids of every live session
pub fn session_ids() -> Vec<SessionId> {
    SESSIONS.with(|sessions| {
        let mut ids: Vec<_> = sessions
            .borrow()
            .iter()
            .filter(|(_, sync)| sync.strong_count() > 0)
            .map(|(id, _)| *id)
            .collect();
        ids.sort();
        ids
    })
}
