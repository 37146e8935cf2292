//! Surfaces released by the host
//!
//! The host removes released editors from its layout itself; all that is
//! left is dropping the containers so their panels are disposed.

use crate::commands::Cmd;
use crate::model::{SurfaceId, Synchronizer};

pub fn update_released(sync: &mut Synchronizer, surfaces: &[SurfaceId]) -> Option<Cmd> {
    for surface in surfaces {
        if let Some(entry) = sync.slots.remove(*surface) {
            tracing::debug!(surface = ?surface, state = ?entry.state.status(), "forgot released surface");
        }
    }
    None
}
