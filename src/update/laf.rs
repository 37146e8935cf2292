//! Look-and-feel handling

use crate::commands::Cmd;
use crate::model::Synchronizer;

/// Refresh every live panel in place
///
/// The first notification after startup is the host applying its initial
/// theme, so it is swallowed.
pub fn update_laf(sync: &mut Synchronizer) -> Option<Cmd> {
    if sync.first_laf_pending {
        sync.first_laf_pending = false;
        tracing::debug!("Initial look-and-feel notification, skipping refresh");
        return None;
    }
    if sync.slots.is_empty() {
        return None;
    }

    let mut refreshed = Vec::new();
    for container in sync.slots.active_mut() {
        let surface = container.surface();
        if let Some(panel) = container.panel_mut() {
            panel.refresh();
            refreshed.push(surface);
        }
    }

    tracing::debug!(count = refreshed.len(), "refreshed panels for new look-and-feel");
    Cmd::redraw_surfaces(refreshed)
}
