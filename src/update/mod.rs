//! Update functions for the Elm-style architecture
//!
//! All synchronizer state transitions flow through these functions.

mod laf;
mod opened;
mod released;
mod settings;

use crate::commands::Cmd;
use crate::messages::GlanceMsg;
use crate::model::{EditorHost, Synchronizer};

#[cfg(debug_assertions)]
use crate::tracing::LayoutSnapshot;
#[cfg(debug_assertions)]
use tracing::{debug, span, Level};

pub use laf::update_laf;
pub use opened::{update_diff_viewer_changed, update_editors_opened};
pub use released::update_released;
pub use settings::update_settings;

/// Main update function - dispatches to sub-handlers
///
/// In debug builds, this wraps with tracing instrumentation and checks the
/// slot table invariants after every message.
#[inline]
pub fn update(sync: &mut Synchronizer, host: &mut dyn EditorHost, msg: GlanceMsg) -> Option<Cmd> {
    #[cfg(debug_assertions)]
    {
        update_traced(sync, host, msg)
    }
    #[cfg(not(debug_assertions))]
    {
        update_inner(sync, host, msg)
    }
}

/// Inner update logic (no tracing)
fn update_inner(sync: &mut Synchronizer, host: &mut dyn EditorHost, msg: GlanceMsg) -> Option<Cmd> {
    match msg {
        GlanceMsg::EditorsOpened { file, editors } => {
            opened::update_editors_opened(sync, host, &file, &editors)
        }
        GlanceMsg::DiffViewerChanged { file } => {
            opened::update_diff_viewer_changed(sync, host, &file)
        }
        GlanceMsg::SettingsChanged => settings::update_settings(sync, host),
        GlanceMsg::LafChanged => laf::update_laf(sync),
        GlanceMsg::SurfacesReleased(surfaces) => released::update_released(sync, &surfaces),
    }
}

/// Traced update wrapper (debug builds only)
///
/// Captures the slot layout before and after and logs what changed.
#[cfg(debug_assertions)]
fn update_traced(sync: &mut Synchronizer, host: &mut dyn EditorHost, msg: GlanceMsg) -> Option<Cmd> {
    let msg_name = msg.name();
    let _span = span!(Level::DEBUG, "update", msg = %msg_name).entered();

    let before = LayoutSnapshot::capture(&sync.slots);
    debug!(target: "message", msg = %msg_name, "processing");

    let result = update_inner(sync, host, msg);

    let after = LayoutSnapshot::capture(&sync.slots);
    if let Some(diff) = before.diff(&after) {
        debug!(target: "panels", %diff, "layout changed");
    }

    sync.slots.assert_invariants(&msg_name);

    result
}
