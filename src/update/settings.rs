//! Global settings reconciliation
//!
//! Rebuilds every panel against the current config snapshot. Each surface
//! is reconciled on its own: a failure is logged and the pass moves on, so
//! a broken editor never blocks the others.

use std::collections::{BTreeSet, HashSet};

use crate::commands::Cmd;
use crate::config::{is_extension_disabled, GlanceConfig};
use crate::model::{EditorHost, GlanceError, SlotStatus, SurfaceId, Synchronizer};
use crate::placement::{resolve, EditorInfo};

use super::opened::mount_panel;

/// Handle a global settings change
pub fn update_settings(sync: &mut Synchronizer, host: &mut dyn EditorHost) -> Option<Cmd> {
    let config = sync.config.snapshot();
    let disabled = config.disabled_extensions();
    let editors = host.all_editors();

    let mut seen = BTreeSet::new();
    let mut failed = 0usize;

    for info in resolve(&editors, config.placement()) {
        let surface = info.surface.id;
        if !host.has_slot_layout(surface) || !seen.insert(surface) {
            continue;
        }

        if let Err(e) = reconcile_surface(sync, host, &info, &config, &disabled) {
            failed += 1;
            tracing::error!(surface = ?surface, "Failed to reconcile overview panel: {}", e);
        }
    }

    // Panels no placement asks for anymore: closed editors, diff kinds turned off
    for surface in sync.slots.surfaces() {
        if !seen.contains(&surface) {
            remove_container(sync, host, surface);
        }
    }

    tracing::debug!(
        active = sync.active_count(),
        total = sync.slots.len(),
        failed,
        "settings reconciled"
    );
    Some(Cmd::Redraw)
}

/// Bring one surface in line with the config
fn reconcile_surface(
    sync: &mut Synchronizer,
    host: &mut dyn EditorHost,
    info: &EditorInfo,
    config: &GlanceConfig,
    disabled: &HashSet<String>,
) -> Result<(), GlanceError> {
    let surface = info.surface.id;
    let prior = sync.slots.remove(surface);

    if is_extension_disabled(disabled, &info.surface.extension) {
        // The container keeps its slot as a placeholder
        if let Some(entry) = prior {
            let mut container = entry.state.into_container();
            if let Some(panel) = container.panel_mut() {
                panel.change_origin_scrollbar_width(false);
            }
            container.dispose();
            sync.slots.insert_placeholder(container, entry.meta);
        }
        return Ok(());
    }

    let Some(entry) = prior else {
        if host.slot_occupied(surface, info.side) {
            return Err(GlanceError::SlotOccupied {
                surface,
                side: info.side,
            });
        }
        return mount_panel(sync, host, info, config, None).map(|()| refresh_image(sync, surface));
    };

    let old_side = entry.side;
    let mut old = entry.state.into_container();
    let carried_width = old.scrollbar_width();

    // The old panel stays alive until its replacement is mounted
    let mut detached = false;
    let result = if old_side != info.side && host.slot_occupied(surface, info.side) {
        Err(GlanceError::SlotOccupied {
            surface,
            side: info.side,
        })
    } else {
        match host.detach_container(surface, old_side) {
            Ok(()) => {
                detached = true;
                mount_panel(sync, host, info, config, carried_width)
            }
            Err(e) => Err(e),
        }
    };

    if let Err(e) = &result {
        // No panel hides the bar anymore
        if let Some(panel) = old.panel_mut() {
            panel.change_origin_scrollbar_width(false);
        }
        if !detached {
            if let Err(detach) = host.detach_container(surface, old_side) {
                tracing::debug!(
                    surface = ?surface,
                    "Container already gone from layout: {}",
                    detach
                );
            }
        }
        tracing::debug!(surface = ?surface, "rebuild failed, scrollbar restored: {}", e);
    }
    old.dispose();

    result.map(|()| refresh_image(sync, surface))
}

fn refresh_image(sync: &mut Synchronizer, surface: SurfaceId) {
    if let Some(panel) = sync
        .slots
        .get_mut(surface)
        .and_then(|entry| entry.state.container_mut().panel_mut())
    {
        panel.update_image();
    }
}

/// Dispose and detach a container nobody asks for
fn remove_container(sync: &mut Synchronizer, host: &mut dyn EditorHost, surface: SurfaceId) {
    let Some(entry) = sync.slots.remove(surface) else {
        return;
    };
    let was_active = entry.state.status() == SlotStatus::Active;
    let mut container = entry.state.into_container();
    if let Some(panel) = container.panel_mut() {
        panel.change_origin_scrollbar_width(false);
    }
    container.dispose();

    if let Err(e) = host.detach_container(surface, entry.side) {
        tracing::debug!(surface = ?surface, "Container already gone from layout: {}", e);
    }
    tracing::debug!(surface = ?surface, was_active, "removed orphaned container");
}
