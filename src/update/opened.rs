//! Editor-opened handling
//!
//! Mounts panels into free slots of newly opened editors and keeps diff
//! editors under watch so a viewer swap gets its panels too.

use std::path::Path;

use crate::commands::Cmd;
use crate::config::{is_extension_disabled, GlanceConfig};
use crate::model::{EditorHost, FileEditor, GlanceError, SurfaceId, SurfaceMeta, Synchronizer};
use crate::panel::PanelContainer;
use crate::placement::{resolve, EditorInfo};

/// Handle editors opened for `file`
pub fn update_editors_opened(
    sync: &mut Synchronizer,
    host: &mut dyn EditorHost,
    file: &Path,
    editors: &[FileEditor],
) -> Option<Cmd> {
    let config = sync.config.snapshot();
    let mounted = mount_unoccupied(sync, host, editors, &config);
    if mounted.is_empty() {
        tracing::debug!("No overview panel mounted for {}", file.display());
    }

    for diff in editors.iter().filter_map(FileEditor::as_diff) {
        if sync.watched_processors.insert(diff.processor) {
            let listener = sync.viewer_listener(diff.file.clone());
            host.watch_diff_processor(diff.processor, listener);
            tracing::debug!(processor = ?diff.processor, "watching diff viewer changes");
        }
    }

    Cmd::redraw_surfaces(mounted)
}

/// Handle a diff processor swapping its viewer: cover every editor of the file
pub fn update_diff_viewer_changed(
    sync: &mut Synchronizer,
    host: &mut dyn EditorHost,
    file: &Path,
) -> Option<Cmd> {
    let config = sync.config.snapshot();
    let editors = host.editors_for_file(file);
    let mounted = mount_unoccupied(sync, host, &editors, &config);
    Cmd::redraw_surfaces(mounted)
}

/// Mount a panel on every resolved surface whose slot is still free
///
/// Running this twice for the same editors mounts nothing the second time.
/// Surfaces whose file type extension is disabled are skipped.
fn mount_unoccupied(
    sync: &mut Synchronizer,
    host: &mut dyn EditorHost,
    editors: &[FileEditor],
    config: &GlanceConfig,
) -> Vec<SurfaceId> {
    let disabled = config.disabled_extensions();
    let mut mounted = Vec::new();

    for info in resolve(editors, config.placement()) {
        let surface = info.surface.id;
        if !host.has_slot_layout(surface) {
            continue;
        }
        if is_extension_disabled(&disabled, &info.surface.extension) {
            tracing::debug!(surface = ?surface, "Overview disabled for .{}", info.surface.extension);
            continue;
        }
        if sync.slots.contains(surface) || host.slot_occupied(surface, info.side) {
            continue;
        }

        match mount_panel(sync, host, &info, config, None) {
            Ok(()) => mounted.push(surface),
            Err(e) => tracing::warn!(surface = ?surface, "Failed to mount overview panel: {}", e),
        }
    }

    mounted
}

/// Mount a container for `info`, hide the editor scrollbar and record the slot
pub(super) fn mount_panel(
    sync: &mut Synchronizer,
    host: &mut dyn EditorHost,
    info: &EditorInfo,
    config: &GlanceConfig,
    carried_width: Option<u32>,
) -> Result<(), GlanceError> {
    let mut container = PanelContainer::mount(
        host,
        sync.factory.as_mut(),
        info,
        config.hide_original_scroll_bar,
        carried_width,
    )?;

    if let Some(panel) = container.panel_mut() {
        panel.change_origin_scrollbar_width(config.hide_original_scroll_bar);
    }

    sync.slots.insert_active(
        container,
        SurfaceMeta {
            place_index: info.place_index(),
            diff_view: info.diff_view,
        },
    );
    Ok(())
}
