//! Contracts the host application provides
//!
//! The synchronizer never owns editors or renders anything itself. It talks
//! to the host layout through [`EditorHost`] and creates panels through a
//! [`PanelFactory`]; the minimap and VCS gutter implementations live behind
//! [`OverviewPanel`] and [`CompanionPanel`].

use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;

use thiserror::Error;

use super::editor::{DiffProcessorId, FileEditor, Surface, SurfaceId};
use crate::messages::GlanceMsg;
use crate::panel::{Edge, PanelContainer, Side};
use crate::theme::Color;

/// Failures reported by the host or by panel construction
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GlanceError {
    #[error("surface {0:?} is no longer available")]
    SurfaceGone(SurfaceId),

    #[error("slot {side:?} of surface {surface:?} is already occupied")]
    SlotOccupied { surface: SurfaceId, side: Side },

    #[error("surface {0:?} has no slot layout")]
    NoSlotLayout(SurfaceId),

    #[error("failed to create panel for surface {surface:?}: {reason}")]
    PanelCreation { surface: SurfaceId, reason: String },
}

/// The host editor manager and layout
pub trait EditorHost {
    /// Every editor open in the session
    fn all_editors(&self) -> Vec<FileEditor>;

    /// Every editor open for `file`
    fn editors_for_file(&self, file: &Path) -> Vec<FileEditor>;

    /// Whether the surface's layout exposes leading and trailing slots
    fn has_slot_layout(&self, surface: SurfaceId) -> bool;

    /// Whether anything is currently placed in the slot
    fn slot_occupied(&self, surface: SurfaceId, side: Side) -> bool;

    /// Current content background of the surface
    fn content_background(&self, surface: SurfaceId) -> Option<Color>;

    /// Insert a container into the surface layout
    fn attach_container(
        &mut self,
        surface: SurfaceId,
        side: Side,
        container: &PanelContainer,
    ) -> Result<(), GlanceError>;

    /// Remove whatever container sits in the slot
    fn detach_container(&mut self, surface: SurfaceId, side: Side) -> Result<(), GlanceError>;

    /// Keep `listener` until the processor is disposed and notify it whenever
    /// the processor swaps its active viewer
    fn watch_diff_processor(&mut self, processor: DiffProcessorId, listener: ViewerChangeListener);
}

/// The minimap panel itself
pub trait OverviewPanel {
    /// Re-read colors after a look-and-feel change
    fn refresh(&mut self);

    /// Regenerate the whole overview image
    fn update_image(&mut self);

    /// Scrollbar width saved before the panel hid the editor's scrollbar
    fn original_scrollbar_width(&self) -> Option<u32>;

    fn set_original_scrollbar_width(&mut self, width: Option<u32>);

    /// Hide (`true`) or restore (`false`) the editor's own scrollbar
    fn change_origin_scrollbar_width(&mut self, hide: bool);

    /// Start tracking hover/drag so the hidden scrollbar can reappear
    fn install_hide_scrollbar_listener(&mut self);

    fn dispose(&mut self);
}

/// Secondary panel shown next to the overview when the editor scrollbar is hidden
pub trait CompanionPanel {
    fn dispose(&mut self);
}

/// Creates panels for surfaces
pub trait PanelFactory {
    fn create_overview(&mut self, surface: &Surface) -> Result<Box<dyn OverviewPanel>, GlanceError>;

    fn create_companion(
        &mut self,
        surface: &Surface,
        edge: Edge,
    ) -> Result<Box<dyn CompanionPanel>, GlanceError>;
}

/// Handed to the host for each watched diff processor
///
/// Notifying enqueues a [`GlanceMsg::DiffViewerChanged`] for the file; it is
/// processed on the next pump, in order with every other message.
#[derive(Debug, Clone)]
pub struct ViewerChangeListener {
    file: PathBuf,
    sender: Sender<GlanceMsg>,
}

impl ViewerChangeListener {
    pub fn new(file: PathBuf, sender: Sender<GlanceMsg>) -> Self {
        Self { file, sender }
    }

    pub fn notify(&self) {
        let msg = GlanceMsg::DiffViewerChanged {
            file: self.file.clone(),
        };
        if self.sender.send(msg).is_err() {
            tracing::debug!(
                "Viewer change for {} dropped, session is gone",
                self.file.display()
            );
        }
    }
}
