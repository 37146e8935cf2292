//! Synchronizer model - the complete state of one glance session
//!
//! This module contains the state types following the Elm Architecture
//! pattern; transitions live in [`crate::update`].

pub mod editor;
pub mod host;
pub mod slots;

pub use editor::{
    DiffEditor, DiffProcessorId, DiffViewId, DiffViewer, FileEditor, Surface, SurfaceId,
};
pub use host::{
    CompanionPanel, EditorHost, GlanceError, OverviewPanel, PanelFactory, ViewerChangeListener,
};
pub use slots::{SlotEntry, SlotState, SlotStatus, SlotTable, SurfaceMeta};

use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;
use std::sync::mpsc::Sender;

use crate::config::SharedConfig;
use crate::messages::GlanceMsg;

/// Lifecycle synchronizer state
pub struct Synchronizer {
    /// Live configuration, re-read on every settings pass
    pub config: SharedConfig,
    /// Creates overview and companion panels
    pub factory: Box<dyn PanelFactory>,
    /// Containers mounted by this synchronizer
    pub slots: SlotTable,
    /// Diff processors already carrying a viewer-change listener
    pub watched_processors: HashSet<DiffProcessorId>,
    /// The next look-and-feel notification is the startup one
    pub first_laf_pending: bool,
    /// Queue viewer-change listeners post into
    notifier: Sender<GlanceMsg>,
}

impl Synchronizer {
    pub fn new(
        config: SharedConfig,
        factory: Box<dyn PanelFactory>,
        notifier: Sender<GlanceMsg>,
    ) -> Self {
        Self {
            config,
            factory,
            slots: SlotTable::new(),
            watched_processors: HashSet::new(),
            first_laf_pending: true,
            notifier,
        }
    }

    /// Listener the host keeps for a diff processor showing `file`
    pub fn viewer_listener(&self, file: PathBuf) -> ViewerChangeListener {
        ViewerChangeListener::new(file, self.notifier.clone())
    }

    /// Slot state of a surface
    pub fn status(&self, surface: SurfaceId) -> SlotStatus {
        self.slots.status(surface)
    }

    /// Number of containers that own a panel
    pub fn active_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|(_, entry)| entry.state.status() == SlotStatus::Active)
            .count()
    }
}

impl fmt::Debug for Synchronizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Synchronizer")
            .field("slots", &self.slots)
            .field("watched_processors", &self.watched_processors)
            .field("first_laf_pending", &self.first_laf_pending)
            .finish_non_exhaustive()
    }
}
