//! Per-surface bookkeeping of mounted containers
//!
//! The slot table is the synchronizer's own record of which surface carries
//! a container, in which slot, and for which diff viewer. Nothing is stored
//! on host objects.

use std::collections::BTreeMap;

use serde::Serialize;

use super::editor::{DiffViewId, SurfaceId};
use crate::panel::{PanelContainer, PlaceIndex, Side};

/// Metadata recorded when a container is mounted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceMeta {
    pub place_index: PlaceIndex,
    pub diff_view: Option<DiffViewId>,
}

/// What occupies a surface's slot
#[derive(Debug)]
pub enum SlotState {
    /// Container owns a live overview panel
    Active(PanelContainer),
    /// Container stays in the slot without a panel (extension disabled)
    Placeholder(PanelContainer),
}

impl SlotState {
    pub fn container(&self) -> &PanelContainer {
        match self {
            SlotState::Active(container) | SlotState::Placeholder(container) => container,
        }
    }

    pub fn container_mut(&mut self) -> &mut PanelContainer {
        match self {
            SlotState::Active(container) | SlotState::Placeholder(container) => container,
        }
    }

    pub fn into_container(self) -> PanelContainer {
        match self {
            SlotState::Active(container) | SlotState::Placeholder(container) => container,
        }
    }

    pub fn status(&self) -> SlotStatus {
        match self {
            SlotState::Active(_) => SlotStatus::Active,
            SlotState::Placeholder(_) => SlotStatus::Placeholder,
        }
    }
}

/// Tri-state summary of a surface's slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotStatus {
    Absent,
    Placeholder,
    Active,
}

/// A surface's entry in the table
#[derive(Debug)]
pub struct SlotEntry {
    pub side: Side,
    pub meta: SurfaceMeta,
    pub state: SlotState,
}

/// All containers known to one synchronizer
///
/// Keyed by surface, so a surface can never carry two containers.
#[derive(Debug, Default)]
pub struct SlotTable {
    entries: BTreeMap<SurfaceId, SlotEntry>,
}

impl SlotTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, surface: SurfaceId) -> bool {
        self.entries.contains_key(&surface)
    }

    pub fn get(&self, surface: SurfaceId) -> Option<&SlotEntry> {
        self.entries.get(&surface)
    }

    pub fn get_mut(&mut self, surface: SurfaceId) -> Option<&mut SlotEntry> {
        self.entries.get_mut(&surface)
    }

    pub fn status(&self, surface: SurfaceId) -> SlotStatus {
        self.entries
            .get(&surface)
            .map_or(SlotStatus::Absent, |entry| entry.state.status())
    }

    /// Record a freshly mounted container
    pub fn insert_active(&mut self, container: PanelContainer, meta: SurfaceMeta) {
        let surface = container.surface();
        let side = container.side();
        self.entries.insert(
            surface,
            SlotEntry {
                side,
                meta,
                state: SlotState::Active(container),
            },
        );
    }

    /// Put a panel-less container back as a placeholder
    pub fn insert_placeholder(&mut self, container: PanelContainer, meta: SurfaceMeta) {
        let surface = container.surface();
        let side = container.side();
        self.entries.insert(
            surface,
            SlotEntry {
                side,
                meta,
                state: SlotState::Placeholder(container),
            },
        );
    }

    pub fn remove(&mut self, surface: SurfaceId) -> Option<SlotEntry> {
        self.entries.remove(&surface)
    }

    pub fn surfaces(&self) -> Vec<SurfaceId> {
        self.entries.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SurfaceId, &SlotEntry)> {
        self.entries.iter().map(|(id, entry)| (*id, entry))
    }

    /// Containers that currently own a panel
    pub fn active_mut(&mut self) -> impl Iterator<Item = &mut PanelContainer> {
        self.entries
            .values_mut()
            .filter_map(|entry| match &mut entry.state {
                SlotState::Active(container) => Some(container),
                SlotState::Placeholder(_) => None,
            })
    }

    /// Check that recorded sides agree with the containers
    ///
    /// Panics with context on violation. Called after each update in debug
    /// builds.
    pub fn assert_invariants(&self, context: &str) {
        for (surface, entry) in &self.entries {
            let container = entry.state.container();
            assert_eq!(
                container.surface(),
                *surface,
                "[{}] container for {:?} is keyed under {:?}",
                context,
                container.surface(),
                surface
            );
            assert_eq!(
                container.side(),
                entry.side,
                "[{}] surface {:?} recorded in {:?} but container sits in {:?}",
                context,
                surface,
                entry.side,
                container.side()
            );
            assert_eq!(
                entry.meta.place_index,
                entry.side.place_index(),
                "[{}] surface {:?} place index disagrees with its slot",
                context,
                surface
            );
            assert_eq!(
                container.has_panel(),
                matches!(entry.state, SlotState::Active(_)),
                "[{}] surface {:?} panel ownership disagrees with its state",
                context,
                surface
            );
        }
    }
}
