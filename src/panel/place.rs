//! Slot positions inside an editor's layout
//!
//! An editor surface exposes a leading and a trailing slot. [`Side`] names
//! the slot in layout terms, [`PlaceIndex`] names the physical edge the
//! panel ends up on, and [`Edge`] is where a companion panel goes inside
//! the container.

use serde::{Deserialize, Serialize};

/// Layout slot a container is inserted into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// Leading edge of the editor
    Start,
    /// Trailing edge of the editor
    End,
}

impl Side {
    /// Slot used for single-surface editors under the given alignment
    pub fn aligned(align_right: bool) -> Side {
        if align_right {
            Side::End
        } else {
            Side::Start
        }
    }

    /// Physical tag recorded for a panel in this slot
    pub fn place_index(&self) -> PlaceIndex {
        match self {
            Side::Start => PlaceIndex::Left,
            Side::End => PlaceIndex::Right,
        }
    }
}

/// Physical edge an overview panel occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceIndex {
    Left,
    Right,
}

impl PlaceIndex {
    /// Edge inside the container where the companion panel sits, facing the text
    pub fn companion_edge(&self) -> Edge {
        match self {
            PlaceIndex::Left => Edge::East,
            PlaceIndex::Right => Edge::West,
        }
    }
}

/// Edge inside a container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Edge {
    East,
    West,
}
