//! Panel containers and slot positions
//!
//! - `Side`: leading or trailing layout slot of an editor surface
//! - `PlaceIndex`: physical edge (left/right) recorded for a mounted panel
//! - `Edge`: where the companion panel sits inside a container
//! - `PanelContainer`: the component inserted into a slot, owning the panels

mod container;
mod place;

pub use container::PanelContainer;
pub use place::{Edge, PlaceIndex, Side};
