//! Placement resolution
//!
//! Turns the editors the host reports into the surfaces that should carry
//! an overview panel, and the slot each one goes into. Resolution is pure:
//! it never touches the host layout and never fails. Anything that is not a
//! text surface is left out.

use crate::model::{DiffViewId, DiffViewer, FileEditor, Surface};
use crate::panel::{PlaceIndex, Side};

/// Which diff viewers get panels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DiffConfig {
    pub two_side: bool,
    pub three_side: bool,
    pub three_side_middle: bool,
}

/// Resolver inputs taken from the config snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlacementConfig {
    pub align_right: bool,
    pub diff: DiffConfig,
}

/// A surface that should carry a panel, and where
#[derive(Debug, Clone, PartialEq)]
pub struct EditorInfo {
    pub surface: Surface,
    pub side: Side,
    /// Set when the surface belongs to a diff viewer
    pub diff_view: Option<DiffViewId>,
}

impl EditorInfo {
    pub fn place_index(&self) -> PlaceIndex {
        self.side.place_index()
    }
}

/// Lazily enumerate placements for `editors`
///
/// Two-side and three-side viewers ignore the global alignment: their first
/// surface always goes to [`Side::Start`] and the others to [`Side::End`].
pub fn resolve(
    editors: &[FileEditor],
    config: PlacementConfig,
) -> impl Iterator<Item = EditorInfo> + '_ {
    editors
        .iter()
        .flat_map(move |editor| placements_for(editor, config))
}

fn placements_for(editor: &FileEditor, config: PlacementConfig) -> Vec<EditorInfo> {
    let aligned = Side::aligned(config.align_right);
    match editor {
        FileEditor::Text { surface } => surface
            .iter()
            .map(|surface| EditorInfo {
                surface: surface.clone(),
                side: aligned,
                diff_view: None,
            })
            .collect(),
        FileEditor::Diff(diff) => match &diff.active_viewer {
            DiffViewer::Unified { id, surface } | DiffViewer::OneSide { id, surface } => surface
                .iter()
                .map(|surface| EditorInfo {
                    surface: surface.clone(),
                    side: aligned,
                    diff_view: Some(*id),
                })
                .collect(),
            DiffViewer::TwoSide { id, surfaces } => {
                if !config.diff.two_side {
                    return Vec::new();
                }
                split_sides(*id, surfaces, |_| true)
            }
            DiffViewer::ThreeSide { id, surfaces } => {
                if !config.diff.three_side {
                    return Vec::new();
                }
                let middle = config.diff.three_side_middle;
                split_sides(*id, surfaces, |index| index != 1 || middle)
            }
            DiffViewer::Other => Vec::new(),
        },
        FileEditor::Other => Vec::new(),
    }
}

/// Index text surfaces after dropping the non-text ones, first one at Start
fn split_sides(
    id: DiffViewId,
    surfaces: &[Option<Surface>],
    keep: impl Fn(usize) -> bool,
) -> Vec<EditorInfo> {
    surfaces
        .iter()
        .flatten()
        .enumerate()
        .filter(|(index, _)| keep(*index))
        .map(|(index, surface)| EditorInfo {
            surface: surface.clone(),
            side: if index == 0 { Side::Start } else { Side::End },
            diff_view: Some(id),
        })
        .collect()
}
