//! Host editor object model as seen by the synchronizer
//!
//! These are read-only views handed over by the host. The host owns the
//! real editors; ids are stable for the lifetime of the underlying object.

use std::path::{Path, PathBuf};

use crate::theme::Color;

// ============================================================================
// Identifiers
// ============================================================================

/// Unique identifier for a text surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceId(pub u64);

/// Unique identifier for a diff request processor (one per diff editor tab)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DiffProcessorId(pub u64);

/// Handle of the diff viewer a surface belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DiffViewId(pub u64);

/// Extension of a path without the dot, or "" when it has none
pub fn file_extension(path: &Path) -> &str {
    path.extension().and_then(|ext| ext.to_str()).unwrap_or("")
}

// ============================================================================
// Surfaces
// ============================================================================

/// A single text-editing view (a plain editor, or one side of a diff)
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    pub id: SurfaceId,
    /// File shown by this surface
    pub file: PathBuf,
    /// Default extension of the file's type (may differ from the path's)
    pub extension: String,
    /// Content background at the time the view was taken
    pub background: Color,
}

impl Surface {
    /// Create a surface whose extension is taken from the file path
    pub fn new(id: SurfaceId, file: impl Into<PathBuf>, background: Color) -> Self {
        let file = file.into();
        let extension = file_extension(&file).to_string();
        Self {
            id,
            file,
            extension,
            background,
        }
    }
}

// ============================================================================
// Editors
// ============================================================================

/// An editor tab as reported by the host
///
/// `None` surfaces stand for editor components that are not text surfaces
/// the overview can attach to.
#[derive(Debug, Clone, PartialEq)]
pub enum FileEditor {
    /// Plain text editor
    Text { surface: Option<Surface> },
    /// Diff editor hosting a processor with a switchable viewer
    Diff(DiffEditor),
    /// Binary, image or any other non-text editor
    Other,
}

impl FileEditor {
    /// Plain text editor over a text surface
    pub fn text(surface: Surface) -> Self {
        FileEditor::Text {
            surface: Some(surface),
        }
    }

    pub fn as_diff(&self) -> Option<&DiffEditor> {
        match self {
            FileEditor::Diff(diff) => Some(diff),
            _ => None,
        }
    }
}

/// A diff editor tab
#[derive(Debug, Clone, PartialEq)]
pub struct DiffEditor {
    pub processor: DiffProcessorId,
    /// File the diff was opened for
    pub file: PathBuf,
    /// Viewer currently shown by the processor
    pub active_viewer: DiffViewer,
}

/// The viewer currently active inside a diff processor
#[derive(Debug, Clone, PartialEq)]
pub enum DiffViewer {
    /// Single merged view of both sides
    Unified {
        id: DiffViewId,
        surface: Option<Surface>,
    },
    /// One side only (added or deleted file)
    OneSide {
        id: DiffViewId,
        surface: Option<Surface>,
    },
    /// Side by side
    TwoSide {
        id: DiffViewId,
        surfaces: Vec<Option<Surface>>,
    },
    /// Merge view: left, base, right
    ThreeSide {
        id: DiffViewId,
        surfaces: Vec<Option<Surface>>,
    },
    /// Non-text diff tool
    Other,
}

impl DiffViewer {
    pub fn id(&self) -> Option<DiffViewId> {
        match self {
            DiffViewer::Unified { id, .. }
            | DiffViewer::OneSide { id, .. }
            | DiffViewer::TwoSide { id, .. }
            | DiffViewer::ThreeSide { id, .. } => Some(*id),
            DiffViewer::Other => None,
        }
    }

    /// Short lowercase name used in logs and reports
    pub fn kind_name(&self) -> &'static str {
        match self {
            DiffViewer::Unified { .. } => "unified",
            DiffViewer::OneSide { .. } => "one_side",
            DiffViewer::TwoSide { .. } => "two_side",
            DiffViewer::ThreeSide { .. } => "three_side",
            DiffViewer::Other => "other",
        }
    }
}
