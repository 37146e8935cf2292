//! Message types for the Elm-style architecture
//!
//! Raw [`HostEvent`]s are published on the host bus; the event bridge turns
//! them into [`GlanceMsg`]s, which are the only input of the synchronizer.

use std::path::PathBuf;

use crate::model::{FileEditor, SurfaceId};

/// Host-wide notification topics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    /// Editors were opened for a file
    FileOpened,
    /// Global settings were applied
    GlobalSettingsChanged,
    /// The look-and-feel (theme) changed
    LookAndFeelChanged,
    /// An editor surface was released by the host
    EditorReleased,
}

/// A raw notification as published by the host
#[derive(Debug, Clone)]
pub enum HostEvent {
    FileOpened {
        /// Name of the editor manager that opened the file
        source: String,
        file: PathBuf,
        /// Editors created by this open
        editors: Vec<FileEditor>,
    },
    GlobalSettingsChanged,
    LookAndFeelChanged {
        source: String,
    },
    EditorReleased {
        surface: SurfaceId,
    },
}

impl HostEvent {
    pub fn topic(&self) -> Topic {
        match self {
            HostEvent::FileOpened { .. } => Topic::FileOpened,
            HostEvent::GlobalSettingsChanged => Topic::GlobalSettingsChanged,
            HostEvent::LookAndFeelChanged { .. } => Topic::LookAndFeelChanged,
            HostEvent::EditorReleased { .. } => Topic::EditorReleased,
        }
    }
}

/// Normalized synchronizer input
#[derive(Debug, Clone)]
pub enum GlanceMsg {
    /// Editors were opened for `file`
    EditorsOpened {
        file: PathBuf,
        editors: Vec<FileEditor>,
    },
    /// A diff processor showing `file` swapped its active viewer
    DiffViewerChanged { file: PathBuf },
    /// Global settings changed; re-read the config snapshot
    SettingsChanged,
    /// Look-and-feel changed
    LafChanged,
    /// The host released these surfaces
    SurfacesReleased(Vec<SurfaceId>),
}

impl GlanceMsg {
    /// Display name for logs, without payloads
    pub fn name(&self) -> String {
        match self {
            GlanceMsg::EditorsOpened { file, editors } => {
                format!("EditorsOpened({}, {} editors)", file.display(), editors.len())
            }
            GlanceMsg::DiffViewerChanged { file } => {
                format!("DiffViewerChanged({})", file.display())
            }
            GlanceMsg::SettingsChanged => "SettingsChanged".to_string(),
            GlanceMsg::LafChanged => "LafChanged".to_string(),
            GlanceMsg::SurfacesReleased(surfaces) => {
                format!("SurfacesReleased({:?})", surfaces)
            }
        }
    }
}
