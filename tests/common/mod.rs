//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::path::Path;

use glance::bus::MessageBus;
use glance::commands::Cmd;
use glance::config::{GlanceConfig, SharedConfig};
use glance::messages::HostEvent;
use glance::model::{DiffViewer, FileEditor, SlotStatus, Surface, SurfaceId};
use glance::panel::Side;
use glance::registry::SessionId;
use glance::session::GlanceSession;
use glance::sim::{MemoryHost, PanelRecorder, RecordingFactory, ViewerKind};
use glance::theme::Color;

/// A session wired to an in-memory host, driven through the bus
pub struct Harness {
    pub bus: MessageBus,
    pub host: MemoryHost,
    pub recorder: PanelRecorder,
    pub config: SharedConfig,
    pub session: GlanceSession,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(GlanceConfig::default())
    }

    pub fn with_config(config: GlanceConfig) -> Self {
        let bus = MessageBus::new();
        let recorder = PanelRecorder::new();
        let config = SharedConfig::new(config);
        let session = GlanceSession::open(
            SessionId(1),
            &bus,
            config.clone(),
            Box::new(RecordingFactory::new(recorder.clone())),
        );
        Self {
            bus,
            host: MemoryHost::new(),
            recorder,
            config,
            session,
        }
    }

    pub fn pump(&mut self) -> Cmd {
        self.session.pump(&mut self.host)
    }

    /// Open a text editor and announce it
    pub fn open_text(&mut self, file: &str) -> SurfaceId {
        let editor = self.host.open_text(file);
        let ids = surface_ids(&editor);
        self.announce(file, vec![editor]);
        ids[0]
    }

    /// Open a diff editor and announce it, returning its surfaces in order
    pub fn open_diff(&mut self, file: &str, kind: ViewerKind) -> Vec<SurfaceId> {
        let editor = self.host.open_diff(file, kind);
        let ids = surface_ids(&editor);
        self.announce(file, vec![editor]);
        ids
    }

    pub fn announce(&mut self, file: &str, editors: Vec<FileEditor>) -> Cmd {
        self.bus.publish(&HostEvent::FileOpened {
            source: "test".to_string(),
            file: file.into(),
            editors,
        });
        self.pump()
    }

    pub fn change_settings(&mut self, f: impl FnOnce(&mut GlanceConfig)) -> Cmd {
        self.config.update(f);
        self.bus.publish(&HostEvent::GlobalSettingsChanged);
        self.pump()
    }

    pub fn look_and_feel(&mut self) -> Cmd {
        self.bus.publish(&HostEvent::LookAndFeelChanged {
            source: "test".to_string(),
        });
        self.pump()
    }

    /// Swap the viewer of the file's diff editor; returns the surfaces now shown
    pub fn switch_viewer(&mut self, file: &str, kind: ViewerKind) -> Vec<SurfaceId> {
        let processor = self
            .host
            .processor_for(Path::new(file))
            .expect("no diff editor open");
        let released = self.host.switch_viewer(processor, kind);
        for surface in released {
            self.bus.publish(&HostEvent::EditorReleased { surface });
        }
        self.pump();
        self.host.surfaces_of(Path::new(file))
    }

    pub fn close(&mut self, file: &str) -> Vec<SurfaceId> {
        let released = self.host.close_file(Path::new(file));
        for surface in &released {
            self.bus.publish(&HostEvent::EditorReleased { surface: *surface });
        }
        self.pump();
        released
    }

    pub fn status(&self, surface: SurfaceId) -> SlotStatus {
        self.session.synchronizer().borrow().status(surface)
    }

    pub fn side(&self, surface: SurfaceId) -> Option<Side> {
        self.session
            .synchronizer()
            .borrow()
            .slots
            .get(surface)
            .map(|entry| entry.side)
    }

    pub fn active_count(&self) -> usize {
        self.session.synchronizer().borrow().active_count()
    }

    /// Background the mounted container paints with
    pub fn container_background(&self, surface: SurfaceId) -> Option<Color> {
        let sync = self.session.synchronizer().borrow();
        sync.slots
            .get(surface)
            .map(|entry| entry.state.container().background(&self.host))
    }
}

/// Surface ids of an editor, in viewer order
pub fn surface_ids(editor: &FileEditor) -> Vec<SurfaceId> {
    let ids = |surfaces: &[Option<Surface>]| -> Vec<SurfaceId> {
        surfaces.iter().flatten().map(|s| s.id).collect()
    };
    match editor {
        FileEditor::Text { surface } => surface.iter().map(|s| s.id).collect(),
        FileEditor::Diff(diff) => match &diff.active_viewer {
            DiffViewer::Unified { surface, .. } | DiffViewer::OneSide { surface, .. } => {
                surface.iter().map(|s| s.id).collect()
            }
            DiffViewer::TwoSide { surfaces, .. } | DiffViewer::ThreeSide { surfaces, .. } => {
                ids(surfaces)
            }
            DiffViewer::Other => Vec::new(),
        },
        FileEditor::Other => Vec::new(),
    }
}

/// Text surface with a fixed id, for resolver tests
pub fn surface(id: u64, file: &str) -> Surface {
    Surface::new(SurfaceId(id), file, Color::rgb(0x2B, 0x2B, 0x2B))
}

/// Config with only the given extensions disabled
pub fn config_disabling(extensions: &str) -> GlanceConfig {
    GlanceConfig {
        disable_language_suffix: extensions.to_string(),
        ..GlanceConfig::default()
    }
}
