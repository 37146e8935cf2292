//! In-memory host for tests and scenario replay
//!
//! [`MemoryHost`] keeps open files, their editors and the slot layout of
//! every surface. [`RecordingFactory`] builds panels that write everything
//! done to them into a shared [`PanelRecorder`], including the editor
//! scrollbar width they hide and restore.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::model::{
    CompanionPanel, DiffEditor, DiffProcessorId, DiffViewId, DiffViewer, EditorHost, FileEditor,
    GlanceError, OverviewPanel, PanelFactory, Surface, SurfaceId, ViewerChangeListener,
};
use crate::panel::{Edge, PanelContainer, Side};
use crate::theme::Color;

/// Width of an editor scrollbar nobody has touched
pub const DEFAULT_SCROLLBAR_WIDTH: u32 = 14;

/// Content background of new surfaces
pub const DEFAULT_SURFACE_BACKGROUND: Color = Color::rgb(0x2B, 0x2B, 0x2B);

// ============================================================================
// Host
// ============================================================================

/// Viewer kinds a simulated diff editor can show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewerKind {
    Unified,
    OneSide,
    TwoSide,
    ThreeSide,
    Other,
}

impl ViewerKind {
    fn surface_count(&self) -> usize {
        match self {
            ViewerKind::Unified | ViewerKind::OneSide => 1,
            ViewerKind::TwoSide => 2,
            ViewerKind::ThreeSide => 3,
            ViewerKind::Other => 0,
        }
    }
}

/// What sits in a slot of a simulated surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Occupant {
    /// Some unrelated host component
    Foreign,
    /// A glance container, as it looked when attached
    Container {
        background: Color,
        companion: Option<Edge>,
    },
}

#[derive(Debug, Clone)]
struct SurfaceState {
    surface: Surface,
    slot_layout: bool,
    slots: HashMap<Side, Occupant>,
}

#[derive(Debug, Clone)]
enum Tab {
    Text(SurfaceId),
    Diff {
        processor: DiffProcessorId,
        view: DiffViewId,
        kind: ViewerKind,
        surfaces: Vec<SurfaceId>,
    },
    Binary,
}

#[derive(Debug, Default)]
pub struct MemoryHost {
    next_id: u64,
    files: BTreeMap<PathBuf, Vec<Tab>>,
    surfaces: HashMap<SurfaceId, SurfaceState>,
    listeners: HashMap<DiffProcessorId, Vec<ViewerChangeListener>>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn new_surface(&mut self, file: &Path) -> SurfaceId {
        let id = SurfaceId(self.next_id());
        self.surfaces.insert(
            id,
            SurfaceState {
                surface: Surface::new(id, file, DEFAULT_SURFACE_BACKGROUND),
                slot_layout: true,
                slots: HashMap::new(),
            },
        );
        id
    }

    fn surface(&self, id: SurfaceId) -> Option<Surface> {
        self.surfaces.get(&id).map(|state| state.surface.clone())
    }

    fn editor_for(&self, file: &Path, tab: &Tab) -> FileEditor {
        match tab {
            Tab::Text(id) => FileEditor::Text {
                surface: self.surface(*id),
            },
            Tab::Diff {
                processor,
                view,
                kind,
                surfaces,
            } => {
                let mut surfaces: Vec<Option<Surface>> =
                    surfaces.iter().map(|id| self.surface(*id)).collect();
                let id = *view;
                let active_viewer = match kind {
                    ViewerKind::Unified => DiffViewer::Unified {
                        id,
                        surface: surfaces.pop().flatten(),
                    },
                    ViewerKind::OneSide => DiffViewer::OneSide {
                        id,
                        surface: surfaces.pop().flatten(),
                    },
                    ViewerKind::TwoSide => DiffViewer::TwoSide { id, surfaces },
                    ViewerKind::ThreeSide => DiffViewer::ThreeSide { id, surfaces },
                    ViewerKind::Other => DiffViewer::Other,
                };
                FileEditor::Diff(DiffEditor {
                    processor: *processor,
                    file: file.to_path_buf(),
                    active_viewer,
                })
            }
            Tab::Binary => FileEditor::Other,
        }
    }

    /// Open a plain text editor for `file`
    pub fn open_text(&mut self, file: impl Into<PathBuf>) -> FileEditor {
        let file = file.into();
        let id = self.new_surface(&file);
        let tab = Tab::Text(id);
        let editor = self.editor_for(&file, &tab);
        self.files.entry(file).or_default().push(tab);
        editor
    }

    /// Open a plain text editor whose file type has `extension` as default
    pub fn open_text_typed(&mut self, file: impl Into<PathBuf>, extension: &str) -> FileEditor {
        let file = file.into();
        let id = self.new_surface(&file);
        if let Some(state) = self.surfaces.get_mut(&id) {
            state.surface.extension = extension.to_string();
        }
        let tab = Tab::Text(id);
        let editor = self.editor_for(&file, &tab);
        self.files.entry(file).or_default().push(tab);
        editor
    }

    /// Open a diff editor for `file` showing `kind`
    pub fn open_diff(&mut self, file: impl Into<PathBuf>, kind: ViewerKind) -> FileEditor {
        let file = file.into();
        let processor = DiffProcessorId(self.next_id());
        let view = DiffViewId(self.next_id());
        let surfaces = (0..kind.surface_count())
            .map(|_| self.new_surface(&file))
            .collect();
        let tab = Tab::Diff {
            processor,
            view,
            kind,
            surfaces,
        };
        let editor = self.editor_for(&file, &tab);
        self.files.entry(file).or_default().push(tab);
        editor
    }

    /// Open a non-text editor for `file`
    pub fn open_binary(&mut self, file: impl Into<PathBuf>) -> FileEditor {
        self.files.entry(file.into()).or_default().push(Tab::Binary);
        FileEditor::Other
    }

    /// First diff processor open for `file`
    pub fn processor_for(&self, file: &Path) -> Option<DiffProcessorId> {
        self.files.get(file)?.iter().find_map(|tab| match tab {
            Tab::Diff { processor, .. } => Some(*processor),
            _ => None,
        })
    }

    /// Swap the viewer of a diff processor
    ///
    /// The old viewer's surfaces are released and returned; listeners of the
    /// processor are notified.
    pub fn switch_viewer(&mut self, processor: DiffProcessorId, kind: ViewerKind) -> Vec<SurfaceId> {
        let Some(file) = self.files.iter().find_map(|(file, tabs)| {
            tabs.iter()
                .any(|tab| matches!(tab, Tab::Diff { processor: p, .. } if *p == processor))
                .then(|| file.clone())
        }) else {
            return Vec::new();
        };

        let new_view = DiffViewId(self.next_id());
        let new_surfaces: Vec<SurfaceId> = (0..kind.surface_count())
            .map(|_| self.new_surface(&file))
            .collect();

        let mut released = Vec::new();
        if let Some(tabs) = self.files.get_mut(&file) {
            for tab in tabs.iter_mut() {
                if let Tab::Diff {
                    processor: p,
                    view,
                    kind: current,
                    surfaces,
                } = tab
                {
                    if *p == processor {
                        released = std::mem::replace(surfaces, new_surfaces.clone());
                        *view = new_view;
                        *current = kind;
                    }
                }
            }
        }
        for id in &released {
            self.surfaces.remove(id);
        }

        for listener in self.listeners.get(&processor).into_iter().flatten() {
            listener.notify();
        }
        released
    }

    /// Close every editor of `file`, returning the released surfaces
    pub fn close_file(&mut self, file: &Path) -> Vec<SurfaceId> {
        let Some(tabs) = self.files.remove(file) else {
            return Vec::new();
        };
        let mut released = Vec::new();
        for tab in tabs {
            match tab {
                Tab::Text(id) => released.push(id),
                Tab::Diff {
                    processor,
                    surfaces,
                    ..
                } => {
                    self.listeners.remove(&processor);
                    released.extend(surfaces);
                }
                Tab::Binary => {}
            }
        }
        for id in &released {
            self.surfaces.remove(id);
        }
        released
    }

    /// Surfaces of every open editor of `file`, in tab order
    pub fn surfaces_of(&self, file: &Path) -> Vec<SurfaceId> {
        self.files
            .get(file)
            .into_iter()
            .flatten()
            .flat_map(|tab| match tab {
                Tab::Text(id) => vec![*id],
                Tab::Diff { surfaces, .. } => surfaces.clone(),
                Tab::Binary => Vec::new(),
            })
            .collect()
    }

    /// Open files, sorted
    pub fn files(&self) -> Vec<PathBuf> {
        self.files.keys().cloned().collect()
    }

    pub fn set_background(&mut self, surface: SurfaceId, color: Color) {
        if let Some(state) = self.surfaces.get_mut(&surface) {
            state.surface.background = color;
        }
    }

    /// Make the surface's layout slot-less (or slotted again)
    pub fn set_slot_layout(&mut self, surface: SurfaceId, slot_layout: bool) {
        if let Some(state) = self.surfaces.get_mut(&surface) {
            state.slot_layout = slot_layout;
        }
    }

    /// Put an unrelated component into a slot
    pub fn occupy_slot(&mut self, surface: SurfaceId, side: Side) {
        if let Some(state) = self.surfaces.get_mut(&surface) {
            state.slots.insert(side, Occupant::Foreign);
        }
    }

    pub fn occupant(&self, surface: SurfaceId, side: Side) -> Option<&Occupant> {
        self.surfaces.get(&surface)?.slots.get(&side)
    }

    /// Number of glance containers attached to the surface
    pub fn container_count(&self, surface: SurfaceId) -> usize {
        self.surfaces.get(&surface).map_or(0, |state| {
            state
                .slots
                .values()
                .filter(|occupant| matches!(occupant, Occupant::Container { .. }))
                .count()
        })
    }

    /// Number of listeners kept for a processor
    pub fn listener_count(&self, processor: DiffProcessorId) -> usize {
        self.listeners.get(&processor).map_or(0, Vec::len)
    }
}

impl EditorHost for MemoryHost {
    fn all_editors(&self) -> Vec<FileEditor> {
        self.files
            .iter()
            .flat_map(|(file, tabs)| tabs.iter().map(move |tab| self.editor_for(file, tab)))
            .collect()
    }

    fn editors_for_file(&self, file: &Path) -> Vec<FileEditor> {
        self.files
            .get(file)
            .into_iter()
            .flatten()
            .map(|tab| self.editor_for(file, tab))
            .collect()
    }

    fn has_slot_layout(&self, surface: SurfaceId) -> bool {
        self.surfaces
            .get(&surface)
            .is_some_and(|state| state.slot_layout)
    }

    fn slot_occupied(&self, surface: SurfaceId, side: Side) -> bool {
        self.occupant(surface, side).is_some()
    }

    fn content_background(&self, surface: SurfaceId) -> Option<Color> {
        self.surfaces
            .get(&surface)
            .map(|state| state.surface.background)
    }

    fn attach_container(
        &mut self,
        surface: SurfaceId,
        side: Side,
        container: &PanelContainer,
    ) -> Result<(), GlanceError> {
        let background = container.background(&*self);
        let state = self
            .surfaces
            .get_mut(&surface)
            .ok_or(GlanceError::SurfaceGone(surface))?;
        if !state.slot_layout {
            return Err(GlanceError::NoSlotLayout(surface));
        }
        if state.slots.contains_key(&side) {
            return Err(GlanceError::SlotOccupied { surface, side });
        }
        state.slots.insert(
            side,
            Occupant::Container {
                background,
                companion: container.companion_edge(),
            },
        );
        Ok(())
    }

    fn detach_container(&mut self, surface: SurfaceId, side: Side) -> Result<(), GlanceError> {
        let state = self
            .surfaces
            .get_mut(&surface)
            .ok_or(GlanceError::SurfaceGone(surface))?;
        if matches!(state.slots.get(&side), Some(Occupant::Container { .. })) {
            state.slots.remove(&side);
        }
        Ok(())
    }

    fn watch_diff_processor(&mut self, processor: DiffProcessorId, listener: ViewerChangeListener) {
        self.listeners.entry(processor).or_default().push(listener);
    }
}

// ============================================================================
// Recording panels
// ============================================================================

/// Everything done to one overview panel
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanelRecord {
    pub surface: Option<SurfaceId>,
    pub refreshes: usize,
    pub image_updates: usize,
    pub dispose_calls: usize,
    pub hide_listener_installed: bool,
    pub original_scrollbar_width: Option<u32>,
}

/// Everything done to one companion panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanionRecord {
    pub surface: SurfaceId,
    pub edge: Edge,
    pub dispose_calls: usize,
}

#[derive(Debug, Default)]
struct RecorderState {
    panels: Vec<PanelRecord>,
    companions: Vec<CompanionRecord>,
    scrollbars: HashMap<SurfaceId, u32>,
    failing: HashSet<SurfaceId>,
}

/// Shared log of panel activity
#[derive(Debug, Clone, Default)]
pub struct PanelRecorder {
    state: Rc<RefCell<RecorderState>>,
}

impl PanelRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make panel creation fail for `surface`
    pub fn fail_for(&self, surface: SurfaceId) {
        self.state.borrow_mut().failing.insert(surface);
    }

    /// Every panel ever created for `surface`, oldest first
    pub fn panels_for(&self, surface: SurfaceId) -> Vec<PanelRecord> {
        self.state
            .borrow()
            .panels
            .iter()
            .filter(|record| record.surface == Some(surface))
            .cloned()
            .collect()
    }

    /// The undisposed panel of `surface`, if any
    pub fn live_panel(&self, surface: SurfaceId) -> Option<PanelRecord> {
        self.panels_for(surface)
            .into_iter()
            .rev()
            .find(|record| record.dispose_calls == 0)
    }

    pub fn companions_for(&self, surface: SurfaceId) -> Vec<CompanionRecord> {
        self.state
            .borrow()
            .companions
            .iter()
            .filter(|record| record.surface == surface)
            .cloned()
            .collect()
    }

    pub fn panel_count(&self) -> usize {
        self.state.borrow().panels.len()
    }

    pub fn live_panel_count(&self) -> usize {
        self.state
            .borrow()
            .panels
            .iter()
            .filter(|record| record.dispose_calls == 0)
            .count()
    }

    /// Current width of the editor's own scrollbar
    pub fn scrollbar_width(&self, surface: SurfaceId) -> u32 {
        self.state
            .borrow()
            .scrollbars
            .get(&surface)
            .copied()
            .unwrap_or(DEFAULT_SCROLLBAR_WIDTH)
    }

    fn with_panel(&self, index: usize, f: impl FnOnce(&mut PanelRecord)) {
        if let Some(record) = self.state.borrow_mut().panels.get_mut(index) {
            f(record);
        }
    }
}

/// Panel factory producing [`RecordingPanel`]s
#[derive(Debug, Clone, Default)]
pub struct RecordingFactory {
    recorder: PanelRecorder,
}

impl RecordingFactory {
    pub fn new(recorder: PanelRecorder) -> Self {
        Self { recorder }
    }
}

impl PanelFactory for RecordingFactory {
    fn create_overview(&mut self, surface: &Surface) -> Result<Box<dyn OverviewPanel>, GlanceError> {
        let mut state = self.recorder.state.borrow_mut();
        if state.failing.contains(&surface.id) {
            return Err(GlanceError::PanelCreation {
                surface: surface.id,
                reason: "simulated failure".to_string(),
            });
        }
        state.panels.push(PanelRecord {
            surface: Some(surface.id),
            ..Default::default()
        });
        let index = state.panels.len() - 1;
        Ok(Box::new(RecordingPanel {
            index,
            surface: surface.id,
            recorder: self.recorder.clone(),
            original_width: None,
            disposed: false,
        }))
    }

    fn create_companion(
        &mut self,
        surface: &Surface,
        edge: Edge,
    ) -> Result<Box<dyn CompanionPanel>, GlanceError> {
        let mut state = self.recorder.state.borrow_mut();
        state.companions.push(CompanionRecord {
            surface: surface.id,
            edge,
            dispose_calls: 0,
        });
        Ok(Box::new(RecordingCompanion {
            index: state.companions.len() - 1,
            recorder: self.recorder.clone(),
        }))
    }
}

/// Overview panel that only records what happens to it
#[derive(Debug)]
pub struct RecordingPanel {
    index: usize,
    surface: SurfaceId,
    recorder: PanelRecorder,
    original_width: Option<u32>,
    disposed: bool,
}

impl OverviewPanel for RecordingPanel {
    fn refresh(&mut self) {
        self.recorder.with_panel(self.index, |r| r.refreshes += 1);
    }

    fn update_image(&mut self) {
        self.recorder.with_panel(self.index, |r| r.image_updates += 1);
    }

    fn original_scrollbar_width(&self) -> Option<u32> {
        self.original_width
    }

    fn set_original_scrollbar_width(&mut self, width: Option<u32>) {
        self.original_width = width;
        self.recorder
            .with_panel(self.index, |r| r.original_scrollbar_width = width);
    }

    fn change_origin_scrollbar_width(&mut self, hide: bool) {
        if self.disposed {
            return;
        }
        let current = self.recorder.scrollbar_width(self.surface);
        let width = if hide {
            // Remember the width only the first time; a hidden bar reads 0
            let original = *self.original_width.get_or_insert(current);
            self.recorder
                .with_panel(self.index, |r| r.original_scrollbar_width = Some(original));
            0
        } else {
            self.original_width.unwrap_or(current)
        };
        self.recorder
            .state
            .borrow_mut()
            .scrollbars
            .insert(self.surface, width);
    }

    fn install_hide_scrollbar_listener(&mut self) {
        self.recorder
            .with_panel(self.index, |r| r.hide_listener_installed = true);
    }

    fn dispose(&mut self) {
        self.disposed = true;
        self.recorder.with_panel(self.index, |r| r.dispose_calls += 1);
    }
}

#[derive(Debug)]
struct RecordingCompanion {
    index: usize,
    recorder: PanelRecorder,
}

impl CompanionPanel for RecordingCompanion {
    fn dispose(&mut self) {
        if let Some(record) = self
            .recorder
            .state
            .borrow_mut()
            .companions
            .get_mut(self.index)
        {
            record.dispose_calls += 1;
        }
    }
}
