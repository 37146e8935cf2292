//! Panel container mounted into an editor slot
//!
//! A container wraps the overview panel (and the companion panel when the
//! editor scrollbar is hidden). Once its panel is disposed the container can
//! stay in the layout as an empty placeholder, remembering the scrollbar
//! width so a later rebuild can carry it over.

use std::fmt;

use crate::model::{CompanionPanel, EditorHost, GlanceError, OverviewPanel, PanelFactory, SurfaceId};
use crate::placement::EditorInfo;
use crate::theme::{Color, DEFAULT_CONTAINER_BACKGROUND};

use super::place::{Edge, PlaceIndex, Side};

pub struct PanelContainer {
    surface: SurfaceId,
    side: Side,
    place_index: PlaceIndex,
    panel: Option<Box<dyn OverviewPanel>>,
    companion: Option<(Edge, Box<dyn CompanionPanel>)>,
    /// Scrollbar width of the last disposed panel
    retained_scrollbar_width: Option<u32>,
}

impl PanelContainer {
    /// Build a container for `info` and insert it into the surface layout
    ///
    /// `carried_width` is the scrollbar width of a panel this one replaces.
    pub fn mount(
        host: &mut dyn EditorHost,
        factory: &mut dyn PanelFactory,
        info: &EditorInfo,
        hide_scroll_bar: bool,
        carried_width: Option<u32>,
    ) -> Result<Self, GlanceError> {
        let place_index = info.place_index();

        let mut panel = factory.create_overview(&info.surface)?;
        if carried_width.is_some() {
            panel.set_original_scrollbar_width(carried_width);
        }

        let companion = if hide_scroll_bar {
            let edge = place_index.companion_edge();
            match factory.create_companion(&info.surface, edge) {
                Ok(companion) => Some((edge, companion)),
                Err(e) => {
                    panel.dispose();
                    return Err(e);
                }
            }
        } else {
            None
        };

        let mut container = Self {
            surface: info.surface.id,
            side: info.side,
            place_index,
            panel: Some(panel),
            companion,
            retained_scrollbar_width: carried_width,
        };

        // Dropping the container on error disposes what was created above
        host.attach_container(info.surface.id, info.side, &container)?;

        if let Some(panel) = container.panel.as_mut() {
            panel.install_hide_scrollbar_listener();
        }

        tracing::debug!(
            surface = ?info.surface.id,
            side = ?info.side,
            companion = container.companion.is_some(),
            "mounted overview panel"
        );
        Ok(container)
    }

    pub fn surface(&self) -> SurfaceId {
        self.surface
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn place_index(&self) -> PlaceIndex {
        self.place_index
    }

    pub fn has_panel(&self) -> bool {
        self.panel.is_some()
    }

    pub fn panel_mut(&mut self) -> Option<&mut (dyn OverviewPanel + 'static)> {
        self.panel.as_deref_mut()
    }

    /// Edge of the companion panel, if one is mounted
    pub fn companion_edge(&self) -> Option<Edge> {
        self.companion.as_ref().map(|(edge, _)| *edge)
    }

    /// Scrollbar width to hand to a replacement panel
    pub fn scrollbar_width(&self) -> Option<u32> {
        match &self.panel {
            Some(panel) => panel.original_scrollbar_width(),
            None => self.retained_scrollbar_width,
        }
    }

    /// Background that blends with the wrapped surface
    pub fn background(&self, host: &dyn EditorHost) -> Color {
        if self.panel.is_none() {
            return DEFAULT_CONTAINER_BACKGROUND;
        }
        host.content_background(self.surface)
            .unwrap_or(DEFAULT_CONTAINER_BACKGROUND)
    }

    /// Release the overview and companion panels; safe to call repeatedly
    pub fn dispose(&mut self) {
        if let Some(mut panel) = self.panel.take() {
            self.retained_scrollbar_width = panel.original_scrollbar_width();
            panel.dispose();
            tracing::debug!(surface = ?self.surface, "disposed overview panel");
        }
        if let Some((_, mut companion)) = self.companion.take() {
            companion.dispose();
        }
    }
}

impl Drop for PanelContainer {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl fmt::Debug for PanelContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PanelContainer")
            .field("surface", &self.surface)
            .field("side", &self.side)
            .field("place_index", &self.place_index)
            .field("has_panel", &self.panel.is_some())
            .field("companion_edge", &self.companion_edge())
            .field("retained_scrollbar_width", &self.retained_scrollbar_width)
            .finish()
    }
}
