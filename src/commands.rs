//! Command types for the Elm-style architecture
//!
//! Commands describe work the host should do after an update. The
//! synchronizer already mounted or disposed panels by the time a command is
//! returned; commands only carry repaint requests.

use crate::model::SurfaceId;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Cmd {
    /// No command - do nothing
    #[default]
    None,
    /// Repaint every editor
    Redraw,
    /// Repaint only these surfaces
    RedrawSurfaces(Vec<SurfaceId>),
    /// Execute multiple commands
    Batch(Vec<Cmd>),
}

impl Cmd {
    /// Create a batch of commands, flattening nested batches and dropping no-ops
    pub fn batch(cmds: Vec<Cmd>) -> Self {
        let mut flat = Vec::with_capacity(cmds.len());
        for cmd in cmds {
            match cmd {
                Cmd::None => {}
                Cmd::Batch(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }
        match flat.len() {
            0 => Cmd::None,
            1 => flat.remove(0),
            _ => Cmd::Batch(flat),
        }
    }

    /// Repaint request for `surfaces`, or nothing when empty
    pub fn redraw_surfaces(surfaces: Vec<SurfaceId>) -> Option<Cmd> {
        if surfaces.is_empty() {
            None
        } else {
            Some(Cmd::RedrawSurfaces(surfaces))
        }
    }

    /// Check if this command requires a redraw
    pub fn needs_redraw(&self) -> bool {
        match self {
            Cmd::None => false,
            Cmd::Redraw => true,
            Cmd::RedrawSurfaces(surfaces) => !surfaces.is_empty(),
            Cmd::Batch(cmds) => cmds.iter().any(|c| c.needs_redraw()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_flattens_and_drops_none() {
        let cmd = Cmd::batch(vec![
            Cmd::None,
            Cmd::Batch(vec![Cmd::RedrawSurfaces(vec![SurfaceId(1)]), Cmd::Redraw]),
        ]);
        assert_eq!(
            cmd,
            Cmd::Batch(vec![Cmd::RedrawSurfaces(vec![SurfaceId(1)]), Cmd::Redraw])
        );
    }

    #[test]
    fn test_batch_of_one_unwraps() {
        assert_eq!(Cmd::batch(vec![Cmd::None, Cmd::Redraw]), Cmd::Redraw);
        assert_eq!(Cmd::batch(vec![]), Cmd::None);
    }

    #[test]
    fn test_needs_redraw() {
        assert!(!Cmd::None.needs_redraw());
        assert!(Cmd::Redraw.needs_redraw());
        assert!(!Cmd::RedrawSurfaces(vec![]).needs_redraw());
        assert!(Cmd::Batch(vec![Cmd::None, Cmd::Redraw]).needs_redraw());
    }
}
