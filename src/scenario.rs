//! Scenario replay against the in-memory host
//!
//! A scenario is a YAML list of host actions (open a file, swap a diff
//! viewer, change settings, ...). Each action is published on a
//! [`MessageBus`] exactly like a host would, the session is pumped, and the
//! resulting layout is summarized in a [`Report`].

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};

use crate::bus::MessageBus;
use crate::commands::Cmd;
use crate::config::{GlanceConfig, SharedConfig};
use crate::messages::HostEvent;
use crate::model::{SlotStatus, SurfaceId};
use crate::panel::{Edge, Side};
use crate::registry::SessionId;
use crate::session::GlanceSession;
use crate::sim::{MemoryHost, PanelRecorder, RecordingFactory, ViewerKind};

/// Event source name used for everything the runner publishes
const REPLAY_SOURCE: &str = "replay";

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    /// Settings to start from; the user config when absent
    #[serde(default)]
    pub config: Option<GlanceConfig>,
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    Open {
        file: PathBuf,
    },
    OpenDiff {
        file: PathBuf,
        viewer: ViewerKind,
    },
    OpenBinary {
        file: PathBuf,
    },
    SwitchViewer {
        file: PathBuf,
        viewer: ViewerKind,
    },
    /// Put a foreign component into `side` of every surface of `file`
    OccupySlot {
        file: PathBuf,
        side: Side,
    },
    /// Change some settings and broadcast the change
    Settings {
        disable_language_suffix: Option<String>,
        right_aligned: Option<bool>,
        diff_two_side: Option<bool>,
        diff_three_side: Option<bool>,
        diff_three_side_middle: Option<bool>,
        hide_original_scroll_bar: Option<bool>,
    },
    LookAndFeel,
    Close {
        file: PathBuf,
    },
}

impl Scenario {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("Failed to parse scenario {}", path.display()))
    }

    pub fn parse(contents: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(contents)?)
    }
}

/// Outcome of a replay
#[derive(Debug, Clone, Default, Serialize)]
pub struct Report {
    /// Every surface still open, by file then tab order
    pub surfaces: Vec<SurfaceReport>,
    /// Steps that asked the host to repaint
    pub redraws: usize,
    /// Overview panels created over the whole run
    pub panels_created: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct SurfaceReport {
    pub file: PathBuf,
    pub surface: u64,
    pub status: SlotStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub side: Option<Side>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub companion: Option<Edge>,
    pub scrollbar_width: u32,
    pub refreshes: usize,
    pub image_updates: usize,
}

impl Report {
    pub fn status_of(&self, file: &Path) -> Vec<SlotStatus> {
        self.surfaces
            .iter()
            .filter(|s| s.file == file)
            .map(|s| s.status)
            .collect()
    }
}

/// Replay `scenario` and report the final layout
pub fn run(scenario: &Scenario) -> anyhow::Result<Report> {
    let config = scenario.config.clone().unwrap_or_else(GlanceConfig::load);
    let shared = SharedConfig::new(config);
    let bus = MessageBus::new();
    let recorder = PanelRecorder::new();
    let mut host = MemoryHost::new();
    let session = GlanceSession::open(
        SessionId(1),
        &bus,
        shared.clone(),
        Box::new(RecordingFactory::new(recorder.clone())),
    );

    // The host announces its theme once at startup
    bus.publish(&HostEvent::LookAndFeelChanged {
        source: "startup".to_string(),
    });
    session.pump(&mut host);

    let mut redraws = 0;
    for (index, step) in scenario.steps.iter().enumerate() {
        let _span = tracing::debug_span!("step", index).entered();
        let cmd = apply_step(step, &bus, &session, &shared, &mut host)
            .with_context(|| format!("Step {} failed", index + 1))?;
        if cmd.needs_redraw() {
            redraws += 1;
        }
    }

    let sync = session.synchronizer().borrow();
    let surfaces = host
        .files()
        .into_iter()
        .flat_map(|file| {
            host.surfaces_of(&file)
                .into_iter()
                .map(move |surface| (file.clone(), surface))
        })
        .map(|(file, surface)| {
            let entry = sync.slots.get(surface);
            let live = recorder.live_panel(surface);
            SurfaceReport {
                file,
                surface: surface.0,
                status: sync.status(surface),
                side: entry.map(|e| e.side),
                companion: entry.and_then(|e| e.state.container().companion_edge()),
                scrollbar_width: recorder.scrollbar_width(surface),
                refreshes: live.as_ref().map_or(0, |p| p.refreshes),
                image_updates: live.as_ref().map_or(0, |p| p.image_updates),
            }
        })
        .collect();

    Ok(Report {
        surfaces,
        redraws,
        panels_created: recorder.panel_count(),
    })
}

fn apply_step(
    step: &Step,
    bus: &MessageBus,
    session: &GlanceSession,
    shared: &SharedConfig,
    host: &mut MemoryHost,
) -> anyhow::Result<Cmd> {
    match step {
        Step::Open { file } => {
            let editor = host.open_text(file.clone());
            publish_opened(bus, file, vec![editor]);
        }
        Step::OpenDiff { file, viewer } => {
            let editor = host.open_diff(file.clone(), *viewer);
            publish_opened(bus, file, vec![editor]);
        }
        Step::OpenBinary { file } => {
            let editor = host.open_binary(file.clone());
            publish_opened(bus, file, vec![editor]);
        }
        Step::SwitchViewer { file, viewer } => {
            let Some(processor) = host.processor_for(file) else {
                bail!("No diff editor open for {}", file.display());
            };
            let released = host.switch_viewer(processor, *viewer);
            publish_released(bus, released);
        }
        Step::OccupySlot { file, side } => {
            let surfaces = host.surfaces_of(file);
            if surfaces.is_empty() {
                bail!("No surface open for {}", file.display());
            }
            for surface in surfaces {
                host.occupy_slot(surface, *side);
            }
            return Ok(Cmd::None);
        }
        Step::Settings {
            disable_language_suffix,
            right_aligned,
            diff_two_side,
            diff_three_side,
            diff_three_side_middle,
            hide_original_scroll_bar,
        } => {
            shared.update(|config| {
                if let Some(value) = disable_language_suffix {
                    config.disable_language_suffix = value.clone();
                }
                if let Some(value) = right_aligned {
                    config.right_aligned = *value;
                }
                if let Some(value) = diff_two_side {
                    config.diff_two_side = *value;
                }
                if let Some(value) = diff_three_side {
                    config.diff_three_side = *value;
                }
                if let Some(value) = diff_three_side_middle {
                    config.diff_three_side_middle = *value;
                }
                if let Some(value) = hide_original_scroll_bar {
                    config.hide_original_scroll_bar = *value;
                }
            });
            bus.publish(&HostEvent::GlobalSettingsChanged);
        }
        Step::LookAndFeel => {
            bus.publish(&HostEvent::LookAndFeelChanged {
                source: REPLAY_SOURCE.to_string(),
            });
        }
        Step::Close { file } => {
            let released = host.close_file(file);
            publish_released(bus, released);
        }
    }

    Ok(session.pump(host))
}

fn publish_opened(bus: &MessageBus, file: &Path, editors: Vec<crate::model::FileEditor>) {
    bus.publish(&HostEvent::FileOpened {
        source: REPLAY_SOURCE.to_string(),
        file: file.to_path_buf(),
        editors,
    });
}

fn publish_released(bus: &MessageBus, surfaces: Vec<SurfaceId>) {
    for surface in surfaces {
        bus.publish(&HostEvent::EditorReleased { surface });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_steps() {
        let scenario = Scenario::parse(
            r#"
config:
  right_aligned: false
steps:
  - action: open
    file: src/main.rs
  - action: open_diff
    file: src/lib.rs
    viewer: two_side
  - action: settings
    disable_language_suffix: "rs"
  - action: look_and_feel
  - action: close
    file: src/main.rs
"#,
        )
        .unwrap();

        let config = scenario.config.unwrap();
        assert!(!config.right_aligned);
        assert!(config.diff_two_side);
        assert_eq!(scenario.steps.len(), 5);
        assert!(matches!(
            scenario.steps[1],
            Step::OpenDiff {
                viewer: ViewerKind::TwoSide,
                ..
            }
        ));
        match &scenario.steps[2] {
            Step::Settings {
                disable_language_suffix,
                right_aligned,
                ..
            } => {
                assert_eq!(disable_language_suffix.as_deref(), Some("rs"));
                assert_eq!(*right_aligned, None);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_unknown_action_is_rejected() {
        assert!(Scenario::parse("steps:\n  - action: explode\n").is_err());
    }

    #[test]
    fn test_switch_viewer_without_diff_fails() {
        let scenario = Scenario::parse(
            "config: {}\nsteps:\n  - action: switch_viewer\n    file: a.rs\n    viewer: unified\n",
        )
        .unwrap();
        let err = run(&scenario).unwrap_err();
        assert!(format!("{:#}", err).contains("No diff editor open"));
    }
}
