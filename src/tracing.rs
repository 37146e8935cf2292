//! Debug tracing infrastructure for development diagnostics
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=panels=debug` - only slot layout changes
//! - `RUST_LOG=glance::update=debug` - module-level filtering
//!
//! # Log Files
//!
//! Logs are written to `~/.config/glance/logs/glance.log` with daily rotation.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::model::{SlotStatus, SlotTable, SurfaceId};
use crate::panel::Side;

/// Initialize tracing subscriber with console and file logging
///
/// Console output respects RUST_LOG and defaults to `warn`. File logging
/// always records debug level.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, "glance.log");
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {:#}", e);
            None
        }
    };

    // A subscriber may already be installed (tests, embedding hosts)
    let _ = tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init();
}

/// Lightweight snapshot of the slot table for diffing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutSnapshot {
    pub slots: Vec<SlotSnapshot>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotSnapshot {
    pub surface: SurfaceId,
    pub side: Side,
    pub status: SlotStatus,
}

impl LayoutSnapshot {
    pub fn capture(slots: &SlotTable) -> Self {
        Self {
            slots: slots
                .iter()
                .map(|(surface, entry)| SlotSnapshot {
                    surface,
                    side: entry.side,
                    status: entry.state.status(),
                })
                .collect(),
        }
    }

    fn find(&self, surface: SurfaceId) -> Option<&SlotSnapshot> {
        self.slots.iter().find(|slot| slot.surface == surface)
    }

    /// Generate a diff description between two snapshots
    pub fn diff(&self, other: &LayoutSnapshot) -> Option<String> {
        let mut changes = Vec::new();

        for after in &other.slots {
            match self.find(after.surface) {
                None => changes.push(format!(
                    "#{}: absent → {:?}@{:?}",
                    after.surface.0, after.status, after.side
                )),
                Some(before) if before != after => changes.push(format!(
                    "#{}: {:?}@{:?} → {:?}@{:?}",
                    after.surface.0, before.status, before.side, after.status, after.side
                )),
                Some(_) => {}
            }
        }
        for before in &self.slots {
            if other.find(before.surface).is_none() {
                changes.push(format!(
                    "#{}: {:?}@{:?} → absent",
                    before.surface.0, before.status, before.side
                ));
            }
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}
