//! Glance - overview panel placement and lifecycle for editor hosts
//!
//! This crate keeps a minimap ("glance") panel attached to every text
//! surface of an editor host, following the Elm Architecture pattern: host
//! notifications become [`GlanceMsg`]s, [`update`](update::update) applies
//! them to the [`Synchronizer`] and returns a [`Cmd`] for the host.

pub mod bridge;
pub mod bus;
pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod messages;
pub mod model;
pub mod panel;
pub mod placement;
pub mod registry;
pub mod scenario;
pub mod session;
pub mod sim;
pub mod theme;
pub mod tracing;
pub mod update;

// Re-export commonly used types
pub use bus::MessageBus;
pub use commands::Cmd;
pub use config::{GlanceConfig, SharedConfig};
pub use messages::{GlanceMsg, HostEvent};
pub use model::Synchronizer;
pub use placement::resolve;
pub use session::GlanceSession;
