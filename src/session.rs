//! Glance session - one synchronizer wired to the host bus
//!
//! A session owns the synchronizer, the queue of normalized messages and
//! the bridge subscriptions. Everything it registered (bus subscriptions,
//! the registry entry, mounted panels) goes away when it is dropped.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::mpsc::{self, Receiver};

use crate::bridge::EventBridge;
use crate::bus::MessageBus;
use crate::commands::Cmd;
use crate::config::SharedConfig;
use crate::messages::GlanceMsg;
use crate::model::{EditorHost, PanelFactory, Synchronizer};
use crate::registry::{self, SessionId};
use crate::update::update;

pub struct GlanceSession {
    id: SessionId,
    synchronizer: Rc<RefCell<Synchronizer>>,
    inbox: Receiver<GlanceMsg>,
    _bridge: EventBridge,
}

impl GlanceSession {
    /// Create a session, subscribe it to `bus` and register it
    pub fn open(
        id: SessionId,
        bus: &MessageBus,
        config: SharedConfig,
        factory: Box<dyn PanelFactory>,
    ) -> Self {
        let (sender, inbox) = mpsc::channel();
        let synchronizer = Rc::new(RefCell::new(Synchronizer::new(
            config,
            factory,
            sender.clone(),
        )));
        let bridge = EventBridge::connect(bus, sender);
        registry::register(id, &synchronizer);
        tracing::info!(session = ?id, "glance session opened");

        Self {
            id,
            synchronizer,
            inbox,
            _bridge: bridge,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn synchronizer(&self) -> &Rc<RefCell<Synchronizer>> {
        &self.synchronizer
    }

    /// Process every queued message in delivery order
    ///
    /// Messages queued while pumping (viewer-change listeners firing during
    /// a mount) are processed in the same call.
    pub fn pump(&self, host: &mut dyn EditorHost) -> Cmd {
        let mut cmds = Vec::new();
        while let Ok(msg) = self.inbox.try_recv() {
            let mut sync = self.synchronizer.borrow_mut();
            if let Some(cmd) = update(&mut sync, host, msg) {
                cmds.push(cmd);
            }
        }
        Cmd::batch(cmds)
    }

    /// Feed a message directly, bypassing the bus
    pub fn dispatch(&self, host: &mut dyn EditorHost, msg: GlanceMsg) -> Cmd {
        let first = update(&mut self.synchronizer.borrow_mut(), host, msg);
        Cmd::batch(first.into_iter().chain(std::iter::once(self.pump(host))).collect())
    }
}

impl Drop for GlanceSession {
    fn drop(&mut self) {
        registry::unregister(self.id);
        tracing::info!(session = ?self.id, "glance session closed");
    }
}
