//! Event bridge between the host bus and a synchronizer
//!
//! Subscribes to the host topics the synchronizer cares about and queues a
//! normalized [`GlanceMsg`] for each notification. The subscriptions are
//! owned by the bridge, so dropping it disconnects from the bus.

use std::sync::mpsc::Sender;

use crate::bus::{MessageBus, Subscription};
use crate::messages::{GlanceMsg, HostEvent, Topic};

/// Topics a bridge listens on
pub const BRIDGED_TOPICS: [Topic; 4] = [
    Topic::FileOpened,
    Topic::GlobalSettingsChanged,
    Topic::LookAndFeelChanged,
    Topic::EditorReleased,
];

/// Map a raw host event to synchronizer input
pub fn normalize(event: &HostEvent) -> GlanceMsg {
    match event {
        HostEvent::FileOpened { file, editors, .. } => GlanceMsg::EditorsOpened {
            file: file.clone(),
            editors: editors.clone(),
        },
        HostEvent::GlobalSettingsChanged => GlanceMsg::SettingsChanged,
        HostEvent::LookAndFeelChanged { .. } => GlanceMsg::LafChanged,
        HostEvent::EditorReleased { surface } => GlanceMsg::SurfacesReleased(vec![*surface]),
    }
}

/// Live connection from the bus into one session's queue
#[derive(Debug)]
pub struct EventBridge {
    _subscriptions: Vec<Subscription>,
}

impl EventBridge {
    pub fn connect(bus: &MessageBus, sender: Sender<GlanceMsg>) -> Self {
        let subscriptions = BRIDGED_TOPICS
            .iter()
            .map(|topic| {
                let sender = sender.clone();
                bus.subscribe(*topic, move |event| {
                    if sender.send(normalize(event)).is_err() {
                        tracing::debug!(topic = ?event.topic(), "Session queue closed, event dropped");
                    }
                })
            })
            .collect();

        Self {
            _subscriptions: subscriptions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SurfaceId;
    use std::sync::mpsc;

    #[test]
    fn test_normalize_maps_every_event() {
        assert!(matches!(
            normalize(&HostEvent::GlobalSettingsChanged),
            GlanceMsg::SettingsChanged
        ));
        assert!(matches!(
            normalize(&HostEvent::LookAndFeelChanged {
                source: "laf".into()
            }),
            GlanceMsg::LafChanged
        ));
        match normalize(&HostEvent::EditorReleased {
            surface: SurfaceId(4),
        }) {
            GlanceMsg::SurfacesReleased(surfaces) => assert_eq!(surfaces, vec![SurfaceId(4)]),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_bridge_forwards_in_order_and_disconnects_on_drop() {
        let bus = MessageBus::new();
        let (tx, rx) = mpsc::channel();
        let bridge = EventBridge::connect(&bus, tx);

        bus.publish(&HostEvent::GlobalSettingsChanged);
        bus.publish(&HostEvent::LookAndFeelChanged {
            source: "laf".into(),
        });
        let received: Vec<_> = rx.try_iter().collect();
        assert!(matches!(received[0], GlanceMsg::SettingsChanged));
        assert!(matches!(received[1], GlanceMsg::LafChanged));

        drop(bridge);
        for topic in BRIDGED_TOPICS {
            assert_eq!(bus.subscriber_count(topic), 0);
        }
        bus.publish(&HostEvent::GlobalSettingsChanged);
        assert!(rx.try_recv().is_err());
    }
}
