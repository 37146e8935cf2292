//! Session, bus and registry tests

mod common;

use std::cell::RefCell;
use std::rc::Rc;

use common::Harness;
use glance::bridge::BRIDGED_TOPICS;
use glance::bus::MessageBus;
use glance::config::{GlanceConfig, SharedConfig};
use glance::messages::{GlanceMsg, HostEvent, Topic};
use glance::model::SlotStatus;
use glance::registry::{self, SessionId};
use glance::session::GlanceSession;
use glance::sim::{MemoryHost, PanelRecorder, RecordingFactory};

fn open_session(id: u64, bus: &MessageBus, recorder: &PanelRecorder) -> GlanceSession {
    GlanceSession::open(
        SessionId(id),
        bus,
        SharedConfig::new(GlanceConfig::default()),
        Box::new(RecordingFactory::new(recorder.clone())),
    )
}

#[test]
fn test_session_registers_and_unregisters() {
    let bus = MessageBus::new();
    let recorder = PanelRecorder::new();
    let session = open_session(7, &bus, &recorder);

    let found = registry::lookup(SessionId(7)).unwrap();
    assert!(Rc::ptr_eq(&found, session.synchronizer()));
    assert_eq!(registry::session_ids(), vec![SessionId(7)]);
    drop(found);

    drop(session);
    assert!(registry::lookup(SessionId(7)).is_none());
    assert!(registry::session_ids().is_empty());
}

#[test]
fn test_dropping_session_unsubscribes_everything() {
    let bus = MessageBus::new();
    let recorder = PanelRecorder::new();
    let session = open_session(1, &bus, &recorder);
    for topic in BRIDGED_TOPICS {
        assert_eq!(bus.subscriber_count(topic), 1);
    }

    drop(session);
    for topic in BRIDGED_TOPICS {
        assert_eq!(bus.subscriber_count(topic), 0);
    }
    // Nobody left to hear it
    bus.publish(&HostEvent::GlobalSettingsChanged);
}

#[test]
fn test_dropping_session_disposes_panels() {
    let mut h = Harness::new();
    let foo = h.open_text("foo.txt");
    let Harness {
        session, recorder, ..
    } = h;

    drop(session);
    assert_eq!(recorder.panels_for(foo)[0].dispose_calls, 1);
    assert_eq!(recorder.live_panel_count(), 0);
}

#[test]
fn test_sessions_are_independent() {
    let bus = MessageBus::new();
    let recorder = PanelRecorder::new();
    let first = open_session(1, &bus, &recorder);
    let second = open_session(2, &bus, &recorder);
    let mut host_a = MemoryHost::new();
    let mut host_b = MemoryHost::new();

    let editor = host_a.open_text("a.txt");
    bus.publish(&HostEvent::FileOpened {
        source: "test".into(),
        file: "a.txt".into(),
        editors: vec![editor],
    });
    first.pump(&mut host_a);
    second.pump(&mut host_b);

    assert_eq!(first.synchronizer().borrow().active_count(), 1);
    // Same event, but the second host has no such surface
    assert_eq!(second.synchronizer().borrow().active_count(), 0);
    assert_eq!(registry::session_ids(), vec![SessionId(1), SessionId(2)]);
}

#[test]
fn test_events_processed_in_delivery_order() {
    let mut h = Harness::new();
    let editor = h.host.open_text("foo.txt");
    let foo = common::surface_ids(&editor)[0];

    // Queue everything before pumping once
    h.bus.publish(&HostEvent::FileOpened {
        source: "test".into(),
        file: "foo.txt".into(),
        editors: vec![editor],
    });
    for _ in 0..2 {
        h.bus.publish(&HostEvent::LookAndFeelChanged {
            source: "test".into(),
        });
    }
    h.pump();

    // The second look-and-feel event saw the panel mounted before it
    assert_eq!(h.status(foo), SlotStatus::Active);
    assert_eq!(h.recorder.live_panel(foo).unwrap().refreshes, 1);
}

#[test]
fn test_dispatch_bypasses_bus() {
    let mut h = Harness::new();
    let editor = h.host.open_text("foo.txt");
    let foo = common::surface_ids(&editor)[0];

    h.session.dispatch(
        &mut h.host,
        GlanceMsg::EditorsOpened {
            file: "foo.txt".into(),
            editors: vec![editor],
        },
    );
    assert_eq!(h.status(foo), SlotStatus::Active);

    h.session
        .dispatch(&mut h.host, GlanceMsg::SurfacesReleased(vec![foo]));
    assert_eq!(h.status(foo), SlotStatus::Absent);
}

#[test]
fn test_unrelated_topics_reach_other_subscribers() {
    let h = Harness::new();
    let seen: Rc<RefCell<Vec<Topic>>> = Rc::default();
    let log = Rc::clone(&seen);
    let _sub = h.bus.subscribe(Topic::LookAndFeelChanged, move |event| {
        log.borrow_mut().push(event.topic())
    });

    h.bus.publish(&HostEvent::LookAndFeelChanged {
        source: "test".into(),
    });
    assert_eq!(*seen.borrow(), vec![Topic::LookAndFeelChanged]);
    assert_eq!(h.bus.subscriber_count(Topic::LookAndFeelChanged), 2);
}
