//! End-to-end scenarios against the public detector API.

use std::cell::RefCell;
use std::rc::Rc;

use gesturekit::{
    Contact, ContactId, DetectorState, Gesture, GestureConfig, GestureDetector, GestureKind,
    GestureTarget, SwipeDirection, TouchPhase,
};

fn contact(id: u32, x: i32, y: i32) -> Contact {
    Contact {
        id: ContactId(id),
        screen_x: x,
        screen_y: y,
        client_x: x,
        client_y: y,
        page_x: x,
        page_y: y,
    }
}

fn detector() -> GestureDetector {
    let mut detector = GestureDetector::new();
    detector.start_detecting();
    detector
}

#[test]
fn tap_then_double_tap_then_fresh_tap() {
    let mut d = detector();
    let mut seen: Vec<GestureKind> = Vec::new();

    for (id, t_down, t_up) in [(1, 0u64, 100u64), (2, 300, 350), (3, 500, 560)] {
        let c = contact(id, 105, 104);
        seen.extend(d.handle(TouchPhase::Start, t_down, &[c]).iter().map(Gesture::kind));
        seen.extend(d.handle(TouchPhase::End, t_up, &[c]).iter().map(Gesture::kind));
    }

    // Second release pairs with the first; the third starts over.
    assert_eq!(
        seen,
        vec![GestureKind::Tap, GestureKind::DoubleTap, GestureKind::Tap]
    );
    assert_eq!(d.state(), DetectorState::Idle);
}

#[test]
fn hold_episode_reports_start_moves_end() {
    let mut d = detector();

    d.handle(TouchPhase::Start, 0, &[contact(1, 50, 60)]);
    let deadline = d.next_deadline().expect("hold timer armed");
    let out = d.poll(deadline);
    assert_eq!(out.iter().map(Gesture::kind).collect::<Vec<_>>(), vec![GestureKind::HoldStart]);

    let mut kinds = Vec::new();
    kinds.extend(d.handle(TouchPhase::Move, deadline + 50, &[contact(1, 52, 60)]).iter().map(Gesture::kind));
    kinds.extend(d.handle(TouchPhase::Move, deadline + 90, &[contact(1, 53, 61)]).iter().map(Gesture::kind));
    kinds.extend(d.handle(TouchPhase::End, deadline + 120, &[contact(1, 53, 61)]).iter().map(Gesture::kind));

    assert_eq!(
        kinds,
        vec![GestureKind::HoldMove, GestureKind::HoldMove, GestureKind::HoldEnd]
    );
    assert_eq!(d.state(), DetectorState::Idle);
}

#[test]
fn drag_emits_pan_per_move_and_one_swipe() {
    let mut d = detector();

    d.handle(TouchPhase::Start, 0, &[contact(1, 0, 0)]);
    let mut pans = 0;
    let mut swipes = Vec::new();
    for (t, x) in [(50u64, 100), (80, 140), (110, 180)] {
        for gesture in d.handle(TouchPhase::Move, t, &[contact(1, x, 0)]).iter() {
            assert_eq!(gesture.kind(), GestureKind::Pan);
            pans += 1;
        }
    }
    for gesture in d.handle(TouchPhase::End, 140, &[contact(1, 180, 0)]).iter() {
        if let Gesture::Swipe(swipe) = gesture {
            swipes.push(*swipe);
        }
    }

    assert_eq!(pans, 3);
    assert_eq!(swipes.len(), 1);
    assert_eq!(swipes[0].direction, SwipeDirection::Right);
    assert_eq!(swipes[0].dx, 180);
    assert_eq!(swipes[0].dt_ms, 140);
}

#[test]
fn pinch_dispatches_through_a_target() {
    let mut d = detector();
    let mut target = GestureTarget::new();
    let scales = Rc::new(RefCell::new(Vec::new()));

    let sink = scales.clone();
    target.add_listener(GestureKind::Transform, move |gesture, _| {
        if let Gesture::Transform(transform) = gesture {
            sink.borrow_mut().push(transform.absolute.scale);
        }
    });

    d.handle(TouchPhase::Start, 0, &[contact(1, 0, 0)]);
    d.handle(TouchPhase::Start, 10, &[contact(2, 100, 0)]);
    let out = d.handle(TouchPhase::Move, 60, &[contact(2, 145, 0)]);
    target.dispatch_output(&out);
    let out = d.handle(TouchPhase::Move, 90, &[contact(2, 200, 0)]);
    target.dispatch_output(&out);

    assert_eq!(*scales.borrow(), vec![1.45, 2.0]);
}

#[test]
fn listener_can_cancel_a_gesture() {
    let mut d = detector();
    let mut target = GestureTarget::new();
    target.add_listener(GestureKind::Tap, |_, control| control.prevent_default());

    d.handle(TouchPhase::Start, 0, &[contact(1, 10, 10)]);
    let out = d.handle(TouchPhase::End, 50, &[contact(1, 10, 10)]);
    let tap = out.iter().next().expect("tap emitted");
    assert!(!target.dispatch(tap));
}

#[test]
fn custom_thresholds_change_classification() {
    let mut d = GestureDetector::with_config(GestureConfig {
        pan_threshold_px: 5.0,
        hold_interval_ms: 100,
        ..GestureConfig::default()
    });
    d.start_detecting();

    // 10 px exceeds the tightened pan threshold.
    d.handle(TouchPhase::Start, 0, &[contact(1, 0, 0)]);
    let out = d.handle(TouchPhase::Move, 20, &[contact(1, 10, 0)]);
    assert_eq!(out.iter().next().map(Gesture::kind), Some(GestureKind::Pan));

    // And the shortened hold interval fires quickly on the next press.
    d.handle(TouchPhase::End, 40, &[contact(1, 10, 0)]);
    d.handle(TouchPhase::Start, 1_000, &[contact(2, 0, 0)]);
    let out = d.poll(1_100);
    assert_eq!(
        out.iter().next().map(Gesture::kind),
        Some(GestureKind::HoldStart)
    );
}

#[test]
fn detached_detector_stays_silent() {
    let mut d = detector();
    d.handle(TouchPhase::Start, 0, &[contact(1, 0, 0)]);
    d.stop_detecting();

    assert!(d.poll(10_000).is_empty());
    assert!(d.handle(TouchPhase::End, 10_050, &[contact(1, 0, 0)]).is_empty());
    assert_eq!(d.next_deadline(), None);

    d.stop_detecting(); // idempotent
    assert_eq!(d.state(), DetectorState::Idle);
}
