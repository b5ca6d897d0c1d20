//! Gesture-recognition state machine and the public detector API.
//!
//! Raw touch events enter through [`GestureDetector::handle`]; each changed
//! contact is applied independently to the active state. States that define
//! no arm for an event simply ignore it. The hold timeout is a stored
//! deadline routed into whichever state is active at fire time, so a state
//! cancels a stale timer by not matching it rather than by explicit
//! bookkeeping on every transition.

use statig::{blocking::IntoStateMachineExt as _, prelude::*};

use crate::config::GestureConfig;
use crate::contact::{Contact, ContactId, Sample, TouchPhase};
use crate::geometry;
use crate::gesture::{
    Gesture, PanDelta, SwipeDirection, SwipeGesture, TransformDelta, TransformGesture,
};
use crate::session::SessionState;
use crate::timer::{TimerId, TimerService};

#[derive(Clone, Copy, Debug)]
enum FsmEvent {
    Touch {
        phase: TouchPhase,
        contact: Contact,
        now_ms: u64,
    },
    HoldTimeout {
        now_ms: u64,
    },
    /// Detach: discard the session and return to idle from any state.
    Reset,
}

/// Gestures recognized by one `handle`/`poll` call.
#[derive(Clone, Copy, Debug, Default)]
pub struct GestureOutput {
    pub events: [Option<Gesture>; 4],
}

impl GestureOutput {
    pub fn iter(&self) -> impl Iterator<Item = &Gesture> + '_ {
        self.events.iter().flatten()
    }

    pub fn is_empty(&self) -> bool {
        self.events.iter().all(Option::is_none)
    }
}

/// Per-call working context: the emission buffer plus the timer slot, which
/// lives in the detector between calls and is threaded through dispatch.
#[derive(Default)]
struct DispatchContext {
    events: [Option<Gesture>; 4],
    timers: TimerService,
}

impl DispatchContext {
    fn emit(&mut self, gesture: Gesture) {
        log::debug!("emit {:?}", gesture.kind());
        for slot in &mut self.events {
            if slot.is_none() {
                *slot = Some(gesture);
                return;
            }
        }
    }

    fn finish(self) -> (GestureOutput, TimerService) {
        (GestureOutput { events: self.events }, self.timers)
    }
}

/// Tag of the active state, exposed for hosts and tests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DetectorState {
    Idle,
    TouchStarted,
    PanStarted,
    Hold,
    Transform,
    AfterTransform,
}

struct GestureHsm {
    config: GestureConfig,
    session: SessionState,
}

impl GestureHsm {
    fn new(config: GestureConfig) -> Self {
        Self {
            config,
            session: SessionState::default(),
        }
    }

    /// Seed a fresh single-contact episode and arm the hold timeout.
    fn begin_touch(&mut self, context: &mut DispatchContext, contact: &Contact, now_ms: u64) {
        self.session.reset();
        let start = Sample::of(contact, now_ms);
        self.session.touch1 = Some(contact.id);
        self.session.start = start;
        self.session.last = start;
        context
            .timers
            .start(TimerId::HoldTimeout, now_ms + self.config.hold_interval_ms);
        log::trace!("touch begin id={:?}", contact.id);
    }

    /// Seed transform baselines against the tracked primary contact.
    fn begin_transform(&mut self, contact: &Contact, now_ms: u64) {
        let second = Sample::of(contact, now_ms);
        self.session.touch2 = Some(contact.id);
        self.session.last2 = Some(second);
        let dist = geometry::distance(&self.session.last, &second);
        let ang = geometry::angle_deg(&self.session.last, &second);
        self.session.start_distance = dist;
        self.session.last_distance = dist;
        self.session.start_angle = ang;
        self.session.last_angle = ang;
        self.session.scaled = false;
        self.session.rotated = false;
        log::trace!("transform begin distance={dist} angle={ang}");
    }

    /// Emit one pan step for the tracked contact and roll the velocity EMA.
    fn pan_move(&mut self, context: &mut DispatchContext, contact: &Contact, now_ms: u64) {
        let current = Sample::of(contact, now_ms);
        let absolute = PanDelta {
            dx: current.screen_x - self.session.start.screen_x,
            dy: current.screen_y - self.session.start.screen_y,
        };
        let relative = PanDelta {
            dx: current.screen_x - self.session.last.screen_x,
            dy: current.screen_y - self.session.last.screen_y,
        };
        context.emit(Gesture::Pan { absolute, relative });
        let dt_ms = now_ms.saturating_sub(self.session.last.time_stamp);
        self.session.velocity.update(
            relative.dx as f32,
            relative.dy as f32,
            dt_ms,
            self.config.velocity_smoothing,
        );
        self.session.last = current;
    }

    fn finish_tap(
        &mut self,
        context: &mut DispatchContext,
        contact: &Contact,
        now_ms: u64,
    ) -> Outcome<State> {
        let start = self.session.start;
        match self.session.last_tap {
            Some(prev) if geometry::is_double_tap(&prev, &start, &self.config) => {
                context.emit(Gesture::DoubleTap { at: start });
                self.session.last_tap = None;
            }
            _ => {
                context.emit(Gesture::Tap { at: start });
                self.session.last_tap = Some(Sample::of(contact, now_ms));
            }
        }
        self.back_to_idle()
    }

    fn finish_swipe(
        &mut self,
        context: &mut DispatchContext,
        contact: &Contact,
        now_ms: u64,
    ) -> Outcome<State> {
        let end = Sample::of(contact, now_ms);
        let dx = end.screen_x - self.session.start.screen_x;
        let dy = end.screen_y - self.session.start.screen_y;
        let angle_deg = (dy as f32).atan2(dx as f32).to_degrees();
        context.emit(Gesture::Swipe(SwipeGesture {
            start: self.session.start,
            end,
            dx,
            dy,
            dt_ms: now_ms.saturating_sub(self.session.start.time_stamp),
            vx: self.session.velocity.vx,
            vy: self.session.velocity.vy,
            direction: SwipeDirection::from_angle(angle_deg),
            angle_deg,
        }));
        self.back_to_idle()
    }

    fn transform_move(&mut self, context: &mut DispatchContext, contact: &Contact, now_ms: u64) {
        let current = Sample::of(contact, now_ms);
        if self.session.is_primary(contact.id) {
            self.session.last = current;
        } else {
            self.session.last2 = Some(current);
        }
        let first = self.session.last;
        let Some(second) = self.session.last2 else {
            return;
        };

        let mut dist = geometry::distance(&first, &second);
        let mut ang = geometry::angle_deg(&first, &second);

        // Hysteresis: each dimension stays pinned to its baseline until its
        // activation threshold is crossed, and never deactivates afterwards.
        if !self.session.scaled {
            if (dist - self.session.start_distance).abs() > self.config.scale_threshold_px {
                self.session.scaled = true;
            } else {
                dist = self.session.start_distance;
            }
        }
        if !self.session.rotated {
            if (ang - self.session.start_angle).abs() > self.config.rotate_threshold_deg {
                self.session.rotated = true;
            } else {
                ang = self.session.start_angle;
            }
        }

        if self.session.scaled || self.session.rotated {
            context.emit(Gesture::Transform(TransformGesture {
                absolute: TransformDelta {
                    scale: ratio(dist, self.session.start_distance),
                    rotate: ang - self.session.start_angle,
                },
                relative: TransformDelta {
                    scale: ratio(dist, self.session.last_distance),
                    rotate: ang - self.session.last_angle,
                },
                midpoint: geometry::midpoint(&first, &second),
            }));
            self.session.last_distance = dist;
            self.session.last_angle = ang;
        }
    }

    /// Drop one finger of a transform, promoting the secondary if the
    /// primary lifted.
    fn drop_transform_contact(&mut self, id: ContactId) {
        if self.session.touch1 == Some(id) {
            self.session.touch1 = self.session.touch2.take();
            if let Some(second) = self.session.last2.take() {
                self.session.last = second;
            }
        } else {
            self.session.touch2 = None;
            self.session.last2 = None;
        }
    }

    fn back_to_idle(&mut self) -> Outcome<State> {
        self.session.reset();
        Transition(State::idle())
    }

    fn detach(&mut self, context: &mut DispatchContext) -> Outcome<State> {
        context.timers.clear_all();
        self.session.discard();
        Transition(State::idle())
    }
}

fn ratio(numerator: f32, denominator: f32) -> f32 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        1.0
    }
}

#[state_machine(initial = "State::idle()")]
impl GestureHsm {
    #[state]
    fn idle(&mut self, context: &mut DispatchContext, event: &FsmEvent) -> Outcome<State> {
        match event {
            FsmEvent::Touch {
                phase: TouchPhase::Start,
                contact,
                now_ms,
            } => {
                self.begin_touch(context, contact, *now_ms);
                Transition(State::touch_started())
            }
            FsmEvent::Reset => self.detach(context),
            _ => Handled,
        }
    }

    #[state]
    fn touch_started(
        &mut self,
        context: &mut DispatchContext,
        event: &FsmEvent,
    ) -> Outcome<State> {
        match event {
            FsmEvent::Touch {
                phase,
                contact,
                now_ms,
            } => match phase {
                TouchPhase::Start if !self.session.is_tracked(contact.id) => {
                    context.timers.clear(TimerId::HoldTimeout);
                    self.begin_transform(contact, *now_ms);
                    Transition(State::transform())
                }
                TouchPhase::Move if self.session.is_primary(contact.id) => {
                    let dx = (contact.screen_x - self.session.start.screen_x).abs() as f32;
                    let dy = (contact.screen_y - self.session.start.screen_y).abs() as f32;
                    if dx > self.config.pan_threshold_px || dy > self.config.pan_threshold_px {
                        context.timers.clear(TimerId::HoldTimeout);
                        self.pan_move(context, contact, *now_ms);
                        Transition(State::pan_started())
                    } else {
                        Handled
                    }
                }
                TouchPhase::End if self.session.is_primary(contact.id) => {
                    context.timers.clear(TimerId::HoldTimeout);
                    self.finish_tap(context, contact, *now_ms)
                }
                TouchPhase::Cancel if self.session.is_primary(contact.id) => {
                    context.timers.clear(TimerId::HoldTimeout);
                    self.back_to_idle()
                }
                _ => Handled,
            },
            FsmEvent::HoldTimeout { now_ms } => {
                log::trace!("hold timeout at {now_ms}");
                context.emit(Gesture::HoldStart {
                    at: self.session.start,
                });
                Transition(State::hold())
            }
            FsmEvent::Reset => self.detach(context),
        }
    }

    #[state]
    fn pan_started(&mut self, context: &mut DispatchContext, event: &FsmEvent) -> Outcome<State> {
        match event {
            FsmEvent::Touch {
                phase,
                contact,
                now_ms,
            } => match phase {
                TouchPhase::Move if self.session.is_primary(contact.id) => {
                    self.pan_move(context, contact, *now_ms);
                    Handled
                }
                TouchPhase::End if self.session.is_primary(contact.id) => {
                    self.finish_swipe(context, contact, *now_ms)
                }
                TouchPhase::Cancel if self.session.is_primary(contact.id) => self.back_to_idle(),
                _ => Handled,
            },
            FsmEvent::Reset => self.detach(context),
            _ => Handled,
        }
    }

    #[state]
    fn hold(&mut self, context: &mut DispatchContext, event: &FsmEvent) -> Outcome<State> {
        match event {
            FsmEvent::Touch {
                phase,
                contact,
                now_ms,
            } => match phase {
                TouchPhase::Move if self.session.is_primary(contact.id) => {
                    let current = Sample::of(contact, *now_ms);
                    context.emit(Gesture::HoldMove { at: current });
                    self.session.last = current;
                    Handled
                }
                TouchPhase::End if self.session.is_primary(contact.id) => {
                    context.emit(Gesture::HoldEnd {
                        at: Sample::of(contact, *now_ms),
                    });
                    self.back_to_idle()
                }
                TouchPhase::Cancel if self.session.is_primary(contact.id) => self.back_to_idle(),
                _ => Handled,
            },
            FsmEvent::Reset => self.detach(context),
            _ => Handled,
        }
    }

    #[state]
    fn transform(&mut self, context: &mut DispatchContext, event: &FsmEvent) -> Outcome<State> {
        match event {
            FsmEvent::Touch {
                phase,
                contact,
                now_ms,
            } => match phase {
                TouchPhase::Move if self.session.is_tracked(contact.id) => {
                    self.transform_move(context, contact, *now_ms);
                    Handled
                }
                TouchPhase::End | TouchPhase::Cancel if self.session.is_tracked(contact.id) => {
                    self.drop_transform_contact(contact.id);
                    Transition(State::after_transform())
                }
                _ => Handled,
            },
            FsmEvent::Reset => self.detach(context),
            _ => Handled,
        }
    }

    #[state]
    fn after_transform(
        &mut self,
        context: &mut DispatchContext,
        event: &FsmEvent,
    ) -> Outcome<State> {
        match event {
            FsmEvent::Touch {
                phase,
                contact,
                now_ms,
            } => match phase {
                // A new contact restarts the transform with fresh baselines
                // against the surviving finger.
                TouchPhase::Start if !self.session.is_tracked(contact.id) => {
                    self.begin_transform(contact, *now_ms);
                    Transition(State::transform())
                }
                TouchPhase::End | TouchPhase::Cancel if self.session.is_primary(contact.id) => {
                    self.back_to_idle()
                }
                _ => Handled,
            },
            FsmEvent::Reset => self.detach(context),
            _ => Handled,
        }
    }
}

/// Classifies a raw touch-contact stream into semantic gestures.
///
/// One detector serves one input target; independent detectors share no
/// state. All work is synchronous on the caller's thread, and time is
/// whatever the host's event timestamps say it is.
pub struct GestureDetector {
    machine: statig::blocking::StateMachine<GestureHsm>,
    timers: TimerService,
    detecting: bool,
}

impl Default for GestureDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureDetector {
    pub fn new() -> Self {
        Self::with_config(GestureConfig::default())
    }

    pub fn with_config(config: GestureConfig) -> Self {
        Self {
            machine: GestureHsm::new(config).state_machine(),
            timers: TimerService::default(),
            detecting: false,
        }
    }

    /// Arm the detector. Idempotent; a second call changes nothing.
    pub fn start_detecting(&mut self) {
        self.detecting = true;
    }

    /// Disarm the detector: cancels any outstanding hold timer and discards
    /// the session, so no stale timer or state survives the detach.
    /// Idempotent.
    pub fn stop_detecting(&mut self) {
        if !self.detecting {
            return;
        }
        self.detecting = false;
        let mut context = DispatchContext {
            events: Default::default(),
            timers: std::mem::take(&mut self.timers),
        };
        self.machine.handle_with_context(&FsmEvent::Reset, &mut context);
        let (_, timers) = context.finish();
        self.timers = timers;
    }

    pub fn is_detecting(&self) -> bool {
        self.detecting
    }

    /// Apply one raw touch event. A hold deadline due at or before the event
    /// timestamp fires first, then each changed contact is dispatched
    /// independently. Returns every gesture recognized by this call; while
    /// the detector is stopped the event is ignored.
    pub fn handle(
        &mut self,
        phase: TouchPhase,
        time_stamp: u64,
        changed: &[Contact],
    ) -> GestureOutput {
        if !self.detecting {
            return GestureOutput::default();
        }
        let mut context = DispatchContext {
            events: Default::default(),
            timers: std::mem::take(&mut self.timers),
        };
        if let Some(TimerId::HoldTimeout) = context.timers.fire_due(time_stamp) {
            self.machine.handle_with_context(
                &FsmEvent::HoldTimeout { now_ms: time_stamp },
                &mut context,
            );
        }
        for contact in changed {
            self.machine.handle_with_context(
                &FsmEvent::Touch {
                    phase,
                    contact: *contact,
                    now_ms: time_stamp,
                },
                &mut context,
            );
        }
        let (output, timers) = context.finish();
        self.timers = timers;
        output
    }

    /// Drive the hold deadline on a quiet input stream.
    pub fn poll(&mut self, now_ms: u64) -> GestureOutput {
        if !self.detecting {
            return GestureOutput::default();
        }
        let mut context = DispatchContext {
            events: Default::default(),
            timers: std::mem::take(&mut self.timers),
        };
        if let Some(TimerId::HoldTimeout) = context.timers.fire_due(now_ms) {
            self.machine
                .handle_with_context(&FsmEvent::HoldTimeout { now_ms }, &mut context);
        }
        let (output, timers) = context.finish();
        self.timers = timers;
        output
    }

    /// When the pending hold timeout is due, if any. Hosts with real clocks
    /// schedule their next `poll` here.
    pub fn next_deadline(&self) -> Option<u64> {
        self.timers.deadline()
    }

    pub fn state(&self) -> DetectorState {
        match self.machine.state() {
            State::Idle {} => DetectorState::Idle,
            State::TouchStarted {} => DetectorState::TouchStarted,
            State::PanStarted {} => DetectorState::PanStarted,
            State::Hold {} => DetectorState::Hold,
            State::Transform {} => DetectorState::Transform,
            State::AfterTransform {} => DetectorState::AfterTransform,
        }
    }
}
