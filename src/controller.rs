//! The panels offset controller
//!
//! `PanelsController` is the single stateful object of the engine. It owns
//! the center panel offset, the resolved geometry, the per-side lock
//! states, the gesture session, the at-most-one in-flight animation, and
//! the listener registries. Every offset mutation, whether it comes from a
//! drag, an animation tick, a lock change, or a programmatic open/close,
//! funnels through [`PanelsController::commit_offset`], which re-derives
//! both side panel states and notifies listeners whose state changed.
//!
//! The controller is single-threaded and never blocks: pointer events and
//! frame ticks arrive serially from the host, and listener callbacks run
//! synchronously from the commit. A listener must not re-enter the
//! controller; the borrow rules make that structurally impossible with a
//! direct reference, and hosts that route through shared cells carry the
//! same obligation as a contract.

use std::time::Duration;

use tracing::{debug, trace};

use crate::animation::{Easing, OffsetAnimation};
use crate::config::{LayoutDirection, PanelsConfig};
use crate::geometry::{
    self, non_full_screen_side_panel_width, PanelGeometry, Rect, Viewport,
};
use crate::gesture::{point_in_regions, GestureClassifier, PointerEvent, PointerKind};
use crate::listener::{ListenerId, StateListeners};
use crate::state::{
    end_panel_state, start_panel_state, LockState, Panel, PanelState, Side, SwipeDirection,
};

/// Whether the engine claimed a pointer event or passed it to children
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventClaim {
    Claimed,
    Passed,
}

impl EventClaim {
    pub fn is_claimed(&self) -> bool {
        matches!(self, EventClaim::Claimed)
    }
}

/// Exactly one deferred programmatic call, retained while geometry is
/// unknown; a newer call replaces an older one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PendingUpdate {
    OpenStart { fling: bool },
    OpenEnd { fling: bool },
    Close { fling: bool },
}

/// Gesture-to-state translation engine for a three-panel layout
pub struct PanelsController {
    config: PanelsConfig,
    direction: LayoutDirection,

    viewport: Option<Viewport>,
    geometry: PanelGeometry,
    use_full_width_start: bool,

    /// Horizontal displacement of the center panel from rest
    offset: f32,
    animation: Option<OffsetAnimation>,
    /// End value of the current or last animation, consulted by the
    /// resize re-open rule before the animation completes
    animation_end_x: f32,

    selected_panel: Panel,
    start_lock: LockState,
    end_lock: LockState,
    start_state: PanelState,
    end_state: PanelState,

    pending: Option<PendingUpdate>,
    exclusion_regions: Vec<Rect>,

    session: GestureClassifier,
    /// Difference between the offset and the down event's raw x, keeps
    /// the panel anchored under the finger for the whole drag
    center_diff_x: f32,

    start_listeners: StateListeners,
    end_listeners: StateListeners,
}

impl PanelsController {
    /// Create a controller with no geometry yet
    ///
    /// Programmatic open/close calls made before [`Self::set_viewport`] or
    /// the width-report entry points establish geometry are deferred and
    /// replayed once.
    pub fn new(config: PanelsConfig, direction: LayoutDirection) -> Self {
        Self {
            config,
            direction,
            viewport: None,
            geometry: PanelGeometry::default(),
            use_full_width_start: false,
            offset: 0.0,
            animation: None,
            animation_end_x: 0.0,
            selected_panel: Panel::Center,
            start_lock: LockState::Unlocked,
            end_lock: LockState::Unlocked,
            start_state: PanelState::Closed,
            end_state: PanelState::Closed,
            pending: None,
            exclusion_regions: Vec::new(),
            session: GestureClassifier::new(),
            center_diff_x: 0.0,
            start_listeners: StateListeners::new(),
            end_listeners: StateListeners::new(),
        }
    }

    // === Queries ===

    pub fn config(&self) -> &PanelsConfig {
        &self.config
    }

    pub fn layout_direction(&self) -> LayoutDirection {
        self.direction
    }

    /// Current center panel offset
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// The panel the center offset currently rests at (or last rested at)
    pub fn selected_panel(&self) -> Panel {
        self.selected_panel
    }

    pub fn panel_state(&self, side: Side) -> PanelState {
        match side {
            Side::Start => self.start_state,
            Side::End => self.end_state,
        }
    }

    pub fn lock_state(&self, side: Side) -> LockState {
        match side {
            Side::Start => self.start_lock,
            Side::End => self.end_lock,
        }
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Offset bounds once geometry is established
    pub fn offset_bounds(&self) -> Option<(f32, f32)> {
        self.geometry.bounds()
    }

    /// Width the host should give the start panel, once the viewport is known
    pub fn desired_start_panel_width(&self) -> Option<f32> {
        let viewport = self.viewport?;
        Some(if self.use_full_width_start {
            viewport.width
        } else {
            non_full_screen_side_panel_width(viewport, &self.config)
        })
    }

    /// Width the host should give the end panel, once the viewport is known
    pub fn desired_end_panel_width(&self) -> Option<f32> {
        let viewport = self.viewport?;
        Some(non_full_screen_side_panel_width(viewport, &self.config))
    }

    // === Configuration ===

    /// Report the viewport size; applies the desired widths for both side
    /// panels, establishing geometry on the first call
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = Some(viewport);
        if let Some(width) = self.desired_start_panel_width() {
            self.update_start_panel_width(width);
        }
        if let Some(width) = self.desired_end_panel_width() {
            self.update_end_panel_width(width);
        }
    }

    /// Report a new measured start panel width
    ///
    /// If the start panel was fully open (or animating toward fully open)
    /// at the previous width, the panel re-opens toward the new value so a
    /// resize never leaves it partially revealed.
    pub fn update_start_panel_width(&mut self, measured: f32) {
        let previous = self.geometry.start_open_x;
        let open_x = geometry::start_open_x(
            measured,
            self.config.margin_between_panels_px,
            self.direction,
        );
        self.geometry.start_open_x = Some(open_x);
        trace!(target: "panels", open_x, "start panel width update");
        if let Some(previous) = previous {
            if previous != open_x && (self.offset == previous || self.animation_end_x == previous)
            {
                self.open_start();
            }
        }
        self.replay_pending_if_ready();
    }

    /// Report a new measured end panel width; same re-open rule as
    /// [`Self::update_start_panel_width`]
    pub fn update_end_panel_width(&mut self, measured: f32) {
        let previous = self.geometry.end_open_x;
        let open_x = geometry::end_open_x(
            measured,
            self.config.margin_between_panels_px,
            self.direction,
        );
        self.geometry.end_open_x = Some(open_x);
        trace!(target: "panels", open_x, "end panel width update");
        if let Some(previous) = previous {
            if previous != open_x && (self.offset == previous || self.animation_end_x == previous)
            {
                self.open_end();
            }
        }
        self.replay_pending_if_ready();
    }

    /// Toggle the full-viewport-width override for the start panel
    pub fn set_full_width_start(&mut self, use_full_width: bool) {
        self.use_full_width_start = use_full_width;
        if let Some(width) = self.desired_start_panel_width() {
            self.update_start_panel_width(width);
        }
    }

    /// Replace the exclusion regions where child content owns gestures
    pub fn set_exclusion_regions(&mut self, regions: Vec<Rect>) {
        self.exclusion_regions = regions;
    }

    /// Set a side's lock state; `Open` immediately opens that side
    pub fn set_lock_state(&mut self, side: Side, lock: LockState) {
        debug!(target: "panels", ?side, ?lock, "lock state change");
        match side {
            Side::Start => self.start_lock = lock,
            Side::End => self.end_lock = lock,
        }
        if lock == LockState::Open {
            match side {
                Side::Start => self.open_start(),
                Side::End => self.open_end(),
            }
        }
    }

    // === Listeners ===

    /// Register a state-change observer; returns the handle for removal
    pub fn register_state_listener(
        &mut self,
        side: Side,
        callback: impl FnMut(PanelState) + 'static,
    ) -> ListenerId {
        match side {
            Side::Start => self.start_listeners.register(callback),
            Side::End => self.end_listeners.register(callback),
        }
    }

    /// Remove a previously registered observer
    pub fn unregister_state_listener(&mut self, side: Side, id: ListenerId) -> bool {
        match side {
            Side::Start => self.start_listeners.unregister(id),
            Side::End => self.end_listeners.unregister(id),
        }
    }

    // === Programmatic open/close ===

    pub fn open_start(&mut self) {
        self.open_start_with(false);
    }

    pub fn open_end(&mut self) {
        self.open_end_with(false);
    }

    pub fn close(&mut self) {
        self.close_with(false);
    }

    fn open_start_with(&mut self, fling: bool) {
        let Some(target) = self.geometry.start_open_x.filter(|_| self.geometry.established())
        else {
            self.pending = Some(PendingUpdate::OpenStart { fling });
            return;
        };
        if self.start_lock == LockState::Open {
            // Locked open bypasses animation and snaps.
            self.cancel_animation();
            self.animation_end_x = target;
            self.commit_offset(target);
        } else {
            self.animate_to(target, fling, self.config.open_duration_ms);
        }
    }

    fn open_end_with(&mut self, fling: bool) {
        let Some(target) = self.geometry.end_open_x.filter(|_| self.geometry.established())
        else {
            self.pending = Some(PendingUpdate::OpenEnd { fling });
            return;
        };
        if self.end_lock == LockState::Open {
            self.cancel_animation();
            self.animation_end_x = target;
            self.commit_offset(target);
        } else {
            self.animate_to(target, fling, self.config.open_duration_ms);
        }
    }

    fn close_with(&mut self, fling: bool) {
        if !self.geometry.established() {
            self.pending = Some(PendingUpdate::Close { fling });
            return;
        }
        self.animate_to(0.0, fling, self.config.close_duration_ms);
    }

    fn replay_pending_if_ready(&mut self) {
        if !self.geometry.established() {
            return;
        }
        if let Some(pending) = self.pending.take() {
            debug!(target: "panels", ?pending, "replaying deferred call");
            match pending {
                PendingUpdate::OpenStart { fling } => self.open_start_with(fling),
                PendingUpdate::OpenEnd { fling } => self.open_end_with(fling),
                PendingUpdate::Close { fling } => self.close_with(fling),
            }
        }
    }

    // === External state mirroring ===

    /// Apply a side panel state from an external store
    ///
    /// Diffs against the cached internal state and only triggers a
    /// transition when they disagree, so mirroring state back into the
    /// engine never loops.
    pub fn apply_external_state(&mut self, side: Side, state: PanelState) {
        let previous = self.panel_state(side);
        match (state, previous) {
            (PanelState::Opened { .. }, PanelState::Opened { .. }) => {}
            (PanelState::Opened { .. }, _) => match side {
                Side::Start => self.open_start(),
                Side::End => self.open_end(),
            },
            (PanelState::Closed, PanelState::Opened { .. }) => self.close(),
            _ => {}
        }
        match side {
            Side::Start => self.start_state = state,
            Side::End => self.end_state = state,
        }
    }

    // === Pointer stream ===

    /// Feed one pointer event through the engine
    ///
    /// Returns whether the engine claimed the event; a passed event should
    /// be delivered to child content by the host.
    pub fn handle_pointer_event(&mut self, event: &PointerEvent) -> EventClaim {
        match event.kind {
            PointerKind::Down => self.handle_down(event),
            PointerKind::Move => self.handle_move(event),
            PointerKind::Up | PointerKind::Cancel => self.handle_release(event),
        }
    }

    fn handle_down(&mut self, event: &PointerEvent) -> EventClaim {
        let down_on_closed_center = self.is_touch_on_closed_center(event);
        let is_home_gesture = self.is_home_system_gesture(event);
        self.center_diff_x = self.offset - event.raw_x;
        self.session.begin(event, down_on_closed_center, is_home_gesture);

        // While a side panel is fully open, the still-visible strip of the
        // center panel is non-interactive: the whole sequence is claimed so
        // child views under it never see it.
        if down_on_closed_center {
            EventClaim::Claimed
        } else {
            EventClaim::Passed
        }
    }

    fn handle_move(&mut self, event: &PointerEvent) -> EventClaim {
        if self.session.is_home_gesture() {
            return EventClaim::Passed;
        }
        if !self.session.is_active() {
            return EventClaim::Passed;
        }

        let claimed_now =
            self.session
                .observe_move(event, self.config.scroll_slop_px, &self.exclusion_regions);
        if claimed_now {
            // A fresh gesture claim supersedes any in-flight animation.
            self.cancel_animation();
        }

        if !self.session.is_panning() && !self.session.down_on_closed_center() {
            return EventClaim::Passed;
        }
        if !self.session.is_panning()
            && point_in_regions(&self.exclusion_regions, event.raw_x, event.raw_y)
        {
            return EventClaim::Passed;
        }

        self.session
            .resolve_swipe_direction(event, self.config.scroll_slop_px);
        self.session.track(event);
        self.apply_move(event.raw_x);
        EventClaim::Claimed
    }

    fn handle_release(&mut self, event: &PointerEvent) -> EventClaim {
        if self.session.is_home_gesture() {
            self.session.finish();
            return EventClaim::Passed;
        }
        let claimed = self.session.is_panning() || self.session.down_on_closed_center();
        if claimed {
            if self
                .session
                .is_tap_on_closed_center(event, self.config.scroll_slop_px)
            {
                debug!(target: "gesture", "tap on closed center, closing panels");
                self.close();
            } else {
                self.session.track(event);
                let velocity = self.session.x_velocity();
                let targeted = self.targeted_x(event.raw_x);
                self.snap_open_or_close(velocity, targeted);
            }
        }
        self.session.finish();
        if claimed {
            EventClaim::Claimed
        } else {
            EventClaim::Passed
        }
    }

    // === Offset math ===

    /// Pointer-relative target: keeps the panel anchored under the finger
    fn targeted_x(&self, raw_x: f32) -> f32 {
        raw_x + self.center_diff_x
    }

    /// Clamp a targeted offset into the allowed translation range
    ///
    /// A side locked `Open` forces its open value (start takes precedence
    /// over end). Otherwise each visual side contributes its open value as
    /// a bound, unless that side is locked `Close` or the gesture started
    /// centered and the resolved swipe direction argues against reopening
    /// it.
    pub fn normalize(&self, targeted_x: f32) -> f32 {
        if !targeted_x.is_finite() {
            return 0.0;
        }
        let Some((min_bound, max_bound)) = self.geometry.bounds() else {
            return 0.0;
        };
        if self.start_lock == LockState::Open {
            return self.geometry.start_open_x.unwrap_or(0.0);
        }
        if self.end_lock == LockState::Open {
            return self.geometry.end_open_x.unwrap_or(0.0);
        }

        let swipe = self.session.swipe_direction();
        let max_x = if self.left_lock() == LockState::Close
            || (self.selected_panel == Panel::Center && swipe == Some(SwipeDirection::Left))
        {
            0.0
        } else {
            max_bound
        };
        let min_x = if self.right_lock() == LockState::Close
            || (self.selected_panel == Panel::Center && swipe == Some(SwipeDirection::Right))
        {
            0.0
        } else {
            min_bound
        };

        targeted_x.clamp(min_x, max_x)
    }

    /// Commit a drag move, filtering sub-dip jitter
    ///
    /// Fingers are never perfectly still; without the filter a one-pixel
    /// wobble flips the derived state between Opening and Closing. The
    /// canonical rest positions always commit so a fully-reached rest
    /// position is never missed.
    fn apply_move(&mut self, raw_x: f32) {
        let normalized = self.normalize(self.targeted_x(raw_x));
        let at_rest_position = normalized == 0.0
            || Some(normalized) == self.geometry.start_open_x
            || Some(normalized) == self.geometry.end_open_x;
        if at_rest_position || (normalized - self.offset).abs() > self.config.density {
            self.commit_offset(normalized);
        }
    }

    /// Resolve a release into one of the three canonical rest positions
    fn snap_open_or_close(&mut self, px_per_second: f32, targeted_x: f32) {
        let is_fling = px_per_second.abs() > self.config.min_fling_px_per_second;
        let is_direction_start_to_end = if self.direction.is_ltr() {
            px_per_second > 0.0
        } else {
            px_per_second < 0.0
        };
        debug!(
            target: "panels",
            px_per_second,
            targeted_x,
            is_fling,
            "release"
        );

        if is_fling {
            if is_direction_start_to_end {
                match self.selected_panel {
                    Panel::End => return self.close_with(true),
                    Panel::Center => return self.open_start_with(true),
                    Panel::Start => {}
                }
            } else {
                match self.selected_panel {
                    Panel::Start => return self.close_with(true),
                    Panel::Center => return self.open_end_with(true),
                    Panel::End => {}
                }
            }
        }

        let Some((min_x, max_x)) = self.geometry.bounds() else {
            return;
        };

        // Past a quarter of the travel distance the panel stays open:
        // the thresholds are half of each open value, not a midpoint
        // between rest positions.
        if targeted_x > max_x / 2.0 {
            self.open_panel(self.left_panel());
        } else if targeted_x < min_x / 2.0 {
            self.open_panel(self.right_panel());
        } else {
            self.close_with(false);
        }
    }

    fn open_panel(&mut self, panel: Panel) {
        match panel {
            Panel::Start => self.open_start_with(false),
            Panel::End => self.open_end_with(false),
            Panel::Center => self.close_with(false),
        }
    }

    /// Panel on the visual left
    fn left_panel(&self) -> Panel {
        if self.direction.is_ltr() {
            Panel::Start
        } else {
            Panel::End
        }
    }

    /// Panel on the visual right
    fn right_panel(&self) -> Panel {
        if self.direction.is_ltr() {
            Panel::End
        } else {
            Panel::Start
        }
    }

    fn left_lock(&self) -> LockState {
        if self.direction.is_ltr() {
            self.start_lock
        } else {
            self.end_lock
        }
    }

    fn right_lock(&self) -> LockState {
        if self.direction.is_ltr() {
            self.end_lock
        } else {
            self.start_lock
        }
    }

    // === Touch classification helpers ===

    /// Touch lands on the strip of center panel still visible while a side
    /// panel is fully open
    fn is_touch_on_closed_center(&self, event: &PointerEvent) -> bool {
        let Some((min_x, max_x)) = self.geometry.bounds() else {
            return false;
        };
        let Some(viewport) = self.viewport else {
            return false;
        };
        let center_right_edge_when_right_open = min_x + viewport.width;
        let touching_center_with_left_open = event.raw_x > max_x;
        let touching_center_with_right_open = event.raw_x < center_right_edge_when_right_open;
        let left_fully_open = self.offset == max_x;
        let right_fully_open = self.offset == min_x;
        (left_fully_open && touching_center_with_left_open)
            || (right_fully_open && touching_center_with_right_open)
    }

    /// Down falls inside the bottom strip reserved for the system home
    /// gesture, when the platform has gesture navigation
    fn is_home_system_gesture(&self, event: &PointerEvent) -> bool {
        if !self.config.system_gesture_navigation {
            return false;
        }
        let Some(viewport) = self.viewport else {
            return false;
        };
        (event.y - viewport.height).abs() < self.config.home_gesture_from_bottom_px
    }

    // === Animation ===

    /// Animate toward a normalized target, cancelling any prior animation
    fn animate_to(&mut self, x: f32, fling: bool, duration_ms: u64) {
        self.cancel_animation();
        let normalized = self.normalize(x);
        self.animation_end_x = normalized;
        let easing = if fling {
            Easing::Decelerate
        } else {
            Easing::Standard
        };
        trace!(
            target: "animation",
            from = self.offset,
            to = normalized,
            ?easing,
            duration_ms,
            "start"
        );
        self.animation = Some(OffsetAnimation::new(
            self.offset,
            normalized,
            Duration::from_millis(duration_ms),
            easing,
        ));
    }

    fn cancel_animation(&mut self) {
        if self.animation.take().is_some() {
            trace!(target: "animation", "cancelled");
        }
    }

    /// Advance the in-flight animation to `now`
    ///
    /// Returns true while an animation remains active, so hosts can keep
    /// requesting frames. Each tick commits through the same choke point
    /// as gesture-driven updates.
    pub fn tick(&mut self, now: Duration) -> bool {
        let Some(animation) = self.animation.as_mut() else {
            return false;
        };
        let value = animation.sample(now);
        let finished = animation.is_finished(now);
        self.commit_offset(value);
        if finished {
            self.animation = None;
        }
        !finished
    }

    // === The choke point ===

    /// Commit a new center offset and notify observers
    ///
    /// Single mutation entry point for the offset: updates the selected
    /// panel when a canonical rest position is reached, re-derives both
    /// side states, and synchronously notifies the listeners whose derived
    /// state changed.
    fn commit_offset(&mut self, x: f32) {
        let previous = self.offset;
        self.offset = x;

        if x == 0.0 {
            self.selected_panel = Panel::Center;
        } else if Some(x) == self.geometry.start_open_x {
            self.selected_panel = Panel::Start;
        } else if Some(x) == self.geometry.end_open_x {
            self.selected_panel = Panel::End;
        }

        if let Some(start_open) = self.geometry.start_open_x {
            let state = start_panel_state(
                previous,
                x,
                start_open,
                self.direction,
                self.start_lock == LockState::Open,
            );
            if state != self.start_state {
                debug!(target: "panels", ?state, offset = x, "start panel state");
                self.start_state = state;
                self.start_listeners.notify(state);
            }
        }

        if let Some(end_open) = self.geometry.end_open_x {
            let state = end_panel_state(
                previous,
                x,
                end_open,
                self.direction,
                self.end_lock == LockState::Open,
            );
            if state != self.end_state {
                debug!(target: "panels", ?state, offset = x, "end panel state");
                self.end_state = state;
                self.end_listeners.notify(state);
            }
        }
    }
}

impl std::fmt::Debug for PanelsController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PanelsController")
            .field("offset", &self.offset)
            .field("selected_panel", &self.selected_panel)
            .field("start_state", &self.start_state)
            .field("end_state", &self.end_state)
            .field("geometry", &self.geometry)
            .field("animating", &self.animation.is_some())
            .finish()
    }
}
