// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The pan/zoom engine.
//!
//! [`PanZoomEngine`] is the only writer of the [`ViewportState`]. Gestures,
//! inertia, location zoom and re-layout all go through it, and at most one of
//! them mutates the state at a time:
//! - starting a gesture or a location zoom bumps the generation, cancels
//!   inertia (emitting pan-end) and settles a pending wheel zoom;
//! - a resize re-derives the state from scratch, ending whatever was running.
//!
//! Input handlers live in `gesture`, imperative operations in `commands`.

mod commands;
mod gesture;

use kurbo::{Point, Rect, Size};
use loupe_event_state::drag::DragState;
use loupe_event_state::velocity::VelocityTracker;
use loupe_view2d::{ClampLimits, MarkerOverlay, Transition, ViewMode, ViewportState, ZoomBox};

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use crate::blocking::{BlockerId, BlockingRegions};
use crate::config::EngineConfig;
use crate::error::{EngineError, IgnoreReason, Outcome};
use crate::host::{ImageLayer, RenderState, ViewportHost, ZoomIndicator};
use crate::image::{ImageSource, ImageState, ImageStatus, ZoomSupport};
use crate::inertia::InertiaTask;
use crate::session::GestureSession;
use crate::timer::{TimerKind, TimerQueue};

/// Pan/zoom engine for a single image.
///
/// The engine is driven entirely by the host: input events, layout changes
/// and time all come in through method calls, and everything the host must
/// react to goes out through its [`ViewportHost`]. It never blocks or sleeps.
///
/// Time is a host-supplied monotonic millisecond clock. When
/// [`PanZoomEngine::needs_frame`] is `true` the host should call
/// [`PanZoomEngine::advance`] on its next animation frame; otherwise it only
/// needs to call back at [`PanZoomEngine::next_deadline`].
///
/// ```rust
/// use kurbo::{Point, Size};
/// use loupe_engine::{PanZoomEngine, PointerEvent, ViewportEvent};
///
/// let mut engine = PanZoomEngine::new(Vec::<ViewportEvent>::new());
/// let _ = engine.resize(Size::new(800.0, 600.0), false);
/// engine.set_expanded(true, 0);
/// engine.image_loaded(Size::new(1600.0, 1200.0), 0).unwrap();
///
/// // A tap in the middle of the image.
/// let _ = engine.pointer_down(PointerEvent::primary(Point::new(400.0, 300.0), 10));
/// let _ = engine.pointer_up(PointerEvent::primary(Point::new(400.0, 300.0), 20));
///
/// let click = engine.host().iter().find_map(|e| match e {
///     ViewportEvent::CanvasClick(click) => Some(*click),
///     _ => None,
/// });
/// assert_eq!(click.unwrap().fraction, Point::new(0.5, 0.5));
/// ```
#[derive(Debug)]
pub struct PanZoomEngine<H> {
    host: H,
    config: EngineConfig,
    view: ViewportState,
    mode: ViewMode,
    window: Size,
    session: GestureSession,
    drag: DragState,
    velocity: VelocityTracker,
    inertia: Option<InertiaTask>,
    generation: u64,
    timers: TimerQueue<TimerKind>,
    zoom_box: ZoomBox,
    zoom_box_rect: Rect,
    overlay: MarkerOverlay,
    blockers: BlockingRegions,
    image: ImageState,
    disabled: bool,
    indicator: Option<ZoomIndicator>,
    layer: ImageLayer,
}

impl<H: ViewportHost> PanZoomEngine<H> {
    /// Creates an engine with the default configuration.
    pub fn new(host: H) -> Self {
        Self::from_parts(host, EngineConfig::default())
    }

    /// Creates an engine with a validated configuration.
    pub fn with_config(host: H, config: EngineConfig) -> Result<Self, EngineError> {
        let config = config.validate()?;
        Ok(Self::from_parts(host, config))
    }

    fn from_parts(host: H, config: EngineConfig) -> Self {
        Self {
            host,
            config,
            view: ViewportState::default(),
            mode: ViewMode::Inline,
            window: Size::ZERO,
            session: GestureSession::Idle,
            drag: DragState::default(),
            velocity: VelocityTracker::default(),
            inertia: None,
            generation: 0,
            timers: TimerQueue::default(),
            zoom_box: ZoomBox::default(),
            zoom_box_rect: Rect::ZERO,
            overlay: MarkerOverlay::default(),
            blockers: BlockingRegions::new(),
            image: ImageState::default(),
            disabled: false,
            indicator: None,
            layer: ImageLayer::Full,
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// Current viewport state.
    pub fn viewport(&self) -> &ViewportState {
        &self.view
    }

    /// Active gesture.
    pub fn session(&self) -> GestureSession {
        self.session
    }

    /// Active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Presentation mode.
    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    /// Load state of the primary image.
    pub fn image_status(&self) -> ImageStatus {
        self.image.status
    }

    /// Large-image zoom support progress.
    pub fn zoom_support(&self) -> ZoomSupport {
        self.image.support
    }

    /// Whether input is disabled.
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Current minimap box.
    pub fn zoom_box_rect(&self) -> Rect {
        self.zoom_box_rect
    }

    /// Marker layer geometry.
    pub fn overlay(&self) -> &MarkerOverlay {
        &self.overlay
    }

    /// The host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// The host, mutably.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Consumes the engine and returns the host.
    pub fn into_host(self) -> H {
        self.host
    }

    /// What the host should currently draw.
    pub fn render_state(&self) -> RenderState {
        self.render_state_with(Transition::Instant)
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Assigns a new image source.
    ///
    /// Everything derived from the previous image is dropped: gestures end
    /// silently, timers are cleared and zoom support starts over.
    pub fn set_image(&mut self, source: ImageSource) {
        self.abandon_activity();
        self.timers.clear();
        self.image.assign(source);
        self.view = ViewportState::default();
        self.layer = self.image.zooming_layer();
        self.indicator = None;
        log::debug!("image source assigned (low-res stand-in: {})", source.low_res);
    }

    /// The primary image finished loading with `natural` pixel size.
    ///
    /// Lays the image out, notifies the host and, in expanded mode, starts
    /// the zoom-support schedule. A second load notification for the same
    /// source is ignored.
    pub fn image_loaded(&mut self, natural: Size, now: u64) -> Result<(), EngineError> {
        if self.image.is_loaded() {
            return Ok(());
        }
        if !is_positive(natural) {
            log::warn!("image reported a degenerate natural size {natural:?}");
            return Err(EngineError::InvalidBounds {
                content: natural,
                viewport: self.window,
            });
        }
        self.image.status = ImageStatus::Loaded { natural };
        self.relayout(false);
        self.host.on_image_load();
        self.schedule_support(now);
        Ok(())
    }

    /// The primary image failed to load. Gestures stay disabled until a new
    /// source is assigned.
    pub fn image_failed(&mut self) {
        self.abandon_activity();
        self.timers.clear();
        self.image.status = ImageStatus::Failed;
        log::warn!("{}", EngineError::ImageLoad);
        self.host.on_image_error(&EngineError::ImageLoad);
    }

    /// The low-resolution stand-in loaded with natural width `width`.
    pub fn low_res_loaded(&mut self, width: f64) {
        self.image.set_low_res_width(width);
    }

    /// Sets the size the minimap image is rendered at.
    pub fn set_zoom_box_base(&mut self, base: Size) {
        self.zoom_box.set_base(base);
        self.sync_zoom_box();
        self.render();
    }

    /// The viewport was resized.
    ///
    /// Re-derives the layout from scratch, ending any gesture or animation in
    /// progress. With [`EngineConfig::ignore_same_width_resize`], a window
    /// resize in expanded mode that keeps the width is ignored.
    pub fn resize(&mut self, viewport: Size, from_window_event: bool) -> Outcome {
        if self.config.ignore_same_width_resize
            && from_window_event
            && self.mode.is_expanded()
            && viewport.width == self.window.width
        {
            return ignore("resize", IgnoreReason::NotApplicable);
        }
        self.window = viewport;
        if let Err(reason) = self.image.status.gate() {
            return ignore("resize", reason);
        }
        self.relayout(from_window_event);
        Outcome::Handled
    }

    /// Enters or leaves the expanded pan/zoom mode.
    pub fn set_expanded(&mut self, expanded: bool, now: u64) {
        if expanded == self.mode.is_expanded() {
            return;
        }
        if !expanded {
            self.close();
            return;
        }
        self.mode = ViewMode::Expanded;
        log::debug!("entering expanded mode");
        if self.image.is_loaded() {
            self.relayout(false);
        }
        self.host.on_pan_zoom_activate(true);
        self.schedule_support(now);
    }

    /// Leaves the expanded mode.
    ///
    /// Cancels pending timers, drops the zoom back to base and lays the image
    /// out inline again.
    pub fn close(&mut self) {
        if !self.mode.is_expanded() {
            return;
        }
        log::debug!("leaving expanded mode");
        self.timers.cancel(TimerKind::SupportReveal);
        self.timers.cancel(TimerKind::SupportReady);
        self.timers.cancel(TimerKind::ZoomSettle);
        self.mode = ViewMode::Inline;
        if self.image.is_loaded() {
            self.relayout(false);
        }
        self.host.on_pan_zoom_activate(false);
    }

    /// The page was hidden or shown again.
    ///
    /// Once zoom support is ready, hiding the page re-attaches the support
    /// layer and showing it detaches the layer again after a short delay.
    pub fn visibility_changed(&mut self, hidden: bool, now: u64) {
        if !self.image.zoom_ready() {
            return;
        }
        if hidden {
            self.timers.cancel(TimerKind::VisibilityRestore);
            self.image.support_attached = true;
            self.render();
        } else {
            self.timers.schedule(
                TimerKind::VisibilityRestore,
                now.saturating_add(self.config.visibility_restore_ms),
            );
        }
    }

    /// Enables or disables all input. Disabling ends the active gesture.
    pub fn set_disabled(&mut self, disabled: bool) {
        if disabled && !self.disabled {
            self.end_activity();
        }
        self.disabled = disabled;
    }

    /// Registers or moves a gesture-blocking region.
    pub fn register_blocker(&mut self, id: BlockerId, rect: Rect) {
        self.blockers.register(id, rect);
    }

    /// Removes a gesture-blocking region.
    pub fn unregister_blocker(&mut self, id: BlockerId) {
        self.blockers.unregister(id);
    }

    // -------------------------------------------------------------------------
    // Scheduling
    // -------------------------------------------------------------------------

    /// Fires due timers and runs one inertia frame.
    pub fn advance(&mut self, now: u64) {
        while let Some(kind) = self.timers.pop_due(now) {
            self.fire(kind, now);
        }
        self.tick_inertia(now);
    }

    /// Whether [`PanZoomEngine::advance`] should run on the next frame.
    pub fn needs_frame(&self) -> bool {
        self.inertia.is_some()
    }

    /// Earliest pending timer deadline.
    pub fn next_deadline(&self) -> Option<u64> {
        self.timers.next_deadline()
    }

    fn fire(&mut self, kind: TimerKind, now: u64) {
        match kind {
            TimerKind::ZoomSettle => self.settle_zoom(),
            TimerKind::SupportReveal => {
                log::debug!("attaching zoom support layer");
                self.image.support = ZoomSupport::Revealed;
                self.image.support_attached = true;
                self.timers.schedule(
                    TimerKind::SupportReady,
                    now.saturating_add(self.config.support_ready_delay_ms),
                );
                self.render();
            }
            TimerKind::SupportReady => {
                log::debug!("zoom support ready");
                self.image.support = ZoomSupport::Ready;
                self.image.support_attached = false;
                self.render();
            }
            TimerKind::VisibilityRestore => {
                self.image.support_attached = false;
                self.render();
            }
        }
    }

    fn tick_inertia(&mut self, now: u64) {
        let Some(task) = self.inertia else {
            return;
        };
        if !task.is_current(self.generation) {
            log::debug!("dropping stale inertia task");
            self.finish_inertia();
            return;
        }
        let step = task.step(now, self.view.offset(), &self.config.inertia);
        let moved = self.view.pan_to(step.candidate, self.pan_limits());
        if moved {
            self.sync_zoom_box();
            self.render();
            self.host.on_pan_move(self.view.content_rect());
        }
        if step.expired || !moved {
            self.finish_inertia();
        } else {
            self.host.request_frame();
        }
    }

    fn finish_inertia(&mut self) {
        if self.inertia.take().is_some() {
            log::debug!("inertia -> idle");
            self.render();
            self.host.on_pan_end();
        }
    }

    fn schedule_support(&mut self, now: u64) {
        if !self.mode.is_expanded() || self.image.support != ZoomSupport::Pending {
            return;
        }
        let Some(natural) = self.image.status.natural() else {
            return;
        };
        if self.timers.is_scheduled(TimerKind::SupportReveal) {
            return;
        }
        if natural.width > self.config.large_image_limit {
            log::debug!(
                "large image ({} px wide), delaying zoom support",
                natural.width
            );
            self.timers.schedule(
                TimerKind::SupportReveal,
                now.saturating_add(self.config.support_reveal_delay_ms),
            );
        } else {
            self.image.support = ZoomSupport::Ready;
            self.render();
        }
    }

    // -------------------------------------------------------------------------
    // Shared helpers
    // -------------------------------------------------------------------------

    fn pan_limits(&self) -> ClampLimits {
        ClampLimits::pan(self.config.limit_x_offset)
    }

    /// Checks the conditions every gesture needs.
    fn gate(&self, position: Option<Point>) -> Result<(), IgnoreReason> {
        if self.disabled {
            return Err(IgnoreReason::Disabled);
        }
        self.image.status.gate()?;
        if !self.mode.is_expanded() {
            return Err(IgnoreReason::Inactive);
        }
        if self.view.is_degenerate() {
            return Err(IgnoreReason::NotLaidOut);
        }
        if position.is_some_and(|p| self.blockers.contains(p)) {
            return Err(IgnoreReason::Blocked);
        }
        Ok(())
    }

    /// [`Self::gate`] plus the zoom-support check.
    fn zoom_gate(&self, position: Option<Point>) -> Result<(), IgnoreReason> {
        self.gate(position)?;
        if !self.image.zoom_ready() {
            return Err(IgnoreReason::ZoomSupportPending);
        }
        Ok(())
    }

    /// Whether a zoom step by `factor` would change anything.
    fn can_zoom_by(&self, factor: f64) -> bool {
        let width = self.view.content_size().width.round();
        let natural = self.view.max_content_width();
        let base = self.view.base_size().width.round();
        (factor > 1.0 && width < natural) || (factor < 1.0 && width > base)
    }

    /// Takes over as the single writer: bumps the generation, cancels inertia
    /// and settles a pending wheel zoom.
    fn begin_writer(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.cancel_inertia();
        if self.timers.cancel(TimerKind::ZoomSettle) {
            self.settle_zoom();
        }
    }

    fn cancel_inertia(&mut self) {
        if self.inertia.is_some() {
            log::debug!("inertia cancelled");
            self.finish_inertia();
        }
    }

    /// Ends whatever is running, keeping start/end notifications paired.
    fn end_activity(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.cancel_inertia();
        if self.session.is_panning() {
            log::debug!("{} -> idle (interrupted)", self.session.name());
            self.session = GestureSession::Idle;
            self.drag.end();
            self.host.on_pan_end();
        } else if self.session.is_pinching() {
            log::debug!("pinching -> idle (interrupted)");
            self.session = GestureSession::Idle;
            self.indicator = None;
            self.render();
        }
        self.velocity.reset();
        if self.timers.cancel(TimerKind::ZoomSettle) {
            self.indicator = None;
        }
    }

    /// Drops every gesture and animation without notifying the host.
    fn abandon_activity(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.inertia = None;
        self.session = GestureSession::Idle;
        self.drag.end();
        self.velocity.reset();
    }

    /// Lays the image out again for the current window and mode.
    fn relayout(&mut self, from_window_event: bool) {
        let Some(natural) = self.image.status.natural() else {
            return;
        };
        self.end_activity();
        self.view = ViewportState::fit(self.window, natural, self.mode);
        if self.view.is_degenerate() {
            log::warn!("cannot lay out {natural:?} in viewport {:?}", self.window);
            return;
        }
        log::debug!(
            "layout {:?} mode, content {:?}",
            self.mode,
            self.view.content_rect()
        );
        self.indicator = None;
        self.layer = self.image.zooming_layer();
        self.sync_zoom_box();
        self.render();
        self.host.on_resize(self.view.content_rect(), from_window_event);
    }

    /// Hides the zoom readout and reports the settled zoom.
    fn settle_zoom(&mut self) {
        self.indicator = None;
        let width = self.view.content_size().width;
        self.layer = self.image.settled_layer(width, self.layer);
        self.render();
        log::debug!("zoom settled at {:.2}%", self.view.zoom_percent());
        self.host.on_zoom_end(self.view.content_rect(), self.view.zoom_ratio());
    }

    fn sync_zoom_box(&mut self) {
        self.zoom_box_rect = self.zoom_box.project(&self.view);
    }

    fn render(&mut self) {
        self.render_with(Transition::Instant);
    }

    fn render_with(&mut self, transition: Transition) {
        let state = self.render_state_with(transition);
        self.host.render(&state);
    }

    fn render_state_with(&self, transition: Transition) -> RenderState {
        RenderState {
            transform: self.view.transform(),
            content: self.view.content_rect(),
            zoom_box: self.zoom_box_rect,
            transition,
            layer: self.layer,
            indicator: self.indicator,
            support_image_attached: self.image.support_attached,
            panning: self.session.is_panning(),
            overlay: self.overlay,
        }
    }
}

fn ignore(what: &str, reason: IgnoreReason) -> Outcome {
    log::trace!("ignored {what}: {reason}");
    Outcome::Ignored(reason)
}

fn is_positive(size: Size) -> bool {
    size.width.is_finite() && size.height.is_finite() && size.width > 0.0 && size.height > 0.0
}
