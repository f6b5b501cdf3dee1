// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input handlers.

use kurbo::{Point, Rect};
use loupe_event_state::pinch::{PinchGeometry, PinchStart};
use loupe_event_state::wheel::{WheelKind, scale_factor};

use super::{PanZoomEngine, ignore};
use crate::error::{IgnoreReason, Outcome};
use crate::host::{CanvasClick, ViewportHost, ZoomIndicator};
use crate::inertia::InertiaTask;
use crate::input::{PointerButton, PointerEvent, Touch, TouchId, WheelEvent};
use crate::session::GestureSession;
use crate::timer::TimerKind;

impl<H: ViewportHost> PanZoomEngine<H> {
    // -------------------------------------------------------------------------
    // Mouse
    // -------------------------------------------------------------------------

    /// Primary button pressed: starts a pan.
    pub fn pointer_down(&mut self, event: PointerEvent) -> Outcome {
        if event.button != PointerButton::Primary {
            return ignore("pointer down", IgnoreReason::NotApplicable);
        }
        if !self.session.is_idle() {
            return ignore("pointer down", IgnoreReason::Busy);
        }
        if let Err(reason) = self.gate(Some(event.position)) {
            return ignore("pointer down", reason);
        }
        self.begin_writer();
        self.start_pan(event.position, None, event.timestamp);
        Outcome::Handled
    }

    /// Pointer moved.
    pub fn pointer_move(&mut self, event: PointerEvent) -> Outcome {
        if !matches!(self.session, GestureSession::Panning { touch: None, .. }) {
            return Outcome::Ignored(IgnoreReason::NotApplicable);
        }
        self.pan_step(event.position, event.timestamp)
    }

    /// Pointer released.
    ///
    /// A release without movement is a tap: the host receives a canvas click
    /// if it landed on the content. A release after a fast enough drag hands
    /// over to inertia, which emits pan-end when it finishes.
    pub fn pointer_up(&mut self, event: PointerEvent) -> Outcome {
        if !matches!(self.session, GestureSession::Panning { touch: None, .. }) {
            return ignore("pointer up", IgnoreReason::NotApplicable);
        }
        self.end_pan(Some(event.position), event.timestamp);
        Outcome::Handled
    }

    /// Pointer left the viewport. Ends a pan like a release, but never
    /// counts as a tap.
    pub fn pointer_leave(&mut self, event: PointerEvent) -> Outcome {
        if !matches!(self.session, GestureSession::Panning { touch: None, .. }) {
            return Outcome::Ignored(IgnoreReason::NotApplicable);
        }
        self.end_pan(None, event.timestamp);
        Outcome::Handled
    }

    // -------------------------------------------------------------------------
    // Touch
    // -------------------------------------------------------------------------

    /// Touches began. `touches` lists every touch currently down.
    ///
    /// One touch starts a pan; two start a pinch, ending a one-finger pan if
    /// there was one.
    pub fn touch_start(&mut self, touches: &[Touch], now: u64) -> Outcome {
        match touches {
            [] => Outcome::Ignored(IgnoreReason::NotApplicable),
            [touch] => {
                if !self.session.is_idle() {
                    return ignore("touch start", IgnoreReason::Busy);
                }
                if let Err(reason) = self.gate(Some(touch.position)) {
                    return ignore("touch start", reason);
                }
                self.begin_writer();
                self.start_pan(touch.position, Some(touch.id), now);
                Outcome::Handled
            }
            [a, b, ..] => {
                let geometry = PinchGeometry::from_points(a.position, b.position);
                if let Err(reason) = self.zoom_gate(Some(geometry.center)) {
                    return ignore("pinch start", reason);
                }
                match self.session {
                    GestureSession::Idle => {}
                    GestureSession::Panning { touch: Some(_), .. } => {
                        log::debug!("touch-panning -> pinching");
                        self.session = GestureSession::Idle;
                        self.drag.end();
                        self.velocity.reset();
                        self.host.on_pan_end();
                    }
                    _ => return ignore("pinch start", IgnoreReason::Busy),
                }
                self.begin_writer();
                self.start_pinch(*a, *b, geometry);
                Outcome::Handled
            }
        }
    }

    /// Touches moved. `touches` lists every touch currently down.
    pub fn touch_move(&mut self, touches: &[Touch], now: u64) -> Outcome {
        match self.session {
            GestureSession::Panning {
                touch: Some(id), ..
            } => match find(touches, id) {
                Some(touch) => self.pan_step(touch.position, now),
                None => Outcome::Ignored(IgnoreReason::NotApplicable),
            },
            GestureSession::Pinching {
                pinch,
                start_offset,
                start_size,
                start_zoom,
            } => {
                let (Some(a), Some(b)) = (find(touches, pinch.finger_a), find(touches, pinch.finger_b))
                else {
                    return Outcome::Ignored(IgnoreReason::NotApplicable);
                };
                let geometry = PinchGeometry::from_points(a.position, b.position);
                let zoom_value = pinch.zoom_value(geometry.distance, start_zoom);
                self.view.pinch_to(
                    start_offset,
                    start_size,
                    pinch.anchor_fraction,
                    pinch.center_shift(geometry.center),
                    zoom_value,
                    self.pan_limits(),
                );
                self.indicator = Some(ZoomIndicator {
                    percent: self.view.zoom_percent(),
                });
                self.sync_zoom_box();
                self.render();
                self.host.on_zoom();
                Outcome::Handled
            }
            _ => Outcome::Ignored(IgnoreReason::NotApplicable),
        }
    }

    /// Touches ended. `remaining` lists the touches still down, `ended` the
    /// ones that lifted.
    ///
    /// A pinch ends as soon as fewer than two of its fingers remain; the
    /// remaining finger does not start a new pan.
    pub fn touch_end(&mut self, remaining: &[Touch], ended: &[Touch], now: u64) -> Outcome {
        match self.session {
            GestureSession::Panning {
                touch: Some(id), ..
            } => {
                if find(remaining, id).is_some() {
                    return Outcome::Ignored(IgnoreReason::NotApplicable);
                }
                let release = find(ended, id).map(|t| t.position);
                self.end_pan(release, now);
                Outcome::Handled
            }
            GestureSession::Pinching { pinch, .. } => {
                if find(remaining, pinch.finger_a).is_some()
                    && find(remaining, pinch.finger_b).is_some()
                {
                    return Outcome::Ignored(IgnoreReason::NotApplicable);
                }
                self.end_pinch();
                Outcome::Handled
            }
            _ => Outcome::Ignored(IgnoreReason::NotApplicable),
        }
    }

    /// The platform cancelled the touches. The gesture ends without any
    /// notification; the view stays where the gesture left it.
    pub fn touch_cancel(&mut self) -> Outcome {
        if !matches!(
            self.session,
            GestureSession::Panning { touch: Some(_), .. } | GestureSession::Pinching { .. }
        ) {
            return Outcome::Ignored(IgnoreReason::NotApplicable);
        }
        log::debug!("{} -> idle (cancelled)", self.session.name());
        self.session = GestureSession::Idle;
        self.drag.end();
        self.velocity.reset();
        self.indicator = None;
        self.render();
        Outcome::Handled
    }

    // -------------------------------------------------------------------------
    // Wheel
    // -------------------------------------------------------------------------

    /// Wheel or trackpad zoom, anchored at the pointer.
    ///
    /// Each event is one zoom step; the zoom counts as settled once no step
    /// arrived for [`crate::EngineConfig::zoom_settle_ms`].
    pub fn wheel(&mut self, event: WheelEvent) -> Outcome {
        if !self.session.is_idle() {
            return ignore("wheel", IgnoreReason::Busy);
        }
        if let Err(reason) = self.zoom_gate(Some(event.position)) {
            return ignore("wheel", reason);
        }
        let kind = WheelKind::classify(event.delta_y, event.legacy_delta_y, event.ctrl_key);
        let factor = scale_factor(kind, event.delta_y, &self.config.wheel);
        if !self.can_zoom_by(factor) {
            return Outcome::Ignored(IgnoreReason::NotApplicable);
        }
        self.generation = self.generation.wrapping_add(1);
        self.cancel_inertia();
        let anchor = self.view.image_fraction_at(event.position);
        self.apply_zoom_step(factor, anchor, event.timestamp);
        Outcome::Handled
    }

    // -------------------------------------------------------------------------
    // Minimap
    // -------------------------------------------------------------------------

    /// Pointer pressed inside the minimap at `pointer` (minimap coordinates).
    ///
    /// The box jumps under the pointer and the main view follows.
    pub fn zoom_box_pointer_down(&mut self, pointer: Point) -> Outcome {
        if !self.session.is_idle() {
            return ignore("zoom box down", IgnoreReason::Busy);
        }
        if let Err(reason) = self.gate(None) {
            return ignore("zoom box down", reason);
        }
        self.begin_writer();
        log::debug!("idle -> box-dragging");
        self.retarget_box(pointer);
        self.host.on_pan_start();
        Outcome::Handled
    }

    /// Pointer moved while dragging the minimap box.
    pub fn zoom_box_pointer_move(&mut self, pointer: Point) -> Outcome {
        if !matches!(self.session, GestureSession::BoxDragging { .. }) {
            return Outcome::Ignored(IgnoreReason::NotApplicable);
        }
        self.retarget_box(pointer);
        self.host.on_pan_move(self.view.content_rect());
        Outcome::Handled
    }

    /// Pointer released after dragging the minimap box.
    pub fn zoom_box_pointer_up(&mut self) -> Outcome {
        if !matches!(self.session, GestureSession::BoxDragging { .. }) {
            return Outcome::Ignored(IgnoreReason::NotApplicable);
        }
        log::debug!("box-dragging -> idle");
        self.session = GestureSession::Idle;
        self.sync_zoom_box();
        self.render();
        self.host.on_pan_end();
        Outcome::Handled
    }

    // -------------------------------------------------------------------------
    // Shared steps
    // -------------------------------------------------------------------------

    fn start_pan(&mut self, position: Point, touch: Option<TouchId>, now: u64) {
        self.session = GestureSession::Panning {
            pointer_origin: position,
            origin_offset: self.view.offset(),
            touch,
        };
        log::debug!("idle -> {}", self.session.name());
        self.drag.start(position);
        self.velocity.reset();
        self.velocity.sample(self.view.offset(), now);
        self.render();
        self.host.on_pan_start();
    }

    fn pan_step(&mut self, position: Point, now: u64) -> Outcome {
        let Some(delta) = self.drag.update(position) else {
            return Outcome::Ignored(IgnoreReason::NotApplicable);
        };
        if self.view.pan_by(delta, self.pan_limits()) {
            self.sync_zoom_box();
            self.render();
        }
        self.velocity.sample(self.view.offset(), now);
        self.host.on_pan_move(self.view.content_rect());
        Outcome::Handled
    }

    fn end_pan(&mut self, release: Option<Point>, now: u64) {
        let name = self.session.name();
        self.session = GestureSession::Idle;
        let moved = self.drag.end().unwrap_or(false);

        if moved {
            let speed = self.velocity.speed();
            let task = InertiaTask::start(
                self.generation,
                now,
                self.velocity.velocity(),
                speed,
                &self.config.inertia,
            );
            self.velocity.reset();
            if let Some(task) = task {
                log::debug!(
                    "{name} -> inertia ({} ms at {speed:.3} px/ms)",
                    task.duration_ms()
                );
                self.inertia = Some(task);
                self.render();
                self.host.request_frame();
                return;
            }
        } else if let Some(point) = release {
            self.canvas_click(point);
        }

        log::debug!("{name} -> idle");
        self.velocity.reset();
        self.render();
        self.host.on_pan_end();
    }

    fn canvas_click(&mut self, point: Point) {
        if !self.view.content_rect().contains(point) {
            return;
        }
        let click = CanvasClick {
            fraction: self.view.image_fraction_at(point),
            content: self.view.content_size(),
        };
        log::debug!("canvas click at {:?}", click.fraction);
        self.host.on_canvas_click(click);
    }

    fn start_pinch(&mut self, a: Touch, b: Touch, geometry: PinchGeometry) {
        let anchor = self.view.image_fraction_at(geometry.center);
        self.session = GestureSession::Pinching {
            pinch: PinchStart::new(a.id, b.id, geometry, anchor),
            start_offset: self.view.offset(),
            start_size: self.view.content_size(),
            start_zoom: self.view.zoom_ratio(),
        };
        log::debug!("pinch start at {:?}, anchor {anchor:?}", geometry.center);
        self.layer = self.image.zooming_layer();
        self.render();
    }

    fn end_pinch(&mut self) {
        log::debug!("pinching -> idle at {:.2}%", self.view.zoom_percent());
        self.session = GestureSession::Idle;
        self.indicator = None;
        self.layer = self
            .image
            .settled_layer(self.view.content_size().width, self.layer);
        self.sync_zoom_box();
        self.render();
        let content = self.view.content_rect();
        self.host.on_pan_move(content);
        self.host.on_zoom_end(content, self.view.zoom_ratio());
    }

    /// One wheel or button zoom step by `factor` around `anchor` (a content
    /// fraction). Restarts the settle timer.
    pub(super) fn apply_zoom_step(&mut self, factor: f64, anchor: Point, now: u64) {
        self.view.rescale_about(factor, anchor, self.pan_limits());
        self.indicator = Some(ZoomIndicator {
            percent: self.view.zoom_percent(),
        });
        self.layer = self.image.zooming_layer();
        self.sync_zoom_box();
        self.render();
        self.timers.schedule(
            TimerKind::ZoomSettle,
            now.saturating_add(self.config.zoom_settle_ms),
        );
        self.host.on_zoom();
    }

    fn retarget_box(&mut self, pointer: Point) {
        let target = self
            .zoom_box
            .retarget(pointer, self.zoom_box_rect.size(), &self.view);
        self.view.pan_to(target.main_offset, self.pan_limits());
        self.session = GestureSession::BoxDragging {
            box_origin: target.box_origin,
        };
        self.zoom_box_rect = Rect::from_origin_size(target.box_origin, self.zoom_box_rect.size());
        self.render();
    }
}

fn find(touches: &[Touch], id: TouchId) -> Option<&Touch> {
    touches.iter().find(|t| t.id == id)
}
