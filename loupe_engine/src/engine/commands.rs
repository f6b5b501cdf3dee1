// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Imperative operations called by the host.

use kurbo::{Point, Rect};
use loupe_view2d::{
    AnnotationMarker, LocationParams, LocationPlan, LocationRequest, Transition, plan_location_zoom,
};

use super::{PanZoomEngine, ignore};
use crate::error::{IgnoreReason, Outcome};
use crate::host::ViewportHost;
use crate::timer::TimerKind;

impl<H: ViewportHost> PanZoomEngine<H> {
    /// Centers a content fraction in the viewport, typically to jump to an
    /// annotation.
    ///
    /// If no location zoom happened yet, the view is unzoomed, or the content
    /// is still shorter than the viewport, the content is first rescaled to
    /// [`crate::EngineConfig::zoom_to_percent`]. A gesture in progress is
    /// ended first (a pan reports pan-end). Returns `None` when there is no
    /// laid-out image.
    ///
    /// The host animates the move when the returned plan says so (see
    /// [`crate::RenderState::transition`]).
    pub fn zoom_to_location(&mut self, request: &LocationRequest) -> Option<LocationPlan> {
        if !self.image.is_loaded() || self.view.is_degenerate() {
            log::trace!("ignored location zoom: not laid out");
            return None;
        }
        self.begin_writer();
        if !self.session.is_idle() {
            log::debug!("{} interrupted by location zoom", self.session.name());
            self.end_activity();
        }
        self.indicator = None;

        let params = LocationParams {
            zoom_to_percent: f64::from(self.config.zoom_to_percent),
            limit_x_offset: self.config.limit_x_offset,
            animate_threshold: self.config.location_animate_threshold,
        };
        let plan = plan_location_zoom(&self.view, request, &params)?;
        self.view.apply_location_plan(&plan);
        self.sync_zoom_box();
        let transition = if plan.animate {
            Transition::Animated {
                duration_ms: self.config.location_transition_ms,
            }
        } else {
            Transition::Instant
        };
        log::debug!(
            "location zoom to ({}, {}): offset {:?}, {:.2}%, animate {}",
            request.x_fraction,
            request.y_fraction,
            plan.offset,
            plan.zoom_percent,
            plan.animate
        );
        self.render_with(transition);
        Some(plan)
    }

    /// Pulls the content back so no axis keeps a positive offset.
    ///
    /// Running inertia is cancelled. Returns the resulting offset, or `None`
    /// when there is no laid-out image. Repeated calls return the same offset
    /// and render only once.
    pub fn reset_zoom_location(&mut self) -> Option<Point> {
        if self.view.is_degenerate() {
            return None;
        }
        self.generation = self.generation.wrapping_add(1);
        self.cancel_inertia();
        let before = self.view.offset();
        let after = self.view.reset_location();
        if after != before {
            self.sync_zoom_box();
            self.render();
        }
        Some(after)
    }

    /// The zoom-reset button: back to base size and the initial offset.
    ///
    /// Reports a zoom end with zoom value `0`. Ignored if the view is not
    /// zoomed.
    pub fn recenter(&mut self) -> Outcome {
        if !self.session.is_idle() {
            return ignore("recenter", IgnoreReason::Busy);
        }
        if self.view.is_degenerate() {
            return ignore("recenter", IgnoreReason::NotLaidOut);
        }
        self.generation = self.generation.wrapping_add(1);
        self.cancel_inertia();
        if !self.view.recenter() {
            return Outcome::Ignored(IgnoreReason::NotApplicable);
        }
        log::debug!("recentered");
        self.timers.cancel(TimerKind::ZoomSettle);
        self.indicator = None;
        self.layer = self.image.zooming_layer();
        self.zoom_box_rect = self.zoom_box.reset();
        self.render();
        self.host.on_zoom_end(self.view.content_rect(), 0.0);
        Outcome::Handled
    }

    /// The `+` button: zooms in one step around the viewport center.
    pub fn zoom_in(&mut self, now: u64) -> Outcome {
        self.button_zoom(1.0 + self.config.button_zoom_step, now)
    }

    /// The `-` button: zooms out one step around the viewport center.
    pub fn zoom_out(&mut self, now: u64) -> Outcome {
        self.button_zoom(1.0 - self.config.button_zoom_step, now)
    }

    fn button_zoom(&mut self, factor: f64, now: u64) -> Outcome {
        if !self.session.is_idle() {
            return ignore("zoom button", IgnoreReason::Busy);
        }
        if let Err(reason) = self.zoom_gate(None) {
            return ignore("zoom button", reason);
        }
        if !self.can_zoom_by(factor) {
            return Outcome::Ignored(IgnoreReason::NotApplicable);
        }
        self.generation = self.generation.wrapping_add(1);
        self.cancel_inertia();
        let viewport = self.view.viewport_size();
        let center = Point::new(viewport.width / 2.0, viewport.height / 2.0);
        let anchor = self.view.image_fraction_at(center);
        self.apply_zoom_step(factor, anchor, now);
        Outcome::Handled
    }

    /// Shows or hides the marker layer. Returns `true` if visibility changed.
    pub fn toggle_container_display(&mut self, show: bool) -> bool {
        let changed = self.overlay.toggle_container_display(show);
        if changed {
            self.render();
        }
        changed
    }

    /// Aligns the marker layer with `rect`. Returns `true` if it changed.
    pub fn update_dimensions(&mut self, rect: Rect) -> bool {
        let changed = self.overlay.update_dimensions(rect);
        if changed {
            self.render();
        }
        changed
    }

    /// Whether `fraction` lies within
    /// [`crate::EngineConfig::marker_distance_allowance`] of a marker.
    ///
    /// Hosts use this to refuse dropping a new annotation on top of an
    /// existing one.
    pub fn is_near_marker(&self, fraction: Point, markers: &[AnnotationMarker]) -> bool {
        self.overlay
            .is_near_marker(fraction, markers, self.config.marker_distance_allowance)
    }
}
