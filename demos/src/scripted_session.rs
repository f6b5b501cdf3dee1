// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scripted pan/zoom session.
//!
//! Drives a `PanZoomEngine` through a typical session without any window:
//! layout, image load, a flick with inertia, wheel zoom, a pinch, a minimap
//! drag and a jump to an annotation. Every host callback is logged.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p loupe_demos --bin scripted_session`

use kurbo::{Point, Rect, Size};
use loupe_engine::{
    CanvasClick, EngineConfig, EngineError, LocationRequest, PanZoomEngine, PointerEvent,
    RenderState, Touch, ViewportHost, WheelEvent,
};

/// Frame interval of the simulated display.
const FRAME_MS: u64 = 16;

#[derive(Debug, Default)]
struct LoggingHost {
    frames_requested: usize,
    renders: usize,
}

impl ViewportHost for LoggingHost {
    fn on_resize(&mut self, content: Rect, from_window_event: bool) {
        log::info!("resize: content {content:?} (window event: {from_window_event})");
    }

    fn on_pan_start(&mut self) {
        log::info!("pan start");
    }

    fn on_pan_move(&mut self, content: Rect) {
        log::trace!("pan move: {content:?}");
    }

    fn on_pan_end(&mut self) {
        log::info!("pan end");
    }

    fn on_zoom(&mut self) {
        log::trace!("zoom");
    }

    fn on_zoom_end(&mut self, content: Rect, zoom_value: f64) {
        log::info!("zoom end: {zoom_value:.3} at {content:?}");
    }

    fn on_canvas_click(&mut self, click: CanvasClick) {
        log::info!(
            "click at ({:.3}, {:.3}) of the image",
            click.fraction.x,
            click.fraction.y
        );
    }

    fn on_image_load(&mut self) {
        log::info!("image loaded");
    }

    fn on_image_error(&mut self, error: &EngineError) {
        log::error!("image error: {error}");
    }

    fn on_pan_zoom_activate(&mut self, active: bool) {
        log::info!("pan/zoom active: {active}");
    }

    fn render(&mut self, state: &RenderState) {
        self.renders += 1;
        if let Some(indicator) = state.indicator {
            log::debug!("{indicator}");
        }
    }

    fn request_frame(&mut self) {
        self.frames_requested += 1;
    }
}

/// Advances the engine frame by frame until it is idle, returning the new time.
fn run_frames(engine: &mut PanZoomEngine<LoggingHost>, mut now: u64) -> u64 {
    while engine.needs_frame() {
        now += FRAME_MS;
        engine.advance(now);
    }
    if let Some(deadline) = engine.next_deadline() {
        now = now.max(deadline);
        engine.advance(now);
    }
    now
}

fn main() -> Result<(), EngineError> {
    env_logger::init();

    let config = EngineConfig::default().with_support_delays(200, 100);
    let mut engine = PanZoomEngine::with_config(LoggingHost::default(), config)?;
    let mut now = 0;

    let _ = engine.resize(Size::new(1280.0, 800.0), true);
    engine.set_expanded(true, now);
    engine.image_loaded(Size::new(6000.0, 4000.0), now)?;
    log::info!("base size {:?}", engine.viewport().base_size());

    // A tap without movement reports where the image was hit.
    let _ = engine.pointer_down(PointerEvent::primary(Point::new(640.0, 400.0), now));
    let _ = engine.pointer_up(PointerEvent::primary(Point::new(640.0, 400.0), now + 80));
    now += 100;

    // Wheel zoom towards the upper-left quadrant.
    for _ in 0..6 {
        let _ = engine.wheel(WheelEvent::new(Point::new(400.0, 250.0), -120.0, now));
        now += FRAME_MS;
    }
    now = run_frames(&mut engine, now);
    log::info!("after wheel: {:.2}%", engine.viewport().zoom_percent());

    // A quick flick to the left; inertia carries it on.
    let _ = engine.pointer_down(PointerEvent::primary(Point::new(900.0, 400.0), now));
    for step in 1_u32..=5 {
        let x = 900.0 - f64::from(step) * 40.0;
        let _ = engine.pointer_move(PointerEvent::primary(
            Point::new(x, 400.0),
            now + u64::from(step) * 8,
        ));
    }
    now += 48;
    let _ = engine.pointer_up(PointerEvent::primary(Point::new(700.0, 400.0), now));
    now = run_frames(&mut engine, now);
    log::info!("after flick: offset {:?}", engine.viewport().offset());

    // Two-finger pinch out around the viewport center.
    let _ = engine.touch_start(
        &[
            Touch::new(1, Point::new(600.0, 400.0)),
            Touch::new(2, Point::new(680.0, 400.0)),
        ],
        now,
    );
    for step in 1_u32..=10 {
        let spread = f64::from(step) * 10.0;
        now += FRAME_MS;
        let _ = engine.touch_move(
            &[
                Touch::new(1, Point::new(600.0 - spread, 400.0)),
                Touch::new(2, Point::new(680.0 + spread, 400.0)),
            ],
            now,
        );
    }
    let _ = engine.touch_end(&[], &[Touch::new(1, Point::ZERO)], now);
    log::info!("after pinch: {:.2}%", engine.viewport().zoom_percent());

    // Drag the minimap box a little to the right.
    let box_origin = engine.zoom_box_rect().origin();
    let _ = engine.zoom_box_pointer_down(box_origin + (5.0, 5.0));
    let _ = engine.zoom_box_pointer_move(box_origin + (25.0, 5.0));
    let _ = engine.zoom_box_pointer_up();

    // Jump to an annotation in the lower-right corner.
    let request = LocationRequest::at(Point::new(0.8, 0.75));
    if let Some(plan) = engine.zoom_to_location(&request) {
        log::info!(
            "location zoom: offset {:?}, {:.2}%, animated: {}",
            plan.offset,
            plan.zoom_percent,
            plan.animate
        );
    }

    let _ = engine.recenter();
    engine.close();
    run_frames(&mut engine, now);

    let host = engine.into_host();
    log::info!(
        "{} renders, {} frame requests",
        host.renders,
        host.frames_requested
    );
    Ok(())
}
