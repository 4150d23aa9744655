//! Per-frame driver: gather inputs, tick the scenario, draw the result.

use crate::audio::{AudioRig, EFFECTS_STEM, LIGHTS_STEM};
use crate::events::{self, MouseState};
use crate::render::GpuState;
use crate::webcam::Webcam;
use instant::Instant;
use scene_core::{FrameInput, PixelFrame, Scenario};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext<'a> {
    pub scenario: Rc<RefCell<Scenario>>,
    pub audio: Rc<AudioRig>,
    pub webcam: Rc<RefCell<Option<Webcam>>>,
    pub mouse: Rc<RefCell<MouseState>>,
    pub canvas: web::HtmlCanvasElement,
    pub gpu: Option<GpuState<'a>>,
    pub last_instant: Instant,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = now - self.last_instant;
        self.last_instant = now;

        let effects = self.audio.read_spectrum(EFFECTS_STEM);
        let lights = self.audio.read_spectrum(LIGHTS_STEM);

        let pixels_owned = self
            .webcam
            .borrow()
            .as_ref()
            .and_then(|cam| cam.sample().map(|buf| (cam.width(), cam.height(), buf)));
        let pixel_frame = pixels_owned.as_ref().and_then(|(w, h, buf)| {
            match PixelFrame::new(*w, *h, buf) {
                Ok(frame) => Some(frame),
                Err(e) => {
                    log::warn!("webcam frame rejected: {e}");
                    None
                }
            }
        });

        let uv = events::mouse_uv(&self.canvas, &self.mouse.borrow());

        let cmd = self.scenario.borrow_mut().tick(FrameInput {
            dt,
            effects_spectrum: effects.as_ref().map(|s| s.as_slice()),
            lights_spectrum: lights.as_ref().map(|s| s.as_slice()),
            pixels: pixel_frame,
            mouse_uv: uv,
        });
        drop(effects);
        drop(lights);

        if let Some(g) = &mut self.gpu {
            // Keep WebGPU surface sized to canvas backing size
            let w = self.canvas.width();
            let h = self.canvas.height();
            g.resize_if_needed(w, h);
            if cmd.particles_dirty {
                let scenario = self.scenario.borrow();
                if let Some(field) = scenario.particles() {
                    g.upload_particles(field.vertices());
                }
            }
            if let Err(e) = g.render(&cmd, dt.as_secs_f32()) {
                log::error!("render error: {:?}", e);
            }
        }
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match GpuState::new(leaked_canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        if let Some(w) = web::window() {
            let _ = w.request_animation_frame(
                tick_clone
                    .borrow()
                    .as_ref()
                    .unwrap()
                    .as_ref()
                    .unchecked_ref(),
            );
        }
    }) as Box<dyn FnMut()>));
    if let Some(w) = web::window() {
        let _ = w.request_animation_frame(tick.borrow().as_ref().unwrap().as_ref().unchecked_ref());
    }
}
