//! DOM event wiring: resize, pointer tracking, transport buttons.

use crate::audio::AudioRig;
use crate::dom;
use scene_core::{Scenario, TransportAction};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Default, Clone, Copy)]
pub struct MouseState {
    pub x: f32,
    pub y: f32,
    /// False until the first mousemove lands on the canvas.
    pub seen: bool,
}

/// Pointer position in canvas UV space, `None` until the pointer has
/// actually moved so the camera stays centered on page load.
#[inline]
pub fn mouse_uv(canvas: &web::HtmlCanvasElement, mouse: &MouseState) -> Option<[f32; 2]> {
    if !mouse.seen {
        return None;
    }
    let w = canvas.width().max(1) as f32;
    let h = canvas.height().max(1) as f32;
    Some([(mouse.x / w).clamp(0.0, 1.0), (mouse.y / h).clamp(0.0, 1.0)])
}

pub fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    if let Some(window) = web::window() {
        let canvas_resize = canvas.clone();
        let closure = Closure::wrap(Box::new(move || {
            dom::sync_canvas_backing_size(&canvas_resize);
        }) as Box<dyn FnMut()>);
        let _ = window
            .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

pub fn wire_mouse_move(canvas: &web::HtmlCanvasElement, mouse: Rc<RefCell<MouseState>>) {
    let canvas_move = canvas.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::MouseEvent| {
        let rect = canvas_move.get_bounding_client_rect();
        // Convert client (CSS px) to canvas internal pixel coords
        let x_css = ev.client_x() as f32 - rect.left() as f32;
        let y_css = ev.client_y() as f32 - rect.top() as f32;
        let mut ms = mouse.borrow_mut();
        ms.x = (x_css / rect.width().max(1.0) as f32) * canvas_move.width() as f32;
        ms.y = (y_css / rect.height().max(1.0) as f32) * canvas_move.height() as f32;
        ms.seen = true;
    }) as Box<dyn FnMut(_)>);
    let _ = canvas.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Hook up the play/pause/stop buttons to the scenario transport and the
/// audio elements.
pub fn wire_transport_buttons(
    document: &web::Document,
    scenario: Rc<RefCell<Scenario>>,
    audio: Rc<AudioRig>,
) {
    {
        let scenario = scenario.clone();
        let audio = audio.clone();
        dom::add_click_listener(document, "play", move || {
            scenario.borrow_mut().on_transport(TransportAction::Play);
            audio.play();
        });
    }
    {
        let scenario = scenario.clone();
        let audio = audio.clone();
        dom::add_click_listener(document, "pause", move || {
            scenario.borrow_mut().on_transport(TransportAction::Pause);
            audio.pause();
        });
    }
    dom::add_click_listener(document, "stop", move || {
        scenario.borrow_mut().on_transport(TransportAction::Stop);
        audio.stop();
    });
}

/// Hook up one mute toggle button per track (ids `mute-0` .. `mute-N`).
pub fn wire_mute_buttons(
    document: &web::Document,
    scenario: Rc<RefCell<Scenario>>,
    audio: Rc<AudioRig>,
) {
    let track_count = scenario.borrow().transport().track_count();
    for track in 0..track_count {
        let scenario = scenario.clone();
        let audio = audio.clone();
        dom::add_click_listener(document, &format!("mute-{track}"), move || {
            if let Some(gain) = scenario.borrow_mut().on_toggle_mute(track) {
                audio.set_track_volume(track, gain);
            }
        });
    }
}
