#![cfg(target_arch = "wasm32")]

pub mod audio;
pub mod dom;
pub mod events;
pub mod frame;
pub mod render;
pub mod webcam;

use audio::AudioRig;
use instant::Instant;
use scene_core::{SceneConfig, Scenario};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;
use webcam::Webcam;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("scene-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id("scene-canvas")
        .ok_or_else(|| anyhow::anyhow!("missing #scene-canvas"))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    dom::sync_canvas_backing_size(&canvas);
    events::wire_canvas_resize(&canvas);

    let scenario = Rc::new(RefCell::new(Scenario::new(SceneConfig::default())));
    let audio = Rc::new(AudioRig::new(&document)?);

    let mouse = Rc::new(RefCell::new(events::MouseState::default()));
    events::wire_mouse_move(&canvas, mouse.clone());
    events::wire_transport_buttons(&document, scenario.clone(), audio.clone());
    events::wire_mute_buttons(&document, scenario.clone(), audio.clone());

    // Ask for the camera in the background; on denial the scene keeps
    // running without particles.
    let webcam: Rc<RefCell<Option<Webcam>>> = Rc::new(RefCell::new(None));
    {
        let document = document.clone();
        let scenario = scenario.clone();
        let webcam = webcam.clone();
        spawn_local(async move {
            match Webcam::acquire(&document).await {
                Ok(cam) => {
                    scenario.borrow_mut().attach_webcam(cam.width(), cam.height());
                    *webcam.borrow_mut() = Some(cam);
                }
                Err(e) => {
                    log::warn!("webcam unavailable: {e}");
                    dom::show_notice(
                        "scene-notice",
                        "Camera unavailable; the scene runs audio-only.",
                    );
                }
            }
        });
    }

    let gpu = frame::init_gpu(&canvas).await;

    let ctx = Rc::new(RefCell::new(frame::FrameContext {
        scenario,
        audio,
        webcam,
        mouse,
        canvas,
        gpu,
        last_instant: Instant::now(),
    }));
    frame::start_loop(ctx);
    Ok(())
}
