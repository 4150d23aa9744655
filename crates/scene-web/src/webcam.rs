//! Webcam capture downsampled through a hidden 2D canvas.

use anyhow::anyhow;
use scene_core::constants::{CAPTURE_HEIGHT, CAPTURE_WIDTH};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

/// Hidden video element plus the small canvas used to downsample each frame
/// to the fixed capture resolution.
pub struct Webcam {
    video: web::HtmlVideoElement,
    ctx: web::CanvasRenderingContext2d,
}

impl Webcam {
    /// Request the camera and wire up the capture path. Fails if the user
    /// denies the permission prompt or the platform has no camera.
    pub async fn acquire(document: &web::Document) -> anyhow::Result<Self> {
        let navigator = web::window()
            .ok_or_else(|| anyhow!("no window"))?
            .navigator();
        let devices = navigator
            .media_devices()
            .map_err(|e| anyhow!("mediaDevices unavailable: {:?}", e))?;

        let constraints = web::MediaStreamConstraints::new();
        constraints.set_video(&JsValue::TRUE);
        constraints.set_audio(&JsValue::FALSE);
        let promise = devices
            .get_user_media_with_constraints(&constraints)
            .map_err(|e| anyhow!("getUserMedia error: {:?}", e))?;
        let stream: web::MediaStream = JsFuture::from(promise)
            .await
            .map_err(|e| anyhow!("camera permission denied: {:?}", e))?
            .dyn_into()
            .map_err(|e| anyhow!("unexpected getUserMedia result: {:?}", e))?;

        let video: web::HtmlVideoElement = document
            .create_element("video")
            .map_err(|e| anyhow!("create video error: {:?}", e))?
            .dyn_into()
            .map_err(|e| anyhow!("video cast error: {:?}", e))?;
        video.set_src_object(Some(&stream));
        video.set_autoplay(true);
        video.set_muted(true);
        if let Err(e) = video.play() {
            log::warn!("video play failed: {:?}", e);
        }

        let canvas: web::HtmlCanvasElement = document
            .create_element("canvas")
            .map_err(|e| anyhow!("create canvas error: {:?}", e))?
            .dyn_into()
            .map_err(|e| anyhow!("canvas cast error: {:?}", e))?;
        canvas.set_width(CAPTURE_WIDTH);
        canvas.set_height(CAPTURE_HEIGHT);
        let ctx: web::CanvasRenderingContext2d = canvas
            .get_context("2d")
            .map_err(|e| anyhow!("2d context error: {:?}", e))?
            .ok_or_else(|| anyhow!("no 2d context"))?
            .dyn_into()
            .map_err(|e| anyhow!("2d context cast error: {:?}", e))?;

        Ok(Self { video, ctx })
    }

    pub fn width(&self) -> u32 {
        CAPTURE_WIDTH
    }

    pub fn height(&self) -> u32 {
        CAPTURE_HEIGHT
    }

    /// Grab one downsampled RGBA frame, or `None` while the stream has no
    /// decodable data yet.
    pub fn sample(&self) -> Option<Vec<u8>> {
        // ready_state < HAVE_CURRENT_DATA means drawImage would paint nothing
        if self.video.ready_state() < 2 {
            return None;
        }
        if let Err(e) = self.ctx.draw_image_with_html_video_element_and_dw_and_dh(
            &self.video,
            0.0,
            0.0,
            CAPTURE_WIDTH as f64,
            CAPTURE_HEIGHT as f64,
        ) {
            log::warn!("webcam draw failed: {:?}", e);
            return None;
        }
        match self
            .ctx
            .get_image_data(0.0, 0.0, CAPTURE_WIDTH as f64, CAPTURE_HEIGHT as f64)
        {
            Ok(data) => Some(data.data().0),
            Err(e) => {
                log::warn!("webcam read failed: {:?}", e);
                None
            }
        }
    }
}
