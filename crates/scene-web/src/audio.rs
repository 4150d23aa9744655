//! WebAudio graph: four stem tracks routed through per-track analysers.

use anyhow::anyhow;
use scene_core::constants::{ANALYSER_FFT_SIZE, SPECTRUM_BINS, TRACK_COUNT};
use std::cell::{Ref, RefCell};
use wasm_bindgen::JsCast;
use web_sys as web;

/// Stem feeding the particle and afterimage mappings.
pub const EFFECTS_STEM: usize = 2;
/// Stem feeding the light and bloom mappings.
pub const LIGHTS_STEM: usize = 3;

/// Media elements, analysers and reusable spectrum buffers for the stems.
///
/// Each `<audio id="track-N">` element is routed element -> analyser ->
/// destination, so the analysers see exactly what plays. Spectrum buffers are
/// allocated once and rewritten in place every frame.
pub struct AudioRig {
    ctx: web::AudioContext,
    elements: Vec<web::HtmlAudioElement>,
    analysers: Vec<web::AnalyserNode>,
    spectra: Vec<RefCell<Vec<u8>>>,
}

impl AudioRig {
    pub fn new(document: &web::Document) -> anyhow::Result<Self> {
        let ctx = web::AudioContext::new()
            .map_err(|e| anyhow!("AudioContext error: {:?}", e))?;

        let mut elements = Vec::with_capacity(TRACK_COUNT);
        let mut analysers = Vec::with_capacity(TRACK_COUNT);
        let mut spectra = Vec::with_capacity(TRACK_COUNT);
        for i in 0..TRACK_COUNT {
            let id = format!("track-{i}");
            let element: web::HtmlAudioElement = document
                .get_element_by_id(&id)
                .ok_or_else(|| anyhow!("missing #{id}"))?
                .dyn_into()
                .map_err(|e| anyhow!("#{id} is not an <audio> element: {:?}", e))?;

            let source = ctx
                .create_media_element_source(&element)
                .map_err(|e| anyhow!("media source error for #{id}: {:?}", e))?;
            let analyser = ctx
                .create_analyser()
                .map_err(|e| anyhow!("analyser error for #{id}: {:?}", e))?;
            analyser.set_fft_size(ANALYSER_FFT_SIZE);
            source
                .connect_with_audio_node(&analyser)
                .map_err(|e| anyhow!("connect error: {:?}", e))?;
            analyser
                .connect_with_audio_node(&ctx.destination())
                .map_err(|e| anyhow!("connect error: {:?}", e))?;

            elements.push(element);
            analysers.push(analyser);
            spectra.push(RefCell::new(vec![0u8; SPECTRUM_BINS]));
        }

        Ok(Self {
            ctx,
            elements,
            analysers,
            spectra,
        })
    }

    /// Refresh and borrow the byte spectrum for one stem. Returns `None` for
    /// an out-of-range stem index.
    pub fn read_spectrum(&self, stem: usize) -> Option<Ref<'_, Vec<u8>>> {
        let analyser = self.analysers.get(stem)?;
        {
            let mut buf = self.spectra[stem].borrow_mut();
            analyser.get_byte_frequency_data(&mut buf);
        }
        Some(self.spectra[stem].borrow())
    }

    pub fn play(&self) {
        let _ = self.ctx.resume();
        for (i, el) in self.elements.iter().enumerate() {
            if let Err(e) = el.play() {
                log::warn!("track {i} play failed: {:?}", e);
            }
        }
    }

    pub fn pause(&self) {
        for el in &self.elements {
            let _ = el.pause();
        }
        let _ = self.ctx.suspend();
    }

    pub fn stop(&self) {
        for el in &self.elements {
            let _ = el.pause();
            el.set_current_time(0.0);
        }
        let _ = self.ctx.suspend();
    }

    pub fn set_track_volume(&self, track: usize, volume: f32) {
        if let Some(el) = self.elements.get(track) {
            el.set_volume(volume.clamp(0.0, 1.0) as f64);
        }
    }
}
