//! Audio-driven visual control values.

use crate::config::SceneConfig;
use crate::constants::{
    AFTERIMAGE_IN_MAX, AFTERIMAGE_IN_MIN, AFTERIMAGE_OUT_MAX, AFTERIMAGE_OUT_MIN, BLOOM_OUT_MAX,
    BLOOM_OUT_MIN, ENERGY_IN_MAX, ENERGY_IN_MIN, GROWTH_GATE, GROWTH_IDLE, GROWTH_OUT_MAX,
    GROWTH_OUT_MIN, GROWTH_REDUCE_EXPONENT, LIGHT_OUT_MAX, LIGHT_OUT_MIN,
};
use crate::error::Result;
use crate::modulate::modulate;
use crate::spectrum::FrequencySummary;

/// Control values applied to the renderer, rewritten once per frame from
/// the latest frequency summaries and read when the post-processing
/// uniforms are built.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisualControlState {
    pub growth_factor: f32,
    pub bloom_strength: f32,
    pub afterimage_damp: f32,
    pub light_intensity: f32,
}

impl Default for VisualControlState {
    fn default() -> Self {
        Self::from_config(&SceneConfig::default())
    }
}

impl VisualControlState {
    /// Seed the audio-driven values from the configured defaults so the
    /// scene looks right before the first playing frame.
    pub fn from_config(config: &SceneConfig) -> Self {
        Self {
            growth_factor: GROWTH_IDLE,
            bloom_strength: config.bloom.strength,
            afterimage_damp: config.afterimage.damp,
            light_intensity: 0.0,
        }
    }

    /// Recompute from this frame's summaries.
    ///
    /// A mapping that errors or goes non-finite holds the previous value,
    /// so one bad frame cannot poison the render state. Missing summaries
    /// leave their channels untouched.
    pub fn retune(
        &mut self,
        effects: Option<&FrequencySummary>,
        lights: Option<&FrequencySummary>,
    ) {
        if let Some(fx) = effects {
            let reduced = fx.lower_max_fr.powf(GROWTH_REDUCE_EXPONENT);
            let growth = if reduced < GROWTH_GATE {
                Ok(GROWTH_IDLE)
            } else {
                modulate(reduced, 0.0, 1.0, GROWTH_OUT_MIN, GROWTH_OUT_MAX)
            };
            apply(&mut self.growth_factor, growth, "growth factor");
            apply(
                &mut self.afterimage_damp,
                modulate(
                    fx.overall_avg,
                    AFTERIMAGE_IN_MIN,
                    AFTERIMAGE_IN_MAX,
                    AFTERIMAGE_OUT_MIN,
                    AFTERIMAGE_OUT_MAX,
                ),
                "afterimage damp",
            );
        }
        if let Some(amb) = lights {
            apply(
                &mut self.light_intensity,
                modulate(
                    amb.overall_avg,
                    ENERGY_IN_MIN,
                    ENERGY_IN_MAX,
                    LIGHT_OUT_MIN,
                    LIGHT_OUT_MAX,
                ),
                "light intensity",
            );
            apply(
                &mut self.bloom_strength,
                modulate(
                    amb.overall_avg,
                    ENERGY_IN_MIN,
                    ENERGY_IN_MAX,
                    BLOOM_OUT_MIN,
                    BLOOM_OUT_MAX,
                ),
                "bloom strength",
            );
        }
    }
}

fn apply(slot: &mut f32, mapped: Result<f32>, what: &str) {
    match mapped {
        Ok(v) if v.is_finite() => *slot = v,
        Ok(v) => log::warn!("{what} mapped to non-finite {v}; holding {}", *slot),
        Err(e) => log::warn!("{what} mapping failed: {e}; holding {}", *slot),
    }
}
