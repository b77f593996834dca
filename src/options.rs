use scope_core::{preset, EffectParameters, ParamOverrides, PRESET_NAMES};
use serde::Deserialize;

/// Options object accepted by `mount()` and the `data-options` attribute.
///
/// Any `EffectParameters` key (camelCase) may appear at the top level and
/// overrides the chosen preset.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MountOptions {
    pub preset: Option<String>,
    /// Request fullscreen on mount (best effort).
    pub fullscreen: bool,
    /// Dispatch a synthetic click before asking for the microphone.
    pub simulate_gesture: bool,
    #[serde(flatten)]
    pub overrides: ParamOverrides,
}

impl Default for MountOptions {
    fn default() -> Self {
        Self {
            preset: None,
            fullscreen: true,
            simulate_gesture: true,
            overrides: ParamOverrides::default(),
        }
    }
}

impl MountOptions {
    pub fn effect_parameters(&self) -> anyhow::Result<EffectParameters> {
        let name = self.preset.as_deref().unwrap_or("default");
        let base = preset(name).ok_or_else(|| {
            anyhow::anyhow!(
                "unknown preset '{}' (expected one of: {})",
                name,
                PRESET_NAMES.join(", ")
            )
        })?;
        let params = self.overrides.clone().apply(base);
        params.validate()?;
        Ok(params)
    }
}
