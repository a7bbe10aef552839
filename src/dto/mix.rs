use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    color::{Hsva, is_dark},
    state::{MixState, TargetState},
};

/// Snapshot of the current mix outcome.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MixSnapshot {
    /// The blended color as a CSS color string; `rgba(255, 255, 255, 0)`
    /// when nothing is in the mix.
    pub color: String,
    /// Canonical hex form; absent for the empty mix.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hex: Option<String>,
    /// Resolved display name; empty while pending or unavailable.
    pub name: String,
    /// Whether overlay text on this color should be light.
    pub is_dark: bool,
    /// Raw match score against the target (`100 - ΔE94`); unclamped, 0 when
    /// either side is missing.
    pub match_percentage: f64,
    /// Match score floored at 0 and rendered with two decimals for display.
    pub match_display: String,
}

impl From<&MixState> for MixSnapshot {
    fn from(mix: &MixState) -> Self {
        Self {
            color: mix.color.to_string(),
            hex: mix.color.rgb().map(|rgb| rgb.to_hex()),
            name: mix.name.clone(),
            is_dark: mix.color.rgb().is_some_and(is_dark),
            match_percentage: mix.match_percentage,
            match_display: format!("{:.2}", mix.match_percentage.max(0.0)),
        }
    }
}

/// Picker-native HSVA color carried by target requests and snapshots.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, Validate)]
pub struct TargetColorInput {
    /// Hue angle in degrees.
    #[validate(range(min = 0.0, max = 360.0))]
    pub h: f64,
    /// Saturation.
    #[validate(range(min = 0.0, max = 1.0))]
    pub s: f64,
    /// Value (brightness).
    #[validate(range(min = 0.0, max = 1.0))]
    pub v: f64,
    /// Alpha.
    #[validate(range(min = 0.0, max = 1.0))]
    pub a: f64,
}

impl From<TargetColorInput> for Hsva {
    fn from(input: TargetColorInput) -> Self {
        Hsva {
            h: input.h,
            s: input.s,
            v: input.v,
            a: input.a,
        }
    }
}

impl From<Hsva> for TargetColorInput {
    fn from(hsva: Hsva) -> Self {
        Self {
            h: hsva.h,
            s: hsva.s,
            v: hsva.v,
            a: hsva.a,
        }
    }
}

/// Snapshot of the current target color, when one is set.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TargetSnapshot {
    /// The target as entered in the picker.
    pub hsva: TargetColorInput,
    /// RGB equivalent used for scoring.
    pub rgb: String,
    /// Canonical hex form.
    pub hex: String,
    /// Resolved display name; empty while pending or unavailable.
    pub name: String,
    /// Whether overlay text on this color should be light.
    pub is_dark: bool,
}

impl From<&TargetState> for TargetSnapshot {
    fn from(target: &TargetState) -> Self {
        Self {
            hsva: target.hsva.into(),
            rgb: target.rgb.to_string(),
            hex: target.rgb.to_hex(),
            name: target.name.clone(),
            is_dark: is_dark(target.rgb),
        }
    }
}
