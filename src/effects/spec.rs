use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{
    effects::{ColorGrade, FilmGrain, FrameEffect, MotionBlur, Vignette},
    error::{EffectError, ForgeError, Result},
};

pub const DEFAULT_BLUR_AMOUNT: f32 = 0.3;
pub const DEFAULT_GRAIN_INTENSITY: f32 = 0.1;
pub const DEFAULT_VIGNETTE_INTENSITY: f32 = 0.5;

/// Color grading presets
///
/// Parsing never fails: unrecognized names grade as [`ColorPreset::Warm`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ColorPreset {
    #[default]
    Warm,
    Cool,
    Vintage,
    Cyberpunk,
}

impl ColorPreset {
    /// Per-channel (R, G, B) multipliers
    pub fn multipliers(self) -> [f32; 3] {
        match self {
            ColorPreset::Warm => [1.1, 1.0, 0.9],
            ColorPreset::Cool => [0.9, 1.0, 1.1],
            ColorPreset::Vintage => [1.2, 1.0, 0.8],
            ColorPreset::Cyberpunk => [1.0, 0.9, 1.3],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ColorPreset::Warm => "warm",
            ColorPreset::Cool => "cool",
            ColorPreset::Vintage => "vintage",
            ColorPreset::Cyberpunk => "cyberpunk",
        }
    }

    /// Resolve a preset name, falling back to warm
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "cool" => ColorPreset::Cool,
            "vintage" => ColorPreset::Vintage,
            "cyberpunk" => ColorPreset::Cyberpunk,
            "warm" => ColorPreset::Warm,
            other => {
                tracing::debug!("Unknown color preset '{}', using warm", other);
                ColorPreset::Warm
            }
        }
    }
}

impl FromStr for ColorPreset {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::from_name(s))
    }
}

impl From<String> for ColorPreset {
    fn from(value: String) -> Self {
        Self::from_name(&value)
    }
}

impl From<ColorPreset> for String {
    fn from(value: ColorPreset) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for ColorPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single parameterized pixel transform request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EffectSpec {
    MotionBlur { amount: f32 },
    FilmGrain { intensity: f32 },
    Vignette { intensity: f32 },
    ColorGrade { preset: ColorPreset },
}

impl EffectSpec {
    pub fn motion_blur(amount: f32) -> Self {
        Self::MotionBlur { amount }
    }

    pub fn film_grain(intensity: f32) -> Self {
        Self::FilmGrain { intensity }
    }

    pub fn vignette(intensity: f32) -> Self {
        Self::Vignette { intensity }
    }

    pub fn color_grade(preset: ColorPreset) -> Self {
        Self::ColorGrade { preset }
    }

    /// The effect implementation this spec describes
    pub fn to_effect(&self) -> Box<dyn FrameEffect> {
        match *self {
            EffectSpec::MotionBlur { amount } => Box::new(MotionBlur::new(amount)),
            EffectSpec::FilmGrain { intensity } => Box::new(FilmGrain::new(intensity)),
            EffectSpec::Vignette { intensity } => Box::new(Vignette::new(intensity)),
            EffectSpec::ColorGrade { preset } => Box::new(ColorGrade::new(preset)),
        }
    }

    /// Reject parameters outside their documented range
    pub fn validate(&self) -> Result<()> {
        self.to_effect().validate()
    }
}

impl fmt::Display for EffectSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EffectSpec::MotionBlur { amount } => write!(f, "blur:{}", amount),
            EffectSpec::FilmGrain { intensity } => write!(f, "grain:{}", intensity),
            EffectSpec::Vignette { intensity } => write!(f, "vignette:{}", intensity),
            EffectSpec::ColorGrade { preset } => write!(f, "grade:{}", preset),
        }
    }
}

/// Parses the compact `name[:value]` form, e.g. `grain:0.1` or `grade:cool`.
/// A missing value uses the effect's default.
impl FromStr for EffectSpec {
    type Err = ForgeError;

    fn from_str(s: &str) -> Result<Self> {
        let (name, value) = match s.split_once(':') {
            Some((name, value)) => (name.trim(), Some(value.trim())),
            None => (s.trim(), None),
        };

        let level = |default: f32| -> Result<f32> {
            match value {
                None | Some("") => Ok(default),
                Some(raw) => raw.parse::<f32>().map_err(|_| {
                    EffectError::InvalidParameter {
                        effect: name.to_string(),
                        details: format!("'{}' is not a number", raw),
                    }
                    .into()
                }),
            }
        };

        let spec = match name.to_ascii_lowercase().as_str() {
            "blur" | "motion_blur" => EffectSpec::motion_blur(level(DEFAULT_BLUR_AMOUNT)?),
            "grain" | "film_grain" => EffectSpec::film_grain(level(DEFAULT_GRAIN_INTENSITY)?),
            "vignette" => EffectSpec::vignette(level(DEFAULT_VIGNETTE_INTENSITY)?),
            "grade" | "color_grade" => {
                EffectSpec::color_grade(ColorPreset::from_name(value.unwrap_or("warm")))
            }
            _ => {
                return Err(EffectError::UnknownEffect { spec: s.to_string() }.into());
            }
        };

        spec.validate()?;
        Ok(spec)
    }
}
