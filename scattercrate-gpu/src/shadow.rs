//! Shadow quality levels

use scattercrate_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Discrete shadow fidelity, numbered 0 to 6
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ShadowQuality {
    None,
    Low,
    #[default]
    Medium,
    High,
    SoftLow,
    SoftMedium,
    SoftHigh,
}

/// How the renderer draws floor shadows for one quality level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowParams {
    /// Copies drawn per point; zero disables shadows
    pub samples: u32,
    /// Radius of the jitter ring used by soft shadows, in scene units
    pub softness: f32,
    /// Combined opacity of all copies of one shadow
    pub opacity: f32,
}

impl ShadowQuality {
    pub const ALL: [ShadowQuality; 7] = [
        ShadowQuality::None,
        ShadowQuality::Low,
        ShadowQuality::Medium,
        ShadowQuality::High,
        ShadowQuality::SoftLow,
        ShadowQuality::SoftMedium,
        ShadowQuality::SoftHigh,
    ];

    /// Integer code of this level
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Human readable name, as shown in the quality selector
    pub fn label(self) -> &'static str {
        match self {
            ShadowQuality::None => "No shadows",
            ShadowQuality::Low => "Low quality shadows",
            ShadowQuality::Medium => "Medium quality shadows",
            ShadowQuality::High => "High quality shadows",
            ShadowQuality::SoftLow => "Low soft shadows",
            ShadowQuality::SoftMedium => "Medium soft shadows",
            ShadowQuality::SoftHigh => "High soft shadows",
        }
    }

    pub fn params(self) -> ShadowParams {
        let (samples, softness, opacity) = match self {
            ShadowQuality::None => (0, 0.0, 0.0),
            ShadowQuality::Low => (1, 0.0, 0.25),
            ShadowQuality::Medium => (1, 0.0, 0.35),
            ShadowQuality::High => (1, 0.0, 0.45),
            ShadowQuality::SoftLow => (4, 0.015, 0.35),
            ShadowQuality::SoftMedium => (8, 0.02, 0.4),
            ShadowQuality::SoftHigh => (16, 0.025, 0.45),
        };
        ShadowParams {
            samples,
            softness,
            opacity,
        }
    }
}

impl TryFrom<i32> for ShadowQuality {
    type Error = Error;

    fn try_from(code: i32) -> Result<Self> {
        usize::try_from(code)
            .ok()
            .and_then(|index| Self::ALL.get(index).copied())
            .ok_or_else(|| Error::InvalidData(format!("shadow quality {} is outside 0..=6", code)))
    }
}

impl std::fmt::Display for ShadowQuality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_round_trip_through_try_from() {
        for quality in ShadowQuality::ALL {
            assert_eq!(ShadowQuality::try_from(quality.code()).unwrap(), quality);
        }
    }

    #[test]
    fn test_out_of_range_codes_are_rejected() {
        assert!(ShadowQuality::try_from(-1).is_err());
        assert!(ShadowQuality::try_from(7).is_err());
    }

    #[test]
    fn test_default_is_medium() {
        assert_eq!(ShadowQuality::default(), ShadowQuality::Medium);
        assert_eq!(ShadowQuality::default().code(), 2);
    }

    #[test]
    fn test_params_grow_with_quality() {
        assert_eq!(ShadowQuality::None.params().samples, 0);
        assert!(ShadowQuality::Low.params().opacity < ShadowQuality::High.params().opacity);

        let soft: Vec<u32> = [ShadowQuality::SoftLow, ShadowQuality::SoftMedium, ShadowQuality::SoftHigh]
            .iter()
            .map(|q| q.params().samples)
            .collect();
        assert_eq!(soft, vec![4, 8, 16]);
    }
}
