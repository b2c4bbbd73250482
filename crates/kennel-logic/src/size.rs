//! Size bands and breeding-safety verdicts.
//!
//! Adult weight is bucketed into five ordered bands. Two dogs whose bands are
//! far apart cannot safely breed; the risk is asymmetric because carrying
//! oversized puppies is more dangerous for a small dam than siring them is for
//! a small sire.

use serde::{Deserialize, Serialize};

use crate::dog::Sex;

/// Ordered size categories by adult weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SizeBand {
    /// Under 5 kg.
    Toy,
    /// 5 to 11 kg.
    Small,
    /// 11 to 26 kg.
    Medium,
    /// 26 to 45 kg.
    Large,
    /// 45 kg and up.
    Giant,
}

impl SizeBand {
    pub const ALL: [SizeBand; 5] = [
        SizeBand::Toy,
        SizeBand::Small,
        SizeBand::Medium,
        SizeBand::Large,
        SizeBand::Giant,
    ];

    pub fn from_weight(weight_kg: f32) -> Self {
        if weight_kg < 5.0 {
            Self::Toy
        } else if weight_kg < 11.0 {
            Self::Small
        } else if weight_kg < 26.0 {
            Self::Medium
        } else if weight_kg < 45.0 {
            Self::Large
        } else {
            Self::Giant
        }
    }

    /// Position in the ordering, Toy = 0.
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Number of bands between two sizes.
    pub fn distance(self, other: SizeBand) -> u8 {
        self.index().abs_diff(other.index())
    }

    /// Plausible adult weight envelope (kg) for a dog of this band.
    pub fn weight_envelope(self) -> (f32, f32) {
        match self {
            Self::Toy => (1.5, 5.0),
            Self::Small => (5.0, 11.0),
            Self::Medium => (11.0, 26.0),
            Self::Large => (26.0, 45.0),
            Self::Giant => (45.0, 90.0),
        }
    }

    /// Clamp a weight into this band, keeping it strictly below the next breakpoint.
    pub fn clamp_weight(self, weight_kg: f32) -> f32 {
        let (lo, hi) = self.weight_envelope();
        let upper = if self == Self::Giant { hi } else { hi - 0.1 };
        weight_kg.clamp(lo, upper)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Toy => "toy",
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
            Self::Giant => "giant",
        }
    }
}

/// How concerning a size mismatch is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SizeSeverity {
    None,
    Caution,
    Warning,
    /// Natural breeding must not proceed.
    Blocked,
}

/// Verdict for a proposed pairing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizeCompatibility {
    pub compatible: bool,
    pub severity: SizeSeverity,
    pub message: String,
    /// 0.0 (no risk) to 1.0 (blocked).
    pub risk_factor: f32,
    pub band_a: SizeBand,
    pub band_b: SizeBand,
}

/// Rate the breeding safety between two dogs by weight and sex.
///
/// * distance 0: compatible, risk 0.0
/// * distance 1: compatible, risk 0.1
/// * distance 2: compatible but flagged; `Warning`/0.4 when the smaller dog is
///   the birthing parent, `Caution`/0.25 otherwise
/// * distance ≥3: `Blocked`, risk 1.0
pub fn check_compatibility(
    weight_a: f32,
    sex_a: Sex,
    weight_b: f32,
    sex_b: Sex,
) -> SizeCompatibility {
    let band_a = SizeBand::from_weight(weight_a);
    let band_b = SizeBand::from_weight(weight_b);
    let distance = band_a.distance(band_b);

    let (compatible, severity, risk_factor, message) = match distance {
        0 => (
            true,
            SizeSeverity::None,
            0.0,
            format!("Both dogs are {}; sizes are well matched.", band_a.label()),
        ),
        1 => (
            true,
            SizeSeverity::None,
            0.1,
            format!(
                "Slight size difference ({} and {}); breeding is safe.",
                band_a.label(),
                band_b.label()
            ),
        ),
        2 => {
            let smaller_sex = if band_a < band_b { sex_a } else { sex_b };
            // Same-sex pairs have no birthing parent to put at risk.
            let smaller_is_dam = smaller_sex == Sex::Female && sex_a != sex_b;
            if smaller_is_dam {
                (
                    true,
                    SizeSeverity::Warning,
                    0.4,
                    format!(
                        "The {} dam would carry puppies from a {} sire; expect a difficult pregnancy.",
                        band_a.min(band_b).label(),
                        band_a.max(band_b).label()
                    ),
                )
            } else {
                (
                    true,
                    SizeSeverity::Caution,
                    0.25,
                    format!(
                        "Notable size difference ({} and {}); monitor the pregnancy.",
                        band_a.label(),
                        band_b.label()
                    ),
                )
            }
        }
        _ => (
            false,
            SizeSeverity::Blocked,
            1.0,
            format!(
                "A {} dog and a {} dog are too different in size to breed naturally.",
                band_a.label(),
                band_b.label()
            ),
        ),
    };

    SizeCompatibility {
        compatible,
        severity,
        message,
        risk_factor,
        band_a,
        band_b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_breakpoints() {
        assert_eq!(SizeBand::from_weight(2.0), SizeBand::Toy);
        assert_eq!(SizeBand::from_weight(4.99), SizeBand::Toy);
        assert_eq!(SizeBand::from_weight(5.0), SizeBand::Small);
        assert_eq!(SizeBand::from_weight(10.9), SizeBand::Small);
        assert_eq!(SizeBand::from_weight(11.0), SizeBand::Medium);
        assert_eq!(SizeBand::from_weight(26.0), SizeBand::Large);
        assert_eq!(SizeBand::from_weight(44.9), SizeBand::Large);
        assert_eq!(SizeBand::from_weight(45.0), SizeBand::Giant);
        assert_eq!(SizeBand::from_weight(80.0), SizeBand::Giant);
    }

    #[test]
    fn test_same_band() {
        let v = check_compatibility(30.0, Sex::Male, 32.0, Sex::Female);
        assert!(v.compatible);
        assert_eq!(v.severity, SizeSeverity::None);
        assert_eq!(v.risk_factor, 0.0);
    }

    #[test]
    fn test_adjacent_bands() {
        let v = check_compatibility(20.0, Sex::Male, 30.0, Sex::Female);
        assert!(v.compatible);
        assert!((v.risk_factor - 0.1).abs() < f32::EPSILON);
    }

    #[test]
    fn test_distance_two_small_dam_is_warning() {
        // Small dam (8kg), large sire (30kg)
        let v = check_compatibility(30.0, Sex::Male, 8.0, Sex::Female);
        assert!(v.compatible);
        assert_eq!(v.severity, SizeSeverity::Warning);
        assert!((v.risk_factor - 0.4).abs() < f32::EPSILON);
    }

    #[test]
    fn test_distance_two_small_sire_is_caution() {
        let v = check_compatibility(8.0, Sex::Male, 30.0, Sex::Female);
        assert!(v.compatible);
        assert_eq!(v.severity, SizeSeverity::Caution);
        assert!((v.risk_factor - 0.25).abs() < f32::EPSILON);
    }

    #[test]
    fn test_asymmetry_independent_of_argument_order() {
        let a = check_compatibility(8.0, Sex::Female, 30.0, Sex::Male);
        let b = check_compatibility(30.0, Sex::Male, 8.0, Sex::Female);
        assert_eq!(a.severity, b.severity);
        assert_eq!(a.risk_factor, b.risk_factor);
    }

    #[test]
    fn test_distance_three_blocked() {
        // Toy (3kg) vs Large (30kg)
        let v = check_compatibility(3.0, Sex::Female, 30.0, Sex::Male);
        assert!(!v.compatible);
        assert_eq!(v.severity, SizeSeverity::Blocked);
        assert_eq!(v.risk_factor, 1.0);
        // Direction doesn't rescue a blocked pairing
        let v = check_compatibility(3.0, Sex::Male, 30.0, Sex::Female);
        assert_eq!(v.severity, SizeSeverity::Blocked);
    }

    #[test]
    fn test_distance_four_blocked() {
        let v = check_compatibility(2.0, Sex::Male, 60.0, Sex::Female);
        assert_eq!(v.severity, SizeSeverity::Blocked);
        assert!(!v.message.is_empty());
    }

    #[test]
    fn test_clamp_weight_stays_in_band() {
        for band in SizeBand::ALL {
            let (lo, hi) = band.weight_envelope();
            assert_eq!(SizeBand::from_weight(band.clamp_weight(lo - 10.0)), band);
            assert_eq!(SizeBand::from_weight(band.clamp_weight(hi + 10.0)), band);
        }
    }
}
