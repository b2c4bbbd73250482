//! Breeding tunables: thresholds and ranges shared by the eligibility gates,
//! the puppy generator, and purchased-adult generation.
//!
//! Static lookup tables (dominance maps, hybrid registry, size bands) are not
//! configurable; they live as immutable statics next to the code that reads
//! them. Everything a designer might want to tweak per save file lives here.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// Configuration for breeding gates and offspring generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BreedingConfig {
    /// Fraction of the parent average used as the ± spread for base stat draws.
    pub trait_variance: f64,
    /// How many generations the pedigree analyzer walks above each candidate
    /// (capped at [`crate::pedigree::MAX_ANCESTRY_DEPTH`]).
    pub ancestry_depth: u8,
    /// Smallest litter a successful breeding produces.
    pub litter_min: u32,
    /// Largest litter a successful breeding produces.
    pub litter_max: u32,
    /// Minimum age (days) before a dog may breed.
    pub min_breeding_age_days: u32,
    /// Maximum age (days) after which a dog is retired from breeding.
    pub max_breeding_age_days: u32,
    /// Minimum health (0–100) for either parent.
    pub min_health: u8,
    /// Minimum bond (0–100) with the owner for either parent.
    pub min_bond: u8,
    /// Days a dog must rest after a litter.
    pub litter_cooldown_days: u32,
    /// Bond level for puppies born in the kennel.
    pub newborn_bond: u8,
    /// Bond level for adults acquired through purchase or rescue.
    pub purchased_bond: u8,
}

impl BreedingConfig {
    /// Inclusive litter-size range.
    pub fn litter_size(&self) -> RangeInclusive<u32> {
        let lo = self.litter_min.max(1);
        lo..=self.litter_max.max(lo)
    }
}

impl Default for BreedingConfig {
    fn default() -> Self {
        Self {
            trait_variance: 0.10,
            ancestry_depth: 5,
            litter_min: 2,
            litter_max: 5,
            min_breeding_age_days: 365,
            max_breeding_age_days: 365 * 8,
            min_health: 60,
            min_bond: 40,
            litter_cooldown_days: 60,
            newborn_bond: 30,
            purchased_bond: 50,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_litter_range() {
        let config = BreedingConfig::default();
        assert_eq!(config.litter_size(), 2..=5);
    }

    #[test]
    fn test_litter_range_never_inverted() {
        let config = BreedingConfig {
            litter_min: 6,
            litter_max: 3,
            ..Default::default()
        };
        assert_eq!(config.litter_size(), 6..=6);

        let config = BreedingConfig {
            litter_min: 0,
            litter_max: 0,
            ..Default::default()
        };
        assert_eq!(config.litter_size(), 1..=1);
    }

    #[test]
    fn test_newborn_bond_below_purchased() {
        let config = BreedingConfig::default();
        assert!(config.newborn_bond > 0);
        assert!(config.newborn_bond < config.purchased_bond);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: BreedingConfig = serde_json::from_str(r#"{"min_bond": 10}"#).unwrap();
        assert_eq!(config.min_bond, 10);
        assert_eq!(config.ancestry_depth, 5);
        assert!((config.trait_variance - 0.10).abs() < f64::EPSILON);
    }
}
