//! Breed catalog: per-breed stat and weight ranges, and the adults the
//! kennel can buy or rescue.
//!
//! The catalog is plain JSON data (see `data/breeds.json`). Purchased adults
//! are always purebred and have no recorded ancestry, so their genetics are
//! synthesized from what they visibly show.

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::composition::BreedComposition;
use crate::config::BreedingConfig;
use crate::dog::{
    Appearance, CareStats, Dog, DogId, PerformanceStats, PerformanceTrait, Sex, TrainingProgress,
};
use crate::genetics::{CategoricalAllele, CoatColor, CoatLength, CoatPattern, EyeColor, Genetics};
use crate::size::SizeBand;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to parse breed catalog: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("duplicate breed id {0}")]
    DuplicateId(u32),
    #[error("breed {breed}: {kind:?} range {min}..={max} is invalid")]
    InvalidStatRange {
        breed: String,
        kind: PerformanceTrait,
        min: u8,
        max: u8,
    },
    #[error("breed {breed}: weight range {min}..={max} kg is invalid")]
    InvalidWeightRange { breed: String, min: f32, max: f32 },
}

/// Inclusive 0–100 range for one stat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatRange {
    pub min: u8,
    pub max: u8,
}

impl StatRange {
    pub fn contains(&self, value: u8) -> bool {
        (self.min..=self.max).contains(&value)
    }

    pub fn is_valid(&self) -> bool {
        self.min <= self.max && self.max <= 100
    }

    pub fn sample(&self, rng: &mut impl Rng) -> u8 {
        let lo = self.min.min(100);
        let hi = self.max.clamp(lo, 100);
        rng.gen_range(lo..=hi)
    }
}

/// Per-breed ranges for every performance trait.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatRanges {
    pub speed: StatRange,
    pub agility: StatRange,
    pub strength: StatRange,
    pub endurance: StatRange,
    pub intelligence: StatRange,
    pub trainability: StatRange,
}

impl StatRanges {
    pub fn get(&self, t: PerformanceTrait) -> StatRange {
        match t {
            PerformanceTrait::Speed => self.speed,
            PerformanceTrait::Agility => self.agility,
            PerformanceTrait::Strength => self.strength,
            PerformanceTrait::Endurance => self.endurance,
            PerformanceTrait::Intelligence => self.intelligence,
            PerformanceTrait::Trainability => self.trainability,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreedRecord {
    pub id: u32,
    pub name: String,
    pub stats: StatRanges,
    pub min_weight_kg: f32,
    pub max_weight_kg: f32,
    #[serde(default)]
    pub description: String,
}

impl BreedRecord {
    /// Size band at the middle of the breed's weight range.
    pub fn size_band(&self) -> SizeBand {
        SizeBand::from_weight((self.min_weight_kg + self.max_weight_kg) / 2.0)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        for kind in PerformanceTrait::ALL {
            let r = self.stats.get(kind);
            if !r.is_valid() {
                return Err(CatalogError::InvalidStatRange {
                    breed: self.name.clone(),
                    kind,
                    min: r.min,
                    max: r.max,
                });
            }
        }
        if !(self.min_weight_kg > 0.0 && self.min_weight_kg <= self.max_weight_kg) {
            return Err(CatalogError::InvalidWeightRange {
                breed: self.name.clone(),
                min: self.min_weight_kg,
                max: self.max_weight_kg,
            });
        }
        Ok(())
    }
}

/// All breeds available in the game, in file order.
#[derive(Debug, Clone, Default)]
pub struct BreedCatalog {
    breeds: Vec<BreedRecord>,
}

impl BreedCatalog {
    pub fn new(breeds: Vec<BreedRecord>) -> Result<Self, CatalogError> {
        let mut seen = std::collections::HashSet::new();
        for breed in &breeds {
            if !seen.insert(breed.id) {
                return Err(CatalogError::DuplicateId(breed.id));
            }
            breed.validate()?;
        }
        Ok(Self { breeds })
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let breeds: Vec<BreedRecord> = serde_json::from_str(json)?;
        let catalog = Self::new(breeds)?;
        log::debug!("loaded {} breeds", catalog.len());
        Ok(catalog)
    }

    pub fn get(&self, id: u32) -> Option<&BreedRecord> {
        self.breeds.iter().find(|b| b.id == id)
    }

    pub fn by_name(&self, name: &str) -> Option<&BreedRecord> {
        self.breeds.iter().find(|b| b.name.eq_ignore_ascii_case(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = &BreedRecord> {
        self.breeds.iter()
    }

    pub fn len(&self) -> usize {
        self.breeds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.breeds.is_empty()
    }
}

fn random_allele<A: CategoricalAllele>(rng: &mut impl Rng) -> A {
    A::ALL[rng.gen_range(0..A::ALL.len())]
}

/// Generate a purchasable purebred adult of `breed`.
///
/// Stats and weight are drawn uniformly from the breed's ranges, and the
/// dog arrives already past the minimum breeding age.
pub fn generate_adult(
    breed: &BreedRecord,
    id: DogId,
    sex: Sex,
    config: &BreedingConfig,
    rng: &mut impl Rng,
) -> Dog {
    let mut stats = PerformanceStats::uniform(0);
    for kind in PerformanceTrait::ALL {
        stats.set(kind, breed.stats.get(kind).sample(rng));
    }

    let weight_kg = if breed.max_weight_kg > breed.min_weight_kg {
        rng.gen_range(breed.min_weight_kg..=breed.max_weight_kg)
    } else {
        breed.min_weight_kg
    };

    let appearance = Appearance {
        coat_color: random_allele::<CoatColor>(rng),
        coat_pattern: random_allele::<CoatPattern>(rng),
        coat_length: random_allele::<CoatLength>(rng),
        eye_color: random_allele::<EyeColor>(rng),
    };

    let youngest = config.min_breeding_age_days;
    let oldest = (config.max_breeding_age_days / 2).max(youngest);
    let age_days = rng.gen_range(youngest..=oldest);

    Dog {
        id,
        name: format!("{} #{}", breed.name, id),
        breed_id: breed.id,
        breed_name: breed.name.clone(),
        sex,
        age_days,
        weight_kg,
        sire_id: None,
        dam_id: None,
        stats,
        appearance,
        care: CareStats::full(),
        training: TrainingProgress::default(),
        bond: config.purchased_bond,
        days_since_litter: None,
        genetics: Some(Genetics::from_phenotype(&appearance, weight_kg, &stats)),
        composition: Some(BreedComposition::purebred(breed.id, &breed.name)),
    }
}
