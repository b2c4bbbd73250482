//! Breeding gates, litters, and previews.
//!
//! This is the layer between the kennel UI and the puppy generator. It
//! rejects pairings that fail the age, health, bond, cooldown, or size gates,
//! rolls the litter size, and summarizes likely outcomes before the player
//! commits to a pairing.

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::composition::BreedComposition;
use crate::config::BreedingConfig;
use crate::dog::{Dog, DogId, PerformanceTrait};
use crate::genetics::{
    offspring_phenotypes, stat_modifier, CoatColor, CoatLength, CoatPattern, EyeColor,
};
use crate::pedigree::InbreedingAnalysis;
use crate::puppy::{analyze_pair, generate_from_analysis, BreedingContext, GeneratedPuppy};
use crate::size::{check_compatibility, SizeBand, SizeCompatibility, SizeSeverity};

/// Why a pairing was refused.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BreedingError {
    #[error("dog {0} cannot be bred with itself")]
    SameDog(DogId),
    #[error("dogs {a} and {b} are the same sex")]
    SameSex { a: DogId, b: DogId },
    #[error("dog {id} is too young to breed ({age_days} days old, needs {min_days})")]
    TooYoung { id: DogId, age_days: u32, min_days: u32 },
    #[error("dog {id} is too old to breed ({age_days} days old, limit {max_days})")]
    TooOld { id: DogId, age_days: u32, max_days: u32 },
    #[error("dog {id} is not healthy enough to breed (health {health}, needs {min})")]
    PoorHealth { id: DogId, health: u8, min: u8 },
    #[error("dog {id} does not trust you enough to breed (bond {bond}, needs {min})")]
    LowBond { id: DogId, bond: u8, min: u8 },
    #[error("dog {id} is still recovering from a litter ({days_remaining} days remaining)")]
    Cooldown { id: DogId, days_remaining: u32 },
    #[error("size mismatch: {0}")]
    SizeBlocked(String),
}

/// Check that a single dog is ready to breed.
pub fn check_dog_ready(dog: &Dog, config: &BreedingConfig) -> Result<(), BreedingError> {
    if dog.age_days < config.min_breeding_age_days {
        return Err(BreedingError::TooYoung {
            id: dog.id,
            age_days: dog.age_days,
            min_days: config.min_breeding_age_days,
        });
    }
    if dog.age_days > config.max_breeding_age_days {
        return Err(BreedingError::TooOld {
            id: dog.id,
            age_days: dog.age_days,
            max_days: config.max_breeding_age_days,
        });
    }
    if dog.care.health < config.min_health {
        return Err(BreedingError::PoorHealth {
            id: dog.id,
            health: dog.care.health,
            min: config.min_health,
        });
    }
    if dog.bond < config.min_bond {
        return Err(BreedingError::LowBond {
            id: dog.id,
            bond: dog.bond,
            min: config.min_bond,
        });
    }
    if let Some(days) = dog.days_since_litter {
        if days < config.litter_cooldown_days {
            return Err(BreedingError::Cooldown {
                id: dog.id,
                days_remaining: config.litter_cooldown_days - days,
            });
        }
    }
    Ok(())
}

/// Run every gate for a proposed pairing.
///
/// Returns the size verdict on success so callers can surface cautions and
/// warnings that don't block breeding.
pub fn check_eligibility(
    a: &Dog,
    b: &Dog,
    config: &BreedingConfig,
) -> Result<SizeCompatibility, BreedingError> {
    if a.id == b.id {
        return Err(BreedingError::SameDog(a.id));
    }
    if a.sex == b.sex {
        return Err(BreedingError::SameSex { a: a.id, b: b.id });
    }
    check_dog_ready(a, config)?;
    check_dog_ready(b, config)?;

    let size = check_compatibility(a.weight_kg, a.sex, b.weight_kg, b.sex);
    if size.severity == SizeSeverity::Blocked {
        return Err(BreedingError::SizeBlocked(size.message));
    }
    Ok(size)
}

/// Puppies from one breeding plus the pair-level analysis they share.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Litter {
    pub puppies: Vec<GeneratedPuppy>,
    pub inbreeding: InbreedingAnalysis,
    pub size: SizeCompatibility,
    pub composition: BreedComposition,
}

impl Litter {
    pub fn len(&self) -> usize {
        self.puppies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.puppies.is_empty()
    }

    /// Puppy records ready to insert into the population.
    pub fn into_dogs(self) -> Vec<Dog> {
        self.puppies.into_iter().map(|p| p.dog).collect()
    }
}

/// Breed two dogs, producing a litter with sequential ids starting at `first_id`.
pub fn breed_litter(
    a: &Dog,
    b: &Dog,
    ctx: &BreedingContext,
    first_id: DogId,
    rng: &mut impl Rng,
) -> Result<Litter, BreedingError> {
    if let Err(e) = check_eligibility(a, b, ctx.config) {
        log::warn!("breeding {} x {} refused: {}", a.id, b.id, e);
        return Err(e);
    }

    let analysis = analyze_pair(a, b, ctx);
    let count = rng.gen_range(ctx.config.litter_size());
    let puppies: Vec<GeneratedPuppy> = (0..count as DogId)
        .map(|i| generate_from_analysis(first_id + i, a, b, &analysis, ctx.config, rng))
        .collect();

    log::info!(
        "litter of {} {} from {} x {} (relation: {}, penalty {}%)",
        puppies.len(),
        analysis.composition.display_name,
        a.id,
        b.id,
        analysis.inbreeding.relationship,
        analysis.inbreeding.stat_penalty_percent
    );

    Ok(Litter {
        puppies,
        inbreeding: analysis.inbreeding,
        size: analysis.size,
        composition: analysis.composition,
    })
}

/// Reachable range for one performance trait.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraitRange {
    pub kind: PerformanceTrait,
    pub min: u8,
    pub max: u8,
}

/// Every phenotype a puppy of this pairing could show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppearanceOutcomes {
    pub coat_colors: Vec<CoatColor>,
    pub coat_patterns: Vec<CoatPattern>,
    pub coat_lengths: Vec<CoatLength>,
    pub eye_colors: Vec<EyeColor>,
    pub sizes: Vec<SizeBand>,
}

/// What the player sees before confirming a pairing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreedingPreview {
    pub traits: Vec<TraitRange>,
    pub appearance: AppearanceOutcomes,
    pub litter_min: u32,
    pub litter_max: u32,
    pub inbreeding: InbreedingAnalysis,
    pub composition: BreedComposition,
    pub size: SizeCompatibility,
}

/// Summarize the outcomes of breeding `a` with `b` without rolling anything.
pub fn preview_breeding(a: &Dog, b: &Dog, ctx: &BreedingContext) -> BreedingPreview {
    let analysis = analyze_pair(a, b, ctx);
    let genes_a = a.genetics_or_synthesized();
    let genes_b = b.genetics_or_synthesized();
    let vigor = analysis.hybrid_vigor_multiplier();
    let penalty = analysis.penalty_multiplier();

    let traits = PerformanceTrait::ALL
        .iter()
        .map(|&kind| {
            let avg = (a.stats.get(kind) as f64 + b.stats.get(kind) as f64) / 2.0;
            let spread = avg * ctx.config.trait_variance.max(0.0);
            let ga = genes_a.performance.get(kind);
            let gb = genes_b.performance.get(kind);

            let mut lo_mod = f64::MAX;
            let mut hi_mod = f64::MIN;
            for x in [ga.first, ga.second] {
                for y in [gb.first, gb.second] {
                    let m = stat_modifier(x, y);
                    lo_mod = lo_mod.min(m);
                    hi_mod = hi_mod.max(m);
                }
            }

            let finish = |v: f64| v.clamp(1.0, 100.0).round() as u8;
            TraitRange {
                kind,
                min: finish((avg - spread) * lo_mod * vigor * penalty),
                max: finish((avg + spread) * hi_mod * vigor * penalty),
            }
        })
        .collect();

    let appearance = AppearanceOutcomes {
        coat_colors: offspring_phenotypes(&genes_a.coat_color, &genes_b.coat_color),
        coat_patterns: offspring_phenotypes(&genes_a.coat_pattern, &genes_b.coat_pattern),
        coat_lengths: offspring_phenotypes(&genes_a.coat_length, &genes_b.coat_length),
        eye_colors: offspring_phenotypes(&genes_a.eye_color, &genes_b.eye_color),
        sizes: offspring_phenotypes(&genes_a.size, &genes_b.size),
    };

    let litter = ctx.config.litter_size();
    BreedingPreview {
        traits,
        appearance,
        litter_min: *litter.start(),
        litter_max: *litter.end(),
        inbreeding: analysis.inbreeding,
        composition: analysis.composition,
        size: analysis.size,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dog::{Appearance, CareStats, PerformanceStats, Population, Sex, TrainingProgress};
    use crate::genetics::{Gene, Genetics};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn dog(id: DogId, sex: Sex, weight: f32) -> Dog {
        Dog {
            id,
            name: format!("Dog {id}"),
            breed_id: 7,
            breed_name: "Golden Retriever".into(),
            sex,
            age_days: 900,
            weight_kg: weight,
            sire_id: None,
            dam_id: None,
            stats: PerformanceStats::uniform(60),
            appearance: Appearance {
                coat_color: CoatColor::Golden,
                coat_pattern: CoatPattern::Solid,
                coat_length: CoatLength::Long,
                eye_color: EyeColor::Brown,
            },
            care: CareStats::full(),
            training: TrainingProgress::default(),
            bond: 80,
            days_since_litter: None,
            genetics: None,
            composition: None,
        }
    }

    #[test]
    fn test_eligible_pair() {
        let config = BreedingConfig::default();
        let size = check_eligibility(&dog(1, Sex::Male, 32.0), &dog(2, Sex::Female, 29.0), &config)
            .unwrap();
        assert_eq!(size.severity, SizeSeverity::None);
    }

    #[test]
    fn test_same_dog_and_same_sex() {
        let config = BreedingConfig::default();
        let a = dog(1, Sex::Male, 30.0);
        assert_eq!(check_eligibility(&a, &a, &config), Err(BreedingError::SameDog(1)));
        let b = dog(2, Sex::Male, 30.0);
        assert_eq!(
            check_eligibility(&a, &b, &config),
            Err(BreedingError::SameSex { a: 1, b: 2 })
        );
    }

    #[test]
    fn test_dog_gates() {
        let config = BreedingConfig::default();

        let mut d = dog(1, Sex::Female, 30.0);
        d.age_days = 100;
        assert!(matches!(check_dog_ready(&d, &config), Err(BreedingError::TooYoung { .. })));

        let mut d = dog(1, Sex::Female, 30.0);
        d.age_days = config.max_breeding_age_days + 1;
        assert!(matches!(check_dog_ready(&d, &config), Err(BreedingError::TooOld { .. })));

        let mut d = dog(1, Sex::Female, 30.0);
        d.care.health = 20;
        assert!(matches!(check_dog_ready(&d, &config), Err(BreedingError::PoorHealth { .. })));

        let mut d = dog(1, Sex::Female, 30.0);
        d.bond = 5;
        assert!(matches!(check_dog_ready(&d, &config), Err(BreedingError::LowBond { .. })));

        let mut d = dog(1, Sex::Female, 30.0);
        d.days_since_litter = Some(20);
        assert_eq!(
            check_dog_ready(&d, &config),
            Err(BreedingError::Cooldown {
                id: 1,
                days_remaining: 40
            })
        );
        d.days_since_litter = Some(60);
        assert!(check_dog_ready(&d, &config).is_ok());
    }

    #[test]
    fn test_size_blocked() {
        let config = BreedingConfig::default();
        let err = check_eligibility(&dog(1, Sex::Male, 3.0), &dog(2, Sex::Female, 50.0), &config)
            .unwrap_err();
        assert!(matches!(err, BreedingError::SizeBlocked(_)));
        assert!(err.to_string().starts_with("size mismatch"));
    }

    #[test]
    fn test_litter_size_and_ids() {
        let config = BreedingConfig::default();
        let sire = dog(1, Sex::Male, 32.0);
        let dam = dog(2, Sex::Female, 29.0);
        let pop = Population::from_dogs(vec![sire.clone(), dam.clone()]);
        let ctx = BreedingContext::new(&pop, &config);
        let mut rng = StdRng::seed_from_u64(17);

        for _ in 0..20 {
            let litter = breed_litter(&sire, &dam, &ctx, 50, &mut rng).unwrap();
            assert!(config.litter_size().contains(&(litter.len() as u32)));
            for (i, p) in litter.puppies.iter().enumerate() {
                assert_eq!(p.dog.id, 50 + i as DogId);
                assert_eq!(p.dog.sire_id, Some(1));
                assert_eq!(p.dog.dam_id, Some(2));
            }
        }
    }

    #[test]
    fn test_litter_refused() {
        let config = BreedingConfig::default();
        let sire = dog(1, Sex::Male, 32.0);
        let mut dam = dog(2, Sex::Female, 29.0);
        dam.bond = 0;
        let pop = Population::new();
        let ctx = BreedingContext::new(&pop, &config);
        let result = breed_litter(&sire, &dam, &ctx, 10, &mut StdRng::seed_from_u64(1));
        assert!(matches!(result, Err(BreedingError::LowBond { id: 2, .. })));
    }

    #[test]
    fn test_preview_outcomes() {
        let config = BreedingConfig::default();
        let sire = dog(1, Sex::Male, 32.0);
        let mut dam = dog(2, Sex::Female, 29.0);
        let mut genes = Genetics::from_phenotype(&dam.appearance, dam.weight_kg, &dam.stats);
        genes.coat_color = Gene::new(CoatColor::Cream, CoatColor::Black);
        dam.genetics = Some(genes);

        let pop = Population::new();
        let ctx = BreedingContext::new(&pop, &config);
        let preview = preview_breeding(&sire, &dam, &ctx);

        assert_eq!(preview.litter_min, 2);
        assert_eq!(preview.litter_max, 5);
        assert!(!preview.inbreeding.is_related);
        // Golden/Golden x Cream/Black: Golden+Cream -> Golden, Golden+Black -> either
        assert_eq!(preview.appearance.coat_colors, vec![CoatColor::Black, CoatColor::Golden]);
        assert_eq!(preview.appearance.sizes, vec![SizeBand::Large]);
        // Average alleles, no vigor: 60 ± 6
        for t in &preview.traits {
            assert_eq!((t.min, t.max), (54, 66), "{:?}", t.kind);
        }
    }

    #[test]
    fn test_preview_brackets_generated_puppies() {
        let config = BreedingConfig::default();
        let mut sire = dog(1, Sex::Male, 32.0);
        sire.stats = PerformanceStats::new(95, 40, 71, 12, 55, 88);
        let mut dam = dog(2, Sex::Female, 29.0);
        dam.breed_id = 8;
        dam.breed_name = "Poodle".into();
        dam.stats = PerformanceStats::new(30, 90, 65, 50, 99, 20);

        let pop = Population::new();
        let ctx = BreedingContext::new(&pop, &config);
        let preview = preview_breeding(&sire, &dam, &ctx);
        assert_eq!(preview.composition.display_name, "Goldendoodle");

        let mut rng = StdRng::seed_from_u64(99);
        for i in 0..40 {
            let pup = crate::puppy::generate_puppy(100 + i, &sire, &dam, &ctx, &mut rng);
            for range in &preview.traits {
                let v = pup.dog.stats.get(range.kind);
                assert!(v >= range.min && v <= range.max, "{:?}: {} not in {:?}", range.kind, v, range);
            }
        }
    }
}
