//! Puppy generation: synthesizes one offspring record from two parents.
//!
//! The generator does no validation: callers gate on eligibility and size
//! first (see [`crate::breeding`]). Given two dog records it always produces
//! a puppy, synthesizing genetics or composition from phenotype when a parent
//! has none on record.
//!
//! Each performance trait is computed in a fixed order:
//!
//! `base draw → gene modifier → hybrid vigor → inbreeding penalty → clamp [1, 100]`

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::composition::BreedComposition;
use crate::config::BreedingConfig;
use crate::dog::{
    CareStats, Dog, DogId, PerformanceStats, PerformanceTrait, Population, Sex, TrainingProgress,
};
use crate::genetics::{Genetics, PerformanceAllele};
use crate::hybrids::HybridRegistry;
use crate::pedigree::{analyze_inbreeding, InbreedingAnalysis};
use crate::size::{check_compatibility, SizeBand, SizeCompatibility};

/// Read-only inputs shared by every breeding computation.
#[derive(Debug, Clone, Copy)]
pub struct BreedingContext<'a> {
    pub population: &'a Population,
    pub hybrids: &'a HybridRegistry,
    pub config: &'a BreedingConfig,
}

impl<'a> BreedingContext<'a> {
    /// Context using the built-in hybrid registry.
    pub fn new(population: &'a Population, config: &'a BreedingConfig) -> Self {
        Self {
            population,
            hybrids: HybridRegistry::standard(),
            config,
        }
    }
}

/// Everything about a pairing that doesn't depend on random draws.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairAnalysis {
    pub inbreeding: InbreedingAnalysis,
    pub size: SizeCompatibility,
    pub composition: BreedComposition,
}

impl PairAnalysis {
    pub fn hybrid_vigor_multiplier(&self) -> f64 {
        self.composition.hybrid_vigor_multiplier()
    }

    pub fn penalty_multiplier(&self) -> f64 {
        self.inbreeding.penalty_multiplier()
    }
}

/// Size check, inbreeding analysis, and offspring composition for a pair.
pub fn analyze_pair(a: &Dog, b: &Dog, ctx: &BreedingContext) -> PairAnalysis {
    let size = check_compatibility(a.weight_kg, a.sex, b.weight_kg, b.sex);
    let inbreeding = analyze_inbreeding(a, b, ctx.population, ctx.config.ancestry_depth);
    let composition = BreedComposition::offspring(
        &a.composition_or_purebred(),
        &b.composition_or_purebred(),
        ctx.hybrids,
    );
    PairAnalysis {
        inbreeding,
        size,
        composition,
    }
}

/// How one performance trait was derived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraitComputation {
    pub kind: PerformanceTrait,
    /// Uniform draw around the parents' average.
    pub base: f64,
    pub gene_modifier: f64,
    pub hybrid_vigor: f64,
    /// Value after vigor, before the inbreeding penalty.
    pub pre_penalty: f64,
    pub penalty_multiplier: f64,
    pub final_value: u8,
    /// Expressed allele of the puppy's gene for this trait.
    pub potential: PerformanceAllele,
}

/// A newly generated puppy and the reasoning behind its stats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedPuppy {
    pub dog: Dog,
    pub traits: Vec<TraitComputation>,
    pub inbreeding: InbreedingAnalysis,
    pub size: SizeCompatibility,
}

/// Generate a single puppy from two parents.
pub fn generate_puppy(
    id: DogId,
    parent_a: &Dog,
    parent_b: &Dog,
    ctx: &BreedingContext,
    rng: &mut impl Rng,
) -> GeneratedPuppy {
    let analysis = analyze_pair(parent_a, parent_b, ctx);
    generate_from_analysis(id, parent_a, parent_b, &analysis, ctx.config, rng)
}

/// Generate a puppy reusing a precomputed [`PairAnalysis`] (one per litter).
pub fn generate_from_analysis(
    id: DogId,
    parent_a: &Dog,
    parent_b: &Dog,
    analysis: &PairAnalysis,
    config: &BreedingConfig,
    rng: &mut impl Rng,
) -> GeneratedPuppy {
    let genes_a = parent_a.genetics_or_synthesized();
    let genes_b = parent_b.genetics_or_synthesized();
    let genetics = Genetics::inherit(&genes_a, &genes_b, rng);

    let vigor = analysis.hybrid_vigor_multiplier();
    let penalty = analysis.penalty_multiplier();

    let mut stats = PerformanceStats::uniform(0);
    let mut traits = Vec::with_capacity(PerformanceTrait::ALL.len());
    for kind in PerformanceTrait::ALL {
        let avg = (parent_a.stats.get(kind) as f64 + parent_b.stats.get(kind) as f64) / 2.0;
        let spread = avg * config.trait_variance.max(0.0);
        let base = if spread > 0.0 {
            rng.gen_range(avg - spread..=avg + spread)
        } else {
            avg
        };
        let gene = genetics.performance.get(kind);
        let gene_modifier = gene.stat_modifier();
        let pre_penalty = base * gene_modifier * vigor;
        let final_value = (pre_penalty * penalty).clamp(1.0, 100.0).round() as u8;
        stats.set(kind, final_value);

        traits.push(TraitComputation {
            kind,
            base,
            gene_modifier,
            hybrid_vigor: vigor,
            pre_penalty,
            penalty_multiplier: penalty,
            final_value,
            potential: gene.express_performance(rng),
        });
    }

    let appearance = genetics.express_appearance(rng);
    let size_band = genetics.size.express(rng);
    let weight_kg = offspring_weight(parent_a.weight_kg, parent_b.weight_kg, size_band, rng);
    let sex = if rng.gen_bool(0.5) { Sex::Male } else { Sex::Female };

    let (sire, dam) = if parent_a.sex == Sex::Female && parent_b.sex == Sex::Male {
        (parent_b, parent_a)
    } else {
        (parent_a, parent_b)
    };

    let composition = analysis.composition.clone();
    let breed_id = composition.dominant().map_or(parent_a.breed_id, |p| p.breed_id);

    let dog = Dog {
        id,
        name: format!("Puppy #{id}"),
        breed_id,
        breed_name: composition.display_name.clone(),
        sex,
        age_days: 0,
        weight_kg,
        sire_id: Some(sire.id),
        dam_id: Some(dam.id),
        stats,
        appearance,
        care: CareStats::full(),
        training: TrainingProgress::default(),
        bond: config.newborn_bond,
        days_since_litter: None,
        genetics: Some(genetics),
        composition: Some(composition),
    };

    log::debug!(
        "puppy {} ({}) from {} x {}: avg stat {:.1}, vigor x{:.2}, penalty x{:.2}",
        dog.id,
        dog.breed_name,
        sire.id,
        dam.id,
        dog.stats.average(),
        vigor,
        penalty
    );

    GeneratedPuppy {
        dog,
        traits,
        inbreeding: analysis.inbreeding.clone(),
        size: analysis.size.clone(),
    }
}

/// Parents' average ± 10%, pulled into the expressed size band.
fn offspring_weight(weight_a: f32, weight_b: f32, band: SizeBand, rng: &mut impl Rng) -> f32 {
    let avg = ((weight_a + weight_b) / 2.0).max(0.1);
    let drawn = rng.gen_range(avg * 0.9..=avg * 1.1);
    band.clamp_weight(drawn)
}
