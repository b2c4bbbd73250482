//! Genetics model: alleles, dominance tables, and trait expression.
//!
//! Every inheritable trait is a [`Gene`]: two alleles, one contributed by each
//! parent. Categorical traits (coat, eyes, size) are expressed through a
//! static [`DominanceTable`]; performance traits carry a 1–5 strength rank and
//! are expressed probabilistically so weak alleles occasionally show through.
//!
//! ```
//! use kennel_logic::genetics::{stat_modifier, PerformanceAllele};
//!
//! let m = stat_modifier(PerformanceAllele::Average, PerformanceAllele::Average);
//! assert!((m - 1.0).abs() < 1e-9);
//! ```

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::dog::{Appearance, PerformanceStats, PerformanceTrait};
use crate::size::SizeBand;

/// Whether an allele masks its partner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Dominance {
    Dominant,
    Recessive,
}

/// Immutable allele → dominance lookup. Alleles missing from the table are recessive.
#[derive(Debug)]
pub struct DominanceTable<A: 'static> {
    entries: &'static [(A, Dominance)],
}

impl<A: Copy + PartialEq> DominanceTable<A> {
    pub const fn new(entries: &'static [(A, Dominance)]) -> Self {
        Self { entries }
    }

    pub fn classify(&self, allele: A) -> Dominance {
        self.entries
            .iter()
            .find(|(a, _)| *a == allele)
            .map(|&(_, d)| d)
            .unwrap_or(Dominance::Recessive)
    }

    pub fn is_dominant(&self, allele: A) -> bool {
        self.classify(allele) == Dominance::Dominant
    }
}

/// An allele of a categorical trait with a fixed dominance table.
pub trait CategoricalAllele: Copy + PartialEq + 'static {
    /// Every allele value, in display order.
    const ALL: &'static [Self];

    fn dominance_table() -> &'static DominanceTable<Self>;
}

// ── Categorical alleles ────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CoatColor {
    Black,
    Brown,
    Golden,
    Cream,
    White,
    Red,
    Gray,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CoatPattern {
    Solid,
    Merle,
    Brindle,
    Spotted,
    Tricolor,
    Sable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CoatLength {
    Short,
    Medium,
    Long,
    Wire,
    Curly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EyeColor {
    Brown,
    Amber,
    Hazel,
    Blue,
}

pub static COAT_COLOR_DOMINANCE: DominanceTable<CoatColor> = DominanceTable::new(&[
    (CoatColor::Black, Dominance::Dominant),
    (CoatColor::Brown, Dominance::Recessive),
    (CoatColor::Golden, Dominance::Dominant),
    (CoatColor::Cream, Dominance::Recessive),
    (CoatColor::White, Dominance::Recessive),
    (CoatColor::Red, Dominance::Dominant),
    (CoatColor::Gray, Dominance::Recessive),
]);

pub static COAT_PATTERN_DOMINANCE: DominanceTable<CoatPattern> = DominanceTable::new(&[
    (CoatPattern::Solid, Dominance::Dominant),
    (CoatPattern::Merle, Dominance::Dominant),
    (CoatPattern::Brindle, Dominance::Dominant),
    (CoatPattern::Spotted, Dominance::Recessive),
    (CoatPattern::Tricolor, Dominance::Recessive),
    (CoatPattern::Sable, Dominance::Recessive),
]);

pub static COAT_LENGTH_DOMINANCE: DominanceTable<CoatLength> = DominanceTable::new(&[
    (CoatLength::Short, Dominance::Dominant),
    (CoatLength::Medium, Dominance::Recessive),
    (CoatLength::Long, Dominance::Recessive),
    (CoatLength::Wire, Dominance::Dominant),
    (CoatLength::Curly, Dominance::Recessive),
]);

pub static EYE_COLOR_DOMINANCE: DominanceTable<EyeColor> = DominanceTable::new(&[
    (EyeColor::Brown, Dominance::Dominant),
    (EyeColor::Amber, Dominance::Recessive),
    (EyeColor::Hazel, Dominance::Recessive),
    (EyeColor::Blue, Dominance::Recessive),
]);

pub static SIZE_DOMINANCE: DominanceTable<SizeBand> = DominanceTable::new(&[
    (SizeBand::Toy, Dominance::Recessive),
    (SizeBand::Small, Dominance::Recessive),
    (SizeBand::Medium, Dominance::Dominant),
    (SizeBand::Large, Dominance::Dominant),
    (SizeBand::Giant, Dominance::Recessive),
]);

impl CategoricalAllele for CoatColor {
    const ALL: &'static [Self] = &[
        CoatColor::Black,
        CoatColor::Brown,
        CoatColor::Golden,
        CoatColor::Cream,
        CoatColor::White,
        CoatColor::Red,
        CoatColor::Gray,
    ];

    fn dominance_table() -> &'static DominanceTable<Self> {
        &COAT_COLOR_DOMINANCE
    }
}

impl CategoricalAllele for CoatPattern {
    const ALL: &'static [Self] = &[
        CoatPattern::Solid,
        CoatPattern::Merle,
        CoatPattern::Brindle,
        CoatPattern::Spotted,
        CoatPattern::Tricolor,
        CoatPattern::Sable,
    ];

    fn dominance_table() -> &'static DominanceTable<Self> {
        &COAT_PATTERN_DOMINANCE
    }
}

impl CategoricalAllele for CoatLength {
    const ALL: &'static [Self] = &[
        CoatLength::Short,
        CoatLength::Medium,
        CoatLength::Long,
        CoatLength::Wire,
        CoatLength::Curly,
    ];

    fn dominance_table() -> &'static DominanceTable<Self> {
        &COAT_LENGTH_DOMINANCE
    }
}

impl CategoricalAllele for EyeColor {
    const ALL: &'static [Self] = &[
        EyeColor::Brown,
        EyeColor::Amber,
        EyeColor::Hazel,
        EyeColor::Blue,
    ];

    fn dominance_table() -> &'static DominanceTable<Self> {
        &EYE_COLOR_DOMINANCE
    }
}

impl CategoricalAllele for SizeBand {
    const ALL: &'static [Self] = &SizeBand::ALL;

    fn dominance_table() -> &'static DominanceTable<Self> {
        &SIZE_DOMINANCE
    }
}

// ── Performance alleles ────────────────────────────────────────────────

/// Strength rank carried by a performance allele (1 = weakest, 5 = strongest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PerformanceAllele {
    Weak,
    BelowAverage,
    Average,
    Strong,
    Exceptional,
}

impl PerformanceAllele {
    pub const ALL: [PerformanceAllele; 5] = [
        PerformanceAllele::Weak,
        PerformanceAllele::BelowAverage,
        PerformanceAllele::Average,
        PerformanceAllele::Strong,
        PerformanceAllele::Exceptional,
    ];

    pub fn rank(self) -> u8 {
        self as u8 + 1
    }

    /// Infer the allele from an observed 0–100 stat value.
    pub fn from_stat_value(value: u8) -> Self {
        if value >= 90 {
            Self::Exceptional
        } else if value >= 70 {
            Self::Strong
        } else if value >= 50 {
            Self::Average
        } else if value >= 30 {
            Self::BelowAverage
        } else {
            Self::Weak
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Weak => "Weak",
            Self::BelowAverage => "Below Average",
            Self::Average => "Average",
            Self::Strong => "Strong",
            Self::Exceptional => "Exceptional",
        }
    }
}

// ── Expression rules ───────────────────────────────────────────────────

/// Express a categorical trait.
///
/// A lone dominant allele always wins; otherwise (both dominant or both
/// recessive) the pick is a coin flip.
pub fn express_categorical<A: Copy + PartialEq>(
    first: A,
    second: A,
    table: &DominanceTable<A>,
    rng: &mut impl Rng,
) -> A {
    match (table.classify(first), table.classify(second)) {
        (Dominance::Dominant, Dominance::Recessive) => first,
        (Dominance::Recessive, Dominance::Dominant) => second,
        _ => {
            if rng.gen_bool(0.5) {
                first
            } else {
                second
            }
        }
    }
}

/// Alleles that can be expressed from this pair, without rolling.
pub fn possible_expressions<A: Copy + PartialEq>(
    first: A,
    second: A,
    table: &DominanceTable<A>,
) -> Vec<A> {
    match (table.classify(first), table.classify(second)) {
        (Dominance::Dominant, Dominance::Recessive) => vec![first],
        (Dominance::Recessive, Dominance::Dominant) => vec![second],
        _ if first == second => vec![first],
        _ => vec![first, second],
    }
}

/// Express a performance trait.
///
/// Each allele wins with probability `rank / (rank_a + rank_b)`.
pub fn express_performance(
    first: PerformanceAllele,
    second: PerformanceAllele,
    rng: &mut impl Rng,
) -> PerformanceAllele {
    let ra = first.rank() as f64;
    let rb = second.rank() as f64;
    if rng.gen_bool(ra / (ra + rb)) {
        first
    } else {
        second
    }
}

/// Stat multiplier in [0.7, 1.3] from the average rank of two alleles.
pub fn stat_modifier(first: PerformanceAllele, second: PerformanceAllele) -> f64 {
    let avg_rank = (first.rank() as f64 + second.rank() as f64) / 2.0;
    0.7 + (avg_rank - 1.0) / 4.0 * 0.6
}

// ── Genes ──────────────────────────────────────────────────────────────

/// One inheritable trait: an allele from each parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gene<A> {
    pub first: A,
    pub second: A,
}

impl<A: Copy + PartialEq> Gene<A> {
    pub fn new(first: A, second: A) -> Self {
        Self { first, second }
    }

    /// Both slots carry the same allele (used when ancestry is untracked).
    pub fn homozygous(allele: A) -> Self {
        Self::new(allele, allele)
    }

    /// Pick one of the two alleles uniformly.
    pub fn random_allele(&self, rng: &mut impl Rng) -> A {
        if rng.gen_bool(0.5) {
            self.first
        } else {
            self.second
        }
    }

    /// Offspring gene: one random allele from each parent's gene.
    pub fn inherit(from_a: &Gene<A>, from_b: &Gene<A>, rng: &mut impl Rng) -> Self {
        let first = from_a.random_allele(rng);
        let second = from_b.random_allele(rng);
        Self::new(first, second)
    }

    pub fn is_homozygous(&self) -> bool {
        self.first == self.second
    }
}

impl<A: CategoricalAllele> Gene<A> {
    pub fn express(&self, rng: &mut impl Rng) -> A {
        express_categorical(self.first, self.second, A::dominance_table(), rng)
    }
}

impl Gene<PerformanceAllele> {
    pub fn express_performance(&self, rng: &mut impl Rng) -> PerformanceAllele {
        express_performance(self.first, self.second, rng)
    }

    pub fn stat_modifier(&self) -> f64 {
        stat_modifier(self.first, self.second)
    }
}

/// Distinct phenotypes a puppy of these two parent genes could show.
pub fn offspring_phenotypes<A: CategoricalAllele>(a: &Gene<A>, b: &Gene<A>) -> Vec<A> {
    let mut out: Vec<A> = Vec::new();
    for x in [a.first, a.second] {
        for y in [b.first, b.second] {
            for e in possible_expressions(x, y, A::dominance_table()) {
                if !out.contains(&e) {
                    out.push(e);
                }
            }
        }
    }
    out.sort_by_key(|e| A::ALL.iter().position(|x| x == e));
    out
}

/// One gene per performance dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceGenes {
    pub speed: Gene<PerformanceAllele>,
    pub agility: Gene<PerformanceAllele>,
    pub strength: Gene<PerformanceAllele>,
    pub endurance: Gene<PerformanceAllele>,
    pub intelligence: Gene<PerformanceAllele>,
    pub trainability: Gene<PerformanceAllele>,
}

impl PerformanceGenes {
    pub fn get(&self, t: PerformanceTrait) -> &Gene<PerformanceAllele> {
        match t {
            PerformanceTrait::Speed => &self.speed,
            PerformanceTrait::Agility => &self.agility,
            PerformanceTrait::Strength => &self.strength,
            PerformanceTrait::Endurance => &self.endurance,
            PerformanceTrait::Intelligence => &self.intelligence,
            PerformanceTrait::Trainability => &self.trainability,
        }
    }

    /// Build by evaluating `f` once per trait, in [`PerformanceTrait::ALL`] order.
    pub fn from_fn(mut f: impl FnMut(PerformanceTrait) -> Gene<PerformanceAllele>) -> Self {
        Self {
            speed: f(PerformanceTrait::Speed),
            agility: f(PerformanceTrait::Agility),
            strength: f(PerformanceTrait::Strength),
            endurance: f(PerformanceTrait::Endurance),
            intelligence: f(PerformanceTrait::Intelligence),
            trainability: f(PerformanceTrait::Trainability),
        }
    }
}

/// Complete gene set for one dog. Created once, never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genetics {
    pub coat_color: Gene<CoatColor>,
    pub coat_pattern: Gene<CoatPattern>,
    pub coat_length: Gene<CoatLength>,
    pub eye_color: Gene<EyeColor>,
    pub size: Gene<SizeBand>,
    pub performance: PerformanceGenes,
}

impl Genetics {
    /// Synthesize genetics from what can be observed on a dog with no
    /// recorded ancestry. Every gene is homozygous for the visible value.
    pub fn from_phenotype(
        appearance: &Appearance,
        weight_kg: f32,
        stats: &PerformanceStats,
    ) -> Self {
        Self {
            coat_color: Gene::homozygous(appearance.coat_color),
            coat_pattern: Gene::homozygous(appearance.coat_pattern),
            coat_length: Gene::homozygous(appearance.coat_length),
            eye_color: Gene::homozygous(appearance.eye_color),
            size: Gene::homozygous(SizeBand::from_weight(weight_kg)),
            performance: PerformanceGenes::from_fn(|t| {
                Gene::homozygous(PerformanceAllele::from_stat_value(stats.get(t)))
            }),
        }
    }

    /// Offspring genetics: each gene takes one random allele per parent.
    pub fn inherit(a: &Genetics, b: &Genetics, rng: &mut impl Rng) -> Self {
        Self {
            coat_color: Gene::inherit(&a.coat_color, &b.coat_color, rng),
            coat_pattern: Gene::inherit(&a.coat_pattern, &b.coat_pattern, rng),
            coat_length: Gene::inherit(&a.coat_length, &b.coat_length, rng),
            eye_color: Gene::inherit(&a.eye_color, &b.eye_color, rng),
            size: Gene::inherit(&a.size, &b.size, rng),
            performance: PerformanceGenes::from_fn(|t| {
                Gene::inherit(a.performance.get(t), b.performance.get(t), rng)
            }),
        }
    }

    /// Express every categorical appearance gene.
    pub fn express_appearance(&self, rng: &mut impl Rng) -> Appearance {
        Appearance {
            coat_color: self.coat_color.express(rng),
            coat_pattern: self.coat_pattern.express(rng),
            coat_length: self.coat_length.express(rng),
            eye_color: self.eye_color.express(rng),
        }
    }
}
