//! Pedigree walking and inbreeding analysis.
//!
//! Two distinct metrics live here:
//!
//! - [`analyze_inbreeding`] answers "how related are these two candidates?"
//!   and drives the stat penalty applied to their puppies.
//! - [`coefficient_of_inbreeding`] answers "how inbred is this dog?" and is
//!   shown on the dog's profile. It never feeds breeding penalties.
//!
//! Ancestry is walked through `sire_id`/`dam_id` back-references with a depth
//! bound and a per-lineage visited set, so cyclic legacy records terminate.

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::dog::{Dog, DogId, Population};

/// Default number of generations walked above a dog.
pub const DEFAULT_ANCESTRY_DEPTH: u8 = 5;

/// Hard ceiling on the walk depth, whatever the configured value.
pub const MAX_ANCESTRY_DEPTH: u8 = 16;

/// Maximum share of each inherited stat removed by inbreeding.
const MAX_PENALTY_PERCENT: f64 = 50.0;

/// An ancestor's position relative to the dog the tree was built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AncestorRelation {
    Parent,
    Grandparent,
    GreatGrandparent,
    /// Four or more generations up.
    Distant { generation: u8 },
}

impl AncestorRelation {
    pub fn from_generation(generation: u8) -> Self {
        match generation {
            0 | 1 => Self::Parent,
            2 => Self::Grandparent,
            3 => Self::GreatGrandparent,
            g => Self::Distant { generation: g },
        }
    }
}

impl fmt::Display for AncestorRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parent => write!(f, "Parent"),
            Self::Grandparent => write!(f, "Grandparent"),
            Self::GreatGrandparent => write!(f, "Great-Grandparent"),
            Self::Distant { generation } => {
                write!(f, "{}× Great-Grandparent", generation.saturating_sub(2))
            }
        }
    }
}

/// One ancestor in a query-scoped ancestry tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PedigreeNode {
    pub dog_id: DogId,
    /// Shallowest generation this ancestor was found at (parents = 1).
    pub generation: u8,
    pub relation: AncestorRelation,
    /// Number of distinct lineage paths reaching this ancestor.
    pub occurrences: u32,
}

/// Walk the ancestry of `dog` up to `max_depth` generations.
///
/// The dog itself is not part of the tree. Parent ids that have no record in
/// the population are still listed; their own ancestry is simply unknown.
pub fn build_ancestry_tree(
    dog: &Dog,
    population: &Population,
    max_depth: u8,
) -> HashMap<DogId, PedigreeNode> {
    let mut tree = HashMap::new();
    let mut lineage = vec![dog.id];
    let max_depth = max_depth.min(MAX_ANCESTRY_DEPTH);
    walk_parents(dog, 1, max_depth, population, &mut lineage, &mut tree);
    tree
}

fn walk_parents(
    dog: &Dog,
    generation: u8,
    max_depth: u8,
    population: &Population,
    lineage: &mut Vec<DogId>,
    tree: &mut HashMap<DogId, PedigreeNode>,
) {
    if generation > max_depth {
        return;
    }
    for parent_id in dog.parent_ids() {
        // A dog can't be its own ancestor; skip malformed loops.
        if lineage.contains(&parent_id) {
            continue;
        }

        let node = tree.entry(parent_id).or_insert(PedigreeNode {
            dog_id: parent_id,
            generation,
            relation: AncestorRelation::from_generation(generation),
            occurrences: 0,
        });
        node.occurrences += 1;
        if generation < node.generation {
            node.generation = generation;
            node.relation = AncestorRelation::from_generation(generation);
        }

        if let Some(parent) = population.get(parent_id) {
            lineage.push(parent_id);
            walk_parents(
                parent,
                generation.saturating_add(1),
                max_depth,
                population,
                lineage,
                tree,
            );
            lineage.pop();
        }
    }
}

/// How two breeding candidates are related.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Kinship {
    Unrelated,
    ParentChild,
    FullSiblings,
    HalfSiblings,
    /// One is the other's grandparent, or an aunt/uncle.
    GrandparentOrAuntUncle,
    Cousins,
    SecondCousins,
    DistantRelatives,
}

impl Kinship {
    pub fn label(self) -> &'static str {
        match self {
            Self::Unrelated => "Unrelated",
            Self::ParentChild => "Parent and offspring",
            Self::FullSiblings => "Full siblings",
            Self::HalfSiblings => "Half siblings",
            Self::GrandparentOrAuntUncle => "Grandparent or aunt/uncle",
            Self::Cousins => "Cousins",
            Self::SecondCousins => "Second cousins",
            Self::DistantRelatives => "Distant relatives",
        }
    }

    /// Classify by shared depth, counting the candidates as generation 1.
    fn from_shared_depth(depth: u8) -> Self {
        match depth {
            0..=2 => Self::GrandparentOrAuntUncle,
            3 => Self::Cousins,
            4 => Self::SecondCousins,
            _ => Self::DistantRelatives,
        }
    }
}

impl fmt::Display for Kinship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of comparing two breeding candidates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InbreedingAnalysis {
    pub is_related: bool,
    /// 0.0 (unrelated) to 1.0 (parent and offspring).
    pub coefficient: f64,
    pub relationship: Kinship,
    /// Sorted ascending.
    pub common_ancestors: Vec<DogId>,
    /// Percentage removed from every inherited stat, 0–50.
    pub stat_penalty_percent: u8,
}

impl InbreedingAnalysis {
    pub fn unrelated() -> Self {
        Self {
            is_related: false,
            coefficient: 0.0,
            relationship: Kinship::Unrelated,
            common_ancestors: Vec::new(),
            stat_penalty_percent: 0,
        }
    }

    fn with_coefficient(relationship: Kinship, coefficient: f64, common: Vec<DogId>) -> Self {
        let coefficient = coefficient.clamp(0.0, 1.0);
        Self {
            is_related: relationship != Kinship::Unrelated,
            coefficient,
            relationship,
            common_ancestors: common,
            stat_penalty_percent: stat_penalty_percent(coefficient),
        }
    }

    /// Flat multiplier applied to each inherited stat: `1 − penalty/100`.
    pub fn penalty_multiplier(&self) -> f64 {
        1.0 - self.stat_penalty_percent as f64 / 100.0
    }
}

/// `floor(coefficient × 50)`.
pub fn stat_penalty_percent(coefficient: f64) -> u8 {
    // Epsilon keeps 0.9 → 45 and 0.7 → 35 from flooring down a point.
    (coefficient.clamp(0.0, 1.0) * MAX_PENALTY_PERCENT + 1e-9).floor() as u8
}

/// Compare two candidates' ancestry and derive a pairwise coefficient.
///
/// Structural checks take priority: parent/offspring (1.0), full siblings
/// (0.9), half siblings (0.7). Otherwise the shallowest shared ancestor sets
/// the relationship and `coefficient = min(1, common/10 × 1/depth)`.
pub fn analyze_inbreeding(
    a: &Dog,
    b: &Dog,
    population: &Population,
    max_depth: u8,
) -> InbreedingAnalysis {
    let tree_a = build_ancestry_tree(a, population, max_depth);
    let tree_b = build_ancestry_tree(b, population, max_depth);

    let mut shallowest: Option<u8> = None;
    let mut common: Vec<DogId> = Vec::new();
    for (id, node_a) in &tree_a {
        if let Some(node_b) = tree_b.get(id) {
            common.push(*id);
            let g = node_a.generation.min(node_b.generation);
            shallowest = Some(shallowest.map_or(g, |s| s.min(g)));
        }
    }
    // A candidate sitting in the other's line is itself a shared ancestor,
    // one generation closer than where the other's tree found it.
    for (candidate, other_tree) in [(a, &tree_b), (b, &tree_a)] {
        if let Some(node) = other_tree.get(&candidate.id) {
            if !common.contains(&candidate.id) {
                common.push(candidate.id);
            }
            let g = node.generation.saturating_sub(1);
            shallowest = Some(shallowest.map_or(g, |s| s.min(g)));
        }
    }
    common.sort_unstable();

    let analysis = if a.is_parent_of(b) || b.is_parent_of(a) {
        InbreedingAnalysis::with_coefficient(Kinship::ParentChild, 1.0, common)
    } else if are_full_siblings(a, b) {
        InbreedingAnalysis::with_coefficient(Kinship::FullSiblings, 0.9, common)
    } else if shared_parent_count(a, b) == 1 {
        InbreedingAnalysis::with_coefficient(Kinship::HalfSiblings, 0.7, common)
    } else if let Some(generation) = shallowest {
        let depth = generation.saturating_add(1);
        let coefficient = (common.len() as f64 / 10.0) * (1.0 / depth as f64);
        InbreedingAnalysis::with_coefficient(Kinship::from_shared_depth(depth), coefficient, common)
    } else {
        InbreedingAnalysis::unrelated()
    };

    log::debug!(
        "inbreeding {} x {}: {} (coefficient {:.3}, {} common ancestors, penalty {}%)",
        a.id,
        b.id,
        analysis.relationship,
        analysis.coefficient,
        analysis.common_ancestors.len(),
        analysis.stat_penalty_percent
    );

    analysis
}

fn are_full_siblings(a: &Dog, b: &Dog) -> bool {
    match (a.sire_id, a.dam_id, b.sire_id, b.dam_id) {
        (Some(sa), Some(da), Some(sb), Some(db)) => {
            let pa: HashSet<DogId> = [sa, da].into();
            let pb: HashSet<DogId> = [sb, db].into();
            pa == pb
        }
        _ => false,
    }
}

fn shared_parent_count(a: &Dog, b: &Dog) -> usize {
    let pa: HashSet<DogId> = a.parent_ids().collect();
    let pb: HashSet<DogId> = b.parent_ids().collect();
    pa.intersection(&pb).count()
}

/// Coefficient of inbreeding for a single dog.
///
/// Every ancestor reached by more than one lineage path contributes
/// `(occurrences − 1) × 2^−generation`; the sum is capped at 1.
pub fn coefficient_of_inbreeding(dog: &Dog, population: &Population, max_depth: u8) -> f64 {
    let tree = build_ancestry_tree(dog, population, max_depth);
    let total: f64 = tree
        .values()
        .filter(|n| n.occurrences > 1)
        .map(|n| (n.occurrences - 1) as f64 * 0.5f64.powi(n.generation as i32))
        .sum();
    total.min(1.0)
}
