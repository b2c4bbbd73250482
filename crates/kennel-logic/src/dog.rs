//! The dog record and the population snapshot used for ancestry lookups.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::composition::BreedComposition;
use crate::genetics::{CoatColor, CoatLength, CoatPattern, EyeColor, Genetics};

pub type DogId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub fn opposite(self) -> Self {
        match self {
            Self::Male => Self::Female,
            Self::Female => Self::Male,
        }
    }
}

/// Numeric performance dimensions, each on a 0–100 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PerformanceTrait {
    Speed,
    Agility,
    Strength,
    Endurance,
    Intelligence,
    Trainability,
}

impl PerformanceTrait {
    /// All performance traits in order.
    pub const ALL: [PerformanceTrait; 6] = [
        PerformanceTrait::Speed,
        PerformanceTrait::Agility,
        PerformanceTrait::Strength,
        PerformanceTrait::Endurance,
        PerformanceTrait::Intelligence,
        PerformanceTrait::Trainability,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Speed => "speed",
            Self::Agility => "agility",
            Self::Strength => "strength",
            Self::Endurance => "endurance",
            Self::Intelligence => "intelligence",
            Self::Trainability => "trainability",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceStats {
    pub speed: u8,
    pub agility: u8,
    pub strength: u8,
    pub endurance: u8,
    pub intelligence: u8,
    pub trainability: u8,
}

impl PerformanceStats {
    pub fn new(
        speed: u8,
        agility: u8,
        strength: u8,
        endurance: u8,
        intelligence: u8,
        trainability: u8,
    ) -> Self {
        Self {
            speed,
            agility,
            strength,
            endurance,
            intelligence,
            trainability,
        }
    }

    /// Every trait at the same value.
    pub fn uniform(value: u8) -> Self {
        Self::new(value, value, value, value, value, value)
    }

    pub fn get(&self, t: PerformanceTrait) -> u8 {
        match t {
            PerformanceTrait::Speed => self.speed,
            PerformanceTrait::Agility => self.agility,
            PerformanceTrait::Strength => self.strength,
            PerformanceTrait::Endurance => self.endurance,
            PerformanceTrait::Intelligence => self.intelligence,
            PerformanceTrait::Trainability => self.trainability,
        }
    }

    /// Set a trait value (clamped to 0–100).
    pub fn set(&mut self, t: PerformanceTrait, value: u8) {
        let v = value.min(100);
        match t {
            PerformanceTrait::Speed => self.speed = v,
            PerformanceTrait::Agility => self.agility = v,
            PerformanceTrait::Strength => self.strength = v,
            PerformanceTrait::Endurance => self.endurance = v,
            PerformanceTrait::Intelligence => self.intelligence = v,
            PerformanceTrait::Trainability => self.trainability = v,
        }
    }

    /// Mean across all traits.
    pub fn average(&self) -> f32 {
        let sum: u32 = PerformanceTrait::ALL.iter().map(|&t| self.get(t) as u32).sum();
        sum as f32 / PerformanceTrait::ALL.len() as f32
    }
}

/// Visible, categorical appearance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appearance {
    pub coat_color: CoatColor,
    pub coat_pattern: CoatPattern,
    pub coat_length: CoatLength,
    pub eye_color: EyeColor,
}

/// Day-to-day care meters (0–100, higher is better).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareStats {
    pub satiety: u8,
    pub happiness: u8,
    pub health: u8,
    pub energy: u8,
    pub cleanliness: u8,
}

impl CareStats {
    pub fn full() -> Self {
        Self {
            satiety: 100,
            happiness: 100,
            health: 100,
            energy: 100,
            cleanliness: 100,
        }
    }
}

impl Default for CareStats {
    fn default() -> Self {
        Self::full()
    }
}

/// Accumulated training sessions per performance dimension.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingProgress {
    pub speed: u32,
    pub agility: u32,
    pub strength: u32,
    pub endurance: u32,
    pub intelligence: u32,
    pub trainability: u32,
}

impl TrainingProgress {
    pub fn total(&self) -> u32 {
        self.speed
            + self.agility
            + self.strength
            + self.endurance
            + self.intelligence
            + self.trainability
    }
}

/// A single dog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dog {
    pub id: DogId,
    pub name: String,
    /// Catalog breed; for mixes, the largest portion of the composition.
    pub breed_id: u32,
    pub breed_name: String,
    pub sex: Sex,
    pub age_days: u32,
    /// Adult body weight in kg.
    pub weight_kg: f32,
    /// Back-references into the population; never owning.
    pub sire_id: Option<DogId>,
    pub dam_id: Option<DogId>,
    pub stats: PerformanceStats,
    pub appearance: Appearance,
    pub care: CareStats,
    pub training: TrainingProgress,
    /// Bond with the owner, 0–100.
    pub bond: u8,
    /// Days since this dog last produced a litter, if ever.
    pub days_since_litter: Option<u32>,
    pub genetics: Option<Genetics>,
    pub composition: Option<BreedComposition>,
}

impl Dog {
    /// Stored genetics, or genetics inferred from the visible phenotype.
    pub fn genetics_or_synthesized(&self) -> Genetics {
        self.genetics.unwrap_or_else(|| {
            Genetics::from_phenotype(&self.appearance, self.weight_kg, &self.stats)
        })
    }

    /// Stored composition, or a purebred composition of the dog's own breed.
    pub fn composition_or_purebred(&self) -> BreedComposition {
        match &self.composition {
            Some(c) => c.clone(),
            None => BreedComposition::purebred(self.breed_id, &self.breed_name),
        }
    }

    /// Known parent ids, sire first.
    pub fn parent_ids(&self) -> impl Iterator<Item = DogId> {
        self.sire_id.into_iter().chain(self.dam_id)
    }

    pub fn is_parent_of(&self, other: &Dog) -> bool {
        other.sire_id == Some(self.id) || other.dam_id == Some(self.id)
    }
}

/// Snapshot of every known dog, keyed by id. Read-only during a query.
#[derive(Debug, Clone, Default)]
pub struct Population {
    dogs: HashMap<DogId, Dog>,
}

impl Population {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_dogs(dogs: impl IntoIterator<Item = Dog>) -> Self {
        Self {
            dogs: dogs.into_iter().map(|d| (d.id, d)).collect(),
        }
    }

    /// Add or replace a dog.
    pub fn insert(&mut self, dog: Dog) {
        self.dogs.insert(dog.id, dog);
    }

    pub fn get(&self, id: DogId) -> Option<&Dog> {
        self.dogs.get(&id)
    }

    pub fn contains(&self, id: DogId) -> bool {
        self.dogs.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.dogs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dogs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Dog> {
        self.dogs.values()
    }

    /// Next unused id (one past the current maximum).
    pub fn next_id(&self) -> DogId {
        self.dogs.keys().max().map_or(1, |&m| m + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genetics::{Gene, PerformanceAllele};

    fn dog(id: DogId) -> Dog {
        Dog {
            id,
            name: format!("Dog {id}"),
            breed_id: 1,
            breed_name: "Beagle".into(),
            sex: Sex::Female,
            age_days: 800,
            weight_kg: 10.0,
            sire_id: None,
            dam_id: None,
            stats: PerformanceStats::uniform(50),
            appearance: Appearance {
                coat_color: CoatColor::Brown,
                coat_pattern: CoatPattern::Tricolor,
                coat_length: CoatLength::Short,
                eye_color: EyeColor::Brown,
            },
            care: CareStats::full(),
            training: TrainingProgress::default(),
            bond: 50,
            days_since_litter: None,
            genetics: None,
            composition: None,
        }
    }

    #[test]
    fn test_sex_opposite() {
        assert_eq!(Sex::Male.opposite(), Sex::Female);
        assert_eq!(Sex::Female.opposite(), Sex::Male);
    }

    #[test]
    fn test_stats_get_set_roundtrip() {
        let mut stats = PerformanceStats::uniform(0);
        for (i, t) in PerformanceTrait::ALL.iter().enumerate() {
            stats.set(*t, (i as u8 + 1) * 10);
        }
        assert_eq!(stats.get(PerformanceTrait::Speed), 10);
        assert_eq!(stats.get(PerformanceTrait::Trainability), 60);
        assert!((stats.average() - 35.0).abs() < 0.001);
    }

    #[test]
    fn test_stats_set_clamps() {
        let mut stats = PerformanceStats::uniform(0);
        stats.set(PerformanceTrait::Agility, 250);
        assert_eq!(stats.agility, 100);
    }

    #[test]
    fn test_missing_genetics_are_synthesized() {
        let d = dog(1);
        let g = d.genetics_or_synthesized();
        assert_eq!(g.coat_color, Gene::homozygous(CoatColor::Brown));
        assert_eq!(g.performance.speed.first, PerformanceAllele::Average);
    }

    #[test]
    fn test_missing_composition_is_own_breed() {
        let d = dog(1);
        let c = d.composition_or_purebred();
        assert!(c.is_purebred);
        assert_eq!(c.display_name, "Beagle");
    }

    #[test]
    fn test_parent_ids_and_is_parent_of() {
        let sire = dog(1);
        let dam = dog(2);
        let mut pup = dog(3);
        pup.sire_id = Some(1);
        pup.dam_id = Some(2);
        assert_eq!(pup.parent_ids().collect::<Vec<_>>(), vec![1, 2]);
        assert!(sire.is_parent_of(&pup));
        assert!(dam.is_parent_of(&pup));
        assert!(!pup.is_parent_of(&sire));
    }

    #[test]
    fn test_population_lookup() {
        let pop = Population::from_dogs(vec![dog(4), dog(9)]);
        assert_eq!(pop.len(), 2);
        assert!(pop.contains(9));
        assert!(pop.get(5).is_none());
        assert_eq!(pop.next_id(), 10);
        assert_eq!(Population::new().next_id(), 1);
    }
}
