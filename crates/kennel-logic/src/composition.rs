//! Breed composition: the percentage-of-ancestry breed mix of a dog.
//!
//! Each parent hands down exactly half of every portion it carries; portions
//! of the same breed are summed. Portions are kept sorted by descending
//! percentage and always total 100.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::hybrids::HybridRegistry;

/// Tolerance for treating a percentage as exactly 100 or 50.
const PERCENT_TOLERANCE: f64 = 0.01;

/// Share of a dog's ancestry attributed to a single breed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreedPortion {
    pub breed_id: u32,
    pub breed_name: String,
    pub percentage: f64,
}

/// Recognized hybrid carried by a composition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HybridMatch {
    pub name: String,
    pub bonus_percent: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreedComposition {
    /// Sorted by descending percentage, ties by breed id.
    pub portions: Vec<BreedPortion>,
    pub is_purebred: bool,
    /// Exactly 50/50 between two purebred parents.
    pub is_first_generation: bool,
    pub hybrid: Option<HybridMatch>,
    /// `None` for purebreds, 1 for a first cross, and counting up from there.
    pub generation: Option<u32>,
    pub display_name: String,
}

fn approx(value: f64, target: f64) -> bool {
    (value - target).abs() <= PERCENT_TOLERANCE
}

impl BreedComposition {
    /// A single 100% portion.
    pub fn purebred(breed_id: u32, breed_name: &str) -> Self {
        let mut comp = Self {
            portions: vec![BreedPortion {
                breed_id,
                breed_name: breed_name.to_string(),
                percentage: 100.0,
            }],
            is_purebred: true,
            is_first_generation: false,
            hybrid: None,
            generation: None,
            display_name: String::new(),
        };
        comp.display_name = generate_display_name(&comp);
        comp
    }

    /// Composition of a puppy of `a` and `b`.
    pub fn offspring(
        a: &BreedComposition,
        b: &BreedComposition,
        registry: &HybridRegistry,
    ) -> Self {
        let mut merged: BTreeMap<u32, (String, f64)> = BTreeMap::new();
        for parent in [a, b] {
            for p in &parent.portions {
                let entry = merged
                    .entry(p.breed_id)
                    .or_insert_with(|| (p.breed_name.clone(), 0.0));
                entry.1 += p.percentage / 2.0;
            }
        }

        let mut portions: Vec<BreedPortion> = merged
            .into_iter()
            .map(|(breed_id, (breed_name, percentage))| BreedPortion {
                breed_id,
                breed_name,
                percentage,
            })
            .collect();

        // Rescale if a parent's portions didn't total 100.
        let total: f64 = portions.iter().map(|p| p.percentage).sum();
        if total > 0.0 && !approx(total, 100.0) {
            for p in &mut portions {
                p.percentage *= 100.0 / total;
            }
        }
        sort_portions(&mut portions);

        let is_purebred = portions.len() == 1 && approx(portions[0].percentage, 100.0);
        let is_even_pair = portions.len() == 2
            && approx(portions[0].percentage, 50.0)
            && approx(portions[1].percentage, 50.0);
        let is_first_generation = is_even_pair && a.is_purebred && b.is_purebred;

        let generation = if is_purebred {
            None
        } else if is_first_generation {
            Some(1)
        } else {
            Some(a.generation.unwrap_or(0).max(b.generation.unwrap_or(0)) + 1)
        };

        let hybrid = if is_even_pair {
            registry
                .find(&portions[0].breed_name, &portions[1].breed_name)
                .filter(|h| {
                    let carried = |c: &BreedComposition| {
                        c.hybrid.as_ref().is_some_and(|m| m.name == h.name)
                    };
                    is_first_generation || (carried(a) && carried(b))
                })
                .map(|h| HybridMatch {
                    name: h.name.to_string(),
                    bonus_percent: h.bonus_percent,
                })
        } else {
            None
        };

        if let Some(h) = &hybrid {
            log::debug!(
                "recognized hybrid {} (generation {:?}, +{}%)",
                h.name,
                generation,
                h.bonus_percent
            );
        }

        let mut comp = Self {
            portions,
            is_purebred,
            is_first_generation,
            hybrid,
            generation,
            display_name: String::new(),
        };
        comp.display_name = generate_display_name(&comp);
        comp
    }

    /// Largest portion.
    pub fn dominant(&self) -> Option<&BreedPortion> {
        self.portions.first()
    }

    pub fn total_percentage(&self) -> f64 {
        self.portions.iter().map(|p| p.percentage).sum()
    }

    /// Percentage of a given breed (0 if absent).
    pub fn percentage_of(&self, breed_id: u32) -> f64 {
        self.portions
            .iter()
            .find(|p| p.breed_id == breed_id)
            .map_or(0.0, |p| p.percentage)
    }

    /// `1 + bonus/100` for recognized hybrids, otherwise 1.0.
    pub fn hybrid_vigor_multiplier(&self) -> f64 {
        self.hybrid
            .as_ref()
            .map_or(1.0, |h| 1.0 + h.bonus_percent as f64 / 100.0)
    }
}

fn sort_portions(portions: &mut [BreedPortion]) {
    portions.sort_by(|x, y| {
        y.percentage
            .total_cmp(&x.percentage)
            .then(x.breed_id.cmp(&y.breed_id))
    });
}

fn generation_suffix(generation: Option<u32>) -> String {
    match generation {
        Some(g) if g > 1 => format!(" (F{g})"),
        _ => String::new(),
    }
}

/// Human-readable name for a composition.
///
/// Purebreds use the breed name, recognized hybrids the hybrid name, even
/// first crosses "A × B Mix", and heavily dominant mixes "A Mix".
pub fn generate_display_name(comp: &BreedComposition) -> String {
    let portions = &comp.portions;
    let Some(top) = portions.first() else {
        return "Unknown".to_string();
    };

    if comp.is_purebred {
        return top.breed_name.clone();
    }
    if let Some(h) = &comp.hybrid {
        return format!("{}{}", h.name, generation_suffix(comp.generation));
    }
    if comp.is_first_generation {
        return format!("{} × {} Mix", top.breed_name, portions[1].breed_name);
    }
    if top.percentage >= 75.0 - PERCENT_TOLERANCE {
        return format!("{} Mix", top.breed_name);
    }
    match portions.len() {
        1 => format!("{} Mix", top.breed_name),
        2 => format!(
            "{} × {} Mix{}",
            top.breed_name,
            portions[1].breed_name,
            generation_suffix(comp.generation)
        ),
        _ if top.percentage >= 50.0 - PERCENT_TOLERANCE => format!("{} Mix", top.breed_name),
        _ => format!("{} × {} Mix", top.breed_name, portions[1].breed_name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> &'static HybridRegistry {
        HybridRegistry::standard()
    }

    fn lab() -> BreedComposition {
        BreedComposition::purebred(1, "Labrador Retriever")
    }

    fn poodle() -> BreedComposition {
        BreedComposition::purebred(2, "Poodle")
    }

    fn beagle() -> BreedComposition {
        BreedComposition::purebred(3, "Beagle")
    }

    fn husky() -> BreedComposition {
        BreedComposition::purebred(4, "Siberian Husky")
    }

    fn assert_closed(c: &BreedComposition) {
        assert!((c.total_percentage() - 100.0).abs() < 1e-6, "{c:?}");
        for w in c.portions.windows(2) {
            assert!(w[0].percentage >= w[1].percentage);
        }
    }

    #[test]
    fn test_purebred() {
        let c = lab();
        assert!(c.is_purebred);
        assert_eq!(c.generation, None);
        assert_eq!(c.display_name, "Labrador Retriever");
        assert_eq!(c.hybrid_vigor_multiplier(), 1.0);
    }

    #[test]
    fn test_same_breed_stays_purebred() {
        let c = BreedComposition::offspring(&beagle(), &beagle(), registry());
        assert!(c.is_purebred);
        assert_eq!(c.portions.len(), 1);
        assert_eq!(c.portions[0].percentage, 100.0);
        assert_eq!(c.generation, None);
        assert_eq!(c.display_name, "Beagle");
    }

    #[test]
    fn test_first_cross_symmetry() {
        let ab = BreedComposition::offspring(&beagle(), &husky(), registry());
        let ba = BreedComposition::offspring(&husky(), &beagle(), registry());
        assert_eq!(ab, ba);
        assert!(ab.is_first_generation);
        assert!(!ab.is_purebred);
        assert_eq!(ab.generation, Some(1));
        assert_eq!(ab.portions.len(), 2);
        assert!(ab.portions.iter().all(|p| p.percentage == 50.0));
        assert_eq!(ab.display_name, "Beagle × Siberian Husky Mix");
        assert!(ab.hybrid.is_none());
    }

    #[test]
    fn test_recognized_hybrid() {
        let c = BreedComposition::offspring(&lab(), &poodle(), registry());
        let h = c.hybrid.as_ref().unwrap();
        assert_eq!(h.name, "Labradoodle");
        assert_eq!(h.bonus_percent, 15);
        assert_eq!(c.display_name, "Labradoodle");
        assert!((c.hybrid_vigor_multiplier() - 1.15).abs() < 1e-9);
    }

    #[test]
    fn test_multigeneration_hybrid() {
        let f1 = BreedComposition::offspring(&lab(), &poodle(), registry());
        let f2 = BreedComposition::offspring(&f1, &f1, registry());
        assert!(!f2.is_first_generation);
        assert_eq!(f2.generation, Some(2));
        assert_eq!(f2.hybrid.as_ref().unwrap().name, "Labradoodle");
        assert_eq!(f2.display_name, "Labradoodle (F2)");

        let f3 = BreedComposition::offspring(&f2, &f1, registry());
        assert_eq!(f3.generation, Some(3));
        assert_eq!(f3.display_name, "Labradoodle (F3)");
    }

    #[test]
    fn test_second_generation_coincidence_not_f1() {
        // Two unrelated 50/50 mixes that land on 50/50 again
        let x = BreedComposition::offspring(&beagle(), &husky(), registry());
        let y = BreedComposition::offspring(&husky(), &beagle(), registry());
        let c = BreedComposition::offspring(&x, &y, registry());
        assert!(!c.is_first_generation);
        assert_eq!(c.generation, Some(2));
        assert_eq!(c.display_name, "Beagle × Siberian Husky Mix (F2)");
    }

    #[test]
    fn test_backcross_dominant_mix() {
        let f1 = BreedComposition::offspring(&beagle(), &husky(), registry());
        let back = BreedComposition::offspring(&f1, &beagle(), registry());
        assert_closed(&back);
        assert_eq!(back.portions[0].breed_name, "Beagle");
        assert_eq!(back.portions[0].percentage, 75.0);
        assert_eq!(back.percentage_of(4), 25.0);
        assert_eq!(back.generation, Some(2));
        assert_eq!(back.display_name, "Beagle Mix");
        assert!(back.hybrid.is_none());
    }

    #[test]
    fn test_hybrid_backcross_loses_hybrid() {
        let f1 = BreedComposition::offspring(&lab(), &poodle(), registry());
        let back = BreedComposition::offspring(&f1, &poodle(), registry());
        assert!(back.hybrid.is_none());
        assert_eq!(back.display_name, "Poodle Mix");
    }

    #[test]
    fn test_three_way_mix() {
        let f1 = BreedComposition::offspring(&beagle(), &husky(), registry());
        let c = BreedComposition::offspring(&f1, &poodle(), registry());
        assert_closed(&c);
        assert_eq!(c.portions.len(), 3);
        assert_eq!(c.portions[0].breed_name, "Poodle");
        assert_eq!(c.display_name, "Poodle Mix");

        let other = BreedComposition::offspring(&lab(), &poodle(), registry());
        let four = BreedComposition::offspring(&f1, &other, registry());
        assert_closed(&four);
        assert_eq!(four.portions.len(), 4);
        // 25/25/25/25 -> ties broken by breed id
        assert_eq!(four.display_name, "Labrador Retriever × Poodle Mix");
    }

    #[test]
    fn test_closure_over_generations() {
        let pool = [lab(), poodle(), beagle(), husky()];
        let mut line = vec![BreedComposition::offspring(&pool[0], &pool[1], registry())];
        for i in 0..12 {
            let prev = line.last().unwrap().clone();
            let mate = if i % 3 == 0 {
                pool[i % pool.len()].clone()
            } else {
                line[i / 2].clone()
            };
            let next = BreedComposition::offspring(&prev, &mate, registry());
            assert_closed(&next);
            line.push(next);
        }
    }

    #[test]
    fn test_malformed_parent_is_rescaled() {
        let mut odd = beagle();
        odd.portions[0].percentage = 80.0;
        let c = BreedComposition::offspring(&odd, &husky(), registry());
        assert_closed(&c);
    }

    #[test]
    fn test_json_roundtrip() {
        let f1 = BreedComposition::offspring(&lab(), &poodle(), registry());
        let mix = BreedComposition::offspring(&f1, &beagle(), registry());
        let json = serde_json::to_string(&mix).unwrap();
        let back: BreedComposition = serde_json::from_str(&json).unwrap();
        assert_eq!(mix, back);
    }
}
