//! Recognized designer crosses.
//!
//! A hybrid is matched by the two parent breed names, in either order. A
//! matching first cross (and its multigeneration descendants) earns the
//! hybrid's vigor bonus on every performance trait.

use serde::Serialize;

/// One recognized two-breed combination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HybridBreed {
    pub name: &'static str,
    pub breed_a: &'static str,
    pub breed_b: &'static str,
    /// Hybrid vigor, as a percentage added to performance traits.
    pub bonus_percent: u8,
    pub low_shedding: bool,
    pub description: &'static str,
}

impl HybridBreed {
    /// Whether this entry is the cross of the two named breeds, in either order.
    pub fn matches(&self, breed_a: &str, breed_b: &str) -> bool {
        (self.breed_a == breed_a && self.breed_b == breed_b)
            || (self.breed_a == breed_b && self.breed_b == breed_a)
    }
}

/// Immutable lookup table of hybrids.
#[derive(Debug)]
pub struct HybridRegistry {
    entries: &'static [HybridBreed],
}

impl HybridRegistry {
    pub const fn new(entries: &'static [HybridBreed]) -> Self {
        Self { entries }
    }

    /// The built-in registry.
    pub fn standard() -> &'static HybridRegistry {
        &HYBRID_REGISTRY
    }

    pub fn find(&self, breed_a: &str, breed_b: &str) -> Option<&'static HybridBreed> {
        self.entries.iter().find(|h| h.matches(breed_a, breed_b))
    }

    pub fn by_name(&self, name: &str) -> Option<&'static HybridBreed> {
        self.entries.iter().find(|h| h.name == name)
    }

    pub fn entries(&self) -> &'static [HybridBreed] {
        self.entries
    }
}

pub static HYBRID_REGISTRY: HybridRegistry = HybridRegistry::new(&[
    HybridBreed {
        name: "Labradoodle",
        breed_a: "Labrador Retriever",
        breed_b: "Poodle",
        bonus_percent: 15,
        low_shedding: true,
        description: "Friendly, clever, and eager to work.",
    },
    HybridBreed {
        name: "Goldendoodle",
        breed_a: "Golden Retriever",
        breed_b: "Poodle",
        bonus_percent: 15,
        low_shedding: true,
        description: "Gentle family dog with a soft, wavy coat.",
    },
    HybridBreed {
        name: "Cockapoo",
        breed_a: "Cocker Spaniel",
        breed_b: "Poodle",
        bonus_percent: 12,
        low_shedding: true,
        description: "Cheerful companion that learns quickly.",
    },
    HybridBreed {
        name: "Maltipoo",
        breed_a: "Maltese",
        breed_b: "Poodle",
        bonus_percent: 10,
        low_shedding: true,
        description: "Tiny, affectionate, and playful.",
    },
    HybridBreed {
        name: "Schnoodle",
        breed_a: "Miniature Schnauzer",
        breed_b: "Poodle",
        bonus_percent: 10,
        low_shedding: true,
        description: "Alert and spirited with a wiry coat.",
    },
    HybridBreed {
        name: "Puggle",
        breed_a: "Pug",
        breed_b: "Beagle",
        bonus_percent: 8,
        low_shedding: false,
        description: "Curious nose with a pug's charm.",
    },
    HybridBreed {
        name: "Pomsky",
        breed_a: "Pomeranian",
        breed_b: "Siberian Husky",
        bonus_percent: 10,
        low_shedding: false,
        description: "Husky looks in a compact frame.",
    },
    HybridBreed {
        name: "Cavachon",
        breed_a: "Cavalier King Charles Spaniel",
        breed_b: "Bichon Frise",
        bonus_percent: 8,
        low_shedding: true,
        description: "Sweet lap dog with a fluffy coat.",
    },
    HybridBreed {
        name: "Goldador",
        breed_a: "Golden Retriever",
        breed_b: "Labrador Retriever",
        bonus_percent: 12,
        low_shedding: false,
        description: "Steady working dog from two retriever lines.",
    },
    HybridBreed {
        name: "Chiweenie",
        breed_a: "Chihuahua",
        breed_b: "Dachshund",
        bonus_percent: 6,
        low_shedding: false,
        description: "Small, bold, and full of personality.",
    },
]);

/// Look up a hybrid in the built-in registry.
pub fn find_hybrid(breed_a: &str, breed_b: &str) -> Option<&'static HybridBreed> {
    HYBRID_REGISTRY.find(breed_a, breed_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_is_order_independent() {
        let a = find_hybrid("Labrador Retriever", "Poodle").unwrap();
        let b = find_hybrid("Poodle", "Labrador Retriever").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.name, "Labradoodle");
    }

    #[test]
    fn test_unknown_pair() {
        assert!(find_hybrid("Poodle", "Beagle").is_none());
        assert!(find_hybrid("Poodle", "Poodle").is_none());
    }

    #[test]
    fn test_names_are_exact() {
        assert!(find_hybrid("labrador retriever", "poodle").is_none());
    }

    #[test]
    fn test_registry_entries_unique() {
        let entries = HybridRegistry::standard().entries();
        for (i, a) in entries.iter().enumerate() {
            assert!(a.bonus_percent > 0, "{} has no bonus", a.name);
            for b in &entries[i + 1..] {
                assert_ne!(a.name, b.name);
                assert!(!a.matches(b.breed_a, b.breed_b), "{} duplicates {}", a.name, b.name);
            }
        }
    }

    #[test]
    fn test_by_name() {
        let h = HybridRegistry::standard().by_name("Puggle").unwrap();
        assert!(h.matches("Beagle", "Pug"));
    }
}
