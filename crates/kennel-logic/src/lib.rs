//! Pure breeding and genetics logic for Kennel.
//!
//! This crate contains the breeding engine independent of any save format,
//! UI, or runtime. Functions take plain dog records and return results, so
//! every rule is unit-testable and every random draw goes through a caller
//! supplied [`rand::Rng`].
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`breeding`] | Eligibility gates, litters, and breeding previews |
//! | [`catalog`] | Breed catalog loading and purchasable adult generation |
//! | [`composition`] | Breed percentage merging, hybrid recognition, display names |
//! | [`config`] | Breeding thresholds and ranges with defaults |
//! | [`dog`] | Dog record, stats, appearance, and the population view |
//! | [`genetics`] | Allele pairs, dominance tables, inheritance and expression |
//! | [`hybrids`] | Static registry of recognized designer hybrids |
//! | [`pedigree`] | Ancestry trees, kinship classification, inbreeding penalty |
//! | [`puppy`] | Single-offspring generation pipeline |
//! | [`size`] | Size bands and cross-size breeding compatibility |

pub mod breeding;
pub mod catalog;
pub mod composition;
pub mod config;
pub mod dog;
pub mod genetics;
pub mod hybrids;
pub mod pedigree;
pub mod puppy;
pub mod size;
