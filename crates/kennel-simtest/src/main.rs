//! Kennel Headless Breeding Harness
//!
//! Validates breeding logic and catalog data in-process. No save files,
//! no UI, no rendering.
//!
//! Usage:
//!   cargo run -p kennel-simtest
//!   cargo run -p kennel-simtest -- --verbose
//!   cargo run -p kennel-simtest -- --seed 1234
//!
//! Set `RUST_LOG=debug` to see per-puppy and per-pair engine logs.

use std::collections::HashMap;

use kennel_logic::breeding::{self, BreedingError};
use kennel_logic::catalog::{self, BreedCatalog};
use kennel_logic::composition::BreedComposition;
use kennel_logic::config::BreedingConfig;
use kennel_logic::dog::{Dog, PerformanceTrait, Population, Sex};
use kennel_logic::hybrids::HybridRegistry;
use kennel_logic::pedigree::{self, Kinship};
use kennel_logic::puppy::{self, BreedingContext};
use kennel_logic::size::{self, SizeBand, SizeSeverity};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// ── Breed catalog (same JSON the game ships) ────────────────────────────
const BREEDS_JSON: &str = include_str!("../../../data/breeds.json");

const DEFAULT_SEED: u64 = 42;
const SWEEP_GENERATIONS: usize = 6;
const SWEEP_PAIRS_PER_GENERATION: usize = 12;

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn parse_seed() -> u64 {
    let args: Vec<String> = std::env::args().collect();
    args.iter()
        .position(|a| a == "--seed")
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_SEED)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let verbose = std::env::args().any(|a| a == "--verbose");
    let seed = parse_seed();
    println!("=== Kennel Breeding Harness (seed {}) ===\n", seed);

    let mut results = Vec::new();

    let catalog = match BreedCatalog::from_json(BREEDS_JSON) {
        Ok(c) => c,
        Err(e) => {
            println!("  ✗ catalog_parse: {}", e);
            println!("\n=== RESULT: 0/1 passed, 1 failed ===");
            std::process::exit(1);
        }
    };
    let config = BreedingConfig::default();
    log::info!("loaded {} breeds from catalog", catalog.len());

    // 1. Breed catalog validation
    results.extend(validate_catalog(&catalog, verbose));

    // 2. Composition over every breed pair
    results.extend(validate_composition(&catalog, verbose));

    // 3. Size compatibility matrix
    results.extend(validate_size_matrix(verbose));

    // 4. Pedigree and inbreeding on a synthetic family
    results.extend(validate_pedigree(&catalog, &config, seed, verbose));

    // 5. Multi-generation breeding sweep
    results.extend(validate_generation_sweep(&catalog, &config, seed, verbose));

    // 6. Preview ranges against generated puppies
    results.extend(validate_preview(&catalog, &config, seed, verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── 1. Breed Catalog ────────────────────────────────────────────────────

fn validate_catalog(catalog: &BreedCatalog, verbose: bool) -> Vec<TestResult> {
    println!("--- Breed Catalog ---");
    let mut results = Vec::new();

    results.push(TestResult {
        name: "catalog_not_empty".into(),
        passed: catalog.len() >= 10,
        detail: format!("{} breeds loaded", catalog.len()),
    });

    // Every hybrid must be breedable from catalog breeds
    let missing: Vec<String> = HybridRegistry::standard()
        .entries()
        .iter()
        .flat_map(|h| [h.breed_a, h.breed_b])
        .filter(|name| catalog.by_name(name).is_none())
        .map(String::from)
        .collect();
    results.push(TestResult {
        name: "catalog_covers_hybrids".into(),
        passed: missing.is_empty(),
        detail: if missing.is_empty() {
            format!(
                "all {} hybrids have both parent breeds",
                HybridRegistry::standard().entries().len()
            )
        } else {
            format!("missing breeds: {}", missing.join(", "))
        },
    });

    // Every size band represented
    let mut bands: HashMap<SizeBand, usize> = HashMap::new();
    for breed in catalog.iter() {
        *bands.entry(breed.size_band()).or_default() += 1;
    }
    let absent: Vec<&str> = SizeBand::ALL
        .iter()
        .filter(|b| !bands.contains_key(*b))
        .map(|b| b.label())
        .collect();
    results.push(TestResult {
        name: "catalog_spans_sizes".into(),
        passed: absent.is_empty(),
        detail: if absent.is_empty() {
            SizeBand::ALL
                .iter()
                .map(|b| format!("{}={}", b.label(), bands.get(b).copied().unwrap_or(0)))
                .collect::<Vec<_>>()
                .join(", ")
        } else {
            format!("no breeds in: {}", absent.join(", "))
        },
    });

    if verbose {
        for breed in catalog.iter() {
            println!(
                "    {:>3} {:<30} {:>5.1}-{:<5.1} kg  {}",
                breed.id,
                breed.name,
                breed.min_weight_kg,
                breed.max_weight_kg,
                breed.size_band().label()
            );
        }
    }

    results
}

// ── 2. Composition ──────────────────────────────────────────────────────

fn validate_composition(catalog: &BreedCatalog, verbose: bool) -> Vec<TestResult> {
    println!("--- Breed Composition ---");
    let mut results = Vec::new();
    let registry = HybridRegistry::standard();

    let purebreds: Vec<BreedComposition> = catalog
        .iter()
        .map(|b| BreedComposition::purebred(b.id, &b.name))
        .collect();

    let mut asymmetric = Vec::new();
    let mut bad_totals = 0;
    let mut hybrids_found = 0;
    let mut pairs = 0;
    for (i, a) in purebreds.iter().enumerate() {
        for b in &purebreds[i..] {
            pairs += 1;
            let ab = BreedComposition::offspring(a, b, registry);
            let ba = BreedComposition::offspring(b, a, registry);
            if ab != ba {
                asymmetric.push(format!("{} x {}", a.display_name, b.display_name));
            }
            if (ab.total_percentage() - 100.0).abs() > 0.01 {
                bad_totals += 1;
            }
            if ab.hybrid.is_some() {
                hybrids_found += 1;
            }
        }
    }

    results.push(TestResult {
        name: "composition_symmetric".into(),
        passed: asymmetric.is_empty(),
        detail: if asymmetric.is_empty() {
            format!("{} pairs order-independent", pairs)
        } else {
            format!("asymmetric: {}", asymmetric.join(", "))
        },
    });

    results.push(TestResult {
        name: "composition_closed".into(),
        passed: bad_totals == 0,
        detail: format!("{} of {} pairs off 100%", bad_totals, pairs),
    });

    results.push(TestResult {
        name: "composition_hybrids_recognized".into(),
        passed: hybrids_found == registry.entries().len(),
        detail: format!(
            "{} first crosses recognized, {} registry entries",
            hybrids_found,
            registry.entries().len()
        ),
    });

    // Backcross: a Labradoodle bred back to a Poodle is no longer a hybrid
    let lab = catalog.by_name("Labrador Retriever");
    let poodle = catalog.by_name("Poodle");
    if let (Some(lab), Some(poodle)) = (lab, poodle) {
        let lab = BreedComposition::purebred(lab.id, &lab.name);
        let poodle = BreedComposition::purebred(poodle.id, &poodle.name);
        let f1 = BreedComposition::offspring(&lab, &poodle, registry);
        let back = BreedComposition::offspring(&f1, &poodle, registry);
        let f2 = BreedComposition::offspring(&f1, &f1, registry);
        if verbose {
            println!("    F1: {}", f1.display_name);
            println!("    backcross: {}", back.display_name);
            println!("    F2: {}", f2.display_name);
        }
        results.push(TestResult {
            name: "composition_generations".into(),
            passed: f1.display_name == "Labradoodle"
                && back.hybrid.is_none()
                && back.display_name == "Poodle Mix"
                && f2.display_name == "Labradoodle (F2)",
            detail: format!(
                "F1={}, backcross={}, F2={}",
                f1.display_name, back.display_name, f2.display_name
            ),
        });
    }

    results
}

// ── 3. Size Matrix ──────────────────────────────────────────────────────

fn validate_size_matrix(verbose: bool) -> Vec<TestResult> {
    println!("--- Size Compatibility ---");
    let mut results = Vec::new();

    let mut mismatches = Vec::new();
    for a in SizeBand::ALL {
        for b in SizeBand::ALL {
            let (wa, _) = a.weight_envelope();
            let (wb, _) = b.weight_envelope();
            let check = size::check_compatibility(wa, Sex::Male, wb, Sex::Female);
            let expected_blocked = a.distance(b) >= 3;
            if (check.severity == SizeSeverity::Blocked) != expected_blocked
                || check.compatible == expected_blocked
            {
                mismatches.push(format!("{}/{}", a.label(), b.label()));
            }
            if verbose {
                println!(
                    "    {:<6} x {:<6} {:?} risk {:.2}",
                    a.label(),
                    b.label(),
                    check.severity,
                    check.risk_factor
                );
            }
        }
    }

    results.push(TestResult {
        name: "size_blocking".into(),
        passed: mismatches.is_empty(),
        detail: if mismatches.is_empty() {
            "blocked exactly at 3+ bands apart".into()
        } else {
            format!("wrong verdict for {}", mismatches.join(", "))
        },
    });

    let dam_smaller = size::check_compatibility(30.0, Sex::Male, 10.0, Sex::Female);
    let sire_smaller = size::check_compatibility(10.0, Sex::Male, 30.0, Sex::Female);
    results.push(TestResult {
        name: "size_dam_warning".into(),
        passed: dam_smaller.severity == SizeSeverity::Warning
            && sire_smaller.severity == SizeSeverity::Caution,
        detail: format!(
            "small dam: {:?}, small sire: {:?}",
            dam_smaller.severity, sire_smaller.severity
        ),
    });

    results
}

// ── 4. Pedigree ─────────────────────────────────────────────────────────

fn founder(
    catalog: &BreedCatalog,
    config: &BreedingConfig,
    id: u64,
    sex: Sex,
    rng: &mut StdRng,
) -> Option<Dog> {
    let breed = catalog.by_name("Border Collie")?;
    Some(catalog::generate_adult(breed, id, sex, config, rng))
}

fn validate_pedigree(
    catalog: &BreedCatalog,
    config: &BreedingConfig,
    seed: u64,
    verbose: bool,
) -> Vec<TestResult> {
    println!("--- Pedigree & Inbreeding ---");
    let mut results = Vec::new();
    let mut rng = StdRng::seed_from_u64(seed);

    let founders: Vec<Dog> = [(1, Sex::Male), (2, Sex::Female), (3, Sex::Female), (4, Sex::Male)]
        .into_iter()
        .filter_map(|(id, sex)| founder(catalog, config, id, sex, &mut rng))
        .collect();
    if founders.len() != 4 {
        results.push(TestResult {
            name: "pedigree_founders".into(),
            passed: false,
            detail: "Border Collie missing from catalog".into(),
        });
        return results;
    }

    let mut pop = Population::from_dogs(founders.clone());
    let ctx = BreedingContext::new(&pop, config);
    let mut son = puppy::generate_puppy(5, &founders[0], &founders[1], &ctx, &mut rng).dog;
    let mut daughter = puppy::generate_puppy(6, &founders[0], &founders[1], &ctx, &mut rng).dog;
    son.sex = Sex::Male;
    daughter.sex = son.sex.opposite();
    pop.insert(son.clone());
    pop.insert(daughter.clone());

    let ctx = BreedingContext::new(&pop, config);
    let mut cousin_a = puppy::generate_puppy(7, &son, &founders[2], &ctx, &mut rng).dog;
    let mut cousin_b = puppy::generate_puppy(8, &founders[3], &daughter, &ctx, &mut rng).dog;
    cousin_a.sex = Sex::Male;
    cousin_b.sex = cousin_a.sex.opposite();
    pop.insert(cousin_a.clone());
    pop.insert(cousin_b.clone());

    let depth = config.ancestry_depth;
    let cases = [
        ("parent_child", &founders[0], &son, Kinship::ParentChild, 50),
        ("full_siblings", &son, &daughter, Kinship::FullSiblings, 45),
        ("grandparent", &founders[0], &cousin_a, Kinship::GrandparentOrAuntUncle, 2),
        ("cousins", &cousin_a, &cousin_b, Kinship::Cousins, 3),
        ("unrelated", &founders[0], &founders[3], Kinship::Unrelated, 0),
    ];
    for (name, a, b, kinship, penalty) in cases {
        let analysis = pedigree::analyze_inbreeding(a, b, &pop, depth);
        if verbose {
            println!(
                "    {} x {}: {} coef {:.3} penalty {}% common {:?}",
                a.id,
                b.id,
                analysis.relationship,
                analysis.coefficient,
                analysis.stat_penalty_percent,
                analysis.common_ancestors
            );
        }
        results.push(TestResult {
            name: format!("pedigree_{}", name),
            passed: analysis.relationship == kinship && analysis.stat_penalty_percent == penalty,
            detail: format!(
                "{} ({}%), expected {} ({}%)",
                analysis.relationship, analysis.stat_penalty_percent, kinship, penalty
            ),
        });
    }

    // Inbred individual: puppy of full siblings
    let ctx = BreedingContext::new(&pop, config);
    let inbred = puppy::generate_puppy(9, &son, &daughter, &ctx, &mut rng).dog;
    pop.insert(inbred.clone());
    let coi = pedigree::coefficient_of_inbreeding(&inbred, &pop, depth);
    let outbred = pedigree::coefficient_of_inbreeding(&cousin_a, &pop, depth);
    results.push(TestResult {
        name: "pedigree_coefficient_of_inbreeding".into(),
        passed: (coi - 0.5).abs() < 1e-9 && outbred == 0.0,
        detail: format!("sibling cross {:.3}, outcross {:.3}", coi, outbred),
    });

    results
}

// ── 5. Generation Sweep ─────────────────────────────────────────────────

fn validate_generation_sweep(
    catalog: &BreedCatalog,
    config: &BreedingConfig,
    seed: u64,
    verbose: bool,
) -> Vec<TestResult> {
    println!("--- Generation Sweep ---");
    let mut results = Vec::new();
    let mut rng = StdRng::seed_from_u64(seed.wrapping_add(1));

    let mut pop = Population::new();
    for breed in catalog.iter() {
        for sex in [Sex::Male, Sex::Female] {
            let id = pop.next_id();
            pop.insert(catalog::generate_adult(breed, id, sex, config, &mut rng));
        }
    }
    let founders = pop.len();

    let mut refusals: HashMap<&'static str, usize> = HashMap::new();
    let mut litters = 0;
    let mut out_of_range = 0;
    let mut bad_composition = 0;
    let mut orphaned = 0;
    let mut parents: Vec<Dog> = pop.iter().cloned().collect();

    for generation in 1..=SWEEP_GENERATIONS {
        let males: Vec<&Dog> = parents.iter().filter(|d| d.sex == Sex::Male).collect();
        let females: Vec<&Dog> = parents.iter().filter(|d| d.sex == Sex::Female).collect();
        if males.is_empty() || females.is_empty() {
            break;
        }

        let mut born = Vec::new();
        for _ in 0..SWEEP_PAIRS_PER_GENERATION {
            let sire = males[rng.gen_range(0..males.len())];
            let dam = females[rng.gen_range(0..females.len())];
            let ctx = BreedingContext::new(&pop, config);
            match breeding::breed_litter(sire, dam, &ctx, pop.next_id(), &mut rng) {
                Ok(litter) => {
                    litters += 1;
                    for pup in litter.into_dogs() {
                        if PerformanceTrait::ALL
                            .iter()
                            .any(|&t| !(1..=100).contains(&pup.stats.get(t)))
                        {
                            out_of_range += 1;
                        }
                        let comp = pup.composition_or_purebred();
                        if (comp.total_percentage() - 100.0).abs() > 0.01 {
                            bad_composition += 1;
                        }
                        if pup.parent_ids().any(|id| !pop.contains(id)) {
                            orphaned += 1;
                        }
                        // Age the puppy into breeding range for the next round
                        let mut adult = pup;
                        adult.age_days = config.min_breeding_age_days;
                        adult.bond = config.min_bond;
                        pop.insert(adult.clone());
                        born.push(adult);
                    }
                }
                Err(e) => {
                    *refusals.entry(refusal_kind(&e)).or_default() += 1;
                }
            }
        }

        if verbose {
            println!(
                "    gen {}: {} puppies, population {}",
                generation,
                born.len(),
                pop.len()
            );
        }
        if born.is_empty() {
            break;
        }
        parents = born;
    }

    results.push(TestResult {
        name: "sweep_litters_produced".into(),
        passed: litters > 0 && pop.len() > founders,
        detail: format!(
            "{} litters, population {} -> {}, refusals {:?}",
            litters,
            founders,
            pop.len(),
            refusals
        ),
    });

    results.push(TestResult {
        name: "sweep_stats_in_range".into(),
        passed: out_of_range == 0,
        detail: format!("{} puppies with a stat outside 1-100", out_of_range),
    });

    results.push(TestResult {
        name: "sweep_compositions_closed".into(),
        passed: bad_composition == 0,
        detail: format!("{} puppies with composition off 100%", bad_composition),
    });

    results.push(TestResult {
        name: "sweep_parents_recorded".into(),
        passed: orphaned == 0,
        detail: format!("{} puppies referencing unknown parents", orphaned),
    });

    results
}

fn refusal_kind(e: &BreedingError) -> &'static str {
    match e {
        BreedingError::SameDog(_) => "same_dog",
        BreedingError::SameSex { .. } => "same_sex",
        BreedingError::TooYoung { .. } => "too_young",
        BreedingError::TooOld { .. } => "too_old",
        BreedingError::PoorHealth { .. } => "health",
        BreedingError::LowBond { .. } => "bond",
        BreedingError::Cooldown { .. } => "cooldown",
        BreedingError::SizeBlocked(_) => "size",
    }
}

// ── 6. Preview ──────────────────────────────────────────────────────────

fn validate_preview(
    catalog: &BreedCatalog,
    config: &BreedingConfig,
    seed: u64,
    verbose: bool,
) -> Vec<TestResult> {
    println!("--- Breeding Preview ---");
    let mut results = Vec::new();
    let mut rng = StdRng::seed_from_u64(seed.wrapping_add(2));

    let pairs = [
        ("Labrador Retriever", "Poodle"),
        ("Pug", "Beagle"),
        ("Border Collie", "German Shepherd"),
        ("Greyhound", "Siberian Husky"),
    ];

    for (sire_breed, dam_breed) in pairs {
        let (Some(sb), Some(db)) = (catalog.by_name(sire_breed), catalog.by_name(dam_breed)) else {
            results.push(TestResult {
                name: format!("preview_{}_{}", sire_breed, dam_breed),
                passed: false,
                detail: "breed missing from catalog".into(),
            });
            continue;
        };
        let sire = catalog::generate_adult(sb, 1, Sex::Male, config, &mut rng);
        let dam = catalog::generate_adult(db, 2, Sex::Female, config, &mut rng);
        let pop = Population::from_dogs(vec![sire.clone(), dam.clone()]);
        let ctx = BreedingContext::new(&pop, config);
        let preview = breeding::preview_breeding(&sire, &dam, &ctx);

        let mut escapes = 0;
        for i in 0..50 {
            let pup = puppy::generate_puppy(10 + i, &sire, &dam, &ctx, &mut rng);
            for range in &preview.traits {
                let v = pup.dog.stats.get(range.kind);
                if v < range.min || v > range.max {
                    escapes += 1;
                }
            }
            if !preview.appearance.coat_colors.contains(&pup.dog.appearance.coat_color) {
                escapes += 1;
            }
        }

        if verbose {
            println!("    {} x {} -> {}", sire_breed, dam_breed, preview.composition.display_name);
            let sire_genes = sire.genetics_or_synthesized();
            let dam_genes = dam.genetics_or_synthesized();
            for r in &preview.traits {
                let sg = sire_genes.performance.get(r.kind);
                let dg = dam_genes.performance.get(r.kind);
                println!(
                    "      {:<13} {:>3}-{:<3} sire {}/{}, dam {}/{}",
                    r.kind.label(),
                    r.min,
                    r.max,
                    sg.first.label(),
                    sg.second.label(),
                    dg.first.label(),
                    dg.second.label()
                );
            }
        }

        results.push(TestResult {
            name: format!(
                "preview_{}",
                preview.composition.display_name.to_lowercase().replace(' ', "_")
            ),
            passed: escapes == 0,
            detail: format!("{} values outside previewed ranges", escapes),
        });
    }

    results
}
