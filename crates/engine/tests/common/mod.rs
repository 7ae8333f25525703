//! Shared fixtures for engine integration tests

#![allow(dead_code)]

use fairrec_core::{
    AccessibilityFlags, AccessibilityNeed, Corpus, Demographics, Item, ItemId, ItemMetadata,
    Preferences, User, UserId,
};
use fairrec_engine::{Algorithm, Recommendation};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

const GENRES: &[&str] = &[
    "drama", "comédia", "ação", "documentário", "romance", "terror", "animação", "ficção científica",
    "suspense", "musical", "fantasia", "biografia",
];
const CULTURES: &[&str] = &[
    "cultura afro-brasileira", "cultura indígena", "cultura nordestina", "cultura japonesa",
    "cultura coreana", "cultura latina", "cultura árabe", "cultura europeia",
];
const CAST_GROUPS: &[&str] = &[
    "negra", "indígena", "asiática", "parda", "branca", "LGBTQIA+", "mulheres",
    "pessoas com deficiência", "idosos",
];
const GENDERS: &[&str] = &["feminino", "masculino", "não-binário"];
const AGES: &[&str] = &["jovem", "adulto", "idoso"];
const ETHNICITIES: &[&str] = &["branca", "negra", "parda", "indígena", "asiática"];
const CLASSES: &[&str] = &["baixa", "média", "alta"];
const DISABILITIES: &[&str] = &["visual", "auditiva", "motora"];

pub fn user(id: UserId, history: &[ItemId]) -> User {
    User {
        id,
        name: format!("user-{id}"),
        demographics: Demographics {
            gender: "feminino".to_string(),
            age: "adulto".to_string(),
            age_value: 30,
            ethnicity: "parda".to_string(),
            region: "Nordeste".to_string(),
            disability: None,
            socioeconomic: "média".to_string(),
        },
        preferences: Preferences::default(),
        history: history.to_vec(),
    }
}

pub fn item(id: ItemId, popularity: f64, genres: &[&str]) -> Item {
    Item {
        id,
        title: format!("item-{id}"),
        item_type: "filme".to_string(),
        genres: genres.iter().map(|g| g.to_string()).collect(),
        metadata: ItemMetadata {
            year: 2018,
            popularity,
            ..ItemMetadata::default()
        },
    }
}

pub fn recommendation(user_id: UserId, item: &Arc<Item>, score: f64) -> Recommendation {
    Recommendation {
        user_id,
        item_id: item.id,
        item: Arc::clone(item),
        score,
        algorithm: Algorithm::Baseline,
        breakdown: None,
    }
}

fn pick(rng: &mut StdRng, pool: &[&str]) -> String {
    pool.choose(rng).map(|s| s.to_string()).unwrap_or_default()
}

fn pick_many(rng: &mut StdRng, pool: &[&str], max: usize) -> Vec<String> {
    let count = rng.gen_range(0..=max);
    pool.choose_multiple(rng, count).map(|s| s.to_string()).collect()
}

/// Reproducible synthetic corpus
///
/// Histories may reference item ids beyond the catalog so the "missing
/// item" path is exercised too.
pub fn random_corpus(seed: u64, users: usize, items: usize) -> Corpus {
    let mut rng = StdRng::seed_from_u64(seed);

    let catalog: Vec<Item> = (1..=items as ItemId)
        .map(|id| {
            let mut genres = pick_many(&mut rng, GENRES, 3);
            if genres.is_empty() {
                genres.push(pick(&mut rng, GENRES));
            }
            Item {
                id,
                title: format!("item-{id}"),
                item_type: "filme".to_string(),
                genres,
                metadata: ItemMetadata {
                    year: rng.gen_range(1980..=2024),
                    director: format!("director-{}", rng.gen_range(1..=20)),
                    cast_diversity: pick_many(&mut rng, CAST_GROUPS, 3),
                    cultural_representation: pick_many(&mut rng, CULTURES, 2),
                    popularity: rng.gen_range(0.0..=100.0),
                    accessibility: AccessibilityFlags {
                        subtitles: rng.gen_bool(0.7),
                        audio_description: rng.gen_bool(0.3),
                        sign_language: rng.gen_bool(0.2),
                    },
                    themes: Vec::new(),
                },
            }
        })
        .collect();

    let population: Vec<User> = (1..=users as UserId)
        .map(|id| {
            let history_len = rng.gen_range(0..=8);
            let mut history: Vec<ItemId> = (0..history_len)
                .map(|_| rng.gen_range(1..=items as ItemId + 5))
                .collect();
            history.sort_unstable();
            history.dedup();
            history.shuffle(&mut rng);

            let mut needs = Vec::new();
            if rng.gen_bool(0.2) {
                needs.push(AccessibilityNeed::Subtitles);
            }
            if rng.gen_bool(0.1) {
                needs.push(AccessibilityNeed::AudioDescription);
            }
            if rng.gen_bool(0.05) {
                needs.push(AccessibilityNeed::SignLanguage);
            }

            User {
                id,
                name: format!("user-{id}"),
                demographics: Demographics {
                    gender: pick(&mut rng, GENDERS),
                    age: pick(&mut rng, AGES),
                    age_value: rng.gen_range(16..=85),
                    ethnicity: pick(&mut rng, ETHNICITIES),
                    region: "Sudeste".to_string(),
                    disability: rng.gen_bool(0.15).then(|| pick(&mut rng, DISABILITIES)),
                    socioeconomic: pick(&mut rng, CLASSES),
                },
                preferences: Preferences {
                    genres: pick_many(&mut rng, GENRES, 3),
                    languages: vec!["português".to_string()],
                    accessibility_needs: needs,
                    cultural_interests: pick_many(&mut rng, CULTURES, 2),
                },
                history,
            }
        })
        .collect();

    Corpus::new(population, catalog).expect("generated ids are unique")
}
