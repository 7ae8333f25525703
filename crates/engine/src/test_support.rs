//! Fixture builders for unit tests

use fairrec_core::{Demographics, Item, ItemId, ItemMetadata, Preferences, User, UserId};

pub fn user(id: UserId, history: &[ItemId]) -> User {
    User {
        id,
        name: format!("user-{id}"),
        demographics: Demographics {
            gender: "feminino".to_string(),
            age: "adulto".to_string(),
            age_value: 35,
            ethnicity: "branca".to_string(),
            region: "Sudeste".to_string(),
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
            year: 2020,
            popularity,
            ..ItemMetadata::default()
        },
    }
}
