use log::*;
use sea_orm::ConnectionTrait;

pub use entity::{mixins, users, Id};

pub mod error;
pub mod mutate;
pub mod query;
pub mod user;

/// Inserts a handful of sample users for local development.
pub async fn seed_database(db: &impl ConnectionTrait) -> Result<Vec<users::Model>, error::Error> {
    let samples = [
        ("Ada Lovelace", "Analyst"),
        ("Grace Hopper", "Rear Admiral"),
        ("Alan Turing", "Mathematician"),
        ("Katherine Johnson", "Research Mathematician"),
        ("Edsger Dijkstra", "Professor"),
    ];

    let mut seeded = Vec::with_capacity(samples.len());
    for (name, title) in samples {
        let created = user::create(
            db,
            user::NewUser {
                id: None,
                name: Some(name.to_owned()),
                title: Some(title.to_owned()),
            },
        )
        .await?;
        info!("Seeded {created:?}");
        seeded.push(created);
    }

    Ok(seeded)
}
