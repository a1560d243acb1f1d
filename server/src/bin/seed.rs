//! Resets the database and loads the event plus its artist lineup.
//!
//! Run with `cargo run --bin seed`. Destructive: truncates all three tables.

use chrono::{NaiveDate, NaiveTime};
use dotenvy::dotenv;
use sqlx::postgres::PgPoolOptions;

use soiree_server::config::Config;
use soiree_server::models::{NewArtist, NewEvent};
use soiree_server::store;

fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).expect("valid time")
}

fn lineup(event_id: i32) -> Vec<NewArtist> {
    let roster: [(&str, &str, &str, NaiveTime); 6] = [
        (
            "Gnawa Njoum Experience",
            "Collectif de jeunes musiciens Gnawa qui réinventent la tradition avec une touche contemporaine.",
            "https://images.unsplash.com/photo-1511192336575-5a79af67a629?w=400",
            time(19, 0),
        ),
        (
            "Maâlem Hassan Boussou",
            "Maître Gnawa de renommée internationale, virtuose du guembri, il fait rayonner la culture Gnawa au-delà des frontières du Maroc.",
            "https://images.unsplash.com/photo-1511671782779-c97d3d27a1d4?w=400",
            time(20, 0),
        ),
        (
            "Maâlem Mahmoud Guinea",
            "Icône vivante de la musique Gnawa, il a consacré sa vie à préserver et enrichir cet art ancestral.",
            "https://images.unsplash.com/photo-1516924962500-2b4b3b99ea02?w=400",
            time(20, 45),
        ),
        (
            "Maâlem Hamid El Kasri",
            "Figure emblématique de la musique Gnawa, il mêle tradition et modernité dans des performances captivantes.",
            "https://images.unsplash.com/photo-1493225457124-a3eb161ffa5f?w=400",
            time(21, 30),
        ),
        (
            "Maalem Said Oughessal",
            "Gardien de la tradition orale Gnawa, sa voix puissante et son charisme scénique captivent tous les publics.",
            "https://images.unsplash.com/photo-1506157786151-b8491531f063?w=400",
            time(22, 15),
        ),
        (
            "Maalem Abdelkebir Merchane",
            "Virtuose du guembri, ses performances hypnotiques transportent le public dans un voyage spirituel intense.",
            "https://images.unsplash.com/photo-1514320291840-2e0a9bf2a9ae?w=400",
            time(23, 0),
        ),
    ];

    roster
        .into_iter()
        .map(|(name, bio, image_url, performance_time)| NewArtist {
            name: name.to_string(),
            bio: bio.to_string(),
            image_url: Some(image_url.to_string()),
            performance_time,
            event_id,
        })
        .collect()
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = Config::from_env();
    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&config.database_url)
        .await
        .expect("Failed to connect to database");

    sqlx::migrate!()
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    tracing::info!("Clearing existing data");
    sqlx::query("TRUNCATE event_info, artists, bookings RESTART IDENTITY CASCADE")
        .execute(&pool)
        .await
        .expect("Failed to clear tables");

    let event = store::events::create(
        &pool,
        NewEvent {
            title: "La Grande Soirée Gnawa".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 12, 20).expect("valid date"),
            location: "Place Al Amal, Agadir, Morocco".to_string(),
            description: "Une soirée exceptionnelle célébrant le riche patrimoine musical \
                          Gnawa. Venez découvrir des maîtres reconnus internationalement et \
                          plonger dans cette tradition ancestrale qui allie spiritualité, \
                          rythmes envoûtants et chants sacrés."
                .to_string(),
            banner_url: Some(
                "https://images.unsplash.com/photo-1493225457124-a3eb161ffa5f?w=800".to_string(),
            ),
        },
    )
    .await
    .expect("Failed to create event");

    tracing::info!(event_id = event.id, "Event created");

    for artist in lineup(event.id) {
        let created = store::artists::create(&pool, artist)
            .await
            .expect("Failed to create artist");
        tracing::info!(artist_id = created.id, name = %created.name, "Artist created");
    }

    tracing::info!("Seeding complete");
}
