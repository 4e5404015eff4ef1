//! Inserts a small set of fixture users, concerts and resale listings so
//! the API has something to serve in development.

use dotenvy::dotenv;
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use uuid::Uuid;

use encore_server::config::Config;
use encore_server::models::concert::PriceMap;
use encore_server::utils::password::hash_password;

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

    let existing: i64 = sqlx::query_scalar("SELECT count(*) FROM concerts")
        .fetch_one(&pool)
        .await
        .expect("Failed to inspect concerts table");
    if existing > 0 {
        tracing::info!("Database already seeded, nothing to do");
        return;
    }

    let user1 = insert_user(&pool, "user1@example.com", "password1", "Hong Gildong").await;
    let user2 = insert_user(&pool, "user2@example.com", "password2", "Kim Cheolsu").await;
    tracing::info!("Seeded 2 users");

    let summer = insert_concert(
        &pool,
        ConcertSeed {
            title: "Summer Festival",
            artist: "Various artists",
            date: "2025-07-15",
            time: "18:00",
            venue: "Olympic Park",
            address: "424 Olympic-ro, Songpa-gu, Seoul",
            description: "The biggest festival of the summer, with the country's top acts on one stage.",
            category: "Festival",
            price: PriceMap {
                vip: Some(150000),
                r: Some(120000),
                s: Some(90000),
                ..Default::default()
            },
        },
    )
    .await;

    let classic = insert_concert(
        &pool,
        ConcertSeed {
            title: "Classic Orchestra Night",
            artist: "Seoul Philharmonic",
            date: "2025-08-20",
            time: "19:30",
            venue: "Seoul Arts Center",
            address: "2406 Nambusunhwan-ro, Seocho-gu, Seoul",
            description: "Beethoven and Mozart favourites in a single evening programme.",
            category: "Classical",
            price: PriceMap {
                vip: Some(100000),
                r: Some(80000),
                s: Some(60000),
                a: Some(40000),
                ..Default::default()
            },
        },
    )
    .await;

    let band = insert_concert(
        &pool,
        ConcertSeed {
            title: "Every Day6 Nationwide Tour",
            artist: "DAY6",
            date: "2025-09-15",
            time: "19:00",
            venue: "Olympic Hall",
            address: "424 Olympic-ro, Songpa-gu, Seoul",
            description: "The full discography live, from debut singles to the latest album.",
            category: "Band",
            price: PriceMap {
                vip: Some(132000),
                r: Some(110000),
                ..Default::default()
            },
        },
    )
    .await;

    let musical = insert_concert(
        &pool,
        ConcertSeed {
            title: "The Man Who Laughs",
            artist: "Original cast",
            date: "2025-10-09",
            time: "14:00",
            venue: "Seoul Arts Center Opera House",
            address: "2406 Nambusunhwan-ro, Seocho-gu, Seoul",
            description: "The award-winning musical returns for a limited autumn run.",
            category: "Musical",
            price: PriceMap {
                vip: Some(170000),
                r: Some(140000),
                s: Some(110000),
                a: Some(80000),
                b: Some(60000),
                ..Default::default()
            },
        },
    )
    .await;

    tracing::info!("Seeded 4 concerts");

    insert_ticket(&pool, summer, user1, "Summer Festival VIP ticket", 140000, 150000, 2, "VIP", Some("A"), Some("1"), Some("15-16"), true, "A pair of VIP seats together, selling in a hurry.").await;
    insert_ticket(&pool, classic, user2, "Classic Orchestra R seat", 75000, 80000, 1, "R", Some("B"), Some("5"), Some("23"), false, "Schedule clash, great seat with a clear view.").await;
    insert_ticket(&pool, band, user1, "DAY6 tour R seats, pair", 99000, 110000, 2, "R", Some("1F"), Some("C"), Some("15, 16"), true, "Selling at below face value, tickets ship a week before the show.").await;
    insert_ticket(&pool, musical, user2, "The Man Who Laughs S seat", 100000, 110000, 1, "S", Some("2F"), Some("A"), Some("7"), false, "Good sightline, meetup exchange possible.").await;

    tracing::info!("Seeded 4 tickets");
}

struct ConcertSeed {
    title: &'static str,
    artist: &'static str,
    date: &'static str,
    time: &'static str,
    venue: &'static str,
    address: &'static str,
    description: &'static str,
    category: &'static str,
    price: PriceMap,
}

async fn insert_user(pool: &sqlx::PgPool, email: &str, password: &str, username: &str) -> Uuid {
    let password_hash = hash_password(password).expect("Failed to hash seed password");

    sqlx::query_scalar(
        "INSERT INTO users (email, password_hash, username) VALUES ($1, $2, $3) \
         ON CONFLICT (email) DO UPDATE SET username = EXCLUDED.username \
         RETURNING id",
    )
    .bind(email)
    .bind(password_hash)
    .bind(username)
    .fetch_one(pool)
    .await
    .expect("Failed to insert seed user")
}

async fn insert_concert(pool: &sqlx::PgPool, seed: ConcertSeed) -> Uuid {
    sqlx::query_scalar(
        "INSERT INTO concerts \
         (title, artist, date, time, venue, address, description, category, price, status) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, 'upcoming') \
         RETURNING id",
    )
    .bind(seed.title)
    .bind(seed.artist)
    .bind(seed.date)
    .bind(seed.time)
    .bind(seed.venue)
    .bind(seed.address)
    .bind(seed.description)
    .bind(seed.category)
    .bind(Json(seed.price))
    .fetch_one(pool)
    .await
    .expect("Failed to insert seed concert")
}

#[allow(clippy::too_many_arguments)]
async fn insert_ticket(
    pool: &sqlx::PgPool,
    concert_id: Uuid,
    seller_id: Uuid,
    title: &str,
    price: i64,
    original_price: i64,
    quantity: i32,
    grade: &str,
    section: Option<&str>,
    seat_row: Option<&str>,
    seat_number: Option<&str>,
    is_consecutive_seats: bool,
    description: &str,
) {
    sqlx::query(
        "INSERT INTO tickets \
         (concert_id, seller_id, title, price, original_price, quantity, grade, section, \
          seat_row, seat_number, is_consecutive_seats, description, status) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, 'available')",
    )
    .bind(concert_id)
    .bind(seller_id)
    .bind(title)
    .bind(price)
    .bind(original_price)
    .bind(quantity)
    .bind(grade)
    .bind(section)
    .bind(seat_row)
    .bind(seat_number)
    .bind(is_consecutive_seats)
    .bind(description)
    .execute(pool)
    .await
    .expect("Failed to insert seed ticket");
}
