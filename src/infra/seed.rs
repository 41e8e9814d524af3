//! One-time administrative seeding of the persisted user accounts.
//!
//! Clears the `users` table and inserts one account per console role. This
//! is a setup routine; the console itself never touches the database.

use crate::domain::role::Role;
use chrono::Utc;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedAccount {
    pub name: &'static str,
    pub email: &'static str,
    pub role: Role,
}

/// The fixed role-tagged accounts inserted by `seed_users`.
pub fn seed_accounts() -> Vec<SeedAccount> {
    vec![
        SeedAccount {
            name: "Admin User",
            email: "admin@tourney.example",
            role: Role::Admin,
        },
        SeedAccount {
            name: "Player User",
            email: "player@tourney.example",
            role: Role::Player,
        },
        SeedAccount {
            name: "Judge User",
            email: "judge@tourney.example",
            role: Role::Judge,
        },
        SeedAccount {
            name: "Coach User",
            email: "coach@tourney.example",
            role: Role::Coach,
        },
        SeedAccount {
            name: "Organizer User",
            email: "organizer@tourney.example",
            role: Role::Organizer,
        },
    ]
}

pub async fn connect(database_url: &str) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(database_url)
        .await?;
    Ok(pool)
}

/// Replaces every row of `users` with the seed accounts.
///
/// Runs in one transaction; returns the number of inserted rows.
pub async fn seed_users(pool: &PgPool) -> anyhow::Result<u64> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS users (
            id BIGSERIAL PRIMARY KEY,
            name TEXT NOT NULL,
            email TEXT UNIQUE NOT NULL,
            role TEXT NOT NULL,
            is_active BOOLEAN NOT NULL DEFAULT TRUE,
            created_at TIMESTAMPTZ NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    let mut transaction = pool.begin().await?;

    let cleared = sqlx::query("DELETE FROM users")
        .execute(&mut *transaction)
        .await?
        .rows_affected();
    info!(cleared, "cleared users table");

    let now = Utc::now();
    let mut inserted: u64 = 0;
    for account in seed_accounts() {
        inserted += sqlx::query(
            "INSERT INTO users (name, email, role, is_active, created_at) VALUES ($1, $2, $3, TRUE, $4)",
        )
        .bind(account.name)
        .bind(account.email)
        .bind(account.role.as_str())
        .bind(now)
        .execute(&mut *transaction)
        .await?
        .rows_affected();
        info!(email = account.email, role = %account.role, "seeded account");
    }

    transaction.commit().await?;
    Ok(inserted)
}
