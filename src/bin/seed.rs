use tourney_console::infra::{config, seed, telemetry};
use tracing::info;

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: cargo run --bin seed\n\
         \n\
         Clears the users table and inserts one account per role.\n\
         Requires env vars:\n\
           DATABASE_URL\n"
    );
    std::process::exit(2);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    telemetry::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        usage_and_exit();
    }

    let database_url = config::database_url()?;
    let pool = seed::connect(&database_url).await?;
    info!("connected to database");

    let inserted = seed::seed_users(&pool).await?;
    info!(inserted, "seeding complete");

    pool.close().await;
    Ok(())
}
