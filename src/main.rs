//! Console walkthrough binary.
//!
//! Loads one role's dashboard from the in-memory fixtures and prints the
//! first page of each panel. Usage: `tourney-console [role] [search]`.

use std::sync::Arc;
use tourney_console::infra::{config, telemetry};
use tourney_console::{Dashboard, MemorySource, Role, SchemaRegistry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    telemetry::init();

    let mut args = std::env::args().skip(1);
    let role: Role = args.next().as_deref().unwrap_or("admin").parse()?;
    let search = args.next().unwrap_or_default();

    let registry = Arc::new(SchemaRegistry::with_catalog()?);
    let source = Arc::new(MemorySource::seeded(registry.clone()));
    let mut dashboard = Dashboard::new(
        role,
        &registry,
        source,
        config::page_size()?,
        config::load_timeout()?,
    )?;
    dashboard.load_all().await;

    println!("{} dashboard", role);
    let names: Vec<String> = dashboard
        .panel_names()
        .into_iter()
        .map(str::to_string)
        .collect();
    for name in names {
        let Some(panel) = dashboard.panel_mut(&name) else {
            continue;
        };
        panel.set_search(&search);
        let listing = panel.view();
        println!(
            "\n[{}] {} match(es), page {}/{}",
            name, listing.filtered_total, listing.page, listing.total_pages
        );
        if let Some(message) = panel.store().error_message() {
            println!("  ! {}", message);
        }
        for record in &listing.items {
            println!("  {}", serde_json::Value::Object(record.clone()));
        }
    }
    Ok(())
}
