use axum::extract::FromRef;
use time::OffsetDateTime;

mod app;
mod calendar;
mod children;
mod config;
mod coupons;
mod db;
mod error;
mod foods;
mod memory;
mod menus;
mod models;
mod orders;
mod scheduler;
mod state;
mod validation;

use crate::foods::services::FoodCatalog;
use crate::menus::services::MenuCatalog;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "children_kitchen=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let app_state = AppState::init().await?;

    if app_state.config.seed_on_startup {
        let foods = FoodCatalog::from_ref(&app_state).seed_catalog().await?;
        let menus = MenuCatalog::from_ref(&app_state)
            .seed_week(OffsetDateTime::now_utc().date())
            .await?;
        tracing::info!(foods, menus, "startup seeding finished");
    }

    let sched = scheduler::scheduler(
        MenuCatalog::from_ref(&app_state),
        &app_state.config.menu_purge_cron,
    )
    .await?;
    sched.start().await?;

    let config = app_state.config.clone();
    app::serve(app::build_app(app_state), &config).await
}
