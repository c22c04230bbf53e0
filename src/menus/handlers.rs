use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use time::{Date, OffsetDateTime};
use tracing::instrument;

use super::dto::{AddMenuRequest, DateQuery, MenuView, PurgeResponse, SeedWeekResponse};
use super::services::{to_presentation_view, MenuCatalog};
use crate::{
    calendar::{parse_date, week_bounds},
    error::KitchenError,
    models::AgeGroup,
    state::AppState,
};

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/menus/weekly", get(weekly_menu))
        .route("/menus/by-date/:date", get(menus_for_date))
        .route("/menus/by-date/:date/:age_group", get(get_menu))
}

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/menus", post(add_menu))
        .route("/admin/menus/seed", post(seed_week))
        .route("/admin/menus/purge", post(purge_expired))
}

fn date_or_today(q: &DateQuery) -> Result<Date, KitchenError> {
    match q.date.as_deref() {
        Some(raw) => parse_date(raw),
        None => Ok(OffsetDateTime::now_utc().date()),
    }
}

#[instrument(skip(catalog))]
pub async fn weekly_menu(
    State(catalog): State<MenuCatalog>,
    Query(q): Query<DateQuery>,
) -> Result<Json<Vec<MenuView>>, KitchenError> {
    let now = date_or_today(&q)?;
    Ok(Json(catalog.weekly_menu(now).await?))
}

#[instrument(skip(catalog))]
pub async fn menus_for_date(
    State(catalog): State<MenuCatalog>,
    Path(date): Path<String>,
) -> Result<Json<Vec<MenuView>>, KitchenError> {
    let date = parse_date(&date)?;
    Ok(Json(catalog.menus_for_date(date).await?))
}

#[instrument(skip(catalog))]
pub async fn get_menu(
    State(catalog): State<MenuCatalog>,
    Path((date, age_group)): Path<(String, String)>,
) -> Result<Json<MenuView>, KitchenError> {
    let date = parse_date(&date)?;
    let age_group: AgeGroup = age_group
        .parse()
        .map_err(|e: anyhow::Error| KitchenError::Validation(e.to_string()))?;
    let menu = catalog.get_menu(date, age_group).await?;
    Ok(Json(to_presentation_view(&menu)))
}

#[instrument(skip(catalog))]
pub async fn add_menu(
    State(catalog): State<MenuCatalog>,
    Json(body): Json<AddMenuRequest>,
) -> Result<(StatusCode, Json<MenuView>), KitchenError> {
    let menu = catalog
        .add_menu(body.date, body.age_group, &body.soup, &body.main, &body.dessert)
        .await?;
    Ok((StatusCode::CREATED, Json(to_presentation_view(&menu))))
}

#[instrument(skip(catalog))]
pub async fn seed_week(
    State(catalog): State<MenuCatalog>,
    Query(q): Query<DateQuery>,
) -> Result<Json<SeedWeekResponse>, KitchenError> {
    let reference = date_or_today(&q)?;
    let created = catalog.seed_week(reference).await?;
    Ok(Json(SeedWeekResponse {
        created,
        week: week_bounds(reference)?,
    }))
}

#[instrument(skip(catalog))]
pub async fn purge_expired(
    State(catalog): State<MenuCatalog>,
    Query(q): Query<DateQuery>,
) -> Result<Json<PurgeResponse>, KitchenError> {
    let today = date_or_today(&q)?;
    let deleted = catalog.purge_expired(today).await?;
    Ok(Json(PurgeResponse {
        deleted,
        before: today,
    }))
}
