use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use tower_sessions::Session;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::BhkType,
    routes::page_ctx,
    services::house_service,
    state::AppState,
    views,
};

pub async fn home(State(state): State<AppState>, session: Session) -> AppResult<Html<String>> {
    let ctx = page_ctx(&session).await?;
    let latest = house_service::latest_houses(&state).await?;
    Ok(Html(views::home(&ctx, &latest)))
}

pub async fn listing(
    State(state): State<AppState>,
    Path(category): Path<String>,
    session: Session,
) -> AppResult<Response> {
    let Some(bhk) = BhkType::parse(&category) else {
        return Ok(Redirect::to("/").into_response());
    };
    let ctx = page_ctx(&session).await?;
    let houses = house_service::houses_by_type(&state, bhk).await?;
    Ok(Html(views::listing(&ctx, bhk, &houses)).into_response())
}

pub async fn house_detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    session: Session,
) -> AppResult<Html<String>> {
    let ctx = page_ctx(&session).await?;
    let (house, images) = house_service::house_detail(&state, id).await?;
    Ok(Html(views::house_detail(&ctx, &house, &images)))
}
