use axum::{
    Router,
    routing::{get, post},
};
use tower_http::services::ServeDir;
use tower_sessions::Session;

use crate::{error::AppResult, flash, middleware::auth::OWNER_NAME_KEY, state::AppState, views::PageCtx};

pub mod auth;
pub mod bookings;
pub mod health;
pub mod owner;
pub mod pages;

// Build the application router without binding state; it is provided at the top level.
pub fn create_router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(pages::home))
        .route("/list/{category}", get(pages::listing))
        .route("/house/{id}", get(pages::house_detail))
        .route("/book/{id}", post(bookings::book_visit))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", get(auth::logout))
        .route("/owner", get(owner::dashboard))
        .route("/owner/add", get(owner::add_house_page).post(owner::add_house))
        .nest_service("/uploads", ServeDir::new(&state.config.upload_dir))
}

/// Rendering context for the current request: pending flash notices are
/// consumed here, so call this once per rendered page.
pub(crate) async fn page_ctx(session: &Session) -> AppResult<PageCtx> {
    Ok(PageCtx {
        owner_name: session.get::<String>(OWNER_NAME_KEY).await?,
        flashes: flash::take(session).await?,
    })
}
