use axum::{
    Form,
    extract::State,
    response::{Html, Redirect},
};
use tower_sessions::Session;

use crate::{
    dto::auth::{LoginForm, RegisterForm},
    error::{AppError, AppResult},
    flash::{self, Level},
    middleware,
    routes::page_ctx,
    services::auth_service,
    state::AppState,
    views,
};

pub async fn register_page(session: Session) -> AppResult<Html<String>> {
    let ctx = page_ctx(&session).await?;
    Ok(Html(views::register_page(&ctx)))
}

pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Form(payload): Form<RegisterForm>,
) -> AppResult<Redirect> {
    match auth_service::register_owner(&state.pool, payload).await {
        Ok(_) => {
            flash::push(&session, Level::Success, "Registered! Please login.").await?;
            Ok(Redirect::to("/login"))
        }
        Err(AppError::EmailTaken) => {
            flash::push(&session, Level::Danger, "Email already registered").await?;
            Ok(Redirect::to("/register"))
        }
        Err(err) => Err(err),
    }
}

pub async fn login_page(session: Session) -> AppResult<Html<String>> {
    let ctx = page_ctx(&session).await?;
    Ok(Html(views::login_page(&ctx)))
}

pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(payload): Form<LoginForm>,
) -> AppResult<Redirect> {
    match auth_service::verify_login(&state.pool, payload).await? {
        Some(owner) => {
            middleware::auth::establish(&session, owner.id, &owner.name).await?;
            flash::push(&session, Level::Success, "Logged in").await?;
            Ok(Redirect::to("/owner"))
        }
        None => {
            flash::push(&session, Level::Danger, "Invalid credentials").await?;
            Ok(Redirect::to("/login"))
        }
    }
}

pub async fn logout(session: Session) -> AppResult<Redirect> {
    middleware::auth::clear(&session).await?;
    flash::push(&session, Level::Info, "Logged out").await?;
    Ok(Redirect::to("/"))
}
