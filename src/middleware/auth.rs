use axum::{
    extract::FromRequestParts,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;
use uuid::Uuid;

use crate::error::AppResult;

pub const OWNER_ID_KEY: &str = "owner_id";
pub const OWNER_NAME_KEY: &str = "owner_name";

/// Authenticated owner identity, read from the server-side session.
#[derive(Debug, Clone)]
pub struct OwnerSession {
    pub owner_id: Uuid,
    pub owner_name: String,
}

/// Owner-only routes reject by sending the visitor to the login form,
/// never with an error page.
#[derive(Debug)]
pub struct LoginRedirect;

impl IntoResponse for LoginRedirect {
    fn into_response(self) -> Response {
        Redirect::to("/login").into_response()
    }
}

impl<S> FromRequestParts<S> for OwnerSession
where
    S: Send + Sync,
{
    type Rejection = LoginRedirect;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|_| LoginRedirect)?;

        let owner_id = session
            .get::<Uuid>(OWNER_ID_KEY)
            .await
            .ok()
            .flatten()
            .ok_or(LoginRedirect)?;
        let owner_name = session
            .get::<String>(OWNER_NAME_KEY)
            .await
            .ok()
            .flatten()
            .unwrap_or_default();

        Ok(OwnerSession {
            owner_id,
            owner_name,
        })
    }
}

pub async fn establish(session: &Session, owner_id: Uuid, owner_name: &str) -> AppResult<()> {
    session.insert(OWNER_ID_KEY, owner_id).await?;
    session.insert(OWNER_NAME_KEY, owner_name).await?;
    Ok(())
}

/// Drop the session record entirely; the next request starts anonymous.
pub async fn clear(session: &Session) -> AppResult<()> {
    session.flush().await?;
    Ok(())
}
