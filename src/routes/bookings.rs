use axum::{
    Form,
    extract::{Path, State},
    response::Redirect,
};
use tower_sessions::Session;
use uuid::Uuid;

use crate::{
    dto::bookings::BookingForm,
    error::AppResult,
    flash::{self, Level},
    services::booking_service,
    state::AppState,
};

pub async fn book_visit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    session: Session,
    Form(payload): Form<BookingForm>,
) -> AppResult<Redirect> {
    let back = format!("/house/{id}");

    let Some(visit_date) = booking_service::parse_visit_date(&payload.date) else {
        flash::push(
            &session,
            Level::Danger,
            "Invalid date format. Use YYYY-MM-DDTHH:MM",
        )
        .await?;
        return Ok(Redirect::to(&back));
    };

    booking_service::create_booking(&state, id, payload, visit_date).await?;
    flash::push(&session, Level::Success, "Booking request sent!").await?;
    Ok(Redirect::to(&back))
}
