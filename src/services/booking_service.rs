use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use uuid::Uuid;

use crate::{
    dto::bookings::BookingForm,
    entity::Houses,
    entity::bookings::{ActiveModel as BookingActive, Model as BookingModel},
    error::{AppError, AppResult},
    models::Booking,
    state::AppState,
};

/// Requested visit time, as typed into a `datetime-local` input.
/// Seconds are optional; anything else is a validation failure.
pub fn parse_visit_date(input: &str) -> Option<DateTime<Utc>> {
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    None
}

pub async fn create_booking(
    state: &AppState,
    house_id: Uuid,
    form: BookingForm,
    visit_date: DateTime<Utc>,
) -> AppResult<Booking> {
    if Houses::find_by_id(house_id).one(&state.orm).await?.is_none() {
        return Err(AppError::NotFound);
    }

    let booking = BookingActive {
        id: Set(Uuid::new_v4()),
        house_id: Set(house_id),
        name: Set(form.name),
        email: Set(form.email),
        phone: Set(form.phone.filter(|p| !p.is_empty())),
        visit_date: Set(visit_date.into()),
        status: Set("pending".to_string()),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    tracing::info!(booking_id = %booking.id, house_id = %house_id, "visit requested");
    Ok(booking_from_entity(booking))
}

fn booking_from_entity(model: BookingModel) -> Booking {
    Booking {
        id: model.id,
        house_id: model.house_id,
        name: model.name,
        email: model.email,
        phone: model.phone,
        visit_date: model.visit_date.with_timezone(&Utc),
        status: model.status,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
