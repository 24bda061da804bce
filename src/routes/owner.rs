use axum::{
    extract::{Multipart, State, multipart::Field},
    response::{Html, Redirect},
};
use tower_sessions::Session;

use crate::{
    dto::houses::{NewHouse, UploadedImage},
    error::{AppError, AppResult},
    flash::{self, Level},
    middleware::auth::OwnerSession,
    models::BhkType,
    routes::page_ctx,
    services::house_service,
    state::AppState,
    views,
};

pub async fn dashboard(
    State(state): State<AppState>,
    owner: OwnerSession,
    session: Session,
) -> AppResult<Html<String>> {
    let ctx = page_ctx(&session).await?;
    let houses = house_service::houses_by_owner(&state, owner.owner_id).await?;
    Ok(Html(views::dashboard(&ctx, &houses)))
}

pub async fn add_house_page(_owner: OwnerSession, session: Session) -> AppResult<Html<String>> {
    let ctx = page_ctx(&session).await?;
    Ok(Html(views::add_house_page(&ctx)))
}

pub async fn add_house(
    State(state): State<AppState>,
    owner: OwnerSession,
    session: Session,
    mut multipart: Multipart,
) -> AppResult<Redirect> {
    let (form, images) = read_add_house_form(&mut multipart).await?;
    house_service::create_house(&state, owner.owner_id, form, images).await?;
    flash::push(&session, Level::Success, "House added!").await?;
    Ok(Redirect::to("/owner"))
}

async fn read_add_house_form(
    multipart: &mut Multipart,
) -> AppResult<(NewHouse, Vec<UploadedImage>)> {
    let mut title: Option<String> = None;
    let mut bhk_type: Option<String> = None;
    let mut rent: Option<String> = None;
    let mut address: Option<String> = None;
    let mut description: Option<String> = None;
    let mut images: Vec<UploadedImage> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to read field: {e}")))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "title" => title = Some(text(field).await?),
            "bhk_type" => bhk_type = Some(text(field).await?),
            "rent" => rent = Some(text(field).await?),
            "address" => address = Some(text(field).await?),
            "description" => description = Some(text(field).await?),
            "images" => {
                // Browsers send an empty file part when no file is chosen.
                let original_name = field.file_name().unwrap_or("").to_string();
                if original_name.is_empty() {
                    continue;
                }
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Failed to read file: {e}")))?;
                images.push(UploadedImage {
                    original_name,
                    bytes: bytes.to_vec(),
                });
            }
            _ => {}
        }
    }

    let title = title
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("title is required".to_string()))?;
    let bhk_type = bhk_type
        .as_deref()
        .and_then(BhkType::parse)
        .ok_or_else(|| AppError::BadRequest("bhk_type must be 1BHK, 2BHK or 3BHK".to_string()))?;
    let rent = rent
        .ok_or_else(|| AppError::BadRequest("rent is required".to_string()))?
        .trim()
        .parse::<i64>()
        .map_err(|_| AppError::BadRequest("rent must be an integer".to_string()))?;
    let address = address
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("address is required".to_string()))?;
    let description = description.filter(|s| !s.trim().is_empty());

    Ok((
        NewHouse {
            title,
            bhk_type,
            rent,
            address,
            description,
        },
        images,
    ))
}

async fn text(field: Field<'_>) -> AppResult<String> {
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid field: {e}")))
}
