use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
    TransactionTrait,
};
use uuid::Uuid;

use crate::{
    dto::houses::{NewHouse, UploadedImage},
    entity::{
        house_images::{
            ActiveModel as ImageActive, Column as ImageCol, Model as ImageModel,
        },
        houses::{ActiveModel as HouseActive, Column as HouseCol, Model as HouseModel},
    },
    error::{AppError, AppResult},
    models::{BhkType, House, HouseImage},
    state::AppState,
    uploads,
};

use crate::entity::{HouseImages, Houses};

pub const HOME_PAGE_LIMIT: u64 = 6;

/// The most recently listed houses, for the home page.
pub async fn latest_houses(state: &AppState) -> AppResult<Vec<House>> {
    let items = Houses::find()
        .order_by_desc(HouseCol::CreatedAt)
        .limit(HOME_PAGE_LIMIT)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(house_from_entity)
        .collect();
    Ok(items)
}

pub async fn houses_by_type(state: &AppState, bhk: BhkType) -> AppResult<Vec<House>> {
    let items = Houses::find()
        .filter(HouseCol::BhkType.eq(bhk.as_str()))
        .order_by_desc(HouseCol::CreatedAt)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(house_from_entity)
        .collect();
    Ok(items)
}

pub async fn houses_by_owner(state: &AppState, owner_id: Uuid) -> AppResult<Vec<House>> {
    let items = Houses::find()
        .filter(HouseCol::OwnerId.eq(owner_id))
        .order_by_desc(HouseCol::CreatedAt)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(house_from_entity)
        .collect();
    Ok(items)
}

pub async fn house_detail(state: &AppState, id: Uuid) -> AppResult<(House, Vec<HouseImage>)> {
    let house = Houses::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let images = HouseImages::find()
        .filter(ImageCol::HouseId.eq(id))
        .all(&state.orm)
        .await?
        .into_iter()
        .map(image_from_entity)
        .collect();

    Ok((house_from_entity(house), images))
}

/// Insert the house and its image rows in one transaction. Files are written
/// to the upload directory before their row is inserted; a rollback can
/// therefore leave an orphan file behind, but never a dangling row.
pub async fn create_house(
    state: &AppState,
    owner_id: Uuid,
    form: NewHouse,
    images: Vec<UploadedImage>,
) -> AppResult<House> {
    let txn = state.orm.begin().await?;

    let house = HouseActive {
        id: Set(Uuid::new_v4()),
        title: Set(form.title),
        bhk_type: Set(form.bhk_type.as_str().to_string()),
        rent: Set(form.rent),
        address: Set(form.address),
        description: Set(form.description),
        created_at: NotSet,
        owner_id: Set(owner_id),
    }
    .insert(&txn)
    .await?;

    let mut stored_count = 0usize;
    for image in images {
        // Disallowed or missing extensions are dropped without error.
        if !uploads::allowed_file(&image.original_name) {
            continue;
        }
        let stored =
            uploads::store_upload(&state.config.upload_dir, &image.original_name, &image.bytes)
                .await?;
        ImageActive {
            id: Set(Uuid::new_v4()),
            filename: Set(stored),
            house_id: Set(house.id),
        }
        .insert(&txn)
        .await?;
        stored_count += 1;
    }

    txn.commit().await?;

    tracing::info!(house_id = %house.id, images = stored_count, "house listed");
    Ok(house_from_entity(house))
}

fn house_from_entity(model: HouseModel) -> House {
    House {
        id: model.id,
        title: model.title,
        bhk_type: model.bhk_type,
        rent: model.rent,
        address: model.address,
        description: model.description,
        created_at: model.created_at.with_timezone(&Utc),
        owner_id: model.owner_id,
    }
}

fn image_from_entity(model: ImageModel) -> HouseImage {
    HouseImage {
        id: model.id,
        filename: model.filename,
        house_id: model.house_id,
    }
}
