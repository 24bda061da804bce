use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Bedroom-hall-kitchen category, the sole property classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BhkType {
    OneBhk,
    TwoBhk,
    ThreeBhk,
}

impl BhkType {
    pub const ALL: [BhkType; 3] = [BhkType::OneBhk, BhkType::TwoBhk, BhkType::ThreeBhk];

    pub fn as_str(&self) -> &'static str {
        match self {
            BhkType::OneBhk => "1BHK",
            BhkType::TwoBhk => "2BHK",
            BhkType::ThreeBhk => "3BHK",
        }
    }

    /// Accepts both URL tokens ("2bhk") and form values ("2BHK").
    pub fn parse(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "1bhk" => Some(BhkType::OneBhk),
            "2bhk" => Some(BhkType::TwoBhk),
            "3bhk" => Some(BhkType::ThreeBhk),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Owner {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct House {
    pub id: Uuid,
    pub title: String,
    pub bhk_type: String,
    pub rent: i64,
    pub address: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub owner_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct HouseImage {
    pub id: Uuid,
    pub filename: String,
    pub house_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Booking {
    pub id: Uuid,
    pub house_id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub visit_date: DateTime<Utc>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}
