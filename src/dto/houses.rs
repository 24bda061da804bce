use crate::models::BhkType;

/// Validated add-listing form fields, without the uploaded files.
#[derive(Debug)]
pub struct NewHouse {
    pub title: String,
    pub bhk_type: BhkType,
    pub rent: i64,
    pub address: String,
    pub description: Option<String>,
}

/// One file part from the add-listing submission, as received.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub original_name: String,
    pub bytes: Vec<u8>,
}
