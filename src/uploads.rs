use std::path::Path;

use tokio::fs;
use uuid::Uuid;

use crate::error::AppResult;

pub const ALLOWED_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "gif"];

/// Extension check on the last dot-segment, case-insensitive.
pub fn allowed_file(filename: &str) -> bool {
    match filename.rsplit_once('.') {
        Some((_, ext)) => {
            let ext = ext.to_ascii_lowercase();
            ALLOWED_EXTENSIONS.contains(&ext.as_str())
        }
        None => false,
    }
}

/// Strip any path components and reduce the name to `[A-Za-z0-9._-]`.
pub fn sanitize_filename(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    cleaned.trim_start_matches('.').to_string()
}

/// Write the bytes under a collision-resistant stored name and return it.
/// The caller links the returned name to a house via a `house_images` row.
pub async fn store_upload(dir: &Path, original: &str, bytes: &[u8]) -> AppResult<String> {
    fs::create_dir_all(dir).await?;
    let stored = format!("{}_{}", Uuid::new_v4().simple(), sanitize_filename(original));
    fs::write(dir.join(&stored), bytes).await?;
    Ok(stored)
}
