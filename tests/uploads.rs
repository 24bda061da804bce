use axum_rentals_web::uploads::{allowed_file, sanitize_filename, store_upload};

#[test]
fn extension_check_is_case_insensitive() {
    assert!(allowed_file("photo.png"));
    assert!(allowed_file("PHOTO.JPG"));
    assert!(allowed_file("pic.JpEg"));
    assert!(allowed_file("anim.gif"));

    assert!(!allowed_file("photo.exe"));
    assert!(!allowed_file("archive.tar.bz2"));
    assert!(!allowed_file("noextension"));
    assert!(!allowed_file(""));
}

#[test]
fn sanitize_strips_paths_and_unsafe_characters() {
    assert_eq!(sanitize_filename("photo.png"), "photo.png");
    assert_eq!(sanitize_filename("my photo.png"), "my_photo.png");
    assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
    assert_eq!(sanitize_filename("..\\..\\evil.png"), "evil.png");
    assert_eq!(sanitize_filename("sp%c3%a9cial?.gif"), "sp_c3_a9cial_.gif");
}

#[tokio::test]
async fn stored_upload_round_trips_and_names_are_unique() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let content = b"not really a png, but bytes are bytes";

    let first = store_upload(dir.path(), "photo.png", content).await?;
    let second = store_upload(dir.path(), "photo.png", content).await?;

    assert_ne!(first, second, "same original name must not collide");
    assert!(first.ends_with("photo.png"));

    let read_back = tokio::fs::read(dir.path().join(&first)).await?;
    assert_eq!(read_back, content);

    Ok(())
}
