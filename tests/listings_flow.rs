use std::path::Path;

use axum_rentals_web::{
    config::AppConfig,
    db::{create_orm_conn, create_pool, run_migrations},
    dto::{
        auth::{LoginForm, RegisterForm},
        bookings::BookingForm,
        houses::{NewHouse, UploadedImage},
    },
    error::AppError,
    models::BhkType,
    services::{auth_service, booking_service, house_service},
    state::AppState,
};
use uuid::Uuid;

#[test]
fn category_tokens_map_case_insensitively() {
    assert_eq!(BhkType::parse("2bhk"), Some(BhkType::TwoBhk));
    assert_eq!(BhkType::parse("2BHK"), Some(BhkType::TwoBhk));
    assert_eq!(BhkType::parse("1Bhk"), Some(BhkType::OneBhk));
    assert_eq!(BhkType::parse("studio"), None);
    assert_eq!(BhkType::parse(""), None);
}

#[test]
fn visit_dates_parse_iso_local_format() {
    assert!(booking_service::parse_visit_date("2025-03-10T14:30").is_some());
    assert!(booking_service::parse_visit_date("2025-03-10T14:30:15").is_some());
    assert!(booking_service::parse_visit_date("not-a-date").is_none());
    assert!(booking_service::parse_visit_date("2025-03-10").is_none());
    assert!(booking_service::parse_visit_date("").is_none());
}

// Integration flow: owner registers and logs in, lists houses with images,
// visitors browse by category and request a visit.
#[tokio::test]
async fn register_list_and_book_flow() -> anyhow::Result<()> {
    // Allow skipping when no DB is configured in the environment.
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) => url,
        Err(_) => {
            eprintln!(
                "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration flow tests."
            );
            return Ok(());
        }
    };

    let upload_dir = tempfile::tempdir()?;
    let state = setup_state(&database_url, upload_dir.path()).await?;

    // Register an owner.
    let owner = auth_service::register_owner(
        &state.pool,
        RegisterForm {
            name: "Asha".into(),
            email: "asha@example.com".into(),
            password: "hunter42hunter42".into(),
            phone: Some("555-0101".into()),
        },
    )
    .await?;
    assert_ne!(owner.password_hash, "hunter42hunter42");

    // Duplicate email is rejected and the owner count stays unchanged.
    let duplicate = auth_service::register_owner(
        &state.pool,
        RegisterForm {
            name: "Impostor".into(),
            email: "asha@example.com".into(),
            password: "other-password".into(),
            phone: None,
        },
    )
    .await;
    assert!(matches!(duplicate, Err(AppError::EmailTaken)));
    assert_eq!(count(&state, "owners").await?, 1);

    // Wrong password leaves no identity; the right one verifies.
    let bad = auth_service::verify_login(
        &state.pool,
        LoginForm {
            email: "asha@example.com".into(),
            password: "wrong".into(),
        },
    )
    .await?;
    assert!(bad.is_none());

    let logged_in = auth_service::verify_login(
        &state.pool,
        LoginForm {
            email: "asha@example.com".into(),
            password: "hunter42hunter42".into(),
        },
    )
    .await?
    .expect("correct credentials must verify");
    assert_eq!(logged_in.id, owner.id);

    // Seven houses, alternating types, with strictly increasing listing times.
    let mut house_ids = Vec::new();
    for i in 0..7 {
        let bhk_type = if i % 2 == 0 {
            BhkType::TwoBhk
        } else {
            BhkType::OneBhk
        };
        let house = house_service::create_house(
            &state,
            owner.id,
            NewHouse {
                title: format!("House {i}"),
                bhk_type,
                rent: 10_000 + i as i64,
                address: "12 Lake Road".into(),
                description: None,
            },
            Vec::new(),
        )
        .await?;
        house_ids.push(house.id);
    }
    for (i, id) in house_ids.iter().enumerate() {
        sqlx::query(
            "UPDATE houses SET created_at = TIMESTAMPTZ '2025-01-01 00:00:00+00' + make_interval(hours => $2) WHERE id = $1",
        )
        .bind(id)
        .bind(i as i32)
        .execute(&state.pool)
        .await?;
    }

    // Home page: capped at six, newest first, the oldest house falls off.
    let latest = house_service::latest_houses(&state).await?;
    assert_eq!(latest.len(), 6);
    assert_eq!(latest[0].title, "House 6");
    assert!(latest.iter().all(|h| h.title != "House 0"));
    assert!(
        latest.windows(2).all(|w| w[0].created_at >= w[1].created_at),
        "home page must list newest first"
    );

    // Category listing: only the requested type, newest first.
    let two_bhk = house_service::houses_by_type(&state, BhkType::TwoBhk).await?;
    assert_eq!(two_bhk.len(), 4);
    assert!(two_bhk.iter().all(|h| h.bhk_type == "2BHK"));
    assert!(two_bhk.windows(2).all(|w| w[0].created_at >= w[1].created_at));

    // A second owner only sees their own houses on the dashboard.
    let rival = auth_service::register_owner(
        &state.pool,
        RegisterForm {
            name: "Bruno".into(),
            email: "bruno@example.com".into(),
            password: "correct-horse-battery".into(),
            phone: None,
        },
    )
    .await?;
    house_service::create_house(
        &state,
        rival.id,
        NewHouse {
            title: "Bruno's place".into(),
            bhk_type: BhkType::ThreeBhk,
            rent: 30_000,
            address: "1 Other Street".into(),
            description: Some("Not Asha's".into()),
        },
        Vec::new(),
    )
    .await?;

    let asha_houses = house_service::houses_by_owner(&state, owner.id).await?;
    assert_eq!(asha_houses.len(), 7);
    assert!(asha_houses.iter().all(|h| h.owner_id == owner.id));
    let bruno_houses = house_service::houses_by_owner(&state, rival.id).await?;
    assert_eq!(bruno_houses.len(), 1);

    // Uploads: the .png is stored and linked, the .exe is silently dropped.
    let png_bytes = b"\x89PNG fake image bytes".to_vec();
    let with_images = house_service::create_house(
        &state,
        owner.id,
        NewHouse {
            title: "House with photos".into(),
            bhk_type: BhkType::TwoBhk,
            rent: 18_000,
            address: "3 Garden Walk".into(),
            description: None,
        },
        vec![
            UploadedImage {
                original_name: "photo.png".into(),
                bytes: png_bytes.clone(),
            },
            UploadedImage {
                original_name: "photo.exe".into(),
                bytes: b"MZ definitely not an image".to_vec(),
            },
        ],
    )
    .await?;

    let (detail, images) = house_service::house_detail(&state, with_images.id).await?;
    assert_eq!(detail.id, with_images.id);
    assert_eq!(images.len(), 1, "only the .png may produce an image row");
    assert!(images[0].filename.ends_with("photo.png"));

    let mut stored_files = Vec::new();
    let mut entries = tokio::fs::read_dir(upload_dir.path()).await?;
    while let Some(entry) = entries.next_entry().await? {
        stored_files.push(entry.file_name().to_string_lossy().to_string());
    }
    assert_eq!(stored_files, vec![images[0].filename.clone()]);
    let read_back = tokio::fs::read(upload_dir.path().join(&images[0].filename)).await?;
    assert_eq!(read_back, png_bytes, "served bytes must match the upload");

    // Booking: a well-formed date persists as pending.
    let visit_date =
        booking_service::parse_visit_date("2025-03-10T14:30").expect("valid date must parse");
    let booking = booking_service::create_booking(
        &state,
        with_images.id,
        BookingForm {
            name: "Tenant Tom".into(),
            email: "tom@example.com".into(),
            phone: None,
            date: "2025-03-10T14:30".into(),
        },
        visit_date,
    )
    .await?;
    assert_eq!(booking.status, "pending");
    assert_eq!(booking.house_id, with_images.id);
    assert_eq!(count(&state, "bookings").await?, 1);

    // An unparseable date never reaches the persistence layer.
    assert!(booking_service::parse_visit_date("not-a-date").is_none());
    assert_eq!(count(&state, "bookings").await?, 1);

    // Booking against a missing house is a not-found, not a row.
    let missing = booking_service::create_booking(
        &state,
        Uuid::new_v4(),
        BookingForm {
            name: "Ghost".into(),
            email: "ghost@example.com".into(),
            phone: None,
            date: "2025-03-10T14:30".into(),
        },
        visit_date,
    )
    .await;
    assert!(matches!(missing, Err(AppError::NotFound)));

    // Unknown house detail is a not-found.
    let unknown = house_service::house_detail(&state, Uuid::new_v4()).await;
    assert!(matches!(unknown, Err(AppError::NotFound)));

    Ok(())
}

async fn setup_state(database_url: &str, upload_dir: &Path) -> anyhow::Result<AppState> {
    let pool = create_pool(database_url).await?;
    let orm = create_orm_conn(database_url).await?;
    run_migrations(&orm).await?;

    // Clean tables between runs.
    sqlx::query("TRUNCATE TABLE bookings, house_images, houses, owners RESTART IDENTITY CASCADE")
        .execute(&pool)
        .await?;

    let config = AppConfig {
        database_url: database_url.to_string(),
        host: "127.0.0.1".to_string(),
        port: 0,
        session_secret: "integration-test-secret-0123456789abcdef".to_string(),
        upload_dir: upload_dir.to_path_buf(),
        max_upload_bytes: 16 * 1024 * 1024,
    };

    Ok(AppState { pool, orm, config })
}

async fn count(state: &AppState, table: &str) -> anyhow::Result<i64> {
    let query = format!("SELECT count(*) FROM {table}");
    let row: (i64,) = sqlx::query_as(&query).fetch_one(&state.pool).await?;
    Ok(row.0)
}
