//! E-bazaar actions: CRUD, relations, saves and media

mod common;

use crate::common::{admin, ebazaar_payload, fixed_now, member, seed_ebazaar, TestHarness};
use chrono::Duration;
use playday_core::common::{ApiError, EBazaarId, MediaId, PaginationArgs};
use playday_core::domains::activity_log::{ActivityEvent, LogName};
use playday_core::domains::ebazaar::actions::{self, UploadedFile};
use playday_core::domains::ebazaar::data::EBazaarData;
use playday_core::domains::ebazaar::filters::EBazaarFilter;
use playday_core::domains::ebazaar::models::{MediaKind, NewMedia};
use playday_core::domains::ebazaar::requests::MediaReference;
use playday_core::kernel::TestDependencies;
use serde_json::json;

fn png(name: &str) -> UploadedFile {
    UploadedFile {
        file_name: Some(name.to_string()),
        content_type: Some("image/png".to_string()),
        bytes: vec![0x89, b'P', b'N', b'G'],
    }
}

// ============================================================================
// Create / Update / Delete
// ============================================================================

#[tokio::test]
async fn create_attaches_media_references_and_audits() {
    let harness = TestHarness::new();
    let actor = admin();
    let mut payload = ebazaar_payload("Night Market", Duration::days(1));
    payload.media = vec![
        MediaReference {
            kind: Some("image".to_string()),
            url: Some("https://cdn.example.com/banner.jpg".to_string()),
            ..Default::default()
        },
        MediaReference {
            kind: Some("video".to_string()),
            url: Some("https://cdn.example.com/teaser.mp4".to_string()),
            ..Default::default()
        },
    ];

    let view = actions::create_ebazaar(&actor, payload, &harness.server_deps())
        .await
        .unwrap();

    assert_eq!(view.title, "Night Market");
    assert_eq!(view.created_by, Some(actor.user_id().to_string()));
    assert_eq!(view.media.len(), 2);
    assert_eq!(view.media[0].kind, "image");
    assert_eq!(view.media[0].position, 0);
    assert_eq!(view.media[1].kind, "video");
    assert_eq!(view.media[1].position, 1);
    assert!(view.orders.is_none());

    let entries = harness
        .deps
        .activity_log
        .entries_for(LogName::Ebazaar, ActivityEvent::Created);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].properties["attributes"]["title"], json!("Night Market"));
}

#[tokio::test]
async fn invalid_payload_reports_every_field() {
    let harness = TestHarness::new();
    let mut payload = ebazaar_payload("", Duration::days(1));
    payload.category = Some("weapons".to_string());
    payload.end_at = payload.start_at.clone();

    let result = actions::create_ebazaar(&admin(), payload, &harness.server_deps()).await;

    match result {
        Err(ApiError::Validation(errors)) => {
            assert!(errors.has("title"));
            assert!(errors.has("category"));
            assert!(errors.has("end_at"));
        }
        other => panic!("expected validation error, got {other:?}"),
    }
    assert!(harness.deps.ebazaars.ebazaars().is_empty());
}

#[tokio::test]
async fn update_rewrites_fields_and_audits_the_diff() {
    let harness = TestHarness::new();
    let deps = harness.server_deps();
    let actor = admin();
    let created = actions::create_ebazaar(
        &actor,
        ebazaar_payload("Night Market", Duration::days(1)),
        &deps,
    )
    .await
    .unwrap();
    let id: EBazaarId = created.id.parse().unwrap();

    let updated = actions::update_ebazaar(
        &actor,
        id,
        ebazaar_payload("Harbour Night Market", Duration::days(1)),
        &deps,
    )
    .await
    .unwrap();

    assert_eq!(updated.title, "Harbour Night Market");
    let entries = harness
        .deps
        .activity_log
        .entries_for(LogName::Ebazaar, ActivityEvent::Updated);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].properties["old"]["title"], json!("Night Market"));
    assert_eq!(
        entries[0].properties["attributes"]["title"],
        json!("Harbour Night Market")
    );
    assert!(entries[0].properties["attributes"].get("location").is_none());
}

#[tokio::test]
async fn update_with_identical_payload_is_idempotent() {
    let harness = TestHarness::new();
    let deps = harness.server_deps();
    let actor = admin();
    let created = actions::create_ebazaar(
        &actor,
        ebazaar_payload("Night Market", Duration::days(1)),
        &deps,
    )
    .await
    .unwrap();
    let id: EBazaarId = created.id.parse().unwrap();
    let payload = ebazaar_payload("Harbour Night Market", Duration::days(1));

    let first = actions::update_ebazaar(&actor, id, payload.clone(), &deps)
        .await
        .unwrap();
    harness.deps.clock.advance(Duration::minutes(5));
    let second = actions::update_ebazaar(&actor, id, payload, &deps)
        .await
        .unwrap();

    let without_updated_at = |view: EBazaarData| {
        let mut value = serde_json::to_value(view).unwrap();
        let updated_at = value
            .as_object_mut()
            .unwrap()
            .remove("updated_at")
            .unwrap();
        (value, updated_at)
    };
    let (first, first_updated_at) = without_updated_at(first);
    let (second, second_updated_at) = without_updated_at(second);
    assert_eq!(first, second);
    assert_ne!(first_updated_at, second_updated_at);

    assert_eq!(
        harness
            .deps
            .activity_log
            .entries_for(LogName::Ebazaar, ActivityEvent::Updated)
            .len(),
        1
    );
}

#[tokio::test]
async fn update_missing_ebazaar_is_not_found() {
    let harness = TestHarness::new();

    let result = actions::update_ebazaar(
        &admin(),
        EBazaarId::new(),
        ebazaar_payload("Ghost", Duration::days(1)),
        &harness.server_deps(),
    )
    .await;

    assert!(matches!(result, Err(ApiError::NotFound("E-Bazaar"))));
}

#[tokio::test]
async fn delete_missing_ebazaar_is_not_found() {
    let harness = TestHarness::new();

    let result =
        actions::delete_ebazaar(&admin(), EBazaarId::new(), &harness.server_deps()).await;

    assert!(matches!(result, Err(ApiError::NotFound("E-Bazaar"))));
    assert!(harness.deps.activity_log.entries().is_empty());
}

#[tokio::test]
async fn delete_removes_record_media_and_files() {
    let harness = TestHarness::new();
    let deps = harness.server_deps();
    let actor = admin();
    let ebazaar = seed_ebazaar(
        &harness.deps,
        "Flea Market",
        fixed_now(),
        fixed_now() + Duration::hours(3),
    );
    let media = actions::upload_media(&actor, ebazaar.id, MediaKind::Image, png("stall.png"), &deps)
        .await
        .unwrap();
    let key = media.path.clone().unwrap();
    assert!(harness.deps.media_storage.contains(&key));

    actions::delete_ebazaar(&actor, ebazaar.id, &deps).await.unwrap();

    assert!(harness.deps.ebazaars.ebazaars().is_empty());
    assert!(harness.deps.ebazaars.media().is_empty());
    assert_eq!(harness.deps.media_storage.deleted(), vec![key]);
    assert_eq!(
        harness
            .deps
            .activity_log
            .entries_for(LogName::Ebazaar, ActivityEvent::Deleted)
            .len(),
        1
    );

    let again = actions::delete_ebazaar(&actor, ebazaar.id, &deps).await;
    assert!(matches!(again, Err(ApiError::NotFound(_))));
}

// ============================================================================
// Show / List
// ============================================================================

#[tokio::test]
async fn show_with_orders_loads_customers_in_one_batch() {
    let harness = TestHarness::new();
    let ebazaar = seed_ebazaar(
        &harness.deps,
        "Book Fair",
        fixed_now(),
        fixed_now() + Duration::hours(5),
    );
    let alice = harness.deps.ebazaars.seed_user("Alice", "alice@example.com");
    let bob = harness.deps.ebazaars.seed_user("Bob", "bob@example.com");
    harness.deps.ebazaars.seed_order(ebazaar.id, alice.id, 1500);
    harness.deps.ebazaars.seed_order(ebazaar.id, bob.id, 2500);
    harness.deps.ebazaars.seed_order(ebazaar.id, alice.id, 700);

    let view = actions::show_ebazaar(&member(), ebazaar.id, true, &harness.server_deps())
        .await
        .unwrap();

    let orders = view.orders.expect("orders requested");
    assert_eq!(orders.len(), 3);
    let names: Vec<String> = orders
        .iter()
        .map(|o| o.customer.as_ref().unwrap().name.clone())
        .collect();
    assert_eq!(names, vec!["Alice", "Bob", "Alice"]);
    assert_eq!(harness.deps.ebazaars.order_calls(), vec![ebazaar.id]);
}

#[tokio::test]
async fn show_without_orders_skips_the_order_query() {
    let harness = TestHarness::new();
    let ebazaar = seed_ebazaar(
        &harness.deps,
        "Book Fair",
        fixed_now(),
        fixed_now() + Duration::hours(5),
    );

    let view = actions::show_ebazaar(&member(), ebazaar.id, false, &harness.server_deps())
        .await
        .unwrap();

    assert!(view.orders.is_none());
    assert!(harness.deps.ebazaars.order_calls().is_empty());
}

#[tokio::test]
async fn show_reports_live_flag() {
    let harness = TestHarness::new();
    let live = seed_ebazaar(
        &harness.deps,
        "Now",
        fixed_now() - Duration::hours(1),
        fixed_now() + Duration::hours(1),
    );
    let later = seed_ebazaar(
        &harness.deps,
        "Later",
        fixed_now() + Duration::hours(1),
        fixed_now() + Duration::hours(2),
    );
    let deps = harness.server_deps();

    assert!(actions::show_ebazaar(&member(), live.id, false, &deps).await.unwrap().is_live);
    assert!(!actions::show_ebazaar(&member(), later.id, false, &deps).await.unwrap().is_live);
}

#[tokio::test]
async fn list_filters_and_loads_media_in_one_call() {
    let harness = TestHarness::new();
    let start = fixed_now() + Duration::days(2);
    let food = seed_ebazaar(&harness.deps, "Street Food Festival", start, start + Duration::hours(4));
    seed_ebazaar(&harness.deps, "Vintage Records", start, start + Duration::hours(4));
    harness.deps.ebazaars.seed_media(
        NewMedia::builder()
            .ebazaar_id(food.id)
            .kind(MediaKind::Image)
            .file_name("poster.jpg")
            .mime_type("image/jpeg")
            .url("https://cdn.example.com/poster.jpg")
            .build(),
    );

    let page = actions::list_ebazaars(
        &member(),
        &EBazaarFilter {
            search: Some("food".to_string()),
            ..Default::default()
        },
        &PaginationArgs::default(),
        &harness.server_deps(),
    )
    .await
    .unwrap();

    assert_eq!(page.data.len(), 1);
    assert_eq!(page.data[0].title, "Street Food Festival");
    assert_eq!(page.data[0].media.len(), 1);
    assert_eq!(harness.deps.ebazaars.media_for_calls(), vec![vec![food.id]]);
}

// ============================================================================
// Saves
// ============================================================================

#[tokio::test]
async fn toggle_activity_flips_saved_state() {
    let harness = TestHarness::new();
    let deps = harness.server_deps();
    let actor = member();
    let ebazaar = seed_ebazaar(
        &harness.deps,
        "Craft Fair",
        fixed_now(),
        fixed_now() + Duration::hours(2),
    );

    assert!(actions::toggle_activity(&actor, ebazaar.id, &deps).await.unwrap());
    assert!(harness.deps.ebazaars.is_saved(ebazaar.id, actor.user_id()));

    assert!(!actions::toggle_activity(&actor, ebazaar.id, &deps).await.unwrap());
    assert!(!harness.deps.ebazaars.is_saved(ebazaar.id, actor.user_id()));
}

#[tokio::test]
async fn toggle_activity_on_missing_ebazaar_is_not_found() {
    let harness = TestHarness::new();

    let result =
        actions::toggle_activity(&member(), EBazaarId::new(), &harness.server_deps()).await;

    assert!(matches!(result, Err(ApiError::NotFound(_))));
}

// ============================================================================
// Media
// ============================================================================

#[tokio::test]
async fn upload_stores_file_and_appends_media() {
    let harness = TestHarness::new();
    let deps = harness.server_deps();
    let actor = admin();
    let ebazaar = seed_ebazaar(
        &harness.deps,
        "Art Walk",
        fixed_now(),
        fixed_now() + Duration::hours(2),
    );

    let first = actions::upload_media(&actor, ebazaar.id, MediaKind::Image, png("a.png"), &deps)
        .await
        .unwrap();
    let second = actions::upload_media(&actor, ebazaar.id, MediaKind::Image, png("b.png"), &deps)
        .await
        .unwrap();

    assert_eq!(first.position, 0);
    assert_eq!(second.position, 1);
    assert_eq!(first.mime_type, "image/png");
    assert_eq!(first.size_bytes, 4);
    let key = first.path.unwrap();
    assert!(key.starts_with(&format!("ebazaars/{}/", ebazaar.id)));
    assert!(key.ends_with(".png"));
    assert_eq!(first.url, format!("/media/{key}"));
}

#[tokio::test]
async fn upload_rejects_wrong_kind_without_storing() {
    let harness = TestHarness::new();
    let ebazaar = seed_ebazaar(
        &harness.deps,
        "Art Walk",
        fixed_now(),
        fixed_now() + Duration::hours(2),
    );

    let result = actions::upload_media(
        &admin(),
        ebazaar.id,
        MediaKind::Video,
        png("still.png"),
        &harness.server_deps(),
    )
    .await;

    assert!(matches!(result, Err(ApiError::Validation(ref e)) if e.has("file")));
    assert!(harness.deps.media_storage.keys().is_empty());
    assert!(harness.deps.ebazaars.media().is_empty());
}

#[tokio::test]
async fn upload_respects_size_limit() {
    let harness = TestHarness::with_deps(
        TestDependencies::at(fixed_now()).with_max_upload_bytes(2),
    );
    let ebazaar = seed_ebazaar(
        &harness.deps,
        "Art Walk",
        fixed_now(),
        fixed_now() + Duration::hours(2),
    );

    let result = actions::upload_media(
        &admin(),
        ebazaar.id,
        MediaKind::Image,
        png("big.png"),
        &harness.server_deps(),
    )
    .await;

    assert!(matches!(result, Err(ApiError::Validation(_))));
}

#[tokio::test]
async fn delete_media_checks_kind_and_removes_file() {
    let harness = TestHarness::new();
    let deps = harness.server_deps();
    let actor = admin();
    let ebazaar = seed_ebazaar(
        &harness.deps,
        "Art Walk",
        fixed_now(),
        fixed_now() + Duration::hours(2),
    );
    let image = actions::upload_media(&actor, ebazaar.id, MediaKind::Image, png("a.png"), &deps)
        .await
        .unwrap();

    let wrong_kind =
        actions::delete_media(&actor, ebazaar.id, MediaKind::Video, image.id, &deps).await;
    assert!(matches!(wrong_kind, Err(ApiError::NotFound("Video"))));
    assert_eq!(harness.deps.ebazaars.media().len(), 1);

    actions::delete_media(&actor, ebazaar.id, MediaKind::Image, image.id, &deps)
        .await
        .unwrap();
    assert!(harness.deps.ebazaars.media().is_empty());
    assert_eq!(harness.deps.media_storage.deleted(), vec![image.path.unwrap()]);

    let missing =
        actions::delete_media(&actor, ebazaar.id, MediaKind::Image, MediaId::new(), &deps).await;
    assert!(matches!(missing, Err(ApiError::NotFound("Image"))));
}
