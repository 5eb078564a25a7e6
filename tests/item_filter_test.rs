mod common;

use common::{sample_item_input, TestApp};
use stockroom_api::{
    entities::user::Role,
    services::items::{CreateItemInput, ItemFilters},
};

async fn seed_inventory(app: &TestApp) -> stockroom_api::auth::AuthUser {
    let tech = app.seed_user("tech", Role::Technician).await;

    // One healthy HP item, one low-stock Acme item.
    let mut healthy = sample_item_input();
    healthy.quantity = 10;
    healthy.min_quantity = 2;
    app.state.items.create_item(&tech, healthy).await.unwrap();

    let acme = CreateItemInput {
        manufacturer: "Acme".to_string(),
        model: "Widget".to_string(),
        quantity: 1,
        min_quantity: 5,
        ..sample_item_input()
    };
    app.state.items.create_item(&tech, acme).await.unwrap();

    tech
}

#[tokio::test]
async fn q_filter_matches_substrings_across_fields() {
    let app = TestApp::new().await;
    let tech = seed_inventory(&app).await;

    let filters = ItemFilters {
        q: Some("acme".to_string()),
        low_stock: None,
    };
    let items = app.state.items.list_items(&tech, filters).await.unwrap();
    // SQLite LIKE is case-insensitive for ASCII; "acme" finds "Acme".
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].manufacturer, "Acme");

    // Part number is searched too.
    let filters = ItemFilters {
        q: Some("C4127".to_string()),
        low_stock: None,
    };
    let items = app.state.items.list_items(&tech, filters).await.unwrap();
    assert_eq!(items.len(), 2, "both items carry the C4127X part number");

    // No match yields an empty list, not an error.
    let filters = ItemFilters {
        q: Some("nonexistent".to_string()),
        low_stock: None,
    };
    let items = app.state.items.list_items(&tech, filters).await.unwrap();
    assert!(items.is_empty());
}

#[tokio::test]
async fn blank_q_is_ignored() {
    let app = TestApp::new().await;
    let tech = seed_inventory(&app).await;

    let filters = ItemFilters {
        q: Some("   ".to_string()),
        low_stock: None,
    };
    let items = app.state.items.list_items(&tech, filters).await.unwrap();
    assert_eq!(items.len(), 2);
}

#[tokio::test]
async fn low_stock_filter_returns_only_items_at_or_below_minimum() {
    let app = TestApp::new().await;
    let tech = seed_inventory(&app).await;

    let filters = ItemFilters {
        q: None,
        low_stock: Some(true),
    };
    let items = app.state.items.list_items(&tech, filters).await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].manufacturer, "Acme");
    assert!(items[0].low_stock());

    // low_stock: false means "no filter", matching the query surface.
    let filters = ItemFilters {
        q: None,
        low_stock: Some(false),
    };
    let items = app.state.items.list_items(&tech, filters).await.unwrap();
    assert_eq!(items.len(), 2);
}

#[tokio::test]
async fn filters_compose() {
    let app = TestApp::new().await;
    let tech = seed_inventory(&app).await;

    let filters = ItemFilters {
        q: Some("HP".to_string()),
        low_stock: Some(true),
    };
    let items = app.state.items.list_items(&tech, filters).await.unwrap();
    assert!(items.is_empty(), "the HP item is not low on stock");
}
