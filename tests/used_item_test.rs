mod common;

use assert_matches::assert_matches;
use common::{sample_item_input, TestApp};
use stockroom_api::{
    entities::item_history::HistoryAction,
    entities::user::Role,
    errors::ServiceError,
    services::used_items::CreateUsedItemInput,
};

#[tokio::test]
async fn using_an_item_decrements_quantity_by_one_and_audits_it() {
    let app = TestApp::new().await;
    let tech = app.seed_user("tech", Role::Technician).await;

    let mut input = sample_item_input();
    input.quantity = 3;
    let item = app.state.items.create_item(&tech, input).await.unwrap();

    let used = app
        .state
        .used_items
        .create_used_item(
            &tech,
            CreateUsedItemInput {
                item_id: item.id,
                work_order: 4711,
            },
        )
        .await
        .unwrap();
    assert_eq!(used.item_id, item.id);
    assert_eq!(used.work_order, 4711);
    assert_eq!(used.used_by, Some(tech.user_id));

    let after = app.state.items.get_item(&tech, item.id).await.unwrap();
    assert_eq!(after.quantity, 2);
    assert_eq!(after.last_modified_by, Some(tech.user_id));

    let records = app.state.history.list_for_item(&tech, item.id).await.unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].action, HistoryAction::Update);
    assert_eq!(
        records[1].changes.as_deref(),
        Some("quantity: '3' has been changed to '2'")
    );
}

#[tokio::test]
async fn exhausted_items_cannot_be_used_and_nothing_is_written() {
    let app = TestApp::new().await;
    let tech = app.seed_user("tech", Role::Technician).await;

    let mut input = sample_item_input();
    input.quantity = 0;
    let item = app.state.items.create_item(&tech, input).await.unwrap();

    let err = app
        .state
        .used_items
        .create_used_item(
            &tech,
            CreateUsedItemInput {
                item_id: item.id,
                work_order: 4711,
            },
        )
        .await
        .unwrap_err();
    match err {
        ServiceError::InvalidOperation(msg) => {
            assert_eq!(msg, "Cannot use item with quantity 0.");
        }
        other => panic!("expected InvalidOperation, got {other:?}"),
    }

    let after = app.state.items.get_item(&tech, item.id).await.unwrap();
    assert_eq!(after.quantity, 0);

    let rows = app
        .state
        .used_items
        .list_used_items(&tech, Some(item.id))
        .await
        .unwrap();
    assert!(rows.is_empty());

    // Only the create record exists; the failed use left no trace.
    let records = app.state.history.list_for_item(&tech, item.id).await.unwrap();
    assert_eq!(records.len(), 1);
}

#[tokio::test]
async fn interns_may_not_record_item_use() {
    let app = TestApp::new().await;
    let tech = app.seed_user("tech", Role::Technician).await;
    let intern = app.seed_user("intern", Role::Intern).await;

    let item = app
        .state
        .items
        .create_item(&tech, sample_item_input())
        .await
        .unwrap();

    let err = app
        .state
        .used_items
        .create_used_item(
            &intern,
            CreateUsedItemInput {
                item_id: item.id,
                work_order: 1,
            },
        )
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::Forbidden(_));
}

#[tokio::test]
async fn deleting_an_item_removes_its_used_item_rows() {
    let app = TestApp::new().await;
    let tech = app.seed_user("tech", Role::Technician).await;

    let mut input = sample_item_input();
    input.quantity = 2;
    let item = app.state.items.create_item(&tech, input).await.unwrap();

    app.state
        .used_items
        .create_used_item(
            &tech,
            CreateUsedItemInput {
                item_id: item.id,
                work_order: 1,
            },
        )
        .await
        .unwrap();

    app.state.items.delete_item(&tech, item.id).await.unwrap();

    let rows = app
        .state
        .used_items
        .list_used_items(&tech, Some(item.id))
        .await
        .unwrap();
    assert!(rows.is_empty());
}
