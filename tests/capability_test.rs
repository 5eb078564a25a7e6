mod common;

use assert_matches::assert_matches;
use common::{sample_item_input, TestApp};
use stockroom_api::{
    entities::user::Role,
    errors::ServiceError,
    services::items::{ItemFilters, UpdateItemInput},
    services::users::CreateUserInput,
};

#[tokio::test]
async fn viewer_can_read_but_not_mutate_items() {
    let app = TestApp::new().await;
    let tech = app.seed_user("tech", Role::Technician).await;
    let viewer = app.seed_user("viewer", Role::Viewer).await;

    let item = app
        .state
        .items
        .create_item(&tech, sample_item_input())
        .await
        .unwrap();

    assert!(app.state.items.get_item(&viewer, item.id).await.is_ok());
    assert!(app
        .state
        .items
        .list_items(&viewer, ItemFilters::default())
        .await
        .is_ok());

    let err = app
        .state
        .items
        .create_item(&viewer, sample_item_input())
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::Forbidden(_));

    let err = app
        .state
        .items
        .update_item(&viewer, item.id, UpdateItemInput::default())
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::Forbidden(_));
}

#[tokio::test]
async fn intern_can_edit_but_not_create_or_delete_items() {
    let app = TestApp::new().await;
    let tech = app.seed_user("tech", Role::Technician).await;
    let intern = app.seed_user("intern", Role::Intern).await;

    let item = app
        .state
        .items
        .create_item(&tech, sample_item_input())
        .await
        .unwrap();

    let update = UpdateItemInput {
        location: Some("B2".to_string()),
        ..Default::default()
    };
    let updated = app
        .state
        .items
        .update_item(&intern, item.id, update)
        .await
        .unwrap();
    assert_eq!(updated.location, "B2");
    assert_eq!(updated.last_modified_by, Some(intern.user_id));

    assert_matches!(
        app.state
            .items
            .create_item(&intern, sample_item_input())
            .await
            .unwrap_err(),
        ServiceError::Forbidden(_)
    );
    assert_matches!(
        app.state.items.delete_item(&intern, item.id).await.unwrap_err(),
        ServiceError::Forbidden(_)
    );
}

#[tokio::test]
async fn forbidden_message_names_role_action_and_resource() {
    let app = TestApp::new().await;
    let viewer = app.seed_user("viewer", Role::Viewer).await;

    let err = app
        .state
        .items
        .create_item(&viewer, sample_item_input())
        .await
        .unwrap_err();
    match err {
        ServiceError::Forbidden(msg) => {
            assert_eq!(msg, "Your role (Viewer) does not allow you to add a item.");
        }
        other => panic!("expected Forbidden, got {other:?}"),
    }
}

#[tokio::test]
async fn only_superusers_manage_user_accounts() {
    let app = TestApp::new().await;
    let admin = app.seed_user("admin", Role::Superuser).await;
    let tech = app.seed_user("tech", Role::Technician).await;

    let input = CreateUserInput {
        username: "newbie".to_string(),
        password: "longenoughpw".to_string(),
        email: "newbie@example.com".to_string(),
        role: Role::Intern,
    };
    let created = app.state.users.create_user(&admin, input.clone()).await.unwrap();
    assert_eq!(created.role, Role::Intern);

    assert_matches!(
        app.state.users.create_user(&tech, input).await.unwrap_err(),
        ServiceError::Forbidden(_)
    );
    assert_matches!(
        app.state.users.list_users(&tech).await.unwrap_err(),
        ServiceError::Forbidden(_)
    );
}

#[tokio::test]
async fn admin_seeding_is_idempotent() {
    let app = TestApp::new().await;

    app.state.users.seed_admin("first-password").await.unwrap();
    // A second run is a no-op: the existing account keeps its password.
    app.state.users.seed_admin("other-password").await.unwrap();

    let admin = app
        .state
        .users
        .authenticate("admin", "first-password")
        .await
        .unwrap();
    assert_eq!(admin.role, Role::Superuser);
    assert_matches!(
        app.state
            .users
            .authenticate("admin", "other-password")
            .await
            .unwrap_err(),
        ServiceError::Unauthorized(_)
    );
}

#[tokio::test]
async fn role_none_is_denied_everywhere() {
    let app = TestApp::new().await;
    let nobody = app.seed_user("nobody", Role::None).await;

    assert_matches!(
        app.state
            .items
            .list_items(&nobody, ItemFilters::default())
            .await
            .unwrap_err(),
        ServiceError::Forbidden(_)
    );
    assert_matches!(
        app.state.notifications.list_notifications(&nobody).await.unwrap_err(),
        ServiceError::Forbidden(_)
    );
}
