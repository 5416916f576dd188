use crate::e2e::helpers;

use category_exclusions::domain::exclusions::{ExclusionsResponse, EXCLUDED_IDS_OPTION};
use helpers::TestContext;
use hyper::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use test_context::test_context;

const PATH: &str = "/api/admin/exclusions";

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_require_authentication(ctx: &TestContext) {
    let response = ctx.client.get(PATH).await.unwrap();

    response
        .assert_status(StatusCode::UNAUTHORIZED)
        .assert_error_message("Missing authorization header");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_actors_without_catalog_rights(ctx: &TestContext) {
    let token = ctx.fixtures.customer_token();

    let response = ctx.client.get_with_auth(PATH, &token).await.unwrap();

    response.assert_status(StatusCode::FORBIDDEN);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_an_empty_set_before_anything_is_saved(ctx: &TestContext) {
    let token = ctx.fixtures.admin_token();

    let response = ctx.client.get_with_auth(PATH, &token).await.unwrap();
    response.assert_status(StatusCode::OK);

    let body: ExclusionsResponse = response.json().unwrap();
    assert!(body.excluded_ids.is_empty());
    assert!(body.csrf_token.is_some());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_normalize_and_persist_a_submitted_set(ctx: &TestContext) {
    let token = ctx.fixtures.admin_token();

    let response = ctx
        .client
        .put_with_auth(
            PATH,
            &json!({
                "action": "save-exclusions",
                "csrf_token": ctx.fixtures.admin_csrf_token(),
                "excluded_ids": [3, "3", -1, 0, 3, 5]
            }),
            &token,
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(response.body.as_ref().unwrap()["excluded_ids"], json!([3, 5]));

    let current = ctx.client.get_with_auth(PATH, &token).await.unwrap();
    assert_eq!(current.body.as_ref().unwrap()["excluded_ids"], json!([3, 5]));

    // Stored without eager loading
    assert_eq!(
        ctx.option_store.autoload_of(EXCLUDED_IDS_OPTION).await,
        Some(false)
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_clear_the_set_with_an_empty_submission(ctx: &TestContext) {
    ctx.fixtures.exclude(&[10, 20]).await;
    let token = ctx.fixtures.admin_token();

    let response = ctx
        .client
        .put_with_auth(
            PATH,
            &json!({
                "action": "save-exclusions",
                "csrf_token": ctx.fixtures.admin_csrf_token(),
                "excluded_ids": []
            }),
            &token,
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(ctx.fixtures.excluded().await, Vec::<i64>::new());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_a_save_without_a_valid_token(ctx: &TestContext) {
    ctx.fixtures.exclude(&[10]).await;
    let token = ctx.fixtures.admin_token();

    let missing = ctx
        .client
        .put_with_auth(
            PATH,
            &json!({ "action": "save-exclusions", "excluded_ids": [15] }),
            &token,
        )
        .await
        .unwrap();
    missing.assert_status(StatusCode::FORBIDDEN);

    let forged = ctx
        .client
        .put_with_auth(
            PATH,
            &json!({
                "action": "save-exclusions",
                "csrf_token": "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA",
                "excluded_ids": [15]
            }),
            &token,
        )
        .await
        .unwrap();
    forged.assert_status(StatusCode::FORBIDDEN);

    assert_eq!(ctx.fixtures.excluded().await, vec![10]);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_a_token_issued_to_another_actor(ctx: &TestContext) {
    let other_admin = ctx
        .fixtures
        .token_with_capabilities("admin-2", &["manage_catalog"]);

    let response = ctx
        .client
        .put_with_auth(
            PATH,
            &json!({
                "action": "save-exclusions",
                "csrf_token": ctx.fixtures.admin_csrf_token(),
                "excluded_ids": [15]
            }),
            &other_admin,
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::FORBIDDEN);
    assert!(ctx.fixtures.excluded().await.is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_not_let_unauthorized_actors_save(ctx: &TestContext) {
    let token = ctx.fixtures.customer_token();

    let response = ctx
        .client
        .put_with_auth(
            PATH,
            &json!({
                "action": "save-exclusions",
                "csrf_token": ctx.fixtures.admin_csrf_token(),
                "excluded_ids": [15]
            }),
            &token,
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::FORBIDDEN);
    assert!(ctx.fixtures.excluded().await.is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_unknown_actions(ctx: &TestContext) {
    let token = ctx.fixtures.admin_token();

    let response = ctx
        .client
        .put_with_auth(
            PATH,
            &json!({
                "action": "reset-everything",
                "csrf_token": ctx.fixtures.admin_csrf_token(),
                "excluded_ids": [15]
            }),
            &token,
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(ctx.fixtures.excluded().await.is_empty());
}
