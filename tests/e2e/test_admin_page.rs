use crate::e2e::helpers;

use helpers::TestContext;
use hyper::StatusCode;
use pretty_assertions::assert_eq;
use test_context::test_context;

const PAGE: &str = "/admin/exclusions";

/// Pull the anti-forgery token out of the rendered form.
fn csrf_token_from(html: &str) -> String {
    let marker = "name=\"_csrf_token\" value=\"";
    let start = html.find(marker).expect("Missing token field") + marker.len();
    let end = html[start..].find('"').expect("Unterminated token field");
    html[start..start + end].to_string()
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_render_a_permission_page_for_anonymous_visitors(ctx: &TestContext) {
    let response = ctx.client.get(PAGE).await.unwrap();

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert!(response
        .text()
        .contains("You do not have permission to access this page."));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_render_a_permission_page_for_customers(ctx: &TestContext) {
    let token = ctx.fixtures.customer_token();

    let response = ctx.client.get_with_cookie(PAGE, &token).await.unwrap();

    response.assert_status(StatusCode::FORBIDDEN);
    assert!(response
        .text()
        .contains("You do not have permission to access this page."));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_list_categories_by_name_with_excluded_ones_checked(ctx: &TestContext) {
    ctx.fixtures.exclude(&[20]).await;
    let token = ctx.fixtures.admin_token();

    let response = ctx.client.get_with_cookie(PAGE, &token).await.unwrap();
    response.assert_status(StatusCode::OK);
    let html = response.text();

    let positions: Vec<usize> = ["Boots", "Clearance", "Internal", "Shoes"]
        .iter()
        .map(|name| html.find(&format!("/> {}</label>", name)).unwrap())
        .collect();
    let mut sorted = positions.clone();
    sorted.sort();
    assert_eq!(positions, sorted);

    assert!(html.contains(r#"value="20" checked="checked" /> Internal"#));
    assert!(html.contains(r#"value="15" /> Shoes"#));
    assert!(html.contains(r#"<input type="hidden" name="action" value="save-exclusions" />"#));
    assert!(html.contains("Currently Excluded IDs"));
    assert!(html.contains("<code>20</code>"));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_explain_when_categories_cannot_be_loaded(ctx: &TestContext) {
    ctx.catalog.set_unavailable(true);
    let token = ctx.fixtures.admin_token();

    let response = ctx.client.get_with_cookie(PAGE, &token).await.unwrap();

    response.assert_status(StatusCode::OK);
    assert!(response.text().contains("Unable to load product categories."));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_show_a_notice_after_saving(ctx: &TestContext) {
    let token = ctx.fixtures.admin_token();

    let plain = ctx.client.get_with_cookie(PAGE, &token).await.unwrap();
    assert!(!plain.text().contains("Exclusions saved."));

    let updated = ctx
        .client
        .get_with_cookie(&format!("{}?updated=1", PAGE), &token)
        .await
        .unwrap();
    assert!(updated.text().contains("Exclusions saved."));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_save_the_submitted_form_and_redirect(ctx: &TestContext) {
    let token = ctx.fixtures.admin_token();
    let page = ctx.client.get_with_cookie(PAGE, &token).await.unwrap();
    let csrf = csrf_token_from(&page.text());

    let response = ctx
        .client
        .post_form_with_cookie(
            PAGE,
            &[
                ("action", "save-exclusions"),
                ("_csrf_token", csrf.as_str()),
                ("excluded_ids[]", "25"),
                ("excluded_ids[]", "10"),
                ("excluded_ids[]", "25"),
                ("excluded_ids[]", "abc"),
            ],
            Some(&token),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(
        response.header("location").map(String::as_str),
        Some("/admin/exclusions?updated=1")
    );
    assert_eq!(ctx.fixtures.excluded().await, vec![25, 10]);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_clear_exclusions_when_no_box_is_checked(ctx: &TestContext) {
    ctx.fixtures.exclude(&[10, 15]).await;
    let token = ctx.fixtures.admin_token();
    let csrf = ctx.fixtures.admin_csrf_token();

    let response = ctx
        .client
        .post_form_with_cookie(
            PAGE,
            &[("action", "save-exclusions"), ("_csrf_token", csrf.as_str())],
            Some(&token),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::SEE_OTHER);
    assert!(ctx.fixtures.excluded().await.is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_a_form_without_a_token(ctx: &TestContext) {
    ctx.fixtures.exclude(&[10]).await;
    let token = ctx.fixtures.admin_token();

    let response = ctx
        .client
        .post_form_with_cookie(
            PAGE,
            &[("action", "save-exclusions"), ("excluded_ids[]", "15")],
            Some(&token),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::FORBIDDEN);
    assert!(response.text().contains("The link you followed has expired."));
    assert_eq!(ctx.fixtures.excluded().await, vec![10]);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_a_form_from_an_anonymous_visitor(ctx: &TestContext) {
    let csrf = ctx.fixtures.admin_csrf_token();

    let response = ctx
        .client
        .post_form_with_cookie(
            PAGE,
            &[
                ("action", "save-exclusions"),
                ("_csrf_token", csrf.as_str()),
                ("excluded_ids[]", "15"),
            ],
            None,
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert!(ctx.fixtures.excluded().await.is_empty());
}
