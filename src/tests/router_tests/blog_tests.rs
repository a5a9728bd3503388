// src/tests/router_tests/blog_tests.rs

use crate::errors::ServerError;
use crate::router::handle;
use crate::tests::utils::{body_string, get, make_db, post_form, test_config, TEST_ADMIN_TOKEN};

fn save_page(db: &crate::db::Database, body: &str) {
    let cfg = test_config();
    let resp = handle(
        post_form(&format!("/admin/pages?token={TEST_ADMIN_TOKEN}"), body),
        db,
        &cfg,
    )
    .unwrap();
    assert_eq!(resp.status(), 303);
}

#[test]
fn blog_index_renders_empty_state() {
    let db = make_db();
    let cfg = test_config();

    let mut resp = handle(get("/blog"), &db, &cfg).unwrap();
    assert_eq!(resp.status(), 200);
    assert!(body_string(&mut resp).contains("Nothing published yet"));
}

#[test]
fn published_page_appears_on_index_and_renders() {
    let db = make_db();
    let cfg = test_config();

    save_page(
        &db,
        "slug=first-post&title=First+Post&meta_description=Hello&body_html=%3Cp%3EWelcome%3C%2Fp%3E&published=1",
    );

    let mut resp = handle(get("/blog"), &db, &cfg).unwrap();
    let body = body_string(&mut resp);
    assert!(body.contains("First Post"));
    assert!(body.contains("/blog/first-post"));

    let mut resp = handle(get("/blog/first-post"), &db, &cfg).unwrap();
    assert_eq!(resp.status(), 200);
    let body = body_string(&mut resp);
    assert!(body.contains("First Post"));
    // Body HTML is stored verbatim and rendered unescaped.
    assert!(body.contains("<p>Welcome</p>"));
}

#[test]
fn draft_pages_stay_hidden_from_the_public_site() {
    let db = make_db();
    let cfg = test_config();

    save_page(&db, "slug=draft-post&title=Draft&body_html=soon");

    let result = handle(get("/blog/draft-post"), &db, &cfg);
    assert!(matches!(result, Err(ServerError::NotFound)));

    let mut resp = handle(get("/blog"), &db, &cfg).unwrap();
    assert!(!body_string(&mut resp).contains("Draft"));
}

#[test]
fn page_slugs_are_normalized() {
    let db = make_db();
    let cfg = test_config();

    save_page(&db, "slug=My+Fancy+Post%21&title=Fancy&body_html=x&published=1");

    let resp = handle(get("/blog/my-fancy-post"), &db, &cfg).unwrap();
    assert_eq!(resp.status(), 200);
}

#[test]
fn deleted_pages_disappear() {
    let db = make_db();
    let cfg = test_config();

    save_page(&db, "slug=bye&title=Bye&body_html=x&published=1");
    assert!(handle(get("/blog/bye"), &db, &cfg).is_ok());

    let resp = handle(
        post_form(
            &format!("/admin/pages/delete?token={TEST_ADMIN_TOKEN}"),
            "slug=bye",
        ),
        &db,
        &cfg,
    )
    .unwrap();
    assert_eq!(resp.status(), 303);

    let result = handle(get("/blog/bye"), &db, &cfg);
    assert!(matches!(result, Err(ServerError::NotFound)));
}
