// src/tests/router_tests/leads_tests.rs

use crate::db::leads;
use crate::errors::ServerError;
use crate::router::handle;
use crate::tests::utils::{body_string, make_db, now_unix, post_form, test_config};

#[test]
fn lead_post_stores_row_and_renders_thanks() {
    let db = make_db();
    let cfg = test_config();

    let req = post_form(
        "/leads",
        "name=Ada+Buyer&email=ada%40example.com&phone=555-0000&message=Interested&source_page=home",
    );
    let mut resp = handle(req, &db, &cfg).unwrap();
    assert_eq!(resp.status(), 200);
    assert!(body_string(&mut resp).contains("Thanks"));

    let stored = db.with_conn(|conn| leads::recent_leads(conn, 10)).unwrap();
    assert_eq!(stored.len(), 1);

    let lead = &stored[0];
    assert_eq!(lead.name, "Ada Buyer");
    assert_eq!(lead.email, "ada@example.com");
    assert_eq!(lead.phone.as_deref(), Some("555-0000"));
    assert_eq!(lead.source_page.as_deref(), Some("home"));
    // No CRM configured in tests, so the lead stays stored-but-unsynced.
    assert!(!lead.crm_synced);
}

#[test]
fn lead_post_without_email_is_rejected() {
    let db = make_db();
    let cfg = test_config();

    let result = handle(post_form("/leads", "name=No+Email"), &db, &cfg);
    assert!(matches!(result, Err(ServerError::BadRequest(_))));

    let count = db.with_conn(|conn| leads::count_leads(conn)).unwrap();
    assert_eq!(count, 0);
}

#[test]
fn lead_post_with_garbage_email_is_rejected() {
    let db = make_db();
    let cfg = test_config();

    let result = handle(post_form("/leads", "name=X&email=not-an-email"), &db, &cfg);
    assert!(matches!(result, Err(ServerError::BadRequest(_))));
}

#[test]
fn monthly_lead_count_sees_fresh_leads() {
    let db = make_db();
    let cfg = test_config();

    handle(
        post_form("/leads", "name=Ada&email=ada%40example.com"),
        &db,
        &cfg,
    )
    .unwrap();

    let now = now_unix();
    let (total, this_month) = db
        .with_conn(|conn| {
            Ok((
                leads::count_leads(conn)?,
                leads::count_leads_this_month(conn, now)?,
            ))
        })
        .unwrap();

    assert_eq!(total, 1);
    assert_eq!(this_month, 1);
}
