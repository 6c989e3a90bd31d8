use axum::http::{header, StatusCode};

mod common;

use common::{body_text, create_test_app, scenario_index, send, session_cookie};

const FIRST_TITLE: &str = "Residential Fire - Bravo Side Smoke Showing";
const TITLES: [&str; 3] = [
    FIRST_TITLE,
    "Two-Story Residential - Possible Victims Trapped",
    "Attic Involvement - Wind-Influenced Fire",
];

/// Rotates until the session sits on a scenario other than the first one.
async fn cookie_for_non_default_scenario(app: &axum::Router) -> (String, usize) {
    let response = send(app, "GET", "/new", None, None).await;
    let cookie = session_cookie(&response).expect("rotation sets session cookie");

    let page = body_text(send(app, "GET", "/", Some(&cookie), None).await).await;
    let index = scenario_index(&page);
    assert_ne!(index, 0);
    (cookie, index)
}

#[tokio::test]
async fn test_fresh_session_shows_first_scenario() {
    let app = create_test_app();

    let response = send(&app, "GET", "/", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(session_cookie(&response).is_some());
    assert!(response
        .headers()
        .get(header::CONTENT_SECURITY_POLICY)
        .is_some());
    assert!(response.headers().get("x-trace-id").is_some());

    let page = body_text(response).await;
    assert!(page.contains(FIRST_TITLE));
    assert_eq!(scenario_index(&page), 0);
    assert!(!page.contains("Your answers"));
    assert!(page.contains(r#"class="tokenbtn""#));
    assert!(page.contains(r#"data-sw-url="/sw.js""#));
}

#[tokio::test]
async fn test_show_with_valid_session_does_not_rewrite_cookie() {
    let app = create_test_app();
    let (cookie, index) = cookie_for_non_default_scenario(&app).await;

    let response = send(&app, "GET", "/", Some(&cookie), None).await;
    assert!(session_cookie(&response).is_none());

    let page = body_text(response).await;
    assert!(page.contains(TITLES[index]));
}

#[tokio::test]
async fn test_new_redirects_to_index() {
    let app = create_test_app();

    let response = send(&app, "GET", "/new", None, None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/");
    assert!(session_cookie(&response).is_some());
}

#[tokio::test]
async fn test_new_never_repeats_previous_scenario() {
    let app = create_test_app();
    let mut cookie: Option<String> = None;
    let mut previous = 0;

    for _ in 0..100 {
        let response = send(&app, "GET", "/new", cookie.as_deref(), None).await;
        if let Some(updated) = session_cookie(&response) {
            cookie = Some(updated);
        }

        let page = body_text(send(&app, "GET", "/", cookie.as_deref(), None).await).await;
        let current = scenario_index(&page);
        assert!(current < TITLES.len());
        assert_ne!(current, previous, "scenario repeated back-to-back");
        previous = current;
    }
}

#[tokio::test]
async fn test_submit_trims_and_fills_missing_answers() {
    let app = create_test_app();

    let response = send(
        &app,
        "POST",
        "/submit",
        None,
        Some("q1=%20%20size-up%20text%20%20"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let page = body_text(response).await;
    assert!(page.contains(FIRST_TITLE));
    assert!(page.contains(r#"name="q1" rows="4">size-up text</textarea>"#));
    assert!(page.contains(r#"name="q2" rows="4"></textarea>"#));
    assert!(page.contains(r#"name="q3" rows="4"></textarea>"#));
    assert!(page.contains(r#"name="q4" rows="4"></textarea>"#));
    assert!(page.contains("Your answers"));
    assert_eq!(page.matches("(no answer)").count(), 3);
}

#[tokio::test]
async fn test_submit_repeated_field_keeps_first_value() {
    let app = create_test_app();

    let response = send(&app, "POST", "/submit", None, Some("q1=first&q1=second")).await;
    let page = body_text(response).await;

    assert!(page.contains(r#"name="q1" rows="4">first</textarea>"#));
    assert!(!page.contains(">second<"));
}

#[tokio::test]
async fn test_submit_answers_current_scenario() {
    let app = create_test_app();
    let (cookie, index) = cookie_for_non_default_scenario(&app).await;

    let response = send(
        &app,
        "POST",
        "/submit",
        Some(&cookie),
        Some("q2=ladder+to+the+window&q9=ignored"),
    )
    .await;
    let page = body_text(response).await;

    assert!(page.contains(TITLES[index]));
    assert!(page.contains(r#"name="q2" rows="4">ladder to the window</textarea>"#));
    assert!(!page.contains("ignored"));
}

#[tokio::test]
async fn test_submit_without_form_body_degrades_to_empty_answers() {
    let app = create_test_app();

    let response = send(&app, "POST", "/submit", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let page = body_text(response).await;
    assert!(page.contains("Your answers"));
    assert_eq!(page.matches("(no answer)").count(), 4);
}

#[tokio::test]
async fn test_submit_escapes_answer_html() {
    let app = create_test_app();

    let response = send(
        &app,
        "POST",
        "/submit",
        None,
        Some("q1=%3Cscript%3Ealert(1)%3C%2Fscript%3E"),
    )
    .await;
    let page = body_text(response).await;

    assert!(page.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    assert!(!page.contains("<script>alert(1)</script>"));
}

#[tokio::test]
async fn test_tampered_cookie_falls_back_to_first_scenario() {
    let app = create_test_app();
    let (cookie, _) = cookie_for_non_default_scenario(&app).await;

    // Flip the last character of the signed value.
    let mut tampered = cookie.clone();
    let last = tampered.pop().unwrap();
    tampered.push(if last == 'A' { 'B' } else { 'A' });

    let response = send(&app, "GET", "/", Some(&tampered), None).await;
    assert!(session_cookie(&response).is_some());

    let page = body_text(response).await;
    assert_eq!(scenario_index(&page), 0);
}

#[tokio::test]
async fn test_cookie_from_other_secret_is_ignored() {
    let app = create_test_app();
    let (cookie, _) = cookie_for_non_default_scenario(&app).await;

    let mut config = common::test_config();
    config.session_secret = "a-different-secret".to_string();
    let other_app = fireground_trainer::create_router(std::sync::Arc::new(
        fireground_trainer::AppState::new(config).unwrap(),
    ));

    let page = body_text(send(&other_app, "GET", "/", Some(&cookie), None).await).await;
    assert_eq!(scenario_index(&page), 0);
}
