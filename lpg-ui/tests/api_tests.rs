//! Integration tests for lpg-ui routes
//!
//! Each test runs the full router against a temporary database with canned
//! outbound services.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use lpg_common::db;
use lpg_ui::services::{CompletionClient, LinkChecker, LlmError, PlanGenerator};
use lpg_ui::{build_router, AppState};

const PLAN_REPLY: &str = r#"Here is your plan:
{"goal": "Rust", "timeline": "4 weeks", "weeks": [
  {"week_number": 1, "objective": "Ownership basics",
   "resources": [{"name": "The Book", "link": "https://doc.rust-lang.org/book/", "type": "article"}],
   "action_items": [{"description": "Install rustup", "due_by": "Day 1"}, "Read chapter 4"]}
]}"#;

struct CannedLlm(&'static str);

#[async_trait]
impl CompletionClient for CannedLlm {
    async fn complete(&self, _system: &str, _user: &str) -> Result<String, LlmError> {
        Ok(self.0.to_string())
    }
}

struct AcceptAll;

#[async_trait]
impl LinkChecker for AcceptAll {
    async fn is_valid(&self, _url: &str) -> bool {
        true
    }
}

struct TestApp {
    _dir: TempDir,
    pool: sqlx::SqlitePool,
    router: Router,
}

async fn setup(reply: &'static str) -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let pool = db::init_database(&dir.path().join("lpg.db")).await.unwrap();
    let generator = PlanGenerator::new(Arc::new(CannedLlm(reply)), Arc::new(AcceptAll));
    let router = build_router(AppState::new(pool.clone(), generator));
    TestApp {
        _dir: dir,
        pool,
        router,
    }
}

impl TestApp {
    async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    async fn get(&self, uri: &str, cookie: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    async fn post_form(&self, uri: &str, body: &str, cookie: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::from(body.to_string())).unwrap()).await
    }

    /// Sign up and return the `Cookie` header value for the new session
    async fn sign_up(&self, email: &str) -> String {
        let body = format!("email={}&password=secret123", email.replace('@', "%40"));
        let response = self.post_form("/signup", &body, None).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        session_cookie(&response)
    }
}

fn session_cookie(response: &Response<Body>) -> String {
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("session cookie set")
        .to_str()
        .unwrap();
    set_cookie.split(';').next().unwrap().to_string()
}

fn location(response: &Response<Body>) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .expect("redirect location")
        .to_str()
        .unwrap()
        .to_string()
}

async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_str(&body_text(response).await).unwrap()
}

const PLAN_FORM: &str = "goal=Rust&topics=ownership&primary_objective=Career&background_level=Beginner\
&style_videos=on&style_articles=on&weekly_time=5&timeline=4+weeks&future_goals=&challenges=&additional_info=";

/// Create a plan and return its id
async fn create_plan(app: &TestApp, cookie: &str) -> String {
    let response = app.post_form("/plans", PLAN_FORM, Some(cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let location = location(&response);
    let id = location
        .strip_prefix("/plans/")
        .and_then(|rest| rest.strip_suffix("?saved=1"))
        .expect("redirect to saved plan");
    id.to_string()
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = setup(PLAN_REPLY).await;
    let response = app.get("/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "lpg-ui");
    assert!(body["version"].is_string());
    assert_eq!(body["database"], "ok");
    assert_eq!(body["web_search"], false);
    assert_eq!(body["video_search"], false);
}

#[tokio::test]
async fn test_anonymous_requests_are_redirected_or_rejected() {
    let app = setup(PLAN_REPLY).await;

    let response = app.get("/", None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");

    let response = app.get("/plans", None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");

    let response = app.get("/plans", Some("lpg_session=forged")).await;
    assert_eq!(location(&response), "/login");

    let response = app.get("/api/plans", None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app.get("/login", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("AI Learning Plan Generator"));
}

#[tokio::test]
async fn test_signup_login_logout() {
    let app = setup(PLAN_REPLY).await;
    let cookie = app.sign_up("Learner@Example.com").await;

    let response = app.get("/", Some(&cookie)).await;
    assert_eq!(location(&response), "/plans");

    let response = app.get("/plans", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Create New Learning Plan"));
    assert!(html.contains("No learning plan selected."));
    assert!(html.contains("learner@example.com"));

    // Duplicate and weak sign-ups are rejected with the form
    let response = app
        .post_form("/signup", "email=learner%40example.com&password=secret123", None)
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let response = app.post_form("/signup", "email=new%40example.com&password=123", None).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let response = app
        .post_form("/login", "email=learner%40example.com&password=wrongpass", None)
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .post_form("/login", "email=learner%40example.com&password=secret123", None)
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let second = session_cookie(&response);

    let response = app.post_form("/logout", "", Some(&cookie)).await;
    assert_eq!(location(&response), "/login");
    assert!(response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .contains("Max-Age=0"));

    // Logging out ends only that session
    assert_eq!(location(&app.get("/plans", Some(&cookie)).await), "/login");
    assert_eq!(app.get("/plans", Some(&second)).await.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_create_plan_requires_goal() {
    let app = setup(PLAN_REPLY).await;
    let cookie = app.sign_up("a@example.com").await;

    let response = app
        .post_form("/plans", "goal=&weekly_time=5&timeline=4+weeks", Some(&cookie))
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body_text(response).await.contains("Please specify what you want to learn."));

    let user = db::find_user_by_email(&app.pool, "a@example.com").await.unwrap().unwrap();
    assert!(db::list_plans_for_user(&app.pool, &user.guid).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_and_view_plan() {
    let app = setup(PLAN_REPLY).await;
    let cookie = app.sign_up("a@example.com").await;
    let plan_id = create_plan(&app, &cookie).await;

    let response = app.get(&format!("/plans/{}?saved=1", plan_id), Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Learning plan generated and saved!"));
    assert!(html.contains("Learning Plan: Rust"));
    assert!(html.contains("Week 1: Ownership basics"));
    assert!(html.contains("https://doc.rust-lang.org/book/"));
    assert!(html.contains("(Due by Day 1)"));
    assert!(html.contains("Read chapter 4"));

    let response = app.get("/api/plans", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let list = body_json(response).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["title"], "Rust");

    let response = app.get(&format!("/api/plans/{}", plan_id), Some(&cookie)).await;
    let detail = body_json(response).await;
    assert_eq!(detail["plan"]["weeks"][0]["objective"], "Ownership basics");
    assert_eq!(detail["plan"]["learning_style"], serde_json::json!(["Videos", "Articles"]));
    assert_eq!(detail["plan"]["weekly_time"], 5);
}

#[tokio::test]
async fn test_generation_failure_shows_error() {
    let app = setup("I'm sorry, I can't help with that.").await;
    let cookie = app.sign_up("a@example.com").await;

    let response = app.post_form("/plans", PLAN_FORM, Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let html = body_text(response).await;
    assert!(html.contains("Plan generation failed or returned empty. Please try again."));
    // Answers survive the failed attempt
    assert!(html.contains("value=\"Rust\""));
}

#[tokio::test]
async fn test_empty_plan_is_not_saved() {
    let app = setup(r#"{"goal": "Rust", "weeks": []}"#).await;
    let cookie = app.sign_up("a@example.com").await;

    let response = app.post_form("/plans", PLAN_FORM, Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let list = body_json(app.get("/api/plans", Some(&cookie)).await).await;
    assert!(list.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_progress_rating_and_report() {
    let app = setup(PLAN_REPLY).await;
    let cookie = app.sign_up("a@example.com").await;
    let plan_id = create_plan(&app, &cookie).await;

    let response = app
        .post_form(
            &format!("/plans/{}/progress", plan_id),
            "week_index=0&item_index=1&completed=true",
            Some(&cookie),
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let progress = db::progress_for_plan(&app.pool, &plan_id).await.unwrap();
    assert_eq!(progress.len(), 1);
    assert!(progress[0].completed);

    // Unticking omits the checkbox field
    app.post_form(
        &format!("/plans/{}/progress", plan_id),
        "week_index=0&item_index=1",
        Some(&cookie),
    )
    .await;
    let progress = db::progress_for_plan(&app.pool, &plan_id).await.unwrap();
    assert!(!progress[0].completed);

    let response = app
        .post_form(
            &format!("/plans/{}/progress", plan_id),
            "week_index=3&item_index=0&completed=true",
            Some(&cookie),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .post_form(&format!("/plans/{}/rating", plan_id), "rating=4", Some(&cookie))
        .await;
    assert_eq!(location(&response), format!("/plans/{}?rated=1", plan_id));
    let response = app
        .post_form(&format!("/plans/{}/rating", plan_id), "rating=9", Some(&cookie))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .post_form("/reports", &format!("plan_id={}&description=", plan_id), Some(&cookie))
        .await;
    assert_eq!(location(&response), format!("/plans/{}", plan_id));
    let response = app
        .post_form(
            "/reports",
            &format!("plan_id={}&description=Broken+link+in+week+1", plan_id),
            Some(&cookie),
        )
        .await;
    assert_eq!(location(&response), format!("/plans/{}?reported=1", plan_id));

    let reports = db::list_reports(&app.pool).await.unwrap();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].email, "a@example.com");
    assert_eq!(reports[0].description, "Broken link in week 1");

    let stats = db::dashboard_stats(&app.pool).await.unwrap();
    assert_eq!(stats.average_rating, Some(4.0));
}

#[tokio::test]
async fn test_plans_are_private_to_their_owner() {
    let app = setup(PLAN_REPLY).await;
    let owner = app.sign_up("owner@example.com").await;
    let other = app.sign_up("other@example.com").await;
    let plan_id = create_plan(&app, &owner).await;

    let response = app.get(&format!("/plans/{}", plan_id), Some(&other)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.get(&format!("/api/plans/{}", plan_id), Some(&other)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .post_form(&format!("/plans/{}/rating", plan_id), "rating=5", Some(&other))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_report_redirect_ignores_unknown_plan_id() {
    let app = setup(PLAN_REPLY).await;
    let owner = app.sign_up("owner@example.com").await;
    let plan_id = create_plan(&app, &owner).await;
    let other = app.sign_up("other@example.com").await;

    let response = app
        .post_form("/reports", "description=broken&plan_id=a%0Ab", Some(&other))
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/plans?reported=1");

    let response = app
        .post_form(
            "/reports",
            &format!("description=broken&plan_id={}", plan_id),
            Some(&other),
        )
        .await;
    assert_eq!(location(&response), "/plans?reported=1");

    let reports = db::list_reports(&app.pool).await.unwrap();
    assert_eq!(reports.len(), 2);
}
