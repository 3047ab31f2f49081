#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, Response, StatusCode},
    Router,
};
use edu_dashboard::{
    config::AppConfig,
    db,
    models::{
        class::Class,
        snapshot::Snapshot,
        student::{Gender, Score, Student},
        user::{Role, User},
    },
    services::persistence,
    state::AppState,
    web::routes::create_router,
};
use sqlx::SqlitePool;
use std::time::Duration;
use tower::ServiceExt;
use tower_sessions::{MemoryStore, SessionManagerLayer};

pub async fn memory_pool() -> SqlitePool {
    db::create_db_pool("sqlite::memory:").await.unwrap()
}

pub fn test_config() -> AppConfig {
    AppConfig {
        database_url: "sqlite::memory:".into(),
        save_indicator: Duration::from_millis(50),
        seed_admin_username: "admin".into(),
        seed_admin_password: "admin".into(),
        ..AppConfig::default()
    }
}

pub fn student(id: &str, name: &str, class_id: &str, scores: &[(&str, f64)]) -> Student {
    Student {
        id: id.into(),
        name: name.into(),
        dob: "2008-05-20".into(),
        gender: Gender::Female,
        school: "THPT Chu Văn An".into(),
        class_id: class_id.into(),
        discipline_record: vec![],
        absence_count: 1,
        scores: scores
            .iter()
            .map(|(subject, value)| Score { subject: (*subject).into(), value: *value })
            .collect(),
        teacher_comment: "Ngoan".into(),
        account_id: None,
    }
}

pub fn user(id: &str, username: &str, password: &str, role: Role, student_id: Option<&str>) -> User {
    User {
        id: id.into(),
        username: username.into(),
        password: Some(password.into()),
        role,
        full_name: format!("Người dùng {}", username),
        avatar: None,
        student_id: student_id.map(str::to_string),
    }
}

/// Two classes, two students, an admin, a linked student account and an
/// account pointing at a student that does not exist.
pub fn school_snapshot() -> Snapshot {
    Snapshot {
        students: vec![
            student("S1", "Anh", "c1", &[("Toán", 9.0), ("Văn", 8.0)]),
            student("S2", "Binh", "c2", &[("Toán", 6.5)]),
        ],
        classes: vec![
            Class { id: "c1".into(), name: "10A1".into(), grade: "10".into(), room: Some("P101".into()) },
            Class { id: "c2".into(), name: "11B2".into(), grade: "11".into(), room: None },
        ],
        users: vec![
            user("u1", "admin", "admin", Role::Admin, None),
            user("u2", "anh", "123", Role::Student, Some("S1")),
            user("u3", "ghost", "123", Role::Student, Some("S9")),
        ],
    }
}

pub struct TestApp {
    pub state: AppState,
    pub router: Router,
}

impl TestApp {
    pub async fn with_snapshot(snapshot: Option<Snapshot>) -> Self {
        let pool = memory_pool().await;
        if let Some(snapshot) = snapshot {
            persistence::save(&pool, &snapshot).await.unwrap();
        }
        let state = AppState::load(pool, test_config()).await;
        let router = create_router(state.clone())
            .layer(SessionManagerLayer::new(MemoryStore::default()).with_secure(false));
        Self { state, router }
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    pub async fn post_form(&self, uri: &str, cookie: Option<&str>, fields: &[(&str, &str)]) -> Response<Body> {
        let body = fields
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::from(body)).unwrap()).await
    }

    /// Logs in and returns the session cookie plus the redirect target.
    pub async fn login(&self, username: &str, password: &str) -> (String, String) {
        let response = self
            .post_form("/login", None, &[("username", username), ("password", password)])
            .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "login should redirect");
        (session_cookie(&response), location(&response))
    }
}

pub fn session_cookie(response: &Response<Body>) -> String {
    let raw = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("response should set the session cookie")
        .to_str()
        .unwrap();
    raw.split(';').next().unwrap().to_string()
}

pub fn location(response: &Response<Body>) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .expect("response should be a redirect")
        .to_str()
        .unwrap()
        .to_string()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// `action` of every `method="post"` form in a rendered page, in page order.
pub fn post_form_actions(html: &str) -> Vec<String> {
    html.split("<form")
        .skip(1)
        .filter_map(|rest| {
            let tag = &rest[..rest.find('>')?];
            if !tag.contains(r#"method="post""#) {
                return None;
            }
            let start = tag.find(r#"action=""#)? + r#"action=""#.len();
            let end = start + tag[start..].find('"')?;
            Some(tag[start..end].to_string())
        })
        .collect()
}
