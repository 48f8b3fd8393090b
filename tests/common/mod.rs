#![allow(dead_code)]

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{Value, json};

use joluv::api::HttpApi;
use joluv::config::AppConfig;
use joluv::models::{Activity, CourseRecord, Lecture, UserProfile};
use joluv::session::{SessionFile, SessionStore};
use joluv::state::AppState;

pub const EMAIL: &str = "student@knu.ac.kr";
pub const PASSWORD: &str = "secret";
pub const USER_ID: &str = "2021001";
pub const SESSION_ID: &str = "abc123";

pub struct Backend {
    pub history: Mutex<Vec<CourseRecord>>,
    pub lectures: Mutex<Vec<Lecture>>,
    pub activities: Mutex<Vec<Activity>>,
    pub profile: Mutex<UserProfile>,
    pub last_query: Mutex<Option<HashMap<String, String>>>,
    pub last_profile_update: Mutex<Option<Value>>,
    pub search_calls: AtomicUsize,
    pub profile_calls: AtomicUsize,
    pub fail_register: Mutex<bool>,
    pub next_id: AtomicUsize,
}

impl Default for Backend {
    fn default() -> Self {
        Self {
            history: Mutex::new(vec![
                record("CSE101", "Data Structures", 3, "Major", 2, "1", Some("A+")),
                record("GEN201", "Writing", 2, "General", 1, "2", Some("P")),
            ]),
            lectures: Mutex::new(sample_lectures(23)),
            activities: Mutex::new(vec![Activity {
                id: "act-1".to_string(),
                category: "competition".to_string(),
                title: "AI contest 3rd place".to_string(),
                detail: Some("Naver AI challenge".to_string()),
                year: "2025".to_string(),
            }]),
            profile: Mutex::new(UserProfile {
                name: "JOLUV".to_string(),
                student_id: USER_ID.to_string(),
                major: "Computer Science".to_string(),
                track: Some("bsMs".to_string()),
                english_score: Some(800),
                gpa_total: Some(3.9),
                gpa_major: Some(4.0),
                internship_flag: false,
            }),
            last_query: Mutex::new(None),
            last_profile_update: Mutex::new(None),
            search_calls: AtomicUsize::new(0),
            profile_calls: AtomicUsize::new(0),
            fail_register: Mutex::new(false),
            next_id: AtomicUsize::new(100),
        }
    }
}

pub fn record(
    id: &str,
    name: &str,
    credit: u32,
    category: &str,
    grade: u8,
    semester: &str,
    received: Option<&str>,
) -> CourseRecord {
    CourseRecord {
        lecture_id: id.to_string(),
        name: name.to_string(),
        credit,
        category: category.to_string(),
        grade,
        semester: semester.to_string(),
        received_grade: received.map(str::to_string),
    }
}

/// `count` catalogue lectures: LEC000.. plus the two ids already in history.
pub fn sample_lectures(count: usize) -> Vec<Lecture> {
    let mut lectures: Vec<Lecture> = (0..count.saturating_sub(2))
        .map(|i| Lecture {
            lecture_id: format!("LEC{:03}", i),
            name: format!("Lecture {}", i),
            credit: 3,
            category: "Major".to_string(),
            grade: (i % 4) as u8 + 1,
            semester: if i % 2 == 0 { "1" } else { "2" }.to_string(),
            professor: None,
        })
        .collect();
    lectures.push(Lecture {
        lecture_id: "CSE101".to_string(),
        name: "Data Structures".to_string(),
        credit: 3,
        category: "Major".to_string(),
        grade: 2,
        semester: "1".to_string(),
        professor: Some("Kim".to_string()),
    });
    lectures.push(Lecture {
        lecture_id: "CSE202".to_string(),
        name: "Operating Systems".to_string(),
        credit: 3,
        category: "Major".to_string(),
        grade: 3,
        semester: "1".to_string(),
        professor: Some("Lee".to_string()),
    });
    lectures
}

type Shared = Arc<Backend>;

fn has_session(headers: &HeaderMap) -> bool {
    headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|c| c.contains(&format!("JSESSIONID={}", SESSION_ID)))
}

async fn login(Json(body): Json<Value>) -> Response {
    if body["email"] == EMAIL && body["password"] == PASSWORD {
        (
            StatusCode::OK,
            [(header::SET_COOKIE, format!("JSESSIONID={}; Path=/", SESSION_ID))],
            Json(json!({ "userId": USER_ID, "name": "JOLUV" })),
        )
            .into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "401", "message": "bad credentials" })),
        )
            .into_response()
    }
}

async fn probe(headers: HeaderMap) -> Json<Value> {
    if has_session(&headers) {
        Json(json!({ "loggedIn": true, "userId": USER_ID }))
    } else {
        Json(json!({ "loggedIn": false }))
    }
}

async fn signup(Json(body): Json<Value>) -> Response {
    if body["email"] == "taken@knu.ac.kr" {
        (StatusCode::CONFLICT, Json(json!({ "message": "duplicate email" }))).into_response()
    } else {
        StatusCode::CREATED.into_response()
    }
}

async fn mypage(State(s): State<Shared>) -> Json<UserProfile> {
    s.profile_calls.fetch_add(1, Ordering::SeqCst);
    Json(s.profile.lock().unwrap().clone())
}

async fn mypage_update(State(s): State<Shared>, Json(body): Json<Value>) -> Response {
    *s.last_profile_update.lock().unwrap() = Some(body.clone());
    match serde_json::from_value::<UserProfile>(body) {
        Ok(profile) => {
            *s.profile.lock().unwrap() = profile.clone();
            Json(profile).into_response()
        }
        Err(_) => StatusCode::BAD_REQUEST.into_response(),
    }
}

async fn history(State(s): State<Shared>) -> Json<Vec<CourseRecord>> {
    Json(s.history.lock().unwrap().clone())
}

async fn lectures(
    State(s): State<Shared>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Vec<Lecture>> {
    s.search_calls.fetch_add(1, Ordering::SeqCst);
    *s.last_query.lock().unwrap() = Some(params.clone());
    let keyword = params.get("keyword").cloned().unwrap_or_default();
    if keyword == "slow" {
        tokio::time::sleep(Duration::from_millis(300)).await;
    }
    let all = s.lectures.lock().unwrap().clone();
    let filtered = all
        .into_iter()
        .filter(|l| keyword == "slow" || keyword.is_empty() || l.name.contains(&keyword))
        .filter(|l| {
            params
                .get("grade")
                .is_none_or(|g| g.parse::<u8>().ok() == Some(l.grade))
        })
        .filter(|l| params.get("semester").is_none_or(|sem| &l.semester == sem))
        .collect();
    Json(filtered)
}

async fn register(State(s): State<Shared>, Json(body): Json<Value>) -> Response {
    tokio::time::sleep(Duration::from_millis(100)).await;
    if *s.fail_register.lock().unwrap() {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "message": "database down" })),
        )
            .into_response();
    }
    let id = body["lectureId"].as_str().unwrap_or_default().to_string();
    let lecture = s
        .lectures
        .lock()
        .unwrap()
        .iter()
        .find(|l| l.lecture_id == id)
        .cloned();
    match lecture {
        Some(lecture) => {
            let received = body["receivedGrade"].as_str().map(str::to_string);
            let rec = lecture.into_record(received);
            s.history.lock().unwrap().push(rec.clone());
            Json(rec).into_response()
        }
        None => (StatusCode::NOT_FOUND, Json(json!({ "message": "no such lecture" }))).into_response(),
    }
}

async fn update_course(State(s): State<Shared>, Json(body): Json<Value>) -> Response {
    let id = body["lectureId"].as_str().unwrap_or_default().to_string();
    let mut history = s.history.lock().unwrap();
    match history.iter_mut().find(|r| r.lecture_id == id) {
        Some(rec) => {
            rec.received_grade = body["receivedGrade"].as_str().map(str::to_string);
            Json(rec.clone()).into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn delete_course(State(s): State<Shared>, Path(id): Path<String>) -> StatusCode {
    let mut history = s.history.lock().unwrap();
    let before = history.len();
    history.retain(|r| r.lecture_id != id);
    if history.len() < before {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

async fn graduation_simple() -> Json<Value> {
    Json(json!({
        "studentId": 2021001,
        "majorName": "Computer Science",
        "currentTotal": 90,
        "requiredTotal": 120,
        "missingMajor": 12,
        "missingGeneral": 6
    }))
}

async fn graduation_status() -> Json<Value> {
    Json(json!({
        "majorCredits": 50,
        "generalCredits": 30,
        "totalCredits": 90,
        "requiredTotal": 120
    }))
}

async fn graduation_check(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let track = params.get("track").cloned().unwrap_or_default();
    let mut items = vec![
        json!({
            "category": "Major credits",
            "current": 31,
            "required": 60,
            "passed": false,
            "courses": [
                { "name": "Data Structures", "grade": "A+" },
                { "name": "Operating Systems", "grade": "A0" }
            ]
        }),
        json!({ "category": "Minor", "current": 0, "required": 21, "passed": false }),
        json!({
            "category": "Startup course",
            "current": 3,
            "required": 3,
            "passed": true,
            "message": "done"
        }),
    ];
    if track == "dualDegree" {
        items.push(json!({ "category": "Overseas year", "current": 1, "required": 1, "passed": true }));
    }
    Json(Value::Array(items))
}

async fn list_activities(State(s): State<Shared>) -> Json<Vec<Activity>> {
    Json(s.activities.lock().unwrap().clone())
}

async fn create_activity(State(s): State<Shared>, Json(body): Json<Value>) -> Json<Activity> {
    let id = format!("act-{}", s.next_id.fetch_add(1, Ordering::SeqCst));
    let activity = Activity {
        id,
        category: body["category"].as_str().unwrap_or_default().to_string(),
        title: body["title"].as_str().unwrap_or_default().to_string(),
        detail: body["detail"].as_str().map(str::to_string),
        year: body["year"].as_str().unwrap_or_default().to_string(),
    };
    s.activities.lock().unwrap().push(activity.clone());
    Json(activity)
}

async fn update_activity(
    State(s): State<Shared>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let mut list = s.activities.lock().unwrap();
    match list.iter_mut().find(|a| a.id == id) {
        Some(a) => {
            a.category = body["category"].as_str().unwrap_or_default().to_string();
            a.title = body["title"].as_str().unwrap_or_default().to_string();
            a.detail = body["detail"].as_str().map(str::to_string);
            a.year = body["year"].as_str().unwrap_or_default().to_string();
            Json(a.clone()).into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn delete_activity(State(s): State<Shared>, Path(id): Path<String>) -> StatusCode {
    let mut list = s.activities.lock().unwrap();
    let before = list.len();
    list.retain(|a| a.id != id);
    if list.len() < before {
        StatusCode::OK
    } else {
        StatusCode::NOT_FOUND
    }
}

pub fn backend_router(backend: Shared) -> Router {
    Router::new()
        .route("/api/auth/login", get(probe).post(login))
        .route("/api/auth/signup", post(signup))
        .route("/api/auth/mypage", get(mypage))
        .route("/api/auth/mypage/update", post(mypage_update))
        .route("/api/course/history", get(history))
        .route("/api/course/register", post(register))
        .route("/api/course/update", put(update_course))
        .route("/api/course/{id}", axum::routing::delete(delete_course))
        .route("/api/lecture/list", get(lectures))
        .route("/api/lecture/standard", get(lectures))
        .route("/api/graduation/simple", get(graduation_simple))
        .route("/api/graduation/my-status", get(graduation_status))
        .route("/api/graduation/check", get(graduation_check))
        .route("/api/activity", get(list_activities).post(create_activity))
        .route("/api/activity/{id}", put(update_activity).delete(delete_activity))
        .with_state(backend)
}

/// Serves `router` on an ephemeral port and returns its origin.
pub async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to read local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("Fake backend crashed");
    });
    format!("http://{}", addr)
}

pub struct Harness {
    pub base: String,
    pub backend: Shared,
    pub state: AppState,
    pub state_dir: PathBuf,
}

pub fn temp_state_dir() -> PathBuf {
    std::env::temp_dir().join(format!("joluv-test-{}", uuid::Uuid::new_v4()))
}

pub fn build_state(base: &str, state_dir: PathBuf) -> AppState {
    let config = AppConfig::with_api_base(base, state_dir);
    let session = SessionStore::hydrate(SessionFile::new(config.session_file()));
    let api = HttpApi::new(&config, session.session_id().as_deref()).expect("Failed to build client");
    AppState::new(config, Arc::new(api), session)
}

pub async fn logged_in_harness() -> Harness {
    let h = harness().await;
    let form = joluv::pages::login::LoginForm {
        email: EMAIL.to_string(),
        password: PASSWORD.to_string(),
    };
    joluv::pages::login::login(&h.state, &form)
        .await
        .expect("Login against fake backend failed");
    h
}

pub async fn harness() -> Harness {
    let backend = Arc::new(Backend::default());
    let base = serve(backend_router(backend.clone())).await;
    let state_dir = temp_state_dir();
    let state = build_state(&base, state_dir.clone());
    Harness {
        base,
        backend,
        state,
        state_dir,
    }
}
