pub mod paths;

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use crate::models::{
    Activity, ActivityRequest, CourseRecord, GraduationCheckItem, GraduationSimple,
    GraduationStatus, Lecture, LectureFilter, LectureSource, LoginRequest, LoginResponse,
    RegisterCourseRequest, SessionProbe, SignupRequest, Track, UpdateCourseRequest, UserProfile,
};

#[async_trait]
pub trait JoluvApi: Send + Sync {
    async fn login(&self, req: &LoginRequest) -> AppResult<LoginResponse>;
    async fn probe_session(&self) -> AppResult<SessionProbe>;
    async fn signup(&self, req: &SignupRequest) -> AppResult<()>;

    async fn fetch_profile(&self) -> AppResult<UserProfile>;
    async fn update_profile(&self, profile: &UserProfile) -> AppResult<UserProfile>;

    async fn fetch_course_history(&self) -> AppResult<Vec<CourseRecord>>;
    async fn search_lectures(&self, filter: &LectureFilter) -> AppResult<Vec<Lecture>>;
    async fn register_course(&self, req: &RegisterCourseRequest) -> AppResult<CourseRecord>;
    async fn update_course(&self, req: &UpdateCourseRequest) -> AppResult<CourseRecord>;
    async fn delete_course(&self, lecture_id: &str) -> AppResult<()>;

    async fn graduation_simple(&self) -> AppResult<GraduationSimple>;
    async fn graduation_status(&self) -> AppResult<GraduationStatus>;
    async fn graduation_check(&self, track: Track) -> AppResult<Vec<GraduationCheckItem>>;

    async fn list_activities(&self) -> AppResult<Vec<Activity>>;
    async fn create_activity(&self, req: &ActivityRequest) -> AppResult<Activity>;
    async fn update_activity(&self, id: &str, req: &ActivityRequest) -> AppResult<Activity>;
    async fn delete_activity(&self, id: &str) -> AppResult<()>;

    /// Backend session id currently held by the transport, if any.
    fn session_id(&self) -> Option<String> {
        None
    }
}

pub struct HttpApi {
    client: Client,
    jar: Arc<Jar>,
    base: Url,
    session_cookie: String,
}

impl HttpApi {
    /// Builds the client. A persisted `session_id` is put back into the cookie jar.
    pub fn new(config: &AppConfig, session_id: Option<&str>) -> Result<Self, AppError> {
        let base = Url::parse(&config.api_base).map_err(|e| {
            AppError::Validation(format!("Invalid API base '{}': {}", config.api_base, e))
        })?;

        let jar = Arc::new(Jar::default());
        if let Some(id) = session_id {
            jar.add_cookie_str(&format!("{}={}; Path=/", config.session_cookie, id), &base);
        }

        let client = Client::builder()
            .cookie_provider(jar.clone())
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| AppError::Network(format!("Failed to build http client: {}", e)))?;

        Ok(Self {
            client,
            jar,
            base,
            session_cookie: config.session_cookie.clone(),
        })
    }

    fn url(&self, path: &str, id: Option<&str>, query: &[(&'static str, String)]) -> AppResult<Url> {
        let mut url = self.base.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| AppError::Validation(format!("API base '{}' cannot carry a path", self.base)))?;
            segments.pop_if_empty();
            segments.extend(path.split('/').filter(|s| !s.is_empty()));
            if let Some(id) = id {
                segments.push(id);
            }
        }
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    fn request(
        &self,
        method: Method,
        path: &str,
        id: Option<&str>,
        query: &[(&'static str, String)],
    ) -> AppResult<RequestBuilder> {
        let url = self.url(path, id, query)?;
        let request_id = Uuid::new_v4().to_string();
        debug!(%method, %url, %request_id, "issuing request");
        Ok(self
            .client
            .request(method, url)
            .header(ACCEPT, "application/json")
            .header("x-request-id", request_id))
    }

    async fn execute(&self, request: RequestBuilder) -> AppResult<Response> {
        let response = request.send().await.map_err(|e| {
            warn!("request failed before a response arrived: {}", e);
            AppError::from(e)
        })?;

        let status = response.status();
        debug!(%status, url = %response.url(), "response received");
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("API error {}: {}", status, snippet(&body));
            return Err(AppError::from_status(status, &body));
        }
        Ok(response)
    }

    async fn fetch_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> AppResult<T> {
        let response = self.execute(request).await?;
        decode_json(response).await
    }

    async fn fetch_empty(&self, request: RequestBuilder) -> AppResult<()> {
        self.execute(request).await?;
        Ok(())
    }
}

/// Parses a success body against `T`; anything that is not JSON of that shape is rejected.
async fn decode_json<T: DeserializeOwned>(response: Response) -> AppResult<T> {
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();
    let body = response.text().await?;

    if !content_type.contains("json") {
        warn!("expected JSON but got '{}'", content_type);
        return Err(AppError::UnexpectedResponse(format!(
            "expected JSON, got '{}': {}",
            content_type,
            snippet(&body)
        )));
    }

    serde_json::from_str::<T>(&body).map_err(|e| {
        warn!("response did not match schema: {}", e);
        AppError::UnexpectedResponse(format!("response did not match the expected schema: {}", e))
    })
}

fn snippet(body: &str) -> String {
    let trimmed = body.trim();
    match trimmed.char_indices().nth(120) {
        Some((idx, _)) => format!("{}...", &trimmed[..idx]),
        None => trimmed.to_string(),
    }
}

#[async_trait]
impl JoluvApi for HttpApi {
    async fn login(&self, req: &LoginRequest) -> AppResult<LoginResponse> {
        let request = self.request(Method::POST, paths::AUTH_LOGIN, None, &[])?.json(req);
        self.fetch_json(request).await
    }

    async fn probe_session(&self) -> AppResult<SessionProbe> {
        let request = self.request(Method::GET, paths::AUTH_LOGIN, None, &[])?;
        self.fetch_json(request).await
    }

    async fn signup(&self, req: &SignupRequest) -> AppResult<()> {
        let request = self.request(Method::POST, paths::AUTH_SIGNUP, None, &[])?.json(req);
        self.fetch_empty(request).await
    }

    async fn fetch_profile(&self) -> AppResult<UserProfile> {
        let request = self.request(Method::GET, paths::AUTH_MYPAGE, None, &[])?;
        self.fetch_json(request).await
    }

    async fn update_profile(&self, profile: &UserProfile) -> AppResult<UserProfile> {
        let request = self
            .request(Method::POST, paths::AUTH_MYPAGE_UPDATE, None, &[])?
            .json(profile);
        self.fetch_json(request).await
    }

    async fn fetch_course_history(&self) -> AppResult<Vec<CourseRecord>> {
        let request = self.request(Method::GET, paths::COURSE_HISTORY, None, &[])?;
        self.fetch_json(request).await
    }

    async fn search_lectures(&self, filter: &LectureFilter) -> AppResult<Vec<Lecture>> {
        let path = match filter.source {
            LectureSource::List => paths::LECTURE_LIST,
            LectureSource::Standard => paths::LECTURE_STANDARD,
        };
        let request = self.request(Method::GET, path, None, &filter.query_pairs())?;
        self.fetch_json(request).await
    }

    async fn register_course(&self, req: &RegisterCourseRequest) -> AppResult<CourseRecord> {
        let request = self
            .request(Method::POST, paths::COURSE_REGISTER, None, &[])?
            .json(req);
        self.fetch_json(request).await
    }

    async fn update_course(&self, req: &UpdateCourseRequest) -> AppResult<CourseRecord> {
        let request = self.request(Method::PUT, paths::COURSE_UPDATE, None, &[])?.json(req);
        self.fetch_json(request).await
    }

    async fn delete_course(&self, lecture_id: &str) -> AppResult<()> {
        let request = self.request(Method::DELETE, paths::COURSE, Some(lecture_id), &[])?;
        self.fetch_empty(request).await
    }

    async fn graduation_simple(&self) -> AppResult<GraduationSimple> {
        let request = self.request(Method::GET, paths::GRADUATION_SIMPLE, None, &[])?;
        self.fetch_json(request).await
    }

    async fn graduation_status(&self) -> AppResult<GraduationStatus> {
        let request = self.request(Method::GET, paths::GRADUATION_MY_STATUS, None, &[])?;
        self.fetch_json(request).await
    }

    async fn graduation_check(&self, track: Track) -> AppResult<Vec<GraduationCheckItem>> {
        let query = [("track", track.as_param().to_string())];
        let request = self.request(Method::GET, paths::GRADUATION_CHECK, None, &query)?;
        self.fetch_json(request).await
    }

    async fn list_activities(&self) -> AppResult<Vec<Activity>> {
        let request = self.request(Method::GET, paths::ACTIVITY, None, &[])?;
        self.fetch_json(request).await
    }

    async fn create_activity(&self, req: &ActivityRequest) -> AppResult<Activity> {
        let request = self.request(Method::POST, paths::ACTIVITY, None, &[])?.json(req);
        self.fetch_json(request).await
    }

    async fn update_activity(&self, id: &str, req: &ActivityRequest) -> AppResult<Activity> {
        let request = self.request(Method::PUT, paths::ACTIVITY, Some(id), &[])?.json(req);
        self.fetch_json(request).await
    }

    async fn delete_activity(&self, id: &str) -> AppResult<()> {
        let request = self.request(Method::DELETE, paths::ACTIVITY, Some(id), &[])?;
        self.fetch_empty(request).await
    }

    /// Looked up against the login URL, since a cookie set without `Path`
    /// is scoped to the login endpoint's directory.
    fn session_id(&self) -> Option<String> {
        let login_url = self.url(paths::AUTH_LOGIN, None, &[]).ok()?;
        let header = self.jar.cookies(&login_url)?;
        let cookies = header.to_str().ok()?;
        cookies.split(';').find_map(|pair| {
            let (name, value) = pair.trim().split_once('=')?;
            (name == self.session_cookie).then(|| value.to_string())
        })
    }
}
