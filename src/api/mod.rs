use crate::models::{Category, Note, PageOf, SortBy, User};
use reqwest::Method;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum ApiErrorKind {
    Unauthorized,
    Network,
    Http,
    Parse,
}

#[derive(Clone, Debug)]
pub(crate) struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl ApiError {
    fn network(e: reqwest::Error) -> Self {
        Self {
            kind: ApiErrorKind::Network,
            message: e.to_string(),
        }
    }

    fn parse(e: impl std::fmt::Display) -> Self {
        Self {
            kind: ApiErrorKind::Parse,
            message: e.to_string(),
        }
    }

    fn unauthorized() -> Self {
        Self {
            kind: ApiErrorKind::Unauthorized,
            message: "Unauthorized".to_string(),
        }
    }

    /// Prefer the backend's `message` field so the UI shows what the server
    /// said; fall back to status + raw body.
    fn http(status: reqwest::StatusCode, body: String) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| format!("Request failed ({status}): {body}"));

        Self {
            kind: ApiErrorKind::Http,
            message,
        }
    }
}

pub(crate) type ApiResult<T> = Result<T, ApiError>;

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct EnvConfig {
    pub api_url: String,
}

impl EnvConfig {
    pub fn new() -> Self {
        let default_api_url = "http://localhost:8080/api".to_string();

        // We support BOTH `window.ENV.API_URL` (documented style) and
        // `window.ENV.api_url` (legacy) for compatibility.
        if let Some(window) = web_sys::window() {
            if let Some(env) = window.get("ENV") {
                if !env.is_undefined() && env.is_object() {
                    if let Ok(api_url) = js_sys::Reflect::get(&env, &"API_URL".into()) {
                        if let Some(url_str) = api_url.as_string() {
                            return Self { api_url: url_str };
                        }
                    }

                    if let Ok(api_url) = js_sys::Reflect::get(&env, &"api_url".into()) {
                        if let Some(url_str) = api_url.as_string() {
                            return Self { api_url: url_str };
                        }
                    }
                }
            }
        }

        Self {
            api_url: default_api_url,
        }
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct Credentials {
    pub login: String,
    pub password: String,
}

/// Auth endpoints return `{ token, ... }`; everything beyond the token is
/// kept opaque so backend additions don't break the client.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct AuthResponse {
    pub token: String,
    #[serde(flatten)]
    pub extra: serde_json::Value,
}

/// Body of `POST /notes/list`. Empty filters are omitted from the wire; the
/// server is the sole authority on interpreting them.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NoteListParams {
    pub offset: u32,
    pub limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_completed: Option<bool>,
    pub sort_by: SortBy,
}

/// Body of note create/update. `reminder: null` is sent explicitly so an
/// update can clear a previously set reminder.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NotePayload {
    pub title: String,
    pub content: String,
    pub category_id: Option<i64>,
    pub reminder: Option<String>,
    pub is_completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,
}

impl NotePayload {
    /// Targeted status change: the full current entity with `completed`
    /// flipped, so the update endpoint stays the single mutation path.
    pub fn status_change(note: &Note, completed: bool) -> Self {
        Self {
            title: note.title.clone(),
            content: note.content.clone(),
            category_id: note.category_id,
            reminder: note.reminder.clone(),
            is_completed: completed,
            image_path: note.image_path.clone(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct CategoryPayload {
    pub title: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct UpdateProfileRequest {
    pub password: String,
}

/// Body of `POST /admin/users/list`. `search` is always present (the admin
/// list treats the empty string as "no filter").
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub(crate) struct UserListParams {
    pub offset: u32,
    pub limit: u32,
    pub search: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SetActiveRequest {
    pub user_id: i64,
    pub is_active: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct UploadResponse {
    pub path: String,
}

/// Type hint for body-less requests.
const NO_BODY: Option<&()> = None;

/// The sole component issuing network calls. Carries the bearer token when a
/// Session exists; otherwise requests go out unauthenticated and the server
/// decides. No retries, no caching — one round trip per call.
#[derive(Clone)]
pub(crate) struct ApiClient {
    pub(crate) base_url: String,
    pub(crate) token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            token: None,
        }
    }

    pub fn from_env() -> Self {
        Self::new(EnvConfig::new().api_url)
    }

    pub fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    pub fn clear_token(&mut self) {
        self.token = None;
    }

    fn auth_token(&self) -> Option<String> {
        self.token.clone()
    }

    fn with_auth_header(
        mut req: reqwest::RequestBuilder,
        token: Option<String>,
    ) -> reqwest::RequestBuilder {
        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {}", token));
        }
        req
    }

    async fn check_status(res: reqwest::Response) -> ApiResult<reqwest::Response> {
        if res.status().is_success() {
            Ok(res)
        } else if res.status().as_u16() == 401 {
            Err(ApiError::unauthorized())
        } else {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            Err(ApiError::http(status, body))
        }
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&impl Serialize>,
    ) -> ApiResult<reqwest::Response> {
        let client = reqwest::Client::new();
        let url = format!("{}{}", self.base_url, path);
        let mut req = client.request(method, url);
        req = Self::with_auth_header(req, self.auth_token());

        if let Some(b) = body {
            req = req.json(b);
        }

        let res = req.send().await.map_err(ApiError::network)?;
        Self::check_status(res).await
    }

    async fn request<T: serde::de::DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&impl Serialize>,
    ) -> ApiResult<T> {
        let res = self.send(method, path, body).await?;
        res.json().await.map_err(ApiError::parse)
    }

    async fn request_empty(
        &self,
        method: Method,
        path: &str,
        body: Option<&impl Serialize>,
    ) -> ApiResult<()> {
        self.send(method, path, body).await?;
        Ok(())
    }

    // --- auth ---

    pub async fn login(&self, credentials: &Credentials) -> ApiResult<AuthResponse> {
        self.request(Method::POST, "/auth/login", Some(credentials))
            .await
    }

    pub async fn register(&self, credentials: &Credentials) -> ApiResult<AuthResponse> {
        self.request(Method::POST, "/auth/register", Some(credentials))
            .await
    }

    // --- notes ---

    pub async fn list_notes(&self, params: &NoteListParams) -> ApiResult<PageOf<Note>> {
        self.request(Method::POST, "/notes/list", Some(params)).await
    }

    pub async fn create_note(&self, payload: &NotePayload) -> ApiResult<Note> {
        self.request(Method::POST, "/notes", Some(payload)).await
    }

    pub async fn update_note(&self, id: i64, payload: &NotePayload) -> ApiResult<Note> {
        self.request(Method::PUT, &format!("/notes/{}", id), Some(payload))
            .await
    }

    pub async fn delete_note(&self, id: i64) -> ApiResult<()> {
        self.request_empty(Method::DELETE, &format!("/notes/{}", id), NO_BODY)
            .await
    }

    /// Spreadsheet export; the caller turns the bytes into a download.
    pub async fn export_notes(&self) -> ApiResult<Vec<u8>> {
        let res = self.send(Method::GET, "/export/excel", NO_BODY).await?;
        let bytes = res.bytes().await.map_err(ApiError::network)?;
        Ok(bytes.to_vec())
    }

    // --- categories ---

    pub async fn list_categories(&self) -> ApiResult<Vec<Category>> {
        self.request(Method::GET, "/categories/list", NO_BODY).await
    }

    pub async fn create_category(&self, payload: &CategoryPayload) -> ApiResult<Category> {
        self.request(Method::POST, "/categories", Some(payload)).await
    }

    pub async fn update_category(&self, id: i64, payload: &CategoryPayload) -> ApiResult<Category> {
        self.request(Method::PUT, &format!("/categories/{}", id), Some(payload))
            .await
    }

    pub async fn delete_category(&self, id: i64) -> ApiResult<()> {
        self.request_empty(Method::DELETE, &format!("/categories/{}", id), NO_BODY)
            .await
    }

    // --- profile ---

    pub async fn get_profile(&self) -> ApiResult<User> {
        self.request(Method::GET, "/users", NO_BODY).await
    }

    pub async fn update_profile(&self, req: &UpdateProfileRequest) -> ApiResult<User> {
        self.request(Method::PUT, "/users", Some(req)).await
    }

    // --- admin ---

    pub async fn list_users(&self, params: &UserListParams) -> ApiResult<PageOf<User>> {
        self.request(Method::POST, "/admin/users/list", Some(params))
            .await
    }

    pub async fn set_user_active(&self, user_id: i64, is_active: bool) -> ApiResult<()> {
        self.request_empty(
            Method::POST,
            "/admin/user/activate",
            Some(&SetActiveRequest {
                user_id,
                is_active,
            }),
        )
        .await
    }

    // --- images ---

    pub async fn upload_image(&self, file_name: &str, bytes: Vec<u8>) -> ApiResult<UploadResponse> {
        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name.to_string());
        let form = reqwest::multipart::Form::new().part("file", part);

        let client = reqwest::Client::new();
        let mut req = client
            .post(format!("{}/images/upload", self.base_url))
            .multipart(form);
        req = Self::with_auth_header(req, self.auth_token());

        let res = req.send().await.map_err(ApiError::network)?;
        let res = Self::check_status(res).await?;
        res.json().await.map_err(ApiError::parse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ApiClient {
        ApiClient::new("http://localhost:8080/api".to_string())
    }

    #[test]
    fn new_client_has_no_token() {
        let c = client();
        assert!(c.auth_token().is_none());
    }

    #[test]
    fn set_and_clear_token() {
        let mut c = client();
        c.set_token("t1".to_string());
        assert_eq!(c.auth_token().as_deref(), Some("t1"));
        c.clear_token();
        assert!(c.auth_token().is_none());
    }

    #[test]
    fn http_error_prefers_server_message() {
        let e = ApiError::http(
            reqwest::StatusCode::BAD_REQUEST,
            r#"{"message": "Login already taken"}"#.to_string(),
        );
        assert_eq!(e.kind, ApiErrorKind::Http);
        assert_eq!(e.message, "Login already taken");
    }

    #[test]
    fn http_error_falls_back_to_raw_body() {
        let e = ApiError::http(
            reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            "boom".to_string(),
        );
        assert!(e.message.contains("500"));
        assert!(e.message.contains("boom"));
    }

    #[test]
    fn http_error_ignores_blank_server_message() {
        let e = ApiError::http(
            reqwest::StatusCode::BAD_REQUEST,
            r#"{"message": "  "}"#.to_string(),
        );
        assert!(e.message.contains("400"));
    }

    #[test]
    fn note_list_params_omit_empty_filters() {
        let params = NoteListParams {
            offset: 0,
            limit: 10,
            search: None,
            category_id: None,
            is_completed: None,
            sort_by: SortBy::Newest,
        };
        let v = serde_json::to_value(&params).expect("should serialize");
        assert_eq!(v["offset"], 0);
        assert_eq!(v["limit"], 10);
        assert_eq!(v["sortBy"], "newest");
        assert!(v.get("search").is_none());
        assert!(v.get("categoryId").is_none());
        assert!(v.get("isCompleted").is_none());
    }

    #[test]
    fn note_list_params_carry_filters_in_camel_case() {
        let params = NoteListParams {
            offset: 20,
            limit: 10,
            search: Some("milk".to_string()),
            category_id: Some(3),
            is_completed: Some(false),
            sort_by: SortBy::Title,
        };
        let v = serde_json::to_value(&params).expect("should serialize");
        assert_eq!(v["categoryId"], 3);
        assert_eq!(v["isCompleted"], false);
        assert_eq!(v["search"], "milk");
        assert_eq!(v["sortBy"], "title");
    }

    #[test]
    fn note_payload_serializes_null_reminder() {
        let payload = NotePayload {
            title: "Milk".to_string(),
            content: String::new(),
            category_id: None,
            reminder: None,
            is_completed: false,
            image_path: None,
        };
        let v = serde_json::to_value(&payload).expect("should serialize");
        // An explicit null lets an update clear the reminder.
        assert!(v.get("reminder").is_some());
        assert!(v["reminder"].is_null());
        // A never-set image path is simply omitted.
        assert!(v.get("imagePath").is_none());
        assert_eq!(v["isCompleted"], false);
    }

    #[test]
    fn status_change_flips_only_completion() {
        let note = Note {
            id: 9,
            title: "Buy gift".to_string(),
            content: "Birthday".to_string(),
            category_id: Some(2),
            reminder: Some("2025-07-25T18:00:00".to_string()),
            completed: false,
            image_path: Some("uploads/gift.jpg".to_string()),
            created_date: "2025-07-22T00:00:00".to_string(),
        };
        let payload = NotePayload::status_change(&note, true);
        assert!(payload.is_completed);
        assert_eq!(payload.title, note.title);
        assert_eq!(payload.category_id, note.category_id);
        assert_eq!(payload.reminder, note.reminder);
        assert_eq!(payload.image_path, note.image_path);
    }

    #[test]
    fn set_active_request_wire_casing() {
        let req = SetActiveRequest {
            user_id: 7,
            is_active: false,
        };
        let v = serde_json::to_value(&req).expect("should serialize");
        assert_eq!(v["userId"], 7);
        assert_eq!(v["isActive"], false);
    }

    #[test]
    fn auth_response_keeps_extra_fields_opaque() {
        let json = r#"{"token": "t1", "login": "alice", "expiresIn": 3600}"#;
        let parsed: AuthResponse = serde_json::from_str(json).expect("should parse");
        assert_eq!(parsed.token, "t1");
        assert_eq!(parsed.extra["expiresIn"], 3600);
    }
}
