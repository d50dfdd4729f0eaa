//! REST client for the showroom backend.
//!
//! One [`ApiClient`] is shared by every request task. It holds the bearer
//! token, attaches it to each request, and forgets it when the server
//! answers `401`.

use crate::data::{
    ContactMessage, ContactRecord, ContactSubmission, MessageStatus, Project, ProjectDraft,
    ProjectRecord,
};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

pub const DEFAULT_BASE_URL: &str = "http://localhost:3001";
pub const DEFAULT_LOGIN_PATH: &str = "/login";

#[derive(Debug, Error)]
pub enum ApiError {
    /// Non-success status; `message` is the server's `error` field when present
    #[error("{message}")]
    Http { status: u16, message: String },
    #[error("Unauthorized - please login again")]
    Unauthorized,
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Unexpected response from server: {0}")]
    Decode(String),
    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Clone, Serialize)]
struct LoginCredentials<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub username: Option<String>,
}

/// `{ "message": "..." }` acknowledgement
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

#[derive(Serialize)]
struct StatusUpdate {
    status: MessageStatus,
}

#[derive(Serialize)]
struct ResponseBody<'a> {
    response: &'a str,
}

#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    login_path: String,
    token_store: Arc<RwLock<Option<String>>>,
}

impl ApiClient {
    pub fn new(base_url: &str, login_path: &str, timeout: Duration) -> ApiResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        let base_url = base_url.trim_end_matches('/').to_string();

        info!("Creating API client for {}", base_url);

        Ok(Self {
            client,
            base_url,
            login_path: normalize_path(login_path),
            token_store: Arc::new(RwLock::new(None)),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, normalize_path(path))
    }

    pub async fn set_token(&self, token: Option<String>) {
        *self.token_store.write().await = token;
    }

    #[cfg(test)]
    pub async fn get_token(&self) -> Option<String> {
        self.token_store.read().await.clone()
    }

    /// Attach the bearer token if one is held
    async fn build_request(&self, builder: RequestBuilder) -> RequestBuilder {
        if let Some(token) = self.token_store.read().await.as_ref() {
            builder.bearer_auth(token)
        } else {
            builder
        }
    }

    /// Send, map error statuses, and decode the JSON body
    async fn execute_request<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<T> {
        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            self.set_token(None).await;
            return Err(ApiError::Unauthorized);
        }

        let body = response.bytes().await?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.error)
                .filter(|e| !e.trim().is_empty())
                .unwrap_or_else(|| format!("HTTP error! status: {}", status.as_u16()));
            warn!("Request failed with status {}: {}", status, message);
            return Err(ApiError::Http {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_slice(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let url = self.url(path);
        debug!("GET {}", url);
        let request = self.build_request(self.client.get(&url)).await;
        self.execute_request(request).await
    }

    async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> ApiResult<T> {
        let url = self.url(path);
        debug!("POST {}", url);
        let request = self.build_request(self.client.post(&url).json(body)).await;
        self.execute_request(request).await
    }

    async fn put<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> ApiResult<T> {
        let url = self.url(path);
        debug!("PUT {}", url);
        let request = self.build_request(self.client.put(&url).json(body)).await;
        self.execute_request(request).await
    }

    async fn delete<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let url = self.url(path);
        debug!("DELETE {}", url);
        let request = self.build_request(self.client.delete(&url)).await;
        self.execute_request(request).await
    }

    // Authentication

    /// Log in and keep the returned token for later requests
    pub async fn login(&self, username: &str, password: &str) -> ApiResult<LoginResponse> {
        let credentials = LoginCredentials { username, password };
        let login_path = self.login_path.clone();
        let response: LoginResponse = self.post(&login_path, &credentials).await?;
        self.set_token(Some(response.token.clone())).await;
        info!("Logged in as {}", response.username.as_deref().unwrap_or(username));
        Ok(response)
    }

    pub async fn logout(&self) {
        self.set_token(None).await;
    }

    // Projects

    pub async fn get_projects(&self) -> ApiResult<Vec<Project>> {
        let records: Vec<serde_json::Value> = self.get("/projects").await?;
        Ok(Project::from_records(records))
    }

    pub async fn create_project(&self, draft: &ProjectDraft) -> ApiResult<Project> {
        let form = project_form(draft).await?;
        let url = self.url("/projects");
        debug!("POST {} (multipart)", url);
        let request = self.build_request(self.client.post(&url).multipart(form)).await;
        let record: ProjectRecord = self.execute_request(request).await?;
        Project::try_from(record).map_err(|e| ApiError::Decode(e.to_string()))
    }

    pub async fn update_project(&self, id: &str, draft: &ProjectDraft) -> ApiResult<Project> {
        let form = project_form(draft).await?;
        let url = self.url(&format!("/projects/{}", urlencoding::encode(id)));
        debug!("PUT {} (multipart)", url);
        let request = self.build_request(self.client.put(&url).multipart(form)).await;
        let record: ProjectRecord = self.execute_request(request).await?;
        Project::try_from(record).map_err(|e| ApiError::Decode(e.to_string()))
    }

    pub async fn delete_project(&self, id: &str) -> ApiResult<MessageResponse> {
        self.delete(&format!("/projects/{}", urlencoding::encode(id)))
            .await
    }

    // Contact messages

    pub async fn submit_contact(&self, submission: &ContactSubmission) -> ApiResult<MessageResponse> {
        self.post("/contact", submission).await
    }

    pub async fn get_contact_messages(&self) -> ApiResult<Vec<ContactMessage>> {
        let records: Vec<ContactRecord> = self.get("/contact").await?;
        Ok(ContactMessage::from_records(records))
    }

    pub async fn update_message_status(
        &self,
        id: &str,
        status: MessageStatus,
    ) -> ApiResult<ContactMessage> {
        let record: ContactRecord = self
            .put(
                &format!("/contact/{}", urlencoding::encode(id)),
                &StatusUpdate { status },
            )
            .await?;
        ContactMessage::try_from(record).map_err(|e| ApiError::Decode(e.to_string()))
    }

    pub async fn respond_to_message(&self, id: &str, response: &str) -> ApiResult<MessageResponse> {
        self.post(
            &format!("/contact/{}/respond", urlencoding::encode(id)),
            &ResponseBody { response },
        )
        .await
    }
}

fn normalize_path(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}

/// Multipart body for create/update: text fields, then uploads, then the
/// URLs of images to keep, all under `images`
async fn project_form(draft: &ProjectDraft) -> ApiResult<Form> {
    let category = draft
        .category
        .as_ref()
        .map(|c| c.as_str().to_string())
        .unwrap_or_default();

    let mut form = Form::new()
        .text("title", draft.title.trim().to_string())
        .text("description", draft.description.trim().to_string())
        .text("category", category);

    for path in draft.uploads() {
        form = form.part("images", file_part(path).await?);
    }
    for url in draft.existing_images() {
        form = form.text("images", url.to_string());
    }
    Ok(form)
}

async fn file_part(path: &Path) -> ApiResult<Part> {
    let bytes = tokio::fs::read(path).await.map_err(|source| ApiError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());

    let part = Part::bytes(bytes).file_name(file_name);
    Ok(match mime_for(path) {
        Some(mime) => part.mime_str(mime)?,
        None => part,
    })
}

fn mime_for(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}
