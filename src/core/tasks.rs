//! Background API work.
//!
//! The UI loop never awaits the network. It queues an [`ApiRequest`]; the
//! [`ApiDispatcher`] runs it on a tokio task and sends the outcome back as
//! an [`ApiEvent`], which the loop applies to the app state.

use crate::core::gallery::ReloadHook;
use crate::data::{ContactMessage, ContactSubmission, MessageStatus, Project, ProjectDraft};
use crate::network::{ApiClient, ApiError};
use crate::session::Session;
use tokio::sync::mpsc;

#[derive(Debug, Clone)]
pub enum ApiRequest {
    LoadProjects,
    LoadAdminData,
    Login { username: String, password: String },
    Logout,
    SubmitContact(ContactSubmission),
    /// `id` is `None` for a new project
    SaveProject { id: Option<String>, draft: ProjectDraft },
    DeleteProject { id: String },
    MarkRead { id: String },
    Respond { id: String, response: String },
}

/// Failure as the UI needs it: text for a toast and whether to log out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestError {
    pub message: String,
    pub unauthorized: bool,
}

impl From<ApiError> for RequestError {
    fn from(err: ApiError) -> Self {
        Self {
            unauthorized: err.is_unauthorized(),
            message: err.to_string(),
        }
    }
}

pub type RequestResult<T> = std::result::Result<T, RequestError>;

#[derive(Debug, Clone)]
pub enum ApiEvent {
    ProjectsLoaded(RequestResult<Vec<Project>>),
    AdminDataLoaded(RequestResult<(Vec<Project>, Vec<ContactMessage>)>),
    LoggedIn(RequestResult<Session>),
    ContactSubmitted(RequestResult<String>),
    ProjectSaved {
        created: bool,
        result: RequestResult<Project>,
    },
    ProjectDeleted {
        id: String,
        result: RequestResult<String>,
    },
    MessageUpdated(RequestResult<ContactMessage>),
    MessageResponded {
        id: String,
        response: String,
        result: RequestResult<String>,
    },
}

/// Run one request to completion. Logout yields no event.
pub async fn execute(client: &ApiClient, request: ApiRequest) -> Option<ApiEvent> {
    let event = match request {
        ApiRequest::LoadProjects => {
            ApiEvent::ProjectsLoaded(client.get_projects().await.map_err(Into::into))
        }
        ApiRequest::LoadAdminData => {
            let result = tokio::try_join!(client.get_projects(), client.get_contact_messages());
            ApiEvent::AdminDataLoaded(result.map_err(Into::into))
        }
        ApiRequest::Login { username, password } => {
            let result = client
                .login(&username, &password)
                .await
                .map(|reply| Session::new(reply.token, reply.username));
            ApiEvent::LoggedIn(result.map_err(Into::into))
        }
        ApiRequest::Logout => {
            client.logout().await;
            return None;
        }
        ApiRequest::SubmitContact(submission) => {
            let result = client.submit_contact(&submission).await.map(|ack| ack.message);
            ApiEvent::ContactSubmitted(result.map_err(Into::into))
        }
        ApiRequest::SaveProject { id, draft } => {
            let result = match &id {
                Some(id) => client.update_project(id, &draft).await,
                None => client.create_project(&draft).await,
            };
            ApiEvent::ProjectSaved {
                created: id.is_none(),
                result: result.map_err(Into::into),
            }
        }
        ApiRequest::DeleteProject { id } => {
            let result = client.delete_project(&id).await.map(|ack| ack.message);
            ApiEvent::ProjectDeleted {
                id,
                result: result.map_err(Into::into),
            }
        }
        ApiRequest::MarkRead { id } => {
            let result = client.update_message_status(&id, MessageStatus::Read).await;
            ApiEvent::MessageUpdated(result.map_err(Into::into))
        }
        ApiRequest::Respond { id, response } => {
            let result = client
                .respond_to_message(&id, &response)
                .await
                .map(|ack| ack.message);
            ApiEvent::MessageResponded {
                id,
                response,
                result: result.map_err(Into::into),
            }
        }
    };
    Some(event)
}

/// Reload hook that queues a project fetch on `requests`
pub fn queue_reload(requests: mpsc::UnboundedSender<ApiRequest>) -> ReloadHook {
    ReloadHook::new(move || {
        if requests.send(ApiRequest::LoadProjects).is_err() {
            tracing::warn!("Request queue closed; reload dropped");
        }
    })
}

/// Spawns one task per request and forwards results to the UI loop
#[derive(Clone)]
pub struct ApiDispatcher {
    client: ApiClient,
    events: mpsc::UnboundedSender<ApiEvent>,
}

impl ApiDispatcher {
    pub fn new(client: ApiClient, events: mpsc::UnboundedSender<ApiEvent>) -> Self {
        Self { client, events }
    }

    pub fn dispatch(&self, request: ApiRequest) {
        tracing::debug!("Dispatching {}", request_name(&request));
        let client = self.client.clone();
        let events = self.events.clone();
        tokio::spawn(async move {
            if let Some(event) = execute(&client, request).await {
                if events.send(event).is_err() {
                    tracing::debug!("UI loop gone; dropping API result");
                }
            }
        });
    }
}

/// Request name for logs; never includes credentials
fn request_name(request: &ApiRequest) -> &'static str {
    match request {
        ApiRequest::LoadProjects => "LoadProjects",
        ApiRequest::LoadAdminData => "LoadAdminData",
        ApiRequest::Login { .. } => "Login",
        ApiRequest::Logout => "Logout",
        ApiRequest::SubmitContact(_) => "SubmitContact",
        ApiRequest::SaveProject { .. } => "SaveProject",
        ApiRequest::DeleteProject { .. } => "DeleteProject",
        ApiRequest::MarkRead { .. } => "MarkRead",
        ApiRequest::Respond { .. } => "Respond",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_queue_reload_sends_and_tolerates_closed_queue() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let hook = queue_reload(tx);
        hook.fire();
        assert!(matches!(rx.try_recv(), Ok(ApiRequest::LoadProjects)));

        drop(rx);
        hook.fire();
    }

    async fn server_with_admin_data() -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/projects"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"_id": "p1", "title": "Suite", "category": "Medical", "images": ["a.jpg"]}
            ])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/contact"))
            .and(header("authorization", "Bearer tok"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"_id": "m1", "name": "A", "email": "a@b.co", "message": "hi", "status": "read"}
            ])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/contact"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({"error": "No token"})))
            .with_priority(10)
            .mount(&server)
            .await;
        server
    }

    fn client(server: &MockServer) -> ApiClient {
        ApiClient::new(&server.uri(), "/login", Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_admin_data_requires_token() {
        let server = server_with_admin_data().await;
        let api = client(&server);

        match execute(&api, ApiRequest::LoadAdminData).await {
            Some(ApiEvent::AdminDataLoaded(Err(err))) => assert!(err.unauthorized),
            other => panic!("unexpected event: {:?}", other),
        }

        api.set_token(Some("tok".into())).await;
        match execute(&api, ApiRequest::LoadAdminData).await {
            Some(ApiEvent::AdminDataLoaded(Ok((projects, messages)))) => {
                assert_eq!(projects.len(), 1);
                assert_eq!(messages.len(), 1);
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_dispatcher_forwards_events() {
        let server = server_with_admin_data().await;
        let (tx, mut rx) = mpsc::unbounded_channel();
        let dispatcher = ApiDispatcher::new(client(&server), tx);

        dispatcher.dispatch(ApiRequest::LoadProjects);
        match rx.recv().await {
            Some(ApiEvent::ProjectsLoaded(Ok(projects))) => assert_eq!(projects[0].id, "p1"),
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_login_builds_session() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "opaque"})))
            .mount(&server)
            .await;

        let request = ApiRequest::Login {
            username: "admin".into(),
            password: "pw".into(),
        };
        match execute(&client(&server), request).await {
            Some(ApiEvent::LoggedIn(Ok(session))) => {
                assert_eq!(session.token, "opaque");
                assert_eq!(session.username, "admin");
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_request_error_from_api_error() {
        let err = RequestError::from(ApiError::Unauthorized);
        assert!(err.unauthorized);
        assert_eq!(err.message, "Unauthorized - please login again");
    }
}
