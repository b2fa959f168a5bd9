use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::api::{ArticleView, NewsApi};
use crate::app::{GazetteError, Result};
use crate::domain::{AuthResponse, Category, Credentials, Page, PostSummary, Registration, User};
use crate::session::SessionStore;

/// reqwest-backed implementation of [`NewsApi`].
///
/// All endpoints funnel through one request helper and one failure
/// normalization path; the per-resource methods only pick the path and
/// unwrap the response envelope.
pub struct HttpApi {
    client: Client,
    base_url: String,
    session: Arc<SessionStore>,
}

#[derive(Deserialize)]
struct DataEnvelope<T> {
    data: T,
}

#[derive(Deserialize)]
struct PostsEnvelope {
    posts: Page<PostSummary>,
}

#[derive(Deserialize)]
struct SearchEnvelope {
    posts: Vec<PostSummary>,
}

impl HttpApi {
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        session: Arc<SessionStore>,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .gzip(true)
            .brotli(true)
            .user_agent("gazette/0.1.0")
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            session,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        let joined = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Ok(Url::parse(&joined)?)
    }

    /// Send a request with the bearer token attached, returning the body on
    /// 2xx and a normalized error otherwise.
    async fn send_checked(&self, mut request: RequestBuilder, path: &str) -> Result<String> {
        if let Some(token) = self.session.token() {
            request = request.bearer_auth(token);
        }

        tracing::debug!("request: {}", path);
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(self.failure(status, &body));
        }

        Ok(body)
    }

    async fn request_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        path: &str,
    ) -> Result<T> {
        let body = self.send_checked(request, path).await?;
        serde_json::from_str(&body)
            .map_err(|e| GazetteError::MalformedResponse(format!("{}: {}", path, e)))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let mut request = self.client.get(self.endpoint(path)?);
        if !query.is_empty() {
            request = request.query(query);
        }
        self.request_json(request, path).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let request = self.client.post(self.endpoint(path)?).json(body);
        self.request_json(request, path).await
    }

    fn failure(&self, status: StatusCode, body: &str) -> GazetteError {
        match status {
            StatusCode::UNAUTHORIZED => {
                // The stored token is stale; drop it so the next command
                // prompts for login instead of failing the same way.
                if let Err(e) = self.session.clear() {
                    tracing::warn!("failed to clear session: {}", e);
                }
                GazetteError::Unauthorized
            }
            StatusCode::UNPROCESSABLE_ENTITY => GazetteError::Validation(
                validation_errors(body)
                    .or_else(|| server_message(body))
                    .unwrap_or_else(|| "invalid input".to_string()),
            ),
            _ => GazetteError::Api(
                server_message(body)
                    .unwrap_or_else(|| format!("server returned {}", status)),
            ),
        }
    }
}

/// Extract the `message` field servers attach to error bodies.
fn server_message(body: &str) -> Option<String> {
    #[derive(Deserialize)]
    struct ErrorBody {
        message: String,
    }
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .map(|b| b.message)
        .filter(|m| !m.is_empty())
}

/// Flatten a 422 `errors` map (`field -> [messages]`) into one line.
fn validation_errors(body: &str) -> Option<String> {
    #[derive(Deserialize)]
    struct ValidationBody {
        errors: std::collections::BTreeMap<String, Vec<String>>,
    }
    let parsed: ValidationBody = serde_json::from_str(body).ok()?;
    let joined: Vec<String> = parsed
        .errors
        .iter()
        .flat_map(|(field, messages)| {
            messages.iter().map(move |m| format!("{}: {}", field, m))
        })
        .collect();
    if joined.is_empty() {
        None
    } else {
        Some(joined.join("; "))
    }
}

#[async_trait]
impl NewsApi for HttpApi {
    async fn posts_page(&self, page: u32) -> Result<Page<PostSummary>> {
        let envelope: PostsEnvelope = self
            .get_json("posts", &[("page", page.to_string())])
            .await?;
        Ok(envelope.posts)
    }

    async fn post_by_slug(&self, slug: &str) -> Result<ArticleView> {
        self.get_json(&format!("posts/slug/{}", slug), &[]).await
    }

    async fn featured(&self) -> Result<Vec<PostSummary>> {
        let envelope: DataEnvelope<Vec<PostSummary>> =
            self.get_json("caroussel", &[]).await?;
        Ok(envelope.data)
    }

    async fn search(&self, query: &str) -> Result<Vec<PostSummary>> {
        let envelope: SearchEnvelope = self
            .get_json("search", &[("query", query.to_string())])
            .await?;
        Ok(envelope.posts)
    }

    async fn category_posts(&self, slug: &str) -> Result<Vec<PostSummary>> {
        let envelope: DataEnvelope<Vec<PostSummary>> = self
            .get_json(&format!("category/{}", slug), &[])
            .await?;
        Ok(envelope.data)
    }

    async fn category(&self, slug: &str) -> Result<Category> {
        let envelope: DataEnvelope<Category> = self
            .get_json(&format!("categories/{}", slug), &[])
            .await?;
        Ok(envelope.data)
    }

    async fn login(&self, credentials: &Credentials) -> Result<AuthResponse> {
        match self.post_json("login", credentials).await {
            // A 401 on login is a bad password, not a stale session.
            Err(GazetteError::Unauthorized) => {
                Err(GazetteError::Api("Incorrect email or password".into()))
            }
            other => other,
        }
    }

    async fn register(&self, registration: &Registration) -> Result<AuthResponse> {
        self.post_json("register", registration).await
    }

    async fn logout(&self) -> Result<()> {
        let request = self.client.post(self.endpoint("logout")?);
        self.send_checked(request, "logout").await?;
        Ok(())
    }

    async fn user(&self, id: i64) -> Result<User> {
        let envelope: DataEnvelope<User> =
            self.get_json(&format!("user/{}", id), &[]).await?;
        Ok(envelope.data)
    }

    async fn update_photo(&self, user_id: i64, image: &Path) -> Result<()> {
        let bytes = tokio::fs::read(image).await?;
        let file_name = image
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "photo".to_string());

        let form = Form::new()
            .part("image", Part::bytes(bytes).file_name(file_name))
            .text("id", user_id.to_string());

        let request = self
            .client
            .post(self.endpoint("user/update-photo")?)
            .multipart(form);
        self.send_checked(request, "user/update-photo").await?;
        Ok(())
    }
}
