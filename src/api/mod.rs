pub mod http;

use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;

use crate::app::Result;
use crate::domain::{AuthResponse, Category, Credentials, Page, Post, PostSummary, Registration, User};

pub use http::HttpApi;

/// A full article plus the related posts the detail endpoint ships with it.
#[derive(Debug, Clone, Deserialize)]
pub struct ArticleView {
    #[serde(rename = "data")]
    pub post: Post,
    #[serde(default, rename = "autres")]
    pub related: Related,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Related {
    #[serde(default)]
    pub data: Vec<PostSummary>,
}

/// The news platform's REST surface, one method per endpoint.
///
/// Behind a trait so the feed loader and the CLI/TUI can be exercised
/// against a fake in tests.
#[async_trait]
pub trait NewsApi: Send + Sync {
    /// `GET /posts?page=<n>`: one page of the main feed.
    async fn posts_page(&self, page: u32) -> Result<Page<PostSummary>>;

    /// `GET /posts/slug/{slug}`: full article with related posts.
    async fn post_by_slug(&self, slug: &str) -> Result<ArticleView>;

    /// `GET /caroussel`: posts featured in the hero carousel.
    async fn featured(&self) -> Result<Vec<PostSummary>>;

    /// `GET /search?query=<q>`
    async fn search(&self, query: &str) -> Result<Vec<PostSummary>>;

    /// `GET /category/{slug}`: all posts in a category.
    async fn category_posts(&self, slug: &str) -> Result<Vec<PostSummary>>;

    /// `GET /categories/{slug}`: category metadata.
    async fn category(&self, slug: &str) -> Result<Category>;

    /// `POST /login`
    async fn login(&self, credentials: &Credentials) -> Result<AuthResponse>;

    /// `POST /register`
    async fn register(&self, registration: &Registration) -> Result<AuthResponse>;

    /// `POST /logout` (authenticated)
    async fn logout(&self) -> Result<()>;

    /// `GET /user/{id}` (authenticated)
    async fn user(&self, id: i64) -> Result<User>;

    /// `POST /user/update-photo` (authenticated, multipart)
    async fn update_photo(&self, user_id: i64, image: &Path) -> Result<()>;
}
