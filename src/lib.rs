//! # Gazette
//!
//! A terminal client for the Mascode news platform.
//!
//! ## Architecture
//!
//! ```text
//! NewsApi (HTTP) → FeedLoader / commands → UI (CLI or TUI)
//! ```
//!
//! - [`api`]: async REST client with one request helper and one error path
//! - [`feed`]: incremental feed loading and tail-visibility observation
//! - [`session`]: the single source of truth for the bearer token
//! - [`tui`]: terminal user interface built with ratatui
//!
//! ## Quick Start
//!
//! ```bash
//! # List the first page of articles
//! gazette posts
//!
//! # Read one article
//! gazette post mon-article
//!
//! # Search
//! gazette search rust
//!
//! # Launch the TUI
//! gazette tui
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together all components:
/// configuration, session store, API client.
pub mod app;

/// Async REST client for the news platform.
///
/// - [`NewsApi`](api::NewsApi): trait covering every endpoint
/// - [`HttpApi`](api::HttpApi): reqwest-based implementation
pub mod api;

/// Command-line interface using clap.
///
/// Defines the CLI structure and subcommands:
/// - `posts [--page N] [--all]` - List articles
/// - `post <slug>` - Show one article
/// - `category <slug>` / `search <query>` / `featured`
/// - `login` / `logout` / `whoami` / `set-photo`
/// - `tui` - Launch the TUI
pub mod cli;

/// Configuration management.
///
/// Loads from `~/.config/gazette/config.toml`: API base URL and timeout,
/// TUI tick rate and carousel interval.
pub mod config;

/// Core domain models.
///
/// - [`Page`](domain::Page): pagination envelope
/// - [`PostSummary`](domain::PostSummary) / [`Post`](domain::Post)
/// - [`Category`](domain::Category), [`Comment`](domain::Comment),
///   [`User`](domain::User)
pub mod domain;

/// Incremental post-feed loading.
///
/// - [`FeedLoader`](feed::FeedLoader): paginated fetch state with the
///   loading/has-more reentrancy guard
/// - [`TailSentinel`](feed::TailSentinel): edge-triggered visibility
///   observer driving infinite scroll
pub mod feed;

/// Persisted session state (bearer token and cached user).
pub mod session;

/// Terminal user interface.
///
/// Featured banner, infinite-scroll article list, article preview pane,
/// status bar. Keybindings: j/k navigate, Tab cycles panes, Enter reads,
/// o opens in browser, r retries after an error, R refreshes, q quits.
pub mod tui;
