pub mod app;
pub mod carousel;
pub mod event;
pub mod layout;

use std::io::{self, Stdout};
use std::sync::Arc;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::app::{AppContext, Result};
use crate::feed::SentinelEvent;

use self::app::{ActivePane, TuiApp};
use self::event::{Action, AppEvent, EventHandler};

type Tui = Terminal<CrosstermBackend<Stdout>>;

pub async fn run(ctx: Arc<AppContext>) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, ctx).await;
    restore_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

async fn run_app(terminal: &mut Tui, ctx: Arc<AppContext>) -> Result<()> {
    let mut app = TuiApp::new(ctx.config.tui.carousel_ticks_per_slide());
    let event_handler = EventHandler::new(ctx.config.tui.tick_rate());

    // Initial loads: the featured banner is best-effort, the first feed
    // page happens immediately when the view mounts.
    load_featured(&mut app, ctx.api.as_ref()).await;
    app.loader.fetch_next(ctx.api.as_ref()).await;

    loop {
        let list_height = layout::feed_list_height(terminal.size()?.height);
        app.scroll_into_view(list_height);
        terminal.draw(|frame| layout::render(frame, &app))?;

        // The sentinel tracks the list tail; when the tail scrolls into the
        // viewport and the loader is idle with pages remaining, fetch the
        // next one.
        if let Some(tail) = app.loader.items().len().checked_sub(1) {
            let visible = app.tail_visible(list_height);
            app.sentinel.attach(tail);
            let entered = matches!(app.sentinel.observe(visible), Some(SentinelEvent::Enter));
            if entered && app.loader.has_more() && !app.loader.is_loading() {
                if let Some(page) = app.loader.begin_fetch() {
                    // Show the loading state while the request is in flight.
                    terminal.draw(|frame| layout::render(frame, &app))?;
                    match ctx.api.posts_page(page).await {
                        Ok(response) => app.loader.apply_page(response),
                        Err(e) => app.loader.apply_error(crate::feed::load_error_message(&e)),
                    }
                }
            }
        }

        match event_handler.next()? {
            AppEvent::Key(key) => {
                app.clear_status();
                match Action::from(key) {
                    Action::Quit => {
                        app.should_quit = true;
                    }
                    Action::MoveUp => {
                        app.move_up();
                    }
                    Action::MoveDown => {
                        app.move_down();
                    }
                    Action::NextPane => {
                        app.active_pane = app.active_pane.next();
                    }
                    Action::Select => {
                        if app.active_pane == ActivePane::Feed {
                            load_article(&mut app, ctx.as_ref(), terminal).await?;
                        }
                    }
                    Action::OpenInBrowser => {
                        if let Some(slug) =
                            app.selected_post().and_then(|p| p.slug.clone())
                        {
                            let url = article_url(&ctx.config.api.base_url, &slug);
                            if let Err(e) = open::that(&url) {
                                app.set_status(format!("Failed to open browser: {}", e));
                            }
                        }
                    }
                    Action::Refresh => {
                        app.reset_feed();
                        terminal.draw(|frame| layout::render(frame, &app))?;
                        app.loader.fetch_next(ctx.api.as_ref()).await;
                        load_featured(&mut app, ctx.api.as_ref()).await;
                        if app.status_message.is_none() {
                            app.set_status("Refreshed".to_string());
                        }
                    }
                    Action::Retry => {
                        if app.loader.error().is_some() {
                            terminal.draw(|frame| layout::render(frame, &app))?;
                            app.loader.fetch_next(ctx.api.as_ref()).await;
                        }
                    }
                    Action::PrevSlide => {
                        app.carousel.prev();
                    }
                    Action::NextSlide => {
                        app.carousel.next();
                    }
                    Action::None => {}
                }
            }
            AppEvent::Tick => {
                app.carousel.on_tick();
            }
        }

        if app.should_quit {
            break;
        }
    }

    // The view is going away; stop observing before the state is dropped.
    app.sentinel.detach();

    Ok(())
}

/// Fill the carousel from the featured endpoint, reporting a failure in the
/// status bar. Used on startup and on refresh.
async fn load_featured(app: &mut TuiApp, api: &dyn crate::api::NewsApi) {
    match api.featured().await {
        Ok(posts) => app.carousel.set_posts(posts),
        Err(e) => app.set_status(format!("Featured unavailable: {}", e)),
    }
}

async fn load_article(app: &mut TuiApp, ctx: &AppContext, terminal: &mut Tui) -> Result<()> {
    let Some(slug) = app.selected_post().and_then(|p| p.slug.clone()) else {
        return Ok(());
    };

    app.set_status(format!("Loading {}...", slug));
    terminal.draw(|frame| layout::render(frame, app))?;

    match ctx.api.post_by_slug(&slug).await {
        Ok(view) => {
            app.article = Some(view);
            app.preview_scroll = 0;
            app.active_pane = ActivePane::Preview;
            app.clear_status();
        }
        Err(e) => {
            app.set_status(format!("Could not load article: {}", e));
        }
    }
    Ok(())
}

/// Public web URL of an article, derived from the API base URL.
fn article_url(api_base: &str, slug: &str) -> String {
    let site = api_base.trim_end_matches('/').trim_end_matches("/api");
    format!("{}/posts/{}", site, slug)
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use async_trait::async_trait;

    use super::*;
    use crate::api::{ArticleView, NewsApi};
    use crate::app::GazetteError;
    use crate::domain::{
        AuthResponse, Category, Credentials, Page, PostSummary, Registration, User,
    };

    struct FeaturedStub {
        ok: bool,
    }

    #[async_trait]
    impl NewsApi for FeaturedStub {
        async fn featured(&self) -> Result<Vec<PostSummary>> {
            if self.ok {
                Ok(vec![PostSummary {
                    id: 1,
                    slug: None,
                    title: "Une".to_string(),
                    introduction: None,
                    image: None,
                    reading_minutes: None,
                    category: None,
                    upvotes: None,
                    downvotes: None,
                    comment_count: None,
                    created_at: None,
                }])
            } else {
                Err(GazetteError::Api("backend down".into()))
            }
        }

        async fn posts_page(&self, _page: u32) -> Result<Page<PostSummary>> {
            unimplemented!()
        }
        async fn post_by_slug(&self, _slug: &str) -> Result<ArticleView> {
            unimplemented!()
        }
        async fn search(&self, _query: &str) -> Result<Vec<PostSummary>> {
            unimplemented!()
        }
        async fn category_posts(&self, _slug: &str) -> Result<Vec<PostSummary>> {
            unimplemented!()
        }
        async fn category(&self, _slug: &str) -> Result<Category> {
            unimplemented!()
        }
        async fn login(&self, _credentials: &Credentials) -> Result<AuthResponse> {
            unimplemented!()
        }
        async fn register(&self, _registration: &Registration) -> Result<AuthResponse> {
            unimplemented!()
        }
        async fn logout(&self) -> Result<()> {
            unimplemented!()
        }
        async fn user(&self, _id: i64) -> Result<User> {
            unimplemented!()
        }
        async fn update_photo(&self, _user_id: i64, _image: &Path) -> Result<()> {
            unimplemented!()
        }
    }

    #[tokio::test]
    async fn test_featured_load_fills_carousel() {
        let mut app = TuiApp::new(50);
        load_featured(&mut app, &FeaturedStub { ok: true }).await;
        assert_eq!(app.carousel.current().unwrap().title, "Une");
        assert!(app.status_message.is_none());
    }

    #[tokio::test]
    async fn test_failed_featured_load_reports_status() {
        let mut app = TuiApp::new(50);
        load_featured(&mut app, &FeaturedStub { ok: false }).await;
        assert!(app.carousel.current().is_none());
        assert_eq!(
            app.status_message.as_deref(),
            Some("Featured unavailable: backend down")
        );
    }

    #[test]
    fn test_article_url_strips_api_suffix() {
        assert_eq!(
            article_url("https://actus.mascodeproduct.com/api", "mon-article"),
            "https://actus.mascodeproduct.com/posts/mon-article"
        );
        assert_eq!(
            article_url("https://example.com/api/", "a"),
            "https://example.com/posts/a"
        );
    }
}
