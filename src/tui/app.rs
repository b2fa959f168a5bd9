use crate::api::ArticleView;
use crate::domain::PostSummary;
use crate::feed::{FeedLoader, TailSentinel};
use crate::tui::carousel::Carousel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivePane {
    Feed,
    Preview,
}

impl ActivePane {
    pub fn next(self) -> Self {
        match self {
            ActivePane::Feed => ActivePane::Preview,
            ActivePane::Preview => ActivePane::Feed,
        }
    }
}

pub struct TuiApp {
    pub active_pane: ActivePane,
    pub loader: FeedLoader,
    pub sentinel: TailSentinel,
    pub carousel: Carousel,
    pub selected: usize,
    pub list_offset: usize,
    pub article: Option<ArticleView>,
    pub preview_scroll: u16,
    pub should_quit: bool,
    pub status_message: Option<String>,
}

impl TuiApp {
    pub fn new(carousel_ticks_per_slide: u32) -> Self {
        Self {
            active_pane: ActivePane::Feed,
            loader: FeedLoader::new(),
            sentinel: TailSentinel::new(),
            carousel: Carousel::new(carousel_ticks_per_slide),
            selected: 0,
            list_offset: 0,
            article: None,
            preview_scroll: 0,
            should_quit: false,
            status_message: None,
        }
    }

    pub fn selected_post(&self) -> Option<&PostSummary> {
        self.loader.items().get(self.selected)
    }

    pub fn move_up(&mut self) {
        match self.active_pane {
            ActivePane::Feed => {
                if self.selected > 0 {
                    self.selected -= 1;
                    self.preview_scroll = 0;
                    self.article = None;
                }
            }
            ActivePane::Preview => {
                self.preview_scroll = self.preview_scroll.saturating_sub(1);
            }
        }
    }

    pub fn move_down(&mut self) {
        match self.active_pane {
            ActivePane::Feed => {
                let count = self.loader.items().len();
                if count > 0 && self.selected < count - 1 {
                    self.selected += 1;
                    self.preview_scroll = 0;
                    self.article = None;
                }
            }
            ActivePane::Preview => {
                self.preview_scroll = self.preview_scroll.saturating_add(1);
            }
        }
    }

    /// Adjust the list window so the selected row is on screen.
    pub fn scroll_into_view(&mut self, height: usize) {
        if height == 0 {
            return;
        }
        if self.selected < self.list_offset {
            self.list_offset = self.selected;
        } else if self.selected >= self.list_offset + height {
            self.list_offset = self.selected + 1 - height;
        }
    }

    /// Item indices currently inside the list viewport.
    pub fn visible_range(&self, height: usize) -> std::ops::Range<usize> {
        let start = self.list_offset.min(self.loader.items().len());
        let end = (start + height).min(self.loader.items().len());
        start..end
    }

    /// Whether the last item (the sentinel marker) is inside the viewport.
    pub fn tail_visible(&self, height: usize) -> bool {
        match self.loader.items().len().checked_sub(1) {
            Some(last) => self.visible_range(height).contains(&last),
            None => false,
        }
    }

    /// Start the feed over from page 1.
    pub fn reset_feed(&mut self) {
        self.loader.reset();
        self.sentinel.detach();
        self.selected = 0;
        self.list_offset = 0;
        self.article = None;
        self.preview_scroll = 0;
    }

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Page;

    fn post(id: i64) -> PostSummary {
        PostSummary {
            id,
            slug: None,
            title: format!("Post {}", id),
            introduction: None,
            image: None,
            reading_minutes: None,
            category: None,
            upvotes: None,
            downvotes: None,
            comment_count: None,
            created_at: None,
        }
    }

    fn app_with_items(count: i64) -> TuiApp {
        let mut app = TuiApp::new(50);
        let _ = app.loader.begin_fetch();
        app.loader.apply_page(Page {
            data: (0..count).map(post).collect(),
            current_page: 1,
            last_page: 1,
        });
        app
    }

    #[test]
    fn test_selection_clamps_to_list() {
        let mut app = app_with_items(2);
        app.move_up();
        assert_eq!(app.selected, 0);
        app.move_down();
        app.move_down();
        app.move_down();
        assert_eq!(app.selected, 1);
    }

    #[test]
    fn test_scroll_follows_selection() {
        let mut app = app_with_items(10);
        for _ in 0..7 {
            app.move_down();
        }
        app.scroll_into_view(5);
        assert_eq!(app.visible_range(5), 3..8);
        assert!(!app.tail_visible(5));
    }

    #[test]
    fn test_tail_visible_at_bottom() {
        let mut app = app_with_items(10);
        for _ in 0..9 {
            app.move_down();
        }
        app.scroll_into_view(5);
        assert!(app.tail_visible(5));
    }

    #[test]
    fn test_tail_visible_when_list_shorter_than_viewport() {
        let app = app_with_items(3);
        assert!(app.tail_visible(10));
    }

    #[test]
    fn test_empty_list_has_no_tail() {
        let app = TuiApp::new(50);
        assert!(!app.tail_visible(10));
    }

    #[test]
    fn test_reset_feed_clears_view_state() {
        let mut app = app_with_items(5);
        app.move_down();
        app.reset_feed();
        assert_eq!(app.selected, 0);
        assert!(app.loader.items().is_empty());
        assert!(app.loader.has_more());
    }
}
