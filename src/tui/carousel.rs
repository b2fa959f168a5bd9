use crate::domain::PostSummary;

/// Rotating featured-article banner state.
///
/// Advances automatically every `ticks_per_slide` event-loop ticks; manual
/// navigation pauses autoplay for one interval so the reader isn't yanked
/// off the slide they just picked.
#[derive(Debug)]
pub struct Carousel {
    posts: Vec<PostSummary>,
    index: usize,
    ticks_per_slide: u32,
    ticks: u32,
    paused_ticks: u32,
}

impl Carousel {
    pub fn new(ticks_per_slide: u32) -> Self {
        Self {
            posts: Vec::new(),
            index: 0,
            ticks_per_slide: ticks_per_slide.max(1),
            ticks: 0,
            paused_ticks: 0,
        }
    }

    pub fn set_posts(&mut self, posts: Vec<PostSummary>) {
        self.posts = posts;
        self.index = 0;
        self.ticks = 0;
        self.paused_ticks = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn current(&self) -> Option<&PostSummary> {
        self.posts.get(self.index)
    }

    /// (1-based slide number, slide count) for the indicator.
    pub fn position(&self) -> (usize, usize) {
        (self.index + 1, self.posts.len())
    }

    pub fn next(&mut self) {
        if self.posts.is_empty() {
            return;
        }
        self.index = (self.index + 1) % self.posts.len();
        self.pause();
    }

    pub fn prev(&mut self) {
        if self.posts.is_empty() {
            return;
        }
        self.index = if self.index == 0 {
            self.posts.len() - 1
        } else {
            self.index - 1
        };
        self.pause();
    }

    fn pause(&mut self) {
        self.ticks = 0;
        self.paused_ticks = self.ticks_per_slide;
    }

    /// Advance autoplay by one event-loop tick.
    pub fn on_tick(&mut self) {
        if self.posts.len() <= 1 {
            return;
        }
        if self.paused_ticks > 0 {
            self.paused_ticks -= 1;
            return;
        }
        self.ticks += 1;
        if self.ticks >= self.ticks_per_slide {
            self.ticks = 0;
            self.index = (self.index + 1) % self.posts.len();
        }
    }
}
