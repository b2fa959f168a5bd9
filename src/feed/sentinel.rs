//! Edge-triggered visibility observation for the list tail.
//!
//! The sentinel knows nothing about fetching; it turns a stream of
//! visibility samples for a marker (the last rendered item) into discrete
//! enter/exit events. The feed view decides what to do with them.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentinelState {
    /// Not watching anything; samples are ignored.
    Idle,
    /// Attached to a marker and tracking its visibility.
    Observing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentinelEvent {
    /// The marker went from not-visible to visible.
    Enter,
    /// The marker went from visible to not-visible.
    Exit,
}

/// Watches one marker position and reports visibility *transitions*.
///
/// `Enter` fires once per not-visible→visible edge, never repeatedly while
/// the marker stays on screen. Attaching to a new marker (the tail moved
/// after a page was appended) re-arms the edge; attaching to the marker
/// already being observed is a no-op so a render loop can call `attach`
/// every frame.
#[derive(Debug)]
pub struct TailSentinel {
    state: SentinelState,
    marker: Option<usize>,
    was_visible: bool,
}

impl TailSentinel {
    pub fn new() -> Self {
        Self {
            state: SentinelState::Idle,
            marker: None,
            was_visible: false,
        }
    }

    pub fn state(&self) -> SentinelState {
        self.state
    }

    pub fn marker(&self) -> Option<usize> {
        self.marker
    }

    /// Observe the marker at `marker` (an item index).
    pub fn attach(&mut self, marker: usize) {
        if self.state == SentinelState::Observing && self.marker == Some(marker) {
            return;
        }
        self.state = SentinelState::Observing;
        self.marker = Some(marker);
        self.was_visible = false;
    }

    /// Stop observing. Terminal for this view; `attach` starts over.
    pub fn detach(&mut self) {
        self.state = SentinelState::Idle;
        self.marker = None;
        self.was_visible = false;
    }

    /// Feed one visibility sample, yielding an event on a transition.
    pub fn observe(&mut self, visible: bool) -> Option<SentinelEvent> {
        if self.state != SentinelState::Observing {
            return None;
        }

        let event = match (self.was_visible, visible) {
            (false, true) => Some(SentinelEvent::Enter),
            (true, false) => Some(SentinelEvent::Exit),
            _ => None,
        };
        self.was_visible = visible;
        event
    }
}

impl Default for TailSentinel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enter_fires_once_per_edge() {
        let mut sentinel = TailSentinel::new();
        sentinel.attach(4);

        assert_eq!(sentinel.observe(true), Some(SentinelEvent::Enter));
        // Still visible: no repeat while the marker stays on screen.
        assert_eq!(sentinel.observe(true), None);
        assert_eq!(sentinel.observe(true), None);
    }

    #[test]
    fn test_exit_then_reenter_fires_again() {
        let mut sentinel = TailSentinel::new();
        sentinel.attach(4);

        assert_eq!(sentinel.observe(true), Some(SentinelEvent::Enter));
        assert_eq!(sentinel.observe(false), Some(SentinelEvent::Exit));
        assert_eq!(sentinel.observe(true), Some(SentinelEvent::Enter));
    }

    #[test]
    fn test_idle_ignores_samples() {
        let mut sentinel = TailSentinel::new();
        assert_eq!(sentinel.state(), SentinelState::Idle);
        assert_eq!(sentinel.observe(true), None);
    }

    #[test]
    fn test_detach_stops_events() {
        let mut sentinel = TailSentinel::new();
        sentinel.attach(4);
        sentinel.observe(true);

        sentinel.detach();
        assert_eq!(sentinel.observe(false), None);
        assert_eq!(sentinel.observe(true), None);
        assert_eq!(sentinel.marker(), None);
    }

    #[test]
    fn test_reattach_same_marker_keeps_edge_state() {
        let mut sentinel = TailSentinel::new();
        sentinel.attach(4);
        assert_eq!(sentinel.observe(true), Some(SentinelEvent::Enter));

        // Called every frame with the unchanged tail: no spurious re-arm.
        sentinel.attach(4);
        assert_eq!(sentinel.observe(true), None);
    }

    #[test]
    fn test_new_tail_rearms_edge() {
        let mut sentinel = TailSentinel::new();
        sentinel.attach(4);
        assert_eq!(sentinel.observe(true), Some(SentinelEvent::Enter));

        // The list grew; the tail marker moved. If the new tail is already
        // on screen the enter edge must fire again.
        sentinel.attach(9);
        assert_eq!(sentinel.observe(true), Some(SentinelEvent::Enter));
    }
}
