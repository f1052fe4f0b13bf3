//! Per-item state machine
//!
//! Every queued text item walks `Pending -> Fetching -> Composed -> Rendered`,
//! or drops into `Failed` from `Fetching` or `Composed`. Both end states are
//! terminal; a failed item is never retried within a session.

/// Item states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ItemState {
    /// Queued, not yet started
    Pending,
    /// Glyph lookups in progress
    Fetching,
    /// Composite bitmap ready
    Composed,
    /// Drawn to the display
    Rendered,
    /// Composition or drawing failed; placeholder shown
    Failed,
}

/// Events driving an item forward
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ItemEvent {
    /// Item picked up from the queue
    Begin,
    /// All glyphs fetched and stitched
    LineComposed,
    /// A glyph was unavailable or the text was empty
    ComposeFailed,
    /// Last frame flushed
    RenderComplete,
    /// The display rejected a frame
    RenderFailed,
}

impl ItemState {
    /// Check if the item is finished
    pub fn is_terminal(&self) -> bool {
        matches!(self, ItemState::Rendered | ItemState::Failed)
    }

    /// Process an event and return the next state
    ///
    /// Events that do not apply to the current state leave it unchanged.
    pub fn transition(self, event: ItemEvent) -> Self {
        use ItemEvent::*;
        use ItemState::*;

        match (self, event) {
            (Pending, Begin) => Fetching,

            (Fetching, LineComposed) => Composed,
            (Fetching, ComposeFailed) => Failed,

            (Composed, RenderComplete) => Rendered,
            (Composed, RenderFailed) => Failed,

            _ => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path() {
        let state = ItemState::Pending
            .transition(ItemEvent::Begin)
            .transition(ItemEvent::LineComposed)
            .transition(ItemEvent::RenderComplete);
        assert_eq!(state, ItemState::Rendered);
        assert!(state.is_terminal());
    }

    #[test]
    fn test_compose_failure() {
        let state = ItemState::Pending
            .transition(ItemEvent::Begin)
            .transition(ItemEvent::ComposeFailed);
        assert_eq!(state, ItemState::Failed);
        assert!(state.is_terminal());
    }

    #[test]
    fn test_render_failure() {
        let state = ItemState::Composed.transition(ItemEvent::RenderFailed);
        assert_eq!(state, ItemState::Failed);
    }

    #[test]
    fn test_terminal_states_are_sticky() {
        for event in [
            ItemEvent::Begin,
            ItemEvent::LineComposed,
            ItemEvent::ComposeFailed,
            ItemEvent::RenderComplete,
            ItemEvent::RenderFailed,
        ] {
            assert_eq!(ItemState::Rendered.transition(event), ItemState::Rendered);
            assert_eq!(ItemState::Failed.transition(event), ItemState::Failed);
        }
    }

    #[test]
    fn test_out_of_order_events_ignored() {
        assert_eq!(
            ItemState::Pending.transition(ItemEvent::RenderComplete),
            ItemState::Pending
        );
        assert_eq!(
            ItemState::Fetching.transition(ItemEvent::RenderComplete),
            ItemState::Fetching
        );
        assert!(!ItemState::Composed.is_terminal());
    }
}
