use crossterm::event::Event as CrosstermEvent;

#[derive(Debug, Clone)]
pub(super) enum TuiEvent {
    /// The tick interval has elapsed.
    Tick,
    /// Something changed since the last draw.
    Render,
    Crossterm(CrosstermEvent),
}

impl From<CrosstermEvent> for TuiEvent {
    fn from(event: CrosstermEvent) -> Self {
        Self::Crossterm(event)
    }
}
