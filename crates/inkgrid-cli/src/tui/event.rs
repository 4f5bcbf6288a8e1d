use crossterm::event::Event as CrosstermEvent;

/// Events processed by TUI applications.
#[derive(Debug, Clone, derive_more::IsVariant, derive_more::From)]
pub(super) enum TuiEvent {
    /// Time to advance timers (based on the tick interval).
    Tick,
    /// Time to redraw the screen.
    Render,
    /// Terminal events such as key input and resize.
    Crossterm(CrosstermEvent),
}
