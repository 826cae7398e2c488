use anyhow::Result;
use crossterm::event::Event;
use ratatui::prelude::*;

/// Action that a component can return after handling an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentAction {
    /// No action needed
    None,
    /// Component state was updated, needs re-render
    Update,
    /// Quit the studio
    Quit,
    /// Click on the gallery item at this index
    ToggleImage(usize),
    /// Advance the resolution dropdown
    CycleResolution,
    /// Advance the audio mood dropdown
    CycleAudioMood,
    /// Send the selection to the render endpoint
    CreateVideo,
    /// Reload the gallery
    Refresh,
    /// Save the rendered video locally
    Download,
    /// Close the alert on top
    DismissAlert,
}

/// Trait for all UI components
///
/// Components render themselves and translate input into actions; the studio
/// decides what an action does.
pub trait Component {
    /// Render the component to the given area
    fn render(&mut self, frame: &mut Frame, area: Rect) -> Result<()>;

    /// Handle an event (keyboard, mouse, etc.)
    fn handle_event(&mut self, event: Event) -> Result<ComponentAction>;
}
