//! All UI actions. Actions are the sole mechanism for app state mutation.

use facegate_core::{Dispatch, ElementId, EventKind};

use crate::screen::ScreenId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    Tick,
    Render,
    ToggleHelp,

    /// Navigate to another page.
    SwitchScreen(ScreenId),

    /// Deliver an interaction to the frontend's bound handler.
    Interact(ElementId, EventKind),
    /// The picker for `ElementId` closed on this path.
    PickFile(ElementId, String),
    /// A spawned dispatch finished.
    Dispatched(ElementId, Dispatch),
}
