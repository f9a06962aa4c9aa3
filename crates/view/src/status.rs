use serde::Serialize;

use crate::mode::ViewMode;
use crate::state::ViewState;

/// Zoom above which the "back to Alaska" control is offered.
pub const RESET_BUTTON_MIN_ZOOM: f64 = 5.0;
/// Zoom above which the "world view" control is offered.
pub const WORLD_BUTTON_MIN_ZOOM: f64 = 3.0;

/// Everything the hosting page's status panel shows, derived from the view
/// state on demand.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusPanel {
    pub zoom: f64,
    pub mode_label: &'static str,
    pub hint: &'static str,
    pub boundary_visible: bool,
    pub regions_visible: bool,
    pub show_reset_button: bool,
    pub show_world_button: bool,
}

pub fn status_panel(state: &ViewState) -> StatusPanel {
    let mode_label = match state.flags.mode {
        ViewMode::Overview => "Overview Mode",
        ViewMode::Detail => "Alaska Detail Mode",
        ViewMode::Region => "Region Explorer",
    };
    let hint = if state.zoom <= RESET_BUTTON_MIN_ZOOM {
        "Click locations or boundary to explore Alaska"
    } else {
        "Pan freely or use controls to navigate"
    };

    StatusPanel {
        zoom: state.zoom,
        mode_label,
        hint,
        boundary_visible: state.flags.boundary_visible,
        regions_visible: state.flags.regions_visible,
        show_reset_button: state.zoom > RESET_BUTTON_MIN_ZOOM,
        show_world_button: state.zoom > WORLD_BUTTON_MIN_ZOOM,
    }
}
