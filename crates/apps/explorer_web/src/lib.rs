//! Browser boundary of the Alaska explorer.
//!
//! The wasm module owns all view state; the hosting page owns the actual
//! map widget. The page forwards widget events (zoom-end, move-end, clicks)
//! into the exports below, calls `tick` from its animation loop, and drains
//! `WidgetCommand` values as JSON to apply to the widget. Any widget with
//! the capability set in `view::widget` can sit on the JS side.

use console_error_panic_hook::set_once;
use gloo_net::http::Request;
use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use foundation::time::Timestamp;
use geodata::boundary::{
    BOUNDARY_RESOURCE_PATH, Boundary, BoundaryLoadError, BoundarySource, resolve_boundary,
};
use markers::popup::boundary_popup_html;
use markers::region::{ALASKA_REGIONS, region_by_name};
use markers::symbology::{
    COMPACT_MARKER_MAX_ZOOM, LABEL_MIN_ZOOM, boundary_hover_style, boundary_style, marker_specs,
};
use view::explorer::Explorer;
use view::status::status_panel;
use view::widget::{CommandQueue, MapWidget, TileLayerConfig};

/// The two zoom-dependent inputs to marker rendering. Markers are re-sent
/// to the widget only when this class changes, not on every zoom report.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
struct MarkerClass {
    compact: bool,
    labelled: bool,
}

impl MarkerClass {
    fn for_zoom(zoom: f64) -> Self {
        Self {
            compact: zoom <= COMPACT_MARKER_MAX_ZOOM,
            labelled: zoom >= LABEL_MIN_ZOOM,
        }
    }
}

struct AppState {
    explorer: Explorer,
    queue: CommandQueue,
    boundary: Option<Boundary>,
    marker_class: Option<MarkerClass>,
}

thread_local! {
    static STATE: RefCell<AppState> = RefCell::new(AppState {
        explorer: Explorer::new(),
        queue: CommandQueue::new(),
        boundary: None,
        marker_class: None,
    });
}

fn timestamp(now_ms: f64) -> Timestamp {
    Timestamp(now_ms.max(0.0) as u64)
}

fn refresh_markers(state: &mut AppState) {
    let zoom = state.explorer.state().zoom;
    let class = MarkerClass::for_zoom(zoom);
    if state.marker_class == Some(class) {
        return;
    }
    state.marker_class = Some(class);
    state.queue.set_markers(marker_specs(&ALASKA_REGIONS, zoom));
}

fn flush_event_log(state: &mut AppState) {
    for event in state.explorer.drain_events() {
        web_sys::console::log_1(&JsValue::from_str(&format!(
            "[{}ms] {}: {}",
            event.at.0, event.kind, event.message
        )));
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    set_once();
    Ok(())
}

/// Push the initial widget configuration: tile layer and the marker set at
/// the starting overview zoom.
#[wasm_bindgen]
pub fn boot() {
    STATE.with(|state| {
        let mut s = state.borrow_mut();
        s.queue.set_tile_layer(TileLayerConfig::openstreetmap());
        refresh_markers(&mut s);
    });
}

/// Fetch the boundary resource and hand the widget whatever resolves:
/// the document on success, the fallback rectangle on any failure.
#[wasm_bindgen]
pub fn load_boundary() {
    spawn_local(async move {
        let outcome = fetch_boundary_text(BOUNDARY_RESOURCE_PATH).await;
        let resolution = resolve_boundary(outcome);
        if let Some(warning) = &resolution.warning {
            web_sys::console::warn_1(&JsValue::from_str(&format!(
                "Failed to load Alaska boundary: {warning}; using fallback"
            )));
        }

        STATE.with(|state| {
            let mut s = state.borrow_mut();
            let boundary = resolution.boundary;
            let popup = boundary_popup_html(boundary.name(), boundary.state_code());
            let AppState {
                explorer,
                queue,
                boundary: slot,
                ..
            } = &mut *s;
            queue.set_boundary(
                boundary.to_geojson_string(),
                boundary_style(),
                boundary_hover_style(),
                popup,
            );
            queue.set_boundary_visible(explorer.state().flags.boundary_visible);
            *slot = Some(boundary);
        });
    });
}

/// Where the current boundary came from: "resource", "fallback", or
/// "pending" while the fetch is in flight.
#[wasm_bindgen]
pub fn boundary_source() -> String {
    STATE.with(|state| {
        match state.borrow().boundary.as_ref().map(|b| b.source) {
            Some(BoundarySource::Resource) => "resource",
            Some(BoundarySource::Fallback) => "fallback",
            None => "pending",
        }
        .to_string()
    })
}

#[wasm_bindgen]
pub fn on_zoom_end(zoom: f64, now_ms: f64) {
    report_zoom(zoom, now_ms);
}

/// Move-end reports the same way zoom-end does; panning can change the
/// widget's zoom when it clamps to bounds.
#[wasm_bindgen]
pub fn on_move_end(zoom: f64, now_ms: f64) {
    report_zoom(zoom, now_ms);
}

fn report_zoom(zoom: f64, now_ms: f64) {
    STATE.with(|state| {
        let mut s = state.borrow_mut();
        let now = timestamp(now_ms);
        let AppState {
            explorer, queue, ..
        } = &mut *s;
        explorer.report_zoom(zoom, now, queue);
        refresh_markers(&mut s);
        flush_event_log(&mut s);
    });
}

#[wasm_bindgen]
pub fn on_boundary_click(now_ms: f64) {
    STATE.with(|state| {
        let mut s = state.borrow_mut();
        let now = timestamp(now_ms);
        let AppState {
            explorer, queue, ..
        } = &mut *s;
        explorer.explore_boundary(now, queue);
        flush_event_log(&mut s);
    });
}

/// Region marker or popup-button click, identified by region name.
#[wasm_bindgen]
pub fn on_region_click(name: &str, now_ms: f64) {
    let Some(region) = region_by_name(name) else {
        web_sys::console::warn_1(&JsValue::from_str(&format!("unknown region: {name:?}")));
        return;
    };
    STATE.with(|state| {
        let mut s = state.borrow_mut();
        let now = timestamp(now_ms);
        let AppState {
            explorer, queue, ..
        } = &mut *s;
        explorer.explore_region(region.coords, region.zoom, now, queue);
        flush_event_log(&mut s);
    });
}

#[wasm_bindgen]
pub fn reset_to_overview(now_ms: f64) {
    STATE.with(|state| {
        let mut s = state.borrow_mut();
        let now = timestamp(now_ms);
        let AppState {
            explorer, queue, ..
        } = &mut *s;
        explorer.reset_to_overview(now, queue);
        flush_event_log(&mut s);
    });
}

#[wasm_bindgen]
pub fn zoom_to_world(now_ms: f64) {
    STATE.with(|state| {
        let mut s = state.borrow_mut();
        let now = timestamp(now_ms);
        let AppState {
            explorer, queue, ..
        } = &mut *s;
        explorer.zoom_to_world(now, queue);
        flush_event_log(&mut s);
    });
}

/// Advance flight timers. The host calls this from its animation loop with
/// the same millisecond clock it stamps events with.
#[wasm_bindgen]
pub fn tick(now_ms: f64) {
    STATE.with(|state| {
        let mut s = state.borrow_mut();
        s.explorer.tick(timestamp(now_ms));
        flush_event_log(&mut s);
    });
}

/// Drain pending widget commands as a JSON array for the JS glue to apply.
#[wasm_bindgen]
pub fn drain_commands() -> String {
    STATE.with(|state| {
        let commands = state.borrow_mut().queue.drain();
        serde_json::to_string(&commands).unwrap_or_else(|_| "[]".to_string())
    })
}

/// Current status-panel model as JSON.
#[wasm_bindgen]
pub fn status() -> String {
    STATE.with(|state| {
        let s = state.borrow();
        let panel = status_panel(s.explorer.state());
        serde_json::to_string(&panel).unwrap_or_else(|_| "{}".to_string())
    })
}

async fn fetch_boundary_text(url: &str) -> Result<String, BoundaryLoadError> {
    let resp = Request::get(url)
        .send()
        .await
        .map_err(|e| BoundaryLoadError::Transport(e.to_string()))?;
    if !resp.ok() {
        return Err(BoundaryLoadError::Status(resp.status()));
    }
    resp.text()
        .await
        .map_err(|e| BoundaryLoadError::Transport(e.to_string()))
}
