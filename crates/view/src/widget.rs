//! The seam between the view core and whatever map widget hosts it.
//!
//! The core only requires the capability set below: raster tiles from a URL
//! template, one polygon overlay with a style/hover pair, point markers with
//! custom icons and popups, and animated pan/zoom. Any widget exposing these
//! is substitutable; the browser app drains `WidgetCommand` values to its JS
//! glue, tests record them in a `CommandQueue`.

use serde::{Deserialize, Serialize};

use crate::state::TargetView;

/// Raster tile source. No authentication, no rate-limit handling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileLayerConfig {
    pub url_template: String,
    pub attribution: String,
    pub min_zoom: f64,
    pub max_zoom: f64,
}

impl TileLayerConfig {
    pub fn openstreetmap() -> Self {
        Self {
            url_template: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            attribution:
                "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors"
                    .to_string(),
            min_zoom: 1.0,
            max_zoom: 18.0,
        }
    }
}

/// Stroke/fill styling for the boundary polygon overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolygonStyle {
    pub color: String,
    pub weight: f64,
    pub opacity: f64,
    pub fill_color: String,
    pub fill_opacity: f64,
}

/// One marker as the widget renders it: a custom HTML icon plus popup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerSpec {
    pub id: String,
    /// `[lat, lng]`, the widget convention.
    pub position: [f64; 2],
    pub icon_html: String,
    pub icon_size: [u32; 2],
    pub icon_anchor: [u32; 2],
    pub popup_html: String,
}

/// Commands issued to the hosting widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WidgetCommand {
    SetTileLayer {
        tiles: TileLayerConfig,
    },
    SetBoundary {
        geojson: String,
        style: PolygonStyle,
        hover_style: PolygonStyle,
        popup_html: String,
    },
    SetBoundaryVisible {
        visible: bool,
    },
    SetMarkers {
        markers: Vec<MarkerSpec>,
    },
    FlyTo {
        /// `[lat, lng]`.
        center: [f64; 2],
        zoom: f64,
        duration_ms: u64,
    },
}

pub trait MapWidget {
    fn set_tile_layer(&mut self, tiles: TileLayerConfig);
    fn set_boundary(
        &mut self,
        geojson: String,
        style: PolygonStyle,
        hover_style: PolygonStyle,
        popup_html: String,
    );
    fn set_boundary_visible(&mut self, visible: bool);
    fn set_markers(&mut self, markers: Vec<MarkerSpec>);
    fn fly_to(&mut self, target: TargetView);
}

/// A `MapWidget` that records commands for a host to drain and apply.
#[derive(Debug, Default)]
pub struct CommandQueue {
    commands: Vec<WidgetCommand>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[WidgetCommand] {
        &self.commands
    }

    pub fn drain(&mut self) -> Vec<WidgetCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl MapWidget for CommandQueue {
    fn set_tile_layer(&mut self, tiles: TileLayerConfig) {
        self.commands.push(WidgetCommand::SetTileLayer { tiles });
    }

    fn set_boundary(
        &mut self,
        geojson: String,
        style: PolygonStyle,
        hover_style: PolygonStyle,
        popup_html: String,
    ) {
        self.commands.push(WidgetCommand::SetBoundary {
            geojson,
            style,
            hover_style,
            popup_html,
        });
    }

    fn set_boundary_visible(&mut self, visible: bool) {
        self.commands
            .push(WidgetCommand::SetBoundaryVisible { visible });
    }

    fn set_markers(&mut self, markers: Vec<MarkerSpec>) {
        self.commands.push(WidgetCommand::SetMarkers { markers });
    }

    fn fly_to(&mut self, target: TargetView) {
        self.commands.push(WidgetCommand::FlyTo {
            center: target.center.to_array(),
            zoom: target.zoom,
            duration_ms: target.duration.as_millis(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::{CommandQueue, MapWidget, TileLayerConfig, WidgetCommand};
    use crate::state::TargetView;
    use foundation::geo::LatLng;
    use foundation::time::Duration;

    #[test]
    fn queue_records_and_drains_in_order() {
        let mut queue = CommandQueue::new();
        queue.set_tile_layer(TileLayerConfig::openstreetmap());
        queue.set_boundary_visible(false);

        let drained = queue.drain();
        assert_eq!(drained.len(), 2);
        assert!(matches!(drained[0], WidgetCommand::SetTileLayer { .. }));
        assert!(queue.commands().is_empty());
    }

    #[test]
    fn fly_to_serializes_with_lat_lng_order() {
        let mut queue = CommandQueue::new();
        queue.fly_to(TargetView::new(
            LatLng::new(61.2181, -149.9003),
            10.0,
            Duration::from_millis(1_500),
        ));

        let json = serde_json::to_string(&queue.drain()).expect("serialize");
        assert!(json.contains("\"type\":\"fly_to\""));
        assert!(json.contains("\"center\":[61.2181,-149.9003]"));
        assert!(json.contains("\"duration_ms\":1500"));
    }
}
