use view::widget::{MarkerSpec, PolygonStyle};

use crate::popup::region_popup_html;
use crate::region::{Region, RegionCategory};

/// Zoom at or below which markers render in their compact form.
pub const COMPACT_MARKER_MAX_ZOOM: f64 = 5.0;
/// Zoom at or above which the marker's text label renders.
pub const LABEL_MIN_ZOOM: f64 = 4.0;

/// How one marker looks at a given zoom. Derived from (category, zoom)
/// on demand, never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerStyle {
    pub glyph: &'static str,
    pub box_px: u32,
    pub icon_font_size: &'static str,
    pub show_label: bool,
}

impl MarkerStyle {
    pub fn derive(category: RegionCategory, zoom: f64) -> Self {
        let glyph = match category {
            RegionCategory::City => "🏙️",
            RegionCategory::Remote => "🏔️",
            RegionCategory::Island => "🏝️",
        };
        let compact = zoom <= COMPACT_MARKER_MAX_ZOOM;
        Self {
            glyph,
            box_px: if compact { 30 } else { 40 },
            icon_font_size: if compact { "1.2rem" } else { "1.5rem" },
            show_label: zoom >= LABEL_MIN_ZOOM,
        }
    }
}

/// Boundary polygon base style.
pub fn boundary_style() -> PolygonStyle {
    PolygonStyle {
        color: "#2E7D32".to_string(),
        weight: 3.0,
        opacity: 0.8,
        fill_color: "#4CAF50".to_string(),
        fill_opacity: 0.1,
    }
}

/// Boundary polygon hover style.
pub fn boundary_hover_style() -> PolygonStyle {
    PolygonStyle {
        color: "#1B5E20".to_string(),
        weight: 4.0,
        opacity: 1.0,
        fill_color: "#66BB6A".to_string(),
        fill_opacity: 0.3,
    }
}

fn category_class(category: RegionCategory) -> &'static str {
    match category {
        RegionCategory::City => "city",
        RegionCategory::Remote => "remote",
        RegionCategory::Island => "island",
    }
}

fn marker_icon_html(region: &Region, style: &MarkerStyle) -> String {
    let label = if style.show_label {
        format!("<span class=\"marker-label\">{}</span>", region.name)
    } else {
        String::new()
    };
    format!(
        "<div class=\"custom-marker {}\"><span class=\"marker-icon\" style=\"font-size: {}\">{}</span>{}</div>",
        category_class(region.category),
        style.icon_font_size,
        style.glyph,
        label,
    )
}

/// Render the full marker set for the current zoom.
pub fn marker_specs(regions: &[Region], zoom: f64) -> Vec<MarkerSpec> {
    regions
        .iter()
        .map(|region| {
            let style = MarkerStyle::derive(region.category, zoom);
            MarkerSpec {
                id: region.name.to_string(),
                position: region.coords.to_array(),
                icon_html: marker_icon_html(region, &style),
                icon_size: [style.box_px, style.box_px],
                icon_anchor: [style.box_px / 2, style.box_px],
                popup_html: region_popup_html(region),
            }
        })
        .collect()
}
