use foundation::geo::{LatLng, LatLngBounds};

use crate::geojson::{BoundaryFeature, BoundaryGeometry, GeoJsonError};

/// Fixed path the hosting page serves the boundary document from.
pub const BOUNDARY_RESOURCE_PATH: &str = "/data/alaska_boundary.geojson";

/// Bounding box of the fallback boundary polygon.
pub const ALASKA_FALLBACK_BOUNDS: LatLngBounds = LatLngBounds::new(
    LatLng::new(51.214_183, -179.148_909),
    LatLng::new(71.365_162, -129.979_506),
);

/// Where a resolved boundary came from.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BoundarySource {
    Resource,
    Fallback,
}

/// The boundary overlay, immutable once resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct Boundary {
    pub feature: BoundaryFeature,
    pub source: BoundarySource,
}

impl Boundary {
    /// The hardcoded rectangle covering Alaska's bounding box, substituted
    /// whenever the resource cannot be used.
    pub fn fallback() -> Self {
        let b = ALASKA_FALLBACK_BOUNDS;
        let ring = vec![
            LatLng::new(b.south_west.lat, b.south_west.lng),
            LatLng::new(b.north_east.lat, b.south_west.lng),
            LatLng::new(b.north_east.lat, b.north_east.lng),
            LatLng::new(b.south_west.lat, b.north_east.lng),
            LatLng::new(b.south_west.lat, b.south_west.lng),
        ];
        Self {
            feature: BoundaryFeature {
                name: "Alaska".to_string(),
                state_code: Some("AK".to_string()),
                geometry: BoundaryGeometry::Polygon(vec![ring]),
            },
            source: BoundarySource::Fallback,
        }
    }

    pub fn name(&self) -> &str {
        &self.feature.name
    }

    pub fn state_code(&self) -> Option<&str> {
        self.feature.state_code.as_deref()
    }

    pub fn to_geojson_string(&self) -> String {
        self.feature.to_geojson_string()
    }
}

/// Why a load attempt fell back. Carried as a warning, never an error:
/// resolution always yields a usable boundary.
#[derive(Debug)]
pub enum BoundaryLoadError {
    Status(u16),
    Transport(String),
    Malformed(GeoJsonError),
}

impl std::fmt::Display for BoundaryLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoundaryLoadError::Status(code) => {
                write!(f, "boundary resource returned status {code}")
            }
            BoundaryLoadError::Transport(msg) => {
                write!(f, "boundary resource unreachable: {msg}")
            }
            BoundaryLoadError::Malformed(e) => write!(f, "boundary resource malformed: {e}"),
        }
    }
}

impl std::error::Error for BoundaryLoadError {}

/// Outcome of one load attempt: always a boundary, plus the warning that
/// explains a fallback substitution when one happened.
#[derive(Debug)]
pub struct BoundaryResolution {
    pub boundary: Boundary,
    pub warning: Option<BoundaryLoadError>,
}

/// Resolve a fetch outcome to a usable boundary.
///
/// Contract (no retries, failure is terminal for the attempt):
/// - `Ok(body)` that parses as the expected feature collection becomes a
///   `Resource` boundary.
/// - Anything else (transport error, non-success status, malformed or
///   mis-shaped content) becomes the fallback, with the cause attached.
pub fn resolve_boundary(outcome: Result<String, BoundaryLoadError>) -> BoundaryResolution {
    let warning = match outcome {
        Ok(body) => match BoundaryFeature::from_geojson_str(&body) {
            Ok(feature) => {
                return BoundaryResolution {
                    boundary: Boundary {
                        feature,
                        source: BoundarySource::Resource,
                    },
                    warning: None,
                };
            }
            Err(e) => BoundaryLoadError::Malformed(e),
        },
        Err(e) => e,
    };

    BoundaryResolution {
        boundary: Boundary::fallback(),
        warning: Some(warning),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        ALASKA_FALLBACK_BOUNDS, Boundary, BoundaryLoadError, BoundarySource, resolve_boundary,
    };
    use crate::geojson::BoundaryGeometry;
    use foundation::geo::LatLng;
    use pretty_assertions::assert_eq;

    #[test]
    fn fallback_ring_is_closed_and_matches_bounds() {
        let fallback = Boundary::fallback();
        let BoundaryGeometry::Polygon(rings) = &fallback.feature.geometry else {
            panic!("fallback must be a single polygon");
        };
        let ring = &rings[0];
        assert_eq!(ring.len(), 5);
        assert_eq!(ring.first(), ring.last());
        assert_eq!(
            ring[0],
            LatLng::new(
                ALASKA_FALLBACK_BOUNDS.south_west.lat,
                ALASKA_FALLBACK_BOUNDS.south_west.lng
            )
        );
        for p in ring {
            assert!(ALASKA_FALLBACK_BOUNDS.contains(*p));
        }
        assert_eq!(fallback.name(), "Alaska");
        assert_eq!(fallback.state_code(), Some("AK"));
    }

    #[test]
    fn resource_body_resolves_without_warning() {
        let body = Boundary::fallback().to_geojson_string();
        let resolution = resolve_boundary(Ok(body));
        assert_eq!(resolution.boundary.source, BoundarySource::Resource);
        assert!(resolution.warning.is_none());
    }

    #[test]
    fn transport_error_substitutes_fallback() {
        let resolution = resolve_boundary(Err(BoundaryLoadError::Transport(
            "connection refused".to_string(),
        )));
        assert_eq!(resolution.boundary, Boundary::fallback());
        assert!(matches!(
            resolution.warning,
            Some(BoundaryLoadError::Transport(_))
        ));
    }

    #[test]
    fn non_success_status_substitutes_fallback() {
        let resolution = resolve_boundary(Err(BoundaryLoadError::Status(404)));
        assert_eq!(resolution.boundary, Boundary::fallback());
        assert!(matches!(
            resolution.warning,
            Some(BoundaryLoadError::Status(404))
        ));
    }

    #[test]
    fn malformed_body_substitutes_fallback() {
        for body in ["not json at all", "{\"type\": \"Telemetry\"}", "[]"] {
            let resolution = resolve_boundary(Ok(body.to_string()));
            assert_eq!(resolution.boundary, Boundary::fallback(), "body: {body}");
            assert!(matches!(
                resolution.warning,
                Some(BoundaryLoadError::Malformed(_))
            ));
        }
    }
}
