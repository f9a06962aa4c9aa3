use foundation::geo::LatLng;
use serde_json::{Map, Value, json};

/// A linear ring of vertices.
///
/// Stored in `LatLng` form; GeoJSON position order (`[lng, lat]`) is
/// converted at the parse/serialize edge and nowhere else.
pub type Ring = Vec<LatLng>;

#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryGeometry {
    Polygon(Vec<Ring>),
    MultiPolygon(Vec<Vec<Ring>>),
}

/// The single boundary feature this system consumes: one polygon (or
/// multi-polygon) with `name` and `state_code` properties.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryFeature {
    pub name: String,
    pub state_code: Option<String>,
    pub geometry: BoundaryGeometry,
}

#[derive(Debug)]
pub enum GeoJsonError {
    NotAFeatureCollection,
    NoFeatures,
    InvalidFeature { reason: String },
}

impl std::fmt::Display for GeoJsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeoJsonError::NotAFeatureCollection => {
                write!(f, "expected GeoJSON FeatureCollection")
            }
            GeoJsonError::NoFeatures => write!(f, "feature collection is empty"),
            GeoJsonError::InvalidFeature { reason } => {
                write!(f, "invalid boundary feature: {reason}")
            }
        }
    }
}

impl std::error::Error for GeoJsonError {}

impl BoundaryFeature {
    pub fn from_geojson_str(payload: &str) -> Result<Self, GeoJsonError> {
        let value: Value =
            serde_json::from_str(payload).map_err(|e| GeoJsonError::InvalidFeature {
                reason: format!("JSON parse error: {e}"),
            })?;
        Self::from_geojson_value(value)
    }

    pub fn from_geojson_value(value: Value) -> Result<Self, GeoJsonError> {
        let obj = value
            .as_object()
            .ok_or(GeoJsonError::NotAFeatureCollection)?;
        let ty = obj
            .get("type")
            .and_then(|v| v.as_str())
            .ok_or(GeoJsonError::NotAFeatureCollection)?;
        if ty != "FeatureCollection" {
            return Err(GeoJsonError::NotAFeatureCollection);
        }

        let features = obj
            .get("features")
            .and_then(|v| v.as_array())
            .ok_or(GeoJsonError::NotAFeatureCollection)?;
        let feature = features.first().ok_or(GeoJsonError::NoFeatures)?;
        let fobj = feature.as_object().ok_or(GeoJsonError::InvalidFeature {
            reason: "feature must be an object".to_string(),
        })?;

        let fty = fobj
            .get("type")
            .and_then(|v| v.as_str())
            .unwrap_or_default();
        if fty != "Feature" {
            return Err(GeoJsonError::InvalidFeature {
                reason: format!("unexpected feature type: {fty:?}"),
            });
        }

        let props = fobj
            .get("properties")
            .and_then(|v| v.as_object())
            .ok_or(GeoJsonError::InvalidFeature {
                reason: "feature missing properties".to_string(),
            })?;
        let name = props
            .get("name")
            .and_then(|v| v.as_str())
            .ok_or(GeoJsonError::InvalidFeature {
                reason: "properties missing name".to_string(),
            })?
            .to_string();
        let state_code = props
            .get("state_code")
            .and_then(|v| v.as_str())
            .map(str::to_string);

        let geometry = parse_geometry(fobj)?;

        Ok(Self {
            name,
            state_code,
            geometry,
        })
    }

    pub fn to_geojson_value(&self) -> Value {
        let mut props = Map::new();
        props.insert("name".to_string(), Value::String(self.name.clone()));
        if let Some(code) = &self.state_code {
            props.insert("state_code".to_string(), Value::String(code.clone()));
        }

        let geometry = match &self.geometry {
            BoundaryGeometry::Polygon(rings) => json!({
                "type": "Polygon",
                "coordinates": rings_to_positions(rings),
            }),
            BoundaryGeometry::MultiPolygon(polygons) => json!({
                "type": "MultiPolygon",
                "coordinates": polygons
                    .iter()
                    .map(|rings| rings_to_positions(rings))
                    .collect::<Vec<_>>(),
            }),
        };

        json!({
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "properties": Value::Object(props),
                "geometry": geometry,
            }],
        })
    }

    pub fn to_geojson_string(&self) -> String {
        self.to_geojson_value().to_string()
    }
}

fn parse_geometry(fobj: &Map<String, Value>) -> Result<BoundaryGeometry, GeoJsonError> {
    let gobj = fobj
        .get("geometry")
        .and_then(|v| v.as_object())
        .ok_or(GeoJsonError::InvalidFeature {
            reason: "feature missing geometry".to_string(),
        })?;
    let gty = gobj
        .get("type")
        .and_then(|v| v.as_str())
        .unwrap_or_default();
    let coords = gobj
        .get("coordinates")
        .ok_or(GeoJsonError::InvalidFeature {
            reason: "geometry missing coordinates".to_string(),
        })?;

    match gty {
        "Polygon" => Ok(BoundaryGeometry::Polygon(parse_rings(coords)?)),
        "MultiPolygon" => {
            let arr = coords.as_array().ok_or(GeoJsonError::InvalidFeature {
                reason: "multi-polygon coordinates must be an array".to_string(),
            })?;
            let mut polygons = Vec::with_capacity(arr.len());
            for polygon in arr {
                polygons.push(parse_rings(polygon)?);
            }
            Ok(BoundaryGeometry::MultiPolygon(polygons))
        }
        other => Err(GeoJsonError::InvalidFeature {
            reason: format!("unsupported geometry type: {other:?}"),
        }),
    }
}

fn parse_rings(value: &Value) -> Result<Vec<Ring>, GeoJsonError> {
    let arr = value.as_array().ok_or(GeoJsonError::InvalidFeature {
        reason: "polygon coordinates must be an array of rings".to_string(),
    })?;
    let mut rings = Vec::with_capacity(arr.len());
    for ring in arr {
        let positions = ring.as_array().ok_or(GeoJsonError::InvalidFeature {
            reason: "ring must be an array of positions".to_string(),
        })?;
        let mut out = Vec::with_capacity(positions.len());
        for pos in positions {
            out.push(parse_position(pos)?);
        }
        rings.push(out);
    }
    Ok(rings)
}

fn parse_position(value: &Value) -> Result<LatLng, GeoJsonError> {
    let pair = value.as_array().ok_or(GeoJsonError::InvalidFeature {
        reason: "position must be an array".to_string(),
    })?;
    if pair.len() < 2 {
        return Err(GeoJsonError::InvalidFeature {
            reason: format!("position needs lng and lat, got {} values", pair.len()),
        });
    }
    let lng = pair[0].as_f64().ok_or(GeoJsonError::InvalidFeature {
        reason: "longitude must be a number".to_string(),
    })?;
    let lat = pair[1].as_f64().ok_or(GeoJsonError::InvalidFeature {
        reason: "latitude must be a number".to_string(),
    })?;
    Ok(LatLng::new(lat, lng))
}

fn rings_to_positions(rings: &[Ring]) -> Vec<Vec<[f64; 2]>> {
    rings
        .iter()
        .map(|ring| ring.iter().map(|p| [p.lng, p.lat]).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{BoundaryFeature, BoundaryGeometry, GeoJsonError};
    use foundation::geo::LatLng;
    use pretty_assertions::assert_eq;

    const MINIMAL: &str = r#"{
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "properties": {"name": "Alaska", "state_code": "AK"},
            "geometry": {
                "type": "Polygon",
                "coordinates": [[[-179.0, 51.0], [-179.0, 71.0], [-129.0, 71.0], [-179.0, 51.0]]]
            }
        }]
    }"#;

    #[test]
    fn parses_polygon_feature_collection() {
        let feature = BoundaryFeature::from_geojson_str(MINIMAL).expect("parse");
        assert_eq!(feature.name, "Alaska");
        assert_eq!(feature.state_code.as_deref(), Some("AK"));
        let BoundaryGeometry::Polygon(rings) = &feature.geometry else {
            panic!("expected polygon");
        };
        assert_eq!(rings.len(), 1);
        // GeoJSON position order is [lng, lat].
        assert_eq!(rings[0][0], LatLng::new(51.0, -179.0));
    }

    #[test]
    fn round_trips_through_geojson_value() {
        let feature = BoundaryFeature::from_geojson_str(MINIMAL).expect("parse");
        let reparsed =
            BoundaryFeature::from_geojson_value(feature.to_geojson_value()).expect("reparse");
        assert_eq!(feature, reparsed);
    }

    #[test]
    fn rejects_non_feature_collections() {
        let err = BoundaryFeature::from_geojson_str(r#"{"type": "Feature"}"#).unwrap_err();
        assert!(matches!(err, GeoJsonError::NotAFeatureCollection));

        let err = BoundaryFeature::from_geojson_str("[1, 2, 3]").unwrap_err();
        assert!(matches!(err, GeoJsonError::NotAFeatureCollection));
    }

    #[test]
    fn rejects_empty_collections_and_bad_geometry() {
        let err =
            BoundaryFeature::from_geojson_str(r#"{"type": "FeatureCollection", "features": []}"#)
                .unwrap_err();
        assert!(matches!(err, GeoJsonError::NoFeatures));

        let point = r#"{
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "properties": {"name": "Alaska"},
                "geometry": {"type": "Point", "coordinates": [-152.0, 64.0]}
            }]
        }"#;
        let err = BoundaryFeature::from_geojson_str(point).unwrap_err();
        assert!(matches!(err, GeoJsonError::InvalidFeature { .. }));
    }

    #[test]
    fn rejects_missing_name_property() {
        let unnamed = r#"{
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "properties": {},
                "geometry": {"type": "Polygon", "coordinates": [[[-179.0, 51.0]]]}
            }]
        }"#;
        let err = BoundaryFeature::from_geojson_str(unnamed).unwrap_err();
        assert!(matches!(err, GeoJsonError::InvalidFeature { .. }));
    }
}
