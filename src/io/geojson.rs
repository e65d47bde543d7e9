use geo::{Coord, LineString, MultiPolygon, Polygon};
use serde_json::Value;

use crate::error::DataError;
use crate::layer::{Properties, RawRecord};

/// Read a GeoJSON FeatureCollection from bytes.
pub fn read_records_from_slice(bytes: &[u8]) -> Result<Vec<RawRecord>, DataError> {
    let value: Value = serde_json::from_slice(bytes)?;
    read_records(&value)
}

/// Convert a parsed FeatureCollection into raw records, in feature order.
/// Features must carry `Polygon` or `MultiPolygon` geometry with `[lng, lat]`
/// positions; null properties become an empty map.
pub fn read_records(value: &Value) -> Result<Vec<RawRecord>, DataError> {
    if value["type"].as_str() != Some("FeatureCollection") {
        return Err(DataError::NotAFeatureCollection);
    }
    let features = value["features"].as_array()
        .ok_or(DataError::NotAFeatureCollection)?;

    features.iter().enumerate()
        .map(|(index, feature)| read_feature(index, feature))
        .collect()
}

fn read_feature(index: usize, feature: &Value) -> Result<RawRecord, DataError> {
    let malformed = |reason: &str| DataError::MalformedCoordinates { index, reason: reason.to_string() };

    let geometry = &feature["geometry"];
    let kind = match geometry["type"].as_str() {
        Some(kind) => kind,
        None if geometry.is_null() => return Err(DataError::UnsupportedGeometry { index, kind: "null".into() }),
        None => return Err(malformed("geometry has no type")),
    };
    let coords = geometry["coordinates"].as_array()
        .ok_or_else(|| malformed("missing coordinates array"))?;

    let geometry = match kind {
        "Polygon" => MultiPolygon(vec![parse_polygon(coords).map_err(|r| malformed(&r))?]),
        "MultiPolygon" => MultiPolygon(
            coords.iter()
                .map(|polygon| polygon.as_array()
                    .ok_or_else(|| "polygon is not an array".to_string())
                    .and_then(|rings| parse_polygon(rings)))
                .collect::<Result<Vec<_>, _>>()
                .map_err(|r| malformed(&r))?
        ),
        other => return Err(DataError::UnsupportedGeometry { index, kind: other.to_string() }),
    };

    let properties = match &feature["properties"] {
        Value::Object(map) => map.clone(),
        Value::Null => Properties::new(),
        _ => return Err(DataError::InvalidAttribute {
            attribute: "properties",
            reason: format!("feature {index}: properties must be an object"),
        }),
    };

    Ok(RawRecord { geometry, properties })
}

/// Parse `[exterior, hole, hole, ...]`.
fn parse_polygon(rings: &[Value]) -> Result<Polygon<f64>, String> {
    let mut rings = rings.iter().map(|ring| {
        ring.as_array()
            .ok_or_else(|| "ring is not an array".to_string())
            .and_then(|positions| parse_ring(positions))
    });
    let exterior = rings.next().ok_or_else(|| "polygon has no exterior ring".to_string())??;
    let interiors = rings.collect::<Result<Vec<_>, _>>()?;
    Ok(Polygon::new(exterior, interiors))
}

/// Parse `[[x, y], [x, y], ...]`, closing the ring if needed.
fn parse_ring(positions: &[Value]) -> Result<LineString<f64>, String> {
    let mut points = positions.iter()
        .map(|position| match position.as_array().map(Vec::as_slice) {
            Some([x, y, ..]) => match (x.as_f64(), y.as_f64()) {
                (Some(x), Some(y)) => Ok(Coord { x, y }),
                _ => Err("position values must be numbers".to_string()),
            },
            _ => Err("position must have at least two values".to_string()),
        })
        .collect::<Result<Vec<_>, _>>()?;

    // Ensure ring is closed (first point == last point)
    if let (Some(&first), Some(&last)) = (points.first(), points.last()) {
        if first != last { points.push(first) }
    }

    Ok(LineString(points))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn reads_polygon_and_multipolygon_features() {
        let value = json!({
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "geometry": { "type": "Polygon", "coordinates": [
                        [[21.60, 47.50], [21.65, 47.50], [21.65, 47.55], [21.60, 47.55], [21.60, 47.50]]
                    ]},
                    "properties": { "zone_id": "A", "zone_name": "Zone A" }
                },
                {
                    "type": "Feature",
                    "geometry": { "type": "MultiPolygon", "coordinates": [
                        [[[0, 0], [1, 0], [1, 1]]],
                        [[[5, 5], [6, 5], [6, 6]]]
                    ]},
                    "properties": null
                }
            ]
        });
        let records = read_records(&value).unwrap();
        assert_eq!(records.len(), 2);

        assert_eq!(records[0].geometry.0.len(), 1);
        assert_eq!(records[0].geometry.0[0].exterior().0.len(), 5);
        assert_eq!(records[0].properties["zone_id"], json!("A"));

        assert_eq!(records[1].geometry.0.len(), 2);
        assert!(records[1].properties.is_empty());
    }

    #[test]
    fn closes_open_rings_and_keeps_holes() {
        let value = json!({
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "geometry": { "type": "Polygon", "coordinates": [
                    [[0, 0], [4, 0], [4, 4], [0, 4]],
                    [[1, 1], [3, 1], [3, 3], [1, 3]]
                ]},
                "properties": {}
            }]
        });
        let records = read_records(&value).unwrap();
        let polygon = &records[0].geometry.0[0];
        assert!(polygon.exterior().is_closed());
        assert_eq!(polygon.exterior().0.len(), 5);
        assert_eq!(polygon.interiors().len(), 1);
    }

    #[test]
    fn rejects_other_geometry_types() {
        let value = json!({
            "type": "FeatureCollection",
            "features": [{ "type": "Feature", "geometry": { "type": "Point", "coordinates": [1, 2] }, "properties": {} }]
        });
        assert!(matches!(
            read_records(&value),
            Err(DataError::UnsupportedGeometry { index: 0, ref kind }) if kind == "Point"
        ));
    }

    #[test]
    fn rejects_malformed_positions() {
        let value = json!({
            "type": "FeatureCollection",
            "features": [{ "type": "Feature", "geometry": { "type": "Polygon", "coordinates": [[[0, 0], [1], [1, 1]]] } }]
        });
        assert!(matches!(read_records(&value), Err(DataError::MalformedCoordinates { index: 0, .. })));
    }

    #[test]
    fn rejects_non_collections() {
        assert!(matches!(read_records(&json!({ "type": "Feature" })), Err(DataError::NotAFeatureCollection)));
        assert!(matches!(read_records_from_slice(b"{ nope"), Err(DataError::Json(_))));
    }
}
