use crate::error::EmptyLayerError;
use crate::geom::LatLng;
use crate::layer::{Layer, Record, ZoneAttrs};

/// The zone whose centroid lies closest to a query point.
#[derive(Debug, Clone, Copy)]
pub struct Nearest<'a> {
    pub record: &'a Record<ZoneAttrs>,
    /// Position of `record` in the zone layer.
    pub index: usize,
    /// Planar distance to the centroid, in degrees.
    pub distance_degrees: f64,
    /// `distance_degrees * km_per_degree`. A coarse regional approximation,
    /// not a geodesic distance.
    pub distance_km: f64,
}

/// Pick the zone with the closest centroid in (lng, lat) degree space.
///
/// Ties keep the earliest record. Fails only when the layer is empty.
pub fn find_nearest<'a>(
    point: &LatLng,
    zones: &'a Layer<ZoneAttrs>,
    km_per_degree: f64,
) -> Result<Nearest<'a>, EmptyLayerError> {
    let (index, record, distance_degrees) = zones.iter().enumerate()
        .map(|(i, record)| (i, record, point.planar_distance(&record.shape().centroid())))
        .reduce(|best, next| if next.2 < best.2 { next } else { best })
        .ok_or(EmptyLayerError)?;

    Ok(Nearest { record, index, distance_degrees, distance_km: distance_degrees * km_per_degree })
}

#[cfg(test)]
mod tests {
    use geo::polygon;

    use super::*;
    use crate::config::DEFAULT_KM_PER_DEGREE;
    use crate::geom::Shape;

    fn zone(id: &str, x0: f64, y0: f64, x1: f64, y1: f64) -> Record<ZoneAttrs> {
        let shape = Shape::from_polygon(polygon![
            (x: x0, y: y0), (x: x1, y: y0), (x: x1, y: y1), (x: x0, y: y1)
        ]).unwrap();
        Record::new(shape, ZoneAttrs {
            zone_id: id.into(),
            zone_name: format!("Zone {id}"),
            region_name: None,
            created_by: None,
            status: None,
            basis_id: None,
        })
    }

    fn debrecen() -> Layer<ZoneAttrs> {
        Layer::from_records(vec![
            zone("A", 21.60, 47.50, 21.65, 47.55),
            zone("B", 21.65, 47.50, 21.70, 47.55),
        ], false)
    }

    #[test]
    fn picks_closest_centroid() {
        let layer = debrecen();
        let point = LatLng { lat: 47.53, lng: 21.80 };
        let nearest = find_nearest(&point, &layer, DEFAULT_KM_PER_DEGREE).unwrap();

        assert_eq!(nearest.record.attrs().zone_id, "B");
        assert_eq!(nearest.index, 1);
        // Centroid of B is (21.675, 47.525).
        let expected = (21.80_f64 - 21.675).hypot(47.53 - 47.525);
        assert!((nearest.distance_degrees - expected).abs() < 1e-12);
        assert!(nearest.distance_km > 0.0);
    }

    #[test]
    fn result_is_no_farther_than_any_other_centroid() {
        let layer = debrecen();
        for point in [
            LatLng { lat: 47.40, lng: 21.50 },
            LatLng { lat: 47.70, lng: 21.90 },
            LatLng { lat: 47.52, lng: 21.675 },
        ] {
            let nearest = find_nearest(&point, &layer, 1.0).unwrap();
            for record in &layer {
                assert!(nearest.distance_degrees <= point.planar_distance(&record.shape().centroid()));
            }
        }
    }

    #[test]
    fn tie_goes_to_earliest_record() {
        let layer = Layer::from_records(vec![
            zone("A", 0.0, 0.0, 1.0, 1.0),
            zone("B", 1.0, 0.0, 2.0, 1.0),
        ], false);
        // Equidistant from (0.5, 0.5) and (1.5, 0.5).
        let point = LatLng { lat: 3.0, lng: 1.0 };
        let nearest = find_nearest(&point, &layer, 1.0).unwrap();
        assert_eq!(nearest.record.attrs().zone_id, "A");
    }

    #[test]
    fn km_scales_linearly() {
        let layer = debrecen();
        let point = LatLng { lat: 47.53, lng: 21.80 };
        let one = find_nearest(&point, &layer, 1.0).unwrap();
        let reference = find_nearest(&point, &layer, DEFAULT_KM_PER_DEGREE).unwrap();
        assert!((reference.distance_km - one.distance_degrees * 85.0).abs() < 1e-12);
        assert_eq!(one.distance_km, one.distance_degrees);
    }

    #[test]
    fn empty_layer_is_an_error() {
        let layer: Layer<ZoneAttrs> = Layer::from_records(Vec::new(), false);
        let point = LatLng { lat: 47.53, lng: 21.80 };
        assert_eq!(find_nearest(&point, &layer, 85.0).unwrap_err(), EmptyLayerError);
    }
}
