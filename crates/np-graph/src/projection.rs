//! Spatial reference classification and distances.
//!
//! Demand node files usually carry no projection metadata, so the pipeline
//! guesses: coordinates whose magnitudes are consistent with degrees of
//! longitude/latitude are treated as geographic, anything else as planar.

use np_core::{PlanError, PlanResult, Real};

/// Spatial reference descriptor. One per graph; every coordinate in a graph is
/// expressed in the graph's declared reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Srs {
    /// Longitude/latitude degrees on WGS84.
    Wgs84Geographic,
    /// Planar meters (equal-area flat-earth default).
    FlatEarthPlanar,
}

impl Srs {
    /// proj4-style descriptor string.
    pub fn proj4(&self) -> &'static str {
        match self {
            Srs::Wgs84Geographic => "+proj=longlat +datum=WGS84 +units=degrees",
            Srs::FlatEarthPlanar => {
                "+proj=laea +lat_0=0 +lon_0=0 +x_0=0 +y_0=0 +ellps=WGS84 +datum=WGS84 +units=m"
            }
        }
    }

    /// Short name used in error messages and summaries.
    pub fn name(&self) -> &'static str {
        match self {
            Srs::Wgs84Geographic => "wgs84-geographic",
            Srs::FlatEarthPlanar => "flat-earth-planar",
        }
    }
}

/// True if every coordinate pair is plausibly (longitude, latitude) degrees.
pub fn is_lon_lat(coords: &[[Real; 2]]) -> bool {
    coords
        .iter()
        .all(|c| c[0].abs() <= 180.0 && c[1].abs() <= 90.0)
}

/// Classify a coordinate sequence as geographic or planar.
///
/// Fails with `InvalidInput` on an empty sequence; classification of nothing
/// is meaningless and almost certainly a caller bug.
pub fn resolve_srs(coords: &[[Real; 2]]) -> PlanResult<Srs> {
    if coords.is_empty() {
        return Err(PlanError::invalid_input(
            "projection resolver: empty coordinate sequence",
        ));
    }
    if is_lon_lat(coords) {
        Ok(Srs::Wgs84Geographic)
    } else {
        Ok(Srs::FlatEarthPlanar)
    }
}

/// Distance between two coordinates in the given reference: haversine meters
/// for geographic, euclidean for planar.
pub fn distance(srs: Srs, a: [Real; 2], b: [Real; 2]) -> Real {
    match srs {
        Srs::Wgs84Geographic => haversine_distance(a[1], a[0], b[1], b[0]),
        Srs::FlatEarthPlanar => {
            let dx = a[0] - b[0];
            let dy = a[1] - b[1];
            (dx * dx + dy * dy).sqrt()
        }
    }
}

/// Distance in meters between two lat/lon points
fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let r = 6371000.0; // Earth radius in meters
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    r * c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degrees_resolve_geographic() {
        let coords = [[-118.24, 34.05], [179.9, -89.9], [0.0, 0.0]];
        assert_eq!(resolve_srs(&coords).unwrap(), Srs::Wgs84Geographic);
    }

    #[test]
    fn out_of_range_resolves_planar() {
        let coords = [[523_401.0, 4_100_522.0], [523_880.0, 4_101_011.0]];
        assert_eq!(resolve_srs(&coords).unwrap(), Srs::FlatEarthPlanar);

        // One out-of-range pair is enough to rule out degrees
        let mixed = [[10.0, 20.0], [181.0, 0.0]];
        assert_eq!(resolve_srs(&mixed).unwrap(), Srs::FlatEarthPlanar);
    }

    #[test]
    fn empty_sequence_is_invalid_input() {
        let err = resolve_srs(&[]).unwrap_err();
        assert!(matches!(err, PlanError::InvalidInput { .. }));
    }

    #[test]
    fn haversine_la_to_nyc() {
        // LA to NYC, approx 3935 km
        let d = distance(Srs::Wgs84Geographic, [-118.2437, 34.0522], [-74.0060, 40.7128]);
        assert!(d > 3_930_000.0 && d < 3_950_000.0);

        // Same point
        assert_eq!(distance(Srs::Wgs84Geographic, [0.0, 0.0], [0.0, 0.0]), 0.0);
    }

    #[test]
    fn planar_is_euclidean() {
        let d = distance(Srs::FlatEarthPlanar, [0.0, 0.0], [3.0, 4.0]);
        assert!((d - 5.0).abs() < 1e-12);
    }
}
