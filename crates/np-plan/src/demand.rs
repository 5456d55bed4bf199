//! Demand node loading and graph construction.

use std::path::Path;

use np_core::{PlanError, PlanResult};
use np_graph::{SpatialGraph, SpatialGraphBuilder, Srs, resolve_srs};
use serde::Deserialize;

/// One demand record: a coordinate pair and an already-computed budget.
/// Metric/demand modeling happens upstream; budgets arrive final.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct DemandRecord {
    pub x: f64,
    pub y: f64,
    pub budget: f64,
}

/// Read demand records from a CSV file with `x,y,budget` columns.
pub fn read_demand_csv(path: &Path) -> PlanResult<Vec<DemandRecord>> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| PlanError::InvalidInput {
        what: format!("demand nodes file {}: {e}", path.display()),
    })?;
    let mut records = Vec::new();
    for result in reader.deserialize() {
        let record: DemandRecord = result.map_err(|e| PlanError::InvalidInput {
            what: format!("demand nodes file {}: {e}", path.display()),
        })?;
        records.push(record);
    }
    if records.is_empty() {
        return Err(PlanError::invalid_input(format!(
            "demand nodes file {} contains no records",
            path.display()
        )));
    }
    Ok(records)
}

/// Build the demand graph: 0-based ids in record order, projection resolved
/// from the coordinates themselves (the store numbers the same records
/// 1-based; realignment restores that at the end of the pipeline).
pub fn build_demand_graph(records: &[DemandRecord]) -> PlanResult<(SpatialGraph, Srs)> {
    let coords: Vec<[f64; 2]> = records.iter().map(|r| [r.x, r.y]).collect();
    let srs = resolve_srs(&coords)?;

    let mut builder = SpatialGraphBuilder::new(srs);
    for record in records {
        builder.add_node([record.x, record.y], record.budget);
    }
    let graph = builder.build()?;
    Ok((graph, srs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use np_core::NodeId;

    #[test]
    fn reads_csv_and_builds_zero_based_graph() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("demand.csv");
        std::fs::write(&path, "x,y,budget\n0.5,0.5,10\n1.5,0.5,20\n2.5,0.5,0\n").unwrap();

        let records = read_demand_csv(&path).unwrap();
        assert_eq!(records.len(), 3);

        let (graph, srs) = build_demand_graph(&records).unwrap();
        assert_eq!(srs, Srs::Wgs84Geographic);
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.budget(NodeId::from_index(1)), Some(20.0));
        assert_eq!(graph.coord(NodeId::from_index(2)), Some([2.5, 0.5]));
    }

    #[test]
    fn planar_coordinates_resolve_planar() {
        let records = vec![
            DemandRecord {
                x: 500_000.0,
                y: 4_000_000.0,
                budget: 1.0,
            },
            DemandRecord {
                x: 500_100.0,
                y: 4_000_100.0,
                budget: 2.0,
            },
        ];
        let (_, srs) = build_demand_graph(&records).unwrap();
        assert_eq!(srs, Srs::FlatEarthPlanar);
    }

    #[test]
    fn empty_file_is_invalid_input() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        std::fs::write(&path, "x,y,budget\n").unwrap();
        let err = read_demand_csv(&path).unwrap_err();
        assert!(matches!(err, PlanError::InvalidInput { .. }));
    }

    #[test]
    fn malformed_row_is_invalid_input() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        std::fs::write(&path, "x,y,budget\n1.0,2.0,not-a-number\n").unwrap();
        assert!(matches!(
            read_demand_csv(&path),
            Err(PlanError::InvalidInput { .. })
        ));
    }
}
