//! Integration tests for np-graph.

use np_graph::{SpatialGraphBuilder, Srs, merge_networks, resolve_srs};
use proptest::prelude::*;

proptest! {
    /// For any demand-node set and any existing network, merged ids from the
    /// two namespaces never collide.
    #[test]
    fn merged_namespaces_are_disjoint(
        demand_coords in prop::collection::vec((-500.0f64..500.0, -500.0f64..500.0), 1..40),
        existing_coords in prop::collection::vec((-500.0f64..500.0, -500.0f64..500.0), 0..40),
    ) {
        let mut b = SpatialGraphBuilder::new(Srs::FlatEarthPlanar);
        for (x, y) in &demand_coords {
            b.add_node([*x, *y], 1.0);
        }
        let demand = b.build().unwrap();

        let mut b = SpatialGraphBuilder::new(Srs::FlatEarthPlanar);
        for (x, y) in &existing_coords {
            b.add_node([*x, *y], np_core::SYNTHETIC_BUDGET);
        }
        let existing = b.build().unwrap();

        let outcome = merge_networks(&demand, Some(&existing)).unwrap();

        prop_assert_eq!(
            outcome.graph.node_count(),
            demand_coords.len() + existing_coords.len()
        );

        let demand_ids: std::collections::BTreeSet<_> = outcome
            .origins
            .iter()
            .filter(|(_, o)| !o.is_existing())
            .map(|(id, _)| *id)
            .collect();
        let existing_ids: std::collections::BTreeSet<_> = outcome
            .origins
            .iter()
            .filter(|(_, o)| o.is_existing())
            .map(|(id, _)| *id)
            .collect();

        prop_assert_eq!(demand_ids.len(), demand_coords.len());
        prop_assert_eq!(existing_ids.len(), existing_coords.len());
        prop_assert!(demand_ids.intersection(&existing_ids).next().is_none());
    }

    /// Coordinates that fit in degree ranges resolve geographic; any
    /// out-of-range coordinate forces planar.
    #[test]
    fn resolver_classifies_by_degree_range(
        coords in prop::collection::vec((-180.0f64..=180.0, -90.0f64..=90.0), 1..50),
    ) {
        let as_arrays: Vec<[f64; 2]> = coords.iter().map(|(x, y)| [*x, *y]).collect();
        prop_assert_eq!(resolve_srs(&as_arrays).unwrap(), Srs::Wgs84Geographic);

        let mut pushed = as_arrays.clone();
        pushed.push([250_000.0, 4_000_000.0]);
        prop_assert_eq!(resolve_srs(&pushed).unwrap(), Srs::FlatEarthPlanar);
    }
}
