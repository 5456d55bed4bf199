//! Store record types.

use np_core::StoreId;
use serde::{Deserialize, Serialize};

/// 1-based subnet identifier within one store.
pub type SubnetId = u32;

/// A persisted node: demand record or synthetic junction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: StoreId,
    pub x: f64,
    pub y: f64,
    /// True for synthetic junction nodes created during persistence.
    pub is_fake: bool,
    /// Demand budget. None for synthetic nodes (their budget is the infinite
    /// sentinel, which JSON cannot carry).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
}

/// A logical grouping of segments: one per surviving component, plus one for
/// the existing network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubnetRecord {
    pub id: SubnetId,
}

/// A segment endpoint. Demand-origin and synthetic nodes live in the store's
/// id space; existing-network nodes keep their native labels and are never
/// remapped into it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "ns", content = "id", rename_all = "lowercase")]
pub enum EndpointRef {
    Store(StoreId),
    Existing(String),
}

impl std::fmt::Display for EndpointRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EndpointRef::Store(id) => write!(f, "store:{id}"),
            EndpointRef::Existing(label) => write!(f, "existing:{label}"),
        }
    }
}

/// A persisted edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentRecord {
    pub subnet_id: SubnetId,
    pub a: EndpointRef,
    pub b: EndpointRef,
    pub weight: f64,
    pub is_existing: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreManifest {
    pub version: u32,
    pub created: String,
    pub demand_node_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_serialization_distinguishes_namespaces() {
        let store = EndpointRef::Store(StoreId::new(4).unwrap());
        let existing = EndpointRef::Existing("grid-17".into());

        let s = serde_json::to_string(&store).unwrap();
        let e = serde_json::to_string(&existing).unwrap();
        assert!(s.contains("\"store\""));
        assert!(e.contains("\"existing\""));

        assert_eq!(serde_json::from_str::<EndpointRef>(&s).unwrap(), store);
        assert_eq!(serde_json::from_str::<EndpointRef>(&e).unwrap(), existing);
    }

    #[test]
    fn synthetic_node_omits_budget() {
        let record = NodeRecord {
            id: StoreId::new(9).unwrap(),
            x: 1.0,
            y: 2.0,
            is_fake: true,
            budget: None,
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(!json.contains("budget"));
        let back: NodeRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
