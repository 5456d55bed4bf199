use core::fmt;
use core::num::NonZeroU32;

/// Compact, stable identifier for nodes of an in-memory spatial graph.
///
/// - `u32` keeps memory small
/// - `NonZero` enables `Option<NodeId>` to be pointer-optimized
///
/// Graph ids are 0-based; the persistent store uses the 1-based [`StoreId`]
/// space. The two are realigned explicitly at the end of the pipeline.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(NonZeroU32);

impl NodeId {
    /// Create a NodeId from a 0-based index by storing index+1.
    pub fn from_index(index: u32) -> Self {
        // index+1 must be nonzero
        Self(NonZeroU32::new(index + 1).expect("index+1 is nonzero"))
    }

    /// Recover the 0-based index.
    pub fn index(self) -> u32 {
        self.0.get() - 1
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.index())
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

/// 1-based identifier in the persistent store's id space.
///
/// Demand records are numbered 1..=n by the store; graph id `i` realigns to
/// store id `i + 1`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct StoreId(NonZeroU32);

impl StoreId {
    /// Wrap a raw 1-based id. Returns None for 0.
    pub fn new(raw: u32) -> Option<Self> {
        NonZeroU32::new(raw).map(Self)
    }

    /// Realign a 0-based graph id into the store space (i -> i+1).
    pub fn from_node(node: NodeId) -> Self {
        Self(NonZeroU32::new(node.index() + 1).expect("index+1 is nonzero"))
    }

    /// The raw 1-based id.
    pub fn get(self) -> u32 {
        self.0.get()
    }

    /// Recover the 0-based graph id this store id realigns from.
    pub fn to_node(self) -> NodeId {
        NodeId::from_index(self.0.get() - 1)
    }
}

impl fmt::Debug for StoreId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StoreId({})", self.get())
    }
}

impl fmt::Display for StoreId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// A graph id tagged with its origin, used only while merging an existing
/// network with demand nodes so the two id spaces cannot collide.
///
/// Collapsed back to plain [`NodeId`]s as soon as the merge completes; the tag
/// never reaches persistence logic.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub enum NamespacedId {
    /// 0-based demand-graph id, pre-realignment.
    Demand(NodeId),
    /// Id within the namespaced existing-network graph.
    Existing(NodeId),
}

impl NamespacedId {
    pub fn node(self) -> NodeId {
        match self {
            NamespacedId::Demand(n) | NamespacedId::Existing(n) => n,
        }
    }

    pub fn is_existing(self) -> bool {
        matches!(self, NamespacedId::Existing(_))
    }
}

impl fmt::Display for NamespacedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NamespacedId::Demand(n) => write!(f, "demand:{}", n),
            NamespacedId::Existing(n) => write!(f, "existing:{}", n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_id_round_trip_index() {
        for i in [0_u32, 1, 2, 42, 10_000] {
            let id = NodeId::from_index(i);
            assert_eq!(id.index(), i);
        }
    }

    #[test]
    fn option_id_is_small() {
        // This is a classic reason for NonZero: Option<NodeId> can be same size as NodeId.
        assert_eq!(
            core::mem::size_of::<NodeId>(),
            core::mem::size_of::<Option<NodeId>>()
        );
    }

    #[test]
    fn store_id_realignment_round_trip() {
        for i in [0_u32, 1, 7, 999] {
            let node = NodeId::from_index(i);
            let store = StoreId::from_node(node);
            assert_eq!(store.get(), i + 1);
            assert_eq!(store.to_node(), node);
        }
    }

    #[test]
    fn store_id_rejects_zero() {
        assert!(StoreId::new(0).is_none());
        assert_eq!(StoreId::new(1).map(StoreId::get), Some(1));
    }

    #[test]
    fn namespaced_display_distinguishes_origin() {
        let d = NamespacedId::Demand(NodeId::from_index(3));
        let e = NamespacedId::Existing(NodeId::from_index(3));
        assert_ne!(d, e);
        assert_eq!(format!("{d}"), "demand:3");
        assert_eq!(format!("{e}"), "existing:3");
        assert!(e.is_existing());
        assert!(!d.is_existing());
    }
}
