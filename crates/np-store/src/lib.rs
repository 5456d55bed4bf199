//! np-store: persistent record store for planned topologies.
//!
//! A directory-backed store (manifest plus jsonl record files) holding node,
//! subnet, and segment records. Writes happen through scoped transactions:
//! one per logical unit of work (a subnet), committed atomically, so a
//! failure mid-subnet never leaves a half-written subnet visible.

pub mod convert;
pub mod error;
pub mod export;
pub mod store;
pub mod types;

pub use convert::store_to_graph;
pub use error::{StoreError, StoreResult};
pub use export::save_segments_csv;
pub use store::{DatasetStore, Transaction};
pub use types::{EndpointRef, NodeRecord, SegmentRecord, StoreManifest, SubnetId, SubnetRecord};
