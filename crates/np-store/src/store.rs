//! Dataset store and scoped transactions.

use std::collections::BTreeSet;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use np_core::StoreId;

use crate::error::{StoreError, StoreResult};
use crate::types::{EndpointRef, NodeRecord, SegmentRecord, StoreManifest, SubnetId, SubnetRecord};

const MANIFEST_FILE: &str = "manifest.json";
const NODES_FILE: &str = "nodes.jsonl";
const SUBNETS_FILE: &str = "subnets.jsonl";
const SEGMENTS_FILE: &str = "segments.jsonl";
const STORE_VERSION: u32 = 1;

/// Directory-backed store of node/subnet/segment records.
///
/// Demand nodes are numbered 1..=n at creation time, in record order. All
/// later writes go through [`Transaction`]s; a transaction dropped without
/// commit leaves no trace in memory or on disk.
#[derive(Debug)]
pub struct DatasetStore {
    root_dir: PathBuf,
    nodes: Vec<NodeRecord>,
    subnets: Vec<SubnetRecord>,
    segments: Vec<SegmentRecord>,
    used_node_ids: BTreeSet<u32>,
    next_node_id: u32,
    next_subnet_id: SubnetId,
}

impl DatasetStore {
    /// Create a new store directory seeded with the demand nodes
    /// (coordinate, budget) in order; they receive ids 1..=n.
    pub fn create(root_dir: &Path, demand: &[([f64; 2], f64)]) -> StoreResult<Self> {
        fs::create_dir_all(root_dir)?;

        let nodes: Vec<NodeRecord> = demand
            .iter()
            .enumerate()
            .map(|(i, (coord, budget))| NodeRecord {
                id: StoreId::new(i as u32 + 1).expect("1-based id is nonzero"),
                x: coord[0],
                y: coord[1],
                is_fake: false,
                budget: Some(*budget),
            })
            .collect();

        let manifest = StoreManifest {
            version: STORE_VERSION,
            created: chrono::Utc::now().to_rfc3339(),
            demand_node_count: nodes.len(),
        };
        fs::write(
            root_dir.join(MANIFEST_FILE),
            serde_json::to_string_pretty(&manifest)?,
        )?;

        let mut node_lines = String::new();
        for node in &nodes {
            node_lines.push_str(&serde_json::to_string(node)?);
            node_lines.push('\n');
        }
        fs::write(root_dir.join(NODES_FILE), node_lines)?;
        fs::write(root_dir.join(SUBNETS_FILE), "")?;
        fs::write(root_dir.join(SEGMENTS_FILE), "")?;

        let used_node_ids: BTreeSet<u32> = nodes.iter().map(|n| n.id.get()).collect();
        let next_node_id = nodes.len() as u32 + 1;
        Ok(Self {
            root_dir: root_dir.to_path_buf(),
            nodes,
            subnets: Vec::new(),
            segments: Vec::new(),
            used_node_ids,
            next_node_id,
            next_subnet_id: 1,
        })
    }

    /// Open an existing store directory and read all records back.
    pub fn open(root_dir: &Path) -> StoreResult<Self> {
        let manifest_path = root_dir.join(MANIFEST_FILE);
        if !manifest_path.exists() {
            return Err(StoreError::NotFound {
                path: root_dir.display().to_string(),
            });
        }
        let _manifest: StoreManifest = serde_json::from_str(&fs::read_to_string(manifest_path)?)?;

        let nodes: Vec<NodeRecord> = read_jsonl(&root_dir.join(NODES_FILE))?;
        let subnets: Vec<SubnetRecord> = read_jsonl(&root_dir.join(SUBNETS_FILE))?;
        let segments: Vec<SegmentRecord> = read_jsonl(&root_dir.join(SEGMENTS_FILE))?;

        let used_node_ids: BTreeSet<u32> = nodes.iter().map(|n| n.id.get()).collect();
        let next_node_id = used_node_ids.iter().max().copied().unwrap_or(0) + 1;
        let next_subnet_id = subnets.iter().map(|s| s.id).max().unwrap_or(0) + 1;
        Ok(Self {
            root_dir: root_dir.to_path_buf(),
            nodes,
            subnets,
            segments,
            used_node_ids,
            next_node_id,
            next_subnet_id,
        })
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    /// Begin a scoped transaction. Dropped without commit, it discards
    /// everything staged.
    pub fn begin(&mut self) -> Transaction<'_> {
        let next_node_id = self.next_node_id;
        let next_subnet_id = self.next_subnet_id;
        Transaction {
            store: self,
            nodes: Vec::new(),
            subnets: Vec::new(),
            segments: Vec::new(),
            staged_node_ids: BTreeSet::new(),
            next_node_id,
            next_subnet_id,
        }
    }

    /// Iterate node records, optionally including synthetic ones.
    pub fn iter_nodes(&self, include_fake: bool) -> impl Iterator<Item = &NodeRecord> {
        self.nodes
            .iter()
            .filter(move |n| include_fake || !n.is_fake)
    }

    /// Iterate segments, optionally restricted to existing/proposed.
    pub fn iter_segments(&self, is_existing: Option<bool>) -> impl Iterator<Item = &SegmentRecord> {
        self.segments
            .iter()
            .filter(move |s| is_existing.is_none_or(|want| s.is_existing == want))
    }

    pub fn subnets(&self) -> &[SubnetRecord] {
        &self.subnets
    }

    pub fn node(&self, id: StoreId) -> Option<&NodeRecord> {
        self.nodes.iter().find(|n| n.id == id)
    }

    fn append_records(&mut self, txn_output: TxnRecords) -> StoreResult<()> {
        // Serialize everything up front so a serde failure writes nothing.
        let node_lines = to_jsonl(&txn_output.nodes)?;
        let subnet_lines = to_jsonl(&txn_output.subnets)?;
        let segment_lines = to_jsonl(&txn_output.segments)?;

        append_file(&self.root_dir.join(NODES_FILE), &node_lines)?;
        append_file(&self.root_dir.join(SUBNETS_FILE), &subnet_lines)?;
        append_file(&self.root_dir.join(SEGMENTS_FILE), &segment_lines)?;

        for node in &txn_output.nodes {
            self.used_node_ids.insert(node.id.get());
        }
        self.nodes.extend(txn_output.nodes);
        self.subnets.extend(txn_output.subnets);
        self.segments.extend(txn_output.segments);
        self.next_node_id = self.used_node_ids.iter().max().copied().unwrap_or(0) + 1;
        self.next_subnet_id = self.subnets.iter().map(|s| s.id).max().unwrap_or(0) + 1;
        Ok(())
    }
}

struct TxnRecords {
    nodes: Vec<NodeRecord>,
    subnets: Vec<SubnetRecord>,
    segments: Vec<SegmentRecord>,
}

/// A scoped unit of store work: stage records, then commit them atomically
/// (from the caller's perspective) or drop them.
pub struct Transaction<'a> {
    store: &'a mut DatasetStore,
    nodes: Vec<NodeRecord>,
    subnets: Vec<SubnetRecord>,
    segments: Vec<SegmentRecord>,
    staged_node_ids: BTreeSet<u32>,
    next_node_id: u32,
    next_subnet_id: SubnetId,
}

impl Transaction<'_> {
    /// Stage a new subnet and return its id.
    pub fn new_subnet(&mut self) -> SubnetId {
        let id = self.next_subnet_id;
        self.next_subnet_id += 1;
        self.subnets.push(SubnetRecord { id });
        id
    }

    /// Stage a node with the next free store id.
    pub fn add_node(&mut self, coord: [f64; 2], is_fake: bool) -> NodeRecord {
        while self.id_in_use(self.next_node_id) {
            self.next_node_id += 1;
        }
        let id = StoreId::new(self.next_node_id).expect("next id is nonzero");
        self.next_node_id += 1;
        self.stage_node(id, coord, is_fake)
    }

    /// Stage a node under a caller-chosen id (synthetic junctions keep the
    /// identifier used in the graph). Fails on collision.
    pub fn add_node_with_id(
        &mut self,
        id: StoreId,
        coord: [f64; 2],
        is_fake: bool,
    ) -> StoreResult<NodeRecord> {
        if self.id_in_use(id.get()) {
            return Err(StoreError::DuplicateNode { id: id.get() });
        }
        Ok(self.stage_node(id, coord, is_fake))
    }

    /// Stage a segment.
    pub fn add_segment(
        &mut self,
        subnet_id: SubnetId,
        a: EndpointRef,
        b: EndpointRef,
        weight: f64,
        is_existing: bool,
    ) {
        self.segments.push(SegmentRecord {
            subnet_id,
            a,
            b,
            weight,
            is_existing,
        });
    }

    /// Write all staged records to disk and publish them in memory.
    pub fn commit(self) -> StoreResult<()> {
        self.store.append_records(TxnRecords {
            nodes: self.nodes,
            subnets: self.subnets,
            segments: self.segments,
        })
    }

    fn id_in_use(&self, raw: u32) -> bool {
        self.store.used_node_ids.contains(&raw) || self.staged_node_ids.contains(&raw)
    }

    fn stage_node(&mut self, id: StoreId, coord: [f64; 2], is_fake: bool) -> NodeRecord {
        let record = NodeRecord {
            id,
            x: coord[0],
            y: coord[1],
            is_fake,
            budget: None,
        };
        self.staged_node_ids.insert(id.get());
        self.nodes.push(record.clone());
        record
    }
}

fn to_jsonl<T: serde::Serialize>(records: &[T]) -> StoreResult<String> {
    let mut out = String::new();
    for record in records {
        out.push_str(&serde_json::to_string(record)?);
        out.push('\n');
    }
    Ok(out)
}

fn append_file(path: &Path, content: &str) -> StoreResult<()> {
    if content.is_empty() {
        return Ok(());
    }
    let mut file = fs::OpenOptions::new().append(true).create(true).open(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}

fn read_jsonl<T: serde::de::DeserializeOwned>(path: &Path) -> StoreResult<Vec<T>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let content = fs::read_to_string(path)?;
    let mut records = Vec::new();
    for line in content.lines() {
        if !line.trim().is_empty() {
            records.push(serde_json::from_str(line)?);
        }
    }
    Ok(records)
}
