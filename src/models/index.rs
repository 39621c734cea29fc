//! Dataset index and heuristic score documents.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Heuristic id -> score, for one instance.
pub type HeuristicScoreMap = HashMap<String, f64>;

/// Instance id -> heuristic scores.
pub type InstanceHeuristicMap = HashMap<String, HeuristicScoreMap>;

/// Response of `GET /index`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DatasetIndex {
    /// Checksum of the dataset the server has loaded
    pub checksum: String,
    /// Every instance id, in server order
    pub instances: Vec<String>,
    /// Every heuristic id
    pub heuristics: Vec<String>,
}

/// Ordering applied when listing instances by a heuristic score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Keep index order
    #[default]
    None,
    Asc,
    Desc,
}
