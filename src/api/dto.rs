//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::chart::{field_options, FieldOption};
use crate::dataset::{DatasetDefaults, DatasetEntry};
use crate::explore::{ExploreState, Node, NodeValue, Session, Update};

// ============================================
// DATASET DTOs
// ============================================

/// Summary of one loaded dataset
#[derive(Debug, Serialize)]
pub struct DatasetSummary {
    pub name: String,
    pub rows: usize,
    pub label_field: String,
    pub fields: Vec<FieldOption>,
    pub defaults: DatasetDefaults,
}

impl From<&DatasetEntry> for DatasetSummary {
    fn from(entry: &DatasetEntry) -> Self {
        Self {
            name: entry.dataset.name().to_string(),
            rows: entry.dataset.row_count(),
            label_field: entry.label_field.clone(),
            fields: field_options(entry.dataset.fields()),
            defaults: entry.defaults.clone(),
        }
    }
}

/// Dataset list response
#[derive(Debug, Serialize)]
pub struct DatasetListResponse {
    pub total: usize,
    pub datasets: Vec<DatasetSummary>,
}

// ============================================
// SESSION DTOs
// ============================================

/// Create session request
#[derive(Debug, Default, Deserialize)]
pub struct CreateSessionRequest {
    /// Initial dataset; the first dataset when omitted
    #[serde(default)]
    pub dataset: Option<String>,
}

/// Full explore view of a session
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session_id: String,
    pub created_at: DateTime<Utc>,
    /// Options for the dataset dropdown
    pub datasets: Vec<String>,
    pub view: ExploreState,
}

impl SessionResponse {
    pub fn new(session: &Session, datasets: Vec<String>) -> Self {
        Self {
            session_id: session.id.clone(),
            created_at: session.created_at,
            datasets,
            view: session.state.clone(),
        }
    }
}

/// Result of applying one input change
#[derive(Debug, Serialize)]
pub struct UpdateResponse {
    pub session_id: String,
    /// Derived nodes recomputed, in traversal order
    pub recomputed: Vec<Node>,
    /// New values of every node that changed
    pub outputs: BTreeMap<Node, NodeValue>,
}

impl UpdateResponse {
    pub fn new(session_id: &str, update: Update, state: &ExploreState) -> Self {
        let outputs = update
            .changed
            .iter()
            .map(|&node| (node, state.value(node)))
            .collect();
        Self {
            session_id: session_id.to_string(),
            recomputed: update.recomputed,
            outputs,
        }
    }
}

// ============================================
// HEALTH DTOs
// ============================================

/// Full health status
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub datasets: usize,
    pub sessions: usize,
    pub uptime_seconds: u64,
    pub version: String,
}
