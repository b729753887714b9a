//! Execution result types
//!
//! This module defines the data structures for representing operation
//! results:
//! - ExecutionResult: Overall result of an operation
//! - ResultData: Various types of data that can be returned
//! - ExecutionStats: Statistics about the execution

use mongodb::bson::{Bson, Document};

/// Result of operation execution
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    /// Success status
    pub success: bool,

    /// Result data (documents, counts, etc.)
    pub data: ResultData,

    /// Execution statistics
    pub stats: ExecutionStats,
}

/// Data returned from operation execution
#[derive(Debug, Clone)]
pub enum ResultData {
    /// Single document
    Document(Document),

    /// List of documents
    Documents(Vec<Document>),

    /// Distinct field values
    Values(Vec<Bson>),

    /// Insert result
    InsertOne { inserted_id: String },

    /// Update result
    Update { matched: u64, modified: u64 },

    /// Update result plus the re-fetched document
    UpdateAndFetch {
        matched: u64,
        modified: u64,
        document: Document,
    },

    /// No data (e.g. single-record fetch found nothing)
    None,
}

/// Execution statistics
#[derive(Debug, Clone, Default)]
pub struct ExecutionStats {
    /// Execution time in milliseconds
    pub execution_time_ms: u64,

    /// Number of documents returned
    pub documents_returned: usize,

    /// Number of documents affected
    pub documents_affected: Option<u64>,
}

impl ExecutionResult {
    /// Create a successful result
    pub fn success(data: ResultData, stats: ExecutionStats) -> Self {
        Self {
            success: true,
            data,
            stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    #[test]
    fn test_success_result() {
        let result = ExecutionResult::success(
            ResultData::Document(doc! { "city": "LOST PUNKS" }),
            ExecutionStats {
                execution_time_ms: 0,
                documents_returned: 1,
                documents_affected: None,
            },
        );
        assert!(result.success);
        assert_eq!(result.stats.documents_returned, 1);
    }
}
