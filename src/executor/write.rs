//! Write operations
//!
//! This module contains the three write operations:
//! - updateOne with $inc, followed by a read-back (operation 3)
//! - insertOne of a city record with a random population (operation 5)
//! - updateOne by _id with $set (operation 6)
//!
//! All three rely on the server's single-document atomicity; there is no
//! idempotence guarantee and no optimistic concurrency.

use mongodb::bson::oid::ObjectId;
use mongodb::bson::{Document, doc};
use rand::Rng;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{ExecutionError, Result};

use super::result::{ExecutionResult, ExecutionStats, ResultData};
use super::target;

/// Record inserted by operation 5.
///
/// Field names match what the zips collection already holds, so the
/// inserted document is indistinguishable in shape from the sample data.
#[derive(Debug, Clone, Serialize)]
pub(super) struct CityRecord {
    pub city: String,
    pub loc: GeoPoint,
    pub pop: i32,
    pub state: String,
    pub zip: String,
}

/// Flat x/y coordinate pair used by the zips collection.
#[derive(Debug, Clone, Copy, Serialize)]
pub(super) struct GeoPoint {
    pub x: f32,
    pub y: f32,
}

impl CityRecord {
    /// The hardcoded record, parameterized only by population.
    pub fn sample(pop: i32) -> Self {
        Self {
            city: target::CITY_NAME.to_string(),
            loc: GeoPoint { x: 1.0, y: 2.0 },
            pop,
            state: "CA".to_string(),
            zip: "90210".to_string(),
        }
    }
}

/// Filter selecting the city targeted by the increment operation.
pub(super) fn city_filter() -> Document {
    doc! { "city": target::CITY_NAME }
}

/// Update document adding one to the population.
pub(super) fn increment_update() -> Document {
    doc! { "$inc": { "pop": 1 } }
}

/// Update document resetting the population to the fixed value.
pub(super) fn reset_update() -> Document {
    doc! { "$set": { "pop": target::RESET_POPULATION } }
}

impl super::OperationExecutor {
    /// Increment the target city's population by one, then re-read and
    /// return the document alongside the matched/modified counts.
    pub(super) async fn bump_population(&self) -> Result<ExecutionResult> {
        debug!(
            "Executing updateOne ($inc pop) on '{}.{}' for city {:?}",
            target::TRAINING_DB,
            target::ZIPS,
            target::CITY_NAME
        );

        let coll = self.zips();
        let update_result = coll.update_one(city_filter(), increment_update()).await?;

        info!(
            "Matched {} documents and updated {} documents",
            update_result.matched_count, update_result.modified_count
        );

        let data = match coll.find_one(city_filter()).await? {
            Some(document) => ResultData::UpdateAndFetch {
                matched: update_result.matched_count,
                modified: update_result.modified_count,
                document,
            },
            None => {
                warn!("No document to re-read for city {:?}", target::CITY_NAME);
                ResultData::Update {
                    matched: update_result.matched_count,
                    modified: update_result.modified_count,
                }
            }
        };

        let returned = matches!(data, ResultData::UpdateAndFetch { .. }) as usize;
        Ok(ExecutionResult::success(
            data,
            ExecutionStats {
                execution_time_ms: 0,
                documents_returned: returned,
                documents_affected: Some(update_result.modified_count),
            },
        ))
    }

    /// Insert the hardcoded city record with a freshly drawn population.
    pub(super) async fn insert_city(&self) -> Result<ExecutionResult> {
        let pop = rand::thread_rng().gen_range(0..100);
        info!("Inserting population {}", pop);

        let record = CityRecord::sample(pop);
        let document = mongodb::bson::to_document(&record)
            .map_err(|e| ExecutionError::InvalidDocument(e.to_string()))?;

        let result = self.zips().insert_one(document).await?;
        let inserted_id = result.inserted_id.to_string();

        Ok(ExecutionResult::success(
            ResultData::InsertOne { inserted_id },
            ExecutionStats {
                execution_time_ms: 0,
                documents_returned: 0,
                documents_affected: Some(1),
            },
        ))
    }

    /// Reset the population of the record with the hardcoded object id.
    pub(super) async fn reset_population(&self) -> Result<ExecutionResult> {
        let id = ObjectId::parse_str(target::RESET_DOCUMENT_ID)
            .map_err(|e| ExecutionError::InvalidDocument(e.to_string()))?;

        debug!(
            "Executing updateOne ($set pop) on '{}.{}' for _id {}",
            target::TRAINING_DB,
            target::ZIPS,
            id
        );

        let result = self
            .zips()
            .update_one(doc! { "_id": id }, reset_update())
            .await?;

        info!(
            "Matched {} documents and updated {} documents",
            result.matched_count, result.modified_count
        );

        Ok(ExecutionResult::success(
            ResultData::Update {
                matched: result.matched_count,
                modified: result.modified_count,
            },
            ExecutionStats {
                execution_time_ms: 0,
                documents_returned: 0,
                documents_affected: Some(result.modified_count),
            },
        ))
    }
}
