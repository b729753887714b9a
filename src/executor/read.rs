//! Read operations
//!
//! This module contains the three read operations:
//! - findOne (single movie by title)
//! - find (zip records under the population ceiling)
//! - distinct (movie titles for one director)

use futures::stream::TryStreamExt;
use mongodb::bson::{Document, doc};
use tracing::{debug, info, warn};

use crate::error::{ExecutionError, Result};

use super::result::{ExecutionResult, ExecutionStats, ResultData};
use super::target;

/// Filter for the single-record fetch: exact title equality.
pub(super) fn movie_filter() -> Document {
    doc! { "title": target::MOVIE_TITLE }
}

/// Filter for the range fetch: population at or below the ceiling.
pub(super) fn population_filter() -> Document {
    doc! { "pop": { "$lte": target::POPULATION_CEILING } }
}

/// Filter for the distinct query: movies by one director.
pub(super) fn director_filter() -> Document {
    doc! { "directors": target::DIRECTOR }
}

impl super::OperationExecutor {
    /// Fetch one movie by exact title match.
    ///
    /// Not finding the document is a logged, non-fatal outcome: the
    /// result carries no data and the process exits cleanly.
    pub(super) async fn find_movie(&self) -> Result<ExecutionResult> {
        debug!(
            "Executing findOne on '{}.{}' for title {:?}",
            target::MFLIX_DB,
            target::MOVIES,
            target::MOVIE_TITLE
        );

        let doc = self.movies().find_one(movie_filter()).await?;

        match doc {
            Some(document) => Ok(ExecutionResult::success(
                ResultData::Document(document),
                ExecutionStats {
                    execution_time_ms: 0,
                    documents_returned: 1,
                    documents_affected: None,
                },
            )),
            None => {
                warn!("No document found with title {:?}", target::MOVIE_TITLE);
                Ok(ExecutionResult::success(
                    ResultData::None,
                    ExecutionStats::default(),
                ))
            }
        }
    }

    /// Fetch all zip records whose population is at or below the ceiling.
    pub(super) async fn list_small_zips(&self) -> Result<ExecutionResult> {
        debug!(
            "Executing find on '{}.{}' with pop <= {}",
            target::TRAINING_DB,
            target::ZIPS,
            target::POPULATION_CEILING
        );

        let mut cursor = self.zips().find(population_filter()).await?;

        let mut documents = Vec::new();
        while let Some(doc) = cursor
            .try_next()
            .await
            .map_err(|e| ExecutionError::QueryFailed(e.to_string()))?
        {
            documents.push(doc);
        }

        info!("Retrieved {} documents", documents.len());

        let count = documents.len();
        Ok(ExecutionResult::success(
            ResultData::Documents(documents),
            ExecutionStats {
                execution_time_ms: 0,
                documents_returned: count,
                documents_affected: None,
            },
        ))
    }

    /// Compute the distinct set of titles across one director's movies.
    pub(super) async fn distinct_titles(&self) -> Result<ExecutionResult> {
        debug!(
            "Executing distinct '{}' on '{}.{}' for director {:?}",
            target::TITLE_FIELD,
            target::MFLIX_DB,
            target::MOVIES,
            target::DIRECTOR
        );

        let values = self
            .movies()
            .distinct(target::TITLE_FIELD, director_filter())
            .await?;

        info!("Distinct returned {} unique values", values.len());

        let count = values.len();
        Ok(ExecutionResult::success(
            ResultData::Values(values),
            ExecutionStats {
                execution_time_ms: 0,
                documents_returned: count,
                documents_affected: None,
            },
        ))
    }
}
