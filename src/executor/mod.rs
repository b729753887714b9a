//! Operation execution engine for atlas-ops
//!
//! This module provides the execution layer for the six hardcoded CRUD
//! operations, selected by the positional command-line argument:
//!
//! 1. Fetch one movie by title
//! 2. List low-population zip records
//! 3. Increment a city's population and re-read it
//! 4. Distinct movie titles for one director
//! 5. Insert a city record with a random population
//! 6. Reset the population of one record by id
//!
//! Each operation is an independent, stateless procedure issuing one
//! logical request (or a request plus read-back) against a named
//! collection. Collection names, filter values, and the update target id
//! are literals from the Atlas sample datasets.

use std::fmt;
use std::time::Instant;

use mongodb::bson::Document;
use mongodb::{Client, Collection};

use crate::error::{ExecutionError, Result};

mod read;
mod result;
mod write;

pub use result::{ExecutionResult, ExecutionStats, ResultData};

/// Literal targets in the Atlas sample datasets.
///
/// These pre-exist on any cluster loaded with the sample data; nothing
/// here is derived or generated at runtime.
pub mod target {
    /// Database holding the movie collection
    pub const MFLIX_DB: &str = "sample_mflix";

    /// Movie collection
    pub const MOVIES: &str = "movies";

    /// Database holding the zip-code collection
    pub const TRAINING_DB: &str = "sample_training";

    /// Zip-code collection
    pub const ZIPS: &str = "zips";

    /// Title matched by the single-record fetch
    pub const MOVIE_TITLE: &str = "Back to the Future";

    /// Director matched by the distinct-titles query
    pub const DIRECTOR: &str = "Natalie Portman";

    /// Field the distinct query projects
    pub const TITLE_FIELD: &str = "title";

    /// City matched by the increment and insert operations
    pub const CITY_NAME: &str = "LOST PUNKS";

    /// Inclusive upper bound for the range-filter fetch
    pub const POPULATION_CEILING: i32 = 50;

    /// Population written by the update-by-id operation
    pub const RESET_POPULATION: i32 = 100;

    /// Hex object id of the record targeted by update-by-id
    pub const RESET_DOCUMENT_ID: &str = "628fe19b067c7f5640068623";
}

/// The six operations selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// `1` - fetch one movie by title
    FindMovie,

    /// `2` - list zip records with population at or below the ceiling
    ListSmallZips,

    /// `3` - increment a city's population, then re-read it
    BumpPopulation,

    /// `4` - distinct movie titles for one director
    DistinctTitles,

    /// `5` - insert a city record with a random population
    InsertCity,

    /// `6` - reset one record's population by id
    ResetPopulation,
}

impl Operation {
    /// Parse the positional command-line token.
    ///
    /// Accepts exactly `"1"` through `"6"`; anything else is a fatal
    /// invalid-operation error.
    pub fn from_arg(arg: &str) -> Result<Self> {
        match arg {
            "1" => Ok(Operation::FindMovie),
            "2" => Ok(Operation::ListSmallZips),
            "3" => Ok(Operation::BumpPopulation),
            "4" => Ok(Operation::DistinctTitles),
            "5" => Ok(Operation::InsertCity),
            "6" => Ok(Operation::ResetPopulation),
            other => Err(ExecutionError::InvalidOperation(other.to_string()).into()),
        }
    }

    /// Short description used in logs.
    pub fn describe(&self) -> &'static str {
        match self {
            Operation::FindMovie => "find one movie by title",
            Operation::ListSmallZips => "list low-population zip records",
            Operation::BumpPopulation => "increment city population and re-read",
            Operation::DistinctTitles => "distinct movie titles by director",
            Operation::InsertCity => "insert city record",
            Operation::ResetPopulation => "reset population by id",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// Executor for the hardcoded operations.
///
/// Holds a handle to the connected client; each call issues its requests
/// and returns an [`ExecutionResult`] for the formatter. No state is
/// carried between operations because each process run performs exactly
/// one.
pub struct OperationExecutor {
    client: Client,
}

impl OperationExecutor {
    /// Create a new executor from a connected client
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Run one operation and stamp its wall-clock duration.
    pub async fn execute(&self, operation: Operation) -> Result<ExecutionResult> {
        let started = Instant::now();

        let mut result = match operation {
            Operation::FindMovie => self.find_movie().await?,
            Operation::ListSmallZips => self.list_small_zips().await?,
            Operation::BumpPopulation => self.bump_population().await?,
            Operation::DistinctTitles => self.distinct_titles().await?,
            Operation::InsertCity => self.insert_city().await?,
            Operation::ResetPopulation => self.reset_population().await?,
        };

        result.stats.execution_time_ms = started.elapsed().as_millis() as u64;
        Ok(result)
    }

    /// Movie collection handle
    fn movies(&self) -> Collection<Document> {
        self.client.database(target::MFLIX_DB).collection(target::MOVIES)
    }

    /// Zip-code collection handle
    fn zips(&self) -> Collection<Document> {
        self.client.database(target::TRAINING_DB).collection(target::ZIPS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_from_valid_args() {
        assert_eq!(Operation::from_arg("1").unwrap(), Operation::FindMovie);
        assert_eq!(Operation::from_arg("2").unwrap(), Operation::ListSmallZips);
        assert_eq!(Operation::from_arg("3").unwrap(), Operation::BumpPopulation);
        assert_eq!(Operation::from_arg("4").unwrap(), Operation::DistinctTitles);
        assert_eq!(Operation::from_arg("5").unwrap(), Operation::InsertCity);
        assert_eq!(Operation::from_arg("6").unwrap(), Operation::ResetPopulation);
    }

    #[test]
    fn test_operation_from_invalid_args() {
        for arg in ["0", "7", "42", "-1", "", "one", "1.0", " 1"] {
            assert!(Operation::from_arg(arg).is_err(), "accepted {arg:?}");
        }
    }

    #[test]
    fn test_operation_display() {
        assert_eq!(
            Operation::FindMovie.to_string(),
            "find one movie by title"
        );
    }
}
