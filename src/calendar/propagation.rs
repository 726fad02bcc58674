//! Configuration propagation across stores.
//!
//! Copies one store's weekly rules and policy settings onto a set of target
//! stores. Overrides are store-specific and never copied. Each target is an
//! independent write: all targets are dispatched concurrently, a failure on one
//! never rolls back another, and the outcome of every target is reported.

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{CalendarError, CalendarResult};
use crate::models::StoreCalendarConfig;
use crate::store::CalendarStore;

use super::validation::validate_config;

/// A target store that could not be updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyFailure {
    /// The target store.
    pub store_id: String,
    /// Why the write failed.
    pub error: String,
}

/// Per-target outcome of a configuration copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyReport {
    /// The store the configuration was copied from.
    pub source_store_id: String,
    /// Targets whose configuration was replaced.
    pub succeeded: Vec<String>,
    /// Targets that were not updated.
    pub failed: Vec<CopyFailure>,
}

impl CopyReport {
    /// Returns true if every target was updated.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    /// Returns the ids of the targets that failed, for a retry.
    pub fn failed_store_ids(&self) -> Vec<String> {
        self.failed.iter().map(|f| f.store_id.clone()).collect()
    }

    /// Converts a report with failures into [`CalendarError::PartialPropagation`].
    pub fn into_result(self) -> CalendarResult<CopyReport> {
        if self.is_complete() {
            Ok(self)
        } else {
            Err(CalendarError::PartialPropagation {
                failed: self.failed_store_ids(),
            })
        }
    }
}

/// Copies the weekly rules and settings of `source_store_id` onto every target.
///
/// The source is loaded (or defaulted if it has never been saved) and
/// validated first; a source that cannot be loaded or is invalid aborts the
/// whole operation. Duplicate targets are collapsed and the source itself is
/// skipped. Each target keeps its own id and overrides.
///
/// # Returns
///
/// A [`CopyReport`] listing, per target, whether the write succeeded. Target
/// failures do not make this function fail; use [`CopyReport::into_result`]
/// to treat them as an error.
pub async fn copy_config<S>(
    store: &S,
    source_store_id: &str,
    target_store_ids: &[String],
) -> CalendarResult<CopyReport>
where
    S: CalendarStore + ?Sized,
{
    let source = store.load_or_default(source_store_id).await?;
    validate_config(&source)?;

    let mut targets: Vec<&str> = Vec::new();
    for id in target_store_ids {
        if id != source_store_id && !targets.contains(&id.as_str()) {
            targets.push(id);
        }
    }

    let writes = targets
        .iter()
        .map(|target| copy_to_target(store, &source, target));
    let outcomes = join_all(writes).await;

    let mut report = CopyReport {
        source_store_id: source_store_id.to_string(),
        succeeded: Vec::new(),
        failed: Vec::new(),
    };
    for (target, outcome) in targets.into_iter().zip(outcomes) {
        match outcome {
            Ok(()) => report.succeeded.push(target.to_string()),
            Err(err) => {
                warn!(
                    source = %source_store_id,
                    target = %target,
                    error = %err,
                    "Calendar propagation to target failed"
                );
                report.failed.push(CopyFailure {
                    store_id: target.to_string(),
                    error: err.to_string(),
                });
            }
        }
    }

    info!(
        source = %source_store_id,
        succeeded = report.succeeded.len(),
        failed = report.failed.len(),
        "Calendar propagation finished"
    );
    Ok(report)
}

async fn copy_to_target<S>(
    store: &S,
    source: &StoreCalendarConfig,
    target_store_id: &str,
) -> CalendarResult<()>
where
    S: CalendarStore + ?Sized,
{
    let mut target = store.load_or_default(target_store_id).await?;
    target.adopt_schedule_from(source);
    store.save_config(&target).await
}
