//! Submission intake.

use chrono::{Local, NaiveDate};
use tracing::info;

use crate::domain::{NewSubmission, SubmissionForm, SubmissionId};
use crate::store::{FoodStore, StoreError};
use crate::validation::validate_submission;

/// Result of a submit attempt that reached the service.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The form failed validation; nothing was written.
    Rejected(Vec<String>),
    /// The submission and its station links were committed.
    Created(SubmissionId),
}

/// Validate, normalize and persist a submit form, dated today.
///
/// Storage failures are returned as errors for the caller to show; no retry
/// is attempted and nothing is left half-written.
pub async fn submit<S: FoodStore>(store: &S, form: &SubmissionForm) -> Result<SubmitOutcome, StoreError> {
    submit_on(store, form, Local::now().date_naive()).await
}

/// [`submit`] with an explicit submission date.
pub async fn submit_on<S: FoodStore>(
    store: &S,
    form: &SubmissionForm,
    date_submitted: NaiveDate,
) -> Result<SubmitOutcome, StoreError> {
    let errors = validate_submission(form);
    if !errors.is_empty() {
        return Ok(SubmitOutcome::Rejected(errors));
    }

    let submission = NewSubmission::from_form(form, date_submitted);
    let id = store.insert_submission(&submission).await?;

    info!(
        %id,
        name = %submission.name,
        stations = submission.stations.len(),
        "recommendation submitted"
    );
    Ok(SubmitOutcome::Created(id))
}
