//! Retention Sweep: exports and deletes interviews older than the retention
//! window, grouped per owning HR so each HR gets their own export mail and
//! deletion confirmation.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::interview::export::export_interviews_csv;
use crate::models::interview::InterviewRow;
use crate::notify::{templates, Attachment, Notifier};
use crate::state::AppState;
use crate::store::Store;

const EXPORT_FILENAME: &str = "old_interviews_export.csv";

#[derive(Debug, Default, Serialize, PartialEq, Eq)]
pub struct SweepReport {
    pub hrs_notified: usize,
    pub interviews_deleted: usize,
    pub rows_exported: usize,
}

#[derive(Clone)]
pub struct RetentionSweep {
    store: Arc<dyn Store>,
    notifier: Arc<dyn Notifier>,
}

impl RetentionSweep {
    pub fn new(store: Arc<dyn Store>, notifier: Arc<dyn Notifier>) -> Self {
        Self { store, notifier }
    }

    /// Deletes every interview older than `older_than`, after exporting its
    /// full transcript and mailing that export to the owning HR. Mail
    /// failures are logged and never block the deletion; the export CSV is
    /// rendered before the first delete so the attachment is complete even
    /// if a later delete fails.
    pub async fn purge(&self, older_than: Duration) -> Result<SweepReport, AppError> {
        let cutoff = Utc::now() - older_than;
        let stale = self.store.interviews_older_than(cutoff).await?;
        if stale.is_empty() {
            info!("retention sweep found nothing older than {cutoff}");
            return Ok(SweepReport::default());
        }

        let mut by_hr: BTreeMap<Uuid, Vec<InterviewRow>> = BTreeMap::new();
        for interview in stale {
            by_hr.entry(interview.hr_id).or_default().push(interview);
        }

        let retention_days = older_than.num_days();
        let mut report = SweepReport::default();

        for (hr_id, interviews) in by_hr {
            let hr = match self.store.hr_by_id(hr_id).await? {
                Some(hr) => hr,
                None => {
                    warn!(hr = %hr_id, "stale interviews reference a missing HR, skipping");
                    continue;
                }
            };

            let (csv_bytes, rows) =
                export_interviews_csv(self.store.as_ref(), &interviews).await?;

            let (subject, body) = templates::retention_export(&hr.email, rows, retention_days);
            if let Err(e) = self
                .notifier
                .send(
                    &hr.email,
                    &subject,
                    &body,
                    Some(Attachment::csv(EXPORT_FILENAME, csv_bytes)),
                )
                .await
            {
                warn!("failed to send retention export to {}: {e}", hr.email);
            }

            let mut deleted = 0usize;
            for interview in &interviews {
                self.store.delete_interview(interview.id).await?;
                deleted += 1;
            }

            let (subject, body) = templates::retention_deleted(&hr.email, deleted);
            if let Err(e) = self.notifier.send(&hr.email, &subject, &body, None).await {
                warn!("failed to send deletion confirmation to {}: {e}", hr.email);
            }

            info!(hr = %hr.id, deleted, rows, "retention sweep purged interviews");
            report.hrs_notified += 1;
            report.interviews_deleted += deleted;
            report.rows_exported += rows;
        }

        Ok(report)
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct SweepRequest {
    /// Override of the configured retention window, in days.
    pub older_than_days: Option<i64>,
}

/// POST /api/v1/retention/sweep
pub async fn handle_sweep(
    State(state): State<AppState>,
    body: Option<Json<SweepRequest>>,
) -> Result<Json<SweepReport>, AppError> {
    let days = body
        .and_then(|Json(req)| req.older_than_days)
        .unwrap_or(state.config.retention_days);
    if days <= 0 {
        return Err(AppError::Validation(
            "older_than_days must be positive".to_string(),
        ));
    }
    let sweep = RetentionSweep::new(Arc::clone(&state.store), Arc::clone(&state.notifier));
    let report = sweep.purge(Duration::days(days)).await?;
    Ok(Json(report))
}
