//! Hand-off of error reports and feedback to a background dispatcher.
//!
//! Handlers never touch the outbox themselves. They push a `QueuedReport` onto
//! the bounded channel held by `ReportRelay` and answer right away; the task
//! started by `start_report_dispatcher` drains the channel, writes each report
//! to the `reports` outbox and delivers it to the log. A failed write is logged
//! and the dispatcher moves on to the next report.

use std::collections::BTreeMap;

use common::model::report::ReportRequest;
use log::{error, info, warn};
use thiserror::Error;
use tokio::sync::mpsc;

use crate::store::Database;

/// Shared by every worker as `web::Data`.
#[derive(Clone)]
pub struct ReportRelay {
    pub tx: mpsc::Sender<QueuedReport>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueuedReport {
    pub template: String,
    pub fields: BTreeMap<String, String>,
}

impl From<&ReportRequest> for QueuedReport {
    fn from(request: &ReportRequest) -> Self {
        Self {
            template: request.template.as_str().to_string(),
            fields: request.fields(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RelayError {
    #[error("report queue is full")]
    Full,
    #[error("report dispatcher has stopped")]
    Closed,
}

impl ReportRelay {
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<QueuedReport>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self { tx }, rx)
    }

    /// Queues a report without waiting for room in the channel.
    pub fn enqueue(&self, report: QueuedReport) -> Result<(), RelayError> {
        self.tx.try_send(report).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => RelayError::Full,
            mpsc::error::TrySendError::Closed(_) => RelayError::Closed,
        })
    }
}

fn deliver(db: &Database, id: &str, template: &str, fields: &BTreeMap<String, String>) {
    info!(
        "Delivering report {} ({}) from {}: {}",
        id,
        template,
        fields.get("name").map(String::as_str).unwrap_or("-"),
        fields.get("message").map(String::as_str).unwrap_or("")
    );
    if let Err(e) = db.mark_report_delivered(id) {
        error!("Failed to mark report {} delivered: {}", id, e);
    }
}

/// Writes one report to the outbox and delivers it.
fn dispatch_blocking(db: &Database, report: &QueuedReport) {
    match db.insert_report(&report.template, &report.fields) {
        Ok(id) => deliver(db, &id, &report.template, &report.fields),
        Err(e) => error!("Failed to store {} report: {}", report.template, e),
    }
}

/// Delivers reports left in the outbox by an earlier run.
pub fn redeliver_outbox(db: &Database) {
    match db.undelivered_reports() {
        Ok(reports) => {
            if !reports.is_empty() {
                warn!("Redelivering {} report(s) left in the outbox", reports.len());
            }
            for report in reports {
                deliver(db, &report.id, &report.template, &report.fields);
            }
        }
        Err(e) => error!("Failed to read report outbox: {}", e),
    }
}

/// Long-running task draining the report channel until every sender is gone.
pub async fn start_report_dispatcher(db: Database, mut rx: mpsc::Receiver<QueuedReport>) {
    while let Some(report) = rx.recv().await {
        let db = db.clone();
        let result = tokio::task::spawn_blocking(move || dispatch_blocking(&db, &report)).await;
        if let Err(e) = result {
            error!("Report dispatch task panicked: {}", e);
        }
    }
    info!("Report dispatcher stopped");
}
