//! Background tasks for the SiteWatch server.
//!
//! Currently one task: the synthetic detection feed, which stands in for
//! a real camera detector and drives the whole pipeline — it inserts a
//! detection event and runs alert evaluation on every cycle.

use crate::AppState;
use chrono::Local;
use sitewatch_events::{insert_detection, worker_ids, EventSource, SyntheticSource};
use std::sync::Arc;
use tokio::time::{sleep, Duration};

/// Starts the synthetic detection feed.
///
/// Runs until the task is aborted at shutdown. Each cycle synthesizes one
/// detection for a random worker, persists it, and evaluates it for
/// violations — both writes inside one transaction, so readers never see
/// an event without its alert. A failed cycle is logged and skipped; the
/// feed itself never dies.
pub async fn start_generator_task(state: Arc<AppState>, interval_secs: u64) {
    if interval_secs == 0 {
        tracing::warn!("synthetic feed disabled (interval_secs=0)");
        return;
    }

    // The worker list is reference data, loaded once.
    let pool = state.pool.clone();
    let ids = match tokio::task::spawn_blocking(move || {
        let conn = pool.get().map_err(|e| e.to_string())?;
        worker_ids(&conn).map_err(|e| e.to_string())
    })
    .await
    {
        Ok(Ok(ids)) => ids,
        Ok(Err(e)) => {
            tracing::error!("synthetic feed cannot load workers: {}", e);
            return;
        }
        Err(e) => {
            tracing::error!("synthetic feed startup join error: {}", e);
            return;
        }
    };

    let Some(mut source) = SyntheticSource::new(ids) else {
        tracing::warn!("no workers in database, synthetic feed disabled");
        return;
    };

    let interval = Duration::from_secs(interval_secs);
    tracing::info!(interval_secs, "starting synthetic detection feed");

    loop {
        sleep(interval).await;

        let event = source.next_event(Local::now());
        let pool = state.pool.clone();
        let policy = state.policy;

        let res = tokio::task::spawn_blocking(move || {
            let mut conn = pool.get().map_err(|e| e.to_string())?;
            let tx = conn.transaction().map_err(|e| e.to_string())?;

            let event_id = insert_detection(&tx, &event).map_err(|e| e.to_string())?;
            let alert = sitewatch_alerts::evaluate(&tx, &policy, &event).map_err(|e| e.to_string())?;

            tx.commit().map_err(|e| e.to_string())?;
            Ok::<_, String>((event_id, alert.map(|a| a.id)))
        })
        .await;

        match res {
            Ok(Ok((event_id, alert_id))) => {
                tracing::debug!(event_id, ?alert_id, "ingested synthetic detection");
            }
            Ok(Err(e)) => {
                tracing::error!("detection ingestion cycle failed: {}", e);
            }
            Err(e) => {
                tracing::error!("synthetic feed join error: {}", e);
            }
        }
    }
}
