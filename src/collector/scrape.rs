use std::sync::Arc;
use std::time::Instant;

use tokio::sync::mpsc;
use tracing::{debug, error};

use super::target::TargetCollector;
use crate::metrics::Sample;

/// Samples buffered between the per-target tasks and the scrape.
const SAMPLE_BUFFER: usize = 256;

/// Runs one collection per configured target concurrently and joins them.
pub struct ScrapeOrchestrator {
    targets: Vec<String>,
    collector: Arc<TargetCollector>,
}

impl ScrapeOrchestrator {
    pub fn new(targets: Vec<String>, collector: TargetCollector) -> Self {
        Self {
            targets,
            collector: Arc::new(collector),
        }
    }

    pub fn targets(&self) -> &[String] {
        &self.targets
    }

    /// Collects every target and returns once all of them have reported.
    /// Each target contributes exactly one reachability sample.
    pub async fn scrape(&self) -> Vec<Sample> {
        let started = Instant::now();
        let (tx, mut rx) = mpsc::channel(SAMPLE_BUFFER);

        let handles: Vec<_> = self
            .targets
            .iter()
            .map(|target| {
                let collector = Arc::clone(&self.collector);
                let target = target.clone();
                let tx = tx.clone();
                let handle = tokio::spawn({
                    let target = target.clone();
                    async move { collector.collect(&target, &tx).await }
                });
                (target, handle)
            })
            .collect();
        drop(tx);

        let mut samples = Vec::new();
        while let Some(sample) = rx.recv().await {
            samples.push(sample);
        }

        for (target, handle) in handles {
            if let Err(e) = handle.await {
                error!(device = %target, error = %e, "collection task failed");
                samples.push(Sample::up(&target, false));
            }
        }

        debug!(
            targets = self.targets.len(),
            samples = samples.len(),
            elapsed = ?started.elapsed(),
            "scrape complete"
        );
        samples
    }
}
