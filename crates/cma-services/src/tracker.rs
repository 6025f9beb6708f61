//! Last-write-wins cost analysis
//!
//! Every [`CostAnalysisTracker::submit`] starts a new generation. The previous
//! in-flight request is aborted, and a result is only published while its
//! generation is still the pending one, so a late answer for an older score
//! set can never overwrite a newer one.

use crate::cost::{CostAnalysis, CostSavingsAnalyzer};
use cma_model::{CategoryScore, Locale};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Observable state of the tracked analysis
#[derive(Debug, Clone, PartialEq)]
pub enum CostState {
    /// Nothing requested, or the last request was cancelled
    Idle,
    /// Waiting on the analysis for `generation`
    Pending { generation: u64 },
    /// Latest analysis
    Ready { generation: u64, analysis: CostAnalysis },
}

impl CostState {
    #[inline]
    #[must_use]
    pub fn generation(&self) -> Option<u64> {
        match self {
            Self::Idle => None,
            Self::Pending { generation } | Self::Ready { generation, .. } => Some(*generation),
        }
    }

    #[inline]
    #[must_use]
    pub fn analysis(&self) -> Option<&CostAnalysis> {
        match self {
            Self::Ready { analysis, .. } => Some(analysis),
            _ => None,
        }
    }
}

/// Tracks the most recent cost analysis request
///
/// Must be used from within a Tokio runtime.
pub struct CostAnalysisTracker {
    analyzer: Arc<CostSavingsAnalyzer>,
    generation: AtomicU64,
    in_flight: Mutex<Option<JoinHandle<()>>>,
    state: Arc<watch::Sender<CostState>>,
}

impl std::fmt::Debug for CostAnalysisTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CostAnalysisTracker")
            .field("generation", &self.generation.load(Ordering::Acquire))
            .field("state", &*self.state.borrow())
            .finish_non_exhaustive()
    }
}

impl CostAnalysisTracker {
    #[must_use]
    pub fn new(analyzer: Arc<CostSavingsAnalyzer>) -> Self {
        let (state, _) = watch::channel(CostState::Idle);
        Self {
            analyzer,
            generation: AtomicU64::new(0),
            in_flight: Mutex::new(None),
            state: Arc::new(state),
        }
    }

    /// Start analysis for a new score set, superseding any earlier one
    ///
    /// Returns the generation assigned to this request.
    pub fn submit(&self, scores: Vec<CategoryScore>, locale: Locale) -> u64 {
        let mut in_flight = self.in_flight.lock();
        if let Some(previous) = in_flight.take() {
            previous.abort();
        }

        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        self.state.send_replace(CostState::Pending { generation });
        tracing::debug!(generation, categories = scores.len(), "cost analysis submitted");

        let analyzer = Arc::clone(&self.analyzer);
        let state = Arc::clone(&self.state);
        *in_flight = Some(tokio::spawn(async move {
            let analysis = analyzer.analyze(&scores, locale).await;
            let published = state.send_if_modified(|current| {
                if !matches!(current, CostState::Pending { generation: pending } if *pending == generation) {
                    return false;
                }
                *current = CostState::Ready { generation, analysis };
                true
            });
            if !published {
                tracing::debug!(generation, "discarding stale cost analysis");
            }
        }));

        generation
    }

    /// Abort the in-flight request and return to idle
    pub fn cancel(&self) {
        let mut in_flight = self.in_flight.lock();
        if let Some(previous) = in_flight.take() {
            previous.abort();
        }
        self.generation.fetch_add(1, Ordering::AcqRel);
        self.state.send_replace(CostState::Idle);
    }

    /// Snapshot of the current state
    #[inline]
    #[must_use]
    pub fn current(&self) -> CostState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every state change
    #[inline]
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<CostState> {
        self.state.subscribe()
    }

    /// Wait until no request is pending
    ///
    /// Returns the latest analysis, or `None` when the tracker is idle.
    pub async fn wait_ready(&self) -> Option<CostAnalysis> {
        let mut rx = self.state.subscribe();
        let state = rx
            .wait_for(|s| !matches!(s, CostState::Pending { .. }))
            .await
            .ok()?;
        state.analysis().cloned()
    }
}

impl Drop for CostAnalysisTracker {
    fn drop(&mut self) {
        if let Some(handle) = self.in_flight.get_mut().take() {
            handle.abort();
        }
    }
}
