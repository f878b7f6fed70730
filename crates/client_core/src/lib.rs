use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use shared::protocol::AttackResponse;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

pub mod error;
pub mod normalize;
pub mod render;
pub mod stats;

use error::DetectionApiError;
use stats::Stats;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8081/api";
pub const DEFAULT_QUERY_COUNT: u32 = 100;
pub const MAX_QUERY_COUNT: u32 = 10_000;
/// Wait between dataset generation and analysis in the combined workflow,
/// giving the backend time to finish ingesting the generated data.
const SETTLE_DELAY: Duration = Duration::from_millis(500);

pub const NO_DATA_MESSAGE: &str =
    "No data found. Generate a dataset first to create DNS queries.";

/// Clamps a user-supplied query count to the accepted range; zero falls
/// back to the default rather than the minimum.
pub fn normalize_query_count(requested: u32) -> u32 {
    if requested == 0 {
        DEFAULT_QUERY_COUNT
    } else {
        requested.min(MAX_QUERY_COUNT)
    }
}

/// The two remote operations the dashboard drives on the detection service.
#[async_trait]
pub trait DetectionApi: Send + Sync {
    /// `POST /dataset/generate?queryCount={n}`; the body is opaque
    /// human-readable text.
    async fn generate_dataset(&self, query_count: u32) -> Result<String, DetectionApiError>;
    /// `POST /detection/analysis`; the body is either one `AttackResponse`
    /// object or an array of them, decoded downstream by [`normalize`].
    async fn run_analysis(&self) -> Result<Value, DetectionApiError>;
}

pub struct HttpDetectionApi {
    http: Client,
    base_url: String,
}

impl HttpDetectionApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl DetectionApi for HttpDetectionApi {
    async fn generate_dataset(&self, query_count: u32) -> Result<String, DetectionApiError> {
        let body = self
            .http
            .post(format!("{}/dataset/generate", self.base_url))
            .query(&[("queryCount", query_count)])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(body)
    }

    async fn run_analysis(&self) -> Result<Value, DetectionApiError> {
        let raw = self
            .http
            .post(format!("{}/detection/analysis", self.base_url))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(raw)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WorkflowStatus {
    #[default]
    Idle,
    Loading,
    Success,
    /// The operation completed but produced guidance instead of results,
    /// e.g. analysis over a dataset that was never generated.
    Info,
    Error,
}

impl WorkflowStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowStatus::Idle => "idle",
            WorkflowStatus::Loading => "loading",
            WorkflowStatus::Success => "success",
            WorkflowStatus::Info => "info",
            WorkflowStatus::Error => "error",
        }
    }
}

/// Observable state of one dashboard session. A single controller is the
/// only writer; results and status/message always change together under
/// the same lock acquisition.
#[derive(Debug, Clone, Default)]
pub struct WorkflowState {
    pub results: Vec<AttackResponse>,
    pub status: WorkflowStatus,
    pub message: Option<String>,
    op_seq: u64,
}

/// Sequences the dashboard's remote operations and owns their state.
///
/// Operations may overlap if the caller fires a new one while another is
/// in flight; whichever operation was *initiated* last wins. Each
/// operation takes a sequence number at start, and state writes from
/// operations that are no longer the latest are discarded, so a slow
/// response can never clobber a newer operation's outcome.
pub struct WorkflowController<A: DetectionApi> {
    api: Arc<A>,
    state: Mutex<WorkflowState>,
    settle_delay: Duration,
}

impl<A: DetectionApi> WorkflowController<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            state: Mutex::new(WorkflowState::default()),
            settle_delay: SETTLE_DELAY,
        }
    }

    pub fn with_settle_delay(mut self, settle_delay: Duration) -> Self {
        self.settle_delay = settle_delay;
        self
    }

    pub async fn state(&self) -> WorkflowState {
        self.state.lock().await.clone()
    }

    /// Summary metrics derived from the current results. Computed on
    /// demand so they can never drift from the stored result set.
    pub async fn stats(&self) -> Stats {
        stats::aggregate(&self.state.lock().await.results)
    }

    async fn begin(&self) -> u64 {
        let mut state = self.state.lock().await;
        state.op_seq += 1;
        state.status = WorkflowStatus::Loading;
        state.message = None;
        state.results.clear();
        state.op_seq
    }

    /// Applies `update` only if no newer operation has begun since `op`
    /// was issued.
    async fn apply(&self, op: u64, update: impl FnOnce(&mut WorkflowState)) {
        let mut state = self.state.lock().await;
        if state.op_seq != op {
            debug!(op, latest = state.op_seq, "discarding outcome of superseded operation");
            return;
        }
        update(&mut state);
    }

    /// Generates a synthetic dataset of `query_count` DNS queries on the
    /// detection service. Returns whether the request succeeded; all detail
    /// lands in the workflow state either way.
    pub async fn generate(&self, query_count: u32) -> bool {
        let query_count = normalize_query_count(query_count);
        let op = self.begin().await;

        match self.api.generate_dataset(query_count).await {
            Ok(body) => {
                info!(query_count, "dataset generated");
                debug!("generation response body: {body}");
                self.apply(op, |state| {
                    state.status = WorkflowStatus::Success;
                    state.message = Some(format!(
                        "Successfully generated {query_count} DNS queries. Run analysis to detect threats."
                    ));
                })
                .await;
                true
            }
            Err(err) => {
                warn!("dataset generation failed: {err}");
                self.apply(op, |state| {
                    state.status = WorkflowStatus::Error;
                    state.message = Some(format!("Error generating dataset: {err}"));
                    state.results.clear();
                })
                .await;
                false
            }
        }
    }

    /// Runs threat analysis and stores the normalized results. An empty
    /// normalized sequence, or a first element that analyzed zero queries,
    /// is informational rather than an error: the user is told to generate
    /// data first.
    pub async fn analyze(&self) -> bool {
        let op = self.begin().await;

        let outcome = match self.api.run_analysis().await {
            Ok(raw) => normalize::normalize(raw).map_err(DetectionApiError::from),
            Err(err) => Err(err),
        };

        match outcome {
            Ok(results) => {
                let empty_dataset = results.is_empty()
                    || results.first().is_some_and(|first| first.queries_analyzed == 0);
                info!(responses = results.len(), empty_dataset, "analysis completed");
                self.apply(op, |state| {
                    if empty_dataset {
                        state.results.clear();
                        state.status = WorkflowStatus::Info;
                        state.message = Some(NO_DATA_MESSAGE.to_string());
                    } else {
                        state.results = results;
                        state.status = WorkflowStatus::Success;
                    }
                })
                .await;
                true
            }
            Err(err) => {
                warn!("analysis failed: {err}");
                self.apply(op, |state| {
                    state.status = WorkflowStatus::Error;
                    state.message = Some(format!("Error running analysis: {err}"));
                    state.results.clear();
                })
                .await;
                false
            }
        }
    }

    /// Generates a dataset and analyzes it as one user-facing operation:
    /// generate, wait the settle delay for backend ingestion, analyze. A
    /// generation failure aborts the whole operation without calling
    /// analysis.
    pub async fn generate_and_analyze(&self, query_count: u32) -> bool {
        let query_count = normalize_query_count(query_count);
        let op = self.begin().await;

        let outcome: Result<Vec<AttackResponse>, DetectionApiError> = async {
            self.api.generate_dataset(query_count).await?;
            tokio::time::sleep(self.settle_delay).await;
            let raw = self.api.run_analysis().await?;
            Ok(normalize::normalize(raw)?)
        }
        .await;

        match outcome {
            Ok(results) => {
                info!(query_count, responses = results.len(), "generate-and-analyze completed");
                self.apply(op, |state| {
                    state.results = results;
                    state.status = WorkflowStatus::Success;
                    state.message = Some(format!(
                        "Generated {query_count} DNS queries and completed analysis."
                    ));
                })
                .await;
                true
            }
            Err(err) => {
                warn!("generate-and-analyze failed: {err}");
                self.apply(op, |state| {
                    state.status = WorkflowStatus::Error;
                    state.message = Some(format!("Error: {err}"));
                    state.results.clear();
                })
                .await;
                false
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod lib_tests;
