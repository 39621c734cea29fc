//! Client for the dataset server.
//!
//! [`DatasetClient`] holds what has been loaded from the server's summary
//! endpoints and opens one [`RecordStream`] per streaming endpoint.
//!
//! Transport failures are handled according to the configured
//! [`FailurePolicy`]: under the default soft policy they are logged and the
//! operation degrades to "not loaded" or to an empty stream; under the strict
//! policy they are returned to the caller.

mod record_stream;

pub use record_stream::RecordStream;

use serde::de::DeserializeOwned;

use crate::config::{ExplorerConfig, FailurePolicy};
use crate::error::{ExplorerError, ExplorerResult, TransportError};
use crate::models::{
    DatasetIndex, Event, HeuristicScoreMap, InstanceHeuristicMap, RpToCommandDistill, SortOrder,
    StateToNarrationDistill, TimeBasedDistill,
};
use crate::ndjson::read_ndjson;
use crate::traits::{Headers, HttpClient};

/// `GET {base}/index`
pub const INDEX_PATH: &str = "index";
/// `GET {base}/heuristics`
pub const HEURISTICS_PATH: &str = "heuristics";
/// `GET {base}/events/{id}`
pub const EVENTS_PATH: &str = "events";
/// `GET {base}/distill/rp/{id}`
pub const RP_DISTILL_PATH: &str = "distill/rp";
/// `GET {base}/distill/narration/{id}`
pub const NARRATION_DISTILL_PATH: &str = "distill/narration";
/// `GET {base}/distill/experiment1/{id}`
pub const TIME_DISTILL_PATH: &str = "distill/experiment1";

/// State loaded from the summary endpoints.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DatasetState {
    pub index_loaded: bool,
    pub heuristics_loaded: bool,
    pub checksum: Option<String>,
    pub instance_ids: Vec<String>,
    pub heuristic_ids: Vec<String>,
    pub heuristics_by_instance: InstanceHeuristicMap,
}

/// Client for one dataset server.
///
/// Generic over the HTTP transport so that tests can substitute
/// [`crate::adapters::MockHttpClient`].
#[derive(Debug)]
pub struct DatasetClient<C: HttpClient> {
    http: C,
    config: ExplorerConfig,
    state: DatasetState,
}

impl<C: HttpClient> DatasetClient<C> {
    pub fn new(http: C, config: ExplorerConfig) -> Self {
        Self {
            http,
            config,
            state: DatasetState::default(),
        }
    }

    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    pub fn state(&self) -> &DatasetState {
        &self.state
    }

    pub fn http(&self) -> &C {
        &self.http
    }

    /// Load the index, then the heuristic scores.
    pub async fn init(&mut self) -> ExplorerResult<()> {
        self.load_index().await?;
        self.load_heuristics_by_instance().await?;
        Ok(())
    }

    /// Fetch `/index` and replace the checksum, instance list and heuristic
    /// list.
    ///
    /// Returns whether the index was loaded. On failure the previous state is
    /// kept.
    pub async fn load_index(&mut self) -> ExplorerResult<bool> {
        match self.fetch_document::<DatasetIndex>(INDEX_PATH).await {
            Ok(index) => {
                tracing::debug!(
                    "Loaded index {} ({} instances, {} heuristics)",
                    index.checksum,
                    index.instances.len(),
                    index.heuristics.len()
                );
                self.state.checksum = Some(index.checksum);
                self.state.instance_ids = index.instances;
                self.state.heuristic_ids = index.heuristics;
                self.state.index_loaded = true;
                Ok(true)
            }
            Err(err) => {
                tracing::error!("Failed to load index: {}", err);
                self.settle(err, false)
            }
        }
    }

    /// Fetch `/heuristics` and replace the per-instance score map.
    ///
    /// Returns whether the scores were loaded. On failure the previous state
    /// is kept.
    pub async fn load_heuristics_by_instance(&mut self) -> ExplorerResult<bool> {
        match self
            .fetch_document::<InstanceHeuristicMap>(HEURISTICS_PATH)
            .await
        {
            Ok(scores) => {
                tracing::debug!("Loaded heuristic scores for {} instances", scores.len());
                self.state.heuristics_by_instance = scores;
                self.state.heuristics_loaded = true;
                Ok(true)
            }
            Err(err) => {
                tracing::error!("Failed to load heuristics: {}", err);
                self.settle(err, false)
            }
        }
    }

    /// Checksum of the loaded index.
    pub fn checksum(&self) -> Option<&str> {
        self.state.checksum.as_deref()
    }

    pub fn instance_ids(&self) -> &[String] {
        &self.state.instance_ids
    }

    pub fn heuristic_ids(&self) -> &[String] {
        &self.state.heuristic_ids
    }

    /// All heuristic scores of one instance.
    pub fn heuristics_for(&self, instance_id: &str) -> Option<&HeuristicScoreMap> {
        self.state.heuristics_by_instance.get(instance_id)
    }

    /// Score of `heuristic` for `instance_id`, if both are known.
    pub fn heuristic_score(&self, instance_id: &str, heuristic: &str) -> Option<f64> {
        self.heuristics_for(instance_id)?.get(heuristic).copied()
    }

    /// Instance ids ordered by one heuristic's score.
    ///
    /// Instances without a score for `heuristic` come last, in index order.
    /// [`SortOrder::None`] returns the index order unchanged.
    pub fn sorted_instances(&self, heuristic: &str, order: SortOrder) -> Vec<String> {
        let mut scored: Vec<(f64, &String)> = Vec::new();
        let mut unscored: Vec<&String> = Vec::new();
        for id in &self.state.instance_ids {
            match self.heuristic_score(id, heuristic) {
                Some(score) if order != SortOrder::None => scored.push((score, id)),
                _ => unscored.push(id),
            }
        }

        match order {
            SortOrder::None => {}
            SortOrder::Asc => scored.sort_by(|a, b| a.0.total_cmp(&b.0)),
            SortOrder::Desc => scored.sort_by(|a, b| b.0.total_cmp(&a.0)),
        }

        scored
            .into_iter()
            .map(|(_, id)| id)
            .chain(unscored)
            .cloned()
            .collect()
    }

    /// Stream the raw events of one instance.
    pub async fn stream_events(&self, instance_id: &str) -> ExplorerResult<RecordStream<Event>> {
        self.stream(EVENTS_PATH, instance_id).await
    }

    /// Stream the role-play to command distillation of one instance.
    pub async fn stream_rp_distill(
        &self,
        instance_id: &str,
    ) -> ExplorerResult<RecordStream<RpToCommandDistill>> {
        self.stream(RP_DISTILL_PATH, instance_id).await
    }

    /// Stream the state to narration distillation of one instance.
    pub async fn stream_narration_distill(
        &self,
        instance_id: &str,
    ) -> ExplorerResult<RecordStream<StateToNarrationDistill>> {
        self.stream(NARRATION_DISTILL_PATH, instance_id).await
    }

    /// Stream the time-window distillation of one instance.
    pub async fn stream_time_distill(
        &self,
        instance_id: &str,
    ) -> ExplorerResult<RecordStream<TimeBasedDistill>> {
        self.stream(TIME_DISTILL_PATH, instance_id).await
    }

    /// Open `{base}/{path}/{instance_id}` as a stream of `T`.
    ///
    /// Only the status line is awaited here; records are read as the
    /// returned stream is polled.
    pub async fn stream<T: DeserializeOwned>(
        &self,
        path: &str,
        instance_id: &str,
    ) -> ExplorerResult<RecordStream<T>> {
        let url = self.config.instance_url(path, instance_id);

        let failure = match self.http.get_stream(&url, &Headers::new()).await {
            Ok(response) if response.is_success() => {
                tracing::debug!("Opened stream {} (HTTP {})", url, response.status);
                return Ok(RecordStream::open(read_ndjson(response.body)));
            }
            Ok(response) => TransportError::Status {
                url,
                status: response.status,
            },
            Err(source) => TransportError::Request { url, source },
        };

        tracing::error!("Failed to open stream: {}", failure);
        match self.config.failure_policy {
            FailurePolicy::Soft => Ok(RecordStream::failed(failure)),
            FailurePolicy::Strict => Err(failure.into()),
        }
    }

    async fn fetch_document<T: DeserializeOwned>(&self, path: &str) -> ExplorerResult<T> {
        let url = self.config.url(path);
        let response = self
            .http
            .get(&url, &Headers::new())
            .await
            .map_err(|source| TransportError::Request {
                url: url.clone(),
                source,
            })?;

        if !response.is_success() {
            return Err(TransportError::Status {
                url,
                status: response.status,
            }
            .into());
        }

        response.json().map_err(|e| ExplorerError::Document {
            url,
            reason: e.to_string(),
        })
    }

    /// Apply the failure policy to a failed load.
    fn settle<T>(&self, err: ExplorerError, soft: T) -> ExplorerResult<T> {
        match self.config.failure_policy {
            FailurePolicy::Soft => Ok(soft),
            FailurePolicy::Strict => Err(err),
        }
    }
}
