//! Beam extraction from the running structural model
//!
//! The optimizer only sees [`BeamSource`]. The model bridge adapter talks
//! HTTP to a process that exposes the analysis application's frame objects;
//! any failure there is logged and reported as "no beams".

use std::time::Duration;

use crate::models::{BeamRecord, FrameListResponse, FrameObject};

/// Fallback uniform load used when a beam has no distributed load assigned.
///
/// Carried over from existing project practice; the value has no documented
/// engineering basis and should be confirmed for each model.
pub const DEFAULT_DISTRIBUTED_LOAD: f64 = 10.0;

/// Frame label identifying beams in the model
pub const BEAM_LABEL: &str = "Beam";

/// Lists the beams of the current model.
///
/// Implementations never fail: an unavailable model yields an empty list.
pub trait BeamSource: Send + Sync {
    fn list_beams(&self) -> Vec<BeamRecord>;
}

/// Fixed list of beams
#[derive(Debug, Clone, Default)]
pub struct StaticBeamSource {
    beams: Vec<BeamRecord>,
}

impl StaticBeamSource {
    pub fn new(beams: Vec<BeamRecord>) -> Self {
        Self { beams }
    }
}

impl BeamSource for StaticBeamSource {
    fn list_beams(&self) -> Vec<BeamRecord> {
        self.beams.clone()
    }
}

/// Client for the structural model bridge
pub struct ModelBridgeClient {
    base_url: String,
    timeout: Duration,
    default_load: f64,
}

impl ModelBridgeClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration, default_load: f64) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
            default_load,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch every frame object of the open model
    pub fn fetch_frames(&self) -> Result<Vec<FrameObject>, ModelBridgeError> {
        let url = format!("{}/api/v1/frames", self.base_url);

        // Built per call: a blocking client must not outlive the blocking
        // thread it runs on.
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()?;

        let response = client.get(&url).send()?;
        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().unwrap_or_default();
            return Err(ModelBridgeError::ApiError(format!("{}: {}", status, error_text)));
        }

        let listing: FrameListResponse = response.json()?;
        Ok(listing.frames)
    }
}

impl BeamSource for ModelBridgeClient {
    fn list_beams(&self) -> Vec<BeamRecord> {
        match self.fetch_frames() {
            Ok(frames) => {
                let beams = beams_from_frames(&frames, self.default_load);
                tracing::info!(
                    "Model bridge returned {} frames, {} beams",
                    frames.len(),
                    beams.len()
                );
                beams
            }
            Err(e) => {
                tracing::warn!("Structural model unavailable at {}: {}", self.base_url, e);
                Vec::new()
            }
        }
    }
}

/// Keep beam-labelled frames, in model order, taking the first distributed
/// load assignment or `default_load` when there is none.
pub fn beams_from_frames(frames: &[FrameObject], default_load: f64) -> Vec<BeamRecord> {
    frames
        .iter()
        .filter(|frame| frame.label == BEAM_LABEL)
        .map(|frame| {
            let load = match frame.distributed_loads.first() {
                Some(load) => *load,
                None => {
                    tracing::debug!(
                        "Beam {} has no distributed load, using {}",
                        frame.name,
                        default_load
                    );
                    default_load
                }
            };
            BeamRecord::new(&frame.name, frame.length, load, &frame.section)
        })
        .collect()
}

#[derive(Debug, thiserror::Error)]
pub enum ModelBridgeError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("API error: {0}")]
    ApiError(String),
}
