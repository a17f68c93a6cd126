//! Telemetry store: parsed GPS/speed samples from the dashcam's companion log
//!
//! The log is a JSON array of vehicle records; only the first record is used.
//! Samples are immutable once parsed and stay in storage (chronological id)
//! order for the duration of a run.

pub mod analyzer;
pub mod mapper;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{HudError, HudResult};

/// One timestamped observation from the telemetry log.
///
/// `velocity_mph` is carried exactly as supplied by the recorder, which
/// pre-formats it as text.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TelemetrySample {
    /// 1-based, contiguous sequence id
    pub id: u32,
    #[serde(default)]
    pub date: String,
    pub time: String,
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
    /// Speed in km/h
    #[serde(rename = "velocity_KM/H")]
    pub velocity_kmh: f64,
    /// Speed in mph, pre-formatted by the recorder
    #[serde(rename = "velocity_MP/H")]
    pub velocity_mph: String,
}

/// One vehicle's record in the log file.
#[derive(Debug, Clone, Deserialize)]
pub struct VehicleRecord {
    #[serde(rename = "VIN", default)]
    pub vin: String,
    #[serde(default)]
    pub entries: Vec<TelemetrySample>,
}

/// Ordered, read-only sequence of telemetry samples for one processing run.
#[derive(Debug, Clone)]
pub struct TelemetryStore {
    vin: String,
    samples: Vec<TelemetrySample>,
}

impl TelemetryStore {
    /// Parse the raw log text into an ordered sample sequence.
    ///
    /// Fails with [`HudError::MalformedTelemetry`] when the payload does not
    /// parse, the outer array is empty, or the first record carries no
    /// entries. Extra vehicle records are ignored.
    pub fn load(raw: &str) -> HudResult<Self> {
        let records: Vec<VehicleRecord> =
            serde_json::from_str(raw).map_err(|e| HudError::MalformedTelemetry {
                message: e.to_string(),
            })?;

        let first = records
            .into_iter()
            .next()
            .ok_or_else(|| HudError::MalformedTelemetry {
                message: "log contains no vehicle records".to_string(),
            })?;

        if first.entries.is_empty() {
            return Err(HudError::MalformedTelemetry {
                message: "first vehicle record has missing or empty entries".to_string(),
            });
        }

        // Ids are expected unique and increasing in storage order; a log
        // that violates this still maps, just less meaningfully.
        let monotonic = first.entries.windows(2).all(|w| w[0].id < w[1].id);
        if !monotonic {
            warn!("telemetry ids are not strictly increasing");
        }

        debug!(
            vin = %first.vin,
            samples = first.entries.len(),
            "telemetry loaded"
        );

        Ok(Self {
            vin: first.vin,
            samples: first.entries,
        })
    }

    /// Number of samples in the sequence. Always at least 1 after `load`.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// VIN of the vehicle record the samples came from.
    pub fn vin(&self) -> &str {
        &self.vin
    }

    /// Sample at `index`. Callers clamp first (see the frame-to-sample
    /// mapper); out-of-range access is a programming error and panics.
    pub fn sample_at(&self, index: usize) -> &TelemetrySample {
        &self.samples[index]
    }

    pub fn samples(&self) -> &[TelemetrySample] {
        &self.samples
    }
}

#[cfg(test)]
pub(crate) fn sample_with_speed(id: u32, kmh: f64) -> TelemetrySample {
    TelemetrySample {
        id,
        date: String::new(),
        time: String::new(),
        latitude: 0.0,
        longitude: 0.0,
        velocity_kmh: kmh,
        velocity_mph: format!("{:.0}", kmh * 0.621_371),
    }
}
