use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

use super::{LayerArrangement, OverlayConfig};

pub const OVERLAY_CONFIG_JSON_SCHEMA_V1: u32 = 1;
pub const LAYER_ARRANGEMENT_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverlayConfigJsonContractV1 {
    pub schema_version: u32,
    pub config: OverlayConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerArrangementJsonContractV1 {
    pub schema_version: u32,
    pub arrangement: LayerArrangement,
}

impl OverlayConfig {
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize overlay config: {e}"))
        })
    }

    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = OverlayConfigJsonContractV1 {
            schema_version: OVERLAY_CONFIG_JSON_SCHEMA_V1,
            config: *self,
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize overlay config contract v1: {e}"))
        })
    }

    /// Accepts either a bare config object or a versioned v1 envelope, and
    /// validates the result.
    pub fn from_json_compat_str(input: &str) -> ChartResult<Self> {
        if let Ok(config) = serde_json::from_str::<OverlayConfig>(input) {
            return config.validate();
        }
        let payload: OverlayConfigJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse overlay config json payload: {e}"))
        })?;
        if payload.schema_version != OVERLAY_CONFIG_JSON_SCHEMA_V1 {
            return Err(ChartError::InvalidData(format!(
                "unsupported overlay config schema version: {}",
                payload.schema_version
            )));
        }
        payload.config.validate()
    }
}

impl LayerArrangement {
    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = LayerArrangementJsonContractV1 {
            schema_version: LAYER_ARRANGEMENT_JSON_SCHEMA_V1,
            arrangement: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize arrangement contract v1: {e}"))
        })
    }

    pub fn from_json_compat_str(input: &str) -> ChartResult<Self> {
        if let Ok(arrangement) = serde_json::from_str::<LayerArrangement>(input) {
            return Ok(arrangement);
        }
        let payload: LayerArrangementJsonContractV1 =
            serde_json::from_str(input).map_err(|e| {
                ChartError::InvalidData(format!("failed to parse arrangement json payload: {e}"))
            })?;
        if payload.schema_version != LAYER_ARRANGEMENT_JSON_SCHEMA_V1 {
            return Err(ChartError::InvalidData(format!(
                "unsupported arrangement schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.arrangement)
    }
}
