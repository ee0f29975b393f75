mod annotation_layer;
mod json_contract;
mod overlay_config;

pub use annotation_layer::{AnnotationLayer, ArrangedAnnotation, LayerArrangement};
pub use json_contract::{
    LAYER_ARRANGEMENT_JSON_SCHEMA_V1, LayerArrangementJsonContractV1,
    OVERLAY_CONFIG_JSON_SCHEMA_V1, OverlayConfigJsonContractV1,
};
pub use overlay_config::OverlayConfig;
