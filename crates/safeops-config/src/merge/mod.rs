//! Deep merge of TOML values across file layers.
//!
//! The merge operates on raw [`toml::Value`] trees rather than deserialized
//! structs. A missing key in a TOML table never overrides the base layer, so
//! absence at one layer falls through to the layer below.

mod deep;
mod types;

pub use deep::deep_merge_tracking;
pub(crate) use deep::record_all_leaves;
pub use types::{ConfigLayer, FieldSources};
