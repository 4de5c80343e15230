mod settings;

pub use settings::{DispatchConfig, InferenceConfig, ScoringConfig, StoreConfig};
