pub mod app_config;
pub mod config;
pub mod error;
pub mod types;
pub mod vocabulary;

pub use app_config::{AppConfig, PauseRange};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::ConfigError;
pub use types::{
    EnrichmentResult, EnrichmentSource, HotelBlock, HotelCandidate, PostRecord, ProfileRecord,
    RawPostFields, SponsorReason, SponsorshipVerdict,
};
pub use vocabulary::{load_vocabulary, DetectionVocabulary};
