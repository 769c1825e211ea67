//! Core constants shared by the Cronofy crates: data-center endpoints,
//! HTTP reason phrases and tracing setup.

pub mod region;
pub mod status;
pub mod tracing;

pub use self::tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
pub use region::{DataCenter, KNOWN_DATA_CENTERS};
pub use status::{UNKNOWN_STATUS_PHRASE, is_success, reason_phrase, reason_phrase_or_unknown};
