pub mod event;
pub mod stats;

pub use event::{AuthEvent, BruteForceCandidate};
pub use stats::{AuthStats, FrequencyTable};
