mod builder;
mod error;
mod metrics;
mod policy;
pub mod tiebreak;

pub use builder::HybridBuilder;
pub use error::PolicyError;
pub use metrics::stats::Metrics;
pub use policy::hybrid::{ArmWeights, HybridPolicy};
pub use policy::lfu::LfuPolicy;
pub use policy::lru::LruPolicy;
pub use policy::{Arm, Policy};
