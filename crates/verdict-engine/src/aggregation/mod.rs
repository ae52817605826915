//! The aggregation engine: weighted consensus with uncertainty preservation.

pub mod engine;
pub mod entropy;
pub mod numeric;

pub use engine::aggregate;
pub use entropy::shannon_entropy_bits;
pub use numeric::weighted_summary;
