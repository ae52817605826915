//! Authority tracking: the dynamic weight each contributor carries in
//! aggregation, combining credentials, history, and recent performance.

pub mod tracker;

pub use tracker::{
    authority_table, compute_authority, update_recent_performance, update_track_record,
};
