//! Hash collections used throughout the workspace.
//!
//! FxHash is unseeded, so iteration order is stable for identical insertion
//! sequences — but it is still hash order. Any map whose contents reach an
//! externally visible output must be sorted explicitly before emission.

pub use rustc_hash::{FxHashMap, FxHashSet};
