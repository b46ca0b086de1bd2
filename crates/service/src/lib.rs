//! Storage layer for call-control documents (NCCOs) grouped in named buckets.
//! - `bucket` holds the storage contract, the in-memory store, the
//!   instrumented decorator and the registry/handle layer.
//! - `ncco` validates documents before they reach storage.
//! - `errors` defines the storage error taxonomy.

pub mod errors;
pub mod bucket;
pub mod ncco;
