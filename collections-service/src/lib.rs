//! Client credit and field-collections engine.
//!
//! Aggregates a retail client's credit plans, installments, and purchase
//! history into coherent summaries; scores client trustworthiness; governs
//! the deactivation lifecycle; tracks field-collection actions; exports
//! filtered snapshots; and sequences visit routes.
//!
//! Persistence is reached exclusively through the [`store::RecordStore`]
//! seam; an in-memory adapter lives in [`store::memory`].

pub mod engine;
pub mod models;
pub mod services;
pub mod store;

pub use engine::Engine;
