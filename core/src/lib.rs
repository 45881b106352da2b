//! daytrack core: profile store, energy model, entry ledger, and the weekly
//! adjustment scheduler behind the daytrack CLI.
//!
//! State lives in four independent JSON records inside a local SQLite
//! key-value table; see [`store`]. The [`tracker::Tracker`] service is the
//! single mutation entry point and keeps derived profile fields consistent
//! with their inputs on every edit.

pub mod energy;
pub mod ledger;
pub mod models;
pub mod scheduler;
pub mod store;
pub mod tracker;
