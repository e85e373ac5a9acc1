//! Ads Verification Dashboard client library
//!
//! Client side of the ad-presence verification dashboard: submits Instagram
//! handle / domain verifications, polls the backend until every platform
//! check has finished, looks up company partners (QSA) by CNPJ and scores
//! leads locally.
//!
//! # Modules
//!
//! - `cnpj`: CNPJ input mask and digit extraction.
//! - `config`: Configuration management.
//! - `dashboard`: Dashboard controller (submit, poll, reset, lookup, score).
//! - `dashboard_client`: Backend API trait and its HTTP client.
//! - `errors`: Error handling types.
//! - `models`: Wire and domain models.
//! - `polling`: Polling session lifecycle.
//! - `render`: Status labels and verification cards.
//! - `scoring`: Lead qualification scoring.
//! - `view`: UI state of the dashboard page.

pub mod cnpj;
pub mod config;
pub mod dashboard;
pub mod dashboard_client;
pub mod errors;
pub mod models;
pub mod polling;
pub mod render;
pub mod scoring;
pub mod view;
