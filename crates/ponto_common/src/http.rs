// --- File: crates/ponto_common/src/http.rs ---

// Shared reqwest client and the push server API built on it.
pub mod api;
pub mod client;
