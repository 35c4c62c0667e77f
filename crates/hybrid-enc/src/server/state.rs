//! Shared application state injected into every Axum handler.

use std::sync::Arc;

use openapiv3::OpenAPI;

use crate::keys::KeyRing;

/// Application state shared across all request handlers.
///
/// All fields are `Arc`-wrapped so that Axum can clone the state for each
/// request without copying key material or the API document.
#[derive(Clone)]
pub struct AppState {
    /// Immutable RSA key pair, parsed once at startup.
    pub keys: Arc<KeyRing>,
    /// The OpenAPI document served at `/api-docs`.
    pub api_docs: Arc<OpenAPI>,
}

impl AppState {
    /// Create a new [`AppState`] from the parsed key ring and API document.
    pub fn new(keys: KeyRing, api_docs: OpenAPI) -> Self {
        Self {
            keys: Arc::new(keys),
            api_docs: Arc::new(api_docs),
        }
    }
}

impl Default for AppState {
    /// Creates a default [`AppState`] with no key material, suitable for tests.
    fn default() -> Self {
        Self::new(KeyRing::empty(), OpenAPI::default())
    }
}
