//! Backend client context for sharing a singleton client instance.
//!
//! # Design
//! - Create exactly one client per app boot.
//! - Swap the bearer token via interior mutability instead of rebuilding.

use crate::core::config::BackendConfig;
use crate::services::supabase::SupabaseClient;
use std::rc::Rc;

/// Shared backend client context for pages and components.
#[derive(Clone)]
pub(crate) struct ApiCtx {
    /// Singleton client instance.
    pub client: Rc<SupabaseClient>,
}

impl ApiCtx {
    /// Create a new context for the configured deployment.
    pub(crate) fn new(config: BackendConfig) -> Self {
        Self {
            client: Rc::new(SupabaseClient::new(config)),
        }
    }
}

impl PartialEq for ApiCtx {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.client, &other.client)
    }
}
