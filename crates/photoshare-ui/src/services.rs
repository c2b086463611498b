//! HTTP clients for the hosted backend.

pub(crate) mod supabase;
