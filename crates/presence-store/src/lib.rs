//! Persistence of submitted founder-presence surveys to a hosted Supabase
//! table through its `PostgREST` endpoint.

pub mod client;
pub mod error;
pub mod record;

pub use client::SupabaseStore;
pub use error::StoreError;
pub use record::SessionRecord;
