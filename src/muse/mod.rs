// The Muse jobs API: response types and the paginated HTTP client.

pub mod client;
pub mod models;
