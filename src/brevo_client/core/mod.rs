pub mod http;
pub mod pagination;
pub mod upsert;
