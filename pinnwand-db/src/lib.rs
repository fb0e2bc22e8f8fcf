pub mod client;
pub mod record;
pub mod store;
