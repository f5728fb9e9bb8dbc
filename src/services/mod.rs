pub mod cache_session;
pub mod data_stores;
pub mod hashmap_session_store;
pub mod memory_session;
pub mod token_provider;
pub mod token_service;

pub use cache_session::*;
pub use data_stores::*;
pub use hashmap_session_store::*;
pub use memory_session::*;
pub use token_provider::*;
pub use token_service::*;
