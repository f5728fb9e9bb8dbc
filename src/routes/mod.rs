pub(crate) mod http;

// re-export items from sub-modules
pub use http::*;
