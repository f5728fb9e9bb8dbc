pub mod claims;
pub mod data_stores;
pub mod issued_credentials;
pub mod login_request;
pub mod login_response;
pub mod logout_response;
pub mod provider;
pub mod session;
pub mod session_value;
pub mod token_claims;
pub mod update_claims_request;

pub use claims::*;
pub use data_stores::*;
pub use issued_credentials::*;
pub use login_request::*;
pub use login_response::*;
pub use logout_response::*;
pub use provider::*;
pub use session::*;
pub use session_value::*;
pub use token_claims::*;
pub use update_claims_request::*;
