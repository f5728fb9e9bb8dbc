pub(crate) mod claims;
pub(crate) mod login;
pub(crate) mod logout;
pub(crate) mod refresh_token;
pub(crate) mod session_data;

pub use claims::*;
pub use login::*;
pub use logout::*;
pub use refresh_token::*;
pub use session_data::*;
