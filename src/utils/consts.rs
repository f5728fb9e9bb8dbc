pub const DEFAULT_ACCESS_COOKIE_NAME: &str = "access";
pub const DEFAULT_REFRESH_COOKIE_NAME: &str = "refresh";
pub const DEFAULT_SESSION_KEY_PREFIX: &str = "session:";
pub const DEFAULT_REDIS_HOST: &str = "127.0.0.1:6379";
pub const DEFAULT_BACKEND_TIMEOUT_MS: u64 = 500;

/// Request header carrying the refresh credential on `/refresh-token`.
pub const REFRESH_TOKEN_HEADER: &str = "x-refresh-token";
/// Response headers echoing newly minted credentials.
pub const ACCESS_TOKEN_RESPONSE_HEADER: &str = "x-access-token";
pub const REFRESH_TOKEN_RESPONSE_HEADER: &str = "x-refresh-token";

pub const REFRESH_COOKIE_PATH: &str = "/refresh-token";

/// Hash field holding the owning user id. Written with every record so that a
/// session created without seed data still exists in the backend.
pub const USER_ID_FIELD: &str = "_uid";
