//! Application-wide constants
//!
//! Centralized location for magic values to improve maintainability.

// =============================================================================
// Pagination
// =============================================================================

/// Default number of items per page (matches the persisted document default)
pub const DEFAULT_PAGE_SIZE: u64 = 6;

/// Maximum allowed items per page to prevent excessive responses
pub const MAX_PAGE_SIZE: u64 = 100;

/// Default starting page number (1-indexed)
pub const DEFAULT_PAGE_NUMBER: u64 = 1;

// =============================================================================
// Authentication & Security
// =============================================================================

/// Default JWT token expiration in hours
pub const DEFAULT_JWT_EXPIRATION_HOURS: i64 = 24;

/// Minimum JWT secret length (security requirement)
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

/// Seconds per hour (for token expiration calculation)
pub const SECONDS_PER_HOUR: i64 = 3600;

/// Authorization header prefix for Bearer tokens
pub const BEARER_TOKEN_PREFIX: &str = "Bearer ";

/// JWT token type identifier
pub const TOKEN_TYPE_BEARER: &str = "Bearer";

// =============================================================================
// Server Configuration
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 3000;

// =============================================================================
// Storage
// =============================================================================

/// Default path of the JSON document holding the user collection
pub const DEFAULT_DATA_FILE: &str = "data/users.json";

// =============================================================================
// Seed record
// =============================================================================

/// Email of the record seeded into a freshly created data file
pub const SEED_USER_EMAIL: &str = "george.bluth@reqres.in";

/// First name of the seed record
pub const SEED_USER_FIRST_NAME: &str = "George";

/// Last name of the seed record
pub const SEED_USER_LAST_NAME: &str = "Bluth";

/// Avatar of the seed record
pub const SEED_USER_AVATAR: &str = "https://reqres.in/img/faces/1-image.jpg";

/// Plain password of the seed record, hashed at seed time.
/// Also the fallback for user forms that omit the password.
pub const DEFAULT_USER_PASSWORD: &str = "1234";

/// Placeholder avatar assigned when a create form omits one
pub fn default_avatar_url(id: u64) -> String {
    format!("https://reqres.in/img/faces/{}-image.jpg", id)
}
