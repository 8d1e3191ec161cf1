/// API version segment used in route paths.
pub const API_VERSION: &str = "v1";

/// Full path prefix for versioned routes.
pub const API_PREFIX: &str = "/api/v1";
