//! Constants used throughout warren.
//!
//! Centralizes file names, default variable names, and default values so the
//! builders, sync, and deep-delete all agree on the exact spelling.

/// Project configuration file name (read-only input).
pub const PROJECT_CONFIG_FILE: &str = "warren.json";

/// Framework-owned secrets file (regenerated, safe to delete).
pub const FRAMEWORK_SECRETS_FILE: &str = "secrets.framework.json";

/// User-owned secrets file (hand-edited, never clobbered).
pub const USER_SECRETS_FILE: &str = "secrets.user.json";

/// Derived merged secrets file (always regenerable from the other two).
pub const LOCAL_SECRETS_FILE: &str = "secrets.local.json";

/// Key of the per-section secret-name array before resolution.
pub const SECRETS_KEY: &str = "secrets";

/// Base entries seeded into every framework file.
pub const BASE_SECRETS: &[(&str, &str)] = &[
    ("NODE_ENV", "development"),
    ("SECRETS_PROVIDER", "local"),
    ("LOG_LEVEL", "debug"),
];

/// Local-development Redis connection constants.
pub const REDIS_SECRETS: &[(&str, &str)] = &[
    ("REDIS_HOST", "localhost"),
    ("REDIS_PORT", "6379"),
    ("REDIS_PASSWORD", ""),
];

/// Kong gateway constants for local development.
pub const KONG_SECRETS: &[(&str, &str)] = &[
    ("KONG_INTERNAL_URL", "http://localhost:8000"),
    ("KONG_SSL_ENABLED", "false"),
];

/// Variable names every backend service is entitled to.
pub const BACKEND_DEFAULT_SECRETS: &[&str] = &[
    "NODE_ENV",
    "SECRETS_PROVIDER",
    "LOG_LEVEL",
    "REDIS_HOST",
    "REDIS_PORT",
    "REDIS_PASSWORD",
];

/// Shared secret the gateway presents to backend services.
pub const GATEWAY_TRUST_TOKEN: &str = "GATEWAY_TRUST_TOKEN";

/// Framework-owned auth material (preserved across regenerations).
pub const JWT_PRIVATE_KEY: &str = "JWT_PRIVATE_KEY";
pub const JWT_PUBLIC_KEY: &str = "JWT_PUBLIC_KEY";
pub const JWT_KEY_ID: &str = "JWT_KEY_ID";
pub const JWT_REFRESH_TOKEN_SECRET: &str = "JWT_REFRESH_TOKEN_SECRET";
pub const BCRYPT_ROUNDS: &str = "BCRYPT_ROUNDS";

/// Default bcrypt cost factor, stored as a string like every other value.
pub const BCRYPT_ROUNDS_DEFAULT: &str = "12";

/// Names granted to the auth service when the auth template is enabled.
///
/// `JWT_KEY_ID` is stored top-level for stable regeneration but is not
/// injected into the service environment.
pub const AUTH_FRAMEWORK_SECRETS: &[&str] = &[
    JWT_PRIVATE_KEY,
    JWT_PUBLIC_KEY,
    JWT_REFRESH_TOKEN_SECRET,
    BCRYPT_ROUNDS,
];

/// The service that owns JWT signing material.
pub const AUTH_SERVICE: &str = "auth-service";

/// Template name that enables auth material generation.
pub const AUTH_TEMPLATE: &str = "auth";

/// User-owned defaults seeded on first run.
pub const USER_DEFAULT_SECRETS: &[(&str, &str)] = &[
    ("DOMAIN", "localhost"),
    ("APP_URL", "http://localhost:3000"),
    ("JWT_ACCESS_TOKEN_TTL", "900"),
    ("JWT_REFRESH_TOKEN_TTL", "604800"),
    ("EMAIL_CONFIRMATION_TTL", "86400"),
    ("KONG_SERVICE_HOST", "host.docker.internal"),
    ("API_URL", "http://localhost:8000"),
];

/// TTL keys re-added by structural sync when a user file lacks them.
pub const USER_TTL_SECRETS: &[(&str, &str)] = &[
    ("JWT_ACCESS_TOKEN_TTL", "900"),
    ("JWT_REFRESH_TOKEN_TTL", "604800"),
    ("EMAIL_CONFIRMATION_TTL", "86400"),
];

/// User-owned names granted to the auth service.
pub const AUTH_USER_SECRETS: &[&str] = &[
    "JWT_ACCESS_TOKEN_TTL",
    "JWT_REFRESH_TOKEN_TTL",
    "EMAIL_CONFIRMATION_TTL",
    "APP_URL",
];

/// Names granted to next.js frontends (SSR needs the gateway).
pub const NEXTJS_FRAMEWORK_SECRETS: &[&str] = &["KONG_INTERNAL_URL"];

/// Deprecated per-section property stripped by structural sync.
pub const ALLOWED_ORIGINS: &str = "ALLOWED_ORIGINS";

/// First auto-assigned Postgres port.
pub const DATABASE_PORT_BASE: u16 = 5432;
