//! Constants used throughout e3db-cli.
//!
//! Centralizes magic strings and configuration values.

/// Program name used to prefix fatal error messages.
pub const PROGRAM: &str = "e3db-cli";

/// Configuration directory relative to HOME (~/.e3db).
pub const CONFIG_DIR: &str = ".e3db";

/// Environment variable overriding the configuration directory.
pub const CONFIG_DIR_ENV: &str = "E3DB_CONFIG_DIR";

/// Environment variable holding a tracing filter directive.
pub const LOG_ENV: &str = "E3DB_LOG";

/// Default profile file name inside the configuration directory.
pub const DEFAULT_PROFILE_FILE: &str = "config.toml";

/// Directory holding named profiles, relative to the configuration directory.
pub const PROFILES_DIR: &str = "profiles";

/// Directory name of the default local service, relative to the configuration directory.
pub const SERVICE_DIR: &str = "service";

/// Current profile format version.
pub const PROFILE_VERSION: u32 = 1;

/// Maximum length of a profile name.
pub const MAX_PROFILE_NAME_LEN: usize = 64;

/// Number of records requested per query page.
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Width of the record ID column in plain listings.
pub const RECORD_ID_WIDTH: usize = 40;

/// URL scheme served by the local service.
pub const FILE_SCHEME: &str = "file://";
