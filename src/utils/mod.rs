pub mod path_validator;

pub use path_validator::PathValidator;

/// Environment variable that switches on `[VERBOSE]` diagnostics.
pub const VERBOSE_ENV: &str = "VERBUMP_VERBOSE";

pub fn verbose() -> bool {
    std::env::var(VERBOSE_ENV).is_ok()
}
