//! Validation trait definition

/// Validation trait for configuration structures
///
/// Errors are plain messages; [`crate::config::Config::validate`] tags them
/// with the section that failed.
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}
