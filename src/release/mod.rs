pub mod version;

use crate::error::Result;
use std::sync::Arc;

pub use version::{BumpLevel, Version, VersionComparator, VersionType};

/// Pre-release channel used when none is given.
pub const DEFAULT_PRE_ID: &str = "rc";

pub trait BumpStrategy: Send + Sync {
    fn next_version(&self, current: &str, level: BumpLevel) -> Result<String>;
}

#[derive(Debug)]
pub struct DefaultBumpStrategy {
    pre_id: String,
}

impl Default for DefaultBumpStrategy {
    fn default() -> Self {
        Self::new(DEFAULT_PRE_ID)
    }
}

impl DefaultBumpStrategy {
    pub fn new(pre_id: impl Into<String>) -> Self {
        Self {
            pre_id: pre_id.into(),
        }
    }

    pub fn shared(pre_id: impl Into<String>) -> Arc<dyn BumpStrategy> {
        Arc::new(Self::new(pre_id))
    }
}

impl BumpStrategy for DefaultBumpStrategy {
    fn next_version(&self, current: &str, level: BumpLevel) -> Result<String> {
        Version::parse(current).bump(level, &self.pre_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_strategy_uses_rc_channel() {
        let strategy = DefaultBumpStrategy::default();
        assert_eq!(
            strategy.next_version("1.4.0", BumpLevel::Pre).unwrap(),
            "1.4.1-rc.0"
        );
    }

    #[test]
    fn shared_strategy_keeps_custom_channel() {
        let strategy = DefaultBumpStrategy::shared("beta");
        assert_eq!(
            strategy.next_version("1.4.1-beta.0", BumpLevel::Pre).unwrap(),
            "1.4.1-beta.1"
        );
        assert_eq!(strategy.next_version("1.4.0", BumpLevel::Minor).unwrap(), "1.5.0");
    }
}
