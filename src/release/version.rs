use crate::error::{Result, VerbumpError};
use semver::{BuildMetadata, Prerelease};
use std::cmp::Ordering;
use std::fmt;

/// Version token read from a manifest, classified by shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    pub original: String,
    pub parsed: VersionType,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionType {
    Semantic(semver::Version),
    /// Dotted integers that are not full semver, e.g. `1.2` or `2024.10.1.3`.
    Numeric(Vec<u64>),
    Unknown(String),
}

/// Which part of a version to increment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BumpLevel {
    Major,
    Minor,
    Patch,
    Pre,
}

impl BumpLevel {
    fn index(self) -> Option<usize> {
        match self {
            BumpLevel::Major => Some(0),
            BumpLevel::Minor => Some(1),
            BumpLevel::Patch => Some(2),
            BumpLevel::Pre => None,
        }
    }
}

impl fmt::Display for BumpLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BumpLevel::Major => "major",
            BumpLevel::Minor => "minor",
            BumpLevel::Patch => "patch",
            BumpLevel::Pre => "pre",
        };
        f.write_str(name)
    }
}

impl Version {
    pub fn parse(version: &str) -> Self {
        let parsed = if let Ok(v) = semver::Version::parse(version) {
            VersionType::Semantic(v)
        } else if let Some(numeric) = Self::parse_numeric(version) {
            VersionType::Numeric(numeric)
        } else {
            VersionType::Unknown(version.to_string())
        };

        Version {
            original: version.to_string(),
            parsed,
        }
    }

    fn parse_numeric(version: &str) -> Option<Vec<u64>> {
        let mut numbers = Vec::new();

        for part in version.split('.') {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            numbers.push(part.parse::<u64>().ok()?);
        }

        if numbers.is_empty() {
            None
        } else {
            Some(numbers)
        }
    }

    pub fn is_prerelease(&self) -> bool {
        match &self.parsed {
            VersionType::Semantic(v) => !v.pre.is_empty(),
            _ => false,
        }
    }

    /// Computes the version that follows this one at `level`.
    ///
    /// `pre_id` names the pre-release channel used by [`BumpLevel::Pre`].
    pub fn bump(&self, level: BumpLevel, pre_id: &str) -> Result<String> {
        match &self.parsed {
            VersionType::Semantic(v) => self.bump_semantic(v, level, pre_id),
            VersionType::Numeric(parts) => self.bump_numeric(parts, level),
            VersionType::Unknown(raw) => Err(VerbumpError::InvalidVersion(format!(
                "cannot bump '{raw}': not a semantic or dotted numeric version"
            ))),
        }
    }

    fn increment(&self, value: u64) -> Result<u64> {
        value.checked_add(1).ok_or_else(|| {
            VerbumpError::InvalidVersion(format!(
                "cannot bump '{}': component {value} would overflow",
                self.original
            ))
        })
    }

    fn bump_semantic(
        &self,
        current: &semver::Version,
        level: BumpLevel,
        pre_id: &str,
    ) -> Result<String> {
        let mut next = current.clone();
        next.build = BuildMetadata::EMPTY;

        match level {
            BumpLevel::Major => {
                next.major = self.increment(current.major)?;
                next.minor = 0;
                next.patch = 0;
                next.pre = Prerelease::EMPTY;
            }
            BumpLevel::Minor => {
                next.minor = self.increment(current.minor)?;
                next.patch = 0;
                next.pre = Prerelease::EMPTY;
            }
            BumpLevel::Patch => {
                // 1.2.3-rc.1 is released as 1.2.3
                if current.pre.is_empty() {
                    next.patch = self.increment(current.patch)?;
                }
                next.pre = Prerelease::EMPTY;
            }
            BumpLevel::Pre => {
                if current.pre.is_empty() {
                    next.patch = self.increment(current.patch)?;
                }
                next.pre = self.next_prerelease(&current.pre, pre_id)?;
            }
        }

        Ok(next.to_string())
    }

    fn next_prerelease(&self, current: &Prerelease, pre_id: &str) -> Result<Prerelease> {
        if pre_id.is_empty() {
            return Err(VerbumpError::InvalidVersion(
                "pre-release identifier must not be empty".to_string(),
            ));
        }

        let counter = current
            .as_str()
            .strip_prefix(pre_id)
            .and_then(|rest| rest.strip_prefix('.'))
            .and_then(|n| n.parse::<u64>().ok());

        let next = match counter {
            Some(n) => format!("{pre_id}.{}", self.increment(n)?),
            None => format!("{pre_id}.0"),
        };

        Ok(Prerelease::new(&next)?)
    }

    fn bump_numeric(&self, parts: &[u64], level: BumpLevel) -> Result<String> {
        let index = level.index().ok_or_else(|| {
            VerbumpError::InvalidVersion(format!(
                "cannot create a pre-release of '{}': not a semantic version",
                self.original
            ))
        })?;

        let mut next = parts.to_vec();
        if next.len() <= index {
            next.resize(index + 1, 0);
        }
        next[index] = self.increment(next[index])?;
        for part in next.iter_mut().skip(index + 1) {
            *part = 0;
        }

        Ok(next
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join("."))
    }

    /// Release components as dotted integers, `[major, minor, patch]` for semver.
    fn components(&self) -> Option<Vec<u64>> {
        match &self.parsed {
            VersionType::Semantic(v) => Some(vec![v.major, v.minor, v.patch]),
            VersionType::Numeric(parts) => Some(parts.clone()),
            VersionType::Unknown(_) => None,
        }
    }
}

fn compare_components(a: &[u64], b: &[u64]) -> Ordering {
    let len = a.len().max(b.len());
    (0..len)
        .map(|i| {
            let av = a.get(i).copied().unwrap_or(0);
            let bv = b.get(i).copied().unwrap_or(0);
            av.cmp(&bv)
        })
        .find(|ord| ord.is_ne())
        .unwrap_or(Ordering::Equal)
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Orders unknown tokens below recognised ones, then by release components,
/// then pre-release (a pre-release sorts before its release), then the raw
/// text, so only identical tokens compare equal.
impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let ordering = match (&self.parsed, &other.parsed) {
            (VersionType::Semantic(a), VersionType::Semantic(b)) => a.cmp(b),
            _ => match (self.components(), other.components()) {
                (Some(a), Some(b)) => compare_components(&a, &b)
                    .then_with(|| other.is_prerelease().cmp(&self.is_prerelease())),
                (Some(_), None) => Ordering::Greater,
                (None, Some(_)) => Ordering::Less,
                (None, None) => Ordering::Equal,
            },
        };

        ordering.then_with(|| self.original.cmp(&other.original))
    }
}

pub struct VersionComparator;

impl VersionComparator {
    /// Check if version `a` is newer than version `b`
    pub fn is_newer(a: &str, b: &str) -> bool {
        Version::parse(a) > Version::parse(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bump(version: &str, level: BumpLevel) -> String {
        Version::parse(version).bump(level, "rc").unwrap()
    }

    #[test]
    fn classifies_versions() {
        assert!(matches!(Version::parse("1.2.3").parsed, VersionType::Semantic(_)));
        assert_eq!(Version::parse("1.2").parsed, VersionType::Numeric(vec![1, 2]));
        assert!(matches!(Version::parse("next").parsed, VersionType::Unknown(_)));
        assert!(Version::parse("1.0.0-rc.1").is_prerelease());
    }

    #[test]
    fn bumps_semantic_levels() {
        assert_eq!(bump("1.2.3", BumpLevel::Major), "2.0.0");
        assert_eq!(bump("1.2.3", BumpLevel::Minor), "1.3.0");
        assert_eq!(bump("1.2.3", BumpLevel::Patch), "1.2.4");
        assert_eq!(bump("1.2.3+build.9", BumpLevel::Patch), "1.2.4");
    }

    #[test]
    fn patch_releases_a_prerelease() {
        assert_eq!(bump("1.2.3-rc.2", BumpLevel::Patch), "1.2.3");
        assert_eq!(bump("1.2.3-rc.2", BumpLevel::Minor), "1.3.0");
    }

    #[test]
    fn bumps_prerelease_counter() {
        assert_eq!(bump("1.2.3", BumpLevel::Pre), "1.2.4-rc.0");
        assert_eq!(bump("1.2.4-rc.0", BumpLevel::Pre), "1.2.4-rc.1");
        assert_eq!(bump("1.2.4-alpha.3", BumpLevel::Pre), "1.2.4-rc.0");
        assert_eq!(
            Version::parse("0.1.0-beta.4").bump(BumpLevel::Pre, "beta").unwrap(),
            "0.1.0-beta.5"
        );
    }

    #[test]
    fn rejects_bad_prerelease_identifier() {
        let version = Version::parse("1.0.0");
        assert!(version.bump(BumpLevel::Pre, "").is_err());
        assert!(version.bump(BumpLevel::Pre, "not valid").is_err());
    }

    #[test]
    fn bumps_numeric_versions() {
        assert_eq!(bump("2024.10", BumpLevel::Minor), "2024.11");
        assert_eq!(bump("1.2", BumpLevel::Patch), "1.2.1");
        assert_eq!(bump("1", BumpLevel::Minor), "1.1");
        assert_eq!(bump("1.2.3.4", BumpLevel::Minor), "1.3.0.0");
        assert!(Version::parse("1.2").bump(BumpLevel::Pre, "rc").is_err());
    }

    #[test]
    fn refuses_unknown_versions() {
        let err = Version::parse("next").bump(BumpLevel::Patch, "rc").unwrap_err();
        assert!(matches!(err, VerbumpError::InvalidVersion(_)));
    }

    #[test]
    fn refuses_to_overflow_components() {
        for (version, level) in [
            ("18446744073709551615.0.0", BumpLevel::Major),
            ("1.18446744073709551615.0", BumpLevel::Minor),
            ("1.0.18446744073709551615", BumpLevel::Patch),
            ("1.0.18446744073709551615", BumpLevel::Pre),
            ("1.0.0-rc.18446744073709551615", BumpLevel::Pre),
            ("1.18446744073709551615", BumpLevel::Minor),
        ] {
            let err = Version::parse(version).bump(level, "rc").unwrap_err();
            assert!(
                matches!(err, VerbumpError::InvalidVersion(_)),
                "{version} {level}"
            );
        }
    }

    #[test]
    fn signed_tokens_are_not_numeric() {
        assert!(matches!(Version::parse("+1.2").parsed, VersionType::Unknown(_)));
        assert!(matches!(Version::parse("1..2").parsed, VersionType::Unknown(_)));
        assert!(Version::parse("+1.2").bump(BumpLevel::Minor, "rc").is_err());
    }

    #[test]
    fn compares_semantic_with_numeric() {
        assert!(VersionComparator::is_newer("10.0", "9.0.0"));
        assert!(VersionComparator::is_newer("1.10", "1.9.0"));
        assert!(VersionComparator::is_newer("2.0.0", "1.99"));
        assert!(VersionComparator::is_newer("1.0", "1.0.0-rc.1"));
        assert!(!VersionComparator::is_newer("1.0.0-rc.1", "1.0"));
    }

    #[test]
    fn ordering_agrees_with_equality() {
        let a = Version::parse("1.02");
        let b = Version::parse("1.2");
        assert_ne!(a, b);
        assert_ne!(a.cmp(&b), Ordering::Equal);
        assert_eq!(a.cmp(&b), b.cmp(&a).reverse());
        assert_eq!(Version::parse("1.2").cmp(&Version::parse("1.2")), Ordering::Equal);
    }

    #[test]
    fn compares_versions() {
        assert!(VersionComparator::is_newer("1.0.1", "1.0.0"));
        assert!(VersionComparator::is_newer("1.0.0", "1.0.0-rc.1"));
        assert!(VersionComparator::is_newer("1.10", "1.9"));
        assert!(!VersionComparator::is_newer("0.9.0", "1.0.0"));
        assert!(!VersionComparator::is_newer("next", "0.1.0"));
    }
}
