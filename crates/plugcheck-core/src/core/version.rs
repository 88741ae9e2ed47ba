use crate::core::error::{PlugcheckError, PlugcheckResult};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A semantic version as used by module lock files.
///
/// Requires the leading `v` (`v1.2.3`) and accepts the `vMAJOR` and
/// `vMAJOR.MINOR` shorthands, pre-release identifiers (`v1.0.0-rc.1`,
/// pseudo-versions such as `v0.0.0-20190204201341-e444a5086c43`) and build
/// metadata (`+incompatible`). Numeric parts have no leading zeros and no
/// size limit; they are kept as digit strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Version {
    pub major: String,
    pub minor: String,
    pub patch: String,
    /// Pre-release version (e.g., "alpha.1", "beta.2", "rc.1")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prerelease: Option<String>,
    /// Build metadata (e.g., "incompatible")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_metadata: Option<String>,
}

impl Version {
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major: major.to_string(),
            minor: minor.to_string(),
            patch: patch.to_string(),
            prerelease: None,
            build_metadata: None,
        }
    }

    /// Parse a version token (e.g., "v1.2.3", "v1.2.3-alpha.1", "v59.3.0+incompatible")
    pub fn parse(s: &str) -> PlugcheckResult<Self> {
        let raw = s.trim();
        let Some(s) = raw.strip_prefix('v') else {
            return Err(PlugcheckError::Version(format!(
                "Invalid version format: {}",
                raw
            )));
        };

        let (version_prerelease, build_metadata) = match s.split_once('+') {
            Some((rest, build)) => {
                validate_identifiers(raw, build, false)?;
                (rest, Some(build.to_string()))
            }
            None => (s, None),
        };

        // The pre-release starts at the first dash: pseudo-versions carry more than one.
        let (version_part, prerelease) = match version_prerelease.split_once('-') {
            Some((core, pre)) => {
                validate_identifiers(raw, pre, true)?;
                (core, Some(pre.to_string()))
            }
            None => (version_prerelease, None),
        };

        let parts: Vec<&str> = version_part.split('.').collect();
        if parts.len() > 3 {
            return Err(PlugcheckError::Version(format!(
                "Invalid version format: {}",
                raw
            )));
        }
        // Shorthands may not carry a pre-release or build suffix.
        if parts.len() < 3 && (prerelease.is_some() || build_metadata.is_some()) {
            return Err(PlugcheckError::Version(format!(
                "Invalid version format: {}",
                raw
            )));
        }

        let number = |part: Option<&&str>, what: &str| -> PlugcheckResult<String> {
            match part {
                None => Ok("0".to_string()),
                Some(p) if is_number(p) => Ok(p.to_string()),
                Some(_) => Err(PlugcheckError::Version(format!(
                    "Invalid {} version: {}",
                    what, raw
                ))),
            }
        };

        Ok(Self {
            major: number(parts.first(), "major")?,
            minor: number(parts.get(1), "minor")?,
            patch: number(parts.get(2), "patch")?,
            prerelease,
            build_metadata,
        })
    }
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// A decimal number without leading zeros.
fn is_number(s: &str) -> bool {
    is_digits(s) && (s == "0" || !s.starts_with('0'))
}

fn validate_identifiers(raw: &str, ids: &str, prerelease: bool) -> PlugcheckResult<()> {
    let valid = !ids.is_empty()
        && ids.split('.').all(|id| {
            !id.is_empty()
                && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
                && !(prerelease && is_digits(id) && !is_number(id))
        });
    if valid {
        Ok(())
    } else {
        Err(PlugcheckError::Version(format!(
            "Invalid version format: {}",
            raw
        )))
    }
}

/// Compare digit strings without leading zeros: the longer one is larger.
fn compare_numbers(a: &str, b: &str) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

// Equality ignores build metadata, matching precedence.
impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.major == other.major
            && self.minor == other.minor
            && self.patch == other.patch
            && self.prerelease == other.prerelease
    }
}

impl Eq for Version {}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let core = compare_numbers(&self.major, &other.major)
            .then_with(|| compare_numbers(&self.minor, &other.minor))
            .then_with(|| compare_numbers(&self.patch, &other.patch));
        match core {
            Ordering::Equal => match (&self.prerelease, &other.prerelease) {
                (None, None) => Ordering::Equal,
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (Some(a), Some(b)) => compare_prerelease_identifiers(a, b),
            },
            other => other,
        }
    }
}

/// Compare pre-release identifiers by SemVer precedence.
fn compare_prerelease_identifiers(a: &str, b: &str) -> Ordering {
    let a_parts: Vec<&str> = a.split('.').collect();
    let b_parts: Vec<&str> = b.split('.').collect();

    for (a_part, b_part) in a_parts.iter().zip(b_parts.iter()) {
        let ordering = match (is_digits(a_part), is_digits(b_part)) {
            (true, true) => compare_numbers(a_part, b_part),
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => a_part.cmp(b_part),
        };

        if ordering != Ordering::Equal {
            return ordering;
        }
    }

    a_parts.len().cmp(&b_parts.len())
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(ref pre) = self.prerelease {
            write!(f, "-{}", pre)?;
        }
        if let Some(ref build) = self.build_metadata {
            write!(f, "+{}", build)?;
        }
        Ok(())
    }
}

/// Compare two version tokens by semantic-version precedence.
///
/// Tokens that do not parse (including the empty string) order below every
/// valid version and equal to each other.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    match (Version::parse(a).ok(), Version::parse(b).ok()) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => Ordering::Equal,
    }
}
