//! Write policies

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tierstore::Error;

/// When dirty data reaches the backing store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WritePolicy {
    /// Every write goes to the cache and the backing store at once
    WriteThrough,
    /// Writes only dirty the cache line; the store sees them on eviction
    WriteBack,
}

impl WritePolicy {
    /// Both policies, in comparison order
    pub const ALL: [WritePolicy; 2] = [WritePolicy::WriteThrough, WritePolicy::WriteBack];

    /// Canonical snake_case name
    pub fn as_str(&self) -> &'static str {
        match self {
            WritePolicy::WriteThrough => "write_through",
            WritePolicy::WriteBack => "write_back",
        }
    }
}

impl fmt::Display for WritePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WritePolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "write_through" | "wt" => Ok(WritePolicy::WriteThrough),
            "write_back" | "wb" => Ok(WritePolicy::WriteBack),
            _ => Err(Error::UnknownPolicy(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names() {
        assert_eq!("write_through".parse::<WritePolicy>().unwrap(), WritePolicy::WriteThrough);
        assert_eq!("Write-Back".parse::<WritePolicy>().unwrap(), WritePolicy::WriteBack);
        assert_eq!("wt".parse::<WritePolicy>().unwrap(), WritePolicy::WriteThrough);
        assert_eq!(" wb ".parse::<WritePolicy>().unwrap(), WritePolicy::WriteBack);
    }

    #[test]
    fn test_parse_unknown() {
        let err = "write_around".parse::<WritePolicy>().unwrap_err();
        assert!(matches!(err, Error::UnknownPolicy(name) if name == "write_around"));
    }

    #[test]
    fn test_display_roundtrips() {
        for policy in WritePolicy::ALL {
            assert_eq!(policy.to_string().parse::<WritePolicy>().unwrap(), policy);
        }
    }
}
