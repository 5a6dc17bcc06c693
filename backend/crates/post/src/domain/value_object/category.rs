//! Post Category
//!
//! Closed set of categories a post can be filed under.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Music,
    Funny,
    Videos,
    Programming,
    News,
    Fashion,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Music,
        Category::Funny,
        Category::Videos,
        Category::Programming,
        Category::News,
        Category::Fashion,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Category::Music => "music",
            Category::Funny => "funny",
            Category::Videos => "videos",
            Category::Programming => "programming",
            Category::News => "news",
            Category::Fashion => "fashion",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_and_unknown() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
        }
        assert!("Music".parse::<Category>().is_err());
        assert!("politics".parse::<Category>().is_err());
    }

    #[test]
    fn serde_is_lowercase() {
        assert_eq!(serde_json::to_string(&Category::Programming).unwrap(), r#""programming""#);
        assert!(serde_json::from_str::<Category>(r#""sports""#).is_err());
    }
}
