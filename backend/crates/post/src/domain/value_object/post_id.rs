//! Post ID
//!
//! 24 lowercase hex characters, the canonical form of the store's ObjectId.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{PostError, PostResult};

pub const POST_ID_LEN: usize = 24;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(String);

impl PostId {
    /// Validates hex form; anything else is `PostError::InvalidId`.
    pub fn parse(raw: &str) -> PostResult<Self> {
        if raw.len() != POST_ID_LEN || !raw.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(PostError::InvalidId);
        }
        Ok(Self(raw.to_ascii_lowercase()))
    }

    /// Wraps an id minted by a repository.
    pub(crate) fn from_trusted(hex: String) -> Self {
        Self(hex)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_hex_only() {
        let id = PostId::parse("65A1F0C2B3D4E5F60718293A").unwrap();
        assert_eq!(id.as_str(), "65a1f0c2b3d4e5f60718293a");

        assert!(matches!(PostId::parse("zzzzzzzzzzzzzzzzzzzzzzzz"), Err(PostError::InvalidId)));
        assert!(matches!(PostId::parse("65a1f0"), Err(PostError::InvalidId)));
    }
}
