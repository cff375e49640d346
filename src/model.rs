//! Wire types for the cat image/voting API
//!
//! Every response body is deserialized into one of these shapes at the
//! client boundary; a mismatch fails the call instead of leaking malformed
//! data into the cache.

use serde::{Deserialize, Serialize};

/// A cat image as returned by the list endpoint
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Image {
    pub id: String,
    pub url: String,
    /// Present when the current user has favourited this image
    #[serde(default)]
    pub favourite: Option<FavouriteRef>,
}

/// Reference to the favourite record attached to an image
///
/// Unfavouriting deletes this record by its own id, not the image id.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FavouriteRef {
    pub id: i64,
}

/// A single vote event from the raw vote log
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Vote {
    pub id: i64,
    pub image_id: String,
    /// Arbitrary magnitude; only the sign counts towards the score
    pub value: i64,
}

/// Direction of a vote cast by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteDirection {
    Up,
    Down,
}

impl VoteDirection {
    /// The unit value sent to the API and applied optimistically
    pub fn value(self) -> i64 {
        match self {
            VoteDirection::Up => 1,
            VoteDirection::Down => -1,
        }
    }
}

/// Request body for casting a vote
#[derive(Debug, Clone, Serialize)]
pub struct VotePayload {
    pub image_id: String,
    pub value: i64,
}

/// Request body for favouriting an image
#[derive(Debug, Clone, Serialize)]
pub struct FavouritePayload {
    pub image_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_without_favourite() {
        let image: Image =
            serde_json::from_str(r#"{"id":"abc","url":"https://cdn.example/abc.jpg"}"#).unwrap();
        assert_eq!(image.id, "abc");
        assert!(image.favourite.is_none());
    }

    #[test]
    fn test_image_with_favourite() {
        let image: Image = serde_json::from_str(
            r#"{"id":"abc","url":"https://cdn.example/abc.jpg","favourite":{"id":42}}"#,
        )
        .unwrap();
        assert_eq!(image.favourite.unwrap().id, 42);
    }

    #[test]
    fn test_image_ignores_unknown_fields() {
        let image: Image = serde_json::from_str(
            r#"{"id":"abc","url":"u","width":640,"height":480,"breeds":[]}"#,
        )
        .unwrap();
        assert_eq!(image.id, "abc");
    }

    #[test]
    fn test_vote_direction_values() {
        assert_eq!(VoteDirection::Up.value(), 1);
        assert_eq!(VoteDirection::Down.value(), -1);
    }
}
