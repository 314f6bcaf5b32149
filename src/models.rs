use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Case-sensitive user identifier on the platform.
pub type Handle = String;

/// Handles the user has pinned to the top of the panel.
pub type PinSet = HashSet<Handle>;

/// One entry of a `user.info` response. Fields other than `handle` and
/// `rating` are ignored; unrated users have no `rating` field at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRating {
    pub handle: Handle,
    #[serde(default)]
    pub rating: Option<i64>,
}

impl UserRating {
    pub fn new(handle: impl Into<Handle>, rating: Option<i64>) -> Self {
        Self {
            handle: handle.into(),
            rating,
        }
    }
}
