//! Role types for conversation participants.

use serde::{Deserialize, Serialize};

/// Vendor-neutral conversation roles.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    /// Lowercase name of the role.
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}
