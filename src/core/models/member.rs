use crate::constants::{MAX_MEMBER_ID_LENGTH, MAX_NAME_LENGTH};
use crate::core::errors::LedgerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Opaque member identifier, unique within a group.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
pub struct MemberId(String);

impl MemberId {
    pub fn new(id: impl Into<String>) -> Result<Self, LedgerError> {
        let id = id.into();
        if id.is_empty() {
            return Err(LedgerError::invalid_input(
                "member_id",
                "Invalid member id",
                "Member id cannot be empty",
            ));
        }
        if id.len() > MAX_MEMBER_ID_LENGTH {
            return Err(LedgerError::invalid_input(
                "member_id",
                "Member id too long",
                format!("Member id cannot exceed {} characters", MAX_MEMBER_ID_LENGTH),
            ));
        }
        // ':' separates the parts of a settlement id
        if id.chars().any(|c| c == ':' || c.is_whitespace() || c.is_control()) {
            return Err(LedgerError::invalid_input(
                "member_id",
                "Invalid member id",
                "Member id cannot contain ':' or whitespace",
            ));
        }
        Ok(MemberId(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for MemberId {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MemberId::new(s)
    }
}

impl TryFrom<String> for MemberId {
    type Error = LedgerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        MemberId::new(value)
    }
}

impl From<MemberId> for String {
    fn from(id: MemberId) -> Self {
        id.0
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Member {
    #[schema(value_type = String)]
    pub id: MemberId,
    pub name: String,
}

impl Member {
    pub fn new(id: MemberId, name: impl Into<String>) -> Result<Self, LedgerError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(LedgerError::invalid_input(
                "name",
                "Invalid name",
                "Member name cannot be empty",
            ));
        }
        if name.len() > MAX_NAME_LENGTH {
            return Err(LedgerError::invalid_input(
                "name",
                "Name too long",
                format!("Member name cannot exceed {} characters", MAX_NAME_LENGTH),
            ));
        }
        Ok(Member { id, name })
    }
}
