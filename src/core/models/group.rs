use super::member::{Member, MemberId};
use crate::constants::MAX_NAME_LENGTH;
use crate::core::errors::LedgerError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Group {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub members: Vec<Member>,
    /// Bumped whenever the group's expense log changes; settlement ids carry it.
    pub revision: u64,
    #[schema(value_type = String, example = "2025-08-15T12:00:00Z")]
    pub created_at: DateTime<Utc>,
}

impl Group {
    pub fn new(name: String, description: Option<String>, members: Vec<Member>) -> Result<Self, LedgerError> {
        if name.trim().is_empty() {
            return Err(LedgerError::invalid_input("name", "Invalid name", "Group name cannot be empty"));
        }
        if name.len() > MAX_NAME_LENGTH {
            return Err(LedgerError::invalid_input(
                "name",
                "Name too long",
                format!("Group name cannot exceed {} characters", MAX_NAME_LENGTH),
            ));
        }
        if members.is_empty() {
            return Err(LedgerError::invalid_input(
                "members",
                "No members",
                "A group needs at least one member",
            ));
        }
        let mut seen = HashSet::new();
        for member in &members {
            if !seen.insert(&member.id) {
                return Err(LedgerError::invalid_input(
                    "members",
                    "Duplicate member",
                    format!("Member {} is listed twice", member.id),
                ));
            }
        }

        Ok(Group {
            id: Uuid::new_v4().to_string(),
            name,
            description: description.filter(|d| !d.trim().is_empty()),
            members,
            revision: 0,
            created_at: Utc::now(),
        })
    }

    pub fn member_ids(&self) -> Vec<MemberId> {
        self.members.iter().map(|m| m.id.clone()).collect()
    }

    pub fn member(&self, id: &MemberId) -> Option<&Member> {
        self.members.iter().find(|m| &m.id == id)
    }

    pub fn is_member(&self, id: &MemberId) -> bool {
        self.member(id).is_some()
    }
}
