//! User profile types.
//!
//! One profile exists per installation. Same camelCase JSON convention as
//! the event types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Relation assigned to a profile until the user picks their own.
pub const DEFAULT_RELATION: &str = "Family Member";

/// The device's current user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    /// Role within the family, e.g. "Parent". Free text.
    pub relation: String,
    pub phone: String,
    pub date_of_birth: String,
    pub bio: String,
    pub avatar_url: String,
    pub address: String,
    pub emergency_contact: String,
    pub emergency_phone: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    /// Build a fresh profile for `email`. The name falls back to the
    /// email's local part and the avatar is a random placeholder.
    pub(crate) fn new(email: &str, name: Option<&str>, now: DateTime<Utc>) -> Self {
        let name = name
            .map(str::to_string)
            .unwrap_or_else(|| email.split('@').next().unwrap_or(email).to_string());

        UserProfile {
            id: format!("user-{}", Uuid::new_v4()),
            name,
            email: email.to_string(),
            relation: DEFAULT_RELATION.to_string(),
            phone: String::new(),
            date_of_birth: String::new(),
            bio: String::new(),
            avatar_url: random_avatar_url(),
            address: String::new(),
            emergency_contact: String::new(),
            emergency_phone: String::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Placeholder avatar with a random seed so each profile gets its own face.
pub(crate) fn random_avatar_url() -> String {
    format!("https://i.pravatar.cc/300?u={}", Uuid::new_v4().simple())
}

/// A partial profile update, merged field-by-field. Identity fields
/// (`id`, `createdAt`) and `updatedAt` are managed by the store and
/// cannot be patched.
#[derive(Debug, Clone, Default)]
pub struct ProfilePatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub relation: Option<String>,
    pub phone: Option<String>,
    pub date_of_birth: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub address: Option<String>,
    pub emergency_contact: Option<String>,
    pub emergency_phone: Option<String>,
}

impl ProfilePatch {
    pub fn apply(&self, profile: &mut UserProfile) {
        if let Some(name) = &self.name {
            profile.name = name.clone();
        }
        if let Some(email) = &self.email {
            profile.email = email.clone();
        }
        if let Some(relation) = &self.relation {
            profile.relation = relation.clone();
        }
        if let Some(phone) = &self.phone {
            profile.phone = phone.clone();
        }
        if let Some(date_of_birth) = &self.date_of_birth {
            profile.date_of_birth = date_of_birth.clone();
        }
        if let Some(bio) = &self.bio {
            profile.bio = bio.clone();
        }
        if let Some(avatar_url) = &self.avatar_url {
            profile.avatar_url = avatar_url.clone();
        }
        if let Some(address) = &self.address {
            profile.address = address.clone();
        }
        if let Some(emergency_contact) = &self.emergency_contact {
            profile.emergency_contact = emergency_contact.clone();
        }
        if let Some(emergency_phone) = &self.emergency_phone {
            profile.emergency_phone = emergency_phone.clone();
        }
    }
}
