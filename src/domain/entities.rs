//! Domain entities. Pure data structures matching the remote tables.
//!
//! No HTTP types here; adapters hand us JSON rows which deserialize into these.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A leader shown in the directory (`legacy_profiles`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub one_liner: String,
    pub tenure_start: String,
    /// `None` means the tenure is current.
    pub tenure_end: Option<String>,
}

impl Profile {
    /// "start - end", with "Present" for an open tenure.
    pub fn tenure_label(&self) -> String {
        format!(
            "{} - {}",
            self.tenure_start,
            self.tenure_end.as_deref().unwrap_or("Present")
        )
    }
}

/// Login row from `legacy_auth`. Never displayed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credential {
    pub username: String,
    pub password: String,
    pub legacy_profile_id: String,
}

/// Embedded `legacy_profiles(name)` resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnerRef {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub created_at: String,
    #[serde(default)]
    pub legacy_profile_id: Option<String>,
    #[serde(default)]
    pub legacy_profiles: Option<OwnerRef>,
}

impl BlogPost {
    pub fn owner_name(&self) -> &str {
        owner_name(&self.legacy_profiles)
    }

    pub fn posted_on(&self) -> String {
        display_date(&self.created_at)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForumPost {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub created_at: String,
    pub legacy_profile_id: String,
    #[serde(default)]
    pub legacy_profiles: Option<OwnerRef>,
}

impl ForumPost {
    pub fn owner_name(&self) -> &str {
        owner_name(&self.legacy_profiles)
    }

    pub fn posted_on(&self) -> String {
        display_date(&self.created_at)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contribution {
    pub id: String,
    pub title: String,
    pub resource_url: String,
    #[serde(default)]
    pub description: String,
    pub created_at: String,
    #[serde(default)]
    pub legacy_profile_id: Option<String>,
}

impl Contribution {
    pub fn added_on(&self) -> String {
        display_date(&self.created_at)
    }
}

/// Insert payload for `forum_posts`. Id and timestamp are assigned by the store.
#[derive(Debug, Clone, Serialize)]
pub struct NewForumPost {
    pub title: String,
    pub content: String,
    pub legacy_profile_id: String,
}

/// Contribution form state; the owning profile is attached on insert.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NewContribution {
    pub title: String,
    pub resource_url: String,
    pub description: String,
}

fn owner_name(owner: &Option<OwnerRef>) -> &str {
    owner.as_ref().map(|o| o.name.as_str()).unwrap_or("")
}

/// Renders a store timestamp as a plain date. Falls back to the raw value.
pub fn display_date(raw: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.with_timezone(&chrono::Local).date_naive().to_string();
    }
    // `timestamp` columns without a zone come back as naive values
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return dt.date().to_string();
    }
    if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return d.to_string();
    }
    raw.to_string()
}
