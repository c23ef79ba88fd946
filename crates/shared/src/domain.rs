use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

id_newtype!(SubjectId);
id_newtype!(CampaignId);
id_newtype!(ApplicationId);

/// Campaign lifecycle as stored remotely.
///
/// Two vocabularies are in circulation (`scheduled/draft/completed` and
/// `paused/scheduled/completed`); both decode here and anything else lands in
/// `Unknown` instead of failing the whole collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CampaignStatus {
    Active,
    Scheduled,
    Draft,
    Paused,
    Completed,
    #[serde(other)]
    Unknown,
}

impl CampaignStatus {
    pub const ALL: [CampaignStatus; 5] = [
        CampaignStatus::Active,
        CampaignStatus::Scheduled,
        CampaignStatus::Draft,
        CampaignStatus::Paused,
        CampaignStatus::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CampaignStatus::Active => "active",
            CampaignStatus::Scheduled => "scheduled",
            CampaignStatus::Draft => "draft",
            CampaignStatus::Paused => "paused",
            CampaignStatus::Completed => "completed",
            CampaignStatus::Unknown => "unknown",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|status| status.as_str() == value)
    }
}

impl fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Application review state. The store is inconsistent about casing, so
/// comparison is case-insensitive and unrecognised values are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ApplicationStatus {
    Approved,
    Pending,
    Rejected,
    UnderReview,
    Other(String),
}

impl ApplicationStatus {
    pub fn label(&self) -> &str {
        match self {
            ApplicationStatus::Approved => "approved",
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Rejected => "rejected",
            ApplicationStatus::UnderReview => "under review",
            ApplicationStatus::Other(raw) => raw,
        }
    }
}

impl From<String> for ApplicationStatus {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "approved" => ApplicationStatus::Approved,
            "pending" => ApplicationStatus::Pending,
            "rejected" => ApplicationStatus::Rejected,
            "under review" | "under_review" => ApplicationStatus::UnderReview,
            _ => ApplicationStatus::Other(value),
        }
    }
}

impl From<ApplicationStatus> for String {
    fn from(value: ApplicationStatus) -> Self {
        value.label().to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CampaignCategory {
    Technology,
    Health,
    Education,
    Environment,
    Arts,
    Community,
}

impl CampaignCategory {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "technology" => Some(Self::Technology),
            "health" => Some(Self::Health),
            "education" => Some(Self::Education),
            "environment" => Some(Self::Environment),
            "arts" => Some(Self::Arts),
            "community" => Some(Self::Community),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Technology => "Technology",
            Self::Health => "Health",
            Self::Education => "Education",
            Self::Environment => "Environment",
            Self::Arts => "Arts & Culture",
            Self::Community => "Community",
        }
    }
}
