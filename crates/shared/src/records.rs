use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    domain::{ApplicationId, ApplicationStatus, CampaignCategory, CampaignId, CampaignStatus},
    error::{ApiException, ErrorCode},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub id: CampaignId,
    pub name: String,
    pub status: CampaignStatus,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub budget: f64,
    #[serde(default)]
    pub spent: f64,
    #[serde(default)]
    pub impressions: u64,
    #[serde(default)]
    pub clicks: u64,
    #[serde(default)]
    pub conversions: u64,
}

/// The editable subset of a user document in the `users` collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub name: String,
    pub email: String,
    pub bio: String,
    pub avatar: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: ApplicationId,
    pub status: ApplicationStatus,
    #[serde(rename = "type")]
    pub kind: String,
    pub submitted_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_completion: Option<DateTime<Utc>>,
    #[serde(default)]
    pub timeline: Vec<TimelineEvent>,
    #[serde(default)]
    pub documents: Vec<ApplicationDocument>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub title: String,
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationDocument {
    pub name: String,
    pub uploaded_at: DateTime<Utc>,
    pub url: String,
}

/// Input of the campaign creation form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignDraft {
    pub title: String,
    pub description: String,
    pub target_amount: f64,
    pub deadline: Option<NaiveDate>,
    pub category: Option<CampaignCategory>,
}

impl CampaignDraft {
    pub fn validate(&self) -> Result<(), ApiException> {
        if self.title.trim().is_empty() {
            return Err(validation("campaign title is required"));
        }
        if self.description.trim().is_empty() {
            return Err(validation("campaign description is required"));
        }
        if !self.target_amount.is_finite() || self.target_amount < 1.0 {
            return Err(validation("target amount must be at least 1"));
        }
        if self.deadline.is_none() {
            return Err(validation("deadline is required"));
        }
        if self.category.is_none() {
            return Err(validation("category is required"));
        }
        Ok(())
    }
}

fn validation(message: &str) -> ApiException {
    ApiException::new(ErrorCode::Validation, message)
}
