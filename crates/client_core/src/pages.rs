//! Dashboard pages bound to the generic controller.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::{
    domain::{ApplicationId, CampaignId, CampaignStatus, SubjectId},
    records::{Application, Campaign, CampaignDraft, Profile},
};
use tokio::task::JoinHandle;
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    controller::{PageDataController, PageResource, WritableResource},
    error::DataError,
    identity::IdentityProvider,
    source::{DocumentSource, Record},
};

pub const CAMPAIGNS: &str = "campaigns";
pub const APPLICATIONS: &str = "applications";
pub const USERS: &str = "users";

fn decode<T: DeserializeOwned>(collection: &str, record: Record) -> Result<T, DataError> {
    serde_json::from_value(record).map_err(|e| DataError::decode(collection, e))
}

pub struct CampaignsPage;

#[async_trait]
impl PageResource for CampaignsPage {
    type Key = ();
    type Data = Vec<Campaign>;

    fn name(&self) -> &'static str {
        "campaigns"
    }

    async fn fetch(
        &self,
        source: &dyn DocumentSource,
        _key: &(),
    ) -> Result<Vec<Campaign>, DataError> {
        source
            .fetch_collection(CAMPAIGNS)
            .await?
            .into_iter()
            .map(|record| decode(CAMPAIGNS, record))
            .collect()
    }
}

pub struct ApplicationStatusPage;

#[async_trait]
impl PageResource for ApplicationStatusPage {
    type Key = ApplicationId;
    type Data = Application;

    fn name(&self) -> &'static str {
        "application-status"
    }

    async fn fetch(
        &self,
        source: &dyn DocumentSource,
        key: &ApplicationId,
    ) -> Result<Application, DataError> {
        let record = source.fetch_by_id(APPLICATIONS, key.as_str()).await?;
        decode(APPLICATIONS, record)
    }
}

/// The signed-in user's profile. Reads and writes are refused unless the key
/// is the subject currently signed in.
pub struct ProfilePage {
    identity: Arc<dyn IdentityProvider>,
}

impl ProfilePage {
    pub fn new(identity: Arc<dyn IdentityProvider>) -> Self {
        Self { identity }
    }

    fn ensure_signed_in_as(&self, key: &SubjectId) -> Result<(), DataError> {
        match self.identity.current_subject() {
            Some(subject) if subject == *key => Ok(()),
            _ => Err(DataError::Unauthenticated),
        }
    }
}

#[async_trait]
impl PageResource for ProfilePage {
    type Key = SubjectId;
    type Data = Profile;

    fn name(&self) -> &'static str {
        "profile"
    }

    async fn fetch(
        &self,
        source: &dyn DocumentSource,
        key: &SubjectId,
    ) -> Result<Profile, DataError> {
        self.ensure_signed_in_as(key)?;
        let record = source.fetch_by_id(USERS, key.as_str()).await?;
        decode(USERS, record)
    }
}

#[async_trait]
impl WritableResource for ProfilePage {
    async fn write(
        &self,
        source: &dyn DocumentSource,
        key: &SubjectId,
        record: &Profile,
    ) -> Result<(), DataError> {
        self.ensure_signed_in_as(key)?;
        let patch = serde_json::to_value(record).map_err(|e| DataError::decode(USERS, e))?;
        source.write_record(USERS, key.as_str(), patch).await
    }
}

/// Keeps a profile controller in step with the identity provider: a sign-in
/// loads that subject's profile, a sign-out resets the page. The loop never
/// waits on a fetch, so a change arriving mid-load supersedes it at once.
pub fn follow_identity(
    controller: Arc<PageDataController<ProfilePage>>,
    identity: Arc<dyn IdentityProvider>,
) -> JoinHandle<()> {
    let mut subjects = identity.subscribe();
    tokio::spawn(async move {
        loop {
            let subject = subjects.borrow_and_update().clone();
            match subject {
                Some(subject) => {
                    controller.load_detached(subject).await;
                }
                None => controller.reset().await,
            }
            if subjects.changed().await.is_err() {
                debug!("profile: identity provider closed");
                break;
            }
        }
    })
}

/// Validates the draft and stores it as a new `draft` campaign starting on
/// `today`. Returns the id assigned to it.
pub async fn create_campaign(
    source: &dyn DocumentSource,
    draft: &CampaignDraft,
    today: NaiveDate,
) -> Result<CampaignId, DataError> {
    draft.validate()?;
    let deadline = draft.deadline.ok_or_else(|| {
        DataError::ValidationFailure("deadline is required".to_string())
    })?;

    let id = CampaignId(Uuid::new_v4().to_string());
    let campaign = Campaign {
        id: id.clone(),
        name: draft.title.trim().to_string(),
        status: CampaignStatus::Draft,
        start_date: today,
        end_date: deadline,
        budget: draft.target_amount,
        spent: 0.0,
        impressions: 0,
        clicks: 0,
        conversions: 0,
    };

    let mut record = serde_json::to_value(&campaign).map_err(|e| DataError::decode(CAMPAIGNS, e))?;
    if let Value::Object(fields) = &mut record {
        fields.insert(
            "description".to_string(),
            Value::String(draft.description.trim().to_string()),
        );
        if let Some(category) = draft.category {
            let category =
                serde_json::to_value(category).map_err(|e| DataError::decode(CAMPAIGNS, e))?;
            fields.insert("category".to_string(), category);
        }
    }

    source.write_record(CAMPAIGNS, id.as_str(), record).await?;
    info!(campaign_id = %id, "campaigns: draft created");
    Ok(id)
}

#[cfg(test)]
#[path = "tests/pages_tests.rs"]
mod tests;
