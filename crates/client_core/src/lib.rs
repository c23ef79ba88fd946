//! Client core of the campaign dashboard: page controllers, derived views and
//! the document store and identity contracts they run against.

pub mod controller;
pub mod error;
pub mod format;
pub mod http_source;
pub mod identity;
pub mod load_state;
pub mod metrics;
pub mod pages;
pub mod source;
pub mod view;

pub use controller::{EditableRecord, PageDataController, PageResource, WritableResource};
pub use error::{DataError, EditError, ErrorKind};
pub use http_source::HttpDocumentSource;
pub use identity::{require_subject, IdentityProvider, SessionIdentity};
pub use load_state::LoadState;
pub use metrics::{CampaignMetrics, CampaignSummary};
pub use pages::{
    create_campaign, follow_identity, ApplicationStatusPage, CampaignsPage, ProfilePage,
};
pub use source::{DocumentSource, MemoryDocumentSource, MissingDocumentSource, Record};
pub use view::{derive_view, derive_view_from_state, FilterCriteria, Listable, StatusFilter};
