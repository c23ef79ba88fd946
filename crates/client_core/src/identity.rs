use shared::domain::SubjectId;
use tokio::sync::watch;
use tracing::info;

use crate::error::DataError;

/// Read side of the authentication provider: who is signed in, and a feed of
/// sign-in/sign-out transitions.
pub trait IdentityProvider: Send + Sync {
    fn current_subject(&self) -> Option<SubjectId>;
    fn subscribe(&self) -> watch::Receiver<Option<SubjectId>>;
}

pub fn require_subject(identity: &dyn IdentityProvider) -> Result<SubjectId, DataError> {
    identity.current_subject().ok_or(DataError::Unauthenticated)
}

/// Identity held in process, fed by whatever performed the sign-in.
pub struct SessionIdentity {
    subject: watch::Sender<Option<SubjectId>>,
}

impl Default for SessionIdentity {
    fn default() -> Self {
        let (subject, _) = watch::channel(None);
        Self { subject }
    }
}

impl SessionIdentity {
    pub fn signed_in(subject: SubjectId) -> Self {
        let identity = Self::default();
        identity.sign_in(subject);
        identity
    }

    pub fn sign_in(&self, subject: SubjectId) {
        info!(subject = %subject, "identity: signed in");
        self.subject.send_replace(Some(subject));
    }

    pub fn sign_out(&self) {
        if self.subject.send_replace(None).is_some() {
            info!("identity: signed out");
        }
    }
}

impl IdentityProvider for SessionIdentity {
    fn current_subject(&self) -> Option<SubjectId> {
        self.subject.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<Option<SubjectId>> {
        self.subject.subscribe()
    }
}
