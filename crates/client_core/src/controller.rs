//! Per-page load/display/edit/save cycle.
//!
//! Every fetch or save captures the controller's request generation when it is
//! issued. A response is applied only if the generation still matches, so a
//! page that moved on to another key, reset, or was torn down never sees an
//! older response land on top of newer state.

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use tokio::{sync::Mutex, task::JoinHandle};
use tracing::{debug, info, warn};

use crate::{
    error::{DataError, EditError},
    load_state::LoadState,
    source::DocumentSource,
};

/// Binds a controller to one read strategy against the document store.
#[async_trait]
pub trait PageResource: Send + Sync + 'static {
    type Key: Clone + PartialEq + fmt::Debug + Send + Sync + 'static;
    type Data: Clone + Send + Sync + 'static;

    fn name(&self) -> &'static str;

    async fn fetch(
        &self,
        source: &dyn DocumentSource,
        key: &Self::Key,
    ) -> Result<Self::Data, DataError>;
}

/// A resource whose record can be written back after editing.
#[async_trait]
pub trait WritableResource: PageResource {
    async fn write(
        &self,
        source: &dyn DocumentSource,
        key: &Self::Key,
        record: &Self::Data,
    ) -> Result<(), DataError>;
}

/// Committed copy plus the working copy of an edit session. The two are
/// independent clones; nothing written to `working` reaches `committed`
/// before a successful save.
#[derive(Debug, Clone, PartialEq)]
pub struct EditableRecord<T> {
    session: u64,
    committed: T,
    working: T,
    error: Option<String>,
    saving: bool,
}

impl<T: Clone> EditableRecord<T> {
    fn snapshot(session: u64, committed: &T) -> Self {
        Self {
            session,
            committed: committed.clone(),
            working: committed.clone(),
            error: None,
            saving: false,
        }
    }
}

impl<T> EditableRecord<T> {
    pub fn committed(&self) -> &T {
        &self.committed
    }

    pub fn working(&self) -> &T {
        &self.working
    }

    /// Message of the last failed save, cleared by the next attempt.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }
}

struct ControllerState<K, T> {
    load_state: LoadState<T>,
    generation: u64,
    current_key: Option<K>,
    in_flight: Option<(u64, K)>,
    edit: Option<EditableRecord<T>>,
    edit_sessions: u64,
    torn_down: bool,
}

impl<K, T> ControllerState<K, T> {
    fn new() -> Self {
        Self {
            load_state: LoadState::Idle,
            generation: 0,
            current_key: None,
            in_flight: None,
            edit: None,
            edit_sessions: 0,
            torn_down: false,
        }
    }

    fn owns(&self, generation: u64) -> bool {
        !self.torn_down && self.generation == generation
    }

    /// The open edit session, if it is the one numbered `session`.
    fn session_mut(&mut self, session: u64) -> Option<&mut EditableRecord<T>> {
        self.edit.as_mut().filter(|edit| edit.session == session)
    }
}

pub struct PageDataController<R: PageResource> {
    resource: R,
    source: Arc<dyn DocumentSource>,
    inner: Mutex<ControllerState<R::Key, R::Data>>,
}

impl<R: PageResource> PageDataController<R> {
    pub fn new(resource: R, source: Arc<dyn DocumentSource>) -> Self {
        Self {
            resource,
            source,
            inner: Mutex::new(ControllerState::new()),
        }
    }

    pub fn resource(&self) -> &R {
        &self.resource
    }

    pub async fn state(&self) -> LoadState<R::Data> {
        self.inner.lock().await.load_state.clone()
    }

    pub async fn current_key(&self) -> Option<R::Key> {
        self.inner.lock().await.current_key.clone()
    }

    /// Fetches the page's data for `key` and returns the resulting state.
    ///
    /// A call for the key that is already in flight is coalesced onto that
    /// request. A call for another key supersedes it. Starting a load ends any
    /// edit session, since the record being edited is about to be replaced.
    pub async fn load(&self, key: R::Key) -> LoadState<R::Data> {
        match self.issue(&key).await {
            Ok(generation) => self.settle(generation, key).await,
            Err(state) => state,
        }
    }

    /// Like `load`, but only the bookkeeping happens before this returns; the
    /// fetch itself runs on a spawned task. Anything issued afterwards
    /// (another load, `reset`, `teardown`) already supersedes it.
    pub async fn load_detached(
        self: &Arc<Self>,
        key: R::Key,
    ) -> JoinHandle<LoadState<R::Data>> {
        match self.issue(&key).await {
            Ok(generation) => {
                let controller = Arc::clone(self);
                tokio::spawn(async move { controller.settle(generation, key).await })
            }
            Err(state) => tokio::spawn(async move { state }),
        }
    }

    /// Claims a new generation for `key`, or hands back the current state when
    /// there is nothing to fetch (torn down, or `key` already in flight).
    async fn issue(&self, key: &R::Key) -> Result<u64, LoadState<R::Data>> {
        let mut inner = self.inner.lock().await;
        if inner.torn_down {
            debug!(page = self.resource.name(), "page: load after teardown ignored");
            return Err(inner.load_state.clone());
        }
        if let Some((_, in_flight_key)) = &inner.in_flight {
            if in_flight_key == key {
                debug!(page = self.resource.name(), key = ?key, "page: load coalesced");
                return Err(inner.load_state.clone());
            }
        }
        inner.generation += 1;
        let generation = inner.generation;
        inner.current_key = Some(key.clone());
        inner.in_flight = Some((generation, key.clone()));
        inner.edit = None;
        inner.load_state.start();
        Ok(generation)
    }

    async fn settle(&self, generation: u64, key: R::Key) -> LoadState<R::Data> {
        debug!(page = self.resource.name(), generation, key = ?key, "page: load issued");
        let result = self.resource.fetch(self.source.as_ref(), &key).await;

        let mut inner = self.inner.lock().await;
        if !inner.owns(generation) {
            debug!(
                page = self.resource.name(),
                generation,
                current = inner.generation,
                "page: discarding stale load response"
            );
            return inner.load_state.clone();
        }
        inner.in_flight = None;
        let result = result.map_err(|err| {
            warn!(page = self.resource.name(), key = ?key, error = %err, "page: load failed");
            err.to_string()
        });
        inner.load_state.resolve(result);
        inner.load_state.clone()
    }

    /// Re-issues the last load. Does nothing before the first `load`.
    pub async fn reload(&self) -> LoadState<R::Data> {
        let key = self.inner.lock().await.current_key.clone();
        match key {
            Some(key) => self.load(key).await,
            None => self.state().await,
        }
    }

    /// Back to `Idle`, e.g. after the signed-in subject went away. Responses
    /// still in flight are dropped; the controller stays usable.
    pub async fn reset(&self) {
        let mut inner = self.inner.lock().await;
        inner.generation += 1;
        inner.current_key = None;
        inner.in_flight = None;
        inner.edit = None;
        inner.load_state = LoadState::Idle;
    }

    /// The page is gone: drop everything still in flight and refuse new work.
    pub async fn teardown(&self) {
        let mut inner = self.inner.lock().await;
        inner.torn_down = true;
        inner.generation += 1;
        inner.in_flight = None;
        inner.edit = None;
    }

    /// Starts (or returns the already running) edit session on the loaded
    /// record.
    pub async fn begin_edit(&self) -> Result<EditableRecord<R::Data>, EditError> {
        let mut inner = self.inner.lock().await;
        let state = &mut *inner;
        if let Some(edit) = &state.edit {
            return Ok(edit.clone());
        }
        let committed = state.load_state.payload().ok_or(EditError::NotReady)?;
        state.edit_sessions += 1;
        let edit = EditableRecord::snapshot(state.edit_sessions, committed);
        state.edit = Some(edit.clone());
        Ok(edit)
    }

    pub async fn is_editing(&self) -> bool {
        self.inner.lock().await.edit.is_some()
    }

    pub async fn edit_session(&self) -> Option<EditableRecord<R::Data>> {
        self.inner.lock().await.edit.clone()
    }

    /// Applies `change` to the working copy only.
    pub async fn update_working<F>(&self, change: F) -> Result<(), EditError>
    where
        F: FnOnce(&mut R::Data) + Send,
    {
        let mut inner = self.inner.lock().await;
        let edit = inner.edit.as_mut().ok_or(EditError::NotEditing)?;
        change(&mut edit.working);
        Ok(())
    }

    /// Leaves the edit session without touching the store.
    pub async fn cancel_edit(&self) {
        let mut inner = self.inner.lock().await;
        if inner.edit.take().is_some() {
            debug!(page = self.resource.name(), "page: edit cancelled");
        }
    }

    /// What the page should render: the working copy while editing, the
    /// committed payload otherwise.
    pub async fn display(&self) -> Option<R::Data> {
        let inner = self.inner.lock().await;
        match &inner.edit {
            Some(edit) => Some(edit.working.clone()),
            None => inner.load_state.payload().cloned(),
        }
    }
}

impl<R: WritableResource> PageDataController<R> {
    /// Writes the working copy back. On success it becomes the committed copy
    /// and the edit session ends; on failure the session stays open with the
    /// user's edits intact and the message recorded on it.
    ///
    /// Only the session that issued the save is ended or annotated. If it was
    /// cancelled meanwhile, a successful save still updates the committed
    /// payload, and a newer session only has its committed snapshot refreshed.
    pub async fn commit_edit(&self) -> Result<R::Data, EditError> {
        let (generation, session, key, working) = {
            let mut inner = self.inner.lock().await;
            let state = &mut *inner;
            let edit = state.edit.as_mut().ok_or(EditError::NotEditing)?;
            if edit.saving {
                return Err(EditError::SaveInFlight);
            }
            let key = state.current_key.clone().ok_or(EditError::NotReady)?;
            edit.saving = true;
            edit.error = None;
            (state.generation, edit.session, key, edit.working.clone())
        };

        let result = self
            .resource
            .write(self.source.as_ref(), &key, &working)
            .await;

        let mut inner = self.inner.lock().await;
        let state = &mut *inner;
        if !state.owns(generation) {
            debug!(
                page = self.resource.name(),
                generation,
                current = state.generation,
                "page: discarding stale save response"
            );
            return Err(EditError::Superseded);
        }

        match result {
            Ok(()) => {
                info!(page = self.resource.name(), key = ?key, session, "page: edit committed");
                state.load_state.replace_payload(working.clone());
                if state.session_mut(session).is_some() {
                    state.edit = None;
                } else if let Some(newer) = state.edit.as_mut() {
                    newer.committed = working.clone();
                }
                Ok(working)
            }
            Err(err) => {
                warn!(
                    page = self.resource.name(),
                    key = ?key,
                    session,
                    error = %err,
                    "page: save failed"
                );
                if let Some(edit) = state.session_mut(session) {
                    edit.saving = false;
                    edit.error = Some(err.to_string());
                }
                Err(EditError::Save(err))
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
