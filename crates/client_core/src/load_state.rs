/// Status of a page's primary fetch.
///
/// Legal moves: `Idle -> Loading`, `Loading -> Ready | Failed`, and back to
/// `Loading` from `Ready` (refresh) or `Failed` (retry). A resolution is only
/// accepted while `Loading`.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Idle,
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> Default for LoadState<T> {
    fn default() -> Self {
        LoadState::Idle
    }
}

impl<T> LoadState<T> {
    pub fn label(&self) -> &'static str {
        match self {
            LoadState::Idle => "idle",
            LoadState::Loading => "loading",
            LoadState::Ready(_) => "ready",
            LoadState::Failed(_) => "failed",
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, LoadState::Ready(_))
    }

    pub fn payload(&self) -> Option<&T> {
        match self {
            LoadState::Ready(payload) => Some(payload),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub(crate) fn start(&mut self) {
        *self = LoadState::Loading;
    }

    /// Applies a fetch result. Returns `false` and leaves the state untouched
    /// when no fetch is outstanding.
    pub(crate) fn resolve(&mut self, result: Result<T, String>) -> bool {
        if !self.is_loading() {
            return false;
        }
        *self = match result {
            Ok(payload) => LoadState::Ready(payload),
            Err(message) => LoadState::Failed(message),
        };
        true
    }

    /// Swaps the committed payload after a successful write-back.
    pub(crate) fn replace_payload(&mut self, payload: T) -> bool {
        match self {
            LoadState::Ready(current) => {
                *current = payload;
                true
            }
            _ => false,
        }
    }
}
