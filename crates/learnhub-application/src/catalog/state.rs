//! Collection view load state.

/// Lifecycle of a collection view: `Idle` until the first fetch, `Loading`
/// while a request is in flight, then `Ready` or `Errored`.
///
/// The transition back out of `Loading` happens on every exit path of a
/// fetch, so a spinner keyed on this state cannot get stuck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Ready,
    Errored,
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }
}
