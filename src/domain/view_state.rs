//! Two-state view model: a view is either still waiting for data or has it.
//!
//! There is no error state. A failed or empty fetch leaves the view `Loading`.

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Loadable<T> {
    #[default]
    Loading,
    Loaded(T),
}

impl<T> Loadable<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Loadable::Loading)
    }

    pub fn as_loaded(&self) -> Option<&T> {
        match self {
            Loadable::Loaded(v) => Some(v),
            Loadable::Loading => None,
        }
    }
}
