//! List-view and form helpers
//!
//! Presentation-independent pieces of the admin screens: client-side
//! sorting, search-bar handling, the employee registration draft and the
//! loading/error banner.

pub mod form;
pub mod search;
pub mod sort;

pub use form::{EmployeeDraft, PhonePart};
pub use search::{SearchQuery, search_or_all};
pub use sort::{SortDirection, SortState, sorted};

use crate::store::EntityState;
use shared::models::ParseFieldError;
use std::fmt;
use thiserror::Error;

/// Banner text shown while an operation is in flight
pub const LOADING_MESSAGE: &str = "Loading data...";

/// Input rejected before anything is dispatched
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewError {
    #[error("enter a search term")]
    EmptyQuery,

    #[error(transparent)]
    UnknownField(#[from] ParseFieldError),
}

/// Loading/error banner above a list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLine<'a> {
    Loading,
    Error(&'a str),
}

impl fmt::Display for StatusLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusLine::Loading => f.write_str(LOADING_MESSAGE),
            StatusLine::Error(message) => f.write_str(message),
        }
    }
}

/// Loading takes precedence over a stale error; `None` renders nothing.
pub fn status_line<E>(state: &EntityState<E>) -> Option<StatusLine<'_>> {
    if state.loading() {
        Some(StatusLine::Loading)
    } else {
        state.error().map(StatusLine::Error)
    }
}
