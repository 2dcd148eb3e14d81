//! Search bar

use super::ViewError;
use crate::store::Command;
use shared::{Entity, SearchCondition};

/// Search bar state: the selected field and the raw text typed so far
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery<F> {
    pub field: F,
    pub text: String,
}

impl<F: Copy> SearchQuery<F> {
    pub fn new(field: F) -> Self {
        Self {
            field,
            text: String::new(),
        }
    }

    /// Validate raw input: the value is trimmed and must not be empty.
    pub fn parse(field: F, raw: &str) -> Result<SearchCondition<F>, ViewError> {
        let value = raw.trim();
        if value.is_empty() {
            return Err(ViewError::EmptyQuery);
        }
        Ok(SearchCondition::new(field, value))
    }

    pub fn condition(&self) -> Result<SearchCondition<F>, ViewError> {
        Self::parse(self.field, &self.text)
    }

    /// Search command for the current input
    pub fn command<E>(&self) -> Result<Command<E>, ViewError>
    where
        E: Entity<SearchField = F>,
    {
        Ok(Command::Search(self.condition()?))
    }

    /// "Show all": clear the text and reload the full list
    pub fn show_all<E>(&mut self) -> Command<E>
    where
        E: Entity<SearchField = F>,
    {
        self.text.clear();
        Command::FetchAll
    }
}

/// Search when there is something to search for, otherwise reload everything.
pub fn search_or_all<E: Entity>(field: E::SearchField, raw: &str) -> Command<E> {
    match SearchQuery::parse(field, raw) {
        Ok(condition) => Command::Search(condition),
        Err(_) => Command::FetchAll,
    }
}
