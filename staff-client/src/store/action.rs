//! Commands and actions
//!
//! A view dispatches a [`Command`]; the store turns it into a
//! request → success/failure [`Action`] triple.

use crate::api::Attachment;
use shared::{Entity, SearchCondition};
use std::fmt;

/// Operation kinds, each tracked independently
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    FetchAll,
    FetchOne,
    Search,
    Create,
    Update,
    Delete,
    UploadImage,
}

impl Operation {
    pub const ALL: [Operation; 7] = [
        Operation::FetchAll,
        Operation::FetchOne,
        Operation::Search,
        Operation::Create,
        Operation::Update,
        Operation::Delete,
        Operation::UploadImage,
    ];

    /// Operations that share the entity's `loading`/`error` view
    pub const CRUD: [Operation; 6] = [
        Operation::FetchAll,
        Operation::FetchOne,
        Operation::Search,
        Operation::Create,
        Operation::Update,
        Operation::Delete,
    ];

    pub(crate) const fn index(self) -> usize {
        self as usize
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Operation::FetchAll => "fetch_all",
            Operation::FetchOne => "fetch_one",
            Operation::Search => "search",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
            Operation::UploadImage => "upload_image",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a view asks the store to do
#[derive(Debug, Clone)]
pub enum Command<E: Entity> {
    FetchAll,
    FetchOne(i64),
    Search(SearchCondition<E::SearchField>),
    Create {
        input: E::Input,
        attachment: Option<Attachment>,
    },
    Update {
        id: i64,
        input: E::Input,
    },
    Delete(i64),
}

impl<E: Entity> Command<E> {
    pub fn operation(&self) -> Operation {
        match self {
            Command::FetchAll => Operation::FetchAll,
            Command::FetchOne(_) => Operation::FetchOne,
            Command::Search(_) => Operation::Search,
            Command::Create { .. } => Operation::Create,
            Command::Update { .. } => Operation::Update,
            Command::Delete(_) => Operation::Delete,
        }
    }

    /// JSON create without an attachment
    pub fn create(input: E::Input) -> Self {
        Command::Create {
            input,
            attachment: None,
        }
    }
}

/// Successful result of an operation, carrying what the reducer needs
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<E> {
    FetchAll(Vec<E>),
    FetchOne(E),
    Search(Vec<E>),
    Create(E),
    Update(E),
    /// Id of the removed record (the server returns no payload)
    Delete(i64),
    /// URL of the stored image
    UploadImage(String),
}

impl<E> Outcome<E> {
    pub fn operation(&self) -> Operation {
        match self {
            Outcome::FetchAll(_) => Operation::FetchAll,
            Outcome::FetchOne(_) => Operation::FetchOne,
            Outcome::Search(_) => Operation::Search,
            Outcome::Create(_) => Operation::Create,
            Outcome::Update(_) => Operation::Update,
            Outcome::Delete(_) => Operation::Delete,
            Outcome::UploadImage(_) => Operation::UploadImage,
        }
    }
}

/// State transition applied by the reducer
#[derive(Debug, Clone, PartialEq)]
pub enum Action<E> {
    Requested(Operation),
    Succeeded(Outcome<E>),
    Failed { operation: Operation, message: String },
    /// Return the image-upload fields to their initial values
    ResetImageUpload,
}

impl<E> Action<E> {
    pub fn failed(operation: Operation, message: impl Into<String>) -> Self {
        Action::Failed {
            operation,
            message: message.into(),
        }
    }

    pub fn operation(&self) -> Operation {
        match self {
            Action::Requested(op) => *op,
            Action::Succeeded(outcome) => outcome.operation(),
            Action::Failed { operation, .. } => *operation,
            Action::ResetImageUpload => Operation::UploadImage,
        }
    }
}
