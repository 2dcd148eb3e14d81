//! Per-entity state and its reducer

use super::action::{Action, Operation, Outcome};
use shared::Entity;

/// Status of one operation kind
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OpStatus {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed(String),
}

impl OpStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, OpStatus::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            OpStatus::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Profile image upload, tracked apart from the CRUD status
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ImageUploadState {
    #[default]
    Idle,
    Uploading,
    Uploaded(String),
    Failed(String),
}

/// Everything the client knows about one entity kind.
///
/// Created empty; filled by the first successful fetch; never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityState<E> {
    /// List-view collection, in server order
    pub items: Vec<E>,
    /// Detail record from the last fetch-one
    pub selected: Option<E>,
    pub image_upload: ImageUploadState,
    statuses: [OpStatus; Operation::CRUD.len()],
    /// Latest CRUD failure; only a new CRUD request clears it
    error: Option<String>,
}

impl<E> Default for EntityState<E> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            selected: None,
            image_upload: ImageUploadState::Idle,
            statuses: Default::default(),
            error: None,
        }
    }
}

impl<E> EntityState<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Status of one operation kind
    pub fn status(&self, operation: Operation) -> OpStatus {
        match operation {
            Operation::UploadImage => match &self.image_upload {
                ImageUploadState::Idle => OpStatus::Idle,
                ImageUploadState::Uploading => OpStatus::Loading,
                ImageUploadState::Uploaded(_) => OpStatus::Succeeded,
                ImageUploadState::Failed(message) => OpStatus::Failed(message.clone()),
            },
            op => self.statuses[op.index()].clone(),
        }
    }

    /// True while any CRUD operation is in flight
    pub fn loading(&self) -> bool {
        self.statuses.iter().any(OpStatus::is_loading)
    }

    /// Message of the latest CRUD failure.
    ///
    /// Successes leave it in place; the next CRUD request clears it.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn image_uploading(&self) -> bool {
        matches!(self.image_upload, ImageUploadState::Uploading)
    }

    pub fn image_upload_url(&self) -> Option<&str> {
        match &self.image_upload {
            ImageUploadState::Uploaded(url) => Some(url),
            _ => None,
        }
    }

    pub fn image_upload_error(&self) -> Option<&str> {
        match &self.image_upload {
            ImageUploadState::Failed(message) => Some(message),
            _ => None,
        }
    }

    fn set_status(&mut self, operation: Operation, status: OpStatus) {
        self.statuses[operation.index()] = status;
    }
}

impl<E: Entity> EntityState<E> {
    /// Apply one transition. Synchronous and total: every action leaves the
    /// state consistent, and failures never touch `items`.
    pub fn apply(&mut self, action: Action<E>) {
        match action {
            Action::Requested(Operation::UploadImage) => {
                self.image_upload = ImageUploadState::Uploading;
            }
            Action::Requested(operation) => {
                self.set_status(operation, OpStatus::Loading);
                self.error = None;
            }
            Action::Failed {
                operation: Operation::UploadImage,
                message,
            } => {
                self.image_upload = ImageUploadState::Failed(message);
            }
            Action::Failed { operation, message } => {
                self.set_status(operation, OpStatus::Failed(message.clone()));
                self.error = Some(message);
            }
            Action::Succeeded(outcome) => self.apply_outcome(outcome),
            Action::ResetImageUpload => {
                self.image_upload = ImageUploadState::Idle;
            }
        }
    }

    fn apply_outcome(&mut self, outcome: Outcome<E>) {
        let operation = outcome.operation();
        match outcome {
            Outcome::UploadImage(url) => {
                self.image_upload = ImageUploadState::Uploaded(url);
                return;
            }
            Outcome::FetchAll(items) | Outcome::Search(items) => {
                self.items = items;
            }
            Outcome::FetchOne(record) => {
                self.selected = Some(record);
            }
            Outcome::Create(record) => {
                self.items.push(record);
            }
            Outcome::Update(record) => {
                let id = record.id();
                if let Some(selected) = self.selected.as_mut().filter(|s| s.id() == id) {
                    *selected = record.clone();
                }
                if let Some(slot) = self.items.iter_mut().find(|item| item.id() == id) {
                    *slot = record;
                }
            }
            Outcome::Delete(id) => {
                self.items.retain(|item| item.id() != id);
                if self.selected.as_ref().is_some_and(|s| s.id() == id) {
                    self.selected = None;
                }
            }
        }
        self.set_status(operation, OpStatus::Succeeded);
    }
}
