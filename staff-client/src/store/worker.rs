//! Store and its async workers
//!
//! Each dispatched command runs on its own task. The request transition is
//! applied synchronously; the task applies success or failure when the API
//! call settles. A newer request of the same operation kind supersedes an
//! older one: the older result is dropped instead of applied.

use super::action::{Action, Command, Operation, Outcome};
use super::state::EntityState;
use crate::api::{Attachment, EntityApi, ImageUploadApi};
use crate::error::{ClientResult, FALLBACK_ERROR_MESSAGE, panic_message};
use shared::{Entity, ProfileImage};
use std::future::Future;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::sync::broadcast;
use tokio::task::{JoinError, JoinHandle};

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// How a worker's result was handled
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settlement {
    Succeeded,
    Failed(String),
    /// A newer request of the same kind was dispatched; the result was dropped
    Superseded,
}

/// Which transition a [`StoreEvent`] reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventPhase {
    Requested,
    Succeeded,
    Failed,
    Reset,
}

/// Notification sent to subscribers after each applied transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreEvent {
    pub resource: &'static str,
    pub operation: Operation,
    pub phase: EventPhase,
}

struct Tracked<E> {
    state: EntityState<E>,
    generations: [u64; Operation::ALL.len()],
}

struct StoreInner<E, A> {
    api: A,
    tracked: RwLock<Tracked<E>>,
    events: broadcast::Sender<StoreEvent>,
}

/// State container for one entity kind.
///
/// Cloning is cheap; clones share the same state.
pub struct Store<E, A> {
    inner: Arc<StoreInner<E, A>>,
}

impl<E, A> Clone for Store<E, A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<E, A> std::fmt::Debug for Store<E, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store").finish_non_exhaustive()
    }
}

impl<E, A> Store<E, A>
where
    E: Entity,
    A: EntityApi<E>,
{
    pub fn new(api: A) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            inner: Arc::new(StoreInner {
                api,
                tracked: RwLock::new(Tracked {
                    state: EntityState::new(),
                    generations: [0; Operation::ALL.len()],
                }),
                events,
            }),
        }
    }

    pub fn api(&self) -> &A {
        &self.inner.api
    }

    /// Start an operation. The state shows it as loading on return; the
    /// handle resolves once the result has been applied or dropped.
    ///
    /// For entities with [`Entity::REFETCH_AFTER_CREATE`], a successful create
    /// is followed by a fetch-all and the handle also waits for that fetch.
    pub fn dispatch(&self, command: Command<E>) -> JoinHandle<Settlement> {
        let operation = command.operation();
        let inner = Arc::clone(&self.inner);
        let handle = self.spawn_worker(operation, async move { inner.execute(command).await });
        if operation != Operation::Create || !E::REFETCH_AFTER_CREATE {
            return handle;
        }

        let store = self.clone();
        tokio::spawn(async move {
            let settlement = handle
                .await
                .unwrap_or_else(|e| Settlement::Failed(join_error_message(e)));
            if settlement == Settlement::Succeeded {
                tracing::debug!(resource = E::RESOURCE, "Reloading list after create");
                // the reload reports its own outcome through the FetchAll slot
                let _ = store.dispatch(Command::FetchAll).await;
            }
            settlement
        })
    }

    /// Apply an action directly, bypassing the API
    pub fn apply(&self, action: Action<E>) {
        let phase = phase_of(&action);
        let operation = action.operation();
        self.inner.write().state.apply(action);
        self.inner.emit(operation, phase);
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> EntityState<E> {
        self.inner.read().state.clone()
    }

    /// Read the current state without cloning it
    pub fn with_state<R>(&self, f: impl FnOnce(&EntityState<E>) -> R) -> R {
        f(&self.inner.read().state)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.inner.events.subscribe()
    }

    fn spawn_worker<F>(&self, operation: Operation, call: F) -> JoinHandle<Settlement>
    where
        F: Future<Output = ClientResult<Outcome<E>>> + Send + 'static,
    {
        let generation = self.inner.begin(operation);
        let inner = Arc::clone(&self.inner);

        tokio::spawn(async move {
            // The call runs on its own task so a panic inside it surfaces as a JoinError
            let result = match tokio::spawn(call).await {
                Ok(Ok(outcome)) => Ok(outcome),
                Ok(Err(e)) => Err(e.failure_message()),
                Err(e) => Err(join_error_message(e)),
            };
            inner.settle(operation, generation, result)
        })
    }
}

impl<E, A> Store<E, A>
where
    E: ProfileImage,
    A: EntityApi<E> + ImageUploadApi,
{
    /// Upload a profile image; the resulting URL lands in the image-upload state.
    pub fn upload_image(&self, attachment: Attachment) -> JoinHandle<Settlement> {
        let inner = Arc::clone(&self.inner);
        self.spawn_worker(Operation::UploadImage, async move {
            let url = inner.api.upload_profile_image(attachment).await?;
            Ok(Outcome::UploadImage(url))
        })
    }

    /// Clear the image-upload fields. An upload still in flight is dropped when it settles.
    pub fn reset_image_upload(&self) {
        let mut tracked = self.inner.write();
        tracked.generations[Operation::UploadImage.index()] += 1;
        tracked.state.apply(Action::ResetImageUpload);
        drop(tracked);
        self.inner.emit(Operation::UploadImage, EventPhase::Reset);
    }
}

impl<E, A> StoreInner<E, A>
where
    E: Entity,
    A: EntityApi<E>,
{
    async fn execute(&self, command: Command<E>) -> ClientResult<Outcome<E>> {
        let outcome = match command {
            Command::FetchAll => Outcome::FetchAll(self.api.fetch_all().await?),
            Command::FetchOne(id) => Outcome::FetchOne(self.api.fetch_one(id).await?),
            Command::Search(condition) => Outcome::Search(self.api.search(&condition).await?),
            Command::Create { input, attachment } => {
                Outcome::Create(self.api.create(&input, attachment).await?)
            }
            Command::Update { id, input } => Outcome::Update(self.api.update(id, &input).await?),
            Command::Delete(id) => {
                self.api.delete(id).await?;
                Outcome::Delete(id)
            }
        };
        Ok(outcome)
    }

    /// Apply the request transition and claim a new generation for the operation
    fn begin(&self, operation: Operation) -> u64 {
        let mut tracked = self.write();
        let slot = &mut tracked.generations[operation.index()];
        *slot += 1;
        let generation = *slot;
        tracked.state.apply(Action::Requested(operation));
        drop(tracked);

        tracing::debug!(resource = E::RESOURCE, %operation, generation, "Request dispatched");
        self.emit(operation, EventPhase::Requested);
        generation
    }

    fn settle(
        &self,
        operation: Operation,
        generation: u64,
        result: Result<Outcome<E>, String>,
    ) -> Settlement {
        let mut tracked = self.write();
        let current = tracked.generations[operation.index()];
        if current != generation {
            drop(tracked);
            tracing::debug!(
                resource = E::RESOURCE,
                %operation,
                generation,
                current,
                "Superseded result dropped"
            );
            return Settlement::Superseded;
        }

        let (action, settlement, phase) = match result {
            Ok(outcome) => (
                Action::Succeeded(outcome),
                Settlement::Succeeded,
                EventPhase::Succeeded,
            ),
            Err(message) => {
                let message = if message.is_empty() {
                    FALLBACK_ERROR_MESSAGE.to_string()
                } else {
                    message
                };
                (
                    Action::failed(operation, message.clone()),
                    Settlement::Failed(message),
                    EventPhase::Failed,
                )
            }
        };
        tracked.state.apply(action);
        drop(tracked);

        match &settlement {
            Settlement::Failed(message) => {
                tracing::warn!(resource = E::RESOURCE, %operation, error = %message, "Request failed");
            }
            _ => tracing::debug!(resource = E::RESOURCE, %operation, "Request succeeded"),
        }
        self.emit(operation, phase);
        settlement
    }
}

impl<E: Entity, A> StoreInner<E, A> {
    fn read(&self) -> RwLockReadGuard<'_, Tracked<E>> {
        self.tracked.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Tracked<E>> {
        self.tracked.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn emit(&self, operation: Operation, phase: EventPhase) {
        // No subscribers is fine
        let _ = self.events.send(StoreEvent {
            resource: E::RESOURCE,
            operation,
            phase,
        });
    }
}

fn phase_of<E>(action: &Action<E>) -> EventPhase {
    match action {
        Action::Requested(_) => EventPhase::Requested,
        Action::Succeeded(_) => EventPhase::Succeeded,
        Action::Failed { .. } => EventPhase::Failed,
        Action::ResetImageUpload => EventPhase::Reset,
    }
}

fn join_error_message(error: JoinError) -> String {
    if error.is_panic() {
        panic_message(&*error.into_panic())
    } else {
        FALLBACK_ERROR_MESSAGE.to_string()
    }
}
