//! Per-entity state store
//!
//! - [`action`]: commands dispatched by views and the transitions they produce
//! - [`state`]: the state record and its reducer
//! - [`worker`]: the store, which runs API calls and applies their results

pub mod action;
pub mod state;
pub mod worker;

pub use action::{Action, Command, Operation, Outcome};
pub use state::{EntityState, ImageUploadState, OpStatus};
pub use worker::{EventPhase, Settlement, Store, StoreEvent};
