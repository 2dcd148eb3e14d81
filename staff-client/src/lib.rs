//! Staff Client - client for the hospital staff administration API
//!
//! Provides typed REST calls for employees, medical staff, departments and
//! positions, plus a per-entity state store whose workers apply
//! request/success/failure transitions with last-request-wins semantics.

pub mod api;
pub mod client;
pub mod config;
pub mod directory;
pub mod error;
pub mod logger;
pub mod store;
pub mod view;

pub use api::{Attachment, EntityApi, ImageUploadApi, RestApi};
pub use client::{HttpClient, NetworkHttpClient};
pub use config::ClientConfig;
pub use directory::{DepartmentStore, EmployeeStore, MedicalStaffStore, PositionStore, StaffDirectory};
pub use error::{ClientError, ClientResult, FALLBACK_ERROR_MESSAGE};
pub use store::{
    Action, Command, EntityState, EventPhase, ImageUploadState, OpStatus, Operation, Outcome,
    Settlement, Store, StoreEvent,
};

// Re-export shared types for convenience
pub use shared::{
    ApiResponse, Department, DepartmentInput, Employee, EmployeeInput, Entity, MedicalStaff,
    MedicalStaffInput, Position, PositionInput, SearchCondition,
};
