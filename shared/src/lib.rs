//! Shared types for the staff admin client
//!
//! Wire-level types used in API communication: the response envelope,
//! the entity records and their input payloads, and search conditions.

pub mod models;
pub mod response;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use models::{
    Department, DepartmentField, DepartmentInput, Employee, EmployeeField, EmployeeInput, Entity,
    MedicalStaff, MedicalStaffInput, MedicalStaffSearchField, MedicalStaffSortField,
    ParseFieldError, Position, PositionField, PositionInput, ProfileImage, SearchCondition,
    SortKey, Sortable, Unsearchable,
};
pub use response::{ApiResponse, OneOrMany, Rejection};
