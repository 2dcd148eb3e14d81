//! Staff directory - one store per entity group over a shared transport

use crate::api::RestApi;
use crate::client::NetworkHttpClient;
use crate::store::Store;
use crate::{ClientConfig, ClientResult};
use shared::{Department, Employee, MedicalStaff, Position};
use std::sync::Arc;

pub type EmployeeStore = Store<Employee, RestApi<Employee>>;
pub type MedicalStaffStore = Store<MedicalStaff, RestApi<MedicalStaff>>;
pub type DepartmentStore = Store<Department, RestApi<Department>>;
pub type PositionStore = Store<Position, RestApi<Position>>;

/// Entry point for applications: the four entity stores, created empty.
#[derive(Debug, Clone)]
pub struct StaffDirectory {
    pub employees: EmployeeStore,
    pub medical_staff: MedicalStaffStore,
    pub departments: DepartmentStore,
    pub positions: PositionStore,
}

impl StaffDirectory {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let http = Arc::new(NetworkHttpClient::new(config)?);
        Self::with_http(http, config)
    }

    /// Build over an existing transport
    pub fn with_http(http: Arc<NetworkHttpClient>, config: &ClientConfig) -> ClientResult<Self> {
        tracing::info!(
            employees = %config.employees_url,
            medical_staff = %config.medical_staff_url,
            departments = %config.departments_url,
            positions = %config.positions_url,
            "Staff directory initialized"
        );

        Ok(Self {
            employees: Store::new(RestApi::from_config(Arc::clone(&http), config)?),
            medical_staff: Store::new(RestApi::from_config(Arc::clone(&http), config)?),
            departments: Store::new(RestApi::from_config(Arc::clone(&http), config)?),
            positions: Store::new(RestApi::from_config(http, config)?),
        })
    }
}
