//! Employee Model

use super::{Entity, ProfileImage, SortKey, Sortable};
use serde::{Deserialize, Serialize};

/// Employee record as returned by `/api/jpa/employees`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: i64,
    pub employee_id: Option<String>,
    pub name: Option<String>,
    pub email_local: Option<String>,
    pub email_domain: Option<String>,
    pub email: Option<String>,
    pub department: Option<String>,
    pub gender: Option<String>,
    pub birth_date: Option<String>,
    pub phone_prefix: Option<String>,
    pub phone_middle: Option<String>,
    pub phone_last: Option<String>,
    pub phone: Option<String>,
    pub zip_code: Option<String>,
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub position: Option<String>,
    pub profile_image_url: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Create/update employee payload (no id, no timestamps)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_local: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_middle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_last: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image_url: Option<String>,
}

impl From<&Employee> for EmployeeInput {
    /// Prefill an edit form from an existing record
    fn from(e: &Employee) -> Self {
        Self {
            employee_id: e.employee_id.clone(),
            name: e.name.clone(),
            email_local: e.email_local.clone(),
            email_domain: e.email_domain.clone(),
            email: e.email.clone(),
            department: e.department.clone(),
            gender: e.gender.clone(),
            birth_date: e.birth_date.clone(),
            phone_prefix: e.phone_prefix.clone(),
            phone_middle: e.phone_middle.clone(),
            phone_last: e.phone_last.clone(),
            phone: e.phone.clone(),
            zip_code: e.zip_code.clone(),
            address1: e.address1.clone(),
            address2: e.address2.clone(),
            position: e.position.clone(),
            profile_image_url: e.profile_image_url.clone(),
        }
    }
}

wire_fields! {
    /// Employee columns usable for search and sorting
    pub enum EmployeeField {
        EmployeeId => "employeeId",
        Name => "name",
        Email => "email",
        Department => "department",
        Position => "position",
        Gender => "gender",
        Phone => "phone",
    }
}

impl Entity for Employee {
    type Input = EmployeeInput;
    type SearchField = EmployeeField;

    const RESOURCE: &'static str = "employees";
    const MULTIPART_PART: Option<&'static str> = Some("employee");
    const SEARCHABLE: bool = true;

    fn id(&self) -> i64 {
        self.id
    }
}

impl ProfileImage for Employee {
    fn profile_image_url(&self) -> Option<&str> {
        self.profile_image_url.as_deref()
    }
}

impl Sortable for Employee {
    type SortField = EmployeeField;

    fn sort_key(&self, field: EmployeeField) -> SortKey {
        let value = match field {
            EmployeeField::EmployeeId => &self.employee_id,
            EmployeeField::Name => &self.name,
            EmployeeField::Email => &self.email,
            EmployeeField::Department => &self.department,
            EmployeeField::Position => &self.position,
            EmployeeField::Gender => &self.gender,
            EmployeeField::Phone => &self.phone,
        };
        SortKey::text(value.as_deref())
    }
}
