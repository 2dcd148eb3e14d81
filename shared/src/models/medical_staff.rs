//! Medical Staff Model

use super::{Entity, SortKey, Sortable};
use serde::{Deserialize, Serialize};

/// Medical staff record as returned by `/api/jpa/medical-staff`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalStaff {
    pub id: i64,
    pub username: Option<String>,
    pub email: Option<String>,
    pub status: Option<String>,
    pub domain_role: Option<String>,
    pub full_name: Option<String>,
    pub office_location: Option<String>,
    pub bio: Option<String>,
    pub phone: Option<String>,
    pub department_id: Option<i64>,
    pub position_id: Option<i64>,
    /// Resolved by the server from `departmentId`
    pub department_name: Option<String>,
    /// Resolved by the server from `positionId`
    pub position_name: Option<String>,
    pub profile_image_url: Option<String>,
}

/// Create/update medical staff payload
///
/// Department and position are referenced by id only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalStaffInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain_role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub office_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_id: Option<i64>,
}

impl From<&MedicalStaff> for MedicalStaffInput {
    fn from(s: &MedicalStaff) -> Self {
        Self {
            username: s.username.clone(),
            email: s.email.clone(),
            status: s.status.clone(),
            domain_role: s.domain_role.clone(),
            full_name: s.full_name.clone(),
            office_location: s.office_location.clone(),
            bio: s.bio.clone(),
            phone: s.phone.clone(),
            department_id: s.department_id,
            position_id: s.position_id,
        }
    }
}

wire_fields! {
    /// Search conditions understood by `/medical-staff/search`
    pub enum MedicalStaffSearchField {
        Name => "name",
        Department => "department",
        Position => "position",
        StaffType => "staff_type",
        StaffId => "staff_id",
    }
}

wire_fields! {
    pub enum MedicalStaffSortField {
        Username => "username",
        FullName => "fullName",
        Department => "departmentName",
        Position => "positionName",
        Status => "status",
    }
}

impl Entity for MedicalStaff {
    type Input = MedicalStaffInput;
    type SearchField = MedicalStaffSearchField;

    const RESOURCE: &'static str = "medical-staff";
    const MULTIPART_PART: Option<&'static str> = Some("staff");
    const SEARCHABLE: bool = true;
    // departmentName/positionName are only resolved on list reads
    const REFETCH_AFTER_CREATE: bool = true;

    fn id(&self) -> i64 {
        self.id
    }
}

impl Sortable for MedicalStaff {
    type SortField = MedicalStaffSortField;

    fn sort_key(&self, field: MedicalStaffSortField) -> SortKey {
        let value = match field {
            MedicalStaffSortField::Username => &self.username,
            MedicalStaffSortField::FullName => &self.full_name,
            MedicalStaffSortField::Department => &self.department_name,
            MedicalStaffSortField::Position => &self.position_name,
            MedicalStaffSortField::Status => &self.status,
        };
        SortKey::text(value.as_deref())
    }
}
