//! Department Model

use super::{Entity, SortKey, Sortable, Unsearchable};
use serde::{Deserialize, Serialize};

/// Department entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub id: i64,
    pub name: Option<String>,
    pub building_no: Option<String>,
    pub floor_no: Option<String>,
    pub room_no: Option<String>,
    /// Medical staff id of the department head
    pub head_medical_staff_id: Option<i64>,
    pub extension: Option<String>,
    pub status: Option<String>,
}

/// Create/update department payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub building_no: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floor_no: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_no: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head_medical_staff_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl From<&Department> for DepartmentInput {
    fn from(d: &Department) -> Self {
        Self {
            name: d.name.clone(),
            building_no: d.building_no.clone(),
            floor_no: d.floor_no.clone(),
            room_no: d.room_no.clone(),
            head_medical_staff_id: d.head_medical_staff_id,
            extension: d.extension.clone(),
            status: d.status.clone(),
        }
    }
}

wire_fields! {
    pub enum DepartmentField {
        Name => "name",
        BuildingNo => "buildingNo",
        Extension => "extension",
        Status => "status",
    }
}

impl Entity for Department {
    type Input = DepartmentInput;
    type SearchField = Unsearchable;

    const RESOURCE: &'static str = "departments";

    fn id(&self) -> i64 {
        self.id
    }
}

impl Sortable for Department {
    type SortField = DepartmentField;

    fn sort_key(&self, field: DepartmentField) -> SortKey {
        let value = match field {
            DepartmentField::Name => &self.name,
            DepartmentField::BuildingNo => &self.building_no,
            DepartmentField::Extension => &self.extension,
            DepartmentField::Status => &self.status,
        };
        SortKey::text(value.as_deref())
    }
}
