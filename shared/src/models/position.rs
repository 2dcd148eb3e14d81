//! Position Model

use super::{Entity, SortKey, Sortable, Unsearchable};
use serde::{Deserialize, Serialize};

/// Position (job title) entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub id: i64,
    pub name: Option<String>,
    pub code: Option<String>,
    pub rank_level: Option<i64>,
    pub description: Option<String>,
    pub status: Option<String>,
}

/// Create/update position payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank_level: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl From<&Position> for PositionInput {
    fn from(p: &Position) -> Self {
        Self {
            name: p.name.clone(),
            code: p.code.clone(),
            rank_level: p.rank_level,
            description: p.description.clone(),
            status: p.status.clone(),
        }
    }
}

wire_fields! {
    pub enum PositionField {
        Name => "name",
        Code => "code",
        RankLevel => "rankLevel",
        Status => "status",
    }
}

impl Entity for Position {
    type Input = PositionInput;
    type SearchField = Unsearchable;

    const RESOURCE: &'static str = "positions";

    fn id(&self) -> i64 {
        self.id
    }
}

impl Sortable for Position {
    type SortField = PositionField;

    fn sort_key(&self, field: PositionField) -> SortKey {
        match field {
            PositionField::Name => SortKey::text(self.name.as_deref()),
            PositionField::Code => SortKey::text(self.code.as_deref()),
            PositionField::RankLevel => SortKey::number(self.rank_level),
            PositionField::Status => SortKey::text(self.status.as_deref()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rank_level_sorts_numerically() {
        let p: Position = serde_json::from_value(json!({"id": 1, "rankLevel": 10})).unwrap();
        let q: Position = serde_json::from_value(json!({"id": 2, "rankLevel": 9})).unwrap();
        assert!(q.sort_key(PositionField::RankLevel) < p.sort_key(PositionField::RankLevel));
    }

    #[test]
    fn test_null_rank_level_is_accepted() {
        let p: Position = serde_json::from_value(json!({"id": 1, "rankLevel": null})).unwrap();
        assert_eq!(p.sort_key(PositionField::RankLevel), SortKey::Missing);
    }
}
