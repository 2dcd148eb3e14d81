//! Client-side column sorting

use shared::Sortable;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Active sort column of a list view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState<F> {
    pub field: F,
    pub direction: SortDirection,
}

impl<F: Copy + PartialEq> SortState<F> {
    pub fn ascending(field: F) -> Self {
        Self {
            field,
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(field: F) -> Self {
        Self {
            field,
            direction: SortDirection::Descending,
        }
    }

    /// Header click: same column flips direction, another column starts ascending.
    pub fn toggle(&mut self, field: F) {
        if self.field == field {
            self.direction = self.direction.flipped();
        } else {
            *self = Self::ascending(field);
        }
    }
}

/// Sorted copy of `items`; ties keep their original relative order.
pub fn sorted<E: Sortable>(items: &[E], sort: &SortState<E::SortField>) -> Vec<E> {
    let mut copied = items.to_vec();
    copied.sort_by(|a, b| {
        let ord = a.sort_key(sort.field).cmp(&b.sort_key(sort.field));
        match sort.direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
    copied
}
