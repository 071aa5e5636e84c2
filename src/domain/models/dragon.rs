//! Smoke test row model.

use serde::Serialize;

/// One row of the `dragon` table read back by the smoke test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DragonRow {
    /// Auto-increment primary key.
    pub id: i64,
    /// Dragon name.
    pub name: String,
    /// Insert time as `%Y-%m-%d %H:%M:%S`.
    pub created_at: String,
}

impl DragonRow {
    /// Row from already-decoded columns.
    pub fn new(id: i64, name: impl Into<String>, created_at: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            created_at: created_at.into(),
        }
    }
}
