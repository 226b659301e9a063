//! Task search criteria.

use super::{BoardId, Task};

/// Case-insensitive substring search over task titles and descriptions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSearch {
    needle: String,
    board_id: Option<BoardId>,
}

impl TaskSearch {
    /// Builds a search from raw input.
    ///
    /// Returns `None` when the query is blank after trimming; a blank query
    /// matches nothing.
    #[must_use]
    pub fn new(query: &str, board_id: Option<BoardId>) -> Option<Self> {
        let trimmed = query.trim();
        (!trimmed.is_empty()).then(|| Self {
            needle: trimmed.to_lowercase(),
            board_id,
        })
    }

    /// Returns the lowercased search text.
    #[must_use]
    pub fn needle(&self) -> &str {
        &self.needle
    }

    /// Returns the board the search is scoped to, if any.
    #[must_use]
    pub const fn board_id(&self) -> Option<BoardId> {
        self.board_id
    }

    /// Returns whether the task's title or description contains the needle.
    ///
    /// Board scoping is not checked here; it depends on the task's column.
    #[must_use]
    pub fn matches_text(&self, task: &Task) -> bool {
        let contains = |value: &str| value.to_lowercase().contains(&self.needle);
        contains(task.title().as_str()) || task.description().is_some_and(|d| contains(d.as_str()))
    }

    /// Returns an `ILIKE` pattern with SQL wildcards in the needle escaped.
    ///
    /// The escape character is a backslash.
    #[must_use]
    pub fn like_pattern(&self) -> String {
        let mut pattern = String::with_capacity(self.needle.len() + 2);
        pattern.push('%');
        for ch in self.needle.chars() {
            if matches!(ch, '%' | '_' | '\\') {
                pattern.push('\\');
            }
            pattern.push(ch);
        }
        pattern.push('%');
        pattern
    }
}
