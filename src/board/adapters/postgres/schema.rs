//! Diesel schema for board persistence.

diesel::table! {
    /// Board records.
    boards (id) {
        /// Board identifier.
        id -> Uuid,
        /// Trimmed, non-empty title.
        title -> Text,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Columns owned by a board, ordered by position.
    board_columns (id) {
        /// Column identifier.
        id -> Uuid,
        /// Owning board; deleting the board cascades.
        board_id -> Uuid,
        /// Trimmed, non-empty title.
        title -> Text,
        /// Position among the board's columns, not unique.
        position -> Int4,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Tasks owned by a column, ordered by position.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Owning column; deleting the column cascades.
        column_id -> Uuid,
        /// Trimmed, non-empty title.
        title -> Text,
        /// Optional trimmed description, never blank.
        description -> Nullable<Text>,
        /// Position among the column's tasks, not unique.
        position -> Int4,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(board_columns -> boards (board_id));
diesel::joinable!(tasks -> board_columns (column_id));

diesel::allow_tables_to_appear_in_same_query!(boards, board_columns, tasks);
