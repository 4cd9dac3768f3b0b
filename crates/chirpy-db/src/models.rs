/// Database row types — these map directly to SQLite rows.
/// Timestamps are RFC 3339 text; the API layer parses them.

#[derive(Debug, Clone)]
pub struct UserRow {
    pub id: String,
    pub created_at: String,
    pub updated_at: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct ChirpRow {
    pub id: String,
    pub created_at: String,
    pub updated_at: String,
    pub body: String,
    pub user_id: Option<String>,
}
