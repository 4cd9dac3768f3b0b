use crate::models::{ChirpRow, UserRow};
use crate::Database;
use anyhow::Result;
use chrono::{SecondsFormat, Utc};
use rusqlite::{Connection, Row};

const USER_COLUMNS: &str = "id, created_at, updated_at, email, password";
const CHIRP_COLUMNS: &str = "id, created_at, updated_at, body, user_id";

/// Current time as stored in the database. Fixed-width so text order is time order.
fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

impl Database {
    // -- Users --

    pub fn create_user(&self, id: &str, email: &str, password_hash: &str) -> Result<UserRow> {
        self.with_conn(|conn| {
            let ts = now();
            let row = conn.query_row(
                &format!(
                    "INSERT INTO users (id, created_at, updated_at, email, password)
                     VALUES (?1, ?2, ?2, ?3, ?4)
                     RETURNING {USER_COLUMNS}"
                ),
                (id, &ts, email, password_hash),
                user_from_row,
            )?;
            Ok(row)
        })
    }

    pub fn get_user_by_email(&self, email: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user_by_email(conn, email))
    }

    /// Deletes the user with this email along with their chirps.
    /// Returns the number of users removed (0 or 1).
    pub fn delete_user_by_email(&self, email: &str) -> Result<usize> {
        self.with_conn(|conn| Ok(conn.execute("DELETE FROM users WHERE email = ?1", [email])?))
    }

    // -- Chirps --

    pub fn create_chirp(&self, id: &str, body: &str, user_id: Option<&str>) -> Result<ChirpRow> {
        self.with_conn(|conn| {
            let ts = now();
            let row = conn.query_row(
                &format!(
                    "INSERT INTO chirps (id, created_at, updated_at, body, user_id)
                     VALUES (?1, ?2, ?2, ?3, ?4)
                     RETURNING {CHIRP_COLUMNS}"
                ),
                rusqlite::params![id, ts, body, user_id],
                chirp_from_row,
            )?;
            Ok(row)
        })
    }

    pub fn get_chirps(&self) -> Result<Vec<ChirpRow>> {
        self.with_conn(query_chirps)
    }

    pub fn get_chirp(&self, id: &str) -> Result<Option<ChirpRow>> {
        self.with_conn(|conn| {
            conn.query_row(
                &format!("SELECT {CHIRP_COLUMNS} FROM chirps WHERE id = ?1"),
                [id],
                chirp_from_row,
            )
            .optional()
        })
    }
}

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<UserRow> {
    Ok(UserRow {
        id: row.get(0)?,
        created_at: row.get(1)?,
        updated_at: row.get(2)?,
        email: row.get(3)?,
        password: row.get(4)?,
    })
}

fn chirp_from_row(row: &Row<'_>) -> rusqlite::Result<ChirpRow> {
    Ok(ChirpRow {
        id: row.get(0)?,
        created_at: row.get(1)?,
        updated_at: row.get(2)?,
        body: row.get(3)?,
        user_id: row.get(4)?,
    })
}

fn query_user_by_email(conn: &Connection, email: &str) -> Result<Option<UserRow>> {
    let mut stmt = conn.prepare(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?1"))?;

    let row = stmt.query_row([email], user_from_row).optional()?;

    Ok(row)
}

fn query_chirps(conn: &Connection) -> Result<Vec<ChirpRow>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {CHIRP_COLUMNS} FROM chirps ORDER BY created_at ASC, rowid ASC"
    ))?;

    let rows = stmt
        .query_map([], chirp_from_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

/// Extension trait for optional query results
trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn new_id() -> String {
        Uuid::new_v4().to_string()
    }

    #[test]
    fn create_and_find_user() {
        let db = Database::open_in_memory().unwrap();
        let id = new_id();

        let created = db.create_user(&id, "walt@breakingbad.com", "hash").unwrap();
        assert_eq!(created.id, id);
        assert_eq!(created.created_at, created.updated_at);

        let found = db.get_user_by_email("walt@breakingbad.com").unwrap().unwrap();
        assert_eq!(found.id, id);
        assert_eq!(found.password, "hash");

        assert!(db.get_user_by_email("jesse@breakingbad.com").unwrap().is_none());
    }

    #[test]
    fn duplicate_email_is_rejected() {
        let db = Database::open_in_memory().unwrap();
        db.create_user(&new_id(), "saul@bcs.com", "a").unwrap();
        assert!(db.create_user(&new_id(), "saul@bcs.com", "b").is_err());
    }

    #[test]
    fn chirps_listed_in_creation_order() {
        let db = Database::open_in_memory().unwrap();
        let user = db.create_user(&new_id(), "a@b.c", "hash").unwrap();

        let first = db.create_chirp(&new_id(), "first", Some(user.id.as_str())).unwrap();
        let second = db.create_chirp(&new_id(), "second", None).unwrap();

        let all = db.get_chirps().unwrap();
        let ids: Vec<_> = all.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, [first.id.as_str(), second.id.as_str()]);
        assert_eq!(all[0].user_id.as_deref(), Some(user.id.as_str()));
        assert_eq!(all[1].user_id, None);
    }

    #[test]
    fn get_missing_chirp_is_none() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.get_chirp("nope").unwrap().is_none());
    }

    #[test]
    fn chirp_for_unknown_user_fails() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.create_chirp(&new_id(), "orphan", Some("ghost")).is_err());
    }

    #[test]
    fn deleting_user_removes_their_chirps() {
        let db = Database::open_in_memory().unwrap();
        let user = db.create_user(&new_id(), "gone@x.io", "hash").unwrap();
        let chirp = db.create_chirp(&new_id(), "bye", Some(user.id.as_str())).unwrap();

        assert_eq!(db.delete_user_by_email("gone@x.io").unwrap(), 1);
        assert_eq!(db.delete_user_by_email("gone@x.io").unwrap(), 0);
        assert!(db.get_user_by_email("gone@x.io").unwrap().is_none());
        assert!(db.get_chirp(&chirp.id).unwrap().is_none());
    }
}
