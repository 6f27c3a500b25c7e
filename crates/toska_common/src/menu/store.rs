//! SQLite-backed menu store
//!
//! One shared connection behind a mutex, opened once at startup and handed
//! around through the daemon state. All queries are parameterized.

use super::MenuItem;
use anyhow::{Context, Result};
use rusqlite::{params, Connection};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Menu store backed by SQLite
pub struct MenuStore {
    conn: Arc<Mutex<Connection>>,
    db_path: PathBuf,
}

impl MenuStore {
    /// Open or create the menu database at a specific path
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;

        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
            db_path: path.to_path_buf(),
        };

        store.init_schema()?;
        Ok(store)
    }

    /// An in-memory store, used by tests and by `toskad --ephemeral`
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory database")?;
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
            db_path: PathBuf::from(":memory:"),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<()> {
        let conn = self.conn.lock().unwrap();

        conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS menu_items (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                price INTEGER NOT NULL,
                description TEXT NOT NULL
            )
            "#,
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_menu_items_name ON menu_items(name)",
            [],
        )?;

        Ok(())
    }

    /// Insert a menu item, returning the assigned row id
    pub fn insert(&self, name: &str, price: i64, description: &str) -> Result<i64> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO menu_items (name, price, description) VALUES (?, ?, ?)",
            params![name, price, description],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Full menu in insertion order
    pub fn list(&self) -> Result<Vec<MenuItem>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt =
            conn.prepare("SELECT id, name, price, description FROM menu_items ORDER BY id")?;
        let rows = stmt.query_map([], |row| {
            Ok(MenuItem {
                id: row.get(0)?,
                name: row.get(1)?,
                price: row.get(2)?,
                description: row.get(3)?,
            })
        })?;

        let mut items = Vec::new();
        for row in rows {
            items.push(row?);
        }
        Ok(items)
    }

    /// Substring search on name via SQL LIKE.
    ///
    /// Case rules and wildcard handling are the storage engine's: an empty
    /// query matches everything, and `%` / `_` in the query keep their LIKE
    /// meaning.
    pub fn search(&self, query: &str) -> Result<Vec<MenuItem>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, name, price, description FROM menu_items WHERE name LIKE ? ORDER BY id",
        )?;
        let pattern = format!("%{}%", query);
        let rows = stmt.query_map(params![pattern], |row| {
            Ok(MenuItem {
                id: row.get(0)?,
                name: row.get(1)?,
                price: row.get(2)?,
                description: row.get(3)?,
            })
        })?;

        let mut items = Vec::new();
        for row in rows {
            items.push(row?);
        }
        Ok(items)
    }

    /// Number of menu items
    pub fn count(&self) -> Result<usize> {
        let conn = self.conn.lock().unwrap();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM menu_items", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Path of the backing database file
    pub fn path(&self) -> &Path {
        &self.db_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn test_store() -> (MenuStore, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test_menu.db");
        let store = MenuStore::open(&path).unwrap();
        (store, dir)
    }

    #[test]
    fn create_store_is_empty() {
        let (store, _dir) = test_store();
        assert_eq!(store.count().unwrap(), 0);
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn insert_then_list_returns_row_verbatim() {
        let (store, _dir) = test_store();

        let id = store
            .insert("Margherita Pizza", 180, "Tomato, mozzarella, basil")
            .unwrap();

        let items = store.list().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(
            items[0],
            MenuItem {
                id,
                name: "Margherita Pizza".to_string(),
                price: 180,
                description: "Tomato, mozzarella, basil".to_string(),
            }
        );
    }

    #[test]
    fn list_preserves_insertion_order() {
        let (store, _dir) = test_store();
        store.insert("Soup of the Day", 60, "Ask your server").unwrap();
        store.insert("Caesar Salad", 95, "Romaine, parmesan").unwrap();

        let items = store.list().unwrap();
        assert_eq!(items[0].name, "Soup of the Day");
        assert_eq!(items[1].name, "Caesar Salad");
    }

    #[test]
    fn search_matches_substring_and_excludes_rest() {
        let (store, _dir) = test_store();
        store.insert("Margherita Pizza", 180, "Classic").unwrap();
        store.insert("Pepperoni Pizza", 210, "Spicy").unwrap();
        store.insert("Caesar Salad", 95, "Fresh").unwrap();

        let results = store.search("Pizza").unwrap();
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|item| item.name.contains("Pizza")));

        let results = store.search("Salad").unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Caesar Salad");
    }

    #[test]
    fn empty_query_returns_everything() {
        let (store, _dir) = test_store();
        store.insert("Margherita Pizza", 180, "Classic").unwrap();
        store.insert("Caesar Salad", 95, "Fresh").unwrap();

        assert_eq!(store.search("").unwrap().len(), 2);
    }

    #[test]
    fn like_wildcards_in_query_keep_their_meaning() {
        let (store, _dir) = test_store();
        store.insert("100% Rye", 85, "Dense loaf").unwrap();
        store.insert("Pita Bread", 40, "Warm").unwrap();
        store.insert("Pasta", 120, "Fresh egg pasta").unwrap();

        // '%' stays a LIKE wildcard, so it matches every row
        assert_eq!(store.search("%").unwrap().len(), 3);

        // '_' stays the single-character wildcard: "P_ta" matches
        // "Pita Bread" but not "Pasta"
        let results = store.search("P_ta").unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Pita Bread");
    }

    #[test]
    fn search_with_no_match_is_empty() {
        let (store, _dir) = test_store();
        store.insert("Caesar Salad", 95, "Fresh").unwrap();
        assert!(store.search("Burger").unwrap().is_empty());
    }

    #[test]
    fn in_memory_store_works() {
        let store = MenuStore::open_in_memory().unwrap();
        store.insert("Tiramisu", 70, "House dessert").unwrap();
        assert_eq!(store.count().unwrap(), 1);
    }
}
