use crate::error::{MapError, Result};
use crate::model::{Category, LinkRecord};
use rusqlite::{Connection, OpenFlags, OptionalExtension, params};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Columns that have held a link's category over the crawler's schema history.
const CATEGORY_COLUMNS: [&str; 2] = ["category_id", "classification_id"];

pub struct LinkStore {
    conn: Connection,
    path: PathBuf,
}

impl LinkStore {
    pub fn exists(path: &Path) -> bool {
        path.exists()
    }

    /// Opens an existing crawl database for reading.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| MapError::input_unavailable(path, e))?;

        debug!("Opened link database {}", path.display());
        Ok(LinkStore {
            conn,
            path: path.to_path_buf(),
        })
    }

    /// Creates the database (or opens it for writing) and makes sure the
    /// crawler schema exists.
    pub fn create(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;

        let store = LinkStore {
            conn,
            path: path.to_path_buf(),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS categories (
    category_id INTEGER PRIMARY KEY,
    category TEXT UNIQUE
);

CREATE TABLE IF NOT EXISTS link (
    id INTEGER PRIMARY KEY,
    URL TEXT NOT NULL,
    parent_id INTEGER,
    depth INTEGER,
    category_id INTEGER,
    FOREIGN KEY(category_id) REFERENCES categories(category_id)
);

CREATE INDEX IF NOT EXISTS idx_link_depth ON link(depth, id);
            ",
        )?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn insert_link(&self, link: &LinkRecord) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO link (id, URL, parent_id, depth, category_id) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                link.id,
                &link.url,
                link.parent_id,
                link.depth as i64,
                link.category_id,
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    pub fn insert_category(&self, category: &Category) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO categories (category_id, category) VALUES (?1, ?2)",
            params![category.id, &category.keyword],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    /// All links ordered by depth, then id, so that parents precede their
    /// children whenever the recorded depths are consistent.
    pub fn load_links(&self) -> Result<Vec<LinkRecord>> {
        let unavailable = |e: rusqlite::Error| MapError::input_unavailable(&self.path, e);

        let category_expr = self.category_column().map_err(unavailable)?.unwrap_or("NULL");
        let sql = format!(
            "SELECT id, URL, parent_id, depth, {} FROM link ORDER BY depth, id",
            category_expr
        );

        let mut stmt = self.conn.prepare(&sql).map_err(unavailable)?;
        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, Option<i64>>(2)?,
                    row.get::<_, Option<i64>>(3)?,
                    row.get::<_, Option<i64>>(4)?,
                ))
            })
            .map_err(unavailable)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(unavailable)?;

        let links = rows
            .into_iter()
            .map(|(id, url, parent_id, depth, category_id)| {
                let depth = depth.unwrap_or(0);
                let depth = u32::try_from(depth).unwrap_or_else(|_| {
                    warn!("Link {} has out-of-range depth {}, using 0", id, depth);
                    0
                });
                LinkRecord {
                    id,
                    url,
                    parent_id: parent_id.unwrap_or(0),
                    depth,
                    category_id,
                }
            })
            .collect::<Vec<_>>();

        info!("Loaded {} links from {}", links.len(), self.path.display());
        Ok(links)
    }

    /// Category table in id order. A database without the table yields no
    /// categories.
    pub fn load_categories(&self) -> Result<Vec<Category>> {
        let unavailable = |e: rusqlite::Error| MapError::input_unavailable(&self.path, e);

        if !self.table_exists("categories").map_err(unavailable)? {
            warn!(
                "No categories table in {}, all links will be uncategorized",
                self.path.display()
            );
            return Ok(Vec::new());
        }

        let mut stmt = self
            .conn
            .prepare("SELECT category_id, category FROM categories ORDER BY category_id")
            .map_err(unavailable)?;

        let categories = stmt
            .query_map([], |row| {
                Ok((row.get::<_, i64>(0)?, row.get::<_, Option<String>>(1)?))
            })
            .map_err(unavailable)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(unavailable)?
            .into_iter()
            .filter_map(|(id, keyword)| match keyword {
                Some(keyword) => Some(Category { id, keyword }),
                None => {
                    debug!("Skipping category {} without a keyword", id);
                    None
                }
            })
            .collect::<Vec<_>>();

        Ok(categories)
    }

    fn table_exists(&self, name: &str) -> rusqlite::Result<bool> {
        let found = self
            .conn
            .query_row(
                "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1",
                params![name],
                |row| row.get::<_, i64>(0),
            )
            .optional()?;
        Ok(found.is_some())
    }

    fn category_column(&self) -> rusqlite::Result<Option<&'static str>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name FROM pragma_table_info('link')")?;
        let columns = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(CATEGORY_COLUMNS
            .into_iter()
            .find(|wanted| columns.iter().any(|c| c.eq_ignore_ascii_case(wanted))))
    }
}
