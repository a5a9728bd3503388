// src/db/pages.rs
use crate::errors::ServerError;
use rusqlite::{params, Connection, OptionalExtension};

/// A blog post or static content page authored from the admin. `body_html`
/// is stored as rendered HTML and trusted (admin-only input).
#[derive(Debug, Clone, PartialEq)]
pub struct ContentPage {
    pub slug: String,
    pub title: String,
    pub meta_description: String,
    pub body_html: String,
    pub published: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

fn row_to_page(row: &rusqlite::Row) -> rusqlite::Result<ContentPage> {
    Ok(ContentPage {
        slug: row.get(0)?,
        title: row.get(1)?,
        meta_description: row.get(2)?,
        body_html: row.get(3)?,
        published: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}

const PAGE_COLUMNS: &str =
    "slug, title, meta_description, body_html, published, created_at, updated_at";

pub fn list_published(conn: &Connection) -> Result<Vec<ContentPage>, ServerError> {
    list_where(conn, "WHERE published = 1")
}

pub fn list_all(conn: &Connection) -> Result<Vec<ContentPage>, ServerError> {
    list_where(conn, "")
}

fn list_where(conn: &Connection, clause: &str) -> Result<Vec<ContentPage>, ServerError> {
    let sql = format!("SELECT {PAGE_COLUMNS} FROM pages {clause} ORDER BY created_at DESC");
    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let rows = stmt
        .query_map([], row_to_page)
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r.map_err(|e| ServerError::DbError(e.to_string()))?);
    }
    Ok(out)
}

pub fn get_published(conn: &Connection, slug: &str) -> Result<Option<ContentPage>, ServerError> {
    conn.query_row(
        &format!("SELECT {PAGE_COLUMNS} FROM pages WHERE slug = ? AND published = 1"),
        params![slug],
        row_to_page,
    )
    .optional()
    .map_err(|e| ServerError::DbError(e.to_string()))
}

pub fn get_page(conn: &Connection, slug: &str) -> Result<Option<ContentPage>, ServerError> {
    conn.query_row(
        &format!("SELECT {PAGE_COLUMNS} FROM pages WHERE slug = ?"),
        params![slug],
        row_to_page,
    )
    .optional()
    .map_err(|e| ServerError::DbError(e.to_string()))
}

pub fn upsert_page(
    conn: &Connection,
    slug: &str,
    title: &str,
    meta_description: &str,
    body_html: &str,
    published: bool,
    now: i64,
) -> Result<(), ServerError> {
    conn.execute(
        r#"
        INSERT INTO pages (slug, title, meta_description, body_html, published, created_at, updated_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
        ON CONFLICT(slug) DO UPDATE SET
            title = excluded.title,
            meta_description = excluded.meta_description,
            body_html = excluded.body_html,
            published = excluded.published,
            updated_at = excluded.updated_at
        "#,
        params![slug, title, meta_description, body_html, published, now],
    )
    .map_err(|e| ServerError::DbError(e.to_string()))?;
    Ok(())
}

pub fn delete_page(conn: &Connection, slug: &str) -> Result<(), ServerError> {
    conn.execute("DELETE FROM pages WHERE slug = ?", params![slug])
        .map_err(|e| ServerError::DbError(e.to_string()))?;
    Ok(())
}
