// src/db/featured.rs
use crate::errors::ServerError;
use rusqlite::{params, Connection, OptionalExtension};

/// What kind of area a landing page covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationKind {
    City,
    County,
    Zip,
    Neighborhood,
}

impl LocationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LocationKind::City => "city",
            LocationKind::County => "county",
            LocationKind::Zip => "zip",
            LocationKind::Neighborhood => "neighborhood",
        }
    }

    pub fn parse(value: &str) -> Option<LocationKind> {
        match value {
            "city" => Some(LocationKind::City),
            "county" => Some(LocationKind::County),
            "zip" => Some(LocationKind::Zip),
            "neighborhood" => Some(LocationKind::Neighborhood),
            _ => None,
        }
    }
}

/// An area the site actively markets: drives a landing page at
/// `/locations/{slug}` and a tile on the homepage.
#[derive(Debug, Clone, PartialEq)]
pub struct FeaturedLocation {
    pub slug: String,
    pub kind: LocationKind,
    pub name: String,
    pub headline: String,
    pub blurb: String,
    pub position: i64,
}

fn row_to_location(row: &rusqlite::Row) -> rusqlite::Result<FeaturedLocation> {
    let kind_raw: String = row.get(1)?;
    Ok(FeaturedLocation {
        slug: row.get(0)?,
        kind: LocationKind::parse(&kind_raw).unwrap_or(LocationKind::City),
        name: row.get(2)?,
        headline: row.get(3)?,
        blurb: row.get(4)?,
        position: row.get(5)?,
    })
}

pub fn list_featured(conn: &Connection) -> Result<Vec<FeaturedLocation>, ServerError> {
    let mut stmt = conn
        .prepare(
            "SELECT slug, kind, name, headline, blurb, position
             FROM featured_locations ORDER BY position, slug",
        )
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let rows = stmt
        .query_map([], row_to_location)
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r.map_err(|e| ServerError::DbError(e.to_string()))?);
    }
    Ok(out)
}

pub fn get_featured(
    conn: &Connection,
    slug: &str,
) -> Result<Option<FeaturedLocation>, ServerError> {
    conn.query_row(
        "SELECT slug, kind, name, headline, blurb, position
         FROM featured_locations WHERE slug = ?",
        params![slug],
        row_to_location,
    )
    .optional()
    .map_err(|e| ServerError::DbError(e.to_string()))
}

pub fn upsert_featured(conn: &Connection, loc: &FeaturedLocation) -> Result<(), ServerError> {
    conn.execute(
        r#"
        INSERT INTO featured_locations (slug, kind, name, headline, blurb, position)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        ON CONFLICT(slug) DO UPDATE SET
            kind = excluded.kind,
            name = excluded.name,
            headline = excluded.headline,
            blurb = excluded.blurb,
            position = excluded.position
        "#,
        params![
            loc.slug,
            loc.kind.as_str(),
            loc.name,
            loc.headline,
            loc.blurb,
            loc.position
        ],
    )
    .map_err(|e| ServerError::DbError(e.to_string()))?;
    Ok(())
}

pub fn delete_featured(conn: &Connection, slug: &str) -> Result<(), ServerError> {
    conn.execute("DELETE FROM featured_locations WHERE slug = ?", params![slug])
        .map_err(|e| ServerError::DbError(e.to_string()))?;
    Ok(())
}
