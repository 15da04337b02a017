//! SQLite persistence for templates and generated documents.
//!
//! A connection is opened for every operation; the store itself only holds
//! the database path and is cheap to clone into handlers.

use crate::error::{AppError, AppResult};
use chrono::{DateTime, Utc};
use common::model::document::{Document, ExportFormat};
use common::model::template::{Template, TemplateStatus};
use common::requests::SaveTemplateRequest;
use log::info;
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row, TransactionBehavior};
use std::path::PathBuf;
use std::time::Duration;
use uuid::Uuid;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS templates (
    id          TEXT PRIMARY KEY,
    name        TEXT NOT NULL,
    description TEXT,
    content     TEXT NOT NULL,
    status      TEXT NOT NULL DEFAULT 'active',
    version     INTEGER NOT NULL DEFAULT 1,
    created_at  TEXT NOT NULL,
    updated_at  TEXT NOT NULL,
    created_by  TEXT,
    updated_by  TEXT
);
CREATE TABLE IF NOT EXISTS documents (
    id               TEXT PRIMARY KEY,
    template_id      TEXT NOT NULL,
    template_version INTEGER NOT NULL,
    file_name        TEXT NOT NULL,
    format           TEXT NOT NULL,
    content          BLOB NOT NULL,
    content_md5      TEXT NOT NULL,
    size             INTEGER NOT NULL,
    created_at       TEXT NOT NULL,
    created_by       TEXT
);
CREATE INDEX IF NOT EXISTS idx_documents_template ON documents (template_id);
";

/// How long a writer waits for another connection's lock.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const TEMPLATE_COLUMNS: &str =
    "id, name, description, content, status, version, created_at, updated_at, created_by, updated_by";

/// A rendered file about to be stored.
#[derive(Debug, Clone)]
pub struct NewDocument {
    pub template_id: String,
    pub template_version: u32,
    pub file_name: String,
    pub format: ExportFormat,
    pub content: Vec<u8>,
    pub created_by: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Store {
    db_path: PathBuf,
}

impl Store {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    fn connection(&self) -> AppResult<Connection> {
        let conn = Connection::open(&self.db_path)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        Ok(conn)
    }

    pub fn init_schema(&self) -> AppResult<()> {
        self.connection()?.execute_batch(SCHEMA)?;
        info!("Database ready at {}", self.db_path.display());
        Ok(())
    }

    pub fn get_template(&self, template_id: &str) -> AppResult<Template> {
        let conn = self.connection()?;
        find_template(&conn, template_id)?
            .ok_or_else(|| AppError::TemplateNotFound(template_id.to_string()))
    }

    /// Templates ordered by name, optionally filtered by status.
    pub fn list_templates(&self, status: Option<TemplateStatus>) -> AppResult<Vec<Template>> {
        let conn = self.connection()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM templates WHERE ?1 IS NULL OR status = ?1 ORDER BY name, id",
            TEMPLATE_COLUMNS
        ))?;
        let templates = stmt
            .query_map(params![status.map(|s| s.as_str())], template_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(templates)
    }

    /// Creates a template, or updates it when `request.id` names an existing
    /// one. The version increases only when the content changes; the read and
    /// the write share one immediate transaction so concurrent edits each
    /// get their own version.
    pub fn save_template(&self, request: &SaveTemplateRequest) -> AppResult<Template> {
        let name = request.name.trim();
        if name.is_empty() {
            return Err(AppError::Validation("Template name cannot be empty".to_string()));
        }
        if request.content.trim().is_empty() {
            return Err(AppError::Validation("Template content cannot be empty".to_string()));
        }

        let mut conn = self.connection()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let now = Utc::now();
        let existing = match request.id.as_deref().map(str::trim) {
            Some("") => {
                return Err(AppError::Validation("Template id cannot be empty".to_string()))
            }
            Some(id) => find_template(&tx, id)?,
            None => None,
        };

        let template = match existing {
            Some(current) => {
                let version = if current.content != request.content {
                    current.version + 1
                } else {
                    current.version
                };
                let template = Template {
                    name: name.to_string(),
                    description: request.description.clone(),
                    content: request.content.clone(),
                    status: request.status.unwrap_or(current.status),
                    version,
                    updated_at: now,
                    updated_by: request.user_id.clone(),
                    ..current
                };
                tx.execute(
                    "UPDATE templates SET name = ?2, description = ?3, content = ?4, status = ?5,
                        version = ?6, updated_at = ?7, updated_by = ?8
                     WHERE id = ?1",
                    params![
                        template.id,
                        template.name,
                        template.description,
                        template.content,
                        template.status.as_str(),
                        template.version,
                        template.updated_at,
                        template.updated_by,
                    ],
                )?;
                template
            }
            None => {
                let template = Template {
                    id: request
                        .id
                        .as_deref()
                        .map(|id| id.trim().to_string())
                        .unwrap_or_else(|| Uuid::new_v4().to_string()),
                    name: name.to_string(),
                    description: request.description.clone(),
                    content: request.content.clone(),
                    status: request.status.unwrap_or_default(),
                    version: 1,
                    created_at: now,
                    updated_at: now,
                    created_by: request.user_id.clone(),
                    updated_by: request.user_id.clone(),
                };
                tx.execute(
                    &format!(
                        "INSERT INTO templates ({}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                        TEMPLATE_COLUMNS
                    ),
                    params![
                        template.id,
                        template.name,
                        template.description,
                        template.content,
                        template.status.as_str(),
                        template.version,
                        template.created_at,
                        template.updated_at,
                        template.created_by,
                        template.updated_by,
                    ],
                )?;
                template
            }
        };
        tx.commit()?;

        info!("Saved template {} (version {})", template.id, template.version);
        Ok(template)
    }

    pub fn set_template_status(
        &self,
        template_id: &str,
        status: TemplateStatus,
        user_id: Option<&str>,
    ) -> AppResult<Template> {
        let conn = self.connection()?;
        let changed = conn.execute(
            "UPDATE templates SET status = ?2, updated_at = ?3, updated_by = ?4 WHERE id = ?1",
            params![template_id, status.as_str(), Utc::now(), user_id],
        )?;
        if changed == 0 {
            return Err(AppError::TemplateNotFound(template_id.to_string()));
        }
        find_template(&conn, template_id)?
            .ok_or_else(|| AppError::TemplateNotFound(template_id.to_string()))
    }

    /// Removes the template. Documents generated from it are kept.
    pub fn delete_template(&self, template_id: &str) -> AppResult<()> {
        let conn = self.connection()?;
        let deleted = conn.execute("DELETE FROM templates WHERE id = ?1", params![template_id])?;
        if deleted == 0 {
            return Err(AppError::TemplateNotFound(template_id.to_string()));
        }
        info!("Deleted template {}", template_id);
        Ok(())
    }

    pub fn create_document(&self, new: NewDocument) -> AppResult<Document> {
        let document = Document {
            id: Uuid::new_v4().to_string(),
            template_id: new.template_id,
            template_version: new.template_version,
            file_name: new.file_name,
            format: new.format,
            content_md5: format!("{:x}", md5::compute(&new.content)),
            size: new.content.len() as u64,
            content: new.content,
            created_at: Utc::now(),
            created_by: new.created_by,
        };

        self.connection()?.execute(
            "INSERT INTO documents (id, template_id, template_version, file_name, format, content,
                content_md5, size, created_at, created_by)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                document.id,
                document.template_id,
                document.template_version,
                document.file_name,
                document.format.extension(),
                document.content,
                document.content_md5,
                document.size as i64,
                document.created_at,
                document.created_by,
            ],
        )?;
        Ok(document)
    }

    /// Loads a document including its bytes.
    pub fn get_document(&self, document_id: &str) -> AppResult<Document> {
        let conn = self.connection()?;
        conn.query_row(
            "SELECT id, template_id, template_version, file_name, format, content_md5, size,
                created_at, created_by, content
             FROM documents WHERE id = ?1",
            params![document_id],
            |row| {
                let mut document = document_from_row(row)?;
                document.content = row.get(9)?;
                Ok(document)
            },
        )
        .optional()?
        .ok_or_else(|| AppError::DocumentNotFound(document_id.to_string()))
    }

    /// Documents of a template, newest first, without their bytes.
    pub fn list_documents(&self, template_id: &str) -> AppResult<Vec<Document>> {
        let conn = self.connection()?;
        let mut stmt = conn.prepare(
            "SELECT id, template_id, template_version, file_name, format, content_md5, size,
                created_at, created_by
             FROM documents WHERE template_id = ?1 ORDER BY created_at DESC, id",
        )?;
        let documents = stmt
            .query_map(params![template_id], document_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(documents)
    }
}

fn find_template(conn: &Connection, template_id: &str) -> AppResult<Option<Template>> {
    let template = conn
        .query_row(
            &format!("SELECT {} FROM templates WHERE id = ?1", TEMPLATE_COLUMNS),
            params![template_id],
            template_from_row,
        )
        .optional()?;
    Ok(template)
}

fn parse_column<T>(index: usize, raw: String) -> rusqlite::Result<T>
where
    T: std::str::FromStr<Err = String>,
{
    raw.parse()
        .map_err(|e: String| rusqlite::Error::FromSqlConversionFailure(index, Type::Text, e.into()))
}

fn template_from_row(row: &Row) -> rusqlite::Result<Template> {
    Ok(Template {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        content: row.get(3)?,
        status: parse_column(4, row.get(4)?)?,
        version: row.get(5)?,
        created_at: row.get::<_, DateTime<Utc>>(6)?,
        updated_at: row.get::<_, DateTime<Utc>>(7)?,
        created_by: row.get(8)?,
        updated_by: row.get(9)?,
    })
}

fn document_from_row(row: &Row) -> rusqlite::Result<Document> {
    Ok(Document {
        id: row.get(0)?,
        template_id: row.get(1)?,
        template_version: row.get(2)?,
        file_name: row.get(3)?,
        format: parse_column::<ExportFormat>(4, row.get(4)?)?,
        content: Vec::new(),
        content_md5: row.get(5)?,
        size: row.get::<_, i64>(6)?.max(0) as u64,
        created_at: row.get::<_, DateTime<Utc>>(7)?,
        created_by: row.get(8)?,
    })
}
