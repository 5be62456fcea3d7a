use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::entities::DocumentChunk;
use crate::infrastructure::database::schema::documents;

#[derive(Debug, Insertable)]
#[diesel(table_name = documents)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewDocumentRow {
    pub file_name: String,
    pub chunk_index: i32,
    pub content: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<&DocumentChunk> for NewDocumentRow {
    fn from(chunk: &DocumentChunk) -> Self {
        Self {
            file_name: chunk.file_name().to_string(),
            chunk_index: chunk.chunk_index(),
            content: chunk.content().to_string(),
            created_at: Some(chunk.created_at()),
        }
    }
}
