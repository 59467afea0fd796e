//! Persistence and session collaborators. Only the contracts live here; the
//! tree is converted to and from [`TemplateFolder`] at this boundary.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::runtime::BoxFuture;
use crate::models::TemplateFolder;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub template: TemplateFolder,
}

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("project {0} already exists")]
    AlreadyExists(String),
    #[error("project {0} not found")]
    NotFound(String),
    #[error("invalid project id: {0:?}")]
    InvalidId(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

pub trait ProjectRepository: Send + Sync {
    fn create(&self, record: ProjectRecord) -> BoxFuture<'_, RepositoryResult<ProjectRecord>>;

    fn read<'a>(&'a self, id: &'a str) -> BoxFuture<'a, RepositoryResult<Option<ProjectRecord>>>;

    fn update<'a>(
        &'a self,
        id: &'a str,
        template: TemplateFolder,
    ) -> BoxFuture<'a, RepositoryResult<ProjectRecord>>;

    /// Returns whether a record was removed.
    fn delete<'a>(&'a self, id: &'a str) -> BoxFuture<'a, RepositoryResult<bool>>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

pub trait SessionProvider: Send + Sync {
    fn current_user(&self) -> BoxFuture<'_, Option<User>>;
}
