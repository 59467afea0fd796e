//! JSON-file project repository: one `<id>.json` record per project.

use std::path::{Path, PathBuf};

use crate::kernel::services::ports::{
    BoxFuture, ProjectRecord, ProjectRepository, RepositoryError, RepositoryResult,
};
use crate::models::TemplateFolder;

pub struct JsonProjectRepository {
    dir: PathBuf,
}

impl JsonProjectRepository {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn record_path(&self, id: &str) -> RepositoryResult<PathBuf> {
        let valid = !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(RepositoryError::InvalidId(id.to_string()));
        }
        Ok(self.dir.join(format!("{id}.json")))
    }

    async fn load(&self, path: &Path) -> RepositoryResult<Option<ProjectRecord>> {
        match tokio::fs::read_to_string(path).await {
            Ok(data) => Ok(Some(serde_json::from_str(&data)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn store(&self, path: &Path, record: &ProjectRecord) -> RepositoryResult<()> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let data = serde_json::to_string_pretty(record)?;
        tokio::fs::write(path, data).await?;
        Ok(())
    }
}

impl ProjectRepository for JsonProjectRepository {
    fn create(&self, record: ProjectRecord) -> BoxFuture<'_, RepositoryResult<ProjectRecord>> {
        Box::pin(async move {
            let path = self.record_path(&record.id)?;
            if tokio::fs::try_exists(&path).await? {
                return Err(RepositoryError::AlreadyExists(record.id));
            }
            self.store(&path, &record).await?;
            Ok(record)
        })
    }

    fn read<'a>(&'a self, id: &'a str) -> BoxFuture<'a, RepositoryResult<Option<ProjectRecord>>> {
        Box::pin(async move {
            let path = self.record_path(id)?;
            self.load(&path).await
        })
    }

    fn update<'a>(
        &'a self,
        id: &'a str,
        template: TemplateFolder,
    ) -> BoxFuture<'a, RepositoryResult<ProjectRecord>> {
        Box::pin(async move {
            let path = self.record_path(id)?;
            let Some(mut record) = self.load(&path).await? else {
                return Err(RepositoryError::NotFound(id.to_string()));
            };
            record.template = template;
            self.store(&path, &record).await?;
            Ok(record)
        })
    }

    fn delete<'a>(&'a self, id: &'a str) -> BoxFuture<'a, RepositoryResult<bool>> {
        Box::pin(async move {
            let path = self.record_path(id)?;
            match tokio::fs::remove_file(&path).await {
                Ok(()) => Ok(true),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
                Err(e) => Err(e.into()),
            }
        })
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/repository.rs"]
mod tests;
