//! Employee Repository
//!
//! Pass-through CRUD against the document store. No retries, no optimistic
//! locking: concurrent updates to the same record are last-write-wins on the
//! store's single-document write.

use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Employee, EmployeeCreate, EmployeeUpdate};

const TABLE: &str = "employee";

#[derive(Clone)]
pub struct EmployeeRepository {
    base: BaseRepository,
}

impl EmployeeRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all employees. The full result is materialized before returning.
    pub async fn find_all(&self) -> RepoResult<Vec<Employee>> {
        let employees: Vec<Employee> = self
            .base
            .db()
            .query("SELECT * FROM employee ORDER BY name")
            .await?
            .take(0)?;
        Ok(employees)
    }

    /// Point lookup by id. A missing record is a recoverable `None`, not a
    /// store fault.
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Employee>> {
        let rid = parse_id(id)?;
        let employee: Option<Employee> = self.base.db().select(rid).await?;
        Ok(employee)
    }

    /// Persist a new record; the store assigns the id. Partial records are
    /// accepted — unspecified attributes are simply absent.
    pub async fn create(&self, data: EmployeeCreate) -> RepoResult<Employee> {
        let created: Option<Employee> = self.base.db().create(TABLE).content(data).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create employee".to_string()))
    }

    /// Overwrite only the supplied attributes on an existing record.
    pub async fn update(&self, id: &str, data: EmployeeUpdate) -> RepoResult<Employee> {
        let rid = parse_id(id)?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Employee {} not found", id)))?;

        let updated: Option<Employee> = self.base.db().update(rid).merge(data).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Employee {} not found", id)))
    }

    /// Delete by id. Returns whether a record was actually removed.
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let rid = parse_id(id)?;
        let deleted: Option<Employee> = self.base.db().delete(rid).await?;
        Ok(deleted.is_some())
    }
}

/// Accept both `"employee:key"` and bare `"key"` id forms.
fn parse_id(id: &str) -> RepoResult<RecordId> {
    if id.contains(':') {
        id.parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))
    } else {
        Ok(RecordId::from_table_key(TABLE, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    async fn repo() -> EmployeeRepository {
        let service = DbService::memory().await.unwrap();
        EmployeeRepository::new(service.db)
    }

    fn sample_create() -> EmployeeCreate {
        EmployeeCreate {
            name: Some("Ann".into()),
            email: Some("a@x.com".into()),
            position: Some("Eng".into()),
            salary: Some(4200.0),
            job_location: Some("Berlin".into()),
            phone_number: Some("555-0100".into()),
            joining_date: Some("2024-01-15".into()),
            profile_picture: Some("default.png".into()),
        }
    }

    #[tokio::test]
    async fn test_create_then_find_round_trip() {
        let repo = repo().await;
        let created = repo.create(sample_create()).await.unwrap();
        let id = created.id_str();
        assert!(!id.is_empty());

        let found = repo.find_by_id(&id).await.unwrap().unwrap();
        assert_eq!(found.name.as_deref(), Some("Ann"));
        assert_eq!(found.email.as_deref(), Some("a@x.com"));
        assert_eq!(found.position.as_deref(), Some("Eng"));
        assert_eq!(found.salary, Some(4200.0));
        assert_eq!(found.job_location.as_deref(), Some("Berlin"));
        assert_eq!(found.phone_number.as_deref(), Some("555-0100"));
        assert_eq!(found.joining_date.as_deref(), Some("2024-01-15"));
        assert_eq!(found.profile_picture.as_deref(), Some("default.png"));
    }

    #[tokio::test]
    async fn test_create_accepts_partial_record() {
        let repo = repo().await;
        let created = repo
            .create(EmployeeCreate {
                name: Some("Bo".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        let found = repo.find_by_id(&created.id_str()).await.unwrap().unwrap();
        assert_eq!(found.name.as_deref(), Some("Bo"));
        assert_eq!(found.email, None);
        assert_eq!(found.salary, None);
    }

    #[tokio::test]
    async fn test_empty_update_changes_nothing() {
        let repo = repo().await;
        let created = repo.create(sample_create()).await.unwrap();
        let id = created.id_str();

        let updated = repo.update(&id, EmployeeUpdate::default()).await.unwrap();
        assert_eq!(updated.name.as_deref(), Some("Ann"));
        assert_eq!(updated.profile_picture.as_deref(), Some("default.png"));
        assert_eq!(updated.salary, Some(4200.0));
    }

    #[tokio::test]
    async fn test_update_touches_only_supplied_fields() {
        let repo = repo().await;
        let created = repo.create(sample_create()).await.unwrap();
        let id = created.id_str();

        let updated = repo
            .update(
                &id,
                EmployeeUpdate {
                    position: Some("Staff Eng".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.position.as_deref(), Some("Staff Eng"));
        // everything else untouched, including the picture
        assert_eq!(updated.name.as_deref(), Some("Ann"));
        assert_eq!(updated.profile_picture.as_deref(), Some("default.png"));
    }

    #[tokio::test]
    async fn test_update_missing_record_is_not_found() {
        let repo = repo().await;
        let err = repo
            .update("employee:nope", EmployeeUpdate::default())
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_then_find_yields_none() {
        let repo = repo().await;
        let created = repo.create(sample_create()).await.unwrap();
        let id = created.id_str();

        assert!(repo.delete(&id).await.unwrap());
        assert!(repo.find_by_id(&id).await.unwrap().is_none());
        // deleting again reports nothing removed
        assert!(!repo.delete(&id).await.unwrap());
    }

    #[tokio::test]
    async fn test_find_unknown_id_is_recoverable_none() {
        let repo = repo().await;
        let found = repo.find_by_id("employee:doesnotexist").await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_find_all_materializes_every_record() {
        let repo = repo().await;
        for name in ["Ann", "Bo", "Cyn"] {
            repo.create(EmployeeCreate {
                name: Some(name.into()),
                ..Default::default()
            })
            .await
            .unwrap();
        }
        let all = repo.find_all().await.unwrap();
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn test_parse_id_accepts_both_forms() {
        assert!(parse_id("employee:abc").is_ok());
        assert!(parse_id("abc").is_ok());
        assert_eq!(
            parse_id("abc").unwrap(),
            RecordId::from_table_key("employee", "abc")
        );
    }
}
