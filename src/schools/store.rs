use async_trait::async_trait;
use diesel::{ExpressionMethods, QueryDsl, SelectableHelper};
use diesel_async::RunQueryDsl;

use crate::{
    db::{self, DbPool, StorageError},
    schema::schools,
};

use super::models::{NewSchool, SchoolCard};

/// Persistence for school rows. Each call runs exactly one statement.
#[async_trait]
pub trait SchoolStore: Send + Sync {
    async fn insert(&self, school: NewSchool) -> Result<(), StorageError>;

    /// Every row, newest first.
    async fn list(&self) -> Result<Vec<SchoolCard>, StorageError>;
}

#[derive(Clone)]
pub struct MysqlSchoolStore {
    pool: DbPool,
}

impl MysqlSchoolStore {
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SchoolStore for MysqlSchoolStore {
    async fn insert(&self, school: NewSchool) -> Result<(), StorageError> {
        let mut db = db::connection(&self.pool).await?;

        diesel::insert_into(schools::table)
            .values(&school)
            .execute(&mut db)
            .await?;

        Ok(())
    }

    async fn list(&self) -> Result<Vec<SchoolCard>, StorageError> {
        let mut db = db::connection(&self.pool).await?;

        let rows = schools::table
            .select(SchoolCard::as_select())
            .order(schools::id.desc())
            .load::<SchoolCard>(&mut db)
            .await?;

        Ok(rows)
    }
}
