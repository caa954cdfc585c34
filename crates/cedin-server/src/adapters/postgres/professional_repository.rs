//! PostgreSQL implementation of ProfessionalRepository

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use cedin::{DomainError, Professional, ProfessionalRepository};

use super::{corrupt, db_error, delete_error};

/// PostgreSQL implementation of ProfessionalRepository
pub struct PgProfessionalRepository {
    pool: PgPool,
}

impl PgProfessionalRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Internal row type for sqlx mapping
#[derive(sqlx::FromRow)]
struct ProfessionalRow {
    id: Uuid,
    first_name: String,
    last_name: String,
    specialty: Option<String>,
    registration_number: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    color: Option<String>,
    status: String,
    user_id: Option<Uuid>,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl TryFrom<ProfessionalRow> for Professional {
    type Error = DomainError;

    fn try_from(row: ProfessionalRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            specialty: row.specialty,
            registration_number: row.registration_number,
            email: row.email,
            phone: row.phone,
            color: row.color,
            status: row.status.parse().map_err(|e| corrupt("status", e))?,
            user_id: row.user_id,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl ProfessionalRepository for PgProfessionalRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Professional>, DomainError> {
        let row =
            sqlx::query_as::<_, ProfessionalRow>("SELECT * FROM professionals WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(db_error)?;

        row.map(Professional::try_from).transpose()
    }

    async fn find_all(&self) -> Result<Vec<Professional>, DomainError> {
        let rows = sqlx::query_as::<_, ProfessionalRow>(
            "SELECT * FROM professionals ORDER BY last_name, first_name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        rows.into_iter().map(Professional::try_from).collect()
    }

    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<Professional>, DomainError> {
        let row =
            sqlx::query_as::<_, ProfessionalRow>("SELECT * FROM professionals WHERE user_id = $1")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(db_error)?;

        row.map(Professional::try_from).transpose()
    }

    async fn save(&self, professional: &Professional) -> Result<Professional, DomainError> {
        let row = sqlx::query_as::<_, ProfessionalRow>(
            r#"
            INSERT INTO professionals (id, first_name, last_name, specialty, registration_number,
                                       email, phone, color, status, user_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ON CONFLICT (id) DO UPDATE
            SET first_name = EXCLUDED.first_name, last_name = EXCLUDED.last_name,
                specialty = EXCLUDED.specialty, registration_number = EXCLUDED.registration_number,
                email = EXCLUDED.email, phone = EXCLUDED.phone, color = EXCLUDED.color,
                status = EXCLUDED.status
            RETURNING *
            "#,
        )
        .bind(professional.id)
        .bind(&professional.first_name)
        .bind(&professional.last_name)
        .bind(&professional.specialty)
        .bind(&professional.registration_number)
        .bind(&professional.email)
        .bind(&professional.phone)
        .bind(&professional.color)
        .bind(professional.status.to_string())
        .bind(professional.user_id)
        .bind(professional.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error)?;

        row.try_into()
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM professionals WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| delete_error("Professional", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn link_user(
        &self,
        professional_id: Uuid,
        user_id: Option<Uuid>,
    ) -> Result<Professional, DomainError> {
        // UNIQUE(user_id) keeps the link one-to-one
        let row = sqlx::query_as::<_, ProfessionalRow>(
            "UPDATE professionals SET user_id = $2 WHERE id = $1 RETURNING *",
        )
        .bind(professional_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?
        .ok_or_else(|| DomainError::not_found("Professional", professional_id))?;

        row.try_into()
    }
}
