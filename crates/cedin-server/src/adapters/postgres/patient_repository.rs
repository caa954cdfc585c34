//! PostgreSQL implementation of PatientRepository

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use cedin::{DomainError, Patient, PatientRepository};

use super::{db_error, delete_error};

/// PostgreSQL implementation of PatientRepository
pub struct PgPatientRepository {
    pool: PgPool,
}

impl PgPatientRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Internal row type for sqlx mapping
#[derive(sqlx::FromRow)]
struct PatientRow {
    id: Uuid,
    first_name: String,
    last_name: String,
    dni: String,
    email: Option<String>,
    phone: Option<String>,
    birth_date: Option<chrono::NaiveDate>,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<PatientRow> for Patient {
    fn from(row: PatientRow) -> Self {
        Self {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            dni: row.dni,
            email: row.email,
            phone: row.phone,
            birth_date: row.birth_date,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl PatientRepository for PgPatientRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Patient>, DomainError> {
        let row = sqlx::query_as::<_, PatientRow>("SELECT * FROM patients WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(row.map(Into::into))
    }

    async fn find_all(&self) -> Result<Vec<Patient>, DomainError> {
        let rows = sqlx::query_as::<_, PatientRow>(
            "SELECT * FROM patients ORDER BY last_name, first_name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_by_dni(&self, dni: &str) -> Result<Option<Patient>, DomainError> {
        let row = sqlx::query_as::<_, PatientRow>("SELECT * FROM patients WHERE dni = $1")
            .bind(dni)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(row.map(Into::into))
    }

    async fn save(&self, patient: &Patient) -> Result<Patient, DomainError> {
        let row = sqlx::query_as::<_, PatientRow>(
            r#"
            INSERT INTO patients (id, first_name, last_name, dni, email, phone, birth_date,
                                  created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (id) DO UPDATE
            SET first_name = EXCLUDED.first_name, last_name = EXCLUDED.last_name,
                dni = EXCLUDED.dni, email = EXCLUDED.email, phone = EXCLUDED.phone,
                birth_date = EXCLUDED.birth_date
            RETURNING *
            "#,
        )
        .bind(patient.id)
        .bind(&patient.first_name)
        .bind(&patient.last_name)
        .bind(&patient.dni)
        .bind(&patient.email)
        .bind(&patient.phone)
        .bind(patient.birth_date)
        .bind(patient.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(row.into())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM patients WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| delete_error("Patient", e))?;

        Ok(result.rows_affected() > 0)
    }
}
