//! PostgreSQL implementation of AppointmentRepository
//!
//! Booking serializes per professional by locking the professional row
//! for the duration of the check-then-write transaction. The
//! `appointments_no_overlap` exclusion constraint backs this up.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder, Transaction};
use uuid::Uuid;

use cedin::domain::services::scheduling;
use cedin::{
    Appointment, AppointmentFilter, AppointmentRepository, AppointmentStatus, DomainError,
};

use super::{corrupt, db_error};

/// PostgreSQL implementation of AppointmentRepository
pub struct PgAppointmentRepository {
    pool: PgPool,
}

impl PgAppointmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Internal row type for sqlx mapping
#[derive(sqlx::FromRow)]
struct AppointmentRow {
    id: Uuid,
    patient_id: Uuid,
    professional_id: Uuid,
    date_time: chrono::DateTime<chrono::Utc>,
    duration_minutes: i32,
    status: String,
    #[sqlx(rename = "type")]
    appointment_type: Option<String>,
    notes: Option<String>,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl TryFrom<AppointmentRow> for Appointment {
    type Error = DomainError;

    fn try_from(row: AppointmentRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            patient_id: row.patient_id,
            professional_id: row.professional_id,
            date_time: row.date_time,
            duration_minutes: row.duration_minutes,
            status: row.status.parse().map_err(|e| corrupt("status", e))?,
            appointment_type: row.appointment_type,
            notes: row.notes,
            created_at: row.created_at,
        })
    }
}

/// Lock the professional row so concurrent bookings for the same
/// professional run one after another
async fn lock_professional(
    tx: &mut Transaction<'_, Postgres>,
    professional_id: Uuid,
) -> Result<(), DomainError> {
    sqlx::query_scalar::<_, Uuid>("SELECT id FROM professionals WHERE id = $1 FOR UPDATE")
        .bind(professional_id)
        .fetch_optional(&mut **tx)
        .await
        .map_err(db_error)?
        .ok_or_else(|| DomainError::not_found("Professional", professional_id))?;

    Ok(())
}

/// Current status of an appointment, locking its row until commit
async fn lock_status(
    tx: &mut Transaction<'_, Postgres>,
    id: Uuid,
) -> Result<AppointmentStatus, DomainError> {
    let status =
        sqlx::query_scalar::<_, String>("SELECT status FROM appointments WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut **tx)
            .await
            .map_err(db_error)?
            .ok_or_else(|| DomainError::not_found("Appointment", id))?;

    status.parse().map_err(|e| corrupt("status", e))
}

async fn ensure_slot_free(
    tx: &mut Transaction<'_, Postgres>,
    appointment: &Appointment,
) -> Result<(), DomainError> {
    let rows = sqlx::query_as::<_, AppointmentRow>(
        r#"
        SELECT * FROM appointments
        WHERE professional_id = $1
          AND id <> $2
          AND status <> 'cancelled'
          AND date_time < $4
          AND ends_at > $3
        "#,
    )
    .bind(appointment.professional_id)
    .bind(appointment.id)
    .bind(appointment.date_time)
    .bind(appointment.ends_at())
    .fetch_all(&mut **tx)
    .await
    .map_err(db_error)?;

    let existing = rows
        .into_iter()
        .map(Appointment::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    scheduling::ensure_no_conflict(appointment, &existing)
}

#[async_trait]
impl AppointmentRepository for PgAppointmentRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Appointment>, DomainError> {
        let row =
            sqlx::query_as::<_, AppointmentRow>("SELECT * FROM appointments WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(db_error)?;

        row.map(Appointment::try_from).transpose()
    }

    async fn find_all(&self, filter: AppointmentFilter) -> Result<Vec<Appointment>, DomainError> {
        let mut query: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT * FROM appointments WHERE TRUE");

        if let Some(professional_id) = filter.professional_id {
            query.push(" AND professional_id = ").push_bind(professional_id);
        }
        if let Some(patient_id) = filter.patient_id {
            query.push(" AND patient_id = ").push_bind(patient_id);
        }
        if let Some(status) = filter.status {
            query.push(" AND status = ").push_bind(status.to_string());
        }
        if let Some(from) = filter.from {
            query.push(" AND date_time >= ").push_bind(from);
        }
        if let Some(to) = filter.to {
            query.push(" AND date_time < ").push_bind(to);
        }
        query.push(" ORDER BY date_time, created_at");

        let rows = query
            .build_query_as::<AppointmentRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)?;

        rows.into_iter().map(Appointment::try_from).collect()
    }

    async fn book(&self, appointment: &Appointment) -> Result<Appointment, DomainError> {
        let mut tx = self.pool.begin().await.map_err(db_error)?;

        lock_professional(&mut tx, appointment.professional_id).await?;

        let patient_exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM patients WHERE id = $1)")
                .bind(appointment.patient_id)
                .fetch_one(&mut *tx)
                .await
                .map_err(db_error)?;
        if !patient_exists {
            return Err(DomainError::not_found("Patient", appointment.patient_id));
        }

        ensure_slot_free(&mut tx, appointment).await?;

        let row = sqlx::query_as::<_, AppointmentRow>(
            r#"
            INSERT INTO appointments (id, patient_id, professional_id, date_time, duration_minutes,
                                      ends_at, status, type, notes, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(appointment.id)
        .bind(appointment.patient_id)
        .bind(appointment.professional_id)
        .bind(appointment.date_time)
        .bind(appointment.duration_minutes)
        .bind(appointment.ends_at())
        .bind(appointment.status.to_string())
        .bind(&appointment.appointment_type)
        .bind(&appointment.notes)
        .bind(appointment.created_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(db_error)?;

        tx.commit().await.map_err(db_error)?;

        row.try_into()
    }

    async fn update(&self, appointment: &Appointment) -> Result<Appointment, DomainError> {
        let mut tx = self.pool.begin().await.map_err(db_error)?;

        lock_professional(&mut tx, appointment.professional_id).await?;
        let stored = lock_status(&mut tx, appointment.id).await?;
        scheduling::ensure_status_unchanged(appointment.id, appointment.status, stored)?;
        ensure_slot_free(&mut tx, appointment).await?;

        let row = sqlx::query_as::<_, AppointmentRow>(
            r#"
            UPDATE appointments
            SET date_time = $2, duration_minutes = $3, ends_at = $4, type = $5, notes = $6
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(appointment.id)
        .bind(appointment.date_time)
        .bind(appointment.duration_minutes)
        .bind(appointment.ends_at())
        .bind(&appointment.appointment_type)
        .bind(&appointment.notes)
        .fetch_one(&mut *tx)
        .await
        .map_err(db_error)?;

        tx.commit().await.map_err(db_error)?;

        row.try_into()
    }

    async fn update_status(
        &self,
        id: Uuid,
        from: AppointmentStatus,
        to: AppointmentStatus,
    ) -> Result<Appointment, DomainError> {
        scheduling::ensure_transition(from, to)?;

        let mut tx = self.pool.begin().await.map_err(db_error)?;

        let stored = lock_status(&mut tx, id).await?;
        scheduling::ensure_status_unchanged(id, from, stored)?;

        let row = sqlx::query_as::<_, AppointmentRow>(
            "UPDATE appointments SET status = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(to.to_string())
        .fetch_one(&mut *tx)
        .await
        .map_err(db_error)?;

        tx.commit().await.map_err(db_error)?;

        row.try_into()
    }
}
