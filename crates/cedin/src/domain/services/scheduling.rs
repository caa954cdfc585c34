//! Scheduling rules
//!
//! Double-booking detection and status transition checks. Adapters call
//! these inside their write path so the check and the write share one
//! critical section.

use uuid::Uuid;

use crate::domain::{errors::DomainError, Appointment, AppointmentStatus, Professional};

/// First appointment in `existing` that would clash with `candidate`.
///
/// Only appointments of the same professional that still block their slot
/// are considered; the candidate's own record is skipped so rescheduling
/// does not clash with itself.
pub fn find_conflict<'a, I>(candidate: &Appointment, existing: I) -> Option<&'a Appointment>
where
    I: IntoIterator<Item = &'a Appointment>,
{
    if !candidate.blocks_slot() {
        return None;
    }

    existing.into_iter().find(|other| {
        other.id != candidate.id
            && other.professional_id == candidate.professional_id
            && other.blocks_slot()
            && candidate.overlaps(other)
    })
}

pub fn ensure_no_conflict<'a, I>(candidate: &Appointment, existing: I) -> Result<(), DomainError>
where
    I: IntoIterator<Item = &'a Appointment>,
{
    match find_conflict(candidate, existing) {
        Some(other) => Err(DomainError::conflict(format!(
            "Professional {} already has appointment {} from {} to {}",
            other.professional_id,
            other.id,
            other.date_time.to_rfc3339(),
            other.ends_at().to_rfc3339()
        ))),
        None => Ok(()),
    }
}

pub fn ensure_transition(
    from: AppointmentStatus,
    to: AppointmentStatus,
) -> Result<(), DomainError> {
    if from.can_transition_to(to) {
        Ok(())
    } else {
        Err(DomainError::InvalidTransition { from, to })
    }
}

/// A change prepared from an earlier read only applies while the stored
/// status is still the one that was read
pub fn ensure_status_unchanged(
    id: Uuid,
    expected: AppointmentStatus,
    stored: AppointmentStatus,
) -> Result<(), DomainError> {
    if expected == stored {
        Ok(())
    } else {
        Err(DomainError::conflict(format!(
            "Appointment {} is now {}, not {}",
            id, stored, expected
        )))
    }
}

/// Inactive professionals take no new bookings
pub fn ensure_bookable(professional: &Professional) -> Result<(), DomainError> {
    if professional.is_active() {
        Ok(())
    } else {
        Err(DomainError::validation(format!(
            "Professional {} is inactive",
            professional.full_name()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ProfessionalStatus;
    use chrono::{TimeZone, Utc};

    fn booking(professional_id: Uuid, hour: u32, minute: u32) -> Appointment {
        Appointment::new(
            Uuid::new_v4(),
            professional_id,
            Utc.with_ymd_and_hms(2025, 6, 2, hour, minute, 0).unwrap(),
            Some(30),
            Some("consulta".to_string()),
            None,
        )
    }

    #[test]
    fn test_detects_overlap_for_same_professional() {
        let pro = Uuid::new_v4();
        let existing = vec![booking(pro, 9, 0), booking(pro, 10, 0)];
        let candidate = booking(pro, 10, 15);

        let clash = find_conflict(&candidate, &existing).unwrap();
        assert_eq!(clash.id, existing[1].id);
        assert!(matches!(
            ensure_no_conflict(&candidate, &existing),
            Err(DomainError::Conflict(_))
        ));
    }

    #[test]
    fn test_other_professional_does_not_conflict() {
        let existing = vec![booking(Uuid::new_v4(), 10, 0)];
        let candidate = booking(Uuid::new_v4(), 10, 0);
        assert!(ensure_no_conflict(&candidate, &existing).is_ok());
    }

    #[test]
    fn test_cancelled_frees_the_slot() {
        let pro = Uuid::new_v4();
        let mut cancelled = booking(pro, 10, 0);
        cancelled.status = AppointmentStatus::Cancelled;
        let candidate = booking(pro, 10, 0);
        assert!(find_conflict(&candidate, [&cancelled]).is_none());
    }

    #[test]
    fn test_no_show_still_blocks() {
        let pro = Uuid::new_v4();
        let mut missed = booking(pro, 10, 0);
        missed.status = AppointmentStatus::NoShow;
        assert!(find_conflict(&booking(pro, 10, 10), [&missed]).is_some());
    }

    #[test]
    fn test_rescheduling_ignores_itself() {
        let pro = Uuid::new_v4();
        let original = booking(pro, 10, 0);
        let mut moved = original.clone();
        moved.date_time += chrono::Duration::minutes(10);
        assert!(find_conflict(&moved, [&original]).is_none());
    }

    #[test]
    fn test_ensure_transition() {
        assert!(
            ensure_transition(AppointmentStatus::Scheduled, AppointmentStatus::Confirmed).is_ok()
        );
        assert!(matches!(
            ensure_transition(AppointmentStatus::Completed, AppointmentStatus::Cancelled),
            Err(DomainError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_status_must_be_unchanged() {
        let id = Uuid::new_v4();
        assert!(
            ensure_status_unchanged(id, AppointmentStatus::Confirmed, AppointmentStatus::Confirmed)
                .is_ok()
        );
        assert!(matches!(
            ensure_status_unchanged(id, AppointmentStatus::Confirmed, AppointmentStatus::Cancelled),
            Err(DomainError::Conflict(_))
        ));
    }

    #[test]
    fn test_inactive_professional_not_bookable() {
        let mut p = Professional::new("Laura".to_string(), "Gómez".to_string());
        assert!(ensure_bookable(&p).is_ok());
        p.status = ProfessionalStatus::Inactive;
        assert!(ensure_bookable(&p).is_err());
    }
}
