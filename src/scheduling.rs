//! Test-drive slot conflict detection.
//!
//! A slot is an exact (date, time) pair. Only bookings in an active status
//! (Scheduled or Confirmed) hold a slot. Two rules apply to a candidate
//! booking:
//!
//! 1. another customer must not hold the same variant in the slot;
//! 2. the same customer must not hold a different variant in the slot.
//!
//! A booking identical to an active one of the same customer is reported as
//! [`SlotCheck::AlreadyBooked`] so callers can treat resubmission as a no-op.

use chrono::{NaiveDate, NaiveTime};
use uuid::Uuid;

use crate::entity::test_drives::Model as TestDriveModel;

#[derive(Debug, Clone, Copy)]
pub struct SlotRequest {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub variant_id: Uuid,
    /// `None` when an anonymous visitor checks availability.
    pub customer_id: Option<Uuid>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SlotCheck<'a> {
    Free,
    AlreadyBooked(&'a TestDriveModel),
    VariantTaken(&'a TestDriveModel),
    CustomerBusy(&'a TestDriveModel),
}

impl SlotCheck<'_> {
    pub fn is_free(&self) -> bool {
        matches!(self, SlotCheck::Free | SlotCheck::AlreadyBooked(_))
    }

    pub fn message(&self) -> Option<String> {
        match self {
            SlotCheck::Free => None,
            SlotCheck::AlreadyBooked(existing) => Some(format!(
                "Test drive {} already holds this slot for the customer",
                existing.id
            )),
            SlotCheck::VariantTaken(existing) => Some(format!(
                "This vehicle is already booked by another customer at {}",
                existing.scheduled_time.format("%H:%M")
            )),
            SlotCheck::CustomerBusy(existing) => Some(format!(
                "Customer already has a test drive for another vehicle at {}",
                existing.scheduled_time.format("%H:%M")
            )),
        }
    }
}

/// Scan `bookings` (typically every booking on `request.date`) for conflicts.
pub fn check_slot<'a>(bookings: &'a [TestDriveModel], request: &SlotRequest) -> SlotCheck<'a> {
    let mut in_slot = bookings.iter().filter(|td| {
        td.status.is_active()
            && td.scheduled_date == request.date
            && td.scheduled_time == request.time
    });

    let mut duplicate = None;
    let mut customer_busy = None;
    for td in in_slot.by_ref() {
        let same_customer = Some(td.customer_id) == request.customer_id;
        let same_variant = td.variant_id == request.variant_id;
        match (same_customer, same_variant) {
            (false, true) => return SlotCheck::VariantTaken(td),
            (true, false) => {
                customer_busy.get_or_insert(td);
            }
            (true, true) => {
                duplicate.get_or_insert(td);
            }
            (false, false) => {}
        }
    }

    if let Some(td) = customer_busy {
        return SlotCheck::CustomerBusy(td);
    }
    match duplicate {
        Some(td) => SlotCheck::AlreadyBooked(td),
        None => SlotCheck::Free,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::test_drives::TestDriveStatus;
    use chrono::Utc;

    fn booking(customer: Uuid, variant: Uuid, time: &str, status: TestDriveStatus) -> TestDriveModel {
        let now = Utc::now().fixed_offset();
        TestDriveModel {
            id: Uuid::new_v4(),
            customer_id: customer,
            variant_id: variant,
            scheduled_date: date(),
            scheduled_time: NaiveTime::parse_from_str(time, "%H:%M").unwrap(),
            status,
            created_at: now,
            updated_at: now,
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2030, 5, 17).unwrap()
    }

    fn request(customer: Option<Uuid>, variant: Uuid, time: &str) -> SlotRequest {
        SlotRequest {
            date: date(),
            time: NaiveTime::parse_from_str(time, "%H:%M").unwrap(),
            variant_id: variant,
            customer_id: customer,
        }
    }

    #[test]
    fn empty_day_is_free() {
        let check = check_slot(&[], &request(Some(Uuid::new_v4()), Uuid::new_v4(), "09:00"));
        assert_eq!(check, SlotCheck::Free);
        assert!(check.message().is_none());
    }

    #[test]
    fn variant_held_by_other_customer_conflicts() {
        let (c1, c2, v) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let bookings = vec![booking(c1, v, "09:00", TestDriveStatus::Scheduled)];
        let check = check_slot(&bookings, &request(Some(c2), v, "09:00"));
        assert!(matches!(check, SlotCheck::VariantTaken(_)));
        assert!(!check.is_free());
    }

    #[test]
    fn anonymous_check_sees_any_active_booking_of_variant() {
        let (c1, v) = (Uuid::new_v4(), Uuid::new_v4());
        let bookings = vec![booking(c1, v, "09:00", TestDriveStatus::Confirmed)];
        let check = check_slot(&bookings, &request(None, v, "09:00"));
        assert!(matches!(check, SlotCheck::VariantTaken(_)));
    }

    #[test]
    fn customer_cannot_hold_two_variants_in_one_slot() {
        let (c1, v1, v2) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let bookings = vec![booking(c1, v1, "10:30", TestDriveStatus::Confirmed)];
        let check = check_slot(&bookings, &request(Some(c1), v2, "10:30"));
        assert!(matches!(check, SlotCheck::CustomerBusy(_)));
    }

    #[test]
    fn identical_resubmission_is_reported_not_rejected() {
        let (c1, v) = (Uuid::new_v4(), Uuid::new_v4());
        let bookings = vec![booking(c1, v, "09:00", TestDriveStatus::Scheduled)];
        let check = check_slot(&bookings, &request(Some(c1), v, "09:00"));
        match check {
            SlotCheck::AlreadyBooked(existing) => assert_eq!(existing.id, bookings[0].id),
            other => panic!("unexpected {other:?}"),
        }
        assert!(check.is_free());
    }

    #[test]
    fn cancelled_and_completed_bookings_release_the_slot() {
        let (c1, c2, v) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let bookings = vec![
            booking(c1, v, "09:00", TestDriveStatus::Cancelled),
            booking(c1, v, "09:00", TestDriveStatus::Completed),
        ];
        assert_eq!(check_slot(&bookings, &request(Some(c2), v, "09:00")), SlotCheck::Free);
    }

    #[test]
    fn different_time_does_not_conflict() {
        let (c1, c2, v) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let bookings = vec![booking(c1, v, "09:00", TestDriveStatus::Scheduled)];
        assert_eq!(check_slot(&bookings, &request(Some(c2), v, "09:30")), SlotCheck::Free);
    }
}
