//! Booking state machine tests: transitions, admission gates, cancellation.

mod common;

use common::{confirmed, request, request_for_user, service, slot};
use scheduling_core::{BookingStatus, BookingStore, SchedulingError};
use uuid::Uuid;

#[tokio::test]
async fn confirm_moves_a_requested_booking_to_confirmed() {
    let service = service();
    let resource = Uuid::new_v4();
    let booking = request(&service, resource, slot(10, 0, 60)).await;

    let confirmed = service.confirm(booking.booking_id).await.unwrap();

    assert_eq!(confirmed.status, BookingStatus::Confirmed);
    let stored = service.store().get(booking.booking_id).await.unwrap().unwrap();
    assert_eq!(stored.status, BookingStatus::Confirmed);
}

#[tokio::test]
async fn confirm_rejects_an_overlapping_slot_with_the_conflict_set() {
    let service = service();
    let resource = Uuid::new_v4();
    confirmed(&service, resource, slot(10, 0, 60)).await;
    let booking = request(&service, resource, slot(10, 30, 60)).await;

    let err = service.confirm(booking.booking_id).await.unwrap_err();

    match err {
        SchedulingError::SlotConflict { conflicts } => {
            assert_eq!(conflicts, vec![slot(10, 0, 60)]);
        }
        other => panic!("Expected SlotConflict, got {other:?}"),
    }
    let stored = service.store().get(booking.booking_id).await.unwrap().unwrap();
    assert_eq!(stored.status, BookingStatus::Requested);
}

#[tokio::test]
async fn back_to_back_bookings_both_confirm() {
    let service = service();
    let resource = Uuid::new_v4();

    confirmed(&service, resource, slot(10, 0, 60)).await;
    confirmed(&service, resource, slot(11, 0, 60)).await;
}

#[tokio::test]
async fn overlapping_bookings_on_different_resources_both_confirm() {
    let service = service();

    confirmed(&service, Uuid::new_v4(), slot(10, 0, 60)).await;
    confirmed(&service, Uuid::new_v4(), slot(10, 0, 60)).await;
}

#[tokio::test]
async fn user_cannot_overlap_their_own_booking_on_another_resource() {
    let service = service();
    let user = Uuid::new_v4();

    let first = request_for_user(&service, user, Uuid::new_v4(), slot(10, 0, 60)).await;
    service.confirm(first.booking_id).await.unwrap();

    let second = request_for_user(&service, user, Uuid::new_v4(), slot(10, 30, 60)).await;
    let err = service.confirm(second.booking_id).await.unwrap_err();

    match err {
        SchedulingError::UserDoubleBooked { conflicts } => {
            assert_eq!(conflicts, vec![slot(10, 0, 60)]);
        }
        other => panic!("Expected UserDoubleBooked, got {other:?}"),
    }
}

#[tokio::test]
async fn too_short_and_too_long_lessons_are_rejected() {
    let service = service();
    let resource = Uuid::new_v4();

    let short = request(&service, resource, slot(10, 0, 20)).await;
    assert!(matches!(
        service.confirm(short.booking_id).await.unwrap_err(),
        SchedulingError::DurationOutOfRange {
            duration_minutes: 20,
            min_minutes: 30,
            max_minutes: 240,
        }
    ));

    let long = request(&service, resource, slot(10, 0, 300)).await;
    assert!(matches!(
        service.confirm(long.booking_id).await.unwrap_err(),
        SchedulingError::DurationOutOfRange {
            duration_minutes: 300,
            ..
        }
    ));
}

#[tokio::test]
async fn slots_outside_business_hours_are_rejected() {
    let service = service();
    let resource = Uuid::new_v4();

    let before_open = request(&service, resource, slot(7, 0, 60)).await;
    assert!(matches!(
        service.confirm(before_open.booking_id).await.unwrap_err(),
        SchedulingError::OutsideBusinessHours { .. }
    ));

    // Starts inside hours but runs past closing.
    let past_close = request(&service, resource, slot(17, 30, 60)).await;
    assert!(matches!(
        service.confirm(past_close.booking_id).await.unwrap_err(),
        SchedulingError::OutsideBusinessHours { .. }
    ));
}

#[tokio::test]
async fn confirming_twice_is_an_illegal_transition() {
    let service = service();
    let booking = confirmed(&service, Uuid::new_v4(), slot(10, 0, 60)).await;

    let err = service.confirm(booking.booking_id).await.unwrap_err();

    assert!(matches!(
        err,
        SchedulingError::IllegalTransition {
            from: BookingStatus::Confirmed,
            to: BookingStatus::Confirmed,
        }
    ));
}

#[tokio::test]
async fn reschedule_replaces_the_slot_and_can_repeat() {
    let service = service();
    let resource = Uuid::new_v4();
    let booking = confirmed(&service, resource, slot(10, 0, 60)).await;

    let moved = service
        .reschedule(booking.booking_id, slot(13, 0, 60))
        .await
        .unwrap();
    assert_eq!(moved.status, BookingStatus::Rescheduled);
    assert_eq!(moved.slot, slot(13, 0, 60));

    // Rescheduled -> Rescheduled is legal.
    let moved_again = service
        .reschedule(booking.booking_id, slot(15, 0, 60))
        .await
        .unwrap();
    assert_eq!(moved_again.status, BookingStatus::Rescheduled);
    assert_eq!(moved_again.slot, slot(15, 0, 60));
}

#[tokio::test]
async fn reschedule_into_an_occupied_slot_leaves_the_booking_untouched() {
    let service = service();
    let resource = Uuid::new_v4();
    confirmed(&service, resource, slot(14, 0, 60)).await;
    let booking = confirmed(&service, resource, slot(10, 0, 60)).await;

    let err = service
        .reschedule(booking.booking_id, slot(14, 30, 60))
        .await
        .unwrap_err();

    assert!(matches!(err, SchedulingError::SlotConflict { .. }));
    let stored = service.store().get(booking.booking_id).await.unwrap().unwrap();
    assert_eq!(stored.status, BookingStatus::Confirmed);
    assert_eq!(stored.slot, slot(10, 0, 60));
}

#[tokio::test]
async fn freeing_a_slot_by_reschedule_allows_a_new_booking() {
    let service = service();
    let resource = Uuid::new_v4();
    let booking = confirmed(&service, resource, slot(10, 0, 60)).await;

    service
        .reschedule(booking.booking_id, slot(13, 0, 60))
        .await
        .unwrap();

    // The 10:00 slot no longer counts against availability.
    confirmed(&service, resource, slot(10, 0, 60)).await;
}

#[tokio::test]
async fn rescheduling_a_requested_booking_is_illegal() {
    let service = service();
    let booking = request(&service, Uuid::new_v4(), slot(10, 0, 60)).await;

    let err = service
        .reschedule(booking.booking_id, slot(13, 0, 60))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        SchedulingError::IllegalTransition {
            from: BookingStatus::Requested,
            to: BookingStatus::Rescheduled,
        }
    ));
}

#[tokio::test]
async fn cancel_is_legal_from_every_non_terminal_state() {
    let service = service();
    let resource = Uuid::new_v4();

    let requested = request(&service, resource, slot(8, 0, 60)).await;
    assert_eq!(
        service.cancel(requested.booking_id).await.unwrap().status,
        BookingStatus::Cancelled
    );

    let confirmed_booking = confirmed(&service, resource, slot(10, 0, 60)).await;
    assert_eq!(
        service
            .cancel(confirmed_booking.booking_id)
            .await
            .unwrap()
            .status,
        BookingStatus::Cancelled
    );

    let rescheduled = confirmed(&service, resource, slot(12, 0, 60)).await;
    service
        .reschedule(rescheduled.booking_id, slot(14, 0, 60))
        .await
        .unwrap();
    assert_eq!(
        service.cancel(rescheduled.booking_id).await.unwrap().status,
        BookingStatus::Cancelled
    );
}

#[tokio::test]
async fn cancelling_twice_fails_with_already_cancelled() {
    let service = service();
    let booking = request(&service, Uuid::new_v4(), slot(10, 0, 60)).await;
    service.cancel(booking.booking_id).await.unwrap();

    let err = service.cancel(booking.booking_id).await.unwrap_err();

    assert!(matches!(
        err,
        SchedulingError::AlreadyCancelled { booking_id } if booking_id == booking.booking_id
    ));
}

#[tokio::test]
async fn a_cancelled_booking_cannot_be_confirmed_back_to_life() {
    let service = service();
    let booking = request(&service, Uuid::new_v4(), slot(10, 0, 60)).await;
    service.cancel(booking.booking_id).await.unwrap();

    let err = service.confirm(booking.booking_id).await.unwrap_err();

    assert!(matches!(
        err,
        SchedulingError::IllegalTransition {
            from: BookingStatus::Cancelled,
            to: BookingStatus::Confirmed,
        }
    ));
    let stored = service.store().get(booking.booking_id).await.unwrap().unwrap();
    assert_eq!(stored.status, BookingStatus::Cancelled);
}

#[tokio::test]
async fn cancelled_bookings_free_their_slot() {
    let service = service();
    let resource = Uuid::new_v4();
    let booking = confirmed(&service, resource, slot(10, 0, 60)).await;
    service.cancel(booking.booking_id).await.unwrap();

    confirmed(&service, resource, slot(10, 0, 60)).await;
}

#[tokio::test]
async fn available_slots_reflect_the_confirmed_calendar() {
    let service = service();
    let resource = Uuid::new_v4();
    confirmed(&service, resource, slot(10, 0, 60)).await;
    // A merely requested booking does not occupy its slot.
    request(&service, resource, slot(12, 0, 60)).await;

    let free = service
        .available_slots(resource, common::lesson_date(), 60)
        .await
        .unwrap();

    assert!(!free.contains(&slot(10, 0, 60)));
    assert!(!free.contains(&slot(9, 30, 60)));
    assert!(free.contains(&slot(12, 0, 60)));
    assert!(free.contains(&slot(11, 0, 60)));
}

#[tokio::test]
async fn unknown_booking_is_reported_as_not_found() {
    let service = service();
    let booking_id = Uuid::new_v4();

    assert!(matches!(
        service.confirm(booking_id).await.unwrap_err(),
        SchedulingError::BookingNotFound { .. }
    ));
}
