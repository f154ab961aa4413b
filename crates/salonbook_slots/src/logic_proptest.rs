#[cfg(test)]
mod tests {
    use crate::calendar::{overlaps, DayCalendar};
    use crate::logic::{generate_slots, SlotQuery};
    use crate::models::{Booking, SlotStatus, StaffChoice, StaffMember};
    use crate::schedule::{DaySchedule, DayWindow, SchedulingPolicy};
    use crate::time::TimeOfDay;
    use chrono::{NaiveDate, NaiveDateTime};
    use proptest::prelude::*;

    const SERVICES: [&str; 4] = ["cut", "color", "wash", "nails"];

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, 5).unwrap()
    }

    // Strategy for one staff member: a random capability subset.
    fn staff_strategy(index: usize) -> impl Strategy<Value = StaffMember> {
        proptest::collection::btree_set(0..SERVICES.len(), 0..=SERVICES.len()).prop_map(
            move |caps| StaffMember {
                id: format!("emp-{index}"),
                name: format!("Staff {index}"),
                role: "Stylist".to_string(),
                experience: None,
                capabilities: caps.into_iter().map(|i| SERVICES[i].to_string()).collect(),
            },
        )
    }

    fn roster_strategy() -> impl Strategy<Value = Vec<StaffMember>> {
        (1..=4usize).prop_flat_map(|n| (0..n).map(staff_strategy).collect::<Vec<_>>())
    }

    // Bookings on 5-minute boundaries between 08:00 and 20:00.
    fn bookings_strategy(staff_count: usize) -> impl Strategy<Value = Vec<Booking>> {
        proptest::collection::vec(
            (0..staff_count, 96u32..240, 3u32..=24),
            0..10,
        )
        .prop_map(|raw| {
            raw.into_iter()
                .map(|(staff, start5, dur5)| Booking {
                    staff_id: format!("emp-{staff}"),
                    start: TimeOfDay::saturating(start5 * 5),
                    duration_minutes: dur5 * 5,
                    appointment_id: None,
                })
                .collect()
        })
    }

    fn requested_strategy() -> impl Strategy<Value = Vec<String>> {
        proptest::collection::btree_set(0..SERVICES.len(), 1..=2)
            .prop_map(|set| set.into_iter().map(|i| SERVICES[i].to_string()).collect())
    }

    fn scenario() -> impl Strategy<
        Value = (
            Vec<StaffMember>,
            Vec<Booking>,
            Vec<String>,
            u32,
            (u32, u32),
        ),
    > {
        roster_strategy().prop_flat_map(|roster| {
            let n = roster.len();
            (
                Just(roster),
                bookings_strategy(n),
                requested_strategy(),
                1u32..=12,
                (16u32..=48, 4u32..=16),
            )
                .prop_map(|(roster, bookings, requested, dur15, (open30, len30))| {
                    let open = open30 * 30;
                    let close = (open + len30 * 30).min(24 * 60);
                    (roster, bookings, requested, dur15 * 15, (open, close))
                })
        })
    }

    fn previous_day_noon() -> NaiveDateTime {
        date().pred_opt().unwrap().and_hms_opt(12, 0, 0).unwrap()
    }

    proptest! {
        // Available slots are backed by at least one qualified, free staff member,
        // and every listed staff member really is free and qualified.
        #[test]
        fn test_available_slots_are_free_for_someone_eligible(
            (roster, bookings, requested, duration, (open, close)) in scenario(),
        ) {
            let calendar = DayCalendar::from_bookings(bookings.clone());
            let choice = StaffChoice::Any;
            let query = SlotQuery {
                date: date(),
                schedule: DaySchedule::Open(DayWindow {
                    open: TimeOfDay::saturating(open),
                    close: TimeOfDay::saturating(close),
                }),
                required_duration: duration,
                requested_services: &requested,
                staff_choice: &choice,
                roster: &roster,
                calendar: &calendar,
                now: previous_day_noon(),
            };
            let slots = generate_slots(&query, &SchedulingPolicy::default());

            for slot in slots.iter().filter(|s| s.status == SlotStatus::Available) {
                let start = slot.start.minutes();
                prop_assert!(!slot.staff_ids.is_empty());
                for staff_id in &slot.staff_ids {
                    let member = roster.iter().find(|m| &m.id == staff_id).unwrap();
                    prop_assert!(member.can_perform_all(&requested));
                    for b in bookings.iter().filter(|b| &b.staff_id == staff_id) {
                        prop_assert!(
                            !overlaps(start, start + duration, b.start_minutes(), b.end_minutes()),
                            "slot {} overlaps booking {:?}", slot.start, b
                        );
                    }
                }
            }
        }

        // Mismatch means nobody on the roster covers the whole request.
        #[test]
        fn test_mismatch_means_no_superset_capability(
            (roster, bookings, requested, duration, (open, close)) in scenario(),
        ) {
            let calendar = DayCalendar::from_bookings(bookings);
            let choice = StaffChoice::Any;
            let query = SlotQuery {
                date: date(),
                schedule: DaySchedule::Open(DayWindow {
                    open: TimeOfDay::saturating(open),
                    close: TimeOfDay::saturating(close),
                }),
                required_duration: duration,
                requested_services: &requested,
                staff_choice: &choice,
                roster: &roster,
                calendar: &calendar,
                now: previous_day_noon(),
            };
            let slots = generate_slots(&query, &SchedulingPolicy::default());
            let anyone_qualified = roster.iter().any(|m| m.can_perform_all(&requested));

            for slot in &slots {
                if slot.status == SlotStatus::Mismatch {
                    prop_assert!(!anyone_qualified);
                } else {
                    prop_assert!(anyone_qualified);
                }
            }
        }

        // Ordered, unique, inside the window, and stable under recomputation.
        #[test]
        fn test_slots_are_ordered_bounded_and_idempotent(
            (roster, bookings, requested, duration, (open, close)) in scenario(),
            specific in proptest::option::of(0usize..4),
        ) {
            let calendar = DayCalendar::from_bookings(bookings);
            let choice = match specific {
                Some(i) => StaffChoice::Specific(format!("emp-{i}")),
                None => StaffChoice::Any,
            };
            let query = SlotQuery {
                date: date(),
                schedule: DaySchedule::Open(DayWindow {
                    open: TimeOfDay::saturating(open),
                    close: TimeOfDay::saturating(close),
                }),
                required_duration: duration,
                requested_services: &requested,
                staff_choice: &choice,
                roster: &roster,
                calendar: &calendar,
                now: previous_day_noon(),
            };
            let policy = SchedulingPolicy::default();
            let first = generate_slots(&query, &policy);
            let second = generate_slots(&query, &policy);
            prop_assert_eq!(&first, &second);

            for pair in first.windows(2) {
                prop_assert!(pair[0].start < pair[1].start);
            }
            for slot in &first {
                prop_assert!(slot.start.minutes() >= open);
                prop_assert!(slot.start.minutes() + duration <= close);
            }
        }

        // Nothing at or before now + buffer is offered today.
        #[test]
        fn test_today_never_offers_imminent_starts(
            (roster, bookings, requested, duration, (open, close)) in scenario(),
            now_minutes in 0u32..(24 * 60),
        ) {
            let calendar = DayCalendar::from_bookings(bookings);
            let choice = StaffChoice::Any;
            let now = date()
                .and_hms_opt(now_minutes / 60, now_minutes % 60, 0)
                .unwrap();
            let policy = SchedulingPolicy::default();
            let query = SlotQuery {
                date: date(),
                schedule: DaySchedule::Open(DayWindow {
                    open: TimeOfDay::saturating(open),
                    close: TimeOfDay::saturating(close),
                }),
                required_duration: duration,
                requested_services: &requested,
                staff_choice: &choice,
                roster: &roster,
                calendar: &calendar,
                now,
            };
            for slot in generate_slots(&query, &policy) {
                prop_assert!(slot.start.minutes() > now_minutes + policy.same_day_buffer_minutes);
            }
        }

        // A closed day never yields slots, whatever else is going on.
        #[test]
        fn test_closed_day_is_empty(
            (roster, bookings, requested, duration, _window) in scenario(),
        ) {
            let calendar = DayCalendar::from_bookings(bookings);
            let choice = StaffChoice::Any;
            let query = SlotQuery {
                date: date(),
                schedule: DaySchedule::Closed,
                required_duration: duration,
                requested_services: &requested,
                staff_choice: &choice,
                roster: &roster,
                calendar: &calendar,
                now: previous_day_noon(),
            };
            prop_assert!(generate_slots(&query, &SchedulingPolicy::default()).is_empty());
        }
    }
}
