#[cfg(test)]
mod tests {
    use crate::assignment::{
        confirm_specific, free_eligible_staff, resolve_any, resolve_staff, FirstSelector,
        RandomSelector, StaffSelector,
    };
    use crate::calendar::DayCalendar;
    use crate::error::SlotError;
    use crate::models::{Booking, StaffChoice, StaffMember};
    use crate::time::TimeOfDay;
    use std::collections::HashSet;

    fn t(hour: u32, minute: u32) -> TimeOfDay {
        TimeOfDay::from_hm(hour, minute).unwrap()
    }

    fn staff(id: &str, services: &[&str]) -> StaffMember {
        StaffMember {
            id: id.to_string(),
            name: id.to_string(),
            role: "Therapist".to_string(),
            experience: Some("3 years".to_string()),
            capabilities: services.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn booking(staff_id: &str, start: TimeOfDay, duration: u32) -> Booking {
        Booking {
            staff_id: staff_id.to_string(),
            start,
            duration_minutes: duration,
            appointment_id: Some(format!("appt-{staff_id}")),
        }
    }

    /// Fails the test if consulted.
    struct PanickingSelector;

    impl StaffSelector for PanickingSelector {
        fn choose(&mut self, _candidates: &[&StaffMember]) -> usize {
            panic!("selector must not be consulted for a single candidate");
        }
    }

    /// Returns a fixed index, to pin down which candidate gets the booking.
    struct FixedSelector(usize);

    impl StaffSelector for FixedSelector {
        fn choose(&mut self, _candidates: &[&StaffMember]) -> usize {
            self.0
        }
    }

    fn services() -> Vec<String> {
        vec!["massage".to_string()]
    }

    #[test]
    fn test_single_candidate_is_always_chosen() {
        let roster = vec![staff("anna", &["massage"]), staff("bo", &["massage"])];
        let calendar = DayCalendar::from_bookings([booking("anna", t(10, 0), 60)]);

        for _ in 0..20 {
            let chosen = resolve_any(
                &roster,
                &services(),
                &calendar,
                t(10, 0),
                60,
                &mut PanickingSelector,
            )
            .unwrap();
            assert_eq!(chosen.id, "bo");
        }
    }

    #[test]
    fn test_selector_picks_among_free_eligible_only() {
        let roster = vec![
            staff("anna", &["massage"]),
            staff("bo", &["facial"]),
            staff("cy", &["massage"]),
            staff("dee", &["massage"]),
        ];
        let calendar = DayCalendar::from_bookings([booking("cy", t(11, 30), 30)]);

        let free = free_eligible_staff(&roster, &services(), &calendar, t(11, 0), 60);
        let ids: Vec<&str> = free.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["anna", "dee"]);

        let chosen = resolve_any(
            &roster,
            &services(),
            &calendar,
            t(11, 0),
            60,
            &mut FixedSelector(1),
        )
        .unwrap();
        assert_eq!(chosen.id, "dee");
    }

    #[test]
    fn test_out_of_range_selector_index_is_clamped() {
        let roster = vec![staff("anna", &["massage"]), staff("bo", &["massage"])];
        let chosen = resolve_any(
            &roster,
            &services(),
            &DayCalendar::default(),
            t(9, 0),
            30,
            &mut FixedSelector(99),
        )
        .unwrap();
        assert_eq!(chosen.id, "bo");
    }

    #[test]
    fn test_nobody_free_is_no_staff_available() {
        let roster = vec![staff("anna", &["massage"]), staff("bo", &["massage"])];
        let calendar = DayCalendar::from_bookings([
            booking("anna", t(14, 0), 60),
            booking("bo", t(14, 30), 30),
        ]);
        let err = resolve_any(&roster, &services(), &calendar, t(14, 0), 45, &mut FirstSelector)
            .unwrap_err();
        assert_eq!(
            err,
            SlotError::NoStaffAvailable {
                start: t(14, 0),
                duration_minutes: 45
            }
        );
    }

    #[test]
    fn test_nobody_qualified_is_no_eligible_staff() {
        let roster = vec![staff("anna", &["facial"])];
        let err = resolve_any(
            &roster,
            &services(),
            &DayCalendar::default(),
            t(14, 0),
            45,
            &mut FirstSelector,
        )
        .unwrap_err();
        assert_eq!(err, SlotError::NoEligibleStaff);
    }

    #[test]
    fn test_back_to_back_booking_does_not_block_assignment() {
        let roster = vec![staff("anna", &["massage"])];
        let calendar = DayCalendar::from_bookings([
            booking("anna", t(9, 0), 60),
            booking("anna", t(11, 0), 60),
        ]);
        let chosen =
            resolve_any(&roster, &services(), &calendar, t(10, 0), 60, &mut FirstSelector).unwrap();
        assert_eq!(chosen.id, "anna");
    }

    #[test]
    fn test_seeded_random_selection_is_reproducible_and_uniformish() {
        let roster: Vec<StaffMember> = ["a", "b", "c"]
            .iter()
            .map(|id| staff(id, &["massage"]))
            .collect();
        let calendar = DayCalendar::default();

        let pick = |seed: u64| -> Vec<String> {
            let mut selector = RandomSelector::seeded(seed);
            (0..30)
                .map(|_| {
                    resolve_any(&roster, &services(), &calendar, t(12, 0), 30, &mut selector)
                        .unwrap()
                        .id
                        .clone()
                })
                .collect()
        };

        assert_eq!(pick(7), pick(7));
        let seen: HashSet<String> = pick(7).into_iter().collect();
        assert_eq!(seen.len(), 3, "all candidates should be reachable");
    }

    #[test]
    fn test_confirm_specific() {
        let roster = vec![staff("anna", &["massage"]), staff("bo", &["facial"])];
        let calendar = DayCalendar::from_bookings([booking("anna", t(15, 0), 30)]);

        assert!(confirm_specific(&roster, "anna", &services(), &calendar, t(14, 0), 60).is_ok());
        assert_eq!(
            confirm_specific(&roster, "anna", &services(), &calendar, t(14, 45), 30).unwrap_err(),
            SlotError::StaffUnavailable {
                staff_id: "anna".to_string(),
                start: t(14, 45)
            }
        );
        assert_eq!(
            confirm_specific(&roster, "bo", &services(), &calendar, t(14, 0), 30).unwrap_err(),
            SlotError::NoEligibleStaff
        );
        assert_eq!(
            confirm_specific(&roster, "zed", &services(), &calendar, t(14, 0), 30).unwrap_err(),
            SlotError::UnknownStaff("zed".to_string())
        );
    }

    #[test]
    fn test_resolve_staff_dispatches_on_choice() {
        let roster = vec![staff("anna", &["massage"]), staff("bo", &["massage"])];
        let calendar = DayCalendar::default();
        let chosen = resolve_staff(
            &StaffChoice::Specific("bo".to_string()),
            &roster,
            &services(),
            &calendar,
            t(10, 0),
            30,
            &mut PanickingSelector,
        )
        .unwrap();
        assert_eq!(chosen.id, "bo");

        let chosen = resolve_staff(
            &StaffChoice::Any,
            &roster,
            &services(),
            &calendar,
            t(10, 0),
            30,
            &mut FirstSelector,
        )
        .unwrap();
        assert_eq!(chosen.id, "anna");
    }
}
