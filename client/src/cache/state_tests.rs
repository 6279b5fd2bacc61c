#[cfg(test)]
mod tests {
    use crate::cache::state::{FetchDisposition, FetchTicket, ScheduleCache};
    use crate::calendar::{visible_weeks, Semester, Viewport, VisibleWeeks};
    use crate::fetch::FetchError;
    use crate::models::{
        MasterLists, ScheduleEntry, ScheduleResponse, SearchContext, SearchOption, SearchType,
        SessionKind,
    };
    use chrono::NaiveDate;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn entry(date: NaiveDate, time: &str, subject: &str) -> ScheduleEntry {
        ScheduleEntry {
            date,
            time: time.to_string(),
            subject: subject.to_string(),
            kind: SessionKind::Lecture,
            teacher: "Popescu Ion".to_string(),
            teacher_color: "#336699".to_string(),
            room: "501".to_string(),
            group: "IA-211".to_string(),
        }
    }

    fn response(entries: Vec<ScheduleEntry>) -> ScheduleResponse {
        ScheduleResponse {
            schedule: entries,
            master_lists: MasterLists {
                group: Some(vec![SearchOption::named("IA-211")]),
                teacher: None,
                office: None,
            },
        }
    }

    fn group(query: &str) -> SearchContext {
        SearchContext::new(SearchType::Group, query)
    }

    /// Weeks resolved against the 2025-26 academic year.
    fn weeks(list: &[u32]) -> VisibleWeeks {
        VisibleWeeks::new(ymd(2025, 10, 1), list.iter().copied())
    }

    fn ticket_for(tickets: &[FetchTicket], week: u32) -> FetchTicket {
        tickets
            .iter()
            .find(|t| t.key().week == week)
            .cloned()
            .unwrap_or_else(|| panic!("no ticket for week {}", week))
    }

    // ==================== Issuing ====================

    #[test]
    fn test_new_context_claims_every_visible_week() {
        let mut cache = ScheduleCache::new();
        let tickets = cache.set_context(group("IA-211"), &weeks(&[1, 2, 3]), Semester::First);

        assert_eq!(tickets.len(), 3);
        assert!(cache.is_loading());
        assert_eq!(cache.in_flight_count(), 3);
        assert_eq!(ticket_for(&tickets, 1).request.start_date_of_week, ymd(2025, 9, 1));
        assert_eq!(ticket_for(&tickets, 3).request.start_date_of_week, ymd(2025, 9, 15));
        assert!(tickets.iter().all(|t| t.generation == cache.generation()));
    }

    #[test]
    fn test_grid_across_year_boundary_requests_correct_mondays() {
        let mut cache = ScheduleCache::new();
        let visible = visible_weeks(ymd(2025, 8, 10), Viewport::month_grid());
        let tickets = cache.set_context(group("IA-211"), &visible, Semester::Second);

        assert_eq!(tickets.len(), 6);
        assert_eq!(ticket_for(&tickets, 52).request.start_date_of_week, ymd(2025, 8, 25));
        assert_eq!(ticket_for(&tickets, 1).request.start_date_of_week, ymd(2025, 9, 1));
    }

    #[test]
    fn test_only_missing_weeks_are_fetched() {
        let mut cache = ScheduleCache::new();
        let ctx = group("IA-211");
        let first = cache.set_context(ctx.clone(), &weeks(&[1, 2]), Semester::First);
        cache.on_fetch_success(
            &ticket_for(&first, 1),
            response(vec![entry(ymd(2025, 9, 1), "08:00", "Week one")]),
        );
        cache.on_fetch_success(
            &ticket_for(&first, 2),
            response(vec![entry(ymd(2025, 9, 8), "08:00", "Week two")]),
        );
        assert!(!cache.is_loading());

        let second = cache.set_context(ctx, &weeks(&[2, 3]), Semester::First);
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].key().week, 3);

        cache.on_fetch_success(
            &second[0],
            response(vec![entry(ymd(2025, 9, 15), "09:45", "Week three")]),
        );

        let week_one = cache.schedule_for_date(ymd(2025, 9, 1));
        assert_eq!(week_one.len(), 1);
        assert_eq!(week_one[0].subject, "Week one");
        assert_eq!(cache.entries().len(), 3);
    }

    #[test]
    fn test_fully_covered_weeks_clear_loading() {
        let mut cache = ScheduleCache::new();
        let ctx = group("IA-211");
        let tickets = cache.set_context(ctx.clone(), &weeks(&[4]), Semester::First);
        cache.on_fetch_success(&tickets[0], response(vec![]));

        let again = cache.set_context(ctx, &weeks(&[4]), Semester::First);
        assert!(again.is_empty());
        assert!(!cache.is_loading());
    }

    #[test]
    fn test_covered_weeks_keep_loading_while_others_in_flight() {
        let mut cache = ScheduleCache::new();
        let ctx = group("IA-211");
        let tickets = cache.set_context(ctx.clone(), &weeks(&[4, 5]), Semester::First);
        cache.on_fetch_success(&ticket_for(&tickets, 4), response(vec![]));

        let again = cache.set_context(ctx, &weeks(&[4]), Semester::First);
        assert!(again.is_empty());
        assert!(cache.is_loading(), "week 5 is still outstanding");
    }

    #[test]
    fn test_semester_is_part_of_the_key() {
        let mut cache = ScheduleCache::new();
        let ctx = group("IA-211");
        cache.set_context(ctx.clone(), &weeks(&[20]), Semester::First);
        let tickets = cache.set_context(ctx, &weeks(&[20]), Semester::Second);
        assert_eq!(tickets.len(), 1);
        assert_eq!(tickets[0].key().semester, Semester::Second);
    }

    #[test]
    fn test_empty_query_clears_and_skips_fetching() {
        let mut cache = ScheduleCache::new();
        let tickets = cache.set_context(group("IA-211"), &weeks(&[8]), Semester::First);
        cache.on_fetch_success(&tickets[0], response(vec![entry(ymd(2025, 10, 20), "08:00", "A")]));

        let none = cache.set_context(group(""), &weeks(&[8]), Semester::First);
        assert!(none.is_empty());
        assert!(!cache.is_loading());
        assert!(cache.entries().is_empty());
        assert_eq!(cache.in_flight_count(), 0);
    }

    // ==================== Context switching ====================

    #[test]
    fn test_context_switch_clears_entries_immediately() {
        let mut cache = ScheduleCache::new();
        let tickets = cache.set_context(group("IA-211"), &weeks(&[8]), Semester::First);
        cache.on_fetch_success(
            &tickets[0],
            response(vec![entry(ymd(2025, 10, 20), "08:00", "Group A lecture")]),
        );
        assert_eq!(cache.schedule_for_date(ymd(2025, 10, 20)).len(), 1);

        let b_tickets = cache.set_context(group("IA-212"), &weeks(&[8]), Semester::First);
        assert_eq!(b_tickets.len(), 1, "ledger was cleared, week 8 is fetched again");
        assert!(cache.schedule_for_date(ymd(2025, 10, 20)).is_empty());
        assert!(cache.is_loading());
    }

    #[test]
    fn test_late_response_for_old_context_is_discarded() {
        let mut cache = ScheduleCache::new();
        let a = cache.set_context(group("IA-211"), &weeks(&[5]), Semester::First);
        let b = cache.set_context(group("IA-212"), &weeks(&[5, 6]), Semester::First);

        let disposition = cache.on_fetch_success(
            &a[0],
            response(vec![entry(ymd(2025, 9, 29), "08:00", "Stale")]),
        );
        assert_eq!(disposition, FetchDisposition::Stale);
        assert!(cache.entries().is_empty());
        assert!(cache.is_loading(), "B's own fetches are still outstanding");
        assert_eq!(cache.in_flight_count(), 2);

        cache.on_fetch_success(&ticket_for(&b, 5), response(vec![]));
        assert!(cache.is_loading());
        cache.on_fetch_success(&ticket_for(&b, 6), response(vec![]));
        assert!(!cache.is_loading());
    }

    #[test]
    fn test_stale_failure_is_not_reported() {
        let mut cache = ScheduleCache::new();
        let a = cache.set_context(group("IA-211"), &weeks(&[5]), Semester::First);
        cache.set_context(group("IA-212"), &weeks(&[5]), Semester::First);

        let disposition = cache.on_fetch_failure(&a[0], &FetchError::transport("reset"));
        assert_eq!(disposition, FetchDisposition::Stale);
        assert!(cache.last_error().is_none());
        assert!(cache.is_loading());
    }

    #[test]
    fn test_returning_to_a_context_discards_its_earlier_tickets() {
        let mut cache = ScheduleCache::new();
        let first_a = cache.set_context(group("IA-211"), &weeks(&[5]), Semester::First);
        cache.set_context(group("IA-212"), &weeks(&[5]), Semester::First);
        let second_a = cache.set_context(group("IA-211"), &weeks(&[5]), Semester::First);

        assert_eq!(
            cache.on_fetch_success(&first_a[0], response(vec![entry(ymd(2025, 9, 29), "08:00", "Old")])),
            FetchDisposition::Stale
        );
        assert_eq!(cache.in_flight_count(), 1);

        assert_eq!(
            cache.on_fetch_success(&second_a[0], response(vec![entry(ymd(2025, 9, 29), "08:00", "New")])),
            FetchDisposition::Merged { entries: 1 }
        );
        assert_eq!(cache.schedule_for_date(ymd(2025, 9, 29))[0].subject, "New");
    }

    // ==================== Merging ====================

    #[test]
    fn test_refetch_replaces_entries_for_shared_dates() {
        let mut cache = ScheduleCache::new();
        let tickets = cache.set_context(group("IA-211"), &weeks(&[8]), Semester::First);
        let day = ymd(2025, 10, 20);

        cache.on_fetch_success(
            &tickets[0],
            response(vec![
                entry(day, "08:00", "One"),
                entry(day, "09:45", "Two"),
                entry(day, "11:30", "Three"),
            ]),
        );
        cache.on_fetch_success(
            &tickets[0],
            response(vec![entry(day, "08:00", "One"), entry(day, "13:15", "Four")]),
        );

        let subjects: Vec<_> = cache
            .schedule_for_date(day)
            .iter()
            .map(|e| e.subject.as_str())
            .collect();
        assert_eq!(subjects, vec!["One", "Four"]);
    }

    #[test]
    fn test_merge_keeps_dates_absent_from_response() {
        let mut cache = ScheduleCache::new();
        let tickets = cache.set_context(group("IA-211"), &weeks(&[8]), Semester::First);
        cache.on_fetch_success(
            &tickets[0],
            response(vec![
                entry(ymd(2025, 10, 20), "08:00", "Monday"),
                entry(ymd(2025, 10, 21), "08:00", "Tuesday"),
            ]),
        );
        cache.on_fetch_success(
            &tickets[0],
            response(vec![entry(ymd(2025, 10, 20), "08:00", "Monday v2")]),
        );

        assert_eq!(cache.schedule_for_date(ymd(2025, 10, 21))[0].subject, "Tuesday");
        assert_eq!(cache.schedule_for_date(ymd(2025, 10, 20))[0].subject, "Monday v2");
    }

    #[test]
    fn test_master_lists_are_last_write_wins() {
        let mut cache = ScheduleCache::new();
        let tickets = cache.set_context(group("IA-211"), &weeks(&[1, 2]), Semester::First);
        cache.on_fetch_success(&ticket_for(&tickets, 1), response(vec![]));
        assert_eq!(cache.search_options(SearchType::Group).len(), 1);

        let replacement = ScheduleResponse {
            schedule: vec![],
            master_lists: MasterLists {
                group: None,
                teacher: Some(vec![SearchOption::named("Rusu Ana")]),
                office: None,
            },
        };
        cache.on_fetch_success(&ticket_for(&tickets, 2), replacement);
        assert!(cache.search_options(SearchType::Group).is_empty());
        assert_eq!(cache.search_options(SearchType::Teacher)[0].name, "Rusu Ana");
    }

    // ==================== Failures ====================

    #[test]
    fn test_failure_keeps_entries_and_claims() {
        let mut cache = ScheduleCache::new();
        let ctx = group("IA-211");
        let tickets = cache.set_context(ctx.clone(), &weeks(&[1, 2]), Semester::First);
        cache.on_fetch_success(
            &ticket_for(&tickets, 1),
            response(vec![entry(ymd(2025, 9, 2), "08:00", "Kept")]),
        );

        let failed = ticket_for(&tickets, 2);
        let disposition = cache.on_fetch_failure(&failed, &FetchError::protocol(502, "Bad Gateway"));
        assert_eq!(disposition, FetchDisposition::Failed);
        assert!(cache.last_error().unwrap().contains("502"));
        assert!(!cache.is_loading());
        assert_eq!(cache.schedule_for_date(ymd(2025, 9, 2)).len(), 1);
        assert!(cache.is_claimed(failed.key()));

        // No automatic retry for the failed week.
        assert!(cache.set_context(ctx, &weeks(&[1, 2]), Semester::First).is_empty());
    }

    #[test]
    fn test_failure_keeps_loading_while_others_outstanding() {
        let mut cache = ScheduleCache::new();
        let tickets = cache.set_context(group("IA-211"), &weeks(&[1, 2]), Semester::First);
        cache.on_fetch_failure(&ticket_for(&tickets, 1), &FetchError::transport("timeout"));
        assert!(cache.is_loading());

        cache.on_fetch_success(&ticket_for(&tickets, 2), response(vec![]));
        assert!(!cache.is_loading());
        assert!(cache.last_error().is_none(), "success clears the last error");
    }

    #[test]
    fn test_context_switch_clears_last_error() {
        let mut cache = ScheduleCache::new();
        let tickets = cache.set_context(group("IA-211"), &weeks(&[1]), Semester::First);
        cache.on_fetch_failure(&tickets[0], &FetchError::schema("missing field `schedule`"));
        assert!(cache.last_error().is_some());

        cache.set_context(group("IA-212"), &weeks(&[1]), Semester::First);
        assert!(cache.last_error().is_none());
    }

    #[test]
    fn test_refresh_reissues_failed_week() {
        let mut cache = ScheduleCache::new();
        let ctx = group("IA-211");
        let visible = weeks(&[1, 2]);
        let tickets = cache.set_context(ctx, &visible, Semester::First);
        cache.on_fetch_failure(&ticket_for(&tickets, 1), &FetchError::transport("reset"));

        let refreshed = cache.refresh(&visible, Semester::First);
        let reissued: Vec<_> = refreshed.iter().map(|t| t.key().week).collect();
        assert_eq!(reissued, vec![1], "week 2 is still in flight");
        assert!(cache.is_loading());
    }

    #[test]
    fn test_refresh_without_context_is_noop() {
        let mut cache = ScheduleCache::new();
        assert!(cache.refresh(&weeks(&[1]), Semester::First).is_empty());
    }

    // ==================== Queries ====================

    #[test]
    fn test_schedule_for_missing_date_or_empty_cache() {
        let cache = ScheduleCache::new();
        assert!(cache.schedule_for_date(None).is_empty());
        assert!(cache.schedule_for_date(ymd(2025, 10, 20)).is_empty());
    }

    #[test]
    fn test_schedule_by_date_groups_entries() {
        let mut cache = ScheduleCache::new();
        let tickets = cache.set_context(group("IA-211"), &weeks(&[8]), Semester::First);
        cache.on_fetch_success(
            &tickets[0],
            response(vec![
                entry(ymd(2025, 10, 21), "08:00", "B"),
                entry(ymd(2025, 10, 20), "08:00", "A1"),
                entry(ymd(2025, 10, 20), "09:45", "A2"),
            ]),
        );

        let grouped = cache.schedule_by_date();
        let dates: Vec<_> = grouped.keys().copied().collect();
        assert_eq!(dates, vec![ymd(2025, 10, 20), ymd(2025, 10, 21)]);
        assert_eq!(grouped[&ymd(2025, 10, 20)].len(), 2);
    }
}
