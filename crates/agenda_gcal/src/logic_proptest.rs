#[cfg(test)]
mod tests {
    use crate::logic::{find_available_slots, search_start, SchedulingPolicy};
    use agenda_common::BusyInterval;
    use chrono::{DateTime, Datelike, Duration, TimeZone, Timelike, Utc, Weekday};
    use chrono_tz::Tz;
    use proptest::prelude::*;

    // Zones without daylight saving time
    const FIXED_ZONES: [Tz; 5] = [
        chrono_tz::America::Sao_Paulo,
        chrono_tz::Asia::Kolkata,
        chrono_tz::Asia::Tokyo,
        chrono_tz::UTC,
        chrono_tz::Africa::Lagos,
    ];

    const DST_ZONES: [Tz; 3] = [
        chrono_tz::Europe::Zurich,
        chrono_tz::America::New_York,
        chrono_tz::Australia::Sydney,
    ];

    // Fixed base so runs do not depend on the wall clock
    fn base_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    fn policy_strategy(zones: &'static [Tz]) -> impl Strategy<Value = SchedulingPolicy> {
        (
            0..zones.len(),
            0u32..23,
            1u32..=12,
            15i64..=180,
            1usize..=10,
            1u32..=21,
        )
            .prop_map(move |(zone, start, span, duration, max, horizon)| {
                let end = (start + span).min(24);
                SchedulingPolicy::new(zones[zone], start, end, duration, max, horizon).unwrap()
            })
    }

    fn busy_strategy() -> impl Strategy<Value = Vec<BusyInterval>> {
        prop::collection::vec((0i64..24 * 21, 15i64..=600), 0..30).prop_map(|periods| {
            periods
                .into_iter()
                .map(|(offset_hours, minutes)| {
                    let start = base_time() + Duration::hours(offset_hours);
                    BusyInterval::new(start, start + Duration::minutes(minutes))
                })
                .collect()
        })
    }

    fn instant_strategy() -> impl Strategy<Value = DateTime<Utc>> {
        (0i64..60 * 24 * 7).prop_map(|minutes| base_time() + Duration::minutes(minutes))
    }

    fn assert_within_working_hours(slots: &[DateTime<Utc>], policy: &SchedulingPolicy) {
        let tz = policy.provider_time_zone();
        for slot in slots {
            let local = slot.with_timezone(&tz);
            assert!(
                !matches!(local.weekday(), Weekday::Sat | Weekday::Sun),
                "slot {} falls on a weekend",
                local
            );
            assert!(
                local.hour() >= policy.work_start_hour() && local.hour() < policy.work_end_hour(),
                "slot {} is outside working hours",
                local
            );
            assert_eq!(local.minute(), 0, "slot {} is not on a whole hour", local);
        }
    }

    proptest! {
        #[test]
        fn test_slots_respect_working_hours_order_and_cap(
            policy in policy_strategy(&FIXED_ZONES),
            busy_periods in busy_strategy(),
            requested in instant_strategy(),
            now in instant_strategy(),
        ) {
            let slots = find_available_slots(requested, None, &policy, &busy_periods, now);

            assert_within_working_hours(&slots, &policy);
            prop_assert!(slots.windows(2).all(|pair| pair[0] < pair[1]));
            prop_assert!(slots.len() <= policy.max_suggestions());
        }

        #[test]
        fn test_slots_never_overlap_busy_periods(
            policy in policy_strategy(&FIXED_ZONES),
            busy_periods in busy_strategy(),
            requested in instant_strategy(),
            now in instant_strategy(),
        ) {
            let slots = find_available_slots(requested, None, &policy, &busy_periods, now);

            for slot in &slots {
                let end = *slot + policy.slot_duration();
                for interval in &busy_periods {
                    prop_assert!(
                        !(*slot < interval.end && interval.start < end),
                        "slot {} overlaps busy {:?}",
                        slot,
                        interval
                    );
                }
            }
        }

        #[test]
        fn test_slots_start_after_now_and_request(
            policy in policy_strategy(&FIXED_ZONES),
            busy_periods in busy_strategy(),
            requested in instant_strategy(),
            now in instant_strategy(),
        ) {
            let slots = find_available_slots(requested, None, &policy, &busy_periods, now);

            if let Some(start) = search_start(requested, now, &policy) {
                prop_assert!(slots.iter().all(|slot| *slot >= start));
            } else {
                prop_assert!(slots.is_empty());
            }
            prop_assert!(slots.iter().all(|slot| *slot > now && *slot >= requested));
        }

        #[test]
        fn test_search_is_deterministic(
            policy in policy_strategy(&DST_ZONES),
            busy_periods in busy_strategy(),
            requested in instant_strategy(),
            now in instant_strategy(),
        ) {
            let first = find_available_slots(requested, None, &policy, &busy_periods, now);
            let second = find_available_slots(requested, Some("Asia/Tokyo"), &policy, &busy_periods, now);

            prop_assert_eq!(first, second);
        }

        #[test]
        fn test_dst_zones_keep_working_hours_and_order(
            policy in policy_strategy(&DST_ZONES),
            requested in instant_strategy(),
            offset_days in 0i64..365,
        ) {
            // Spread requests over a year so both transitions are crossed
            let requested = requested + Duration::days(offset_days);
            let now = requested - Duration::hours(1);

            let slots = find_available_slots(requested, None, &policy, &[], now);

            assert_within_working_hours(&slots, &policy);
            prop_assert!(slots.windows(2).all(|pair| pair[0] < pair[1]));
            prop_assert!(slots.len() <= policy.max_suggestions());
        }
    }
}
