#[cfg(test)]
mod tests {
    use crate::ics::file_name_for;
    use crate::language::parse_language_output;
    use crate::understanding::RequestUnderstanding;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use proptest::prelude::*;
    use serde_json::{json, Map, Value};

    fn instant_strategy() -> impl Strategy<Value = DateTime<Utc>> {
        (0i64..365 * 20).prop_map(|days| {
            Utc.with_ymd_and_hms(2020, 1, 1, 9, 30, 0).unwrap() + Duration::days(days)
        })
    }

    // Whatever a model might put in a JSON reply, nested a few levels deep
    fn json_strategy() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::from),
            any::<i64>().prop_map(Value::from),
            any::<f64>().prop_map(Value::from),
            ".{0,24}".prop_map(Value::from),
            Just(json!("2024-04-29T13:00:00Z")),
            Just(json!("pt")),
        ];
        leaf.prop_recursive(3, 32, 6, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
                prop::collection::vec(
                    (
                        prop_oneof![
                            Just("understood".to_string()),
                            Just("dateTime".to_string()),
                            Just("duration".to_string()),
                            Just("subject".to_string()),
                            Just("language".to_string()),
                            "[a-z]{1,8}",
                        ],
                        inner,
                    ),
                    0..6
                )
                .prop_map(|entries| Value::Object(entries.into_iter().collect::<Map<_, _>>())),
            ]
        })
    }

    proptest! {
        #[test]
        fn file_name_is_always_safe(subject in ".{0,40}", start in instant_strategy()) {
            let name = file_name_for(&subject, start);
            let suffix = format!("-{}.ics", start.format("%Y-%m-%d"));

            prop_assert!(name.starts_with("appointment-"));
            prop_assert!(name.ends_with(&suffix));

            let middle = &name["appointment-".len()..name.len() - suffix.len()];
            prop_assert!(!middle.is_empty());
            prop_assert!(
                middle.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'),
                "unsafe characters in {:?}",
                name
            );
            prop_assert!(!middle.contains("__") || subject.contains('_'));
        }

        #[test]
        fn file_name_keeps_plain_subjects(
            words in prop::collection::vec("[A-Za-z0-9]{1,8}", 1..5),
            start in instant_strategy(),
        ) {
            let subject = words.join("  ");
            prop_assert_eq!(
                file_name_for(&subject, start),
                format!("appointment-{}-{}.ics", words.join("_"), start.format("%Y-%m-%d"))
            );
        }

        #[test]
        fn understanding_never_carries_unusable_fields(output in json_strategy()) {
            let understanding = RequestUnderstanding::from_model_output(&output);

            if let Some(minutes) = understanding.duration_minutes {
                prop_assert!(minutes > 0);
            }
            if let Some(subject) = &understanding.subject {
                prop_assert!(!subject.trim().is_empty());
                prop_assert_eq!(subject.trim(), subject.as_str());
            }
            if output.get("understood").and_then(Value::as_bool).is_none() {
                prop_assert_eq!(understanding, RequestUnderstanding::default());
            }
        }

        #[test]
        fn language_answers_outside_the_supported_set_are_rejected(output in json_strategy()) {
            let expected = match output.get("language").and_then(Value::as_str) {
                Some(code) => ["en", "pt", "es"].contains(&code.trim().to_lowercase().as_str()),
                None => false,
            };
            prop_assert_eq!(parse_language_output(&output).is_some(), expected);
        }
    }
}
