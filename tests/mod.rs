use itertools::Itertools;

// Reverse the folding: every line starting with a space continues the previous one
pub fn unfold(input: &str) -> Vec<String> {
    let mut lines: Vec<String> = vec![];
    for line in input.split_terminator("\r\n") {
        match (line.strip_prefix(' '), lines.last_mut()) {
            (Some(continuation), Some(last)) => last.push_str(continuation),
            _ => lines.push(line.to_owned()),
        }
    }
    lines
}

pub fn unescape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n' | 'N') => out.push('\n'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

// Check BEGIN/END pairing and return the deepest nesting level
pub fn nesting_depth(input: &str) -> usize {
    let mut stack = vec![];
    let mut depth = 0;
    for line in unfold(input) {
        if let Some(name) = line.strip_prefix("BEGIN:") {
            stack.push(name.to_owned());
            depth = depth.max(stack.len());
        } else if let Some(name) = line.strip_prefix("END:") {
            assert_eq!(stack.pop().as_deref(), Some(name), "unbalanced END:{name}");
        }
    }
    assert!(stack.is_empty(), "unclosed components: {}", stack.iter().join(","));
    depth
}

pub mod scenarios {
    use icalgen::{Calendar, Component, Event, GeneratorError, PropertyBag, generator::Emitter};

    const MINIMAL: &str = "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:-//Test//EN\r\nEND:VCALENDAR\r\n";

    #[test]
    fn minimal_calendar() {
        let calendar = Calendar::new("-//Test//EN").unwrap();
        let mut event = Event::new("event-1@test").unwrap();
        event.set_summary("");

        similar_asserts::assert_eq!(calendar.render().unwrap(), MINIMAL);
    }

    #[test]
    fn attaching_an_event() {
        let mut calendar = Calendar::new("-//Test//EN").unwrap();
        let mut event = Event::new("event-1@test").unwrap();
        event.set_summary("");
        let event_block = event.render().unwrap();
        calendar.add_event(event);

        similar_asserts::assert_eq!(
            calendar.render().unwrap(),
            format!(
                "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:-//Test//EN\r\n{event_block}END:VCALENDAR\r\n"
            )
        );
        assert!(event_block.starts_with("BEGIN:VEVENT\r\n"));
        assert!(event_block.ends_with("END:VEVENT\r\n"));
    }

    #[test]
    fn berlin_timezone() {
        let mut calendar = Calendar::new("-//Test//EN").unwrap();
        calendar.set_timezone("Europe/Berlin").unwrap();

        similar_asserts::assert_eq!(
            calendar.render().unwrap(),
            "BEGIN:VCALENDAR\r\n\
             VERSION:2.0\r\n\
             PRODID:-//Test//EN\r\n\
             X-WR-TIMEZONE:Europe/Berlin\r\n\
             BEGIN:VTIMEZONE\r\n\
             TZID:Europe/Berlin\r\n\
             END:VTIMEZONE\r\n\
             END:VCALENDAR\r\n"
        );
    }

    #[rstest::rstest]
    #[case(75, 1)]
    #[case(76, 2)]
    #[case(149, 2)]
    #[case(150, 3)]
    fn fold_boundary(#[case] octets: usize, #[case] physical_lines: usize) {
        let prefix = "X-TEST:";
        let mut bag = PropertyBag::new();
        bag.set("X-TEST", "a".repeat(octets - prefix.len())).unwrap();
        let out = bag.generate();

        let lines = out.split_terminator("\r\n").collect::<Vec<_>>();
        assert_eq!(lines.len(), physical_lines);
        assert_eq!(lines[0].len(), octets.min(75));
        for continuation in &lines[1..] {
            assert!(continuation.starts_with(' '));
            assert!(!continuation[1..].starts_with(' '));
        }
    }

    #[test]
    fn empty_prod_id() {
        assert_eq!(
            Calendar::new("").unwrap_err(),
            GeneratorError::RequiredField("PRODID")
        );
    }
}

pub mod folding {
    use crate::{unescape, unfold};
    use icalgen::{GeneratorOptions, PropertyBag, generator::Emitter};
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn physical_lines_fit(value in "[a-zA-Z0-9 äöü€😀,;:\\\\\n]{0,400}") {
            let mut bag = PropertyBag::new();
            bag.set("DESCRIPTION", value.as_str()).unwrap();
            let out = bag.generate();

            prop_assert!(out.ends_with("\r\n"));
            for line in out.split_terminator("\r\n") {
                prop_assert!(line.len() <= 75, "{} octets: {:?}", line.len(), line);
            }

            let logical = unfold(&out);
            prop_assert_eq!(logical.len(), 1);
            let rendered = logical[0].strip_prefix("DESCRIPTION:").unwrap();
            prop_assert_eq!(unescape(rendered), value);
        }

        #[test]
        fn custom_limit(value in "[a-zé€]{0,200}", limit in 5usize..100) {
            let mut bag = PropertyBag::new();
            bag.set("SUMMARY", value.as_str()).unwrap();
            let out = bag.generate_with(&GeneratorOptions::default().with_folding(Some(limit)));

            for line in out.split_terminator("\r\n") {
                prop_assert!(line.len() <= limit);
            }
            prop_assert_eq!(unfold(&out), vec![format!("SUMMARY:{value}")]);
        }
    }

    #[test]
    fn folding_disabled() {
        let mut bag = PropertyBag::new();
        bag.set("SUMMARY", "x".repeat(300)).unwrap();
        let out = bag.generate_with(&GeneratorOptions::default().with_folding(None));
        assert_eq!(out.split_terminator("\r\n").count(), 1);
    }
}

pub mod escaping {
    use crate::{unescape, unfold};
    use icalgen::{PropertyBag, generator::Emitter};
    use itertools::Itertools;
    use proptest::prelude::*;

    fn has_unescaped_special(value: &str) -> bool {
        let mut chars = value.chars();
        while let Some(c) = chars.next() {
            match c {
                '\\' => {
                    if !matches!(chars.next(), Some('\\' | ',' | ';' | 'n')) {
                        return true;
                    }
                }
                ',' | ';' | '\n' => return true,
                _ => {}
            }
        }
        false
    }

    proptest! {
        #[test]
        fn round_trip(
            properties in prop::collection::btree_map("[A-Za-z][A-Za-z0-9-]{0,12}", "[ -~äß\n]{0,120}", 1..8)
                .prop_filter("names must differ in more than case", |properties| {
                    properties.keys().map(|name| name.to_ascii_uppercase()).all_unique()
                })
        ) {
            let mut bag = PropertyBag::new();
            for (name, value) in &properties {
                bag.set(name, value.as_str()).unwrap();
            }
            let out = bag.generate();

            let parsed = unfold(&out)
                .into_iter()
                .map(|line| {
                    let (name, value) = line.split_once(':').unwrap();
                    prop_assert!(!has_unescaped_special(value), "{:?}", value);
                    Ok((name.to_owned(), unescape(value)))
                })
                .collect::<Result<Vec<_>, TestCaseError>>()?;
            let expected = properties.into_iter().collect::<Vec<_>>();
            prop_assert_eq!(parsed, expected);
        }
    }

    #[rstest::rstest]
    #[case("C:\\Users\\a,b;c", "X-PATH:C:\\\\Users\\\\a\\,b\\;c\r\n")]
    #[case("first\nsecond", "X-PATH:first\\nsecond\r\n")]
    #[case("first\r\nsecond", "X-PATH:first\\nsecond\r\n")]
    fn escaped_output(#[case] value: &str, #[case] expected: &str) {
        let mut bag = PropertyBag::new();
        bag.set("X-PATH", value).unwrap();
        assert_eq!(bag.generate(), expected);
    }
}

pub mod tree {
    use crate::nesting_depth;
    use chrono::{Duration, NaiveDate, TimeZone, Utc};
    use icalgen::{
        Alarm, AlarmAction, Calendar, Component, ComponentMut, CustomComponent, Event,
        GeneratorError, Timezone, TimezoneRule, TimezoneRuleType,
    };

    fn calendar() -> Calendar {
        let mut alarm = Alarm::new(AlarmAction::Display, -Duration::minutes(10));
        alarm.set_description("Starts in ten minutes");

        let mut event = Event::new("20250301-standup@example.com").unwrap();
        event
            .set_dtstamp(Utc.with_ymd_and_hms(2025, 2, 20, 8, 0, 0).unwrap())
            .set_dtstart(
                NaiveDate::from_ymd_opt(2025, 3, 1)
                    .unwrap()
                    .and_hms_opt(9, 30, 0)
                    .unwrap(),
            )
            .set_duration(Duration::minutes(15))
            .set_summary("Standup")
            .set_description(
                "Agenda: yesterday, today; blockers.\nPlease be punctual, the room is booked right after.",
            )
            .add_alarm(alarm);

        let mut daylight = TimezoneRule::new(
            TimezoneRuleType::Daylight,
            NaiveDate::from_ymd_opt(1970, 3, 29)
                .unwrap()
                .and_hms_opt(2, 0, 0)
                .unwrap(),
            chrono::FixedOffset::east_opt(3600).unwrap(),
            chrono::FixedOffset::east_opt(7200).unwrap(),
        );
        daylight.set_tzname("CEST");
        let mut timezone = Timezone::new("Europe/Berlin").unwrap();
        timezone.add_rule(daylight);

        let mut calendar = Calendar::new("-//Example//Standup//EN").unwrap();
        calendar
            .set_method("PUBLISH")
            .set_timezone_definition(timezone)
            .add_event(event);
        calendar
    }

    #[test]
    fn full_document() {
        let ics = calendar().render().unwrap();
        assert!(ics.split_terminator("\r\n").all(|line| !line.contains('\n')));

        let mut settings = insta::Settings::clone_current();
        settings.add_filter(r"\r\n", "\n");
        let _guard = settings.bind_to_scope();
        insta::assert_snapshot!(ics, @r"
        BEGIN:VCALENDAR
        VERSION:2.0
        PRODID:-//Example//Standup//EN
        METHOD:PUBLISH
        X-WR-TIMEZONE:Europe/Berlin
        BEGIN:VTIMEZONE
        TZID:Europe/Berlin
        BEGIN:DAYLIGHT
        DTSTART:19700329T020000
        TZOFFSETFROM:+0100
        TZOFFSETTO:+0200
        TZNAME:CEST
        END:DAYLIGHT
        END:VTIMEZONE
        BEGIN:VEVENT
        UID:20250301-standup@example.com
        DTSTAMP:20250220T080000Z
        DTSTART:20250301T093000
        DURATION:PT15M
        SUMMARY:Standup
        DESCRIPTION:Agenda: yesterday\, today\; blockers.\nPlease be punctual\, the
          room is booked right after.
        BEGIN:VALARM
        ACTION:DISPLAY
        TRIGGER:-PT10M
        DESCRIPTION:Starts in ten minutes
        END:VALARM
        END:VEVENT
        END:VCALENDAR
        ");
    }

    #[test]
    fn nesting_matches_tree_depth() {
        assert_eq!(nesting_depth(&calendar().render().unwrap()), 3);

        let mut root = CustomComponent::new("X-ROOT").unwrap();
        let mut current = CustomComponent::new("X-LEVEL").unwrap();
        for _ in 0..5 {
            let mut parent = CustomComponent::new("X-LEVEL").unwrap();
            parent.add_component(current);
            current = parent;
        }
        root.add_component(current);
        assert_eq!(nesting_depth(&root.render().unwrap()), 7);
    }

    #[test]
    fn rendering_is_idempotent() {
        let calendar = calendar();
        let first = calendar.render().unwrap();
        let second = calendar.render().unwrap();
        similar_asserts::assert_eq!(first, second);
        assert_eq!(first.matches("BEGIN:VTIMEZONE").count(), 1);
    }

    #[test]
    fn render_from_threads() {
        let calendar = calendar();
        let expected = calendar.render().unwrap();
        std::thread::scope(|scope| {
            let handles = (0..4)
                .map(|_| scope.spawn(|| calendar.render().unwrap()))
                .collect::<Vec<_>>();
            for handle in handles {
                assert_eq!(handle.join().unwrap(), expected);
            }
        });
    }

    #[test]
    fn custom_components() {
        let mut todo = CustomComponent::new("vtodo").unwrap();
        todo.set("UID", "todo-1").unwrap()
            .set("SUMMARY", "Buy milk, eggs").unwrap();
        let mut calendar = Calendar::new("-//Test//EN").unwrap();
        calendar.add_component(todo);
        assert!(calendar.render().unwrap().contains(
            "BEGIN:VTODO\r\nUID:todo-1\r\nSUMMARY:Buy milk\\, eggs\r\nEND:VTODO\r\n"
        ));
    }

    #[rstest::rstest]
    #[case("", GeneratorError::RequiredField("component name"))]
    #[case("V TODO", GeneratorError::InvalidComponentName("V TODO".to_owned()))]
    #[case("VTODO\r\nX", GeneratorError::InvalidComponentName("VTODO\r\nX".to_owned()))]
    fn invalid_component_names(#[case] name: &str, #[case] error: GeneratorError) {
        assert_eq!(CustomComponent::new(name).unwrap_err(), error);
    }

    #[derive(Debug)]
    struct Broken;

    impl Component for Broken {
        fn get_comp_name(&self) -> &str {
            "X-BROKEN"
        }

        fn build_property_bag(&self) -> Result<icalgen::PropertyBag, GeneratorError> {
            let mut properties = icalgen::PropertyBag::new();
            properties.set("", "no name")?;
            Ok(properties)
        }
    }

    #[test]
    fn errors_propagate_without_output() {
        let mut calendar = Calendar::new("-//Test//EN").unwrap();
        calendar.add_component(Broken);
        assert!(matches!(
            calendar.render(),
            Err(GeneratorError::InvalidProperty(_))
        ));
    }
}
