use chrono::{Duration, NaiveDate, Utc};
use icalgen::{
    Alarm, AlarmAction, Calendar, Component, Event, EventStatus, GeneratorError,
    GeneratorOptions,
};

fn main() -> Result<(), GeneratorError> {
    // ICALGEN_FOLDING=0 disables folding
    let options = match std::env::var("ICALGEN_FOLDING").ok().map(|v| v.parse::<usize>()) {
        Some(Ok(0)) => GeneratorOptions::default().with_folding(None),
        Some(Ok(limit)) => GeneratorOptions::default().with_folding(Some(limit)),
        _ => GeneratorOptions::default(),
    };

    let mut reminder = Alarm::new(AlarmAction::Display, -Duration::hours(1));
    reminder.set_description("Release in one hour");

    let mut release = Event::new("release-1.0@example.com")?;
    release
        .set_dtstamp(Utc::now())
        .set_dtstart(Utc::now() + Duration::days(7))
        .set_duration(Duration::hours(2))
        .set_summary("Release 1.0")
        .set_description("Tag, build and publish.\nAnnounce on the mailing list; update the website.")
        .set_status(EventStatus::Confirmed)
        .add_alarm(reminder);

    let mut holiday = Event::new("holiday-2025-12-25@example.com")?;
    holiday
        .set_dtstart(NaiveDate::from_ymd_opt(2025, 12, 25).unwrap_or_default())
        .set_summary("Christmas");

    let mut calendar = Calendar::new("-//Example//Release Planner//EN")?;
    calendar
        .set_method("PUBLISH")
        .set_name("Releases")
        .set_ttl(Duration::days(1))
        .set_timezone("Europe/Berlin")?
        .add_event(release)
        .add_event(holiday);

    print!("{}", calendar.render_with(&options)?);
    Ok(())
}
