//! The iCalendar component kinds.
//!
//! Each kind stages its fields through setters and turns them into a property bag
//! when rendered. A calendar is built top-down:
//!
//! ```rust
//! use icalgen::component::{Calendar, Component, Event};
//!
//! let mut event = Event::new("1234@example.com")?;
//! event.set_summary("Planning");
//!
//! let mut calendar = Calendar::new("-//Example//Planner//EN")?;
//! calendar.set_name("Team").add_event(event);
//!
//! let ics = calendar.render()?;
//! assert!(ics.starts_with("BEGIN:VCALENDAR\r\nVERSION:2.0\r\n"));
//! assert!(ics.contains("BEGIN:VEVENT\r\nUID:1234@example.com\r\nSUMMARY:Planning\r\nEND:VEVENT\r\n"));
//! # Ok::<(), icalgen::generator::GeneratorError>(())
//! ```

pub mod component;
