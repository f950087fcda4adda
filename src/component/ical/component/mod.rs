mod alarm;
pub use alarm::*;
mod calendar;
pub use calendar::*;
mod custom;
pub use custom::*;
mod event;
pub use event::*;
mod timezone;
pub use timezone::*;
