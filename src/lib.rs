//! Generate iCalendar (RFC 5545) documents.
//!
//! A document is a tree of [`component::Component`]s. Every component turns its
//! fields into a [`property::PropertyBag`] when rendered, which is then written as
//! escaped, folded content lines terminated by CRLF.

const VALUE_DELIMITER: char = ':';
const PARAM_DELIMITER: char = ';';
const PARAM_NAME_DELIMITER: char = '=';
const PARAM_VALUE_DELIMITER: char = ',';
const PARAM_QUOTE: char = '"';
const CRLF: &str = "\r\n";

/// Maximum length of a physical line in octets, excluding the CRLF.
pub const FOLD_LIMIT: usize = 75;

pub mod component;
pub use component::{Component, ComponentMut};
pub use component::ical::component::*;

pub mod generator;
pub use generator::{Emitter, GeneratorError, GeneratorOptions};

pub mod property;
pub use property::{ContentLine, PropertyBag, PropertyValue};

pub mod types;
