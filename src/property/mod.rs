//! The ordered property bag of a component.
//!
//! Keys are unique within a bag, ignoring the case of names and parameter keys.
//! Setting a key again replaces the whole line but keeps its position, so the output
//! order is the order in which keys were first set.
//!
//! # Examples
//!
//! ```rust
//! use icalgen::generator::Emitter;
//! use icalgen::property::PropertyBag;
//!
//! let mut bag = PropertyBag::new();
//! bag.set("VERSION", "2.0")?
//!     .set("X-WR-CALNAME", "Work, Home")?;
//!
//! assert_eq!(bag.generate(), "VERSION:2.0\r\nX-WR-CALNAME:Work\\, Home\r\n");
//! # Ok::<(), icalgen::generator::GeneratorError>(())
//! ```

mod content_line;
pub use content_line::{ContentLine, ContentLineParams, PropertyValue};
pub(crate) use content_line::is_valid_name;

use crate::generator::{Emitter, GeneratorError, GeneratorOptions, fold_line};
use crate::types::Value;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyBag {
    lines: Vec<ContentLine>,
}

impl PropertyBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a content line, replacing the one with the same name and parameters.
    pub fn insert(&mut self, line: ContentLine) -> Result<&mut Self, GeneratorError> {
        line.validate()?;
        if let Some(existing) = self.lines.iter_mut().find(|l| l.same_key(&line)) {
            tracing::debug!(property = %line.key(), "overwriting property");
            *existing = line;
        } else {
            self.lines.push(line);
        }
        Ok(self)
    }

    /// Set `name` to `value`. Parameters can be part of the name
    /// (`REFRESH-INTERVAL;VALUE=DURATION`).
    pub fn set(
        &mut self,
        name: &str,
        value: impl Into<PropertyValue>,
    ) -> Result<&mut Self, GeneratorError> {
        self.insert(ContentLine::new(name, value)?)
    }

    /// Like [`Self::set`], but does nothing for `None` or an empty value.
    pub fn set_optional<V: Into<PropertyValue>>(
        &mut self,
        name: &str,
        value: Option<V>,
    ) -> Result<&mut Self, GeneratorError> {
        match value.map(Into::into) {
            Some(value) if !value.is_empty() => self.set(name, value),
            _ => Ok(self),
        }
    }

    /// Set a typed value. A `VALUE` parameter is added if the type of the value
    /// differs from the default type of the property.
    pub fn set_value(
        &mut self,
        name: &str,
        default_type: &str,
        value: &(impl Value + ?Sized),
    ) -> Result<&mut Self, GeneratorError> {
        self.set_typed(name, default_type, value.value_type(), value.value())
    }

    /// Like [`Self::set_value`], but does nothing for `None` or an empty value.
    pub fn set_value_optional(
        &mut self,
        name: &str,
        default_type: &str,
        value: Option<&(impl Value + ?Sized)>,
    ) -> Result<&mut Self, GeneratorError> {
        let Some(value) = value else {
            return Ok(self);
        };
        let converted = value.value();
        if converted.is_empty() {
            return Ok(self);
        }
        self.set_typed(name, default_type, value.value_type(), converted)
    }

    fn set_typed(
        &mut self,
        name: &str,
        default_type: &str,
        value_type: &str,
        value: PropertyValue,
    ) -> Result<&mut Self, GeneratorError> {
        let mut line = ContentLine::new(name, value)?;
        if value_type != default_type {
            line.params
                .replace_param("VALUE".to_owned(), value_type.to_owned());
        }
        self.insert(line)
    }

    /// First line with the given name, regardless of its parameters.
    pub fn get(&self, name: &str) -> Option<&ContentLine> {
        self.lines
            .iter()
            .find(|line| line.name.eq_ignore_ascii_case(name))
    }

    /// Remove every line with the given name.
    pub fn remove(&mut self, name: &str) {
        self.lines
            .retain(|line| !line.name.eq_ignore_ascii_case(name));
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ContentLine> {
        self.lines.iter()
    }

    pub(crate) fn write_to(&self, out: &mut String, options: &GeneratorOptions) {
        for line in &self.lines {
            fold_line(&line.to_string(), options.folding, out);
        }
    }
}

impl<'a> IntoIterator for &'a PropertyBag {
    type Item = &'a ContentLine;
    type IntoIter = std::slice::Iter<'a, ContentLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Emitter for PropertyBag {
    fn generate_with(&self, options: &GeneratorOptions) -> String {
        let mut out = String::new();
        self.write_to(&mut out, options);
        out
    }
}
