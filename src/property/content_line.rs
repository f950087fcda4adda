//! A single property as it is written to the output.
//!
//! A content line has:
//! - A name, written as given. Names compare case-insensitively.
//! - An ordered list of parameters, each a key with one or more values.
//! - A value, either TEXT which gets escaped or an already formatted value which is
//!   written as-is.
//!
//! Property keys may carry their parameters inline (`REFRESH-INTERVAL;VALUE=DURATION`),
//! those are split apart by [`ContentLine::parse_key`].

use derive_more::From;
use itertools::Itertools;
use std::borrow::Cow;
use std::fmt;

use crate::generator::{Emitter, GeneratorError, GeneratorOptions, escape_text, fold_line};
use crate::{
    PARAM_DELIMITER, PARAM_NAME_DELIMITER, PARAM_QUOTE, PARAM_VALUE_DELIMITER, VALUE_DELIMITER,
};

/// The value of a content line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PropertyValue {
    /// Free text, escaped on output.
    Text(String),
    /// A value that already is in its RFC 5545 form (DATE-TIME, DURATION, RECUR, ...).
    /// Must not contain control characters other than HTAB.
    Formatted(String),
}

impl PropertyValue {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text(text) | Self::Formatted(text) => text,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.as_str().is_empty()
    }

    /// The value as it appears on the wire, before folding.
    pub fn output(&self) -> Cow<'_, str> {
        match self {
            Self::Text(text) => escape_text(text),
            Self::Formatted(value) => Cow::Borrowed(value),
        }
    }
}

impl Default for PropertyValue {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<&String> for PropertyValue {
    fn from(value: &String) -> Self {
        Self::Text(value.to_owned())
    }
}

#[derive(Debug, Clone, Default, Eq, PartialEq, Hash, From)]
pub struct ContentLineParams(pub(crate) Vec<(String, Vec<String>)>);

impl ContentLineParams {
    #[inline]
    pub fn get_param(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .and_then(|(_, value)| value.iter().map(String::as_ref).next())
    }

    #[inline]
    pub fn get_value_type(&self) -> Option<&str> {
        self.get_param("VALUE")
    }

    pub fn replace_param(&mut self, name: String, value: String) {
        if let Some(pos) = self.0.iter().position(|(n, _)| n.eq_ignore_ascii_case(&name)) {
            self.0[pos] = (name, vec![value]);
        } else {
            self.0.push((name, vec![value]));
        }
    }

    #[inline]
    pub fn remove(&mut self, name: &str) {
        self.0.retain(|(n, _)| !n.eq_ignore_ascii_case(name));
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(key, values)| (key.as_str(), values.as_slice()))
    }
}

impl fmt::Display for ContentLineParams {
    /// `;KEY=VALUE,VALUE` for every parameter, quoting values where needed.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (key, values) in &self.0 {
            let values = values.iter().map(|value| {
                if value.contains([VALUE_DELIMITER, PARAM_DELIMITER, PARAM_VALUE_DELIMITER]) {
                    Cow::Owned(format!("{PARAM_QUOTE}{value}{PARAM_QUOTE}"))
                } else {
                    Cow::Borrowed(value.as_str())
                }
            });
            write!(
                f,
                "{PARAM_DELIMITER}{key}{PARAM_NAME_DELIMITER}{}",
                values.format(&PARAM_VALUE_DELIMITER.to_string())
            )?;
        }
        Ok(())
    }
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-'
}

pub(crate) fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(is_name_char)
}

/// An iCalendar property.
#[derive(Debug, Clone, Default, Eq, PartialEq, Hash)]
pub struct ContentLine {
    /// Property name.
    pub name: String,
    /// Property list of parameters.
    pub params: ContentLineParams,
    /// Property value.
    pub value: PropertyValue,
}

impl ContentLine {
    pub fn new(name: &str, value: impl Into<PropertyValue>) -> Result<Self, GeneratorError> {
        let (name, params) = Self::parse_key(name)?;
        let line = Self {
            name,
            params,
            value: value.into(),
        };
        line.validate()?;
        Ok(line)
    }

    /// Split `NAME;KEY=VALUE;...` into the name and its parameters.
    pub fn parse_key(key: &str) -> Result<(String, ContentLineParams), GeneratorError> {
        let invalid = || GeneratorError::InvalidProperty(key.to_owned());

        let (name, mut to_parse) = match key.find(PARAM_DELIMITER) {
            Some(pos) => key.split_at(pos),
            None => (key, ""),
        };
        if name.is_empty() {
            return Err(GeneratorError::InvalidProperty(
                "empty property name".to_owned(),
            ));
        }

        let mut params = vec![];
        while to_parse.starts_with(PARAM_DELIMITER) {
            to_parse = &to_parse[1..];

            let Some((param_key, remainder)) = to_parse.split_once(PARAM_NAME_DELIMITER) else {
                return Err(invalid());
            };
            if param_key.is_empty() {
                return Err(invalid());
            }
            to_parse = remainder;

            let mut values = Vec::with_capacity(1);
            loop {
                if let Some(quoted) = to_parse.strip_prefix(PARAM_QUOTE) {
                    let Some((content, remainder)) = quoted.split_once(PARAM_QUOTE) else {
                        return Err(invalid());
                    };
                    values.push(content.to_owned());
                    to_parse = remainder;
                } else {
                    let end = to_parse
                        .find([PARAM_DELIMITER, PARAM_VALUE_DELIMITER])
                        .unwrap_or(to_parse.len());
                    let (content, remainder) = to_parse.split_at(end);
                    values.push(content.to_owned());
                    to_parse = remainder;
                }

                let Some(remainder) = to_parse.strip_prefix(PARAM_VALUE_DELIMITER) else {
                    break;
                };
                to_parse = remainder;
            }

            params.push((param_key.to_owned(), values));
        }

        if !to_parse.is_empty() {
            return Err(invalid());
        }

        Ok((name.to_owned(), params.into()))
    }

    /// Check that writing this line cannot break the surrounding document.
    pub fn validate(&self) -> Result<(), GeneratorError> {
        if self.name.is_empty() {
            return Err(GeneratorError::InvalidProperty(
                "empty property name".to_owned(),
            ));
        }
        if !is_valid_name(&self.name) {
            return Err(GeneratorError::InvalidProperty(self.name.clone()));
        }

        for (key, values) in self.params.iter() {
            if !is_valid_name(key) {
                return Err(GeneratorError::InvalidProperty(format!(
                    "{}: invalid parameter {key:?}",
                    self.name
                )));
            }
            if let Some(value) = values
                .iter()
                .find(|value| value.contains(|c: char| c == PARAM_QUOTE || c.is_control()))
            {
                return Err(GeneratorError::InvalidProperty(format!(
                    "{}: invalid value {value:?} for parameter {key}",
                    self.name
                )));
            }
        }

        let allowed: fn(char) -> bool = match self.value {
            PropertyValue::Text(_) => |c: char| matches!(c, '\t' | '\r' | '\n'),
            PropertyValue::Formatted(_) => |c: char| c == '\t',
        };
        if self
            .value
            .as_str()
            .contains(|c: char| c.is_control() && !allowed(c))
        {
            return Err(GeneratorError::InvalidProperty(format!(
                "{}: control character in value",
                self.name
            )));
        }

        Ok(())
    }

    /// Name and parameters, the part in front of the value delimiter.
    pub fn key(&self) -> String {
        format!("{}{}", self.name, self.params)
    }

    /// Same name and parameters, ignoring the case of names and parameter keys.
    pub(crate) fn same_key(&self, other: &Self) -> bool {
        self.name.eq_ignore_ascii_case(&other.name)
            && self.params.0.len() == other.params.0.len()
            && self
                .params
                .iter()
                .zip(other.params.iter())
                .all(|((key, values), (other_key, other_values))| {
                    key.eq_ignore_ascii_case(other_key) && values == other_values
                })
    }
}

impl fmt::Display for ContentLine {
    /// The unfolded logical line, without line ending.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}{}{VALUE_DELIMITER}{}",
            self.name,
            self.params,
            self.value.output()
        )
    }
}

impl Emitter for ContentLine {
    fn generate_with(&self, options: &GeneratorOptions) -> String {
        let mut out = String::new();
        fold_line(&self.to_string(), options.folding, &mut out);
        out
    }
}
