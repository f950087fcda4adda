use chrono::{FixedOffset, NaiveDateTime};
use derive_more::Display;

use crate::{
    component::{Component, ComponentMut},
    generator::GeneratorError,
    property::PropertyBag,
    types::{Recurrence, TypedValue, Value},
};

/// `VTIMEZONE`
///
/// Without rules this only names the timezone, which is what
/// [`Calendar::set_timezone`](crate::component::Calendar::set_timezone) attaches.
#[derive(Debug)]
pub struct Timezone {
    tzid: String,
    lic_location: Option<String>,
    last_modified: Option<TypedValue>,
    components: Vec<Box<dyn Component>>,
}

impl Timezone {
    /// Fails with [`GeneratorError::RequiredField`] if `tzid` is empty.
    pub fn new(tzid: impl Into<String>) -> Result<Self, GeneratorError> {
        let tzid = tzid.into();
        if tzid.is_empty() {
            return Err(GeneratorError::RequiredField("TZID"));
        }
        Ok(Self {
            tzid,
            lic_location: None,
            last_modified: None,
            components: Vec::new(),
        })
    }

    pub fn get_tzid(&self) -> &str {
        &self.tzid
    }

    /// This is a common property containing a timezone identifier from the IANA TZDB
    pub fn set_lic_location(&mut self, location: impl Into<String>) -> &mut Self {
        self.lic_location = Some(location.into());
        self
    }

    pub fn set_last_modified(&mut self, last_modified: impl Value) -> &mut Self {
        self.last_modified = Some(last_modified.to_typed());
        self
    }

    pub fn add_rule(&mut self, rule: TimezoneRule) -> &mut Self {
        self.add_component(rule)
    }
}

impl Component for Timezone {
    fn get_comp_name(&self) -> &str {
        "VTIMEZONE"
    }

    fn build_property_bag(&self) -> Result<PropertyBag, GeneratorError> {
        let mut properties = PropertyBag::new();
        properties.set("TZID", self.tzid.as_str())?;
        properties.set_optional("X-LIC-LOCATION", self.lic_location.as_deref())?;
        properties.set_value_optional("LAST-MODIFIED", "DATE-TIME", self.last_modified.as_ref())?;
        Ok(properties)
    }

    fn get_children(&self) -> &[Box<dyn Component>] {
        &self.components
    }
}

impl ComponentMut for Timezone {
    fn get_children_mut(&mut self) -> &mut Vec<Box<dyn Component>> {
        &mut self.components
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display)]
pub enum TimezoneRuleType {
    #[default]
    #[display("STANDARD")]
    Standard,
    #[display("DAYLIGHT")]
    Daylight,
}

/// `STANDARD` or `DAYLIGHT` sub-component of a [`Timezone`].
#[derive(Debug, Clone)]
pub struct TimezoneRule {
    pub transition: TimezoneRuleType,
    dtstart: NaiveDateTime,
    offset_from: FixedOffset,
    offset_to: FixedOffset,
    tzname: Option<String>,
    rrule: Option<Recurrence>,
}

impl TimezoneRule {
    /// `dtstart` is the local time at which the rule starts applying.
    pub fn new(
        transition: TimezoneRuleType,
        dtstart: NaiveDateTime,
        offset_from: FixedOffset,
        offset_to: FixedOffset,
    ) -> Self {
        Self {
            transition,
            dtstart,
            offset_from,
            offset_to,
            tzname: None,
            rrule: None,
        }
    }

    pub fn set_tzname(&mut self, tzname: impl Into<String>) -> &mut Self {
        self.tzname = Some(tzname.into());
        self
    }

    pub fn set_rrule(&mut self, rrule: impl Into<Recurrence>) -> &mut Self {
        self.rrule = Some(rrule.into());
        self
    }
}

impl Component for TimezoneRule {
    fn get_comp_name(&self) -> &str {
        match self.transition {
            TimezoneRuleType::Standard => "STANDARD",
            TimezoneRuleType::Daylight => "DAYLIGHT",
        }
    }

    fn build_property_bag(&self) -> Result<PropertyBag, GeneratorError> {
        let mut properties = PropertyBag::new();
        properties.set_value("DTSTART", "DATE-TIME", &self.dtstart)?;
        properties.set_value("TZOFFSETFROM", "UTC-OFFSET", &self.offset_from)?;
        properties.set_value("TZOFFSETTO", "UTC-OFFSET", &self.offset_to)?;
        properties.set_optional("TZNAME", self.tzname.as_deref())?;
        properties.set_value_optional("RRULE", "RECUR", self.rrule.as_ref())?;
        Ok(properties)
    }
}
