use derive_more::Display;

use crate::{
    component::{Alarm, Component, ComponentMut},
    generator::GeneratorError,
    property::{PropertyBag, PropertyValue},
    types::{TypedValue, Uri, Value},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum EventStatus {
    #[display("TENTATIVE")]
    Tentative,
    #[display("CONFIRMED")]
    Confirmed,
    #[display("CANCELLED")]
    Cancelled,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display)]
pub enum Transparency {
    #[default]
    #[display("OPAQUE")]
    Opaque,
    #[display("TRANSPARENT")]
    Transparent,
}

macro_rules! text_value {
    ($($ty:ty),*) => {
        $(impl Value for $ty {
            fn value_type(&self) -> &'static str {
                "TEXT"
            }

            fn value(&self) -> PropertyValue {
                PropertyValue::Text(self.to_string())
            }
        })*
    };
}

text_value!(EventStatus, Transparency);

/// `VEVENT`
///
/// Dates are staged through the [`Value`] contract, so `set_dtstart` accepts a
/// `NaiveDate` for all-day events as well as a `DateTime<Utc>`.
#[derive(Debug)]
pub struct Event {
    uid: String,
    dtstamp: Option<TypedValue>,
    created: Option<TypedValue>,
    last_modified: Option<TypedValue>,
    sequence: Option<u32>,
    dtstart: Option<TypedValue>,
    dtend: Option<TypedValue>,
    duration: Option<TypedValue>,
    summary: Option<String>,
    description: Option<String>,
    location: Option<String>,
    url: Option<Uri>,
    status: Option<EventStatus>,
    transparency: Option<Transparency>,
    components: Vec<Box<dyn Component>>,
}

impl Event {
    /// Fails with [`GeneratorError::RequiredField`] if `uid` is empty.
    pub fn new(uid: impl Into<String>) -> Result<Self, GeneratorError> {
        let uid = uid.into();
        if uid.is_empty() {
            return Err(GeneratorError::RequiredField("UID"));
        }
        Ok(Self {
            uid,
            dtstamp: None,
            created: None,
            last_modified: None,
            sequence: None,
            dtstart: None,
            dtend: None,
            duration: None,
            summary: None,
            description: None,
            location: None,
            url: None,
            status: None,
            transparency: None,
            components: Vec::new(),
        })
    }

    pub fn get_uid(&self) -> &str {
        &self.uid
    }

    pub fn set_dtstamp(&mut self, dtstamp: impl Value) -> &mut Self {
        self.dtstamp = Some(dtstamp.to_typed());
        self
    }

    pub fn set_created(&mut self, created: impl Value) -> &mut Self {
        self.created = Some(created.to_typed());
        self
    }

    pub fn set_last_modified(&mut self, last_modified: impl Value) -> &mut Self {
        self.last_modified = Some(last_modified.to_typed());
        self
    }

    pub fn set_sequence(&mut self, sequence: u32) -> &mut Self {
        self.sequence = Some(sequence);
        self
    }

    pub fn set_dtstart(&mut self, dtstart: impl Value) -> &mut Self {
        self.dtstart = Some(dtstart.to_typed());
        self
    }

    pub fn set_dtend(&mut self, dtend: impl Value) -> &mut Self {
        self.dtend = Some(dtend.to_typed());
        self
    }

    pub fn set_duration(&mut self, duration: impl Value) -> &mut Self {
        self.duration = Some(duration.to_typed());
        self
    }

    pub fn set_summary(&mut self, summary: impl Into<String>) -> &mut Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn set_description(&mut self, description: impl Into<String>) -> &mut Self {
        self.description = Some(description.into());
        self
    }

    pub fn set_location(&mut self, location: impl Into<String>) -> &mut Self {
        self.location = Some(location.into());
        self
    }

    pub fn set_url(&mut self, url: impl Into<String>) -> &mut Self {
        self.url = Some(Uri(url.into()));
        self
    }

    pub fn set_status(&mut self, status: EventStatus) -> &mut Self {
        self.status = Some(status);
        self
    }

    pub fn set_transparency(&mut self, transparency: Transparency) -> &mut Self {
        self.transparency = Some(transparency);
        self
    }

    pub fn add_alarm(&mut self, alarm: Alarm) -> &mut Self {
        self.add_component(alarm)
    }
}

impl Component for Event {
    fn get_comp_name(&self) -> &str {
        "VEVENT"
    }

    fn build_property_bag(&self) -> Result<PropertyBag, GeneratorError> {
        let mut properties = PropertyBag::new();
        properties.set("UID", self.uid.as_str())?;
        properties.set_value_optional("DTSTAMP", "DATE-TIME", self.dtstamp.as_ref())?;
        properties.set_value_optional("CREATED", "DATE-TIME", self.created.as_ref())?;
        properties.set_value_optional("LAST-MODIFIED", "DATE-TIME", self.last_modified.as_ref())?;
        properties.set_value_optional("SEQUENCE", "INTEGER", self.sequence.as_ref())?;
        properties.set_value_optional("DTSTART", "DATE-TIME", self.dtstart.as_ref())?;
        properties.set_value_optional("DTEND", "DATE-TIME", self.dtend.as_ref())?;
        properties.set_value_optional("DURATION", "DURATION", self.duration.as_ref())?;
        properties.set_optional("SUMMARY", self.summary.as_deref())?;
        properties.set_optional("DESCRIPTION", self.description.as_deref())?;
        properties.set_optional("LOCATION", self.location.as_deref())?;
        properties.set_value_optional("URL", "URI", self.url.as_ref())?;
        properties.set_value_optional("STATUS", "TEXT", self.status.as_ref())?;
        properties.set_value_optional("TRANSP", "TEXT", self.transparency.as_ref())?;
        Ok(properties)
    }

    fn get_children(&self) -> &[Box<dyn Component>] {
        &self.components
    }
}

impl ComponentMut for Event {
    fn get_children_mut(&mut self) -> &mut Vec<Box<dyn Component>> {
        &mut self.components
    }
}
