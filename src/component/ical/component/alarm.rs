use derive_more::Display;

use crate::{
    component::{Component, ComponentMut},
    generator::GeneratorError,
    property::{PropertyBag, PropertyValue},
    types::{TypedValue, Value},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum AlarmAction {
    #[display("AUDIO")]
    Audio,
    #[display("DISPLAY")]
    Display,
    #[display("EMAIL")]
    Email,
}

impl Value for AlarmAction {
    fn value_type(&self) -> &'static str {
        "TEXT"
    }

    fn value(&self) -> PropertyValue {
        PropertyValue::Text(self.to_string())
    }
}

/// `VALARM`
#[derive(Debug)]
pub struct Alarm {
    action: AlarmAction,
    trigger: TypedValue,
    description: Option<String>,
    summary: Option<String>,
    repeat: Option<u32>,
    duration: Option<TypedValue>,
    components: Vec<Box<dyn Component>>,
}

impl Alarm {
    /// `trigger` is usually a duration relative to the start of the parent event,
    /// an absolute `DateTime<Utc>` gets written with `VALUE=DATE-TIME`.
    pub fn new(action: AlarmAction, trigger: impl Value) -> Self {
        Self {
            action,
            trigger: trigger.to_typed(),
            description: None,
            summary: None,
            repeat: None,
            duration: None,
            components: Vec::new(),
        }
    }

    pub fn set_description(&mut self, description: impl Into<String>) -> &mut Self {
        self.description = Some(description.into());
        self
    }

    pub fn set_summary(&mut self, summary: impl Into<String>) -> &mut Self {
        self.summary = Some(summary.into());
        self
    }

    /// Repeat `repeat` more times, `duration` apart.
    pub fn set_repeat(&mut self, repeat: u32, duration: impl Value) -> &mut Self {
        self.repeat = Some(repeat);
        self.duration = Some(duration.to_typed());
        self
    }
}

impl Component for Alarm {
    fn get_comp_name(&self) -> &str {
        "VALARM"
    }

    fn build_property_bag(&self) -> Result<PropertyBag, GeneratorError> {
        let mut properties = PropertyBag::new();
        properties.set_value("ACTION", "TEXT", &self.action)?;
        properties.set_value("TRIGGER", "DURATION", &self.trigger)?;
        properties.set_optional("DESCRIPTION", self.description.as_deref())?;
        properties.set_optional("SUMMARY", self.summary.as_deref())?;
        properties.set_value_optional("REPEAT", "INTEGER", self.repeat.as_ref())?;
        properties.set_value_optional("DURATION", "DURATION", self.duration.as_ref())?;
        Ok(properties)
    }

    fn get_children(&self) -> &[Box<dyn Component>] {
        &self.components
    }
}

impl ComponentMut for Alarm {
    fn get_children_mut(&mut self) -> &mut Vec<Box<dyn Component>> {
        &mut self.components
    }
}
