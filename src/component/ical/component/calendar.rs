use crate::{
    component::{Component, ComponentMut, Event, Timezone},
    generator::{GeneratorError, GeneratorOptions},
    property::PropertyBag,
    types::{TypedValue, Value},
};

/// `VCALENDAR`, the root of a document.
#[derive(Debug)]
pub struct Calendar {
    prod_id: String,
    method: Option<String>,
    name: Option<String>,
    description: Option<String>,
    calscale: Option<String>,
    timezone: Option<String>,
    ttl: Option<TypedValue>,
    /// VTIMEZONE attached by `set_timezone`, rendered before `components`
    timezone_definition: Option<Timezone>,
    components: Vec<Box<dyn Component>>,
}

impl Calendar {
    /// Fails with [`GeneratorError::RequiredField`] if `prod_id` is empty.
    pub fn new(prod_id: impl Into<String>) -> Result<Self, GeneratorError> {
        let prod_id = prod_id.into();
        if prod_id.is_empty() {
            return Err(GeneratorError::RequiredField("PRODID"));
        }

        Ok(Self {
            prod_id,
            method: None,
            name: None,
            description: None,
            calscale: None,
            timezone: None,
            ttl: None,
            timezone_definition: None,
            components: Vec::new(),
        })
    }

    pub fn get_prod_id(&self) -> &str {
        &self.prod_id
    }

    pub fn get_timezone(&self) -> Option<&str> {
        self.timezone.as_deref()
    }

    /// The `VTIMEZONE` attached by [`Self::set_timezone`]. It is kept apart from
    /// [`Component::get_children`] and always rendered as the first child.
    pub fn get_timezone_definition(&self) -> Option<&Timezone> {
        self.timezone_definition.as_ref()
    }

    pub fn set_method(&mut self, method: impl Into<String>) -> &mut Self {
        self.method = Some(method.into());
        self
    }

    /// Display name, written as `X-WR-CALNAME`.
    pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = Some(name.into());
        self
    }

    /// Written as `X-WR-CALDESC`.
    pub fn set_description(&mut self, description: impl Into<String>) -> &mut Self {
        self.description = Some(description.into());
        self
    }

    pub fn set_calscale(&mut self, calscale: impl Into<String>) -> &mut Self {
        self.calscale = Some(calscale.into());
        self
    }

    /// Set the calendar timezone.
    ///
    /// Besides `X-WR-TIMEZONE` this attaches a `VTIMEZONE` child for `tzid`. Calling
    /// it again replaces that child instead of adding a second one. Children added
    /// through [`ComponentMut`] are never affected.
    pub fn set_timezone(&mut self, tzid: impl Into<String>) -> Result<&mut Self, GeneratorError> {
        let timezone = Timezone::new(tzid)?;
        Ok(self.set_timezone_definition(timezone))
    }

    /// Like [`Self::set_timezone`], with a fully specified `VTIMEZONE`.
    pub fn set_timezone_definition(&mut self, timezone: Timezone) -> &mut Self {
        self.timezone = Some(timezone.get_tzid().to_owned());
        if let Some(previous) = self.timezone_definition.replace(timezone) {
            tracing::debug!(
                tzid = previous.get_tzid(),
                "replacing previously attached VTIMEZONE"
            );
        }
        self
    }

    /// Published refresh interval, written as `X-PUBLISHED-TTL` and
    /// `REFRESH-INTERVAL`.
    pub fn set_ttl(&mut self, ttl: impl Value) -> &mut Self {
        self.ttl = Some(ttl.to_typed());
        self
    }

    pub fn add_event(&mut self, event: Event) -> &mut Self {
        self.add_component(event)
    }
}

impl Component for Calendar {
    fn get_comp_name(&self) -> &str {
        "VCALENDAR"
    }

    fn build_property_bag(&self) -> Result<PropertyBag, GeneratorError> {
        let mut properties = PropertyBag::new();
        properties.set("VERSION", "2.0")?;
        properties.set("PRODID", self.prod_id.as_str())?;
        properties.set_optional("CALSCALE", self.calscale.as_deref())?;
        properties.set_optional("METHOD", self.method.as_deref())?;
        properties.set_optional("X-WR-CALNAME", self.name.as_deref())?;
        properties.set_optional("X-WR-CALDESC", self.description.as_deref())?;
        properties.set_optional("X-WR-TIMEZONE", self.timezone.as_deref())?;
        if let Some(ttl) = &self.ttl
            && !ttl.value.is_empty()
        {
            properties.set("X-PUBLISHED-TTL", ttl.value.clone())?;
            properties.set("REFRESH-INTERVAL;VALUE=DURATION", ttl.value.clone())?;
        }
        Ok(properties)
    }

    fn get_children(&self) -> &[Box<dyn Component>] {
        &self.components
    }

    fn write_children(
        &self,
        out: &mut String,
        options: &GeneratorOptions,
    ) -> Result<(), GeneratorError> {
        if let Some(timezone) = &self.timezone_definition {
            timezone.write_to(out, options)?;
        }
        for child in &self.components {
            child.write_to(out, options)?;
        }
        Ok(())
    }
}

impl ComponentMut for Calendar {
    fn get_children_mut(&mut self) -> &mut Vec<Box<dyn Component>> {
        &mut self.components
    }
}
