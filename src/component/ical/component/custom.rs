use crate::{
    component::{Component, ComponentMut},
    generator::GeneratorError,
    property::{PropertyBag, PropertyValue, is_valid_name},
};

/// A component with a caller-chosen type name, e.g. `VTODO` or `X-ACME-NOTE`.
///
/// Unlike the typed kinds it holds its properties directly; each render clones them
/// into a fresh bag.
#[derive(Debug)]
pub struct CustomComponent {
    name: String,
    properties: PropertyBag,
    components: Vec<Box<dyn Component>>,
}

impl CustomComponent {
    /// The name is fixed for the lifetime of the component.
    pub fn new(name: &str) -> Result<Self, GeneratorError> {
        if name.is_empty() {
            return Err(GeneratorError::RequiredField("component name"));
        }
        if !is_valid_name(name) {
            return Err(GeneratorError::InvalidComponentName(name.to_owned()));
        }
        Ok(Self {
            name: name.to_ascii_uppercase(),
            properties: PropertyBag::new(),
            components: Vec::new(),
        })
    }

    pub fn set(
        &mut self,
        name: &str,
        value: impl Into<PropertyValue>,
    ) -> Result<&mut Self, GeneratorError> {
        self.properties.set(name, value)?;
        Ok(self)
    }

    pub fn get_properties(&self) -> &PropertyBag {
        &self.properties
    }

    pub fn get_properties_mut(&mut self) -> &mut PropertyBag {
        &mut self.properties
    }
}

impl Component for CustomComponent {
    fn get_comp_name(&self) -> &str {
        &self.name
    }

    fn build_property_bag(&self) -> Result<PropertyBag, GeneratorError> {
        Ok(self.properties.clone())
    }

    fn get_children(&self) -> &[Box<dyn Component>] {
        &self.components
    }
}

impl ComponentMut for CustomComponent {
    fn get_children_mut(&mut self) -> &mut Vec<Box<dyn Component>> {
        &mut self.components
    }
}
