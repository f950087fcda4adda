pub mod ical;
pub use ical::component::*;

use crate::generator::{GeneratorError, GeneratorOptions, fold_line};
use crate::property::PropertyBag;
use std::fmt;

/// A node of the calendar tree.
///
/// Implementors keep their fields staged and only turn them into properties in
/// [`Component::build_property_bag`], which runs once per render. Rendering never
/// mutates the component, so a finished tree can be rendered from several threads.
pub trait Component: fmt::Debug + Send + Sync {
    /// Type name used in `BEGIN:` and `END:`.
    fn get_comp_name(&self) -> &str;

    /// A fresh property bag reflecting the current fields.
    fn build_property_bag(&self) -> Result<PropertyBag, GeneratorError>;

    fn get_children(&self) -> &[Box<dyn Component>] {
        &[]
    }

    fn render(&self) -> Result<String, GeneratorError> {
        self.render_with(&GeneratorOptions::default())
    }

    fn render_with(&self, options: &GeneratorOptions) -> Result<String, GeneratorError> {
        let mut out = String::new();
        self.write_to(&mut out, options)?;
        Ok(out)
    }

    /// Append the rendered children to `out`. Components owning children outside of
    /// [`Component::get_children`] write them here as well.
    fn write_children(
        &self,
        out: &mut String,
        options: &GeneratorOptions,
    ) -> Result<(), GeneratorError> {
        for child in self.get_children() {
            child.write_to(out, options)?;
        }
        Ok(())
    }

    /// Append the rendered component to `out`.
    ///
    /// On error `out` may hold a partial component; [`Component::render`] discards it.
    fn write_to(&self, out: &mut String, options: &GeneratorOptions) -> Result<(), GeneratorError> {
        let compname = self.get_comp_name();
        let properties = self.build_property_bag()?;
        tracing::trace!(
            component = compname,
            properties = properties.len(),
            children = self.get_children().len(),
            "rendering component"
        );

        fold_line(&format!("BEGIN:{compname}"), options.folding, out);
        properties.write_to(out, options);
        self.write_children(out, options)?;
        fold_line(&format!("END:{compname}"), options.folding, out);
        Ok(())
    }
}

/// Components that accept arbitrary children.
pub trait ComponentMut: Component {
    fn get_children_mut(&mut self) -> &mut Vec<Box<dyn Component>>;

    /// Append `child` after the existing children.
    fn add_component<C: Component + 'static>(&mut self, child: C) -> &mut Self
    where
        Self: Sized,
    {
        self.get_children_mut().push(Box::new(child));
        self
    }
}
