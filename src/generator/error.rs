#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GeneratorError {
    #[error("missing required field: {0}")]
    RequiredField(&'static str),
    #[error("invalid property: {0}")]
    InvalidProperty(String),
    #[error("invalid component name: {0:?}")]
    InvalidComponentName(String),
}
