use std::fmt;
use std::sync::Arc;

use super::{Encoder, Value};
use crate::strategy::ValueFormatter;

/// Host function used by [`Wrapping::Custom`].
///
/// Receives the raw value, its formatted text, and the active encoder, and
/// returns the text to write.
pub type WrapFn = dyn Fn(&Value, &str, &Encoder) -> String + Send + Sync;

/// How a formatted value is written to the output.
#[derive(Clone, Default)]
pub enum Wrapping {
    /// Pass the formatted text through the context encoder.
    #[default]
    Encoded,

    /// Write the formatted text as-is. Used for text that is already
    /// encoded, such as the output of a nested pattern.
    Unencoded,

    /// Replace `{#}` in the template with the encoded formatted text.
    Template(String),

    /// Delegate to a host function.
    Custom(Arc<WrapFn>),
}

/// A parameter value together with its formatting hooks.
///
/// Cloning is shallow: the wrapped value, default formatter and wrapping
/// are carried over.
#[derive(Clone, Default)]
pub struct ParameterValue {
    value: Value,
    default_format: Option<Arc<dyn ValueFormatter>>,
    wrapping: Wrapping,
}

impl ParameterValue {
    /// Wrap a value with no hooks.
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            default_format: None,
            wrapping: Wrapping::Encoded,
        }
    }

    /// Wrap a value that is written without encoding.
    pub fn unencoded(value: impl Into<Value>) -> Self {
        Self::new(value).with_wrapping(Wrapping::Unencoded)
    }

    /// Wrap a value whose formatted text is spliced into `template` at `{#}`.
    pub fn wrapped(value: impl Into<Value>, template: impl Into<String>) -> Self {
        Self::new(value).with_wrapping(Wrapping::Template(template.into()))
    }

    /// Set the formatter used when a pattern references this value without a
    /// format.
    pub fn with_default_format(mut self, formatter: Arc<dyn ValueFormatter>) -> Self {
        self.default_format = Some(formatter);
        self
    }

    /// Set how the formatted value is written.
    pub fn with_wrapping(mut self, wrapping: Wrapping) -> Self {
        self.wrapping = wrapping;
        self
    }

    /// A copy of this parameter carrying a different value but the same
    /// hooks.
    pub fn with_value(&self, value: Value) -> Self {
        Self {
            value,
            default_format: self.default_format.clone(),
            wrapping: self.wrapping.clone(),
        }
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn into_value(self) -> Value {
        self.value
    }

    pub fn default_format(&self) -> Option<&Arc<dyn ValueFormatter>> {
        self.default_format.as_ref()
    }

    pub fn wrapping(&self) -> &Wrapping {
        &self.wrapping
    }

    pub fn is_null(&self) -> bool {
        self.value.is_null()
    }

    /// True if this parameter has neither a default formatter nor a
    /// non-default wrapping.
    pub fn is_plain(&self) -> bool {
        self.default_format.is_none() && matches!(self.wrapping, Wrapping::Encoded)
    }

    /// Apply the wrapping hook to formatted text.
    ///
    /// # Example
    ///
    /// ```
    /// use glot::{Encoder, ParameterValue};
    ///
    /// let value = ParameterValue::wrapped(5, "<b>{#}</b>");
    /// assert_eq!(value.wrap("5", &Encoder::Html), "<b>5</b>");
    /// assert_eq!(ParameterValue::new("<i>").wrap("<i>", &Encoder::Html), "&lt;i&gt;");
    /// ```
    pub fn wrap(&self, formatted: &str, encoder: &Encoder) -> String {
        match &self.wrapping {
            Wrapping::Encoded => encoder.encode(formatted).into_owned(),
            Wrapping::Unencoded => formatted.to_string(),
            Wrapping::Template(template) => template.replace("{#}", &encoder.encode(formatted)),
            Wrapping::Custom(f) => f(&self.value, formatted, encoder),
        }
    }
}

impl fmt::Debug for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParameterValue")
            .field("value", &self.value)
            .field(
                "default_format",
                &self.default_format.as_ref().map(|formatter| formatter.kind()),
            )
            .field("wrapping", &self.wrapping)
            .finish()
    }
}

impl fmt::Debug for Wrapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Wrapping::Encoded => f.write_str("Encoded"),
            Wrapping::Unencoded => f.write_str("Unencoded"),
            Wrapping::Template(template) => f.debug_tuple("Template").field(template).finish(),
            Wrapping::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}
