use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// String encoding applied to literal text and formatted values on output.
///
/// Values marked unencoded bypass it.
#[derive(Clone, Default)]
pub enum Encoder {
    /// Writes text unchanged.
    #[default]
    Identity,

    /// Escapes `& < > " '` for HTML output.
    Html,

    /// A host-supplied encoding function.
    Custom(Arc<dyn Fn(&str) -> String + Send + Sync>),
}

impl Encoder {
    /// Encode a piece of output text.
    ///
    /// # Example
    ///
    /// ```
    /// use glot::Encoder;
    ///
    /// assert_eq!(Encoder::Html.encode("a < b"), "a &lt; b");
    /// assert_eq!(Encoder::Identity.encode("a < b"), "a < b");
    /// ```
    pub fn encode<'a>(&self, text: &'a str) -> Cow<'a, str> {
        match self {
            Encoder::Identity => Cow::Borrowed(text),
            Encoder::Html => html_escape(text),
            Encoder::Custom(f) => Cow::Owned(f(text)),
        }
    }

    /// Returns true if this encoder leaves text unchanged.
    pub fn is_identity(&self) -> bool {
        matches!(self, Encoder::Identity)
    }
}

impl fmt::Debug for Encoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Encoder::Identity => f.write_str("Identity"),
            Encoder::Html => f.write_str("Html"),
            Encoder::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

fn html_escape(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    Cow::Owned(out)
}
