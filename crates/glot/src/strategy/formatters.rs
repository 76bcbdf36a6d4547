//! Built-in value formatters.
//!
//! - [`RomanFormatter`]: `{N:roman}`
//! - [`CaseFormatter`]: `{Name:uc}`, `{Name:capitalize-first}`, ...
//! - [`FormatStringFormatter`]: `{Price:N2}`, `{Date:yyyy-MM-dd}`
//! - [`DefaultFormatter`]: `{Name}`

use std::any::Any;
use std::sync::Arc;

use icu_casemap::CaseMapper;
use icu_locale_core::LanguageIdentifier;
use serde::Serialize;
use unicode_segmentation::UnicodeSegmentation;

use super::ValueFormatter;
use super::format_string::{format_plain, format_with};
use crate::dialect::{BindError, Dialect, FormatterFactory};
use crate::interpreter::{EvalContext, FormatError};
use crate::types::ParameterValue;

// =========================================================================
// Roman numerals
// =========================================================================

const ROMAN_NUMERALS: &[(i64, &str)] = &[
    (1000, "M"),
    (900, "CM"),
    (500, "D"),
    (400, "CD"),
    (100, "C"),
    (90, "XC"),
    (50, "L"),
    (40, "XL"),
    (10, "X"),
    (9, "IX"),
    (5, "V"),
    (4, "IV"),
    (1, "I"),
];

/// Writes integers in `0..=3999` as Roman numerals. Zero is `N`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RomanFormatter;

impl RomanFormatter {
    pub const MIN: i64 = 0;
    pub const MAX: i64 = 3999;
}

/// Convert a number to Roman numerals.
///
/// # Example
///
/// ```
/// use glot::strategy::formatters::to_roman;
///
/// assert_eq!(to_roman(1994).unwrap(), "MCMXCIV");
/// assert_eq!(to_roman(0).unwrap(), "N");
/// assert!(to_roman(4000).is_err());
/// ```
pub fn to_roman(number: i64) -> Result<String, FormatError> {
    if !(RomanFormatter::MIN..=RomanFormatter::MAX).contains(&number) {
        return Err(FormatError::OutOfRange {
            value: number.to_string(),
            min: RomanFormatter::MIN,
            max: RomanFormatter::MAX,
        });
    }
    if number == 0 {
        return Ok("N".to_string());
    }
    let mut remaining = number;
    let mut result = String::new();
    for &(value, numeral) in ROMAN_NUMERALS {
        while remaining >= value {
            remaining -= value;
            result.push_str(numeral);
        }
    }
    Ok(result)
}

impl ValueFormatter for RomanFormatter {
    fn format(&self, value: &ParameterValue, _ctx: &EvalContext<'_>) -> Result<String, FormatError> {
        let number = value.value().as_integer().ok_or(FormatError::Unsupported {
            kind: value.value().kind(),
            expected: "roman numeral",
        })?;
        to_roman(number)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Accepts exactly `roman`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RomanFormatterFactory;

impl FormatterFactory for RomanFormatterFactory {
    fn try_resolve(
        &self,
        format: &str,
        _dialect: &Dialect,
    ) -> Result<Option<Arc<dyn ValueFormatter>>, BindError> {
        Ok((format == "roman").then(|| Arc::new(RomanFormatter) as Arc<dyn ValueFormatter>))
    }
}

// =========================================================================
// Case
// =========================================================================

/// A case transformation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CaseMode {
    Lower,
    Upper,
    /// Upper-case the first grapheme and lower-case the rest.
    CapitalizeFirst,
    /// Capitalize each space-separated word.
    CapitalizeAll,
}

impl CaseMode {
    /// Parse a case token, ignoring ASCII case.
    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "lc" | "lowercase" => Some(Self::Lower),
            "uc" | "uppercase" => Some(Self::Upper),
            "cf" | "capitalize-first" => Some(Self::CapitalizeFirst),
            "ca" | "capitalize-all" => Some(Self::CapitalizeAll),
            _ => None,
        }
    }
}

/// Changes the case of a value's text using the language's casing rules.
#[derive(Debug, Clone, Copy)]
pub struct CaseFormatter {
    mode: CaseMode,
}

impl CaseFormatter {
    pub fn new(mode: CaseMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> CaseMode {
        self.mode
    }

    /// Apply this formatter's case transformation to `text`.
    pub fn apply(&self, text: &str, language: &LanguageIdentifier) -> String {
        let mapper = CaseMapper::new();
        match self.mode {
            CaseMode::Lower => mapper.lowercase_to_string(text, language).to_string(),
            CaseMode::Upper => mapper.uppercase_to_string(text, language).to_string(),
            CaseMode::CapitalizeFirst => capitalize(text, language),
            CaseMode::CapitalizeAll => text
                .split(' ')
                .map(|word| capitalize(word, language))
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}

fn capitalize(word: &str, language: &LanguageIdentifier) -> String {
    let mapper = CaseMapper::new();
    let mut graphemes = word.graphemes(true);
    let Some(first) = graphemes.next() else {
        return String::new();
    };
    let rest = graphemes.as_str();
    let mut result = mapper.uppercase_to_string(first, language).to_string();
    result.push_str(&mapper.lowercase_to_string(rest, language));
    result
}

impl ValueFormatter for CaseFormatter {
    fn format(&self, value: &ParameterValue, ctx: &EvalContext<'_>) -> Result<String, FormatError> {
        let text = value.value().to_string();
        Ok(self.apply(&text, ctx.language().id()))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Accepts `lc`, `lowercase`, `uc`, `uppercase`, `cf`, `capitalize-first`,
/// `ca` and `capitalize-all`.
#[derive(Debug, Default, Clone, Copy)]
pub struct CaseFormatterFactory;

impl FormatterFactory for CaseFormatterFactory {
    fn try_resolve(
        &self,
        format: &str,
        _dialect: &Dialect,
    ) -> Result<Option<Arc<dyn ValueFormatter>>, BindError> {
        Ok(CaseMode::from_token(format)
            .map(|mode| Arc::new(CaseFormatter::new(mode)) as Arc<dyn ValueFormatter>))
    }
}

// =========================================================================
// Format strings
// =========================================================================

/// Formats numbers, dates and durations with a standard or custom format
/// string in the language's culture.
#[derive(Debug, Clone)]
pub struct FormatStringFormatter {
    format: String,
}

impl FormatStringFormatter {
    pub fn new(format: impl Into<String>) -> Self {
        Self {
            format: format.into(),
        }
    }

    pub fn format_string(&self) -> &str {
        &self.format
    }
}

impl ValueFormatter for FormatStringFormatter {
    fn format(&self, value: &ParameterValue, ctx: &EvalContext<'_>) -> Result<String, FormatError> {
        format_with(value.value(), &self.format, ctx.language().culture())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Accepts any non-empty format.
#[derive(Debug, Default, Clone, Copy)]
pub struct FormatStringFormatterFactory;

impl FormatterFactory for FormatStringFormatterFactory {
    fn try_resolve(
        &self,
        format: &str,
        _dialect: &Dialect,
    ) -> Result<Option<Arc<dyn ValueFormatter>>, BindError> {
        if format.is_empty() {
            return Ok(None);
        }
        Ok(Some(Arc::new(FormatStringFormatter::new(format))))
    }
}

// =========================================================================
// Default
// =========================================================================

/// Uses the value's own default formatter if it carries one, else a
/// culture-aware conversion.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultFormatter;

impl ValueFormatter for DefaultFormatter {
    fn format(&self, value: &ParameterValue, ctx: &EvalContext<'_>) -> Result<String, FormatError> {
        match value.default_format() {
            Some(formatter) if !formatter.is_default() => formatter.format(value, ctx),
            _ => Ok(format_plain(value.value(), ctx.language().culture())),
        }
    }

    fn is_default(&self) -> bool {
        true
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Accepts the empty format.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultFormatterFactory;

impl FormatterFactory for DefaultFormatterFactory {
    fn try_resolve(
        &self,
        format: &str,
        _dialect: &Dialect,
    ) -> Result<Option<Arc<dyn ValueFormatter>>, BindError> {
        Ok(format
            .is_empty()
            .then(|| Arc::new(DefaultFormatter) as Arc<dyn ValueFormatter>))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Language, ParameterSet};

    fn context(tag: &str) -> EvalContext<'static> {
        EvalContext::builder()
            .language(Language::parse(tag).unwrap())
            .parameters(ParameterSet::new())
            .build()
    }

    #[test]
    fn roman_numerals() {
        let ctx = context("en");
        let format = |n: i64| RomanFormatter.format(&ParameterValue::new(n), &ctx);
        assert_eq!(format(4).unwrap(), "IV");
        assert_eq!(format(3999).unwrap(), "MMMCMXCIX");
        assert_eq!(format(0).unwrap(), "N");
        assert_eq!(
            format(-1).unwrap_err(),
            FormatError::OutOfRange {
                value: "-1".to_string(),
                min: 0,
                max: 3999
            }
        );
    }

    #[test]
    fn case_tokens_ignore_ascii_case() {
        assert_eq!(CaseMode::from_token("UC"), Some(CaseMode::Upper));
        assert_eq!(CaseMode::from_token("Capitalize-All"), Some(CaseMode::CapitalizeAll));
        assert_eq!(CaseMode::from_token("title"), None);
    }

    #[test]
    fn capitalize_lowers_the_rest() {
        let ctx = context("en");
        let value = ParameterValue::new("hELLO wORLD");
        let first = CaseFormatter::new(CaseMode::CapitalizeFirst);
        let all = CaseFormatter::new(CaseMode::CapitalizeAll);
        assert_eq!(first.format(&value, &ctx).unwrap(), "Hello world");
        assert_eq!(all.format(&value, &ctx).unwrap(), "Hello World");
    }

    #[test]
    fn turkish_dotted_i() {
        let ctx = context("tr");
        let upper = CaseFormatter::new(CaseMode::Upper);
        assert_eq!(upper.format(&ParameterValue::new("istanbul"), &ctx).unwrap(), "İSTANBUL");
    }

    #[test]
    fn default_formatter_prefers_value_hook() {
        let ctx = context("en");
        let value = ParameterValue::new(7).with_default_format(Arc::new(RomanFormatter));
        assert_eq!(DefaultFormatter.format(&value, &ctx).unwrap(), "VII");
        assert_eq!(DefaultFormatter.format(&ParameterValue::new(7), &ctx).unwrap(), "7");
    }
}
