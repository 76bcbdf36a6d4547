use std::fmt;

use icu_locale_core::LanguageIdentifier;
use thiserror::Error;

/// An error parsing a language tag.
#[derive(Debug, Error)]
#[error("invalid language tag '{tag}'")]
pub struct LanguageError {
    pub tag: String,
}

/// Number and date conventions for a language.
///
/// Date and time patterns use the custom format syntax accepted by format
/// strings (`yyyy`, `MM`, `dd`, `HH`, `tt`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Culture {
    pub decimal_separator: &'static str,
    pub group_separator: &'static str,
    pub short_date: &'static str,
    pub long_date: &'static str,
    pub short_time: &'static str,
    pub long_time: &'static str,
    /// Text between a number and its percent sign.
    pub percent_spacing: &'static str,
}

const INVARIANT: Culture = Culture {
    decimal_separator: ".",
    group_separator: ",",
    short_date: "MM/dd/yyyy",
    long_date: "dddd, dd MMMM yyyy",
    short_time: "HH:mm",
    long_time: "HH:mm:ss",
    percent_spacing: " ",
};

/// Cultures keyed by language subtag, then by `language-REGION`.
const CULTURES: &[(&str, Culture)] = &[
    (
        "en",
        Culture {
            decimal_separator: ".",
            group_separator: ",",
            short_date: "M/d/yyyy",
            long_date: "dddd, MMMM d, yyyy",
            short_time: "h:mm tt",
            long_time: "h:mm:ss tt",
            percent_spacing: "",
        },
    ),
    (
        "en-GB",
        Culture {
            decimal_separator: ".",
            group_separator: ",",
            short_date: "dd/MM/yyyy",
            long_date: "dd MMMM yyyy",
            short_time: "HH:mm",
            long_time: "HH:mm:ss",
            percent_spacing: "",
        },
    ),
    (
        "da",
        Culture {
            decimal_separator: ",",
            group_separator: ".",
            short_date: "dd-MM-yyyy",
            long_date: "d. MMMM yyyy",
            short_time: "HH:mm",
            long_time: "HH:mm:ss",
            percent_spacing: " ",
        },
    ),
    (
        "de",
        Culture {
            decimal_separator: ",",
            group_separator: ".",
            short_date: "dd.MM.yyyy",
            long_date: "dddd, d. MMMM yyyy",
            short_time: "HH:mm",
            long_time: "HH:mm:ss",
            percent_spacing: " ",
        },
    ),
    (
        "es",
        Culture {
            decimal_separator: ",",
            group_separator: ".",
            short_date: "dd/MM/yyyy",
            long_date: "dddd, d 'de' MMMM 'de' yyyy",
            short_time: "H:mm",
            long_time: "H:mm:ss",
            percent_spacing: " ",
        },
    ),
    (
        "fr",
        Culture {
            decimal_separator: ",",
            group_separator: "\u{202f}",
            short_date: "dd/MM/yyyy",
            long_date: "dddd d MMMM yyyy",
            short_time: "HH:mm",
            long_time: "HH:mm:ss",
            percent_spacing: "\u{a0}",
        },
    ),
    (
        "nl",
        Culture {
            decimal_separator: ",",
            group_separator: ".",
            short_date: "d-M-yyyy",
            long_date: "dddd d MMMM yyyy",
            short_time: "HH:mm",
            long_time: "HH:mm:ss",
            percent_spacing: " ",
        },
    ),
    (
        "sv",
        Culture {
            decimal_separator: ",",
            group_separator: "\u{a0}",
            short_date: "yyyy-MM-dd",
            long_date: "'den' d MMMM yyyy",
            short_time: "HH:mm",
            long_time: "HH:mm:ss",
            percent_spacing: "\u{a0}",
        },
    ),
];

/// The language a pattern is evaluated in.
///
/// Carries the parsed locale identity plus an explicit fallback chain. The
/// chain always ends with the parent language (for `de-CH`, that is `de`)
/// followed by any fallbacks added with [`Language::with_fallback`].
///
/// # Example
///
/// ```
/// use glot::Language;
///
/// let lang = Language::parse("de-CH").unwrap();
/// assert_eq!(lang.tag(), "de-CH");
/// assert_eq!(lang.chain(), vec!["de-CH".to_string(), "de".to_string()]);
/// assert_eq!(lang.culture().decimal_separator, ",");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Language {
    id: LanguageIdentifier,
    fallbacks: Vec<Language>,
}

impl Language {
    /// Parse a BCP-47 language tag.
    pub fn parse(tag: &str) -> Result<Self, LanguageError> {
        let id = tag
            .parse::<LanguageIdentifier>()
            .map_err(|_| LanguageError {
                tag: tag.to_string(),
            })?;
        Ok(Self::from_id(id))
    }

    pub fn from_id(id: LanguageIdentifier) -> Self {
        Self {
            id,
            fallbacks: Vec::new(),
        }
    }

    /// The root language, with culture-invariant conventions.
    pub fn invariant() -> Self {
        Self::from_id(LanguageIdentifier::UNKNOWN)
    }

    /// Add a language to search after this one and its parent.
    pub fn with_fallback(mut self, fallback: Language) -> Self {
        self.fallbacks.push(fallback);
        self
    }

    pub fn id(&self) -> &LanguageIdentifier {
        &self.id
    }

    /// The canonical tag, e.g. `en-US`.
    pub fn tag(&self) -> String {
        self.id.to_string()
    }

    /// The language subtag, e.g. `en`.
    pub fn language(&self) -> &str {
        self.id.language.as_str()
    }

    pub fn is_invariant(&self) -> bool {
        self.id == LanguageIdentifier::UNKNOWN
    }

    /// Tags to try, most specific first.
    pub fn chain(&self) -> Vec<String> {
        let mut chain = vec![self.tag()];
        if self.id.region.is_some() || self.id.script.is_some() {
            chain.push(self.language().to_string());
        }
        for fallback in &self.fallbacks {
            for tag in fallback.chain() {
                if !chain.contains(&tag) {
                    chain.push(tag);
                }
            }
        }
        chain
    }

    /// Number and date conventions, found along the fallback chain.
    pub fn culture(&self) -> &'static Culture {
        self.chain()
            .iter()
            .find_map(|tag| {
                CULTURES
                    .iter()
                    .find(|(code, _)| code.eq_ignore_ascii_case(tag))
                    .map(|(_, culture)| culture)
            })
            .unwrap_or(&INVARIANT)
    }
}

impl Default for Language {
    fn default() -> Self {
        Self::invariant()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_specific_culture_wins_over_language() {
        let gb = Language::parse("en-GB").unwrap();
        assert_eq!(gb.culture().short_date, "dd/MM/yyyy");
        let us = Language::parse("en-US").unwrap();
        assert_eq!(us.culture().short_date, "M/d/yyyy");
    }

    #[test]
    fn unknown_language_is_invariant() {
        let lang = Language::parse("xx").unwrap();
        assert_eq!(lang.culture(), &INVARIANT);
        assert!(Language::invariant().is_invariant());
    }

    #[test]
    fn explicit_fallbacks_follow_parent() {
        let lang = Language::parse("nn-NO")
            .unwrap()
            .with_fallback(Language::parse("da").unwrap());
        assert_eq!(lang.chain(), vec!["nn-NO", "nn", "da"]);
        assert_eq!(lang.culture().decimal_separator, ",");
    }
}
