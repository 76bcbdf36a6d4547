//! CLDR plural categories for plural keyword conditions.
//!
//! Rules are cached per thread per language, built lazily on first use.

use std::cell::RefCell;

use icu_locale_core::locale;
use icu_plurals::{PluralCategory, PluralRuleType, PluralRules};

/// Language subtags with their own rules. Others use English rules.
const SUPPORTED_LANGUAGES: &[&str] = &[
    "ar", "cs", "da", "de", "en", "es", "fr", "it", "ja", "nl", "pl", "pt", "ru", "sv", "uk",
];

thread_local! {
    static PLURAL_RULES_CACHE: RefCell<Vec<(&'static str, PluralRules)>> = const { RefCell::new(Vec::new()) };
}

fn normalize_language(language: &str) -> &'static str {
    SUPPORTED_LANGUAGES
        .iter()
        .find(|&&code| code.eq_ignore_ascii_case(language))
        .copied()
        .unwrap_or("en")
}

fn build_rules(language: &'static str) -> PluralRules {
    let locale = match language {
        "ar" => locale!("ar"),
        "cs" => locale!("cs"),
        "da" => locale!("da"),
        "de" => locale!("de"),
        "es" => locale!("es"),
        "fr" => locale!("fr"),
        "it" => locale!("it"),
        "ja" => locale!("ja"),
        "nl" => locale!("nl"),
        "pl" => locale!("pl"),
        "pt" => locale!("pt"),
        "ru" => locale!("ru"),
        "sv" => locale!("sv"),
        "uk" => locale!("uk"),
        _ => locale!("en"),
    };
    PluralRules::try_new(locale.into(), PluralRuleType::Cardinal.into())
        .expect("locale should be supported")
}

/// The keyword for a plural category.
pub(crate) fn category_name(category: PluralCategory) -> &'static str {
    match category {
        PluralCategory::Zero => "zero",
        PluralCategory::One => "one",
        PluralCategory::Two => "two",
        PluralCategory::Few => "few",
        PluralCategory::Many => "many",
        PluralCategory::Other => "other",
    }
}

/// The CLDR cardinal plural category of `n` in a language.
///
/// `language` is a language subtag such as `en` or `ru`.
pub(crate) fn plural_category(language: &str, n: i64) -> &'static str {
    let language = normalize_language(language);
    PLURAL_RULES_CACHE.with_borrow_mut(|cache| {
        if let Some((_, rules)) = cache.iter().find(|(code, _)| *code == language) {
            return category_name(rules.category_for(n));
        }
        let rules = build_rules(language);
        let category = category_name(rules.category_for(n));
        cache.push((language, rules));
        category
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_follow_language_rules() {
        assert_eq!(plural_category("en", 1), "one");
        assert_eq!(plural_category("en", 2), "other");
        assert_eq!(plural_category("ru", 3), "few");
        assert_eq!(plural_category("ru", 5), "many");
        assert_eq!(plural_category("ar", 0), "zero");
        assert_eq!(plural_category("xx", 1), "one");
    }
}
