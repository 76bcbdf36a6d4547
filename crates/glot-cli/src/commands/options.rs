//! Options shared by the commands that compile patterns.

use std::sync::Arc;

use chrono::{FixedOffset, Offset, Utc};
use clap::Args;
use glot::dialect::HtmlTagTransformer;
use glot::strategy::evaluators::NAMESPACE_SEPARATOR;
use glot::{Dialect, Encoder, Engine, Language, MemorySource};
use miette::{IntoDiagnostic, Result, miette};

/// Language, time zone, grammar and lookup definitions.
#[derive(Debug, Args)]
pub struct PatternOptions {
    /// Language tag (e.g., en, de-CH). Defaults to the invariant language
    #[arg(long, env = "GLOT_LANG")]
    pub lang: Option<String>,

    /// UTC offset for dates (e.g., +02:00)
    #[arg(long, env = "GLOT_TZ")]
    pub tz: Option<String>,

    /// Read patterns as plain text without markup
    #[arg(long, conflicts_with = "html")]
    pub text: bool,

    /// Keep HTML tags in patterns and HTML-encode output
    #[arg(long)]
    pub html: bool,

    /// Patterns for @Key lookups in key=pattern format (repeatable).
    /// `ns__Key` defines Key in namespace ns
    #[arg(short = 'd', long = "define", value_parser = parse_key_val)]
    pub defines: Vec<(String, String)>,
}

impl PatternOptions {
    pub fn language(&self) -> Result<Language> {
        match &self.lang {
            Some(tag) => Language::parse(tag).into_diagnostic(),
            None => Ok(Language::invariant()),
        }
    }

    pub fn time_zone(&self) -> Result<FixedOffset> {
        match &self.tz {
            Some(tz) => tz
                .parse::<FixedOffset>()
                .map_err(|e| miette!("invalid time zone '{}': {}", tz, e)),
            None => Ok(Utc.fix()),
        }
    }

    pub fn dialect(&self) -> Dialect {
        if self.text {
            Dialect::text()
        } else if self.html {
            Dialect::standard().with_transformer(HtmlTagTransformer)
        } else {
            Dialect::standard()
        }
    }

    pub fn encoder(&self) -> Encoder {
        if self.html {
            Encoder::Html
        } else {
            Encoder::Identity
        }
    }

    /// The definitions as invariant-language patterns.
    pub fn source(&self) -> MemorySource {
        let mut source = MemorySource::new();
        for (key, pattern) in &self.defines {
            let (namespace, key) = split_key(key);
            source.insert(namespace, key, "", pattern.as_str());
        }
        source
    }

    /// An engine over the definitions with these options.
    pub fn engine(&self) -> Result<Engine> {
        Ok(Engine::builder()
            .dialect(self.dialect())
            .source(Arc::new(self.source()))
            .language(self.language()?)
            .time_zone(self.time_zone()?)
            .encoder(self.encoder())
            .build())
    }
}

/// Split `ns__Key` into namespace and key. Keys without a namespace are in
/// the default namespace.
pub fn split_key(key: &str) -> (&str, &str) {
    key.split_once(NAMESPACE_SEPARATOR).unwrap_or(("", key))
}

/// Parse a key=value string.
pub fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid format '{}': expected key=value", s))?;
    Ok((key.trim().to_string(), value.to_string()))
}
