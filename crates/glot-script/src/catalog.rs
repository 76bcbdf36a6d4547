use std::fmt;
use std::sync::Arc;

use bon::Builder;
use glot::strategy::evaluators::NAMESPACE_SEPARATOR;
use glot::{CompiledPattern, Dialect, Language, PatternLookup};

use crate::ScriptError;
use crate::writer::string_literal;

/// A compiled pattern stored under a namespace and key.
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    pub namespace: String,
    pub key: String,
    pub pattern: Arc<CompiledPattern>,
}

/// The patterns written into one generated script.
///
/// # Example
///
/// ```
/// use glot::Dialect;
/// use glot_script::{Catalog, ScriptGenerator};
///
/// let mut catalog = Catalog::builder().name("texts").include_runtime(false).build();
/// catalog.compile(&Dialect::standard(), "", "Hello", "Hello {Name}").unwrap();
///
/// let mut script = String::new();
/// let missing = ScriptGenerator::standard().write_catalog(&catalog, &mut script).unwrap();
/// assert!(missing.is_empty());
/// assert!(script.starts_with("var texts=new Glot.TextManager("));
/// ```
#[derive(Builder)]
#[builder(on(String, into))]
pub struct Catalog<'a> {
    /// The JavaScript variable the text manager is assigned to.
    name: String,

    /// Entries in this namespace are keyed without a namespace prefix.
    #[builder(default)]
    namespace: String,

    #[builder(default)]
    language: Language,

    lookup: Option<&'a dyn PatternLookup>,

    /// Whether the text manager HTML-encodes output.
    #[builder(default = true)]
    encode: bool,

    /// Whether to write the runtime before the catalog.
    #[builder(default = true)]
    include_runtime: bool,

    #[builder(default)]
    entries: Vec<CatalogEntry>,
}

impl Catalog<'_> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn language(&self) -> &Language {
        &self.language
    }

    pub fn lookup(&self) -> Option<&dyn PatternLookup> {
        self.lookup
    }

    pub fn encode(&self) -> bool {
        self.encode
    }

    pub fn include_runtime(&self) -> bool {
        self.include_runtime
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn insert(&mut self, namespace: &str, key: &str, pattern: Arc<CompiledPattern>) {
        self.entries.push(CatalogEntry {
            namespace: namespace.to_string(),
            key: key.to_string(),
            pattern,
        });
    }

    /// Compile `pattern` with `dialect` and add it.
    pub fn compile(
        &mut self,
        dialect: &Dialect,
        namespace: &str,
        key: &str,
        pattern: &str,
    ) -> Result<(), ScriptError> {
        let compiled = dialect.compile(pattern).map_err(|source| ScriptError::Compile {
            key: format!("{namespace}/{key}"),
            source,
        })?;
        self.insert(namespace, key, Arc::new(compiled));
        Ok(())
    }

    /// The key an entry is stored under in the text manager.
    pub(crate) fn qualified_key(&self, entry: &CatalogEntry) -> String {
        if entry.namespace == self.namespace {
            entry.key.clone()
        } else {
            format!("{}{NAMESPACE_SEPARATOR}{}", entry.namespace, entry.key)
        }
    }

    /// The object literal of number conventions the runtime formats with.
    pub(crate) fn culture(&self) -> String {
        let culture = self.language.culture();
        let name = if self.language.is_invariant() {
            String::new()
        } else {
            self.language.tag()
        };
        format!(
            "{{\"name\":{},\"decimal\":{},\"group\":{}}}",
            string_literal(&name),
            string_literal(culture.decimal_separator),
            string_literal(culture.group_separator)
        )
    }
}

impl fmt::Debug for Catalog<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Catalog")
            .field("name", &self.name)
            .field("namespace", &self.namespace)
            .field("language", &self.language)
            .field("lookup", &self.lookup.is_some())
            .field("encode", &self.encode)
            .field("include_runtime", &self.include_runtime)
            .field("entries", &self.entries)
            .finish()
    }
}
