use std::collections::BTreeMap;

pub const WILDCARD: &str = "*";

const SELECTORS: &[(&str, &str)] = &[
    ("botão", "button, [role='button'], input[type='button'], input[type='submit']"),
    ("link", "a[href], [role='link']"),
    ("campo", "input, textarea, select, [role='textbox'], [role='combobox']"),
    ("cabeçalho", "h1, h2, h3, h4, h5, h6, [role='heading']"),
    ("lista", "ul, ol, [role='list']"),
    ("item_lista", "li, [role='listitem']"),
    ("tabela", "table, [role='table']"),
    ("navegação", "nav, [role='navigation']"),
    ("main", "main, [role='main']"),
    ("complementar", "aside, [role='complementary']"),
    ("banner", "header, [role='banner']"),
    ("rodapé", "footer, [role='contentinfo']"),
];

/// Semantic element names to CSS queries for the UI dispatch layer.
#[derive(Debug, Clone)]
pub struct ElementSelectorRegistry {
    selectors: BTreeMap<String, String>,
}

impl ElementSelectorRegistry {
    pub fn new() -> Self {
        Self {
            selectors: SELECTORS
                .iter()
                .map(|(name, query)| (name.to_string(), query.to_string()))
                .collect(),
        }
    }

    /// Unknown element types fall back to the universal selector.
    pub fn lookup(&self, element_type: &str) -> &str {
        self.selectors
            .get(element_type)
            .map(String::as_str)
            .unwrap_or(WILDCARD)
    }

    /// Owned copy; changes to it never reach the registry.
    pub fn list_all(&self) -> BTreeMap<String, String> {
        self.selectors.clone()
    }
}

impl Default for ElementSelectorRegistry {
    fn default() -> Self {
        Self::new()
    }
}
