use super::types::first_group;

const PAGE_CONTENT: &str = "page_content";
const PAGE_WORDS: &[&str] = &["página", "pagina", "conteúdo", "conteudo", "texto", "tela"];
const ARTICLES: &[&str] = &["a ", "o ", "esta ", "este ", "essa ", "esse "];

/// Maps a matched intent to a concrete `(action, target)` pair.
#[derive(Debug, Clone, Default)]
pub struct ActionResolver;

impl ActionResolver {
    pub fn new() -> Self {
        Self
    }

    /// `text` must already be normalized.
    pub fn resolve(&self, intent: &str, groups: &[Option<String>], text: &str) -> (String, Option<String>) {
        let group = first_group(groups).map(str::to_string);

        match intent {
            "navegar" => {
                if text.contains("rolar") || text.contains("scroll") {
                    (scroll_direction(text).to_string(), None)
                } else if text.contains("próximo") {
                    ("navigate_next".to_string(), None)
                } else if text.contains("anterior") {
                    ("navigate_previous".to_string(), None)
                } else {
                    ("navigate_to".to_string(), group)
                }
            }
            "clicar" => {
                let target = group.or_else(|| {
                    if text.contains("número") || text.contains("índice") {
                        first_number(text).map(|n| format!("index_{}", n))
                    } else {
                        None
                    }
                });
                ("click".to_string(), target)
            }
            "ler" => {
                let target = match group {
                    Some(g) if is_page_reference(&g) => PAGE_CONTENT.to_string(),
                    Some(g) => g,
                    None => PAGE_CONTENT.to_string(),
                };
                ("read".to_string(), Some(target))
            }
            "ajuda" => ("show_help".to_string(), None),
            "voltar" => ("go_back".to_string(), None),
            "zoom" => {
                let action = if text.contains("aumentar") || text.contains("maior") {
                    "zoom_in"
                } else {
                    "zoom_out"
                };
                (action.to_string(), None)
            }
            other => (other.to_string(), group),
        }
    }
}

fn scroll_direction(text: &str) -> &'static str {
    if text.contains("baixo") {
        "scroll_down"
    } else if text.contains("cima") {
        "scroll_up"
    } else if text.contains("esquerda") {
        "scroll_left"
    } else if text.contains("direita") {
        "scroll_right"
    } else {
        "scroll_down"
    }
}

fn first_number(text: &str) -> Option<&str> {
    text.split(|c: char| !c.is_ascii_digit()).find(|s| !s.is_empty())
}

/// "página", "a página", "o conteúdo" and friends all mean the whole page.
fn is_page_reference(group: &str) -> bool {
    let mut word = group.trim();
    for article in ARTICLES {
        if let Some(rest) = word.strip_prefix(article) {
            word = rest.trim();
            break;
        }
    }
    PAGE_WORDS.contains(&word)
}
