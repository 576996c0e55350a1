use tracing::debug;

use super::types::{clamp_confidence, PatternMatch, PatternRule};

const LONG_UTTERANCE_CHARS: usize = 20;
const SHORT_UTTERANCE_CHARS: usize = 10;
const LONG_PENALTY: f32 = 0.9;
const SHORT_BOOST: f32 = 1.1;

/// Default Portuguese catalog, grouped by intent in evaluation order.
const CATALOG: &[(&str, &[(&str, f32)])] = &[
    ("navegar", &[
        (r"(?:ir para|navegar para|mover para|descer para|subir para)\s+(?:o\s+)?(.+)", 0.9),
        (r"(?:rolar|scroll)\s+(?:para\s+)?(?:baixo|cima|esquerda|direita)", 0.8),
        (r"(?:próximo|anterior)\s+(?:elemento|item|link|botão)", 0.8),
        (r"(?:primeiro|último)\s+(?:elemento|item|link|botão)", 0.8),
    ]),
    ("clicar", &[
        (r"(?:clicar|clique|pressionar|ativar|selecionar)\s+(?:em|no|na)\s+(.+)", 0.9),
        (r"(?:botão|link|elemento)\s+(.+)", 0.7),
        (r"(?:número|índice)\s+(\d+)", 0.8),
    ]),
    ("ler", &[
        (r"(?:ler|lê|dizer|falar)\s+(?:o\s+)?(.+)", 0.9),
        (r"(?:o que é|que é|descrever)\s+(.+)", 0.8),
        (r"(?:ler|lê)\s+(?:página|conteúdo|texto)", 0.8),
    ]),
    ("ajuda", &[
        (r"(?:ajuda|comandos|o que posso dizer|instruções)", 0.9),
        (r"(?:como usar|como funciona|tutorial)", 0.8),
    ]),
    ("voltar", &[
        (r"(?:voltar|retroceder|página anterior)", 0.9),
        (r"(?:fechar|sair|cancelar)", 0.8),
    ]),
    ("zoom", &[
        (r"(?:aumentar|diminuir)\s+(?:zoom|tamanho|fonte)", 0.8),
        (r"(?:maior|menor)\s+(?:texto|fonte)", 0.7),
    ]),
];

/// Lowercase and trim, the form every rule is written against.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Length-based confidence adjustment, clamped to 1.0.
pub fn adjust_confidence(base: f32, normalized: &str) -> f32 {
    let len = normalized.chars().count();
    let adjusted = if len > LONG_UTTERANCE_CHARS {
        base * LONG_PENALTY
    } else if len < SHORT_UTTERANCE_CHARS {
        base * SHORT_BOOST
    } else {
        base
    };
    clamp_confidence(adjusted)
}

/// Ordered rule catalog. Read-only after construction, safe to share.
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    rules: Vec<PatternRule>,
}

impl PatternMatcher {
    pub fn portuguese() -> Result<Self, regex::Error> {
        let mut rules = Vec::new();
        for (intent, patterns) in CATALOG {
            for (pattern, base) in *patterns {
                rules.push(PatternRule::new(intent, pattern, *base)?);
            }
        }
        Ok(Self { rules })
    }

    pub fn with_rules(rules: Vec<PatternRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[PatternRule] {
        &self.rules
    }

    /// Scans the whole catalog and keeps the rule with the strictly highest
    /// adjusted confidence. Ties keep the earlier rule.
    pub fn find(&self, utterance: &str) -> Option<PatternMatch> {
        let text = normalize(utterance);
        if text.is_empty() {
            return None;
        }

        let mut best: Option<PatternMatch> = None;
        let mut highest = 0.0_f32;

        for rule in &self.rules {
            let Some(caps) = rule.regex.captures(&text) else {
                continue;
            };
            let confidence = adjust_confidence(rule.base_confidence, &text);
            if confidence > highest {
                highest = confidence;
                let groups = caps
                    .iter()
                    .skip(1)
                    .map(|g| g.map(|m| m.as_str().trim().to_string()).filter(|s| !s.is_empty()))
                    .collect();
                best = Some(PatternMatch {
                    intent: rule.intent.clone(),
                    pattern: rule.regex.as_str().to_string(),
                    groups,
                    confidence,
                });
            }
        }

        if let Some(m) = &best {
            debug!(intent = %m.intent, confidence = m.confidence, "pattern matched");
        }
        best
    }
}
