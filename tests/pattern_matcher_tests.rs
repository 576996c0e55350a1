use voxnav::nlu::patterns::{adjust_confidence, normalize};
use voxnav::nlu::{ActionResolver, ElementSelectorRegistry, PatternMatcher, PatternRule};

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

fn matcher() -> PatternMatcher {
    PatternMatcher::portuguese().expect("default catalog must compile")
}

#[test]
fn test_scroll_down() {
    let m = matcher().find("rolar para baixo").expect("should match");
    assert_eq!(m.intent, "navegar");
    let (action, target) = ActionResolver::new().resolve(&m.intent, &m.groups, "rolar para baixo");
    assert_eq!(action, "scroll_down");
    assert_eq!(target, None);
    assert!(approx(m.confidence, 0.8));
}

#[test]
fn test_normalization() {
    assert_eq!(normalize("  AJUDA  "), "ajuda");
    let m = matcher().find("  AJUDA  ").expect("should match");
    assert_eq!(m.intent, "ajuda");
}

#[test]
fn test_no_match() {
    assert!(matcher().find("qualquer coisa sem sentido").is_none());
    assert!(matcher().find("").is_none());
    assert!(matcher().find("    ").is_none());
}

#[test]
fn test_length_adjustment() {
    // < 10 chars boosts, > 20 chars penalizes, in between untouched.
    assert!(approx(adjust_confidence(0.8, "voltar"), 0.88));
    assert!(approx(adjust_confidence(0.8, "rolar para baixo"), 0.8));
    assert!(approx(adjust_confidence(0.9, "ir para o menu principal"), 0.81));
    // Exactly 10 and exactly 20 characters are not adjusted.
    assert!(approx(adjust_confidence(0.8, "ler página"), 0.8));
    assert!(approx(adjust_confidence(0.8, "scroll para esquerda"), 0.8));
}

#[test]
fn test_length_counts_characters_not_bytes() {
    // "lê texto" is 8 characters but 9 bytes.
    assert!(approx(adjust_confidence(0.9, "lê texto"), 0.99));
}

#[test]
fn test_confidence_clamped_to_one() {
    let rule = PatternRule::new("teste", r"ok", 1.0).unwrap();
    let m = PatternMatcher::with_rules(vec![rule]).find("ok").expect("should match");
    assert_eq!(m.confidence, 1.0, "short utterance boost must be clamped to 1.0");
}

#[test]
fn test_best_match_is_global_across_groups() {
    let rules = vec![
        PatternRule::new("first", r"abrir", 0.7).unwrap(),
        PatternRule::new("second", r"abrir menu", 0.8).unwrap(),
    ];
    let m = PatternMatcher::with_rules(rules).find("abrir menu").unwrap();
    assert_eq!(m.intent, "second", "higher confidence in a later group must win");
}

#[test]
fn test_tie_keeps_first_rule() {
    let rules = vec![
        PatternRule::new("first", r"abrir", 0.8).unwrap(),
        PatternRule::new("second", r"menu", 0.8).unwrap(),
    ];
    let m = PatternMatcher::with_rules(rules).find("abrir menu").unwrap();
    assert_eq!(m.intent, "first");
}

#[test]
fn test_every_fixture_confidence_in_range() {
    let fixtures = [
        "rolar para baixo",
        "clicar no botão número 3",
        "ler página",
        "ajuda",
        "voltar",
        "fechar",
        "lê texto",
        "número 5",
        "aumentar zoom",
        "ir para o menu principal",
        "subir para o topo da página",
    ];
    let m = matcher();
    for f in fixtures {
        let found = m.find(f).unwrap_or_else(|| panic!("fixture {:?} should match", f));
        assert!(
            (0.0..=1.0).contains(&found.confidence),
            "confidence out of range for {:?}: {}",
            f,
            found.confidence
        );
    }
}

#[test]
fn test_click_captures_target() {
    let m = matcher().find("clicar no botão número 3").unwrap();
    assert_eq!(m.intent, "clicar");
    assert_eq!(m.first_group(), Some("botão número 3"));
    assert!(approx(m.confidence, 0.81));
}

#[test]
fn test_click_index_when_no_group() {
    let resolver = ActionResolver::new();
    let (action, target) = resolver.resolve("clicar", &[], "clicar no botão número 3");
    assert_eq!(action, "click");
    assert_eq!(target.as_deref(), Some("index_3"));

    let (_, target) = resolver.resolve("clicar", &[None], "selecionar índice 12");
    assert_eq!(target.as_deref(), Some("index_12"));

    let (_, target) = resolver.resolve("clicar", &[], "clicar");
    assert_eq!(target, None);
}

#[test]
fn test_read_page() {
    let m = matcher().find("ler página").unwrap();
    assert_eq!(m.intent, "ler");
    let (action, target) = ActionResolver::new().resolve(&m.intent, &m.groups, "ler página");
    assert_eq!(action, "read");
    assert_eq!(target.as_deref(), Some("page_content"));
}

#[test]
fn test_read_element() {
    let resolver = ActionResolver::new();
    let (action, target) = resolver.resolve("ler", &[Some("título".to_string())], "ler o título");
    assert_eq!(action, "read");
    assert_eq!(target.as_deref(), Some("título"));

    let (_, target) = resolver.resolve("ler", &[], "lê");
    assert_eq!(target.as_deref(), Some("page_content"));
}

#[test]
fn test_navigation_actions() {
    let resolver = ActionResolver::new();
    let cases = [
        ("rolar para cima", "scroll_up"),
        ("scroll para esquerda", "scroll_left"),
        ("rolar para direita", "scroll_right"),
        ("rolar", "scroll_down"),
        ("próximo elemento", "navigate_next"),
        ("anterior item", "navigate_previous"),
    ];
    for (text, expected) in cases {
        let (action, target) = resolver.resolve("navegar", &[], text);
        assert_eq!(action, expected, "for {:?}", text);
        assert_eq!(target, None);
    }

    let (action, target) = resolver.resolve("navegar", &[Some("menu principal".to_string())], "ir para o menu principal");
    assert_eq!(action, "navigate_to");
    assert_eq!(target.as_deref(), Some("menu principal"));
}

#[test]
fn test_system_actions() {
    let resolver = ActionResolver::new();
    assert_eq!(resolver.resolve("ajuda", &[], "ajuda"), ("show_help".to_string(), None));
    assert_eq!(resolver.resolve("voltar", &[], "voltar"), ("go_back".to_string(), None));
    assert_eq!(resolver.resolve("zoom", &[], "aumentar zoom").0, "zoom_in");
    assert_eq!(resolver.resolve("zoom", &[], "maior texto").0, "zoom_in");
    assert_eq!(resolver.resolve("zoom", &[], "diminuir zoom").0, "zoom_out");
}

#[test]
fn test_unknown_intent_passes_through() {
    let (action, target) = ActionResolver::new().resolve("abrir", &[Some("menu".to_string())], "abrir menu");
    assert_eq!(action, "abrir");
    assert_eq!(target.as_deref(), Some("menu"));
}

#[test]
fn test_selector_lookup() {
    let registry = ElementSelectorRegistry::new();
    assert_eq!(registry.lookup("link"), "a[href], [role='link']");
    assert_eq!(registry.lookup("nao-existe"), "*");
}

#[test]
fn test_selector_list_is_a_copy() {
    let registry = ElementSelectorRegistry::new();
    let mut all = registry.list_all();
    assert_eq!(all.len(), 12);
    all.insert("botão".to_string(), "div".to_string());
    all.remove("link");
    assert_ne!(registry.lookup("botão"), "div", "registry must not change through the copy");
    assert_eq!(registry.lookup("link"), "a[href], [role='link']");
}
