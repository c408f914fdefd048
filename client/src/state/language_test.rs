use super::*;
use authflow::flags::MemoryStore;

#[test]
fn defaults_to_english_when_nothing_stored() {
    let store = MemoryStore::new();
    assert_eq!(Language::load(&store), Language::En);
}

#[test]
fn saved_choice_survives_reload() {
    let store = MemoryStore::new();
    Language::Hi.save(&store);
    assert_eq!(store.get(LANGUAGE_KEY).as_deref(), Some("hi"));
    assert_eq!(Language::load(&store), Language::Hi);
}

#[test]
fn unknown_stored_value_falls_back_to_english() {
    let store = MemoryStore::new();
    store.set(LANGUAGE_KEY, "fr");
    assert_eq!(Language::load(&store), Language::En);
}

#[test]
fn toggle_flips_between_the_two() {
    assert_eq!(Language::En.toggled(), Language::Hi);
    assert_eq!(Language::Hi.toggled().toggled(), Language::Hi);
}

#[test]
fn labels_follow_language() {
    assert_eq!(Language::En.label(Label::Dashboard), "Dashboard");
    assert_eq!(Language::Hi.label(Label::Logout), "लॉगआउट");
    assert_eq!(Language::En.toggle_caption(), "हिंदी");
}
