//! Suffix-rule inflection for dictionary flags.
//!
//! Best effort only: enough to accept the common regular forms of a word
//! listed in the dictionary, not a morphological analyser.

/// Regular plural: `city` to `cities`, `box` to `boxes`, `car` to `cars`.
pub fn pluralize(word: &str) -> String {
    if let Some(stem) = word.strip_suffix('y') {
        return format!("{}ies", stem);
    }

    if ["s", "x", "z", "ch", "sh"].iter().any(|s| word.ends_with(s)) {
        return format!("{}es", word);
    }

    format!("{}s", word)
}

/// Regular past tense.
pub fn past_tense(word: &str) -> String {
    if word.ends_with('e') {
        return format!("{}d", word);
    }

    if let Some(stem) = word.strip_suffix('y') {
        return format!("{}ied", stem);
    }

    format!("{}ed", word)
}

/// `-ing` form, dropping a final silent `e`.
pub fn present_participle(word: &str) -> String {
    match word.strip_suffix('e') {
        Some(stem) if !stem.ends_with('e') => format!("{}ing", stem),
        _ => format!("{}ing", word),
    }
}

/// `-er` form of an adjective.
pub fn comparative(word: &str) -> String {
    if let Some(stem) = word.strip_suffix('y') {
        return format!("{}ier", stem);
    }

    if word.ends_with('e') {
        return format!("{}r", word);
    }

    if word.chars().count() > 1 {
        return format!("{}er", word);
    }

    word.to_string()
}

/// Forms generated for `word` by a dictionary flag string: `S` plural,
/// `V` past tense and present participle, `A` comparative. Unknown flags are
/// ignored.
pub fn word_forms(word: &str, flags: &str) -> Vec<String> {
    let mut forms = Vec::new();

    if flags.contains('S') {
        forms.push(pluralize(word));
    }

    if flags.contains('V') {
        forms.push(past_tense(word));
        forms.push(present_participle(word));
    }

    if flags.contains('A') {
        forms.push(comparative(word));
    }

    forms
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plurals() {
        assert_eq!(pluralize("city"), "cities");
        assert_eq!(pluralize("box"), "boxes");
        assert_eq!(pluralize("church"), "churches");
        assert_eq!(pluralize("dish"), "dishes");
        assert_eq!(pluralize("bus"), "buses");
        assert_eq!(pluralize("fox"), "foxes");
        assert_eq!(pluralize("word"), "words");
    }

    #[test]
    fn verbs() {
        assert_eq!(past_tense("bake"), "baked");
        assert_eq!(past_tense("carry"), "carried");
        assert_eq!(past_tense("walk"), "walked");

        assert_eq!(present_participle("bake"), "baking");
        assert_eq!(present_participle("see"), "seeing");
        assert_eq!(present_participle("walk"), "walking");
    }

    #[test]
    fn comparatives() {
        assert_eq!(comparative("happy"), "happier");
        assert_eq!(comparative("nice"), "nicer");
        assert_eq!(comparative("fast"), "faster");
        assert_eq!(comparative("a"), "a");
    }

    #[test]
    fn flags() {
        assert_eq!(word_forms("walk", ""), Vec::<String>::new());
        assert_eq!(
            word_forms("walk", "SV"),
            vec!["walks", "walked", "walking"]
        );
        assert_eq!(word_forms("quick", "A"), vec!["quicker"]);
        assert_eq!(word_forms("quick", "xyz"), Vec::<String>::new());
    }
}
