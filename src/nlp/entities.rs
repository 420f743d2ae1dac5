use std::collections::BTreeSet;

use crate::models::Entity;

/// Titles that introduce a person name. Matched case-insensitively with any
/// trailing period already stripped by the tokenizer.
const HONORIFICS: &[&str] = &[
    "mr", "mrs", "ms", "miss", "dr", "prof", "professor", "sir", "president", "senator",
    "captain", "judge",
];

/// Suffix words marking an organization name.
const ORG_SUFFIXES: &[&str] = &[
    "inc", "corp", "corporation", "ltd", "llc", "company", "co", "group", "institute",
    "university", "college", "bank", "agency", "association", "foundation",
];

/// Small gazetteer of geo-political names, lowercased. Multi-word names are
/// stored joined with single spaces.
const GPE_NAMES: &[&str] = &[
    "africa", "america", "amsterdam", "asia", "athens", "australia", "austria", "beijing",
    "berlin", "boston", "brazil", "brussels", "cairo", "california", "canada", "chicago",
    "china", "denmark", "dublin", "egypt", "england", "europe", "france", "germany", "greece",
    "india", "ireland", "israel", "italy", "japan", "kenya", "lisbon", "london", "los angeles",
    "madrid", "mexico", "moscow", "mumbai", "new york", "nigeria", "norway", "oslo", "paris",
    "poland", "portugal", "prague", "rome", "russia", "san francisco", "scotland", "seattle",
    "seoul", "shanghai", "singapore", "spain", "stockholm", "sweden", "switzerland", "sydney",
    "texas", "tokyo", "toronto", "turkey", "ukraine", "vienna", "warsaw", "washington",
];

/// Words that outrank capitalization when tagging, keyed lowercased.
const DETERMINERS: &[&str] = &["a", "an", "the", "this", "that", "these", "those"];
const PREPOSITIONS: &[&str] = &[
    "about", "above", "across", "after", "against", "at", "before", "behind", "below", "between",
    "by", "down", "during", "for", "from", "in", "into", "near", "of", "off", "on", "onto",
    "out", "over", "through", "to", "toward", "under", "until", "up", "upon", "with", "without",
];
const PRONOUNS: &[&str] = &[
    "he", "her", "hers", "him", "his", "i", "it", "its", "me", "mine", "my", "our", "ours",
    "she", "their", "theirs", "them", "they", "us", "we", "you", "your", "yours",
];
const CONJUNCTIONS: &[&str] = &["and", "but", "nor", "or", "so", "yet"];
const AUXILIARIES: &[&str] = &[
    "am", "are", "be", "been", "being", "can", "could", "did", "do", "does", "had", "has",
    "have", "is", "may", "might", "must", "should", "was", "were", "will", "would",
];

/// Extract named entities from segment text.
///
/// The text is split into sentences, each sentence is tokenized and tagged
/// with a part-of-speech label, and contiguous proper-noun tokens are
/// chunked into entity fragments. Fragment words joined with single spaces
/// form the entity name; the fragment class is the entity type. Pairs are
/// collected into a set, so the same mention in several sentences appears
/// once. The returned vector is sorted by `(name, type)` for deterministic
/// output.
pub fn extract_entities(text: &str) -> Vec<Entity> {
    let mut entities: BTreeSet<Entity> = BTreeSet::new();

    for sentence in split_sentences(text) {
        let tokens = tokenize(&sentence);
        let tagged = pos_tag(&tokens);
        chunk_entities(&tagged, &mut entities);
    }

    entities.into_iter().collect()
}

/// Split text into sentences at `.`, `!` and `?`, keeping honorific periods
/// ("Dr.", "Mrs.") inside their sentence.
fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();

    for ch in text.chars() {
        current.push(ch);
        if matches!(ch, '.' | '!' | '?') && !(ch == '.' && ends_with_honorific(&current)) {
            let trimmed = current.trim();
            if !trimmed.is_empty() {
                sentences.push(trimmed.to_string());
            }
            current.clear();
        }
    }
    let trimmed = current.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_string());
    }

    sentences
}

/// True when the text (including a trailing period) ends with an honorific
/// abbreviation like "Dr." or "Mrs.".
fn ends_with_honorific(text: &str) -> bool {
    let before_period = &text[..text.len() - 1];
    let last_word: String = before_period
        .chars()
        .rev()
        .take_while(|c| c.is_alphabetic())
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    HONORIFICS.contains(&last_word.to_lowercase().as_str())
}

/// Words of a sentence with surrounding punctuation stripped; internal
/// apostrophes and hyphens survive.
fn tokenize(sentence: &str) -> Vec<String> {
    sentence
        .split_whitespace()
        .map(|t| {
            t.trim_matches(|c: char| !c.is_alphanumeric())
                .to_string()
        })
        .filter(|t| !t.is_empty())
        .collect()
}

/// Tag every token with a coarse part-of-speech label.
fn pos_tag(tokens: &[String]) -> Vec<(String, &'static str)> {
    tokens
        .iter()
        .enumerate()
        .map(|(i, token)| (token.clone(), tag_word(token, i == 0)))
        .collect()
}

/// Closed-class lookup first, then capitalization, then suffix rules.
///
/// A sentence-initial capitalized word is only a proper noun when it is a
/// known name; otherwise "Hello world." would chunk "Hello" as an entity.
fn tag_word(word: &str, sentence_initial: bool) -> &'static str {
    let lower = word.to_lowercase();
    let lower = lower.as_str();

    if DETERMINERS.contains(&lower) {
        return "DT";
    }
    if PREPOSITIONS.contains(&lower) {
        return "IN";
    }
    if PRONOUNS.contains(&lower) {
        return "PRP";
    }
    if CONJUNCTIONS.contains(&lower) {
        return "CC";
    }
    if AUXILIARIES.contains(&lower) {
        return "VB";
    }
    if word.chars().all(|c| c.is_ascii_digit()) {
        return "CD";
    }
    if HONORIFICS.contains(&lower) {
        return "NNP";
    }
    if word.chars().next().is_some_and(|c| c.is_uppercase())
        && (!sentence_initial || GPE_NAMES.contains(&lower))
    {
        return "NNP";
    }

    if lower.ends_with("ly") {
        "RB"
    } else if lower.ends_with("ing") {
        "VBG"
    } else if lower.ends_with("ed") {
        "VBD"
    } else if lower.len() > 3 && lower.ends_with('s') {
        "NNS"
    } else {
        "NN"
    }
}

/// Group contiguous proper-noun tokens into entity fragments and classify
/// each fragment. A leading honorific forces PERSON and is excluded from the
/// entity name.
fn chunk_entities(tagged: &[(String, &'static str)], entities: &mut BTreeSet<Entity>) {
    let mut run: Vec<&str> = Vec::new();
    let mut saw_honorific = false;

    for (word, tag) in tagged {
        if *tag == "NNP" {
            if HONORIFICS.contains(&word.to_lowercase().as_str()) {
                saw_honorific = true;
            } else {
                run.push(word);
            }
        } else {
            flush_run(&mut run, &mut saw_honorific, entities);
        }
    }
    flush_run(&mut run, &mut saw_honorific, entities);
}

fn flush_run(run: &mut Vec<&str>, saw_honorific: &mut bool, entities: &mut BTreeSet<Entity>) {
    if !run.is_empty() {
        let kind = classify(run, *saw_honorific);
        entities.insert(Entity::new(run.join(" "), kind));
    }
    run.clear();
    *saw_honorific = false;
}

fn classify(words: &[&str], saw_honorific: bool) -> &'static str {
    if saw_honorific {
        return "PERSON";
    }
    let joined = words.join(" ").to_lowercase();
    if GPE_NAMES.contains(&joined.as_str()) {
        return "GPE";
    }
    if words
        .last()
        .is_some_and(|w| ORG_SUFFIXES.contains(&w.to_lowercase().as_str()))
    {
        return "ORGANIZATION";
    }
    "PERSON"
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(entities: &[Entity]) -> Vec<(&str, &str)> {
        entities
            .iter()
            .map(|e| (e.name.as_str(), e.kind.as_str()))
            .collect()
    }

    #[test]
    fn test_place_name_is_gpe() {
        let entities = extract_entities("This is Paris.");
        assert_eq!(names(&entities), vec![("Paris", "GPE")]);
    }

    #[test]
    fn test_multi_word_gpe() {
        let entities = extract_entities("We landed in New York yesterday.");
        assert_eq!(names(&entities), vec![("New York", "GPE")]);
    }

    #[test]
    fn test_org_suffix_classifies_organization() {
        let entities = extract_entities("She works at Acme Corp on weekdays.");
        assert_eq!(names(&entities), vec![("Acme Corp", "ORGANIZATION")]);
    }

    #[test]
    fn test_honorific_forces_person_and_is_excluded() {
        let entities = extract_entities("We spoke with Dr. Alice Smith about the results.");
        assert_eq!(names(&entities), vec![("Alice Smith", "PERSON")]);
    }

    #[test]
    fn test_sentence_initial_greeting_is_not_an_entity() {
        assert!(extract_entities("Hello world.").is_empty());
    }

    #[test]
    fn test_sentence_initial_gazetteer_name_is_kept() {
        let entities = extract_entities("Paris is lovely in spring.");
        assert_eq!(names(&entities), vec![("Paris", "GPE")]);
    }

    #[test]
    fn test_duplicates_across_sentences_collapse() {
        let entities = extract_entities("I love Paris. We should visit Paris again.");
        assert_eq!(names(&entities), vec![("Paris", "GPE")]);
    }

    #[test]
    fn test_same_name_different_kind_are_distinct() {
        let mut set = BTreeSet::new();
        set.insert(Entity::new("Washington", "GPE"));
        set.insert(Entity::new("Washington", "PERSON"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_multiple_entities_in_one_sentence() {
        let entities = extract_entities("Yesterday Maria Lopez flew from Madrid to Tokyo.");
        assert_eq!(
            names(&entities),
            vec![
                ("Madrid", "GPE"),
                ("Maria Lopez", "PERSON"),
                ("Tokyo", "GPE"),
            ]
        );
    }

    #[test]
    fn test_empty_text_yields_no_entities() {
        assert!(extract_entities("").is_empty());
        assert!(extract_entities("   ").is_empty());
    }

    #[test]
    fn test_honorific_period_does_not_split_sentence() {
        let sentences = split_sentences("We met Dr. Smith today. He was kind.");
        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[0], "We met Dr. Smith today.");
    }
}
