use std::collections::{HashMap, HashSet};

use super::stopwords::STOP_WORDS;

/// Statistical keyword extractor ranking candidate phrases by
/// degree-over-frequency word scores.
///
/// Candidate phrases are maximal runs of content words: stop words,
/// punctuation, and bare numbers all end the current phrase. Each word gets
/// `score(w) = degree(w) / freq(w)`, where the degree counts co-occurrences
/// within candidate phrases plus the word's own frequency; a phrase scores
/// the sum over its words. Longer collocations therefore outrank the single
/// words they contain.
///
/// The extractor itself holds only the stop-word set. All ranking state is
/// local to a single [`extract`](Self::extract) call, so nothing carries
/// over from one segment to the next.
pub struct KeywordExtractor {
    stop_words: HashSet<&'static str>,
}

impl KeywordExtractor {
    pub fn new() -> Self {
        Self {
            stop_words: STOP_WORDS.iter().copied().collect(),
        }
    }

    /// Extract up to `limit` phrases, highest score first. Ties keep first
    /// occurrence order, so the ranking is deterministic. Empty or
    /// stop-word-only text yields an empty list.
    pub fn extract(&self, text: &str, limit: usize) -> Vec<String> {
        let phrases = self.candidate_phrases(text);
        if phrases.is_empty() {
            return Vec::new();
        }

        let mut freq: HashMap<&str, f64> = HashMap::new();
        let mut degree: HashMap<&str, f64> = HashMap::new();
        for phrase in &phrases {
            let co_occurrence = phrase.len() as f64 - 1.0;
            for word in phrase {
                *freq.entry(word.as_str()).or_default() += 1.0;
                *degree.entry(word.as_str()).or_default() += co_occurrence;
            }
        }
        for (word, count) in &freq {
            *degree.get_mut(word).unwrap() += count;
        }

        let mut ranked: Vec<(String, f64)> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        for phrase in &phrases {
            let joined = phrase.join(" ");
            if !seen.insert(joined.clone()) {
                continue;
            }
            let score: f64 = phrase.iter().map(|w| degree[w.as_str()] / freq[w.as_str()]).sum();
            ranked.push((joined, score));
        }

        // Stable sort keeps first-occurrence order among equal scores.
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        ranked.truncate(limit);
        ranked.into_iter().map(|(phrase, _)| phrase).collect()
    }

    /// Lowercased content-word runs, split at stop words, numbers, and
    /// phrase-ending punctuation.
    fn candidate_phrases(&self, text: &str) -> Vec<Vec<String>> {
        let mut phrases: Vec<Vec<String>> = Vec::new();
        let mut current: Vec<String> = Vec::new();

        for token in text.split_whitespace() {
            let breaks_after = token.ends_with(['.', ',', ';', ':', '!', '?', ')']);
            let word: String = token
                .trim_matches(|c: char| !c.is_alphanumeric() && c != '\'')
                .to_lowercase();

            let is_break = word.is_empty()
                || self.stop_words.contains(word.as_str())
                || word.chars().all(|c| c.is_ascii_digit());

            if is_break {
                if !current.is_empty() {
                    phrases.push(std::mem::take(&mut current));
                }
            } else {
                current.push(word);
                if breaks_after && !current.is_empty() {
                    phrases.push(std::mem::take(&mut current));
                }
            }
        }
        if !current.is_empty() {
            phrases.push(current);
        }

        phrases
    }
}

impl Default for KeywordExtractor {
    fn default() -> Self {
        Self::new()
    }
}
