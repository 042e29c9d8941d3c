//! Removal of numbers, links, punctuation and stopwords from text

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::text::tokenize;

static NUMBERS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("Valid regex pattern"));

/// Explicit schemes, `www.` hosts and bare hosts on common top-level domains
static URLS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(?:https?://|www\.)\S+|\b(?:[a-z0-9-]+\.)+(?:com|net|org|edu|gov|io|co|ly|me)\b(?:/\S*)?",
    )
    .expect("Valid regex pattern")
});

/// English stopwords, lowercase
static STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
        "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his",
        "himself", "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself",
        "they", "them", "their", "theirs", "themselves", "what", "which", "who", "whom", "this",
        "that", "that'll", "these", "those", "am", "is", "are", "was", "were", "be", "been",
        "being", "have", "has", "had", "having", "do", "does", "did", "doing", "a", "an", "the",
        "and", "but", "if", "or", "because", "as", "until", "while", "of", "at", "by", "for",
        "with", "about", "against", "between", "into", "through", "during", "before", "after",
        "above", "below", "to", "from", "up", "down", "in", "out", "on", "off", "over", "under",
        "again", "further", "then", "once", "here", "there", "when", "where", "why", "how",
        "all", "any", "both", "each", "few", "more", "most", "other", "some", "such", "no",
        "nor", "not", "only", "own", "same", "so", "than", "too", "very", "s", "t", "can",
        "will", "just", "don", "don't", "should", "should've", "now", "d", "ll", "m", "o", "re",
        "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn", "didn't", "doesn",
        "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn", "isn't", "ma",
        "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan", "shan't",
        "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't", "wouldn",
        "wouldn't",
    ]
    .into_iter()
    .collect()
});

/// Delete every run of digits
pub fn remove_numbers(text: &str) -> String {
    NUMBERS.replace_all(text, "").into_owned()
}

/// Delete links
pub fn remove_urls(text: &str) -> String {
    URLS.replace_all(text, "").into_owned()
}

/// Replace each ASCII punctuation character with a space
pub fn remove_punctuations(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_ascii_punctuation() { ' ' } else { c })
        .collect()
}

/// Strip leading and trailing whitespace; inner runs are kept
pub fn remove_whitespaces(text: &str) -> String {
    text.trim().to_string()
}

/// Delete every occurrence of `sub`; case sensitive
pub fn remove_specifics(text: &str, sub: &str) -> String {
    if sub.is_empty() {
        return text.to_string();
    }
    text.replace(sub, "")
}

/// Whether a token is an English stopword or one of `extra`, ignoring case
pub fn is_stopword<S: AsRef<str>>(token: &str, extra: &[S]) -> bool {
    let lower = token.to_lowercase();
    STOPWORDS.contains(lower.as_str())
        || extra.iter().any(|word| word.as_ref().to_lowercase() == lower)
}

/// Tokenize the text and drop stopwords, joining what is left with single spaces
pub fn remove_stopwords<S: AsRef<str>>(text: &str, extra: &[S]) -> String {
    tokenize(text)
        .into_iter()
        .filter(|token| !is_stopword(token, extra))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Drop stopwords from a token list
pub fn remove_stopword_tokens<T, S>(tokens: &[T], extra: &[S]) -> Vec<String>
where
    T: AsRef<str>,
    S: AsRef<str>,
{
    tokens
        .iter()
        .map(AsRef::<str>::as_ref)
        .filter(|token| !is_stopword(token, extra))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("18a18", "a")]
    #[test_case("I was born in 1989", "I was born in ")]
    #[test_case("1923892138198391", "")]
    #[test_case("I just ate eight sandwich", "I just ate eight sandwich")]
    fn test_remove_numbers(text: &str, expected: &str) {
        assert_eq!(remove_numbers(text), expected);
    }

    #[test_case("https://google.com", "")]
    #[test_case("I just checked google", "I just checked google")]
    #[test_case("Did you go to www.google.com", "Did you go to ")]
    #[test_case("Check out this picture pic.twitter.com/sjdiaadid", "Check out this picture ")]
    fn test_remove_urls(text: &str, expected: &str) {
        assert_eq!(remove_urls(text), expected);
    }

    #[test_case("https://google.com", "https   google com")]
    #[test_case("I'd like to call you again. Please!", "I d like to call you again  Please ")]
    #[test_case("Did you go to www.google.com", "Did you go to www google com")]
    #[test_case("Never gonna give you up", "Never gonna give you up")]
    fn test_remove_punctuations(text: &str, expected: &str) {
        assert_eq!(remove_punctuations(text), expected);
    }

    #[test_case("         ", "")]
    #[test_case(" Never  gonna let you down    ", "Never  gonna let you down")]
    #[test_case("A a      b B", "A a      b B")]
    #[test_case("Wingardium Leviosa    ", "Wingardium Leviosa")]
    fn test_remove_whitespaces(text: &str, expected: &str) {
        assert_eq!(remove_whitespaces(text), expected);
    }

    #[test_case("", "", "")]
    #[test_case("Never  gonna let you down", "Never", "  gonna let you down")]
    #[test_case("Lovevol", "Evol", "Lovevol")]
    #[test_case("Joseph Schwartz", "Joseph", " Schwartz")]
    fn test_remove_specifics(text: &str, sub: &str, expected: &str) {
        assert_eq!(remove_specifics(text, sub), expected);
    }

    #[test_case("I just ate a sandwich", &[], "ate sandwich")]
    #[test_case("Never gonna let you down", &["let"], "Never gonna")]
    #[test_case("Spatula", &["spatula"], "")]
    #[test_case("Enraged Monster", &[], "Enraged Monster")]
    fn test_remove_stopwords(text: &str, extra: &[&str], expected: &str) {
        assert_eq!(remove_stopwords(text, extra), expected);
    }

    #[test]
    fn test_remove_stopword_tokens() {
        let tokens = ["The", "screen", "is", "NOT", "bright"];
        assert_eq!(
            remove_stopword_tokens(&tokens, &["Bright"]),
            vec!["screen".to_string()]
        );
    }
}
