//! Text transforms over single strings and individual tokens

use std::borrow::Cow;
use std::collections::HashMap;

use once_cell::sync::Lazy;
use rust_stemmers::{Algorithm, Stemmer};
use serde_json::Value;
use unicode_segmentation::UnicodeSegmentation;

/// Contractions and informal spellings with their expansions, keyed in lowercase
static CONTRACTIONS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    [
        ("ain't", "are not"),
        ("aren't", "are not"),
        ("can't", "cannot"),
        ("can't've", "cannot have"),
        ("'cause", "because"),
        ("could've", "could have"),
        ("couldn't", "could not"),
        ("didn't", "did not"),
        ("doesn't", "does not"),
        ("don't", "do not"),
        ("hadn't", "had not"),
        ("hasn't", "has not"),
        ("haven't", "have not"),
        ("he'd", "he would"),
        ("he'll", "he will"),
        ("he's", "he is"),
        ("how'd", "how did"),
        ("how's", "how is"),
        ("i'd", "i would"),
        ("i'll", "i will"),
        ("i'm", "i am"),
        ("i've", "i have"),
        ("isn't", "is not"),
        ("it'd", "it would"),
        ("it'll", "it will"),
        ("it's", "it is"),
        ("let's", "let us"),
        ("ma'am", "madam"),
        ("might've", "might have"),
        ("mightn't", "might not"),
        ("must've", "must have"),
        ("mustn't", "must not"),
        ("needn't", "need not"),
        ("she'd", "she would"),
        ("she'll", "she will"),
        ("she's", "she is"),
        ("should've", "should have"),
        ("shouldn't", "should not"),
        ("that'd", "that would"),
        ("that's", "that is"),
        ("there'd", "there would"),
        ("there's", "there is"),
        ("they'd", "they would"),
        ("they'll", "they will"),
        ("they're", "they are"),
        ("they've", "they have"),
        ("wasn't", "was not"),
        ("we'd", "we would"),
        ("we'll", "we will"),
        ("we're", "we are"),
        ("we've", "we have"),
        ("weren't", "were not"),
        ("what'll", "what will"),
        ("what're", "what are"),
        ("what's", "what is"),
        ("what've", "what have"),
        ("where'd", "where did"),
        ("where's", "where is"),
        ("who'll", "who will"),
        ("who's", "who is"),
        ("who've", "who have"),
        ("why's", "why is"),
        ("won't", "will not"),
        ("would've", "would have"),
        ("wouldn't", "would not"),
        ("y'all", "you all"),
        ("you'd", "you would"),
        ("you'll", "you will"),
        ("you're", "you are"),
        ("you've", "you have"),
        // informal
        ("dunno", "do not know"),
        ("gimme", "give me"),
        ("gonna", "going to"),
        ("gotta", "got to"),
        ("ima", "i am about to"),
        ("kinda", "kind of"),
        ("lemme", "let me"),
        ("sorta", "sort of"),
        ("wanna", "want to"),
        ("yall", "you all"),
    ]
    .into_iter()
    .collect()
});

/// Porter (Snowball English) stemmer
static STEMMER: Lazy<Stemmer> = Lazy::new(|| Stemmer::create(Algorithm::English));

/// Target case for [`cast_case`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Case {
    /// Lowercase
    Lower,

    /// Uppercase
    Upper,
}

impl Case {
    /// Parse `LOWER` or `UPPER`, ignoring ASCII case
    pub fn parse(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("lower") {
            Some(Case::Lower)
        } else if name.eq_ignore_ascii_case("upper") {
            Some(Case::Upper)
        } else {
            None
        }
    }
}

/// Strings pass through; anything else becomes the empty string
pub fn cast_nan_str(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        _ => String::new(),
    }
}

/// Change the case of the text; `None` leaves it unchanged
pub fn cast_case(text: &str, case: Option<Case>) -> String {
    match case {
        Some(Case::Lower) => text.to_lowercase(),
        Some(Case::Upper) => text.to_uppercase(),
        None => text.to_string(),
    }
}

/// Replace every occurrence of `sub` with `rep`
///
/// An empty `sub` leaves the text unchanged.
pub fn sub_replace(text: &str, sub: &str, rep: &str) -> String {
    if sub.is_empty() || sub == rep {
        return text.to_string();
    }
    text.replace(sub, rep)
}

/// Expand a single token, keeping trailing punctuation and a leading capital
pub fn expand_token(token: &str) -> Cow<'_, str> {
    let core = token.trim_end_matches(['.', ',', '!', '?', ';', ':']);
    let suffix = &token[core.len()..];
    let key = core.replace('\u{2019}', "'").to_lowercase();

    let Some(expansion) = CONTRACTIONS.get(key.as_str()) else {
        return Cow::Borrowed(token);
    };

    let mut expanded = String::with_capacity(expansion.len() + suffix.len());
    if core.chars().next().is_some_and(char::is_uppercase) {
        let mut chars = expansion.chars();
        if let Some(first) = chars.next() {
            expanded.extend(first.to_uppercase());
        }
        expanded.push_str(chars.as_str());
    } else {
        expanded.push_str(expansion);
    }
    expanded.push_str(suffix);
    Cow::Owned(expanded)
}

/// Expand contractions in whitespace separated text (`you're` to `you are`)
pub fn expand_contractions(text: &str) -> String {
    text.split_whitespace()
        .map(expand_token)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Expand contractions in a token list; one token may become several
pub fn expand_contraction_tokens<S: AsRef<str>>(tokens: &[S]) -> Vec<String> {
    tokens
        .iter()
        .flat_map(|token| {
            expand_token(token.as_ref())
                .split_whitespace()
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Reduce each whitespace separated word to its Porter stem
///
/// Stems are lowercase; words are joined back with single spaces.
pub fn stem(text: &str) -> String {
    text.split_whitespace()
        .map(stem_token)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Reduce each token to its Porter stem
pub fn stem_tokens<S: AsRef<str>>(tokens: &[S]) -> Vec<String> {
    tokens.iter().map(|token| stem_token(token.as_ref())).collect()
}

fn stem_token(token: &str) -> String {
    STEMMER.stem(&token.to_lowercase()).into_owned()
}

/// Whether a token looks like a `@username` mention
pub fn is_username(token: &str) -> bool {
    token.starts_with('@') && token.chars().count() > 1
}

/// Whether a token looks like a link
pub fn is_url(token: &str) -> bool {
    token.starts_with("http")
}

/// Replace every whitespace separated token matching `pred` with `censor`
fn censor_tokens(text: &str, censor: &str, pred: impl Fn(&str) -> bool) -> String {
    text.split_whitespace()
        .map(|token| if pred(token) { censor } else { token })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Replace usernames with a placeholder
pub fn censor_username(text: &str, censor: &str) -> String {
    censor_tokens(text, censor, is_username)
}

/// Replace links with a placeholder
pub fn censor_urls(text: &str, censor: &str) -> String {
    censor_tokens(text, censor, is_url)
}

/// Split text into words and punctuation on Unicode word boundaries
///
/// Whitespace-only segments are dropped.
pub fn tokenize(text: &str) -> Vec<&str> {
    text.split_word_bounds()
        .filter(|segment| !segment.trim().is_empty())
        .collect()
}

/// Split text into trimmed, non-empty Unicode sentences
pub fn sentences(text: &str) -> Vec<&str> {
    text.unicode_sentences()
        .map(str::trim)
        .filter(|sentence| !sentence.is_empty())
        .collect()
}

/// Number of characters in the text
pub fn text_length(text: &str) -> usize {
    text.chars().count()
}

/// Number of whitespace separated words in the text
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
