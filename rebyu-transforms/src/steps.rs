//! Step functions and ready-made steps for review text
//!
//! Every function here has the step function signature and can be wrapped with
//! [`step_fn!`](rebyu_core::step_fn). Preprocess functions accept a single
//! string, and most also accept a list of string tokens. Compose functions
//! accept a column whose rows are token lists or whitespace separated strings.
//!
//! The `prep_*` and `compose_*` constructors bind those functions to the
//! default `text` and `tokens` columns.

use rebyu_core::{json, step_fn, Args, ArgsExt, Step, StepKind, Value};

use crate::error::{Error, Result};
use crate::{remove, scale, text, vocab};

/// Default column holding raw review text
pub const TEXT: &str = "text";

/// Default column holding token lists
pub const TOKENS: &str = "tokens";

fn as_text(value: &Value) -> Result<&str> {
    value
        .as_str()
        .ok_or_else(|| Error::unexpected("a string", value))
}

fn as_tokens(value: &Value) -> Result<Vec<&str>> {
    let items = value
        .as_array()
        .ok_or_else(|| Error::unexpected("a list of string tokens", value))?;
    items.iter().map(as_text).collect()
}

/// Apply `on_text` to a string cell or `on_tokens` to a token list cell
fn text_or_tokens<F, G>(value: &Value, on_text: F, on_tokens: G) -> Result<Value>
where
    F: FnOnce(&str) -> Value,
    G: FnOnce(&[&str]) -> Value,
{
    match value {
        Value::String(s) => Ok(on_text(s)),
        Value::Array(_) => Ok(on_tokens(&as_tokens(value)?)),
        other => Err(Error::unexpected("a string or a list of string tokens", other)),
    }
}

/// Rows of a column as token lists; string rows are split on whitespace
fn token_rows(series: &Value) -> Result<Vec<Vec<&str>>> {
    let rows = series
        .as_array()
        .ok_or_else(|| Error::unexpected("a column", series))?;
    rows.iter()
        .map(|row| match row {
            Value::String(s) => Ok(s.split_whitespace().collect()),
            Value::Null => Ok(Vec::new()),
            other => as_tokens(other),
        })
        .collect()
}

fn as_score(value: &Value) -> Result<f64> {
    value
        .as_f64()
        .ok_or_else(|| Error::unexpected("a numeric score", value))
}

/// Resolve a class index to its label
///
/// `label` may be a list indexed by class or an object keyed by the class
/// number. An absent label uses `default`; an explicit null, or no default,
/// yields the bare index.
fn apply_label(index: usize, label: Option<&Value>, default: Option<&[&str]>) -> Result<Value> {
    let found = match (label, default) {
        (None, Some(names)) => return Ok(json!(names[index])),
        (None | Some(Value::Null), _) => return Ok(json!(index)),
        (Some(Value::Array(names)), _) => names.get(index),
        (Some(Value::Object(names)), _) => names.get(&index.to_string()),
        (Some(other), _) => return Err(Error::unexpected("a list or map of labels", other)),
    };
    found
        .cloned()
        .ok_or_else(|| Error::InvalidArgument(format!("no label for class {index}")))
}

// Preprocess functions

/// Non-strings become the empty string
pub fn cast_nan_str(value: &Value, _args: &Args) -> anyhow::Result<Value> {
    Ok(json!(text::cast_nan_str(value)))
}

/// Change case; `case` is `LOWER` (default) or `UPPER`, anything else is a no-op
pub fn cast_case(value: &Value, args: &Args) -> anyhow::Result<Value> {
    let name = args.str_or("case", "LOWER")?;
    let case = text::Case::parse(name);
    if case.is_none() {
        tracing::debug!(case = name, "unknown case, leaving text unchanged");
    }

    Ok(text_or_tokens(
        value,
        |s| json!(text::cast_case(s, case)),
        |tokens| json!(tokens.iter().map(|t| text::cast_case(t, case)).collect::<Vec<_>>()),
    )?)
}

/// Replace `sub` with `rep` in a string or in each token
pub fn sub_replace(value: &Value, args: &Args) -> anyhow::Result<Value> {
    let sub = args.str_or("sub", "")?;
    let rep = args.str_or("rep", "")?;

    Ok(text_or_tokens(
        value,
        |s| json!(text::sub_replace(s, sub, rep)),
        |tokens| json!(tokens.iter().map(|t| text::sub_replace(t, sub, rep)).collect::<Vec<_>>()),
    )?)
}

/// Expand contractions in a string or token list
pub fn expand_contractions(value: &Value, _args: &Args) -> anyhow::Result<Value> {
    Ok(text_or_tokens(
        value,
        |s| json!(text::expand_contractions(s)),
        |tokens| json!(text::expand_contraction_tokens(tokens)),
    )?)
}

/// Replace `@username` mentions with `censor` (default `@user`)
pub fn censor_username(value: &Value, args: &Args) -> anyhow::Result<Value> {
    let censor = args.str_or("censor", "@user")?;
    censor_with(value, censor, text::censor_username, text::is_username)
}

/// Replace links with `censor` (default `http`)
pub fn censor_urls(value: &Value, args: &Args) -> anyhow::Result<Value> {
    let censor = args.str_or("censor", "http")?;
    censor_with(value, censor, text::censor_urls, text::is_url)
}

fn censor_with(
    value: &Value,
    censor: &str,
    on_text: fn(&str, &str) -> String,
    pred: fn(&str) -> bool,
) -> anyhow::Result<Value> {
    Ok(text_or_tokens(
        value,
        |s| json!(on_text(s, censor)),
        |tokens| {
            json!(tokens
                .iter()
                .map(|&t| if pred(t) { censor } else { t })
                .collect::<Vec<_>>())
        },
    )?)
}

/// Porter stem every word of a string or every token of a list
pub fn stem(value: &Value, _args: &Args) -> anyhow::Result<Value> {
    Ok(text_or_tokens(
        value,
        |s| json!(text::stem(s)),
        |tokens| json!(text::stem_tokens(tokens)),
    )?)
}

/// Split a string into word and punctuation tokens
pub fn tokenize(value: &Value, _args: &Args) -> anyhow::Result<Value> {
    Ok(json!(text::tokenize(as_text(value)?)))
}

/// Split a string into sentences
pub fn sentences(value: &Value, _args: &Args) -> anyhow::Result<Value> {
    Ok(json!(text::sentences(as_text(value)?)))
}

/// Character count of a string, or item count of a token list
pub fn text_length(value: &Value, _args: &Args) -> anyhow::Result<Value> {
    Ok(text_or_tokens(
        value,
        |s| json!(text::text_length(s)),
        |tokens| json!(tokens.len()),
    )?)
}

/// Word count of a string, or item count of a token list
pub fn word_count(value: &Value, _args: &Args) -> anyhow::Result<Value> {
    Ok(text_or_tokens(
        value,
        |s| json!(text::word_count(s)),
        |tokens| json!(tokens.len()),
    )?)
}

/// Delete digits
pub fn remove_numbers(value: &Value, _args: &Args) -> anyhow::Result<Value> {
    Ok(json!(remove::remove_numbers(as_text(value)?)))
}

/// Delete links
pub fn remove_urls(value: &Value, _args: &Args) -> anyhow::Result<Value> {
    Ok(json!(remove::remove_urls(as_text(value)?)))
}

/// Replace punctuation with spaces
pub fn remove_punctuations(value: &Value, _args: &Args) -> anyhow::Result<Value> {
    Ok(json!(remove::remove_punctuations(as_text(value)?)))
}

/// Trim surrounding whitespace
pub fn remove_whitespaces(value: &Value, _args: &Args) -> anyhow::Result<Value> {
    Ok(json!(remove::remove_whitespaces(as_text(value)?)))
}

/// Delete every occurrence of `sub`
pub fn remove_specifics(value: &Value, args: &Args) -> anyhow::Result<Value> {
    let sub = args.str_or("sub", "")?;
    Ok(json!(remove::remove_specifics(as_text(value)?, sub)))
}

/// Drop English stopwords and any words listed in `extra`
pub fn remove_stopwords(value: &Value, args: &Args) -> anyhow::Result<Value> {
    let extra = args.str_list("extra")?;
    Ok(text_or_tokens(
        value,
        |s| json!(remove::remove_stopwords(s, &extra)),
        |tokens| json!(remove::remove_stopword_tokens(tokens, &extra)),
    )?)
}

/// Bucket a score in `[-1, 1]` into `n` (default 2) classes, optionally labelled
pub fn linear_map(value: &Value, args: &Args) -> anyhow::Result<Value> {
    let index = scale::linear_map(as_score(value)?, args.usize_or("n", 2)?)?;
    Ok(apply_label(index, args.get("label"), None)?)
}

/// Classify a score as Negative, Neutral or Positive around `threshold`
///
/// `label: null` returns the class index instead of its name.
pub fn polarity_threshold_map(value: &Value, args: &Args) -> anyhow::Result<Value> {
    let threshold = args.f64_or("threshold", scale::DEFAULT_POLARITY_THRESHOLD)?;
    let index = scale::polarity_threshold_map(as_score(value)?, threshold);
    Ok(apply_label(index, args.get("label"), Some(&scale::POLARITY_LABELS[..]))?)
}

// Compose functions

/// Token counts over the column, keeping tokens seen at least `cutoff` (default 2) times
pub fn counter_vocab(series: &Value, args: &Args) -> anyhow::Result<Value> {
    let rows = token_rows(series)?;
    Ok(json!(vocab::counter_vocab(&rows, args.usize_or("cutoff", 2)?)))
}

/// Character counts over the column, keeping characters seen at least `cutoff` (default 0) times
pub fn counter_character_vocab(series: &Value, args: &Args) -> anyhow::Result<Value> {
    let rows = token_rows(series)?;
    let counts = vocab::counter_character_vocab(&rows, args.usize_or("cutoff", 0)?);
    Ok(Value::Object(
        counts
            .into_iter()
            .map(|(c, count)| (c.to_string(), json!(count)))
            .collect(),
    ))
}

/// Distinct characters over the column, sorted when `sort` is set
pub fn set_character_vocab(series: &Value, args: &Args) -> anyhow::Result<Value> {
    let rows = token_rows(series)?;
    let chars = vocab::set_character_vocab(&rows, args.bool_or("sort", false)?);
    Ok(json!(chars.iter().map(char::to_string).collect::<Vec<_>>()))
}

// Ready-made steps

fn prep(id: &str, func: rebyu_core::StepFn) -> Step {
    Step::new(id, StepKind::Preprocess, TEXT, TEXT, func)
}

fn compose(id: &str, target: &str, func: rebyu_core::StepFn) -> Step {
    Step::new(id, StepKind::Compose, TOKENS, target, func)
}

/// `text` non-strings to empty strings
pub fn prep_cast_nan() -> Step {
    prep("prep-cast-nan", step_fn!(cast_nan_str))
}

/// `text` to lowercase
pub fn prep_cast_case() -> Step {
    prep("prep-cast-case", step_fn!(cast_case)).with_args([("case", "LOWER")])
}

/// Word replacement in `text`; bind `sub` and `rep` with [`Step::add_args`]
pub fn prep_replace_word() -> Step {
    prep("prep-replace-word", step_fn!(sub_replace))
}

/// Contraction expansion in `text`
pub fn prep_expand_contractions() -> Step {
    prep("prep-expand-contractions", step_fn!(expand_contractions))
}

/// Porter stemming of `text`
pub fn prep_stem() -> Step {
    prep("prep-stem", step_fn!(stem))
}

/// `@username` mentions in `text` to `@user`
pub fn prep_censor_username() -> Step {
    prep("prep-censor-username", step_fn!(censor_username)).with_args([("censor", "@user")])
}

/// Links in `text` to `http`
pub fn prep_censor_urls() -> Step {
    prep("prep-censor-urls", step_fn!(censor_urls)).with_args([("censor", "http")])
}

/// Digits removed from `text`
pub fn prep_remove_numbers() -> Step {
    prep("prep-remove-numbers", step_fn!(remove_numbers))
}

/// Links removed from `text`
pub fn prep_remove_urls() -> Step {
    prep("prep-remove-urls", step_fn!(remove_urls))
}

/// Punctuation in `text` to spaces
pub fn prep_remove_punctuations() -> Step {
    prep("prep-remove-punctuations", step_fn!(remove_punctuations))
}

/// Surrounding whitespace trimmed from `text`
pub fn prep_remove_whitespaces() -> Step {
    prep("prep-remove-whitespaces", step_fn!(remove_whitespaces))
}

/// Removal of a fixed substring from `text`; bind `sub` with [`Step::add_args`]
pub fn prep_remove_specifics() -> Step {
    prep("prep-remove-specifics", step_fn!(remove_specifics))
}

/// English stopwords removed from `text`
pub fn prep_remove_stopwords() -> Step {
    prep("prep-remove-stopwords", step_fn!(remove_stopwords))
}

/// `text` into word tokens in `tokens`
pub fn prep_tokenize() -> Step {
    Step::new("prep-tokenize", StepKind::Preprocess, TEXT, TOKENS, step_fn!(tokenize))
}

/// `text` into sentences in `sentences`
pub fn prep_sentences() -> Step {
    Step::new("prep-sentences", StepKind::Preprocess, TEXT, "sentences", step_fn!(sentences))
}

/// Character count of `text` into `text_length`
pub fn prep_text_length() -> Step {
    Step::new("prep-text-length", StepKind::Preprocess, TEXT, "text_length", step_fn!(text_length))
}

/// Word count of `text` into `word_count`
pub fn prep_word_count() -> Step {
    Step::new("prep-word-count", StepKind::Preprocess, TEXT, "word_count", step_fn!(word_count))
}

/// Polarity scores in `polarity` to sentiment names in `sentiment`
pub fn prep_polarity_label() -> Step {
    Step::new(
        "prep-polarity-label",
        StepKind::Preprocess,
        "polarity",
        "sentiment",
        step_fn!(polarity_threshold_map),
    )
}

/// Token counts of `tokens` into `counter_vocab`
pub fn compose_counter_vocab() -> Step {
    compose("compose-counter-vocab", "counter_vocab", step_fn!(counter_vocab))
        .with_args([("cutoff", 2)])
}

/// Character counts of `tokens` into `counter_char_vocab`
pub fn compose_counter_char_vocab() -> Step {
    compose("compose-counter-char-vocab", "counter_char_vocab", step_fn!(counter_character_vocab))
        .with_args([("cutoff", 0)])
}

/// Distinct characters of `tokens` into `set_char_vocab`
pub fn compose_set_char_vocab() -> Step {
    compose("compose-set-char-vocab", "set_char_vocab", step_fn!(set_character_vocab))
        .with_args([("sort", false)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rebyu_core::args;
    use test_case::test_case;

    #[test_case(json!("I JUST ATE A SANDWICH"), "LOWER", json!("i just ate a sandwich"))]
    #[test_case(json!(["I", "JUST", "ATE"]), "lower", json!(["i", "just", "ate"]))]
    #[test_case(json!(["i", "just", "ate"]), "UPPER", json!(["I", "JUST", "ATE"]))]
    #[test_case(json!(["i", "just", "a", "Sandwich"]), "TITLE", json!(["i", "just", "a", "Sandwich"]))]
    fn test_cast_case_on_cells(value: Value, case: &str, expected: Value) {
        assert_eq!(cast_case(&value, &args([("case", case)])).unwrap(), expected);
    }

    #[test_case(json!(["I", "JUST", "ATE", "A", "SANDWICH"]), "JUST", "WANT TO", json!(["I", "WANT TO", "ATE", "A", "SANDWICH"]))]
    #[test_case(json!(["i", "just", "ate", "a", "sandwich"]), "just", "am eating", json!(["i", "am eating", "ate", "a", "sandwich"]))]
    #[test_case(json!(["I", "ATE", "A", "BURGER"]), "", "", json!(["I", "ATE", "A", "BURGER"]))]
    fn test_sub_replace_on_tokens(value: Value, sub: &str, rep: &str, expected: Value) {
        let bound = args([("sub", sub), ("rep", rep)]);
        assert_eq!(sub_replace(&value, &bound).unwrap(), expected);
    }

    #[test_case(json!(["@mclovin", "i", "wish"]), "@user", json!(["@user", "i", "wish"]))]
    #[test_case(json!(["what", "the", "@dasdiajd2das"]), "@puck", json!(["what", "the", "@puck"]))]
    fn test_censor_username_on_tokens(value: Value, censor: &str, expected: Value) {
        assert_eq!(censor_username(&value, &args([("censor", censor)])).unwrap(), expected);
    }

    #[test_case(json!("@friend1 @friend2 we should start a podcast"), json!("@user @user we should start a podcast"))]
    #[test_case(json!("email me @ home"), json!("email me @ home"); "lone at sign")]
    fn test_censor_username_on_text(value: Value, expected: Value) {
        assert_eq!(censor_username(&value, &Args::new()).unwrap(), expected);
    }

    #[test]
    fn test_censor_defaults() {
        let text = json!("@bob see https://x.io");
        assert_eq!(censor_username(&text, &Args::new()).unwrap(), json!("@user see https://x.io"));
        assert_eq!(censor_urls(&text, &Args::new()).unwrap(), json!("@bob see http"));
    }

    #[test_case(json!("Cats running"), json!("cat run"))]
    #[test_case(json!(["Fishing", "connection", "!"]), json!(["fish", "connect", "!"]))]
    #[test_case(json!([]), json!([]); "no tokens")]
    fn test_stem_cells(value: Value, expected: Value) {
        assert_eq!(stem(&value, &Args::new()).unwrap(), expected);
    }

    #[test]
    fn test_expand_contraction_tokens_cell() {
        let value = json!(["you're", "the", "real", "deal"]);
        assert_eq!(
            expand_contractions(&value, &Args::new()).unwrap(),
            json!(["you", "are", "the", "real", "deal"])
        );
    }

    #[test]
    fn test_length_and_count_cells() {
        let text = json!("great battery life");
        let tokens = json!(["great", "battery", "life", "!"]);

        assert_eq!(text_length(&text, &Args::new()).unwrap(), json!(18));
        assert_eq!(word_count(&text, &Args::new()).unwrap(), json!(3));
        assert_eq!(text_length(&tokens, &Args::new()).unwrap(), json!(4));
        assert_eq!(word_count(&tokens, &Args::new()).unwrap(), json!(4));
    }

    #[test]
    fn test_remove_stopwords_extra() {
        let bound = args([("extra", json!(["let"]))]);
        assert_eq!(
            remove_stopwords(&json!("Never gonna let you down"), &bound).unwrap(),
            json!("Never gonna")
        );
        assert_eq!(
            remove_stopwords(&json!(["Never", "gonna", "let", "you", "down"]), &bound).unwrap(),
            json!(["Never", "gonna"])
        );
    }

    #[test_case(json!(0), 2, Value::Null, json!(1))]
    #[test_case(json!(0.5), 3, json!(["Zero", "One", "Two"]), json!("Two"))]
    #[test_case(json!(0.3), 4, json!({"0": "Zero", "1": "One", "2": "Two", "3": "Three"}), json!("Two"))]
    #[test_case(json!(-1), 2, json!({"0": "Zero", "1": "One"}), json!("Zero"))]
    fn test_linear_map_labels(value: Value, n: usize, label: Value, expected: Value) {
        let bound = args([("n", json!(n)), ("label", label)]);
        assert_eq!(linear_map(&value, &bound).unwrap(), expected);
    }

    #[test]
    fn test_linear_map_missing_label() {
        let bound = args([("n", json!(3)), ("label", json!(["Zero"]))]);
        assert!(linear_map(&json!(0.9), &bound).is_err());
    }

    #[test_case(0.9, json!("Positive"))]
    #[test_case(0.05, json!("Neutral"))]
    #[test_case(-0.7, json!("Negative"))]
    fn test_polarity_default_labels(score: f64, expected: Value) {
        assert_eq!(polarity_threshold_map(&json!(score), &Args::new()).unwrap(), expected);
    }

    #[test_case(0.0, 1)]
    #[test_case(-0.05, 1)]
    #[test_case(0.7, 2)]
    #[test_case(-0.9, 0)]
    fn test_polarity_null_label_gives_index(score: f64, expected: usize) {
        let bound = args([("label", Value::Null)]);
        assert_eq!(
            polarity_threshold_map(&json!(score), &bound).unwrap(),
            json!(expected)
        );
    }

    #[test]
    fn test_vocab_cells() {
        let column = json!([["i", "a", "i"], "a b c", null]);

        assert_eq!(
            counter_vocab(&column, &Args::new()).unwrap(),
            json!({"a": 2, "i": 2})
        );
        assert_eq!(
            counter_character_vocab(&column, &args([("cutoff", 2)])).unwrap(),
            json!({"a": 2, "i": 2})
        );
        assert_eq!(
            set_character_vocab(&column, &args([("sort", true)])).unwrap(),
            json!(["a", "b", "c", "i"])
        );
    }

    #[test]
    fn test_wrong_shapes_are_errors() {
        assert!(tokenize(&json!(3), &Args::new()).is_err());
        assert!(stem(&json!(7), &Args::new()).is_err());
        assert!(cast_case(&json!({"a": 1}), &Args::new()).is_err());
        assert!(cast_case(&json!(["ok", 1]), &Args::new()).is_err());
        assert!(counter_vocab(&json!("not a column"), &Args::new()).is_err());
        assert!(linear_map(&json!("high"), &Args::new()).is_err());

        let err = remove_numbers(&json!(null), &Args::new()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::UnexpectedValue { expected: "a string", .. })
        ));
    }

    #[test]
    fn test_ready_made_steps() {
        let step = prep_cast_case();
        assert_eq!(step.id(), "prep-cast-case");
        assert_eq!(step.kind(), StepKind::Preprocess);
        assert_eq!((step.source(), step.target()), (TEXT, TEXT));
        assert_eq!(step.func().name(), "cast_case");

        let step = compose_counter_vocab();
        assert_eq!(step.kind(), StepKind::Compose);
        assert_eq!((step.source(), step.target()), (TOKENS, "counter_vocab"));
        assert_eq!(step.args()["cutoff"], json!(2));

        let step = prep_stem();
        assert_eq!(step.id(), "prep-stem");
        assert_eq!((step.source(), step.target()), (TEXT, TEXT));
        assert_eq!(step.func().name(), "stem");

        assert_eq!(prep_tokenize().target(), TOKENS);
        assert_eq!(prep_polarity_label().func().name(), "polarity_threshold_map");
    }
}
