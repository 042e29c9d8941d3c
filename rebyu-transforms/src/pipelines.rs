//! Prebuilt pipelines

use rebyu_core::Pipeline;

use crate::steps;

/// A pipeline with no steps
pub fn blank_pipeline() -> Pipeline {
    Pipeline::new("blank-pipeline")
}

/// Cleaning, tokenizing and vocabulary building over the `text` column
///
/// Casts missing text to empty strings, lowercases, expands contractions,
/// strips digits and surrounding whitespace, and replaces "murder" with
/// "kill". The cleaned text is then tokenized into `tokens`, measured into
/// `text_length` and `word_count`, and composed into `counter_vocab` and
/// `set_char_vocab`.
pub fn standard_pipeline() -> Pipeline {
    let pipeline = Pipeline::with_steps(
        "standard-pipeline",
        [
            steps::prep_cast_nan(),
            steps::prep_cast_case(),
            steps::prep_expand_contractions(),
            steps::prep_remove_numbers(),
            steps::prep_remove_whitespaces(),
            steps::prep_replace_word().with_args([("sub", "murder"), ("rep", "kill")]),
            steps::prep_tokenize(),
            steps::prep_text_length(),
            steps::prep_word_count(),
            steps::compose_counter_vocab(),
            steps::compose_set_char_vocab(),
        ],
    );
    tracing::debug!(pipeline = pipeline.id(), steps = pipeline.len(), "built pipeline");
    pipeline
}

#[cfg(test)]
mod tests {
    use super::*;
    use rebyu_core::PipelineState;

    #[test]
    fn test_blank_pipeline() {
        let pipeline = blank_pipeline();
        assert_eq!(pipeline.id(), "blank-pipeline");
        assert!(pipeline.is_empty());
        assert_eq!(pipeline.status(), PipelineState::Empty);
    }

    #[test]
    fn test_standard_pipeline_order() {
        let pipeline = standard_pipeline();
        assert_eq!(
            pipeline.steps_info().collect::<Vec<_>>(),
            vec![
                "prep-cast-nan",
                "prep-cast-case",
                "prep-expand-contractions",
                "prep-remove-numbers",
                "prep-remove-whitespaces",
                "prep-replace-word",
                "prep-tokenize",
                "prep-text-length",
                "prep-word-count",
                "compose-counter-vocab",
                "compose-set-char-vocab",
            ]
        );
        assert_eq!(pipeline.get(5).unwrap().args()["sub"], "murder");
    }
}
