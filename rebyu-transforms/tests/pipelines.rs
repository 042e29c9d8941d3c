use std::collections::HashSet;

use rebyu_core::{json, Column, Dataset, Error, Pipeline, Rebyu, Value};
use rebyu_transforms::{standard_pipeline, steps};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn reviews() -> Dataset {
    Dataset::from(Column::new(
        "text",
        [
            json!("I'm gonna MURDER this 2nd exam"),
            Value::Null,
            json!("  You're great, you're the best  "),
        ],
    ))
}

#[test]
fn test_standard_pipeline_end_to_end() {
    init_tracing();
    let mut rebyu = Rebyu::new(reviews(), Some(standard_pipeline()));
    rebyu.run(true).unwrap();

    let data = rebyu.data();
    assert_eq!(
        data.values("text").unwrap(),
        &[
            json!("i am going to kill this nd exam"),
            json!(""),
            json!("you are great, you are the best"),
        ]
    );
    assert_eq!(
        data.values("tokens").unwrap()[2],
        json!(["you", "are", "great", ",", "you", "are", "the", "best"])
    );
    assert_eq!(data.values("tokens").unwrap()[1], json!([]));
    assert_eq!(data.values("text_length").unwrap(), &[json!(31), json!(0), json!(31)]);
    assert_eq!(data.values("word_count").unwrap(), &[json!(8), json!(0), json!(7)]);

    assert_eq!(rebyu.composition()["counter_vocab"], json!({"are": 2, "you": 2}));

    let chars = rebyu.composition()["set_char_vocab"].as_array().unwrap();
    let distinct: HashSet<&str> = chars.iter().filter_map(Value::as_str).collect();
    assert_eq!(distinct.len(), chars.len());
    assert_eq!(chars[0], json!("i"));
    assert!(chars.contains(&json!(",")));

    assert!(rebyu.analysis().is_empty());
    assert!(rebyu.info().contains(" -counter_vocab: Map"));
}

#[test]
fn test_standard_pipeline_without_text_column() {
    init_tracing();
    let mut rebyu = Rebyu::new(Column::new("body", ["hello"]), Some(standard_pipeline()));

    let err = rebyu.run(false).unwrap_err();
    assert!(matches!(err, Error::ColumnNotFound(name) if name == "text"));
    assert_eq!(rebyu.pipeline().unwrap().cursor_index(), 0);
}

#[test]
fn test_custom_pipeline_from_ready_made_steps() {
    init_tracing();
    let data = Dataset::new(vec![
        Column::new(
            "text",
            ["@amy this is the best phone https://t.co/x", "not what I expected @bob"],
        ),
        Column::new("polarity", [0.8, -0.4]),
    ])
    .unwrap();

    let mut pipeline = Pipeline::new("social");
    pipeline.add(steps::prep_censor_username().with_args([("censor", "USER")]));
    pipeline.add(steps::prep_censor_urls().with_args([("censor", "URL")]));
    pipeline.add(steps::prep_remove_stopwords().with_args([("extra", json!(["user", "url"]))]));
    pipeline.add(steps::prep_polarity_label());
    pipeline.add(steps::prep_sentences());

    let mut rebyu = Rebyu::new(data, Some(pipeline));
    while rebyu.step(false).unwrap() {}

    assert_eq!(
        rebyu.data().values("text").unwrap(),
        &[json!("best phone"), json!("expected")]
    );
    assert_eq!(
        rebyu.data().values("sentiment").unwrap(),
        &[json!("Positive"), json!("Negative")]
    );
    assert_eq!(rebyu.data().values("sentences").unwrap()[0], json!(["best phone"]));
}
