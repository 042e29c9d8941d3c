use std::io::Cursor;

use rebyu_core::{
    json, read_csv, step_fn, write_csv, Args, ArgsExt, CsvOptions, Error, Pipeline, Rebyu,
    RebyuConfig, Step, StepKind, Value,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn lower(value: &Value, _args: &Args) -> anyhow::Result<Value> {
    Ok(match value {
        Value::String(s) => json!(s.to_lowercase()),
        other => other.clone(),
    })
}

fn words(value: &Value, _args: &Args) -> anyhow::Result<Value> {
    let text = value.as_str().unwrap_or_default();
    Ok(json!(text.split_whitespace().collect::<Vec<_>>()))
}

fn mean_stars(series: &Value, _args: &Args) -> anyhow::Result<Value> {
    let stars: Vec<f64> = series
        .as_array()
        .map(|values| values.iter().filter_map(Value::as_f64).collect())
        .unwrap_or_default();
    anyhow::ensure!(!stars.is_empty(), "no ratings");
    Ok(json!(stars.iter().sum::<f64>() / stars.len() as f64))
}

fn longest(series: &Value, args: &Args) -> anyhow::Result<Value> {
    let min = args.usize_or("min", 0)?;
    let best = series
        .as_array()
        .into_iter()
        .flatten()
        .filter_map(Value::as_array)
        .map(Vec::len)
        .filter(|len| *len >= min)
        .max();
    Ok(json!(best))
}

const REVIEWS: &str = "\
text,stars
Great Phone,5
Battery Died After A Week,1
Does The Job,3
";

fn typed() -> CsvOptions {
    CsvOptions {
        infer_types: true,
        ..CsvOptions::default()
    }
}

fn review_pipeline() -> Pipeline {
    Pipeline::with_steps(
        "reviews",
        [
            Step::from_fn(step_fn!(lower), StepKind::Preprocess, "text", "text"),
            Step::from_fn(step_fn!(words), StepKind::Preprocess, "text", "tokens"),
            Step::new("rating", StepKind::Compose, "stars", "mean", step_fn!(mean_stars)),
            Step::new("longest", StepKind::Analyze, "tokens", "longest", step_fn!(longest))
                .with_args([("min", 2)]),
        ],
    )
}

#[test]
fn test_csv_to_results() {
    init_tracing();
    let data = read_csv(Cursor::new(REVIEWS), &typed()).unwrap();

    let mut rebyu = Rebyu::new(data, Some(review_pipeline()));
    rebyu.run(true).unwrap();

    assert_eq!(rebyu.composition()["mean"], json!(3.0));
    assert_eq!(rebyu.analysis()["longest"], json!(5));
    assert_eq!(
        rebyu.data().values("tokens").unwrap()[0],
        json!(["great", "phone"])
    );

    let mut out = Vec::new();
    write_csv(rebyu.data(), &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.starts_with("text,stars,tokens\n"));
    assert!(text.contains("great phone,5,"));
}

#[test]
fn test_failure_is_resumable() {
    init_tracing();
    let data = read_csv(Cursor::new("text,stars\nmeh,\n"), &typed()).unwrap();
    let mut rebyu = Rebyu::new(data, Some(review_pipeline()));

    let err = rebyu.run(false).unwrap_err();
    assert!(matches!(&err, Error::Step { id, .. } if id == "rating"));
    assert_eq!(rebyu.pipeline().unwrap().cursor_index(), 2);

    let pipeline = rebyu.pipeline_mut().unwrap();
    let longest = pipeline.pop().unwrap();
    pipeline.pop();
    pipeline.add(longest);
    rebyu.run(false).unwrap();

    assert!(rebyu.composition().is_empty());
    assert_eq!(rebyu.analysis()["longest"], Value::Null);
}

#[test]
fn test_config_forces_verbose_and_requires_pipeline() {
    init_tracing();
    let config = RebyuConfig::from_json_str(r#"{"verbose": true, "require_pipeline": true}"#)
        .unwrap();
    let mut rebyu = Rebyu::with_config(
        read_csv(Cursor::new(REVIEWS), &typed()).unwrap(),
        None,
        config,
    );

    assert!(matches!(rebyu.step(false), Err(Error::MissingPipeline)));
    rebyu.set_pipeline(review_pipeline());
    while rebyu.step(false).unwrap() {}

    assert!(rebyu.config().verbose);
    assert!(rebyu.info().contains("state: exhausted (4/4)"));
}
