use super::*;

#[test]
fn test_generation_params_clamps_floor() {
    let params = GenerationParams::new(12, 30);
    assert_eq!(params.max_new_tokens, 12);
    assert_eq!(params.min_new_tokens, 12);

    let params = GenerationParams::new(130, 30);
    assert_eq!(params.min_new_tokens, 30);
}

#[test]
fn test_generator_config_validate() {
    assert!(GeneratorConfig::stub().validate().is_ok());

    let config = GeneratorConfig {
        max_input_tokens: 0,
        ..Default::default()
    };
    assert!(config.validate().is_err());

    assert!(GeneratorConfig::new("").validate().is_err());
}

#[test]
fn test_load_missing_model_dir() {
    let result = Seq2SeqGenerator::load(GeneratorConfig::new("/nonexistent/flan-t5"));
    assert!(matches!(result, Err(InferenceError::ModelNotFound { .. })));
}

#[test]
fn test_stub_reports_stub() {
    let generator = Seq2SeqGenerator::stub().unwrap();
    assert!(generator.is_stub());
    assert!(format!("{:?}", generator).contains("Stub"));
}

#[test]
fn test_stub_takes_lead_sentences() {
    let generator = Seq2SeqGenerator::stub().unwrap();
    let prompt = "summarize: Built payment APIs in Rust. Led a team of four. Enjoys hiking.";

    let out = generator
        .generate(prompt, GenerationParams::new(10, 0))
        .unwrap();
    assert_eq!(out, "Built payment APIs in Rust. Led a team of four.");
}

#[test]
fn test_stub_truncates_long_first_sentence() {
    let generator = Seq2SeqGenerator::stub().unwrap();
    let prompt = "summarize: one two three four five six seven";

    let out = generator
        .generate(prompt, GenerationParams::new(3, 0))
        .unwrap();
    assert_eq!(out, "one two three");
}

#[test]
fn test_stub_is_deterministic() {
    let generator = Seq2SeqGenerator::stub().unwrap();
    let prompt = "summarize: Data engineer. Spark and Airflow. Based in Pune.";
    let params = GenerationParams::new(130, 30);

    assert_eq!(
        generator.generate(prompt, params).unwrap(),
        generator.generate(prompt, params).unwrap()
    );
}

#[test]
fn test_greedy_pick_respects_ban() {
    let logits = [0.1, 2.0, 0.5];
    assert_eq!(greedy_pick(&logits, None), Some(1));
    assert_eq!(greedy_pick(&logits, Some(1)), Some(2));
    assert_eq!(greedy_pick(&[], None), None);
}
