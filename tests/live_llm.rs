#[allow(unused_imports)]
use csv_analyst::clients::{self, LanguageModel};
#[allow(unused_imports)]
use csv_analyst::config::Settings;

#[test]
#[cfg(feature = "live_llm")]
fn configured_model_answers_a_trivial_prompt() {
    let settings = Settings::load().unwrap();

    if std::env::var("RUN_LLM_TESTS").is_err() {
        eprintln!("Skipping live LLM test - set RUN_LLM_TESTS=1 to run");
        return;
    }
    let Some(api_key) = settings.llm.api_key_from_env() else {
        eprintln!("Skipping live LLM test - {} not set", settings.llm.api_key_env);
        return;
    };

    let model = clients::connect(&settings.llm, api_key).unwrap();
    let response = model
        .complete("Give me a one-word answer. The word should be 'test'.")
        .unwrap();

    println!("Response from {}: {}", model.model_name(), response);
    assert!(response.to_lowercase().contains("test"));
}
