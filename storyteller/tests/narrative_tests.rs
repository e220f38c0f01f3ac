use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use ai_llm_service::{
    AiLlmError, LlmProvider, TextGenerator,
    error_handler::{ProviderError, ProviderErrorKind},
};
use async_trait::async_trait;
use past_life_core::{Catalog, YearLabels};
use storyteller::{PromptTemplate, StoryError, StorySource, Storyteller};
use tracing::{Subscriber, span};
use tracing_subscriber::{
    Layer, layer::Context, layer::SubscriberExt, registry::LookupSpan,
};

/// Returns a fixed story and remembers what it was asked.
#[derive(Default)]
struct EchoGenerator {
    calls: AtomicUsize,
    last: Mutex<Option<(String, Option<String>)>>,
}

#[async_trait]
impl TextGenerator for EchoGenerator {
    async fn generate(&self, prompt: &str, system: Option<&str>) -> ai_llm_service::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().unwrap() = Some((prompt.to_string(), system.map(str::to_string)));
        Ok("첫째 단락\n\n둘째 단락\n\n셋째 단락".to_string())
    }
}

/// Always fails, counting attempts.
#[derive(Default)]
struct FailingGenerator {
    calls: AtomicUsize,
}

#[async_trait]
impl TextGenerator for FailingGenerator {
    async fn generate(&self, _prompt: &str, _system: Option<&str>) -> ai_llm_service::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(ProviderError::new(LlmProvider::OpenAI, ProviderErrorKind::EmptyContent).into())
    }
}

fn catalog() -> Catalog {
    Catalog::embedded().unwrap()
}

#[tokio::test]
async fn blank_name_or_title_is_validation_error_without_upstream_call() {
    let generator = Arc::new(EchoGenerator::default());
    let teller = Storyteller::new(generator.clone());

    let err = teller.request_narrative("", "King", 1200).await.unwrap_err();
    assert!(matches!(err, StoryError::Validation { field: "name" }));

    let err = teller.request_narrative("Bob", "", 1200).await.unwrap_err();
    assert!(matches!(err, StoryError::Validation { field: "title" }));

    let err = teller.request_narrative("   ", "King", 1200).await.unwrap_err();
    assert!(err.is_validation());

    assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn story_is_returned_verbatim_with_prompt_and_system() {
    let generator = Arc::new(EchoGenerator::default());
    let teller = Storyteller::new(generator.clone());

    let story = teller.request_narrative("Alice", "King", -300).await.unwrap();
    assert_eq!(story, "첫째 단락\n\n둘째 단락\n\n셋째 단락");
    assert_eq!(generator.calls.load(Ordering::SeqCst), 1);

    let (prompt, system) = generator.last.lock().unwrap().clone().unwrap();
    assert!(prompt.contains("Alice님은 기원전 300년에 King(이)었습니다."));
    assert_eq!(system.as_deref(), Some(storyteller::prompt::DEFAULT_SYSTEM));
}

#[tokio::test]
async fn year_labels_and_template_are_configurable() {
    let generator = Arc::new(EchoGenerator::default());
    let teller = Storyteller::new(generator.clone())
        .with_year_labels(YearLabels::english())
        .with_template(PromptTemplate::new("sys", "{name} was a {title} in {year_label}."));

    teller.request_narrative("Bob", "scribe", 0).await.unwrap();

    let (prompt, system) = generator.last.lock().unwrap().clone().unwrap();
    assert_eq!(prompt, "Bob was a scribe in 0 CE.");
    assert_eq!(system.as_deref(), Some("sys"));
}

#[tokio::test]
async fn generation_failure_surfaces_as_generation_error_once() {
    let generator = Arc::new(FailingGenerator::default());
    let teller = Storyteller::new(generator.clone());

    let err = teller.request_narrative("Bob", "King", 5).await.unwrap_err();
    assert!(matches!(err, StoryError::Generation(AiLlmError::Provider(_))));
    assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn reveal_uses_generated_story() {
    let teller = Storyteller::new(Arc::new(EchoGenerator::default()));

    let rev = teller.reveal(&catalog(), "Alice").await.unwrap();
    assert_eq!(rev.name, "Alice");
    assert_eq!(rev.title, "남극 탐험대의 썰매개 조련사");
    assert_eq!(rev.year, -7_632);
    assert_eq!(rev.year_label, "기원전 7632년");
    assert_eq!(rev.source, StorySource::Generated);
    assert!(rev.story.starts_with("첫째 단락"));
}

#[tokio::test]
async fn reveal_falls_back_with_resolved_facts() {
    let generator = Arc::new(FailingGenerator::default());
    let teller = Storyteller::new(generator.clone());

    let rev = teller.reveal(&catalog(), "Alice").await.unwrap();

    assert_eq!(rev.source, StorySource::Fallback);
    assert!(rev.story.contains("Alice"));
    assert!(rev.story.contains(&rev.title));
    assert!(rev.story.contains("기원전 7632년"));
    assert_eq!(generator.calls.load(Ordering::SeqCst), 1, "no retry");
}

#[tokio::test]
async fn reveal_rejects_blank_name() {
    let teller = Storyteller::new(Arc::new(EchoGenerator::default()));
    let err = teller.reveal(&catalog(), " \t ").await.unwrap_err();
    assert!(err.is_validation());
}

#[tokio::test]
async fn revelation_serializes_source_in_snake_case() {
    let teller = Storyteller::new(Arc::new(FailingGenerator::default()));
    let rev = teller.reveal(&catalog(), "Bob").await.unwrap();

    let json = serde_json::to_value(&rev).unwrap();
    assert_eq!(json["source"], "fallback");
    assert_eq!(json["year"], rev.year);
}

/// Records `(span name, field names)` for every span opened.
#[derive(Clone, Default)]
struct SpanFields(Arc<Mutex<Vec<(String, Vec<String>)>>>);

impl<S> Layer<S> for SpanFields
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(&self, attrs: &span::Attributes<'_>, _id: &span::Id, _ctx: Context<'_, S>) {
        let meta = attrs.metadata();
        let fields = meta.fields().iter().map(|f| f.name().to_string()).collect();
        self.0.lock().unwrap().push((meta.name().to_string(), fields));
    }
}

#[tokio::test]
async fn spans_record_name_length_but_not_the_name() {
    let spans = SpanFields::default();
    let _guard = tracing::subscriber::set_default(tracing_subscriber::registry().with(spans.clone()));

    let teller = Storyteller::new(Arc::new(EchoGenerator::default()));
    teller.reveal(&catalog(), "Alice").await.unwrap();

    let recorded = spans.0.lock().unwrap().clone();
    for wanted in ["reveal", "request_narrative"] {
        let (_, fields) = recorded
            .iter()
            .find(|(name, _)| name == wanted)
            .unwrap_or_else(|| panic!("no {wanted} span"));
        assert!(fields.iter().any(|f| f == "name_len"), "{wanted}: {fields:?}");
        assert!(!fields.iter().any(|f| f == "name"), "{wanted}: {fields:?}");
    }
}
