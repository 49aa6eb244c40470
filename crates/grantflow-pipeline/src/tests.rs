//! Integration tests for the processing pipeline

use crate::{extract_text, PipelineConfig, ProcessingJob, Processor};
use async_trait::async_trait;
use grantflow_domain::{
    ChatMessage, DocumentKind, Organization, TaskId, TaskRecord, TaskStatus, TaskStore,
};
use grantflow_llm::{ChatOptions, ChatProvider, LlmError, MockProvider};
use grantflow_store::MemoryTaskStore;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Write a small single-font PDF with one page per entry in `pages`
fn write_sample_pdf(path: &Path, pages: &[&str]) {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::new();
    for text in pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 24.into()]),
                Operation::new("Td", vec![50.into(), 700.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().unwrap(),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.save(path).unwrap();
}

fn setup(
    provider: Arc<dyn ChatProvider>,
    guidelines_dir: &Path,
) -> (Arc<Processor<MemoryTaskStore>>, Arc<Mutex<MemoryTaskStore>>) {
    let store = Arc::new(Mutex::new(MemoryTaskStore::new()));
    let config = PipelineConfig {
        guidelines_dir: guidelines_dir.to_path_buf(),
        ..PipelineConfig::default()
    };
    let processor = Arc::new(Processor::new(provider, Arc::clone(&store), config));
    (processor, store)
}

fn make_job(task_id: TaskId, pdf_path: &Path) -> ProcessingJob {
    ProcessingJob {
        task_id,
        pdf_path: pdf_path.to_path_buf(),
        instruction: "Summarize the project.".to_string(),
        organization: Organization::Fpi,
        document_kind: DocumentKind::Application,
        options: ChatOptions::default(),
    }
}

#[test]
fn test_extraction_joins_pages_with_blank_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("two_pages.pdf");
    write_sample_pdf(&path, &["First page text", "Second page text"]);

    let text = extract_text(&path, DocumentKind::Application).unwrap();
    assert_eq!(text, "First page text\n\nSecond page text");
}

#[test]
fn test_extraction_omits_empty_pages() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gappy.pdf");
    write_sample_pdf(&path, &["Opening", "", "Closing"]);

    let text = extract_text(&path, DocumentKind::Application).unwrap();
    assert_eq!(text, "Opening\n\nClosing");
}

#[test]
fn test_presentation_extraction_covers_all_slides() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("deck.pdf");
    write_sample_pdf(&path, &["Slide one", "", "Slide two"]);

    let text = extract_text(&path, DocumentKind::Presentation).unwrap();
    assert!(!text.contains('\u{c}'), "form feeds must not survive joining");
    assert_eq!(text, text.trim(), "joined text must carry no outer whitespace");

    let first = text.find("Slide one").expect("first slide text missing");
    let second = text.find("Slide two").expect("second slide text missing");
    assert!(first < second, "slide order must be preserved");
}

#[tokio::test]
async fn test_happy_path_completes_and_removes_upload() {
    let dir = tempfile::tempdir().unwrap();
    let pdf_path = dir.path().join("proposal.pdf");
    write_sample_pdf(&pdf_path, &["A project about solar irrigation."]);

    let provider = Arc::new(MockProvider::new("Strong proposal, fund it."));
    let (processor, store) = setup(provider, dir.path());

    let task_id = TaskId::new();
    store
        .lock()
        .unwrap()
        .create(TaskRecord::new(task_id, "proposal.pdf"))
        .unwrap();

    processor.run(make_job(task_id, &pdf_path)).await;

    let record = store.lock().unwrap().get(task_id).unwrap().unwrap();
    assert_eq!(record.status, TaskStatus::Completed);
    assert_eq!(record.result.as_deref(), Some("Strong proposal, fund it."));
    assert!(record.message.contains("no guidelines found"));
    assert!(!pdf_path.exists(), "upload should be removed after success");
}

#[tokio::test]
async fn test_completion_message_reports_guidelines() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("fpi.txt"), "Budgets are mandatory.").unwrap();
    let pdf_path = dir.path().join("proposal.pdf");
    write_sample_pdf(&pdf_path, &["Project text."]);

    let (processor, store) = setup(Arc::new(MockProvider::new("ok")), dir.path());
    let task_id = TaskId::new();
    store
        .lock()
        .unwrap()
        .create(TaskRecord::new(task_id, "proposal.pdf"))
        .unwrap();

    processor.run(make_job(task_id, &pdf_path)).await;

    let record = store.lock().unwrap().get(task_id).unwrap().unwrap();
    assert_eq!(record.status, TaskStatus::Completed);
    assert!(record.message.contains("guidelines: fpi"));
}

#[tokio::test]
async fn test_malformed_pdf_marks_task_error_and_removes_upload() {
    let dir = tempfile::tempdir().unwrap();
    let pdf_path = dir.path().join("broken.pdf");
    std::fs::write(&pdf_path, b"not a pdf at all").unwrap();

    let (processor, store) = setup(Arc::new(MockProvider::new("unreached")), dir.path());
    let task_id = TaskId::new();
    store
        .lock()
        .unwrap()
        .create(TaskRecord::new(task_id, "broken.pdf"))
        .unwrap();

    processor.run(make_job(task_id, &pdf_path)).await;

    let record = store.lock().unwrap().get(task_id).unwrap().unwrap();
    assert_eq!(record.status, TaskStatus::Error);
    assert!(record.error.as_deref().unwrap().contains("extraction failed"));
    assert!(!pdf_path.exists(), "upload should be removed after failure");
}

#[tokio::test]
async fn test_provider_failure_marks_task_error() {
    let dir = tempfile::tempdir().unwrap();
    let pdf_path = dir.path().join("proposal.pdf");
    write_sample_pdf(&pdf_path, &["Project text."]);

    let provider = MockProvider::new("unused");
    provider.fail_all();
    let (processor, store) = setup(Arc::new(provider), dir.path());

    let task_id = TaskId::new();
    store
        .lock()
        .unwrap()
        .create(TaskRecord::new(task_id, "proposal.pdf"))
        .unwrap();

    processor.run(make_job(task_id, &pdf_path)).await;

    let record = store.lock().unwrap().get(task_id).unwrap().unwrap();
    assert_eq!(record.status, TaskStatus::Error);
    assert!(record.error.as_deref().unwrap().contains("Mock failure"));
}

/// Provider that never answers, for exercising cancellation
struct StalledProvider;

#[async_trait]
impl ChatProvider for StalledProvider {
    async fn chat(
        &self,
        _messages: &[ChatMessage],
        _options: &ChatOptions,
    ) -> Result<String, LlmError> {
        std::future::pending::<()>().await;
        unreachable!()
    }
}

#[tokio::test]
async fn test_cancellation_marks_task_error_and_removes_upload() {
    let dir = tempfile::tempdir().unwrap();
    let pdf_path = dir.path().join("proposal.pdf");
    write_sample_pdf(&pdf_path, &["Project text."]);

    let (processor, store) = setup(Arc::new(StalledProvider), dir.path());
    let task_id = TaskId::new();
    store
        .lock()
        .unwrap()
        .create(TaskRecord::new(task_id, "proposal.pdf"))
        .unwrap();

    let handle = processor.spawn(make_job(task_id, &pdf_path));

    // Give the unit a moment to get past extraction and into the model call.
    tokio::time::sleep(std::time::Duration::from_millis(100)).await;
    handle.cancel();
    handle.join().await;

    let record = store.lock().unwrap().get(task_id).unwrap().unwrap();
    assert_eq!(record.status, TaskStatus::Error);
    assert!(record.error.as_deref().unwrap().contains("cancelled"));
    assert!(!pdf_path.exists(), "upload should be removed after cancel");
}
