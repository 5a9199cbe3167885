//! Integration tests for the resource store.

use docxgen::convert::docx::{summarize, to_bytes};
use docxgen::{ContentItem, Document, DocumentBuilder, LayoutOptions, ResourceStore};
use std::thread;
use tempfile::TempDir;

fn write_template(store: &ResourceStore, name: &str, placeholders: usize) {
    let mut template = Document::new();
    for i in 0..placeholders {
        template.create_paragraph().add_text(format!("placeholder {}", i));
    }
    store.write_bytes(name, &to_bytes(&template).unwrap()).unwrap();
}

#[test]
fn test_leading_slash_resolves_identically() {
    let dir = TempDir::new().unwrap();
    let store = ResourceStore::new(dir.path());
    assert_eq!(store.resolve("name.docx"), store.resolve("/name.docx"));

    assert!(store.write(&Document::new(), "name.docx"));
    assert!(store.exists("/name.docx"));
}

#[test]
fn test_missing_template_is_blank() {
    let dir = TempDir::new().unwrap();
    let store = ResourceStore::new(dir.path());
    assert_eq!(store.read_template("missing.docx").paragraph_count(), 0);
    assert_eq!(store.read_template("").paragraph_count(), 0);
}

#[test]
fn test_template_placeholder_is_dropped() {
    let dir = TempDir::new().unwrap();
    let store = ResourceStore::new(dir.path());
    write_template(&store, "blank.docx", 1);
    assert_eq!(store.read_template("blank.docx").paragraph_count(), 0);

    write_template(&store, "two.docx", 2);
    assert_eq!(store.read_template("two.docx").paragraph_count(), 1);
}

#[test]
fn test_template_content_precedes_body() {
    let dir = TempDir::new().unwrap();
    let store = ResourceStore::new(dir.path());
    write_template(&store, "custom.docx", 2);

    let content = vec![
        Some(ContentItem::unstyled("head")),
        Some(ContentItem::unstyled("body")),
        Some(ContentItem::unstyled("foot")),
    ];
    let options = LayoutOptions::default().with_template("custom.docx");
    let mut builder = DocumentBuilder::with_layout(store.clone(), content, "out.docx", options);
    assert!(builder.build());
    assert_eq!(builder.document().paragraph_count(), 2);

    let summary = summarize(&store.read("out.docx").unwrap()).unwrap();
    assert_eq!(summary.paragraphs, 2);
}

#[test]
fn test_write_reads_back() {
    let dir = TempDir::new().unwrap();
    let store = ResourceStore::new(dir.path());
    let mut document = Document::new();
    document.create_paragraph().add_text("hello");

    assert!(store.write(&document, "hello.docx"));
    let bytes = store.read("hello.docx").unwrap();
    assert!(docx_rs::read_docx(&bytes).is_ok());
}

#[test]
fn test_write_to_invalid_destination_fails() {
    let dir = TempDir::new().unwrap();
    let store = ResourceStore::new(dir.path());
    std::fs::create_dir(dir.path().join("taken.docx")).unwrap();

    assert!(!store.write(&Document::new(), "taken.docx"));
    assert!(dir.path().join("taken.docx").is_dir());
}

#[test]
fn test_concurrent_writes_to_same_name() {
    let dir = TempDir::new().unwrap();
    let store = ResourceStore::new(dir.path());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let store = store.clone();
            thread::spawn(move || {
                let mut document = Document::new();
                document.create_paragraph().add_text(format!("writer {}", i));
                store.write(&document, "shared.docx")
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap());
    }
    let summary = summarize(&store.read("shared.docx").unwrap()).unwrap();
    assert_eq!(summary.paragraphs, 1);
    assert_eq!(store.pending_writes(), 0);
}
