//! End-to-end tests of the authoring workflow
//!
//! These drive the library, session, editor and store together the way a
//! front-end does: create a book, write pages, flip through it, persist it.

use libro_core::storage::{LocalStorage, MemoryStorage, StorageProvider, LIBRARY_KEY};
use libro_core::{
    export_file_name, CoverColor, Format, HtmlRenderer, Library, LibraryError, LibraryStore,
    MetaField, Mode, PageDraft, Session,
};
use std::sync::Arc;

#[test]
fn test_write_a_book_and_flip_through_it() {
    let mut library = Library::with_default_book();
    let mut session = Session::new();

    let id = library.create_book("Travel Log", CoverColor::Green).unwrap();
    session.open_new(id.clone());
    assert_eq!(session.mode(), Mode::Editing);

    // Write the first page through the editor
    let first = library.book(&id).unwrap().pages[0].clone();
    let mut draft = PageDraft::from_page(&first);
    draft.title = "Departure".to_string();
    draft.content = "We left at dawn".to_string();
    Format::Bold.apply(&mut draft, 8..10);
    library.update_page(&id, draft.commit(&first)).unwrap();

    // Add two more pages, following each one
    for _ in 0..2 {
        let number = library.book_mut(&id).unwrap().add_page();
        session.after_page_added(number);
    }
    assert_eq!(session.spread_index(), 2);
    assert!(!session.showing_cover());

    library
        .update_meta(&id, MetaField::Subtitle, "Notes from the road")
        .unwrap();

    // Read it from the cover
    session.set_mode(Mode::Reading);
    session.show_cover();
    let renderer = HtmlRenderer::new();
    let book = library.book(&id).unwrap();
    assert!(renderer
        .document(book, &session)
        .contains("Notes from the road"));

    session.next(book.page_count());
    let spread = renderer.spread(book, &session);
    assert!(spread.left.contains("<p>We left <strong>at</strong> dawn</p>"));
    assert!(spread.right.contains("New Page 2"));
    assert_eq!(spread.indicator, "1 - 2 / 3");

    session.next(book.page_count());
    let spread = renderer.spread(book, &session);
    assert!(spread.left.contains("New Page 3"));
    assert!(spread.right.contains("page-end"));
    assert!(!spread.has_next);
}

#[test]
fn test_delete_pages_down_to_one() {
    let mut library = Library::new();
    let mut session = Session::new();
    let id = library.create_book("Short", CoverColor::Red).unwrap();
    session.open(id.clone());

    for _ in 0..4 {
        let n = library.book_mut(&id).unwrap().add_page();
        session.after_page_added(n);
    }
    assert_eq!(session.spread_index(), 4);

    loop {
        let book = library.book_mut(&id).unwrap();
        match book.remove_last_page() {
            Ok(_) => session.after_page_removed(book.page_count()),
            Err(e) => {
                assert_eq!(e, LibraryError::LastPage);
                break;
            }
        }
    }
    assert_eq!(library.book(&id).unwrap().page_count(), 1);
    assert_eq!(session.spread_index(), 0);
}

#[test]
fn test_deleting_the_open_book_returns_to_library() {
    let mut library = Library::with_default_book();
    let mut session = Session::new();
    session.open("default-1");
    session.set_mode(Mode::Editing);

    library.delete_book("default-1").unwrap();
    session.on_book_deleted("default-1");

    assert!(library.is_empty());
    assert!(session.active_book().is_none());
    assert_eq!(session.mode(), Mode::Reading);
}

#[test]
fn test_export_then_import_into_another_library() {
    let mut source = Library::new();
    let id = source.create_book("Shared Story", CoverColor::Blue).unwrap();
    source.book_mut(&id).unwrap().add_page();
    let json = source.export_book(&id).unwrap();
    assert_eq!(
        export_file_name(&source.book(&id).unwrap().title),
        "shared_story.json"
    );

    let mut target = Library::with_default_book();
    let imported = target.import_book(&json).unwrap();
    assert_eq!(imported, id);
    let book = target.book(&imported).unwrap();
    assert_eq!(book.cover_color, CoverColor::Blue);
    assert_eq!(book.page_count(), 2);
}

#[tokio::test]
async fn test_store_survives_restart() {
    let dir = tempfile::tempdir().unwrap();

    let store = LibraryStore::local(dir.path());
    let mut library = store.load().await.unwrap();
    let id = library.create_book("Persistent", CoverColor::Black).unwrap();
    store.save(&library).await.unwrap();

    let reopened = LibraryStore::new(Arc::new(LocalStorage::new(dir.path())));
    let library = reopened.load().await.unwrap();
    assert_eq!(library.len(), 2);
    assert_eq!(library.book(&id).unwrap().cover_color, CoverColor::Black);
}

#[tokio::test]
async fn test_corrupt_store_starts_fresh() {
    let provider = Arc::new(MemoryStorage::new());
    provider
        .write(LIBRARY_KEY, b"{ not json".to_vec())
        .await
        .unwrap();
    let library = LibraryStore::new(provider).load().await.unwrap();
    assert_eq!(library.len(), 1);
    assert_eq!(library.books()[0].title, "My First Book");
}
