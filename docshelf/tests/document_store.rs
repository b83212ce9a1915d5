use std::collections::HashSet;

use chrono::{DateTime, Duration, TimeZone, Utc};
use docshelf::{memory::InMemoryStore, prelude::*};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 9, 1, 12, 0, 0).unwrap()
}

fn john() -> Author {
    Author::new("author1", "John Doe")
}

fn jane() -> Author {
    Author::new("author2", "Jane Smith")
}

fn ids(documents: &[Document]) -> HashSet<String> {
    documents
        .iter()
        .map(|doc| doc.id.clone())
        .collect()
}

/// Saves the three library documents and returns the store with the saved records.
async fn library() -> (DocumentStore<InMemoryStore>, Vec<Document>) {
    let store = DocumentStore::new(InMemoryStore::new());

    let intro = Document::builder()
        .id("doc1")
        .title("Introduction to Java")
        .content("This document explains the basics of Java.")
        .author(john())
        .created(now())
        .build();
    let advanced = Document::builder()
        .id("doc2")
        .title("Advanced Java Programming")
        .content("This document covers advanced topics in Java.")
        .author(john())
        .created(now() - Duration::seconds(3600))
        .build();
    let kotlin = Document::builder()
        .title("Kotlin for Java Developers")
        .content("A guide to Kotlin for Java developers.")
        .author(jane())
        .created(now() - Duration::days(1))
        .build();

    let mut saved = Vec::new();
    for doc in [intro, advanced, kotlin] {
        saved.push(store.save(doc).await.unwrap());
    }

    (store, saved)
}

#[tokio::test]
async fn save_assigns_ids_only_when_missing() {
    let (store, saved) = library().await;

    assert_eq!(saved[0].id, "doc1");
    assert_eq!(saved[1].id, "doc2");
    assert_eq!(saved[2].id, "1");
    assert_eq!(saved[2].title.as_deref(), Some("Kotlin for Java Developers"));
    assert_eq!(saved[2].author, Some(jane()));
    assert_eq!(saved[2].created, Some(now() - Duration::days(1)));
    assert_eq!(store.count().await.unwrap(), 3);
}

#[tokio::test]
async fn find_by_id_returns_saved_document() {
    let (store, saved) = library().await;

    for doc in &saved {
        assert_eq!(store.find_by_id(&doc.id).await.unwrap().as_ref(), Some(doc));
    }
    assert_eq!(store.find_by_id("nonexistentId").await.unwrap(), None);
}

#[tokio::test]
async fn saving_under_existing_id_replaces_record() {
    let (store, _) = library().await;

    let replacement = Document::builder()
        .id("doc1")
        .title("Advanced Java Programming")
        .content("This document covers advanced topics in Java.")
        .author(john())
        .created(now() - Duration::seconds(3600))
        .build();

    let saved = store.save(replacement.clone()).await.unwrap();

    assert_eq!(saved, replacement);
    assert_eq!(store.find_by_id("doc1").await.unwrap(), Some(replacement));
    assert_eq!(store.count().await.unwrap(), 3);
}

#[tokio::test]
async fn unconstrained_search_returns_everything() {
    let (store, saved) = library().await;

    let found = store.search(&SearchRequest::new()).await.unwrap();

    assert_eq!(found.len(), saved.len());
    assert_eq!(ids(&found), ids(&saved));
}

#[tokio::test]
async fn search_combines_all_categories() {
    let (store, _) = library().await;

    let request = SearchRequest::builder()
        .title_prefix("Advanced")
        .contains_content("Java")
        .author_id("author1")
        .created_from(now() - Duration::seconds(7200))
        .build();
    let found = store.search(&request).await.unwrap();
    assert_eq!(ids(&found), HashSet::from(["doc2".to_string()]));

    let found = store
        .search(&SearchRequest::builder().title_prefix("Intro").author_id("author2").build())
        .await
        .unwrap();
    assert!(found.is_empty());
}

#[tokio::test]
async fn lists_within_a_category_are_alternatives() {
    let (store, _) = library().await;

    let found = store
        .search(&SearchRequest::builder().title_prefixes(["Intro", "Kotlin"]).build())
        .await
        .unwrap();
    assert_eq!(ids(&found), HashSet::from(["doc1".to_string(), "1".to_string()]));

    let found = store
        .search(&SearchRequest::builder().author_ids(["author2", "nobody"]).build())
        .await
        .unwrap();
    assert_eq!(ids(&found), HashSet::from(["1".to_string()]));

    let found = store
        .search(&SearchRequest::builder().contains_contents(["basics", "guide"]).build())
        .await
        .unwrap();
    assert_eq!(ids(&found), HashSet::from(["doc1".to_string(), "1".to_string()]));
}

#[tokio::test]
async fn title_and_author_must_both_match() {
    let store = DocumentStore::new(InMemoryStore::new());
    for (id, title, author) in [
        ("a", "Advanced X", john()),
        ("b", "Advanced X", jane()),
        ("c", "Basic X", john()),
    ] {
        store
            .save(Document::builder().id(id).title(title).author(author).build())
            .await
            .unwrap();
    }

    let found = store
        .search(&SearchRequest::builder().title_prefix("Adv").author_id("author1").build())
        .await
        .unwrap();

    assert_eq!(ids(&found), HashSet::from(["a".to_string()]));
}

#[tokio::test]
async fn creation_range_is_inclusive() {
    let store = DocumentStore::new(InMemoryStore::new());
    let from = now() - Duration::hours(2);
    let to = now();

    for (id, created) in [
        ("at-from", from),
        ("at-to", to),
        ("inside", from + Duration::hours(1)),
        ("before", from - Duration::seconds(1)),
        ("after", to + Duration::seconds(1)),
    ] {
        store
            .save(Document::builder().id(id).created(created).build())
            .await
            .unwrap();
    }
    store.save(Document::builder().id("undated").build()).await.unwrap();

    let found = store
        .search(&SearchRequest::builder().created_from(from).created_to(to).build())
        .await
        .unwrap();
    assert_eq!(
        ids(&found),
        HashSet::from(["at-from".to_string(), "at-to".to_string(), "inside".to_string()])
    );

    let found = store
        .search(&SearchRequest::builder().created_to(from).build())
        .await
        .unwrap();
    assert_eq!(ids(&found), HashSet::from(["at-from".to_string(), "before".to_string()]));
}

#[tokio::test]
async fn documents_missing_a_field_fail_that_category_only() {
    let store = DocumentStore::new(InMemoryStore::new());
    store.save(Document::builder().id("bare").build()).await.unwrap();

    for request in [
        SearchRequest::builder().title_prefix("").build(),
        SearchRequest::builder().contains_content("").build(),
        SearchRequest::builder().author_id("").build(),
        SearchRequest::builder().created_from(now()).build(),
    ] {
        assert!(store.search(&request).await.unwrap().is_empty(), "{request:?}");
    }

    let found = store.search(&SearchRequest::new()).await.unwrap();
    assert_eq!(ids(&found), HashSet::from(["bare".to_string()]));
}

#[tokio::test]
async fn matching_is_case_sensitive() {
    let (store, _) = library().await;

    let found = store
        .search(&SearchRequest::builder().title_prefix("advanced").build())
        .await
        .unwrap();
    assert!(found.is_empty());

    let found = store
        .search(&SearchRequest::builder().contains_content("java").build())
        .await
        .unwrap();
    assert!(found.is_empty());
}

#[tokio::test]
async fn query_accepts_custom_filters() {
    let (store, _) = library().await;

    let found = store
        .query(
            Filter::contains(Field::Content, "Java")
                .and(Filter::ne(Field::AuthorName, "John Doe")),
        )
        .await
        .unwrap();

    assert_eq!(ids(&found), HashSet::from(["1".to_string()]));
}

#[tokio::test]
async fn dyn_store_behaves_like_typed_store() {
    let store = DocumentStore::new(InMemoryStore::builder().first_id(10).build().await.unwrap())
        .into_dyn();

    let saved = store
        .save(Document::builder().title("Notes").build())
        .await
        .unwrap();

    assert_eq!(saved.id, "10");
    assert!(store.backend_as::<InMemoryStore>().is_some());
    assert_eq!(store.find_by_id("10").await.unwrap(), Some(saved));
    assert_eq!(
        store
            .search(&SearchRequest::builder().title_prefix("No").build())
            .await
            .unwrap()
            .len(),
        1
    );

    store.shutdown().await.unwrap();
}

#[tokio::test]
async fn json_round_trip_through_the_store() {
    let store = DocumentStore::new(InMemoryStore::new());
    let incoming = serde_json::json!({
        "title": "Imported",
        "author": { "id": "author1", "name": "John Doe" },
        "created": "2024-09-01T10:00:00Z",
    });

    let saved = store.save(Document::from_json(incoming).unwrap()).await.unwrap();
    let exported = store
        .find_by_id(&saved.id)
        .await
        .unwrap()
        .unwrap()
        .to_json()
        .unwrap();

    assert_eq!(exported["id"], "1");
    assert_eq!(exported["title"], "Imported");
    assert_eq!(exported["author"]["id"], "author1");
    assert!(exported.get("content").is_none());
}
