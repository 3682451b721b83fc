//! Behaviour every `Storage` backend must share.
//!
//! Each check gets a fresh backend from the factory passed to [`run_all`].

use chrono::Utc;
use qna_core::{NewAnswer, NewQuestion, NewUser, QnaError, Storage};
use std::future::Future;

pub async fn run_all<S, F, Fut>(make: F)
where
    S: Storage,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    fresh_backend_is_empty(&make().await).await;
    duplicate_username_is_rejected(&make().await).await;
    user_ids_increase(&make().await).await;
    question_round_trip(&make().await).await;
    question_order_is_stable(&make().await).await;
    questions_by_username_are_filtered(&make().await).await;
    answers_are_oldest_first(&make().await).await;
    answer_count_matches_answers(&make().await).await;
}

async fn fresh_backend_is_empty<S: Storage>(storage: &S) {
    assert!(storage.get_questions().await.unwrap().is_empty());
    assert!(storage.get_user(1).await.unwrap().is_none());
    assert!(storage.get_user_by_username("alice").await.unwrap().is_none());
    assert!(storage.get_question_by_id(1).await.unwrap().is_none());
    assert!(storage.get_questions_by_username("alice").await.unwrap().is_empty());
    assert!(storage.get_answers_by_question_id(1).await.unwrap().is_empty());
    assert_eq!(storage.get_answers_count_by_question_id(1).await.unwrap(), 0);
}

async fn duplicate_username_is_rejected<S: Storage>(storage: &S) {
    let alice = storage.create_user(&NewUser::new("alice")).await.unwrap();

    let err = storage.create_user(&NewUser::new("alice")).await.unwrap_err();
    assert!(
        matches!(err, QnaError::DuplicateUsername(ref name) if name == "alice"),
        "unexpected error: {}",
        err
    );

    let found = storage.get_user_by_username("alice").await.unwrap();
    assert_eq!(found, Some(alice.clone()));

    // Matching is case-sensitive
    assert!(storage.get_user_by_username("Alice").await.unwrap().is_none());
    let upper = storage.create_user(&NewUser::new("Alice")).await.unwrap();
    assert_ne!(upper.id, alice.id);
}

async fn user_ids_increase<S: Storage>(storage: &S) {
    let alice = storage.create_user(&NewUser::new("alice")).await.unwrap();
    let bob = storage.create_user(&NewUser::new("bob")).await.unwrap();

    assert!(alice.id > 0);
    assert!(bob.id > alice.id);
    assert!(storage.get_user(bob.id + 1000).await.unwrap().is_none());
    assert_eq!(storage.get_user(bob.id).await.unwrap(), Some(bob));
}

async fn question_round_trip<S: Storage>(storage: &S) {
    let started = Utc::now();
    let input = NewQuestion::new(
        "alice",
        "What is a lifetime?",
        "The compiler keeps talking about 'a.",
    );

    let created = storage.create_question(&input).await.unwrap();
    assert_eq!(created.title, input.title);
    assert_eq!(created.body, input.body);
    assert_eq!(created.username, input.username);
    assert!(created.created_at >= started);

    let fetched = storage.get_question_by_id(created.id).await.unwrap();
    assert_eq!(fetched, Some(created.clone()));

    let answer = storage
        .create_answer(&NewAnswer::new(created.id, "bob", "A scope for a borrow."))
        .await
        .unwrap();
    assert!(answer.created_at >= started);
    let thread = storage.get_answers_by_question_id(created.id).await.unwrap();
    assert_eq!(thread, vec![answer]);
}

async fn question_order_is_stable<S: Storage>(storage: &S) {
    let mut ids = Vec::new();
    for n in 1..=3 {
        let question = storage
            .create_question(&NewQuestion::new("alice", format!("Q{}", n), "body"))
            .await
            .unwrap();
        ids.push(question.id);
    }

    let first: Vec<_> = storage
        .get_questions()
        .await
        .unwrap()
        .into_iter()
        .map(|q| q.id)
        .collect();
    let second: Vec<_> = storage
        .get_questions()
        .await
        .unwrap()
        .into_iter()
        .map(|q| q.id)
        .collect();

    assert_eq!(first, ids);
    assert_eq!(first, second);
}

async fn questions_by_username_are_filtered<S: Storage>(storage: &S) {
    let a1 = storage
        .create_question(&NewQuestion::new("alice", "A1", "body"))
        .await
        .unwrap();
    storage
        .create_question(&NewQuestion::new("bob", "B1", "body"))
        .await
        .unwrap();
    let a2 = storage
        .create_question(&NewQuestion::new("alice", "A2", "body"))
        .await
        .unwrap();

    let alice = storage.get_questions_by_username("alice").await.unwrap();
    assert_eq!(alice, vec![a1, a2]);
    assert!(storage
        .get_questions_by_username("ALICE")
        .await
        .unwrap()
        .is_empty());
    assert_eq!(storage.get_questions().await.unwrap().len(), 3);
}

async fn answers_are_oldest_first<S: Storage>(storage: &S) {
    let q1 = storage
        .create_question(&NewQuestion::new("alice", "Q1", "body"))
        .await
        .unwrap();
    let q2 = storage
        .create_question(&NewQuestion::new("alice", "Q2", "body"))
        .await
        .unwrap();

    let a1 = storage
        .create_answer(&NewAnswer::new(q1.id, "bob", "earlier"))
        .await
        .unwrap();
    let other = storage
        .create_answer(&NewAnswer::new(q2.id, "carol", "unrelated"))
        .await
        .unwrap();
    let a2 = storage
        .create_answer(&NewAnswer::new(q1.id, "carol", "later"))
        .await
        .unwrap();

    assert_eq!(
        storage.get_answers_by_question_id(q1.id).await.unwrap(),
        vec![a1, a2]
    );
    assert_eq!(
        storage.get_answers_by_question_id(q2.id).await.unwrap(),
        vec![other]
    );
}

async fn answer_count_matches_answers<S: Storage>(storage: &S) {
    let busy = storage
        .create_question(&NewQuestion::new("alice", "Busy", "body"))
        .await
        .unwrap();
    let quiet = storage
        .create_question(&NewQuestion::new("alice", "Quiet", "body"))
        .await
        .unwrap();
    for n in 0..3 {
        storage
            .create_answer(&NewAnswer::new(busy.id, "bob", format!("answer {}", n)))
            .await
            .unwrap();
    }

    for id in [busy.id, quiet.id, 999] {
        let answers = storage.get_answers_by_question_id(id).await.unwrap();
        let count = storage.get_answers_count_by_question_id(id).await.unwrap();
        assert_eq!(count, answers.len() as u64, "question {}", id);
    }
    assert_eq!(
        storage.get_answers_count_by_question_id(busy.id).await.unwrap(),
        3
    );
}
