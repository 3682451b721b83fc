//! In-memory storage using DashMap (development and test substitute for SQLite)

use async_trait::async_trait;
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use qna_core::{
    Answer, Id, NewAnswer, NewQuestion, NewUser, QnaError, Question, Result, Storage, User,
};
use std::sync::atomic::{AtomicI64, Ordering};

/// Map-backed store. State lives exactly as long as the value.
pub struct MemoryStorage {
    users: DashMap<Id, User>,
    /// username -> user id; the single point of username uniqueness
    usernames: DashMap<String, Id>,
    questions: DashMap<Id, Question>,
    answers: DashMap<Id, Answer>,
    user_ids: IdCounter,
    question_ids: IdCounter,
    answer_ids: IdCounter,
}

/// Monotonic id source starting at 1
struct IdCounter(AtomicI64);

impl IdCounter {
    fn new() -> Self {
        Self(AtomicI64::new(1))
    }

    fn next(&self) -> Id {
        self.0.fetch_add(1, Ordering::SeqCst)
    }
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
            usernames: DashMap::new(),
            questions: DashMap::new(),
            answers: DashMap::new(),
            user_ids: IdCounter::new(),
            question_ids: IdCounter::new(),
            answer_ids: IdCounter::new(),
        }
    }

    fn collect_questions<F>(&self, keep: F) -> Vec<Question>
    where
        F: Fn(&Question) -> bool,
    {
        let mut questions: Vec<Question> = self
            .questions
            .iter()
            .filter(|entry| keep(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();
        questions.sort_by(|a, b| (a.created_at, a.id).cmp(&(b.created_at, b.id)));
        questions
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn get_user(&self, id: Id) -> Result<Option<User>> {
        Ok(self.users.get(&id).map(|entry| entry.value().clone()))
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let Some(id) = self.usernames.get(username).map(|entry| *entry.value()) else {
            return Ok(None);
        };
        self.get_user(id).await
    }

    async fn create_user(&self, user: &NewUser) -> Result<User> {
        // The index shard stays locked until the user row is in place, so a
        // concurrent lookup never sees the name without its record.
        match self.usernames.entry(user.username.clone()) {
            Entry::Occupied(_) => Err(QnaError::DuplicateUsername(user.username.clone())),
            Entry::Vacant(slot) => {
                let created = User {
                    id: self.user_ids.next(),
                    username: user.username.clone(),
                };
                self.users.insert(created.id, created.clone());
                slot.insert(created.id);
                Ok(created)
            }
        }
    }

    async fn get_questions(&self) -> Result<Vec<Question>> {
        Ok(self.collect_questions(|_| true))
    }

    async fn get_question_by_id(&self, id: Id) -> Result<Option<Question>> {
        Ok(self.questions.get(&id).map(|entry| entry.value().clone()))
    }

    async fn get_questions_by_username(&self, username: &str) -> Result<Vec<Question>> {
        Ok(self.collect_questions(|q| q.username == username))
    }

    async fn create_question(&self, question: &NewQuestion) -> Result<Question> {
        let created = Question {
            id: self.question_ids.next(),
            title: question.title.clone(),
            body: question.body.clone(),
            username: question.username.clone(),
            created_at: Utc::now(),
        };
        self.questions.insert(created.id, created.clone());
        Ok(created)
    }

    async fn get_answers_by_question_id(&self, question_id: Id) -> Result<Vec<Answer>> {
        let mut answers: Vec<Answer> = self
            .answers
            .iter()
            .filter(|entry| entry.question_id == question_id)
            .map(|entry| entry.value().clone())
            .collect();
        answers.sort_by(|a, b| (a.created_at, a.id).cmp(&(b.created_at, b.id)));
        Ok(answers)
    }

    async fn create_answer(&self, answer: &NewAnswer) -> Result<Answer> {
        let created = Answer {
            id: self.answer_ids.next(),
            question_id: answer.question_id,
            body: answer.body.clone(),
            username: answer.username.clone(),
            created_at: Utc::now(),
        };
        self.answers.insert(created.id, created.clone());
        Ok(created)
    }

    async fn get_answers_count_by_question_id(&self, question_id: Id) -> Result<u64> {
        let count = self
            .answers
            .iter()
            .filter(|entry| entry.question_id == question_id)
            .count();
        Ok(count as u64)
    }
}
