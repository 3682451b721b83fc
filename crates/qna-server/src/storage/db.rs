//! SQLite database layer (embedded, selected by `DATABASE_URL`)

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use qna_core::{Answer, Id, NewAnswer, NewQuestion, NewUser, QnaError, Question, Storage, User};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

pub struct SqlStorage {
    pool: Arc<SqlitePool>,
}

impl SqlStorage {
    /// Connect to `database_url` and make sure the schema exists
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        tracing::info!("Opening SQLite database at: {}", database_url);

        let in_memory = is_in_memory(database_url);
        if let Some(parent) = database_file(database_url).and_then(Path::parent) {
            if !parent.as_os_str().is_empty() {
                tracing::info!("Creating parent directory: {}", parent.display());
                tokio::fs::create_dir_all(parent).await.with_context(|| {
                    format!("Failed to create database directory: {}", parent.display())
                })?;
            }
        }

        let mut options = SqliteConnectOptions::from_str(database_url)
            .with_context(|| format!("Invalid database URL: {}", database_url))?
            .create_if_missing(true)
            .foreign_keys(true);
        if !in_memory {
            options = options
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal);
        }

        // Every connection to an in-memory database is a separate database,
        // so the pool must hold exactly one connection and never recycle it.
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(max_connections)
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .with_context(|| format!("Failed to connect to SQLite database at: {}", database_url))?;

        tracing::info!("SQLite connection established, creating schema...");

        Self::run_migrations(&pool)
            .await
            .context("Failed to run database migrations")?;

        tracing::info!("Database initialization complete");

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    async fn run_migrations(pool: &SqlitePool) -> Result<()> {
        // Users table
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                username TEXT NOT NULL UNIQUE
            )
            "#,
        )
        .execute(pool)
        .await?;

        // Questions table
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS questions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                body TEXT NOT NULL,
                username TEXT NOT NULL,
                created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            "#,
        )
        .execute(pool)
        .await?;

        // Answers table
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS answers (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                question_id INTEGER NOT NULL,
                body TEXT NOT NULL,
                username TEXT NOT NULL,
                created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
                CONSTRAINT fk_question FOREIGN KEY (question_id)
                    REFERENCES questions (id) ON DELETE CASCADE
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_questions_username ON questions (username)")
            .execute(pool)
            .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_answers_question_id ON answers (question_id)")
            .execute(pool)
            .await?;

        Ok(())
    }
}

#[async_trait]
impl Storage for SqlStorage {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    // User operations
    async fn get_user(&self, id: Id) -> qna_core::Result<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT id, username FROM users WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&*self.pool)
        .await
        .map_err(database_error)?;

        Ok(row.map(|r| r.into()))
    }

    async fn get_user_by_username(&self, username: &str) -> qna_core::Result<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT id, username FROM users WHERE username = ?1
            "#,
        )
        .bind(username)
        .fetch_optional(&*self.pool)
        .await
        .map_err(database_error)?;

        Ok(row.map(|r| r.into()))
    }

    async fn create_user(&self, user: &NewUser) -> qna_core::Result<User> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (username) VALUES (?1)
            "#,
        )
        .bind(&user.username)
        .execute(&*self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                QnaError::DuplicateUsername(user.username.clone())
            } else {
                database_error(e)
            }
        })?;

        Ok(User {
            id: result.last_insert_rowid(),
            username: user.username.clone(),
        })
    }

    // Question operations
    async fn get_questions(&self) -> qna_core::Result<Vec<Question>> {
        let rows: Vec<QuestionRow> = sqlx::query_as(
            r#"
            SELECT id, title, body, username, created_at
            FROM questions
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .fetch_all(&*self.pool)
        .await
        .map_err(database_error)?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn get_question_by_id(&self, id: Id) -> qna_core::Result<Option<Question>> {
        let row: Option<QuestionRow> = sqlx::query_as(
            r#"
            SELECT id, title, body, username, created_at
            FROM questions WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&*self.pool)
        .await
        .map_err(database_error)?;

        Ok(row.map(|r| r.into()))
    }

    async fn get_questions_by_username(&self, username: &str) -> qna_core::Result<Vec<Question>> {
        let rows: Vec<QuestionRow> = sqlx::query_as(
            r#"
            SELECT id, title, body, username, created_at
            FROM questions WHERE username = ?1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(username)
        .fetch_all(&*self.pool)
        .await
        .map_err(database_error)?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn create_question(&self, question: &NewQuestion) -> qna_core::Result<Question> {
        let created_at = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO questions (title, body, username, created_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&question.title)
        .bind(&question.body)
        .bind(&question.username)
        .bind(created_at)
        .execute(&*self.pool)
        .await
        .map_err(database_error)?;

        Ok(Question {
            id: result.last_insert_rowid(),
            title: question.title.clone(),
            body: question.body.clone(),
            username: question.username.clone(),
            created_at,
        })
    }

    // Answer operations
    async fn get_answers_by_question_id(&self, question_id: Id) -> qna_core::Result<Vec<Answer>> {
        let rows: Vec<AnswerRow> = sqlx::query_as(
            r#"
            SELECT id, question_id, body, username, created_at
            FROM answers WHERE question_id = ?1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(question_id)
        .fetch_all(&*self.pool)
        .await
        .map_err(database_error)?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn create_answer(&self, answer: &NewAnswer) -> qna_core::Result<Answer> {
        let created_at = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO answers (question_id, body, username, created_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(answer.question_id)
        .bind(&answer.body)
        .bind(&answer.username)
        .bind(created_at)
        .execute(&*self.pool)
        .await
        .map_err(database_error)?;

        Ok(Answer {
            id: result.last_insert_rowid(),
            question_id: answer.question_id,
            body: answer.body.clone(),
            username: answer.username.clone(),
            created_at,
        })
    }

    async fn get_answers_count_by_question_id(&self, question_id: Id) -> qna_core::Result<u64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM answers WHERE question_id = ?1
            "#,
        )
        .bind(question_id)
        .fetch_one(&*self.pool)
        .await
        .map_err(database_error)?;

        Ok(u64::try_from(count).unwrap_or(0))
    }

    async fn close(&self) {
        tracing::info!("Closing database connection pool");
        self.pool.close().await;
    }
}

fn database_error(e: sqlx::Error) -> QnaError {
    QnaError::Database(e.to_string())
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .map(|db| db.is_unique_violation())
        .unwrap_or(false)
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

/// File path named by a `sqlite:` URL, if it names one
fn database_file(database_url: &str) -> Option<&Path> {
    if is_in_memory(database_url) {
        return None;
    }
    let rest = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))?;
    let path = rest.split('?').next().unwrap_or_default();
    if path.is_empty() {
        None
    } else {
        Some(Path::new(path))
    }
}

// Helper structs for sqlx query_as
#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
}

impl From<UserRow> for User {
    fn from(r: UserRow) -> Self {
        User {
            id: r.id,
            username: r.username,
        }
    }
}

#[derive(sqlx::FromRow)]
struct QuestionRow {
    id: i64,
    title: String,
    body: String,
    username: String,
    created_at: DateTime<Utc>,
}

impl From<QuestionRow> for Question {
    fn from(r: QuestionRow) -> Self {
        Question {
            id: r.id,
            title: r.title,
            body: r.body,
            username: r.username,
            created_at: r.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct AnswerRow {
    id: i64,
    question_id: i64,
    body: String,
    username: String,
    created_at: DateTime<Utc>,
}

impl From<AnswerRow> for Answer {
    fn from(r: AnswerRow) -> Self {
        Answer {
            id: r.id,
            question_id: r.question_id,
            body: r.body,
            username: r.username,
            created_at: r.created_at,
        }
    }
}
