//! Chat session persistence.
//!
//! Each account has at most one active session (enforced by a partial unique
//! index). The active session is overwritten in place on every accepted chat
//! message; ended sessions are kept and still count as history.

use sqlx::SqlitePool;

use crate::models::ChatSession;
use crate::Result;

/// Snapshot of one accepted exchange.
#[derive(Debug, Clone, Copy)]
pub struct Exchange<'a> {
    pub user_message: &'a str,
    pub bot_response: &'a str,
    pub assistant_role: &'a str,
    pub system_role: &'a str,
}

/// Create the active session for an account, or overwrite the existing one.
///
/// Runs as a single upsert so two deliveries can never create two active
/// sessions for the same account.
pub async fn record_exchange(
    pool: &SqlitePool,
    account_id: i64,
    exchange: Exchange<'_>,
) -> Result<ChatSession> {
    let session = sqlx::query_as::<_, ChatSession>(
        r#"
        INSERT INTO chat_sessions (account_id, is_active, user_message, bot_response, assistant_role, system_role)
        VALUES (?, 1, ?, ?, ?, ?)
        ON CONFLICT(account_id) WHERE is_active = 1 DO UPDATE SET
            user_message = excluded.user_message,
            bot_response = excluded.bot_response,
            assistant_role = excluded.assistant_role,
            system_role = excluded.system_role
        RETURNING id, account_id, is_active, user_message, bot_response,
                  assistant_role, system_role, created_at
        "#,
    )
    .bind(account_id)
    .bind(exchange.user_message)
    .bind(exchange.bot_response)
    .bind(exchange.assistant_role)
    .bind(exchange.system_role)
    .fetch_one(pool)
    .await?;

    Ok(session)
}

/// Record an exchange and charge one message against the account's daily quota.
///
/// Both writes share one transaction: if the account is already at its cap
/// the upsert is rolled back and `None` is returned. Dropping the future
/// before it completes leaves neither write behind.
pub async fn record_exchange_within_quota(
    pool: &SqlitePool,
    account_id: i64,
    exchange: Exchange<'_>,
) -> Result<Option<ChatSession>> {
    let mut tx = pool.begin().await?;

    let session = sqlx::query_as::<_, ChatSession>(
        r#"
        INSERT INTO chat_sessions (account_id, is_active, user_message, bot_response, assistant_role, system_role)
        VALUES (?, 1, ?, ?, ?, ?)
        ON CONFLICT(account_id) WHERE is_active = 1 DO UPDATE SET
            user_message = excluded.user_message,
            bot_response = excluded.bot_response,
            assistant_role = excluded.assistant_role,
            system_role = excluded.system_role
        RETURNING id, account_id, is_active, user_message, bot_response,
                  assistant_role, system_role, created_at
        "#,
    )
    .bind(account_id)
    .bind(exchange.user_message)
    .bind(exchange.bot_response)
    .bind(exchange.assistant_role)
    .bind(exchange.system_role)
    .fetch_one(&mut *tx)
    .await?;

    let charged = sqlx::query(
        r#"
        UPDATE accounts
        SET current_message_count = current_message_count + 1,
            updated_at = datetime('now')
        WHERE id = ? AND current_message_count < daily_message_limit
        "#,
    )
    .bind(account_id)
    .execute(&mut *tx)
    .await?;

    if charged.rows_affected() != 1 {
        tx.rollback().await?;
        return Ok(None);
    }

    tx.commit().await?;
    Ok(Some(session))
}

/// Get the active session for an account, if any.
pub async fn get_active_session(pool: &SqlitePool, account_id: i64) -> Result<Option<ChatSession>> {
    let session = sqlx::query_as::<_, ChatSession>(
        r#"
        SELECT id, account_id, is_active, user_message, bot_response,
               assistant_role, system_role, created_at
        FROM chat_sessions
        WHERE account_id = ? AND is_active = 1
        "#,
    )
    .bind(account_id)
    .fetch_optional(pool)
    .await?;

    Ok(session)
}

/// Mark the active session inactive, keeping its recorded text.
///
/// Returns whether there was an active session to end.
pub async fn end_active_session(pool: &SqlitePool, account_id: i64) -> Result<bool> {
    let result = sqlx::query(
        r#"
        UPDATE chat_sessions
        SET is_active = 0
        WHERE account_id = ? AND is_active = 1
        "#,
    )
    .bind(account_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Get up to `limit` most recent sessions, returned oldest first.
pub async fn recent_sessions(
    pool: &SqlitePool,
    account_id: i64,
    limit: usize,
) -> Result<Vec<ChatSession>> {
    let mut sessions = sqlx::query_as::<_, ChatSession>(
        r#"
        SELECT id, account_id, is_active, user_message, bot_response,
               assistant_role, system_role, created_at
        FROM chat_sessions
        WHERE account_id = ?
        ORDER BY created_at DESC, id DESC
        LIMIT ?
        "#,
    )
    .bind(account_id)
    .bind(limit as i64)
    .fetch_all(pool)
    .await?;

    sessions.reverse();
    Ok(sessions)
}

/// List every session for an account, newest first.
pub async fn list_sessions(pool: &SqlitePool, account_id: i64) -> Result<Vec<ChatSession>> {
    let sessions = sqlx::query_as::<_, ChatSession>(
        r#"
        SELECT id, account_id, is_active, user_message, bot_response,
               assistant_role, system_role, created_at
        FROM chat_sessions
        WHERE account_id = ?
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .bind(account_id)
    .fetch_all(pool)
    .await?;

    Ok(sessions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{account, Database};

    async fn test_db() -> Database {
        let db = Database::connect_in_memory().await.unwrap();
        db.migrate().await.unwrap();
        db
    }

    fn exchange<'a>(user: &'a str, bot: &'a str) -> Exchange<'a> {
        Exchange {
            user_message: user,
            bot_response: bot,
            assistant_role: "psychologist",
            system_role: "therapeutic",
        }
    }

    #[tokio::test]
    async fn test_active_session_is_reused() {
        let db = test_db().await;
        let (acct, _) = account::get_or_create_account(db.pool(), "999").await.unwrap();

        let first = record_exchange(db.pool(), acct.id, exchange("Hello", "Hi"))
            .await
            .unwrap();
        let second = record_exchange(db.pool(), acct.id, exchange("Again", "Sure"))
            .await
            .unwrap();

        assert_eq!(first.id, second.id);
        assert!(second.is_active);
        assert_eq!(second.user_message, "Again");
        assert_eq!(second.bot_response, "Sure");
        assert_eq!(list_sessions(db.pool(), acct.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_end_session_keeps_text() {
        let db = test_db().await;
        let (acct, _) = account::get_or_create_account(db.pool(), "1010").await.unwrap();

        assert!(!end_active_session(db.pool(), acct.id).await.unwrap());

        record_exchange(db.pool(), acct.id, exchange("Hello", "Hi"))
            .await
            .unwrap();
        assert!(end_active_session(db.pool(), acct.id).await.unwrap());
        assert!(get_active_session(db.pool(), acct.id).await.unwrap().is_none());

        let sessions = list_sessions(db.pool(), acct.id).await.unwrap();
        assert_eq!(sessions.len(), 1);
        assert!(!sessions[0].is_active);
        assert_eq!(sessions[0].user_message, "Hello");

        // A new message after ending opens a fresh active session.
        let next = record_exchange(db.pool(), acct.id, exchange("New", "Topic"))
            .await
            .unwrap();
        assert_ne!(next.id, sessions[0].id);
        assert_eq!(list_sessions(db.pool(), acct.id).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_recent_sessions_window_is_chronological() {
        let db = test_db().await;
        let (acct, _) = account::get_or_create_account(db.pool(), "w").await.unwrap();

        for i in 0..7 {
            let user = format!("u{}", i);
            let bot = format!("b{}", i);
            record_exchange(db.pool(), acct.id, exchange(&user, &bot))
                .await
                .unwrap();
            end_active_session(db.pool(), acct.id).await.unwrap();
        }

        let recent = recent_sessions(db.pool(), acct.id, 5).await.unwrap();
        let users: Vec<&str> = recent.iter().map(|s| s.user_message.as_str()).collect();
        assert_eq!(users, vec!["u2", "u3", "u4", "u5", "u6"]);
    }

    #[tokio::test]
    async fn test_quota_exchange_charges_and_records_together() {
        let db = test_db().await;
        let (acct, _) = account::get_or_create_account(db.pool(), "cap").await.unwrap();
        account::set_daily_message_limit(db.pool(), "cap", 1).await.unwrap();

        let first = record_exchange_within_quota(db.pool(), acct.id, exchange("one", "a"))
            .await
            .unwrap();
        assert!(first.is_some());
        assert_eq!(
            account::get_account(db.pool(), "cap").await.unwrap().current_message_count,
            1
        );

        // At the cap nothing is written, not even the session text.
        let second = record_exchange_within_quota(db.pool(), acct.id, exchange("two", "b"))
            .await
            .unwrap();
        assert!(second.is_none());

        let active = get_active_session(db.pool(), acct.id).await.unwrap().unwrap();
        assert_eq!(active.user_message, "one");
        assert_eq!(
            account::get_account(db.pool(), "cap").await.unwrap().current_message_count,
            1
        );
    }

    #[tokio::test]
    async fn test_sessions_deleted_with_account() {
        let db = test_db().await;
        let (acct, _) = account::get_or_create_account(db.pool(), "gone").await.unwrap();
        record_exchange(db.pool(), acct.id, exchange("a", "b")).await.unwrap();

        account::delete_account(db.pool(), "gone").await.unwrap();
        assert!(list_sessions(db.pool(), acct.id).await.unwrap().is_empty());
    }
}
