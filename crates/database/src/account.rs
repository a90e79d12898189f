//! Account operations.
//!
//! Mutations that guard an invariant (quota cap, single-use codes) are single
//! conditional `UPDATE` statements so concurrent deliveries for the same chat
//! cannot interleave a read and a write.

use sqlx::SqlitePool;

use crate::catalog::{AssistantRole, SystemRole};
use crate::error::{DatabaseError, Result};
use crate::models::Account;
use crate::validation::{validate_daily_limit, validate_phone_number, validate_token_limit};

/// Get an account by chat ID, creating an empty one if absent.
///
/// Returns the account and whether it was created by this call.
pub async fn get_or_create_account(pool: &SqlitePool, chat_id: &str) -> Result<(Account, bool)> {
    let result = sqlx::query(
        r#"
        INSERT INTO accounts (chat_id)
        VALUES (?)
        ON CONFLICT(chat_id) DO NOTHING
        "#,
    )
    .bind(chat_id)
    .execute(pool)
    .await?;

    let created = result.rows_affected() == 1;
    if created {
        tracing::debug!(chat_id = %chat_id, "Created account");
    }

    let account = get_account(pool, chat_id).await?;
    Ok((account, created))
}

/// Get an account by chat ID.
pub async fn get_account(pool: &SqlitePool, chat_id: &str) -> Result<Account> {
    find_account(pool, chat_id)
        .await?
        .ok_or_else(|| DatabaseError::NotFound {
            entity: "Account",
            id: chat_id.to_string(),
        })
}

/// Find an account by chat ID.
pub async fn find_account(pool: &SqlitePool, chat_id: &str) -> Result<Option<Account>> {
    let account = sqlx::query_as::<_, Account>(
        r#"
        SELECT id, chat_id, phone_number, otp_hash, is_authenticated,
               daily_message_limit, current_message_count, token_limit,
               assistant_role, system_role, created_at, updated_at
        FROM accounts
        WHERE chat_id = ?
        "#,
    )
    .bind(chat_id)
    .fetch_optional(pool)
    .await?;

    Ok(account)
}

/// Find the account a phone number is attached to.
pub async fn find_account_by_phone(pool: &SqlitePool, phone: &str) -> Result<Option<Account>> {
    let account = sqlx::query_as::<_, Account>(
        r#"
        SELECT id, chat_id, phone_number, otp_hash, is_authenticated,
               daily_message_limit, current_message_count, token_limit,
               assistant_role, system_role, created_at, updated_at
        FROM accounts
        WHERE phone_number = ?
        "#,
    )
    .bind(phone)
    .fetch_optional(pool)
    .await?;

    Ok(account)
}

/// Store a phone number and a pending code fingerprint, creating the account if needed.
///
/// Always clears the authenticated flag: a new login attempt restarts the
/// code flow. Fails with `AlreadyExists` if another account owns the phone.
pub async fn set_pending_otp(
    pool: &SqlitePool,
    chat_id: &str,
    phone: &str,
    otp_hash: &str,
) -> Result<Account> {
    let phone = phone.trim();
    validate_phone_number(phone)?;

    sqlx::query(
        r#"
        INSERT INTO accounts (chat_id, phone_number, otp_hash, is_authenticated)
        VALUES (?, ?, ?, 0)
        ON CONFLICT(chat_id) DO UPDATE SET
            phone_number = excluded.phone_number,
            otp_hash = excluded.otp_hash,
            is_authenticated = 0,
            updated_at = datetime('now')
        "#,
    )
    .bind(chat_id)
    .bind(phone)
    .bind(otp_hash)
    .execute(pool)
    .await
    .map_err(|e| DatabaseError::from_unique(e, "Phone number", phone))?;

    get_account(pool, chat_id).await
}

/// Consume a pending code.
///
/// Succeeds only if the account exists and its pending fingerprint equals
/// `otp_hash`; on success the account is authenticated and the fingerprint
/// cleared, so the same code cannot be used twice.
pub async fn verify_otp(pool: &SqlitePool, chat_id: &str, otp_hash: &str) -> Result<bool> {
    let result = sqlx::query(
        r#"
        UPDATE accounts
        SET is_authenticated = 1, otp_hash = NULL, updated_at = datetime('now')
        WHERE chat_id = ? AND otp_hash = ?
        "#,
    )
    .bind(chat_id)
    .bind(otp_hash)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() == 1)
}

/// Set the authenticated flag. Returns false if the account does not exist.
pub async fn set_authenticated(pool: &SqlitePool, chat_id: &str, authenticated: bool) -> Result<bool> {
    let result = sqlx::query(
        r#"
        UPDATE accounts
        SET is_authenticated = ?, updated_at = datetime('now')
        WHERE chat_id = ?
        "#,
    )
    .bind(authenticated)
    .bind(chat_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() == 1)
}

/// Set the chosen assistant persona.
pub async fn set_assistant_role(pool: &SqlitePool, chat_id: &str, role: AssistantRole) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE accounts
        SET assistant_role = ?, updated_at = datetime('now')
        WHERE chat_id = ?
        "#,
    )
    .bind(role.as_str())
    .bind(chat_id)
    .execute(pool)
    .await?;

    ensure_updated(result.rows_affected(), chat_id)
}

/// Set the session framing.
pub async fn set_system_role(pool: &SqlitePool, chat_id: &str, role: SystemRole) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE accounts
        SET system_role = ?, updated_at = datetime('now')
        WHERE chat_id = ?
        "#,
    )
    .bind(role.as_str())
    .bind(chat_id)
    .execute(pool)
    .await?;

    ensure_updated(result.rows_affected(), chat_id)
}

/// Count one accepted chat message against the daily quota.
///
/// Returns false (and changes nothing) once the cap has been reached.
pub async fn try_increment_message_count(pool: &SqlitePool, chat_id: &str) -> Result<bool> {
    let result = sqlx::query(
        r#"
        UPDATE accounts
        SET current_message_count = current_message_count + 1,
            updated_at = datetime('now')
        WHERE chat_id = ? AND current_message_count < daily_message_limit
        "#,
    )
    .bind(chat_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() == 1)
}

/// Reset one account's message count to zero.
pub async fn reset_message_count(pool: &SqlitePool, chat_id: &str) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE accounts
        SET current_message_count = 0, updated_at = datetime('now')
        WHERE chat_id = ?
        "#,
    )
    .bind(chat_id)
    .execute(pool)
    .await?;

    ensure_updated(result.rows_affected(), chat_id)
}

/// Reset every account's message count. Returns the number of accounts touched.
pub async fn reset_all_message_counts(pool: &SqlitePool) -> Result<u64> {
    let result = sqlx::query(
        r#"
        UPDATE accounts
        SET current_message_count = 0, updated_at = datetime('now')
        WHERE current_message_count > 0
        "#,
    )
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

/// Change an account's daily message cap.
pub async fn set_daily_message_limit(pool: &SqlitePool, chat_id: &str, limit: i64) -> Result<()> {
    validate_daily_limit(limit)?;

    // Keep count <= limit when the cap is lowered.
    let result = sqlx::query(
        r#"
        UPDATE accounts
        SET daily_message_limit = ?,
            current_message_count = MIN(current_message_count, ?),
            updated_at = datetime('now')
        WHERE chat_id = ?
        "#,
    )
    .bind(limit)
    .bind(limit)
    .bind(chat_id)
    .execute(pool)
    .await?;

    ensure_updated(result.rows_affected(), chat_id)
}

/// Change an account's response token limit (300 to 1000).
pub async fn set_token_limit(pool: &SqlitePool, chat_id: &str, limit: i64) -> Result<()> {
    validate_token_limit(limit)?;

    let result = sqlx::query(
        r#"
        UPDATE accounts
        SET token_limit = ?, updated_at = datetime('now')
        WHERE chat_id = ?
        "#,
    )
    .bind(limit)
    .bind(chat_id)
    .execute(pool)
    .await?;

    ensure_updated(result.rows_affected(), chat_id)
}

/// Delete an account and, through the foreign key, its chat sessions.
pub async fn delete_account(pool: &SqlitePool, chat_id: &str) -> Result<()> {
    let result = sqlx::query(
        r#"
        DELETE FROM accounts
        WHERE chat_id = ?
        "#,
    )
    .bind(chat_id)
    .execute(pool)
    .await?;

    ensure_updated(result.rows_affected(), chat_id)
}

/// Count total accounts.
pub async fn count_accounts(pool: &SqlitePool) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM accounts
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(count)
}

fn ensure_updated(rows_affected: u64, chat_id: &str) -> Result<()> {
    if rows_affected == 0 {
        return Err(DatabaseError::NotFound {
            entity: "Account",
            id: chat_id.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;

    async fn test_db() -> Database {
        let db = Database::connect_in_memory().await.unwrap();
        db.migrate().await.unwrap();
        db
    }

    #[tokio::test]
    async fn test_get_or_create_is_idempotent() {
        let db = test_db().await;

        let (account, created) = get_or_create_account(db.pool(), "111").await.unwrap();
        assert!(created);
        assert_eq!(account.chat_id, "111");
        assert!(!account.is_authenticated);
        assert!(account.phone_number.is_none());
        assert!(account.assistant_role.is_none());
        assert_eq!(account.daily_message_limit, 23);
        assert_eq!(account.current_message_count, 0);
        assert_eq!(account.token_limit, 300);
        assert_eq!(account.system_role, "therapeutic");

        let (again, created) = get_or_create_account(db.pool(), "111").await.unwrap();
        assert!(!created);
        assert_eq!(again.id, account.id);
        assert_eq!(count_accounts(db.pool()).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_pending_otp_is_single_use() {
        let db = test_db().await;

        let account = set_pending_otp(db.pool(), "333", "09120000000", "hash-a")
            .await
            .unwrap();
        assert!(account.has_pending_otp());
        assert!(!account.is_authenticated);

        assert!(!verify_otp(db.pool(), "333", "hash-b").await.unwrap());
        assert!(verify_otp(db.pool(), "333", "hash-a").await.unwrap());

        let account = get_account(db.pool(), "333").await.unwrap();
        assert!(account.is_authenticated);
        assert!(account.otp_hash.is_none());

        assert!(!verify_otp(db.pool(), "333", "hash-a").await.unwrap());
    }

    #[tokio::test]
    async fn test_new_code_restarts_authentication() {
        let db = test_db().await;

        set_pending_otp(db.pool(), "444", "09120000001", "h1").await.unwrap();
        assert!(verify_otp(db.pool(), "444", "h1").await.unwrap());

        let account = set_pending_otp(db.pool(), "444", "09120000001", "h2")
            .await
            .unwrap();
        assert!(!account.is_authenticated);
        assert!(!verify_otp(db.pool(), "444", "h1").await.unwrap());
    }

    #[tokio::test]
    async fn test_phone_number_is_unique() {
        let db = test_db().await;

        set_pending_otp(db.pool(), "a", "09121111111", "h").await.unwrap();
        let result = set_pending_otp(db.pool(), "b", "09121111111", "h").await;
        assert!(matches!(result, Err(DatabaseError::AlreadyExists { .. })));

        let owner = find_account_by_phone(db.pool(), "09121111111").await.unwrap();
        assert_eq!(owner.map(|a| a.chat_id), Some("a".to_string()));
    }

    #[tokio::test]
    async fn test_invalid_phone_rejected() {
        let db = test_db().await;
        let result = set_pending_otp(db.pool(), "a", "12345", "h").await;
        assert!(matches!(result, Err(DatabaseError::Validation(_))));
    }

    #[tokio::test]
    async fn test_increment_is_capped() {
        let db = test_db().await;
        get_or_create_account(db.pool(), "555").await.unwrap();
        set_daily_message_limit(db.pool(), "555", 2).await.unwrap();

        assert!(try_increment_message_count(db.pool(), "555").await.unwrap());
        assert!(try_increment_message_count(db.pool(), "555").await.unwrap());
        assert!(!try_increment_message_count(db.pool(), "555").await.unwrap());

        let account = get_account(db.pool(), "555").await.unwrap();
        assert_eq!(account.current_message_count, 2);
        assert_eq!(account.remaining_messages(), 0);
        assert!(!account.has_quota());

        reset_message_count(db.pool(), "555").await.unwrap();
        let account = get_account(db.pool(), "555").await.unwrap();
        assert_eq!(account.current_message_count, 0);
    }

    #[tokio::test]
    async fn test_lowering_limit_clamps_count() {
        let db = test_db().await;
        get_or_create_account(db.pool(), "c").await.unwrap();
        for _ in 0..5 {
            try_increment_message_count(db.pool(), "c").await.unwrap();
        }
        set_daily_message_limit(db.pool(), "c", 3).await.unwrap();
        let account = get_account(db.pool(), "c").await.unwrap();
        assert_eq!(account.current_message_count, 3);
        assert!(set_daily_message_limit(db.pool(), "c", 0).await.is_err());
    }

    #[tokio::test]
    async fn test_reset_all_counts() {
        let db = test_db().await;
        for id in ["x", "y", "z"] {
            get_or_create_account(db.pool(), id).await.unwrap();
        }
        try_increment_message_count(db.pool(), "x").await.unwrap();
        try_increment_message_count(db.pool(), "y").await.unwrap();

        assert_eq!(reset_all_message_counts(db.pool()).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_token_limit_validation() {
        let db = test_db().await;
        get_or_create_account(db.pool(), "t").await.unwrap();

        set_token_limit(db.pool(), "t", 800).await.unwrap();
        assert_eq!(get_account(db.pool(), "t").await.unwrap().token_limit, 800);

        let result = set_token_limit(db.pool(), "t", 5000).await;
        assert!(matches!(result, Err(DatabaseError::Validation(_))));
    }

    #[tokio::test]
    async fn test_roles_and_logout() {
        let db = test_db().await;
        get_or_create_account(db.pool(), "r").await.unwrap();

        set_assistant_role(db.pool(), "r", AssistantRole::Cardiologist)
            .await
            .unwrap();
        set_system_role(db.pool(), "r", SystemRole::Triage).await.unwrap();
        set_authenticated(db.pool(), "r", true).await.unwrap();

        let account = get_account(db.pool(), "r").await.unwrap();
        assert_eq!(account.assistant_role(), Some(AssistantRole::Cardiologist));
        assert_eq!(account.system_role(), SystemRole::Triage);
        assert!(account.is_authenticated);

        assert!(set_authenticated(db.pool(), "r", false).await.unwrap());
        assert!(!set_authenticated(db.pool(), "missing", false).await.unwrap());

        let result = set_assistant_role(db.pool(), "missing", AssistantRole::Surgeon).await;
        assert!(matches!(result, Err(DatabaseError::NotFound { .. })));
    }
}
