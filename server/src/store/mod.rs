//! Query/command layer. Every function takes the pool handle it should run
//! against; nothing here owns a connection or reaches for ambient state.

pub mod artists;
pub mod bookings;
pub mod events;

/// One page of query results plus the unpaginated match count.
#[derive(Debug)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
}

/// Builds an ILIKE needle, escaping pattern metacharacters so a search for
/// "100%" matches the literal text.
pub(crate) fn like_pattern(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len());
    for ch in needle.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    format!("%{escaped}%")
}

#[cfg(test)]
pub(crate) mod test_support {
    use sqlx::postgres::PgPoolOptions;
    use sqlx::PgPool;

    /// Connects to the database named by `DATABASE_URL` and applies
    /// migrations. Returns `None` when the variable is unset or the
    /// database is unreachable, letting database-bound tests skip on
    /// machines without Postgres.
    pub async fn try_pool() -> Option<PgPool> {
        let url = std::env::var("DATABASE_URL").ok()?;
        let pool = PgPoolOptions::new()
            .max_connections(2)
            .connect(&url)
            .await
            .ok()?;
        sqlx::migrate!().run(&pool).await.ok()?;
        Some(pool)
    }
}
