//! Never propagate, always substitute.
//!
//! Both the gateway (weather provider calls) and the kiosk (gateway calls)
//! follow the same policy: a failed fetch is logged and replaced by a
//! complete, static substitute. `fetch_with_fallback` is that policy.

use std::fmt::Display;
use std::future::Future;

/// Result of a fetch that cannot fail.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    /// The operation succeeded
    Live(T),
    /// The operation failed and `T` is the substitute
    Fallback(T),
}

impl<T> Outcome<T> {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Outcome::Fallback(_))
    }

    pub fn value(&self) -> &T {
        match self {
            Outcome::Live(v) | Outcome::Fallback(v) => v,
        }
    }

    pub fn into_inner(self) -> T {
        match self {
            Outcome::Live(v) | Outcome::Fallback(v) => v,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Live(v) => Outcome::Live(f(v)),
            Outcome::Fallback(v) => Outcome::Fallback(f(v)),
        }
    }
}

/// Runs `operation`; on error logs it under `what` and returns `fallback()`.
pub async fn fetch_with_fallback<T, E, Fut, F>(what: &str, operation: Fut, fallback: F) -> Outcome<T>
where
    Fut: Future<Output = Result<T, E>>,
    E: Display,
    F: FnOnce() -> T,
{
    match operation.await {
        Ok(value) => Outcome::Live(value),
        Err(err) => {
            tracing::warn!(what = %what, error = %err, "Fetch failed, using fallback");
            Outcome::Fallback(fallback())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_success_is_live() {
        let outcome = fetch_with_fallback("number", async { Ok::<_, String>(7) }, || 0).await;
        assert_eq!(outcome, Outcome::Live(7));
    }

    #[tokio::test]
    async fn test_error_substitutes() {
        let outcome = fetch_with_fallback("number", async { Err::<i32, _>("down") }, || 42).await;
        assert!(outcome.is_fallback());
        assert_eq!(outcome.into_inner(), 42);
    }

    #[tokio::test]
    async fn test_fallback_not_built_on_success() {
        let outcome = fetch_with_fallback(
            "number",
            async { Ok::<_, String>(1) },
            || -> i32 { panic!("fallback must not run") },
        )
        .await;
        assert_eq!(outcome.map(|v| v + 1), Outcome::Live(2));
    }
}
