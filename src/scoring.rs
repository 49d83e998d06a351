//! Scoring and interest-lookup business logic.
//!
//! [`get_score`] computes an additive score over the identity attributes the
//! caller supplied, cached in the store for one hour under a digest of those
//! attributes. [`get_interests`] looks up a client's interest list under the
//! `i:<client_id>` key.
//!
//! The dispatch layer passes results through untouched; failures from
//! [`get_interests`] propagate to the caller as server errors.

use std::time::Duration;

use chrono::NaiveDate;
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::error::StoreError;
use crate::store::Store;

/// How long a computed score stays cached.
const SCORE_CACHE_TTL: Duration = Duration::from_secs(60 * 60);

/// Compute (or fetch the cached) score for one set of identity attributes.
///
/// Weights: +1.5 for a phone, +1.5 for an email, +1.5 for a birthday with a
/// known (non-zero) gender, +0.5 for a first/last name pair. A cached
/// non-zero score short-circuits the computation; zero scores are
/// recomputed. Cache problems never fail the call.
#[allow(clippy::too_many_arguments)]
pub async fn get_score<S: Store + ?Sized>(
    store: &S,
    phone: Option<&str>,
    email: Option<&str>,
    birthday: Option<NaiveDate>,
    gender: Option<i64>,
    first_name: Option<&str>,
    last_name: Option<&str>,
) -> f64 {
    let key = score_cache_key(phone, birthday, first_name, last_name);

    if let Some(cached) = store.cache_get(&key).await.and_then(|v| v.as_f64()) {
        if cached != 0.0 {
            return cached;
        }
    }

    let filled = |part: Option<&str>| part.is_some_and(|s| !s.is_empty());

    let mut score = 0.0;
    if filled(phone) {
        score += 1.5;
    }
    if filled(email) {
        score += 1.5;
    }
    if birthday.is_some() && gender.is_some_and(|g| g != 0) {
        score += 1.5;
    }
    if filled(first_name) && filled(last_name) {
        score += 0.5;
    }

    store.cache_set(&key, Value::from(score), SCORE_CACHE_TTL).await;
    score
}

/// Look up a client's interests.
///
/// Absence of the key and malformed stored data both propagate as store
/// errors.
pub async fn get_interests<S: Store + ?Sized>(
    store: &S,
    client_id: i64,
) -> Result<Vec<String>, StoreError> {
    let value = store.get(&format!("i:{}", client_id)).await?;
    serde_json::from_value(value).map_err(|_| {
        StoreError::Backend(format!(
            "interests for client {} are not a list of strings",
            client_id
        ))
    })
}

/// Cache key for one identity: `uid:` + digest of the stable parts.
fn score_cache_key(
    phone: Option<&str>,
    birthday: Option<NaiveDate>,
    first_name: Option<&str>,
    last_name: Option<&str>,
) -> String {
    let mut hasher = Sha256::new();
    hasher.update(first_name.unwrap_or("").as_bytes());
    hasher.update(last_name.unwrap_or("").as_bytes());
    hasher.update(phone.unwrap_or("").as_bytes());
    if let Some(date) = birthday {
        hasher.update(format!("{}", date.format("%Y%m%d")).as_bytes());
    }
    format!("uid:{}", hex::encode(hasher.finalize()))
}

// =============================================================================
// Tests
// =============================================================================
