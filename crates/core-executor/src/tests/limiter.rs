#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::{fields, numbered_rows};
use crate::error::ExecutionError;
use crate::limiter::{MAX_ROWS, ResultLimiter};
use crate::models::{Cell, Row};
use crate::store::{StoreError, StoreResult};
use futures::stream;

fn ok_rows(rows: Vec<Row>) -> impl futures::Stream<Item = StoreResult<Row>> + Unpin {
    stream::iter(rows.into_iter().map(Ok))
}

#[tokio::test]
async fn test_limiter_exact_cap_is_not_truncated() {
    let result = ResultLimiter::default()
        .collect(fields(&["n", "x"]), ok_rows(numbered_rows(MAX_ROWS)))
        .await
        .expect("Failed to collect rows");
    assert_eq!(result.rows.len(), 1000);
    assert!(!result.truncated);
}

#[tokio::test]
async fn test_limiter_one_over_cap_is_truncated() {
    let result = ResultLimiter::default()
        .collect(fields(&["n", "x"]), ok_rows(numbered_rows(MAX_ROWS + 1)))
        .await
        .expect("Failed to collect rows");
    assert_eq!(result.rows.len(), 1000);
    assert!(result.truncated);
    // rows keep their original order, the extra one is the one dropped
    assert_eq!(result.rows[999][0], Cell::from("999"));
}

#[tokio::test]
async fn test_limiter_below_cap() {
    for count in [0, 1, 999] {
        let result = ResultLimiter::default()
            .collect(fields(&["n", "x"]), ok_rows(numbered_rows(count)))
            .await
            .expect("Failed to collect rows");
        assert_eq!(result.rows.len(), count);
        assert!(!result.truncated);
    }
}

#[tokio::test]
async fn test_limiter_pulls_at_most_one_row_past_cap() {
    let mut pulled = 0;
    let rows = stream::iter(numbered_rows(50).into_iter().map(|row| {
        pulled += 1;
        Ok(row)
    }));
    let result = ResultLimiter::new(10)
        .collect(fields(&["n", "x"]), rows)
        .await
        .expect("Failed to collect rows");
    assert_eq!(result.rows.len(), 10);
    assert!(result.truncated);
    assert_eq!(pulled, 11);
}

#[test]
fn test_limiter_zero_cap_is_raised() {
    let limiter = ResultLimiter::new(0);
    assert_eq!(limiter.max_rows(), 1);
}

#[tokio::test]
async fn test_limiter_rejects_misaligned_row() {
    let rows = vec![
        vec![Cell::from("1"), Cell::Null],
        vec![Cell::from("2")],
    ];
    let err = ResultLimiter::default()
        .collect(fields(&["n", "x"]), ok_rows(rows))
        .await
        .expect_err("Expected row width error");
    assert!(matches!(
        err,
        ExecutionError::RowWidth {
            row: 1,
            width: 1,
            fields: 2
        }
    ));
}

#[tokio::test]
async fn test_limiter_surfaces_stream_error() {
    let rows: Vec<StoreResult<Row>> = vec![
        Ok(vec![Cell::from("1")]),
        Err(StoreError::Database {
            message: "Lost connection to MySQL server during query".to_string(),
        }),
    ];
    let err = ResultLimiter::default()
        .collect(fields(&["n"]), stream::iter(rows))
        .await
        .expect_err("Expected fetch error");
    assert_eq!(err.to_string(), "Lost connection to MySQL server during query");
}

#[tokio::test]
async fn test_limiter_error_past_cap_does_not_mark_truncation() {
    let rows: Vec<StoreResult<Row>> = vec![
        Ok(vec![Cell::from("1")]),
        Err(StoreError::Database {
            message: "boom".to_string(),
        }),
    ];
    let result = ResultLimiter::new(1)
        .collect(fields(&["n"]), stream::iter(rows))
        .await
        .expect("Failed to collect rows");
    assert_eq!(result.rows.len(), 1);
    assert!(!result.truncated);
}
