// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use reloc_domain::RecordId;

use crate::{ApiError, retry_on_conflict};

fn conflict() -> ApiError {
    ApiError::ConcurrentModification {
        record_id: RecordId::new(1),
        expected_version: 4,
    }
}

#[test]
fn test_retry_succeeds_after_conflicts() {
    let mut attempts: u32 = 0;
    let result = retry_on_conflict(3, || {
        attempts += 1;
        if attempts < 3 { Err(conflict()) } else { Ok(attempts) }
    });

    assert_eq!(result, Ok(3));
    assert_eq!(attempts, 3);
}

#[test]
fn test_retry_gives_up_after_bound() {
    let mut attempts: u32 = 0;
    let result: Result<(), ApiError> = retry_on_conflict(2, || {
        attempts += 1;
        Err(conflict())
    });

    assert_eq!(result, Err(conflict()));
    assert_eq!(attempts, 3);
}

#[test]
fn test_zero_retries_runs_once() {
    let mut attempts: u32 = 0;
    let result: Result<(), ApiError> = retry_on_conflict(0, || {
        attempts += 1;
        Err(conflict())
    });

    assert!(result.is_err());
    assert_eq!(attempts, 1);
}

#[test]
fn test_other_errors_are_not_retried() {
    let mut attempts: u32 = 0;
    let result: Result<(), ApiError> = retry_on_conflict(5, || {
        attempts += 1;
        Err(ApiError::InvalidState {
            entity: String::from("Record"),
            reason: String::from("blocked"),
        })
    });

    assert!(matches!(result, Err(ApiError::InvalidState { .. })));
    assert_eq!(attempts, 1);
}
