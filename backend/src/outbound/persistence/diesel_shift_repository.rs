//! PostgreSQL-backed shift schedule and exchange engine.
//!
//! `exchange` and `cancel` run as one SERIALIZABLE transaction each. Inside
//! it the adapter resolves logins, locates the shifts, locks them with
//! `SELECT ... FOR UPDATE` in ascending id order, mutates and re-reads. Two
//! transactions touching the same shift therefore either serialize or one
//! of them fails with SQLSTATE 40001, which surfaces as
//! [`ShiftRepositoryError::Conflict`].
//!
//! The `(user_id, date)` constraint is deferrable. `exchange` defers it so
//! two members can swap shifts on the same day; a swap that would leave
//! anyone with two shifts on one day fails at commit.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::AsyncConnection as _;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::domain::ports::{ShiftRepository, ShiftRepositoryError};
use crate::domain::{
    ExchangedShifts, Login, Shift, ShiftAssignment, ShiftDate, ShiftSlot, ValueError,
};

use super::diesel_error_mapping::{StoreFailure, classify_diesel_error, pool_failure};
use super::models::{NewShiftRow, ShiftRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::{shifts, users};

const DEFER_UNIQUE_ASSIGNMENT: &str = "SET CONSTRAINTS shifts_user_id_date_key DEFERRED";

/// Diesel-backed implementation of [`ShiftRepository`].
#[derive(Clone)]
pub struct DieselShiftRepository {
    pool: DbPool,
}

impl DieselShiftRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Failure inside a transaction body: either the store failed or a domain
/// check (unknown login, missing shift) aborted the unit of work.
#[derive(Debug)]
enum TxError {
    Store(diesel::result::Error),
    Aborted(ShiftRepositoryError),
}

impl From<diesel::result::Error> for TxError {
    fn from(error: diesel::result::Error) -> Self {
        Self::Store(error)
    }
}

/// How a unique violation should be reported for the operation at hand.
#[derive(Debug, Clone, Copy)]
enum OnDuplicate {
    /// A concurrent writer inserted the same pair first.
    Conflict,
    /// The write itself would double-book a member.
    DoubleBooking,
}

fn map_failure(failure: StoreFailure, on_duplicate: OnDuplicate) -> ShiftRepositoryError {
    match (failure, on_duplicate) {
        (StoreFailure::Connection(message), _) => ShiftRepositoryError::connection(message),
        (StoreFailure::Conflict(message), _) => ShiftRepositoryError::conflict(message),
        (StoreFailure::Duplicate(constraint), OnDuplicate::Conflict) => {
            ShiftRepositoryError::conflict(constraint)
        }
        (StoreFailure::Duplicate(constraint), OnDuplicate::DoubleBooking) => {
            ShiftRepositoryError::duplicate_assignment(constraint)
        }
        (StoreFailure::Query(message), _) => ShiftRepositoryError::query(message),
    }
}

fn map_pool_error(error: PoolError) -> ShiftRepositoryError {
    map_failure(pool_failure(error), OnDuplicate::Conflict)
}

fn map_diesel_error(error: diesel::result::Error) -> ShiftRepositoryError {
    map_failure(classify_diesel_error(error), OnDuplicate::Conflict)
}

fn map_tx_error(error: TxError, on_duplicate: OnDuplicate) -> ShiftRepositoryError {
    match error {
        TxError::Store(error) => map_failure(classify_diesel_error(error), on_duplicate),
        TxError::Aborted(error) => error,
    }
}

fn map_invalid_row(error: ValueError) -> ShiftRepositoryError {
    ShiftRepositoryError::query(format!("stored row failed validation: {error}"))
}

async fn resolve_login(conn: &mut AsyncPgConnection, login: &Login) -> Result<i32, TxError> {
    users::table
        .filter(users::login.eq(login.as_str()))
        .select(users::id)
        .first::<i32>(conn)
        .await
        .optional()?
        .ok_or_else(|| TxError::Aborted(ShiftRepositoryError::user_not_found(login.as_str())))
}

/// Resolve the slot's owner and find the shift id held on that day.
async fn locate(conn: &mut AsyncPgConnection, slot: &ShiftSlot) -> Result<(i32, i32), TxError> {
    let user_id = resolve_login(conn, &slot.login).await?;
    let shift_id = shifts::table
        .filter(shifts::user_id.eq(user_id))
        .filter(shifts::date.eq(slot.date.as_naive()))
        .select(shifts::id)
        .first::<i32>(conn)
        .await
        .optional()?
        .ok_or_else(|| {
            TxError::Aborted(ShiftRepositoryError::shift_not_found(
                slot.login.as_str(),
                slot.date.to_string(),
            ))
        })?;
    Ok((user_id, shift_id))
}

/// Take row locks on the given shifts in ascending id order.
async fn lock_in_order(conn: &mut AsyncPgConnection, ids: &[i32]) -> Result<(), TxError> {
    let mut ordered = ids.to_vec();
    ordered.sort_unstable();
    ordered.dedup();
    let locked: Vec<i32> = shifts::table
        .filter(shifts::id.eq_any(ordered.clone()))
        .order(shifts::id.asc())
        .select(shifts::id)
        .for_update()
        .load(conn)
        .await?;
    if locked.len() == ordered.len() {
        Ok(())
    } else {
        // A row vanished between locating and locking; only a concurrent
        // writer can cause that.
        Err(TxError::Aborted(ShiftRepositoryError::conflict(
            "shift removed while being locked",
        )))
    }
}

async fn load_with_owner(
    conn: &mut AsyncPgConnection,
    shift_id: i32,
) -> Result<(ShiftRow, UserRow), TxError> {
    Ok(shifts::table
        .inner_join(users::table)
        .filter(shifts::id.eq(shift_id))
        .select((ShiftRow::as_select(), UserRow::as_select()))
        .first(conn)
        .await?)
}

fn to_shift((shift, owner): (ShiftRow, UserRow)) -> Result<Shift, ShiftRepositoryError> {
    shift.into_shift(owner).map_err(map_invalid_row)
}

#[async_trait]
impl ShiftRepository for DieselShiftRepository {
    async fn list_for_date(&self, date: ShiftDate) -> Result<Vec<Shift>, ShiftRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<(ShiftRow, UserRow)> = shifts::table
            .inner_join(users::table)
            .filter(shifts::date.eq(date.as_naive()))
            .order(shifts::id.asc())
            .select((ShiftRow::as_select(), UserRow::as_select()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(to_shift).collect()
    }

    async fn assign(
        &self,
        assignments: &[ShiftAssignment],
    ) -> Result<Vec<ShiftAssignment>, ShiftRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        conn.transaction(|conn| {
            async move {
                let mut created = Vec::new();
                for assignment in assignments {
                    let user_id = assignment.user_id.get();
                    let date = assignment.date.as_naive();
                    let exists: bool = diesel::select(diesel::dsl::exists(
                        shifts::table
                            .filter(shifts::user_id.eq(user_id))
                            .filter(shifts::date.eq(date)),
                    ))
                    .get_result(conn)
                    .await?;
                    if exists {
                        continue;
                    }
                    diesel::insert_into(shifts::table)
                        .values(NewShiftRow { date, user_id })
                        .execute(conn)
                        .await?;
                    created.push(*assignment);
                }
                Ok::<_, TxError>(created)
            }
            .scope_boxed()
        })
        .await
        .map_err(|error| map_tx_error(error, OnDuplicate::Conflict))
    }

    async fn exchange(
        &self,
        first: &ShiftSlot,
        second: &ShiftSlot,
    ) -> Result<ExchangedShifts, ShiftRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let (first_row, second_row) = conn
            .build_transaction()
            .serializable()
            .run(|conn| {
                async move {
                    let (first_owner, first_shift) = locate(conn, first).await?;
                    let (second_owner, second_shift) = locate(conn, second).await?;
                    lock_in_order(conn, &[first_shift, second_shift]).await?;

                    diesel::sql_query(DEFER_UNIQUE_ASSIGNMENT)
                        .execute(conn)
                        .await?;
                    diesel::update(shifts::table.find(first_shift))
                        .set(shifts::user_id.eq(second_owner))
                        .execute(conn)
                        .await?;
                    diesel::update(shifts::table.find(second_shift))
                        .set(shifts::user_id.eq(first_owner))
                        .execute(conn)
                        .await?;

                    let first_row = load_with_owner(conn, first_shift).await?;
                    let second_row = load_with_owner(conn, second_shift).await?;
                    Ok::<_, TxError>((first_row, second_row))
                }
                .scope_boxed()
            })
            .await
            .map_err(|error| map_tx_error(error, OnDuplicate::DoubleBooking))?;

        Ok(ExchangedShifts {
            first: to_shift(first_row)?,
            second: to_shift(second_row)?,
        })
    }

    async fn cancel(&self, slot: &ShiftSlot) -> Result<Shift, ShiftRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let removed = conn
            .build_transaction()
            .serializable()
            .run(|conn| {
                async move {
                    let (_, shift_id) = locate(conn, slot).await?;
                    lock_in_order(conn, &[shift_id]).await?;
                    let row = load_with_owner(conn, shift_id).await?;
                    diesel::delete(shifts::table.find(shift_id))
                        .execute(conn)
                        .await?;
                    Ok::<_, TxError>(row)
                }
                .scope_boxed()
            })
            .await
            .map_err(|error| map_tx_error(error, OnDuplicate::Conflict))?;
        to_shift(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn unique_violation_during_assignment_is_retryable_conflict() {
        let err = map_failure(
            StoreFailure::Duplicate("shifts_user_id_date_key".to_owned()),
            OnDuplicate::Conflict,
        );
        assert!(matches!(err, ShiftRepositoryError::Conflict { .. }));
    }

    #[rstest]
    fn unique_violation_during_exchange_is_double_booking() {
        let err = map_failure(
            StoreFailure::Duplicate("shifts_user_id_date_key".to_owned()),
            OnDuplicate::DoubleBooking,
        );
        assert_eq!(
            err,
            ShiftRepositoryError::duplicate_assignment("shifts_user_id_date_key")
        );
    }

    #[rstest]
    fn aborted_transactions_keep_their_domain_error() {
        let err = map_tx_error(
            TxError::Aborted(ShiftRepositoryError::user_not_found("mallory")),
            OnDuplicate::DoubleBooking,
        );
        assert_eq!(err, ShiftRepositoryError::user_not_found("mallory"));
    }

    #[rstest]
    fn store_errors_inside_transactions_are_classified() {
        let err = map_tx_error(
            TxError::Store(diesel::result::Error::NotFound),
            OnDuplicate::Conflict,
        );
        assert!(matches!(err, ShiftRepositoryError::Query { .. }));
    }
}
