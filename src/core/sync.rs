//! Lock poisoning helpers
//!
//! Shared state in this crate (the form cache) lives behind `std::sync::RwLock`.
//! A poisoned lock is mapped into the caller's error type instead of panicking.

use std::sync::{LockResult, RwLockReadGuard, RwLockWriteGuard};

/// Map a poisoned RwLock read into an application error
///
/// # Examples
/// ```
/// use std::sync::RwLock;
/// use appcmd::core::sync::handle_rwlock_read;
///
/// let lock = RwLock::new(7);
/// let guard = handle_rwlock_read(lock.read(), |msg| msg).unwrap();
/// assert_eq!(*guard, 7);
/// ```
pub fn handle_rwlock_read<T, E>(
    result: LockResult<RwLockReadGuard<T>>,
    error_constructor: impl FnOnce(String) -> E,
) -> Result<RwLockReadGuard<T>, E> {
    result.map_err(|poison_err| {
        error_constructor(format!(
            "Internal synchronisation error (RwLock read poisoned): {}",
            poison_err
        ))
    })
}

/// Map a poisoned RwLock write into an application error
pub fn handle_rwlock_write<T, E>(
    result: LockResult<RwLockWriteGuard<T>>,
    error_constructor: impl FnOnce(String) -> E,
) -> Result<RwLockWriteGuard<T>, E> {
    result.map_err(|poison_err| {
        error_constructor(format!(
            "Internal synchronisation error (RwLock write poisoned): {}",
            poison_err
        ))
    })
}
