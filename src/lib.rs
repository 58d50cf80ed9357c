//! Single-assignment futures computed on a background thread.
//!
//! [`spawn`] runs a closure on its own thread and returns a [`Future`] right
//! away. Any number of threads may then call [`Future::get`], which blocks
//! until the closure has returned and hands every caller the same value.
//! Computations that can fail go through [`spawn_fallible`], whose result is a
//! [`ValueOrError`].
//!
//! ```
//! use future_out::{spawn, spawn_fallible, Error};
//!
//! let greeting = spawn(|| "Hello World");
//! assert_eq!(greeting.get(), "Hello World");
//!
//! let failed = spawn_fallible(|| -> Result<String, Error> { Err(Error::msg("Bad things")) });
//! assert_eq!(failed.get().value, "");
//! assert_eq!(failed.get().error.unwrap().to_string(), "Bad things");
//! ```
//!
//! There is no cancellation and no timeout. A computation that never returns
//! leaves its readers blocked forever.

mod error;
mod future;
mod spawn;

pub use error::{Error, Result, ValueOrError};
pub use future::Future;
pub use spawn::{spawn, spawn_fallible, Spawner};

/// The write end of a single-assignment cell, paired with the handle that
/// waits on it.
pub(crate) trait Promise<T>: Sized {
    type Waiter;

    fn new() -> (Self, Self::Waiter);

    fn resolve(self, value: T);
}
