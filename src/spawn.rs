//! Launchers that run a closure on its own thread and hand back a [`Future`].

use crate::{future::Producer, Future, Promise, Result, ValueOrError};
use std::{io, thread};

const DEFAULT_THREAD_NAME: &str = "future-out";

/// Runs `f` on a new thread and returns a future for its result.
///
/// Returns immediately, without waiting for `f` to start. The caller must make
/// sure `f` returns eventually, otherwise readers of the future block forever.
///
/// # Panics
///
/// Panics if the OS fails to create a thread, like [`std::thread::spawn`].
/// Use [`Spawner::try_spawn`] to handle that case.
///
/// # Examples
///
/// ```
/// use future_out::spawn;
///
/// let value = spawn(|| "Hello World");
/// assert_eq!(value.get(), "Hello World");
/// ```
pub fn spawn<T, F>(f: F) -> Future<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    Spawner::default().spawn(f)
}

/// Runs a fallible `f` on a new thread. The outcome, success or failure, is
/// stored in the future as a [`ValueOrError`].
///
/// # Panics
///
/// Panics if the OS fails to create a thread.
///
/// # Examples
///
/// ```
/// use future_out::{spawn, spawn_fallible, Error};
///
/// let input = spawn(|| "input2");
/// let parsed = spawn_fallible(move || -> Result<usize, Error> {
///     match input.get() {
///         "input2" => Ok(1),
///         other => Err(Error::msg(format!("unexpected input {other}"))),
///     }
/// });
/// assert!(parsed.get().error.is_none());
/// assert_eq!(parsed.get().value, 1);
/// ```
pub fn spawn_fallible<T, E, F>(f: F) -> Future<ValueOrError<T, E>>
where
    F: FnOnce() -> Result<T, E> + Send + 'static,
    T: Default + Send + 'static,
    E: Send + 'static,
{
    Spawner::default().spawn_fallible(f)
}

/// Thread configuration used to launch computations.
///
/// # Examples
///
/// ```
/// use future_out::Spawner;
/// use std::thread;
///
/// let spawner = Spawner::new().name("loader").stack_size(256 * 1024);
/// let name = spawner.spawn(|| thread::current().name().map(str::to_owned));
/// assert_eq!(name.get().as_deref(), Some("loader"));
/// ```
#[derive(Debug, Clone)]
pub struct Spawner {
    /// Name given to each worker thread.
    ///
    /// Default: `"future-out"`
    pub name: String,

    /// Worker stack size in bytes. `0` keeps the platform default.
    ///
    /// Default: `0`
    pub stack_size: usize,
}

impl Default for Spawner {
    fn default() -> Self {
        Self {
            name: DEFAULT_THREAD_NAME.to_owned(),
            stack_size: 0,
        }
    }
}

impl Spawner {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn stack_size(mut self, size: usize) -> Self {
        self.stack_size = size;
        self
    }

    /// Like [`spawn`], with this configuration.
    ///
    /// # Panics
    ///
    /// Panics if the OS fails to create a thread.
    pub fn spawn<T, F>(&self, f: F) -> Future<T>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        self.try_spawn(f).unwrap_or_else(|err| panic!("{err}"))
    }

    /// Like [`spawn_fallible`], with this configuration.
    ///
    /// # Panics
    ///
    /// Panics if the OS fails to create a thread.
    pub fn spawn_fallible<T, E, F>(&self, f: F) -> Future<ValueOrError<T, E>>
    where
        F: FnOnce() -> Result<T, E> + Send + 'static,
        T: Default + Send + 'static,
        E: Send + 'static,
    {
        self.spawn(move || ValueOrError::from(f()))
    }

    /// Starts `f` on a new thread, returning [`Error::Spawn`](crate::Error::Spawn)
    /// if the thread could not be created. A thread name containing a NUL byte
    /// is reported the same way.
    pub fn try_spawn<T, F>(&self, f: F) -> Result<Future<T>>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        if self.name.contains('\0') {
            let err = io::Error::new(
                io::ErrorKind::InvalidInput,
                "thread name contains a NUL byte",
            );
            tracing::warn!(thread = ?self.name, error = %err, "failed to spawn worker thread");
            return Err(err.into());
        }

        let (producer, future) = Producer::new();
        let mut builder = thread::Builder::new().name(self.name.clone());
        if self.stack_size > 0 {
            builder = builder.stack_size(self.stack_size);
        }

        builder
            .spawn(move || producer.resolve(f()))
            .map_err(|err| {
                tracing::warn!(thread = %self.name, error = %err, "failed to spawn worker thread");
                err
            })?;
        tracing::trace!(thread = %self.name, "spawned worker thread");
        Ok(future)
    }

    /// Fallible counterpart of [`Spawner::spawn_fallible`].
    pub fn try_spawn_fallible<T, E, F>(&self, f: F) -> Result<Future<ValueOrError<T, E>>>
    where
        F: FnOnce() -> Result<T, E> + Send + 'static,
        T: Default + Send + 'static,
        E: Send + 'static,
    {
        self.try_spawn(move || ValueOrError::from(f()))
    }
}
