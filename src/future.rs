//! The single-assignment cell behind every [`Future`] handle.
//!
//! A cell is read by any number of threads, blocking in [`Future::get`] or
//! suspended on `.await`, and written exactly once through the crate-private
//! [`Producer`] that a launcher moves onto the worker thread.

use crate::Promise;
use std::fmt;
use std::future::Future as StdFuture;
use std::pin::Pin;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::task::{Context, Poll, Waker};

/// A value that is being computed elsewhere and can be read once it is ready.
///
/// Handles are cheap to clone; every clone observes the same value. Reading
/// never consumes the value, so `get` may be called any number of times from
/// any number of threads.
///
/// A `Future` is also a [`std::future::Future`], so a clone of the handle can
/// be `.await`ed from async code.
///
/// # Examples
///
/// ```
/// use future_out::spawn;
/// use std::thread;
///
/// let answer = spawn(|| 6 * 7);
/// let reader = answer.clone();
/// let task = thread::spawn(move || reader.get());
///
/// assert_eq!(answer.get(), 42);
/// assert_eq!(task.join().expect("The reader thread has panicked"), 42);
/// ```
pub struct Future<T> {
    shared: Arc<Shared<T>>,
}

/// Write end of a cell. Only the launchers create one.
pub(crate) struct Producer<T> {
    shared: Arc<Shared<T>>,
}

#[derive(Debug)]
struct Shared<T> {
    inner: Mutex<Inner<T>>,
    resolved: Condvar,
}

#[derive(Debug)]
struct Inner<T> {
    value: Option<T>,
    wakers: Vec<Waker>,
}

impl<T> Shared<T> {
    fn pending() -> Self {
        Shared {
            inner: Mutex::new(Inner {
                value: None,
                wakers: vec![],
            }),
            resolved: Condvar::new(),
        }
    }

    // The cell is consistent whenever the lock is released, so a poisoned
    // lock is still safe to use.
    fn lock(&self) -> MutexGuard<'_, Inner<T>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Stores `value` unless the cell already holds one. Returns whether this
    /// call was the one that resolved the cell.
    fn resolve(&self, value: T) -> bool {
        let mut inner = self.lock();
        if inner.value.is_some() {
            tracing::debug!("future already resolved, ignoring value");
            return false;
        }
        inner.value = Some(value);
        self.resolved.notify_all();
        let wakers = std::mem::take(&mut inner.wakers);
        drop(inner);

        for waker in wakers {
            waker.wake();
        }
        true
    }

    fn is_resolved(&self) -> bool {
        self.lock().value.is_some()
    }
}

impl<T> Promise<T> for Producer<T> {
    type Waiter = Future<T>;

    fn new() -> (Self, Future<T>) {
        let shared = Arc::new(Shared::pending());
        (
            Producer {
                shared: shared.clone(),
            },
            Future { shared },
        )
    }

    fn resolve(self, value: T) {
        if self.shared.resolve(value) {
            tracing::trace!("future resolved");
        }
    }
}

impl<T> Drop for Producer<T> {
    /// An unresolved producer going away means the computation died. Readers
    /// keep waiting, there is nobody left to wake them.
    fn drop(&mut self) {
        if !self.shared.is_resolved() {
            tracing::debug!("producer dropped before resolving its future");
        }
    }
}

impl<T> Future<T> {
    /// A future that is already resolved with `value`.
    pub fn ready(value: T) -> Self {
        let (producer, future) = Producer::new();
        producer.resolve(value);
        future
    }
}

impl<T: Clone> Future<T> {
    /// Blocks the current thread until the value is ready and returns a clone
    /// of it.
    ///
    /// Every call, before or after resolution and from any thread, returns the
    /// same value. The clone is shallow for shared types such as `Arc`, so
    /// interior mutability in `T` is visible to every reader.
    ///
    /// If the computation never finishes, this blocks forever.
    pub fn get(&self) -> T {
        let mut inner = self.shared.lock();
        loop {
            if let Some(value) = &inner.value {
                return value.clone();
            }
            inner = self
                .shared
                .resolved
                .wait(inner)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }
}

impl<T> Clone for Future<T> {
    fn clone(&self) -> Self {
        Future {
            shared: self.shared.clone(),
        }
    }
}

/// Each distinct task that polls a pending future leaves one waker in the
/// cell, even if the task is dropped before the value arrives. The list is
/// bounded by the number of such tasks and is emptied on resolution.
impl<T: Clone> StdFuture for Future<T> {
    type Output = T;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut inner = self.shared.lock();
        if let Some(value) = &inner.value {
            return Poll::Ready(value.clone());
        }
        if !inner.wakers.iter().any(|waker| waker.will_wake(cx.waker())) {
            inner.wakers.push(cx.waker().clone());
        }
        Poll::Pending
    }
}

impl<T: fmt::Debug> fmt::Debug for Future<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.shared.lock().value {
            Some(value) => f.debug_tuple("Future").field(value).finish(),
            None => f.write_str("Future(<pending>)"),
        }
    }
}
