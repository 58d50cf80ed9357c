mod common;

#[cfg(test)]
mod tests {
    use super::common::init_test_logging;
    use future_out::{spawn, spawn_fallible, Error, Future, ValueOrError};
    use futures::executor::block_on;
    use std::sync::{mpsc, Arc, Mutex};
    use std::{thread, time::Duration};

    #[test]
    fn test_spawn_hello_world() {
        init_test_logging();
        let value = spawn(|| "Hello World".to_owned());
        assert_eq!(value.get(), "Hello World");
    }

    #[test]
    fn test_spawn_fallible_error() {
        init_test_logging();
        let value = spawn_fallible(|| -> Result<String, Error> { Err(Error::msg("Bad things")) });
        assert_eq!(value.get().value, "");
        assert_eq!(value.get().error.unwrap().to_string(), "Bad things");
    }

    #[test]
    fn test_chained_futures() {
        init_test_logging();
        fn transform(_input: &str) -> Result<i32, Error> {
            Ok(1)
        }

        let f1 = spawn(|| "input2");
        let f2 = spawn_fallible(move || transform(f1.get()));

        let ValueOrError { value, error } = f2.get();
        assert!(error.is_none());
        assert_eq!(value, 1);
    }

    #[test]
    fn test_multiple_get_returns_value() {
        init_test_logging();
        let bool_future = spawn(|| true);
        for _ in 0..10 {
            assert!(bool_future.get(), "get did not return 'true'");
        }
    }

    #[test]
    fn test_get_waits_for_value() {
        init_test_logging();
        // The setter is held back by `signal` until the readers are parked,
        // so the shared flag can only flip after the value exists.
        let (signal, release) = mpsc::channel::<()>();
        let bool_future = spawn(move || {
            release.recv().expect("The test dropped the signal");
            true
        });

        let observed = Arc::new(Mutex::new(false));
        let readers: Vec<_> = (0..10)
            .map(|i| {
                let bool_future = bool_future.clone();
                let observed = observed.clone();
                thread::spawn(move || {
                    let result = bool_future.get();
                    assert!(result, "concurrent reader failed to get the value");
                    if i == 0 {
                        *observed.lock().unwrap() = result;
                    }
                })
            })
            .collect();

        thread::sleep(Duration::from_millis(20));
        assert!(
            !*observed.lock().unwrap(),
            "get returned before the value was set"
        );
        signal.send(()).expect("The setter thread has exited");
        for reader in readers {
            reader.join().expect("A reader thread has panicked");
        }
        assert!(*observed.lock().unwrap(), "get did not return the value");
    }

    #[test]
    fn test_get_does_not_return_early() {
        init_test_logging();
        let (signal, release) = mpsc::channel::<()>();
        let future = spawn(move || {
            let _ = release.recv();
            42
        });

        let (tx, rx) = mpsc::channel();
        let reader = future.clone();
        thread::spawn(move || tx.send(reader.get()));

        assert!(rx.recv_timeout(Duration::from_millis(100)).is_err());
        signal.send(()).expect("The setter thread has exited");
        assert_eq!(rx.recv_timeout(Duration::from_secs(5)), Ok(42));
        assert_eq!(future.get(), 42);
    }

    #[test]
    fn test_await_from_many_tasks() {
        init_test_logging();
        let future = spawn(|| {
            thread::sleep(Duration::from_millis(10));
            String::from("🍓")
        });
        let tasks: Vec<_> = (0..4)
            .map(|_| {
                let consumer = future.clone();
                thread::spawn(move || block_on(consumer))
            })
            .collect();

        for task in tasks {
            assert_eq!(task.join().expect("A consumer thread has panicked"), "🍓");
        }
        assert_eq!(block_on(future), "🍓");
    }

    #[test]
    fn test_ready_future() {
        init_test_logging();
        let future = Future::ready(vec![1, 2, 3]);
        assert_eq!(future.get(), vec![1, 2, 3]);
        assert_eq!(block_on(future.clone()), vec![1, 2, 3]);
    }

    #[test]
    fn test_shared_value_is_not_copied_deeply() {
        init_test_logging();
        let future = spawn(|| Arc::new(Mutex::new(Vec::<u8>::new())));
        future.get().lock().unwrap().push(1);
        assert_eq!(*future.get().lock().unwrap(), vec![1]);
    }
}
