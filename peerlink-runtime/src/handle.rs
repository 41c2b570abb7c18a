use crate::error::Result;
use crossbeam_channel::{bounded, unbounded, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle, ThreadId};

/// Work queued onto an execution thread
type Task = Box<dyn FnOnce() + Send>;

struct Shared {
    name: String,
    id: ThreadId,

    /// Set for spawned threads only; wrapped threads have no task loop
    has_loop: bool,

    /// Dropping the sender ends the task loop
    tasks: Mutex<Option<Sender<Task>>>,
    join: Mutex<Option<JoinHandle<()>>>,
}

/// Handle to a named execution thread
///
/// Clones are cheap and alias the same physical thread. A handle either
/// drives its own task loop (created via [`ThreadHandle::spawn`]) or wraps a
/// thread it does not control (created via [`ThreadHandle::wrap_current`]).
#[derive(Clone)]
pub struct ThreadHandle {
    shared: Arc<Shared>,
}

impl ThreadHandle {
    /// Spawn a new execution thread and start its task loop immediately
    ///
    /// The creator is responsible for stopping the thread. Spawn failure is
    /// returned as-is; callers treat it as fatal rather than retrying.
    pub fn spawn(name: &str) -> Result<Self> {
        let (tx, rx) = unbounded::<Task>();

        let join = thread::Builder::new()
            .name(name.to_string())
            .spawn(move || {
                for task in rx {
                    task();
                }
            })?;

        let id = join.thread().id();
        tracing::debug!("Execution thread '{}' started", name);

        Ok(ThreadHandle {
            shared: Arc::new(Shared {
                name: name.to_string(),
                id,
                has_loop: true,
                tasks: Mutex::new(Some(tx)),
                join: Mutex::new(Some(join)),
            }),
        })
    }

    /// Adopt the calling thread without taking ownership
    ///
    /// The returned handle supports affinity checks and same-thread
    /// invocation only; there is no task loop to post to, and dropping the
    /// handle never stops the underlying thread.
    pub fn wrap_current(name: &str) -> Self {
        ThreadHandle {
            shared: Arc::new(Shared {
                name: name.to_string(),
                id: thread::current().id(),
                has_loop: false,
                tasks: Mutex::new(None),
                join: Mutex::new(None),
            }),
        }
    }

    /// Whether the caller is executing on this handle's thread
    ///
    /// Correct under aliasing: every handle reaching the same physical
    /// thread answers identically, regardless of how it was obtained.
    pub fn is_current(&self) -> bool {
        thread::current().id() == self.shared.id
    }

    /// Whether two handles reach the same physical thread
    pub fn same_thread(&self, other: &ThreadHandle) -> bool {
        self.shared.id == other.shared.id
    }

    /// Thread name
    pub fn name(&self) -> &str {
        &self.shared.name
    }

    /// Whether the thread can still execute work
    ///
    /// Wrapped threads are outside our control and always report true.
    pub fn is_running(&self) -> bool {
        if !self.shared.has_loop {
            return true;
        }
        self.shared.tasks.lock().unwrap().is_some()
    }

    /// Run a closure on this thread and block until it completes
    ///
    /// Called from the target thread itself, the closure runs inline.
    /// Cross-thread, the closure is queued and the caller blocks on a
    /// rendezvous; there is no timeout. Invoking onto a stopped thread, or
    /// cross-thread onto a wrapped handle, is a contract violation.
    pub fn invoke<R, F>(&self, f: F) -> R
    where
        F: FnOnce() -> R + Send + 'static,
        R: Send + 'static,
    {
        if self.is_current() {
            return f();
        }

        let tx = {
            let tasks = self.shared.tasks.lock().unwrap();
            match tasks.as_ref() {
                Some(tx) => tx.clone(),
                None if self.shared.has_loop => {
                    panic!("invoke on stopped thread '{}'", self.shared.name)
                }
                None => panic!(
                    "cross-thread invoke on wrapped thread '{}' which has no task loop",
                    self.shared.name
                ),
            }
        };

        let (done_tx, done_rx) = bounded::<R>(1);
        let task: Task = Box::new(move || {
            let _ = done_tx.send(f());
        });

        if tx.send(task).is_err() {
            panic!("invoke on stopped thread '{}'", self.shared.name);
        }

        match done_rx.recv() {
            Ok(result) => result,
            Err(_) => panic!(
                "thread '{}' dropped an invoked task without completing it",
                self.shared.name
            ),
        }
    }

    /// Stop the task loop and join the thread
    ///
    /// A thread cannot stop itself synchronously. Stopping a wrapped handle
    /// is a no-op, as is a second stop.
    pub fn stop(&self) {
        if !self.shared.has_loop {
            return;
        }

        assert!(
            !self.is_current(),
            "thread '{}' cannot stop itself synchronously",
            self.shared.name
        );

        let tx = self.shared.tasks.lock().unwrap().take();
        if tx.is_none() {
            return;
        }
        drop(tx);

        if let Some(join) = self.shared.join.lock().unwrap().take() {
            if join.join().is_err() {
                tracing::warn!("Execution thread '{}' panicked before join", self.shared.name);
            } else {
                tracing::debug!("Execution thread '{}' stopped", self.shared.name);
            }
        }
    }
}

impl std::fmt::Debug for ThreadHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThreadHandle")
            .field("name", &self.shared.name)
            .field("has_loop", &self.shared.has_loop)
            .field("running", &self.is_running())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invoke_runs_on_target_thread() {
        let handle = ThreadHandle::spawn("invoke_target").unwrap();
        let probe = handle.clone();

        let on_target = handle.invoke(move || probe.is_current());

        assert!(on_target);
        assert!(!handle.is_current());
        handle.stop();
    }

    #[test]
    fn test_invoke_returns_value() {
        let handle = ThreadHandle::spawn("invoke_value").unwrap();

        assert_eq!(handle.invoke(|| 7 * 6), 42);
        handle.stop();
    }

    #[test]
    fn test_invoke_inline_on_own_thread() {
        let wrapped = ThreadHandle::wrap_current("inline");

        // No task loop, but same-thread invocation runs the closure inline
        assert_eq!(wrapped.invoke(|| "ran"), "ran");
    }

    #[test]
    fn test_aliased_handles_agree_on_identity() {
        let spawned = ThreadHandle::spawn("aliased").unwrap();
        let clone = spawned.clone();

        let both_current = spawned.invoke(move || {
            let wrapped = ThreadHandle::wrap_current("borrowed_alias");
            wrapped.is_current() && clone.is_current()
        });

        assert!(both_current);
        assert!(spawned.same_thread(&spawned.clone()));
        spawned.stop();
    }

    #[test]
    fn test_wrap_current_is_current() {
        let wrapped = ThreadHandle::wrap_current("self");
        assert!(wrapped.is_current());
        assert!(wrapped.is_running());
    }

    #[test]
    fn test_stop_ends_task_loop() {
        let handle = ThreadHandle::spawn("stoppable").unwrap();
        assert!(handle.is_running());

        handle.stop();
        assert!(!handle.is_running());

        // Second stop is a no-op
        handle.stop();
    }

    #[test]
    fn test_stop_on_wrapped_handle_is_noop() {
        let wrapped = ThreadHandle::wrap_current("no_stop");
        wrapped.stop();
        assert!(wrapped.is_running());
    }

    #[test]
    #[should_panic(expected = "invoke on stopped thread")]
    fn test_invoke_after_stop_panics() {
        let handle = ThreadHandle::spawn("stopped").unwrap();
        handle.stop();
        handle.invoke(|| ());
    }

    #[test]
    fn test_stop_from_own_thread_is_fatal() {
        let handle = ThreadHandle::spawn("self_stop").unwrap();
        let inner = handle.clone();

        let panicked = handle.invoke(move || {
            std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| inner.stop())).is_err()
        });

        assert!(panicked);
        handle.stop();
    }

    #[test]
    fn test_thread_is_named() {
        let handle = ThreadHandle::spawn("named_thread").unwrap();
        assert_eq!(handle.name(), "named_thread");

        let os_name = handle.invoke(|| thread::current().name().map(str::to_string));
        assert_eq!(os_name.as_deref(), Some("named_thread"));
        handle.stop();
    }
}
