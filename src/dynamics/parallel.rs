//! Work dispatchers used by the solver's parallel-for phases.

use std::{
    collections::VecDeque,
    ops::Range,
    panic::{self, AssertUnwindSafe},
    sync::Arc,
    thread::{self, JoinHandle},
};

use parking_lot::{Condvar, Mutex};

use crate::{
    config::MAX_WORKER_THREADS,
    error::{Error, Result},
};

/// Zero-argument unit of work.
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Body of a parallel-for: called once per contiguous `[start, end)` range.
pub type RangeTask = Arc<dyn Fn(usize, usize) + Send + Sync + 'static>;

/// Splits `[0, count)` into at most `parts` contiguous, non-empty ranges whose
/// lengths differ by at most one.
pub fn split_ranges(count: usize, parts: usize) -> Vec<Range<usize>> {
    let parts = parts.max(1).min(count.max(1));
    let base = count / parts;
    let remainder = count % parts;

    let mut ranges = Vec::with_capacity(parts);
    let mut start = 0;
    for part in 0..parts {
        let len = base + usize::from(part < remainder);
        if len == 0 {
            continue;
        }
        ranges.push(start..start + len);
        start += len;
    }
    ranges
}

/// Default worker count: hardware concurrency capped at [`MAX_WORKER_THREADS`].
pub fn default_thread_count() -> usize {
    thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        .clamp(1, MAX_WORKER_THREADS)
}

/// Executes range tasks, possibly on other threads.
///
/// `dispatch` may return before the work is done; callers must call
/// `wait_for_completion` before reading anything the tasks write.
pub trait Dispatcher: Send + Sync {
    fn name(&self) -> &str;

    fn thread_count(&self) -> usize;

    fn dispatch(&self, count: usize, task: RangeTask);

    fn wait_for_completion(&self);
}

/// Runs every range inline on the calling thread, in order.
#[derive(Debug, Default)]
pub struct SerialDispatcher;

impl SerialDispatcher {
    pub fn new() -> Self {
        Self
    }
}

impl Dispatcher for SerialDispatcher {
    fn name(&self) -> &str {
        "serial"
    }

    fn thread_count(&self) -> usize {
        1
    }

    fn dispatch(&self, count: usize, task: RangeTask) {
        if count > 0 {
            task(0, count);
        }
    }

    fn wait_for_completion(&self) {}
}

/// Dispatcher backed by Rayon's global pool. `dispatch` blocks until done.
#[cfg(feature = "parallel")]
#[derive(Debug)]
pub struct RayonDispatcher {
    threads: usize,
}

#[cfg(feature = "parallel")]
impl Default for RayonDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "parallel")]
impl RayonDispatcher {
    pub fn new() -> Self {
        Self {
            threads: rayon::current_num_threads().max(1),
        }
    }
}

#[cfg(feature = "parallel")]
impl Dispatcher for RayonDispatcher {
    fn name(&self) -> &str {
        "rayon"
    }

    fn thread_count(&self) -> usize {
        self.threads
    }

    fn dispatch(&self, count: usize, task: RangeTask) {
        use rayon::prelude::*;

        split_ranges(count, self.threads)
            .into_par_iter()
            .for_each(|range| task(range.start, range.end));
    }

    fn wait_for_completion(&self) {}
}

struct QueueState {
    tasks: VecDeque<Task>,
    pending: usize,
    shutdown: bool,
}

struct Shared {
    state: Mutex<QueueState>,
    task_available: Condvar,
    all_done: Condvar,
}

/// Fixed-size pool of worker threads pulling from a shared queue.
///
/// Workers live until the pool is dropped. A panicking task aborts the process.
pub struct ThreadPool {
    shared: Arc<Shared>,
    workers: Vec<JoinHandle<()>>,
}

impl ThreadPool {
    pub fn new(thread_count: usize) -> Result<Self> {
        let thread_count = thread_count.max(1);
        let shared = Arc::new(Shared {
            state: Mutex::new(QueueState {
                tasks: VecDeque::new(),
                pending: 0,
                shutdown: false,
            }),
            task_available: Condvar::new(),
            all_done: Condvar::new(),
        });

        let mut pool = Self {
            shared,
            workers: Vec::with_capacity(thread_count),
        };
        for index in 0..thread_count {
            let shared = Arc::clone(&pool.shared);
            let handle = thread::Builder::new()
                .name(format!("hyperfruit-worker-{index}"))
                .spawn(move || worker_loop(&shared))
                .map_err(Error::ThreadSpawn)?;
            pool.workers.push(handle);
        }
        log::debug!("thread pool started with {thread_count} workers");
        Ok(pool)
    }

    pub fn with_default_threads() -> Result<Self> {
        Self::new(default_thread_count())
    }

    /// Enqueues a task; no ordering is guaranteed between tasks.
    pub fn add_task<F>(&self, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let mut state = self.shared.state.lock();
        state.tasks.push_back(Box::new(task));
        state.pending += 1;
        drop(state);
        self.shared.task_available.notify_one();
    }

    /// Number of tasks submitted but not yet finished.
    pub fn pending(&self) -> usize {
        self.shared.state.lock().pending
    }
}

impl Dispatcher for ThreadPool {
    fn name(&self) -> &str {
        "thread-pool"
    }

    fn thread_count(&self) -> usize {
        self.workers.len()
    }

    fn dispatch(&self, count: usize, task: RangeTask) {
        for range in split_ranges(count, self.workers.len()) {
            let task = Arc::clone(&task);
            self.add_task(move || task(range.start, range.end));
        }
    }

    fn wait_for_completion(&self) {
        let mut state = self.shared.state.lock();
        while state.pending > 0 {
            self.shared.all_done.wait(&mut state);
        }
    }
}

impl Drop for ThreadPool {
    fn drop(&mut self) {
        self.shared.state.lock().shutdown = true;
        self.shared.task_available.notify_all();
        for worker in self.workers.drain(..) {
            if worker.join().is_err() {
                log::error!("worker thread terminated abnormally");
            }
        }
    }
}

fn worker_loop(shared: &Shared) {
    loop {
        let task = {
            let mut state = shared.state.lock();
            loop {
                if let Some(task) = state.tasks.pop_front() {
                    break task;
                }
                if state.shutdown {
                    return;
                }
                shared.task_available.wait(&mut state);
            }
        };

        if panic::catch_unwind(AssertUnwindSafe(task)).is_err() {
            log::error!(
                "task panicked on {}; aborting",
                thread::current().name().unwrap_or("worker")
            );
            std::process::abort();
        }

        let mut state = shared.state.lock();
        state.pending -= 1;
        if state.pending == 0 {
            shared.all_done.notify_all();
        }
    }
}
