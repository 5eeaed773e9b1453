//! Fan-out / fan-in of independent fallible tasks.
//!
//! Results are consumed in completion order and individual failures do not
//! abort the batch. They are counted (and logged) by [`Gathered`] instead.
use futures_util::{Stream, StreamExt, stream};

use std::fmt;
use std::num::NonZeroUsize;

/// How many tasks may be in flight at the same time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Concurrency {
    /// Every task starts right away. Throttling is left to the HTTP client.
    #[default]
    Unbounded,
    Limited(NonZeroUsize),
}

impl Concurrency {
    pub fn limited(limit: usize) -> Self {
        NonZeroUsize::new(limit).map_or(Self::Unbounded, Self::Limited)
    }

    fn limit(self, tasks: usize) -> usize {
        match self {
            Self::Unbounded => tasks.max(1),
            Self::Limited(limit) => limit.get(),
        }
    }
}

impl fmt::Display for Concurrency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unbounded => f.write_str("unbounded"),
            Self::Limited(limit) => write!(f, "{limit}"),
        }
    }
}

/// Runs the given tasks concurrently and yields their outputs as they complete.
pub fn unordered<F>(
    tasks: impl IntoIterator<Item = F>,
    concurrency: Concurrency,
) -> impl Stream<Item = F::Output>
where
    F: Future,
{
    let tasks: Vec<F> = tasks.into_iter().collect();
    let limit = concurrency.limit(tasks.len());

    stream::iter(tasks).buffer_unordered(limit)
}

/// Runs the given tasks concurrently and collects every success, counting failures.
pub async fn gather<T, E, F>(
    tasks: impl IntoIterator<Item = F>,
    concurrency: Concurrency,
) -> Gathered<T>
where
    E: fmt::Display,
    F: Future<Output = Result<T, E>>,
{
    let mut gathered = Gathered::new();

    let results = unordered(tasks, concurrency);
    let mut results = std::pin::pin!(results);

    while let Some(result) = results.next().await {
        let _ = gathered.record(result);
    }

    gathered
}

/// The outcome of a batch that tolerates partial failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gathered<T> {
    pub successes: Vec<T>,
    pub failures: usize,
}

impl<T> Gathered<T> {
    pub fn new() -> Self {
        Self {
            successes: Vec::new(),
            failures: 0,
        }
    }

    /// Records a single result, returning the stored value on success.
    pub fn record<E>(&mut self, result: Result<T, E>) -> Option<&T>
    where
        E: fmt::Display,
    {
        match result {
            Ok(value) => {
                self.successes.push(value);
                self.successes.last()
            }
            Err(error) => {
                log::warn!("{error}");
                self.failures += 1;

                None
            }
        }
    }

    pub fn clear(&mut self) {
        self.successes.clear();
        self.failures = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.successes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.successes.len()
    }
}

impl<T> Default for Gathered<T> {
    fn default() -> Self {
        Self::new()
    }
}
