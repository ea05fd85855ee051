use std::future::Future;
use std::time::Duration;

/// Verdict of a single attempt
#[derive(Debug)]
pub enum Attempt<T> {
    /// Final answer, stop here
    Done(T),
    /// Try again if the policy allows; returned as-is once attempts run out
    Retry(T),
}

/// Fixed-delay retry policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self { max_attempts, delay }
    }

    /// Run `attempt` until it returns [`Attempt::Done`] or the attempts are
    /// used up, sleeping `delay` between attempts.
    ///
    /// The closure receives the 1-based attempt number. Returns the last
    /// value together with the number of attempts made. A policy with
    /// `max_attempts == 0` still makes one attempt.
    pub async fn run<T, F, Fut>(&self, mut attempt: F) -> (T, u32)
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Attempt<T>>,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut current = 1;

        loop {
            match attempt(current).await {
                Attempt::Done(value) => return (value, current),
                Attempt::Retry(value) if current >= max_attempts => return (value, current),
                Attempt::Retry(_) => {
                    tokio::time::sleep(self.delay).await;
                    current += 1;
                }
            }
        }
    }
}
