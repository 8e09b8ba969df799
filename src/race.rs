use std::future::Future;
use std::time::Duration;

use actix_rt::time::timeout;
use futures::stream::FuturesUnordered;
use futures::StreamExt;
use log::debug;

#[derive(Debug)]
pub enum RaceOutcome<T, E> {
    /// First contender to succeed, with the failures seen before it
    Winner { value: T, failures: Vec<E> },
    /// Every contender failed before the deadline
    Exhausted(Vec<E>),
    /// Deadline elapsed with no success
    TimedOut(Vec<E>),
}

/// Polls all contenders concurrently and returns the first success.
///
/// Resolves within `deadline`. Contenders still pending when the race
/// resolves are dropped, which cancels them.
pub async fn first_success<I, F, T, E>(contenders: I, deadline: Duration) -> RaceOutcome<T, E>
where
    I: IntoIterator<Item = F>,
    F: Future<Output = Result<T, E>>,
{
    let mut pending: FuturesUnordered<F> = contenders.into_iter().collect();
    let mut failures = Vec::new();

    let settled = timeout(deadline, settle(&mut pending, &mut failures)).await;

    if !pending.is_empty() {
        debug!("Dropping {} outstanding contender(s)", pending.len());
    }

    match settled {
        Ok(Some(value)) => RaceOutcome::Winner { value, failures },
        Ok(None) => RaceOutcome::Exhausted(failures),
        Err(_) => RaceOutcome::TimedOut(failures),
    }
}

async fn settle<F, T, E>(pending: &mut FuturesUnordered<F>, failures: &mut Vec<E>) -> Option<T>
where
    F: Future<Output = Result<T, E>>,
{
    while let Some(result) = pending.next().await {
        match result {
            Ok(value) => return Some(value),
            Err(err) => failures.push(err),
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use std::future::Future;
    use std::pin::Pin;
    use std::time::{Duration, Instant};

    use actix_rt::time::delay_for;

    use super::*;

    type Contender = Pin<Box<dyn Future<Output = Result<&'static str, &'static str>>>>;

    fn after(millis: u64, result: Result<&'static str, &'static str>) -> Contender {
        Box::pin(async move {
            delay_for(Duration::from_millis(millis)).await;
            result
        })
    }

    #[actix_rt::test]
    async fn test_fastest_success_wins() {
        let outcome = first_success(
            vec![after(200, Ok("slow")), after(10, Ok("fast"))],
            Duration::from_secs(1)
        ).await;

        match outcome {
            RaceOutcome::Winner { value, failures } => {
                assert_eq!(value, "fast");
                assert!(failures.is_empty());
            },
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[actix_rt::test]
    async fn test_failure_does_not_end_race() {
        let outcome = first_success(
            vec![after(0, Err("refused")), after(50, Ok("second"))],
            Duration::from_secs(1)
        ).await;

        match outcome {
            RaceOutcome::Winner { value, failures } => {
                assert_eq!(value, "second");
                assert_eq!(failures, vec!["refused"]);
            },
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[actix_rt::test]
    async fn test_all_failed_resolves_before_deadline() {
        let start = Instant::now();
        let outcome = first_success(
            vec![after(10, Err("a")), after(20, Err("b"))],
            Duration::from_secs(5)
        ).await;

        match outcome {
            RaceOutcome::Exhausted(failures) => assert_eq!(failures, vec!["a", "b"]),
            other => panic!("unexpected outcome {:?}", other),
        }
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[actix_rt::test]
    async fn test_deadline_bounds_the_race() {
        let start = Instant::now();
        let outcome = first_success(
            vec![after(5_000, Ok("late")), after(10, Err("broken"))],
            Duration::from_millis(100)
        ).await;

        match outcome {
            RaceOutcome::TimedOut(failures) => assert_eq!(failures, vec!["broken"]),
            other => panic!("unexpected outcome {:?}", other),
        }
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[actix_rt::test]
    async fn test_no_contenders() {
        let outcome = first_success(Vec::<Contender>::new(), Duration::from_secs(1)).await;
        match outcome {
            RaceOutcome::Exhausted(failures) => assert!(failures.is_empty()),
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[actix_rt::test]
    async fn test_losers_are_dropped() {
        use std::sync::atomic::{AtomicBool, Ordering};
        use std::sync::Arc;

        struct SetOnDrop(Arc<AtomicBool>);

        impl Drop for SetOnDrop {
            fn drop(&mut self) {
                self.0.store(true, Ordering::SeqCst);
            }
        }

        let dropped = Arc::new(AtomicBool::new(false));
        let guard = SetOnDrop(dropped.clone());
        let loser: Contender = Box::pin(async move {
            let _guard = guard;
            delay_for(Duration::from_secs(5)).await;
            Ok("never")
        });

        let outcome = first_success(vec![loser, after(10, Ok("winner"))], Duration::from_secs(1)).await;

        assert!(matches!(outcome, RaceOutcome::Winner { value: "winner", .. }));
        assert!(dropped.load(Ordering::SeqCst));
    }
}
