use std::sync::Arc;
use std::thread;

use chirpy::middleware::HitCounter;

#[test]
fn concurrent_thread_increments_are_not_lost() {
    let counter = HitCounter::new();
    thread::scope(|s| {
        for _ in 0..100 {
            s.spawn(|| {
                for _ in 0..100 {
                    counter.increment();
                }
            });
        }
    });
    assert_eq!(counter.read(), 10_000);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn ten_thousand_tasks_each_increment_once() {
    let counter = Arc::new(HitCounter::new());
    let mut tasks = tokio::task::JoinSet::new();
    for _ in 0..10_000 {
        let counter = Arc::clone(&counter);
        tasks.spawn(async move { counter.increment() });
    }
    while let Some(res) = tasks.join_next().await {
        res.unwrap();
    }
    assert_eq!(counter.read(), 10_000);
}

#[test]
fn resets_racing_increments_account_for_every_hit() {
    let counter = HitCounter::new();
    let drained = thread::scope(|s| {
        let writers: Vec<_> = (0..8)
            .map(|_| s.spawn(|| (0..5_000).for_each(|_| counter.increment())))
            .collect();
        let reader = s.spawn(|| {
            let mut total = 0i64;
            for _ in 0..1_000 {
                total += i64::from(counter.read_and_reset());
            }
            total
        });
        for w in writers {
            w.join().unwrap();
        }
        reader.join().unwrap()
    });
    assert_eq!(drained + i64::from(counter.read_and_reset()), 40_000);
    assert_eq!(counter.read(), 0);
}
