use std::{sync::Arc, thread, time::Duration};

use crate::SharedQueue;

pub trait Tester<T>
where
    T: SharedQueue<String>,
{
    fn create_queue(&self) -> T;
}

/// Test basic min-first ordering of the [`SharedQueue`] implementation.
pub fn test_min_first_ordering<T: SharedQueue<String>>(tester: impl Tester<T>) {
    let queue = tester.create_queue();

    queue.enqueue(500.0, "e".to_string());
    queue.enqueue(100.0, "a".to_string());
    queue.enqueue(400.0, "d".to_string());
    queue.enqueue(200.0, "b".to_string());
    queue.enqueue(300.0, "c".to_string());

    thread::sleep(Duration::from_millis(10)); // wait for all entries to be harvested by a storage thread
    let drained = queue.drain(3);
    assert_eq!(drained.len(), 3);
    assert_eq!(drained[0].value, "a");
    assert_eq!(drained[1].value, "b");
    assert_eq!(drained[2].value, "c");

    let drained = queue.drain(3);
    assert_eq!(drained.len(), 2);
    assert_eq!(drained[0].value, "d");
    assert_eq!(drained[1].value, "e");

    let drained = queue.drain(3);
    assert!(drained.is_empty());
}

/// Entries of equal nominal priority come back in arrival order.
pub fn test_fifo_within_equal_priority<T: SharedQueue<String>>(tester: impl Tester<T>) {
    let queue = tester.create_queue();

    for value in ["A", "B", "C", "D", "E"] {
        queue.enqueue(200.0, value.to_string());
    }

    thread::sleep(Duration::from_millis(10));
    let drained = queue.drain(5);
    assert_eq!(drained.len(), 5);

    let values: Vec<&str> = drained.iter().map(|e| e.value.as_str()).collect();
    assert_eq!(values, vec!["A", "B", "C", "D", "E"]);

    // The adjustment never pushes an entry across a priority level.
    for entry in &drained {
        assert!(entry.priority >= 200.0);
        assert!(entry.priority < 300.0);
    }
}

/// Once drained to empty, the queue behaves like a freshly constructed one:
/// the next enqueue carries no tie-break adjustment at all.
pub fn test_adjustment_resets_when_drained_empty<T: SharedQueue<String>>(tester: impl Tester<T>) {
    let queue = tester.create_queue();

    queue.enqueue(200.0, "x1".to_string());
    queue.enqueue(200.0, "x2".to_string());
    thread::sleep(Duration::from_millis(10));
    assert_eq!(queue.drain(2).len(), 2);

    queue.enqueue(200.0, "y".to_string());
    thread::sleep(Duration::from_millis(10));
    let entry = queue.dequeue().expect("queue holds exactly one entry");
    assert_eq!(entry.value, "y");
    assert_eq!(entry.priority, 200.0); // exactly nominal, counter was reset
}

pub fn test_concurrent_enqueue<T: SharedQueue<String>>(tester: impl Tester<T>) {
    let queue = Arc::new(tester.create_queue());

    let mut handles = vec![];

    for i in 0..100 {
        let queue_clone = queue.clone();
        let handle = thread::spawn(move || {
            queue_clone.enqueue(
                (i % 10) as f64 * 100.0, // Some variation in priority levels,
                format!("job{}", i),
            );
        });
        handles.push(handle);
    }

    for handle in handles {
        handle.join().unwrap();
    }

    thread::sleep(Duration::from_millis(10));
    let drained = queue.drain(100);
    assert_eq!(drained.len(), 100);

    // Verify effective priorities come back in ascending order.
    for window in drained.windows(2) {
        assert!(window[0].priority <= window[1].priority);
    }
}

pub fn test_concurrent_enqueue_and_drain<T: SharedQueue<String>>(tester: impl Tester<T>) {
    let queue = Arc::new(tester.create_queue());

    let mut handles = vec![];

    // -- Enqueue
    for i in 0..50 {
        let queue_clone = queue.clone();
        let handle = thread::spawn(move || {
            queue_clone.enqueue((i % 10) as f64 * 100.0, format!("job{}", i));
        });
        handles.push(handle);
    }

    // -- Drain
    for _ in 0..5 {
        let queue_clone = queue.clone();
        let handle = thread::spawn(move || {
            let drained = queue_clone.drain(10);
            // Uphold priority ordering within every batch
            for window in drained.windows(2) {
                assert!(window[0].priority <= window[1].priority);
            }
        });
        handles.push(handle);
    }

    for handle in handles {
        handle.join().unwrap();
    }
}
