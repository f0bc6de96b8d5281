use std::{
    fmt::Debug,
    sync::{
        Arc, Condvar, Mutex,
        atomic::{AtomicBool, Ordering},
    },
};

use anyhow::{anyhow, bail};
use crossbeam::channel::{Receiver, Sender, TryRecvError};
use minheap::HeapEntry;

use crate::SharedQueue;
use crate::tie_break::TieBreakHeap;

/// Channel-served variant of the priority queue.
///
/// A dedicated storage thread exclusively owns the tie-break heap, so the
/// heap itself needs no lock at all; callers talk to the thread through
/// channels. Enqueues are fire-and-forget, drains are request/response over
/// a pair of rendezvous channels.
#[derive(Debug)]
pub struct ChanneledQueue<V: Debug> {
    channels: Channels<V>,
}

struct Storage<V: Debug> {
    queue: TieBreakHeap<V>,

    enqueue_sink: Receiver<(f64, V)>,

    drain_source: Sender<Vec<HeapEntry<f64, V>>>,
    drain_command_sink: Receiver<usize>,

    running: Arc<AtomicBool>,
}

#[derive(Debug)]
struct Channels<V: Debug> {
    item_source: Sender<(f64, V)>,

    drain_sink: Receiver<Vec<HeapEntry<f64, V>>>,
    drain_command_source: Sender<usize>,

    queue_running: Arc<AtomicBool>,
}

impl<V: Debug + Send + 'static> Storage<V> {
    fn start(capacity: usize) -> Channels<V> {
        let (tx, rx) = crossbeam::channel::unbounded();
        let (tx_drain, rx_drain) = crossbeam::channel::bounded(1);
        let (tx_command, rx_command) = crossbeam::channel::bounded(1);
        let running = Arc::new(AtomicBool::new(true));
        let queue_running = Arc::clone(&running);

        let storage = Self {
            queue: TieBreakHeap::with_capacity(capacity),
            enqueue_sink: rx,
            drain_source: tx_drain,
            drain_command_sink: rx_command,
            running,
        };

        let wait_for_runner = Arc::new((Mutex::new(false), Condvar::new()));
        let spun_up_notifier = Arc::clone(&wait_for_runner);

        std::thread::spawn(move || {
            if let Err(e) = storage.run(spun_up_notifier) {
                eprintln!("Error! Queue has shut down: {e}");
            }
        });

        // Wait for the storage runner to start up.
        let (lock, cvar) = &*wait_for_runner;
        let mut started = lock
            .lock()
            .expect("Runner thread does not panic while holding the lock.");
        while !*started {
            started = cvar.wait(started).unwrap();
        }

        Channels {
            item_source: tx,
            drain_sink: rx_drain,
            drain_command_source: tx_command,
            queue_running,
        }
    }

    /// This function blocks the thread it is running on.
    /// It serves the enqueue and drain channels as long as they are open.
    fn run(mut self, cond_var: Arc<(Mutex<bool>, Condvar)>) -> anyhow::Result<()> {
        Self::notify_about_start(cond_var)?;

        while self.running.load(Ordering::Relaxed) {
            self.enqueue_or_continue()?;
            self.drain_or_continue()?;
        }

        Ok(())
    }

    /// Uses the conditional variable `cond_var` to notify the creating
    /// thread that the runner has started.
    fn notify_about_start(cond_var: Arc<(Mutex<bool>, Condvar)>) -> anyhow::Result<()> {
        let mut started = cond_var
            .0
            .lock()
            .map_err(|_| anyhow!("Unexpected lock contention on startup of the queue!"))?;
        *started = true;
        cond_var.1.notify_all();
        Ok(())
    }

    /// Moves one pending enqueue into the heap, if there is one.
    /// # Error
    /// Returns an error if the enqueue channel is disconnected.
    fn enqueue_or_continue(&mut self) -> anyhow::Result<()> {
        match self.enqueue_sink.try_recv() {
            Ok((priority, value)) => self.queue.enqueue(priority, value),
            Err(TryRecvError::Empty) => (),
            Err(TryRecvError::Disconnected) => bail!("Enqueue channel is disconnected"),
        }
        Ok(())
    }

    fn drain_or_continue(&mut self) -> anyhow::Result<()> {
        let count = match self.drain_command_sink.try_recv() {
            Ok(n) => n,
            Err(TryRecvError::Empty) => return Ok(()),
            Err(TryRecvError::Disconnected) => bail!("Drain command channel is disconnected"),
        };

        let items = self.queue.drain(count);
        self.drain_source
            .send(items)
            .map_err(|_| anyhow!("Drain channel is disconnected"))
    }
}

impl<V: Debug + Send + 'static> ChanneledQueue<V> {
    pub fn new(capacity: usize) -> Self {
        let channels = Storage::start(capacity);
        Self { channels }
    }

    /// Shuts the storage thread down. Entries still queued are dropped with
    /// the heap.
    pub fn stop(self) {
        self.channels.queue_running.store(false, Ordering::Relaxed);
    }
}

impl<V: Debug + Send + 'static> SharedQueue<V> for ChanneledQueue<V> {
    /// Hands the entry to the storage thread.
    /// The effective tie-break order among equal priorities is the order in
    /// which entries arrive on the channel.
    fn enqueue(&self, priority: f64, value: V) {
        if self.channels.item_source.send((priority, value)).is_err() {
            eprintln!("Error! Cannot enqueue; the queue is not listening.");
        }
    }

    fn drain(&self, n: usize) -> Vec<HeapEntry<f64, V>> {
        if self.channels.drain_command_source.send(n).is_err() {
            eprintln!("Error: Could not drain; the command channel is closed!");
        }
        match self.channels.drain_sink.recv() {
            Ok(items) => items,
            Err(_) => {
                eprintln!("Error: Could not drain; the drain channel is closed!");
                vec![]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_tears_the_runner_down() {
        let queue: ChanneledQueue<&str> = ChanneledQueue::new(16);
        queue.enqueue(100.0, "a");
        // Give the storage thread time to pick the entry up before draining.
        std::thread::sleep(std::time::Duration::from_millis(10));
        assert_eq!(queue.dequeue().map(|e| e.value), Some("a"));
        queue.stop();
    }
}

#[cfg(test)]
mod test_suite {
    use crate::ChanneledQueue;
    use crate::test::suite;

    struct ChanneledTester;

    impl suite::Tester<ChanneledQueue<String>> for ChanneledTester {
        fn create_queue(&self) -> ChanneledQueue<String> {
            ChanneledQueue::new(500_000)
        }
    }

    #[test]
    fn min_first_ordering() {
        suite::test_min_first_ordering(ChanneledTester);
    }

    #[test]
    fn fifo_within_equal_priority() {
        suite::test_fifo_within_equal_priority(ChanneledTester);
    }

    #[test]
    fn adjustment_resets_when_drained_empty() {
        suite::test_adjustment_resets_when_drained_empty(ChanneledTester);
    }

    #[test]
    fn concurrent_enqueue() {
        suite::test_concurrent_enqueue(ChanneledTester);
    }

    #[test]
    fn concurrent_enqueue_and_drain() {
        suite::test_concurrent_enqueue_and_drain(ChanneledTester);
    }
}
