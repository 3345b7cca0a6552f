use std::{
    sync::{
        atomic::{AtomicU8, Ordering},
        mpsc::{self, RecvTimeoutError, SyncSender},
        Arc,
    },
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

#[derive(Debug, Default)]
struct Counters {
    delay: AtomicU8,
    sound: AtomicU8,
}

/// The delay and the sound timer. Both count down to zero at 60 hertz
/// and stay there until set again.
///
/// The timers are a cheap handle, clones share the same counters. Every
/// single read, write or decrement is atomic, so the timer clock and the
/// chip may touch them from different threads.
#[derive(Debug, Clone, Default)]
pub struct Timers {
    counters: Arc<Counters>,
}

impl Timers {
    /// Will create both timers at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decrements every non zero counter by one.
    pub fn tick(&self) {
        for counter in [&self.counters.delay, &self.counters.sound].iter() {
            // a zero counter refuses the update, which is the saturation
            let _ = counter.fetch_update(Ordering::AcqRel, Ordering::Acquire, |val| {
                val.checked_sub(1)
            });
        }
    }

    /// Will set the value from which the delay timer shall count down from.
    pub fn set_delay(&self, value: u8) {
        self.counters.delay.store(value, Ordering::Release);
    }

    /// Will get the value that the delay timer is currently at.
    pub fn get_delay(&self) -> u8 {
        self.counters.delay.load(Ordering::Acquire)
    }

    /// Will set the value from which the sound timer shall count down from.
    pub fn set_sound(&self, value: u8) {
        self.counters.sound.store(value, Ordering::Release);
    }

    /// Will get the value that the sound timer is currently at.
    pub fn get_sound(&self) -> u8 {
        self.counters.sound.load(Ordering::Acquire)
    }

    /// While the sound timer is non zero a tone shall play.
    pub fn is_sounding(&self) -> bool {
        self.get_sound() > 0
    }
}

/// Runs a callback in a fixed interval on a thread of its own until it is
/// stopped.
pub trait TimedWorker {
    /// Will start the worker that will run the callback function
    /// every interval.
    fn start<T>(&mut self, callback: T, interval: Duration)
    where
        T: Send + FnMut() + 'static;

    /// Will stop the worker, once this returns the callback will not run
    /// anymore.
    fn stop(&mut self);

    /// Checks if the worker is running.
    fn is_alive(&self) -> bool;
}

/// Is the internal worker, that exists on the
/// second thread.
#[derive(Debug)]
pub struct Worker {
    /// Contains the actuall thread, that is running.
    thread: Option<JoinHandle<()>>,
    /// Contains the sync sender used to gracefull shutdown the thread.
    shutdown: Option<SyncSender<()>>,
    /// Counts the threads holding on to it, more than one means the
    /// thread is still running.
    alive: Arc<()>,
}

impl Default for Worker {
    fn default() -> Self {
        Self::new()
    }
}

impl Worker {
    /// Will initialize the new worker.
    pub fn new() -> Self {
        Self {
            thread: None,
            shutdown: None,
            alive: Arc::new(()),
        }
    }
}

impl TimedWorker for Worker {
    /// Attention the worker assumes the callback will finish
    /// faster than the interval.
    fn start<T>(&mut self, mut callback: T, interval: Duration)
    where
        T: Send + FnMut() + 'static,
    {
        // a running thread would be orphaned otherwise
        self.stop();

        let (send, recv) = mpsc::sync_channel::<()>(1);
        let alive = self.alive.clone();
        let thread = thread::spawn(move || {
            let _alive = alive;
            let mut timeout = interval;
            loop {
                match recv.recv_timeout(timeout) {
                    Err(RecvTimeoutError::Timeout) => {
                        let start = Instant::now();

                        callback();

                        // make sure there the system will at most wait the interval
                        timeout = interval
                            .checked_sub(start.elapsed())
                            .unwrap_or(Duration::from_secs(0));
                    }
                    Ok(_) | Err(_) => break, // shutdown
                }
            }
        });

        log::debug!("started worker with an interval of {:?}", interval);
        self.thread = Some(thread);
        self.shutdown = Some(send);
    }

    /// Will stop the worker, in two steps one by sending an empty message
    /// and second by droping the only sender for the given receiver.
    fn stop(&mut self) {
        if let Some(sender) = self.shutdown.take() {
            // the thread might already be gone after a panic in the callback
            let _ = sender.send(());
        }
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                log::error!("the worker thread panicked");
            }
            log::debug!("stopped worker");
        }
    }

    fn is_alive(&self) -> bool {
        Arc::strong_count(&self.alive) > 1
    }
}

impl Drop for Worker {
    fn drop(&mut self) {
        self.stop();
    }
}
