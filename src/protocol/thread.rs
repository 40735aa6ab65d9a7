use std::{
    sync::{Arc, Mutex, mpsc},
    thread,
};

use log::debug;

pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// Fixed-size pool of worker threads, one connection handled per job.
///
/// Connections share no mutable state (the word sequence is read-only), so
/// workers need no synchronization beyond the shared job queue. Dropping
/// the pool closes the queue; workers finish the jobs already queued, exit,
/// and are joined.
#[derive(Debug)]
pub struct ThreadPool {
    workers: Vec<Worker>,
    sender: Option<mpsc::Sender<Job>>,
}

impl ThreadPool {
    pub fn new(size: usize) -> Self {
        assert!(size > 0);

        let (sender, receiver) = mpsc::channel();
        let receiver = Arc::new(Mutex::new(receiver));

        let workers = (0..size)
            .map(|id| Worker::new(id, Arc::clone(&receiver)))
            .collect();

        Self {
            workers,
            sender: Some(sender),
        }
    }

    pub fn execute<F>(&self, f: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let job: Job = Box::new(f);
        self.sender.as_ref().unwrap().send(job).unwrap();
    }
}

impl Drop for ThreadPool {
    fn drop(&mut self) {
        drop(self.sender.take());

        for worker in self.workers.drain(..) {
            debug!("shutting down worker {}", worker.id);
            worker.thread.join().unwrap();
        }
    }
}

#[derive(Debug)]
struct Worker {
    id: usize,
    thread: thread::JoinHandle<()>,
}

impl Worker {
    fn new(id: usize, receiver: Arc<Mutex<mpsc::Receiver<Job>>>) -> Self {
        let thread = thread::spawn(move || {
            // The lock guards only the receive; it is released before the
            // job runs so other workers can pick up connections meanwhile.
            while let Ok(job) = {
                let receiver = receiver.lock().unwrap();
                receiver.recv()
            } {
                debug!("worker {id} handling a connection");
                job();
            }
            debug!("worker {id} exiting, job queue closed");
        });

        Self { id, thread }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[test]
    fn runs_jobs_on_worker_threads() {
        let pool = ThreadPool::new(4);
        let (done, results) = mpsc::channel();

        for i in 0..8 {
            let done = done.clone();
            pool.execute(move || done.send(i).unwrap());
        }

        let mut seen: Vec<usize> = results.iter().take(8).collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..8).collect::<Vec<_>>());
    }

    #[test]
    fn drop_drains_queue_and_joins_workers() {
        let counter = Arc::new(AtomicUsize::new(0));
        let pool = ThreadPool::new(2);

        for _ in 0..6 {
            let counter = Arc::clone(&counter);
            pool.execute(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            });
        }

        // Join only completes if workers exit once the queue closes; a
        // worker that kept waiting after the channel error would hang this
        // test.
        drop(pool);
        assert_eq!(counter.load(Ordering::SeqCst), 6);
    }
}
