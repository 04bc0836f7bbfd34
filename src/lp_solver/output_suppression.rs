//! Keeps CBC's console chatter out of stdout while it solves.
//!
//! `gag` allows a single redirect of a stream per process at a time, and a
//! second `Gag::stdout()` while one is alive fails. Concurrent solves (the
//! test harness runs several) therefore share one redirect through a weak
//! reference: the first caller creates it, later callers clone it, and it is
//! released when the last guard drops.

use gag::Gag;
use std::io;
use std::sync::{Arc, Mutex, PoisonError, Weak};

static SHARED_STDOUT: Mutex<Weak<Gag>> = Mutex::new(Weak::new());

/// Stdout stays silenced while any guard is alive.
pub struct SilencedStdout {
    _gag: Arc<Gag>,
}

impl SilencedStdout {
    pub fn acquire() -> io::Result<Self> {
        let mut shared = SHARED_STDOUT.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(gag) = shared.upgrade() {
            return Ok(Self { _gag: gag });
        }

        let gag = Arc::new(Gag::stdout()?);
        *shared = Arc::downgrade(&gag);
        Ok(Self { _gag: gag })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Barrier;
    use std::thread;

    #[test]
    fn test_live_guards_share_one_redirect() {
        let Ok(first) = SilencedStdout::acquire() else {
            // stdout already redirected by something outside this module
            return;
        };
        let second = SilencedStdout::acquire().expect("second guard reuses the redirect");

        assert!(Arc::ptr_eq(&first._gag, &second._gag));
        let count = Arc::strong_count(&first._gag);
        drop(second);
        assert_eq!(Arc::strong_count(&first._gag), count - 1);
    }

    #[test]
    fn test_concurrent_acquire_does_not_panic() {
        const THREADS: usize = 4;
        let barrier = Arc::new(Barrier::new(THREADS));

        let workers: Vec<_> = (0..THREADS)
            .map(|_| {
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    SilencedStdout::acquire().is_ok()
                })
            })
            .collect();

        for worker in workers {
            worker.join().expect("worker should not panic");
        }
    }
}
