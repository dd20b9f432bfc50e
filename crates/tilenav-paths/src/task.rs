//! Background execution of path operations.

use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, TryRecvError, bounded};
use tilenav_core::Context;

use crate::error::PathError;

/// Progress callback handed to a background operation. It is called on the
/// worker thread with values in `(0, 1]`.
pub type Progress = Box<dyn FnMut(f32) + Send>;

/// Borrow an optional owned callback the way the `_with` operations take it.
pub(crate) fn progress_ref(progress: &mut Option<Progress>) -> Option<&mut dyn FnMut(f32)> {
    progress.as_deref_mut().map(|f| f as &mut dyn FnMut(f32))
}

/// Handle to a path operation running on its own thread.
///
/// The result is delivered once, either through [`try_result`] or
/// [`wait`]. Dropping the handle requests cancellation.
///
/// [`try_result`]: PathTask::try_result
/// [`wait`]: PathTask::wait
#[derive(Debug)]
pub struct PathTask<T, C> {
    ctx: Context,
    reply: Receiver<Result<T, PathError<C>>>,
    handle: Option<JoinHandle<()>>,
    taken: bool,
}

impl<T, C> PathTask<T, C>
where
    T: Send + 'static,
    C: Send + 'static,
{
    /// Run `job` on a new thread with a fresh cancellation context.
    pub(crate) fn spawn<F>(job: F) -> Self
    where
        F: FnOnce(&Context) -> Result<T, PathError<C>> + Send + 'static,
    {
        let ctx = Context::new();
        let worker_ctx = ctx.clone();
        let (tx, reply) = bounded(1);
        let spawned = thread::Builder::new()
            .name("tilenav-search".into())
            .spawn(move || {
                // The receiver may already be gone if the handle was dropped.
                let _ = tx.send(job(&worker_ctx));
            });
        let handle = match spawned {
            Ok(handle) => {
                log::trace!("spawned background path search");
                Some(handle)
            }
            Err(err) => {
                log::warn!("could not spawn path search thread: {err}");
                None
            }
        };
        Self {
            ctx,
            reply,
            handle,
            taken: false,
        }
    }
}

impl<T, C> PathTask<T, C> {
    /// Request cancellation. The operation resolves to
    /// [`PathError::OperationCancelled`] unless it already finished.
    #[inline]
    pub fn cancel(&self) {
        self.ctx.cancel();
    }

    /// The cancellation context observed by the worker.
    #[inline]
    pub fn context(&self) -> &Context {
        &self.ctx
    }

    /// Whether the worker thread has stopped.
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// The result if it is ready, without blocking.
    ///
    /// Returns `None` while the operation is running. Once the result has
    /// been returned, every further call reports [`PathError::WorkerLost`].
    pub fn try_result(&mut self) -> Option<Result<T, PathError<C>>> {
        if self.taken {
            return Some(Err(PathError::WorkerLost));
        }
        match self.reply.try_recv() {
            Ok(result) => {
                self.taken = true;
                Some(result)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(PathError::WorkerLost)),
        }
    }

    /// Block until the operation finishes and return its result.
    pub fn wait(mut self) -> Result<T, PathError<C>> {
        let result = if self.taken {
            Err(PathError::WorkerLost)
        } else {
            self.reply.recv().unwrap_or(Err(PathError::WorkerLost))
        };
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::warn!("path search thread panicked");
            }
        }
        result
    }
}

impl<T, C> Drop for PathTask<T, C> {
    fn drop(&mut self) {
        self.ctx.cancel();
    }
}
