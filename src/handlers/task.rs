use tokio::task::JoinHandle;

/// Aborts the wrapped task when dropped.
pub struct AutoCancelTask<T>(pub JoinHandle<T>);

impl<T> Drop for AutoCancelTask<T> {
    fn drop(&mut self) {
        self.0.abort();
    }
}
