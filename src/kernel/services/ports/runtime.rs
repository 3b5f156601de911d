use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

pub type BoxFuture = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

pub trait AsyncExecutor: Send + Sync {
    fn spawn(&self, task: BoxFuture);
}

/// Sleep capability for the pacing loop. The returned future is dropped early when the
/// wait is cancelled, so implementations must not rely on running to completion.
pub trait Clock: Send + Sync {
    fn sleep(&self, duration: Duration) -> BoxFuture;
}
