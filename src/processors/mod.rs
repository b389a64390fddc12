use std::sync::atomic::{AtomicU64, Ordering};

pub mod schedule_processor;
pub mod status_processor;

/// One fetch-and-render cycle for a dashboard view. Failures are handled
/// inside the cycle and never escape it.
pub trait RefreshProcessor: Send + Sync + 'static {
    fn refresh(&self) -> impl std::future::Future<Output = ()> + Send;
}

/// Orders overlapping fetch cycles of one processor.
///
/// Each cycle takes a generation number before its request goes out and asks
/// to commit it once the response is in. A commit succeeds only if no later
/// generation has rendered yet.
#[derive(Debug, Default)]
pub struct GenerationGuard {
    issued: AtomicU64,
    rendered: AtomicU64,
}

impl GenerationGuard {
    pub fn issue(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn commit(&self, generation: u64) -> bool {
        self.rendered.fetch_max(generation, Ordering::SeqCst) < generation
    }
}
