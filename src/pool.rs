//! Process-wide free lists for canonical-string buffers and provider
//! contexts.
//!
//! The pools are an optimization, not part of the signing contract: every
//! borrower gets exclusive access to its item, and guards return items on
//! drop so no exit path can leak one.

use std::ops::{Deref, DerefMut};
use std::sync::Mutex;

use crate::context::ProviderContext;

/// Buffers start at 1 KiB and are discarded on return once they have grown
/// to 4 KiB, which bounds how much memory an occasional huge canonical
/// string can pin in the pool.
const BUFFER_INIT_CAPACITY: usize = 1024;
const BUFFER_HOLD_CAPACITY: usize = 4096;

static BUFFERS: BufferPool = BufferPool::new();
static CONTEXTS: ContextPool = ContextPool::new();

/// Borrow a cleared string buffer from the process-wide pool.
pub(crate) fn borrow_buffer() -> BufferGuard {
    BUFFERS.borrow()
}

/// Borrow a reset provider context from the process-wide pool.
pub(crate) fn borrow_context() -> ContextGuard {
    CONTEXTS.borrow()
}

/// A mutex-guarded free list of string buffers.
pub(crate) struct BufferPool {
    items: Mutex<Vec<String>>,
}

impl BufferPool {
    pub(crate) const fn new() -> Self {
        Self {
            items: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn borrow(&'static self) -> BufferGuard {
        let mut buf = self
            .items
            .lock()
            .expect("lock poisoned")
            .pop()
            .unwrap_or_else(|| String::with_capacity(BUFFER_INIT_CAPACITY));
        buf.clear();
        BufferGuard {
            pool: self,
            buf: Some(buf),
        }
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.items.lock().expect("lock poisoned").len()
    }
}

/// RAII guard over a pooled buffer. Deref target is the `String` itself.
pub(crate) struct BufferGuard {
    pool: &'static BufferPool,
    buf: Option<String>,
}

impl Deref for BufferGuard {
    type Target = String;

    fn deref(&self) -> &String {
        self.buf.as_ref().expect("buffer taken")
    }
}

impl DerefMut for BufferGuard {
    fn deref_mut(&mut self) -> &mut String {
        self.buf.as_mut().expect("buffer taken")
    }
}

impl Drop for BufferGuard {
    fn drop(&mut self) {
        let buf = self.buf.take().expect("buffer taken");
        if buf.capacity() < BUFFER_HOLD_CAPACITY {
            self.pool.items.lock().expect("lock poisoned").push(buf);
        }
    }
}

/// A mutex-guarded free list of provider contexts.
pub(crate) struct ContextPool {
    items: Mutex<Vec<ProviderContext>>,
}

impl ContextPool {
    pub(crate) const fn new() -> Self {
        Self {
            items: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn borrow(&'static self) -> ContextGuard {
        let mut ctx = self
            .items
            .lock()
            .expect("lock poisoned")
            .pop()
            .unwrap_or_default();
        ctx.reset();
        ContextGuard {
            pool: self,
            ctx: Some(ctx),
        }
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.items.lock().expect("lock poisoned").len()
    }
}

/// RAII guard over a pooled provider context.
pub(crate) struct ContextGuard {
    pool: &'static ContextPool,
    ctx: Option<ProviderContext>,
}

impl Deref for ContextGuard {
    type Target = ProviderContext;

    fn deref(&self) -> &ProviderContext {
        self.ctx.as_ref().expect("context taken")
    }
}

impl DerefMut for ContextGuard {
    fn deref_mut(&mut self) -> &mut ProviderContext {
        self.ctx.as_mut().expect("context taken")
    }
}

impl Drop for ContextGuard {
    fn drop(&mut self) {
        let ctx = self.ctx.take().expect("context taken");
        self.pool.items.lock().expect("lock poisoned").push(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_pool_stays_bounded() {
        static POOL: BufferPool = BufferPool::new();

        for _ in 0..10_000 {
            let mut buf = POOL.borrow();
            buf.push_str("bytes=0-1024");
        }
        // Sequential borrow/return reuses a single buffer.
        assert_eq!(POOL.len(), 1);
    }

    #[test]
    fn test_buffer_grown_past_hold_limit_is_discarded() {
        static POOL: BufferPool = BufferPool::new();

        {
            let mut buf = POOL.borrow();
            buf.push_str(&"x".repeat(BUFFER_HOLD_CAPACITY + 1));
            assert!(buf.capacity() >= BUFFER_HOLD_CAPACITY);
        }
        assert_eq!(POOL.len(), 0);

        let buf = POOL.borrow();
        assert!(buf.capacity() < BUFFER_HOLD_CAPACITY);
    }

    #[test]
    fn test_context_pool_reuses_and_resets() {
        static POOL: ContextPool = ContextPool::new();

        for _ in 0..10_000 {
            let mut ctx = POOL.borrow();
            assert!(ctx.signed_headers.is_empty());
            ctx.signed_headers.add("x-test-header", "value");
            ctx.object_key.push_str("a/b.txt");
        }
        assert_eq!(POOL.len(), 1);
    }
}
