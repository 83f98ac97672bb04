//! Call-scoped diagnostic store backed by a thread-local frame stack

use super::DiagnosticContext;
use std::cell::RefCell;
use std::marker::PhantomData;
use std::rc::Rc;

thread_local! {
    static FRAMES: RefCell<Vec<Vec<(String, String)>>> = const { RefCell::new(Vec::new()) };
}

/// Handle onto the current thread's scoped values
///
/// Values pushed with [`ScopedContext::push`] are visible on the pushing
/// thread until the returned guard drops. Inner frames shadow outer ones.
///
/// # Example
///
/// ```
/// use faultline_core::context::{DiagnosticContext, ScopedContext};
///
/// let scoped = ScopedContext;
/// {
///     let _guard = ScopedContext::push([("RequestId", "r-42")]);
///     assert_eq!(scoped.get("RequestId"), Some("r-42".to_string()));
/// }
/// assert!(!scoped.contains("RequestId"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ScopedContext;

impl ScopedContext {
    /// Push a frame of values for the current thread
    pub fn push<I, K, V>(values: I) -> ScopeGuard
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let frame: Vec<(String, String)> = values
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        let depth = FRAMES.with(|frames| {
            let mut frames = frames.borrow_mut();
            let depth = frames.len();
            frames.push(frame);
            depth
        });
        ScopeGuard {
            depth,
            _not_send: PhantomData,
        }
    }

    /// Number of frames active on the current thread
    pub fn depth() -> usize {
        FRAMES.with(|frames| frames.borrow().len())
    }
}

impl DiagnosticContext for ScopedContext {
    fn get(&self, key: &str) -> Option<String> {
        FRAMES.with(|frames| {
            frames.borrow().iter().rev().find_map(|frame| {
                frame
                    .iter()
                    .rev()
                    .find(|(k, _)| k == key)
                    .map(|(_, v)| v.clone())
            })
        })
    }
}

/// Pops its frame (and any frames pushed after it) when dropped
#[must_use = "the scoped values are removed as soon as the guard is dropped"]
pub struct ScopeGuard {
    depth: usize,
    _not_send: PhantomData<Rc<()>>,
}

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        FRAMES.with(|frames| frames.borrow_mut().truncate(self.depth));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inner_frame_shadows_outer() {
        let scoped = ScopedContext;
        let _outer = ScopedContext::push([("User", "alice"), ("RequestId", "r-1")]);
        {
            let _inner = ScopedContext::push([("RequestId", "r-2")]);
            assert_eq!(scoped.get("RequestId"), Some("r-2".to_string()));
            assert_eq!(scoped.get("User"), Some("alice".to_string()));
        }
        assert_eq!(scoped.get("RequestId"), Some("r-1".to_string()));
    }

    #[test]
    fn test_guard_restores_depth() {
        let before = ScopedContext::depth();
        {
            let _guard = ScopedContext::push([("k", "v")]);
            assert_eq!(ScopedContext::depth(), before + 1);
        }
        assert_eq!(ScopedContext::depth(), before);
    }

    #[test]
    fn test_values_are_thread_local() {
        let _guard = ScopedContext::push([("Job", "nightly")]);
        let seen = std::thread::spawn(|| ScopedContext.get("Job"))
            .join()
            .unwrap();
        assert_eq!(seen, None);
        assert!(ScopedContext.contains("Job"));
    }
}
