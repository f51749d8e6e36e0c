//! Loading-flag scope around an async operation.

use std::future::Future;

struct LoadingGuard<F: FnMut(bool)>(F);

impl<F: FnMut(bool)> Drop for LoadingGuard<F> {
    fn drop(&mut self) {
        (self.0)(false);
    }
}

/// Hold `set_loading(true)` for the duration of `operation` and pass the
/// outcome through unchanged.
///
/// The flag is released on drop, so success, failure, and cancellation all
/// clear it.
pub async fn with_loading<T, F, Fut>(mut set_loading: F, operation: Fut) -> T
where
    F: FnMut(bool),
    Fut: Future<Output = T>,
{
    set_loading(true);
    let _guard = LoadingGuard(set_loading);
    operation.await
}
