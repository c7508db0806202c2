//! # Closure-backed subscriber.
//!
//! [`HookFn`] adapts a synchronous closure to [`Subscribe`]; used by
//! [`Executor::on_fn`](crate::Executor::on_fn).

use std::marker::PhantomData;

use async_trait::async_trait;

use crate::events::Event;
use crate::subscribers::Subscribe;

/// Function-backed subscriber.
pub(crate) struct HookFn<T, F> {
    f: F,
    _marker: PhantomData<fn(&T)>,
}

impl<T, F> HookFn<T, F>
where
    F: Fn(&Event<'_, T>) + Send + Sync + 'static,
{
    pub(crate) fn new(f: F) -> Self {
        Self {
            f,
            _marker: PhantomData,
        }
    }
}

#[async_trait]
impl<T, F> Subscribe<T> for HookFn<T, F>
where
    T: Send + Sync + 'static,
    F: Fn(&Event<'_, T>) + Send + Sync + 'static,
{
    async fn on_event(&self, event: &Event<'_, T>) {
        (self.f)(event);
    }

    fn name(&self) -> &'static str {
        "hook_fn"
    }
}
