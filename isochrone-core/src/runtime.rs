//! Drive async fetches to completion from synchronous callers.

use std::future::Future;

use tokio::runtime::{Builder, Handle, RuntimeFlavor};

use crate::IsochroneError;

/// Run `future` to completion on the calling thread.
///
/// Outside any runtime a private current-thread runtime is built for the
/// call. Inside a multi-threaded runtime the caller's handle is used through
/// [`tokio::task::block_in_place`]. Inside a current-thread runtime blocking
/// would stall the runtime that has to drive the request, so the call is
/// refused.
pub(crate) fn block_on<F: Future>(future: F) -> Result<F::Output, IsochroneError> {
    match Handle::try_current() {
        Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
            Ok(tokio::task::block_in_place(|| handle.block_on(future)))
        }
        Ok(_) => Err(IsochroneError::BlockingInCurrentThread),
        Err(_) => {
            let runtime = Builder::new_current_thread()
                .enable_all()
                .build()
                .map_err(|err| IsochroneError::Runtime {
                    message: err.to_string(),
                })?;
            Ok(runtime.block_on(future))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn runs_outside_a_runtime() {
        let value = block_on(async { 40 + 2 }).expect("future should complete");
        assert_eq!(value, 42);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn runs_inside_multi_thread_runtime() {
        let value = block_on(async { "done" }).expect("future should complete");
        assert_eq!(value, "done");
    }

    #[tokio::test]
    async fn refuses_current_thread_runtime() {
        let outcome = block_on(async {});
        assert_eq!(outcome, Err(IsochroneError::BlockingInCurrentThread));
    }
}
