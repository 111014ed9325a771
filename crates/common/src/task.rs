//! Per-event task spawning with failure containment.

use std::{any::Any, future::Future, panic::AssertUnwindSafe};

use {futures::FutureExt, tokio::task::JoinHandle, tracing::error};

/// Spawn `fut` as its own task, catching any panic at the task boundary.
///
/// A panic is logged and swallowed so one failing event never takes down the
/// gateway loop or any other in-flight event. The returned handle resolves to
/// `true` when the future ran to completion and `false` when it panicked.
pub fn spawn_isolated<F>(event: &'static str, fut: F) -> JoinHandle<bool>
where
    F: Future<Output = ()> + Send + 'static,
{
    tokio::spawn(async move {
        match AssertUnwindSafe(fut).catch_unwind().await {
            Ok(()) => true,
            Err(panic) => {
                error!(event, panic = %panic_message(panic.as_ref()), "event task panicked");
                false
            },
        }
    })
}

/// Best-effort extraction of a panic payload message.
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use super::*;

    #[tokio::test]
    async fn completed_task_reports_true() {
        let hits = Arc::new(AtomicUsize::new(0));
        let h = Arc::clone(&hits);
        let ok = spawn_isolated("test", async move {
            h.fetch_add(1, Ordering::SeqCst);
        })
        .await
        .unwrap();
        assert!(ok);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn panic_is_contained() {
        let ok = spawn_isolated("test", async {
            panic!("handler blew up");
        })
        .await
        .unwrap();
        assert!(!ok);

        // Runtime keeps serving other tasks afterwards.
        let ok = spawn_isolated("test", async {}).await.unwrap();
        assert!(ok);
    }

    #[test]
    fn panic_message_variants() {
        let boxed: Box<dyn Any + Send> = Box::new("static str");
        assert_eq!(panic_message(boxed.as_ref()), "static str");
        let boxed: Box<dyn Any + Send> = Box::new(String::from("owned"));
        assert_eq!(panic_message(boxed.as_ref()), "owned");
        let boxed: Box<dyn Any + Send> = Box::new(7_u8);
        assert_eq!(panic_message(boxed.as_ref()), "non-string panic payload");
    }
}
