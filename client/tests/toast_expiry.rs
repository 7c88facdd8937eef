//! Toast lifetimes on the tokio timer adapter with a paused clock.

use std::sync::Arc;
use std::time::Duration;

use barber_client::domain::{NewToast, NotificationQueue};
use barber_client::outbound::scheduler::TokioRemovalScheduler;

fn queue() -> NotificationQueue {
    NotificationQueue::new(Arc::new(TokioRemovalScheduler::current()))
}

#[tokio::test(start_paused = true)]
async fn toast_disappears_after_three_seconds() {
    let queue = queue();
    queue.add(NewToast::success("Signed in"));

    tokio::time::sleep(Duration::from_millis(2999)).await;
    assert_eq!(queue.messages().len(), 1);

    tokio::time::sleep(Duration::from_millis(2)).await;
    assert!(queue.is_empty());
}

#[tokio::test(start_paused = true)]
async fn each_toast_expires_on_its_own_timer() {
    let queue = queue();
    queue.add(NewToast::error("first"));
    tokio::time::sleep(Duration::from_millis(1000)).await;
    let second = queue.add(NewToast::error("second"));

    tokio::time::sleep(Duration::from_millis(2001)).await;
    let remaining: Vec<_> = queue.messages().iter().map(|toast| toast.id()).collect();
    assert_eq!(remaining, vec![second]);

    tokio::time::sleep(Duration::from_millis(1000)).await;
    assert!(queue.is_empty());
}

#[tokio::test(start_paused = true)]
async fn removing_dismissed_or_expired_toasts_is_harmless() {
    let queue = queue();
    let dismissed = queue.add(NewToast::success("dismissed"));
    queue.remove(dismissed);
    let kept = queue.add(NewToast::success("kept"));

    tokio::time::sleep(Duration::from_millis(3001)).await;

    assert!(queue.is_empty());
    queue.remove(kept);
    assert!(queue.is_empty());
}
