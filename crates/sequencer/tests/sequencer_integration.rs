//! Integration tests for checkout and status sequencing.

use std::time::Duration;

use common::ItemId;
use domain::{CartError, Money, NewCartItem, OrderStatus, PricingPolicy, menu};
use sequencer::{CheckoutError, OrderProgress, OrderSession, StatusSchedule};

fn session() -> OrderSession {
    OrderSession::new(PricingPolicy::default(), StatusSchedule::default()).unwrap()
}

fn dish(id: &str) -> NewCartItem {
    menu::find(&ItemId::new(id)).unwrap().to_cart_item()
}

async fn advance_to(elapsed_ms: u64, last_ms: &mut u64) {
    tokio::time::advance(Duration::from_millis(elapsed_ms - *last_ms)).await;
    *last_ms = elapsed_ms;
    for _ in 0..4 {
        tokio::task::yield_now().await;
    }
}

mod progression {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_statuses_change_at_fixed_offsets() {
        let session = session();
        session.add_item(dish("1")).unwrap();
        session.checkout().unwrap();

        let mut now = 0;
        let expected = [
            (1_999, OrderStatus::Pending),
            (2_000, OrderStatus::Confirmed),
            (4_999, OrderStatus::Confirmed),
            (5_000, OrderStatus::Preparing),
            (7_999, OrderStatus::Preparing),
            (8_000, OrderStatus::Ready),
            (10_999, OrderStatus::Ready),
            (11_000, OrderStatus::Delivered),
            (60_000, OrderStatus::Delivered),
        ];
        for (at, status) in expected {
            advance_to(at, &mut now).await;
            assert_eq!(session.order_status(), status, "at {at}ms");
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_custom_schedule() {
        let schedule = StatusSchedule::new(
            Duration::from_millis(100),
            Duration::from_millis(200),
            Duration::from_millis(300),
            Duration::from_millis(400),
        )
        .unwrap();
        let session = OrderSession::new(PricingPolicy::default(), schedule).unwrap();
        session.add_item(dish("2")).unwrap();
        session.checkout().unwrap();

        let mut now = 0;
        advance_to(250, &mut now).await;
        assert_eq!(session.order_status(), OrderStatus::Preparing);
        advance_to(400, &mut now).await;
        assert_eq!(session.order_status(), OrderStatus::Delivered);
    }

    #[tokio::test(start_paused = true)]
    async fn test_subscriber_receives_every_status_in_order() {
        let session = session();
        let mut rx = session.subscribe_status();
        session.add_item(dish("4")).unwrap();
        let order = session.checkout().unwrap();

        let mut seen = Vec::new();
        loop {
            rx.changed().await.unwrap();
            let progress = rx.borrow_and_update().clone();
            assert_eq!(progress.order_id(), Some(order.id));
            seen.push(progress.status);
            if progress.status == OrderStatus::Delivered {
                break;
            }
        }
        assert_eq!(seen, OrderStatus::ALL);
    }
}

mod checkout_guard {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_empty_cart_never_starts_timers() {
        let session = session();
        assert_eq!(session.checkout(), Err(CheckoutError::EmptyCart));

        let mut now = 0;
        advance_to(20_000, &mut now).await;
        assert_eq!(session.progress(), OrderProgress::default());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cart_locked_until_delivered() {
        let session = session();
        session.add_item(dish("1")).unwrap();
        let order = session.checkout().unwrap();
        let locked = Err(CartError::Frozen { order_id: order.id });

        let mut now = 0;
        advance_to(10_000, &mut now).await;
        assert_eq!(session.add_item(dish("3")), locked);
        assert_eq!(session.update_quantity(&ItemId::new("1"), 4), locked);
        assert_eq!(session.clear_cart(), locked);

        advance_to(11_000, &mut now).await;
        assert!(!session.cart().is_frozen());
        session.add_item(dish("3")).unwrap();
        assert_eq!(session.cart().total().cents(), 1699 + 1299);
    }

    #[tokio::test(start_paused = true)]
    async fn test_checkout_in_progress_reports_status() {
        let session = session();
        session.add_item(dish("5")).unwrap();
        let order = session.checkout().unwrap();

        let mut now = 0;
        advance_to(6_000, &mut now).await;
        assert_eq!(
            session.checkout(),
            Err(CheckoutError::OrderInProgress {
                order_id: order.id,
                status: OrderStatus::Preparing,
            })
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_order_after_delivery() {
        let session = session();
        session.add_item(dish("6")).unwrap();
        let first = session.checkout().unwrap();

        let mut now = 0;
        advance_to(11_000, &mut now).await;
        let second = session.checkout().unwrap();
        assert_ne!(first.id, second.id);
        assert_eq!(session.order_status(), OrderStatus::Pending);

        advance_to(13_000, &mut now).await;
        assert_eq!(session.order_status(), OrderStatus::Confirmed);
        assert_eq!(session.current_order().map(|o| o.id), Some(second.id));
    }

    #[tokio::test(start_paused = true)]
    async fn test_clear_after_delivery_resets_status() {
        let session = session();
        session.add_item(dish("1")).unwrap();
        session.checkout().unwrap();

        let mut now = 0;
        advance_to(11_000, &mut now).await;
        session.clear_cart().unwrap();
        assert!(session.cart().is_empty());
        assert_eq!(session.progress(), OrderProgress::default());
    }
}

mod delivery_on_worker_threads {
    use super::*;

    fn fast_session() -> OrderSession {
        let schedule = StatusSchedule::new(
            Duration::from_millis(1),
            Duration::from_millis(2),
            Duration::from_millis(3),
            Duration::from_millis(4),
        )
        .unwrap();
        OrderSession::new(PricingPolicy::default(), schedule).unwrap()
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_cart_reopens_as_soon_as_delivered_is_seen() {
        for _ in 0..100 {
            let session = fast_session();
            let mut rx = session.subscribe_status();
            session.add_item(dish("1")).unwrap();
            let first = session.checkout().unwrap();

            rx.wait_for(|progress| progress.status == OrderStatus::Delivered)
                .await
                .unwrap();

            assert!(!session.cart().is_frozen());
            assert_eq!(session.add_item(dish("3")), Ok(()));
            let second = session.checkout().unwrap();
            assert_ne!(first.id, second.id);
            assert_eq!(session.cart().frozen_for(), Some(second.id));
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_clear_right_after_delivery() {
        for _ in 0..100 {
            let session = fast_session();
            let mut rx = session.subscribe_status();
            session.add_item(dish("2")).unwrap();
            session.checkout().unwrap();

            rx.wait_for(|progress| progress.status == OrderStatus::Delivered)
                .await
                .unwrap();

            assert_eq!(session.clear_cart(), Ok(()));
            assert_eq!(session.progress(), OrderProgress::default());
        }
    }
}

mod cancellation {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_order_stops_advancing() {
        let session = session();
        session.add_item(dish("1")).unwrap();
        let order = session.checkout().unwrap();

        let mut now = 0;
        advance_to(3_000, &mut now).await;
        assert_eq!(session.cancel_order(), Some(order.id));

        advance_to(30_000, &mut now).await;
        assert_eq!(session.order_status(), OrderStatus::Pending);
        assert!(session.current_order().is_none());
        assert!(!session.cart().is_frozen());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_timers_do_not_touch_next_order() {
        let session = session();
        session.add_item(dish("1")).unwrap();
        session.checkout().unwrap();

        let mut now = 0;
        advance_to(4_000, &mut now).await;
        session.cancel_order().unwrap();
        let second = session.checkout().unwrap();

        // The cancelled order would have reached Preparing at 5s.
        advance_to(5_000, &mut now).await;
        assert_eq!(session.order_status(), OrderStatus::Pending);
        advance_to(6_000, &mut now).await;
        assert_eq!(session.order_status(), OrderStatus::Confirmed);

        // Its delivery at 11s must not unlock the second order's cart.
        advance_to(11_500, &mut now).await;
        assert_eq!(session.cart().frozen_for(), Some(second.id));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_after_delivery_is_noop() {
        let session = session();
        session.add_item(dish("1")).unwrap();
        session.checkout().unwrap();

        let mut now = 0;
        advance_to(11_000, &mut now).await;
        assert_eq!(session.cancel_order(), None);
        assert_eq!(session.order_status(), OrderStatus::Delivered);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_session_stops_timers() {
        let session = session();
        let mut rx = session.subscribe_status();
        session.add_item(dish("1")).unwrap();
        session.checkout().unwrap();
        drop(session);

        let mut now = 0;
        advance_to(20_000, &mut now).await;
        assert_eq!(rx.borrow().status, OrderStatus::Pending);
    }
}

mod pricing {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_checkout_total_for_twenty_dollars() {
        let session = session();
        session
            .add_item(NewCartItem::new("x", "Special", Money::from_cents(2000), "x.jpg"))
            .unwrap();
        let order = session.checkout().unwrap();

        assert_eq!(order.summary.subtotal.cents(), 2000);
        assert_eq!(order.summary.delivery_fee.cents(), 399);
        assert_eq!(order.summary.tax.cents(), 200);
        assert_eq!(order.summary.total.to_string(), "$25.99");
    }

    #[tokio::test(start_paused = true)]
    async fn test_order_keeps_cart_snapshot() {
        let session = session();
        session.add_item(dish("1")).unwrap();
        session.add_item(dish("3")).unwrap();
        session.adjust_quantity(&ItemId::new("3"), 1).unwrap();
        let order = session.checkout().unwrap();

        assert_eq!(order.items.len(), 2);
        assert_eq!(order.item_count(), 3);
        assert_eq!(order.summary.subtotal.cents(), 1699 + 2 * 1299);
        assert_eq!(order.summary.total, session.summary().total);
    }
}
