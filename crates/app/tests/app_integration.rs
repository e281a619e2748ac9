//! Integration tests for the ordering shell.

use std::time::Duration;

use app::{Config, Reply, Shell, ToastVariant};
use domain::OrderStatus;

fn shell() -> Shell {
    app::build_shell(&Config::default()).unwrap()
}

fn toast_title(reply: &Reply) -> Option<&str> {
    reply.toast.as_ref().map(|t| t.title.as_str())
}

async fn advance(secs: u64) {
    tokio::time::advance(Duration::from_secs(secs)).await;
    for _ in 0..4 {
        tokio::task::yield_now().await;
    }
}

#[tokio::test]
async fn test_add_shows_toast_and_updates_cart() {
    let mut shell = shell();

    let reply = shell.execute("add margherita pizza");
    assert_eq!(toast_title(&reply), Some("Added to cart!"));
    assert_eq!(
        reply.toast.unwrap().description,
        "Margherita Pizza has been added to your cart."
    );

    shell.execute("add 1");
    shell.execute("add 3");
    let cart = shell.session().cart();
    assert_eq!(cart.item_count(), 3);
    assert_eq!(cart.total().cents(), 4697);
}

#[tokio::test]
async fn test_quantity_commands() {
    let mut shell = shell();
    shell.execute("add 1");

    shell.execute("inc 1");
    assert_eq!(shell.session().cart().item_count(), 2);
    shell.execute("qty margherita 5");
    assert_eq!(shell.session().cart().item_count(), 5);
    shell.execute("dec 1");
    assert_eq!(shell.session().cart().item_count(), 4);
    shell.execute("qty 1 0");
    assert!(shell.session().cart().is_empty());
}

#[tokio::test]
async fn test_cart_lists_fee_and_tax() {
    let mut shell = shell();
    shell.execute("add 1");
    let reply = shell.execute("cart");
    assert!(reply.lines.iter().any(|l| l.contains("Delivery Fee: $3.99")));
    assert!(reply.lines.iter().any(|l| l.contains("Tax:          $1.70")));
    assert!(reply.lines.iter().any(|l| l.contains("Total:        $22.68")));

    shell.execute("clear");
    let reply = shell.execute("cart");
    assert_eq!(reply.lines, vec!["Your cart is empty.".to_string()]);
}

#[tokio::test]
async fn test_cart_header_counts_items() {
    let mut shell = shell();
    shell.execute("add 1");
    assert_eq!(shell.execute("cart").lines[0], "Your Cart (1 item)");

    shell.execute("qty 1 3");
    shell.execute("add 3");
    assert_eq!(shell.execute("cart").lines[0], "Your Cart (4 items)");
}

#[tokio::test]
async fn test_empty_checkout_is_destructive_toast() {
    let mut shell = shell();
    let reply = shell.execute("checkout");
    let toast = reply.toast.unwrap();
    assert_eq!(toast.title, "Cart is empty");
    assert_eq!(toast.variant, ToastVariant::Destructive);
    assert_eq!(shell.session().order_status(), OrderStatus::Pending);
}

#[tokio::test(start_paused = true)]
async fn test_checkout_then_status_progress() {
    let mut shell = shell();
    shell.execute("add 4");
    let reply = shell.execute("checkout");
    assert_eq!(toast_title(&reply), Some("Order placed successfully!"));

    let reply = shell.execute("add 1");
    assert_eq!(toast_title(&reply), Some("Cart locked"));

    advance(5).await;
    let status = shell.execute("status");
    assert!(status.lines[0].contains("Preparing Your Order (60%)"));

    advance(6).await;
    let status = shell.execute("status");
    assert!(status.lines[0].contains("Delivered (100%)"));

    let reply = shell.execute("add 1");
    assert_eq!(toast_title(&reply), Some("Added to cart!"));
}

#[tokio::test(start_paused = true)]
async fn test_cancel_command() {
    let mut shell = shell();
    assert_eq!(shell.execute("cancel").lines, vec!["No order in progress."]);

    shell.execute("add 2");
    shell.execute("checkout");
    let reply = shell.execute("cancel");
    assert_eq!(toast_title(&reply), Some("Order cancelled"));

    advance(20).await;
    assert_eq!(shell.session().order_status(), OrderStatus::Pending);
    assert!(!shell.session().cart().is_frozen());
}

#[tokio::test]
async fn test_login_logout_and_password() {
    let mut shell = shell();
    let reply = shell.execute("login john.doe@example.com hunter2");
    assert_eq!(toast_title(&reply), Some("Login successful!"));
    assert!(shell.auth().is_authenticated());

    let reply = shell.execute("passwd john.doe@example.com hunter2 new1 new2");
    let toast = reply.toast.unwrap();
    assert_eq!(toast.description, "New passwords do not match.");
    assert_eq!(toast.variant, ToastVariant::Destructive);

    let reply = shell.execute("passwd john.doe@example.com hunter2 new1 new1");
    assert_eq!(toast_title(&reply), Some("Password changed!"));

    shell.execute("logout");
    assert!(!shell.auth().is_authenticated());
}

#[tokio::test]
async fn test_register_signs_in() {
    let mut shell = shell();
    let reply = shell.execute("register Jane jane@example.com secret secrte");
    let toast = reply.toast.unwrap();
    assert_eq!(toast.variant, ToastVariant::Destructive);
    assert!(!shell.auth().is_authenticated());

    let reply = shell.execute("register Jane jane@example.com secret secret");
    assert_eq!(toast_title(&reply), Some("Account created!"));
    assert_eq!(shell.auth().email(), Some("jane@example.com"));

    let reply = shell.execute("register Jane jane@example.com");
    assert!(reply.toast.is_none());
    assert!(reply.lines[0].starts_with("error:"));
}

#[tokio::test]
async fn test_profile_edit_cancel_and_save() {
    let mut shell = shell();
    assert!(shell.execute("profile set city Boston").lines[0].contains("not being edited"));

    assert_eq!(
        shell.execute("profile cancel").lines,
        vec!["No profile changes to discard."]
    );

    shell.execute("profile edit");
    shell.execute("profile set city Boston");
    assert_eq!(shell.execute("profile cancel").lines, vec!["Changes discarded."]);
    let shown = shell.execute("profile").lines.join("\n");
    assert!(shown.contains("New York 10001"));

    shell.execute("profile edit");
    shell.execute("profile set city Boston");
    let reply = shell.execute("profile save");
    assert_eq!(toast_title(&reply), Some("Profile updated!"));
    let shown = shell.execute("profile").lines.join("\n");
    assert!(shown.contains("Boston 10001"));
    assert!(shown.contains("150 to your next free meal"));
}

#[tokio::test]
async fn test_menu_and_unknown_input() {
    let mut shell = shell();
    let reply = shell.execute("menu mexican");
    assert_eq!(reply.lines.len(), 2);
    assert!(reply.lines[0].contains("Fish Tacos - $15.99"));

    let reply = shell.execute("add pancakes");
    assert!(reply.lines[0].starts_with("No dish matches"));
    let reply = shell.execute("dance");
    assert!(reply.lines[0].contains("unrecognized subcommand"));
    assert!(shell.execute("quit").quit);
}

#[tokio::test]
async fn test_help_lists_commands() {
    let mut shell = shell();
    let help = shell.execute("help").lines.join("\n");
    for command in ["menu", "add", "qty", "checkout", "register", "passwd", "quit"] {
        assert!(help.contains(command), "help is missing {command}");
    }

    let usage = shell.execute("qty").lines.join("\n");
    assert!(usage.contains("Usage:"));
}

#[tokio::test]
async fn test_status_progress_serializes() {
    let mut shell = shell();
    shell.execute("add 6");
    shell.execute("checkout");

    let json = serde_json::to_value(shell.session().progress()).unwrap();
    assert_eq!(json["status"], "pending");
    assert_eq!(json["order"]["summary"]["subtotal"], 1599);
}
