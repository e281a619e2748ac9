//! The interactive ordering shell.

use common::ItemId;
use domain::{
    AccountSummary, AuthSession, CartError, CartState, ChangePasswordForm, LoginForm, Loyalty,
    MenuFilter, MenuItem, OrderStatus, ProfileEditor, RegisterForm, menu,
};
use sequencer::{CheckoutError, OrderProgress, OrderSession};

use crate::command::{Command, ProfileAction};
use crate::reply::{Reply, Toast};

/// Routes parsed commands to the order session and the mock account pages.
#[derive(Debug)]
pub struct Shell {
    session: OrderSession,
    auth: AuthSession,
    profile: ProfileEditor,
    account: AccountSummary,
    loyalty: Loyalty,
}

impl Shell {
    pub fn new(session: OrderSession) -> Self {
        Self {
            session,
            auth: AuthSession::new(),
            profile: ProfileEditor::default(),
            account: AccountSummary::default(),
            loyalty: Loyalty::default(),
        }
    }

    pub fn session(&self) -> &OrderSession {
        &self.session
    }

    pub fn auth(&self) -> &AuthSession {
        &self.auth
    }

    /// Parses and runs one input line.
    pub fn execute(&mut self, line: &str) -> Reply {
        match line.parse::<Command>() {
            Ok(command) => self.handle(command),
            Err(e) => {
                if !e.is_help() {
                    tracing::debug!(kind = ?e.kind(), "unparsed input");
                }
                let text = e.to_string();
                Reply::lines(text.trim_end().lines().map(str::to_string).collect())
            }
        }
    }

    #[tracing::instrument(skip_all, level = "debug", fields(command = command.name()))]
    pub fn handle(&mut self, command: Command) -> Reply {
        metrics::counter!("shell_commands_total", "command" => command.name()).increment(1);
        match command {
            Command::Menu { category } => render_menu(category),
            Command::Add { dish } => self.add(&dish.join(" ")),
            Command::Increment { dish } => {
                self.with_dish(&dish.join(" "), |session, id| session.adjust_quantity(id, 1))
            }
            Command::Decrement { dish } => {
                self.with_dish(&dish.join(" "), |session, id| session.adjust_quantity(id, -1))
            }
            Command::SetQuantity { dish, quantity } => {
                self.with_dish(&dish.join(" "), |session, id| {
                    session.update_quantity(id, quantity)
                })
            }
            Command::Remove { dish } => {
                self.with_dish(&dish.join(" "), |session, id| session.remove_item(id))
            }
            Command::Clear => match self.session.clear_cart() {
                Ok(()) => Reply::line("Cart cleared."),
                Err(e) => cart_locked(&e),
            },
            Command::Cart => Reply::lines(self.render_cart(&self.session.cart())),
            Command::Checkout => self.checkout(),
            Command::Status => Reply::lines(render_status(&self.session.progress())),
            Command::Cancel => match self.session.cancel_order() {
                Some(order_id) => Reply::toast(Toast::new(
                    "Order cancelled",
                    format!("Order #{} has been cancelled.", order_id.short()),
                )),
                None => Reply::line("No order in progress."),
            },
            Command::Login { email, password } => self.login(email, password),
            Command::Register {
                name,
                email,
                password,
                confirm,
            } => self.register(RegisterForm {
                name,
                email,
                password,
                confirm_password: confirm,
            }),
            Command::Logout => self.logout(),
            Command::ChangePassword {
                email,
                current,
                new,
                confirm,
            } => self.change_password(ChangePasswordForm {
                email,
                current_password: current,
                new_password: new,
                confirm_password: confirm,
            }),
            Command::Profile { action } => self.profile(action),
            Command::Quit => Reply {
                quit: true,
                ..Reply::line("Goodbye!")
            },
        }
    }

    fn add(&self, query: &str) -> Reply {
        let Some(dish) = resolve_dish(query) else {
            return no_such_dish(query);
        };
        match self.session.add_item(dish.to_cart_item()) {
            Ok(()) => Reply::toast(Toast::new(
                "Added to cart!",
                format!("{} has been added to your cart.", dish.name),
            )),
            Err(e) => cart_locked(&e),
        }
    }

    fn with_dish(
        &self,
        query: &str,
        apply: impl FnOnce(&OrderSession, &ItemId) -> Result<(), CartError>,
    ) -> Reply {
        let Some(dish) = resolve_dish(query) else {
            return no_such_dish(query);
        };
        let id = ItemId::new(dish.id);
        match apply(&self.session, &id) {
            Ok(()) => Reply::lines(self.render_cart(&self.session.cart())),
            Err(e) => cart_locked(&e),
        }
    }

    fn checkout(&self) -> Reply {
        match self.session.checkout() {
            Ok(order) => Reply::line(format!(
                "Order #{} placed. Status updates will follow.",
                order.id.short()
            ))
            .with_toast(Toast::new(
                "Order placed successfully!",
                format!(
                    "Your order total is {}. We'll prepare it right away!",
                    order.summary.total
                ),
            )),
            Err(CheckoutError::EmptyCart) => Reply::toast(Toast::destructive(
                "Cart is empty",
                "Please add some items to your cart before checking out.",
            )),
            Err(e @ CheckoutError::OrderInProgress { .. }) => {
                Reply::toast(Toast::destructive("Order in progress", e.to_string()))
            }
        }
    }

    fn login(&mut self, email: String, password: String) -> Reply {
        match self.auth.login(&LoginForm { email, password }) {
            Ok(()) => Reply::toast(Toast::new(
                "Login successful!",
                "Welcome back to Restaurant.",
            )),
            Err(e) => Reply::toast(Toast::destructive("Error", e.to_string())),
        }
    }

    fn register(&mut self, form: RegisterForm) -> Reply {
        match self.auth.register(&form) {
            Ok(()) => Reply::toast(Toast::new(
                "Account created!",
                format!("Welcome to Restaurant, {}.", form.name),
            )),
            Err(e) => Reply::toast(Toast::destructive("Error", e.to_string())),
        }
    }

    fn logout(&mut self) -> Reply {
        if !self.auth.is_authenticated() {
            return Reply::line("You are not signed in.");
        }
        self.auth.logout();
        Reply::line("Signed out.")
    }

    fn change_password(&self, form: ChangePasswordForm) -> Reply {
        match self.auth.change_password(&form) {
            Ok(()) => Reply::toast(Toast::new(
                "Password changed!",
                "Your password has been updated successfully.",
            )),
            Err(e) => Reply::toast(Toast::destructive("Error", e.to_string())),
        }
    }

    fn profile(&mut self, action: Option<ProfileAction>) -> Reply {
        let Some(action) = action else {
            return Reply::lines(self.render_profile());
        };
        match action {
            ProfileAction::Edit => {
                self.profile.begin_edit();
                Reply::line("Editing profile. Use `profile set <field> <value>`, then save or cancel.")
            }
            ProfileAction::Set { field, value } => {
                match self.profile.set_field(field, value.join(" ")) {
                    Ok(()) => Reply::lines(self.render_profile()),
                    Err(e) => Reply::line(e.to_string()),
                }
            }
            ProfileAction::Save => match self.profile.save() {
                Ok(_) => Reply::toast(Toast::new(
                    "Profile updated!",
                    "Your profile information has been saved successfully.",
                )),
                Err(e) => Reply::line(e.to_string()),
            },
            ProfileAction::Cancel => {
                if !self.profile.is_editing() {
                    return Reply::line("No profile changes to discard.");
                }
                self.profile.cancel();
                Reply::line("Changes discarded.")
            }
        }
    }

    fn render_cart(&self, cart: &CartState) -> Vec<String> {
        if cart.is_empty() {
            return vec!["Your cart is empty.".to_string()];
        }

        let count = cart.item_count();
        let mut lines = vec![format!(
            "Your Cart ({count} {})",
            if count == 1 { "item" } else { "items" }
        )];
        lines.extend(cart.items().iter().map(|item| {
            format!(
                "  {} x {} ({}) {}",
                item.quantity,
                item.name,
                item.id,
                item.line_total()
            )
        }));

        let summary = self.session.pricing().summarize(cart.total());
        lines.push(format!("Subtotal:     {}", summary.subtotal));
        lines.push(format!("Delivery Fee: {}", summary.delivery_fee));
        lines.push(format!("Tax:          {}", summary.tax));
        lines.push(format!("Total:        {}", summary.total));
        if let Some(order_id) = cart.frozen_for() {
            lines.push(format!("(locked for order #{})", order_id.short()));
        }
        lines
    }

    fn render_profile(&self) -> Vec<String> {
        let p = self.profile.current();
        let mut lines = Vec::new();
        if self.profile.is_editing() {
            lines.push("Profile (editing)".to_string());
        } else {
            lines.push("Profile".to_string());
        }
        lines.push(format!("  Name:        {} {}", p.first_name, p.last_name));
        lines.push(format!("  Email:       {}", p.email));
        lines.push(format!("  Phone:       {}", p.phone));
        lines.push(format!("  Address:     {}, {} {}", p.address, p.city, p.zip_code));
        lines.push(format!("  Preferences: {}", p.preferences));
        lines.push(format!(
            "Member since {} | {} orders | favorite: {} | spent {}",
            self.account.member_since,
            self.account.total_orders,
            self.account.favorite_dish,
            self.account.total_spent
        ));
        lines.push(format!(
            "Loyalty: {} points ({}%), {} to your next free meal",
            self.loyalty.points,
            self.loyalty.progress_percent(),
            self.loyalty.points_to_reward()
        ));
        lines
    }
}

/// Finds a dish by id, exact name, or a unique part of its name.
pub fn resolve_dish(query: &str) -> Option<&'static MenuItem> {
    let query = query.trim();
    if let Some(dish) = menu::find(&ItemId::new(query)) {
        return Some(dish);
    }
    let catalog = menu::catalog();
    if let Some(dish) = catalog
        .iter()
        .find(|dish| dish.name.eq_ignore_ascii_case(query))
    {
        return Some(dish);
    }

    let needle = query.to_ascii_lowercase();
    let mut matches = catalog
        .iter()
        .filter(|dish| dish.name.to_ascii_lowercase().contains(&needle));
    match (matches.next(), matches.next()) {
        (Some(dish), None) => Some(dish),
        _ => None,
    }
}

/// Renders the order status panel.
pub fn render_status(progress: &OrderProgress) -> Vec<String> {
    let Some(order) = &progress.order else {
        return vec![format!("No active order. Status: {}", progress.status.label())];
    };

    let mut lines = vec![format!(
        "Order #{}: {} ({}%)",
        order.id.short(),
        progress.status.label(),
        progress.status.progress_percent()
    )];
    lines.push(format!("  {}", progress.status.description()));
    let steps: Vec<String> = OrderStatus::ALL
        .iter()
        .map(|status| {
            if *status <= progress.status {
                format!("[x] {}", status.label())
            } else {
                format!("[ ] {}", status.label())
            }
        })
        .collect();
    lines.push(format!("  {}", steps.join("  ")));
    lines.push(format!(
        "  {} items, total {}",
        order.item_count(),
        order.summary.total
    ));
    lines
}

fn render_menu(filter: MenuFilter) -> Reply {
    let dishes = filter.apply(menu::catalog());
    let lines = dishes
        .into_iter()
        .flat_map(|dish| {
            [
                format!("[{}] {} - {} ({})", dish.id, dish.name, dish.price, dish.category),
                format!("    {}", dish.description),
            ]
        })
        .collect();
    Reply::lines(lines)
}

fn no_such_dish(query: &str) -> Reply {
    Reply::line(format!("No dish matches `{query}`. Type `menu` to see the dishes."))
}

fn cart_locked(e: &CartError) -> Reply {
    Reply::toast(Toast::destructive("Cart locked", e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_dish() {
        assert_eq!(resolve_dish("1").map(|d| d.name), Some("Margherita Pizza"));
        assert_eq!(resolve_dish("caesar salad").map(|d| d.id), Some("3"));
        assert_eq!(resolve_dish("salmon").map(|d| d.id), Some("2"));
        assert!(resolve_dish("pizza cake").is_none());
    }

    #[test]
    fn test_ambiguous_fragment_matches_nothing() {
        // "i" appears in several names.
        assert!(resolve_dish("i").is_none());
    }

    #[test]
    fn test_status_without_order() {
        let lines = render_status(&OrderProgress::default());
        assert_eq!(lines, vec!["No active order. Status: Pending".to_string()]);
    }

    #[test]
    fn test_menu_lists_two_lines_per_dish() {
        assert_eq!(render_menu(MenuFilter::All).lines.len(), 12);
    }
}
