//! Domain layer for the restaurant ordering core.
//!
//! This crate provides:
//! - The shared cart store and its snapshot type
//! - Order status, fee/tax composition and receipts
//! - The static menu catalog
//! - Mock authentication and profile state

pub mod auth;
pub mod cart;
pub mod menu;
pub mod money;
pub mod order;
pub mod profile;

pub use auth::{AuthError, AuthSession, ChangePasswordForm, LoginForm, RegisterForm};
pub use cart::{CartError, CartItem, CartState, CartStore, NewCartItem};
pub use menu::{Category, MenuFilter, MenuItem};
pub use money::Money;
pub use order::{OrderStatus, OrderSummary, PlacedOrder, PricingPolicy};
pub use profile::{AccountSummary, Loyalty, Profile, ProfileEditor, ProfileError, ProfileField};
