//! Mock customer profile with edit/save/cancel.

use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

use crate::money::Money;

/// Errors raised by the profile editor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileError {
    /// Fields can only change after `begin_edit`.
    #[error("Profile is not being edited")]
    NotEditing,

    #[error("Unknown profile field: {0}")]
    UnknownField(String),
}

/// Personal information shown on the profile page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Profile {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub zip_code: String,
    pub preferences: String,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            first_name: "John".into(),
            last_name: "Doe".into(),
            email: "john.doe@example.com".into(),
            phone: "+1 (555) 123-4567".into(),
            address: "123 Main Street".into(),
            city: "New York".into(),
            zip_code: "10001".into(),
            preferences: "No spicy food, extra sauce on the side".into(),
        }
    }
}

/// An editable profile field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    FirstName,
    LastName,
    Email,
    Phone,
    Address,
    City,
    ZipCode,
    Preferences,
}

impl FromStr for ProfileField {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let field = match s.to_ascii_lowercase().replace(['_', '-'], "").as_str() {
            "firstname" => ProfileField::FirstName,
            "lastname" => ProfileField::LastName,
            "email" => ProfileField::Email,
            "phone" => ProfileField::Phone,
            "address" => ProfileField::Address,
            "city" => ProfileField::City,
            "zip" | "zipcode" => ProfileField::ZipCode,
            "preferences" => ProfileField::Preferences,
            _ => return Err(ProfileError::UnknownField(s.to_string())),
        };
        Ok(field)
    }
}

impl Profile {
    fn field_mut(&mut self, field: ProfileField) -> &mut String {
        match field {
            ProfileField::FirstName => &mut self.first_name,
            ProfileField::LastName => &mut self.last_name,
            ProfileField::Email => &mut self.email,
            ProfileField::Phone => &mut self.phone,
            ProfileField::Address => &mut self.address,
            ProfileField::City => &mut self.city,
            ProfileField::ZipCode => &mut self.zip_code,
            ProfileField::Preferences => &mut self.preferences,
        }
    }
}

/// Holds the saved profile and, while editing, a draft.
///
/// `cancel` drops the draft, so the saved values come back untouched.
#[derive(Debug, Clone, Default)]
pub struct ProfileEditor {
    saved: Profile,
    draft: Option<Profile>,
}

impl ProfileEditor {
    pub fn new(profile: Profile) -> Self {
        Self {
            saved: profile,
            draft: None,
        }
    }

    /// Returns what the page shows: the draft while editing, else the saved profile.
    pub fn current(&self) -> &Profile {
        self.draft.as_ref().unwrap_or(&self.saved)
    }

    pub fn saved(&self) -> &Profile {
        &self.saved
    }

    pub fn is_editing(&self) -> bool {
        self.draft.is_some()
    }

    pub fn begin_edit(&mut self) {
        if self.draft.is_none() {
            self.draft = Some(self.saved.clone());
        }
    }

    pub fn set_field(
        &mut self,
        field: ProfileField,
        value: impl Into<String>,
    ) -> Result<(), ProfileError> {
        let draft = self.draft.as_mut().ok_or(ProfileError::NotEditing)?;
        *draft.field_mut(field) = value.into();
        Ok(())
    }

    /// Keeps the draft as the new saved profile.
    pub fn save(&mut self) -> Result<&Profile, ProfileError> {
        let draft = self.draft.take().ok_or(ProfileError::NotEditing)?;
        self.saved = draft;
        tracing::info!("profile updated");
        Ok(&self.saved)
    }

    /// Discards the draft.
    pub fn cancel(&mut self) {
        self.draft = None;
    }
}

/// Read-only account statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountSummary {
    pub member_since: String,
    pub total_orders: u32,
    pub favorite_dish: String,
    pub total_spent: Money,
}

impl Default for AccountSummary {
    fn default() -> Self {
        Self {
            member_since: "Jan 2024".into(),
            total_orders: 23,
            favorite_dish: "Margherita Pizza".into(),
            total_spent: Money::from_cents(46_750),
        }
    }
}

/// Loyalty points toward the next free meal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Loyalty {
    pub points: u32,
    pub reward_at: u32,
}

impl Default for Loyalty {
    fn default() -> Self {
        Self {
            points: 850,
            reward_at: 1_000,
        }
    }
}

impl Loyalty {
    pub fn points_to_reward(&self) -> u32 {
        self.reward_at.saturating_sub(self.points)
    }

    pub fn progress_percent(&self) -> u32 {
        if self.reward_at == 0 {
            return 100;
        }
        (self.points.min(self.reward_at) * 100) / self.reward_at
    }
}
