//! Profile service — personal info form, order history, avatar initials.
//!
//! The profile is local form state until a backend exists. Order history is
//! a fixed sample list shown on the orders tab.

use serde::{Deserialize, Serialize};
use time::macros::{date, format_description};
use time::Date;

use super::money::Cents;

#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("invalid birth date {0:?}, expected YYYY-MM-DD")]
    InvalidBirthDate(String),
    #[error("{0} cannot be empty")]
    EmptyField(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub birth_date: Date,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: "João Silva".into(),
            email: "joao@email.com".into(),
            phone: "(11) 99999-9999".into(),
            birth_date: date!(1990 - 01 - 01),
        }
    }
}

/// Partial edit of the personal info tab. Absent fields are left alone.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfilePatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub birth_date: Option<String>,
}

impl Profile {
    /// Apply a patch atomically: either every field is valid and applied,
    /// or the profile is unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty name/email or an unparseable birth date.
    pub fn apply(&mut self, patch: ProfilePatch) -> Result<(), ProfileError> {
        let birth_date = patch.birth_date.as_deref().map(parse_iso_date).transpose()?;
        if patch.name.as_deref().is_some_and(|v| v.trim().is_empty()) {
            return Err(ProfileError::EmptyField("name"));
        }
        if patch.email.as_deref().is_some_and(|v| v.trim().is_empty()) {
            return Err(ProfileError::EmptyField("email"));
        }

        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(phone) = patch.phone {
            self.phone = phone;
        }
        if let Some(birth_date) = birth_date {
            self.birth_date = birth_date;
        }
        Ok(())
    }

    #[must_use]
    pub fn initials(&self) -> String {
        initials(&self.name)
    }
}

/// First character of each whitespace-separated part of `name`.
#[must_use]
pub fn initials(name: &str) -> String {
    name.split_whitespace().filter_map(|part| part.chars().next()).collect()
}

/// Parse `YYYY-MM-DD`.
///
/// # Errors
///
/// Returns `InvalidBirthDate` when the string is not a real calendar date.
pub fn parse_iso_date(raw: &str) -> Result<Date, ProfileError> {
    Date::parse(raw, format_description!("[year]-[month]-[day]"))
        .map_err(|_| ProfileError::InvalidBirthDate(raw.to_owned()))
}

#[must_use]
pub fn format_iso_date(date: Date) -> String {
    date.format(format_description!("[year]-[month]-[day]")).unwrap_or_default()
}

/// `dd/mm/yyyy`, as shown on the orders tab.
#[must_use]
pub fn format_br_date(date: Date) -> String {
    date.format(format_description!("[day]/[month]/[year]")).unwrap_or_default()
}

// =============================================================================
// ORDERS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OrderStatus {
    #[serde(rename = "Entregue")]
    Delivered,
    #[serde(rename = "Em trânsito")]
    InTransit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub id: String,
    pub date: Date,
    pub total: Cents,
    pub status: OrderStatus,
    pub items: u32,
}

/// Sample history shown until orders are stored anywhere.
#[must_use]
pub fn sample_orders() -> Vec<Order> {
    vec![
        Order {
            id: "001".into(),
            date: date!(2024 - 01 - 15),
            total: Cents::new(45, 90),
            status: OrderStatus::Delivered,
            items: 3,
        },
        Order {
            id: "002".into(),
            date: date!(2024 - 01 - 10),
            total: Cents::new(32, 50),
            status: OrderStatus::InTransit,
            items: 2,
        },
    ]
}
