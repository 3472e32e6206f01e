//! Checkout flow — the cart panel's client-only state machine.
//!
//! DESIGN
//! ======
//! ```text
//!            open                finalize (cart non-empty)
//!   Closed ───────▶ Browsing ─────────────────────────▶ ChoosingPayment
//!     ▲               ▲  ◀──────────── back ──────────────┘   │  ▲
//!     │               │                                       │  │ select
//!     └──── close ────┴──────── confirm (method selected) ────┘──┘
//! ```
//! `close` and `open` are accepted from any stage and always clear the
//! payment selection. Confirm creates no order; the payment request is
//! handed to the remote service and the panel closes.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::remote::RemoteError;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Pix,
    Credit,
    Debit,
    Boleto,
}

impl PaymentMethod {
    pub const ALL: [Self; 4] = [Self::Pix, Self::Credit, Self::Debit, Self::Boleto];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Pix => "PIX",
            Self::Credit => "Cartão de Crédito",
            Self::Debit => "Cartão de Débito",
            Self::Boleto => "Boleto Bancário",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "stage", rename_all = "snake_case")]
pub enum CheckoutStage {
    #[default]
    Closed,
    Browsing,
    ChoosingPayment {
        selected: Option<PaymentMethod>,
    },
}

impl CheckoutStage {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Closed => "closed",
            Self::Browsing => "browsing",
            Self::ChoosingPayment { .. } => "choosing_payment",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutAction {
    Finalize,
    Back,
    Select,
    Confirm,
}

impl fmt::Display for CheckoutAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Finalize => "finalize",
            Self::Back => "back",
            Self::Select => "select",
            Self::Confirm => "confirm",
        })
    }
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum CheckoutError {
    #[error("cannot {action} while {from}")]
    InvalidTransition { from: &'static str, action: CheckoutAction },
    #[error("cart is empty")]
    CartEmpty,
    #[error("no payment method selected")]
    NoPaymentMethod,
    #[error(transparent)]
    Remote(#[from] RemoteError),
}

// =============================================================================
// FLOW
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckoutFlow {
    stage: CheckoutStage,
}

impl CheckoutFlow {
    #[must_use]
    pub fn stage(&self) -> CheckoutStage {
        self.stage
    }

    /// Show the cart panel. Any in-progress payment selection is dropped.
    pub fn open(&mut self) {
        self.stage = CheckoutStage::Browsing;
    }

    /// Hide the cart panel from any stage.
    pub fn close(&mut self) {
        self.stage = CheckoutStage::Closed;
    }

    /// Move from browsing the cart to choosing a payment method.
    ///
    /// # Errors
    ///
    /// `InvalidTransition` unless browsing; `CartEmpty` if there is nothing
    /// to pay for.
    pub fn finalize(&mut self, cart_is_empty: bool) -> Result<(), CheckoutError> {
        self.expect_browsing(CheckoutAction::Finalize)?;
        if cart_is_empty {
            return Err(CheckoutError::CartEmpty);
        }
        self.stage = CheckoutStage::ChoosingPayment { selected: None };
        Ok(())
    }

    /// Return from payment selection to the cart list.
    ///
    /// # Errors
    ///
    /// `InvalidTransition` unless choosing a payment method.
    pub fn back(&mut self) -> Result<(), CheckoutError> {
        self.expect_choosing(CheckoutAction::Back)?;
        self.stage = CheckoutStage::Browsing;
        Ok(())
    }

    /// Pick (or change) the payment method.
    ///
    /// # Errors
    ///
    /// `InvalidTransition` unless choosing a payment method.
    pub fn select(&mut self, method: PaymentMethod) -> Result<(), CheckoutError> {
        self.expect_choosing(CheckoutAction::Select)?;
        self.stage = CheckoutStage::ChoosingPayment { selected: Some(method) };
        Ok(())
    }

    /// The method confirm would pay with. Does not change the stage.
    ///
    /// # Errors
    ///
    /// `InvalidTransition` unless choosing a payment method;
    /// `NoPaymentMethod` if none is selected yet.
    pub fn ready_to_confirm(&self) -> Result<PaymentMethod, CheckoutError> {
        match self.expect_choosing(CheckoutAction::Confirm)? {
            Some(method) => Ok(method),
            None => Err(CheckoutError::NoPaymentMethod),
        }
    }

    /// Finish a confirmed checkout: the panel closes and the selection clears.
    pub fn complete(&mut self) {
        self.stage = CheckoutStage::Closed;
    }

    fn expect_browsing(&self, action: CheckoutAction) -> Result<(), CheckoutError> {
        match self.stage {
            CheckoutStage::Browsing => Ok(()),
            other => Err(CheckoutError::InvalidTransition { from: other.as_str(), action }),
        }
    }

    fn expect_choosing(&self, action: CheckoutAction) -> Result<Option<PaymentMethod>, CheckoutError> {
        match self.stage {
            CheckoutStage::ChoosingPayment { selected } => Ok(selected),
            other => Err(CheckoutError::InvalidTransition { from: other.as_str(), action }),
        }
    }
}

#[cfg(test)]
#[path = "checkout_test.rs"]
mod tests;
