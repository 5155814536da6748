// Booking draft: the in-progress form data, modeled as an immutable value.
// Each edit replaces the draft wholesale, so validation is never stale
// relative to the fields it inspected.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// Payment methods the operator accepts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Credit,
    Mpesa,
    Paypal,
    Bank,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Credit => "credit",
            PaymentMethod::Mpesa => "mpesa",
            PaymentMethod::Paypal => "paypal",
            PaymentMethod::Bank => "bank",
        }
    }

    // Unrecognized values fall back to the default method
    pub fn from_str(s: &str) -> Self {
        match s {
            "mpesa" => PaymentMethod::Mpesa,
            "paypal" => PaymentMethod::Paypal,
            "bank" => PaymentMethod::Bank,
            _ => PaymentMethod::Credit,
        }
    }
}

/// In-progress, not-yet-submitted booking data held by one open form.
///
/// A draft is created with [`BookingDraft::new`] when the booking UI opens,
/// replaced via the `with_*` builders on each edit, and discarded when the
/// form closes or a submission is confirmed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingDraft {
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    pub guests: u32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub special_requests: String,
    pub payment_method: PaymentMethod,
    pub agree_to_terms: bool,
}

impl Default for BookingDraft {
    fn default() -> Self {
        Self::new()
    }
}

impl BookingDraft {
    /// A fresh draft with the defaults the form opens with: one guest,
    /// credit card payment, terms not yet accepted, dates unset.
    pub fn new() -> Self {
        Self {
            check_in: None,
            check_out: None,
            guests: 1,
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            phone: String::new(),
            special_requests: String::new(),
            payment_method: PaymentMethod::Credit,
            agree_to_terms: false,
        }
    }

    pub fn with_check_in(mut self, date: NaiveDate) -> Self {
        self.check_in = Some(date);
        self
    }

    pub fn with_check_out(mut self, date: NaiveDate) -> Self {
        self.check_out = Some(date);
        self
    }

    pub fn with_guests(mut self, guests: u32) -> Self {
        self.guests = guests;
        self
    }

    pub fn with_first_name(mut self, first_name: impl Into<String>) -> Self {
        self.first_name = first_name.into();
        self
    }

    pub fn with_last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name = last_name.into();
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }

    pub fn with_special_requests(mut self, requests: impl Into<String>) -> Self {
        self.special_requests = requests.into();
        self
    }

    pub fn with_payment_method(mut self, method: PaymentMethod) -> Self {
        self.payment_method = method;
        self
    }

    pub fn with_agree_to_terms(mut self, agree: bool) -> Self {
        self.agree_to_terms = agree;
        self
    }
}
