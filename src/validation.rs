// Draft validation: a pure pass over the booking draft collecting every
// field error in one go. The form renders the report inline; submission is
// only attempted when the report is empty.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::draft::BookingDraft;

// Fields the validator can flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    CheckInDate,
    CheckOutDate,
    Guests,
    FirstName,
    LastName,
    Email,
    Phone,
    AgreeToTerms,
}

impl FormField {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::CheckInDate => "checkInDate",
            FormField::CheckOutDate => "checkOutDate",
            FormField::Guests => "guests",
            FormField::FirstName => "firstName",
            FormField::LastName => "lastName",
            FormField::Email => "email",
            FormField::Phone => "phone",
            FormField::AgreeToTerms => "agreeToTerms",
        }
    }
}

/// Per-field validation errors for one draft. An empty report means the
/// draft is submittable.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationReport {
    errors: BTreeMap<FormField, &'static str>,
}

impl ValidationReport {
    pub fn is_submittable(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// The inline message for a field, if it failed.
    pub fn error(&self, field: FormField) -> Option<&'static str> {
        self.errors.get(&field).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, &'static str)> + '_ {
        self.errors.iter().map(|(field, msg)| (*field, *msg))
    }

    fn flag(&mut self, field: FormField, message: &'static str) {
        self.errors.insert(field, message);
    }
}

/// Validates a booking draft. Pure: same draft in, same report out.
///
/// Rules are evaluated independently per field with no short-circuiting, so
/// the report carries every applicable error at once.
pub fn validate(draft: &BookingDraft) -> ValidationReport {
    let mut report = ValidationReport::default();

    if draft.check_in.is_none() {
        report.flag(FormField::CheckInDate, "Required");
    }
    if draft.check_out.is_none() {
        report.flag(FormField::CheckOutDate, "Required");
    }
    if let (Some(check_in), Some(check_out)) = (draft.check_in, draft.check_out) {
        if check_out <= check_in {
            report.flag(FormField::CheckOutDate, "Must be after check-in");
        }
    }
    if draft.guests < 1 {
        report.flag(FormField::Guests, "At least 1");
    }
    if draft.first_name.trim().is_empty() {
        report.flag(FormField::FirstName, "Required");
    }
    if draft.last_name.trim().is_empty() {
        report.flag(FormField::LastName, "Required");
    }
    if !draft.email.contains('@') {
        report.flag(FormField::Email, "Invalid email");
    }
    if !is_valid_phone(&draft.phone) {
        report.flag(FormField::Phone, "Invalid number");
    }
    if !draft.agree_to_terms {
        report.flag(FormField::AgreeToTerms, "Accept terms to continue");
    }

    report
}

// 10 to 15 ASCII digits, nothing else
fn is_valid_phone(phone: &str) -> bool {
    (10..=15).contains(&phone.len()) && phone.bytes().all(|b| b.is_ascii_digit())
}
