// Booking engine for a small tour operator: a static tour catalog, an
// immutable booking draft, a pure validator, and a submission state machine
// behind an abstract transport.

pub mod catalog;
pub mod draft;
pub mod notify;
pub mod submission;
pub mod validation;

// Re-export key types for convenience
pub use catalog::{CatalogError, StaticTourCatalog, Tour, TourCatalog};
pub use draft::{BookingDraft, PaymentMethod};
pub use notify::{MemoryNotifier, Notifier, TracingNotifier};
pub use submission::{
    BookingSession, BookingTransport, Confirmation, SimulatedTransport, SubmissionError,
    SubmissionState, SubmitError,
};
pub use validation::{validate, FormField, ValidationReport};
