//! Widget Presentation Model
//!
//! [`render`] turns the latest `{step, state}` payload into exactly one view:
//! an editable [`Form`] for the data-collection steps, or a read-only
//! [`Summary`] for `review` and `submitted`. Submitting a view produces the
//! next [`JourneyArgs`](crate::JourneyArgs) to send to the tool.
//!
//! [`WidgetController`] holds the last rendered view and contains call
//! failures as transient notices.

mod controller;
mod form;

pub use controller::{Notice, TransportFailure, WidgetController, NOTICE_TTL};
pub use form::{
    render, Action, Control, Field, FieldKey, Form, FormError, SelectOption, Summary, SummaryRow,
    View, SELECT_PLACEHOLDER,
};
