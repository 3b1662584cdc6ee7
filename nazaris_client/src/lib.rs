//! The client side of the contact form: validation, submission to the
//! contact endpoint and the fallback shown when submitting fails.

pub mod api;
pub mod controller;
pub mod fallback;
pub mod form;
mod http;
