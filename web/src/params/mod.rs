//! This module holds typed parameters for various endpoint inputs.
//!
//! The purpose of this module is to define and manage the parameters that are used as inputs
//! for different endpoints in the web application. By using typed parameters, we can ensure
//! that the inputs are validated (by type and by range) and correctly formatted before they are
//! processed by the application logic.
//!
//! Each parameter type is represented by a struct or enum, which can be serialized and
//! deserialized as needed. Range checks that serde cannot express live next to the type
//! and report failures as `validation_error`s.

pub(crate) mod pagination;
pub(crate) mod search;
pub(crate) mod sort;
pub(crate) mod user;
