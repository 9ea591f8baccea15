pub(crate) mod error_details;
