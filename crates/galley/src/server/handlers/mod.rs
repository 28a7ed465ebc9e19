pub mod autocomplete;
pub mod search;
pub mod status;
