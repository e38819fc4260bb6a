//! Domain logic for the video catalog: error and id types, catalog enums,
//! field-level payload validation, pagination bounds and the admin
//! data-table option builder. No database or HTTP dependencies.

pub mod catalog;
pub mod data_table;
pub mod error;
pub mod pagination;
pub mod types;
pub mod validation;
