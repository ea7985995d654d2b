pub mod label_records;
pub mod logos;
