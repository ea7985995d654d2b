pub mod label_record;
pub mod logo;

pub use label_record::LabelRecord;
pub use logo::LogoAsset;
