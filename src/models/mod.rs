pub mod label;

pub use label::{BackgroundColor, LabelRequest, LogoSlot};
