pub mod config;
pub mod geometry;
pub mod paginator;

pub use config::LayoutConfig;
pub use geometry::{mm, Point, Rect, Size};
pub use paginator::{CellPlacement, GridSpec, Paginator};
