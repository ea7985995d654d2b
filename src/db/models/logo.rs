use chrono::{DateTime, Utc};

use crate::models::LogoSlot;

/// Current image for one logo slot. Only the latest upload is kept.
#[derive(Debug, Clone, PartialEq)]
pub struct LogoAsset {
    pub slot: LogoSlot,
    pub image_bytes: Vec<u8>,
    pub updated_at: DateTime<Utc>,
}
