//! History rows for saved labels.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{BackgroundColor, LabelRequest};

/// A saved label. Never updated after insert; only deleted by id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LabelRecord {
    pub id: i64,
    pub client: String,
    pub product: String,
    pub quantity: u32,
    pub package_index: u32,
    pub total_count: u32,
    pub lot_code: String,
    pub purchase_order: String,
    pub background_color: BackgroundColor,
    pub created_at: DateTime<Utc>,
}

impl LabelRecord {
    pub fn request(&self) -> LabelRequest {
        LabelRequest {
            client: self.client.clone(),
            product: self.product.clone(),
            quantity: self.quantity,
            package_index: self.package_index,
            total_count: self.total_count,
            lot_code: self.lot_code.clone(),
            purchase_order: self.purchase_order.clone(),
            background_color: self.background_color,
        }
    }
}
