pub mod canvas;
pub mod label;
pub mod pdf;
pub mod preview;
pub mod sheet;
pub mod text;

pub use canvas::{Command, Document, ImageId, ImageResource, ImageSource, Page};
pub use label::{LogoImages, RenderedLabel};
pub use pdf::document_to_pdf;
pub use preview::{encode_png, render_preview};
pub use sheet::{build_sheet, generate_pdf, SheetLogos, SheetOptions};

/// Contact details printed on every label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactInfo {
    pub email: String,
    pub whatsapp: String,
}

impl Default for ContactInfo {
    fn default() -> Self {
        Self {
            email: "hola@webspackging".into(),
            whatsapp: "952721936".into(),
        }
    }
}

impl ContactInfo {
    pub fn whatsapp_line(&self) -> String {
        format!("WhatsApp: {}", self.whatsapp)
    }

    pub fn combined_line(&self) -> String {
        format!("{} | {}", self.email, self.whatsapp_line())
    }
}
