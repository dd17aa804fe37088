mod html;
mod pdf;
mod text;

pub use html::HtmlLoader;
pub use pdf::PdfLoader;
pub use text::TextLoader;
