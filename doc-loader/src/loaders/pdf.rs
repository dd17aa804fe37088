use tracing::debug;

use crate::errors::LoaderError;
use crate::registry::DocumentLoader;
use crate::scoped_file::with_scoped_file;

/// PDF text via `pdf-extract`, one entry per page.
///
/// Uploads are staged in a scoped temp file and parsed from its path; blank
/// pages stay in place so later pages keep their numbers.
#[derive(Clone, Copy, Debug, Default)]
pub struct PdfLoader;

impl DocumentLoader for PdfLoader {
    fn load(&self, filename: &str, bytes: &[u8]) -> Result<Vec<String>, LoaderError> {
        let pages = with_scoped_file(".pdf", bytes, |path| {
            pdf_extract::extract_text_by_pages(path).map_err(|e| LoaderError::Pdf {
                filename: filename.to_string(),
                reason: e.to_string(),
            })
        })?;
        debug!(filename, pages = pages.len(), "pdf text extracted");
        Ok(pages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal PDF with one text line per page (Helvetica, no compression).
    fn pdf_with_pages(lines: &[&str]) -> Vec<u8> {
        let n = lines.len();
        let font_id = 3 + n;
        let first_content = font_id + 1;

        let kids: Vec<String> = (0..n).map(|i| format!("{} 0 R", 3 + i)).collect();
        let mut objects = vec![
            "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
            format!("<< /Type /Pages /Kids [{}] /Count {n} >>", kids.join(" ")),
        ];
        for i in 0..n {
            objects.push(format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
                 /Resources << /Font << /F1 {font_id} 0 R >> >> /Contents {} 0 R >>",
                first_content + i
            ));
        }
        objects.push(
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
                .to_string(),
        );
        for line in lines {
            let content = if line.is_empty() {
                "BT ET".to_string()
            } else {
                format!("BT /F1 12 Tf 72 720 Td ({line}) Tj ET")
            };
            objects.push(format!(
                "<< /Length {} >>\nstream\n{content}\nendstream",
                content.len()
            ));
        }

        let mut out = b"%PDF-1.4\n".to_vec();
        let mut offsets = Vec::with_capacity(objects.len());
        for (i, obj) in objects.iter().enumerate() {
            offsets.push(out.len());
            out.extend_from_slice(format!("{} 0 obj\n{obj}\nendobj\n", i + 1).as_bytes());
        }
        let xref = out.len();
        out.extend_from_slice(format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1).as_bytes());
        for off in offsets {
            out.extend_from_slice(format!("{off:010} 00000 n \n").as_bytes());
        }
        out.extend_from_slice(
            format!(
                "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref}\n%%EOF\n",
                objects.len() + 1
            )
            .as_bytes(),
        );
        out
    }

    #[test]
    fn each_page_is_its_own_entry() {
        let pdf = pdf_with_pages(&["First page alpha", "Second page beta"]);
        let pages = PdfLoader.load("two.pdf", &pdf).unwrap();
        assert_eq!(pages.len(), 2);
        assert!(pages[0].contains("alpha") && !pages[0].contains("beta"));
        assert!(pages[1].contains("beta") && !pages[1].contains("alpha"));
    }

    #[test]
    fn registry_numbers_pdf_pages() {
        let pdf = pdf_with_pages(&["First page alpha", "Second page beta"]);
        let docs = crate::LoaderRegistry::default().load("two.pdf", &pdf).unwrap();
        let pages: Vec<u32> = docs.iter().map(|d| d.page).collect();
        assert_eq!(pages, vec![1, 2]);
        assert!(docs[1].text.contains("beta"));
    }

    #[test]
    fn blank_page_keeps_its_position() {
        let pdf = pdf_with_pages(&["Intro text", "", "Closing text"]);
        let pages = PdfLoader.load("gap.pdf", &pdf).unwrap();
        assert_eq!(pages.len(), 3);
        assert!(pages[1].trim().is_empty());
        assert!(pages[2].contains("Closing"));
    }

    #[test]
    fn unreadable_pdf_names_the_file() {
        let err = PdfLoader.load("broken.pdf", b"not a pdf at all").unwrap_err();
        assert!(matches!(err, LoaderError::Pdf { ref filename, .. } if filename == "broken.pdf"));
    }
}
