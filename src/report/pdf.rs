//! PDF rendering of an assembled report via `printpdf`.
//!
//! Layout mirrors the on-screen report: lab header, patient/report
//! detail blocks, one table per category/subcategory, interpretation
//! notes, a QR code linking to the shared view, and the disclaimer.

use std::io::BufWriter;
use std::path::{Path, PathBuf};

use printpdf::path::{PaintMode, WindingOrder};
use printpdf::*;
use qrcode::QrCode;

use super::assemble::ReportDocument;
use super::ReportError;

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const TOP_Y: f32 = 280.0;
const BOTTOM_MARGIN: f32 = 30.0;

/// Builds the shareable view-report link encoded in the QR code.
pub fn shareable_link(base_url: &str, patient_code: &str) -> String {
    format!("{}/view-report/{}", base_url.trim_end_matches('/'), patient_code)
}

struct PageCursor {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    y: f32,
}

impl PageCursor {
    /// Starts a fresh page when fewer than `needed` millimeters remain.
    fn ensure_space(&mut self, needed: f32) {
        if self.y - needed < BOTTOM_MARGIN {
            let (page, layer) = self
                .doc
                .add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y = TOP_Y;
        }
    }

    fn text(&mut self, text: &str, size: f32, x: f32, font: &IndirectFontRef) {
        self.layer.use_text(text, size, Mm(x), Mm(self.y), font);
    }

    fn advance(&mut self, mm: f32) {
        self.y -= mm;
    }
}

/// Renders the report document to PDF bytes.
///
/// `share_link` is encoded as a QR code in the footer when present.
pub fn render_report_pdf(
    report: &ReportDocument,
    share_link: Option<&str>,
) -> Result<Vec<u8>, ReportError> {
    let title = format!("Lab Report - {}", report.patient_name);
    let (doc, page1, layer1) = PdfDocument::new(&title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
    let layer = doc.get_page(page1).get_layer(layer1);

    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ReportError::Pdf(format!("font error: {e}")))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| ReportError::Pdf(format!("font error: {e}")))?;
    let courier = doc
        .add_builtin_font(BuiltinFont::Courier)
        .map_err(|e| ReportError::Pdf(format!("font error: {e}")))?;

    let mut cursor = PageCursor { doc, layer, y: TOP_Y };

    // Lab header
    cursor.text(&report.lab.name.to_uppercase(), 16.0, 20.0, &bold);
    cursor.advance(6.0);
    if let Some(slogan) = &report.lab.slogan {
        cursor.text(slogan, 9.0, 20.0, &font);
        cursor.advance(5.0);
    }
    cursor.text(&report.lab.address, 9.0, 20.0, &font);
    cursor.advance(4.5);
    cursor.text(&format!("Phone: {}", report.lab.phone), 9.0, 20.0, &font);
    cursor.advance(4.5);
    if let Some(email) = &report.lab.email {
        cursor.text(&format!("Email: {email}"), 9.0, 20.0, &font);
        cursor.advance(4.5);
    }
    cursor.advance(4.0);

    cursor.text("LABORATORY INVESTIGATION REPORT", 13.0, 55.0, &bold);
    cursor.advance(10.0);

    // Patient information / report details blocks
    let report_date = report.generated_at.format("%d/%m/%Y").to_string();
    let report_time = report.generated_at.format("%H:%M:%S").to_string();

    cursor.text("PATIENT INFORMATION", 10.0, 20.0, &bold);
    cursor.text("REPORT DETAILS", 10.0, 115.0, &bold);
    cursor.advance(5.5);
    cursor.text(&format!("Name: {}", report.patient_name), 9.0, 20.0, &font);
    cursor.text(&format!("Report Date: {report_date}"), 9.0, 115.0, &font);
    cursor.advance(4.5);
    cursor.text(
        &format!("Age/Sex: {} Years / {}", report.patient_age, report.patient_gender),
        9.0,
        20.0,
        &font,
    );
    cursor.text(&format!("Report Time: {report_time}"), 9.0, 115.0, &font);
    cursor.advance(4.5);
    cursor.text(&format!("Patient ID: {}", report.patient_code), 9.0, 20.0, &font);
    cursor.text(
        &format!("REF. BY: {}", report.ref_by.as_deref().unwrap_or("-")),
        9.0,
        115.0,
        &font,
    );
    cursor.advance(4.5);
    cursor.text(&format!("Contact: {}", report.contact_number), 9.0, 20.0, &font);
    cursor.advance(9.0);

    // Grouped test tables
    for category in &report.categories {
        cursor.ensure_space(20.0);
        cursor.text(&category.name.to_uppercase(), 11.0, 20.0, &bold);
        cursor.advance(6.0);

        for subcategory in &category.subcategories {
            cursor.ensure_space(16.0);
            cursor.text(&subcategory.name, 10.0, 22.0, &bold);
            cursor.advance(5.5);

            cursor.text("TEST NAME", 8.0, 22.0, &courier);
            cursor.text("RESULT", 8.0, 80.0, &courier);
            cursor.text("UNIT", 8.0, 110.0, &courier);
            cursor.text("REFERENCE RANGE", 8.0, 130.0, &courier);
            cursor.text("STATUS", 8.0, 170.0, &courier);
            cursor.advance(4.5);

            for row in &subcategory.rows {
                cursor.ensure_space(6.0);
                let value = match row.status.arrow() {
                    Some(arrow) => format!("{} {}", row.test.test_value, arrow),
                    None => row.test.test_value.clone(),
                };
                cursor.text(&row.test.test_name, 8.0, 22.0, &courier);
                cursor.text(&value, 8.0, 80.0, &courier);
                cursor.text(&row.test.unit, 8.0, 110.0, &courier);
                cursor.text(&row.test.normal_range, 8.0, 130.0, &courier);
                if row.status.is_abnormal() {
                    cursor
                        .layer
                        .set_fill_color(Color::Rgb(Rgb::new(0.82, 0.18, 0.18, None)));
                }
                cursor.text(row.status.label(), 8.0, 170.0, &courier);
                cursor
                    .layer
                    .set_fill_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));
                cursor.advance(4.0);
            }
            cursor.advance(2.0);
        }
        cursor.advance(3.0);
    }

    // Clinical interpretation
    cursor.ensure_space(24.0);
    cursor.text("CLINICAL INTERPRETATION", 10.0, 20.0, &bold);
    cursor.advance(5.0);
    for note in [
        "Values marked with ^ (High) or v (Low) are outside the reference range",
        "Reference ranges may vary based on age, gender, and laboratory methodology",
        "Please correlate with clinical findings and consult your physician for interpretation",
    ] {
        cursor.text(&format!("- {note}"), 8.0, 22.0, &font);
        cursor.advance(4.0);
    }
    cursor.advance(6.0);

    // QR code + signature block
    cursor.ensure_space(40.0);
    if let Some(link) = share_link {
        cursor.text("Scan to view online:", 9.0, 20.0, &bold);
        draw_qr(&cursor.layer, link, 20.0, cursor.y - 30.0, 26.0)?;
    }
    cursor.text("CONSULTANT PATHOLOGIST", 9.0, 140.0, &bold);
    cursor.advance(34.0);

    cursor.text("This is a computer generated report", 8.0, 20.0, &font);
    cursor.advance(4.0);
    cursor.text(
        &format!("Report generated on: {report_date}, {report_time}"),
        8.0,
        20.0,
        &font,
    );
    cursor.advance(8.0);

    // Disclaimer
    cursor.ensure_space(20.0);
    cursor.text("IMPORTANT MEDICAL DISCLAIMER:", 8.0, 20.0, &bold);
    cursor.advance(4.0);
    let disclaimer = "This report contains confidential medical information. The results \
        should be interpreted by a qualified healthcare professional in conjunction with \
        clinical history and other diagnostic tests. Normal values may vary between \
        laboratories due to differences in equipment, reagents, and methodologies. For any \
        queries regarding this report, please contact the laboratory at the above mentioned \
        contact details.";
    for line in wrap_text(disclaimer, 95) {
        cursor.text(&line, 7.0, 20.0, &font);
        cursor.advance(3.5);
    }

    let mut buf = BufWriter::new(Vec::new());
    cursor
        .doc
        .save(&mut buf)
        .map_err(|e| ReportError::Pdf(format!("save error: {e}")))?;
    buf.into_inner()
        .map_err(|e| ReportError::Pdf(format!("buffer error: {e}")))
}

/// Draws a QR code as filled module squares at (x, y) with the given
/// edge length, all in millimeters. (x, y) is the bottom-left corner.
fn draw_qr(layer: &PdfLayerReference, data: &str, x: f32, y: f32, size: f32) -> Result<(), ReportError> {
    let code = QrCode::new(data.as_bytes())
        .map_err(|e| ReportError::Pdf(format!("QR encoding: {e}")))?;
    let width = code.width();
    let module = size / width as f32;

    layer.set_fill_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));
    for row in 0..width {
        for col in 0..width {
            if code[(col, row)] != qrcode::Color::Dark {
                continue;
            }
            let x0 = x + col as f32 * module;
            // QR row 0 is the top row; PDF y grows upward.
            let y0 = y + size - (row + 1) as f32 * module;
            let ring = vec![
                (Point::new(Mm(x0), Mm(y0)), false),
                (Point::new(Mm(x0 + module), Mm(y0)), false),
                (Point::new(Mm(x0 + module), Mm(y0 + module)), false),
                (Point::new(Mm(x0), Mm(y0 + module)), false),
            ];
            layer.add_polygon(Polygon {
                rings: vec![ring],
                mode: PaintMode::Fill,
                winding_order: WindingOrder::NonZero,
            });
        }
    }
    Ok(())
}

/// Saves PDF bytes into the exports directory, creating it if needed.
pub fn export_pdf_to_file(
    pdf_bytes: &[u8],
    filename: &str,
    exports_dir: &Path,
) -> Result<PathBuf, ReportError> {
    std::fs::create_dir_all(exports_dir)?;
    let path = exports_dir.join(filename);
    std::fs::write(&path, pdf_bytes)?;
    Ok(path)
}

/// Simple word-wrap helper for PDF text rendering.
fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.len() + word.len() + 1 > max_chars && !current.is_empty() {
            lines.push(current.clone());
            current.clear();
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LabInfo, Patient, TestResult};
    use crate::report::assemble::assemble_report;
    use chrono::NaiveDate;

    fn sample_report() -> ReportDocument {
        let patient = Patient {
            id: 1,
            full_name: "Jane Doe".into(),
            age: "34".into(),
            gender: "Female".into(),
            contact_number: "555-0101".into(),
            email: None,
            patient_code: "PAT000007".into(),
            address: None,
            ref_by: Some("Dr. Chen".into()),
            created_at: None,
        };
        let lab = LabInfo {
            name: "City Lab".into(),
            address: "12 Main St".into(),
            phone: "555-0100".into(),
            email: Some("lab@example.com".into()),
            slogan: Some("Accurate. Fast.".into()),
        };
        let results = vec![TestResult {
            id: None,
            patient_id: Some(1),
            test_name: "Glucose (F)".into(),
            test_category: "Biochemistry".into(),
            test_subcategory: "Sugar".into(),
            test_value: "120".into(),
            normal_range: "70-110".into(),
            unit: "mg/dL".into(),
            additional_note: None,
            test_date: Some("2026-08-10 09:00:00".into()),
        }];
        let now = NaiveDate::from_ymd_opt(2026, 8, 25)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap();
        assemble_report(&patient, &lab, results, now)
    }

    #[test]
    fn renders_pdf_bytes() {
        let bytes = render_report_pdf(&sample_report(), None).unwrap();
        assert!(!bytes.is_empty());
        // PDF magic bytes: %PDF
        assert_eq!(&bytes[0..4], b"%PDF");
    }

    #[test]
    fn renders_with_qr_code() {
        let link = shareable_link("http://localhost:3000", "PAT000007");
        let bytes = render_report_pdf(&sample_report(), Some(&link)).unwrap();
        assert_eq!(&bytes[0..4], b"%PDF");
    }

    #[test]
    fn shareable_link_format() {
        assert_eq!(
            shareable_link("http://localhost:3000/", "PAT000007"),
            "http://localhost:3000/view-report/PAT000007"
        );
    }

    #[test]
    fn export_writes_file() {
        let tmp = tempfile::tempdir().unwrap();
        let exports = tmp.path().join("exports");
        let path = export_pdf_to_file(b"%PDF-1.4 test", "lab_report.pdf", &exports).unwrap();
        assert!(path.exists());
        assert_eq!(std::fs::read(&path).unwrap(), b"%PDF-1.4 test");
    }

    #[test]
    fn wrap_text_respects_width() {
        let lines = wrap_text("one two three four five six seven eight nine ten", 15);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(line.len() <= 20);
        }
    }

    #[test]
    fn wrap_text_empty_input() {
        assert_eq!(wrap_text("", 40), vec![String::new()]);
    }
}
