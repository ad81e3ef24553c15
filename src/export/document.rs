use printpdf::graphics::{LinePoint, PaintMode, Point, Polygon, PolygonRing, WindingOrder};
use printpdf::image::RawImage;
use printpdf::matrix::TextMatrix;
use printpdf::ops::Op;
use printpdf::text::TextItem;
use printpdf::xobject::{XObject, XObjectTransform};
use printpdf::{BuiltinFont, Layer, Mm, PdfDocument, PdfPage, PdfSaveOptions, Pt, Rgb, XObjectId};

use crate::analysis::KpiSet;
use crate::export::ExportError;

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 10.0;
const CHART_WIDTH_MM: f32 = 165.0;
const CHART_HEIGHT_MM: f32 = 72.0;
const CHART_GAP_MM: f32 = 8.0;

const TITLE_SIZE_PT: f32 = 24.0;
const KPI_SIZE_PT: f32 = 16.0;
const KPI_LABEL_ROW: &str = "Total Sales     Total Taxes (5%)     Total Net Profit     Net Profit";

/// Composes the KPI header and the externally rendered chart images into a
/// paginated A4 document.
///
/// Charts are stacked in input order, centered, at a fixed size; a chart
/// that would cross the bottom margin opens a new page. Any undecodable
/// image aborts the whole request, so a partial report is never produced.
pub struct ReportAssembler {
    document: PdfDocument,
    ops: Vec<Op>,
    cursor_mm: f32
}

impl ReportAssembler {
    pub fn new() -> Self {
        Self {
            document: PdfDocument::new("Sales Report"),
            ops: Vec::new(),
            cursor_mm: MARGIN_MM
        }
    }

    pub fn assemble(mut self, kpis: &KpiSet, images: &[Vec<u8>]) -> Result<Vec<u8>, ExportError> {
        self.begin_page();
        self.draw_header(kpis);

        for image in images {
            self.draw_chart(image)?;
        }

        self.flush_page();

        let mut warnings = Vec::new();
        Ok(self.document.save(&PdfSaveOptions::default(), &mut warnings))
    }

    fn draw_header(&mut self, kpis: &KpiSet) {
        self.cursor_mm += 10.0;
        self.draw_centered_text("Sales Report", TITLE_SIZE_PT, BuiltinFont::HelveticaBold);

        self.cursor_mm += 6.0;
        self.draw_rule();

        self.cursor_mm += 10.0;
        self.draw_centered_text(KPI_LABEL_ROW, KPI_SIZE_PT, BuiltinFont::Helvetica);

        self.cursor_mm += 9.0;
        self.draw_centered_text(&kpis.display_row(), KPI_SIZE_PT, BuiltinFont::Helvetica);

        self.cursor_mm += 6.0;
        self.draw_rule();

        self.cursor_mm += CHART_GAP_MM;
    }

    fn draw_chart(&mut self, image: &[u8]) -> Result<(), ExportError> {
        if self.cursor_mm + CHART_HEIGHT_MM > PAGE_HEIGHT_MM - MARGIN_MM {
            self.flush_page();
            self.begin_page();
            self.cursor_mm = MARGIN_MM + CHART_GAP_MM;
        }

        let mut warnings = Vec::new();
        let raw_image = RawImage::decode_from_bytes(image, &mut warnings)
            .map_err(ExportError::image_decode)?;
        let dimensions = (raw_image.width as f32, raw_image.height as f32);

        let xobj_id = XObjectId::new();
        self.document.resources.xobjects.map.insert(xobj_id.clone(), XObject::Image(raw_image));

        let x_mm = (PAGE_WIDTH_MM - CHART_WIDTH_MM) / 2.0;
        let y_mm = PAGE_HEIGHT_MM - (self.cursor_mm + CHART_HEIGHT_MM);
        let transform = XObjectTransform {
            translate_x: Some(Mm(x_mm).into_pt()),
            translate_y: Some(Mm(y_mm).into_pt()),
            scale_x: Some(Mm(CHART_WIDTH_MM).into_pt().0 / dimensions.0),
            scale_y: Some(Mm(CHART_HEIGHT_MM).into_pt().0 / dimensions.1),
            rotate: None,
            dpi: Some(72.0)
        };
        self.ops.push(Op::UseXobject { id: xobj_id, transform });

        self.cursor_mm += CHART_HEIGHT_MM + CHART_GAP_MM;

        Ok(())
    }

    fn draw_centered_text(&mut self, text: &str, size_pt: f32, font: BuiltinFont) {
        // Approximate glyph advance; close enough to center a single line.
        let text_width_pt = text.len() as f32 * size_pt * 0.5;
        let x_pt = (Mm(PAGE_WIDTH_MM).into_pt().0 - text_width_pt) / 2.0;

        self.cursor_mm += pt_to_mm(size_pt);
        let y_pt = Mm(PAGE_HEIGHT_MM - self.cursor_mm).into_pt().0;

        self.ops.push(Op::StartTextSection);
        self.ops.push(Op::SetFillColor {
            col: printpdf::color::Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None))
        });
        self.ops.push(Op::SetFontSizeBuiltinFont { size: Pt(size_pt), font });
        self.ops.push(Op::SetTextMatrix { matrix: TextMatrix::Translate(Pt(x_pt.max(0.0)), Pt(y_pt)) });
        self.ops.push(Op::WriteTextBuiltinFont {
            items: vec![TextItem::Text(text.to_string())],
            font
        });
        self.ops.push(Op::EndTextSection);
    }

    fn draw_rule(&mut self) {
        let y_pt = Mm(PAGE_HEIGHT_MM - self.cursor_mm).into_pt().0;
        let left = Mm(MARGIN_MM).into_pt().0;
        let right = Mm(PAGE_WIDTH_MM - MARGIN_MM).into_pt().0;

        let line = Polygon {
            rings: vec![PolygonRing {
                points: vec![
                    LinePoint { p: Point { x: Pt(left), y: Pt(y_pt) }, bezier: false },
                    LinePoint { p: Point { x: Pt(right), y: Pt(y_pt) }, bezier: false },
                ]
            }],
            mode: PaintMode::Stroke,
            winding_order: WindingOrder::EvenOdd
        };

        self.ops.push(Op::SetOutlineThickness { pt: Pt(1.0) });
        self.ops.push(Op::SetOutlineColor {
            col: printpdf::color::Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None))
        });
        self.ops.push(Op::DrawPolygon { polygon: line });
    }

    fn begin_page(&mut self) {
        let page_number = self.document.pages.len() + 1;
        let layer_name = format!("Page {} Layer 1", page_number);
        let layer_id = self.document.add_layer(&Layer::new(&*layer_name));

        self.ops.push(Op::BeginLayer { layer_id });
        self.cursor_mm = MARGIN_MM;
    }

    fn flush_page(&mut self) {
        let ops = std::mem::take(&mut self.ops);
        let page = PdfPage::new(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), ops);
        self.document.pages.push(page);
    }
}

impl Default for ReportAssembler {
    fn default() -> Self {
        Self::new()
    }
}

fn pt_to_mm(pt: f32) -> f32 {
    pt * 25.4 / 72.0
}
