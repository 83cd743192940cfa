//! Pure renderers for box content labels and the non-ADR declaration.
//!
//! Each renderer takes a fully resolved data struct and returns the
//! document bytes plus a generated file name. Nothing here touches the
//! database or the clock; the issue date is an input so rendering stays
//! deterministic.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use super::layout::{FontFace, PageComposer, TableColumn, A4_WIDTH, LINE_HEIGHT, MARGIN, SECTION_GAP};

const PDF_MIME_TYPE: &str = "application/pdf";

const ITEM_COLUMN_WIDTH: f32 = 300.0;
const QTY_COLUMN_WIDTH: f32 = 80.0;

/// A finished document ready for storage or streaming.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedDocument {
    pub file_name: String,
    #[serde(skip)]
    pub bytes: Vec<u8>,
    pub mime_type: String,
    pub file_size: i64,
}

impl GeneratedDocument {
    fn new(file_name: String, bytes: Vec<u8>) -> Self {
        let file_size = bytes.len() as i64;
        Self {
            file_name,
            bytes,
            mime_type: PDF_MIME_TYPE.to_string(),
            file_size,
        }
    }
}

/// Contract details printed in the label header block.
#[derive(Debug, Clone)]
pub struct ContractInfo {
    pub contracting_authority_name: String,
    pub contractor_name: String,
    pub contract_number: String,
    pub contract_date: NaiveDate,
}

/// One items-table row: a kit line with its per-kit quantity.
#[derive(Debug, Clone)]
pub struct KitItemLine {
    pub name: String,
    pub quantity: i32,
    pub unit: String,
}

/// Optional sections toggled per render.
#[derive(Debug, Clone)]
pub struct LabelOptions {
    pub include_contract_info: bool,
    pub include_items_table: bool,
    pub include_barcode: bool,
    pub header_text: Option<String>,
}

impl Default for LabelOptions {
    fn default() -> Self {
        Self {
            include_contract_info: true,
            include_items_table: true,
            include_barcode: true,
            header_text: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OutboundContentLabelData {
    pub contract: ContractInfo,
    pub delivery_address: String,
    pub expected_delivery_date: NaiveDate,
    pub items: Vec<KitItemLine>,
    pub order_number: String,
    pub box_number: i32,
    pub total_boxes: i32,
    pub waybill_number: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SampleContentLabelData {
    pub contract: ContractInfo,
    pub lab_name: String,
    pub lab_address: String,
    pub sampling_date: NaiveDate,
    pub expected_arrival_date: NaiveDate,
    pub barcode_sequence: Option<String>,
    pub barcode_count: Option<i32>,
    pub items: Vec<KitItemLine>,
    pub order_number: String,
    pub box_number: i32,
    pub total_boxes: i32,
    pub waybill_number: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NonAdrDeclarationData {
    pub shipper_name: String,
    pub shipper_address: String,
    pub consignee_name: String,
    pub consignee_address: String,
    pub description: String,
    pub number_of_packages: i32,
    pub total_weight_kg: Decimal,
    pub declarer_name: String,
}

/// Dates are shown on labels as dd/mm/yyyy.
fn format_display_date(date: NaiveDate) -> String {
    format!("{:02}/{:02}/{:04}", date.day(), date.month(), date.year())
}

/// File names carry the issue date as dd-mm-yyyy.
fn format_file_date(date: NaiveDate) -> String {
    format!("{:02}-{:02}-{:04}", date.day(), date.month(), date.year())
}

fn draw_items_table(composer: &mut PageComposer, items: &[KitItemLine]) {
    let unit_width = A4_WIDTH - MARGIN * 2.0 - ITEM_COLUMN_WIDTH - QTY_COLUMN_WIDTH;

    composer.table_row(
        &[
            TableColumn {
                text: "Item Description",
                width: ITEM_COLUMN_WIDTH,
            },
            TableColumn {
                text: "Qty",
                width: QTY_COLUMN_WIDTH,
            },
            TableColumn {
                text: "Unit",
                width: unit_width,
            },
        ],
        true,
    );

    for item in items {
        let qty = item.quantity.to_string();
        composer.table_row(
            &[
                TableColumn {
                    text: &item.name,
                    width: ITEM_COLUMN_WIDTH,
                },
                TableColumn {
                    text: &qty,
                    width: QTY_COLUMN_WIDTH,
                },
                TableColumn {
                    text: &item.unit,
                    width: unit_width,
                },
            ],
            false,
        );
    }
}

fn draw_footer(
    composer: &mut PageComposer,
    order_number: &str,
    box_number: i32,
    total_boxes: i32,
    waybill: Option<&str>,
) {
    composer.advance(SECTION_GAP);
    let y = composer.cursor();
    composer.footer_line(
        &format!("Order: {} | Box {} of {}", order_number, box_number, total_boxes),
        y,
    );
    if let Some(waybill) = waybill {
        composer.footer_line(&format!("Waybill: {}", waybill), y - 15.0);
    }
}

/// Renders the outbound box content label.
pub fn render_outbound_content_label(
    data: &OutboundContentLabelData,
    options: &LabelOptions,
    issued_on: NaiveDate,
) -> GeneratedDocument {
    let mut composer = PageComposer::new();

    let header = options.header_text.as_deref().unwrap_or("Box Contents Label");
    composer.title(header);

    if options.include_contract_info {
        composer.labeled_field(
            "Name of Contracting Authority",
            &data.contract.contracting_authority_name,
        );
        composer.labeled_field("Delivery Address", &data.delivery_address);
        composer.labeled_field("Name of Contractor", &data.contract.contractor_name);
        composer.labeled_field(
            "Number of Specific Contract",
            &data.contract.contract_number,
        );
        composer.labeled_field(
            "Date of Specific Contract",
            &format_display_date(data.contract.contract_date),
        );
        composer.labeled_field(
            "Date of Delivery (Expected)",
            &format_display_date(data.expected_delivery_date),
        );
    }

    composer.advance(SECTION_GAP);

    if options.include_items_table && !data.items.is_empty() {
        draw_items_table(&mut composer, &data.items);
    }

    draw_footer(
        &mut composer,
        &data.order_number,
        data.box_number,
        data.total_boxes,
        data.waybill_number.as_deref(),
    );

    let file_name = format!(
        "outbound_content_{}_box{}_{}.pdf",
        data.order_number,
        data.box_number,
        format_file_date(issued_on)
    );
    GeneratedDocument::new(file_name, composer.finish())
}

/// Renders the sample box content label.
pub fn render_sample_content_label(
    data: &SampleContentLabelData,
    options: &LabelOptions,
    issued_on: NaiveDate,
) -> GeneratedDocument {
    let mut composer = PageComposer::new();

    let header = options
        .header_text
        .as_deref()
        .unwrap_or("Sample Contents Label");
    composer.title(header);

    if options.include_contract_info {
        composer.labeled_field(
            "Name of Contracting Authority",
            &data.contract.contracting_authority_name,
        );
        composer.labeled_field("Name of Contractor", &data.contract.contractor_name);
        composer.labeled_field(
            "Number of Specific Contract",
            &data.contract.contract_number,
        );
        composer.labeled_field(
            "Date of Specific Contract",
            &format_display_date(data.contract.contract_date),
        );
    }

    composer.labeled_field("Destination Lab", &data.lab_name);
    composer.labeled_field("Lab Address", &data.lab_address);
    composer.labeled_field("Sampling Date", &format_display_date(data.sampling_date));
    composer.labeled_field(
        "Expected Arrival",
        &format_display_date(data.expected_arrival_date),
    );

    if options.include_barcode {
        if let Some(sequence) = &data.barcode_sequence {
            composer.advance(SECTION_GAP / 2.0);
            composer.labeled_field("Barcode Sequence", sequence);
            if let Some(count) = data.barcode_count {
                composer.labeled_field("Number of Samples", &count.to_string());
            }
        }
    }

    composer.advance(SECTION_GAP);

    if options.include_items_table && !data.items.is_empty() {
        draw_items_table(&mut composer, &data.items);
    }

    draw_footer(
        &mut composer,
        &data.order_number,
        data.box_number,
        data.total_boxes,
        data.waybill_number.as_deref(),
    );

    let file_name = format!(
        "sample_content_{}_box{}_{}.pdf",
        data.order_number,
        data.box_number,
        format_file_date(issued_on)
    );
    GeneratedDocument::new(file_name, composer.finish())
}

/// Renders the non-dangerous-goods declaration.
pub fn render_non_adr_declaration(
    data: &NonAdrDeclarationData,
    issued_on: NaiveDate,
) -> GeneratedDocument {
    let mut composer = PageComposer::new();

    composer.centered_text("DECLARATION", 60.0, FontFace::Bold, 18.0);
    composer.advance(30.0);
    composer.centered_text("(Non-Dangerous Goods)", 70.0, FontFace::Regular, 14.0);
    composer.advance(50.0);

    let declaration_text = [
        "I, the undersigned, hereby declare that the shipment described below does not contain",
        "any dangerous goods as defined by the International Air Transport Association (IATA)",
        "Dangerous Goods Regulations and the Agreement concerning the International Carriage",
        "of Dangerous Goods by Road (ADR).",
        "",
        "The goods are properly packaged and labeled for transportation.",
    ];
    for line in declaration_text {
        composer.text_line(line, FontFace::Regular, 11.0);
    }

    composer.advance(SECTION_GAP);

    composer.labeled_field("Shipper", &data.shipper_name);
    composer.labeled_field("Shipper Address", &data.shipper_address);
    composer.labeled_field("Consignee", &data.consignee_name);
    composer.labeled_field("Consignee Address", &data.consignee_address);
    composer.labeled_field("Description of Goods", &data.description);
    composer.labeled_field("Number of Packages", &data.number_of_packages.to_string());
    composer.labeled_field("Total Weight (kg)", &format!("{:.2}", data.total_weight_kg));

    composer.advance(SECTION_GAP * 2.0);

    composer.text("Declared by:", FontFace::Bold, 11.0);
    composer.advance(LINE_HEIGHT * 2.0);
    composer.text(&format!("Name: {}", data.declarer_name), FontFace::Regular, 11.0);
    composer.advance(LINE_HEIGHT * 2.0);
    composer.text(
        &format!("Date: {}", format_display_date(issued_on)),
        FontFace::Regular,
        11.0,
    );
    composer.advance(LINE_HEIGHT * 3.0);
    composer.text(
        "Signature: _______________________________",
        FontFace::Regular,
        11.0,
    );

    let file_name = format!("non_adr_declaration_{}.pdf", format_file_date(issued_on));
    GeneratedDocument::new(file_name, composer.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn contract() -> ContractInfo {
        ContractInfo {
            contracting_authority_name: "European Health Agency".into(),
            contractor_name: "Acme Sampling BV".into(),
            contract_number: "SC-2026-014".into(),
            contract_date: date(2026, 1, 15),
        }
    }

    fn outbound_data() -> OutboundContentLabelData {
        OutboundContentLabelData {
            contract: contract(),
            delivery_address: "Main Street 1, 1000 Brussels, Belgium".into(),
            expected_delivery_date: date(2026, 3, 9),
            items: vec![
                KitItemLine {
                    name: "Sample Tube 10ml".into(),
                    quantity: 50,
                    unit: "pcs".into(),
                },
                KitItemLine {
                    name: "Transport Pouch".into(),
                    quantity: 10,
                    unit: "pcs".into(),
                },
                KitItemLine {
                    name: "Cooling Element".into(),
                    quantity: 4,
                    unit: "pcs".into(),
                },
            ],
            order_number: "ORD-2026-0307-001".into(),
            box_number: 1,
            total_boxes: 1,
            waybill_number: Some("WB-OUT-ORD-2026-0307-001-1".into()),
        }
    }

    #[test]
    fn outbound_label_filename_pattern() {
        let doc = render_outbound_content_label(
            &outbound_data(),
            &LabelOptions::default(),
            date(2026, 3, 7),
        );
        assert_eq!(
            doc.file_name,
            "outbound_content_ORD-2026-0307-001_box1_07-03-2026.pdf"
        );
        assert_eq!(doc.mime_type, "application/pdf");
        assert_eq!(doc.file_size, doc.bytes.len() as i64);
    }

    #[test]
    fn outbound_label_contains_expected_text() {
        let doc = render_outbound_content_label(
            &outbound_data(),
            &LabelOptions::default(),
            date(2026, 3, 7),
        );
        let text = String::from_utf8_lossy(&doc.bytes);
        assert!(text.contains("Box Contents Label"));
        assert!(text.contains("Name of Contracting Authority"));
        assert!(text.contains("European Health Agency"));
        assert!(text.contains("Sample Tube 10ml"));
        assert!(text.contains("Order: ORD-2026-0307-001 | Box 1 of 1"));
        assert!(text.contains("Waybill: WB-OUT-ORD-2026-0307-001-1"));
    }

    #[test]
    fn options_suppress_optional_sections() {
        let options = LabelOptions {
            include_contract_info: false,
            include_items_table: false,
            include_barcode: false,
            header_text: Some("Replacement Shipment".into()),
        };
        let doc = render_outbound_content_label(&outbound_data(), &options, date(2026, 3, 7));
        let text = String::from_utf8_lossy(&doc.bytes);
        assert!(text.contains("Replacement Shipment"));
        assert!(!text.contains("Name of Contracting Authority"));
        assert!(!text.contains("Item Description"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let data = outbound_data();
        let options = LabelOptions::default();
        let a = render_outbound_content_label(&data, &options, date(2026, 3, 7));
        let b = render_outbound_content_label(&data, &options, date(2026, 3, 7));
        assert_eq!(a.bytes, b.bytes);
        assert_eq!(a.file_name, b.file_name);
    }

    #[test]
    fn sample_label_includes_lab_and_barcode_block() {
        let data = SampleContentLabelData {
            contract: contract(),
            lab_name: "Central Analysis Lab".into(),
            lab_address: "Science Park 42, 2333 CC Leiden, Netherlands".into(),
            sampling_date: date(2026, 3, 21),
            expected_arrival_date: date(2026, 3, 23),
            barcode_sequence: Some("BC-0001 to BC-0050".into()),
            barcode_count: Some(50),
            items: outbound_data().items,
            order_number: "ORD-2026-0307-002".into(),
            box_number: 2,
            total_boxes: 3,
            waybill_number: None,
        };
        let doc = render_sample_content_label(&data, &LabelOptions::default(), date(2026, 3, 7));
        let text = String::from_utf8_lossy(&doc.bytes);
        assert!(text.contains("Sample Contents Label"));
        assert!(text.contains("Central Analysis Lab"));
        assert!(text.contains("Barcode Sequence"));
        assert!(text.contains("Number of Samples"));
        assert!(text.contains("Order: ORD-2026-0307-002 | Box 2 of 3"));
        assert!(!text.contains("Waybill:"));
        assert_eq!(
            doc.file_name,
            "sample_content_ORD-2026-0307-002_box2_07-03-2026.pdf"
        );
    }

    #[test]
    fn declaration_contains_legal_text_and_signature_block() {
        let data = NonAdrDeclarationData {
            shipper_name: "Acme Sampling BV".into(),
            shipper_address: "Industrieweg 7, 5600 Eindhoven, Netherlands".into(),
            consignee_name: "Central Analysis Lab".into(),
            consignee_address: "Science Park 42, 2333 CC Leiden, Netherlands".into(),
            description: "Laboratory sample kits (non-hazardous)".into(),
            number_of_packages: 3,
            total_weight_kg: dec!(12.5),
            declarer_name: "J. Janssen".into(),
        };
        let doc = render_non_adr_declaration(&data, date(2026, 3, 7));
        let text = String::from_utf8_lossy(&doc.bytes);
        assert!(text.contains("DECLARATION"));
        assert!(text.contains("(Non-Dangerous Goods)"));
        assert!(text.contains("any dangerous goods as defined by the International Air Transport Association (IATA)"));
        assert!(text.contains("Total Weight (kg)"));
        assert!(text.contains("12.50"));
        assert!(text.contains("Name: J. Janssen"));
        assert!(text.contains("Date: 07/03/2026"));
        assert_eq!(doc.file_name, "non_adr_declaration_07-03-2026.pdf");
    }
}
