//! Render a signed, archival invoice PDF against a local render server.
//!
//! cargo run --example render_invoice -- http://localhost:3000

use rfrender::{
    Accessibility, Barcode, BarcodeAnchor, BarcodeType, Client, ClientConfig, EmbeddedFile,
    FileRelationship, PdfStandard, Watermark, WatermarkLayer,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let server = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "http://localhost:3000".to_string());

    let client = Client::new(
        &server,
        ClientConfig {
            timeout_ms: 30_000,
            ..Default::default()
        },
    )?;

    let html = r#"<html><head><title>Invoice 42</title></head>
<body><h1>Invoice #42</h1><p>Total: 1,337.00 EUR</p></body></html>"#;

    let xml = br#"<Invoice><ID>42</ID></Invoice>"#;

    let builder = client
        .render_html(html)
        .paper("a4")
        .margins_mm(20.0, 15.0, 20.0, 15.0)
        .pdf_title("Invoice #42")
        .pdf_author("RFox Billing")
        .pdf_standard(PdfStandard::PdfA3b)
        .pdf_accessibility(Accessibility::Basic)
        .pdf_lang("en")
        .pdf_embed_file(
            EmbeddedFile::from_bytes("invoice.xml", xml)
                .mime_type("application/xml")
                .relationship(FileRelationship::Alternative),
        )
        .pdf_barcode(
            Barcode::new(BarcodeType::Qr, "https://billing.example.com/i/42")
                .anchor(BarcodeAnchor::BottomRight)
                .position(10.0, 10.0)
                .size(25.0, 25.0)
                .pages("1"),
        )
        .pdf_watermark(
            Watermark::text("PAID")
                .opacity(0.1)
                .rotation(30.0)
                .layer(WatermarkLayer::Under),
        );

    println!("Payload:\n{}\n", builder.to_json()?);

    if !client.health().await {
        eprintln!("{} is not reachable; only the payload was printed", client.base_url());
        return Ok(());
    }

    match builder.save("invoice-42.pdf").await {
        Ok(n) => println!("Wrote {} bytes to invoice-42.pdf", n),
        Err(e) => eprintln!("Render failed: {}", e),
    }

    Ok(())
}
