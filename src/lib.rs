//! RFox Render Client
//!
//! A typed client SDK for the RFox render server, which turns HTML/CSS into
//! PDF and raster documents. The client only assembles the JSON render job,
//! sends it, and hands back the resulting bytes or a typed error. Layout,
//! rasterization, quantization, signing and encryption all happen on the
//! server.
//!
//! # Example
//!
//! ```no_run
//! use rfrender::{Client, ClientConfig, OutputFormat, Watermark};
//!
//! # async fn run() -> rfrender::Result<()> {
//! let client = Client::new(
//!     "http://localhost:3000/",
//!     ClientConfig {
//!         timeout_ms: 30_000,
//!         ..Default::default()
//!     },
//! )?;
//!
//! let pdf = client
//!     .render_html("<h1>Invoice #42</h1>")
//!     .paper("a4")
//!     .pdf_title("Invoice #42")
//!     .pdf_watermark(Watermark::text("PAID").opacity(0.15))
//!     .send()
//!     .await?;
//!
//! let png = client
//!     .render_url("https://example.com")
//!     .format(OutputFormat::Png)
//!     .width(1280)
//!     .send()
//!     .await?;
//! # let _ = (pdf, png);
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod client;
pub mod error;
pub mod options;
pub mod payload;

pub use builder::RequestBuilder;
pub use client::Client;
pub use error::{Error, Result};
pub use options::{
    Accessibility, BarcodeAnchor, BarcodeType, Dither, FileRelationship, Flow, Orientation,
    OutputFormat, PalettePreset, PdfMode, PdfStandard, WatermarkLayer,
};
pub use payload::{
    Barcode, EmbeddedFile, Encryption, Palette, PdfOptions, Quantize, RenderPayload, Signature,
    Watermark,
};

/// Default client-side request timeout (two minutes)
pub const DEFAULT_TIMEOUT_MS: u64 = 120_000;

/// Liveness probe path
pub const HEALTH_PATH: &str = "/health";

/// Render job path
pub const RENDER_PATH: &str = "/render";

/// Configuration for a [`Client`]
///
/// # Examples
///
/// ```
/// let cfg = rfrender::ClientConfig::default();
/// assert_eq!(cfg.timeout_ms, 120_000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Transport-level cutoff for a whole request in milliseconds. Distinct
    /// from the payload's `timeout`, which bounds page loading on the server.
    pub timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}
