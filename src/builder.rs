//! Fluent builder for a single render job.

use crate::client::Client;
use crate::options::{Accessibility, Dither, Flow, Orientation, OutputFormat, PdfMode, PdfStandard};
use crate::payload::{
    Barcode, EmbeddedFile, Encryption, Palette, PdfOptions, Quantize, RenderPayload, Signature,
    Watermark,
};
use crate::{Result, RENDER_PATH};
use log::{debug, warn};
use std::path::Path;

/// Accumulates render options and sends the job.
///
/// Created by [`Client::render_html`] or [`Client::render_url`]; the source
/// cannot be changed afterwards. Setters consume and return the builder, so
/// any subset may be chained in any order and the last write wins.
///
/// `send` borrows the builder: calling it again re-sends an identical
/// payload as an independent request.
#[derive(Debug, Clone)]
pub struct RequestBuilder<'c> {
    client: &'c Client,
    payload: RenderPayload,
}

impl<'c> RequestBuilder<'c> {
    pub(crate) fn from_html(client: &'c Client, html: String) -> Self {
        Self {
            client,
            payload: RenderPayload {
                html: Some(html),
                ..Default::default()
            },
        }
    }

    pub(crate) fn from_url(client: &'c Client, url: String) -> Self {
        Self {
            client,
            payload: RenderPayload {
                url: Some(url),
                ..Default::default()
            },
        }
    }

    fn quantize_mut(&mut self) -> &mut Quantize {
        self.payload.quantize.get_or_insert_with(Quantize::default)
    }

    fn pdf_mut(&mut self) -> &mut PdfOptions {
        self.payload.pdf.get_or_insert_with(PdfOptions::default)
    }

    /// Clear a nested PDF spec, dropping the whole group if nothing remains.
    fn clear_pdf(&mut self, clear: impl FnOnce(&mut PdfOptions)) {
        if let Some(pdf) = self.payload.pdf.as_mut() {
            clear(pdf);
            if *pdf == PdfOptions::default() {
                self.payload.pdf = None;
            }
        }
    }

    // --- Layout ---

    pub fn format(mut self, format: OutputFormat) -> Self {
        self.payload.format = format;
        self
    }

    /// Viewport width in pixels
    pub fn width(mut self, px: u32) -> Self {
        self.payload.width = Some(px);
        self
    }

    /// Viewport height in pixels
    pub fn height(mut self, px: u32) -> Self {
        self.payload.height = Some(px);
        self
    }

    /// Named paper size such as `"a4"` or `"letter"`
    pub fn paper(mut self, paper: impl Into<String>) -> Self {
        self.payload.paper = Some(paper.into());
        self
    }

    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.payload.orientation = Some(orientation);
        self
    }

    /// Margin preset name or `"top,right,bottom,left"` in millimeters
    pub fn margins(mut self, margins: impl Into<String>) -> Self {
        self.payload.margins = Some(margins.into());
        self
    }

    /// Ignored unless all four values are finite.
    pub fn margins_mm(self, top: f64, right: f64, bottom: f64, left: f64) -> Self {
        if ![top, right, bottom, left].iter().all(|v| v.is_finite()) {
            warn!("ignoring non-finite margins {},{},{},{}", top, right, bottom, left);
            return self;
        }
        self.margins(format!("{},{},{},{}", top, right, bottom, left))
    }

    pub fn flow(mut self, flow: Flow) -> Self {
        self.payload.flow = Some(flow);
        self
    }

    /// Output resolution in DPI
    pub fn density(mut self, dpi: u32) -> Self {
        self.payload.density = Some(dpi);
        self
    }

    /// CSS color painted behind the page
    pub fn background(mut self, color: impl Into<String>) -> Self {
        self.payload.background = Some(color.into());
        self
    }

    /// Server-side page-load budget in seconds. Unrelated to the client's
    /// request timeout.
    pub fn timeout(mut self, seconds: u32) -> Self {
        self.payload.timeout = Some(seconds);
        self
    }

    // --- Quantization ---

    pub fn colors(mut self, colors: u16) -> Self {
        self.quantize_mut().colors = Some(colors);
        self
    }

    /// Named palette (any string, or a [`PalettePreset`](crate::PalettePreset))
    /// or an explicit color list.
    pub fn palette(mut self, palette: impl Into<Palette>) -> Self {
        self.quantize_mut().palette = Some(palette.into());
        self
    }

    /// Explicit palette as hex colors, in order
    pub fn palette_colors<I, S>(self, colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.palette(Palette::Colors(colors.into_iter().map(Into::into).collect()))
    }

    pub fn dither(mut self, dither: Dither) -> Self {
        self.quantize_mut().dither = Some(dither);
        self
    }

    // --- PDF ---

    pub fn pdf_title(mut self, title: impl Into<String>) -> Self {
        self.pdf_mut().title = Some(title.into());
        self
    }

    pub fn pdf_author(mut self, author: impl Into<String>) -> Self {
        self.pdf_mut().author = Some(author.into());
        self
    }

    pub fn pdf_subject(mut self, subject: impl Into<String>) -> Self {
        self.pdf_mut().subject = Some(subject.into());
        self
    }

    pub fn pdf_keywords(mut self, keywords: impl Into<String>) -> Self {
        self.pdf_mut().keywords = Some(keywords.into());
        self
    }

    pub fn pdf_creator(mut self, creator: impl Into<String>) -> Self {
        self.pdf_mut().creator = Some(creator.into());
        self
    }

    /// Generate an outline from headings
    pub fn pdf_bookmarks(mut self, enabled: bool) -> Self {
        self.pdf_mut().bookmarks = Some(enabled);
        self
    }

    pub fn pdf_page_numbers(mut self, enabled: bool) -> Self {
        self.pdf_mut().page_numbers = Some(enabled);
        self
    }

    pub fn pdf_standard(mut self, standard: PdfStandard) -> Self {
        self.pdf_mut().standard = Some(standard);
        self
    }

    /// Attach a file. Repeated calls accumulate in call order.
    pub fn pdf_embed_file(mut self, file: EmbeddedFile) -> Self {
        self.pdf_mut().embedded_files.push(file);
        self
    }

    /// Set the watermark. A spec with no member set clears any earlier one.
    pub fn pdf_watermark(mut self, watermark: Watermark) -> Self {
        if watermark.is_empty() {
            self.clear_pdf(|pdf| pdf.watermark = None);
        } else {
            self.pdf_mut().watermark = Some(watermark);
        }
        self
    }

    /// Place a barcode. Repeated calls accumulate in call order.
    pub fn pdf_barcode(mut self, barcode: Barcode) -> Self {
        self.pdf_mut().barcodes.push(barcode);
        self
    }

    pub fn pdf_mode(mut self, mode: PdfMode) -> Self {
        self.pdf_mut().mode = Some(mode);
        self
    }

    /// Sign the document. A spec with no member set clears any earlier one.
    pub fn pdf_sign(mut self, signature: Signature) -> Self {
        if signature.is_empty() {
            self.clear_pdf(|pdf| pdf.signature = None);
        } else {
            self.pdf_mut().signature = Some(signature);
        }
        self
    }

    /// Encrypt the document. A spec with no member set clears any earlier one.
    pub fn pdf_encrypt(mut self, encryption: Encryption) -> Self {
        if encryption.is_empty() {
            self.clear_pdf(|pdf| pdf.encryption = None);
        } else {
            self.pdf_mut().encryption = Some(encryption);
        }
        self
    }

    pub fn pdf_accessibility(mut self, level: Accessibility) -> Self {
        self.pdf_mut().accessibility = Some(level);
        self
    }

    /// Restructure for fast web view
    pub fn pdf_linearize(mut self, enabled: bool) -> Self {
        self.pdf_mut().linearize = Some(enabled);
        self
    }

    /// Document language as a BCP-47 tag
    pub fn pdf_lang(mut self, lang: impl Into<String>) -> Self {
        self.pdf_mut().document_lang = Some(lang.into());
        self
    }

    // --- Output ---

    /// The wire payload for the current options. Pure; no I/O.
    pub fn build_payload(&self) -> RenderPayload {
        self.payload.clone()
    }

    /// Pretty-printed JSON of [`build_payload`](Self::build_payload).
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.payload)?)
    }

    /// Send the job and return the rendered bytes unmodified.
    ///
    /// Exactly one attempt is made. Transport failures (including the client
    /// timeout) become [`Error::ConnectionError`](crate::Error::ConnectionError);
    /// non-2xx replies become [`Error::ServerError`](crate::Error::ServerError).
    pub async fn send(&self) -> Result<Vec<u8>> {
        let payload = self.build_payload();
        debug!(
            "rendering {} from {}",
            payload.format,
            if payload.html.is_some() { "html" } else { "url" }
        );
        let raw = self.client.execute_post(RENDER_PATH, &payload).await?;
        raw.into_render_result()
    }

    /// Send the job and write the result to `path`. Returns the byte count.
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<usize> {
        let bytes = self.send().await?;
        tokio::fs::write(path.as_ref(), &bytes).await?;
        debug!("wrote {} bytes to {}", bytes.len(), path.as_ref().display());
        Ok(bytes.len())
    }
}
