//! Wire types for the `POST /render` request body.
//!
//! Unset scalars are `None` and never serialized. Optional groups
//! (`quantize`, `pdf`, and the nested watermark/signature/encryption specs)
//! are `Option<Group>`: a group exists only once one of its members has been
//! set, so the JSON never contains `null` placeholders or empty objects.

use crate::options::{
    Accessibility, BarcodeAnchor, BarcodeType, Dither, FileRelationship, Flow, Orientation,
    OutputFormat, PalettePreset, PdfMode, PdfStandard, WatermarkLayer,
};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

/// `None` for NaN and infinities, which JSON cannot carry.
pub(crate) fn finite(v: f64) -> Option<f64> {
    v.is_finite().then_some(v)
}

fn unset_or_non_finite(v: &Option<f64>) -> bool {
    !v.is_some_and(f64::is_finite)
}

/// Complete render job as sent to the server
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default)]
    pub format: OutputFormat,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paper: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orientation: Option<Orientation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margins: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flow: Option<Flow>,
    /// Dots per inch; the server assumes 96 when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub density: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    /// Page-load budget in seconds, enforced by the server
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantize: Option<Quantize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pdf: Option<PdfOptions>,
}

/// Color quantization settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Quantize {
    /// Target color count, 2..=256
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub palette: Option<Palette>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dither: Option<Dither>,
}

/// Either a named palette or an explicit ordered list of hex colors.
///
/// Names are forwarded verbatim; [`PalettePreset`] only offers constants for
/// common ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Palette {
    Named(String),
    Colors(Vec<String>),
}

impl From<PalettePreset> for Palette {
    fn from(preset: PalettePreset) -> Self {
        Palette::Named(preset.as_str().to_string())
    }
}

impl From<&str> for Palette {
    fn from(name: &str) -> Self {
        Palette::Named(name.to_string())
    }
}

impl From<String> for Palette {
    fn from(name: String) -> Self {
        Palette::Named(name)
    }
}

impl From<Vec<String>> for Palette {
    fn from(colors: Vec<String>) -> Self {
        Palette::Colors(colors)
    }
}

/// PDF-specific post-processing options
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PdfOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bookmarks: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_numbers: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub standard: Option<PdfStandard>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub embedded_files: Vec<EmbeddedFile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub watermark: Option<Watermark>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub barcodes: Vec<Barcode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<PdfMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<Signature>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encryption: Option<Encryption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accessibility: Option<Accessibility>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linearize: Option<bool>,
    /// BCP-47 language tag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_lang: Option<String>,
}

/// A file attached to the PDF
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddedFile {
    pub path: String,
    /// Base64 file contents
    pub data: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationship: Option<FileRelationship>,
}

impl EmbeddedFile {
    /// Attach already base64-encoded data under `path`.
    pub fn new(path: impl Into<String>, base64_data: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            data: base64_data.into(),
            mime_type: None,
            description: None,
            relationship: None,
        }
    }

    /// Attach raw bytes; they are base64-encoded here.
    pub fn from_bytes(path: impl Into<String>, bytes: &[u8]) -> Self {
        Self::new(path, BASE64.encode(bytes))
    }

    pub fn mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn relationship(mut self, relationship: FileRelationship) -> Self {
        self.relationship = Some(relationship);
        self
    }
}

/// Text or image watermark stamped on pages.
///
/// Text and image are not exclusive here; the server decides what to draw
/// when both are present. Non-finite numbers passed to the setters are
/// ignored and never serialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Watermark {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Base64 image bytes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_data: Option<String>,
    /// 0.0 (invisible) to 1.0 (opaque)
    #[serde(skip_serializing_if = "unset_or_non_finite")]
    pub opacity: Option<f64>,
    /// Degrees
    #[serde(skip_serializing_if = "unset_or_non_finite")]
    pub rotation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "unset_or_non_finite")]
    pub font_size: Option<f64>,
    #[serde(skip_serializing_if = "unset_or_non_finite")]
    pub scale: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layer: Option<WatermarkLayer>,
    /// Page selector such as `"1,3-5"`, interpreted by the server
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pages: Option<String>,
}

impl Watermark {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    /// Image watermark from base64 data.
    pub fn image(base64_data: impl Into<String>) -> Self {
        Self {
            image_data: Some(base64_data.into()),
            ..Default::default()
        }
    }

    /// Image watermark from raw bytes.
    pub fn image_bytes(bytes: &[u8]) -> Self {
        Self::image(BASE64.encode(bytes))
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_image(mut self, base64_data: impl Into<String>) -> Self {
        self.image_data = Some(base64_data.into());
        self
    }

    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = finite(opacity).or(self.opacity);
        self
    }

    pub fn rotation(mut self, degrees: f64) -> Self {
        self.rotation = finite(degrees).or(self.rotation);
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn font_size(mut self, size: f64) -> Self {
        self.font_size = finite(size).or(self.font_size);
        self
    }

    pub fn scale(mut self, scale: f64) -> Self {
        self.scale = finite(scale).or(self.scale);
        self
    }

    pub fn layer(mut self, layer: WatermarkLayer) -> Self {
        self.layer = Some(layer);
        self
    }

    pub fn pages(mut self, pages: impl Into<String>) -> Self {
        self.pages = Some(pages.into());
        self
    }

    /// True when no member would be serialized
    pub fn is_empty(&self) -> bool {
        self.text.is_none()
            && self.image_data.is_none()
            && self.color.is_none()
            && self.layer.is_none()
            && self.pages.is_none()
            && [self.opacity, self.rotation, self.font_size, self.scale]
                .iter()
                .all(unset_or_non_finite)
    }
}

/// Barcode stamped onto the PDF
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Barcode {
    #[serde(rename = "type")]
    pub kind: BarcodeType,
    pub data: String,
    #[serde(skip_serializing_if = "unset_or_non_finite")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "unset_or_non_finite")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "unset_or_non_finite")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "unset_or_non_finite")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor: Option<BarcodeAnchor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foreground: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub draw_background: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pages: Option<String>,
}

impl Barcode {
    pub fn new(kind: BarcodeType, data: impl Into<String>) -> Self {
        Self {
            kind,
            data: data.into(),
            x: None,
            y: None,
            width: None,
            height: None,
            anchor: None,
            foreground: None,
            background: None,
            draw_background: None,
            pages: None,
        }
    }

    /// Offset from the anchor corner. Ignored unless both are finite.
    pub fn position(mut self, x: f64, y: f64) -> Self {
        if let (Some(x), Some(y)) = (finite(x), finite(y)) {
            self.x = Some(x);
            self.y = Some(y);
        }
        self
    }

    /// Ignored unless both are finite.
    pub fn size(mut self, width: f64, height: f64) -> Self {
        if let (Some(w), Some(h)) = (finite(width), finite(height)) {
            self.width = Some(w);
            self.height = Some(h);
        }
        self
    }

    pub fn anchor(mut self, anchor: BarcodeAnchor) -> Self {
        self.anchor = Some(anchor);
        self
    }

    pub fn foreground(mut self, color: impl Into<String>) -> Self {
        self.foreground = Some(color.into());
        self
    }

    pub fn background(mut self, color: impl Into<String>) -> Self {
        self.background = Some(color.into());
        self
    }

    pub fn draw_background(mut self, draw: bool) -> Self {
        self.draw_background = Some(draw);
        self
    }

    pub fn pages(mut self, pages: impl Into<String>) -> Self {
        self.pages = Some(pages.into());
        self
    }
}

/// Digital signature applied by the server
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Signature {
    /// Base64 PKCS#12 bundle
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate_data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp_url: Option<String>,
}

impl Signature {
    /// Sign with a PKCS#12 bundle given as raw bytes.
    pub fn from_pkcs12(bundle: &[u8], password: impl Into<String>) -> Self {
        Self {
            certificate_data: Some(BASE64.encode(bundle)),
            password: Some(password.into()),
            ..Default::default()
        }
    }

    pub fn certificate_data(mut self, base64_data: impl Into<String>) -> Self {
        self.certificate_data = Some(base64_data.into());
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn signer_name(mut self, name: impl Into<String>) -> Self {
        self.signer_name = Some(name.into());
        self
    }

    pub fn reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// RFC 3161 timestamp authority
    pub fn timestamp_url(mut self, url: impl Into<String>) -> Self {
        self.timestamp_url = Some(url.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Password protection and permission flags
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Encryption {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<String>,
}

impl Encryption {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_password(mut self, password: impl Into<String>) -> Self {
        self.user_password = Some(password.into());
        self
    }

    pub fn owner_password(mut self, password: impl Into<String>) -> Self {
        self.owner_password = Some(password.into());
        self
    }

    /// Permission flags, forwarded verbatim (e.g. `"print,copy"`)
    pub fn permissions(mut self, permissions: impl Into<String>) -> Self {
        self.permissions = Some(permissions.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn minimal_payload_has_only_format() {
        let payload = RenderPayload::default();
        assert_eq!(serde_json::to_value(&payload).unwrap(), json!({ "format": "pdf" }));
    }

    #[test]
    fn palette_serializes_untagged() {
        let preset = Quantize {
            palette: Some(PalettePreset::Gray4.into()),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&preset).unwrap(), json!({ "palette": "gray4" }));

        let explicit = Quantize {
            palette: Some(vec!["#000000".to_string(), "#ffffff".to_string()].into()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&explicit).unwrap(),
            json!({ "palette": ["#000000", "#ffffff"] })
        );
    }

    #[test]
    fn binary_helpers_encode_base64() {
        let file = EmbeddedFile::from_bytes("invoice.xml", b"<xml/>");
        assert_eq!(file.data, "PHhtbC8+");

        let mark = Watermark::image_bytes(&[0xff, 0x00]);
        assert_eq!(mark.image_data.as_deref(), Some("/wA="));

        let sig = Signature::from_pkcs12(b"p12", "secret");
        assert_eq!(sig.certificate_data.as_deref(), Some("cDEy"));
        assert_eq!(sig.password.as_deref(), Some("secret"));
    }

    #[test]
    fn barcode_uses_type_key() {
        let code = Barcode::new(BarcodeType::Qr, "https://example.com")
            .anchor(BarcodeAnchor::BottomRight)
            .size(30.0, 30.0)
            .pages("1");
        assert_eq!(
            serde_json::to_value(&code).unwrap(),
            json!({
                "type": "qr",
                "data": "https://example.com",
                "width": 30.0,
                "height": 30.0,
                "anchor": "bottom-right",
                "pages": "1"
            })
        );
    }

    #[test]
    fn empty_groups_report_empty() {
        assert!(Watermark::default().is_empty());
        assert!(!Watermark::text("DRAFT").is_empty());
        assert!(Signature::default().is_empty());
        assert!(Encryption::new().is_empty());
        assert!(!Encryption::new().permissions("print").is_empty());
    }

    #[test]
    fn free_form_palette_name_round_trips() {
        let payload: RenderPayload = serde_json::from_value(json!({
            "html": "x",
            "quantize": { "palette": "grayscale" }
        }))
        .unwrap();
        let q = payload.quantize.clone().unwrap();
        assert_eq!(q.palette, Some(Palette::Named("grayscale".to_string())));
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({ "html": "x", "format": "pdf", "quantize": { "palette": "grayscale" } })
        );
        assert_eq!(Palette::from("eink"), Palette::Named("eink".to_string()));
    }

    #[test]
    fn non_finite_numbers_are_never_serialized() {
        let mark = Watermark::text("D")
            .opacity(f64::NAN)
            .rotation(f64::INFINITY)
            .font_size(24.0)
            .font_size(f64::NEG_INFINITY);
        assert_eq!(mark.opacity, None);
        assert_eq!(mark.font_size, Some(24.0));
        assert_eq!(
            serde_json::to_value(&mark).unwrap(),
            json!({ "text": "D", "font_size": 24.0 })
        );

        let code = Barcode::new(BarcodeType::Code39, "A1")
            .position(f64::NAN, 4.0)
            .size(10.0, f64::INFINITY);
        assert_eq!(
            serde_json::to_value(&code).unwrap(),
            json!({ "type": "code39", "data": "A1" })
        );

        // Fields assigned directly are filtered at serialization too
        let direct = Watermark {
            text: Some("D".into()),
            scale: Some(f64::NAN),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&direct).unwrap(), json!({ "text": "D" }));
        let only_nan = Watermark {
            opacity: Some(f64::NAN),
            ..Default::default()
        };
        assert!(only_nan.is_empty());
    }

    #[test]
    fn payload_deserializes_from_wire_json() {
        let payload: RenderPayload = serde_json::from_value(json!({
            "url": "https://example.com",
            "format": "png",
            "quantize": { "colors": 16, "dither": "ordered" }
        }))
        .unwrap();
        assert_eq!(payload.url.as_deref(), Some("https://example.com"));
        assert_eq!(payload.format, OutputFormat::Png);
        let q = payload.quantize.unwrap();
        assert_eq!(q.colors, Some(16));
        assert_eq!(q.dither, Some(Dither::Ordered));
    }
}
