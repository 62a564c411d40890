//! Enumerated render options and their wire literals.
//!
//! Every enum serializes to the exact string the render server expects and
//! can be parsed back from that string (used by the CLI).

use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $wire)] $variant ),+
        }

        impl $name {
            /// All variants in declaration order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Wire literal sent to the server
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $wire ),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $wire => Ok($name::$variant), )+
                    other => Err(Error::ConfigError(format!(
                        "unknown {} `{}` (expected one of: {})",
                        stringify!($name),
                        other,
                        [$($wire),+].join(", ")
                    ))),
                }
            }
        }
    };
}

wire_enum! {
    /// Output document kind
    OutputFormat {
        Pdf => "pdf",
        Png => "png",
        Jpeg => "jpeg",
        Bmp => "bmp",
        Tga => "tga",
        Qoi => "qoi",
        Svg => "svg",
    }
}

impl Default for OutputFormat {
    fn default() -> Self {
        OutputFormat::Pdf
    }
}

impl OutputFormat {
    /// Conventional file extension for the format
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpg",
            other => other.as_str(),
        }
    }
}

wire_enum! {
    /// Page orientation
    Orientation {
        Portrait => "portrait",
        Landscape => "landscape",
    }
}

wire_enum! {
    /// How content is split across pages
    Flow {
        Auto => "auto",
        Paginate => "paginate",
        Continuous => "continuous",
    }
}

wire_enum! {
    /// Dithering applied during color quantization
    Dither {
        None => "none",
        FloydSteinberg => "floyd-steinberg",
        Atkinson => "atkinson",
        Ordered => "ordered",
    }
}

wire_enum! {
    /// Built-in quantization palettes
    PalettePreset {
        /// Pure black and white
        Mono => "mono",
        /// Four gray levels (typical e-paper)
        Gray4 => "gray4",
        /// Sixteen gray levels
        Gray16 => "gray16",
        /// 216-color web-safe cube
        WebSafe => "web-safe",
    }
}

wire_enum! {
    /// PDF/A compliance level
    PdfStandard {
        None => "none",
        PdfA2b => "pdf/a-2b",
        PdfA3b => "pdf/a-3b",
    }
}

wire_enum! {
    /// Whether the server emits vector or rasterized PDF pages
    PdfMode {
        Auto => "auto",
        Vector => "vector",
        Raster => "raster",
    }
}

wire_enum! {
    /// Accessibility tagging level
    Accessibility {
        None => "none",
        Basic => "basic",
        PdfUa1 => "pdf/ua-1",
    }
}

wire_enum! {
    /// Whether a watermark is drawn over or under page content
    WatermarkLayer {
        Over => "over",
        Under => "under",
    }
}

wire_enum! {
    /// Barcode symbology
    BarcodeType {
        Qr => "qr",
        Code128 => "code128",
        Ean13 => "ean13",
        Upca => "upca",
        Code39 => "code39",
    }
}

wire_enum! {
    /// Page corner a barcode position is measured from
    BarcodeAnchor {
        TopLeft => "top-left",
        TopRight => "top-right",
        BottomLeft => "bottom-left",
        BottomRight => "bottom-right",
    }
}

wire_enum! {
    /// Relationship of an embedded file to the document (PDF/A-3 `AFRelationship`)
    FileRelationship {
        Alternative => "alternative",
        Supplement => "supplement",
        Data => "data",
        Source => "source",
        Unspecified => "unspecified",
    }
}
