use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization as _;

/// The fourteen standard Type1 fonts every PDF reader is required to provide, which means
/// that none of them needs to be embedded into the document.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardFont {
    #[serde(rename = "Helvetica")]
    Helvetica,
    #[serde(rename = "Helvetica-Bold")]
    HelveticaBold,
    #[serde(rename = "Helvetica-Oblique")]
    HelveticaOblique,
    #[serde(rename = "Helvetica-BoldOblique")]
    HelveticaBoldOblique,
    #[serde(rename = "Times-Roman")]
    TimesRoman,
    #[serde(rename = "Times-Bold")]
    TimesBold,
    #[serde(rename = "Times-Italic")]
    TimesItalic,
    #[serde(rename = "Times-BoldItalic")]
    TimesBoldItalic,
    #[serde(rename = "Courier")]
    Courier,
    #[serde(rename = "Courier-Bold")]
    CourierBold,
    #[serde(rename = "Courier-Oblique")]
    CourierOblique,
    #[serde(rename = "Courier-BoldOblique")]
    CourierBoldOblique,
    #[serde(rename = "Symbol")]
    Symbol,
    #[serde(rename = "ZapfDingbats")]
    ZapfDingbats,
}

impl StandardFont {
    /// The PostScript name of the font, which goes into the `BaseFont` entry of the font dictionary.
    pub fn base_name(&self) -> &'static str {
        match self {
            StandardFont::Helvetica => "Helvetica",
            StandardFont::HelveticaBold => "Helvetica-Bold",
            StandardFont::HelveticaOblique => "Helvetica-Oblique",
            StandardFont::HelveticaBoldOblique => "Helvetica-BoldOblique",
            StandardFont::TimesRoman => "Times-Roman",
            StandardFont::TimesBold => "Times-Bold",
            StandardFont::TimesItalic => "Times-Italic",
            StandardFont::TimesBoldItalic => "Times-BoldItalic",
            StandardFont::Courier => "Courier",
            StandardFont::CourierBold => "Courier-Bold",
            StandardFont::CourierOblique => "Courier-Oblique",
            StandardFont::CourierBoldOblique => "Courier-BoldOblique",
            StandardFont::Symbol => "Symbol",
            StandardFont::ZapfDingbats => "ZapfDingbats",
        }
    }

    pub fn is_bold(&self) -> bool {
        matches!(
            self,
            StandardFont::HelveticaBold
                | StandardFont::HelveticaBoldOblique
                | StandardFont::TimesBold
                | StandardFont::TimesBoldItalic
                | StandardFont::CourierBold
                | StandardFont::CourierBoldOblique
        )
    }

    /// Symbolic fonts carry their own built-in encoding, so `WinAnsiEncoding` must not be set on them.
    pub fn is_symbolic(&self) -> bool {
        matches!(self, StandardFont::Symbol | StandardFont::ZapfDingbats)
    }

    /// Builds the font dictionary to be inserted into the PDF document.
    pub(crate) fn to_dictionary(self) -> lopdf::Dictionary {
        use lopdf::Object::Name;

        let mut font_dictionary = lopdf::Dictionary::from_iter(vec![
            ("Type", Name("Font".into())),
            ("Subtype", Name("Type1".into())),
            ("BaseFont", Name(self.base_name().into())),
        ]);
        if !self.is_symbolic() {
            font_dictionary.set("Encoding", Name("WinAnsiEncoding".into()));
        }

        font_dictionary
    }
}

impl std::str::FromStr for StandardFont {
    type Err = String;

    fn from_str(base_name: &str) -> Result<Self, Self::Err> {
        ALL_STANDARD_FONTS
            .iter()
            .find(|font| font.base_name() == base_name)
            .copied()
            .ok_or(format!("{:?} is not one of the standard PDF fonts", base_name))
    }
}

const ALL_STANDARD_FONTS: [StandardFont; 14] = [
    StandardFont::Helvetica,
    StandardFont::HelveticaBold,
    StandardFont::HelveticaOblique,
    StandardFont::HelveticaBoldOblique,
    StandardFont::TimesRoman,
    StandardFont::TimesBold,
    StandardFont::TimesItalic,
    StandardFont::TimesBoldItalic,
    StandardFont::Courier,
    StandardFont::CourierBold,
    StandardFont::CourierOblique,
    StandardFont::CourierBoldOblique,
    StandardFont::Symbol,
    StandardFont::ZapfDingbats,
];

/// Encodes a string into the single-byte `WinAnsiEncoding` used by the standard fonts.
///
/// The text is normalized in the NFC form first, so that combining sequences collapse into the
/// precomposed Latin-1 characters where possible. Characters that still cannot be represented
/// are skipped and logged, in the same way a glyph missing from a font would be.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    let mut encoded_bytes = Vec::with_capacity(text.len());
    for character in text.nfc() {
        match win_ansi_byte(character) {
            Some(byte) => encoded_bytes.push(byte),
            None => log::warn!(
                "Unable to encode the character {:?} with the standard font encoding, skipping it",
                character
            ),
        }
    }

    encoded_bytes
}

fn win_ansi_byte(character: char) -> Option<u8> {
    let codepoint = character as u32;
    match codepoint {
        0x20..=0x7E | 0xA0..=0xFF => Some(codepoint as u8),
        // The 0x80-0x9F range of WinAnsi holds typographic punctuation instead of control characters
        _ => match character {
            '€' => Some(0x80),
            '‚' => Some(0x82),
            '„' => Some(0x84),
            '…' => Some(0x85),
            '‘' => Some(0x91),
            '’' => Some(0x92),
            '“' => Some(0x93),
            '”' => Some(0x94),
            '•' => Some(0x95),
            '–' => Some(0x96),
            '—' => Some(0x97),
            '™' => Some(0x99),
            _ => None,
        },
    }
}
