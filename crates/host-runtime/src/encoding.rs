//! Text encoding support
//!
//! Exports and imports exchange files in legacy code pages. Codecs come from
//! `encoding_rs` and are looked up by WHATWG label (`latin1`, `cp1252`,
//! `shift_jis`, ...). The extended set is switched on for every environment.

use crate::errors::EncodingError;
use encoding_rs::Encoding;
use host_config::FeatureSwitches;

/// Encodings always available. Statics are built from the `_INIT` values.
pub static BASE_ENCODINGS: &[&Encoding] = &[
    &encoding_rs::UTF_8_INIT,
    &encoding_rs::UTF_16LE_INIT,
    &encoding_rs::UTF_16BE_INIT,
];

/// Legacy code pages added by the extended set.
pub static CODE_PAGE_ENCODINGS: &[&Encoding] = &[
    &encoding_rs::IBM866_INIT,
    &encoding_rs::ISO_8859_2_INIT,
    &encoding_rs::ISO_8859_5_INIT,
    &encoding_rs::ISO_8859_7_INIT,
    &encoding_rs::ISO_8859_8_INIT,
    &encoding_rs::ISO_8859_15_INIT,
    &encoding_rs::KOI8_R_INIT,
    &encoding_rs::KOI8_U_INIT,
    &encoding_rs::MACINTOSH_INIT,
    &encoding_rs::WINDOWS_874_INIT,
    &encoding_rs::WINDOWS_1250_INIT,
    &encoding_rs::WINDOWS_1251_INIT,
    &encoding_rs::WINDOWS_1252_INIT,
    &encoding_rs::WINDOWS_1253_INIT,
    &encoding_rs::WINDOWS_1254_INIT,
    &encoding_rs::WINDOWS_1255_INIT,
    &encoding_rs::WINDOWS_1256_INIT,
    &encoding_rs::WINDOWS_1257_INIT,
    &encoding_rs::WINDOWS_1258_INIT,
    &encoding_rs::SHIFT_JIS_INIT,
    &encoding_rs::EUC_JP_INIT,
    &encoding_rs::GBK_INIT,
    &encoding_rs::GB18030_INIT,
    &encoding_rs::BIG5_INIT,
    &encoding_rs::EUC_KR_INIT,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextEncodingSupport {
    extended: bool,
}

impl TextEncodingSupport {
    pub fn new(switches: FeatureSwitches) -> Self {
        Self {
            extended: switches.extended_text_encodings,
        }
    }

    pub fn extended(&self) -> bool {
        self.extended
    }

    /// Codec for `label`, if it is available in this set. Labels match
    /// ASCII case-insensitively.
    pub fn encoding(&self, label: &str) -> Option<&'static Encoding> {
        let encoding = Encoding::for_label(label.trim().as_bytes())?;
        self.available().any(|e| e == encoding).then_some(encoding)
    }

    pub fn supports(&self, label: &str) -> bool {
        self.encoding(label).is_some()
    }

    /// Canonical names of the available encodings.
    pub fn encodings(&self) -> Vec<&'static str> {
        self.available().map(Encoding::name).collect()
    }

    /// Decode `bytes`. A byte order mark overrides the requested encoding.
    pub fn decode(&self, label: &str, bytes: &[u8]) -> Result<String, EncodingError> {
        let encoding = self.require(label)?;
        let (text, used, had_errors) = encoding.decode(bytes);
        if had_errors {
            return Err(EncodingError::Malformed {
                encoding: used.name(),
            });
        }
        Ok(text.into_owned())
    }

    /// Encode `text`. Characters the code page cannot represent are an error.
    pub fn encode(&self, label: &str, text: &str) -> Result<Vec<u8>, EncodingError> {
        let encoding = self.require(label)?;
        if encoding.output_encoding() != encoding {
            return Err(EncodingError::DecodeOnly {
                encoding: encoding.name(),
            });
        }
        let (bytes, _, had_unmappable) = encoding.encode(text);
        if had_unmappable {
            return Err(EncodingError::Unmappable {
                encoding: encoding.name(),
            });
        }
        Ok(bytes.into_owned())
    }

    fn require(&self, label: &str) -> Result<&'static Encoding, EncodingError> {
        self.encoding(label).ok_or_else(|| EncodingError::Unsupported {
            label: label.trim().to_string(),
        })
    }

    fn available(&self) -> impl Iterator<Item = &'static Encoding> + '_ {
        let extended: &[&'static Encoding] = if self.extended { CODE_PAGE_ENCODINGS } else { &[] };
        BASE_ENCODINGS.iter().chain(extended).copied()
    }
}
