/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Message layout configuration.
//!
//! The [`Layout`] view is the single configuration surface touching the
//! codec core: it supplies section presence and ordering, the bitmap
//! transcription mode, and the parse-time padding policy. It is read once
//! per serialize/parse call.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Top-level message section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Section {
    /// The Message Type Indicator.
    Mti,
    /// The optional fixed-length header fields.
    Header,
    /// The bitmap followed by the data fields it selects.
    BitmapAndData,
}

/// Layout options for one message family.
///
/// Defaults match the common wire form: `[MTI, Bitmap+Data]` with a binary
/// bitmap, no header section, and no padding removal on parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    /// Whether the header section is emitted and parsed.
    pub use_header: bool,
    /// Rank of the MTI section in the output.
    pub mti_position: u8,
    /// Rank of the header section in the output.
    pub header_position: u8,
    /// Rank of the fused bitmap+data section in the output.
    pub bitmap_and_data_position: u8,
    /// Emit the bitmap as ASCII hex instead of raw bytes.
    pub use_hex_bitmap: bool,
    /// Strip padding (left zeros for N, right spaces for AN) after parsing.
    pub remove_padding_on_parse: bool,
}

impl Layout {
    /// Creates a layout with default options.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            use_header: false,
            mti_position: 0,
            header_position: 1,
            bitmap_and_data_position: 2,
            use_hex_bitmap: false,
            remove_padding_on_parse: false,
        }
    }

    /// Sets whether the header section is used.
    #[must_use]
    pub const fn with_header(mut self, use_header: bool) -> Self {
        self.use_header = use_header;
        self
    }

    /// Sets the section ranks for MTI, header, and bitmap+data.
    #[must_use]
    pub const fn with_positions(mut self, mti: u8, header: u8, bitmap_and_data: u8) -> Self {
        self.mti_position = mti;
        self.header_position = header;
        self.bitmap_and_data_position = bitmap_and_data;
        self
    }

    /// Selects hex or binary bitmap transcription.
    #[must_use]
    pub const fn with_hex_bitmap(mut self, use_hex: bool) -> Self {
        self.use_hex_bitmap = use_hex;
        self
    }

    /// Sets whether parse strips padding from fixed-length values.
    #[must_use]
    pub const fn with_remove_padding(mut self, remove: bool) -> Self {
        self.remove_padding_on_parse = remove;
        self
    }

    /// Returns the sections to process, sorted by rank.
    ///
    /// The header section is omitted entirely when `use_header` is false.
    #[must_use]
    pub fn sections(&self) -> SmallVec<[Section; 3]> {
        let mut ranked: SmallVec<[(u8, Section); 3]> = SmallVec::new();
        ranked.push((self.mti_position, Section::Mti));
        if self.use_header {
            ranked.push((self.header_position, Section::Header));
        }
        ranked.push((self.bitmap_and_data_position, Section::BitmapAndData));
        ranked.sort_by_key(|(rank, _)| *rank);
        ranked.into_iter().map(|(_, section)| section).collect()
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::new()
    }
}
