//! Radio id type and its binary codec.

use std::fmt;

/// Error returned when an id does not fit a codec operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    /// The id is too large for the requested encode width.
    #[error("id {id} does not fit in {width} bytes")]
    TooLarge { id: u64, width: IdWidth },

    /// The raw byte sequence carries more significant bytes than an id
    /// can hold.
    #[error("raw id has {significant} significant bytes (limit 8)")]
    TooLong { significant: usize },
}

/// Canonical fixed widths for encoded radio ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdWidth {
    Two,
    Three,
    Four,
}

impl IdWidth {
    /// Width in bytes.
    pub const fn bytes(self) -> usize {
        match self {
            IdWidth::Two => 2,
            IdWidth::Three => 3,
            IdWidth::Four => 4,
        }
    }

    /// Largest id representable at this width.
    pub const fn max(self) -> u64 {
        (1u64 << (self.bytes() * 8)) - 1
    }
}

impl fmt::Display for IdWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bytes())
    }
}

/// A numeric DMR radio id (peer, subscriber, or talkgroup).
///
/// Ids travel on the wire as fixed-width big-endian byte sequences of
/// 2, 3, or 4 bytes; [`encode`](Self::encode) produces that form and
/// [`decode`](Self::decode) normalizes raw bytes back to a number.
///
/// The two are deliberately not exact inverses: `encode` is strict about
/// its width, while `decode` accepts a sequence of any length so that
/// callers can normalize raw ids of unknown width before a lookup.
///
/// # Examples
///
/// ```
/// use dmr_alias::domain::{IdWidth, RadioId};
///
/// let id = RadioId::new(3120101);
/// assert_eq!(id.encode(IdWidth::Three).unwrap(), vec![0x2f, 0x9b, 0xe5]);
/// assert_eq!(RadioId::decode(&[0x2f, 0x9b, 0xe5]).unwrap(), id);
///
/// // Too wide for two bytes
/// assert!(id.encode(IdWidth::Two).is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RadioId(u64);

impl RadioId {
    /// Create an id from its numeric value.
    pub const fn new(id: u64) -> Self {
        RadioId(id)
    }

    /// The numeric value.
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Encode as exactly `width` big-endian bytes, zero-padded.
    ///
    /// Fails if the id does not fit in `width` bytes. The codec never
    /// clamps or truncates.
    pub fn encode(self, width: IdWidth) -> Result<Vec<u8>, RangeError> {
        if self.0 > width.max() {
            return Err(RangeError::TooLarge { id: self.0, width });
        }
        let be = self.0.to_be_bytes();
        Ok(be[be.len() - width.bytes()..].to_vec())
    }

    /// Decode a big-endian byte sequence of any length.
    ///
    /// Width-agnostic: sequences shorter or longer than the canonical
    /// widths are accepted. Leading zero bytes are insignificant and the
    /// empty sequence decodes to 0. More than 8 significant bytes exceed
    /// the id domain and fail.
    pub fn decode(bytes: &[u8]) -> Result<Self, RangeError> {
        let significant = match bytes.iter().position(|&b| b != 0) {
            Some(first) => &bytes[first..],
            None => &[],
        };
        if significant.len() > 8 {
            return Err(RangeError::TooLong {
                significant: significant.len(),
            });
        }
        let id = significant
            .iter()
            .fold(0u64, |acc, &b| (acc << 8) | u64::from(b));
        Ok(RadioId(id))
    }
}

impl From<u64> for RadioId {
    fn from(id: u64) -> Self {
        RadioId(id)
    }
}

impl From<u32> for RadioId {
    fn from(id: u32) -> Self {
        RadioId(u64::from(id))
    }
}

impl fmt::Debug for RadioId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RadioId({})", self.0)
    }
}

impl fmt::Display for RadioId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
