//! In-memory alias indexes and the lookup surface.
//!
//! Indexes are built once (see [`crate::dataset`]) and only read
//! afterwards; publishing a built index to concurrent readers is the
//! caller's build-then-publish contract. Lookups never fail on a miss —
//! the normalized id is echoed back so display code can fall through to
//! the raw number.

use std::collections::HashMap;

use crate::domain::{AliasRecord, Field, FieldValue, RadioId, RangeError};

/// An identifier presented for lookup: already numeric, or a raw
/// big-endian byte sequence of unknown width.
#[derive(Debug, Clone, Copy)]
pub enum Identifier<'a> {
    Numeric(RadioId),
    Raw(&'a [u8]),
}

impl Identifier<'_> {
    /// Normalize to a numeric id via the codec.
    pub fn normalize(self) -> Result<RadioId, RangeError> {
        match self {
            Identifier::Numeric(id) => Ok(id),
            Identifier::Raw(bytes) => RadioId::decode(bytes),
        }
    }
}

impl From<RadioId> for Identifier<'static> {
    fn from(id: RadioId) -> Self {
        Identifier::Numeric(id)
    }
}

impl From<u64> for Identifier<'static> {
    fn from(id: u64) -> Self {
        Identifier::Numeric(RadioId::new(id))
    }
}

impl From<u32> for Identifier<'static> {
    fn from(id: u32) -> Self {
        Identifier::Numeric(RadioId::from(id))
    }
}

impl<'a> From<&'a [u8]> for Identifier<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Identifier::Raw(bytes)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for Identifier<'a> {
    fn from(bytes: &'a [u8; N]) -> Self {
        Identifier::Raw(bytes)
    }
}

/// Result of a lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution<'a> {
    /// The id was not in the index; it is echoed back unchanged.
    Unknown(RadioId),
    /// Flat-index hit: the stored display name.
    Name(&'a str),
    /// Structured-index hit with no projection: the whole record.
    Record(&'a AliasRecord),
    /// Structured-index hit with projection: the requested fields'
    /// values, in request order.
    Fields(Vec<FieldValue<'a>>),
}

impl Resolution<'_> {
    /// Whether the id resolved to something in the index.
    pub fn is_known(&self) -> bool {
        !matches!(self, Resolution::Unknown(_))
    }
}

/// Flat index: id → display name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlatIndex(HashMap<RadioId, String>);

impl FlatIndex {
    /// The display name for `id`, if present.
    pub fn get(&self, id: RadioId) -> Option<&str> {
        self.0.get(&id).map(String::as_str)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over all entries, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (RadioId, &str)> {
        self.0.iter().map(|(id, name)| (*id, name.as_str()))
    }

    pub(crate) fn insert(&mut self, id: RadioId, name: String) {
        self.0.insert(id, name);
    }

    /// Look up `id`, which may be numeric or raw bytes.
    ///
    /// Flat values are scalars, not field-addressable: requested fields
    /// are ignored and the whole value is returned. A miss echoes the
    /// normalized id.
    ///
    /// # Examples
    ///
    /// ```
    /// use dmr_alias::domain::RadioId;
    /// use dmr_alias::index::{FlatIndex, Resolution};
    ///
    /// let index: FlatIndex = [(RadioId::new(312000), "N0MJS".to_string())]
    ///     .into_iter()
    ///     .collect();
    ///
    /// assert_eq!(index.resolve(312000u32, &[]).unwrap(), Resolution::Name("N0MJS"));
    /// assert_eq!(
    ///     index.resolve(1u32, &[]).unwrap(),
    ///     Resolution::Unknown(RadioId::new(1))
    /// );
    /// ```
    pub fn resolve<'a>(
        &self,
        id: impl Into<Identifier<'a>>,
        _fields: &[Field],
    ) -> Result<Resolution<'_>, RangeError> {
        let id = id.into().normalize()?;
        Ok(match self.get(id) {
            Some(name) => Resolution::Name(name),
            None => Resolution::Unknown(id),
        })
    }
}

impl FromIterator<(RadioId, String)> for FlatIndex {
    fn from_iter<I: IntoIterator<Item = (RadioId, String)>>(iter: I) -> Self {
        FlatIndex(iter.into_iter().collect())
    }
}

/// Structured index: id → alias record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StructuredIndex(HashMap<RadioId, AliasRecord>);

impl StructuredIndex {
    /// The record for `id`, if present.
    pub fn get(&self, id: RadioId) -> Option<&AliasRecord> {
        self.0.get(&id)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over all entries, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (RadioId, &AliasRecord)> {
        self.0.iter().map(|(id, record)| (*id, record))
    }

    pub(crate) fn insert(&mut self, id: RadioId, record: AliasRecord) {
        self.0.insert(id, record);
    }

    /// Look up `id`, optionally projecting named fields.
    ///
    /// With no fields the whole record is returned; with fields, their
    /// values in request order. Fields the record's kind does not carry
    /// are skipped. A miss echoes the normalized id.
    pub fn resolve<'a>(
        &self,
        id: impl Into<Identifier<'a>>,
        fields: &[Field],
    ) -> Result<Resolution<'_>, RangeError> {
        let id = id.into().normalize()?;
        let Some(record) = self.get(id) else {
            return Ok(Resolution::Unknown(id));
        };
        if fields.is_empty() {
            return Ok(Resolution::Record(record));
        }
        Ok(Resolution::Fields(
            fields.iter().filter_map(|&f| record.field(f)).collect(),
        ))
    }
}

impl FromIterator<(RadioId, AliasRecord)> for StructuredIndex {
    fn from_iter<I: IntoIterator<Item = (RadioId, AliasRecord)>>(iter: I) -> Self {
        StructuredIndex(iter.into_iter().collect())
    }
}
