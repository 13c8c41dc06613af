//! Alias records and field projection.

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

/// Error returned when parsing an unrecognized field name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown field name: {value:?}")]
pub struct UnknownField {
    value: String,
}

/// A projectable alias-record field.
///
/// Not every field exists for every record kind; see
/// [`AliasRecord::field`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Callsign,
    Name,
    City,
    State,
    Country,
    Freq,
    Cc,
    Offset,
    Linked,
    Trustee,
    Network,
}

impl Field {
    /// Returns the field's canonical uppercase name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Field::Callsign => "CALLSIGN",
            Field::Name => "NAME",
            Field::City => "CITY",
            Field::State => "STATE",
            Field::Country => "COUNTRY",
            Field::Freq => "FREQ",
            Field::Cc => "CC",
            Field::Offset => "OFFSET",
            Field::Linked => "LINKED",
            Field::Trustee => "TRUSTEE",
            Field::Network => "NETWORK",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CALLSIGN" => Ok(Field::Callsign),
            "NAME" => Ok(Field::Name),
            "CITY" => Ok(Field::City),
            "STATE" => Ok(Field::State),
            "COUNTRY" => Ok(Field::Country),
            "FREQ" => Ok(Field::Freq),
            "CC" => Ok(Field::Cc),
            "OFFSET" => Ok(Field::Offset),
            "LINKED" => Ok(Field::Linked),
            "TRUSTEE" => Ok(Field::Trustee),
            "NETWORK" => Ok(Field::Network),
            _ => Err(UnknownField {
                value: s.to_string(),
            }),
        }
    }
}

/// A borrowed field value: a display string or a pass-through scalar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Scalar(&'a Value),
}

impl<'a> FieldValue<'a> {
    /// The value as text, if it is textual.
    pub fn as_text(self) -> Option<&'a str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::Scalar(v) => v.as_str(),
        }
    }
}

impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Scalar(v) => write!(f, "{v}"),
        }
    }
}

/// Alias data for a repeater peer.
///
/// FREQ, CC and OFFSET are passed through as the source scalars; the
/// feeds are not consistent about emitting them as numbers or strings.
#[derive(Debug, Clone, PartialEq)]
pub struct PeerRecord {
    pub callsign: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub freq: Value,
    pub cc: Value,
    pub offset: Value,
    pub linked: String,
    pub trustee: String,
    pub network: String,
}

/// Alias data for an individual subscriber.
#[derive(Debug, Clone, PartialEq)]
pub struct SubscriberRecord {
    pub callsign: String,
    /// First name and surname joined with a single space.
    pub name: String,
    pub city: String,
    pub state: String,
    pub country: String,
}

/// Alias data for a talkgroup.
#[derive(Debug, Clone, PartialEq)]
pub struct TgidRecord {
    pub name: String,
}

/// A structured alias record of one of the three dataset kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum AliasRecord {
    Peer(PeerRecord),
    Subscriber(SubscriberRecord),
    Tgid(TgidRecord),
}

impl AliasRecord {
    /// The value of `field`, or `None` if this record's kind has no such
    /// field.
    pub fn field(&self, field: Field) -> Option<FieldValue<'_>> {
        use FieldValue::{Scalar, Text};

        match self {
            AliasRecord::Peer(p) => match field {
                Field::Callsign => Some(Text(&p.callsign)),
                Field::City => Some(Text(&p.city)),
                Field::State => Some(Text(&p.state)),
                Field::Country => Some(Text(&p.country)),
                Field::Freq => Some(Scalar(&p.freq)),
                Field::Cc => Some(Scalar(&p.cc)),
                Field::Offset => Some(Scalar(&p.offset)),
                Field::Linked => Some(Text(&p.linked)),
                Field::Trustee => Some(Text(&p.trustee)),
                Field::Network => Some(Text(&p.network)),
                Field::Name => None,
            },
            AliasRecord::Subscriber(s) => match field {
                Field::Callsign => Some(Text(&s.callsign)),
                Field::Name => Some(Text(&s.name)),
                Field::City => Some(Text(&s.city)),
                Field::State => Some(Text(&s.state)),
                Field::Country => Some(Text(&s.country)),
                _ => None,
            },
            AliasRecord::Tgid(t) => match field {
                Field::Name => Some(Text(&t.name)),
                _ => None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_peer() -> AliasRecord {
        AliasRecord::Peer(PeerRecord {
            callsign: "N0MJS".into(),
            city: "Olathe".into(),
            state: "Kansas".into(),
            country: "United States".into(),
            freq: json!("449.60000"),
            cc: json!(1),
            offset: json!(-5.0),
            linked: "TS1 TS2".into(),
            trustee: "N0MJS".into(),
            network: "K0USY".into(),
        })
    }

    #[test]
    fn peer_fields() {
        let record = sample_peer();
        assert_eq!(
            record.field(Field::Callsign),
            Some(FieldValue::Text("N0MJS"))
        );
        assert_eq!(record.field(Field::Cc), Some(FieldValue::Scalar(&json!(1))));
        // Peers have no NAME field
        assert_eq!(record.field(Field::Name), None);
    }

    #[test]
    fn subscriber_fields() {
        let record = AliasRecord::Subscriber(SubscriberRecord {
            callsign: "N0CALL".into(),
            name: "Jane Doe".into(),
            city: "X".into(),
            state: "Y".into(),
            country: "Z".into(),
        });
        assert_eq!(record.field(Field::Name), Some(FieldValue::Text("Jane Doe")));
        assert_eq!(record.field(Field::Freq), None);
        assert_eq!(record.field(Field::Trustee), None);
    }

    #[test]
    fn tgid_fields() {
        let record = AliasRecord::Tgid(TgidRecord {
            name: "Worldwide".into(),
        });
        assert_eq!(record.field(Field::Name), Some(FieldValue::Text("Worldwide")));
        assert_eq!(record.field(Field::Callsign), None);
    }

    #[test]
    fn field_parse() {
        assert_eq!("CALLSIGN".parse::<Field>().unwrap(), Field::Callsign);
        assert_eq!("NETWORK".parse::<Field>().unwrap(), Field::Network);
        assert!("callsign".parse::<Field>().is_err());
        assert!("BOGUS".parse::<Field>().is_err());
    }

    #[test]
    fn field_value_display() {
        assert_eq!(FieldValue::Text("N0MJS").to_string(), "N0MJS");
        let cc = json!(1);
        assert_eq!(FieldValue::Scalar(&cc).to_string(), "1");
    }

    #[test]
    fn field_value_as_text() {
        assert_eq!(FieldValue::Text("abc").as_text(), Some("abc"));
        let s = json!("449.6");
        assert_eq!(FieldValue::Scalar(&s).as_text(), Some("449.6"));
        let n = json!(7);
        assert_eq!(FieldValue::Scalar(&n).as_text(), None);
    }
}
