//! Dataset kind selector.

use std::fmt;
use std::str::FromStr;

/// Error returned when parsing an unrecognized dataset kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown dataset kind: {value:?}")]
pub struct UnknownKind {
    value: String,
}

/// Which structured-record shape a dataset holds.
///
/// Fixed, closed set: repeater peers, individual subscribers, talkgroups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Peer,
    Subscriber,
    Tgid,
}

impl Kind {
    /// Returns the kind's canonical lowercase name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Kind::Peer => "peer",
            Kind::Subscriber => "subscriber",
            Kind::Tgid => "tgid",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Kind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "peer" => Ok(Kind::Peer),
            "subscriber" => Ok(Kind::Subscriber),
            "tgid" => Ok(Kind::Tgid),
            _ => Err(UnknownKind {
                value: s.to_string(),
            }),
        }
    }
}
