//! Epoch-based timestamps at second, millisecond, and microsecond granularity
//!
//! All three types serialize as unsigned big-endian counters since
//! 1970-01-01T00:00:00Z: [`DateTimeSec`] as 4 bytes of seconds,
//! [`DateTimeMsec`] as 8 bytes of milliseconds, and [`DateTimeUsec`] as 8
//! bytes of microseconds.
//!
//! The textual form is `YYYY-MM-DD HH:MM:SS[.fraction]` where the fraction
//! is exactly 3 digits for millisecond granularity, exactly 6 for
//! microsecond granularity, and absent for second granularity. Parsing
//! accepts a trailing `Z` and right-pads or truncates the fractional
//! digits to the type's granularity, discarding precision beyond it.

use crate::conv::len::FixedLength;
use crate::conv::{target::Target, Decode, Encode};
use crate::parse::error::ValueError;
use crate::parse::{ParseResult, Parser};
use std::fmt::Display;
use std::str::FromStr;
use time::format_description::FormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime};

const CIVIL_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// Parses the civil portion and optional fraction of a timestamp string,
/// returning whole seconds since the epoch and the fraction in
/// microseconds.
fn parse_civil(s: &str) -> Result<(u64, u64), ValueError> {
    let reject = || ValueError::Timestamp(s.to_owned());
    let trimmed = s.trim_end_matches('Z');
    let (civil, frac) = match trimmed.split_once('.') {
        Some((civil, frac)) => (civil, Some(frac)),
        None => (trimmed, None),
    };
    let dt = PrimitiveDateTime::parse(civil, &CIVIL_FORMAT).map_err(|_| reject())?;
    let secs = dt.assume_utc().unix_timestamp();
    if secs < 0 {
        return Err(reject());
    }
    let micros = match frac {
        None | Some("") => 0,
        Some(frac) => {
            if !frac.bytes().all(|b| b.is_ascii_digit()) {
                return Err(reject());
            }
            let mut digits: String = frac.chars().take(6).collect();
            while digits.len() < 6 {
                digits.push('0');
            }
            digits.parse::<u64>().map_err(|_| reject())?
        }
    };
    Ok((secs as u64, micros))
}

macro_rules! impl_timestamp {
    ( $( $(#[$meta:meta])* $name:ident : $raw:ty, $take:ident, $per_second:expr, $frac_digits:expr ; )+ ) => {
        $(
            $(#[$meta])*
            #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
            #[repr(transparent)]
            pub struct $name($raw);

            impl $name {
                /// Number of counter units per second of civil time.
                pub const PER_SECOND: u64 = $per_second;

                /// Constructs a timestamp from a raw counter value.
                pub const fn new(raw: $raw) -> Self {
                    Self(raw)
                }

                /// Returns the raw counter value.
                pub const fn raw(self) -> $raw {
                    self.0
                }

                /// Splits the counter into whole seconds and the
                /// sub-second remainder, both in counter units.
                fn split(self) -> (u64, u64) {
                    let raw = self.0 as u64;
                    (raw / Self::PER_SECOND, raw % Self::PER_SECOND)
                }

                fn to_civil(self) -> Option<OffsetDateTime> {
                    let (secs, _) = self.split();
                    let secs = i64::try_from(secs).ok()?;
                    OffsetDateTime::from_unix_timestamp(secs).ok()
                }
            }

            impl From<$raw> for $name {
                fn from(raw: $raw) -> Self {
                    Self(raw)
                }
            }

            impl From<$name> for $raw {
                fn from(ts: $name) -> Self {
                    ts.0
                }
            }

            impl Display for $name {
                /// Renders the civil textual form; counter values beyond
                /// the representable civil range fall back to the raw
                /// integer.
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    let rendered = self
                        .to_civil()
                        .and_then(|dt| dt.format(&CIVIL_FORMAT).ok());
                    match rendered {
                        Some(civil) => {
                            f.write_str(&civil)?;
                            if $frac_digits > 0 {
                                let (_, sub) = self.split();
                                write!(f, ".{:0width$}", sub, width = $frac_digits)?;
                            }
                            Ok(())
                        }
                        None => write!(f, "{}", self.0),
                    }
                }
            }

            impl FromStr for $name {
                type Err = ValueError;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    let (secs, micros) = parse_civil(s)?;
                    let raw = secs * Self::PER_SECOND
                        + micros / (1_000_000 / Self::PER_SECOND);
                    <$raw>::try_from(raw)
                        .map(Self)
                        .map_err(|_| ValueError::Timestamp(s.to_owned()))
                }
            }

            impl FixedLength for $name {
                const LEN: usize = std::mem::size_of::<$raw>();
            }

            impl Encode for $name {
                fn write_to<U: Target>(&self, buf: &mut U) -> usize {
                    buf.push_many(self.0.to_be_bytes())
                }
            }

            impl Decode for $name {
                #[inline]
                fn parse<P: Parser>(p: &mut P) -> ParseResult<Self> {
                    Ok(Self(p.$take()?))
                }
            }
        )+
    };
}

impl_timestamp! {
    /// Milliseconds since the epoch, serialized as 8 bytes.
    DateTimeMsec: u64, take_u64, 1_000, 3;
    /// Microseconds since the epoch, serialized as 8 bytes.
    DateTimeUsec: u64, take_u64, 1_000_000, 6;
    /// Whole seconds since the epoch, serialized as 4 bytes.
    DateTimeSec: u32, take_u32, 1, 0;
}
