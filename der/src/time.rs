use std::fmt::{self, Display};

use chrono::NaiveDateTime;

use crate::Codable;
use crate::decode::DecodingContainer;
use crate::encode::EncodingContainer;
use crate::error::Error;
use crate::tag::{Tag, UniversalTag};

const UTC_TIME_FORMAT: &str = "%y%m%d%H%M%SZ";

/// UTCTime in the fixed `YYMMDDHHMMSSZ` form, always bound to UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct UtcTime {
    inner: NaiveDateTime,
}

impl UtcTime {
    pub fn new(time: NaiveDateTime) -> Self {
        UtcTime { inner: time }
    }

    pub fn time(&self) -> NaiveDateTime {
        self.inner
    }
}

impl From<NaiveDateTime> for UtcTime {
    fn from(time: NaiveDateTime) -> Self {
        UtcTime { inner: time }
    }
}

impl Codable for UtcTime {
    type Error = Error;

    fn matches(tag: Tag) -> bool {
        tag == Tag::Universal(UniversalTag::UtcTime)
    }

    fn decode(container: &mut DecodingContainer<'_>) -> Result<Self, Error> {
        let bytes = container.decode_bytes(Tag::Universal(UniversalTag::UtcTime))?;
        let text = std::str::from_utf8(bytes)
            .map_err(|e| Error::InvalidEncoding(e.to_string()))?;
        let inner = NaiveDateTime::parse_from_str(text, UTC_TIME_FORMAT)
            .map_err(|e| Error::InvalidEncoding(format!("malformed UTCTime '{}': {}", text, e)))?;
        Ok(UtcTime { inner })
    }

    fn encode(&self, container: &mut EncodingContainer) -> Result<(), Error> {
        let text = self.inner.format(UTC_TIME_FORMAT).to_string();
        container.encode_bytes(Tag::Universal(UniversalTag::UtcTime), text.as_bytes());
        Ok(())
    }
}

impl Display for UtcTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner.format(UTC_TIME_FORMAT))
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;
    use rstest::rstest;

    use crate::decode::DecodingContainer;
    use crate::encode::EncodingContainer;
    use crate::error::Error;

    use super::UtcTime;

    fn at(s: &str) -> UtcTime {
        UtcTime::new(NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap())
    }

    #[rstest(input, expected,
        case(b"\x17\x0d191216030210Z".to_vec(), at("2019-12-16 03:02:10")),
        case(b"\x17\x0d260807050136Z".to_vec(), at("2026-08-07 05:01:36")),
    )]
    fn test_utc_time_decode(input: Vec<u8>, expected: UtcTime) {
        let mut container = DecodingContainer::new(&input);
        assert_eq!(expected, container.decode::<UtcTime>().unwrap());
    }

    #[rstest(input,
        // truncated timestamp
        case(b"\x17\x0b1912160302Z".to_vec()),
        // missing the Z suffix
        case(b"\x17\x0c191216030210".to_vec()),
        // month out of range
        case(b"\x17\x0d191316030210Z".to_vec()),
    )]
    fn test_utc_time_decode_invalid(input: Vec<u8>) {
        let mut container = DecodingContainer::new(&input);
        assert!(matches!(
            container.decode::<UtcTime>(),
            Err(Error::InvalidEncoding(_))
        ));
    }

    #[rstest(input, case(at("2019-12-16 03:02:10")), case(at("2027-08-07 05:01:36")))]
    fn test_utc_time_round_trip(input: UtcTime) {
        let mut container = EncodingContainer::new();
        container.encode(&input).unwrap();
        let encoded = container.freeze();

        let mut container = DecodingContainer::new(&encoded);
        assert_eq!(input, container.decode::<UtcTime>().unwrap());
    }
}
