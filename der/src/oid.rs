use std::borrow::Cow;
use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::Codable;
use crate::decode::DecodingContainer;
use crate::encode::EncodingContainer;
use crate::error::Error;
use crate::tag::{Tag, UniversalTag};

/*
OBJECT IDENTIFIER content octets (X.690 8.19): the first two arcs share one
byte as 40 * arc0 + arc1; every later arc is a big-endian base-128 group
where the high bit of each byte marks continuation.
*/

/// ASN.1 Object Identifier: an ordered sequence of at least two arcs.
///
/// Well-known identifiers are built over static arc tables so they can live
/// in `const` registries; equality and hashing are structural over the arcs
/// either way.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Oid {
    arcs: Cow<'static, [u64]>,
}

impl Oid {
    pub const fn from_static(arcs: &'static [u64]) -> Self {
        Oid {
            arcs: Cow::Borrowed(arcs),
        }
    }

    pub fn new(arcs: Vec<u64>) -> Self {
        Oid {
            arcs: Cow::Owned(arcs),
        }
    }

    pub fn arcs(&self) -> &[u64] {
        &self.arcs
    }

    /// A new identifier extending this one by a single arc.
    pub fn child(&self, arc: u64) -> Oid {
        let mut arcs = self.arcs.to_vec();
        arcs.push(arc);
        Oid::new(arcs)
    }
}

impl Codable for Oid {
    type Error = Error;

    fn matches(tag: Tag) -> bool {
        tag == Tag::Universal(UniversalTag::ObjectIdentifier)
    }

    fn decode(container: &mut DecodingContainer<'_>) -> Result<Self, Error> {
        let bytes = container.decode_bytes(Tag::Universal(UniversalTag::ObjectIdentifier))?;
        let first = *bytes.first().ok_or_else(|| {
            Error::InvalidEncoding("object identifier content is empty".to_string())
        })?;
        if first >= 120 {
            return Err(Error::InvalidEncoding(
                "object identifier root arc must be 0, 1 or 2".to_string(),
            ));
        }

        let mut arcs = vec![u64::from(first / 40), u64::from(first % 40)];
        let mut arc = 0u64;
        let mut pending = false;
        for &byte in &bytes[1..] {
            arc = (arc << 7) | u64::from(byte & 0x7f);
            if byte & 0x80 == 0 {
                arcs.push(arc);
                arc = 0;
                pending = false;
            } else {
                pending = true;
            }
        }
        if pending {
            return Err(Error::InvalidEncoding(
                "unterminated object identifier arc".to_string(),
            ));
        }

        Ok(Oid::new(arcs))
    }

    fn encode(&self, container: &mut EncodingContainer) -> Result<(), Error> {
        let arcs = self.arcs();
        if arcs.len() < 2 {
            return Err(Error::InvalidEncoding(format!(
                "object identifier {} needs at least two arcs",
                self
            )));
        }
        if arcs[0] > 2 || (arcs[0] < 2 && arcs[1] >= 40) || arcs[0] * 40 + arcs[1] > 0xff {
            return Err(Error::InvalidEncoding(format!(
                "object identifier {} has an invalid root",
                self
            )));
        }

        let mut content = vec![(arcs[0] * 40 + arcs[1]) as u8];
        for &arc in &arcs[2..] {
            let mut fragment = vec![(arc & 0x7f) as u8];
            let mut rest = arc >> 7;
            while rest > 0 {
                fragment.push((rest & 0x7f | 0x80) as u8);
                rest >>= 7;
            }
            content.extend(fragment.iter().rev());
        }

        container.encode_bytes(Tag::Universal(UniversalTag::ObjectIdentifier), &content);
        Ok(())
    }
}

impl Display for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self.arcs.first() {
            Some(n) => self.arcs[1..]
                .iter()
                .fold(n.to_string(), |s, n| s + "." + &n.to_string()),
            None => String::new(),
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Oid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let arcs = s
            .split('.')
            .map(|arc| {
                arc.parse::<u64>()
                    .map_err(|e| Error::InvalidEncoding(format!("invalid OID arc '{}': {}", arc, e)))
            })
            .collect::<Result<Vec<u64>, Error>>()?;
        Ok(Oid::new(arcs))
    }
}

impl Serialize for Oid {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Oid {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Oid::from_str(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use rstest::rstest;

    use crate::decode::DecodingContainer;
    use crate::encode::EncodingContainer;
    use crate::error::Error;

    use super::Oid;

    #[rstest(input, expected,
        case(vec![0x06, 0x03, 0x55, 0x04, 0x03], Oid::from_static(&[2, 5, 4, 3])),
        case(vec![0x06, 0x01, 0x2a], Oid::from_static(&[1, 2])),
        case(vec![0x06, 0x06, 0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d], Oid::from_static(&[1, 2, 840, 113549])),
        case(
            vec![0x06, 0x09, 0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x01, 0x0b],
            Oid::from_static(&[1, 2, 840, 113549, 1, 1, 11])
        ),
        case(
            vec![0x06, 0x0a, 0x09, 0x92, 0x26, 0x89, 0x93, 0xf2, 0x2c, 0x64, 0x01, 0x01],
            Oid::from_static(&[0, 9, 2342, 19200300, 100, 1, 1])
        ),
    )]
    fn test_oid_decode(input: Vec<u8>, expected: Oid) {
        let mut container = DecodingContainer::new(&input);
        let actual = container.decode::<Oid>().unwrap();
        assert_eq!(expected, actual);
        container.assert_at_end().unwrap();
    }

    #[rstest(input, expected,
        case(Oid::from_static(&[2, 5, 4, 3]), vec![0x06, 0x03, 0x55, 0x04, 0x03]),
        case(Oid::from_static(&[1, 2]), vec![0x06, 0x01, 0x2a]),
        case(Oid::from_static(&[1, 2, 840, 113549]), vec![0x06, 0x06, 0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d]),
        case(
            Oid::from_static(&[0, 9, 2342, 19200300, 100, 1, 1]),
            vec![0x06, 0x0a, 0x09, 0x92, 0x26, 0x89, 0x93, 0xf2, 0x2c, 0x64, 0x01, 0x01]
        ),
    )]
    fn test_oid_encode(input: Oid, expected: Vec<u8>) {
        let mut container = EncodingContainer::new();
        container.encode(&input).unwrap();
        assert_eq!(expected, container.freeze());
    }

    #[rstest(input,
        // empty content
        case(vec![0x06, 0x00]),
        // dangling continuation bit
        case(vec![0x06, 0x02, 0x2a, 0x86]),
        // root arc out of range
        case(vec![0x06, 0x01, 0x78]),
    )]
    fn test_oid_decode_invalid(input: Vec<u8>) {
        let mut container = DecodingContainer::new(&input);
        assert!(matches!(
            container.decode::<Oid>(),
            Err(Error::InvalidEncoding(_))
        ));
    }

    #[rstest(input,
        case(Oid::new(vec![2])),
        case(Oid::new(vec![3, 1])),
        case(Oid::new(vec![1, 40])),
    )]
    fn test_oid_encode_invalid(input: Oid) {
        let mut container = EncodingContainer::new();
        assert!(matches!(
            container.encode(&input),
            Err(Error::InvalidEncoding(_))
        ));
    }

    #[rstest(input, expected, case("2.5.4.3", Oid::from_static(&[2, 5, 4, 3])), case("1.2.840.113549.1.9.14", Oid::from_static(&[1, 2, 840, 113549, 1, 9, 14])))]
    fn test_oid_from_str(input: &str, expected: Oid) {
        assert_eq!(expected, Oid::from_str(input).unwrap());
        assert_eq!(input, expected.to_string());
    }

    #[test]
    fn test_oid_serialize() {
        let oid = Oid::from_static(&[1, 2, 840, 113549, 1, 1, 11]);
        let json = serde_json::to_string(&oid).unwrap();
        assert_eq!(r#""1.2.840.113549.1.1.11""#, json);

        let back: Oid = serde_json::from_str(&json).unwrap();
        assert_eq!(oid, back);
    }

    #[test]
    fn test_oid_child() {
        let base = Oid::from_static(&[2, 5, 29]);
        assert_eq!(Oid::from_static(&[2, 5, 29, 19]), base.child(19));
    }
}
