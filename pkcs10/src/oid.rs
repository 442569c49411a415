//! PKCS#9 attribute identifiers used in certification requests (RFC 2985).

use der::Oid;

pub const PKCS9_CHALLENGE_PASSWORD: Oid = Oid::from_static(&[1, 2, 840, 113549, 1, 9, 7]);
pub const PKCS9_EXTENSION_REQUEST: Oid = Oid::from_static(&[1, 2, 840, 113549, 1, 9, 14]);
