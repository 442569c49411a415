//! Well-known object identifiers: X.520 attribute types, X.509 extension
//! ids and the PKCS#1 algorithm family. All constants, initialized once,
//! never mutated.

use der::Oid;

// X.520 id-at attribute types (2.5.4)
pub const X520_COMMON_NAME: Oid = Oid::from_static(&[2, 5, 4, 3]);
pub const X520_COUNTRY_NAME: Oid = Oid::from_static(&[2, 5, 4, 6]);
pub const X520_LOCALITY_NAME: Oid = Oid::from_static(&[2, 5, 4, 7]);
pub const X520_STATE_OR_PROVINCE_NAME: Oid = Oid::from_static(&[2, 5, 4, 8]);
pub const X520_ORGANIZATION_NAME: Oid = Oid::from_static(&[2, 5, 4, 10]);
pub const X520_ORGANIZATIONAL_UNIT_NAME: Oid = Oid::from_static(&[2, 5, 4, 11]);

// PKCS#9 emailAddress, allowed in Name per RFC 5280 appendix A
pub const PKCS9_EMAIL_ADDRESS: Oid = Oid::from_static(&[1, 2, 840, 113549, 1, 9, 1]);

// X.509 id-ce extensions (2.5.29)
pub const EXTN_SUBJECT_KEY_IDENTIFIER: Oid = Oid::from_static(&[2, 5, 29, 14]);
pub const EXTN_KEY_USAGE: Oid = Oid::from_static(&[2, 5, 29, 15]);
pub const EXTN_BASIC_CONSTRAINTS: Oid = Oid::from_static(&[2, 5, 29, 19]);
pub const EXTN_AUTHORITY_KEY_IDENTIFIER: Oid = Oid::from_static(&[2, 5, 29, 35]);
pub const EXTN_EXTENDED_KEY_USAGE: Oid = Oid::from_static(&[2, 5, 29, 37]);

// PKCS#1 algorithm identifiers (1.2.840.113549.1.1)
pub const PKCS1_RSA_ENCRYPTION: Oid = Oid::from_static(&[1, 2, 840, 113549, 1, 1, 1]);
pub const PKCS1_MD5_WITH_RSA_ENCRYPTION: Oid = Oid::from_static(&[1, 2, 840, 113549, 1, 1, 4]);
pub const PKCS1_SHA1_WITH_RSA_ENCRYPTION: Oid = Oid::from_static(&[1, 2, 840, 113549, 1, 1, 5]);
pub const PKCS1_SHA256_WITH_RSA_ENCRYPTION: Oid = Oid::from_static(&[1, 2, 840, 113549, 1, 1, 11]);
pub const PKCS1_SHA384_WITH_RSA_ENCRYPTION: Oid = Oid::from_static(&[1, 2, 840, 113549, 1, 1, 12]);
pub const PKCS1_SHA512_WITH_RSA_ENCRYPTION: Oid = Oid::from_static(&[1, 2, 840, 113549, 1, 1, 13]);
