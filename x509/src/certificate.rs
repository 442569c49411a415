use der::{
    BitString, Codable, DecodingContainer, EncodingContainer, Tag, UniversalTag, UnsignedInteger,
};

use crate::algorithm::AlgorithmIdentifier;
use crate::error::Error;
use crate::extensions::{BasicConstraints, ExtendedKeyUsage, Extension, KeyUsage};
use crate::name::Name;
use crate::oid;
use crate::provider::{Digester, Verifier};
use crate::subject_public_key_info::SubjectPublicKeyInfo;
use crate::validity::Validity;

/*
RFC 5280 Section 4.1
TBSCertificate  ::=  SEQUENCE  {
     version         [0]  EXPLICIT Version DEFAULT v1,
     serialNumber         CertificateSerialNumber,
     signature            AlgorithmIdentifier,
     issuer               Name,
     validity             Validity,
     subject              Name,
     subjectPublicKeyInfo SubjectPublicKeyInfo,
     issuerUniqueID  [1]  IMPLICIT UniqueIdentifier OPTIONAL,
     subjectUniqueID [2]  IMPLICIT UniqueIdentifier OPTIONAL,
     extensions      [3]  EXPLICIT Extensions OPTIONAL
}

Version  ::=  INTEGER  {  v1(0), v2(1), v3(2)  }
Extensions  ::=  SEQUENCE SIZE (1..MAX) OF Extension
*/

/// The signed portion of a certificate.
///
/// A decoded value keeps its exact raw encoding and replays it on encode:
/// the issuer's signature was computed over those bytes, so they must
/// survive a decode/inspect/re-encode cycle unchanged.
#[derive(Debug, Clone)]
pub struct TBSCertificate {
    pub version: Option<u64>,
    pub serial_number: UnsignedInteger,
    pub signature: AlgorithmIdentifier,
    pub issuer: Name,
    pub validity: Validity,
    pub subject: Name,
    pub subject_public_key_info: SubjectPublicKeyInfo,
    pub issuer_unique_id: Option<BitString>,
    pub subject_unique_id: Option<BitString>,
    extensions: Option<Vec<Extension>>,
    basic_constraints: Option<BasicConstraints>,
    key_usage: Option<KeyUsage>,
    extended_key_usage: Option<ExtendedKeyUsage>,
    raw: Option<Vec<u8>>,
}

impl TBSCertificate {
    pub fn new(
        serial_number: UnsignedInteger,
        signature: AlgorithmIdentifier,
        issuer: Name,
        validity: Validity,
        subject: Name,
        subject_public_key_info: SubjectPublicKeyInfo,
    ) -> Self {
        TBSCertificate {
            version: None,
            serial_number,
            signature,
            issuer,
            validity,
            subject,
            subject_public_key_info,
            issuer_unique_id: None,
            subject_unique_id: None,
            extensions: None,
            basic_constraints: None,
            key_usage: None,
            extended_key_usage: None,
            raw: None,
        }
    }

    /// Attach the extension list, lifting the well-known typed payloads.
    /// Fails when a recognized extension carries a malformed payload.
    pub fn set_extensions(&mut self, extensions: Vec<Extension>) -> Result<(), Error> {
        let typed = scan_extensions(&extensions, false)?;
        self.basic_constraints = typed.basic_constraints;
        self.key_usage = typed.key_usage;
        self.extended_key_usage = typed.extended_key_usage;
        self.extensions = Some(extensions);
        Ok(())
    }

    pub fn extensions(&self) -> Option<&[Extension]> {
        self.extensions.as_deref()
    }

    pub fn basic_constraints(&self) -> Option<&BasicConstraints> {
        self.basic_constraints.as_ref()
    }

    pub fn key_usage(&self) -> Option<&KeyUsage> {
        self.key_usage.as_ref()
    }

    pub fn extended_key_usage(&self) -> Option<&ExtendedKeyUsage> {
        self.extended_key_usage.as_ref()
    }

    /// The semantic version: an absent field means v1. Stored values are
    /// v1(0), v2(1), v3(2).
    pub fn effective_version(&self) -> u64 {
        self.version.unwrap_or(0)
    }
}

// Equality is structural over the certificate fields; the raw cache is a
// decode artifact.
impl PartialEq for TBSCertificate {
    fn eq(&self, other: &Self) -> bool {
        self.version == other.version
            && self.serial_number == other.serial_number
            && self.signature == other.signature
            && self.issuer == other.issuer
            && self.validity == other.validity
            && self.subject == other.subject
            && self.subject_public_key_info == other.subject_public_key_info
            && self.issuer_unique_id == other.issuer_unique_id
            && self.subject_unique_id == other.subject_unique_id
            && self.extensions == other.extensions
    }
}

impl Eq for TBSCertificate {}

struct ScannedExtensions {
    basic_constraints: Option<BasicConstraints>,
    key_usage: Option<KeyUsage>,
    extended_key_usage: Option<ExtendedKeyUsage>,
}

/// Lift the three well-known extension payloads into typed form. With
/// `reject_unrecognized_critical` set (the decode-side policy), any other
/// extension marked critical aborts the scan; a critical extension must
/// never be silently ignored.
fn scan_extensions(
    extensions: &[Extension],
    reject_unrecognized_critical: bool,
) -> Result<ScannedExtensions, Error> {
    let mut scanned = ScannedExtensions {
        basic_constraints: None,
        key_usage: None,
        extended_key_usage: None,
    };

    for extension in extensions {
        if extension.id == oid::EXTN_BASIC_CONSTRAINTS {
            scanned.basic_constraints = Some(extension.typed::<BasicConstraints>()?);
        } else if extension.id == oid::EXTN_KEY_USAGE {
            scanned.key_usage = Some(extension.typed::<KeyUsage>()?);
        } else if extension.id == oid::EXTN_EXTENDED_KEY_USAGE {
            scanned.extended_key_usage = Some(extension.typed::<ExtendedKeyUsage>()?);
        } else if extension.critical && reject_unrecognized_critical {
            return Err(Error::DisallowedCriticalExtension(extension.id.clone()));
        }
    }

    Ok(scanned)
}

impl Codable for TBSCertificate {
    type Error = Error;

    fn matches(tag: Tag) -> bool {
        tag == Tag::Universal(UniversalTag::Sequence)
    }

    fn decode(container: &mut DecodingContainer<'_>) -> Result<Self, Error> {
        let mut seq = container.sequence()?;

        let version = match seq.context_container_if_present(0, false)? {
            Some(mut ctx) => {
                let version = ctx.decode_u64()?;
                ctx.assert_at_end()?;
                if version > 2 {
                    return Err(Error::InvalidVersion(version));
                }
                Some(version)
            }
            None => None,
        };
        let serial_number = seq.decode::<UnsignedInteger>()?;
        let signature = seq.decode::<AlgorithmIdentifier>()?;
        let issuer = seq.decode::<Name>()?;
        let validity = seq.decode::<Validity>()?;
        let subject = seq.decode::<Name>()?;
        let subject_public_key_info = seq.decode::<SubjectPublicKeyInfo>()?;

        let issuer_unique_id = match seq.context_container_if_present(1, false)? {
            Some(mut ctx) => {
                let id = ctx.decode::<BitString>()?;
                ctx.assert_at_end()?;
                Some(id)
            }
            None => None,
        };
        let subject_unique_id = match seq.context_container_if_present(2, false)? {
            Some(mut ctx) => {
                let id = ctx.decode::<BitString>()?;
                ctx.assert_at_end()?;
                Some(id)
            }
            None => None,
        };
        let extensions = match seq.context_container_if_present(3, false)? {
            Some(mut ctx) => {
                let mut list = ctx.sequence()?;
                let extensions = list.decode_list::<Extension>()?;
                ctx.assert_at_end()?;
                Some(extensions)
            }
            None => None,
        };
        seq.assert_at_end()?;

        let scanned = match &extensions {
            Some(extensions) => scan_extensions(extensions, true)?,
            None => scan_extensions(&[], true)?,
        };

        Ok(TBSCertificate {
            version,
            serial_number,
            signature,
            issuer,
            validity,
            subject,
            subject_public_key_info,
            issuer_unique_id,
            subject_unique_id,
            extensions,
            basic_constraints: scanned.basic_constraints,
            key_usage: scanned.key_usage,
            extended_key_usage: scanned.extended_key_usage,
            raw: Some(seq.bytes().to_vec()),
        })
    }

    fn encode(&self, container: &mut EncodingContainer) -> Result<(), Error> {
        if let Some(raw) = &self.raw {
            container.encode_raw(raw);
            return Ok(());
        }

        let seq = container.sequence();
        if let Some(version) = self.version {
            let ctx = seq.context_container(0, false);
            ctx.encode_u64(version);
        }
        seq.encode(&self.serial_number)?;
        seq.encode(&self.signature)?;
        seq.encode(&self.issuer)?;
        seq.encode(&self.validity)?;
        seq.encode(&self.subject)?;
        seq.encode(&self.subject_public_key_info)?;
        if let Some(id) = &self.issuer_unique_id {
            let ctx = seq.context_container(1, false);
            ctx.encode(id)?;
        }
        if let Some(id) = &self.subject_unique_id {
            let ctx = seq.context_container(2, false);
            ctx.encode(id)?;
        }
        if let Some(extensions) = &self.extensions {
            let ctx = seq.context_container(3, false);
            let list = ctx.sequence();
            list.encode_list(extensions)?;
        }
        Ok(())
    }
}

/*
Certificate  ::=  SEQUENCE  {
    tbsCertificate       TBSCertificate,
    signatureAlgorithm   AlgorithmIdentifier,
    signatureValue       BIT STRING
}
*/

/// A signed X.509 certificate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Certificate {
    tbs_certificate: TBSCertificate,
    signature_algorithm: AlgorithmIdentifier,
    signature: BitString,
}

impl Certificate {
    pub fn new(
        tbs_certificate: TBSCertificate,
        signature_algorithm: AlgorithmIdentifier,
        signature: BitString,
    ) -> Self {
        Certificate {
            tbs_certificate,
            signature_algorithm,
            signature,
        }
    }

    pub fn tbs_certificate(&self) -> &TBSCertificate {
        &self.tbs_certificate
    }

    pub fn signature_algorithm(&self) -> &AlgorithmIdentifier {
        &self.signature_algorithm
    }

    pub fn signature(&self) -> &BitString {
        &self.signature
    }

    /// Decode a complete DER certificate; anything after it is an error.
    pub fn from_der(bytes: &[u8]) -> Result<Certificate, Error> {
        let mut container = DecodingContainer::new(bytes);
        let certificate = container.decode::<Certificate>()?;
        container.assert_at_end()?;
        Ok(certificate)
    }

    pub fn to_der(&self) -> Result<Vec<u8>, Error> {
        let mut container = EncodingContainer::new();
        container.encode(self)?;
        Ok(container.freeze())
    }

    /// The exact byte range the issuer's signature covers.
    pub fn tbs_bytes(&self) -> Result<Vec<u8>, Error> {
        let mut container = EncodingContainer::new();
        container.encode(&self.tbs_certificate)?;
        Ok(container.freeze())
    }

    /// Digest of the full DER encoding under the provider's algorithm.
    pub fn fingerprint<D: Digester>(&self, digester: &D) -> Result<Vec<u8>, Error> {
        Ok(digester.digest(&self.to_der()?))
    }

    /// Check the embedded signature over the to-be-signed bytes.
    pub fn verify_signature<V: Verifier>(&self, verifier: &V) -> Result<bool, Error> {
        Ok(verifier.verify(&self.tbs_bytes()?, self.signature.as_bytes())?)
    }
}

impl Codable for Certificate {
    type Error = Error;

    fn matches(tag: Tag) -> bool {
        tag == Tag::Universal(UniversalTag::Sequence)
    }

    fn decode(container: &mut DecodingContainer<'_>) -> Result<Self, Error> {
        let mut seq = container.sequence()?;
        let tbs_certificate = seq.decode::<TBSCertificate>()?;
        let signature_algorithm = seq.decode::<AlgorithmIdentifier>()?;
        let signature = seq.decode::<BitString>()?;
        seq.assert_at_end()?;

        Ok(Certificate {
            tbs_certificate,
            signature_algorithm,
            signature,
        })
    }

    fn encode(&self, container: &mut EncodingContainer) -> Result<(), Error> {
        let seq = container.sequence();
        seq.encode(&self.tbs_certificate)?;
        seq.encode(&self.signature_algorithm)?;
        seq.encode(&self.signature)?;
        Ok(())
    }
}
