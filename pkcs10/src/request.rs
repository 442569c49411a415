use der::{BitString, Codable, DecodingContainer, EncodingContainer, Tag, UniversalTag};
use x509::{
    AlgorithmIdentifier, BasicConstraints, Extension, KeyUsage, Name, SubjectPublicKeyInfo,
    Verifier,
};

use crate::attribute::Attribute;
use crate::error::Error;
use crate::oid;

/*
RFC 2986 Section 4
CertificationRequestInfo ::= SEQUENCE {
    version       INTEGER { v1(0) } (v1,...),
    subject       Name,
    subjectPKInfo SubjectPublicKeyInfo{{ PKInfoAlgorithms }},
    attributes    [0] Attributes{{ CRIAttributes }}
}
*/

/// The signed portion of a certification request.
///
/// Like TBSCertificate, a decoded value keeps its raw encoding and replays
/// it on encode so the signed range survives unchanged. When building a
/// request, the desired certificate extensions are given declaratively
/// through [`request_basic_constraints`](Self::request_basic_constraints) /
/// [`request_key_usage`](Self::request_key_usage); encoding synthesizes a
/// single extensionRequest attribute wrapping them.
#[derive(Debug, Clone)]
pub struct CertificationRequestInfo {
    pub subject: Name,
    pub subject_public_key_info: SubjectPublicKeyInfo,
    attributes: Option<Vec<Attribute>>,
    basic_constraints: Option<BasicConstraints>,
    key_usage: Option<KeyUsage>,
    raw: Option<Vec<u8>>,
}

impl CertificationRequestInfo {
    pub fn new(subject: Name, subject_public_key_info: SubjectPublicKeyInfo) -> Self {
        CertificationRequestInfo {
            subject,
            subject_public_key_info,
            attributes: None,
            basic_constraints: None,
            key_usage: None,
            raw: None,
        }
    }

    /// The only version RFC 2986 defines.
    pub fn version(&self) -> u64 {
        0
    }

    pub fn attributes(&self) -> Option<&[Attribute]> {
        self.attributes.as_deref()
    }

    pub fn set_attributes(&mut self, attributes: Vec<Attribute>) {
        self.attributes = Some(attributes);
    }

    pub fn basic_constraints(&self) -> Option<&BasicConstraints> {
        self.basic_constraints.as_ref()
    }

    pub fn key_usage(&self) -> Option<&KeyUsage> {
        self.key_usage.as_ref()
    }

    /// Ask the issuer for a basicConstraints extension.
    pub fn request_basic_constraints(&mut self, constraints: BasicConstraints) {
        self.basic_constraints = Some(constraints);
    }

    /// Ask the issuer for a keyUsage extension.
    pub fn request_key_usage(&mut self, usage: KeyUsage) {
        self.key_usage = Some(usage);
    }

    /// Requested extensions carried by an extensionRequest attribute: a run
    /// of Extension values in the attribute's SET content.
    fn scan_extension_request(&mut self, values: &[u8]) -> Result<(), Error> {
        let mut container = DecodingContainer::new(values);
        while !container.at_end() {
            let extension = container.decode::<Extension>()?;
            if extension.id == x509::oid::EXTN_BASIC_CONSTRAINTS {
                self.basic_constraints = Some(extension.typed::<BasicConstraints>()?);
            } else if extension.id == x509::oid::EXTN_KEY_USAGE {
                self.key_usage = Some(extension.typed::<KeyUsage>()?);
            }
        }
        Ok(())
    }

    fn encode_extension_request(&self) -> Result<Vec<u8>, Error> {
        let mut content = EncodingContainer::new();
        if let Some(constraints) = &self.basic_constraints {
            let extension =
                Extension::of(x509::oid::EXTN_BASIC_CONSTRAINTS, constraints, true)?;
            content.encode(&extension)?;
        }
        if let Some(usage) = &self.key_usage {
            let extension = Extension::of(x509::oid::EXTN_KEY_USAGE, usage, true)?;
            content.encode(&extension)?;
        }
        Ok(content.freeze())
    }
}

impl PartialEq for CertificationRequestInfo {
    fn eq(&self, other: &Self) -> bool {
        self.subject == other.subject
            && self.subject_public_key_info == other.subject_public_key_info
            && self.attributes == other.attributes
            && self.basic_constraints == other.basic_constraints
            && self.key_usage == other.key_usage
    }
}

impl Eq for CertificationRequestInfo {}

impl Codable for CertificationRequestInfo {
    type Error = Error;

    fn matches(tag: Tag) -> bool {
        tag == Tag::Universal(UniversalTag::Sequence)
    }

    fn decode(container: &mut DecodingContainer<'_>) -> Result<Self, Error> {
        let mut seq = container.sequence()?;
        let version = seq.decode_u64_if_present()?.unwrap_or(0);
        let subject = seq.decode::<Name>()?;
        let subject_public_key_info = seq.decode::<SubjectPublicKeyInfo>()?;
        let attributes = match seq.context_container_if_present(0, false)? {
            Some(mut ctx) => {
                if ctx.at_end() {
                    None
                } else {
                    Some(ctx.decode_list::<Attribute>()?)
                }
            }
            None => None,
        };
        seq.assert_at_end()?;
        if version != 0 {
            return Err(Error::UnsupportedVersion(version));
        }

        let mut info = CertificationRequestInfo {
            subject,
            subject_public_key_info,
            attributes,
            basic_constraints: None,
            key_usage: None,
            raw: Some(seq.bytes().to_vec()),
        };
        if let Some(attributes) = info.attributes.clone() {
            for attribute in &attributes {
                if attribute.kind == oid::PKCS9_EXTENSION_REQUEST {
                    info.scan_extension_request(&attribute.values)?;
                }
            }
        }
        Ok(info)
    }

    fn encode(&self, container: &mut EncodingContainer) -> Result<(), Error> {
        if let Some(raw) = &self.raw {
            container.encode_raw(raw);
            return Ok(());
        }

        let seq = container.sequence();
        seq.encode_u64(self.version());
        seq.encode(&self.subject)?;
        seq.encode(&self.subject_public_key_info)?;

        let mut content = EncodingContainer::new();
        let request = self.encode_extension_request()?;
        if !request.is_empty() {
            content.encode(&Attribute::new(oid::PKCS9_EXTENSION_REQUEST, request))?;
        }
        if let Some(attributes) = &self.attributes {
            content.encode_list(attributes)?;
        }
        let content = content.freeze();
        // the [0] wrapper is omitted entirely when there is nothing to carry
        if !content.is_empty() {
            let ctx = seq.context_container(0, false);
            ctx.encode_raw(&content);
        }
        Ok(())
    }
}

/*
CertificationRequest ::= SEQUENCE {
    certificationRequestInfo CertificationRequestInfo,
    signatureAlgorithm AlgorithmIdentifier{{ SignatureAlgorithms }},
    signature          BIT STRING
}
*/

/// A signed PKCS#10 certification request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificationRequest {
    certification_request_info: CertificationRequestInfo,
    signature_algorithm: AlgorithmIdentifier,
    signature: BitString,
}

impl CertificationRequest {
    pub fn new(
        certification_request_info: CertificationRequestInfo,
        signature_algorithm: AlgorithmIdentifier,
        signature: BitString,
    ) -> Self {
        CertificationRequest {
            certification_request_info,
            signature_algorithm,
            signature,
        }
    }

    pub fn certification_request_info(&self) -> &CertificationRequestInfo {
        &self.certification_request_info
    }

    pub fn signature_algorithm(&self) -> &AlgorithmIdentifier {
        &self.signature_algorithm
    }

    pub fn signature(&self) -> &BitString {
        &self.signature
    }

    /// Decode a complete DER request; anything after it is an error.
    pub fn from_der(bytes: &[u8]) -> Result<CertificationRequest, Error> {
        let mut container = DecodingContainer::new(bytes);
        let request = container.decode::<CertificationRequest>()?;
        container.assert_at_end()?;
        Ok(request)
    }

    pub fn to_der(&self) -> Result<Vec<u8>, Error> {
        let mut container = EncodingContainer::new();
        container.encode(self)?;
        Ok(container.freeze())
    }

    /// The exact byte range the requester's signature covers.
    pub fn info_bytes(&self) -> Result<Vec<u8>, Error> {
        let mut container = EncodingContainer::new();
        container.encode(&self.certification_request_info)?;
        Ok(container.freeze())
    }

    /// Check the embedded signature over the request info bytes.
    pub fn verify_signature<V: Verifier>(&self, verifier: &V) -> Result<bool, Error> {
        Ok(verifier.verify(&self.info_bytes()?, self.signature.as_bytes())?)
    }
}

impl Codable for CertificationRequest {
    type Error = Error;

    fn matches(tag: Tag) -> bool {
        tag == Tag::Universal(UniversalTag::Sequence)
    }

    fn decode(container: &mut DecodingContainer<'_>) -> Result<Self, Error> {
        let mut seq = container.sequence()?;
        let certification_request_info = seq.decode::<CertificationRequestInfo>()?;
        let signature_algorithm = seq.decode::<AlgorithmIdentifier>()?;
        let signature = seq.decode::<BitString>()?;
        seq.assert_at_end()?;

        Ok(CertificationRequest {
            certification_request_info,
            signature_algorithm,
            signature,
        })
    }

    fn encode(&self, container: &mut EncodingContainer) -> Result<(), Error> {
        let seq = container.sequence();
        seq.encode(&self.certification_request_info)?;
        seq.encode(&self.signature_algorithm)?;
        seq.encode(&self.signature)?;
        Ok(())
    }
}
