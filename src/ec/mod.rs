// Copyright 2025 Simo Sorce
// See LICENSE.txt file for terms

//! This module provides the curve registry and the helpers shared by the
//! ECDSA, ECDH and EdDSA key translation code.
//!
//! A curve is identified from the raw `CKA_EC_PARAMS` bytes by an exact
//! match against the encodings registered for it in [params].

use crate::attribute::Attribute;
use crate::error::{contract_violation, Result};
use crate::object::Object;
use crate::pkcs11::*;

use log::{debug, error};
use tee::*;

pub mod params;
pub mod point;

pub mod ecdsa;

#[cfg(feature = "ecdh")]
pub mod ecdh;

#[cfg(feature = "eddsa")]
pub mod eddsa;

use params::*;

/* Bit sizes for curves */
pub const BITS_SECP192R1: usize = 192;
pub const BITS_SECP224R1: usize = 224;
pub const BITS_SECP256R1: usize = 256;
pub const BITS_SECP384R1: usize = 384;
pub const BITS_SECP521R1: usize = 521;
pub const BITS_ED25519: usize = 256;

/// The curve model, which selects the key pair type used on the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveFamily {
    /// Short Weierstrass curves (CKK_EC)
    Weierstrass,
    /// Twisted Edwards curves (CKK_EC_EDWARDS)
    Edwards,
}

/// Static description of a supported curve
#[derive(Debug)]
pub struct CurveDescriptor {
    /// Display label, also used in the configuration file
    pub label: &'static str,
    /// DER encoded named curve OID
    pub oid_der: &'static [u8],
    /// DER encoded explicit domain parameters
    pub explicit_der: Option<&'static [u8]>,
    /// DER encoded PrintableString curve name (Edwards curves only)
    pub name_der: Option<&'static [u8]>,
    /// Size of the curve in bits
    pub bits: usize,
    /// Provider curve identifier (TEE_ECC_CURVE_*)
    pub tee_curve: u32,
    pub family: CurveFamily,
}

impl CurveDescriptor {
    /// Whether `params` is exactly one of the encodings of this curve
    fn matches(&self, params: &[u8]) -> bool {
        let candidates = [Some(self.oid_der), self.explicit_der, self.name_der];
        candidates
            .iter()
            .flatten()
            .any(|enc| enc.len() == params.len() && *enc == params)
    }

    /// Size in bytes of a coordinate or a scalar on this curve
    pub fn coordinate_size(&self) -> usize {
        coordinate_size(self.bits)
    }
}

/// The registry, scanned in order, first match wins
static CURVES: [CurveDescriptor; 6] = [
    CurveDescriptor {
        label: "prime192v1",
        oid_der: &P192_OID_DER,
        explicit_der: Some(&P192_EXPLICIT_DER),
        name_der: None,
        bits: BITS_SECP192R1,
        tee_curve: TEE_ECC_CURVE_NIST_P192,
        family: CurveFamily::Weierstrass,
    },
    CurveDescriptor {
        label: "secp224r1",
        oid_der: &P224_OID_DER,
        explicit_der: Some(&P224_EXPLICIT_DER),
        name_der: None,
        bits: BITS_SECP224R1,
        tee_curve: TEE_ECC_CURVE_NIST_P224,
        family: CurveFamily::Weierstrass,
    },
    CurveDescriptor {
        label: "prime256v1",
        oid_der: &P256_OID_DER,
        explicit_der: Some(&P256_EXPLICIT_DER),
        name_der: None,
        bits: BITS_SECP256R1,
        tee_curve: TEE_ECC_CURVE_NIST_P256,
        family: CurveFamily::Weierstrass,
    },
    CurveDescriptor {
        label: "secp384r1",
        oid_der: &P384_OID_DER,
        explicit_der: Some(&P384_EXPLICIT_DER),
        name_der: None,
        bits: BITS_SECP384R1,
        tee_curve: TEE_ECC_CURVE_NIST_P384,
        family: CurveFamily::Weierstrass,
    },
    CurveDescriptor {
        label: "secp521r1",
        oid_der: &P521_OID_DER,
        explicit_der: Some(&P521_EXPLICIT_DER),
        name_der: None,
        bits: BITS_SECP521R1,
        tee_curve: TEE_ECC_CURVE_NIST_P521,
        family: CurveFamily::Weierstrass,
    },
    CurveDescriptor {
        label: "ed25519",
        oid_der: &ED25519_OID_DER,
        explicit_der: None,
        name_der: Some(&ED25519_NAME_DER),
        bits: BITS_ED25519,
        tee_curve: TEE_ECC_CURVE_25519,
        family: CurveFamily::Edwards,
    },
];

/// Returns the registered curve matching the `CKA_EC_PARAMS` bytes
pub fn get_curve(params: &[u8]) -> Option<&'static CurveDescriptor> {
    CURVES.iter().find(|c| c.matches(params))
}

/// Returns the key size in bits for the curve designated by `params`,
/// or 0 if the encoding is not recognized
pub fn key_size_of(params: &[u8]) -> usize {
    match get_curve(params) {
        Some(c) => c.bits,
        None => 0,
    }
}

/// Returns the provider curve identifier for `params`.
///
/// The caller must have checked the encoding with [key_size_of] first.
pub fn provider_curve_of(params: &[u8]) -> u32 {
    match get_curve(params) {
        Some(c) => c.tee_curve,
        None => contract_violation("EC parameters not in the curve registry"),
    }
}

/// Finds a curve by its display label
pub fn curve_by_label(label: &str) -> Option<&'static CurveDescriptor> {
    CURVES.iter().find(|c| c.label == label)
}

/// Size in bytes needed to hold a value of `bits` bits
pub fn coordinate_size(bits: usize) -> usize {
    (bits + 7) / 8
}

/// Copies a buffer attribute of the key object into a provider attribute.
///
/// Returns None if the attribute is absent or empty.
pub(crate) fn pkcs2tee_load_attr(
    obj: &Object,
    tee_id: u32,
    ck_type: CK_ATTRIBUTE_TYPE,
) -> Option<TeeAttribute> {
    match obj.get_attr(ck_type) {
        Some(a) if !a.is_empty() => {
            Some(TeeAttribute::from_ref(tee_id, a.get_value().clone()))
        }
        _ => {
            debug!("Attribute {:#x} missing on the key object", ck_type);
            None
        }
    }
}

/// Checks that the key object handed to a loader has the expected key
/// type and is a public or private key, returns the object class
pub(crate) fn check_key_object(
    obj: &Object,
    key_type: CK_KEY_TYPE,
) -> CK_OBJECT_CLASS {
    match obj.get_key_type() {
        Ok(kt) if kt == key_type => (),
        _ => contract_violation("key object has an unexpected key type"),
    }
    match obj.get_class() {
        CKO_PUBLIC_KEY | CKO_PRIVATE_KEY => obj.get_class(),
        _ => contract_violation("key object is not a public or private key"),
    }
}

/// Checks that none of the attributes produced by key pair generation is
/// already set on the templates
pub(crate) fn check_generation_templates(
    pubkey: &Object,
    pub_outputs: &[CK_ATTRIBUTE_TYPE],
    privkey: &Object,
    priv_outputs: &[CK_ATTRIBUTE_TYPE],
) -> Result<()> {
    let pub_set = pub_outputs.iter().any(|t| pubkey.has_nonempty_attr(*t));
    let priv_set = priv_outputs.iter().any(|t| privkey.has_nonempty_attr(*t));
    if pub_set || priv_set {
        error!("Unexpected attribute(s) found");
        pubkey.trace_dump("public-key");
        privkey.trace_dump("private-key");
        return Err(CKR_TEMPLATE_INCONSISTENT)?;
    }
    Ok(())
}

/// Resolves the curve from the public key template `CKA_EC_PARAMS`,
/// and checks it belongs to the requested family
pub(crate) fn generation_curve(
    pubkey: &Object,
    family: CurveFamily,
) -> Result<(&'static CurveDescriptor, Vec<u8>)> {
    let params = match pubkey.get_attr(CKA_EC_PARAMS) {
        Some(a) if !a.is_empty() => a.get_value(),
        _ => {
            error!("No EC_PARAMS attribute found in public key");
            return Err(CKR_ATTRIBUTE_TYPE_INVALID)?;
        }
    };
    let curve = match get_curve(params) {
        Some(c) => c,
        None => {
            error!("Unsupported EC_PARAMS in public key");
            return Err(CKR_ATTRIBUTE_TYPE_INVALID)?;
        }
    };
    if curve.family != family {
        error!("Curve {} can't be used for this key pair type", curve.label);
        return Err(CKR_ATTRIBUTE_TYPE_INVALID)?;
    }
    let mut copy = Vec::new();
    copy.try_reserve_exact(params.len())?;
    copy.extend_from_slice(params);
    Ok((curve, copy))
}

/// Applies the staged generation outputs to both templates.
///
/// Both templates are checked before either is modified.
pub(crate) fn commit_key_pair(
    pubkey: &mut Object,
    pub_outputs: (&[CK_ATTRIBUTE_TYPE], Vec<Attribute>),
    privkey: &mut Object,
    priv_outputs: (&[CK_ATTRIBUTE_TYPE], Vec<Attribute>),
) -> Result<()> {
    pubkey.check_commit(pub_outputs.0, &pub_outputs.1)?;
    privkey.check_commit(priv_outputs.0, &priv_outputs.1)?;
    pubkey.commit(pub_outputs.0, pub_outputs.1)?;
    privkey.commit(priv_outputs.0, priv_outputs.1)
}
