// Copyright 2025 Simo Sorce
// See LICENSE.txt file for terms

//! This module implements the translation of Weierstrass curve keys
//! (CKK_EC) between PKCS#11 objects and the key provider, the EC key pair
//! generation and the selection of the provider ECDSA algorithms.

use crate::attribute::Attribute;
use crate::ec::point::{decode_ec_point, encode_ec_point};
use crate::ec::*;
use crate::error::{contract_violation, Result};
use crate::mechanism::Mechanism;
use crate::object::Object;
use crate::pkcs11::vendor::ECTA_HIDDEN_EC_POINT;

use log::{debug, error};

/* Attributes generation produces, they can only be empty placeholders
 * in the caller templates */
const PUB_OUTPUTS: [CK_ATTRIBUTE_TYPE; 1] = [CKA_EC_POINT];
const PRIV_OUTPUTS: [CK_ATTRIBUTE_TYPE; 3] =
    [CKA_VALUE, CKA_EC_PARAMS, ECTA_HIDDEN_EC_POINT];

/// Builds the provider curve attribute from `CKA_EC_PARAMS`
fn load_curve_attr(obj: &Object) -> Option<TeeAttribute> {
    let params = obj.get_attr_as_bytes(CKA_EC_PARAMS).ok()?;
    match get_curve(params) {
        Some(c) if c.family == CurveFamily::Weierstrass => Some(
            TeeAttribute::from_value(TEE_ATTR_ECC_CURVE, c.tee_curve, 0),
        ),
        _ => None,
    }
}

/// Splits the point stored in `ck_type` into the provider X and Y
/// attributes
fn load_point_attrs(
    obj: &Object,
    bits: usize,
    ck_type: CK_ATTRIBUTE_TYPE,
) -> Option<(TeeAttribute, TeeAttribute)> {
    let der = match obj.get_attr(ck_type) {
        Some(a) if !a.is_empty() => a.get_value(),
        _ => return None,
    };
    let (x, y) = decode_ec_point(bits, der)?;
    Some((
        TeeAttribute::from_ref(TEE_ATTR_ECC_PUBLIC_VALUE_X, x.to_vec()),
        TeeAttribute::from_ref(TEE_ATTR_ECC_PUBLIC_VALUE_Y, y.to_vec()),
    ))
}

/// Builds the provider attributes needed to load an EC key object.
///
/// Public keys map to the curve and the X, Y coordinates. Private keys
/// map to the curve, the private value and the X, Y coordinates, which
/// are taken from the hidden point set at generation, or else from
/// `CKA_EC_POINT` for imported keys. All attributes must be found.
pub fn load_tee_ec_key_attrs(obj: &Object) -> Result<Vec<TeeAttribute>> {
    let class = check_key_object(obj, CKK_EC);
    let count = match class {
        CKO_PUBLIC_KEY => 3,
        _ => 4,
    };
    let bits = obj.key_bit_size();

    let mut attrs = Vec::new();
    attrs.try_reserve_exact(count)?;

    if let Some(a) = load_curve_attr(obj) {
        attrs.push(a);
    }

    let point = if class == CKO_PRIVATE_KEY {
        if let Some(a) =
            pkcs2tee_load_attr(obj, TEE_ATTR_ECC_PRIVATE_VALUE, CKA_VALUE)
        {
            attrs.push(a);
        }
        match load_point_attrs(obj, bits, ECTA_HIDDEN_EC_POINT) {
            Some(xy) => Some(xy),
            None => {
                debug!("No hidden EC point, trying CKA_EC_POINT");
                load_point_attrs(obj, bits, CKA_EC_POINT)
            }
        }
    } else {
        load_point_attrs(obj, bits, CKA_EC_POINT)
    };
    if let Some((x, y)) = point {
        attrs.push(x);
        attrs.push(y);
    }

    if attrs.len() != count {
        error!(
            "EC key object is missing attributes ({} of {} found)",
            attrs.len(),
            count
        );
        return Err(CKR_ATTRIBUTE_TYPE_INVALID)?;
    }
    Ok(attrs)
}

/// Reads the generated key from the provider object and returns the
/// attributes to add to the public and to the private key templates.
///
/// The same encoded point goes in the public key `CKA_EC_POINT` and in
/// the private key hidden point.
pub fn tee2pkcs_ec_attributes(
    tee_obj: &TransientObject,
    bits: usize,
) -> Result<(Vec<Attribute>, Vec<Attribute>)> {
    let mut value = tee_obj.get_buffer_attribute(TEE_ATTR_ECC_PRIVATE_VALUE)?;
    let x = tee_obj.get_buffer_attribute(TEE_ATTR_ECC_PUBLIC_VALUE_X)?;
    let y = tee_obj.get_buffer_attribute(TEE_ATTR_ECC_PUBLIC_VALUE_Y)?;

    let point = encode_ec_point(bits, &x, &y)?;

    let mut pub_attrs = Vec::new();
    pub_attrs.try_reserve_exact(1)?;
    let mut priv_attrs = Vec::new();
    priv_attrs.try_reserve_exact(3)?;

    priv_attrs.push(Attribute::from_bytes(
        CKA_VALUE,
        std::mem::take(&mut *value),
    ));
    priv_attrs.push(Attribute::from_bytes(ECTA_HIDDEN_EC_POINT, point.clone()));
    pub_attrs.push(Attribute::from_bytes(CKA_EC_POINT, point));
    Ok((pub_attrs, priv_attrs))
}

/// Generates an EC key pair on the provider and fills in the public and
/// private key templates.
///
/// Templates are modified only when every step succeeded.
pub fn generate_ec_keys(
    provider: &mut dyn KeyProvider,
    mech: &Mechanism,
    pubkey: &mut Object,
    privkey: &mut Object,
) -> Result<()> {
    if mech.mechanism != CKM_EC_KEY_PAIR_GEN {
        return Err(CKR_MECHANISM_INVALID)?;
    }

    check_generation_templates(pubkey, &PUB_OUTPUTS, privkey, &PRIV_OUTPUTS)?;

    let (curve, params) = generation_curve(pubkey, CurveFamily::Weierstrass)?;
    let tee_size = key_size_of(&params);
    let tee_curve = provider_curve_of(&params);
    let key_attrs =
        [TeeAttribute::from_value(TEE_ATTR_ECC_CURVE, tee_curve, 0)];

    /* An ECDSA keypair serves both ECDSA and ECDH mechanisms */
    let mut tee_obj = match TransientObject::allocate(
        provider,
        TEE_TYPE_ECDSA_KEYPAIR,
        tee_size as u32,
    ) {
        Ok(o) => o,
        Err(e) => {
            error!("Transient alloc failed with {}", e);
            return Err(e)?;
        }
    };

    tee_obj.restrict_usage(TEE_USAGE_EXTRACTABLE)?;
    tee_obj.generate_key(tee_size as u32, &key_attrs)?;

    let (pub_attrs, mut priv_attrs) =
        tee2pkcs_ec_attributes(&tee_obj, curve.bits)?;

    /* The private key has the same EC_PARAMS as the public key */
    priv_attrs.push(Attribute::from_bytes(CKA_EC_PARAMS, params));

    commit_key_pair(
        pubkey,
        (&PUB_OUTPUTS, pub_attrs),
        privkey,
        (&PRIV_OUTPUTS, priv_attrs),
    )
}

/// Raw ECDSA algorithm for a key of `bits` bits
pub fn ecdsa_raw_algorithm(bits: usize) -> u32 {
    match bits {
        BITS_SECP192R1 => TEE_ALG_ECDSA_P192,
        BITS_SECP224R1 => TEE_ALG_ECDSA_P224,
        BITS_SECP256R1 => TEE_ALG_ECDSA_P256,
        BITS_SECP384R1 => TEE_ALG_ECDSA_P384,
        BITS_SECP521R1 => TEE_ALG_ECDSA_P521,
        _ => contract_violation("unexpected EC key size"),
    }
}

/// Maps an ECDSA mechanism to the provider algorithm.
///
/// Raw ECDSA depends on the size of the signing key, which was checked
/// when the key object was created.
pub fn pkcs2tee_algo_ecdsa(mech: &Mechanism, key: &Object) -> Result<u32> {
    match mech.mechanism {
        CKM_ECDSA => Ok(ecdsa_raw_algorithm(key.key_bit_size())),
        CKM_ECDSA_SHA1 => Ok(TEE_ALG_ECDSA_SHA1),
        CKM_ECDSA_SHA224 => Ok(TEE_ALG_ECDSA_SHA224),
        CKM_ECDSA_SHA256 => Ok(TEE_ALG_ECDSA_SHA256),
        CKM_ECDSA_SHA384 => Ok(TEE_ALG_ECDSA_SHA384),
        CKM_ECDSA_SHA512 => Ok(TEE_ALG_ECDSA_SHA512),
        m => {
            error!("Not an ECDSA mechanism: {:#x}", m);
            Err(CKR_GENERAL_ERROR)?
        }
    }
}

/// Returns the size in bytes of the input the live ECDSA operation can
/// take, or 0 if the key size is unknown
pub fn ecdsa_get_input_max_byte_size(info: &OperationInfo) -> usize {
    match info.max_key_size as usize {
        BITS_SECP192R1 | BITS_SECP224R1 | BITS_SECP256R1 | BITS_SECP384R1
        | BITS_SECP521R1 => coordinate_size(info.max_key_size as usize),
        s => {
            debug!("Unexpected ECDSA key size {}", s);
            0
        }
    }
}
