// Copyright 2025 Simo Sorce
// See LICENSE.txt file for terms

//! This module implements the translation of Edwards curve keys
//! (CKK_EC_EDWARDS) between PKCS#11 objects and the key provider, the
//! Ed25519 key pair generation and the EdDSA parameters decoding.

use crate::attribute::Attribute;
use crate::ec::*;
use crate::error::{contract_violation, Result};
use crate::mechanism::{Mechanism, Processing};
use crate::object::Object;
use crate::serialargs::SerialArgs;

use log::{debug, error};

const PUB_OUTPUTS: [CK_ATTRIBUTE_TYPE; 1] = [CKA_EC_POINT];
const PRIV_OUTPUTS: [CK_ATTRIBUTE_TYPE; 3] =
    [CKA_VALUE, CKA_EC_POINT, CKA_EC_PARAMS];

/// Longest context allowed for Ed25519ctx and Ed25519ph (RFC 8032 §5.1)
pub const EDDSA_MAX_CONTEXT_LEN: usize = 255;

const ED25519_POINT_LEN: usize = 32;

/// EdDSA signature parameters kept for the duration of an operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EddsaContext {
    /// Non zero selects the prehash variant (Ed25519ph)
    pub flag: u32,
    pub context: Vec<u8>,
}

/// Loads the Ed25519 public value, accepting also the DER encoded
/// form some applications store in `CKA_EC_POINT`
fn load_public_value(obj: &Object) -> Option<TeeAttribute> {
    let point = match obj.get_attr(CKA_EC_POINT) {
        Some(a) if !a.is_empty() => a.get_value(),
        _ => return None,
    };
    let raw = match point.len() {
        ED25519_POINT_LEN => point.as_slice(),
        l if l == ED25519_POINT_LEN + 2 => {
            match asn1::parse_single::<&[u8]>(point) {
                Ok(r) if r.len() == ED25519_POINT_LEN => r,
                _ => return None,
            }
        }
        l => {
            debug!("Unexpected Ed25519 point length {}", l);
            return None;
        }
    };
    Some(TeeAttribute::from_ref(
        TEE_ATTR_ED25519_PUBLIC_VALUE,
        raw.to_vec(),
    ))
}

/// Builds the provider attributes needed to load an Edwards key object:
/// the public value for public keys, the private and public values for
/// private keys. All attributes must be found.
pub fn load_tee_eddsa_key_attrs(obj: &Object) -> Result<Vec<TeeAttribute>> {
    let class = check_key_object(obj, CKK_EC_EDWARDS);
    let count = match class {
        CKO_PUBLIC_KEY => 1,
        _ => 2,
    };

    let mut attrs = Vec::new();
    attrs.try_reserve_exact(count)?;

    if class == CKO_PRIVATE_KEY {
        if let Some(a) =
            pkcs2tee_load_attr(obj, TEE_ATTR_ED25519_PRIVATE_VALUE, CKA_VALUE)
        {
            attrs.push(a);
        }
    }
    if let Some(a) = load_public_value(obj) {
        attrs.push(a);
    }

    if attrs.len() != count {
        error!(
            "EdDSA key object is missing attributes ({} of {} found)",
            attrs.len(),
            count
        );
        return Err(CKR_ATTRIBUTE_TYPE_INVALID)?;
    }
    Ok(attrs)
}

/// Generates an Ed25519 key pair on the provider and fills in the public
/// and private key templates.
///
/// Templates are modified only when every step succeeded.
pub fn generate_eddsa_keys(
    provider: &mut dyn KeyProvider,
    mech: &Mechanism,
    pubkey: &mut Object,
    privkey: &mut Object,
) -> Result<()> {
    if mech.mechanism != CKM_EC_EDWARDS_KEY_PAIR_GEN {
        return Err(CKR_MECHANISM_INVALID)?;
    }

    check_generation_templates(pubkey, &PUB_OUTPUTS, privkey, &PRIV_OUTPUTS)?;

    let (_, params) = generation_curve(pubkey, CurveFamily::Edwards)?;
    let tee_size = key_size_of(&params) as u32;

    let mut tee_obj = match TransientObject::allocate(
        provider,
        TEE_TYPE_ED25519_KEYPAIR,
        tee_size,
    ) {
        Ok(o) => o,
        Err(e) => {
            error!("Transient alloc failed with {}", e);
            return Err(e)?;
        }
    };

    tee_obj.restrict_usage(TEE_USAGE_EXTRACTABLE)?;
    tee_obj.generate_key(tee_size, &[])?;

    let mut value =
        tee_obj.get_buffer_attribute(TEE_ATTR_ED25519_PRIVATE_VALUE)?;
    let public = tee_obj.get_buffer_attribute(TEE_ATTR_ED25519_PUBLIC_VALUE)?;

    let mut priv_attrs = Vec::new();
    priv_attrs.try_reserve_exact(3)?;
    priv_attrs.push(Attribute::from_bytes(CKA_EC_PARAMS, params));
    priv_attrs.push(Attribute::from_bytes(
        CKA_VALUE,
        std::mem::take(&mut *value),
    ));
    priv_attrs.push(Attribute::from_bytes(CKA_EC_POINT, public.to_vec()));

    let mut pub_attrs = Vec::new();
    pub_attrs.try_reserve_exact(1)?;
    pub_attrs.push(Attribute::from_bytes(CKA_EC_POINT, public.to_vec()));

    commit_key_pair(
        pubkey,
        (&PUB_OUTPUTS, pub_attrs),
        privkey,
        (&PRIV_OUTPUTS, priv_attrs),
    )
}

/// Decodes the serialized EdDSA parameters (flag, context length and
/// context) and stores them in the active processing state.
///
/// Parameters are optional for CKM_EDDSA, without them no context is set.
/// Contexts longer than [EDDSA_MAX_CONTEXT_LEN] are rejected.
pub fn pkcs2tee_proc_params_eddsa(
    proc: &mut Processing,
    mech: &Mechanism,
) -> Result<()> {
    if mech.params.is_empty() {
        proc.eddsa = None;
        return Ok(());
    }

    let mut args = SerialArgs::new(&mech.params);
    let flag = args.get_u32()?;
    let ctx_len = args.get_u32()? as usize;
    if ctx_len > EDDSA_MAX_CONTEXT_LEN {
        error!("EdDSA context too long ({} bytes)", ctx_len);
        return Err(CKR_MECHANISM_PARAM_INVALID)?;
    }
    let ctx_data = args.get(ctx_len)?;
    args.finish()?;

    let mut context = Vec::new();
    context.try_reserve_exact(ctx_len)?;
    context.extend_from_slice(ctx_data);
    proc.eddsa = Some(EddsaContext {
        flag: flag,
        context: context,
    });
    Ok(())
}

/// Maps an EdDSA mechanism to the provider algorithm
pub fn pkcs2tee_algo_eddsa(mech: &Mechanism, key: &Object) -> Result<u32> {
    if mech.mechanism != CKM_EDDSA {
        error!("Not an EdDSA mechanism: {:#x}", mech.mechanism);
        return Err(CKR_GENERAL_ERROR)?;
    }
    match key.key_bit_size() {
        BITS_ED25519 => Ok(TEE_ALG_ED25519),
        _ => contract_violation("unexpected EdDSA key size"),
    }
}
