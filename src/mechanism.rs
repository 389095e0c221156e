// Copyright 2025 Simo Sorce
// See LICENSE.txt file for terms

//! This module defines the mechanism as received from the client, the
//! per operation processing state, and the entry points that dispatch
//! EC and EdDSA key operations to the key provider.

use crate::attribute::Attribute;
use crate::config::Config;
use crate::ec::ecdsa::{generate_ec_keys, load_tee_ec_key_attrs};
use crate::ec::get_curve;
use crate::error::Result;
use crate::object::Object;
use crate::pkcs11::*;

#[cfg(feature = "eddsa")]
use crate::ec::eddsa::{
    generate_eddsa_keys, load_tee_eddsa_key_attrs, EddsaContext,
};

use log::error;
use tee::*;

/// A mechanism and its serialized parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mechanism {
    pub mechanism: CK_MECHANISM_TYPE,
    pub params: Vec<u8>,
}

impl Mechanism {
    /// A mechanism without parameters
    pub fn new(mechanism: CK_MECHANISM_TYPE) -> Mechanism {
        Mechanism {
            mechanism: mechanism,
            params: Vec::new(),
        }
    }

    pub fn with_params(
        mechanism: CK_MECHANISM_TYPE,
        params: Vec<u8>,
    ) -> Mechanism {
        Mechanism {
            mechanism: mechanism,
            params: params,
        }
    }
}

/// State of an active operation, dropped when the operation concludes
#[derive(Debug)]
pub struct Processing {
    pub mechanism: CK_MECHANISM_TYPE,
    /// EdDSA parameters, set by `pkcs2tee_proc_params_eddsa`
    #[cfg(feature = "eddsa")]
    pub eddsa: Option<EddsaContext>,
}

impl Processing {
    pub fn new(mechanism: CK_MECHANISM_TYPE) -> Processing {
        Processing {
            mechanism: mechanism,
            #[cfg(feature = "eddsa")]
            eddsa: None,
        }
    }
}

/// Generates a key pair with the requested mechanism, on a curve the
/// configuration allows
pub fn generate_key_pair(
    provider: &mut dyn KeyProvider,
    config: &Config,
    mech: &Mechanism,
    pubkey: &mut Object,
    privkey: &mut Object,
) -> Result<()> {
    match mech.mechanism {
        CKM_EC_KEY_PAIR_GEN => (),
        #[cfg(feature = "eddsa")]
        CKM_EC_EDWARDS_KEY_PAIR_GEN => (),
        m => {
            error!("Unsupported key pair mechanism {:#x}", m);
            return Err(CKR_MECHANISM_INVALID)?;
        }
    }

    if let Some(a) = pubkey.get_attr(CKA_EC_PARAMS) {
        if let Some(curve) = get_curve(a.get_value()) {
            if !config.curve_allowed(curve) {
                error!("Curve {} is disabled by configuration", curve.label);
                return Err(CKR_CURVE_NOT_SUPPORTED)?;
            }
        }
    }

    match mech.mechanism {
        #[cfg(feature = "eddsa")]
        CKM_EC_EDWARDS_KEY_PAIR_GEN => {
            generate_eddsa_keys(provider, mech, pubkey, privkey)?
        }
        _ => generate_ec_keys(provider, mech, pubkey, privkey)?,
    }

    for key in [pubkey, privkey] {
        key.set_attr(Attribute::from_bool(CKA_LOCAL, true))?;
        key.set_attr(Attribute::from_ulong(
            CKA_KEY_GEN_MECHANISM,
            mech.mechanism,
        ))?;
    }
    Ok(())
}

/// Returns the provider object type used to run `mechanism` with a key
/// of the given class and key type
fn tee_object_type(
    mechanism: CK_MECHANISM_TYPE,
    class: CK_OBJECT_CLASS,
    key_type: CK_KEY_TYPE,
) -> Result<u32> {
    let private = class == CKO_PRIVATE_KEY;
    let (expected, obj_type) = match mechanism {
        CKM_ECDSA | CKM_ECDSA_SHA1 | CKM_ECDSA_SHA224 | CKM_ECDSA_SHA256
        | CKM_ECDSA_SHA384 | CKM_ECDSA_SHA512 => (
            CKK_EC,
            if private {
                TEE_TYPE_ECDSA_KEYPAIR
            } else {
                TEE_TYPE_ECDSA_PUBLIC_KEY
            },
        ),
        #[cfg(feature = "ecdh")]
        CKM_ECDH1_DERIVE | CKM_ECDH1_COFACTOR_DERIVE => {
            /* the peer public key comes with the mechanism parameters */
            if !private {
                return Err(CKR_KEY_TYPE_INCONSISTENT)?;
            }
            (CKK_EC, TEE_TYPE_ECDH_KEYPAIR)
        }
        #[cfg(feature = "eddsa")]
        CKM_EDDSA => (
            CKK_EC_EDWARDS,
            if private {
                TEE_TYPE_ED25519_KEYPAIR
            } else {
                TEE_TYPE_ED25519_PUBLIC_KEY
            },
        ),
        m => {
            error!("Unsupported mechanism {:#x}", m);
            return Err(CKR_MECHANISM_INVALID)?;
        }
    };
    if key_type != expected {
        error!(
            "Key type {:#x} can't be used with mechanism {:#x}",
            key_type, mechanism
        );
        return Err(CKR_KEY_TYPE_INCONSISTENT)?;
    }
    Ok(obj_type)
}

/// Loads a key object in a new provider object, ready to run `mech`
pub fn load_tee_key<'a>(
    provider: &'a mut dyn KeyProvider,
    mech: &Mechanism,
    key: &Object,
) -> Result<TransientObject<'a>> {
    let class = key.get_class();
    if class != CKO_PUBLIC_KEY && class != CKO_PRIVATE_KEY {
        return Err(CKR_KEY_TYPE_INCONSISTENT)?;
    }
    let key_type = match key.get_key_type() {
        Ok(kt) => kt,
        Err(_) => return Err(CKR_KEY_TYPE_INCONSISTENT)?,
    };
    let obj_type = tee_object_type(mech.mechanism, class, key_type)?;

    let bits = key.key_bit_size();
    if bits == 0 {
        error!("Key object has no supported EC_PARAMS");
        return Err(CKR_ATTRIBUTE_TYPE_INVALID)?;
    }

    let attrs = match key_type {
        #[cfg(feature = "eddsa")]
        CKK_EC_EDWARDS => load_tee_eddsa_key_attrs(key)?,
        _ => load_tee_ec_key_attrs(key)?,
    };

    let mut tee_obj =
        TransientObject::allocate(provider, obj_type, bits as u32)?;
    tee_obj.populate(attrs)?;
    Ok(tee_obj)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_types() {
        assert_eq!(
            tee_object_type(CKM_ECDSA_SHA256, CKO_PUBLIC_KEY, CKK_EC).unwrap(),
            TEE_TYPE_ECDSA_PUBLIC_KEY
        );
        assert_eq!(
            tee_object_type(CKM_ECDSA, CKO_PRIVATE_KEY, CKK_EC).unwrap(),
            TEE_TYPE_ECDSA_KEYPAIR
        );
        let err = tee_object_type(CKM_ECDSA, CKO_PRIVATE_KEY, CKK_EC_EDWARDS)
            .unwrap_err();
        assert_eq!(err.rv(), CKR_KEY_TYPE_INCONSISTENT);
        let err = tee_object_type(CKM_EC_KEY_PAIR_GEN, CKO_PRIVATE_KEY, CKK_EC)
            .unwrap_err();
        assert_eq!(err.rv(), CKR_MECHANISM_INVALID);
    }

    #[cfg(feature = "ecdh")]
    #[test]
    fn ecdh_object_types() {
        assert_eq!(
            tee_object_type(CKM_ECDH1_DERIVE, CKO_PRIVATE_KEY, CKK_EC)
                .unwrap(),
            TEE_TYPE_ECDH_KEYPAIR
        );
        let err = tee_object_type(CKM_ECDH1_DERIVE, CKO_PUBLIC_KEY, CKK_EC)
            .unwrap_err();
        assert_eq!(err.rv(), CKR_KEY_TYPE_INCONSISTENT);
    }

    #[cfg(feature = "eddsa")]
    #[test]
    fn eddsa_object_types() {
        assert_eq!(
            tee_object_type(CKM_EDDSA, CKO_PUBLIC_KEY, CKK_EC_EDWARDS)
                .unwrap(),
            TEE_TYPE_ED25519_PUBLIC_KEY
        );
        let err = tee_object_type(CKM_EDDSA, CKO_PRIVATE_KEY, CKK_EC)
            .unwrap_err();
        assert_eq!(err.rv(), CKR_KEY_TYPE_INCONSISTENT);
    }

    #[test]
    fn processing_state() {
        let proc = Processing::new(CKM_ECDSA);
        assert_eq!(proc.mechanism, CKM_ECDSA);
        #[cfg(feature = "eddsa")]
        assert!(proc.eddsa.is_none());
    }
}
