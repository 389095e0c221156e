// Copyright 2025 Simo Sorce
// See LICENSE.txt file for terms

//! This module decodes the ECDH key derivation parameters and selects the
//! provider ECDH algorithm.

use crate::ec::*;
use crate::error::{contract_violation, Result};
use crate::mechanism::Mechanism;
use crate::object::Object;
use crate::serialargs::SerialArgs;

use log::{debug, error};

/// Public point format octets a client may send
const POINT_COMPRESSED_EVEN: u8 = 0x02;
const POINT_COMPRESSED_ODD: u8 = 0x03;
const POINT_UNCOMPRESSED: u8 = 0x04;

/// Decoded `CK_ECDH1_DERIVE_PARAMS`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EcdhParams {
    pub kdf: CK_EC_KDF_TYPE,
    /// The peer public point coordinates, without the format octet
    pub public_data: Vec<u8>,
}

impl EcdhParams {
    /// Splits the peer public point in the provider X and Y attributes
    /// for a key of `bits` bits
    pub fn peer_public_attrs(&self, bits: usize) -> Result<Vec<TeeAttribute>> {
        let psize = coordinate_size(bits);
        if self.public_data.len() != 2 * psize {
            error!(
                "Peer public point of {} bytes for a {} bits key",
                self.public_data.len(),
                bits
            );
            return Err(CKR_MECHANISM_PARAM_INVALID)?;
        }
        let (x, y) = self.public_data.split_at(psize);
        let mut attrs = Vec::new();
        attrs.try_reserve_exact(2)?;
        attrs.push(TeeAttribute::from_ref(
            TEE_ATTR_ECC_PUBLIC_VALUE_X,
            x.to_vec(),
        ));
        attrs.push(TeeAttribute::from_ref(
            TEE_ATTR_ECC_PUBLIC_VALUE_Y,
            y.to_vec(),
        ));
        Ok(attrs)
    }
}

/// Decodes the serialized ECDH derivation parameters: the KDF, the
/// shared data length (must be 0), then the length prefixed public data
/// holding an uncompressed point in short form.
pub fn pkcs2tee_param_ecdh(data: &[u8]) -> Result<EcdhParams> {
    let mut args = SerialArgs::new(data);

    let kdf = CK_EC_KDF_TYPE::from(args.get_u32()?);

    if args.get_u32()? != 0 {
        error!("ECDH shared data is not supported");
        return Err(CKR_MECHANISM_PARAM_INVALID)?;
    }

    let pub_size = args.get_u32()? as usize;
    if pub_size == 0 {
        error!("ECDH public data is empty");
        return Err(CKR_MECHANISM_PARAM_INVALID)?;
    }

    match args.get_u8()? {
        POINT_UNCOMPRESSED => (),
        POINT_COMPRESSED_EVEN | POINT_COMPRESSED_ODD => {
            error!("DER compressed public key format not yet supported");
            return Err(CKR_MECHANISM_PARAM_INVALID)?;
        }
        f => {
            error!("Invalid public point format {:#04x}", f);
            return Err(CKR_MECHANISM_PARAM_INVALID)?;
        }
    }

    let point_size = pub_size - 1;
    if point_size == 0 {
        error!("ECDH public point is empty");
        return Err(CKR_MECHANISM_PARAM_INVALID)?;
    }
    if point_size >= 0x80 {
        error!("DER long definitive form not yet supported");
        return Err(CKR_MECHANISM_PARAM_INVALID)?;
    }

    let point = args.get(point_size)?;
    args.finish()?;

    let mut public_data = Vec::new();
    public_data.try_reserve_exact(point_size)?;
    public_data.extend_from_slice(point);
    Ok(EcdhParams {
        kdf: kdf,
        public_data: public_data,
    })
}

/// ECDH algorithm for a key of `bits` bits
pub fn ecdh_algorithm(bits: usize) -> u32 {
    match bits {
        BITS_SECP192R1 => TEE_ALG_ECDH_P192,
        BITS_SECP224R1 => TEE_ALG_ECDH_P224,
        BITS_SECP256R1 => TEE_ALG_ECDH_P256,
        BITS_SECP384R1 => TEE_ALG_ECDH_P384,
        BITS_SECP521R1 => TEE_ALG_ECDH_P521,
        _ => contract_violation("unexpected EC key size"),
    }
}

/// Maps an ECDH derivation to the provider algorithm.
///
/// The parameters are fully validated, and only the null KDF is
/// supported.
pub fn pkcs2tee_algo_ecdh(mech: &Mechanism, key: &Object) -> Result<u32> {
    match mech.mechanism {
        CKM_ECDH1_DERIVE | CKM_ECDH1_COFACTOR_DERIVE => (),
        m => {
            error!("Not an ECDH mechanism: {:#x}", m);
            return Err(CKR_GENERAL_ERROR)?;
        }
    }

    let params = pkcs2tee_param_ecdh(&mech.params)?;
    if params.kdf != CKD_NULL {
        debug!("Only support CKD_NULL key derivation for ECDH");
        return Err(CKR_MECHANISM_PARAM_INVALID)?;
    }

    Ok(ecdh_algorithm(key.key_bit_size()))
}
