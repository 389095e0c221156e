// Copyright 2025 Simo Sorce
// See LICENSE.txt file for terms

//! Codec for the `CKA_EC_POINT` value of Weierstrass curve keys: a DER
//! OCTET STRING holding an uncompressed SEC1 point with both coordinates
//! left padded to the curve coordinate size.

use crate::ec::coordinate_size;
use crate::error::{Error, Result};
use crate::pkcs11::*;

use asn1;
use log::error;

/// SEC1 uncompressed point format octet
pub const EC_POINT_UNCOMPRESSED: u8 = 0x04;

/// Payloads of this size or larger would need more than one length octet
const MAX_POINT_PAYLOAD: usize = 0x100;

/// Encodes the raw big endian coordinates as a DER OCTET STRING.
///
/// Coordinates may be shorter than the coordinate size of the curve (the
/// provider does not keep leading zeros), but never empty or longer.
pub fn encode_ec_point(bits: usize, x: &[u8], y: &[u8]) -> Result<Vec<u8>> {
    let psize = coordinate_size(bits);

    if x.is_empty() || y.is_empty() || x.len() > psize || y.len() > psize {
        error!(
            "Invalid coordinate sizes x: {}, y: {} for a {} bits curve",
            x.len(),
            y.len(),
            bits
        );
        return Err(CKR_GENERAL_ERROR)?;
    }

    let qsize = 1 + 2 * psize;
    if qsize >= MAX_POINT_PAYLOAD {
        error!("EC point of {} bytes can't be encoded", qsize);
        return Err(CKR_MECHANISM_PARAM_INVALID)?;
    }

    let mut payload = Vec::new();
    payload.try_reserve_exact(qsize)?;
    payload.push(EC_POINT_UNCOMPRESSED);
    payload.resize(1 + psize - x.len(), 0);
    payload.extend_from_slice(x);
    payload.resize(qsize - y.len(), 0);
    payload.extend_from_slice(y);

    /* [u8] is an octet string for the asn1 library */
    asn1::write_single(&payload.as_slice())
        .map_err(|_| Error::ck_rv(CKR_DEVICE_MEMORY))
}

/// Splits a DER encoded uncompressed point in its X and Y coordinates.
///
/// Returns None unless the payload is exactly one format octet followed
/// by two coordinates of the curve size.
pub fn decode_ec_point(bits: usize, der: &[u8]) -> Option<(&[u8], &[u8])> {
    let psize = coordinate_size(bits);
    let payload = match asn1::parse_single::<&[u8]>(der) {
        Ok(p) => p,
        Err(_) => {
            error!("EC point is not a DER octet string");
            return None;
        }
    };
    if payload.len() != 1 + 2 * psize {
        error!("Invalid EC point length {} for {} bits", payload.len(), bits);
        return None;
    }
    if payload[0] != EC_POINT_UNCOMPRESSED {
        error!("Unsupported EC point format {:#04x}", payload[0]);
        return None;
    }
    Some(payload[1..].split_at(psize))
}
