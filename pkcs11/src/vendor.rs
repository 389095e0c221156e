// Copyright 2025 Simo Sorce
// See LICENSE.txt file for terms

//! PKCS#11 API Vendor extensions

use crate::*;

pub const ECT_VENDOR_OFFSET: CK_ULONG = CKA_VENDOR_DEFINED + 0x7ee0000;

/* Attributes */

/// DER encoded public point stored on EC private keys.
///
/// The standard does not define CKA_EC_POINT on EC private keys, but the
/// secure provider needs the public coordinates to load a key pair, so
/// generated private keys carry it under this internal attribute.
pub const ECTA_HIDDEN_EC_POINT: CK_ATTRIBUTE_TYPE = ECT_VENDOR_OFFSET + 1;

/* Errors */
pub const ECTR_CONFIG_ERROR: CK_RV = ECT_VENDOR_OFFSET + 1;
