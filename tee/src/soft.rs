// Copyright 2025 Simo Sorce
// See LICENSE.txt file for terms

//! This module provides a software implementation of the [KeyProvider]
//! interface. Key material lives in process memory and is zeroized when
//! objects are closed.
//!
//! Buffer attributes are returned the way a TEE returns big numbers: the
//! Weierstrass coordinates and scalars are stripped of leading zero bytes,
//! so callers must pad them back to the field size.

use std::collections::HashMap;

use crate::*;

use elliptic_curve::sec1::ToEncodedPoint;
use log::error;
use rand_core::OsRng;
use zeroize::Zeroizing;

#[derive(Debug)]
struct SoftObject {
    obj_type: u32,
    max_key_size: u32,
    usage: u32,
    initialized: bool,
    attrs: Vec<TeeAttribute>,
}

impl SoftObject {
    fn get(&self, id: u32) -> Option<&TeeAttribute> {
        self.attrs.iter().find(|a| a.id() == id)
    }
}

/// In memory key provider
#[derive(Debug)]
pub struct SoftProvider {
    objects: HashMap<u32, SoftObject>,
    next_handle: u32,
}

fn weierstrass_curve_size(curve: u32) -> Option<u32> {
    match curve {
        TEE_ECC_CURVE_NIST_P192 => Some(192),
        TEE_ECC_CURVE_NIST_P224 => Some(224),
        TEE_ECC_CURVE_NIST_P256 => Some(256),
        TEE_ECC_CURVE_NIST_P384 => Some(384),
        TEE_ECC_CURVE_NIST_P521 => Some(521),
        _ => None,
    }
}

fn is_weierstrass_type(obj_type: u32) -> bool {
    match obj_type {
        TEE_TYPE_ECDSA_PUBLIC_KEY
        | TEE_TYPE_ECDSA_KEYPAIR
        | TEE_TYPE_ECDH_PUBLIC_KEY
        | TEE_TYPE_ECDH_KEYPAIR => true,
        _ => false,
    }
}

fn is_edwards_type(obj_type: u32) -> bool {
    match obj_type {
        TEE_TYPE_ED25519_PUBLIC_KEY | TEE_TYPE_ED25519_KEYPAIR => true,
        _ => false,
    }
}

fn is_keypair_type(obj_type: u32) -> bool {
    match obj_type {
        TEE_TYPE_ECDSA_KEYPAIR
        | TEE_TYPE_ECDH_KEYPAIR
        | TEE_TYPE_ED25519_KEYPAIR => true,
        _ => false,
    }
}

/// The attributes a fully populated object of this type must carry
fn required_attrs(obj_type: u32) -> &'static [u32] {
    match obj_type {
        TEE_TYPE_ECDSA_PUBLIC_KEY | TEE_TYPE_ECDH_PUBLIC_KEY => &[
            TEE_ATTR_ECC_CURVE,
            TEE_ATTR_ECC_PUBLIC_VALUE_X,
            TEE_ATTR_ECC_PUBLIC_VALUE_Y,
        ],
        TEE_TYPE_ECDSA_KEYPAIR | TEE_TYPE_ECDH_KEYPAIR => &[
            TEE_ATTR_ECC_CURVE,
            TEE_ATTR_ECC_PRIVATE_VALUE,
            TEE_ATTR_ECC_PUBLIC_VALUE_X,
            TEE_ATTR_ECC_PUBLIC_VALUE_Y,
        ],
        TEE_TYPE_ED25519_PUBLIC_KEY => &[TEE_ATTR_ED25519_PUBLIC_VALUE],
        TEE_TYPE_ED25519_KEYPAIR => &[
            TEE_ATTR_ED25519_PRIVATE_VALUE,
            TEE_ATTR_ED25519_PUBLIC_VALUE,
        ],
        _ => &[],
    }
}

/// Strips leading zeros like a big number export does, keeping at least
/// one byte
fn bignum_bytes(buf: &[u8]) -> Vec<u8> {
    match buf.iter().position(|b| *b != 0) {
        Some(idx) => buf[idx..].to_vec(),
        None => vec![0],
    }
}

macro_rules! nist_keypair {
    ($curve:ty) => {{
        let secret = elliptic_curve::SecretKey::<$curve>::random(&mut OsRng);
        let point = secret.public_key().to_encoded_point(false);
        match (point.x(), point.y()) {
            (Some(x), Some(y)) => (
                Zeroizing::new(bignum_bytes(&secret.to_bytes())),
                bignum_bytes(x),
                bignum_bytes(y),
            ),
            _ => {
                return Err(Error::with_msg(
                    ErrorKind::Generic,
                    "generated point is the identity".to_string(),
                ))
            }
        }
    }};
}

fn generate_weierstrass(curve: u32) -> Result<Vec<TeeAttribute>, Error> {
    let (d, x, y) = match curve {
        TEE_ECC_CURVE_NIST_P192 => nist_keypair!(p192::NistP192),
        TEE_ECC_CURVE_NIST_P224 => nist_keypair!(p224::NistP224),
        TEE_ECC_CURVE_NIST_P256 => nist_keypair!(p256::NistP256),
        TEE_ECC_CURVE_NIST_P384 => nist_keypair!(p384::NistP384),
        TEE_ECC_CURVE_NIST_P521 => nist_keypair!(p521::NistP521),
        _ => return Err(Error::new(ErrorKind::NotSupported)),
    };
    Ok(vec![
        TeeAttribute::from_value(TEE_ATTR_ECC_CURVE, curve, 0),
        TeeAttribute::from_ref(TEE_ATTR_ECC_PRIVATE_VALUE, d.to_vec()),
        TeeAttribute::from_ref(TEE_ATTR_ECC_PUBLIC_VALUE_X, x),
        TeeAttribute::from_ref(TEE_ATTR_ECC_PUBLIC_VALUE_Y, y),
    ])
}

fn generate_ed25519() -> Vec<TeeAttribute> {
    let key = ed25519_dalek::SigningKey::generate(&mut OsRng);
    let private = Zeroizing::new(key.to_bytes());
    vec![
        TeeAttribute::from_ref(
            TEE_ATTR_ED25519_PRIVATE_VALUE,
            private.to_vec(),
        ),
        TeeAttribute::from_ref(
            TEE_ATTR_ED25519_PUBLIC_VALUE,
            key.verifying_key().to_bytes().to_vec(),
        ),
    ]
}

impl SoftProvider {
    pub fn new() -> SoftProvider {
        SoftProvider {
            objects: HashMap::new(),
            next_handle: 1,
        }
    }

    /// Number of objects allocated and not yet closed
    pub fn open_objects(&self) -> usize {
        self.objects.len()
    }

    fn object(&self, handle: ObjectHandle) -> Result<&SoftObject, Error> {
        match self.objects.get(&handle.0) {
            Some(obj) => Ok(obj),
            None => {
                error!("Unknown object handle {}", handle.0);
                Err(Error::new(ErrorKind::BadParameters))
            }
        }
    }

    fn object_mut(
        &mut self,
        handle: ObjectHandle,
    ) -> Result<&mut SoftObject, Error> {
        match self.objects.get_mut(&handle.0) {
            Some(obj) => Ok(obj),
            None => {
                error!("Unknown object handle {}", handle.0);
                Err(Error::new(ErrorKind::BadParameters))
            }
        }
    }
}

impl Default for SoftProvider {
    fn default() -> SoftProvider {
        SoftProvider::new()
    }
}

impl KeyProvider for SoftProvider {
    fn allocate_transient_object(
        &mut self,
        obj_type: u32,
        max_key_size: u32,
    ) -> Result<ObjectHandle, Error> {
        let supported = if is_weierstrass_type(obj_type) {
            match max_key_size {
                192 | 224 | 256 | 384 | 521 => true,
                _ => false,
            }
        } else if is_edwards_type(obj_type) {
            max_key_size == 256
        } else {
            false
        };
        if !supported {
            error!(
                "Unsupported object type {:#010x} of size {}",
                obj_type, max_key_size
            );
            return Err(Error::new(ErrorKind::NotSupported));
        }

        let handle = self.next_handle;
        self.next_handle = match self.next_handle.checked_add(1) {
            Some(h) => h,
            None => return Err(Error::new(ErrorKind::OutOfMemory)),
        };
        self.objects.insert(
            handle,
            SoftObject {
                obj_type: obj_type,
                max_key_size: max_key_size,
                usage: TEE_USAGE_DEFAULT,
                initialized: false,
                attrs: Vec::new(),
            },
        );
        Ok(ObjectHandle(handle))
    }

    fn restrict_object_usage(
        &mut self,
        handle: ObjectHandle,
        usage: u32,
    ) -> Result<(), Error> {
        let obj = self.object_mut(handle)?;
        obj.usage &= usage;
        Ok(())
    }

    fn generate_key(
        &mut self,
        handle: ObjectHandle,
        key_size: u32,
        params: &[TeeAttribute],
    ) -> Result<(), Error> {
        let obj = self.object_mut(handle)?;
        if obj.initialized {
            return Err(Error::new(ErrorKind::BadState));
        }
        if !is_keypair_type(obj.obj_type) || key_size > obj.max_key_size {
            return Err(Error::new(ErrorKind::BadParameters));
        }

        let attrs = if is_weierstrass_type(obj.obj_type) {
            let curve = match params
                .iter()
                .find(|a| a.id() == TEE_ATTR_ECC_CURVE)
                .and_then(|a| a.value_a())
            {
                Some(c) => c,
                None => {
                    error!("Missing curve parameter for EC generation");
                    return Err(Error::new(ErrorKind::BadParameters));
                }
            };
            if weierstrass_curve_size(curve) != Some(key_size) {
                error!("Curve {} does not match size {}", curve, key_size);
                return Err(Error::new(ErrorKind::BadParameters));
            }
            generate_weierstrass(curve)?
        } else {
            if key_size != 256 || !params.is_empty() {
                return Err(Error::new(ErrorKind::BadParameters));
            }
            generate_ed25519()
        };

        obj.attrs = attrs;
        obj.initialized = true;
        Ok(())
    }

    fn populate_transient_object(
        &mut self,
        handle: ObjectHandle,
        attrs: Vec<TeeAttribute>,
    ) -> Result<(), Error> {
        let obj = self.object_mut(handle)?;
        if obj.initialized {
            return Err(Error::new(ErrorKind::BadState));
        }
        for id in required_attrs(obj.obj_type) {
            if !attrs.iter().any(|a| a.id() == *id) {
                error!("Missing attribute {:#010x} to populate object", id);
                return Err(Error::new(ErrorKind::BadParameters));
            }
        }
        if is_weierstrass_type(obj.obj_type) {
            let curve = attrs
                .iter()
                .find(|a| a.id() == TEE_ATTR_ECC_CURVE)
                .and_then(|a| a.value_a());
            match curve.and_then(weierstrass_curve_size) {
                Some(size) if size <= obj.max_key_size => (),
                _ => return Err(Error::new(ErrorKind::BadParameters)),
            }
        }
        obj.attrs = attrs;
        obj.initialized = true;
        Ok(())
    }

    fn get_object_buffer_attribute(
        &self,
        handle: ObjectHandle,
        attr: u32,
    ) -> Result<Vec<u8>, Error> {
        let obj = self.object(handle)?;
        if attr & TEE_ATTR_FLAG_VALUE != 0 {
            return Err(Error::new(ErrorKind::BadParameters));
        }
        if !obj.initialized {
            return Err(Error::new(ErrorKind::ItemNotFound));
        }
        let a = match obj.get(attr) {
            Some(a) => a,
            None => return Err(Error::new(ErrorKind::ItemNotFound)),
        };
        if !a.is_public() && obj.usage & TEE_USAGE_EXTRACTABLE == 0 {
            error!("Attribute {:#010x} is not extractable", attr);
            return Err(Error::new(ErrorKind::AccessDenied));
        }
        match a.buffer() {
            Some(buf) => Ok(buf.to_vec()),
            None => Err(Error::new(ErrorKind::BadParameters)),
        }
    }

    fn close_object(&mut self, handle: ObjectHandle) {
        /* attributes zeroize their buffers on drop */
        if self.objects.remove(&handle.0).is_none() {
            error!("Closing unknown object handle {}", handle.0);
        }
    }
}
