// Copyright 2025 Simo Sorce
// See LICENSE.txt file for terms

//! This crate provides the secure key provider abstraction used by the
//! token core: the GlobalPlatform TEE Internal Core API identifiers for
//! elliptic curve objects, the [KeyProvider] trait, and a scoped
//! [TransientObject] handle that is closed on every exit path.
//!
//! With the `soft` feature a software provider ([soft::SoftProvider]) backed
//! by the RustCrypto curve implementations is available.

use std::fmt;

use zeroize::{Zeroize, Zeroizing};

#[cfg(feature = "soft")]
pub mod soft;

#[cfg(test)]
mod tests;

/* Object types */
pub const TEE_TYPE_ECDSA_PUBLIC_KEY: u32 = 0xA0000041;
pub const TEE_TYPE_ECDSA_KEYPAIR: u32 = 0xA1000041;
pub const TEE_TYPE_ECDH_PUBLIC_KEY: u32 = 0xA0000042;
pub const TEE_TYPE_ECDH_KEYPAIR: u32 = 0xA1000042;
pub const TEE_TYPE_ED25519_PUBLIC_KEY: u32 = 0xA0000043;
pub const TEE_TYPE_ED25519_KEYPAIR: u32 = 0xA1000043;

/* Attribute identifiers */
pub const TEE_ATTR_FLAG_PUBLIC: u32 = 1 << 28;
pub const TEE_ATTR_FLAG_VALUE: u32 = 1 << 29;

pub const TEE_ATTR_ECC_PUBLIC_VALUE_X: u32 = 0xD0000141;
pub const TEE_ATTR_ECC_PUBLIC_VALUE_Y: u32 = 0xD0000241;
pub const TEE_ATTR_ECC_PRIVATE_VALUE: u32 = 0xC0000341;
pub const TEE_ATTR_ECC_CURVE: u32 = 0xF0000441;
pub const TEE_ATTR_ED25519_PUBLIC_VALUE: u32 = 0xD0000743;
pub const TEE_ATTR_ED25519_PRIVATE_VALUE: u32 = 0xC0000843;

/* Curves */
pub const TEE_ECC_CURVE_NIST_P192: u32 = 0x00000001;
pub const TEE_ECC_CURVE_NIST_P224: u32 = 0x00000002;
pub const TEE_ECC_CURVE_NIST_P256: u32 = 0x00000003;
pub const TEE_ECC_CURVE_NIST_P384: u32 = 0x00000004;
pub const TEE_ECC_CURVE_NIST_P521: u32 = 0x00000005;
pub const TEE_ECC_CURVE_25519: u32 = 0x00000300;

/* Algorithms */
pub const TEE_ALG_ECDSA_P192: u32 = 0x70001041;
pub const TEE_ALG_ECDSA_P224: u32 = 0x70002041;
pub const TEE_ALG_ECDSA_P256: u32 = 0x70003041;
pub const TEE_ALG_ECDSA_P384: u32 = 0x70004041;
pub const TEE_ALG_ECDSA_P521: u32 = 0x70005041;
pub const TEE_ALG_ECDSA_SHA1: u32 = 0x70001042;
pub const TEE_ALG_ECDSA_SHA224: u32 = 0x70002042;
pub const TEE_ALG_ECDSA_SHA256: u32 = 0x70003042;
pub const TEE_ALG_ECDSA_SHA384: u32 = 0x70004042;
pub const TEE_ALG_ECDSA_SHA512: u32 = 0x70005042;
pub const TEE_ALG_ECDH_P192: u32 = 0x80001042;
pub const TEE_ALG_ECDH_P224: u32 = 0x80002042;
pub const TEE_ALG_ECDH_P256: u32 = 0x80003042;
pub const TEE_ALG_ECDH_P384: u32 = 0x80004042;
pub const TEE_ALG_ECDH_P521: u32 = 0x80005042;
pub const TEE_ALG_ED25519: u32 = 0x70006043;

/* Object usage */
pub const TEE_USAGE_EXTRACTABLE: u32 = 0x00000001;
pub const TEE_USAGE_ENCRYPT: u32 = 0x00000002;
pub const TEE_USAGE_DECRYPT: u32 = 0x00000004;
pub const TEE_USAGE_MAC: u32 = 0x00000008;
pub const TEE_USAGE_SIGN: u32 = 0x00000010;
pub const TEE_USAGE_VERIFY: u32 = 0x00000020;
pub const TEE_USAGE_DERIVE: u32 = 0x00000040;
pub const TEE_USAGE_DEFAULT: u32 = 0xFFFFFFFF;

/* Result codes */
pub const TEE_SUCCESS: u32 = 0x00000000;
pub const TEE_ERROR_GENERIC: u32 = 0xFFFF0000;
pub const TEE_ERROR_ACCESS_DENIED: u32 = 0xFFFF0001;
pub const TEE_ERROR_BAD_FORMAT: u32 = 0xFFFF0005;
pub const TEE_ERROR_BAD_PARAMETERS: u32 = 0xFFFF0006;
pub const TEE_ERROR_BAD_STATE: u32 = 0xFFFF0007;
pub const TEE_ERROR_ITEM_NOT_FOUND: u32 = 0xFFFF0008;
pub const TEE_ERROR_NOT_SUPPORTED: u32 = 0xFFFF000A;
pub const TEE_ERROR_OUT_OF_MEMORY: u32 = 0xFFFF000C;
pub const TEE_ERROR_SHORT_BUFFER: u32 = 0xFFFF0010;

/// The provider failure classes, they mirror the TEE result codes
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[non_exhaustive]
pub enum ErrorKind {
    Generic,
    AccessDenied,
    BadFormat,
    BadParameters,
    BadState,
    ItemNotFound,
    NotSupported,
    OutOfMemory,
    ShortBuffer,
}

impl ErrorKind {
    /// Returns the TEE result code for this kind of failure
    pub fn code(&self) -> u32 {
        match self {
            ErrorKind::Generic => TEE_ERROR_GENERIC,
            ErrorKind::AccessDenied => TEE_ERROR_ACCESS_DENIED,
            ErrorKind::BadFormat => TEE_ERROR_BAD_FORMAT,
            ErrorKind::BadParameters => TEE_ERROR_BAD_PARAMETERS,
            ErrorKind::BadState => TEE_ERROR_BAD_STATE,
            ErrorKind::ItemNotFound => TEE_ERROR_ITEM_NOT_FOUND,
            ErrorKind::NotSupported => TEE_ERROR_NOT_SUPPORTED,
            ErrorKind::OutOfMemory => TEE_ERROR_OUT_OF_MEMORY,
            ErrorKind::ShortBuffer => TEE_ERROR_SHORT_BUFFER,
        }
    }
}

/// Error returned by a [KeyProvider]
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    errmsg: Option<String>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Error {
        Error {
            kind: kind,
            errmsg: None,
        }
    }

    pub fn with_msg(kind: ErrorKind, errmsg: String) -> Error {
        Error {
            kind: kind,
            errmsg: Some(errmsg),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the TEE result code
    pub fn code(&self) -> u32 {
        self.kind.code()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.errmsg {
            Some(msg) => {
                write!(f, "{:?} ({:#010x}): {}", self.kind, self.code(), msg)
            }
            None => write!(f, "{:?} ({:#010x})", self.kind, self.code()),
        }
    }
}

impl std::error::Error for Error {}

/// The value carried by a provider attribute
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AttrValue {
    /// A memory reference, big endian integers or octet strings
    Ref(Vec<u8>),
    /// A pair of 32 bit integers
    Value(u32, u32),
}

/// A provider native attribute, the equivalent of a `TEE_Attribute`
///
/// Buffers are zeroized when the attribute is dropped, as they may carry
/// private key material.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TeeAttribute {
    id: u32,
    value: AttrValue,
}

impl TeeAttribute {
    /// Creates a memory reference attribute
    pub fn from_ref(id: u32, buf: Vec<u8>) -> TeeAttribute {
        TeeAttribute {
            id: id,
            value: AttrValue::Ref(buf),
        }
    }

    /// Creates a value attribute
    pub fn from_value(id: u32, a: u32, b: u32) -> TeeAttribute {
        TeeAttribute {
            id: id,
            value: AttrValue::Value(a, b),
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn value(&self) -> &AttrValue {
        &self.value
    }

    /// Returns the buffer of a memory reference attribute
    pub fn buffer(&self) -> Option<&[u8]> {
        match &self.value {
            AttrValue::Ref(buf) => Some(buf.as_slice()),
            AttrValue::Value(_, _) => None,
        }
    }

    /// Returns the first integer of a value attribute
    pub fn value_a(&self) -> Option<u32> {
        match &self.value {
            AttrValue::Value(a, _) => Some(*a),
            AttrValue::Ref(_) => None,
        }
    }

    /// Whether the attribute is flagged as public in its identifier
    pub fn is_public(&self) -> bool {
        self.id & TEE_ATTR_FLAG_PUBLIC != 0
    }
}

impl Drop for TeeAttribute {
    fn drop(&mut self) {
        if let AttrValue::Ref(buf) = &mut self.value {
            buf.zeroize();
        }
    }
}

/// Opaque handle of an object allocated by a provider
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct ObjectHandle(pub u32);

/// Information about a live provider operation
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct OperationInfo {
    pub algorithm: u32,
    pub max_key_size: u32,
}

/// The secure key provider interface
///
/// All calls complete synchronously. Implementations own the key material
/// of the objects they allocate until [KeyProvider::close_object] is
/// called on the handle.
pub trait KeyProvider {
    /// Allocates an uninitialized transient object
    fn allocate_transient_object(
        &mut self,
        obj_type: u32,
        max_key_size: u32,
    ) -> Result<ObjectHandle, Error>;

    /// Restricts the usage flags of the object to `usage`
    fn restrict_object_usage(
        &mut self,
        handle: ObjectHandle,
        usage: u32,
    ) -> Result<(), Error>;

    /// Generates a key in an uninitialized object
    fn generate_key(
        &mut self,
        handle: ObjectHandle,
        key_size: u32,
        params: &[TeeAttribute],
    ) -> Result<(), Error>;

    /// Loads key material in an uninitialized object, the attributes are
    /// consumed by the call
    fn populate_transient_object(
        &mut self,
        handle: ObjectHandle,
        attrs: Vec<TeeAttribute>,
    ) -> Result<(), Error>;

    /// Reads back a memory reference attribute from an initialized object
    fn get_object_buffer_attribute(
        &self,
        handle: ObjectHandle,
        attr: u32,
    ) -> Result<Vec<u8>, Error>;

    /// Releases the object and all of its content
    fn close_object(&mut self, handle: ObjectHandle);
}

/// A provider object that is closed when dropped
///
/// This is the only way the token core holds provider objects, which
/// guarantees every allocation is paired with exactly one close, whatever
/// the exit path.
pub struct TransientObject<'a> {
    provider: &'a mut dyn KeyProvider,
    handle: ObjectHandle,
}

impl<'a> TransientObject<'a> {
    /// Allocates a new transient object from the provider
    pub fn allocate(
        provider: &'a mut dyn KeyProvider,
        obj_type: u32,
        max_key_size: u32,
    ) -> Result<TransientObject<'a>, Error> {
        let handle =
            provider.allocate_transient_object(obj_type, max_key_size)?;
        Ok(TransientObject {
            provider: provider,
            handle: handle,
        })
    }

    pub fn handle(&self) -> ObjectHandle {
        self.handle
    }

    pub fn restrict_usage(&mut self, usage: u32) -> Result<(), Error> {
        self.provider.restrict_object_usage(self.handle, usage)
    }

    pub fn generate_key(
        &mut self,
        key_size: u32,
        params: &[TeeAttribute],
    ) -> Result<(), Error> {
        self.provider.generate_key(self.handle, key_size, params)
    }

    pub fn populate(&mut self, attrs: Vec<TeeAttribute>) -> Result<(), Error> {
        self.provider.populate_transient_object(self.handle, attrs)
    }

    /// Reads a buffer attribute, the returned copy is zeroized on drop
    pub fn get_buffer_attribute(
        &self,
        attr: u32,
    ) -> Result<Zeroizing<Vec<u8>>, Error> {
        Ok(Zeroizing::new(
            self.provider.get_object_buffer_attribute(self.handle, attr)?,
        ))
    }
}

impl Drop for TransientObject<'_> {
    fn drop(&mut self) {
        self.provider.close_object(self.handle);
    }
}

impl fmt::Debug for TransientObject<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransientObject")
            .field("handle", &self.handle)
            .finish()
    }
}
