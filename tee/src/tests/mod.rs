// Copyright 2025 Simo Sorce
// See LICENSE.txt file for terms

use crate::*;


/// Counts allocations and closes, fails every other call
struct CountingProvider {
    allocated: usize,
    closed: usize,
}

impl KeyProvider for CountingProvider {
    fn allocate_transient_object(
        &mut self,
        _obj_type: u32,
        _max_key_size: u32,
    ) -> Result<ObjectHandle, Error> {
        self.allocated += 1;
        Ok(ObjectHandle(self.allocated as u32))
    }

    fn restrict_object_usage(
        &mut self,
        _handle: ObjectHandle,
        _usage: u32,
    ) -> Result<(), Error> {
        Err(Error::new(ErrorKind::BadState))
    }

    fn generate_key(
        &mut self,
        _handle: ObjectHandle,
        _key_size: u32,
        _params: &[TeeAttribute],
    ) -> Result<(), Error> {
        Err(Error::new(ErrorKind::Generic))
    }

    fn populate_transient_object(
        &mut self,
        _handle: ObjectHandle,
        _attrs: Vec<TeeAttribute>,
    ) -> Result<(), Error> {
        Err(Error::new(ErrorKind::Generic))
    }

    fn get_object_buffer_attribute(
        &self,
        _handle: ObjectHandle,
        _attr: u32,
    ) -> Result<Vec<u8>, Error> {
        Err(Error::new(ErrorKind::ItemNotFound))
    }

    fn close_object(&mut self, _handle: ObjectHandle) {
        self.closed += 1;
    }
}

#[test]
fn transient_object_closes_on_drop() {
    let mut provider = CountingProvider {
        allocated: 0,
        closed: 0,
    };
    {
        let mut obj = TransientObject::allocate(
            &mut provider,
            TEE_TYPE_ECDSA_KEYPAIR,
            256,
        )
        .unwrap();
        assert_eq!(obj.handle(), ObjectHandle(1));
        let err = obj.restrict_usage(TEE_USAGE_EXTRACTABLE).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BadState);
    }
    assert_eq!(provider.allocated, 1);
    assert_eq!(provider.closed, 1);
}

#[test]
fn error_codes() {
    assert_eq!(Error::new(ErrorKind::OutOfMemory).code(), 0xFFFF000C);
    assert_eq!(Error::new(ErrorKind::BadParameters).code(), 0xFFFF0006);
    assert_eq!(Error::new(ErrorKind::ShortBuffer).code(), 0xFFFF0010);
    let err = Error::with_msg(ErrorKind::Generic, "boom".to_string());
    assert_eq!(format!("{}", err), "Generic (0xffff0000): boom");
}

#[test]
fn attribute_accessors() {
    let a = TeeAttribute::from_value(
        TEE_ATTR_ECC_CURVE,
        TEE_ECC_CURVE_NIST_P256,
        0,
    );
    assert_eq!(a.value_a(), Some(TEE_ECC_CURVE_NIST_P256));
    assert_eq!(a.buffer(), None);
    assert!(a.is_public());

    let b = TeeAttribute::from_ref(TEE_ATTR_ECC_PRIVATE_VALUE, vec![1, 2, 3]);
    assert_eq!(b.buffer(), Some(&[1u8, 2, 3][..]));
    assert_eq!(b.value_a(), None);
    assert!(!b.is_public());
}
