// Copyright 2025 Simo Sorce
// See LICENSE.txt file for terms

use std::collections::HashMap;

use super::*;

/// Provider step at which the fake provider reports a failure
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FailAt {
    Nothing,
    Allocate(ErrorKind),
    Restrict,
    Generate,
    Read(u32),
}

/// A scripted key provider that records the calls it receives
pub struct FakeProvider {
    pub fail: FailAt,
    pub opened: usize,
    pub closed: usize,
    pub usage: Option<u32>,
    pub generated: Vec<(u32, u32, Vec<TeeAttribute>)>,
    obj_types: HashMap<u32, u32>,
    values: HashMap<u32, Vec<u8>>,
    next_handle: u32,
}

impl FakeProvider {
    /// Creates a provider returning `values` for the generated keys
    pub fn new(values: &[(u32, Vec<u8>)]) -> FakeProvider {
        FakeProvider {
            fail: FailAt::Nothing,
            opened: 0,
            closed: 0,
            usage: None,
            generated: Vec::new(),
            obj_types: HashMap::new(),
            values: values.iter().cloned().collect(),
            next_handle: 0x100,
        }
    }

    pub fn failing(values: &[(u32, Vec<u8>)], fail: FailAt) -> FakeProvider {
        let mut provider = FakeProvider::new(values);
        provider.fail = fail;
        provider
    }

    pub fn live_objects(&self) -> usize {
        self.obj_types.len()
    }
}

impl KeyProvider for FakeProvider {
    fn allocate_transient_object(
        &mut self,
        obj_type: u32,
        _max_key_size: u32,
    ) -> std::result::Result<ObjectHandle, Error> {
        if let FailAt::Allocate(kind) = self.fail {
            return Err(Error::new(kind));
        }
        self.opened += 1;
        let handle = self.next_handle;
        self.next_handle += 1;
        self.obj_types.insert(handle, obj_type);
        Ok(ObjectHandle(handle))
    }

    fn restrict_object_usage(
        &mut self,
        _handle: ObjectHandle,
        usage: u32,
    ) -> std::result::Result<(), Error> {
        if self.fail == FailAt::Restrict {
            return Err(Error::new(ErrorKind::BadState));
        }
        self.usage = Some(usage);
        Ok(())
    }

    fn generate_key(
        &mut self,
        handle: ObjectHandle,
        key_size: u32,
        params: &[TeeAttribute],
    ) -> std::result::Result<(), Error> {
        if self.fail == FailAt::Generate {
            return Err(Error::new(ErrorKind::BadParameters));
        }
        let obj_type = self.obj_types[&handle.0];
        self.generated.push((obj_type, key_size, params.to_vec()));
        Ok(())
    }

    fn populate_transient_object(
        &mut self,
        _handle: ObjectHandle,
        _attrs: Vec<TeeAttribute>,
    ) -> std::result::Result<(), Error> {
        Err(Error::new(ErrorKind::NotSupported))
    }

    fn get_object_buffer_attribute(
        &self,
        _handle: ObjectHandle,
        attr: u32,
    ) -> std::result::Result<Vec<u8>, Error> {
        if self.fail == FailAt::Read(attr) {
            return Err(Error::new(ErrorKind::ItemNotFound));
        }
        match self.values.get(&attr) {
            Some(v) => Ok(v.clone()),
            None => Err(Error::new(ErrorKind::ItemNotFound)),
        }
    }

    fn close_object(&mut self, handle: ObjectHandle) {
        assert!(self.obj_types.remove(&handle.0).is_some());
        self.closed += 1;
    }
}

/// Attribute types and values of a template, in order
pub fn snapshot(obj: &Object) -> Vec<(CK_ATTRIBUTE_TYPE, Vec<u8>)> {
    obj.get_attributes()
        .iter()
        .map(|a| (a.get_type(), a.get_value().clone()))
        .collect()
}

/// Key pair templates as the object layer hands them over: the public
/// key carries the curve, outputs are present as empty placeholders
pub fn keypair_templates(
    key_type: CK_KEY_TYPE,
    params: &[u8],
) -> (Object, Object) {
    let (mut pubkey, privkey) = curveless_templates(key_type);
    pubkey
        .add_attr(Attribute::from_bytes(CKA_EC_PARAMS, params.to_vec()))
        .unwrap();
    (pubkey, privkey)
}

/// Same as [keypair_templates] with no curve on either key
pub fn curveless_templates(key_type: CK_KEY_TYPE) -> (Object, Object) {
    let mut pubkey = Object::new_key(CKO_PUBLIC_KEY, key_type);
    pubkey
        .add_attr(Attribute::from_bytes(CKA_EC_POINT, Vec::new()))
        .unwrap();
    pubkey
        .add_attr(Attribute::from_bool(CKA_VERIFY, true))
        .unwrap();

    let mut privkey = Object::new_key(CKO_PRIVATE_KEY, key_type);
    privkey
        .add_attr(Attribute::from_bytes(CKA_VALUE, Vec::new()))
        .unwrap();
    privkey
        .add_attr(Attribute::from_bytes(CKA_EC_PARAMS, Vec::new()))
        .unwrap();
    privkey
        .add_attr(Attribute::from_bool(CKA_SIGN, true))
        .unwrap();

    (pubkey, privkey)
}

/// Whether the boolean attribute is present and set
pub fn is_set(obj: &Object, t: CK_ATTRIBUTE_TYPE) -> bool {
    match obj.get_attr(t) {
        Some(a) => a.get_value().as_slice() == [1u8],
        None => false,
    }
}

pub fn ret_rv<T>(ret: Result<T>) -> CK_RV {
    match ret {
        Ok(_) => CKR_OK,
        Err(e) => e.rv(),
    }
}
