// Copyright 2025 Simo Sorce
// See LICENSE.txt file for terms

//! This module defines the in-memory representation of a PKCS#11 key
//! object template (`Object`), as handed over by the object storage layer
//! to key generation and key loading.

use crate::attribute::{AttrType, Attribute};
use crate::ec::key_size_of;
use crate::error::{Error, Result};
use crate::pkcs11::*;

use log::{error, trace};

/// Helper macro that generates methods to retrieve attributes
/// values of a specific type from objects
macro_rules! attr_as_type {
    (make $name:ident; with $r:ty; $atype:ident; via $conv:ident) => {
        #[doc = concat!(
            "Returns the value of the attribute as a `",
            stringify!($r),
            "`"
        )]
        pub fn $name(&self, t: CK_ULONG) -> Result<$r> {
            for attr in &self.attributes {
                if attr.get_type() == t {
                    if attr.get_attrtype() != AttrType::$atype {
                        return Err(CKR_ATTRIBUTE_TYPE_INVALID)?;
                    }
                    return attr.$conv();
                }
            }
            Err(Error::not_found(t.to_string()))
        }
    };
}

/// A PKCS#11 object template, one value per attribute type.
///
/// Attribute values are zeroized when dropped.
#[derive(Debug, Clone)]
pub struct Object {
    /// All objects have a class so we keep it here in order to access it
    /// directly
    class: CK_OBJECT_CLASS,
    /// The object attributes in insertion order
    attributes: Vec<Attribute>,
}

impl Object {
    /// Creates a new empty Object
    pub fn new(class: CK_OBJECT_CLASS) -> Object {
        Object {
            class: class,
            attributes: vec![Attribute::from_ulong(CKA_CLASS, class)],
        }
    }

    /// Creates a new key object template of the given class and key type
    pub fn new_key(class: CK_OBJECT_CLASS, key_type: CK_KEY_TYPE) -> Object {
        let mut obj = Object::new(class);
        obj.attributes
            .push(Attribute::from_ulong(CKA_KEY_TYPE, key_type));
        obj
    }

    /// Gets the object's class
    pub fn get_class(&self) -> CK_OBJECT_CLASS {
        self.class
    }

    /// Gets the object's key type
    pub fn get_key_type(&self) -> Result<CK_KEY_TYPE> {
        self.get_attr_as_ulong(CKA_KEY_TYPE)
    }

    /// Get an attribute from the object by attribute id
    pub fn get_attr(&self, ck_type: CK_ULONG) -> Option<&Attribute> {
        self.attributes.iter().find(|r| r.get_type() == ck_type)
    }

    /// Sets or Replaces an attribute on the object
    pub fn set_attr(&mut self, a: Attribute) -> Result<()> {
        let atype = a.get_type();
        if atype == CKA_CLASS {
            self.class = a.to_ulong()?;
        }
        match self.attributes.iter().position(|r| r.get_type() == atype) {
            Some(idx) => self.attributes[idx] = a,
            None => self.attributes.push(a),
        }
        Ok(())
    }

    /// Adds a new attribute, fails if one of the same type is present
    pub fn add_attr(&mut self, a: Attribute) -> Result<()> {
        if self.get_attr(a.get_type()).is_some() {
            error!("Attribute {} already present", a.name());
            return Err(CKR_TEMPLATE_INCONSISTENT)?;
        }
        self.attributes.try_reserve(1)?;
        self.attributes.push(a);
        Ok(())
    }

    /// Removes the attribute if its value is empty.
    ///
    /// Returns true if a non empty attribute of that type is present
    /// and was left in place.
    pub fn remove_empty_attr(&mut self, ck_type: CK_ULONG) -> bool {
        match self.attributes.iter().position(|r| r.get_type() == ck_type) {
            Some(idx) => {
                if self.attributes[idx].is_empty() {
                    self.attributes.remove(idx);
                    false
                } else {
                    true
                }
            }
            None => false,
        }
    }

    /// Whether the object carries a non empty value for the attribute
    pub fn has_nonempty_attr(&self, ck_type: CK_ULONG) -> bool {
        match self.get_attr(ck_type) {
            Some(a) => !a.is_empty(),
            None => false,
        }
    }

    /// Gets a reference to the internal vector of object attributes
    pub fn get_attributes(&self) -> &Vec<Attribute> {
        return &self.attributes;
    }

    attr_as_type! {
        make get_attr_as_ulong; with CK_ULONG; NumType; via to_ulong
    }
    attr_as_type! {
        make get_attr_as_bytes; with &Vec<u8>; BytesType; via to_bytes
    }

    /// Returns the size in bits of the key, derived from the curve in
    /// `CKA_EC_PARAMS`, or 0 if there is no known curve
    pub fn key_bit_size(&self) -> usize {
        match self.get_attr_as_bytes(CKA_EC_PARAMS) {
            Ok(params) => key_size_of(params),
            Err(_) => 0,
        }
    }

    /// Logs the attribute types and value sizes at trace level
    pub fn trace_dump(&self, label: &str) {
        trace!("{}: {} attribute(s)", label, self.attributes.len());
        for a in &self.attributes {
            trace!("  {} [{} bytes]", a.name(), a.get_value().len());
        }
    }

    /// Checks that `commit` can apply the attributes: each must be either
    /// absent from the object or present as an empty placeholder listed
    /// in `placeholders`
    pub fn check_commit(
        &self,
        placeholders: &[CK_ATTRIBUTE_TYPE],
        attrs: &[Attribute],
    ) -> Result<()> {
        for a in attrs {
            let t = a.get_type();
            if let Some(cur) = self.get_attr(t) {
                if !cur.is_empty() || !placeholders.contains(&t) {
                    error!("Can't set {}, attribute already present", a.name());
                    return Err(CKR_TEMPLATE_INCONSISTENT)?;
                }
            }
        }
        Ok(())
    }

    /// Removes the empty placeholders, then adds the attributes
    pub fn commit(
        &mut self,
        placeholders: &[CK_ATTRIBUTE_TYPE],
        attrs: Vec<Attribute>,
    ) -> Result<()> {
        for t in placeholders {
            let _ = self.remove_empty_attr(*t);
        }
        self.attributes.try_reserve(attrs.len())?;
        for a in attrs {
            self.add_attr(a)?;
        }
        Ok(())
    }
}
