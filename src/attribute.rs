// Copyright 2025 Simo Sorce
// See LICENSE.txt file for terms

//! This module provides the Rust representation of PKCS#11 attributes
//! ([Attribute]), the data type they carry ([AttrType]) and the names
//! of the attribute types the token core handles.

use std::cmp::Ordering;

use crate::error::Result;
use crate::pkcs11::vendor::ECTA_HIDDEN_EC_POINT;
use crate::pkcs11::*;

use zeroize::Zeroize;

/// List of attribute types we understand
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum AttrType {
    BoolType,
    NumType,
    BytesType,
}

/// Struct to map a PKCS#11 attribute to a printable name
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Attrmap<'a> {
    id: CK_ULONG,
    name: &'a str,
}

impl PartialOrd for Attrmap<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Attrmap<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl Attrmap<'_> {
    /// Convenience function to efficiently search for a mapping by id
    pub fn search_by_id(id: CK_ULONG) -> Option<&'static Attrmap<'static>> {
        match &ATTRMAP.binary_search(&Attrmap { id: id, name: "" }) {
            Ok(i) => Some(&ATTRMAP[*i]),
            Err(_) => None,
        }
    }
}

/// Helper macro to populate the static attributes map
macro_rules! attrmap_element {
    ($id:expr) => {
        Attrmap {
            id: $id,
            name: stringify!($id),
        }
    };
}

/// The attributes map, sorted by id
static ATTRMAP: [Attrmap<'_>; 17] = [
    attrmap_element!(CKA_CLASS),
    attrmap_element!(CKA_TOKEN),
    attrmap_element!(CKA_PRIVATE),
    attrmap_element!(CKA_LABEL),
    attrmap_element!(CKA_VALUE),
    attrmap_element!(CKA_KEY_TYPE),
    attrmap_element!(CKA_ID),
    attrmap_element!(CKA_SENSITIVE),
    attrmap_element!(CKA_SIGN),
    attrmap_element!(CKA_VERIFY),
    attrmap_element!(CKA_DERIVE),
    attrmap_element!(CKA_EXTRACTABLE),
    attrmap_element!(CKA_LOCAL),
    attrmap_element!(CKA_KEY_GEN_MECHANISM),
    attrmap_element!(CKA_EC_PARAMS),
    attrmap_element!(CKA_EC_POINT),
    /* Additional Vendor defined Attributes */
    attrmap_element!(ECTA_HIDDEN_EC_POINT),
];

/// A Rust native, typed attribute that holds the attribute value
///
/// The value is zeroized when the attribute is dropped.
#[derive(Debug, Clone)]
pub struct Attribute {
    ck_type: CK_ULONG,
    attrtype: AttrType,
    value: Vec<u8>,
}

impl Drop for Attribute {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl Attribute {
    /// Returns the PKCS#11 attribute 'type' which is the attribute ID
    pub fn get_type(&self) -> CK_ULONG {
        self.ck_type
    }

    /// Returns the internal attribute type
    pub fn get_attrtype(&self) -> AttrType {
        self.attrtype
    }

    /// Returns a reference to the internal value
    pub fn get_value(&self) -> &Vec<u8> {
        &self.value
    }

    /// Whether the attribute holds an empty value
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Returns the name of the attribute as an allocated String
    pub fn name(&self) -> String {
        match Attrmap::search_by_id(self.ck_type) {
            Some(a) => a.name.to_string(),
            None => format!("{:#x}", self.ck_type),
        }
    }

    /// Returns the internal value as a CK_ULONG
    ///
    /// Returns a CKR_ATTRIBUTE_VALUE_INVALID error if the value is
    /// not a ulong
    pub fn to_ulong(&self) -> Result<CK_ULONG> {
        if self.attrtype != AttrType::NumType {
            return Err(CKR_ATTRIBUTE_TYPE_INVALID)?;
        }
        match <[u8; std::mem::size_of::<CK_ULONG>()]>::try_from(
            self.value.as_slice(),
        ) {
            Ok(buf) => Ok(CK_ULONG::from_ne_bytes(buf)),
            Err(_) => Err(CKR_ATTRIBUTE_VALUE_INVALID)?,
        }
    }

    /// Returns a reference to the internal value wrapped in a Result
    pub fn to_bytes(&self) -> Result<&Vec<u8>> {
        if self.attrtype != AttrType::BytesType {
            return Err(CKR_ATTRIBUTE_TYPE_INVALID)?;
        }
        Ok(&self.value)
    }

    /// Zeroizes the internal value
    pub fn zeroize(&mut self) {
        self.value.zeroize();
    }

    /// Creates an attribute of type AttrType::BoolType from a bool
    ///
    /// Note: Does not verify that the attribute id type is correct
    pub fn from_bool(t: CK_ULONG, val: bool) -> Attribute {
        Attribute {
            ck_type: t,
            attrtype: AttrType::BoolType,
            value: vec![u8::from(val)],
        }
    }

    /// Creates an attribute of type AttrType::NumType from a CK_ULONG
    ///
    /// Note: Does not verify that the attribute id type is correct
    pub fn from_ulong(t: CK_ULONG, val: CK_ULONG) -> Attribute {
        Attribute {
            ck_type: t,
            attrtype: AttrType::NumType,
            value: Vec::from(val.to_ne_bytes()),
        }
    }

    /// Creates an attribute of type AttrType::BytesType from a `Vec<u8>`
    ///
    /// Note: Does not verify that the attribute id type is correct
    pub fn from_bytes(t: CK_ULONG, val: Vec<u8>) -> Attribute {
        Attribute {
            ck_type: t,
            attrtype: AttrType::BytesType,
            value: val,
        }
    }
}
