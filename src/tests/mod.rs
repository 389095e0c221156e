// Copyright 2025 Simo Sorce
// See LICENSE.txt file for terms

use crate::attribute::Attribute;
use crate::error::Result;
use crate::mechanism::*;
use crate::object::Object;
use crate::pkcs11::vendor::*;
use crate::pkcs11::*;

use tee::*;

mod util;
use util::*;

mod ecc;
#[cfg(feature = "eddsa")]
mod eddsa;
