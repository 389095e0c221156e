// Copyright 2025 Simo Sorce
// See LICENSE.txt file for terms

//! Strict reader for the serialized mechanism parameter blocks sent by the
//! client library. Fields are fixed width 32-bit values in the native byte
//! order of the platform, followed by raw payload bytes.

use crate::error::Result;
use crate::pkcs11::*;

use log::error;

/// Sequential cursor over a serialized parameter block
#[derive(Debug)]
pub struct SerialArgs<'a> {
    data: &'a [u8],
    next: usize,
}

impl<'a> SerialArgs<'a> {
    pub fn new(data: &'a [u8]) -> SerialArgs<'a> {
        SerialArgs { data: data, next: 0 }
    }

    /// Consumes exactly `size` bytes
    pub fn get(&mut self, size: usize) -> Result<&'a [u8]> {
        let end = match self.next.checked_add(size) {
            Some(e) if e <= self.data.len() => e,
            _ => {
                error!(
                    "Parameters too short: {} bytes requested, {} left",
                    size,
                    self.remaining_bytes()
                );
                return Err(CKR_MECHANISM_PARAM_INVALID)?;
            }
        };
        let field = &self.data[self.next..end];
        self.next = end;
        Ok(field)
    }

    pub fn get_u32(&mut self) -> Result<u32> {
        let field = self.get(std::mem::size_of::<u32>())?;
        match <[u8; 4]>::try_from(field) {
            Ok(buf) => Ok(u32::from_ne_bytes(buf)),
            Err(_) => Err(CKR_MECHANISM_PARAM_INVALID)?,
        }
    }

    pub fn get_u8(&mut self) -> Result<u8> {
        Ok(self.get(1)?[0])
    }

    pub fn remaining_bytes(&self) -> usize {
        self.data.len() - self.next
    }

    /// Fails if any byte was left unconsumed
    pub fn finish(&self) -> Result<()> {
        if self.remaining_bytes() != 0 {
            error!("{} unexpected trailing bytes", self.remaining_bytes());
            return Err(CKR_MECHANISM_PARAM_INVALID)?;
        }
        Ok(())
    }
}
