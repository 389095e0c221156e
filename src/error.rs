// Copyright 2025 Simo Sorce
// See LICENSE.txt file for terms

//! Error handling for the token core. Every recoverable failure carries the
//! PKCS#11 return value the token reports to the application.

use std::error;
use std::fmt;

use crate::pkcs11::*;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    origin: Option<Box<dyn error::Error>>,
    errmsg: Option<String>,
    ckrv: CK_RV,
}

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[non_exhaustive]
pub enum ErrorKind {
    /* A Cryptoki-style error, see ckrv Error field */
    CkError,
    /* The attribute was not found, see errmsg */
    AttributeNotFound,
    /* Other error, see origin */
    Nested,
}

impl Error {
    pub fn ck_rv(ckrv: CK_RV) -> Error {
        Error {
            kind: ErrorKind::CkError,
            origin: None,
            errmsg: None,
            ckrv: ckrv,
        }
    }

    pub fn ck_rv_from_error<E>(ckrv: CK_RV, error: E) -> Error
    where
        E: Into<Box<dyn error::Error>>,
    {
        Error {
            kind: ErrorKind::CkError,
            origin: Some(error.into()),
            errmsg: None,
            ckrv: ckrv,
        }
    }

    pub fn ck_rv_with_errmsg(ckrv: CK_RV, errmsg: String) -> Error {
        Error {
            kind: ErrorKind::CkError,
            origin: None,
            errmsg: Some(errmsg),
            ckrv: ckrv,
        }
    }

    pub fn not_found(errmsg: String) -> Error {
        Error {
            kind: ErrorKind::AttributeNotFound,
            origin: None,
            errmsg: Some(errmsg),
            ckrv: CKR_GENERAL_ERROR,
        }
    }

    pub fn other_error<E>(error: E) -> Error
    where
        E: Into<Box<dyn error::Error>>,
    {
        Error {
            kind: ErrorKind::Nested,
            origin: Some(error.into()),
            errmsg: None,
            ckrv: CKR_GENERAL_ERROR,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn attr_not_found(&self) -> bool {
        self.kind == ErrorKind::AttributeNotFound
    }

    pub fn rv(&self) -> CK_RV {
        self.ckrv
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.kind {
            ErrorKind::CkError => {
                if let Some(ref e) = self.errmsg {
                    write!(f, "{}", e)
                } else if let Some(ref o) = self.origin {
                    write!(f, "{} ({})", rv_display(self.ckrv), o)
                } else {
                    write!(f, "{}", rv_display(self.ckrv))
                }
            }
            ErrorKind::AttributeNotFound => match self.errmsg {
                Some(ref e) => write!(f, "attribute not found: {}", e),
                None => write!(f, "attribute not found"),
            },
            ErrorKind::Nested => match self.origin {
                Some(ref o) => o.fmt(f),
                None => write!(f, "{}", rv_display(self.ckrv)),
            },
        }
    }
}

fn rv_display(rv: CK_RV) -> String {
    match rv_name(rv) {
        Some(name) => name.to_string(),
        None => format!("{:#x}", rv),
    }
}

impl error::Error for Error {}

impl From<CK_RV> for Error {
    fn from(ckrv: CK_RV) -> Error {
        Error::ck_rv(ckrv)
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Error {
        Error::other_error(error)
    }
}

impl From<std::collections::TryReserveError> for Error {
    fn from(error: std::collections::TryReserveError) -> Error {
        Error::ck_rv_from_error(CKR_DEVICE_MEMORY, error)
    }
}

impl From<tee::Error> for Error {
    fn from(error: tee::Error) -> Error {
        let rv = tee2pkcs_error(&error);
        Error::ck_rv_from_error(rv, error)
    }
}

/// Maps a key provider failure to the PKCS#11 return value
pub fn tee2pkcs_error(error: &tee::Error) -> CK_RV {
    match error.kind() {
        tee::ErrorKind::OutOfMemory => CKR_DEVICE_MEMORY,
        tee::ErrorKind::BadParameters => CKR_ARGUMENTS_BAD,
        tee::ErrorKind::ShortBuffer => CKR_BUFFER_TOO_SMALL,
        _ => CKR_GENERAL_ERROR,
    }
}

/// Aborts the current call on a broken internal precondition.
///
/// These are conditions earlier layers must have enforced (for example the
/// key size of an object that passed creation checks), so they are never
/// reported as a return value.
pub fn contract_violation(msg: &str) -> ! {
    log::error!("Contract violation: {}", msg);
    panic!("{}", msg);
}
