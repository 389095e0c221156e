// Copyright 2025 Simo Sorce
// See LICENSE.txt file for terms

//! Token configuration. The configuration file is a TOML document with an
//! `[ec]` section listing the curves allowed for key pair generation:
//!
//! ```toml
//! [ec]
//! curves = ["prime256v1", "secp384r1", "ed25519"]
//! ```

use std::env;
use std::fs;
use std::path::Path;

use crate::ec::{curve_by_label, CurveDescriptor};
use crate::error::{Error, Result};
use crate::pkcs11::vendor::ECTR_CONFIG_ERROR;
use crate::pkcs11::*;

use log::error;
use serde::de;
use serde::{Deserialize, Serialize};
use toml;

#[cfg(not(test))]
const DEFAULT_CONF_DIR: &str = {
    match option_env!("CONFDIR") {
        Some(p) => p,
        None => "/usr/local/etc",
    }
};
#[cfg(test)]
const DEFAULT_CONF_DIR: &str = "test";

pub const DEFAULT_CONF_NAME: &str = "ectee.conf";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EcConfig {
    /// Labels of the curves allowed for key pair generation, all the
    /// registered curves are allowed when not set
    pub curves: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ec: EcConfig,
}

fn config_error<E: de::Error + 'static>(error: E) -> Error {
    Error::ck_rv_from_error(ECTR_CONFIG_ERROR, error)
}

impl Config {
    pub fn new() -> Config {
        Config {
            ec: EcConfig { curves: None },
        }
    }

    pub fn find_conf() -> Result<String> {
        /* First check for our own env var,
         * this has the highest precedence */
        if let Ok(var) = env::var("ECTEE_CONF") {
            return Ok(var);
        }
        /* Freedesktop specification for config dirs first
         * then fallback to use $HOME/.config, if that is also not
         * available see if we have access to a system store */
        let datafile = match env::var("XDG_CONFIG_HOME") {
            Ok(xdg) => format!("{}/ectee/{}", xdg, DEFAULT_CONF_NAME),
            Err(_) => match env::var("HOME") {
                Ok(home) => {
                    format!("{}/.config/ectee/{}", home, DEFAULT_CONF_NAME)
                }
                Err(_) => {
                    format!("{}/ectee/{}", DEFAULT_CONF_DIR, DEFAULT_CONF_NAME)
                }
            },
        };
        if Path::new(&datafile).is_file() {
            Ok(datafile)
        } else {
            Err(CKR_ARGUMENTS_BAD)?
        }
    }

    pub fn from_toml(config_str: &str) -> Result<Config> {
        let conf: Config = toml::from_str(config_str).map_err(config_error)?;
        conf.validate()?;
        Ok(conf)
    }

    pub fn from_file(filename: &str) -> Result<Config> {
        let config_str = fs::read_to_string(filename)?;
        Self::from_toml(&config_str)
    }

    /// Loads the configuration file if one can be found, otherwise
    /// returns the default configuration
    pub fn default_config() -> Result<Config> {
        match Self::find_conf() {
            Ok(filename) => Self::from_file(&filename),
            Err(_) => Ok(Config::new()),
        }
    }

    fn validate(&self) -> Result<()> {
        if let Some(curves) = &self.ec.curves {
            for label in curves {
                if curve_by_label(label).is_none() {
                    error!("Unknown curve '{}' in configuration", label);
                    return Err(Error::ck_rv_with_errmsg(
                        ECTR_CONFIG_ERROR,
                        format!("unknown curve '{}'", label),
                    ));
                }
            }
        }
        Ok(())
    }

    /// Whether key pair generation is allowed on this curve
    pub fn curve_allowed(&self, curve: &CurveDescriptor) -> bool {
        match &self.ec.curves {
            None => true,
            Some(curves) => curves
                .iter()
                .filter_map(|l| curve_by_label(l))
                .any(|c| std::ptr::eq(c, curve)),
        }
    }
}
