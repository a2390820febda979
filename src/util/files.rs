use serde::de::DeserializeOwned;

use std::{ffi, fs, path};

use crate::{Error, Result};

/// Open file for reading.
pub fn open_file_r(file: &ffi::OsStr) -> Result<fs::File> {
    let os_file = path::Path::new(file);
    Ok(err_at!(
        IOError,
        fs::OpenOptions::new().read(true).open(os_file)
    )?)
}

/// Load toml file and parse it into type `T`.
pub fn load_toml<P, T>(loc: P) -> Result<T>
where
    P: AsRef<path::Path>,
    T: DeserializeOwned,
{
    use std::io::Read;

    let loc = loc.as_ref();
    let mut fd = open_file_r(loc.as_os_str())?;

    let mut text = String::new();
    err_at!(IOError, fd.read_to_string(&mut text), "file {:?}", loc)?;

    parse_toml(&text)
}

/// Parse toml text into type `T`.
pub fn parse_toml<T>(text: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    err_at!(InvalidInput, toml::from_str(text))
}

#[cfg(test)]
#[path = "files_test.rs"]
mod files_test;
