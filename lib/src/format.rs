use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{Chainable, ErrorDetail, Result};

pub trait Format: Sized {
    /// The data format's deserialization error type.
    type Error: serde::de::Error + ErrorDetail + 'static;

    /// Parses `string` as the data format `Self` as a `T` or returns an error
    /// if the `string` is an invalid `T`.
    fn from_str<T: DeserializeOwned>(string: &str) -> Result<T, Self::Error>;

    fn to_string<T: Serialize>(value: &T) -> Result<String>;

    /// Reads the file at `path` and parses it as a `T`. Errors carry the
    /// offending path.
    fn read<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T> {
        let path = path.as_ref();
        let string = std::fs::read_to_string(path).chain_with(|| error! {
            "failed to read file",
            "path" => path.display(),
        })?;

        Self::from_str(&string).chain_with(|| error! {
            "failed to parse file",
            "path" => path.display(),
        })
    }
}

macro_rules! impl_format {
    ($name:ident : $de:expr, $ser:expr, $E:ty) => (
        #[derive(Debug, Default, Clone, Copy)]
        pub struct $name;

        impl Format for $name {
            type Error = $E;

            fn from_str<T: DeserializeOwned>(s: &str) -> Result<T, $E> {
                $de(s)
            }

            fn to_string<T: Serialize>(value: &T) -> Result<String> {
                Ok($ser(value)?)
            }
        }
    );
}

impl_format!(Toml: toml::from_str, toml::to_string, toml::de::Error);
