/// Implements `FromStr`, and with the `serde` feature `Serialize`/`Deserialize`, for a type
/// that has `fn parse(&str) -> Result<Self>` and a `Display` impl producing the same text.
macro_rules! text_value_impls {
    ($type:ty) => {
        impl std::str::FromStr for $type {
            type Err = $crate::error::Error;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                <$type>::parse(s)
            }
        }

        #[cfg(feature = "serde")]
        impl serde::Serialize for $type {
            fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.collect_str(self)
            }
        }

        #[cfg(feature = "serde")]
        impl<'de> serde::Deserialize<'de> for $type {
            fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let text = <std::borrow::Cow<'de, str> as serde::Deserialize>::deserialize(deserializer)?;
                <$type>::parse(&text).map_err(serde::de::Error::custom)
            }
        }
    };
}

/// [`text_value_impls`] plus a `Display` impl that writes
/// [`HeaderValue::to_header_text`](crate::types::HeaderValue::to_header_text).
macro_rules! header_value_impls {
    ($type:ty) => {
        impl std::fmt::Display for $type {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&$crate::types::header_value::HeaderValue::to_header_text(self))
            }
        }

        text_value_impls!($type);
    };
}
