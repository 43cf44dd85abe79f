//! Helper macro for outbound port error enums.
//!
//! Every outbound failure carries a human-readable `message`; the macro adds a
//! snake_case constructor per variant taking `impl Into<String>` and a
//! [`message`](#method.message) accessor shared by all variants.

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $display:literal
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($display)]
                $variant { message: String },
            )*
        }

        impl $name {
            $(
                ::paste::paste! {
                    #[doc = concat!("Build a [`", stringify!($name), "::", stringify!($variant), "`].")]
                    pub fn [<$variant:snake>](message: impl Into<String>) -> Self {
                        Self::$variant { message: message.into() }
                    }
                }
            )*

            /// Detail reported by the adapter.
            pub fn message(&self) -> &str {
                match self {
                    $( Self::$variant { message } => message.as_str(), )*
                }
            }
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    define_port_error! {
        pub enum ExamplePortError {
            Timeout => "timed out: {message}",
            RateLimited => "rate limited: {message}",
        }
    }

    #[test]
    fn constructors_accept_str() {
        let err = ExamplePortError::timeout("after 10s");
        assert_eq!(err.to_string(), "timed out: after 10s");
        assert_eq!(err.message(), "after 10s");
    }

    #[test]
    fn constructors_use_snake_case_names() {
        let err = ExamplePortError::rate_limited(String::from("slow down"));
        assert!(matches!(err, ExamplePortError::RateLimited { .. }));
    }
}
