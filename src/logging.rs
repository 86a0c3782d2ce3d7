cfg_if::cfg_if! {
    if #[cfg(feature = "defmt")] {
        pub(crate) use defmt::{trace, warn};
    } else if #[cfg(feature = "log")] {
        pub(crate) use ::log::{trace, warn};
    } else {
        // Arguments are still evaluated so that values only used for logging don't warn.
        // Named apart from `warn` so the re-export doesn't clash with the `#[warn]` attribute.
        macro_rules! htu21d_trace {
            ($fmt:literal $(, $arg:expr)* $(,)?) => {{ $( let _ = &$arg; )* }};
        }
        macro_rules! htu21d_warn {
            ($fmt:literal $(, $arg:expr)* $(,)?) => {{ $( let _ = &$arg; )* }};
        }
        pub(crate) use {htu21d_trace as trace, htu21d_warn as warn};
    }
}
