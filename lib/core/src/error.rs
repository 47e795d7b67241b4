//! Error handling foundation for EzDoc.
//!
//! Only the `Result` alias lives here. Each crate owns its domain error
//! enums and wraps them in a `rootcause` report at its public boundary.

use rootcause::Report;

/// A Result type alias using rootcause's Report for error handling.
pub type Result<T, C = ()> = std::result::Result<T, Report<C>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_alias_defaults_context() {
        let ok: Result<&str> = Ok("ready");
        assert_eq!(ok.expect("should be ok"), "ready");
    }
}
