use std::panic;

/// Panic hook that records the panic through `tracing`, then hands it to
/// `console_error_panic_hook` for the JS stack trace.
///
/// On non-wasm targets, prints the panic to `stderr`.
pub fn hook(info: &panic::PanicHookInfo) {
    tracing::error!(panic = %info, "client panicked");

    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::hook(info);

    #[cfg(not(target_arch = "wasm32"))]
    {
        use std::io::{self, Write};
        let _ = writeln!(io::stderr(), "{}", info);
    }
}

/// Registers the hook when the WASM module is instantiated.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn init_panic_hook() {
    panic::set_hook(Box::new(hook));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hook_reports_without_aborting_unwind() {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(hook));
        let result = panic::catch_unwind(|| panic!("boom"));
        panic::set_hook(previous);
        assert!(result.is_err());
    }
}
