//! Logger installation. The crate itself only uses the `log` facade.

use std::sync::Once;

static INIT: Once = Once::new();

/// Installs a logger once per process: `console_log` in the browser,
/// `env_logger` (honouring `RUST_LOG`) everywhere else.
pub fn init() {
    INIT.call_once(|| {
        #[cfg(target_arch = "wasm32")]
        {
            #[cfg(feature = "console_error_panic_hook")]
            console_error_panic_hook::set_once();
            // Another logger may already be installed by the host page.
            let _ = console_log::init_with_level(log::Level::Info);
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = env_logger::Builder::from_env(
                env_logger::Env::default().default_filter_or("info"),
            )
            .try_init();
        }
    });
}
