/// Diálogos bloqueantes (confirm / alert)
pub trait UserDialogs {
    fn confirm(&self, message: &str) -> bool;
    fn alert(&self, message: &str);
}

#[cfg(target_arch = "wasm32")]
pub use browser::BrowserDialogs;

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::UserDialogs;
    use web_sys::window;

    /// `window.confirm` / `window.alert`
    #[derive(Debug, Clone, Copy, Default)]
    pub struct BrowserDialogs;

    impl UserDialogs for BrowserDialogs {
        fn confirm(&self, message: &str) -> bool {
            window()
                .and_then(|w| w.confirm_with_message(message).ok())
                .unwrap_or(false)
        }

        fn alert(&self, message: &str) {
            if let Some(win) = window() {
                let _ = win.alert_with_message(message);
            }
        }
    }
}
