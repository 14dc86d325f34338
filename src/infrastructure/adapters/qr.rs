//! QR renderer adapter
//!
//! Real QR image rendering lives outside this core. This adapter produces a
//! data URL carrying the wallet address so clients always have something to
//! display; a rendering failure is non-fatal to payment creation.

use crate::domain::catalog::QrRenderer;
use crate::shared::error::{AppError, AppResult};
use base64::Engine;

#[derive(Clone, Default)]
pub struct DataUrlQrRenderer;

impl DataUrlQrRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl QrRenderer for DataUrlQrRenderer {
    fn render_qr(&self, wallet_address: &str) -> AppResult<String> {
        if wallet_address.is_empty() {
            return Err(AppError::Validation("empty wallet address".into()));
        }
        let encoded = base64::engine::general_purpose::STANDARD.encode(wallet_address);
        Ok(format!("data:text/plain;base64,{}", encoded))
    }
}
