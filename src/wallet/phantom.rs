//! Phantom browser wallet
//!
//! Talks to the provider the extension injects as `window.solana`. Building
//! and sending the transfer is delegated to the page's fee module, exposed as
//! `window.pwnFee.payFee(account, options)`.

use wasm_bindgen::prelude::*;

use super::{AccountId, TxId, Wallet, WalletConfig, WalletError};

#[wasm_bindgen(inline_js = "
    export function phantom_available() {
        return 'solana' in window && !!window.solana && !!window.solana.isPhantom;
    }

    export function phantom_is_connected() {
        return !!(window.solana && window.solana.isConnected);
    }

    export async function phantom_connect() {
        const resp = await window.solana.connect();
        return resp.publicKey.toString();
    }

    export function phantom_disconnect() {
        if (window.solana) {
            window.solana.disconnect();
        }
    }

    export function open_install_page() {
        window.open('https://phantom.app/', '_blank');
    }

    export async function page_pay_fee(account, rpcUrl, mint, burn, amount) {
        if (!window.pwnFee || !window.pwnFee.payFee) {
            throw new Error('fee module not loaded');
        }
        return await window.pwnFee.payFee(account, { rpcUrl, mint, burn, amount });
    }
")]
extern "C" {
    fn phantom_available() -> bool;
    fn phantom_is_connected() -> bool;
    #[wasm_bindgen(catch)]
    async fn phantom_connect() -> Result<JsValue, JsValue>;
    fn phantom_disconnect();
    fn open_install_page();
    #[wasm_bindgen(catch)]
    async fn page_pay_fee(
        account: &str,
        rpc_url: &str,
        mint: &str,
        burn: &str,
        amount: f64,
    ) -> Result<JsValue, JsValue>;
}

/// Best-effort message out of a thrown JS value
fn js_message(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    js_sys::Reflect::get(value, &JsValue::from_str("message"))
        .ok()
        .and_then(|m| m.as_string())
        .unwrap_or_else(|| format!("{:?}", value))
}

pub struct PhantomWallet {
    config: WalletConfig,
}

impl PhantomWallet {
    pub fn new(config: WalletConfig) -> Self {
        Self { config }
    }

    pub fn is_installed(&self) -> bool {
        phantom_available()
    }
}

impl Wallet for PhantomWallet {
    async fn connect(&self) -> Result<AccountId, WalletError> {
        if !phantom_available() {
            open_install_page();
            return Err(WalletError::NotInstalled);
        }
        let key = phantom_connect().await.map_err(|e| {
            log::warn!("Phantom connect failed: {}", js_message(&e));
            WalletError::Rejected
        })?;
        key.as_string()
            .as_deref()
            .and_then(AccountId::parse)
            .ok_or_else(|| WalletError::Network("wallet returned no public key".to_string()))
    }

    async fn pay_fee(&self, account: &AccountId) -> Result<TxId, WalletError> {
        let config = &self.config;
        let tx = page_pay_fee(
            account.as_str(),
            &config.rpc_url,
            &config.token_mint,
            &config.burn_address,
            config.fee_amount as f64,
        )
        .await
        .map_err(|e| WalletError::from_message(&js_message(&e)))?;
        tx.as_string()
            .ok_or_else(|| WalletError::Network("fee module returned no signature".to_string()))
    }

    fn disconnect(&self) {
        phantom_disconnect();
    }

    fn is_connected(&self) -> bool {
        phantom_is_connected()
    }
}
