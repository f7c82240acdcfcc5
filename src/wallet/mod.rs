//! Fee payment in front of the game
//!
//! The game canvas stays locked until a `$PWN` fee is burned from the
//! player's wallet. The wallet itself is an injected capability
//! ([`Wallet`]); [`PaymentGate`] owns the flow and the status line.

pub mod gate;
#[cfg(target_arch = "wasm32")]
pub mod phantom;

use std::fmt;

pub use gate::{GateStatus, PaymentGate, connect_flow, payment_flow};
#[cfg(target_arch = "wasm32")]
pub use phantom::PhantomWallet;

/// Why a wallet call failed. None of these are retried automatically.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WalletError {
    #[error("Please install the Phantom wallet extension!")]
    NotInstalled,
    #[error("User rejected the request or an error occurred")]
    Rejected,
    #[error("Player does not have a $PWN token account")]
    MissingTokenAccount,
    #[error("Network error: {0}")]
    Network(String),
}

impl WalletError {
    /// Classify a failure message coming back from the wallet/RPC side
    pub fn from_message(message: &str) -> Self {
        let lower = message.to_lowercase();
        if lower.contains("not detected") || lower.contains("not installed") {
            WalletError::NotInstalled
        } else if lower.contains("token account") {
            WalletError::MissingTokenAccount
        } else if lower.contains("rejected") || lower.contains("denied") {
            WalletError::Rejected
        } else {
            WalletError::Network(message.to_string())
        }
    }
}

const BASE58_ALPHABET: &str = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// A base58 wallet public key
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AccountId(String);

impl AccountId {
    /// Accepts 32-44 base58 characters, the shape of a Solana public key
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let valid_len = (32..=44).contains(&raw.len());
        if valid_len && raw.chars().all(|c| BASE58_ALPHABET.contains(c)) {
            Some(Self(raw.to_string()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `AbCd...WxYz` for the status line
    pub fn short(&self) -> String {
        let (head, tail) = (&self.0[..4], &self.0[self.0.len() - 4..]);
        format!("{}...{}", head, tail)
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Signature of the confirmed fee transaction
pub type TxId = String;

/// Injected wallet capability
#[allow(async_fn_in_trait)]
pub trait Wallet {
    /// Ask the user to connect; resolves to their public key
    async fn connect(&self) -> Result<AccountId, WalletError>;
    /// Burn the fee from `account`; resolves once the transaction is confirmed
    async fn pay_fee(&self, account: &AccountId) -> Result<TxId, WalletError>;
    fn disconnect(&self);
    /// The provider still considers the site connected
    fn is_connected(&self) -> bool;
}

/// Network and token parameters for the fee
#[derive(Debug, Clone, PartialEq)]
pub struct WalletConfig {
    pub rpc_url: String,
    /// `$PWN` mint address
    pub token_mint: String,
    /// Black hole address the fee is sent to
    pub burn_address: String,
    /// Fee in token base units
    pub fee_amount: u64,
    pub token_decimals: u32,
    /// LocalStorage key holding the connected account
    pub storage_key: String,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            rpc_url: "https://api.devnet.solana.com".to_string(),
            token_mint: "HUUaBZFjgPdDqgXLgbo4b83TGuJNrapBQsaR8awHpump".to_string(),
            burn_address: "11111111111111111111111111111111".to_string(),
            fee_amount: 1_000_000,
            token_decimals: 6,
            storage_key: "phantomPublicKey".to_string(),
        }
    }
}

impl WalletConfig {
    /// Fee in whole tokens, for display
    pub fn fee_tokens(&self) -> f64 {
        self.fee_amount as f64 / 10f64.powi(self.token_decimals as i32)
    }
}
