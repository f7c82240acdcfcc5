//! Payment gate state machine
//!
//! The gate is updated in short synchronous steps so callers sharing it
//! through a `RefCell` never hold a borrow across a wallet `.await`.

use std::cell::RefCell;

use super::{AccountId, TxId, Wallet, WalletConfig, WalletError};
use crate::platform::KeyValueStore;

#[derive(Debug, Clone, PartialEq)]
pub enum GateStatus {
    Disconnected,
    Connecting,
    Connected(AccountId),
    Paying(AccountId),
    /// Fee burned, game visible
    Unlocked { account: AccountId, tx: TxId },
}

#[derive(Debug, Clone)]
pub struct PaymentGate {
    status: GateStatus,
    message: String,
    config: WalletConfig,
}

impl PaymentGate {
    pub fn new(config: WalletConfig) -> Self {
        Self {
            status: GateStatus::Disconnected,
            message: "Connect your wallet to play".to_string(),
            config,
        }
    }

    pub fn status(&self) -> &GateStatus {
        &self.status
    }

    /// User-visible status line
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn config(&self) -> &WalletConfig {
        &self.config
    }

    pub fn is_unlocked(&self) -> bool {
        matches!(self.status, GateStatus::Unlocked { .. })
    }

    pub fn account(&self) -> Option<&AccountId> {
        match &self.status {
            GateStatus::Connected(account)
            | GateStatus::Paying(account)
            | GateStatus::Unlocked { account, .. } => Some(account),
            GateStatus::Disconnected | GateStatus::Connecting => None,
        }
    }

    /// Pick up an account stored by an earlier visit. Only honored while the
    /// wallet still reports the site as connected.
    pub fn restore(&mut self, store: &impl KeyValueStore, wallet_connected: bool) {
        if self.status != GateStatus::Disconnected || !wallet_connected {
            return;
        }
        let Some(raw) = store.get(&self.config.storage_key) else {
            return;
        };
        match AccountId::parse(&raw) {
            Some(account) => {
                log::info!("Restored wallet {}", account);
                self.message = format!("Connected: {}", account.short());
                self.status = GateStatus::Connected(account);
            }
            None => {
                log::warn!("Discarding malformed stored account");
                if let Err(e) = store.remove(&self.config.storage_key) {
                    log::warn!("Could not clear stored account: {}", e);
                }
            }
        }
    }

    /// Returns false if a connect is already underway or done
    pub fn begin_connect(&mut self) -> bool {
        if self.status != GateStatus::Disconnected {
            return false;
        }
        self.status = GateStatus::Connecting;
        self.message = "Connecting...".to_string();
        true
    }

    pub fn finish_connect(
        &mut self,
        result: Result<AccountId, WalletError>,
        store: &impl KeyValueStore,
    ) {
        if self.status != GateStatus::Connecting {
            return;
        }
        match result {
            Ok(account) => {
                log::info!("Connected to wallet: {}", account);
                if let Err(e) = store.set(&self.config.storage_key, account.as_str()) {
                    log::warn!("Could not persist account: {}", e);
                }
                self.message = format!("Connected: {}", account.short());
                self.status = GateStatus::Connected(account);
            }
            Err(e) => {
                log::error!("Connection failed: {}", e);
                self.message = e.to_string();
                self.status = GateStatus::Disconnected;
            }
        }
    }

    /// Account to charge, if the gate is ready for a payment
    pub fn begin_payment(&mut self) -> Option<AccountId> {
        let GateStatus::Connected(account) = &self.status else {
            return None;
        };
        let account = account.clone();
        self.message = format!("Burning {} $PWN...", self.config.fee_tokens());
        self.status = GateStatus::Paying(account.clone());
        Some(account)
    }

    pub fn finish_payment(&mut self, result: Result<TxId, WalletError>) {
        let GateStatus::Paying(account) = &self.status else {
            return;
        };
        let account = account.clone();
        match result {
            Ok(tx) => {
                log::info!("Fee paid and burned: {}", tx);
                self.message = format!("Fee paid! Tx: {}", tx);
                self.status = GateStatus::Unlocked { account, tx };
            }
            Err(e) => {
                log::error!("Fee payment failed: {}", e);
                self.message = e.to_string();
                self.status = GateStatus::Connected(account);
            }
        }
    }

    /// Forget the account (the wallet is told separately)
    pub fn disconnect(&mut self, store: &impl KeyValueStore) {
        if let Err(e) = store.remove(&self.config.storage_key) {
            log::warn!("Could not clear stored account: {}", e);
        }
        self.status = GateStatus::Disconnected;
        self.message = "Disconnected".to_string();
        log::info!("Disconnected from wallet");
    }
}

/// Connect through `wallet`, updating the shared gate around the await
pub async fn connect_flow<W: Wallet, S: KeyValueStore>(
    gate: &RefCell<PaymentGate>,
    wallet: &W,
    store: &S,
) {
    if !gate.borrow_mut().begin_connect() {
        return;
    }
    let result = wallet.connect().await;
    gate.borrow_mut().finish_connect(result, store);
}

/// Pay the fee through `wallet`. Returns true once the gate is unlocked.
pub async fn payment_flow<W: Wallet>(gate: &RefCell<PaymentGate>, wallet: &W) -> bool {
    let account = gate.borrow_mut().begin_payment();
    let Some(account) = account else {
        return gate.borrow().is_unlocked();
    };
    let result = wallet.pay_fee(&account).await;
    let mut gate = gate.borrow_mut();
    gate.finish_payment(result);
    gate.is_unlocked()
}
