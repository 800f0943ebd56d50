//! Wallet connection lifecycle.
//!
//! A session starts `Disconnected` on every fresh process and only a
//! user-initiated `connect` moves it forward; there is no persisted session
//! and no automatic reconnection.

use std::sync::atomic::{AtomicBool, Ordering};

use alloy_primitives::Address;
use log::{info, warn};
use tokio::sync::RwLock;

use crate::{
    error::{Error, Result},
    network::{ensure_network, NetworkDescriptor},
    provider::WalletProvider,
    units,
};

/// Outcome of a successful connect.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConnectedAccount {
    pub account: Address,
    /// Native balance in display units.
    pub balance: String,
}

enum SessionState {
    Disconnected,
    Connected(ConnectedAccount),
}

/// Owns the connection state and drives network reconciliation.
///
/// Single-writer: only this type mutates session fields; everything else
/// reads through the accessors.
pub struct WalletSession<P> {
    provider: Option<P>,
    network: NetworkDescriptor,
    state: RwLock<SessionState>,
    connecting: AtomicBool,
    last_error: RwLock<Option<String>>,
}

impl<P: WalletProvider> WalletSession<P> {
    pub fn new(provider: Option<P>, network: NetworkDescriptor) -> Self {
        Self {
            provider,
            network,
            state: RwLock::new(SessionState::Disconnected),
            connecting: AtomicBool::new(false),
            last_error: RwLock::new(None),
        }
    }

    /// Connects the wallet: reconcile the network, request account access,
    /// read the native balance.
    ///
    /// Fails fast with [`Error::NoWalletProvider`] when the session was
    /// built without a provider handle, and rejects re-entrant calls while
    /// an attempt is in flight. On any later failure the session falls back
    /// to `Disconnected` and the cause is wrapped in
    /// [`Error::WalletConnectionFailed`]. The connecting flag is cleared on
    /// every exit path.
    pub async fn connect(&self) -> Result<ConnectedAccount> {
        let provider = self.provider.as_ref().ok_or(Error::NoWalletProvider)?;
        if self.connecting.swap(true, Ordering::SeqCst) {
            return Err(Error::ConnectInProgress);
        }

        let result = self.connect_inner(provider).await;
        self.connecting.store(false, Ordering::SeqCst);

        match result {
            Ok(connected) => {
                *self.last_error.write().await = None;
                info!("wallet connected as {}", connected.account);
                Ok(connected)
            }
            Err(err) => {
                *self.state.write().await = SessionState::Disconnected;
                let err = match err {
                    err @ Error::WalletConnectionFailed(_) => err,
                    other => Error::WalletConnectionFailed(Box::new(other)),
                };
                warn!("{err}");
                *self.last_error.write().await = Some(err.to_string());
                Err(err)
            }
        }
    }

    async fn connect_inner(&self, provider: &P) -> Result<ConnectedAccount> {
        ensure_network(provider, &self.network).await?;

        let accounts = provider
            .request_accounts()
            .await
            .map_err(|err| Error::Transport(err.to_string()))?;
        // Multi-account selection is out of scope; the first account wins.
        let account = accounts
            .first()
            .copied()
            .ok_or_else(|| Error::Transport("provider returned no accounts".into()))?;

        let balance = provider
            .native_balance(account)
            .await
            .map_err(|err| Error::Transport(err.to_string()))?;
        let connected = ConnectedAccount {
            account,
            balance: units::format_units(balance),
        };

        *self.state.write().await = SessionState::Connected(connected.clone());
        Ok(connected)
    }

    pub async fn is_connected(&self) -> bool {
        matches!(*self.state.read().await, SessionState::Connected(_))
    }

    pub async fn account(&self) -> Option<Address> {
        match &*self.state.read().await {
            SessionState::Connected(connected) => Some(connected.account),
            SessionState::Disconnected => None,
        }
    }

    pub async fn balance(&self) -> Option<String> {
        match &*self.state.read().await {
            SessionState::Connected(connected) => Some(connected.balance.clone()),
            SessionState::Disconnected => None,
        }
    }

    /// Caller-visible loading flag for an in-flight connect.
    pub fn is_connecting(&self) -> bool {
        self.connecting.load(Ordering::SeqCst)
    }

    /// Human-readable message from the most recent failed connect.
    pub async fn last_error(&self) -> Option<String> {
        self.last_error.read().await.clone()
    }
}
