//! Configuration schema definitions.
//!
//! `ToolConfig` holds every environment-specific parameter of the tool and
//! is resolved once at startup. All fields have defaults, so running with no
//! config file at all targets the public BSC endpoints.

use serde::{Deserialize, Serialize};

/// Root configuration for the bind tool.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct ToolConfig {
    /// Endpoints and chain parameters per network.
    pub networks: NetworksConfig,

    /// Token manager and relay fee.
    pub bind: BindConfig,

    /// Receipt polling.
    pub confirmation: ConfirmationConfig,

    /// Leftover-balance sweep.
    pub refund: RefundConfig,

    /// Operating-account keystore location.
    pub keystore: KeystoreConfig,

    /// Signing backend selection.
    pub signer: SignerConfig,

    /// Logging settings.
    pub observability: ObservabilityConfig,
}

/// Selectable networks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    Testnet,
}

impl std::fmt::Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Mainnet => f.write_str("mainnet"),
            Self::Testnet => f.write_str("testnet"),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct NetworksConfig {
    pub mainnet: NetworkConfig,
    pub testnet: NetworkConfig,
}

impl NetworksConfig {
    pub fn get(&self, network: Network) -> &NetworkConfig {
        match network {
            Network::Mainnet => &self.mainnet,
            Network::Testnet => &self.testnet,
        }
    }
}

impl Default for NetworksConfig {
    fn default() -> Self {
        Self {
            mainnet: NetworkConfig {
                rpc_url: "https://bsc-dataseed1.binance.org".to_string(),
                failover_urls: vec!["https://bsc-dataseed2.binance.org".to_string()],
                chain_id: 56,
                ..NetworkConfig::default()
            },
            testnet: NetworkConfig {
                rpc_url: "https://data-seed-prebsc-1-s1.binance.org:8545".to_string(),
                failover_urls: vec!["https://data-seed-prebsc-2-s1.binance.org:8545".to_string()],
                chain_id: 97,
                ..NetworkConfig::default()
            },
        }
    }
}

/// Chain endpoint configuration.
///
/// A partially overridden network table must still name its `rpc_url` and
/// `chain_id`; validation rejects the empty defaults.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct NetworkConfig {
    /// JSON-RPC endpoint URL.
    pub rpc_url: String,

    /// Failover JSON-RPC endpoint URLs.
    pub failover_urls: Vec<String>,

    /// Chain ID (56 for BSC mainnet, 97 for BSC testnet).
    pub chain_id: u64,

    /// RPC request timeout in seconds.
    pub rpc_timeout_secs: u64,

    /// Gas price multiplier (1.0 = node price, 1.2 = 20% buffer).
    pub gas_price_multiplier: f64,

    /// Maximum gas price in gwei (protection against spikes).
    pub max_gas_price_gwei: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            rpc_url: String::new(),
            failover_urls: Vec::new(),
            chain_id: 0,
            rpc_timeout_secs: 10,
            gas_price_multiplier: 1.0,
            max_gas_price_gwei: 100,
        }
    }
}

/// Token manager interaction.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct BindConfig {
    /// Token manager system contract address.
    pub token_manager: String,

    /// Relay fee paid with `approveBind` and `rejectBind`, in wei.
    pub relay_fee_wei: u64,

    /// Gas limit for `approveBind` and `rejectBind`. Fixed rather than
    /// estimated so a bind the token manager will refuse still gets mined
    /// (and can then be rejected) instead of failing estimation.
    pub handshake_gas_limit: u64,
}

impl Default for BindConfig {
    fn default() -> Self {
        Self {
            token_manager: "0x0000000000000000000000000000000000001008".to_string(),
            relay_fee_wei: 10_000_000_000_000_000, // 0.01 BNB
            handshake_gas_limit: 300_000,
        }
    }
}

/// Receipt polling strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PollStrategyKind {
    Backoff,
    FixedDelay,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ConfirmationConfig {
    pub strategy: PollStrategyKind,

    /// First backoff delay in milliseconds.
    pub initial_delay_ms: u64,

    /// Backoff ceiling in milliseconds.
    pub max_delay_ms: u64,

    /// Give up waiting after this many seconds.
    pub timeout_secs: u64,

    /// Single sleep used by the fixed-delay strategy.
    pub fixed_delay_secs: u64,
}

impl Default for ConfirmationConfig {
    fn default() -> Self {
        Self {
            strategy: PollStrategyKind::Backoff,
            initial_delay_ms: 1_000,
            max_delay_ms: 8_000,
            timeout_secs: 120,
            fixed_delay_secs: 10,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct RefundConfig {
    /// Balances below this many wei are left alone.
    pub dust_threshold_wei: u64,
}

impl Default for RefundConfig {
    fn default() -> Self {
        Self {
            dust_threshold_wei: 100_000_000_000_000, // 0.0001 BNB
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct KeystoreConfig {
    /// Directory holding the operating account's encrypted key.
    pub dir: String,

    /// Environment variable carrying the keystore password.
    pub password_env: String,
}

impl Default for KeystoreConfig {
    fn default() -> Self {
        Self {
            dir: "bind_keystore".to_string(),
            password_env: "TOKEN_BIND_KEYSTORE_PASSWORD".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SignerBackend {
    Keystore,
    Ledger,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct SignerConfig {
    /// Which backend signs the workflow's transactions.
    pub backend: SignerBackend,

    /// Ledger Live account index.
    pub ledger_index: usize,
}

impl Default for SignerConfig {
    fn default() -> Self {
        Self {
            backend: SignerBackend::Keystore,
            ledger_index: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

/// Per-token input file, in the JSON layout operators already keep.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ContractFile {
    /// Hex-encoded creation bytecode of the BEP20 token.
    pub contract_data: String,

    /// BEP20 symbol, for display.
    pub symbol: String,

    /// Legacy (BEP2) symbol the token manager binds to.
    pub bep2_symbol: String,

    /// Custody account receiving ownership and leftover funds.
    pub ledger_account: String,
}
