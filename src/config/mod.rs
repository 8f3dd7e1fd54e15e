//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! tool config (TOML, optional)          contract file (JSON)
//!     → loader.rs (parse & deserialize)     → loader.rs
//!     → validation.rs (semantic checks)     → validation.rs
//!     → ToolConfig (immutable)              → BindRequest
//!     → passed by reference to every component
//! ```
//!
//! # Design Decisions
//! - Config is resolved once at startup and never mutated
//! - All fields have defaults to allow running without a config file
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_config_or_default, load_contract_file, ConfigError};
pub use schema::{
    ConfirmationConfig, ContractFile, Network, NetworkConfig, PollStrategyKind, SignerBackend,
    ToolConfig,
};
pub use validation::ValidationError;
