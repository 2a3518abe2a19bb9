mod api_key;
mod key_manager;
mod key_manager_error;
mod key_source;
mod key_usage_ledger;
mod rotation_policy;

pub use api_key::ApiKey;
pub use key_manager::KeyManager;
pub use key_manager_error::KeyManagerError;
pub use key_source::{
    keys_from_lookup, parse_dotenv, KeySource, INDEXED_KEY_PREFIX, SINGLE_KEY_VAR,
};
pub use key_usage_ledger::KeyUsageLedger;
pub use rotation_policy::RotationPolicy;
