//! Deploy-time configuration kept in instance storage.

use soroban_sdk::{Address, Env};

use crate::types::DataKey;
use crate::DisbursementError;

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Owner)
}

pub fn owner(env: &Env) -> Result<Address, DisbursementError> {
    env.storage()
        .instance()
        .get(&DataKey::Owner)
        .ok_or(DisbursementError::NotInitialized)
}

pub fn set_owner(env: &Env, owner: &Address) {
    env.storage().instance().set(&DataKey::Owner, owner);
}

pub fn native_token(env: &Env) -> Result<Address, DisbursementError> {
    env.storage()
        .instance()
        .get(&DataKey::NativeToken)
        .ok_or(DisbursementError::NotInitialized)
}

pub fn set_native_token(env: &Env, token: &Address) {
    env.storage().instance().set(&DataKey::NativeToken, token);
}

pub fn max_batch_size(env: &Env) -> Result<u32, DisbursementError> {
    env.storage()
        .instance()
        .get(&DataKey::MaxBatchSize)
        .ok_or(DisbursementError::NotInitialized)
}

/// Stores a new batch ceiling and returns the previous one, if any.
pub fn set_max_batch_size(env: &Env, limit: u32) -> Result<Option<u32>, DisbursementError> {
    if limit == 0 {
        return Err(DisbursementError::InvalidBatchLimit);
    }
    let previous = env.storage().instance().get(&DataKey::MaxBatchSize);
    env.storage().instance().set(&DataKey::MaxBatchSize, &limit);
    Ok(previous)
}
