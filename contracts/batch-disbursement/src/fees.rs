//! Fee schedule: the per-call service fee and the exemption membership price.
//!
//! Both prices are read when a call is admitted, so changing them only
//! affects calls that start afterwards.

use soroban_sdk::Env;

use crate::types::DataKey;
use crate::validation::validate_amount;
use crate::DisbursementError;

pub fn per_call_fee(env: &Env) -> Result<i128, DisbursementError> {
    env.storage()
        .instance()
        .get(&DataKey::PerCallFee)
        .ok_or(DisbursementError::NotInitialized)
}

pub fn exemption_price(env: &Env) -> Result<i128, DisbursementError> {
    env.storage()
        .instance()
        .get(&DataKey::ExemptionPrice)
        .ok_or(DisbursementError::NotInitialized)
}

/// Replaces the per-call fee, returning the previous value (0 on first write).
pub fn set_per_call_fee(env: &Env, fee: i128) -> Result<i128, DisbursementError> {
    replace_price(env, DataKey::PerCallFee, fee)
}

/// Replaces the exemption price, returning the previous value (0 on first write).
pub fn set_exemption_price(env: &Env, price: i128) -> Result<i128, DisbursementError> {
    replace_price(env, DataKey::ExemptionPrice, price)
}

fn replace_price(env: &Env, key: DataKey, price: i128) -> Result<i128, DisbursementError> {
    validate_amount(price)?;
    let previous: i128 = env.storage().instance().get(&key).unwrap_or(0);
    env.storage().instance().set(&key, &price);
    Ok(previous)
}
