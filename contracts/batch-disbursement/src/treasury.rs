//! Treasury: fee revenue owed to the owner.
//!
//! `AccruedFees` only ever holds per-call fees and membership payments.
//! Recipient principal passes through the contract within a single call and
//! is never booked here.

use soroban_sdk::{log, token, Address, Env};

use crate::types::DataKey;
use crate::{config, DisbursementError};

pub fn accrued_fees(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::AccruedFees)
        .unwrap_or(0)
}

pub fn credit(env: &Env, amount: i128) -> Result<(), DisbursementError> {
    if amount == 0 {
        return Ok(());
    }
    let total = accrued_fees(env)
        .checked_add(amount)
        .ok_or(DisbursementError::AmountOverflow)?;
    env.storage().instance().set(&DataKey::AccruedFees, &total);
    Ok(())
}

/// Pays every accrued fee out to `owner` and resets the ledger to zero.
pub fn withdraw(env: &Env, owner: &Address) -> Result<i128, DisbursementError> {
    let amount = accrued_fees(env);
    if amount == 0 {
        return Err(DisbursementError::NothingToWithdraw);
    }
    let native = config::native_token(env)?;

    // Reset before the transfer leaves the contract.
    env.storage().instance().set(&DataKey::AccruedFees, &0i128);

    token::Client::new(env, &native).transfer(&env.current_contract_address(), owner, &amount);
    log!(env, "fees withdrawn", amount);
    Ok(amount)
}

/// Moves the contract's whole balance of `token` to `owner`.
///
/// For the native token the accrued fees stay behind, so only residual
/// balance (payments left over on token paths, stray deposits) is swept.
pub fn sweep(env: &Env, owner: &Address, token: &Address) -> Result<i128, DisbursementError> {
    let reserved = if *token == config::native_token(env)? {
        accrued_fees(env)
    } else {
        0
    };

    let ledger = token::Client::new(env, token);
    let contract = env.current_contract_address();
    let amount = ledger.balance(&contract).saturating_sub(reserved).max(0);
    if amount > 0 {
        ledger.transfer(&contract, owner, &amount);
    }
    Ok(amount)
}
