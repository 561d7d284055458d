//! Exemption registry: addresses that bought their way out of the per-call fee.

use soroban_sdk::{Address, Env};

use crate::types::DataKey;
use crate::validation::validate_amount;
use crate::{fees, treasury, DisbursementError};

pub fn is_exempt(env: &Env, address: &Address) -> bool {
    env.storage()
        .persistent()
        .get(&DataKey::Exempt(address.clone()))
        .unwrap_or(false)
}

/// Records `beneficiary` as a member and books the whole payment as revenue.
///
/// Only state is touched here; pulling the payment is left to the caller so
/// that it happens after the bookkeeping.
pub fn enroll(env: &Env, beneficiary: &Address, payment: i128) -> Result<(), DisbursementError> {
    validate_amount(payment)?;
    if payment < fees::exemption_price(env)? {
        return Err(DisbursementError::PriceNotMet);
    }
    if is_exempt(env, beneficiary) {
        return Err(DisbursementError::AlreadyMember);
    }

    env.storage()
        .persistent()
        .set(&DataKey::Exempt(beneficiary.clone()), &true);
    treasury::credit(env, payment)
}

/// Removes a membership. Revoking an address that isn't a member is an error.
pub fn revoke(env: &Env, target: &Address) -> Result<(), DisbursementError> {
    if !is_exempt(env, target) {
        return Err(DisbursementError::NotMember);
    }
    env.storage()
        .persistent()
        .remove(&DataKey::Exempt(target.clone()));
    Ok(())
}
