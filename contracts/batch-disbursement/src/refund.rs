//! Refund of overpayment on native disbursements.

use soroban_sdk::{token, Address};

use crate::DisbursementError;

/// Whatever is left of `payment` once principal and fee are covered.
pub fn surplus(payment: i128, principal: i128, fee: i128) -> Result<i128, DisbursementError> {
    let owed = principal
        .checked_add(fee)
        .ok_or(DisbursementError::AmountOverflow)?;
    if payment < owed {
        return Err(DisbursementError::InsufficientPayment);
    }
    Ok(payment - owed)
}

/// Sends exactly `surplus` back to the caller. Must run after every recipient
/// transfer has gone through.
pub fn return_surplus(
    native: &token::Client,
    contract: &Address,
    caller: &Address,
    surplus: i128,
) -> i128 {
    if surplus > 0 {
        native.transfer(contract, caller, &surplus);
    }
    surplus.max(0)
}
