//! Admission checks shared by every disbursement path.
//!
//! Nothing in here writes state: a batch is either admitted with its payment
//! split into principal, fee and surplus, or rejected before any transfer.

use soroban_sdk::{Address, Env, Vec};

use crate::{config, fees, membership, refund, DisbursementError};

/// How an admitted batch's attached payment is split.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Admission {
    /// Native value owed to recipients
    pub principal: i128,
    /// Fee owed to the treasury
    pub fee: i128,
    /// Overpayment, refunded on native paths and never collected on token paths
    pub surplus: i128,
}

/// Checks that per-recipient values or token ids line up with the recipients.
pub fn validate_arity(recipient_count: u32, entry_count: u32) -> Result<(), DisbursementError> {
    if recipient_count != entry_count {
        return Err(DisbursementError::ArityMismatch);
    }
    Ok(())
}

/// Checks `1 <= recipient_count <= max_batch_size`.
pub fn validate_batch_size(
    recipient_count: u32,
    max_batch_size: u32,
) -> Result<(), DisbursementError> {
    if recipient_count == 0 {
        return Err(DisbursementError::EmptyBatch);
    }
    if recipient_count > max_batch_size {
        return Err(DisbursementError::BatchTooLarge);
    }
    Ok(())
}

/// Amounts, prices and payments are unsigned quantities carried in an `i128`.
pub fn validate_amount(amount: i128) -> Result<(), DisbursementError> {
    if amount < 0 {
        return Err(DisbursementError::InvalidAmount);
    }
    Ok(())
}

pub fn validate_amounts(values: &Vec<i128>) -> Result<(), DisbursementError> {
    for value in values.iter() {
        validate_amount(value)?;
    }
    Ok(())
}

/// Structural checks for a batch. `entry_count` is the length of the
/// per-recipient values or token ids, if the mode carries one.
pub fn validate_shape(
    env: &Env,
    recipient_count: u32,
    entry_count: Option<u32>,
) -> Result<(), DisbursementError> {
    if let Some(entries) = entry_count {
        validate_arity(recipient_count, entries)?;
    }
    validate_batch_size(recipient_count, config::max_batch_size(env)?)
}

/// `value` sent to each of `recipient_count` recipients.
pub fn uniform_principal(value: i128, recipient_count: u32) -> Result<i128, DisbursementError> {
    value
        .checked_mul(recipient_count as i128)
        .ok_or(DisbursementError::AmountOverflow)
}

pub fn variable_principal(values: &Vec<i128>) -> Result<i128, DisbursementError> {
    values.iter().try_fold(0i128, |total, value| {
        total
            .checked_add(value)
            .ok_or(DisbursementError::AmountOverflow)
    })
}

/// Members of the exemption registry pay no per-call fee.
pub fn applicable_fee(env: &Env, caller: &Address) -> Result<i128, DisbursementError> {
    if membership::is_exempt(env, caller) {
        return Ok(0);
    }
    fees::per_call_fee(env)
}

/// Splits `payment` into principal, fee and surplus, or rejects it with
/// `InsufficientPayment` when it doesn't cover principal plus fee.
pub fn admit(
    env: &Env,
    caller: &Address,
    principal: i128,
    payment: i128,
) -> Result<Admission, DisbursementError> {
    validate_amount(payment)?;
    let fee = applicable_fee(env, caller)?;
    let surplus = refund::surplus(payment, principal, fee)?;

    Ok(Admission {
        principal,
        fee,
        surplus,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use soroban_sdk::{vec, Env};

    #[test]
    fn test_validate_arity() {
        assert!(validate_arity(3, 3).is_ok());
        assert_eq!(validate_arity(3, 2), Err(DisbursementError::ArityMismatch));
        assert_eq!(
            validate_arity(300, 2),
            Err(DisbursementError::ArityMismatch)
        );
    }

    #[test]
    fn test_validate_batch_size_bounds() {
        assert!(validate_batch_size(1, 255).is_ok());
        assert!(validate_batch_size(255, 255).is_ok());
        assert_eq!(
            validate_batch_size(256, 255),
            Err(DisbursementError::BatchTooLarge)
        );
        assert_eq!(
            validate_batch_size(0, 255),
            Err(DisbursementError::EmptyBatch)
        );
    }

    #[test]
    fn test_validate_amount() {
        assert!(validate_amount(0).is_ok());
        assert!(validate_amount(i128::MAX).is_ok());
        assert_eq!(validate_amount(-1), Err(DisbursementError::InvalidAmount));
    }

    #[test]
    fn test_validate_amounts_rejects_any_negative() {
        let env = Env::default();
        assert!(validate_amounts(&vec![&env, 1i128, 2, 3]).is_ok());
        assert_eq!(
            validate_amounts(&vec![&env, 1i128, -2, 3]),
            Err(DisbursementError::InvalidAmount)
        );
    }

    #[test]
    fn test_uniform_principal() {
        assert_eq!(uniform_principal(10_000_000, 3), Ok(30_000_000));
        assert_eq!(
            uniform_principal(i128::MAX, 2),
            Err(DisbursementError::AmountOverflow)
        );
    }

    #[test]
    fn test_variable_principal() {
        let env = Env::default();
        assert_eq!(
            variable_principal(&vec![&env, 10i128, 20, 30]),
            Ok(60)
        );
        assert_eq!(
            variable_principal(&vec![&env, i128::MAX, 1]),
            Err(DisbursementError::AmountOverflow)
        );
    }

    #[test]
    fn test_surplus_is_exact() {
        // 4 units sent for 3 units of principal and a 0.1 unit fee
        assert_eq!(
            refund::surplus(40_000_000, 30_000_000, 1_000_000),
            Ok(9_000_000)
        );
        assert_eq!(refund::surplus(31_000_000, 30_000_000, 1_000_000), Ok(0));
        assert_eq!(
            refund::surplus(30_999_999, 30_000_000, 1_000_000),
            Err(DisbursementError::InsufficientPayment)
        );
    }
}
