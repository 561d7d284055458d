//! Disbursement engine: the five ways of paying out a batch.
//!
//! Every path runs in the same order:
//! 1. validate the batch and admit the payment (no writes),
//! 2. book the fee and the batch counters,
//! 3. pull what is owed from the caller and run the transfers in input order,
//! 4. refund the surplus (native paths only).
//!
//! A failing transfer panics inside the token contract and aborts the whole
//! invocation, which discards everything done in steps 2 to 4.

use soroban_sdk::{log, token, Address, Env, Vec};

use crate::nft::NonFungibleTokenClient;
use crate::types::{DataKey, DisbursementEvents, DisbursementMode, DisbursementReceipt};
use crate::validation::{self, Admission};
use crate::{config, refund, treasury, DisbursementError};

/// Sends `value` native to every recipient.
pub fn native_uniform(
    env: &Env,
    caller: &Address,
    recipients: &Vec<Address>,
    value: i128,
    payment: i128,
) -> Result<DisbursementReceipt, DisbursementError> {
    validation::validate_shape(env, recipients.len(), None)?;
    validation::validate_amount(value)?;
    let principal = validation::uniform_principal(value, recipients.len())?;
    let admission = validation::admit(env, caller, principal, payment)?;

    let batch = OpenBatch::open(
        env,
        caller,
        DisbursementMode::NativeUniform,
        recipients.len(),
        admission,
        payment,
    )?;
    for recipient in recipients.iter() {
        batch.native.transfer(&batch.contract, &recipient, &value);
    }
    Ok(batch.close())
}

/// Sends `values[i]` native to `recipients[i]`.
pub fn native_variable(
    env: &Env,
    caller: &Address,
    recipients: &Vec<Address>,
    values: &Vec<i128>,
    payment: i128,
) -> Result<DisbursementReceipt, DisbursementError> {
    validation::validate_shape(env, recipients.len(), Some(values.len()))?;
    validation::validate_amounts(values)?;
    let principal = validation::variable_principal(values)?;
    let admission = validation::admit(env, caller, principal, payment)?;

    let batch = OpenBatch::open(
        env,
        caller,
        DisbursementMode::NativeVariable,
        recipients.len(),
        admission,
        payment,
    )?;
    for (recipient, value) in recipients.iter().zip(values.iter()) {
        batch.native.transfer(&batch.contract, &recipient, &value);
    }
    Ok(batch.close())
}

/// Moves `value` units of `token` from the caller to every recipient,
/// spending the allowance the caller granted this contract.
pub fn fungible_uniform(
    env: &Env,
    caller: &Address,
    token: &Address,
    recipients: &Vec<Address>,
    value: i128,
    payment: i128,
) -> Result<DisbursementReceipt, DisbursementError> {
    validation::validate_shape(env, recipients.len(), None)?;
    validation::validate_amount(value)?;
    let admission = validation::admit(env, caller, 0, payment)?;

    let batch = OpenBatch::open(
        env,
        caller,
        DisbursementMode::FungibleUniform,
        recipients.len(),
        admission,
        payment,
    )?;
    let ledger = token::Client::new(env, token);
    for recipient in recipients.iter() {
        ledger.transfer_from(&batch.contract, caller, &recipient, &value);
    }
    Ok(batch.close())
}

/// Moves `values[i]` units of `token` from the caller to `recipients[i]`.
pub fn fungible_variable(
    env: &Env,
    caller: &Address,
    token: &Address,
    recipients: &Vec<Address>,
    values: &Vec<i128>,
    payment: i128,
) -> Result<DisbursementReceipt, DisbursementError> {
    validation::validate_shape(env, recipients.len(), Some(values.len()))?;
    validation::validate_amounts(values)?;
    let admission = validation::admit(env, caller, 0, payment)?;

    let batch = OpenBatch::open(
        env,
        caller,
        DisbursementMode::FungibleVariable,
        recipients.len(),
        admission,
        payment,
    )?;
    let ledger = token::Client::new(env, token);
    for (recipient, value) in recipients.iter().zip(values.iter()) {
        ledger.transfer_from(&batch.contract, caller, &recipient, &value);
    }
    Ok(batch.close())
}

/// Hands `token_ids[i]` to `recipients[i]` through the caller's operator approval.
pub fn non_fungible(
    env: &Env,
    caller: &Address,
    token: &Address,
    recipients: &Vec<Address>,
    token_ids: &Vec<u32>,
    payment: i128,
) -> Result<DisbursementReceipt, DisbursementError> {
    validation::validate_shape(env, recipients.len(), Some(token_ids.len()))?;
    let admission = validation::admit(env, caller, 0, payment)?;

    let batch = OpenBatch::open(
        env,
        caller,
        DisbursementMode::NonFungible,
        recipients.len(),
        admission,
        payment,
    )?;
    let ledger = NonFungibleTokenClient::new(env, token);
    for (recipient, token_id) in recipients.iter().zip(token_ids.iter()) {
        ledger.transfer_from(&batch.contract, caller, &recipient, &token_id);
    }
    Ok(batch.close())
}

/// Lifetime number of batches disbursed.
pub fn total_batches(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::TotalBatches)
        .unwrap_or(0)
}

/// Lifetime number of recipients paid.
pub fn total_recipients(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::TotalRecipients)
        .unwrap_or(0)
}

/// An admitted batch whose bookkeeping is done and whose payment is held by
/// the contract for the duration of the transfers. Token modes hold the fee only.
struct OpenBatch<'a> {
    env: &'a Env,
    caller: &'a Address,
    batch_id: u64,
    mode: DisbursementMode,
    recipients: u32,
    admission: Admission,
    native: token::Client<'a>,
    contract: Address,
}

impl<'a> OpenBatch<'a> {
    fn open(
        env: &'a Env,
        caller: &'a Address,
        mode: DisbursementMode,
        recipients: u32,
        admission: Admission,
        payment: i128,
    ) -> Result<Self, DisbursementError> {
        let native = config::native_token(env)?;

        // Bookkeeping first; no external call has happened yet.
        treasury::credit(env, admission.fee)?;
        let batch_id = total_batches(env) + 1;
        env.storage()
            .instance()
            .set(&DataKey::TotalBatches, &batch_id);
        env.storage().instance().set(
            &DataKey::TotalRecipients,
            &(total_recipients(env) + recipients as u64),
        );
        DisbursementEvents::batch_started(env, batch_id, mode, recipients);

        let batch = OpenBatch {
            env,
            caller,
            batch_id,
            mode,
            recipients,
            admission,
            native: token::Client::new(env, &native),
            contract: env.current_contract_address(),
        };
        // Token modes take only the fee; the surplus never leaves the caller.
        let pulled = if mode.is_native() {
            payment
        } else {
            batch.admission.fee
        };
        if pulled > 0 {
            batch.native.transfer(caller, &batch.contract, &pulled);
        }
        Ok(batch)
    }

    fn close(self) -> DisbursementReceipt {
        let refund = if self.mode.is_native() {
            refund::return_surplus(
                &self.native,
                &self.contract,
                self.caller,
                self.admission.surplus,
            )
        } else {
            0
        };
        if refund > 0 {
            DisbursementEvents::refund_sent(self.env, self.batch_id, self.caller, refund);
        }

        let receipt = DisbursementReceipt {
            batch_id: self.batch_id,
            mode: self.mode,
            recipients: self.recipients,
            principal: self.admission.principal,
            fee: self.admission.fee,
            refund,
        };
        DisbursementEvents::batch_completed(self.env, &receipt);
        log!(
            self.env,
            "batch disbursed",
            receipt.batch_id,
            receipt.principal,
            receipt.fee,
            receipt.refund
        );
        receipt
    }
}
