//! # Batch Disbursement Contract
//!
//! Pays many recipients from one payer in a single atomic call: native XLM,
//! fungible token balances or non-fungible token ownership.
//!
//! ## Features
//! - Uniform-value and per-recipient-value native and fungible batches
//! - Non-fungible batches, one token id per recipient
//! - Per-call service fee, waived for holders of a purchased exemption
//! - Exact refund of overpayment on native batches
//! - Owner-managed fee schedule, batch ceiling and treasury withdrawal
//!
//! ## Payments
//! Native value is carried by the native Stellar Asset Contract configured at
//! initialization. Callers state the `payment` they attach; the contract pulls
//! exactly that amount, pays the recipients out of it, books the fee and
//! returns whatever is left.

#![no_std]

mod config;
mod disbursement;
mod fees;
mod membership;
mod nft;
mod refund;
mod treasury;
mod types;
mod validation;

use soroban_sdk::{
    contract, contracterror, contractimpl, panic_with_error, token, Address, Env, Vec,
};

pub use crate::nft::{NonFungibleTokenClient, NonFungibleTokenInterface};
pub use crate::types::{
    DataKey, DisbursementEvents, DisbursementMode, DisbursementReceipt, DEFAULT_MAX_BATCH_SIZE,
};

/// Error codes for the batch disbursement contract.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum DisbursementError {
    /// Contract not initialized
    NotInitialized = 1,
    /// Caller is not the owner
    NotAuthorized = 2,
    /// No recipients supplied
    EmptyBatch = 3,
    /// More recipients than the batch ceiling allows
    BatchTooLarge = 4,
    /// Values or token ids don't match the recipients one to one
    ArityMismatch = 5,
    /// Negative amount, price or payment
    InvalidAmount = 6,
    /// Payment doesn't cover principal plus fee
    InsufficientPayment = 7,
    /// Payment below the exemption price
    PriceNotMet = 8,
    /// Address already holds an exemption
    AlreadyMember = 9,
    /// Address holds no exemption
    NotMember = 10,
    /// Treasury is empty
    NothingToWithdraw = 11,
    /// Principal or fee total exceeds i128
    AmountOverflow = 12,
    /// Batch ceiling must be at least 1
    InvalidBatchLimit = 13,
}

#[contract]
pub struct BatchDisbursementContract;

#[contractimpl]
impl BatchDisbursementContract {
    /// Initializes the contract.
    ///
    /// # Arguments
    /// * `owner` - Operator allowed to change prices and withdraw fees
    /// * `native_token` - Stellar Asset Contract of the native asset
    /// * `per_call_fee` - Fee charged on every disbursement by non-members
    /// * `exemption_price` - Price of a fee exemption membership
    /// * `max_batch_size` - Recipient ceiling per call (see `DEFAULT_MAX_BATCH_SIZE`)
    pub fn initialize(
        env: Env,
        owner: Address,
        native_token: Address,
        per_call_fee: i128,
        exemption_price: i128,
        max_batch_size: u32,
    ) {
        if config::is_initialized(&env) {
            panic!("Contract already initialized");
        }

        config::set_owner(&env, &owner);
        config::set_native_token(&env, &native_token);
        or_abort(&env, config::set_max_batch_size(&env, max_batch_size));
        or_abort(&env, fees::set_per_call_fee(&env, per_call_fee));
        or_abort(&env, fees::set_exemption_price(&env, exemption_price));
        env.storage().instance().set(&DataKey::AccruedFees, &0i128);
        env.storage().instance().set(&DataKey::TotalBatches, &0u64);
        env.storage()
            .instance()
            .set(&DataKey::TotalRecipients, &0u64);
    }

    // Disbursements

    /// Sends `value` native to each recipient.
    ///
    /// `payment` must cover `value * recipients.len()` plus the applicable
    /// fee; anything above that is refunded to `caller`.
    pub fn disburse_native_uniform(
        env: Env,
        caller: Address,
        recipients: Vec<Address>,
        value: i128,
        payment: i128,
    ) -> DisbursementReceipt {
        caller.require_auth();
        or_abort(
            &env,
            disbursement::native_uniform(&env, &caller, &recipients, value, payment),
        )
    }

    /// Sends `values[i]` native to `recipients[i]`.
    ///
    /// `payment` must cover the sum of `values` plus the applicable fee;
    /// anything above that is refunded to `caller`.
    pub fn disburse_native_variable(
        env: Env,
        caller: Address,
        recipients: Vec<Address>,
        values: Vec<i128>,
        payment: i128,
    ) -> DisbursementReceipt {
        caller.require_auth();
        or_abort(
            &env,
            disbursement::native_variable(&env, &caller, &recipients, &values, payment),
        )
    }

    /// Moves `value` units of `token` from `caller` to each recipient.
    ///
    /// `caller` must have approved this contract for the total. `payment`
    /// is native and must cover the applicable fee.
    pub fn disburse_fungible_uniform(
        env: Env,
        caller: Address,
        token: Address,
        recipients: Vec<Address>,
        value: i128,
        payment: i128,
    ) -> DisbursementReceipt {
        caller.require_auth();
        or_abort(
            &env,
            disbursement::fungible_uniform(&env, &caller, &token, &recipients, value, payment),
        )
    }

    /// Moves `values[i]` units of `token` from `caller` to `recipients[i]`.
    pub fn disburse_fungible_variable(
        env: Env,
        caller: Address,
        token: Address,
        recipients: Vec<Address>,
        values: Vec<i128>,
        payment: i128,
    ) -> DisbursementReceipt {
        caller.require_auth();
        or_abort(
            &env,
            disbursement::fungible_variable(&env, &caller, &token, &recipients, &values, payment),
        )
    }

    /// Transfers `token_ids[i]` of the non-fungible `token` to `recipients[i]`.
    ///
    /// `caller` must have made this contract an operator on `token`.
    pub fn disburse_non_fungible(
        env: Env,
        caller: Address,
        token: Address,
        recipients: Vec<Address>,
        token_ids: Vec<u32>,
        payment: i128,
    ) -> DisbursementReceipt {
        caller.require_auth();
        or_abort(
            &env,
            disbursement::non_fungible(&env, &caller, &token, &recipients, &token_ids, payment),
        )
    }

    // Exemption membership

    /// Buys a fee exemption for `beneficiary`, paid by `payer`.
    ///
    /// The whole `payment` goes to the treasury, even above the price.
    pub fn purchase_exemption(env: Env, payer: Address, beneficiary: Address, payment: i128) {
        payer.require_auth();
        or_abort(&env, membership::enroll(&env, &beneficiary, payment));

        let native = or_abort(&env, config::native_token(&env));
        if payment > 0 {
            token::Client::new(&env, &native).transfer(
                &payer,
                &env.current_contract_address(),
                &payment,
            );
        }
        DisbursementEvents::member_added(&env, &beneficiary, payment);
    }

    /// Removes the exemption held by `target`.
    pub fn revoke_exemption(env: Env, owner: Address, target: Address) {
        Self::require_owner(&env, &owner);
        or_abort(&env, membership::revoke(&env, &target));
        DisbursementEvents::member_removed(&env, &target);
    }

    /// Returns whether `address` holds a fee exemption.
    pub fn is_exempt(env: Env, address: Address) -> bool {
        membership::is_exempt(&env, &address)
    }

    // Fee schedule and limits

    /// Updates the per-call fee.
    pub fn set_per_call_fee(env: Env, owner: Address, new_fee: i128) {
        Self::require_owner(&env, &owner);
        let old_fee = or_abort(&env, fees::set_per_call_fee(&env, new_fee));
        DisbursementEvents::fee_changed(&env, old_fee, new_fee);
    }

    /// Updates the exemption price.
    pub fn set_exemption_price(env: Env, owner: Address, new_price: i128) {
        Self::require_owner(&env, &owner);
        let old_price = or_abort(&env, fees::set_exemption_price(&env, new_price));
        DisbursementEvents::price_changed(&env, old_price, new_price);
    }

    /// Updates the recipient ceiling per call.
    pub fn set_max_batch_size(env: Env, owner: Address, new_limit: u32) {
        Self::require_owner(&env, &owner);
        let old_limit = or_abort(&env, config::set_max_batch_size(&env, new_limit));
        DisbursementEvents::limit_changed(&env, old_limit.unwrap_or(0), new_limit);
    }

    /// Returns the per-call fee.
    pub fn get_per_call_fee(env: Env) -> i128 {
        or_abort(&env, fees::per_call_fee(&env))
    }

    /// Returns the exemption price.
    pub fn get_exemption_price(env: Env) -> i128 {
        or_abort(&env, fees::exemption_price(&env))
    }

    /// Returns the recipient ceiling per call.
    pub fn get_max_batch_size(env: Env) -> u32 {
        or_abort(&env, config::max_batch_size(&env))
    }

    // Treasury

    /// Sends every accrued fee to the owner. Returns the amount withdrawn.
    pub fn withdraw_fees(env: Env, owner: Address) -> i128 {
        Self::require_owner(&env, &owner);
        let amount = or_abort(&env, treasury::withdraw(&env, &owner));
        DisbursementEvents::fees_withdrawn(&env, &owner, amount);
        amount
    }

    /// Sends the contract's balance of `token` to the owner, leaving accrued
    /// fees in place when `token` is the native token. Returns the amount swept.
    pub fn sweep_token(env: Env, owner: Address, token: Address) -> i128 {
        Self::require_owner(&env, &owner);
        let amount = or_abort(&env, treasury::sweep(&env, &owner, &token));
        DisbursementEvents::token_swept(&env, &owner, &token, amount);
        amount
    }

    /// Returns the fees waiting in the treasury.
    pub fn get_accrued_fees(env: Env) -> i128 {
        treasury::accrued_fees(&env)
    }

    // Administration

    /// Returns the owner address.
    pub fn get_owner(env: Env) -> Address {
        or_abort(&env, config::owner(&env))
    }

    /// Hands ownership to `new_owner`.
    pub fn set_owner(env: Env, owner: Address, new_owner: Address) {
        Self::require_owner(&env, &owner);
        config::set_owner(&env, &new_owner);
        DisbursementEvents::owner_changed(&env, &owner, &new_owner);
    }

    /// Returns the native token address.
    pub fn get_native_token(env: Env) -> Address {
        or_abort(&env, config::native_token(&env))
    }

    /// Returns the total number of batches disbursed.
    pub fn get_total_batches(env: Env) -> u64 {
        disbursement::total_batches(&env)
    }

    /// Returns the total number of recipients paid across all batches.
    pub fn get_total_recipients(env: Env) -> u64 {
        disbursement::total_recipients(&env)
    }

    // Guard for every owner-only entry point
    fn require_owner(env: &Env, caller: &Address) {
        caller.require_auth();
        let owner = or_abort(env, config::owner(env));
        if *caller != owner {
            panic_with_error!(env, DisbursementError::NotAuthorized);
        }
    }
}

/// Unwraps `result` or aborts the invocation with its contract error.
fn or_abort<T>(env: &Env, result: Result<T, DisbursementError>) -> T {
    match result {
        Ok(value) => value,
        Err(error) => panic_with_error!(env, error),
    }
}
