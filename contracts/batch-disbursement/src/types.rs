//! Data types, storage keys and events for batch disbursements.

use soroban_sdk::{contracttype, symbol_short, Address, Env};

/// Batch ceiling for deployments that don't pick their own.
pub const DEFAULT_MAX_BATCH_SIZE: u32 = 244;

/// Which disbursement algorithm ran for a batch.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[contracttype]
pub enum DisbursementMode {
    NativeUniform,
    NativeVariable,
    FungibleUniform,
    FungibleVariable,
    NonFungible,
}

impl DisbursementMode {
    /// Native modes move principal out of the attached payment and refund the surplus;
    /// token modes only collect the fee from it.
    pub fn is_native(&self) -> bool {
        matches!(
            self,
            DisbursementMode::NativeUniform | DisbursementMode::NativeVariable
        )
    }
}

/// Returned to the caller of every successful disbursement.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct DisbursementReceipt {
    /// Sequential batch number, starting at 1
    pub batch_id: u64,
    pub mode: DisbursementMode,
    /// Number of recipients paid
    pub recipients: u32,
    /// Native principal moved to recipients (0 for token modes)
    pub principal: i128,
    /// Fee credited to the treasury (0 for exempt callers)
    pub fee: i128,
    /// Native amount returned to the caller
    pub refund: i128,
}

/// Storage keys for contract state.
#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    /// Operator allowed to run owner-only entry points
    Owner,
    /// Stellar Asset Contract of the native asset
    NativeToken,
    PerCallFee,
    ExemptionPrice,
    MaxBatchSize,
    /// Fee revenue owed to the owner
    AccruedFees,
    TotalBatches,
    TotalRecipients,
    /// Fee exemption membership (address -> bool)
    Exempt(Address),
}

pub struct DisbursementEvents;

impl DisbursementEvents {
    pub fn batch_started(env: &Env, batch_id: u64, mode: DisbursementMode, recipients: u32) {
        let topics = (symbol_short!("batch"), symbol_short!("started"));
        env.events().publish(topics, (batch_id, mode, recipients));
    }

    pub fn batch_completed(env: &Env, receipt: &DisbursementReceipt) {
        let topics = (
            symbol_short!("batch"),
            symbol_short!("completed"),
            receipt.batch_id,
        );
        env.events().publish(
            topics,
            (
                receipt.mode,
                receipt.recipients,
                receipt.principal,
                receipt.fee,
            ),
        );
    }

    pub fn refund_sent(env: &Env, batch_id: u64, caller: &Address, amount: i128) {
        let topics = (symbol_short!("refund"), symbol_short!("sent"), batch_id);
        env.events().publish(topics, (caller.clone(), amount));
    }

    pub fn member_added(env: &Env, beneficiary: &Address, payment: i128) {
        let topics = (symbol_short!("member"), symbol_short!("added"));
        env.events().publish(topics, (beneficiary.clone(), payment));
    }

    pub fn member_removed(env: &Env, target: &Address) {
        let topics = (symbol_short!("member"), symbol_short!("removed"));
        env.events().publish(topics, target.clone());
    }

    pub fn fee_changed(env: &Env, old_fee: i128, new_fee: i128) {
        let topics = (symbol_short!("fee"), symbol_short!("changed"));
        env.events().publish(topics, (old_fee, new_fee));
    }

    pub fn price_changed(env: &Env, old_price: i128, new_price: i128) {
        let topics = (symbol_short!("price"), symbol_short!("changed"));
        env.events().publish(topics, (old_price, new_price));
    }

    pub fn limit_changed(env: &Env, old_limit: u32, new_limit: u32) {
        let topics = (symbol_short!("limit"), symbol_short!("changed"));
        env.events().publish(topics, (old_limit, new_limit));
    }

    pub fn fees_withdrawn(env: &Env, owner: &Address, amount: i128) {
        let topics = (symbol_short!("treasury"), symbol_short!("withdrawn"));
        env.events().publish(topics, (owner.clone(), amount));
    }

    pub fn token_swept(env: &Env, owner: &Address, token: &Address, amount: i128) {
        let topics = (symbol_short!("treasury"), symbol_short!("swept"));
        env.events()
            .publish(topics, (owner.clone(), token.clone(), amount));
    }

    pub fn owner_changed(env: &Env, old_owner: &Address, new_owner: &Address) {
        let topics = (symbol_short!("owner"), symbol_short!("changed"));
        env.events()
            .publish(topics, (old_owner.clone(), new_owner.clone()));
    }
}
