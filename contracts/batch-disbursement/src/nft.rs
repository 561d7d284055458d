//! Client interface for non-fungible token ledgers.

use soroban_sdk::{contractclient, Address, Env};

/// The subset of a non-fungible token contract the disbursement engine calls.
///
/// `transfer_from` moves `token_id` from `from` to `to` on behalf of
/// `spender`, which must hold an operator approval from `from`.
#[contractclient(name = "NonFungibleTokenClient")]
pub trait NonFungibleTokenInterface {
    fn owner_of(env: Env, token_id: u32) -> Address;

    fn transfer_from(env: Env, spender: Address, from: Address, to: Address, token_id: u32);
}
