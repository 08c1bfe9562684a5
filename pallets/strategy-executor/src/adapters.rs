//! Adapter traits for the strategy executor.
//!
//! Every protocol a recipe can touch sits behind one of these traits and is
//! wired by the runtime. The pallet itself only sequences calls, threads their
//! outputs and checks the outcome.

use frame::prelude::*;
use primitives::{InterestRateMode, Ratio, VaultId};

/// Asset movements.
pub trait AssetOps<AccountId, AssetId, Balance> {
  fn transfer(
    from: &AccountId,
    to: &AccountId,
    asset: AssetId,
    amount: Balance,
  ) -> Result<(), DispatchError>;
}

/// Swaps and price quotes.
pub trait DexOps<AccountId, AssetId, Balance> {
  /// Returns the amount received.
  fn swap_exact_in(
    who: &AccountId,
    asset_in: AssetId,
    asset_out: AssetId,
    amount_in: Balance,
    min_out: Balance,
  ) -> Result<Balance, DispatchError>;

  fn get_quote(asset_in: AssetId, asset_out: AssetId, amount_in: Balance) -> Option<Balance>;
}

/// Pooled lending market (supply collateral, borrow against it).
pub trait LendingOps<AccountId, AssetId, Balance> {
  fn supply(who: &AccountId, asset: AssetId, amount: Balance) -> Result<Balance, DispatchError>;

  fn withdraw(
    who: &AccountId,
    asset: AssetId,
    amount: Balance,
    to: &AccountId,
  ) -> Result<Balance, DispatchError>;

  fn borrow(
    who: &AccountId,
    asset: AssetId,
    amount: Balance,
    rate_mode: InterestRateMode,
    to: &AccountId,
  ) -> Result<Balance, DispatchError>;

  /// Repays at most the outstanding debt and returns what was repaid.
  fn payback(
    who: &AccountId,
    asset: AssetId,
    amount: Balance,
    rate_mode: InterestRateMode,
  ) -> Result<Balance, DispatchError>;

  /// Collateral value over debt value, `None` without debt.
  fn ratio(who: &AccountId) -> Option<Ratio>;
}

/// Collateralized debt positions.
pub trait CdpOps<AccountId, AssetId, Balance> {
  fn open(who: &AccountId, collateral: AssetId) -> Result<VaultId, DispatchError>;

  fn owner(vault: VaultId) -> Option<AccountId>;

  fn supply(who: &AccountId, vault: VaultId, amount: Balance) -> Result<Balance, DispatchError>;

  fn withdraw(
    who: &AccountId,
    vault: VaultId,
    amount: Balance,
    to: &AccountId,
  ) -> Result<Balance, DispatchError>;

  /// Draws debt asset out of the vault.
  fn generate(
    who: &AccountId,
    vault: VaultId,
    amount: Balance,
    to: &AccountId,
  ) -> Result<Balance, DispatchError>;

  /// Repays at most the outstanding debt and returns what was repaid.
  fn payback(who: &AccountId, vault: VaultId, amount: Balance) -> Result<Balance, DispatchError>;

  /// `None` for unknown vaults and vaults without debt.
  fn ratio(vault: VaultId) -> Option<Ratio>;
}

/// Share-based yield vaults.
pub trait YieldOps<AccountId, AssetId, Balance> {
  /// Deposits underlying `asset`, returns shares minted.
  fn deposit(who: &AccountId, asset: AssetId, amount: Balance) -> Result<Balance, DispatchError>;

  /// Burns `shares` of `share_asset`, returns underlying sent to `to`.
  fn withdraw(
    who: &AccountId,
    share_asset: AssetId,
    shares: Balance,
    to: &AccountId,
  ) -> Result<Balance, DispatchError>;
}

/// Single-call flash liquidity.
pub trait FlashLoanOps<AccountId, AssetId, Balance> {
  /// Credits `amount` to `who` and returns the fee owed on top of it.
  fn borrow(who: &AccountId, asset: AssetId, amount: Balance) -> Result<Balance, DispatchError>;

  fn repay(who: &AccountId, asset: AssetId, amount: Balance) -> Result<(), DispatchError>;
}

impl<AccountId, AssetId, Balance> AssetOps<AccountId, AssetId, Balance> for () {
  fn transfer(_: &AccountId, _: &AccountId, _: AssetId, _: Balance) -> Result<(), DispatchError> {
    Err(DispatchError::Other("AssetOps not configured"))
  }
}

impl<AccountId, AssetId, Balance> DexOps<AccountId, AssetId, Balance> for () {
  fn swap_exact_in(
    _: &AccountId,
    _: AssetId,
    _: AssetId,
    _: Balance,
    _: Balance,
  ) -> Result<Balance, DispatchError> {
    Err(DispatchError::Other("DexOps not configured"))
  }

  fn get_quote(_: AssetId, _: AssetId, _: Balance) -> Option<Balance> {
    None
  }
}

impl<AccountId, AssetId, Balance> LendingOps<AccountId, AssetId, Balance> for () {
  fn supply(_: &AccountId, _: AssetId, _: Balance) -> Result<Balance, DispatchError> {
    Err(DispatchError::Other("LendingOps not configured"))
  }

  fn withdraw(_: &AccountId, _: AssetId, _: Balance, _: &AccountId) -> Result<Balance, DispatchError> {
    Err(DispatchError::Other("LendingOps not configured"))
  }

  fn borrow(
    _: &AccountId,
    _: AssetId,
    _: Balance,
    _: InterestRateMode,
    _: &AccountId,
  ) -> Result<Balance, DispatchError> {
    Err(DispatchError::Other("LendingOps not configured"))
  }

  fn payback(
    _: &AccountId,
    _: AssetId,
    _: Balance,
    _: InterestRateMode,
  ) -> Result<Balance, DispatchError> {
    Err(DispatchError::Other("LendingOps not configured"))
  }

  fn ratio(_: &AccountId) -> Option<Ratio> {
    None
  }
}

impl<AccountId, AssetId, Balance> CdpOps<AccountId, AssetId, Balance> for () {
  fn open(_: &AccountId, _: AssetId) -> Result<VaultId, DispatchError> {
    Err(DispatchError::Other("CdpOps not configured"))
  }

  fn owner(_: VaultId) -> Option<AccountId> {
    None
  }

  fn supply(_: &AccountId, _: VaultId, _: Balance) -> Result<Balance, DispatchError> {
    Err(DispatchError::Other("CdpOps not configured"))
  }

  fn withdraw(_: &AccountId, _: VaultId, _: Balance, _: &AccountId) -> Result<Balance, DispatchError> {
    Err(DispatchError::Other("CdpOps not configured"))
  }

  fn generate(_: &AccountId, _: VaultId, _: Balance, _: &AccountId) -> Result<Balance, DispatchError> {
    Err(DispatchError::Other("CdpOps not configured"))
  }

  fn payback(_: &AccountId, _: VaultId, _: Balance) -> Result<Balance, DispatchError> {
    Err(DispatchError::Other("CdpOps not configured"))
  }

  fn ratio(_: VaultId) -> Option<Ratio> {
    None
  }
}

impl<AccountId, AssetId, Balance> YieldOps<AccountId, AssetId, Balance> for () {
  fn deposit(_: &AccountId, _: AssetId, _: Balance) -> Result<Balance, DispatchError> {
    Err(DispatchError::Other("YieldOps not configured"))
  }

  fn withdraw(_: &AccountId, _: AssetId, _: Balance, _: &AccountId) -> Result<Balance, DispatchError> {
    Err(DispatchError::Other("YieldOps not configured"))
  }
}

impl<AccountId, AssetId, Balance> FlashLoanOps<AccountId, AssetId, Balance> for () {
  fn borrow(_: &AccountId, _: AssetId, _: Balance) -> Result<Balance, DispatchError> {
    Err(DispatchError::Other("FlashLoanOps not configured"))
  }

  fn repay(_: &AccountId, _: AssetId, _: Balance) -> Result<(), DispatchError> {
    Err(DispatchError::Other("FlashLoanOps not configured"))
  }
}
