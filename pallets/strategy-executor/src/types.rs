//! Strategy building blocks: typed values, parameter references, actions and triggers.

use alloc::{vec, vec::Vec};
use frame::prelude::*;

pub use primitives::{InterestRateMode, Ratio, RatioCheckState, RatioState, VaultId};

pub type StrategyId = u64;
pub type BundleId = u64;
pub type SubId = u64;

/// Human readable sub-slot label such as `vaultId` or `targetRatio`
pub type SlotName = BoundedVec<u8, ConstU32<32>>;

/// Declared type of a sub-slot.
#[derive(
  Clone,
  Copy,
  Debug,
  Decode,
  DecodeWithMemTracking,
  Encode,
  Eq,
  PartialEq,
  TypeInfo,
  MaxEncodedLen,
)]
pub enum SlotKind {
  Amount,
  Ratio,
  Account,
  Asset,
  Vault,
}

/// A concrete value flowing through a recipe.
#[derive(
  Clone, Debug, Decode, DecodeWithMemTracking, Encode, Eq, PartialEq, TypeInfo, MaxEncodedLen,
)]
pub enum ParamValue<AccountId, AssetId, Balance> {
  Amount(Balance),
  Ratio(Ratio),
  Account(AccountId),
  Asset(AssetId),
  Vault(VaultId),
}

impl<AccountId, AssetId, Balance> ParamValue<AccountId, AssetId, Balance> {
  pub fn kind(&self) -> SlotKind {
    match self {
      ParamValue::Amount(_) => SlotKind::Amount,
      ParamValue::Ratio(_) => SlotKind::Ratio,
      ParamValue::Account(_) => SlotKind::Account,
      ParamValue::Asset(_) => SlotKind::Asset,
      ParamValue::Vault(_) => SlotKind::Vault,
    }
  }
}

#[derive(
  Clone, Debug, Decode, DecodeWithMemTracking, Encode, Eq, PartialEq, TypeInfo, MaxEncodedLen,
)]
pub struct SubSlot {
  pub name: SlotName,
  pub kind: SlotKind,
}

/// Where an action argument comes from.
///
/// - `Value`: literal written into the strategy
/// - `Sub(i)`: value bound at subscription time for sub-slot `i`
/// - `Returned(i)`: output of the `i`-th action of the same run (zero-based)
/// - `Input(i)`: value supplied by the executing bot
/// - `Owner`: the subscriber's account
#[derive(
  Clone, Debug, Decode, DecodeWithMemTracking, Encode, Eq, PartialEq, TypeInfo, MaxEncodedLen,
)]
pub enum Param<AccountId, AssetId, Balance> {
  Value(ParamValue<AccountId, AssetId, Balance>),
  Sub(u8),
  Returned(u8),
  Input(u8),
  Owner,
}

#[derive(
  Clone,
  Copy,
  Debug,
  Decode,
  DecodeWithMemTracking,
  Encode,
  Eq,
  PartialEq,
  TypeInfo,
  MaxEncodedLen,
)]
pub enum TriggerKind {
  CdpRatio,
  LendingRatio,
}

/// Trigger kind bound to the subscriber's threshold data.
#[derive(
  Clone,
  Copy,
  Debug,
  Decode,
  DecodeWithMemTracking,
  Encode,
  Eq,
  PartialEq,
  TypeInfo,
  MaxEncodedLen,
)]
pub enum Trigger {
  CdpRatio {
    vault: VaultId,
    ratio: Ratio,
    state: RatioState,
  },
  LendingRatio {
    ratio: Ratio,
    state: RatioState,
  },
}

impl Trigger {
  pub fn kind(&self) -> TriggerKind {
    match self {
      Trigger::CdpRatio { .. } => TriggerKind::CdpRatio,
      Trigger::LendingRatio { .. } => TriggerKind::LendingRatio,
    }
  }
}

#[derive(
  Clone, Debug, Decode, DecodeWithMemTracking, Encode, Eq, PartialEq, TypeInfo, MaxEncodedLen,
)]
pub enum Action<AccountId, AssetId, Balance> {
  LendingSupply {
    asset: Param<AccountId, AssetId, Balance>,
    amount: Param<AccountId, AssetId, Balance>,
  },
  LendingWithdraw {
    asset: Param<AccountId, AssetId, Balance>,
    amount: Param<AccountId, AssetId, Balance>,
    to: Param<AccountId, AssetId, Balance>,
  },
  LendingBorrow {
    asset: Param<AccountId, AssetId, Balance>,
    amount: Param<AccountId, AssetId, Balance>,
    rate_mode: InterestRateMode,
    to: Param<AccountId, AssetId, Balance>,
  },
  LendingPayback {
    asset: Param<AccountId, AssetId, Balance>,
    amount: Param<AccountId, AssetId, Balance>,
    rate_mode: InterestRateMode,
  },
  CdpOpen {
    collateral: Param<AccountId, AssetId, Balance>,
  },
  CdpSupply {
    vault: Param<AccountId, AssetId, Balance>,
    amount: Param<AccountId, AssetId, Balance>,
  },
  CdpWithdraw {
    vault: Param<AccountId, AssetId, Balance>,
    amount: Param<AccountId, AssetId, Balance>,
    to: Param<AccountId, AssetId, Balance>,
  },
  CdpGenerate {
    vault: Param<AccountId, AssetId, Balance>,
    amount: Param<AccountId, AssetId, Balance>,
    to: Param<AccountId, AssetId, Balance>,
  },
  CdpPayback {
    vault: Param<AccountId, AssetId, Balance>,
    amount: Param<AccountId, AssetId, Balance>,
  },
  CdpRatio {
    vault: Param<AccountId, AssetId, Balance>,
  },
  /// Compares the vault ratio against `start_ratio`, normally the output of an
  /// earlier `CdpRatio` action.
  CdpRatioCheck {
    state: RatioCheckState,
    check_target: bool,
    target_ratio: Param<AccountId, AssetId, Balance>,
    vault: Param<AccountId, AssetId, Balance>,
    start_ratio: Param<AccountId, AssetId, Balance>,
  },
  YieldSupply {
    asset: Param<AccountId, AssetId, Balance>,
    amount: Param<AccountId, AssetId, Balance>,
  },
  YieldWithdraw {
    share_asset: Param<AccountId, AssetId, Balance>,
    amount: Param<AccountId, AssetId, Balance>,
    to: Param<AccountId, AssetId, Balance>,
  },
  Sell {
    asset_in: Param<AccountId, AssetId, Balance>,
    asset_out: Param<AccountId, AssetId, Balance>,
    amount: Param<AccountId, AssetId, Balance>,
    min_out: Param<AccountId, AssetId, Balance>,
  },
  /// `gas_units` is usually a bot input carrying the gas the call actually used.
  GasFee {
    gas_units: Param<AccountId, AssetId, Balance>,
    fee_asset: Param<AccountId, AssetId, Balance>,
    available: Param<AccountId, AssetId, Balance>,
  },
  Transfer {
    asset: Param<AccountId, AssetId, Balance>,
    amount: Param<AccountId, AssetId, Balance>,
    to: Param<AccountId, AssetId, Balance>,
  },
  /// Only valid as the first action. Repaid with its fee once the recipe ends.
  FlashLoan {
    asset: Param<AccountId, AssetId, Balance>,
    amount: Param<AccountId, AssetId, Balance>,
  },
}

impl<AccountId, AssetId, Balance> Action<AccountId, AssetId, Balance> {
  pub fn is_flash_loan(&self) -> bool {
    matches!(self, Action::FlashLoan { .. })
  }

  /// Every parameter reference of the action, in declaration order.
  pub fn params(&self) -> Vec<&Param<AccountId, AssetId, Balance>> {
    match self {
      Action::LendingSupply { asset, amount } => vec![asset, amount],
      Action::LendingWithdraw { asset, amount, to } => vec![asset, amount, to],
      Action::LendingBorrow {
        asset, amount, to, ..
      } => vec![asset, amount, to],
      Action::LendingPayback { asset, amount, .. } => vec![asset, amount],
      Action::CdpOpen { collateral } => vec![collateral],
      Action::CdpSupply { vault, amount } => vec![vault, amount],
      Action::CdpWithdraw { vault, amount, to } => vec![vault, amount, to],
      Action::CdpGenerate { vault, amount, to } => vec![vault, amount, to],
      Action::CdpPayback { vault, amount } => vec![vault, amount],
      Action::CdpRatio { vault } => vec![vault],
      Action::CdpRatioCheck {
        target_ratio,
        vault,
        start_ratio,
        ..
      } => vec![target_ratio, vault, start_ratio],
      Action::YieldSupply { asset, amount } => vec![asset, amount],
      Action::YieldWithdraw {
        share_asset,
        amount,
        to,
      } => vec![share_asset, amount, to],
      Action::Sell {
        asset_in,
        asset_out,
        amount,
        min_out,
      } => vec![asset_in, asset_out, amount, min_out],
      Action::GasFee {
        gas_units,
        fee_asset,
        available,
      } => vec![gas_units, fee_asset, available],
      Action::Transfer { asset, amount, to } => vec![asset, amount, to],
      Action::FlashLoan { asset, amount } => vec![asset, amount],
    }
  }
}

/// Registered strategy. Collection types are supplied by the pallet so the
/// bounds stay runtime constants.
#[derive(
  Clone, Debug, Decode, DecodeWithMemTracking, Encode, Eq, PartialEq, TypeInfo, MaxEncodedLen,
)]
pub struct Strategy<AccountId, BlockNumber, Name, TriggerKinds, SubSlots, Actions> {
  pub name: Name,
  /// `None` when registered by the admin origin
  pub owner: Option<AccountId>,
  pub triggers: TriggerKinds,
  pub sub_slots: SubSlots,
  pub actions: Actions,
  /// When false a subscription is disabled after one successful execution
  pub continuous: bool,
  pub created_at: BlockNumber,
}

#[derive(
  Clone, Debug, Decode, DecodeWithMemTracking, Encode, Eq, PartialEq, TypeInfo, MaxEncodedLen,
)]
pub struct Bundle<AccountId, BlockNumber, StrategyIds> {
  pub owner: Option<AccountId>,
  pub strategies: StrategyIds,
  pub created_at: BlockNumber,
}

#[derive(
  Clone,
  Copy,
  Debug,
  Decode,
  DecodeWithMemTracking,
  Encode,
  Eq,
  PartialEq,
  TypeInfo,
  MaxEncodedLen,
)]
pub enum SubTarget {
  Strategy(StrategyId),
  Bundle(BundleId),
}

#[derive(
  Clone, Debug, Decode, DecodeWithMemTracking, Encode, Eq, PartialEq, TypeInfo, MaxEncodedLen,
)]
pub struct Subscription<AccountId, BlockNumber, TriggerData, SubData> {
  pub owner: AccountId,
  pub target: SubTarget,
  pub trigger_data: TriggerData,
  pub sub_data: SubData,
  pub is_enabled: bool,
  pub created_at: BlockNumber,
}
