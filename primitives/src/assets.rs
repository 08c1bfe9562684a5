use codec::{Decode, DecodeWithMemTracking, Encode, MaxEncodedLen};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};

/// Asset identifier shared by the executor pallet and the protocol adapters.
///
/// - `Native`: The chain's native token, used to pay gas fees.
/// - `Local(u32)`: Protocol tokens, classified by the bitmask below.
#[derive(
  Clone,
  Copy,
  Debug,
  Decode,
  DecodeWithMemTracking,
  Default,
  Encode,
  Eq,
  MaxEncodedLen,
  Ord,
  PartialEq,
  PartialOrd,
  TypeInfo,
  Serialize,
  Deserialize,
)]
pub enum AssetKind {
  #[default]
  Native,
  Local(u32),
}

impl From<u32> for AssetKind {
  fn from(asset_id: u32) -> Self {
    AssetKind::Local(asset_id)
  }
}

// 32-bit ID Structure:
// [ 4 bits: Class ] [ 28 bits: Index ]
//
// 0x1... -> Collateral tokens (WETH, WBTC)
// 0x2... -> Stablecoins, CDP debt assets included (DAI, USDC)
// 0x3... -> Yield vault shares (yvDAI, yvWETH)

pub const MASK_CLASS: u32 = 0xF000_0000;
pub const MASK_INDEX: u32 = 0x0FFF_FFFF;

pub const CLASS_COLLATERAL: u32 = 0x1000_0000;
pub const CLASS_STABLE: u32 = 0x2000_0000;
pub const CLASS_YIELD_SHARE: u32 = 0x3000_0000;

pub trait AssetInspector {
  fn is_native(&self) -> bool;
  fn local_id(&self) -> Option<u32>;

  fn is_collateral(&self) -> bool;
  fn is_stable(&self) -> bool;
  fn is_yield_share(&self) -> bool;
}

impl AssetKind {
  fn has_class(&self, class: u32) -> bool {
    match self {
      AssetKind::Local(id) => (id & MASK_CLASS) == class,
      AssetKind::Native => false,
    }
  }
}

impl AssetInspector for AssetKind {
  fn is_native(&self) -> bool {
    matches!(self, AssetKind::Native)
  }

  fn local_id(&self) -> Option<u32> {
    match self {
      AssetKind::Local(id) => Some(*id),
      AssetKind::Native => None,
    }
  }

  fn is_collateral(&self) -> bool {
    self.has_class(CLASS_COLLATERAL)
  }

  fn is_stable(&self) -> bool {
    self.has_class(CLASS_STABLE)
  }

  fn is_yield_share(&self) -> bool {
    self.has_class(CLASS_YIELD_SHARE)
  }
}

const fn make_id(class: u32, index: u32) -> u32 {
  class | (index & MASK_INDEX)
}

/// Well-known asset ids used by runtime wiring and tests
pub mod well_known {
  use super::*;

  pub const WETH: u32 = make_id(CLASS_COLLATERAL, 1);
  pub const WBTC: u32 = make_id(CLASS_COLLATERAL, 2);

  pub const DAI: u32 = make_id(CLASS_STABLE, 1);
  pub const USDC: u32 = make_id(CLASS_STABLE, 2);

  pub const YV_DAI: u32 = make_id(CLASS_YIELD_SHARE, 1);
  pub const YV_WETH: u32 = make_id(CLASS_YIELD_SHARE, 2);
}
