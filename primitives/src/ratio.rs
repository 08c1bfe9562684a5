//! Collateralization ratio arithmetic.
//!
//! A ratio is collateral value over debt value, both in the debt asset's unit.
//! Triggers compare a live ratio against a subscribed threshold, and ratio
//! checks compare the ratio before and after a recipe moved it.

use codec::{Decode, DecodeWithMemTracking, Encode, MaxEncodedLen};
use scale_info::TypeInfo;
use sp_arithmetic::{traits::Saturating, FixedPointNumber, FixedU128};

use crate::Balance;

pub type Ratio = FixedU128;
pub type Price = FixedU128;

/// Identifier of a collateralized debt position
pub type VaultId = u64;

/// Side of a threshold that makes a ratio trigger fire.
#[derive(
  Clone,
  Copy,
  Debug,
  Decode,
  DecodeWithMemTracking,
  Encode,
  Eq,
  MaxEncodedLen,
  PartialEq,
  TypeInfo,
)]
pub enum RatioState {
  Over,
  Under,
}

impl RatioState {
  /// Strict comparison: a ratio sitting exactly on the threshold does not fire.
  pub fn is_crossed(&self, current: Ratio, threshold: Ratio) -> bool {
    match self {
      RatioState::Over => current > threshold,
      RatioState::Under => current < threshold,
    }
  }
}

/// Direction a recipe is expected to move the ratio in.
#[derive(
  Clone,
  Copy,
  Debug,
  Decode,
  DecodeWithMemTracking,
  Encode,
  Eq,
  MaxEncodedLen,
  PartialEq,
  TypeInfo,
)]
pub enum RatioCheckState {
  /// Debt was added, the ratio must go down
  Boost,
  /// Debt was paid back, the ratio must go up
  Repay,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RatioCheckError {
  NotImproved,
  OutsideTarget,
}

/// Verifies a ratio moved in the expected direction and, when a target is
/// given, that it landed within `tolerance` of it on the far side.
pub fn check_ratio_move(
  state: RatioCheckState,
  before: Ratio,
  now: Ratio,
  target: Option<Ratio>,
  tolerance: Ratio,
) -> Result<(), RatioCheckError> {
  match state {
    RatioCheckState::Repay => {
      if now <= before {
        return Err(RatioCheckError::NotImproved);
      }
      if let Some(target) = target {
        if now > target.saturating_add(tolerance) {
          return Err(RatioCheckError::OutsideTarget);
        }
      }
    }
    RatioCheckState::Boost => {
      if now >= before {
        return Err(RatioCheckError::NotImproved);
      }
      if let Some(target) = target {
        if now < target.saturating_sub(tolerance) {
          return Err(RatioCheckError::OutsideTarget);
        }
      }
    }
  }
  Ok(())
}

/// Ratio of a position holding `collateral` priced at `price` against `debt`.
///
/// `None` when there is no debt: such a position has no ratio to protect.
pub fn collateral_ratio(collateral: Balance, price: Price, debt: Balance) -> Option<Ratio> {
  if debt == 0 {
    return None;
  }
  let value = price.saturating_mul_int(collateral);
  Ratio::checked_from_rational(value, debt)
}
