//! Ecosystem constants for the strategy automation pallets.
//!
//! Protocol-wide parameters shared by runtime configuration and
//! tests. Runtime `Config` constants default to these values.

/// Balance type alias for consistency across the ecosystem
pub type Balance = u128;

/// Protocol parameters.
pub mod params {
  use super::Balance;
  use sp_arithmetic::{FixedU128, Permill};

  /// Precision scalar of 18-decimal tokens (10^18).
  pub const WAD: Balance = 1_000_000_000_000_000_000;

  /// Upper bound of the gas fee relative to the amount it is taken from (20%).
  ///
  /// A recipe never loses more than a fifth of the amount flowing through the
  /// fee-taking action, whatever the bot claims as gas used.
  pub const MAX_GAS_FEE_PORTION: Permill = Permill::from_percent(20);

  /// Distance from the target ratio that a ratio check still accepts (5%).
  pub const RATIO_CHECK_TOLERANCE: FixedU128 = FixedU128::from_inner(50_000_000_000_000_000); // 0.05
}
