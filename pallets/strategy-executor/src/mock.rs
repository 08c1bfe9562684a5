use crate as pallet_strategy_executor;
use frame::prelude::*;
use polkadot_sdk::{
  frame_support::{
    construct_runtime, ord_parameter_types,
    storage::unhashed,
    traits::{ConstU128, ConstU32, Currency, EitherOfDiverse, ExistenceRequirement, Get},
  },
  frame_system::{EnsureRoot, EnsureSignedBy},
  sp_runtime::{
    BuildStorage, FixedPointNumber, PerThing, Permill, TokenError,
    traits::{BlakeTwo256, IdentityLookup},
  },
};

use alloc::{collections::BTreeMap, vec};
use core::cell::RefCell;

use crate::{AssetOps, CdpOps, DexOps, FlashLoanOps, LendingOps, YieldOps};
use primitives::{
  AssetInspector, AssetKind, InterestRateMode, Price, Ratio, VaultId, collateral_ratio,
  params::{MAX_GAS_FEE_PORTION, RATIO_CHECK_TOLERANCE, WAD},
  well_known,
};

type Block = polkadot_sdk::frame_system::mocking::MockBlock<Test>;
pub type AccountId = u64;
pub type Balance = u128;

pub const ALICE: AccountId = 1;
pub const BOB: AccountId = 2;
pub const CHARLIE: AccountId = 3;
/// Signed account holding the registry admin origin
pub const REGISTRAR: AccountId = 4;

pub const LENDING_POOL: AccountId = 900;
pub const CDP_ENGINE: AccountId = 901;
pub const YIELD_RESERVE: AccountId = 902;
pub const FLASH_LENDER: AccountId = 903;
pub const FEE_SINK: AccountId = 999;
pub const DEX_ACCOUNT: AccountId = u64::MAX;

pub const WETH: AssetKind = AssetKind::Local(well_known::WETH);
pub const WBTC: AssetKind = AssetKind::Local(well_known::WBTC);
pub const DAI: AssetKind = AssetKind::Local(well_known::DAI);
pub const USDC: AssetKind = AssetKind::Local(well_known::USDC);
pub const YV_DAI: AssetKind = AssetKind::Local(well_known::YV_DAI);
pub const YV_WETH: AssetKind = AssetKind::Local(well_known::YV_WETH);

/// Minimum ratio a vault must keep after withdrawing or generating
pub const MIN_VAULT_RATIO: (u128, u128) = (3, 2);

pub fn units(n: u128) -> Balance {
  n * WAD
}

construct_runtime!(
  pub enum Test {
    System: polkadot_sdk::frame_system,
    Balances: polkadot_sdk::pallet_balances,
    StrategyExecutor: pallet_strategy_executor,
  }
);

impl polkadot_sdk::frame_system::Config for Test {
  type BaseCallFilter = polkadot_sdk::frame_support::traits::Everything;
  type BlockWeights = ();
  type BlockLength = ();
  type DbWeight = ();
  type RuntimeOrigin = RuntimeOrigin;
  type RuntimeCall = RuntimeCall;
  type Nonce = u64;
  type Hash = polkadot_sdk::sp_core::H256;
  type Hashing = BlakeTwo256;
  type AccountId = AccountId;
  type Lookup = IdentityLookup<Self::AccountId>;
  type Block = Block;
  type RuntimeEvent = RuntimeEvent;
  type BlockHashCount = polkadot_sdk::frame_support::traits::ConstU64<250>;
  type Version = ();
  type PalletInfo = PalletInfo;
  type AccountData = polkadot_sdk::pallet_balances::AccountData<Balance>;
  type OnNewAccount = ();
  type OnKilledAccount = ();
  type SystemWeightInfo = ();
  type SS58Prefix = ();
  type OnSetCode = ();
  type MaxConsumers = ConstU32<16>;
  type RuntimeTask = ();
  type ExtensionsWeightInfo = ();
  type SingleBlockMigrations = ();
  type MultiBlockMigrator = ();
  type PreInherents = ();
  type PostInherents = ();
  type PostTransactions = ();
}

impl polkadot_sdk::pallet_balances::Config for Test {
  type MaxLocks = ConstU32<50>;
  type MaxReserves = ();
  type ReserveIdentifier = [u8; 8];
  type Balance = Balance;
  type RuntimeEvent = RuntimeEvent;
  type DustRemoval = ();
  type ExistentialDeposit = ConstU128<1>;
  type AccountStore = System;
  type WeightInfo = ();
  type FreezeIdentifier = ();
  type MaxFreezes = ();
  type RuntimeHoldReason = RuntimeHoldReason;
  type RuntimeFreezeReason = RuntimeFreezeReason;
  type DoneSlashHandler = ();
}

pub struct NativeAsset;
impl Get<AssetKind> for NativeAsset {
  fn get() -> AssetKind {
    AssetKind::Native
  }
}

pub struct TestFeeSink;
impl Get<AccountId> for TestFeeSink {
  fn get() -> AccountId {
    FEE_SINK
  }
}

pub struct TestMaxGasFeePortion;
impl Get<Permill> for TestMaxGasFeePortion {
  fn get() -> Permill {
    MAX_GAS_FEE_PORTION
  }
}

pub struct TestRatioCheckTolerance;
impl Get<Ratio> for TestRatioCheckTolerance {
  fn get() -> Ratio {
    RATIO_CHECK_TOLERANCE
  }
}

/// One native unit per gas unit
pub struct TestWeightToFee;
impl polkadot_sdk::sp_weights::WeightToFee for TestWeightToFee {
  type Balance = Balance;
  fn weight_to_fee(weight: &polkadot_sdk::sp_weights::Weight) -> Self::Balance {
    Balance::from(weight.ref_time())
  }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ReserveConfig {
  pub borrowing_enabled: bool,
  pub stable_borrowing_enabled: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode)]
pub struct MockVault {
  pub owner: AccountId,
  pub collateral_asset: AssetKind,
  pub collateral: Balance,
  pub debt: Balance,
}

#[derive(Clone, Copy, Debug)]
pub struct MockYieldVault {
  pub share_asset: AssetKind,
  pub price_per_share: Price,
}

// Market configuration, fixed for the duration of a test
thread_local! {
  /// USD price of one unit of each asset
  static PRICES: RefCell<BTreeMap<AssetKind, Price>> = RefCell::new(BTreeMap::new());

  static LENDING_RESERVES: RefCell<BTreeMap<AssetKind, ReserveConfig>> =
    RefCell::new(BTreeMap::new());

  static YIELD_VAULTS: RefCell<BTreeMap<AssetKind, MockYieldVault>> =
    RefCell::new(BTreeMap::new());

  static FLASH_LOAN_FEE: RefCell<Permill> = RefCell::new(Permill::zero());
}

// Balances and positions live in unhashed storage so a failed extrinsic rolls them back
const BALANCES_KEY: &[u8] = b":mock:asset_balances";
const POOLS_KEY: &[u8] = b":mock:pool_reserves";
const LENDING_SUPPLY_KEY: &[u8] = b":mock:lending_supply";
const LENDING_DEBT_KEY: &[u8] = b":mock:lending_debt";
const VAULTS_KEY: &[u8] = b":mock:vaults";
const NEXT_VAULT_KEY: &[u8] = b":mock:next_vault";
const FLASH_LOANS_KEY: &[u8] = b":mock:flash_loans";

type AssetBalances = BTreeMap<(AccountId, AssetKind), Balance>;
type PoolReserves = BTreeMap<(AssetKind, AssetKind), (Balance, Balance)>;
type LendingDebt = BTreeMap<(AccountId, AssetKind, InterestRateMode), Balance>;
type Vaults = BTreeMap<VaultId, MockVault>;

fn read_state<V: Decode + Default>(key: &[u8]) -> V {
  unhashed::get(key).unwrap_or_default()
}

fn try_mutate_state<V: Encode + Decode + Default, R>(
  key: &[u8],
  f: impl FnOnce(&mut V) -> Result<R, DispatchError>,
) -> Result<R, DispatchError> {
  let mut value = read_state::<V>(key);
  let result = f(&mut value)?;
  unhashed::put(key, &value);
  Ok(result)
}

fn mutate_state<V: Encode + Decode + Default, R>(key: &[u8], f: impl FnOnce(&mut V) -> R) -> R {
  let mut value = read_state::<V>(key);
  let result = f(&mut value);
  unhashed::put(key, &value);
  result
}

pub fn reset_mock_adapters() {
  PRICES.with(|p| p.borrow_mut().clear());
  LENDING_RESERVES.with(|r| r.borrow_mut().clear());
  YIELD_VAULTS.with(|y| y.borrow_mut().clear());
  FLASH_LOAN_FEE.with(|f| *f.borrow_mut() = Permill::zero());
}

pub fn set_asset_balance(who: AccountId, asset: AssetKind, amount: Balance) {
  mutate_state(BALANCES_KEY, |map: &mut AssetBalances| {
    map.insert((who, asset), amount);
  });
}

pub fn asset_balance(who: AccountId, asset: AssetKind) -> Balance {
  match asset {
    AssetKind::Native => <Balances as Currency<AccountId>>::free_balance(&who),
    _ => read_state::<AssetBalances>(BALANCES_KEY)
      .get(&(who, asset))
      .copied()
      .unwrap_or(0),
  }
}

pub fn mint_asset(to: AccountId, asset: AssetKind, amount: Balance) {
  match asset {
    AssetKind::Native => {
      let _ = <Balances as Currency<AccountId>>::deposit_creating(&to, amount);
    }
    _ => {
      let current = asset_balance(to, asset);
      set_asset_balance(to, asset, current.saturating_add(amount));
    }
  }
}

pub fn burn_asset(from: AccountId, asset: AssetKind, amount: Balance) -> Result<(), DispatchError> {
  let current = asset_balance(from, asset);
  if current < amount {
    return Err(DispatchError::Token(TokenError::FundsUnavailable));
  }
  set_asset_balance(from, asset, current - amount);
  Ok(())
}

pub fn set_price(asset: AssetKind, price: Price) {
  PRICES.with(|p| {
    p.borrow_mut().insert(asset, price);
  });
}

pub fn price_of(asset: AssetKind) -> Option<Price> {
  PRICES.with(|p| p.borrow().get(&asset).copied())
}

fn usd_value(asset: AssetKind, amount: Balance) -> Balance {
  price_of(asset)
    .map(|price| price.saturating_mul_int(amount))
    .unwrap_or(0)
}

fn pool_key(a: AssetKind, b: AssetKind) -> (AssetKind, AssetKind) {
  if a <= b { (a, b) } else { (b, a) }
}

pub fn set_pool_reserves(asset_a: AssetKind, asset_b: AssetKind, ra: Balance, rb: Balance) {
  let val = if asset_a <= asset_b { (ra, rb) } else { (rb, ra) };
  mutate_state(POOLS_KEY, |pools: &mut PoolReserves| {
    pools.insert(pool_key(asset_a, asset_b), val);
  });
  mint_asset(DEX_ACCOUNT, asset_a, ra);
  mint_asset(DEX_ACCOUNT, asset_b, rb);
}

pub fn set_lending_reserve(asset: AssetKind, config: ReserveConfig, liquidity: Balance) {
  LENDING_RESERVES.with(|r| {
    r.borrow_mut().insert(asset, config);
  });
  mint_asset(LENDING_POOL, asset, liquidity);
}

pub fn lending_supplied(who: AccountId, asset: AssetKind) -> Balance {
  read_state::<AssetBalances>(LENDING_SUPPLY_KEY)
    .get(&(who, asset))
    .copied()
    .unwrap_or(0)
}

pub fn lending_debt(who: AccountId, asset: AssetKind, mode: InterestRateMode) -> Balance {
  read_state::<LendingDebt>(LENDING_DEBT_KEY)
    .get(&(who, asset, mode))
    .copied()
    .unwrap_or(0)
}

pub fn vault(id: VaultId) -> Option<MockVault> {
  read_state::<Vaults>(VAULTS_KEY).get(&id).cloned()
}

pub fn set_yield_vault(underlying: AssetKind, share_asset: AssetKind, price_per_share: Price) {
  YIELD_VAULTS.with(|y| {
    y.borrow_mut().insert(
      underlying,
      MockYieldVault {
        share_asset,
        price_per_share,
      },
    );
  });
}

pub fn set_flash_loan_fee(fee: Permill) {
  FLASH_LOAN_FEE.with(|f| *f.borrow_mut() = fee);
}

pub fn outstanding_flash_loan(who: AccountId, asset: AssetKind) -> Balance {
  read_state::<AssetBalances>(FLASH_LOANS_KEY)
    .get(&(who, asset))
    .copied()
    .unwrap_or(0)
}

/// Opens a vault for `owner` with freshly minted collateral and draws `debt` DAI to the owner.
pub fn open_vault(
  owner: AccountId,
  collateral_asset: AssetKind,
  collateral: Balance,
  debt: Balance,
) -> VaultId {
  mint_asset(owner, collateral_asset, collateral);
  let id = MockCdpOps::open(&owner, collateral_asset).expect("collateral is priced");
  MockCdpOps::supply(&owner, id, collateral).expect("collateral was minted");
  if debt > 0 {
    MockCdpOps::generate(&owner, id, debt, &owner).expect("vault stays safe");
  }
  id
}

pub struct MockAssetOps;

impl AssetOps<AccountId, AssetKind, Balance> for MockAssetOps {
  fn transfer(
    from: &AccountId,
    to: &AccountId,
    asset: AssetKind,
    amount: Balance,
  ) -> Result<(), DispatchError> {
    match asset {
      AssetKind::Native => <Balances as Currency<AccountId>>::transfer(
        from,
        to,
        amount,
        ExistenceRequirement::AllowDeath,
      ),
      _ => try_mutate_state(BALANCES_KEY, |map: &mut AssetBalances| {
        let src = map.get(&(*from, asset)).copied().unwrap_or(0);
        if src < amount {
          return Err(DispatchError::Token(TokenError::FundsUnavailable));
        }
        map.insert((*from, asset), src - amount);
        let dst = map.get(&(*to, asset)).copied().unwrap_or(0);
        map.insert((*to, asset), dst + amount);
        Ok(())
      }),
    }
  }
}

/// Constant product pools held by `DEX_ACCOUNT`.
pub struct MockDexOps;

impl DexOps<AccountId, AssetKind, Balance> for MockDexOps {
  fn swap_exact_in(
    who: &AccountId,
    asset_in: AssetKind,
    asset_out: AssetKind,
    amount_in: Balance,
    min_out: Balance,
  ) -> Result<Balance, DispatchError> {
    let amount_out =
      Self::get_quote(asset_in, asset_out, amount_in).ok_or(DispatchError::Other("NoPool"))?;
    if amount_out < min_out {
      return Err(DispatchError::Other("SlippageExceeded"));
    }
    MockAssetOps::transfer(who, &DEX_ACCOUNT, asset_in, amount_in)?;
    MockAssetOps::transfer(&DEX_ACCOUNT, who, asset_out, amount_out)?;
    mutate_state(POOLS_KEY, |pools: &mut PoolReserves| {
      if let Some((ra, rb)) = pools.get_mut(&pool_key(asset_in, asset_out)) {
        if asset_in <= asset_out {
          *ra += amount_in;
          *rb -= amount_out;
        } else {
          *rb += amount_in;
          *ra -= amount_out;
        }
      }
    });
    Ok(amount_out)
  }

  fn get_quote(asset_in: AssetKind, asset_out: AssetKind, amount_in: Balance) -> Option<Balance> {
    let (ra, rb) = read_state::<PoolReserves>(POOLS_KEY)
      .get(&pool_key(asset_in, asset_out))
      .copied()?;
    let (ri, ro) = if asset_in <= asset_out { (ra, rb) } else { (rb, ra) };
    Some(amount_in.saturating_mul(ro) / ri.saturating_add(amount_in))
  }
}

/// Pooled lending market valuing positions at `PRICES`, borrowing up to 75% LTV.
pub struct MockLendingOps;

impl MockLendingOps {
  fn collateral_value(who: &AccountId) -> Balance {
    read_state::<AssetBalances>(LENDING_SUPPLY_KEY)
      .iter()
      .filter(|((owner, _), _)| owner == who)
      .map(|((_, asset), amount)| usd_value(*asset, *amount))
      .sum()
  }

  fn debt_value(who: &AccountId) -> Balance {
    read_state::<LendingDebt>(LENDING_DEBT_KEY)
      .iter()
      .filter(|((owner, _, _), _)| owner == who)
      .map(|((_, asset, _), amount)| usd_value(*asset, *amount))
      .sum()
  }

  fn ensure_healthy(who: &AccountId) -> Result<(), DispatchError> {
    let borrowable = Permill::from_percent(75).mul_floor(Self::collateral_value(who));
    if Self::debt_value(who) > borrowable {
      return Err(DispatchError::Other("HealthFactorTooLow"));
    }
    Ok(())
  }
}

impl LendingOps<AccountId, AssetKind, Balance> for MockLendingOps {
  fn supply(who: &AccountId, asset: AssetKind, amount: Balance) -> Result<Balance, DispatchError> {
    MockAssetOps::transfer(who, &LENDING_POOL, asset, amount)?;
    mutate_state(LENDING_SUPPLY_KEY, |supply: &mut AssetBalances| {
      *supply.entry((*who, asset)).or_default() += amount;
    });
    Ok(amount)
  }

  fn withdraw(
    who: &AccountId,
    asset: AssetKind,
    amount: Balance,
    to: &AccountId,
  ) -> Result<Balance, DispatchError> {
    try_mutate_state(LENDING_SUPPLY_KEY, |supply: &mut AssetBalances| {
      let supplied = supply.entry((*who, asset)).or_default();
      if *supplied < amount {
        return Err(DispatchError::Other("InsufficientSupply"));
      }
      *supplied -= amount;
      Ok(())
    })?;
    Self::ensure_healthy(who)?;
    MockAssetOps::transfer(&LENDING_POOL, to, asset, amount)?;
    Ok(amount)
  }

  fn borrow(
    who: &AccountId,
    asset: AssetKind,
    amount: Balance,
    rate_mode: InterestRateMode,
    to: &AccountId,
  ) -> Result<Balance, DispatchError> {
    let config = LENDING_RESERVES
      .with(|r| r.borrow().get(&asset).copied())
      .ok_or(DispatchError::Other("UnknownReserve"))?;
    if !config.borrowing_enabled {
      return Err(DispatchError::Other("BorrowingNotEnabled"));
    }
    if rate_mode == InterestRateMode::Stable && !config.stable_borrowing_enabled {
      return Err(DispatchError::Other("StableBorrowingNotEnabled"));
    }
    mutate_state(LENDING_DEBT_KEY, |debt: &mut LendingDebt| {
      *debt.entry((*who, asset, rate_mode)).or_default() += amount;
    });
    Self::ensure_healthy(who)?;
    MockAssetOps::transfer(&LENDING_POOL, to, asset, amount)?;
    Ok(amount)
  }

  fn payback(
    who: &AccountId,
    asset: AssetKind,
    amount: Balance,
    rate_mode: InterestRateMode,
  ) -> Result<Balance, DispatchError> {
    let repaid = amount.min(lending_debt(*who, asset, rate_mode));
    MockAssetOps::transfer(who, &LENDING_POOL, asset, repaid)?;
    mutate_state(LENDING_DEBT_KEY, |debt: &mut LendingDebt| {
      *debt.entry((*who, asset, rate_mode)).or_default() -= repaid;
    });
    Ok(repaid)
  }

  fn ratio(who: &AccountId) -> Option<Ratio> {
    let debt = Self::debt_value(who);
    if debt == 0 {
      return None;
    }
    Ratio::checked_from_rational(Self::collateral_value(who), debt)
  }
}

/// DAI-denominated vaults, collateral valued at `PRICES`.
pub struct MockCdpOps;

impl MockCdpOps {
  fn with_vault<R>(
    vault: VaultId,
    f: impl FnOnce(&mut MockVault) -> Result<R, DispatchError>,
  ) -> Result<R, DispatchError> {
    try_mutate_state(VAULTS_KEY, |vaults: &mut Vaults| {
      let entry = vaults
        .get_mut(&vault)
        .ok_or(DispatchError::Other("UnknownVault"))?;
      f(entry)
    })
  }

  fn vault_ratio(vault: &MockVault) -> Option<Ratio> {
    collateral_ratio(vault.collateral, price_of(vault.collateral_asset)?, vault.debt)
  }

  fn ensure_safe(vault: &MockVault) -> Result<(), DispatchError> {
    if vault.debt == 0 {
      return Ok(());
    }
    let min = Ratio::saturating_from_rational(MIN_VAULT_RATIO.0, MIN_VAULT_RATIO.1);
    match Self::vault_ratio(vault) {
      Some(ratio) if ratio >= min => Ok(()),
      _ => Err(DispatchError::Other("VaultUnsafe")),
    }
  }
}

impl CdpOps<AccountId, AssetKind, Balance> for MockCdpOps {
  fn open(who: &AccountId, collateral: AssetKind) -> Result<VaultId, DispatchError> {
    if !collateral.is_collateral() || price_of(collateral).is_none() {
      return Err(DispatchError::Other("UnknownCollateral"));
    }
    let id = mutate_state(NEXT_VAULT_KEY, |next: &mut VaultId| {
      *next += 1;
      *next
    });
    mutate_state(VAULTS_KEY, |vaults: &mut Vaults| {
      vaults.insert(
        id,
        MockVault {
          owner: *who,
          collateral_asset: collateral,
          collateral: 0,
          debt: 0,
        },
      );
    });
    Ok(id)
  }

  fn owner(vault: VaultId) -> Option<AccountId> {
    read_state::<Vaults>(VAULTS_KEY)
      .get(&vault)
      .map(|vault| vault.owner)
  }

  fn supply(who: &AccountId, vault: VaultId, amount: Balance) -> Result<Balance, DispatchError> {
    let asset = Self::with_vault(vault, |v| Ok(v.collateral_asset))?;
    MockAssetOps::transfer(who, &CDP_ENGINE, asset, amount)?;
    Self::with_vault(vault, |v| {
      v.collateral += amount;
      Ok(amount)
    })
  }

  fn withdraw(
    _who: &AccountId,
    vault: VaultId,
    amount: Balance,
    to: &AccountId,
  ) -> Result<Balance, DispatchError> {
    let asset = Self::with_vault(vault, |v| {
      if v.collateral < amount {
        return Err(DispatchError::Other("InsufficientCollateral"));
      }
      v.collateral -= amount;
      Self::ensure_safe(v)?;
      Ok(v.collateral_asset)
    })?;
    MockAssetOps::transfer(&CDP_ENGINE, to, asset, amount)?;
    Ok(amount)
  }

  fn generate(
    _who: &AccountId,
    vault: VaultId,
    amount: Balance,
    to: &AccountId,
  ) -> Result<Balance, DispatchError> {
    Self::with_vault(vault, |v| {
      v.debt += amount;
      Self::ensure_safe(v)
    })?;
    mint_asset(*to, DAI, amount);
    Ok(amount)
  }

  fn payback(who: &AccountId, vault: VaultId, amount: Balance) -> Result<Balance, DispatchError> {
    let repaid = Self::with_vault(vault, |v| Ok(amount.min(v.debt)))?;
    burn_asset(*who, DAI, repaid)?;
    Self::with_vault(vault, |v| {
      v.debt -= repaid;
      Ok(repaid)
    })
  }

  fn ratio(vault: VaultId) -> Option<Ratio> {
    read_state::<Vaults>(VAULTS_KEY)
      .get(&vault)
      .and_then(Self::vault_ratio)
  }
}

/// Share vaults keyed by underlying asset.
pub struct MockYieldOps;

impl YieldOps<AccountId, AssetKind, Balance> for MockYieldOps {
  fn deposit(who: &AccountId, asset: AssetKind, amount: Balance) -> Result<Balance, DispatchError> {
    let vault = YIELD_VAULTS
      .with(|y| y.borrow().get(&asset).copied())
      .ok_or(DispatchError::Other("NoYieldVault"))?;
    let shares = vault
      .price_per_share
      .reciprocal()
      .ok_or(DispatchError::Other("ZeroSharePrice"))?
      .saturating_mul_int(amount);
    MockAssetOps::transfer(who, &YIELD_RESERVE, asset, amount)?;
    mint_asset(*who, vault.share_asset, shares);
    Ok(shares)
  }

  fn withdraw(
    who: &AccountId,
    share_asset: AssetKind,
    shares: Balance,
    to: &AccountId,
  ) -> Result<Balance, DispatchError> {
    if !share_asset.is_yield_share() {
      return Err(DispatchError::Other("NotAShare"));
    }
    let (underlying, vault) = YIELD_VAULTS
      .with(|y| {
        y.borrow()
          .iter()
          .find(|(_, vault)| vault.share_asset == share_asset)
          .map(|(underlying, vault)| (*underlying, *vault))
      })
      .ok_or(DispatchError::Other("NoYieldVault"))?;
    burn_asset(*who, share_asset, shares)?;
    let amount = vault.price_per_share.saturating_mul_int(shares);
    MockAssetOps::transfer(&YIELD_RESERVE, to, underlying, amount)?;
    Ok(amount)
  }
}

/// Lends out of `FLASH_LENDER` at `FLASH_LOAN_FEE`.
pub struct MockFlashLoanOps;

impl FlashLoanOps<AccountId, AssetKind, Balance> for MockFlashLoanOps {
  fn borrow(who: &AccountId, asset: AssetKind, amount: Balance) -> Result<Balance, DispatchError> {
    let fee = FLASH_LOAN_FEE.with(|f| f.borrow().mul_ceil(amount));
    MockAssetOps::transfer(&FLASH_LENDER, who, asset, amount)?;
    mutate_state(FLASH_LOANS_KEY, |loans: &mut AssetBalances| {
      *loans.entry((*who, asset)).or_default() += amount + fee;
    });
    Ok(fee)
  }

  fn repay(who: &AccountId, asset: AssetKind, amount: Balance) -> Result<(), DispatchError> {
    MockAssetOps::transfer(who, &FLASH_LENDER, asset, amount)?;
    mutate_state(FLASH_LOANS_KEY, |loans: &mut AssetBalances| {
      let outstanding = loans.entry((*who, asset)).or_default();
      *outstanding = outstanding.saturating_sub(amount);
    });
    Ok(())
  }
}

#[cfg(feature = "runtime-benchmarks")]
pub struct MockBenchmarkHelper;

#[cfg(feature = "runtime-benchmarks")]
impl crate::BenchmarkHelper<AccountId, AssetKind, Balance> for MockBenchmarkHelper {
  fn transfer_asset() -> AssetKind {
    DAI
  }

  fn fund(who: &AccountId, asset: AssetKind, amount: Balance) -> Result<(), DispatchError> {
    mint_asset(*who, asset, amount);
    Ok(())
  }
}

ord_parameter_types! {
  pub const Registrar: AccountId = REGISTRAR;
}

impl pallet_strategy_executor::Config for Test {
  type AssetId = AssetKind;
  type Balance = Balance;
  type NativeAssetId = NativeAsset;
  type AssetOps = MockAssetOps;
  type DexOps = MockDexOps;
  type LendingOps = MockLendingOps;
  type CdpOps = MockCdpOps;
  type YieldOps = MockYieldOps;
  type FlashLoanOps = MockFlashLoanOps;
  type RegistryAdminOrigin =
    EitherOfDiverse<EnsureRoot<AccountId>, EnsureSignedBy<Registrar, AccountId>>;
  type BotAdminOrigin = EnsureRoot<AccountId>;
  type FeeSink = TestFeeSink;
  type WeightToFee = TestWeightToFee;
  type MaxGasFeePortion = TestMaxGasFeePortion;
  type RatioCheckTolerance = TestRatioCheckTolerance;
  type MaxActions = ConstU32<10>;
  type MaxTriggers = ConstU32<2>;
  type MaxSubSlots = ConstU32<4>;
  type MaxBundleSize = ConstU32<4>;
  type MaxInputs = ConstU32<4>;
  type MaxNameLength = ConstU32<64>;
  type MaxSubsPerOwner = ConstU32<3>;
  type WeightInfo = ();
  #[cfg(feature = "runtime-benchmarks")]
  type BenchmarkHelper = MockBenchmarkHelper;
}

pub const TEST_INITIAL_BALANCE: Balance = 10_000_000_000_000;

/// Seeds prices, the WETH/DAI and native pools, the lending reserves, the yield
/// vaults and the flash lender.
fn seed_markets() {
  set_price(AssetKind::Native, Price::saturating_from_rational(1u128, 100u128));
  set_price(WETH, Price::saturating_from_integer(2_000u128));
  set_price(WBTC, Price::saturating_from_integer(30_000u128));
  set_price(DAI, Price::saturating_from_integer(1u128));
  set_price(USDC, Price::saturating_from_integer(1u128));

  set_pool_reserves(WETH, DAI, units(1_000), units(2_000_000));
  set_pool_reserves(AssetKind::Native, DAI, units(100_000_000), units(1_000_000));
  set_pool_reserves(AssetKind::Native, WETH, units(200_000_000), units(1_000));

  let full = ReserveConfig {
    borrowing_enabled: true,
    stable_borrowing_enabled: true,
  };
  let variable_only = ReserveConfig {
    borrowing_enabled: true,
    stable_borrowing_enabled: false,
  };
  set_lending_reserve(WETH, variable_only, units(10_000));
  set_lending_reserve(WBTC, ReserveConfig::default(), units(100));
  set_lending_reserve(DAI, full, units(10_000_000));
  set_lending_reserve(USDC, full, units(10_000_000));

  let one = Price::saturating_from_integer(1u128);
  set_yield_vault(DAI, YV_DAI, one);
  set_yield_vault(WETH, YV_WETH, one);

  mint_asset(FLASH_LENDER, WETH, units(10_000));
  mint_asset(FLASH_LENDER, DAI, units(10_000_000));
}

pub fn new_test_ext() -> polkadot_sdk::sp_io::TestExternalities {
  let mut t = polkadot_sdk::frame_system::GenesisConfig::<Test>::default()
    .build_storage()
    .unwrap();

  polkadot_sdk::pallet_balances::GenesisConfig::<Test> {
    balances: vec![
      (ALICE, TEST_INITIAL_BALANCE),
      (BOB, TEST_INITIAL_BALANCE),
      (CHARLIE, TEST_INITIAL_BALANCE),
      (FEE_SINK, 1), // ED
    ],
    dev_accounts: None,
  }
  .assimilate_storage(&mut t)
  .unwrap();

  let mut ext = polkadot_sdk::sp_io::TestExternalities::new(t);
  ext.execute_with(|| {
    System::set_block_number(1);
    reset_mock_adapters();
    seed_markets();
  });
  ext
}
