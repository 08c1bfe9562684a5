#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub use pallet::*;

pub mod adapters;
pub use adapters::{AssetOps, CdpOps, DexOps, FlashLoanOps, LendingOps, YieldOps};

pub mod types;
pub use types::*;

mod recipe;

pub mod weights;
pub use weights::WeightInfo;

#[cfg(test)]
mod mock;

#[cfg(feature = "runtime-benchmarks")]
mod benchmarking;

pub(crate) const LOG_TARGET: &str = "runtime::strategy-executor";

#[cfg(feature = "runtime-benchmarks")]
pub trait BenchmarkHelper<AccountId, AssetId, Balance> {
  /// Asset used for transfers in benchmarked recipes.
  fn transfer_asset() -> AssetId;

  /// Gives `who` enough of `asset` to run a benchmarked recipe.
  fn fund(
    who: &AccountId,
    asset: AssetId,
    amount: Balance,
  ) -> Result<(), polkadot_sdk::sp_runtime::DispatchError>;
}

#[frame::pallet]
pub mod pallet {
  use super::{
    AssetOps, CdpOps, DexOps, FlashLoanOps, LendingOps, WeightInfo, YieldOps, LOG_TARGET,
  };
  use crate::types::*;
  use alloc::vec::Vec;
  use frame::prelude::*;
  use polkadot_sdk::{frame_support::traits::EnsureOrigin, sp_runtime::Permill};

  #[pallet::config]
  pub trait Config: frame_system::Config {
    type AssetId: Parameter + Member + Copy + MaybeSerializeDeserialize + MaxEncodedLen;

    type Balance: Parameter
      + Member
      + AtLeast32BitUnsigned
      + Default
      + Copy
      + MaybeSerializeDeserialize
      + MaxEncodedLen;

    /// Asset gas fees are denominated in before conversion
    #[pallet::constant]
    type NativeAssetId: Get<Self::AssetId>;

    type AssetOps: AssetOps<Self::AccountId, Self::AssetId, Self::Balance>;
    type DexOps: DexOps<Self::AccountId, Self::AssetId, Self::Balance>;
    type LendingOps: LendingOps<Self::AccountId, Self::AssetId, Self::Balance>;
    type CdpOps: CdpOps<Self::AccountId, Self::AssetId, Self::Balance>;
    type YieldOps: YieldOps<Self::AccountId, Self::AssetId, Self::Balance>;
    type FlashLoanOps: FlashLoanOps<Self::AccountId, Self::AssetId, Self::Balance>;

    /// May register strategies and bundles, and open the registry to everyone
    type RegistryAdminOrigin: EnsureOrigin<Self::RuntimeOrigin>;
    /// Manages the bot allow-list and the execution pause switch
    type BotAdminOrigin: EnsureOrigin<Self::RuntimeOrigin>;

    /// Receives gas fees taken by recipes
    type FeeSink: Get<Self::AccountId>;
    /// Prices the gas units a `GasFee` action charges for
    type WeightToFee: polkadot_sdk::sp_weights::WeightToFee<Balance = Self::Balance>;
    /// Upper bound of a gas fee relative to the amount it is taken from
    #[pallet::constant]
    type MaxGasFeePortion: Get<Permill>;
    /// How far a repay or boost may overshoot its target ratio
    #[pallet::constant]
    type RatioCheckTolerance: Get<Ratio>;

    #[pallet::constant]
    type MaxActions: Get<u32>;
    #[pallet::constant]
    type MaxTriggers: Get<u32>;
    #[pallet::constant]
    type MaxSubSlots: Get<u32>;
    #[pallet::constant]
    type MaxBundleSize: Get<u32>;
    #[pallet::constant]
    type MaxInputs: Get<u32>;
    #[pallet::constant]
    type MaxNameLength: Get<u32>;
    #[pallet::constant]
    type MaxSubsPerOwner: Get<u32>;

    type WeightInfo: WeightInfo;
    #[cfg(feature = "runtime-benchmarks")]
    type BenchmarkHelper: crate::BenchmarkHelper<Self::AccountId, Self::AssetId, Self::Balance>;
  }

  pub type BalanceOf<T> = <T as Config>::Balance;
  pub type AssetIdOf<T> = <T as Config>::AssetId;

  pub type ParamValueOf<T> = ParamValue<
    <T as frame_system::Config>::AccountId,
    <T as Config>::AssetId,
    <T as Config>::Balance,
  >;
  pub type ParamOf<T> =
    Param<<T as frame_system::Config>::AccountId, <T as Config>::AssetId, <T as Config>::Balance>;
  pub type ActionOf<T> =
    Action<<T as frame_system::Config>::AccountId, <T as Config>::AssetId, <T as Config>::Balance>;

  pub type StrategyNameOf<T> = BoundedVec<u8, <T as Config>::MaxNameLength>;
  pub type TriggerKindsOf<T> = BoundedVec<TriggerKind, <T as Config>::MaxTriggers>;
  pub type SubSlotsOf<T> = BoundedVec<SubSlot, <T as Config>::MaxSubSlots>;
  pub type ActionsOf<T> = BoundedVec<ActionOf<T>, <T as Config>::MaxActions>;
  pub type BundleStrategiesOf<T> = BoundedVec<StrategyId, <T as Config>::MaxBundleSize>;
  pub type TriggerDataOf<T> = BoundedVec<Trigger, <T as Config>::MaxTriggers>;
  pub type SubDataOf<T> = BoundedVec<ParamValueOf<T>, <T as Config>::MaxSubSlots>;
  pub type InputsOf<T> = BoundedVec<ParamValueOf<T>, <T as Config>::MaxInputs>;

  pub type StrategyOf<T> = Strategy<
    <T as frame_system::Config>::AccountId,
    BlockNumberFor<T>,
    StrategyNameOf<T>,
    TriggerKindsOf<T>,
    SubSlotsOf<T>,
    ActionsOf<T>,
  >;

  pub type BundleOf<T> =
    Bundle<<T as frame_system::Config>::AccountId, BlockNumberFor<T>, BundleStrategiesOf<T>>;

  pub type SubscriptionOf<T> = Subscription<
    <T as frame_system::Config>::AccountId,
    BlockNumberFor<T>,
    TriggerDataOf<T>,
    SubDataOf<T>,
  >;

  #[pallet::pallet]
  pub struct Pallet<T>(_);

  #[pallet::storage]
  #[pallet::getter(fn next_strategy_id)]
  pub type NextStrategyId<T> = StorageValue<_, StrategyId, ValueQuery>;

  #[pallet::storage]
  #[pallet::getter(fn strategies)]
  pub type Strategies<T: Config> =
    StorageMap<_, Blake2_128Concat, StrategyId, StrategyOf<T>, OptionQuery>;

  #[pallet::storage]
  #[pallet::getter(fn next_bundle_id)]
  pub type NextBundleId<T> = StorageValue<_, BundleId, ValueQuery>;

  #[pallet::storage]
  #[pallet::getter(fn bundles)]
  pub type Bundles<T: Config> = StorageMap<_, Blake2_128Concat, BundleId, BundleOf<T>, OptionQuery>;

  #[pallet::storage]
  #[pallet::getter(fn next_sub_id)]
  pub type NextSubId<T> = StorageValue<_, SubId, ValueQuery>;

  #[pallet::storage]
  #[pallet::getter(fn subscriptions)]
  pub type Subscriptions<T: Config> =
    StorageMap<_, Blake2_128Concat, SubId, SubscriptionOf<T>, OptionQuery>;

  #[pallet::storage]
  #[pallet::getter(fn owner_subs)]
  pub type OwnerSubs<T: Config> =
    StorageMap<_, Blake2_128Concat, T::AccountId, BoundedVec<SubId, T::MaxSubsPerOwner>, ValueQuery>;

  #[pallet::storage]
  pub type BotCallers<T: Config> = StorageMap<_, Blake2_128Concat, T::AccountId, (), OptionQuery>;

  #[pallet::storage]
  #[pallet::getter(fn open_to_public)]
  pub type OpenToPublic<T> = StorageValue<_, bool, ValueQuery>;

  #[pallet::storage]
  #[pallet::getter(fn execution_paused)]
  pub type ExecutionPaused<T> = StorageValue<_, bool, ValueQuery>;

  #[pallet::event]
  #[pallet::generate_deposit(pub(super) fn deposit_event)]
  pub enum Event<T: Config> {
    StrategyCreated {
      strategy_id: StrategyId,
      owner: Option<T::AccountId>,
      continuous: bool,
    },
    BundleCreated {
      bundle_id: BundleId,
      strategies: BundleStrategiesOf<T>,
    },
    OpenToPublicSet {
      open: bool,
    },
    Subscribed {
      sub_id: SubId,
      owner: T::AccountId,
      target: SubTarget,
    },
    SubActivated {
      sub_id: SubId,
    },
    SubDeactivated {
      sub_id: SubId,
    },
    SubCancelled {
      sub_id: SubId,
    },
    BotCallerAdded {
      who: T::AccountId,
    },
    BotCallerRemoved {
      who: T::AccountId,
    },
    ExecutionPausedSet {
      paused: bool,
    },
    ActionExecuted {
      sub_id: SubId,
      step: u32,
      output: ParamValueOf<T>,
    },
    GasFeeTaken {
      sub_id: SubId,
      asset: T::AssetId,
      amount: T::Balance,
    },
    FlashLoanRepaid {
      sub_id: SubId,
      asset: T::AssetId,
      amount: T::Balance,
      fee: T::Balance,
    },
    StrategyExecuted {
      sub_id: SubId,
      strategy_id: StrategyId,
      caller: T::AccountId,
      actions: u32,
    },
  }

  #[pallet::error]
  pub enum Error<T> {
    /// Origin may not register strategies or bundles
    NotAuthorized,
    IdOverflow,
    EmptyRecipe,
    StrategyNotFound,
    BundleNotFound,
    EmptyBundle,
    /// Bundled strategies must declare the same triggers and sub-slot kinds
    BundleShapeMismatch,
    /// A returned value is referenced before the action producing it ran
    ForwardReference,
    UnknownSubSlot,
    FlashLoanNotFirst,
    SubNotFound,
    NotSubOwner,
    SubDataMismatch,
    TriggerDataMismatch,
    NotVaultOwner,
    TooManySubs,
    AlreadyEnabled,
    AlreadyDisabled,
    SubNotEnabled,
    BotNotAuthorized,
    BotAlreadyAdded,
    BotNotFound,
    ExecutionPaused,
    InvalidStrategyIndex,
    TriggerNotActive,
    ParamTypeMismatch,
    InputMissing,
    /// Vault is unknown or carries no debt
    RatioUnavailable,
    RatioNotImproved,
    RatioOutsideTarget,
    /// Gas fee could not be converted into the requested asset
    NoFeeQuote,
  }

  #[pallet::call]
  impl<T: Config> Pallet<T> {
    #[pallet::call_index(0)]
    #[pallet::weight(T::WeightInfo::create_strategy(actions.len() as u32))]
    pub fn create_strategy(
      origin: OriginFor<T>,
      name: StrategyNameOf<T>,
      triggers: TriggerKindsOf<T>,
      sub_slots: SubSlotsOf<T>,
      actions: ActionsOf<T>,
      continuous: bool,
    ) -> DispatchResult {
      let owner = Self::ensure_registry_origin(origin)?;
      Self::validate_recipe(&sub_slots, &actions)?;
      let strategy_id = NextStrategyId::<T>::get();
      let next_id = strategy_id.checked_add(1).ok_or(Error::<T>::IdOverflow)?;
      Strategies::<T>::insert(
        strategy_id,
        Strategy {
          name,
          owner: owner.clone(),
          triggers,
          sub_slots,
          actions,
          continuous,
          created_at: frame_system::Pallet::<T>::block_number(),
        },
      );
      NextStrategyId::<T>::put(next_id);
      Self::deposit_event(Event::StrategyCreated {
        strategy_id,
        owner,
        continuous,
      });
      Ok(())
    }

    #[pallet::call_index(1)]
    #[pallet::weight(T::WeightInfo::create_bundle(strategies.len() as u32))]
    pub fn create_bundle(origin: OriginFor<T>, strategies: BundleStrategiesOf<T>) -> DispatchResult {
      let owner = Self::ensure_registry_origin(origin)?;
      let first_id = *strategies.first().ok_or(Error::<T>::EmptyBundle)?;
      let first = Strategies::<T>::get(first_id).ok_or(Error::<T>::StrategyNotFound)?;
      for strategy_id in strategies.iter().skip(1) {
        let other = Strategies::<T>::get(strategy_id).ok_or(Error::<T>::StrategyNotFound)?;
        ensure!(
          Self::same_shape(&first, &other),
          Error::<T>::BundleShapeMismatch
        );
      }
      let bundle_id = NextBundleId::<T>::get();
      let next_id = bundle_id.checked_add(1).ok_or(Error::<T>::IdOverflow)?;
      Bundles::<T>::insert(
        bundle_id,
        Bundle {
          owner,
          strategies: strategies.clone(),
          created_at: frame_system::Pallet::<T>::block_number(),
        },
      );
      NextBundleId::<T>::put(next_id);
      Self::deposit_event(Event::BundleCreated {
        bundle_id,
        strategies,
      });
      Ok(())
    }

    #[pallet::call_index(2)]
    #[pallet::weight(T::WeightInfo::subscribe())]
    pub fn subscribe(
      origin: OriginFor<T>,
      target: SubTarget,
      trigger_data: TriggerDataOf<T>,
      sub_data: SubDataOf<T>,
    ) -> DispatchResult {
      let owner = ensure_signed(origin)?;
      let strategy = Self::template_of(&target)?;
      Self::validate_sub_shape(&strategy, &trigger_data, &sub_data)?;
      for trigger in trigger_data.iter() {
        if let Trigger::CdpRatio { vault, .. } = trigger {
          Self::ensure_vault_owner(*vault, &owner)?;
        }
      }
      for value in sub_data.iter() {
        if let ParamValue::Vault(vault) = value {
          Self::ensure_vault_owner(*vault, &owner)?;
        }
      }
      let sub_id = NextSubId::<T>::get();
      let next_id = sub_id.checked_add(1).ok_or(Error::<T>::IdOverflow)?;
      OwnerSubs::<T>::try_mutate(&owner, |subs| {
        subs.try_push(sub_id).map_err(|_| Error::<T>::TooManySubs)
      })?;
      Subscriptions::<T>::insert(
        sub_id,
        Subscription {
          owner: owner.clone(),
          target,
          trigger_data,
          sub_data,
          is_enabled: true,
          created_at: frame_system::Pallet::<T>::block_number(),
        },
      );
      NextSubId::<T>::put(next_id);
      Self::deposit_event(Event::Subscribed {
        sub_id,
        owner,
        target,
      });
      Ok(())
    }

    #[pallet::call_index(3)]
    #[pallet::weight(T::WeightInfo::deactivate_sub())]
    pub fn deactivate_sub(origin: OriginFor<T>, sub_id: SubId) -> DispatchResult {
      let who = ensure_signed(origin)?;
      Subscriptions::<T>::try_mutate(sub_id, |maybe| -> DispatchResult {
        let sub = maybe.as_mut().ok_or(Error::<T>::SubNotFound)?;
        ensure!(sub.owner == who, Error::<T>::NotSubOwner);
        ensure!(sub.is_enabled, Error::<T>::AlreadyDisabled);
        sub.is_enabled = false;
        Self::deposit_event(Event::SubDeactivated { sub_id });
        Ok(())
      })
    }

    #[pallet::call_index(4)]
    #[pallet::weight(T::WeightInfo::activate_sub())]
    pub fn activate_sub(origin: OriginFor<T>, sub_id: SubId) -> DispatchResult {
      let who = ensure_signed(origin)?;
      Subscriptions::<T>::try_mutate(sub_id, |maybe| -> DispatchResult {
        let sub = maybe.as_mut().ok_or(Error::<T>::SubNotFound)?;
        ensure!(sub.owner == who, Error::<T>::NotSubOwner);
        ensure!(!sub.is_enabled, Error::<T>::AlreadyEnabled);
        sub.is_enabled = true;
        Self::deposit_event(Event::SubActivated { sub_id });
        Ok(())
      })
    }

    #[pallet::call_index(5)]
    #[pallet::weight(T::WeightInfo::cancel_sub())]
    pub fn cancel_sub(origin: OriginFor<T>, sub_id: SubId) -> DispatchResult {
      let who = ensure_signed(origin)?;
      let sub = Subscriptions::<T>::get(sub_id).ok_or(Error::<T>::SubNotFound)?;
      ensure!(sub.owner == who, Error::<T>::NotSubOwner);
      Subscriptions::<T>::remove(sub_id);
      OwnerSubs::<T>::mutate(&who, |subs| subs.retain(|id| *id != sub_id));
      Self::deposit_event(Event::SubCancelled { sub_id });
      Ok(())
    }

    #[pallet::call_index(6)]
    #[pallet::weight(T::WeightInfo::add_bot_caller())]
    pub fn add_bot_caller(origin: OriginFor<T>, who: T::AccountId) -> DispatchResult {
      T::BotAdminOrigin::ensure_origin(origin)?;
      ensure!(
        !BotCallers::<T>::contains_key(&who),
        Error::<T>::BotAlreadyAdded
      );
      BotCallers::<T>::insert(&who, ());
      Self::deposit_event(Event::BotCallerAdded { who });
      Ok(())
    }

    #[pallet::call_index(7)]
    #[pallet::weight(T::WeightInfo::remove_bot_caller())]
    pub fn remove_bot_caller(origin: OriginFor<T>, who: T::AccountId) -> DispatchResult {
      T::BotAdminOrigin::ensure_origin(origin)?;
      ensure!(BotCallers::<T>::contains_key(&who), Error::<T>::BotNotFound);
      BotCallers::<T>::remove(&who);
      Self::deposit_event(Event::BotCallerRemoved { who });
      Ok(())
    }

    /// Runs one strategy of a subscription. For bundle subscriptions the bot
    /// picks the alternative with `strategy_index`; direct subscriptions take `0`.
    #[pallet::call_index(8)]
    #[pallet::weight(T::WeightInfo::execute_strategy(T::MaxActions::get()))]
    pub fn execute_strategy(
      origin: OriginFor<T>,
      sub_id: SubId,
      strategy_index: u32,
      inputs: InputsOf<T>,
    ) -> DispatchResult {
      let caller = ensure_signed(origin)?;
      ensure!(Self::is_bot_caller(&caller), Error::<T>::BotNotAuthorized);
      ensure!(!ExecutionPaused::<T>::get(), Error::<T>::ExecutionPaused);
      let sub = Subscriptions::<T>::get(sub_id).ok_or(Error::<T>::SubNotFound)?;
      ensure!(sub.is_enabled, Error::<T>::SubNotEnabled);
      let strategy_id = Self::select_strategy(&sub.target, strategy_index)?;
      let strategy = Strategies::<T>::get(strategy_id).ok_or(Error::<T>::StrategyNotFound)?;
      ensure!(
        Self::triggers_active(sub_id, &sub),
        Error::<T>::TriggerNotActive
      );

      let actions = Self::execute_recipe(sub_id, &sub, &strategy, &inputs)?;

      if !strategy.continuous {
        Subscriptions::<T>::mutate(sub_id, |maybe| {
          if let Some(sub) = maybe {
            sub.is_enabled = false;
          }
        });
        Self::deposit_event(Event::SubDeactivated { sub_id });
      }
      Self::deposit_event(Event::StrategyExecuted {
        sub_id,
        strategy_id,
        caller,
        actions,
      });
      Ok(())
    }

    #[pallet::call_index(9)]
    #[pallet::weight(T::WeightInfo::set_open_to_public())]
    pub fn set_open_to_public(origin: OriginFor<T>, open: bool) -> DispatchResult {
      T::RegistryAdminOrigin::ensure_origin(origin)?;
      OpenToPublic::<T>::put(open);
      Self::deposit_event(Event::OpenToPublicSet { open });
      Ok(())
    }

    #[pallet::call_index(10)]
    #[pallet::weight(T::WeightInfo::set_execution_paused())]
    pub fn set_execution_paused(origin: OriginFor<T>, paused: bool) -> DispatchResult {
      T::BotAdminOrigin::ensure_origin(origin)?;
      ExecutionPaused::<T>::put(paused);
      Self::deposit_event(Event::ExecutionPausedSet { paused });
      Ok(())
    }
  }

  impl<T: Config> Pallet<T> {
    pub fn is_bot_caller(who: &T::AccountId) -> bool {
      BotCallers::<T>::contains_key(who)
    }

    /// Whether `strategy_index` of `sub_id` could be executed right now,
    /// ignoring bot authorisation and the pause switch.
    pub fn is_triggered(sub_id: SubId, strategy_index: u32) -> bool {
      let Some(sub) = Subscriptions::<T>::get(sub_id) else {
        return false;
      };
      sub.is_enabled
        && Self::select_strategy(&sub.target, strategy_index).is_ok()
        && Self::triggers_active(sub_id, &sub)
    }

    /// Conjunction of every bound trigger. No triggers means always active.
    pub(crate) fn triggers_active(sub_id: SubId, sub: &SubscriptionOf<T>) -> bool {
      sub.trigger_data.iter().all(|trigger| {
        let active = Self::is_trigger_active(&sub.owner, trigger);
        if !active {
          log::debug!(
            target: LOG_TARGET,
            "sub {}: trigger {:?} not active",
            sub_id,
            trigger
          );
        }
        active
      })
    }

    fn is_trigger_active(owner: &T::AccountId, trigger: &Trigger) -> bool {
      let current = match trigger {
        Trigger::CdpRatio { vault, .. } => T::CdpOps::ratio(*vault),
        Trigger::LendingRatio { .. } => T::LendingOps::ratio(owner),
      };
      let (threshold, state) = match trigger {
        Trigger::CdpRatio { ratio, state, .. } | Trigger::LendingRatio { ratio, state } => {
          (*ratio, *state)
        }
      };
      current.is_some_and(|ratio| state.is_crossed(ratio, threshold))
    }

    fn select_strategy(target: &SubTarget, strategy_index: u32) -> Result<StrategyId, DispatchError> {
      match target {
        SubTarget::Strategy(strategy_id) => {
          ensure!(strategy_index == 0, Error::<T>::InvalidStrategyIndex);
          Ok(*strategy_id)
        }
        SubTarget::Bundle(bundle_id) => {
          let bundle = Bundles::<T>::get(bundle_id).ok_or(Error::<T>::BundleNotFound)?;
          let strategy_id = bundle
            .strategies
            .get(strategy_index as usize)
            .ok_or(Error::<T>::InvalidStrategyIndex)?;
          Ok(*strategy_id)
        }
      }
    }

    /// Strategy whose shape a subscription to `target` must follow.
    fn template_of(target: &SubTarget) -> Result<StrategyOf<T>, DispatchError> {
      let strategy_id = match target {
        SubTarget::Strategy(strategy_id) => *strategy_id,
        SubTarget::Bundle(bundle_id) => {
          let bundle = Bundles::<T>::get(bundle_id).ok_or(Error::<T>::BundleNotFound)?;
          *bundle.strategies.first().ok_or(Error::<T>::EmptyBundle)?
        }
      };
      Ok(Strategies::<T>::get(strategy_id).ok_or(Error::<T>::StrategyNotFound)?)
    }

    fn ensure_registry_origin(origin: OriginFor<T>) -> Result<Option<T::AccountId>, DispatchError> {
      if T::RegistryAdminOrigin::ensure_origin(origin.clone()).is_ok() {
        return Ok(None);
      }
      let who = ensure_signed(origin)?;
      ensure!(OpenToPublic::<T>::get(), Error::<T>::NotAuthorized);
      Ok(Some(who))
    }

    pub(crate) fn ensure_vault_owner(vault: VaultId, who: &T::AccountId) -> DispatchResult {
      ensure!(
        T::CdpOps::owner(vault).as_ref() == Some(who),
        Error::<T>::NotVaultOwner
      );
      Ok(())
    }

    fn validate_recipe(sub_slots: &SubSlotsOf<T>, actions: &ActionsOf<T>) -> DispatchResult {
      ensure!(!actions.is_empty(), Error::<T>::EmptyRecipe);
      for (idx, action) in actions.iter().enumerate() {
        ensure!(
          !action.is_flash_loan() || idx == 0,
          Error::<T>::FlashLoanNotFirst
        );
        for param in action.params() {
          match param {
            Param::Returned(i) => ensure!((*i as usize) < idx, Error::<T>::ForwardReference),
            Param::Sub(i) => ensure!(
              (*i as usize) < sub_slots.len(),
              Error::<T>::UnknownSubSlot
            ),
            Param::Input(i) => ensure!(
              u32::from(*i) < T::MaxInputs::get(),
              Error::<T>::InputMissing
            ),
            Param::Value(_) | Param::Owner => {}
          }
        }
      }
      Ok(())
    }

    fn same_shape(a: &StrategyOf<T>, b: &StrategyOf<T>) -> bool {
      a.triggers == b.triggers
        && a
          .sub_slots
          .iter()
          .map(|slot| slot.kind)
          .eq(b.sub_slots.iter().map(|slot| slot.kind))
    }

    fn validate_sub_shape(
      strategy: &StrategyOf<T>,
      trigger_data: &TriggerDataOf<T>,
      sub_data: &SubDataOf<T>,
    ) -> DispatchResult {
      let trigger_kinds: Vec<TriggerKind> = trigger_data.iter().map(Trigger::kind).collect();
      ensure!(
        trigger_kinds.as_slice() == strategy.triggers.as_slice(),
        Error::<T>::TriggerDataMismatch
      );
      ensure!(
        sub_data
          .iter()
          .map(ParamValue::kind)
          .eq(strategy.sub_slots.iter().map(|slot| slot.kind)),
        Error::<T>::SubDataMismatch
      );
      Ok(())
    }
  }
}
