#![cfg(feature = "runtime-benchmarks")]

use crate::*;
use alloc::vec::Vec;
use frame::prelude::*;
use polkadot_sdk::frame_benchmarking::{account, v2::*};
use polkadot_sdk::frame_support::traits::EnsureOrigin;
use polkadot_sdk::frame_system::RawOrigin;

const SEED: u32 = 0;

#[benchmarks]
mod benches {
  use super::*;

  fn registry_origin<T: Config>() -> Result<T::RuntimeOrigin, BenchmarkError> {
    T::RegistryAdminOrigin::try_successful_origin().map_err(|_| BenchmarkError::Weightless)
  }

  fn bot_admin_origin<T: Config>() -> Result<T::RuntimeOrigin, BenchmarkError> {
    T::BotAdminOrigin::try_successful_origin().map_err(|_| BenchmarkError::Weightless)
  }

  fn transfer_actions<T: Config>(count: u32) -> Result<ActionsOf<T>, BenchmarkError> {
    let recipient: T::AccountId = account("recipient", 0, SEED);
    (0..count)
      .map(|_| Action::Transfer {
        asset: Param::Value(ParamValue::Asset(T::BenchmarkHelper::transfer_asset())),
        amount: Param::Value(ParamValue::Amount(T::Balance::from(1u32))),
        to: Param::Value(ParamValue::Account(recipient.clone())),
      })
      .collect::<Vec<_>>()
      .try_into()
      .map_err(|_| BenchmarkError::Stop("actions exceed MaxActions"))
  }

  fn amount_slots<T: Config>(count: u32) -> Result<SubSlotsOf<T>, BenchmarkError> {
    (0..count)
      .map(|_| SubSlot {
        name: Default::default(),
        kind: SlotKind::Amount,
      })
      .collect::<Vec<_>>()
      .try_into()
      .map_err(|_| BenchmarkError::Stop("slots exceed MaxSubSlots"))
  }

  fn register_strategy<T: Config>(actions: u32, slots: u32) -> Result<StrategyId, BenchmarkError> {
    let strategy_id = NextStrategyId::<T>::get();
    Pallet::<T>::create_strategy(
      registry_origin::<T>()?,
      Default::default(),
      Default::default(),
      amount_slots::<T>(slots)?,
      transfer_actions::<T>(actions)?,
      true,
    )?;
    Ok(strategy_id)
  }

  fn subscribed<T: Config>(owner: &T::AccountId, actions: u32) -> Result<SubId, BenchmarkError> {
    let strategy_id = register_strategy::<T>(actions, 0)?;
    let sub_id = NextSubId::<T>::get();
    Pallet::<T>::subscribe(
      RawOrigin::Signed(owner.clone()).into(),
      SubTarget::Strategy(strategy_id),
      Default::default(),
      Default::default(),
    )?;
    Ok(sub_id)
  }

  #[benchmark]
  fn create_strategy(a: Linear<1, { T::MaxActions::get() }>) -> Result<(), BenchmarkError> {
    let origin = registry_origin::<T>()?;
    let sub_slots = amount_slots::<T>(T::MaxSubSlots::get())?;
    let actions = transfer_actions::<T>(a)?;
    #[extrinsic_call]
    _(
      origin as T::RuntimeOrigin,
      Default::default(),
      Default::default(),
      sub_slots,
      actions,
      true,
    );
    assert_eq!(Strategies::<T>::get(0).map(|s| s.actions.len()), Some(a as usize));
    Ok(())
  }

  #[benchmark]
  fn create_bundle(s: Linear<1, { T::MaxBundleSize::get() }>) -> Result<(), BenchmarkError> {
    let mut ids = Vec::new();
    for _ in 0..s {
      ids.push(register_strategy::<T>(1, T::MaxSubSlots::get())?);
    }
    let strategies: BundleStrategiesOf<T> = ids
      .try_into()
      .map_err(|_| BenchmarkError::Stop("bundle exceeds MaxBundleSize"))?;
    let origin = registry_origin::<T>()?;
    #[extrinsic_call]
    _(origin as T::RuntimeOrigin, strategies);
    assert!(Bundles::<T>::contains_key(0));
    Ok(())
  }

  #[benchmark]
  fn subscribe() -> Result<(), BenchmarkError> {
    let slots = T::MaxSubSlots::get();
    let strategy_id = register_strategy::<T>(1, slots)?;
    let caller: T::AccountId = whitelisted_caller();
    let sub_data: SubDataOf<T> = (0..slots)
      .map(|_| ParamValue::Amount(T::Balance::from(1u32)))
      .collect::<Vec<_>>()
      .try_into()
      .map_err(|_| BenchmarkError::Stop("sub data exceeds MaxSubSlots"))?;
    #[extrinsic_call]
    _(
      RawOrigin::Signed(caller.clone()),
      SubTarget::Strategy(strategy_id),
      Default::default(),
      sub_data,
    );
    assert_eq!(OwnerSubs::<T>::get(&caller).len(), 1);
    Ok(())
  }

  #[benchmark]
  fn deactivate_sub() -> Result<(), BenchmarkError> {
    let caller: T::AccountId = whitelisted_caller();
    let sub_id = subscribed::<T>(&caller, 1)?;
    #[extrinsic_call]
    _(RawOrigin::Signed(caller), sub_id);
    assert!(Subscriptions::<T>::get(sub_id).is_some_and(|sub| !sub.is_enabled));
    Ok(())
  }

  #[benchmark]
  fn activate_sub() -> Result<(), BenchmarkError> {
    let caller: T::AccountId = whitelisted_caller();
    let sub_id = subscribed::<T>(&caller, 1)?;
    Pallet::<T>::deactivate_sub(RawOrigin::Signed(caller.clone()).into(), sub_id)?;
    #[extrinsic_call]
    _(RawOrigin::Signed(caller), sub_id);
    assert!(Subscriptions::<T>::get(sub_id).is_some_and(|sub| sub.is_enabled));
    Ok(())
  }

  #[benchmark]
  fn cancel_sub() -> Result<(), BenchmarkError> {
    let caller: T::AccountId = whitelisted_caller();
    let sub_id = subscribed::<T>(&caller, 1)?;
    #[extrinsic_call]
    _(RawOrigin::Signed(caller.clone()), sub_id);
    assert!(!Subscriptions::<T>::contains_key(sub_id));
    assert!(OwnerSubs::<T>::get(&caller).is_empty());
    Ok(())
  }

  #[benchmark]
  fn add_bot_caller() -> Result<(), BenchmarkError> {
    let origin = bot_admin_origin::<T>()?;
    let bot: T::AccountId = account("bot", 0, SEED);
    #[extrinsic_call]
    _(origin as T::RuntimeOrigin, bot.clone());
    assert!(BotCallers::<T>::contains_key(&bot));
    Ok(())
  }

  #[benchmark]
  fn remove_bot_caller() -> Result<(), BenchmarkError> {
    let origin = bot_admin_origin::<T>()?;
    let bot: T::AccountId = account("bot", 0, SEED);
    BotCallers::<T>::insert(&bot, ());
    #[extrinsic_call]
    _(origin as T::RuntimeOrigin, bot.clone());
    assert!(!BotCallers::<T>::contains_key(&bot));
    Ok(())
  }

  #[benchmark]
  fn execute_strategy(a: Linear<1, { T::MaxActions::get() }>) -> Result<(), BenchmarkError> {
    let owner: T::AccountId = account("subscriber", 0, SEED);
    let sub_id = subscribed::<T>(&owner, a)?;
    T::BenchmarkHelper::fund(
      &owner,
      T::BenchmarkHelper::transfer_asset(),
      T::Balance::from(a.saturating_add(1)),
    )?;
    let bot: T::AccountId = whitelisted_caller();
    BotCallers::<T>::insert(&bot, ());
    #[extrinsic_call]
    _(RawOrigin::Signed(bot), sub_id, 0, Default::default());
    assert!(Subscriptions::<T>::get(sub_id).is_some_and(|sub| sub.is_enabled));
    Ok(())
  }

  #[benchmark]
  fn set_open_to_public() -> Result<(), BenchmarkError> {
    let origin = registry_origin::<T>()?;
    #[extrinsic_call]
    _(origin as T::RuntimeOrigin, true);
    assert!(OpenToPublic::<T>::get());
    Ok(())
  }

  #[benchmark]
  fn set_execution_paused() -> Result<(), BenchmarkError> {
    let origin = bot_admin_origin::<T>()?;
    #[extrinsic_call]
    _(origin as T::RuntimeOrigin, true);
    assert!(ExecutionPaused::<T>::get());
    Ok(())
  }

  #[cfg(test)]
  use crate::mock::{Test, new_test_ext};
  #[cfg(test)]
  impl_benchmark_test_suite!(Pallet, new_test_ext(), Test);
}
