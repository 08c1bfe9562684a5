#![cfg_attr(rustfmt, rustfmt_skip)]
#![allow(unused_parens)]
#![allow(unused_imports)]
#![allow(missing_docs)]

use core::marker::PhantomData;
use polkadot_sdk::frame_support::{
  traits::Get,
  weights::{constants::RocksDbWeight, Weight},
};

pub trait WeightInfo {
  fn create_strategy(a: u32) -> Weight;
  fn create_bundle(s: u32) -> Weight;
  fn subscribe() -> Weight;
  fn deactivate_sub() -> Weight;
  fn activate_sub() -> Weight;
  fn cancel_sub() -> Weight;
  fn add_bot_caller() -> Weight;
  fn remove_bot_caller() -> Weight;
  fn execute_strategy(a: u32) -> Weight;
  fn set_open_to_public() -> Weight;
  fn set_execution_paused() -> Weight;
}

pub struct SubstrateWeight<T>(PhantomData<T>);
impl<T: polkadot_sdk::frame_system::Config + crate::Config> WeightInfo for SubstrateWeight<T> {
  fn create_strategy(a: u32) -> Weight {
    Weight::from_parts(
      20_000_000u64.saturating_add(u64::from(a).saturating_mul(1_500_000)),
      1500u64.saturating_add(u64::from(a).saturating_mul(160)),
    )
    .saturating_add(T::DbWeight::get().reads(3))
    .saturating_add(T::DbWeight::get().writes(2))
  }

  fn create_bundle(s: u32) -> Weight {
    Weight::from_parts(
      18_000_000u64.saturating_add(u64::from(s).saturating_mul(4_000_000)),
      1200u64.saturating_add(u64::from(s).saturating_mul(2400)),
    )
    .saturating_add(T::DbWeight::get().reads(u64::from(s).saturating_add(3)))
    .saturating_add(T::DbWeight::get().writes(2))
  }

  fn subscribe() -> Weight {
    let triggers = u64::from(T::MaxTriggers::get());
    let slots = u64::from(T::MaxSubSlots::get());
    Weight::from_parts(30_000_000, 3000)
      .saturating_add(T::DbWeight::get().reads(triggers.saturating_add(slots).saturating_add(4)))
      .saturating_add(T::DbWeight::get().writes(3))
  }

  fn deactivate_sub() -> Weight {
    Weight::from_parts(12_000_000, 1200)
      .saturating_add(T::DbWeight::get().reads(1))
      .saturating_add(T::DbWeight::get().writes(1))
  }

  fn activate_sub() -> Weight {
    Weight::from_parts(12_000_000, 1200)
      .saturating_add(T::DbWeight::get().reads(1))
      .saturating_add(T::DbWeight::get().writes(1))
  }

  fn cancel_sub() -> Weight {
    Weight::from_parts(16_000_000, 1600)
      .saturating_add(T::DbWeight::get().reads(2))
      .saturating_add(T::DbWeight::get().writes(2))
  }

  fn add_bot_caller() -> Weight {
    Weight::from_parts(9_000_000, 600)
      .saturating_add(T::DbWeight::get().reads(1))
      .saturating_add(T::DbWeight::get().writes(1))
  }

  fn remove_bot_caller() -> Weight {
    Weight::from_parts(9_000_000, 600)
      .saturating_add(T::DbWeight::get().reads(1))
      .saturating_add(T::DbWeight::get().writes(1))
  }

  fn execute_strategy(a: u32) -> Weight {
    // every action is priced like a swap, the most expensive adapter call
    let actions = u64::from(a);
    Weight::from_parts(
      35_000_000u64.saturating_add(actions.saturating_mul(60_000_000)),
      4000u64.saturating_add(actions.saturating_mul(2200)),
    )
    .saturating_add(T::DbWeight::get().reads(actions.saturating_mul(8).saturating_add(6)))
    .saturating_add(T::DbWeight::get().writes(actions.saturating_mul(8).saturating_add(1)))
  }

  fn set_open_to_public() -> Weight {
    Weight::from_parts(8_000_000, 600)
      .saturating_add(T::DbWeight::get().writes(1))
  }

  fn set_execution_paused() -> Weight {
    Weight::from_parts(8_000_000, 600)
      .saturating_add(T::DbWeight::get().writes(1))
  }
}

impl WeightInfo for () {
  fn create_strategy(a: u32) -> Weight {
    Weight::from_parts(20_000_000u64.saturating_add(u64::from(a).saturating_mul(1_500_000)), 1500)
  }
  fn create_bundle(s: u32) -> Weight {
    Weight::from_parts(18_000_000u64.saturating_add(u64::from(s).saturating_mul(4_000_000)), 1200)
  }
  fn subscribe() -> Weight { Weight::from_parts(30_000_000, 3000) }
  fn deactivate_sub() -> Weight { Weight::from_parts(12_000_000, 1200) }
  fn activate_sub() -> Weight { Weight::from_parts(12_000_000, 1200) }
  fn cancel_sub() -> Weight { Weight::from_parts(16_000_000, 1600) }
  fn add_bot_caller() -> Weight { Weight::from_parts(9_000_000, 600) }
  fn remove_bot_caller() -> Weight { Weight::from_parts(9_000_000, 600) }
  fn execute_strategy(a: u32) -> Weight {
    Weight::from_parts(35_000_000u64.saturating_add(u64::from(a).saturating_mul(60_000_000)), 4000)
  }
  fn set_open_to_public() -> Weight { Weight::from_parts(8_000_000, 600) }
  fn set_execution_paused() -> Weight { Weight::from_parts(8_000_000, 600) }
}
