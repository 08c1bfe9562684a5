//! Recipe execution: resolves action parameters, performs one adapter call per
//! action and threads each output into the returns list of the run.

use crate::{
  pallet::{
    ActionOf, BalanceOf, Config, Error, Event, InputsOf, Pallet, ParamOf, ParamValueOf,
    StrategyOf, SubscriptionOf,
  },
  types::*,
  AssetOps, CdpOps, DexOps, FlashLoanOps, LendingOps, YieldOps, LOG_TARGET,
};
use alloc::vec::Vec;
use frame::prelude::*;
use polkadot_sdk::{
  sp_runtime::{
    PerThing,
    traits::{SaturatedConversion, Saturating, Zero},
  },
  sp_weights::WeightToFee as _,
};
use primitives::{check_ratio_move, RatioCheckError};

struct OpenFlashLoan<AssetId, Balance> {
  asset: AssetId,
  amount: Balance,
  fee: Balance,
}

/// State of a single strategy run.
pub(crate) struct RecipeContext<'a, T: Config> {
  owner: &'a T::AccountId,
  sub_data: &'a [ParamValueOf<T>],
  inputs: &'a [ParamValueOf<T>],
  returns: Vec<ParamValueOf<T>>,
  flash_loan: Option<OpenFlashLoan<T::AssetId, T::Balance>>,
}

impl<'a, T: Config> RecipeContext<'a, T> {
  pub(crate) fn new(
    owner: &'a T::AccountId,
    sub_data: &'a [ParamValueOf<T>],
    inputs: &'a [ParamValueOf<T>],
  ) -> Self {
    Self {
      owner,
      sub_data,
      inputs,
      returns: Vec::new(),
      flash_loan: None,
    }
  }

  pub(crate) fn resolve(&self, param: &ParamOf<T>) -> Result<ParamValueOf<T>, DispatchError> {
    let value = match param {
      Param::Value(value) => value.clone(),
      Param::Sub(i) => self
        .sub_data
        .get(*i as usize)
        .cloned()
        .ok_or(Error::<T>::UnknownSubSlot)?,
      Param::Returned(i) => self
        .returns
        .get(*i as usize)
        .cloned()
        .ok_or(Error::<T>::ForwardReference)?,
      Param::Input(i) => self
        .inputs
        .get(*i as usize)
        .cloned()
        .ok_or(Error::<T>::InputMissing)?,
      Param::Owner => ParamValue::Account(self.owner.clone()),
    };
    Ok(value)
  }

  pub(crate) fn amount(&self, param: &ParamOf<T>) -> Result<BalanceOf<T>, DispatchError> {
    match self.resolve(param)? {
      ParamValue::Amount(amount) => Ok(amount),
      _ => Err(Error::<T>::ParamTypeMismatch.into()),
    }
  }

  pub(crate) fn ratio(&self, param: &ParamOf<T>) -> Result<Ratio, DispatchError> {
    match self.resolve(param)? {
      ParamValue::Ratio(ratio) => Ok(ratio),
      _ => Err(Error::<T>::ParamTypeMismatch.into()),
    }
  }

  pub(crate) fn account(&self, param: &ParamOf<T>) -> Result<T::AccountId, DispatchError> {
    match self.resolve(param)? {
      ParamValue::Account(who) => Ok(who),
      _ => Err(Error::<T>::ParamTypeMismatch.into()),
    }
  }

  pub(crate) fn asset(&self, param: &ParamOf<T>) -> Result<T::AssetId, DispatchError> {
    match self.resolve(param)? {
      ParamValue::Asset(asset) => Ok(asset),
      _ => Err(Error::<T>::ParamTypeMismatch.into()),
    }
  }

  pub(crate) fn vault(&self, param: &ParamOf<T>) -> Result<VaultId, DispatchError> {
    match self.resolve(param)? {
      ParamValue::Vault(vault) => Ok(vault),
      _ => Err(Error::<T>::ParamTypeMismatch.into()),
    }
  }

  /// Vault parameter the subscriber is allowed to operate on.
  fn owned_vault(&self, param: &ParamOf<T>) -> Result<VaultId, DispatchError> {
    let vault = self.vault(param)?;
    Pallet::<T>::ensure_vault_owner(vault, self.owner)?;
    Ok(vault)
  }
}

impl<T: Config> Pallet<T> {
  /// Executes every action of `strategy` on behalf of the subscriber and
  /// settles an open flash loan. Returns the number of actions run.
  pub(crate) fn execute_recipe(
    sub_id: SubId,
    sub: &SubscriptionOf<T>,
    strategy: &StrategyOf<T>,
    inputs: &InputsOf<T>,
  ) -> Result<u32, DispatchError> {
    let mut ctx = RecipeContext::<T>::new(&sub.owner, &sub.sub_data, inputs);
    for (step, action) in strategy.actions.iter().enumerate() {
      let output = Self::execute_action(sub_id, &mut ctx, action)?;
      log::debug!(
        target: LOG_TARGET,
        "sub {} step {}: {:?}",
        sub_id,
        step,
        output
      );
      Self::deposit_event(Event::ActionExecuted {
        sub_id,
        step: step as u32,
        output: output.clone(),
      });
      ctx.returns.push(output);
    }

    if let Some(loan) = ctx.flash_loan.take() {
      T::FlashLoanOps::repay(
        &sub.owner,
        loan.asset,
        loan.amount.saturating_add(loan.fee),
      )?;
      Self::deposit_event(Event::FlashLoanRepaid {
        sub_id,
        asset: loan.asset,
        amount: loan.amount,
        fee: loan.fee,
      });
    }
    Ok(strategy.actions.len() as u32)
  }

  pub(crate) fn execute_action(
    sub_id: SubId,
    ctx: &mut RecipeContext<'_, T>,
    action: &ActionOf<T>,
  ) -> Result<ParamValueOf<T>, DispatchError> {
    let owner = ctx.owner;
    let output = match action {
      Action::LendingSupply { asset, amount } => {
        let supplied = T::LendingOps::supply(owner, ctx.asset(asset)?, ctx.amount(amount)?)?;
        ParamValue::Amount(supplied)
      }
      Action::LendingWithdraw { asset, amount, to } => {
        let withdrawn = T::LendingOps::withdraw(
          owner,
          ctx.asset(asset)?,
          ctx.amount(amount)?,
          &ctx.account(to)?,
        )?;
        ParamValue::Amount(withdrawn)
      }
      Action::LendingBorrow {
        asset,
        amount,
        rate_mode,
        to,
      } => {
        let borrowed = T::LendingOps::borrow(
          owner,
          ctx.asset(asset)?,
          ctx.amount(amount)?,
          *rate_mode,
          &ctx.account(to)?,
        )?;
        ParamValue::Amount(borrowed)
      }
      Action::LendingPayback {
        asset,
        amount,
        rate_mode,
      } => {
        let repaid =
          T::LendingOps::payback(owner, ctx.asset(asset)?, ctx.amount(amount)?, *rate_mode)?;
        ParamValue::Amount(repaid)
      }
      Action::CdpOpen { collateral } => {
        let vault = T::CdpOps::open(owner, ctx.asset(collateral)?)?;
        ParamValue::Vault(vault)
      }
      Action::CdpSupply { vault, amount } => {
        let supplied = T::CdpOps::supply(owner, ctx.owned_vault(vault)?, ctx.amount(amount)?)?;
        ParamValue::Amount(supplied)
      }
      Action::CdpWithdraw { vault, amount, to } => {
        let withdrawn = T::CdpOps::withdraw(
          owner,
          ctx.owned_vault(vault)?,
          ctx.amount(amount)?,
          &ctx.account(to)?,
        )?;
        ParamValue::Amount(withdrawn)
      }
      Action::CdpGenerate { vault, amount, to } => {
        let generated = T::CdpOps::generate(
          owner,
          ctx.owned_vault(vault)?,
          ctx.amount(amount)?,
          &ctx.account(to)?,
        )?;
        ParamValue::Amount(generated)
      }
      Action::CdpPayback { vault, amount } => {
        let repaid = T::CdpOps::payback(owner, ctx.owned_vault(vault)?, ctx.amount(amount)?)?;
        ParamValue::Amount(repaid)
      }
      Action::CdpRatio { vault } => {
        let ratio = T::CdpOps::ratio(ctx.vault(vault)?).ok_or(Error::<T>::RatioUnavailable)?;
        ParamValue::Ratio(ratio)
      }
      Action::CdpRatioCheck {
        state,
        check_target,
        target_ratio,
        vault,
        start_ratio,
      } => {
        let before = ctx.ratio(start_ratio)?;
        let target = if *check_target {
          Some(ctx.ratio(target_ratio)?)
        } else {
          None
        };
        let now = T::CdpOps::ratio(ctx.vault(vault)?).ok_or(Error::<T>::RatioUnavailable)?;
        check_ratio_move(*state, before, now, target, T::RatioCheckTolerance::get()).map_err(
          |err| match err {
            RatioCheckError::NotImproved => Error::<T>::RatioNotImproved,
            RatioCheckError::OutsideTarget => Error::<T>::RatioOutsideTarget,
          },
        )?;
        ParamValue::Ratio(now)
      }
      Action::YieldSupply { asset, amount } => {
        let shares = T::YieldOps::deposit(owner, ctx.asset(asset)?, ctx.amount(amount)?)?;
        ParamValue::Amount(shares)
      }
      Action::YieldWithdraw {
        share_asset,
        amount,
        to,
      } => {
        let underlying = T::YieldOps::withdraw(
          owner,
          ctx.asset(share_asset)?,
          ctx.amount(amount)?,
          &ctx.account(to)?,
        )?;
        ParamValue::Amount(underlying)
      }
      Action::Sell {
        asset_in,
        asset_out,
        amount,
        min_out,
      } => {
        let received = T::DexOps::swap_exact_in(
          owner,
          ctx.asset(asset_in)?,
          ctx.asset(asset_out)?,
          ctx.amount(amount)?,
          ctx.amount(min_out)?,
        )?;
        ParamValue::Amount(received)
      }
      Action::GasFee {
        gas_units,
        fee_asset,
        available,
      } => {
        let gas_units: u64 = ctx.amount(gas_units)?.saturated_into();
        let asset = ctx.asset(fee_asset)?;
        let available = ctx.amount(available)?;
        let fee = Self::gas_fee(gas_units, asset, available)?;
        if !fee.is_zero() {
          T::AssetOps::transfer(owner, &T::FeeSink::get(), asset, fee)?;
          Self::deposit_event(Event::GasFeeTaken {
            sub_id,
            asset,
            amount: fee,
          });
        }
        ParamValue::Amount(available.saturating_sub(fee))
      }
      Action::Transfer { asset, amount, to } => {
        let amount = ctx.amount(amount)?;
        T::AssetOps::transfer(owner, &ctx.account(to)?, ctx.asset(asset)?, amount)?;
        ParamValue::Amount(amount)
      }
      Action::FlashLoan { asset, amount } => {
        let asset = ctx.asset(asset)?;
        let amount = ctx.amount(amount)?;
        let fee = T::FlashLoanOps::borrow(owner, asset, amount)?;
        ctx.flash_loan = Some(OpenFlashLoan { asset, amount, fee });
        ParamValue::Amount(amount)
      }
    };
    Ok(output)
  }

  /// Fee for `gas_units` expressed in `fee_asset`, capped at
  /// `MaxGasFeePortion` of `available`.
  pub fn gas_fee(
    gas_units: u64,
    fee_asset: T::AssetId,
    available: T::Balance,
  ) -> Result<T::Balance, DispatchError> {
    let native_fee = T::WeightToFee::weight_to_fee(&Weight::from_parts(gas_units, 0));
    let fee = if native_fee.is_zero() || fee_asset == T::NativeAssetId::get() {
      native_fee
    } else {
      T::DexOps::get_quote(T::NativeAssetId::get(), fee_asset, native_fee)
        .ok_or(Error::<T>::NoFeeQuote)?
    };
    Ok(fee.min(T::MaxGasFeePortion::get().mul_floor(available)))
  }
}
