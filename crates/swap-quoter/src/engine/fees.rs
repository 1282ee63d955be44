//! Promille fee and slippage arithmetic.
//!
//! Every adjustment is `amount * factor / 1000` with the multiplication done first and the
//! division truncating, which is what the exchange contract does on-chain. Nothing here
//! touches floating point.

use alloy_primitives::U256;

use crate::types::{QuoterError, Result};

pub const PROMILLE: u64 = 1000;

/// Protocol fee and slippage tolerance, both in parts per thousand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeSchedule {
    fee_promille: u64,
    slippage_promille: u64,
}

impl FeeSchedule {
    pub const DEFAULT_FEE_PROMILLE: u64 = 5;
    pub const DEFAULT_SLIPPAGE_PROMILLE: u64 = 3;

    /// Rejects schedules whose combined haircut would consume the whole amount.
    pub fn new(fee_promille: u64, slippage_promille: u64) -> Result<Self> {
        match fee_promille.checked_add(slippage_promille) {
            Some(total) if total < PROMILLE => Ok(Self { fee_promille, slippage_promille }),
            _ => Err(QuoterError::Config(format!(
                "fee ({}) + slippage ({}) must stay below {} promille",
                fee_promille, slippage_promille, PROMILLE
            ))),
        }
    }

    pub fn fee_promille(&self) -> u64 {
        self.fee_promille
    }

    pub fn slippage_promille(&self) -> u64 {
        self.slippage_promille
    }

    /// `1000 - slippage - fee`
    pub fn discount_factor(&self) -> u64 {
        PROMILLE - self.slippage_promille - self.fee_promille
    }

    /// `1000 + slippage + fee`
    pub fn premium_factor(&self) -> u64 {
        PROMILLE + self.slippage_promille + self.fee_promille
    }

    /// Protocol fee taken from `amount`.
    pub fn protocol_fee(&self, amount: U256) -> Result<U256> {
        scale(amount, self.fee_promille)
    }

    /// `amount` minus the protocol fee, i.e. what actually reaches the pool.
    pub fn after_fee(&self, amount: U256) -> Result<U256> {
        let fee = self.protocol_fee(amount)?;
        checked_sub(amount, fee, "fee-adjusted input")
    }

    /// Minimum acceptable output for a quoted output.
    pub fn min_output(&self, quoted: U256) -> Result<U256> {
        scale(quoted, self.discount_factor())
    }

    /// Maximum acceptable input for a quoted input.
    pub fn max_input(&self, quoted: U256) -> Result<U256> {
        scale(quoted, self.premium_factor())
    }
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self {
            fee_promille: Self::DEFAULT_FEE_PROMILLE,
            slippage_promille: Self::DEFAULT_SLIPPAGE_PROMILLE,
        }
    }
}

/// `amount * factor / 1000`, truncating.
pub fn scale(amount: U256, factor: u64) -> Result<U256> {
    amount
        .checked_mul(U256::from(factor))
        .map(|n| n / U256::from(PROMILLE))
        .ok_or_else(|| QuoterError::Arithmetic(format!("{} * {} overflows 256 bits", amount, factor)))
}

pub fn checked_sub(a: U256, b: U256, what: &str) -> Result<U256> {
    a.checked_sub(b)
        .ok_or_else(|| QuoterError::Arithmetic(format!("{} underflows: {} - {}", what, a, b)))
}

pub fn checked_add(a: U256, b: U256, what: &str) -> Result<U256> {
    a.checked_add(b)
        .ok_or_else(|| QuoterError::Arithmetic(format!("{} overflows: {} + {}", what, a, b)))
}

pub fn checked_mul(a: U256, b: U256, what: &str) -> Result<U256> {
    a.checked_mul(b)
        .ok_or_else(|| QuoterError::Arithmetic(format!("{} overflows: {} * {}", what, a, b)))
}

pub fn checked_div(a: U256, b: U256, what: &str) -> Result<U256> {
    a.checked_div(b)
        .ok_or_else(|| QuoterError::Arithmetic(format!("{} divides by zero", what)))
}
