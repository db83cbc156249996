//! Progressive bracket tax. One routine serves the federal schedule, every
//! state schedule and the NYC schedule; only the table differs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{with_metadata, ComputationOutput, Money, Rate};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One marginal tier. The upper bound is the next bracket's lower bound;
/// the last bracket of a table is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub rate: Rate,
    pub lower_bound: Money,
}

/// Input for a standalone bracket calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BracketTaxInput {
    pub brackets: Vec<TaxBracket>,
    pub taxable_income: Money,
}

/// Tax attributable to one bracket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BracketSlice {
    pub rate: Rate,
    pub lower_bound: Money,
    pub upper_bound: Option<Money>,
    pub income_in_bracket: Money,
    pub tax: Money,
}

/// Output of [`calculate_bracket_tax`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BracketTaxOutput {
    pub total_tax: Money,
    pub marginal_rate: Rate,
    pub effective_rate: Rate,
    pub slices: Vec<BracketSlice>,
}

// ---------------------------------------------------------------------------
// Core
// ---------------------------------------------------------------------------

/// Upper bound of bracket `idx`, or `None` for the top bracket.
pub fn upper_bound(brackets: &[TaxBracket], idx: usize) -> Option<Money> {
    brackets.get(idx + 1).map(|next| next.lower_bound)
}

/// Total tax on `taxable_income` under a sorted, contiguous bracket table.
///
/// Walks the table from the top down: every bracket whose lower bound sits
/// below the remaining income taxes the slice above that bound, then the
/// remaining income drops to the bound. Zero or negative income owes
/// nothing.
pub fn compute_bracket_tax(brackets: &[TaxBracket], taxable_income: Money) -> Money {
    if taxable_income <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let mut remaining = taxable_income;
    let mut tax = Decimal::ZERO;
    for bracket in brackets.iter().rev() {
        if bracket.lower_bound < remaining {
            tax += (remaining - bracket.lower_bound) * bracket.rate;
            remaining = bracket.lower_bound;
        }
    }
    tax
}

/// Per-bracket breakdown of [`compute_bracket_tax`]; the slices sum to the
/// same total.
pub fn bracket_slices(brackets: &[TaxBracket], taxable_income: Money) -> Vec<BracketSlice> {
    let income = taxable_income.max(Decimal::ZERO);
    brackets
        .iter()
        .enumerate()
        .map(|(idx, bracket)| {
            let upper = upper_bound(brackets, idx);
            let top = match upper {
                Some(bound) => income.min(bound),
                None => income,
            };
            let income_in_bracket = (top - bracket.lower_bound).max(Decimal::ZERO);
            BracketSlice {
                rate: bracket.rate,
                lower_bound: bracket.lower_bound,
                upper_bound: upper,
                income_in_bracket,
                tax: income_in_bracket * bracket.rate,
            }
        })
        .collect()
}

/// Rate applied to the next dollar of income.
pub fn marginal_rate(brackets: &[TaxBracket], taxable_income: Money) -> Rate {
    if taxable_income <= Decimal::ZERO {
        return brackets.first().map(|b| b.rate).unwrap_or(Decimal::ZERO);
    }
    brackets
        .iter()
        .rev()
        .find(|b| b.lower_bound < taxable_income)
        .map(|b| b.rate)
        .unwrap_or(Decimal::ZERO)
}

/// Standalone bracket calculation with breakdown, for the CLI and bindings.
pub fn calculate_bracket_tax(input: &BracketTaxInput) -> ComputationOutput<BracketTaxOutput> {
    let total_tax = compute_bracket_tax(&input.brackets, input.taxable_income);
    let effective_rate = if input.taxable_income > Decimal::ZERO {
        total_tax / input.taxable_income
    } else {
        Decimal::ZERO
    };
    let output = BracketTaxOutput {
        total_tax,
        marginal_rate: marginal_rate(&input.brackets, input.taxable_income),
        effective_rate,
        slices: bracket_slices(&input.brackets, input.taxable_income),
    };

    with_metadata(
        "Progressive bracket tax (marginal accumulation)",
        &serde_json::json!({
            "bracket_count": input.brackets.len(),
            "taxable_income": input.taxable_income.to_string(),
        }),
        Vec::new(),
        output,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tax::tables::{FEDERAL_2026, NYC_2026};
    use rust_decimal_macros::dec;

    fn simple_table() -> Vec<TaxBracket> {
        vec![
            TaxBracket { rate: dec!(0.10), lower_bound: dec!(0) },
            TaxBracket { rate: dec!(0.20), lower_bound: dec!(10_000) },
            TaxBracket { rate: dec!(0.30), lower_bound: dec!(50_000) },
        ]
    }

    #[test]
    fn test_non_positive_income_owes_nothing() {
        let table = simple_table();
        assert_eq!(compute_bracket_tax(&table, Decimal::ZERO), Decimal::ZERO);
        assert_eq!(compute_bracket_tax(&table, dec!(-25_000)), Decimal::ZERO);
        assert_eq!(compute_bracket_tax(FEDERAL_2026, dec!(-1)), Decimal::ZERO);
    }

    #[test]
    fn test_spans_multiple_brackets() {
        // 10k * 10% + 40k * 20% + 10k * 30%
        let tax = compute_bracket_tax(&simple_table(), dec!(60_000));
        assert_eq!(tax, dec!(12_000));
    }

    #[test]
    fn test_income_exactly_on_boundary() {
        assert_eq!(compute_bracket_tax(&simple_table(), dec!(10_000)), dec!(1_000));
    }

    #[test]
    fn test_empty_table_is_zero() {
        assert_eq!(compute_bracket_tax(&[], dec!(100_000)), Decimal::ZERO);
    }

    #[test]
    fn test_monotonic_and_continuous() {
        let step = dec!(250);
        let mut income = Decimal::ZERO;
        let mut prev = compute_bracket_tax(FEDERAL_2026, income);
        while income < dec!(800_000) {
            income += step;
            let tax = compute_bracket_tax(FEDERAL_2026, income);
            assert!(tax >= prev, "tax decreased at {income}");
            // Never jumps by more than the top marginal rate times the step.
            assert!(tax - prev <= step * dec!(0.37), "jump at {income}");
            prev = tax;
        }
    }

    #[test]
    fn test_continuous_at_each_boundary() {
        let eps = dec!(0.01);
        for table in [FEDERAL_2026, NYC_2026] {
            for bracket in table.iter().skip(1) {
                let below = compute_bracket_tax(table, bracket.lower_bound - eps);
                let above = compute_bracket_tax(table, bracket.lower_bound + eps);
                assert!(above - below <= dec!(2) * eps * dec!(0.37));
            }
        }
    }

    #[test]
    fn test_slices_sum_to_total() {
        let income = dec!(123_456.78);
        let total: Decimal = bracket_slices(FEDERAL_2026, income).iter().map(|s| s.tax).sum();
        assert_eq!(total, compute_bracket_tax(FEDERAL_2026, income));
    }

    #[test]
    fn test_marginal_rate() {
        assert_eq!(marginal_rate(&simple_table(), dec!(10_000)), dec!(0.10));
        assert_eq!(marginal_rate(&simple_table(), dec!(10_000.01)), dec!(0.20));
        assert_eq!(marginal_rate(&simple_table(), dec!(1_000_000)), dec!(0.30));
    }

    #[test]
    fn test_calculate_bracket_tax_envelope() {
        let out = calculate_bracket_tax(&BracketTaxInput {
            brackets: simple_table(),
            taxable_income: dec!(60_000),
        });
        assert_eq!(out.result.total_tax, dec!(12_000));
        assert_eq!(out.result.effective_rate, dec!(0.2));
        assert_eq!(out.result.slices.len(), 3);
        assert!(out.warnings.is_empty());
    }
}
