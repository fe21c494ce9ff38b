//! Child tax credit with the AGI phase-out.

use rust_decimal::Decimal;

use crate::calculations::common::{ceil_whole_dollars, max};
use crate::models::{ChildTaxCredit, ChildTaxCreditRules, FilingStatus};

/// Credit for `children` qualifying children at `adjusted_gross_income`.
///
/// The full credit is `children × per_child_amount`. Above the filing
/// status threshold it drops by `phase_out_reduction` for every
/// `phase_out_step` of excess income, counting a partial step as a whole
/// one, and never goes below zero. The refundable part is capped both by
/// the credit and by `children × per_child_refundable_amount`.
pub fn child_tax_credit(
    rules: &ChildTaxCreditRules,
    children: u32,
    adjusted_gross_income: Decimal,
    filing_status: FilingStatus,
) -> ChildTaxCredit {
    if children == 0 {
        return ChildTaxCredit::default();
    }

    let children = Decimal::from(children);
    let max_credit = children * rules.per_child_amount;

    let threshold = *rules.phase_out_threshold.get(filing_status);
    let excess = adjusted_gross_income - threshold;
    let reduction = if excess > Decimal::ZERO {
        ceil_whole_dollars(excess / rules.phase_out_step) * rules.phase_out_reduction
    } else {
        Decimal::ZERO
    };

    let credit = max(max_credit - reduction, Decimal::ZERO);
    let refundable_credit = credit.min(children * rules.per_child_refundable_amount);

    ChildTaxCredit {
        credit,
        refundable_credit,
    }
}
