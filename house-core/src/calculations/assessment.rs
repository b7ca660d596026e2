//! Financial readiness assessment.
//!
//! Scores a buyer's monthly cash flow and savings against a target property
//! price, using the 33% housing-share rule and a 20% down-payment goal, then
//! picks a recommendation and an action plan from four fixed rules.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::calculations::common::{clamp, max, percent_of};

const HOUSING_SHARE: Decimal = Decimal::from_parts(33, 0, 0, false, 2);
const DOWN_PAYMENT_SHARE: Decimal = Decimal::from_parts(2, 0, 0, false, 1);
const PROGRESS_FLOOR_PCT: Decimal = Decimal::from_parts(20, 0, 0, false, 0);
const MAX_MONTHS_TO_GOAL: u64 = 36;

pub const PLAN_LOOKS_GOOD: &str = "Your financial plan looks good!";
pub const EMPTY_ACTION_PLAN: &str =
    "Complete the assessment form to get personalized recommendations";

/// Monthly figures entered on the assessment form.
///
/// Missing or unparseable inputs should arrive here as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentInput {
    pub monthly_income: Decimal,
    pub additional_income: Decimal,
    pub current_rent: Decimal,
    pub utilities: Decimal,
    pub other_expenses: Decimal,
    pub current_savings: Decimal,
    pub monthly_savings: Decimal,
    pub target_price: Decimal,
}

/// Months needed to close the down-payment gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MonthsToGoal {
    Months(u64),
    /// Nothing is being saved each month, so the goal is never reached.
    Unreachable,
}

impl MonthsToGoal {
    fn exceeds(
        &self,
        limit: u64,
    ) -> bool {
        match self {
            Self::Months(m) => *m > limit,
            Self::Unreachable => true,
        }
    }
}

/// Derived metrics plus the advice shown next to them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentResult {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub disposable_income: Decimal,

    /// 33% of total income.
    pub max_monthly_payment: Decimal,

    /// 20% of the target price.
    pub required_down_payment: Decimal,

    /// Savings as a percentage of the required down payment, uncapped.
    pub down_payment_pct: Decimal,

    /// `down_payment_pct` capped at 100.
    pub down_payment_progress: Decimal,

    pub months_to_goal: MonthsToGoal,

    /// Disposable income as a share of payment capacity, in `[0, 100]`.
    pub capacity_pct: Decimal,

    pub recommendation: String,
    pub action_items: Vec<String>,
}

/// One threshold rule: when it fires it contributes a recommendation and
/// its action items.
struct Rule {
    applies: fn(&AssessmentInput, &AssessmentResult) -> bool,
    recommendation: &'static str,
    actions: &'static [&'static str],
}

const RULES: &[Rule] = &[
    Rule {
        applies: |_, r| r.disposable_income < Decimal::ZERO,
        recommendation: "Your expenses exceed your income. Consider reducing expenses or increasing income.",
        actions: &[
            "Create a budget to reduce non-essential expenses",
            "Look for additional income sources",
        ],
    },
    Rule {
        applies: |_, r| r.down_payment_pct < PROGRESS_FLOOR_PCT,
        recommendation: "Continue building your down payment savings.",
        actions: &[
            "Set up automatic monthly savings transfers",
            "Consider a high-yield savings account",
        ],
    },
    Rule {
        applies: |_, r| r.months_to_goal.exceeds(MAX_MONTHS_TO_GOAL),
        recommendation: "Consider a more affordable property or increase savings rate.",
        actions: &[
            "Research properties in different areas",
            "Look for ways to increase monthly savings",
        ],
    },
    Rule {
        applies: |i, _| i.monthly_income.is_zero(),
        recommendation: "Please enter your income details for a complete assessment.",
        actions: &["Fill in all income fields in the form"],
    },
];

/// Stateless scorer.
#[derive(Debug, Clone, Copy, Default)]
pub struct FinancialAssessment;

impl FinancialAssessment {
    /// Scores `input`.
    ///
    /// The recommendation comes from the first rule that fires; the action
    /// plan collects the items of every rule that fires, in rule order.
    pub fn evaluate(input: &AssessmentInput) -> AssessmentResult {
        let total_income = input.monthly_income.saturating_add(input.additional_income);
        let total_expenses = input
            .current_rent
            .saturating_add(input.utilities)
            .saturating_add(input.other_expenses);
        let disposable_income = total_income.saturating_sub(total_expenses);
        let max_monthly_payment = total_income.saturating_mul(HOUSING_SHARE);

        let required_down_payment = input.target_price.saturating_mul(DOWN_PAYMENT_SHARE);
        let down_payment_pct = if required_down_payment > Decimal::ZERO {
            percent_of(input.current_savings, required_down_payment)
        } else {
            // No target price: the goal is already met.
            Decimal::ONE_HUNDRED
        };
        let down_payment_progress = down_payment_pct.min(Decimal::ONE_HUNDRED);

        let remaining = max(
            required_down_payment.saturating_sub(input.current_savings),
            Decimal::ZERO,
        );
        let months_to_goal = Self::months_to_goal(remaining, input.monthly_savings);

        let capacity_pct = if max_monthly_payment > Decimal::ZERO {
            clamp(
                percent_of(disposable_income, max_monthly_payment),
                Decimal::ZERO,
                Decimal::ONE_HUNDRED,
            )
        } else {
            Decimal::ZERO
        };

        let mut result = AssessmentResult {
            total_income,
            total_expenses,
            disposable_income,
            max_monthly_payment,
            required_down_payment,
            down_payment_pct,
            down_payment_progress,
            months_to_goal,
            capacity_pct,
            recommendation: String::new(),
            action_items: Vec::new(),
        };

        let fired: Vec<&Rule> = RULES
            .iter()
            .filter(|rule| (rule.applies)(input, &result))
            .collect();

        result.recommendation = fired
            .first()
            .map(|rule| rule.recommendation)
            .unwrap_or(PLAN_LOOKS_GOOD)
            .to_string();
        result.action_items = fired
            .iter()
            .flat_map(|rule| rule.actions.iter())
            .map(|item| item.to_string())
            .collect();

        tracing::debug!(
            progress = %result.down_payment_progress,
            rules = fired.len(),
            "financial assessment evaluated"
        );

        result
    }

    fn months_to_goal(
        remaining: Decimal,
        monthly_savings: Decimal,
    ) -> MonthsToGoal {
        if monthly_savings <= Decimal::ZERO {
            return MonthsToGoal::Unreachable;
        }
        remaining
            .checked_div(monthly_savings)
            .and_then(|months| months.ceil().to_u64())
            .map_or(MonthsToGoal::Unreachable, MonthsToGoal::Months)
    }
}

impl AssessmentResult {
    /// Action items to display, or the placeholder line when none apply.
    pub fn action_plan(&self) -> Vec<&str> {
        if self.action_items.is_empty() {
            vec![EMPTY_ACTION_PLAN]
        } else {
            self.action_items.iter().map(String::as_str).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn healthy_input() -> AssessmentInput {
        AssessmentInput {
            monthly_income: dec!(450000),
            additional_income: dec!(50000),
            current_rent: dec!(100000),
            utilities: dec!(30000),
            other_expenses: dec!(70000),
            current_savings: dec!(8000000),
            monthly_savings: dec!(150000),
            target_price: dec!(40000000),
        }
    }

    #[test]
    fn computes_capacity_and_progress() {
        let result = FinancialAssessment::evaluate(&healthy_input());

        assert_eq!(result.total_income, dec!(500000));
        assert_eq!(result.disposable_income, dec!(300000));
        assert_eq!(result.max_monthly_payment, dec!(165000));
        assert_eq!(result.required_down_payment, dec!(8000000));
        assert_eq!(result.down_payment_progress, dec!(100));
        assert_eq!(result.months_to_goal, MonthsToGoal::Months(0));
        assert_eq!(result.capacity_pct, dec!(100));
    }

    #[test]
    fn healthy_plan_has_no_actions() {
        let result = FinancialAssessment::evaluate(&healthy_input());

        assert_eq!(result.recommendation, PLAN_LOOKS_GOOD);
        assert!(result.action_items.is_empty());
        assert_eq!(result.action_plan(), vec![EMPTY_ACTION_PLAN]);
    }

    #[test]
    fn expenses_over_income_wins_first_match() {
        let mut input = healthy_input();
        input.current_rent = dec!(600000);
        input.current_savings = dec!(0);

        let result = FinancialAssessment::evaluate(&input);

        assert_eq!(
            result.recommendation,
            "Your expenses exceed your income. Consider reducing expenses or increasing income."
        );
        // Every firing rule contributes its actions.
        assert_eq!(result.action_items.len(), 6);
        assert_eq!(result.action_items[0], "Create a budget to reduce non-essential expenses");
        assert_eq!(result.action_items[2], "Set up automatic monthly savings transfers");
    }

    #[test]
    fn low_savings_recommends_building_down_payment() {
        let mut input = healthy_input();
        input.current_savings = dec!(1000000);

        let result = FinancialAssessment::evaluate(&input);

        assert_eq!(result.down_payment_progress, dec!(12.5));
        assert_eq!(result.months_to_goal, MonthsToGoal::Months(47));
        assert_eq!(result.recommendation, "Continue building your down payment savings.");
        assert_eq!(result.action_items.len(), 4);
    }

    #[test]
    fn months_to_goal_rounds_up() {
        let mut input = healthy_input();
        input.current_savings = dec!(7000000);
        input.monthly_savings = dec!(300000);

        let result = FinancialAssessment::evaluate(&input);

        // 1,000,000 remaining / 300,000 per month = 3.33 -> 4
        assert_eq!(result.months_to_goal, MonthsToGoal::Months(4));
    }

    #[test]
    fn zero_monthly_savings_is_unreachable() {
        let mut input = healthy_input();
        input.current_savings = dec!(2000000);
        input.monthly_savings = Decimal::ZERO;

        let result = FinancialAssessment::evaluate(&input);

        assert_eq!(result.months_to_goal, MonthsToGoal::Unreachable);
        assert!(
            result
                .action_items
                .contains(&"Research properties in different areas".to_string())
        );
    }

    #[test]
    fn empty_form_asks_for_income() {
        let result = FinancialAssessment::evaluate(&AssessmentInput::default());

        assert_eq!(result.down_payment_progress, dec!(100));
        assert_eq!(result.capacity_pct, Decimal::ZERO);
        assert_eq!(
            result.recommendation,
            "Consider a more affordable property or increase savings rate."
        );
        assert_eq!(
            result.action_items.last().map(String::as_str),
            Some("Fill in all income fields in the form")
        );
    }

    #[test]
    fn negative_disposable_income_floors_capacity() {
        let mut input = healthy_input();
        input.other_expenses = dec!(900000);

        let result = FinancialAssessment::evaluate(&input);

        assert_eq!(result.capacity_pct, Decimal::ZERO);
    }

    #[test]
    fn extreme_amounts_saturate_instead_of_overflowing() {
        let input = AssessmentInput {
            monthly_income: Decimal::MAX,
            additional_income: Decimal::MAX,
            current_rent: Decimal::MAX,
            utilities: Decimal::MAX,
            current_savings: dec!(50000000),
            monthly_savings: Decimal::new(1, 28),
            target_price: Decimal::new(1, 27),
            ..AssessmentInput::default()
        };

        let result = FinancialAssessment::evaluate(&input);

        assert_eq!(result.total_income, Decimal::MAX);
        assert_eq!(result.total_expenses, Decimal::MAX);
        assert_eq!(result.down_payment_progress, dec!(100));
        assert_eq!(result.months_to_goal, MonthsToGoal::Months(0));
    }

    #[test]
    fn tiny_monthly_savings_make_goal_unreachable() {
        let input = AssessmentInput {
            monthly_income: dec!(500000),
            monthly_savings: Decimal::new(1, 28),
            target_price: dec!(50000000),
            ..AssessmentInput::default()
        };

        let result = FinancialAssessment::evaluate(&input);

        assert_eq!(result.months_to_goal, MonthsToGoal::Unreachable);
    }
}
