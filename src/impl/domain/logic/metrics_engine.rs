use fractic_server_error::ServerError;
use tracing::debug;

use crate::{
    domain::{entities::line_item::total, logic::category_flattener::CategoryFlattener},
    entities::{FinancialMetrics, FinancialStatements, RateAssumptions, Ratio, UndefinedReason},
    errors::MissingField,
};

pub(crate) struct MetricsEngine<'a> {
    statements: &'a FinancialStatements,
    assumptions: &'a RateAssumptions,
}

impl<'a> MetricsEngine<'a> {
    pub(crate) fn new(statements: &'a FinancialStatements, assumptions: &'a RateAssumptions) -> Self {
        Self {
            statements,
            assumptions,
        }
    }

    /// Requires both the income statement and the balance sheet.
    pub(crate) fn compute(self) -> Result<FinancialMetrics, ServerError> {
        let sheet = self
            .statements
            .balance_sheet
            .as_ref()
            .ok_or_else(|| MissingField::new("balance_sheet"))?;
        let statement = self
            .statements
            .income_statement
            .as_ref()
            .ok_or_else(|| MissingField::new("income_statement"))?;

        let balance = CategoryFlattener::flatten_balance_sheet(sheet);
        let income = CategoryFlattener::flatten_income_statement(statement);

        let total_debt = total(&balance.liabilities);
        let total_equity = total(&balance.equity);
        let total_capital = total_debt + total_equity;

        let RateAssumptions {
            cost_of_equity,
            cost_of_debt,
            tax_rate,
        } = *self.assumptions;

        let wacc = match (
            Ratio::divide(total_equity, total_capital, UndefinedReason::ZeroCapital),
            Ratio::divide(total_debt, total_capital, UndefinedReason::ZeroCapital),
        ) {
            (Ratio::Defined(equity_weight), Ratio::Defined(debt_weight)) => Ratio::Defined(
                equity_weight * cost_of_equity + debt_weight * cost_of_debt * (1.0 - tax_rate),
            ),
            _ => Ratio::Undefined(UndefinedReason::ZeroCapital),
        };
        let debt_to_equity = Ratio::divide(total_debt, total_equity, UndefinedReason::ZeroEquity);
        let profit = total(&income.income) - total(&income.expenses);

        debug!(
            total_debt,
            total_equity,
            profit,
            ?wacc,
            ?debt_to_equity,
            "computed financial metrics"
        );

        Ok(FinancialMetrics {
            wacc,
            cost_of_debt,
            tax_rate,
            debt_to_equity,
            profit,
        })
    }
}
