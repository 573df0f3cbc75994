use crate::entities::{FinancialMetrics, MetricTopic, Ratio};

pub(crate) const NO_DATA_RESPONSE: &str =
    "Please upload a financial document first to analyze metrics.";

pub(crate) struct QueryResponder<'a> {
    metrics: &'a FinancialMetrics,
}

impl<'a> QueryResponder<'a> {
    pub(crate) fn new(metrics: &'a FinancialMetrics) -> Self {
        Self { metrics }
    }

    pub(crate) fn respond(&self, query: &str) -> String {
        match MetricTopic::classify(query) {
            MetricTopic::Wacc => match self.metrics.wacc {
                Ratio::Defined(wacc) => format!(
                    "The Weighted Average Cost of Capital (WACC) is {:.2}%. This represents the average rate that the company is expected to pay to finance its assets.",
                    wacc * 100.0
                ),
                Ratio::Undefined(reason) => format!(
                    "The Weighted Average Cost of Capital (WACC) is undefined ({}).",
                    reason
                ),
            },
            MetricTopic::DebtToEquity => match self.metrics.debt_to_equity {
                Ratio::Defined(ratio) => format!(
                    "The Debt to Equity ratio is {:.2}. This indicates the proportion of debt and equity the company is using to finance its assets.",
                    ratio
                ),
                Ratio::Undefined(reason) => {
                    format!("The Debt to Equity ratio is undefined ({}).", reason)
                }
            },
            MetricTopic::TaxRate => format!(
                "The effective tax rate is {:.2}%. This represents the percentage of profit that goes to tax payments.",
                self.metrics.tax_rate * 100.0
            ),
            MetricTopic::Profit => format!(
                "The current profit is {:.2}. This is calculated as the difference between total revenue and total expenses.",
                self.metrics.profit
            ),
            MetricTopic::CostOfDebt => format!(
                "The cost of debt is {:.2}%. This represents the effective interest rate the company pays on its borrowings.",
                self.metrics.cost_of_debt * 100.0
            ),
            MetricTopic::Help => "I can provide information about various financial metrics including WACC, debt to equity ratio, tax rate, profit, and cost of debt. What would you like to know about?".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::UndefinedReason;

    fn metrics() -> FinancialMetrics {
        FinancialMetrics {
            wacc: Ratio::Defined(0.08),
            cost_of_debt: 0.05,
            tax_rate: 0.30,
            debt_to_equity: Ratio::Defined(1.5),
            profit: 2000.0,
        }
    }

    #[test]
    fn answers_each_metric() {
        let metrics = metrics();
        let responder = QueryResponder::new(&metrics);

        assert!(responder.respond("what's my WACC?").contains("8.00%"));
        assert!(responder.respond("debt to equity").contains("1.50"));
        assert!(responder.respond("Tax rate please").contains("30.00%"));
        assert!(responder.respond("profit?").contains("2000.00"));
        assert!(responder.respond("cost of debt").contains("5.00%"));
    }

    #[test]
    fn first_matching_rule_wins() {
        let metrics = metrics();
        let responder = QueryResponder::new(&metrics);

        let response = responder.respond("wacc after tax");
        assert!(response.starts_with("The Weighted Average Cost of Capital"));
    }

    #[test]
    fn unknown_query_gets_help() {
        let metrics = metrics();
        let responder = QueryResponder::new(&metrics);

        assert!(responder
            .respond("hello there")
            .starts_with("I can provide information"));
    }

    #[test]
    fn undefined_ratio_is_reported() {
        let mut metrics = metrics();
        metrics.debt_to_equity = Ratio::Undefined(UndefinedReason::ZeroEquity);
        let responder = QueryResponder::new(&metrics);

        let response = responder.respond("debt/equity");
        assert!(response.contains("undefined"));
        assert!(response.contains("total equity is zero"));
        assert!(!response.contains("NaN"));
        assert!(!response.contains("inf"));
    }
}
