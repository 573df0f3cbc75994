use crate::entities::{
    BalanceSheet, FinancialStatements, IncomeStatement, MaturitySplit, OperatingSplit,
    StatementEntry,
};

/// Small demonstration statements, for callers that want something to show
/// when no document has been processed yet.
///
/// Assets total 13,000 against 6,000 of liabilities and 8,000 of equity, so
/// the balance sheet does not balance.
pub fn sample_statements() -> FinancialStatements {
    FinancialStatements {
        balance_sheet: Some(sample_balance_sheet()),
        income_statement: Some(sample_income_statement()),
    }
}

pub fn sample_balance_sheet() -> BalanceSheet {
    BalanceSheet {
        assets: MaturitySplit {
            current: vec![
                StatementEntry::new("Cash", 4000.0),
                StatementEntry::new("Accounts Receivable", 2000.0),
            ],
            non_current: vec![
                StatementEntry::new("Property", 5000.0),
                StatementEntry::new("Equipment", 2000.0),
            ],
        },
        liabilities: MaturitySplit {
            current: vec![
                StatementEntry::new("Accounts Payable", 2000.0),
                StatementEntry::new("Short-term Debt", 1000.0),
            ],
            non_current: vec![StatementEntry::new("Long-term Debt", 3000.0)],
        },
        equity: vec![
            StatementEntry::new("Common Stock", 5000.0),
            StatementEntry::new("Retained Earnings", 3000.0),
        ],
    }
}

pub fn sample_income_statement() -> IncomeStatement {
    IncomeStatement {
        revenue: OperatingSplit {
            operating: vec![
                StatementEntry::new("Sales Revenue", 5000.0),
                StatementEntry::new("Service Revenue", 3000.0),
            ],
            non_operating: vec![StatementEntry::new("Interest Income", 500.0)],
        },
        expenses: OperatingSplit {
            operating: vec![
                StatementEntry::new("Cost of Goods Sold", 4000.0),
                StatementEntry::new("Salaries", 2000.0),
            ],
            non_operating: vec![StatementEntry::new("Interest Expense", 500.0)],
        },
    }
}
