use crate::entities::{
    BalanceSheet, FlattenedBalanceSheet, FlattenedIncomeStatement, IncomeStatement, LineItem,
    LineItemType, StatementEntry, Subcategory,
};

pub(crate) const REVENUE_OPERATING: &str = "income_statement.revenue.operating";
pub(crate) const REVENUE_NON_OPERATING: &str = "income_statement.revenue.non_operating";
pub(crate) const EXPENSES_OPERATING: &str = "income_statement.expenses.operating";
pub(crate) const EXPENSES_NON_OPERATING: &str = "income_statement.expenses.non_operating";
pub(crate) const ASSETS_CURRENT: &str = "balance_sheet.assets.current";
pub(crate) const ASSETS_NON_CURRENT: &str = "balance_sheet.assets.non_current";
pub(crate) const LIABILITIES_CURRENT: &str = "balance_sheet.liabilities.current";
pub(crate) const LIABILITIES_NON_CURRENT: &str = "balance_sheet.liabilities.non_current";
pub(crate) const EQUITY: &str = "balance_sheet.equity";

/// Flattens nested statement subsections into ordered line item lists. Order
/// within each subsection is preserved, and values are passed through as-is.
pub(crate) struct CategoryFlattener;

impl CategoryFlattener {
    pub(crate) fn flatten_income_statement(statement: &IncomeStatement) -> FlattenedIncomeStatement {
        let income = Self::tag(
            &statement.revenue.operating,
            LineItemType::Income,
            Some(Subcategory::Operating),
            REVENUE_OPERATING,
        )
        .chain(Self::tag(
            &statement.revenue.non_operating,
            LineItemType::Income,
            Some(Subcategory::NonOperating),
            REVENUE_NON_OPERATING,
        ))
        .collect();

        let expenses = Self::tag(
            &statement.expenses.operating,
            LineItemType::Expense,
            Some(Subcategory::Operating),
            EXPENSES_OPERATING,
        )
        .chain(Self::tag(
            &statement.expenses.non_operating,
            LineItemType::Expense,
            Some(Subcategory::NonOperating),
            EXPENSES_NON_OPERATING,
        ))
        .collect();

        FlattenedIncomeStatement { income, expenses }
    }

    pub(crate) fn flatten_balance_sheet(sheet: &BalanceSheet) -> FlattenedBalanceSheet {
        let assets = Self::tag(
            &sheet.assets.current,
            LineItemType::Asset,
            Some(Subcategory::Current),
            ASSETS_CURRENT,
        )
        .chain(Self::tag(
            &sheet.assets.non_current,
            LineItemType::Asset,
            Some(Subcategory::NonCurrent),
            ASSETS_NON_CURRENT,
        ))
        .collect();

        let liabilities = Self::tag(
            &sheet.liabilities.current,
            LineItemType::Liability,
            Some(Subcategory::Current),
            LIABILITIES_CURRENT,
        )
        .chain(Self::tag(
            &sheet.liabilities.non_current,
            LineItemType::Liability,
            Some(Subcategory::NonCurrent),
            LIABILITIES_NON_CURRENT,
        ))
        .collect();

        let equity = Self::tag(&sheet.equity, LineItemType::Equity, None, EQUITY).collect();

        FlattenedBalanceSheet {
            assets,
            liabilities,
            equity,
        }
    }

    fn tag<'a>(
        entries: &'a [StatementEntry],
        item_type: LineItemType,
        subcategory: Option<Subcategory>,
        path: &'static str,
    ) -> impl Iterator<Item = LineItem> + 'a {
        entries.iter().map(move |entry| LineItem {
            name: entry.name.clone(),
            value: entry.value,
            item_type,
            subcategory,
            path,
        })
    }
}
