use async_trait::async_trait;
use fractic_server_error::ServerError;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::{
    config::MissingSubcategoryPolicy,
    data::models::amount_model::AmountModel,
    entities::{
        BalanceSheet, FinancialStatements, IncomeStatement, MaturitySplit, OperatingSplit,
        StatementEntry,
    },
    errors::{InvalidFieldType, InvalidStatementJson, MissingField, ReadError},
};

#[async_trait]
pub(crate) trait StatementJsonDatasource: Send + Sync {
    fn from_value(&self, value: &Value) -> Result<FinancialStatements, ServerError>;

    fn from_string(&self, s: &str) -> Result<FinancialStatements, ServerError>;

    async fn from_file<P>(&self, path: P) -> Result<FinancialStatements, ServerError>
    where
        P: AsRef<std::path::Path> + Send;
}

pub(crate) struct StatementJsonDatasourceImpl {
    missing_subcategories: MissingSubcategoryPolicy,
}

impl StatementJsonDatasourceImpl {
    pub(crate) fn new(missing_subcategories: MissingSubcategoryPolicy) -> Self {
        Self {
            missing_subcategories,
        }
    }
}

#[async_trait]
impl StatementJsonDatasource for StatementJsonDatasourceImpl {
    fn from_value(&self, value: &Value) -> Result<FinancialStatements, ServerError> {
        let root = object(value, "financial_data")?;

        // Accept the extraction service envelope ({"data": {...}}) as well.
        let root = match root.get("data") {
            Some(inner)
                if !root.contains_key("balance_sheet")
                    && !root.contains_key("income_statement") =>
            {
                object(inner, "data")?
            }
            _ => root,
        };

        let balance_sheet = root
            .get("balance_sheet")
            .map(|v| self.parse_balance_sheet(v))
            .transpose()?;
        let income_statement = root
            .get("income_statement")
            .map(|v| self.parse_income_statement(v))
            .transpose()?;
        if balance_sheet.is_none() && income_statement.is_none() {
            return Err(MissingField::new("balance_sheet or income_statement"));
        }

        debug!(
            has_balance_sheet = balance_sheet.is_some(),
            has_income_statement = income_statement.is_some(),
            "parsed financial statements"
        );
        Ok(FinancialStatements {
            balance_sheet,
            income_statement,
        })
    }

    fn from_string(&self, s: &str) -> Result<FinancialStatements, ServerError> {
        let value: Value =
            serde_json::from_str(s).map_err(|e| InvalidStatementJson::with_debug(&e))?;
        self.from_value(&value)
    }

    async fn from_file<P>(&self, path: P) -> Result<FinancialStatements, ServerError>
    where
        P: AsRef<std::path::Path> + Send,
    {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ReadError::with_debug(&e))?;
        self.from_string(&content)
    }
}

impl StatementJsonDatasourceImpl {
    fn parse_income_statement(&self, value: &Value) -> Result<IncomeStatement, ServerError> {
        let path = "income_statement";
        let obj = object(value, path)?;
        Ok(IncomeStatement {
            revenue: self.parse_operating_split(
                required(obj, path, "revenue")?,
                "income_statement.revenue",
            )?,
            expenses: self.parse_operating_split(
                required(obj, path, "expenses")?,
                "income_statement.expenses",
            )?,
        })
    }

    fn parse_balance_sheet(&self, value: &Value) -> Result<BalanceSheet, ServerError> {
        let path = "balance_sheet";
        let obj = object(value, path)?;
        Ok(BalanceSheet {
            assets: self.parse_maturity_split(
                required(obj, path, "assets")?,
                "balance_sheet.assets",
            )?,
            liabilities: self.parse_maturity_split(
                required(obj, path, "liabilities")?,
                "balance_sheet.liabilities",
            )?,
            equity: entries(required(obj, path, "equity")?, "balance_sheet.equity")?,
        })
    }

    fn parse_operating_split(
        &self,
        value: &Value,
        path: &str,
    ) -> Result<OperatingSplit, ServerError> {
        let obj = object(value, path)?;
        Ok(OperatingSplit {
            operating: self.subcategory(obj, path, "operating")?,
            non_operating: self.subcategory(obj, path, "non_operating")?,
        })
    }

    fn parse_maturity_split(
        &self,
        value: &Value,
        path: &str,
    ) -> Result<MaturitySplit, ServerError> {
        let obj = object(value, path)?;
        Ok(MaturitySplit {
            current: self.subcategory(obj, path, "current")?,
            non_current: self.subcategory(obj, path, "non_current")?,
        })
    }

    fn subcategory(
        &self,
        obj: &Map<String, Value>,
        parent: &str,
        key: &str,
    ) -> Result<Vec<StatementEntry>, ServerError> {
        let path = format!("{}.{}", parent, key);
        match (obj.get(key), self.missing_subcategories) {
            (Some(value), _) => entries(value, &path),
            (None, MissingSubcategoryPolicy::Reject) => Err(MissingField::new(&path)),
            (None, MissingSubcategoryPolicy::TreatAsEmpty) => {
                warn!(path = %path, "missing subcategory, treating as empty");
                Ok(Vec::new())
            }
        }
    }
}

fn object<'a>(value: &'a Value, path: &str) -> Result<&'a Map<String, Value>, ServerError> {
    value
        .as_object()
        .ok_or_else(|| InvalidFieldType::new(path, "object"))
}

fn required<'a>(
    obj: &'a Map<String, Value>,
    parent: &str,
    key: &str,
) -> Result<&'a Value, ServerError> {
    obj.get(key)
        .ok_or_else(|| MissingField::new(&format!("{}.{}", parent, key)))
}

fn entries(value: &Value, path: &str) -> Result<Vec<StatementEntry>, ServerError> {
    value
        .as_array()
        .ok_or_else(|| InvalidFieldType::new(path, "array"))?
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let item_path = format!("{}[{}]", path, i);
            let obj = object(item, &item_path)?;
            let name = match obj.get("name") {
                Some(Value::String(name)) => name.clone(),
                Some(_) => {
                    return Err(InvalidFieldType::new(
                        &format!("{}.name", item_path),
                        "string",
                    ))
                }
                None => return Err(MissingField::new(&format!("{}.name", item_path))),
            };
            let value =
                AmountModel::from_json(obj.get("value"), &format!("{}.value", item_path))?;
            Ok(StatementEntry {
                name,
                value: value.into(),
            })
        })
        .collect()
}
