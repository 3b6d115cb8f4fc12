//! Translation between wire field names and storage columns.
//!
//! The JSON surface speaks camelCase while the tables use snake_case. Each
//! entity declares one [`FieldTable`] listing both spellings next to the
//! sea-orm column, and list endpoints resolve `?sort=` through it. Unknown
//! names are rejected instead of being passed to SQL.

use api_types::SortOrder;
use sea_orm::{ColumnTrait, Order};

use crate::{EngineError, ResultEngine};

/// One field: wire name, storage name and the column it maps to.
pub type FieldEntry<C> = (&'static str, &'static str, C);

/// Bidirectional field-name table for one entity.
#[derive(Debug)]
pub struct FieldTable<C: 'static> {
    entity: &'static str,
    entries: &'static [FieldEntry<C>],
}

impl<C: 'static> FieldTable<C> {
    pub const fn new(entity: &'static str, entries: &'static [FieldEntry<C>]) -> Self {
        Self { entity, entries }
    }

    pub fn entries(&self) -> &'static [FieldEntry<C>] {
        self.entries
    }

    /// Storage (snake_case) name for a wire field.
    pub fn storage_name(&self, external: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(wire, _, _)| *wire == external)
            .map(|(_, storage, _)| *storage)
    }

    /// Wire (camelCase) name for a storage column.
    pub fn external_name(&self, storage: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(_, column, _)| *column == storage)
            .map(|(wire, _, _)| *wire)
    }

    pub fn external_names(&self) -> impl Iterator<Item = &'static str> {
        self.entries.iter().map(|(wire, _, _)| *wire)
    }
}

impl<C: ColumnTrait> FieldTable<C> {
    pub fn column(&self, external: &str) -> Option<C> {
        self.entries
            .iter()
            .find(|(wire, _, _)| *wire == external)
            .map(|(_, _, column)| *column)
    }

    /// Resolve a caller-supplied ordering, falling back to `default`.
    pub(crate) fn order_by(
        &self,
        order: &ListOrder,
        default: (C, SortOrder),
    ) -> ResultEngine<(C, Order)> {
        let (default_column, default_direction) = default;
        let column = match order.sort.as_deref() {
            Some(name) => self.column(name).ok_or_else(|| {
                EngineError::InvalidInput(format!(
                    "unknown sort field '{name}' for {}",
                    self.entity
                ))
            })?,
            None => default_column,
        };
        let direction = match order.order.unwrap_or(default_direction) {
            SortOrder::Asc => Order::Asc,
            SortOrder::Desc => Order::Desc,
        };
        Ok((column, direction))
    }
}

/// Requested ordering for a list operation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListOrder {
    /// Wire name of the field to sort by.
    pub sort: Option<String>,
    pub order: Option<SortOrder>,
}

impl ListOrder {
    pub fn new(sort: Option<String>, order: Option<SortOrder>) -> Self {
        Self { sort, order }
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::IdenStatic;

    use super::*;
    use crate::{
        accounts, budgets, categories, debts, investments, recurring, reminders, savings_goals,
        split_bills, tags, transactions, transfers, users,
    };

    fn to_camel(storage: &str) -> String {
        let mut out = String::with_capacity(storage.len());
        let mut upper = false;
        for ch in storage.chars() {
            if ch == '_' {
                upper = true;
            } else if upper {
                out.extend(ch.to_uppercase());
                upper = false;
            } else {
                out.push(ch);
            }
        }
        out
    }

    fn check_table<C: ColumnTrait>(table: &FieldTable<C>) {
        for (wire, storage, column) in table.entries() {
            assert_eq!(to_camel(storage), *wire, "{} wire name", table.entity);
            assert_eq!(IdenStatic::as_str(column), *storage, "{} column", table.entity);
        }
        assert_eq!(
            table.entries().len(),
            C::iter().count(),
            "{} table must list every column",
            table.entity
        );
    }

    #[test]
    fn every_table_agrees_with_its_columns() {
        check_table(&accounts::FIELDS);
        check_table(&transfers::FIELDS);
        check_table(&transactions::FIELDS);
        check_table(&categories::FIELDS);
        check_table(&budgets::FIELDS);
        check_table(&debts::FIELDS);
        check_table(&investments::FIELDS);
        check_table(&reminders::FIELDS);
        check_table(&savings_goals::FIELDS);
        check_table(&recurring::FIELDS);
        check_table(&split_bills::FIELDS);
        check_table(&split_bills::participants::FIELDS);
        check_table(&tags::FIELDS);
        check_table(&users::FIELDS);
    }

    #[test]
    fn lookups_go_both_ways() {
        assert_eq!(accounts::FIELDS.storage_name("isActive"), Some("is_active"));
        assert_eq!(accounts::FIELDS.external_name("created_at"), Some("createdAt"));
        assert_eq!(accounts::FIELDS.storage_name("is_active"), None);
    }

    #[test]
    fn unknown_sort_field_is_rejected() {
        let order = ListOrder::new(Some("password".to_string()), None);
        let err = accounts::FIELDS
            .order_by(&order, (accounts::Column::CreatedAt, SortOrder::Desc))
            .unwrap_err();
        assert_eq!(
            err,
            EngineError::InvalidInput("unknown sort field 'password' for account".to_string())
        );
    }

    #[test]
    fn default_order_applies_when_absent() {
        let (_, direction) = accounts::FIELDS
            .order_by(
                &ListOrder::default(),
                (accounts::Column::CreatedAt, SortOrder::Desc),
            )
            .unwrap();
        assert_eq!(direction, Order::Desc);

        let order = ListOrder::new(Some("balance".to_string()), Some(SortOrder::Asc));
        let (column, direction) = accounts::FIELDS
            .order_by(&order, (accounts::Column::CreatedAt, SortOrder::Desc))
            .unwrap();
        assert_eq!(IdenStatic::as_str(&column), "balance");
        assert_eq!(direction, Order::Asc);
    }
}
