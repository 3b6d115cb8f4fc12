//! People sharing a split bill. Rows are owned through their bill.

use chrono::NaiveDate;
use sea_orm::entity::prelude::*;

use crate::FieldTable;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Participant {
    pub id: String,
    pub split_bill_id: String,
    pub name: String,
    pub amount: i64,
    pub is_paid: bool,
    pub paid_date: Option<NaiveDate>,
}

pub const FIELDS: FieldTable<Column> = FieldTable::new(
    "participant",
    &[
        ("id", "id", Column::Id),
        ("splitBillId", "split_bill_id", Column::SplitBillId),
        ("name", "name", Column::Name),
        ("amount", "amount", Column::Amount),
        ("isPaid", "is_paid", Column::IsPaid),
        ("paidDate", "paid_date", Column::PaidDate),
    ],
);

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "split_bill_participants")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub split_bill_id: String,
    pub name: String,
    pub amount: i64,
    pub is_paid: bool,
    pub paid_date: Option<Date>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::Entity",
        from = "Column::SplitBillId",
        to = "super::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    SplitBill,
}

impl Related<super::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SplitBill.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Participant {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            split_bill_id: model.split_bill_id,
            name: model.name,
            amount: model.amount,
            is_paid: model.is_paid,
            paid_date: model.paid_date,
        }
    }
}
