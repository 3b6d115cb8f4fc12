//! Initial schema migration.
//!
//! Creates every table of the service:
//!
//! - `users`: profile of a header-identified user
//! - `accounts`, `account_transfers`: balances and the transfers between them
//! - `transactions`, `categories`, `budgets`, `tags`
//! - `debts`, `investments`, `reminders`, `savings_goals`
//! - `recurring_transactions`
//! - `split_bills`, `split_bill_participants`
//!
//! Owner columns (`user_id`) carry no foreign key: identity is supplied by the
//! caller and a profile row is optional.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// ─────────────────────────────────────────────────────────────────────────────
// Table identifiers
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Iden, Clone)]
enum Users {
    Table,
    Id,
    Name,
    Email,
    Currency,
    CreatedAt,
}

#[derive(Iden, Clone)]
enum Accounts {
    Table,
    Id,
    UserId,
    Name,
    Type,
    Balance,
    Currency,
    Color,
    Icon,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden, Clone)]
enum AccountTransfers {
    Table,
    Id,
    UserId,
    FromAccountId,
    ToAccountId,
    Amount,
    Description,
    Date,
    CreatedAt,
}

#[derive(Iden, Clone)]
enum Categories {
    Table,
    Id,
    UserId,
    Name,
    Type,
    Color,
    Icon,
    CreatedAt,
}

#[derive(Iden, Clone)]
enum Transactions {
    Table,
    Id,
    UserId,
    CategoryId,
    Type,
    Amount,
    Description,
    Date,
    CreatedAt,
}

#[derive(Iden, Clone)]
enum Budgets {
    Table,
    Id,
    UserId,
    CategoryId,
    Amount,
    Month,
    Year,
    CreatedAt,
}

#[derive(Iden, Clone)]
enum Debts {
    Table,
    Id,
    UserId,
    Type,
    PersonName,
    Amount,
    Description,
    DueDate,
    IsPaid,
    PaidDate,
    CreatedAt,
}

#[derive(Iden, Clone)]
enum Investments {
    Table,
    Id,
    UserId,
    Name,
    Type,
    Quantity,
    BuyPrice,
    CurrentPrice,
    BuyDate,
    Notes,
    CreatedAt,
}

#[derive(Iden, Clone)]
enum Reminders {
    Table,
    Id,
    UserId,
    Title,
    Description,
    Amount,
    DueDate,
    IsCompleted,
    CreatedAt,
}

#[derive(Iden, Clone)]
enum SavingsGoals {
    Table,
    Id,
    UserId,
    Name,
    TargetAmount,
    CurrentAmount,
    Deadline,
    Color,
    Icon,
    IsCompleted,
    CreatedAt,
}

#[derive(Iden, Clone)]
enum RecurringTransactions {
    Table,
    Id,
    UserId,
    CategoryId,
    Type,
    Amount,
    Description,
    Frequency,
    StartDate,
    EndDate,
    IsActive,
    CreatedAt,
}

#[derive(Iden, Clone)]
enum SplitBills {
    Table,
    Id,
    UserId,
    Title,
    TotalAmount,
    Date,
    Description,
    CreatedAt,
}

#[derive(Iden, Clone)]
enum SplitBillParticipants {
    Table,
    Id,
    SplitBillId,
    Name,
    Amount,
    IsPaid,
    PaidDate,
}

#[derive(Iden, Clone)]
enum Tags {
    Table,
    Id,
    UserId,
    Name,
    Color,
    CreatedAt,
}

fn id_col<T: Iden + 'static>(iden: T) -> ColumnDef {
    ColumnDef::new(iden).string().not_null().primary_key().to_owned()
}

fn created_at_col<T: Iden + 'static>(iden: T) -> ColumnDef {
    ColumnDef::new(iden)
        .timestamp_with_time_zone()
        .not_null()
        .to_owned()
}

fn owner_index<T: Iden + Clone + 'static>(name: &str, table: T, user_id: T) -> IndexCreateStatement {
    Index::create()
        .name(name)
        .table(table)
        .col(user_id)
        .to_owned()
}

// ─────────────────────────────────────────────────────────────────────────────
// Migration implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ───────────────────────────────────────────────────────────────────
        // 1. Users
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(id_col(Users::Id))
                    .col(ColumnDef::new(Users::Name).string())
                    .col(ColumnDef::new(Users::Email).string())
                    .col(
                        ColumnDef::new(Users::Currency)
                            .string()
                            .not_null()
                            .default("IDR"),
                    )
                    .col(created_at_col(Users::CreatedAt))
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 2. Accounts
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Accounts::Table)
                    .if_not_exists()
                    .col(id_col(Accounts::Id))
                    .col(ColumnDef::new(Accounts::UserId).string().not_null())
                    .col(ColumnDef::new(Accounts::Name).string().not_null())
                    .col(ColumnDef::new(Accounts::Type).string().not_null())
                    .col(
                        ColumnDef::new(Accounts::Balance)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Accounts::Currency)
                            .string()
                            .not_null()
                            .default("IDR"),
                    )
                    .col(ColumnDef::new(Accounts::Color).string())
                    .col(ColumnDef::new(Accounts::Icon).string())
                    .col(
                        ColumnDef::new(Accounts::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(created_at_col(Accounts::CreatedAt))
                    .col(created_at_col(Accounts::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(owner_index(
                "idx-accounts-user_id",
                Accounts::Table,
                Accounts::UserId,
            ))
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 3. Account transfers
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(AccountTransfers::Table)
                    .if_not_exists()
                    .col(id_col(AccountTransfers::Id))
                    .col(ColumnDef::new(AccountTransfers::UserId).string().not_null())
                    .col(
                        ColumnDef::new(AccountTransfers::FromAccountId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AccountTransfers::ToAccountId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AccountTransfers::Amount)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(AccountTransfers::Description).string())
                    .col(ColumnDef::new(AccountTransfers::Date).date().not_null())
                    .col(created_at_col(AccountTransfers::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-account_transfers-from_account_id")
                            .from(AccountTransfers::Table, AccountTransfers::FromAccountId)
                            .to(Accounts::Table, Accounts::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-account_transfers-to_account_id")
                            .from(AccountTransfers::Table, AccountTransfers::ToAccountId)
                            .to(Accounts::Table, Accounts::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(owner_index(
                "idx-account_transfers-user_id",
                AccountTransfers::Table,
                AccountTransfers::UserId,
            ))
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 4. Categories
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Categories::Table)
                    .if_not_exists()
                    .col(id_col(Categories::Id))
                    .col(ColumnDef::new(Categories::UserId).string().not_null())
                    .col(ColumnDef::new(Categories::Name).string().not_null())
                    .col(ColumnDef::new(Categories::Type).string().not_null())
                    .col(ColumnDef::new(Categories::Color).string().not_null())
                    .col(ColumnDef::new(Categories::Icon).string().not_null())
                    .col(created_at_col(Categories::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(owner_index(
                "idx-categories-user_id",
                Categories::Table,
                Categories::UserId,
            ))
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 5. Transactions
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Transactions::Table)
                    .if_not_exists()
                    .col(id_col(Transactions::Id))
                    .col(ColumnDef::new(Transactions::UserId).string().not_null())
                    .col(ColumnDef::new(Transactions::CategoryId).string())
                    .col(ColumnDef::new(Transactions::Type).string().not_null())
                    .col(ColumnDef::new(Transactions::Amount).big_integer().not_null())
                    .col(ColumnDef::new(Transactions::Description).string())
                    .col(ColumnDef::new(Transactions::Date).date().not_null())
                    .col(created_at_col(Transactions::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-transactions-user_id-date")
                    .table(Transactions::Table)
                    .col(Transactions::UserId)
                    .col(Transactions::Date)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 6. Budgets
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Budgets::Table)
                    .if_not_exists()
                    .col(id_col(Budgets::Id))
                    .col(ColumnDef::new(Budgets::UserId).string().not_null())
                    .col(ColumnDef::new(Budgets::CategoryId).string())
                    .col(ColumnDef::new(Budgets::Amount).big_integer().not_null())
                    .col(ColumnDef::new(Budgets::Month).integer().not_null())
                    .col(ColumnDef::new(Budgets::Year).integer().not_null())
                    .col(created_at_col(Budgets::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-budgets-user_id-year-month")
                    .table(Budgets::Table)
                    .col(Budgets::UserId)
                    .col(Budgets::Year)
                    .col(Budgets::Month)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 7. Debts
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Debts::Table)
                    .if_not_exists()
                    .col(id_col(Debts::Id))
                    .col(ColumnDef::new(Debts::UserId).string().not_null())
                    .col(ColumnDef::new(Debts::Type).string().not_null())
                    .col(ColumnDef::new(Debts::PersonName).string().not_null())
                    .col(ColumnDef::new(Debts::Amount).big_integer().not_null())
                    .col(ColumnDef::new(Debts::Description).string())
                    .col(ColumnDef::new(Debts::DueDate).date())
                    .col(
                        ColumnDef::new(Debts::IsPaid)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Debts::PaidDate).date())
                    .col(created_at_col(Debts::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(owner_index("idx-debts-user_id", Debts::Table, Debts::UserId))
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 8. Investments
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Investments::Table)
                    .if_not_exists()
                    .col(id_col(Investments::Id))
                    .col(ColumnDef::new(Investments::UserId).string().not_null())
                    .col(ColumnDef::new(Investments::Name).string().not_null())
                    .col(ColumnDef::new(Investments::Type).string().not_null())
                    .col(ColumnDef::new(Investments::Quantity).double().not_null())
                    .col(ColumnDef::new(Investments::BuyPrice).big_integer().not_null())
                    .col(
                        ColumnDef::new(Investments::CurrentPrice)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Investments::BuyDate).date().not_null())
                    .col(ColumnDef::new(Investments::Notes).string())
                    .col(created_at_col(Investments::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(owner_index(
                "idx-investments-user_id",
                Investments::Table,
                Investments::UserId,
            ))
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 9. Reminders
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Reminders::Table)
                    .if_not_exists()
                    .col(id_col(Reminders::Id))
                    .col(ColumnDef::new(Reminders::UserId).string().not_null())
                    .col(ColumnDef::new(Reminders::Title).string().not_null())
                    .col(ColumnDef::new(Reminders::Description).string())
                    .col(ColumnDef::new(Reminders::Amount).big_integer())
                    .col(ColumnDef::new(Reminders::DueDate).date().not_null())
                    .col(
                        ColumnDef::new(Reminders::IsCompleted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(created_at_col(Reminders::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-reminders-user_id-due_date")
                    .table(Reminders::Table)
                    .col(Reminders::UserId)
                    .col(Reminders::DueDate)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 10. Savings goals
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(SavingsGoals::Table)
                    .if_not_exists()
                    .col(id_col(SavingsGoals::Id))
                    .col(ColumnDef::new(SavingsGoals::UserId).string().not_null())
                    .col(ColumnDef::new(SavingsGoals::Name).string().not_null())
                    .col(
                        ColumnDef::new(SavingsGoals::TargetAmount)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SavingsGoals::CurrentAmount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(SavingsGoals::Deadline).date())
                    .col(ColumnDef::new(SavingsGoals::Color).string().not_null())
                    .col(ColumnDef::new(SavingsGoals::Icon).string().not_null())
                    .col(
                        ColumnDef::new(SavingsGoals::IsCompleted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(created_at_col(SavingsGoals::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(owner_index(
                "idx-savings_goals-user_id",
                SavingsGoals::Table,
                SavingsGoals::UserId,
            ))
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 11. Recurring transactions
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(RecurringTransactions::Table)
                    .if_not_exists()
                    .col(id_col(RecurringTransactions::Id))
                    .col(
                        ColumnDef::new(RecurringTransactions::UserId)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(RecurringTransactions::CategoryId).string())
                    .col(ColumnDef::new(RecurringTransactions::Type).string().not_null())
                    .col(
                        ColumnDef::new(RecurringTransactions::Amount)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(RecurringTransactions::Description).string())
                    .col(
                        ColumnDef::new(RecurringTransactions::Frequency)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RecurringTransactions::StartDate)
                            .date()
                            .not_null(),
                    )
                    .col(ColumnDef::new(RecurringTransactions::EndDate).date())
                    .col(
                        ColumnDef::new(RecurringTransactions::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(created_at_col(RecurringTransactions::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(owner_index(
                "idx-recurring_transactions-user_id",
                RecurringTransactions::Table,
                RecurringTransactions::UserId,
            ))
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 12. Split bills
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(SplitBills::Table)
                    .if_not_exists()
                    .col(id_col(SplitBills::Id))
                    .col(ColumnDef::new(SplitBills::UserId).string().not_null())
                    .col(ColumnDef::new(SplitBills::Title).string().not_null())
                    .col(
                        ColumnDef::new(SplitBills::TotalAmount)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(SplitBills::Date).date().not_null())
                    .col(ColumnDef::new(SplitBills::Description).string())
                    .col(created_at_col(SplitBills::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(owner_index(
                "idx-split_bills-user_id",
                SplitBills::Table,
                SplitBills::UserId,
            ))
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SplitBillParticipants::Table)
                    .if_not_exists()
                    .col(id_col(SplitBillParticipants::Id))
                    .col(
                        ColumnDef::new(SplitBillParticipants::SplitBillId)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(SplitBillParticipants::Name).string().not_null())
                    .col(
                        ColumnDef::new(SplitBillParticipants::Amount)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SplitBillParticipants::IsPaid)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(SplitBillParticipants::PaidDate).date())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-split_bill_participants-split_bill_id")
                            .from(
                                SplitBillParticipants::Table,
                                SplitBillParticipants::SplitBillId,
                            )
                            .to(SplitBills::Table, SplitBills::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 13. Tags
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Tags::Table)
                    .if_not_exists()
                    .col(id_col(Tags::Id))
                    .col(ColumnDef::new(Tags::UserId).string().not_null())
                    .col(ColumnDef::new(Tags::Name).string().not_null())
                    .col(ColumnDef::new(Tags::Color).string().not_null())
                    .col(created_at_col(Tags::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(owner_index("idx-tags-user_id", Tags::Table, Tags::UserId))
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Tags::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .table(SplitBillParticipants::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(SplitBills::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .table(RecurringTransactions::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(SavingsGoals::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Reminders::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Investments::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Debts::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Budgets::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Transactions::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Categories::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .table(AccountTransfers::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(Accounts::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).if_exists().to_owned())
            .await?;
        Ok(())
    }
}
