mod common;

use std::sync::Arc;

use chrono::NaiveDate;
use engine::{
    AccountCmd, AccountField, AccountType, Currency, EngineError, ListOrder, Patch, TransferCmd,
};

use common::{ALICE, BOB, account, balance_of, engine_with_db, engine_with_file_db};

#[tokio::test]
async fn transfer_moves_money_and_records_it() {
    let (engine, _db) = engine_with_db().await;
    let cash = account(&engine, ALICE, "Cash", 100_000).await;
    let bank = account(&engine, ALICE, "Bank", 50_000).await;

    let transfer = engine
        .create_transfer(
            TransferCmd::new(ALICE, &cash.id, &bank.id, 30_000)
                .description(Some("top up".to_string()))
                .date(NaiveDate::from_ymd_opt(2026, 3, 1)),
        )
        .await
        .unwrap();

    assert_eq!(transfer.amount, 30_000);
    assert_eq!(transfer.description.as_deref(), Some("top up"));
    assert_eq!(balance_of(&engine, ALICE, &cash.id).await, 70_000);
    assert_eq!(balance_of(&engine, ALICE, &bank.id).await, 80_000);

    let listed = engine
        .list_transfers(ALICE, Some(&bank.id), &ListOrder::default())
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, transfer.id);
}

#[tokio::test]
async fn transfer_preserves_total_across_accounts() {
    let (engine, _db) = engine_with_db().await;
    let a = account(&engine, ALICE, "A", 10_000).await;
    let b = account(&engine, ALICE, "B", 0).await;
    let c = account(&engine, ALICE, "C", 5_000).await;

    for (from, to, amount) in [(&a, &b, 4_000), (&b, &c, 1_500), (&c, &a, 6_500)] {
        engine
            .create_transfer(TransferCmd::new(ALICE, &from.id, &to.id, amount))
            .await
            .unwrap();
    }

    let mut total = 0;
    for id in [&a.id, &b.id, &c.id] {
        total += balance_of(&engine, ALICE, id).await;
    }
    assert_eq!(total, 15_000);
}

#[tokio::test]
async fn invalid_transfers_are_rejected_before_any_write() {
    let (engine, _db) = engine_with_db().await;
    let cash = account(&engine, ALICE, "Cash", 1_000).await;
    let bank = account(&engine, ALICE, "Bank", 1_000).await;

    let same = engine
        .create_transfer(TransferCmd::new(ALICE, &cash.id, &cash.id, 100))
        .await
        .unwrap_err();
    assert!(matches!(same, EngineError::InvalidInput(_)));

    for amount in [0, -5] {
        let err = engine
            .create_transfer(TransferCmd::new(ALICE, &cash.id, &bank.id, amount))
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidAmount(_)));
    }

    assert_eq!(balance_of(&engine, ALICE, &cash.id).await, 1_000);
    assert_eq!(balance_of(&engine, ALICE, &bank.id).await, 1_000);
    assert!(
        engine
            .list_transfers(ALICE, None, &ListOrder::default())
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn failed_credit_rolls_back_the_debit() {
    let (engine, _db) = engine_with_db().await;
    let cash = account(&engine, ALICE, "Cash", 1_000).await;
    let full = account(&engine, ALICE, "Full", i64::MAX - 10).await;

    let err = engine
        .create_transfer(TransferCmd::new(ALICE, &cash.id, &full.id, 100))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidAmount(_)));

    assert_eq!(balance_of(&engine, ALICE, &cash.id).await, 1_000);
    assert_eq!(balance_of(&engine, ALICE, &full.id).await, i64::MAX - 10);
    assert!(
        engine
            .list_transfers(ALICE, None, &ListOrder::default())
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn transfer_needs_accounts_owned_by_the_caller() {
    let (engine, _db) = engine_with_db().await;
    let mine = account(&engine, ALICE, "Mine", 1_000).await;
    let theirs = account(&engine, BOB, "Theirs", 1_000).await;

    let err = engine
        .create_transfer(TransferCmd::new(ALICE, &mine.id, &theirs.id, 100))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));

    let err = engine
        .create_transfer(TransferCmd::new(ALICE, &mine.id, "missing", 100))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));

    assert_eq!(balance_of(&engine, ALICE, &mine.id).await, 1_000);
    assert_eq!(balance_of(&engine, BOB, &theirs.id).await, 1_000);
}

#[tokio::test]
async fn inactive_accounts_cannot_take_part() {
    let (engine, _db) = engine_with_db().await;
    let cash = account(&engine, ALICE, "Cash", 1_000).await;
    let old = account(&engine, ALICE, "Old", 0).await;
    engine.deactivate_account(ALICE, &old.id).await.unwrap();

    let err = engine
        .create_transfer(TransferCmd::new(ALICE, &cash.id, &old.id, 100))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidState(_)));
    assert_eq!(balance_of(&engine, ALICE, &cash.id).await, 1_000);

    // still readable after the soft delete
    assert!(!engine.account(ALICE, &old.id).await.unwrap().is_active);
}

#[tokio::test]
async fn currencies_must_match() {
    let (engine, _db) = engine_with_db().await;
    let rupiah = account(&engine, ALICE, "Rupiah", 1_000).await;
    let dollars = engine
        .create_account(
            AccountCmd::new(ALICE, "Dollars", AccountType::Bank)
                .balance(1_000)
                .currency(Currency::Usd),
        )
        .await
        .unwrap();

    let err = engine
        .create_transfer(TransferCmd::new(ALICE, &rupiah.id, &dollars.id, 100))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::CurrencyMismatch(_)));
    assert_eq!(balance_of(&engine, ALICE, &rupiah.id).await, 1_000);
    assert_eq!(balance_of(&engine, ALICE, &dollars.id).await, 1_000);
}

#[tokio::test]
async fn deleting_a_transfer_restores_both_balances() {
    let (engine, _db) = engine_with_db().await;
    let cash = account(&engine, ALICE, "Cash", 10_000).await;
    let bank = account(&engine, ALICE, "Bank", 0).await;

    let transfer = engine
        .create_transfer(TransferCmd::new(ALICE, &cash.id, &bank.id, 2_500))
        .await
        .unwrap();
    engine.delete_transfer(ALICE, &transfer.id).await.unwrap();

    assert_eq!(balance_of(&engine, ALICE, &cash.id).await, 10_000);
    assert_eq!(balance_of(&engine, ALICE, &bank.id).await, 0);
    let err = engine.transfer(ALICE, &transfer.id).await.unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));

    let err = engine.delete_transfer(ALICE, &transfer.id).await.unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));
}

#[tokio::test]
async fn transfers_of_other_users_are_invisible() {
    let (engine, _db) = engine_with_db().await;
    let cash = account(&engine, ALICE, "Cash", 10_000).await;
    let bank = account(&engine, ALICE, "Bank", 0).await;
    let transfer = engine
        .create_transfer(TransferCmd::new(ALICE, &cash.id, &bank.id, 1_000))
        .await
        .unwrap();

    assert!(matches!(
        engine.transfer(BOB, &transfer.id).await.unwrap_err(),
        EngineError::KeyNotFound(_)
    ));
    assert!(matches!(
        engine.delete_transfer(BOB, &transfer.id).await.unwrap_err(),
        EngineError::KeyNotFound(_)
    ));
    assert!(
        engine
            .list_transfers(BOB, None, &ListOrder::default())
            .await
            .unwrap()
            .is_empty()
    );
    assert_eq!(balance_of(&engine, ALICE, &bank.id).await, 1_000);
}

#[tokio::test]
async fn concurrent_transfers_do_not_lose_updates() {
    let (engine, _db) = engine_with_db().await;
    let engine = Arc::new(engine);
    let a = account(&engine, ALICE, "A", 100_000).await;
    let b = account(&engine, ALICE, "B", 100_000).await;

    let mut handles = Vec::new();
    for round in 0..20 {
        let engine = Arc::clone(&engine);
        let (from, to) = if round % 2 == 0 {
            (a.id.clone(), b.id.clone())
        } else {
            (b.id.clone(), a.id.clone())
        };
        handles.push(tokio::spawn(async move {
            engine
                .create_transfer(TransferCmd::new(ALICE, from, to, 1_000 + round))
                .await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let total = balance_of(&engine, ALICE, &a.id).await + balance_of(&engine, ALICE, &b.id).await;
    assert_eq!(total, 200_000);
    let listed = engine
        .list_transfers(ALICE, None, &ListOrder::default())
        .await
        .unwrap();
    assert_eq!(listed.len(), 20);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_transfers_share_a_file_database() {
    let (engine, _file) = engine_with_file_db(4).await;
    let engine = Arc::new(engine);
    let a = account(&engine, ALICE, "A", 100_000).await;
    let b = account(&engine, ALICE, "B", 100_000).await;

    let mut handles = Vec::new();
    for round in 0..20 {
        let engine = Arc::clone(&engine);
        let (from, to) = if round % 2 == 0 {
            (a.id.clone(), b.id.clone())
        } else {
            (b.id.clone(), a.id.clone())
        };
        handles.push(tokio::spawn(async move {
            engine
                .create_transfer(TransferCmd::new(ALICE, from, to, 1_000 + round))
                .await
        }));
    }

    let mut recorded = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => recorded += 1,
            // lock contention may exhaust the retries, never a raw database error
            Err(EngineError::Conflict(_)) => {}
            Err(err) => panic!("transfer failed with {err:?}"),
        }
    }

    let listed = engine
        .list_transfers(ALICE, None, &ListOrder::default())
        .await
        .unwrap();
    assert_eq!(listed.len(), recorded);
    let moved_out_of_a: i64 = listed
        .iter()
        .map(|t| if t.from_account_id == a.id { t.amount } else { -t.amount })
        .sum();
    assert_eq!(balance_of(&engine, ALICE, &a.id).await, 100_000 - moved_out_of_a);
    assert_eq!(balance_of(&engine, ALICE, &b.id).await, 100_000 + moved_out_of_a);

    // reversals go through the same retrying transaction
    let mut reversals = Vec::new();
    for transfer in listed {
        let engine = Arc::clone(&engine);
        reversals.push(tokio::spawn(async move {
            engine.delete_transfer(ALICE, &transfer.id).await
        }));
    }
    for handle in reversals {
        match handle.await.unwrap() {
            Ok(()) | Err(EngineError::Conflict(_)) => {}
            Err(err) => panic!("reversal failed with {err:?}"),
        }
    }
    let total = balance_of(&engine, ALICE, &a.id).await + balance_of(&engine, ALICE, &b.id).await;
    assert_eq!(total, 200_000);
}

#[tokio::test]
async fn account_update_is_sparse() {
    let (engine, _db) = engine_with_db().await;
    let cash = account(&engine, ALICE, "Cash", 1_000).await;

    let updated = engine
        .update_account(
            ALICE,
            &cash.id,
            Patch::new().set(AccountField::Name("Wallet".to_string())),
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "Wallet");
    assert_eq!(updated.balance, 1_000);
    assert_eq!(updated.color, cash.color);

    let err = engine
        .update_account(ALICE, &cash.id, Patch::new())
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidInput(_)));

    let err = engine
        .update_account(
            BOB,
            &cash.id,
            Patch::new().set(AccountField::Name("Stolen".to_string())),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));
}

#[tokio::test]
async fn inactive_accounts_are_hidden_unless_requested() {
    let (engine, _db) = engine_with_db().await;
    let cash = account(&engine, ALICE, "Cash", 1_000).await;
    let old = account(&engine, ALICE, "Old", 500).await;
    let transfer = engine
        .create_transfer(TransferCmd::new(ALICE, &old.id, &cash.id, 200))
        .await
        .unwrap();
    engine.deactivate_account(ALICE, &old.id).await.unwrap();

    // the row and its history survive the soft delete
    let deactivated = engine.account(ALICE, &old.id).await.unwrap();
    assert!(!deactivated.is_active);
    assert_eq!(deactivated.balance, 300);
    assert_eq!(engine.transfer(ALICE, &transfer.id).await.unwrap().id, transfer.id);
    let history = engine
        .list_transfers(ALICE, Some(&old.id), &ListOrder::default())
        .await
        .unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].from_account_id, old.id);

    let active = engine
        .list_accounts(ALICE, false, &ListOrder::default())
        .await
        .unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].id, cash.id);

    let all = engine
        .list_accounts(ALICE, true, &ListOrder::default())
        .await
        .unwrap();
    assert_eq!(all.len(), 2);
}
