//! # Borrow Service
//!
//! Equipment loans to students: borrow a cart of items, return them one by
//! one.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         LOAN LIFECYCLE                                  │
//! │                                                                         │
//! │  BORROW (one transaction over the whole cart)                           │
//! │    for each item in the cart:                                           │
//! │      ├── insert Borrowing { status: ACTIVE, due_date }                 │
//! │      ├── ledger OUT, quantity 1, "Borrowed by {student}"               │
//! │      └── guarded decrement (−1)                                        │
//! │    one exhausted item rolls the whole cart back                         │
//! │                                                                         │
//! │  RETURN (terminal, one transaction)                                     │
//! │      ├── ACTIVE → RETURNED, return_date, condition                     │
//! │      ├── ledger IN, quantity 1, "Returned by {student} ..."            │
//! │      └── increment (+1), whatever the condition                        │
//! │                                                                         │
//! │  Stock parity: every ACTIVE loan is one unit out, every return puts    │
//! │  one unit back. A Lost return still restores parity; writing the       │
//! │  stock off is a separate warehouse OUT.                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use crate::error::ServiceResult;
use crate::stock::{commit, StockMutator};
use inventaris_core::validation::{validate_borrow_cart, validate_name};
use inventaris_core::{
    BorrowStatus, Borrowing, CoreError, ItemCondition, LoanView, TransactionType,
};
use inventaris_db::Database;

/// A borrow cart: one student, one due date, one or more items.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BorrowRequest {
    pub student_name: String,
    #[serde(default)]
    pub student_id: Option<String>,
    pub item_ids: Vec<String>,
    pub due_date: DateTime<Utc>,
}

/// Handles equipment loans and returns.
#[derive(Debug, Clone)]
pub struct BorrowService {
    db: Database,
    stock: StockMutator,
}

impl BorrowService {
    pub fn new(db: Database) -> Self {
        let stock = StockMutator::new(db.clone());
        BorrowService { db, stock }
    }

    /// Records a borrow cart: one ACTIVE loan per item, each with its
    /// ledger OUT and stock decrement, all-or-nothing.
    pub async fn create_borrowing(&self, req: &BorrowRequest) -> ServiceResult<Vec<Borrowing>> {
        validate_name("studentName", &req.student_name)?;
        validate_borrow_cart(&req.item_ids)?;

        let note = match &req.student_id {
            Some(sid) => format!("Borrowed by {} ({sid})", req.student_name),
            None => format!("Borrowed by {}", req.student_name),
        };

        let mut tx = self.stock.begin().await?;
        let now = Utc::now();
        let mut loans = Vec::with_capacity(req.item_ids.len());

        for item_id in &req.item_ids {
            let item = self
                .db
                .items()
                .get_by_id(&mut *tx, item_id)
                .await?
                .ok_or_else(|| CoreError::UnknownItem(item_id.clone()))?;

            let borrowing = Borrowing {
                id: Uuid::new_v4().to_string(),
                student_name: req.student_name.trim().to_string(),
                student_id: req.student_id.clone(),
                item_id: item.id.clone(),
                borrow_date: now,
                due_date: req.due_date,
                status: BorrowStatus::Active,
                return_date: None,
                condition: None,
            };
            self.db.borrowings().insert(&mut *tx, &borrowing).await?;

            self.stock
                .apply_to(&mut tx, &item, -1, TransactionType::Out, Some(&note))
                .await?;

            loans.push(borrowing);
        }

        commit(tx).await?;

        info!(
            student = %req.student_name,
            items = req.item_ids.len(),
            "Borrowing recorded"
        );

        Ok(loans)
    }

    /// Closes a loan: RETURNED status, ledger IN, stock increment.
    ///
    /// The increment happens for every condition, Lost included, so loan
    /// parity always closes; a lost unit is written off afterwards with a
    /// plain warehouse OUT.
    pub async fn return_item(
        &self,
        borrowing_id: &str,
        condition: ItemCondition,
    ) -> ServiceResult<Borrowing> {
        let mut tx = self.stock.begin().await?;

        let borrowing = self
            .db
            .borrowings()
            .get_by_id(&mut *tx, borrowing_id)
            .await?
            .ok_or_else(|| CoreError::BorrowingNotFound(borrowing_id.to_string()))?;

        let return_date = Utc::now();
        let flipped = self
            .db
            .borrowings()
            .mark_returned(&mut *tx, borrowing_id, condition, return_date)
            .await?;
        if !flipped {
            return Err(CoreError::AlreadyReturned(borrowing_id.to_string()).into());
        }

        let item = self
            .db
            .items()
            .get_by_id(&mut *tx, &borrowing.item_id)
            .await?
            .ok_or_else(|| CoreError::UnknownItem(borrowing.item_id.clone()))?;

        let note = match &borrowing.student_id {
            Some(sid) => format!(
                "Returned by {} ({sid}). Condition: {condition}",
                borrowing.student_name
            ),
            None => format!(
                "Returned by {}. Condition: {condition}",
                borrowing.student_name
            ),
        };
        self.stock
            .apply_to(&mut tx, &item, 1, TransactionType::In, Some(&note))
            .await?;

        commit(tx).await?;

        info!(borrowing_id, ?condition, "Loan returned");

        Ok(Borrowing {
            status: BorrowStatus::Returned,
            return_date: Some(return_date),
            condition: Some(condition),
            ..borrowing
        })
    }

    /// First ACTIVE loan whose item carries this barcode, for the return
    /// scan flow.
    pub async fn find_active_borrowing(&self, barcode: &str) -> ServiceResult<Option<LoanView>> {
        let loan = self.db.borrowings().find_active_by_barcode(barcode.trim()).await?;
        Ok(loan)
    }

    /// All ACTIVE loans, most urgent due date first.
    pub async fn active_loans(&self) -> ServiceResult<Vec<LoanView>> {
        let loans = self.db.borrowings().active_loans().await?;
        Ok(loans)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::test_db;
    use chrono::Duration;

    fn request(item_ids: Vec<String>, due_in_days: i64) -> BorrowRequest {
        BorrowRequest {
            student_name: "Budi Santoso".to_string(),
            student_id: Some("S-2024-017".to_string()),
            item_ids,
            due_date: Utc::now() + Duration::days(due_in_days),
        }
    }

    #[tokio::test]
    async fn test_borrow_cart_decrements_each_item() {
        let fixture = test_db().await;
        let laptop = fixture.seed_item("899101", &fixture.warehouse.id, 3).await;
        let projector = fixture.seed_item("899102", &fixture.warehouse.id, 1).await;
        let service = BorrowService::new(fixture.db.clone());

        let loans = service
            .create_borrowing(&request(vec![laptop.id.clone(), projector.id.clone()], 7))
            .await
            .unwrap();

        assert_eq!(loans.len(), 2);
        assert!(loans.iter().all(|b| b.status == BorrowStatus::Active));
        assert_eq!(fixture.quantity(&laptop.id).await, 2);
        assert_eq!(fixture.quantity(&projector.id).await, 0);

        let history = fixture.db.ledger().for_item(&laptop.id).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].tx_type, TransactionType::Out);
        assert_eq!(history[0].quantity, 1);
        assert_eq!(
            history[0].note.as_deref(),
            Some("Borrowed by Budi Santoso (S-2024-017)")
        );
    }

    #[tokio::test]
    async fn test_exhausted_item_rolls_back_whole_cart() {
        let fixture = test_db().await;
        let available = fixture.seed_item("899103", &fixture.warehouse.id, 5).await;
        let exhausted = fixture.seed_item("899104", &fixture.warehouse.id, 0).await;
        let service = BorrowService::new(fixture.db.clone());

        let err = service
            .create_borrowing(&request(vec![available.id.clone(), exhausted.id.clone()], 7))
            .await
            .unwrap_err();

        assert_eq!(err.code(), "INSUFFICIENT_STOCK");
        assert_eq!(fixture.quantity(&available.id).await, 5);
        assert_eq!(fixture.ledger_count(&available.id).await, 0);
        assert!(service.active_loans().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_return_restores_stock() {
        let fixture = test_db().await;
        let item = fixture.seed_item("899105", &fixture.warehouse.id, 2).await;
        let service = BorrowService::new(fixture.db.clone());

        let loans = service.create_borrowing(&request(vec![item.id.clone()], 7)).await.unwrap();
        assert_eq!(fixture.quantity(&item.id).await, 1);

        let closed = service.return_item(&loans[0].id, ItemCondition::Good).await.unwrap();

        assert_eq!(closed.status, BorrowStatus::Returned);
        assert_eq!(closed.condition, Some(ItemCondition::Good));
        assert!(closed.return_date.is_some());
        assert_eq!(fixture.quantity(&item.id).await, 2);

        let history = fixture.db.ledger().for_item(&item.id).await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[1].tx_type, TransactionType::In);
        assert_eq!(
            history[1].note.as_deref(),
            Some("Returned by Budi Santoso (S-2024-017). Condition: Good")
        );
    }

    #[tokio::test]
    async fn test_lost_return_still_restores_stock() {
        let fixture = test_db().await;
        let item = fixture.seed_item("899106", &fixture.warehouse.id, 1).await;
        let service = BorrowService::new(fixture.db.clone());

        let loans = service.create_borrowing(&request(vec![item.id.clone()], 7)).await.unwrap();
        service.return_item(&loans[0].id, ItemCondition::Lost).await.unwrap();

        assert_eq!(fixture.quantity(&item.id).await, 1);
    }

    #[tokio::test]
    async fn test_double_return_rejected() {
        let fixture = test_db().await;
        let item = fixture.seed_item("899107", &fixture.warehouse.id, 1).await;
        let service = BorrowService::new(fixture.db.clone());

        let loans = service.create_borrowing(&request(vec![item.id.clone()], 7)).await.unwrap();
        service.return_item(&loans[0].id, ItemCondition::Good).await.unwrap();

        let err = service.return_item(&loans[0].id, ItemCondition::Good).await.unwrap_err();

        assert_eq!(err.code(), "ALREADY_RETURNED");
        // No second increment happened.
        assert_eq!(fixture.quantity(&item.id).await, 1);
    }

    #[tokio::test]
    async fn test_return_unknown_borrowing_rejected() {
        let fixture = test_db().await;
        let service = BorrowService::new(fixture.db.clone());

        let err = service.return_item("no-such-loan", ItemCondition::Good).await.unwrap_err();

        assert_eq!(err.code(), "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_find_active_borrowing_by_barcode() {
        let fixture = test_db().await;
        let item = fixture.seed_item("899108", &fixture.warehouse.id, 1).await;
        let service = BorrowService::new(fixture.db.clone());

        assert!(service.find_active_borrowing("899108").await.unwrap().is_none());

        service.create_borrowing(&request(vec![item.id.clone()], 7)).await.unwrap();

        let loan = service.find_active_borrowing("899108").await.unwrap().unwrap();
        assert_eq!(loan.item_id, item.id);
        assert_eq!(loan.student_name, "Budi Santoso");
    }

    #[tokio::test]
    async fn test_active_loans_ordered_by_due_date() {
        let fixture = test_db().await;
        let later = fixture.seed_item("899109", &fixture.warehouse.id, 1).await;
        let sooner = fixture.seed_item("899110", &fixture.warehouse.id, 1).await;
        let service = BorrowService::new(fixture.db.clone());

        service.create_borrowing(&request(vec![later.id.clone()], 14)).await.unwrap();
        service.create_borrowing(&request(vec![sooner.id.clone()], 3)).await.unwrap();

        let loans = service.active_loans().await.unwrap();
        assert_eq!(loans.len(), 2);
        assert_eq!(loans[0].item_id, sooner.id);
        assert_eq!(loans[1].item_id, later.id);
    }

    #[tokio::test]
    async fn test_empty_cart_rejected() {
        let fixture = test_db().await;
        let service = BorrowService::new(fixture.db.clone());

        let err = service.create_borrowing(&request(vec![], 7)).await.unwrap_err();

        assert_eq!(err.code(), "VALIDATION");
    }
}
