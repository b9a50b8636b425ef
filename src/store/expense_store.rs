// src/store/expense_store.rs

use chrono::{Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;
use validator::Validate;

use crate::common::error::AppError;
use crate::models::expense::{Expense, ExpenseInput, ExpensePatch};
use crate::store::json_store::JsonCollection;
use crate::store::seed;

pub struct ExpenseStore {
    records: Vec<Expense>,
    collection: JsonCollection,
}

impl ExpenseStore {
    pub fn open(collection: JsonCollection) -> Self {
        let records = collection.load_or_seed(seed::expenses);
        Self { records, collection }
    }

    fn persist(&self) {
        self.collection.save(&self.records);
    }

    // --- CRUD ---

    pub fn add(&mut self, input: ExpenseInput) -> Result<Expense, AppError> {
        input.validate()?;

        let now = Utc::now();
        let expense = Expense {
            id: Uuid::new_v4(),
            title: input.title,
            description: input.description,
            amount: input.amount,
            category: input.category,
            date: input.date,
            receipt_url: input.receipt_url,
            created_at: now,
            updated_at: now,
        };

        self.records.push(expense.clone());
        self.persist();
        Ok(expense)
    }

    pub fn update(&mut self, id: Uuid, patch: ExpensePatch) -> Result<(), AppError> {
        patch.validate()?;

        let Some(expense) = self.records.iter_mut().find(|e| e.id == id) else {
            return Ok(());
        };

        if let Some(title) = patch.title {
            expense.title = title;
        }
        if let Some(description) = patch.description {
            expense.description = Some(description);
        }
        if let Some(amount) = patch.amount {
            expense.amount = amount;
        }
        if let Some(category) = patch.category {
            expense.category = category;
        }
        if let Some(date) = patch.date {
            expense.date = date;
        }
        if let Some(receipt_url) = patch.receipt_url {
            expense.receipt_url = Some(receipt_url);
        }
        expense.updated_at = Utc::now();

        self.persist();
        Ok(())
    }

    pub fn remove(&mut self, id: Uuid) {
        self.records.retain(|e| e.id != id);
        self.persist();
    }

    // --- Consultas ---

    pub fn get(&self, id: Uuid) -> Option<&Expense> {
        self.records.iter().find(|e| e.id == id)
    }

    pub fn all(&self) -> &[Expense] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn search(&self, term: &str) -> Vec<&Expense> {
        let term = term.to_lowercase();
        self.records
            .iter()
            .filter(|e| {
                e.title.to_lowercase().contains(&term)
                    || e.description
                        .as_deref()
                        .is_some_and(|d| d.to_lowercase().contains(&term))
            })
            .collect()
    }

    pub fn by_category(&self, category: &str) -> Vec<&Expense> {
        self.records
            .iter()
            .filter(|e| e.category == category)
            .collect()
    }

    pub fn in_period(&self, from: NaiveDate, to: NaiveDate) -> Vec<&Expense> {
        self.records
            .iter()
            .filter(|e| e.date >= from && e.date <= to)
            .collect()
    }

    // --- Agregados ---

    pub fn total(&self) -> Decimal {
        self.records
            .iter()
            .fold(Decimal::ZERO, |acc, e| acc + e.amount)
    }

    /// Total do mês civil da data de referência.
    pub fn month_total(&self, reference: NaiveDate) -> Decimal {
        self.records
            .iter()
            .filter(|e| e.date.year() == reference.year() && e.date.month() == reference.month())
            .fold(Decimal::ZERO, |acc, e| acc + e.amount)
    }
}
