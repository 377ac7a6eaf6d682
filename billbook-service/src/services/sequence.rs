//! Business-scoped sequential reference numbers (INV-00001, EXP-00001, ...).
//!
//! Each (business, family) pair owns a counter document bumped with an atomic
//! `$inc` upsert, so concurrent creates for the same business cannot observe
//! the same value and the sequence stays gap-free.

use mongodb::bson::doc;
use mongodb::options::{FindOneAndUpdateOptions, ReturnDocument};
use serde::{Deserialize, Serialize};
use service_core::error::AppError;

use crate::services::BillbookDb;

/// Document families that carry a sequential reference number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFamily {
    Invoice,
    Expense,
    Payment,
    Project,
}

impl DocumentFamily {
    pub fn prefix(&self) -> &'static str {
        match self {
            DocumentFamily::Invoice => "INV",
            DocumentFamily::Expense => "EXP",
            DocumentFamily::Payment => "PAY",
            DocumentFamily::Project => "SOLAR",
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            DocumentFamily::Invoice => "invoice",
            DocumentFamily::Expense => "expense",
            DocumentFamily::Payment => "payment",
            DocumentFamily::Project => "project",
        }
    }
}

/// Counter document, one per (business, family).
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct Counter {
    pub business_id: String,
    pub family: String,
    pub seq: i64,
}

/// Zero-padded to five digits, unbounded beyond that.
pub fn format_reference(prefix: &str, seq: i64) -> String {
    format!("{}-{:05}", prefix, seq)
}

impl BillbookDb {
    /// Allocate the next reference number for a business and family.
    pub async fn next_reference(
        &self,
        business_id: &str,
        family: DocumentFamily,
    ) -> Result<String, AppError> {
        let options = FindOneAndUpdateOptions::builder()
            .upsert(true)
            .return_document(ReturnDocument::After)
            .build();

        let counter = self
            .counters()
            .find_one_and_update(
                doc! { "business_id": business_id, "family": family.as_str() },
                doc! { "$inc": { "seq": 1 } },
                options,
            )
            .await
            .map_err(|e| {
                tracing::error!("Failed to allocate {} reference: {}", family.as_str(), e);
                AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
            })?
            .ok_or_else(|| {
                AppError::InternalError(anyhow::anyhow!(
                    "Counter upsert returned no document for {}/{}",
                    business_id,
                    family.as_str()
                ))
            })?;

        Ok(format_reference(family.prefix(), counter.seq))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn references_are_zero_padded_to_five_digits() {
        assert_eq!(format_reference("INV", 1), "INV-00001");
        assert_eq!(format_reference("EXP", 42), "EXP-00042");
        assert_eq!(format_reference("PAY", 99999), "PAY-99999");
        assert_eq!(format_reference("SOLAR", 7), "SOLAR-00007");
    }

    #[test]
    fn references_grow_past_five_digits_without_truncation() {
        assert_eq!(format_reference("INV", 100000), "INV-100000");
        assert_eq!(format_reference("INV", 1234567), "INV-1234567");
    }

    #[test]
    fn family_prefixes() {
        assert_eq!(DocumentFamily::Invoice.prefix(), "INV");
        assert_eq!(DocumentFamily::Expense.prefix(), "EXP");
        assert_eq!(DocumentFamily::Payment.prefix(), "PAY");
        assert_eq!(DocumentFamily::Project.prefix(), "SOLAR");
    }
}
