//! Fixed mapping from supported document types to extraction schemas.
//!
//! | document type | schema name              | schema id                            |
//! |---------------|--------------------------|--------------------------------------|
//! | invoice       | SAP_invoice_schema       | cf8cc8a9-1eee-42d9-9a3e-507a61baac23 |
//! | paymentAdvice | SAP_paymentAdvice_schema | b7fdcfac-7853-42bb-89d2-ede2ba1ce803 |
//! | purchaseOrder | SAP_purchaseOrder_schema | fbab052e-6f9b-4a5f-b42f-29a8162eb1bf |
//!
//! Custom document types are not supported.

use std::fmt;
use std::str::FromStr;

use crate::error::{DoxError, Result};

/// A predefined extraction schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schema {
    pub name: &'static str,
    pub id: &'static str,
}

/// Document types with a predefined schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentType {
    Invoice,
    PaymentAdvice,
    PurchaseOrder,
}

impl DocumentType {
    pub const ALL: [DocumentType; 3] = [
        DocumentType::Invoice,
        DocumentType::PaymentAdvice,
        DocumentType::PurchaseOrder,
    ];

    /// Spelling used by the service in the `documentType` option.
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::Invoice => "invoice",
            DocumentType::PaymentAdvice => "paymentAdvice",
            DocumentType::PurchaseOrder => "purchaseOrder",
        }
    }

    pub fn schema(&self) -> Schema {
        match self {
            DocumentType::Invoice => Schema {
                name: "SAP_invoice_schema",
                id: "cf8cc8a9-1eee-42d9-9a3e-507a61baac23",
            },
            DocumentType::PaymentAdvice => Schema {
                name: "SAP_paymentAdvice_schema",
                id: "b7fdcfac-7853-42bb-89d2-ede2ba1ce803",
            },
            DocumentType::PurchaseOrder => Schema {
                name: "SAP_purchaseOrder_schema",
                id: "fbab052e-6f9b-4a5f-b42f-29a8162eb1bf",
            },
        }
    }
}

impl FromStr for DocumentType {
    type Err = DoxError;

    fn from_str(s: &str) -> Result<Self> {
        DocumentType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| DoxError::UnsupportedDocumentType(s.to_string()))
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Look up the predefined schema for a document type name (case-insensitive).
pub fn map_type_to_schema(document_type: &str) -> Result<Schema> {
    Ok(document_type.parse::<DocumentType>()?.schema())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_type_to_schema() {
        assert_eq!(
            map_type_to_schema("INVOICE").unwrap(),
            Schema {
                name: "SAP_invoice_schema",
                id: "cf8cc8a9-1eee-42d9-9a3e-507a61baac23",
            }
        );
        assert!(matches!(
            map_type_to_schema("DOES_NOT_EXIST"),
            Err(DoxError::UnsupportedDocumentType(t)) if t == "DOES_NOT_EXIST"
        ));
    }

    #[test]
    fn test_lookup_is_case_insensitive_for_every_type() {
        for (input, expected) in [
            ("invoice", DocumentType::Invoice),
            ("Invoice", DocumentType::Invoice),
            ("paymentAdvice", DocumentType::PaymentAdvice),
            ("PAYMENTADVICE", DocumentType::PaymentAdvice),
            ("paymentadvice", DocumentType::PaymentAdvice),
            ("purchaseOrder", DocumentType::PurchaseOrder),
            ("purchaseorder", DocumentType::PurchaseOrder),
        ] {
            assert_eq!(input.parse::<DocumentType>().unwrap(), expected, "{input}");
        }
    }

    #[test]
    fn test_every_type_has_a_distinct_schema() {
        let ids: Vec<_> = DocumentType::ALL.iter().map(|t| t.schema().id).collect();
        assert_eq!(ids.len(), 3);
        assert_ne!(ids[0], ids[1]);
        assert_ne!(ids[1], ids[2]);
        assert_ne!(ids[0], ids[2]);

        for t in DocumentType::ALL {
            assert_eq!(t.schema().name, format!("SAP_{}_schema", t.as_str()));
        }
    }

    #[test]
    fn test_empty_and_near_miss_types_fail_closed() {
        for input in ["", "invoices", " invoice", "payment_advice"] {
            assert!(input.parse::<DocumentType>().is_err(), "{input:?}");
        }
    }
}
