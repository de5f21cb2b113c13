//! The two fixed read operations run after loading.

use std::fmt;

use log::info;
use mongodb::{
    bson::{doc, Bson, Document},
    sync::{Collection, Database},
};

use crate::conversion::deserialize_number;
use crate::error::{LoadError, Result};
use crate::schema::RecordKind;

pub const BALANCE_FIELD: &str = "c_acctbal";
pub const STATUS_FIELD: &str = "o_orderstatus";
pub const DEFAULT_BALANCE_THRESHOLD: f64 = 5000.0;

/// `{ c_acctbal: { $gt: threshold } }`
pub fn balance_filter(threshold: f64) -> Document {
    doc! { BALANCE_FIELD: { "$gt": threshold } }
}

/// Single `$group` stage counting documents per distinct value of `field`.
pub fn group_count_pipeline(field: &str) -> Vec<Document> {
    let group_key = format!("${field}");
    vec![doc! {
        "$group": {
            "_id": group_key,
            "count": { "$sum": 1 },
        }
    }]
}

/// Every customer whose account balance exceeds `threshold`, in server order.
pub fn customers_above(customers: &Collection<Document>, threshold: f64) -> Result<Vec<Document>> {
    let cursor = customers.find(balance_filter(threshold), None)?;
    let docs = cursor.collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(docs)
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroupCount {
    pub key: Bson,
    pub count: i64,
}

impl GroupCount {
    fn from_document(doc: &Document) -> Result<Self> {
        let count = doc
            .get("count")
            .and_then(deserialize_number::<i64>)
            .ok_or_else(|| LoadError::UnexpectedReply(format!("group without numeric count: {doc}")))?;
        Ok(GroupCount {
            key: doc.get("_id").cloned().unwrap_or(Bson::Null),
            count,
        })
    }
}

impl fmt::Display for GroupCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.key {
            Bson::String(s) => write!(f, "{}: {}", s, self.count),
            other => write!(f, "{}: {}", other, self.count),
        }
    }
}

/// One entry per distinct value of `field`; group order is unspecified.
pub fn count_by(collection: &Collection<Document>, field: &str) -> Result<Vec<GroupCount>> {
    let cursor = collection.aggregate(group_count_pipeline(field), None)?;
    let mut groups = Vec::new();
    for doc in cursor {
        groups.push(GroupCount::from_document(&doc?)?);
    }
    Ok(groups)
}

/// Run both example queries against `db` and print their results.
pub fn run_queries(db: &Database, threshold: f64) -> Result<()> {
    let customers = crate::collection(db, RecordKind::Customer);
    let rich = customers_above(&customers, threshold)?;
    info!("{} customers with {} > {}", rich.len(), BALANCE_FIELD, threshold);
    println!("Customers with acctbal > {threshold}:");
    for doc in &rich {
        println!("{doc}");
    }

    let orders = crate::collection(db, RecordKind::Order);
    let groups = count_by(&orders, STATUS_FIELD)?;
    info!("{} distinct {} values", groups.len(), STATUS_FIELD);
    println!("Order counts by status:");
    for group in &groups {
        println!("{group}");
    }
    Ok(())
}
