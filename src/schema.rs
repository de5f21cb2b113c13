//! Positional schemas of the TPC-H record kinds.

use std::fmt;

/// How a single delimited column is coerced into a BSON value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// Verbatim text.
    String,
    /// 32 bit signed integer.
    Integer,
    /// Double precision float.
    Decimal,
    /// Calendar day in `yyyy-MM-dd` form.
    Date,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub dtype: FieldType,
}

const fn field(name: &'static str, dtype: FieldType) -> Field {
    Field { name, dtype }
}

/// Ordered column list; the position of a field is its source column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schema {
    fields: &'static [Field],
}

impl Schema {
    pub fn fields(&self) -> &'static [Field] {
        self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static Field> {
        self.fields.iter()
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }
}

static CUSTOMER: [Field; 8] = [
    field("c_custkey", FieldType::Integer),
    field("c_name", FieldType::String),
    field("c_address", FieldType::String),
    field("c_nationkey", FieldType::Integer),
    field("c_phone", FieldType::String),
    field("c_acctbal", FieldType::Decimal),
    field("c_mktsegment", FieldType::String),
    field("c_comment", FieldType::String),
];

static ORDER: [Field; 9] = [
    field("o_orderkey", FieldType::Integer),
    field("o_custkey", FieldType::Integer),
    field("o_orderstatus", FieldType::String),
    field("o_totalprice", FieldType::Decimal),
    field("o_orderdate", FieldType::Date),
    field("o_orderpriority", FieldType::String),
    field("o_clerk", FieldType::String),
    field("o_shippriority", FieldType::Integer),
    field("o_comment", FieldType::String),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Customer,
    Order,
}

impl RecordKind {
    pub fn schema(self) -> Schema {
        match self {
            RecordKind::Customer => Schema { fields: &CUSTOMER },
            RecordKind::Order => Schema { fields: &ORDER },
        }
    }

    /// Conventional collection name for this kind.
    pub fn collection_name(self) -> &'static str {
        match self {
            RecordKind::Customer => "customer",
            RecordKind::Order => "orders",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RecordKind::Customer => "Customer",
            RecordKind::Order => "Orders",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.collection_name())
    }
}
