use serde::Serialize;

/// The other side of a transaction: a shop, an employer, a friend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CounterPartyTO {
    pub counter_party_key: i64,
    pub customer_key: i64,
    pub name: String,
}
