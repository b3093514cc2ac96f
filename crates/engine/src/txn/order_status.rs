//! The OrderStatus transaction.

use crate::schema::{Db, ORDER_BY_CUSTOMER};
use crate::txn::{select_customer, CustomerSelector};
use tempo_core::{Error, Order, Result};

/// Reports the most recent order of the selected customer.
///
/// The customer's orders are walked through the ordered (district,
/// warehouse, customer) index in ascending o_id order, keeping the
/// highest. Read-only.
pub fn order_status(
    db: &Db,
    w_id: i32,
    d_id: i32,
    customer: &CustomerSelector,
) -> Result<Option<i32>> {
    let cid = select_customer(db, w_id, d_id, customer)?;
    let c_id = db
        .customer
        .row(cid)
        .map(|c| c.c_id)
        .ok_or_else(|| Error::vacant_slot("Customer", cid))?;

    let probe = Order {
        o_d_id: d_id,
        o_w_id: w_id,
        o_c_id: c_id,
        ..Order::default()
    };
    let orders = db.order.slice(ORDER_BY_CUSTOMER, &probe);
    Ok(orders
        .last()
        .and_then(|&id| db.order.row(id))
        .map(|o| o.o_id))
}
