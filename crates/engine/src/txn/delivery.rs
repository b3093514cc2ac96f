//! The Delivery transaction.

use crate::schema::{
    Db, DISTRICTS_PER_WAREHOUSE, NEW_ORDER_BY_DISTRICT, ORDER_LINE_BY_ORDER, PRIMARY,
};
use tempo_core::{Customer, Date, Error, NewOrder, Order, OrderLine, Result};

/// Delivers the oldest pending order of every district in the warehouse.
///
/// Returns one slot per district: the delivered o_id, or 0 when the
/// district had nothing pending (in which case nothing is written for
/// that district).
pub fn delivery(db: &mut Db, datetime: Date, w_id: i32, carrier_id: i32) -> Result<[i32; 10]> {
    let mut delivered = [0i32; 10];
    for d_id in 1..=DISTRICTS_PER_WAREHOUSE {
        let probe = NewOrder {
            no_d_id: d_id,
            no_w_id: w_id,
            ..NewOrder::default()
        };
        // The ordered index yields the district's smallest pending o_id.
        let Some(pending_id) = db.new_order.get(NEW_ORDER_BY_DISTRICT, &probe) else {
            continue;
        };
        let pending = db.new_order.delete(pending_id)?;
        let o_id = pending.no_o_id;
        delivered[(d_id - 1) as usize] = o_id;

        let oid = db.order.find(
            PRIMARY,
            &Order {
                o_id,
                o_d_id: d_id,
                o_w_id: w_id,
                ..Order::default()
            },
        )?;
        let o_c_id = db
            .order
            .row(oid)
            .map(|o| o.o_c_id)
            .ok_or_else(|| Error::vacant_slot("Order", oid))?;
        db.order.update(oid, |o| o.o_carrier_id = carrier_id)?;

        let mut amount_sum = 0.0;
        let line_probe = OrderLine {
            ol_o_id: o_id,
            ol_d_id: d_id,
            ol_w_id: w_id,
            ..OrderLine::default()
        };
        for line in db.order_line.slice(ORDER_LINE_BY_ORDER, &line_probe) {
            db.order_line.update(line, |ol| {
                ol.ol_delivery_d = datetime;
                amount_sum += ol.ol_amount;
            })?;
        }

        let cid = db.customer.find(
            PRIMARY,
            &Customer {
                c_id: o_c_id,
                c_d_id: d_id,
                c_w_id: w_id,
                ..Customer::default()
            },
        )?;
        db.customer.update(cid, |c| {
            c.c_balance += amount_sum;
            c.c_delivery_cnt += 1;
        })?;
    }
    Ok(delivered)
}
