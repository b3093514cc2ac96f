//! The NewOrder transaction.

use crate::schema::{Db, PRIMARY};
use tempo_core::{
    Customer, Date, District, Error, FixedStr, Item, NewOrder, Order, OrderLine, Result, Stock,
    Warehouse, DATE_UNSET,
};

/// Per-line outputs plus the commit flag.
///
/// On a rollback (`committed == false`) the item reads still ran and
/// filled the per-line slots for the items that existed; nothing was
/// written to any table.
#[derive(Clone, Debug)]
pub struct NewOrderResult {
    pub committed: bool,
    /// The order id assigned on commit.
    pub o_id: Option<i32>,
    pub prices: Vec<f64>,
    pub item_names: Vec<FixedStr<24>>,
    pub stock_quantities: Vec<i32>,
    /// 'B' when both the item and the stock carry "original" data,
    /// else 'G'.
    pub brand_generic: Vec<char>,
    pub amounts: Vec<f64>,
    /// Lines supplied by a warehouse other than the ordering one.
    pub remote_lines: i32,
}

impl NewOrderResult {
    fn sized_for(lines: usize) -> Self {
        Self {
            committed: true,
            o_id: None,
            prices: vec![0.0; lines],
            item_names: vec![FixedStr::new(); lines],
            stock_quantities: vec![0; lines],
            brand_generic: vec!['G'; lines],
            amounts: vec![0.0; lines],
            remote_lines: 0,
        }
    }
}

/// Enters one order with `ol_cnt` lines for customer (w_id, d_id, c_id).
///
/// If any item lookup fails the transaction aborts: the remaining item
/// reads still complete (they have no side effects), and the write phase
/// never runs.
#[allow(clippy::too_many_arguments)]
pub fn new_order(
    db: &mut Db,
    datetime: Date,
    w_id: i32,
    d_id: i32,
    c_id: i32,
    ol_cnt: i32,
    all_local: i32,
    item_ids: &[i32],
    supply_w_ids: &[i32],
    quantities: &[i32],
) -> Result<NewOrderResult> {
    let lines = ol_cnt as usize;
    if item_ids.len() < lines || supply_w_ids.len() < lines || quantities.len() < lines {
        return Err(Error::invalid_program("order line arrays shorter than ol_cnt"));
    }

    let mut result = NewOrderResult::sized_for(lines);
    let mut item_data: Vec<FixedStr<50>> = vec![FixedStr::new(); lines];

    // Read phase: all item lookups run before any write, so a missing
    // item aborts with no mutations to undo.
    for i in 0..lines {
        let probe = Item {
            i_id: item_ids[i],
            ..Item::default()
        };
        match db.item.get(PRIMARY, &probe) {
            None => result.committed = false,
            Some(id) => {
                if let Some(item) = db.item.row(id) {
                    result.item_names[i] = item.i_name;
                    result.prices[i] = item.i_price;
                    item_data[i] = item.i_data;
                }
            }
        }
    }
    if !result.committed {
        return Ok(result);
    }

    let cid = db.customer.find(
        PRIMARY,
        &Customer {
            c_id,
            c_d_id: d_id,
            c_w_id: w_id,
            ..Customer::default()
        },
    )?;
    let c_discount = db
        .customer
        .row(cid)
        .map(|c| c.c_discount)
        .ok_or_else(|| Error::vacant_slot("Customer", cid))?;

    let wid = db.warehouse.find(
        PRIMARY,
        &Warehouse {
            w_id,
            ..Warehouse::default()
        },
    )?;
    let w_tax = db
        .warehouse
        .row(wid)
        .map(|w| w.w_tax)
        .ok_or_else(|| Error::vacant_slot("Warehouse", wid))?;

    let did = db.district.find(
        PRIMARY,
        &District {
            d_id,
            d_w_id: w_id,
            ..District::default()
        },
    )?;
    let (d_tax, o_id) = db
        .district
        .row(did)
        .map(|d| (d.d_tax, d.d_next_o_id))
        .ok_or_else(|| Error::vacant_slot("District", did))?;
    db.district.update(did, |d| d.d_next_o_id += 1)?;

    db.order.insert(Order {
        o_id,
        o_d_id: d_id,
        o_w_id: w_id,
        o_c_id: c_id,
        o_entry_d: datetime,
        o_carrier_id: -1,
        o_ol_cnt: ol_cnt,
        o_all_local: (all_local > 0) as i32,
    });
    db.new_order.insert(NewOrder {
        no_o_id: o_id,
        no_d_id: d_id,
        no_w_id: w_id,
    });
    result.o_id = Some(o_id);

    for i in 0..lines {
        let quantity = quantities[i];
        let sid = db.stock.find(
            PRIMARY,
            &Stock {
                s_i_id: item_ids[i],
                s_w_id: supply_w_ids[i],
                ..Stock::default()
            },
        )?;
        let (pre_quantity, dist_info, stock_original) = {
            let stock = db
                .stock
                .row(sid)
                .ok_or_else(|| Error::vacant_slot("Stock", sid))?;
            (
                stock.s_quantity,
                *stock.dist_info(d_id),
                stock.s_data.contains("original"),
            )
        };
        result.stock_quantities[i] = pre_quantity;
        if item_data[i].contains("original") && stock_original {
            result.brand_generic[i] = 'B';
        }
        db.stock.update(sid, |s| {
            s.s_quantity = pre_quantity - quantity;
            if pre_quantity <= quantity {
                s.s_quantity += 91;
            }
        })?;
        if supply_w_ids[i] != w_id {
            result.remote_lines += 1;
        }

        let ol_amount =
            quantity as f64 * result.prices[i] * (1.0 + w_tax + d_tax) * (1.0 - c_discount);
        result.amounts[i] = ol_amount;
        db.order_line.insert(OrderLine {
            ol_o_id: o_id,
            ol_d_id: d_id,
            ol_w_id: w_id,
            ol_number: (i + 1) as i32,
            ol_i_id: item_ids[i],
            ol_supply_w_id: supply_w_ids[i],
            ol_delivery_d: DATE_UNSET,
            ol_quantity: quantity,
            ol_amount,
            ol_dist_info: dist_info,
        });
    }

    Ok(result)
}
