//! The Payment transaction.

use crate::schema::{Db, PRIMARY};
use crate::txn::{select_customer, CustomerSelector};
use tempo_core::{Date, District, Error, FixedStr, History, Result, Warehouse};

/// Records a payment of `h_amount` by the customer against (w_id, d_id).
///
/// The year-to-date totals of the warehouse and district grow by the
/// amount, the customer's balance field accumulates it (the reference
/// semantics: the field adds the amount paid), bad-credit customers get
/// their data field rewritten, and a history row is appended.
#[allow(clippy::too_many_arguments)]
pub fn payment(
    db: &mut Db,
    datetime: Date,
    w_id: i32,
    d_id: i32,
    c_w_id: i32,
    c_d_id: i32,
    customer: &CustomerSelector,
    h_amount: f64,
) -> Result<()> {
    let wid = db.warehouse.find(
        PRIMARY,
        &Warehouse {
            w_id,
            ..Warehouse::default()
        },
    )?;
    db.warehouse.update(wid, |w| w.w_ytd += h_amount)?;
    let w_name = db
        .warehouse
        .row(wid)
        .map(|w| w.w_name)
        .ok_or_else(|| Error::vacant_slot("Warehouse", wid))?;

    let did = db.district.find(
        PRIMARY,
        &District {
            d_id,
            d_w_id: w_id,
            ..District::default()
        },
    )?;
    db.district.update(did, |d| d.d_ytd += h_amount)?;
    let d_name = db
        .district
        .row(did)
        .map(|d| d.d_name)
        .ok_or_else(|| Error::vacant_slot("District", did))?;

    let cid = select_customer(db, c_w_id, c_d_id, customer)?;
    let (c_id, bad_credit, old_data) = {
        let c = db
            .customer
            .row(cid)
            .ok_or_else(|| Error::vacant_slot("Customer", cid))?;
        (c.c_id, c.c_credit.contains("BC"), c.c_data)
    };

    // Bad-credit customers carry their payment trail in c_data; the new
    // entry is prepended and the whole thing truncates at 500 bytes.
    let new_data: Option<FixedStr<500>> = if bad_credit {
        let composed = format!(
            "{} {} {} {} {} ${:.6} {} | {}",
            c_id, c_d_id, c_w_id, d_id, w_id, h_amount, datetime, old_data
        );
        Some(FixedStr::from(composed.as_str()))
    } else {
        None
    };
    db.customer.update(cid, |c| {
        c.c_balance += h_amount;
        if let Some(data) = new_data {
            c.c_data = data;
        }
    })?;

    let h_data = format!("{:.10}    {:.10}", w_name, d_name);
    db.history.insert(History {
        h_c_id: c_id,
        h_c_d_id: c_d_id,
        h_c_w_id: c_w_id,
        h_d_id: d_id,
        h_w_id: w_id,
        h_date: datetime,
        h_amount,
        h_data: FixedStr::from(h_data.as_str()),
    });

    Ok(())
}
