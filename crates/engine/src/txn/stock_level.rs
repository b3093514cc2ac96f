//! The StockLevel transaction.

use crate::schema::{Db, ORDER_LINE_BY_ORDER, PRIMARY};
use hashbrown::HashSet;
use tempo_core::{District, Error, OrderLine, Result, Stock};

/// Counts the distinct items referenced by the district's last twenty
/// orders whose stock has fallen below the threshold. Read-only.
pub fn stock_level(db: &Db, w_id: i32, d_id: i32, threshold: i32) -> Result<usize> {
    let did = db.district.find(
        PRIMARY,
        &District {
            d_id,
            d_w_id: w_id,
            ..District::default()
        },
    )?;
    let next_o_id = db
        .district
        .row(did)
        .map(|d| d.d_next_o_id)
        .ok_or_else(|| Error::vacant_slot("District", did))?;

    let mut low_items: HashSet<i32> = HashSet::new();
    for o_id in (next_o_id - 20).max(1)..next_o_id {
        let probe = OrderLine {
            ol_o_id: o_id,
            ol_d_id: d_id,
            ol_w_id: w_id,
            ..OrderLine::default()
        };
        for line in db.order_line.slice(ORDER_LINE_BY_ORDER, &probe) {
            let Some(ol) = db.order_line.row(line) else {
                continue;
            };
            let i_id = ol.ol_i_id;
            let stock_probe = Stock {
                s_i_id: i_id,
                s_w_id: w_id,
                ..Stock::default()
            };
            if let Some(sid) = db.stock.get(PRIMARY, &stock_probe) {
                if db.stock.row(sid).is_some_and(|s| s.s_quantity < threshold) {
                    low_items.insert(i_id);
                }
            }
        }
    }
    Ok(low_items.len())
}
