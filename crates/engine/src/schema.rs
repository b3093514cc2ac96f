//! Table wiring for the nine benchmark tables.
//!
//! Capacities derive from the warehouse and program counts; they are
//! upper bounds, so slabs never need to relocate rows mid-run. Each
//! table carries its primary index (id 0) and, where a transaction needs
//! another access path, one secondary index (id 1).

use tempo_core::{
    Customer, District, History, Item, NewOrder, Order, OrderLine, Stock, Warehouse,
};
use tempo_index::{ArrayIndex, HashIndex, TreeIndex};
use tempo_storage::Table;

/// Id of every table's primary index.
pub const PRIMARY: usize = 0;
/// Customer secondary: hash on (c_w_id, c_d_id, c_last).
pub const CUSTOMER_BY_NAME: usize = 1;
/// Order secondary: tree grouped by (o_d_id, o_w_id, o_c_id), ranked by o_id.
pub const ORDER_BY_CUSTOMER: usize = 1;
/// NewOrder secondary: tree grouped by (no_d_id, no_w_id), ranked by no_o_id.
pub const NEW_ORDER_BY_DISTRICT: usize = 1;
/// OrderLine secondary: hash on (ol_o_id, ol_d_id, ol_w_id).
pub const ORDER_LINE_BY_ORDER: usize = 1;

/// Districts per warehouse, fixed by the benchmark schema.
pub const DISTRICTS_PER_WAREHOUSE: i32 = 10;
/// Customer-id fanout of the dense customer key.
pub const CUSTOMERS_PER_DISTRICT: i32 = 3000;
/// Item-id fanout of the dense item and stock keys.
pub const ITEM_COUNT: i32 = 100_000;

/// Engine sizing parameters.
#[derive(Clone, Debug)]
pub struct Config {
    /// Number of warehouses (the benchmark's scale factor).
    pub warehouses: i32,
    /// Number of program records the dispatcher will run.
    pub programs: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            warehouses: 2,
            programs: 100,
        }
    }
}

fn warehouse_capacity(w: usize) -> usize {
    8 * (w / 8 + 1)
}

fn district_capacity(w: usize) -> usize {
    8 * (w * 10 / 8 + 1)
}

fn customer_capacity(w: usize) -> usize {
    district_capacity(w) * 3000
}

fn order_capacity(w: usize, p: usize) -> usize {
    (customer_capacity(w) as f64 * 1.5 + 0.5 * p as f64) as usize
}

fn new_order_capacity(w: usize, p: usize) -> usize {
    (order_capacity(w, p) as f64 * 0.3 + 0.5 * p as f64) as usize
}

/// The nine tables of one benchmark run.
///
/// The store is exclusively owned by the dispatcher; transactions borrow
/// it mutably one at a time.
pub struct Db {
    pub warehouse: Table<Warehouse>,
    pub district: Table<District>,
    pub customer: Table<Customer>,
    pub item: Table<Item>,
    pub stock: Table<Stock>,
    pub order: Table<Order>,
    pub new_order: Table<NewOrder>,
    pub order_line: Table<OrderLine>,
    pub history: Table<History>,
}

impl Db {
    /// Wires the nine tables with their index plans and capacities.
    pub fn new(config: &Config) -> Self {
        let wn = config.warehouses.max(1) as i64;
        let w = wn as usize;
        let p = config.programs;

        let warehouse = Table::new("Warehouse", warehouse_capacity(w)).with_index(Box::new(
            ArrayIndex::new(w, |r: &Warehouse| (r.w_id as i64 - 1) as usize),
        ));

        let district = Table::new("District", district_capacity(w)).with_index(Box::new(
            ArrayIndex::new(10 * w, move |r: &District| {
                ((r.d_id as i64 - 1) * wn + (r.d_w_id as i64 - 1)) as usize
            }),
        ));

        let customer = Table::new("Customer", customer_capacity(w))
            .with_index(Box::new(ArrayIndex::new(
                3000 * 10 * w,
                move |r: &Customer| {
                    (((r.c_id as i64 - 1) * 10 + (r.c_d_id as i64 - 1)) * wn
                        + (r.c_w_id as i64 - 1)) as usize
                },
            )))
            .with_index(Box::new(HashIndex::non_unique(
                customer_capacity(w),
                |r: &Customer| (r.c_w_id, r.c_d_id, r.c_last),
            )));

        let item = Table::new("Item", ITEM_COUNT as usize).with_index(Box::new(
            ArrayIndex::new(ITEM_COUNT as usize, |r: &Item| (r.i_id as i64 - 1) as usize),
        ));

        let stock = Table::new("Stock", w * ITEM_COUNT as usize).with_index(Box::new(
            ArrayIndex::new(w * ITEM_COUNT as usize, move |r: &Stock| {
                ((r.s_i_id as i64 - 1) * wn + (r.s_w_id as i64 - 1)) as usize
            }),
        ));

        let order = Table::new("Order", order_capacity(w, p))
            .with_index(Box::new(HashIndex::unique(
                order_capacity(w, p),
                |r: &Order| (r.o_id, r.o_d_id, r.o_w_id),
            )))
            .with_index(Box::new(TreeIndex::unique(
                |r: &Order| (r.o_d_id, r.o_w_id, r.o_c_id),
                |r: &Order| r.o_id,
            )));

        let new_order = Table::new("NewOrder", new_order_capacity(w, p))
            .with_index(Box::new(HashIndex::unique(
                new_order_capacity(w, p),
                |r: &NewOrder| (r.no_o_id, r.no_d_id, r.no_w_id),
            )))
            .with_index(Box::new(TreeIndex::non_unique(
                |r: &NewOrder| (r.no_d_id, r.no_w_id),
                |r: &NewOrder| r.no_o_id,
            )));

        let order_line = Table::new("OrderLine", order_capacity(w, p) * 12)
            .with_index(Box::new(HashIndex::unique(
                order_capacity(w, p) * 12,
                |r: &OrderLine| (r.ol_o_id, r.ol_d_id, r.ol_w_id, r.ol_number),
            )))
            .with_index(Box::new(HashIndex::non_unique(
                order_capacity(w, p) * 12,
                |r: &OrderLine| (r.ol_o_id, r.ol_d_id, r.ol_w_id),
            )));

        // History is append-only: its rows are never probed, only
        // iterated at verification time, so it carries no index.
        let history = Table::new("History", order_capacity(w, p));

        Self {
            warehouse,
            district,
            customer,
            item,
            stock,
            order,
            new_order,
            order_line,
            history,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_formulas() {
        assert_eq!(warehouse_capacity(2), 8);
        assert_eq!(warehouse_capacity(8), 16);
        assert_eq!(district_capacity(2), 24);
        assert_eq!(customer_capacity(2), 72000);
        assert_eq!(order_capacity(2, 100), 108050);
        assert_eq!(new_order_capacity(2, 100), 32465);
    }

    #[test]
    fn test_db_wiring() {
        let db = Db::new(&Config::default());
        assert_eq!(db.warehouse.index_count(), 1);
        assert_eq!(db.customer.index_count(), 2);
        assert_eq!(db.order.index_count(), 2);
        assert_eq!(db.new_order.index_count(), 2);
        assert_eq!(db.order_line.index_count(), 2);
        assert_eq!(db.history.index_count(), 0);
        assert!(db.warehouse.is_empty());
    }

    #[test]
    fn test_dense_slots_round_trip() {
        let mut db = Db::new(&Config {
            warehouses: 2,
            programs: 10,
        });

        let mut d = District::default();
        d.d_id = 4;
        d.d_w_id = 2;
        d.d_next_o_id = 1;
        let id = db.district.insert(d);

        let probe = District {
            d_id: 4,
            d_w_id: 2,
            ..District::default()
        };
        assert_eq!(db.district.get(PRIMARY, &probe), Some(id));

        // A sentinel probe misses instead of wrapping around.
        assert_eq!(db.district.get(PRIMARY, &District::default()), None);
    }
}
