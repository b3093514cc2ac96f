//! Verification against reference snapshots.
//!
//! A run can be checked against per-table reference contents captured
//! from a known-good execution. Comparison goes through each table's
//! primary index and the records' tolerance-aware equality; the
//! index-less history table is compared as a multiset. One line per
//! matching table is printed, nothing for a mismatch, and verification
//! never mutates the store, so re-running it yields the same result.

use crate::schema::{Db, PRIMARY};
use tempo_core::{
    Customer, District, History, Item, NewOrder, Order, OrderLine, Stock, Warehouse,
};
use tempo_storage::Table;

/// Reference contents for the nine tables.
#[derive(Default)]
pub struct Reference {
    pub warehouse: Vec<Warehouse>,
    pub district: Vec<District>,
    pub customer: Vec<Customer>,
    pub order: Vec<Order>,
    pub order_line: Vec<OrderLine>,
    pub new_order: Vec<NewOrder>,
    pub item: Vec<Item>,
    pub stock: Vec<Stock>,
    pub history: Vec<History>,
}

impl Reference {
    /// Captures the current contents of a database as a reference.
    pub fn capture(db: &Db) -> Self {
        Self {
            warehouse: db.warehouse.scan().map(|(_, r)| r.clone()).collect(),
            district: db.district.scan().map(|(_, r)| r.clone()).collect(),
            customer: db.customer.scan().map(|(_, r)| r.clone()).collect(),
            order: db.order.scan().map(|(_, r)| r.clone()).collect(),
            order_line: db.order_line.scan().map(|(_, r)| r.clone()).collect(),
            new_order: db.new_order.scan().map(|(_, r)| r.clone()).collect(),
            item: db.item.scan().map(|(_, r)| r.clone()).collect(),
            stock: db.stock.scan().map(|(_, r)| r.clone()).collect(),
            history: db.history.scan().map(|(_, r)| r.clone()).collect(),
        }
    }
}

/// Compares a table against reference rows.
///
/// Keyed tables probe their primary index with each reference row; the
/// index-less history table falls back to greedy multiset matching.
fn table_matches<R: Clone>(table: &Table<R>, reference: &[R], eq: fn(&R, &R) -> bool) -> bool {
    if table.len() != reference.len() {
        return false;
    }
    if table.index_count() == 0 {
        let mut used = vec![false; reference.len()];
        for (_, row) in table.scan() {
            let matched = reference
                .iter()
                .enumerate()
                .position(|(i, candidate)| !used[i] && eq(row, candidate));
            match matched {
                Some(i) => used[i] = true,
                None => return false,
            }
        }
        return true;
    }
    reference.iter().all(|candidate| {
        table
            .slice(PRIMARY, candidate)
            .iter()
            .any(|&id| table.row(id).map_or(false, |row| eq(row, candidate)))
    })
}

/// Verifies every table against the reference, printing one line per
/// table whose contents match. Returns the number of matching tables.
pub fn verify(db: &Db, reference: &Reference) -> usize {
    let mut correct = 0;
    let mut check = |ok: bool, name: &str| {
        if ok {
            println!("{} results are correct", name);
            correct += 1;
        }
    };

    check(
        table_matches(&db.warehouse, &reference.warehouse, Warehouse::approx_eq),
        db.warehouse.name(),
    );
    check(
        table_matches(&db.district, &reference.district, District::approx_eq),
        db.district.name(),
    );
    check(
        table_matches(&db.customer, &reference.customer, Customer::approx_eq),
        db.customer.name(),
    );
    check(
        table_matches(&db.order, &reference.order, Order::approx_eq),
        db.order.name(),
    );
    check(
        table_matches(&db.order_line, &reference.order_line, OrderLine::approx_eq),
        db.order_line.name(),
    );
    check(
        table_matches(&db.new_order, &reference.new_order, NewOrder::approx_eq),
        db.new_order.name(),
    );
    check(
        table_matches(&db.item, &reference.item, Item::approx_eq),
        db.item.name(),
    );
    check(
        table_matches(&db.stock, &reference.stock, Stock::approx_eq),
        db.stock.name(),
    );
    check(
        table_matches(&db.history, &reference.history, History::approx_eq),
        db.history.name(),
    );
    correct
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Config;
    use crate::workload::{Loader, SeedLoader};

    fn seeded_db() -> Db {
        let config = Config {
            warehouses: 1,
            programs: 10,
        };
        let mut db = Db::new(&config);
        SeedLoader::sample(&config).load(&mut db).unwrap();
        db
    }

    #[test]
    fn test_captured_reference_matches_itself() {
        let db = seeded_db();
        let reference = Reference::capture(&db);
        assert_eq!(verify(&db, &reference), 9);
    }

    #[test]
    fn test_verification_is_idempotent() {
        let db = seeded_db();
        let reference = Reference::capture(&db);
        assert_eq!(verify(&db, &reference), verify(&db, &reference));
    }

    #[test]
    fn test_mutation_fails_exactly_that_table() {
        let mut db = seeded_db();
        let reference = Reference::capture(&db);

        let probe = tempo_core::Warehouse {
            w_id: 1,
            ..tempo_core::Warehouse::default()
        };
        let id = db.warehouse.get(PRIMARY, &probe).unwrap();
        db.warehouse.update(id, |w| w.w_ytd += 100.0).unwrap();

        assert_eq!(verify(&db, &reference), 8);
    }

    #[test]
    fn test_tolerance_absorbs_rounding() {
        let mut db = seeded_db();
        let reference = Reference::capture(&db);

        let probe = tempo_core::Warehouse {
            w_id: 1,
            ..tempo_core::Warehouse::default()
        };
        let id = db.warehouse.get(PRIMARY, &probe).unwrap();
        db.warehouse.update(id, |w| w.w_ytd += 0.005).unwrap();

        assert_eq!(verify(&db, &reference), 9);
    }

    #[test]
    fn test_history_multiset_comparison() {
        let mut db = seeded_db();
        let mut reference = Reference::capture(&db);

        // Row order differs between capture and table scan order.
        reference.history.reverse();
        assert_eq!(verify(&db, &reference), 9);

        db.history.insert(tempo_core::History {
            h_amount: 1.0,
            ..tempo_core::History::default()
        });
        assert_eq!(verify(&db, &reference), 8);
    }
}
