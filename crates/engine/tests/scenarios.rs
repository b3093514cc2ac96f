//! End-to-end transaction scenarios over hand-built fixtures.

use tempo_core::{
    Customer, District, FixedStr, Item, NewOrder, Order, OrderLine, Stock, Warehouse,
};
use tempo_engine::schema::{Config, Db, NEW_ORDER_BY_DISTRICT, ORDER_LINE_BY_ORDER, PRIMARY};
use tempo_engine::txn::{
    delivery, new_order, order_status, payment, stock_level, CustomerSelector,
};
use tempo_engine::verify::{verify, Reference};

fn warehouse(w: i32, name: &str, tax: f64) -> Warehouse {
    Warehouse {
        w_id: w,
        w_name: FixedStr::from(name),
        w_tax: tax,
        w_ytd: 0.0,
        ..Warehouse::default()
    }
}

fn district(w: i32, d: i32, name: &str, tax: f64, next_o_id: i32) -> District {
    District {
        d_id: d,
        d_w_id: w,
        d_name: FixedStr::from(name),
        d_tax: tax,
        d_ytd: 0.0,
        d_next_o_id: next_o_id,
        ..District::default()
    }
}

fn customer(w: i32, d: i32, c: i32, first: &str, last: &str, credit: &str) -> Customer {
    Customer {
        c_id: c,
        c_d_id: d,
        c_w_id: w,
        c_first: FixedStr::from(first),
        c_last: FixedStr::from(last),
        c_credit: FixedStr::from(credit),
        c_discount: 0.0,
        c_balance: 0.0,
        c_ytd_payment: 0.0,
        c_payment_cnt: 0,
        c_delivery_cnt: 0,
        c_data: FixedStr::from("initial data"),
        ..Customer::default()
    }
}

fn item(i: i32, price: f64, data: &str) -> Item {
    Item {
        i_id: i,
        i_im_id: i,
        i_name: FixedStr::from("widget"),
        i_price: price,
        i_data: FixedStr::from(data),
    }
}

fn stock(w: i32, i: i32, quantity: i32, data: &str) -> Stock {
    let mut s = Stock {
        s_i_id: i,
        s_w_id: w,
        s_quantity: quantity,
        s_ytd: 0,
        s_order_cnt: 0,
        s_remote_cnt: 0,
        s_data: FixedStr::from(data),
        ..Stock::default()
    };
    for (k, slot) in s.s_dist.iter_mut().enumerate() {
        slot.assign(&format!("dist-{}-{}", k + 1, i));
    }
    s
}

/// One warehouse, one district, one customer, one item: the minimal
/// fixture the literal scenarios build on.
fn tiny_db() -> Db {
    let config = Config {
        warehouses: 1,
        programs: 10,
    };
    let mut db = Db::new(&config);
    db.warehouse.insert(warehouse(1, "Main", 0.0));
    db.district.insert(district(1, 1, "Lake", 0.0, 3001));
    db.customer.insert(customer(1, 1, 1, "Alice", "BARBARBAR", "GC"));
    db.item.insert(item(1, 1.0, "plain goods"));
    db.stock.insert(stock(1, 1, 50, "plain lot"));
    db
}

#[test]
fn new_order_inserts_order_lines_and_decrements_stock() {
    let mut db = tiny_db();
    let result = new_order(&mut db, 99, 1, 1, 1, 1, 1, &[1], &[1], &[5]).unwrap();

    assert!(result.committed);
    assert_eq!(result.o_id, Some(3001));
    assert_eq!(result.prices, vec![1.0]);
    assert_eq!(result.item_names[0], "widget");
    assert_eq!(result.stock_quantities, vec![50]);
    assert_eq!(result.amounts, vec![5.0]);
    assert_eq!(result.brand_generic, vec!['G']);
    assert_eq!(result.remote_lines, 0);

    let did = db
        .district
        .get(PRIMARY, &district(1, 1, "", 0.0, 0))
        .unwrap();
    assert_eq!(db.district.row(did).unwrap().d_next_o_id, 3002);

    let order_probe = Order {
        o_id: 3001,
        o_d_id: 1,
        o_w_id: 1,
        ..Order::default()
    };
    let oid = db.order.get(PRIMARY, &order_probe).unwrap();
    let order = db.order.row(oid).unwrap();
    assert_eq!(order.o_c_id, 1);
    assert_eq!(order.o_entry_d, 99);
    assert_eq!(order.o_carrier_id, -1);
    assert_eq!(order.o_ol_cnt, 1);
    assert_eq!(order.o_all_local, 1);

    let pending_probe = NewOrder {
        no_o_id: 3001,
        no_d_id: 1,
        no_w_id: 1,
        ..NewOrder::default()
    };
    assert!(db.new_order.get(PRIMARY, &pending_probe).is_some());

    let line_probe = OrderLine {
        ol_o_id: 3001,
        ol_d_id: 1,
        ol_w_id: 1,
        ..OrderLine::default()
    };
    let lines = db.order_line.slice(ORDER_LINE_BY_ORDER, &line_probe);
    assert_eq!(lines.len(), 1);
    let line = db.order_line.row(lines[0]).unwrap();
    assert_eq!(line.ol_number, 1);
    assert_eq!(line.ol_quantity, 5);
    assert!((line.ol_amount - 5.0).abs() < 1e-9);
    assert_eq!(line.ol_delivery_d, 0);
    assert_eq!(line.ol_dist_info, "dist-1-1");

    let sid = db.stock.get(PRIMARY, &stock(1, 1, 0, "")).unwrap();
    assert_eq!(db.stock.row(sid).unwrap().s_quantity, 45);
}

#[test]
fn new_order_replenishes_exhausted_stock() {
    let mut db = tiny_db();
    let sid = db.stock.get(PRIMARY, &stock(1, 1, 0, "")).unwrap();
    db.stock.update(sid, |s| s.s_quantity = 5).unwrap();

    new_order(&mut db, 99, 1, 1, 1, 1, 1, &[1], &[1], &[5]).unwrap();
    assert_eq!(db.stock.row(sid).unwrap().s_quantity, 91);
}

#[test]
fn new_order_taxes_and_discount_shape_the_amount() {
    let mut db = tiny_db();
    let wid = db.warehouse.get(PRIMARY, &warehouse(1, "", 0.0)).unwrap();
    db.warehouse.update(wid, |w| w.w_tax = 0.10).unwrap();
    let did = db
        .district
        .get(PRIMARY, &district(1, 1, "", 0.0, 0))
        .unwrap();
    db.district.update(did, |d| d.d_tax = 0.05).unwrap();
    let cid = db
        .customer
        .get(PRIMARY, &customer(1, 1, 1, "", "", ""))
        .unwrap();
    db.customer.update(cid, |c| c.c_discount = 0.20).unwrap();

    let result = new_order(&mut db, 99, 1, 1, 1, 1, 1, &[1], &[1], &[2]).unwrap();
    // 2 * 1.00 * (1 + 0.10 + 0.05) * (1 - 0.20)
    assert!((result.amounts[0] - 1.84).abs() < 1e-9);
}

#[test]
fn new_order_brand_flag_requires_original_on_both_sides() {
    let mut db = tiny_db();
    db.item.insert(item(2, 2.0, "original print"));
    db.stock.insert(stock(1, 2, 40, "original lot"));
    db.item.insert(item(3, 3.0, "original print"));
    db.stock.insert(stock(1, 3, 40, "reprint lot"));

    let result =
        new_order(&mut db, 99, 1, 1, 1, 3, 1, &[1, 2, 3], &[1, 1, 1], &[1, 1, 1]).unwrap();
    assert_eq!(result.brand_generic, vec!['G', 'B', 'G']);
}

#[test]
fn new_order_with_missing_item_leaves_tables_untouched() {
    let mut db = tiny_db();
    let before = Reference::capture(&db);

    let result = new_order(&mut db, 99, 1, 1, 1, 2, 1, &[1, 42], &[1, 1], &[5, 5]).unwrap();
    assert!(!result.committed);
    assert_eq!(result.o_id, None);
    // The item reads that succeeded still produced their outputs.
    assert_eq!(result.prices[0], 1.0);

    assert_eq!(verify(&db, &before), 9, "rollback left every table intact");
}

#[test]
fn new_order_remote_line_clears_all_local_flag() {
    let config = Config {
        warehouses: 2,
        programs: 10,
    };
    let mut db = Db::new(&config);
    db.warehouse.insert(warehouse(1, "Main", 0.0));
    db.warehouse.insert(warehouse(2, "Annex", 0.0));
    db.district.insert(district(1, 1, "Lake", 0.0, 3001));
    db.customer.insert(customer(1, 1, 1, "Alice", "BARBARBAR", "GC"));
    db.item.insert(item(1, 1.0, "plain goods"));
    db.stock.insert(stock(1, 1, 50, "plain lot"));
    db.stock.insert(stock(2, 1, 50, "annex lot"));

    // The generator pre-computes all_local; a remote supplier arrives
    // with the flag already cleared.
    let result = new_order(&mut db, 99, 1, 1, 1, 1, 0, &[1], &[2], &[5]).unwrap();
    assert!(result.committed);
    assert_eq!(result.remote_lines, 1);

    let oid = db
        .order
        .get(
            PRIMARY,
            &Order {
                o_id: 3001,
                o_d_id: 1,
                o_w_id: 1,
                ..Order::default()
            },
        )
        .unwrap();
    assert_eq!(db.order.row(oid).unwrap().o_all_local, 0);

    // The remote stock was the one decremented.
    let sid = db.stock.get(PRIMARY, &stock(2, 1, 0, "")).unwrap();
    assert_eq!(db.stock.row(sid).unwrap().s_quantity, 45);
}

#[test]
fn payment_good_credit_updates_totals_and_appends_history() {
    let mut db = tiny_db();
    payment(&mut db, 77, 1, 1, 1, 1, &CustomerSelector::ById(1), 10.0).unwrap();

    let wid = db.warehouse.get(PRIMARY, &warehouse(1, "", 0.0)).unwrap();
    assert!((db.warehouse.row(wid).unwrap().w_ytd - 10.0).abs() < 1e-9);

    let did = db
        .district
        .get(PRIMARY, &district(1, 1, "", 0.0, 0))
        .unwrap();
    assert!((db.district.row(did).unwrap().d_ytd - 10.0).abs() < 1e-9);

    let cid = db
        .customer
        .get(PRIMARY, &customer(1, 1, 1, "", "", ""))
        .unwrap();
    let c = db.customer.row(cid).unwrap();
    assert!((c.c_balance - 10.0).abs() < 1e-9);
    assert_eq!(c.c_data, "initial data", "good credit leaves c_data alone");

    assert_eq!(db.history.len(), 1);
    let (_, h) = db.history.scan().next().unwrap();
    assert_eq!(h.h_c_id, 1);
    assert_eq!(h.h_date, 77);
    assert!((h.h_amount - 10.0).abs() < 1e-9);
    assert_eq!(h.h_data, "Main    Lake");
}

#[test]
fn payment_bad_credit_rewrites_customer_data() {
    let mut db = tiny_db();
    let cid = db
        .customer
        .get(PRIMARY, &customer(1, 1, 1, "", "", ""))
        .unwrap();
    db.customer
        .update(cid, |c| c.c_credit = FixedStr::from("BC"))
        .unwrap();

    payment(&mut db, 77, 1, 1, 1, 1, &CustomerSelector::ById(1), 10.0).unwrap();

    let c = db.customer.row(cid).unwrap();
    let data = c.c_data.as_str();
    assert!(
        data.starts_with("1 1 1 1 1 $10.000000 77 | "),
        "got {:?}",
        data
    );
    assert!(data.contains("initial data"));
    assert!((c.c_balance - 10.0).abs() < 1e-9);
}

#[test]
fn payment_bad_credit_data_truncates_at_capacity() {
    let mut db = tiny_db();
    let cid = db
        .customer
        .get(PRIMARY, &customer(1, 1, 1, "", "", ""))
        .unwrap();
    db.customer
        .update(cid, |c| c.c_credit = FixedStr::from("BC"))
        .unwrap();

    for _ in 0..40 {
        payment(&mut db, 77, 1, 1, 1, 1, &CustomerSelector::ById(1), 10.0).unwrap();
    }
    let c = db.customer.row(cid).unwrap();
    assert_eq!(c.c_data.len(), 500);
    assert!(c.c_data.as_str().starts_with("1 1 1 1 1 $10.000000 77 | "));
}

#[test]
fn payment_by_name_picks_the_median_customer() {
    let mut db = tiny_db();
    db.customer.insert(customer(1, 1, 2, "bob", "OUGHTABLE", "GC"));
    db.customer.insert(customer(1, 1, 3, "Alice", "OUGHTABLE", "GC"));
    db.customer.insert(customer(1, 1, 4, "Carol", "OUGHTABLE", "GC"));

    payment(
        &mut db,
        77,
        1,
        1,
        1,
        1,
        &CustomerSelector::ByLastName(FixedStr::from("OUGHTABLE")),
        25.0,
    )
    .unwrap();

    // Case-insensitive order is Alice, bob, Carol: the middle is bob.
    let cid = db
        .customer
        .get(PRIMARY, &customer(1, 1, 2, "", "", ""))
        .unwrap();
    assert!((db.customer.row(cid).unwrap().c_balance - 25.0).abs() < 1e-9);
}

#[test]
fn payment_by_name_even_count_picks_lower_median() {
    let mut db = tiny_db();
    db.customer.insert(customer(1, 1, 2, "Dave", "OUGHTABLE", "GC"));
    db.customer.insert(customer(1, 1, 3, "Carol", "OUGHTABLE", "GC"));

    payment(
        &mut db,
        77,
        1,
        1,
        1,
        1,
        &CustomerSelector::ByLastName(FixedStr::from("OUGHTABLE")),
        25.0,
    )
    .unwrap();

    // Sorted: Carol, Dave. Two matches pick the lower one.
    let cid = db
        .customer
        .get(PRIMARY, &customer(1, 1, 3, "", "", ""))
        .unwrap();
    assert!((db.customer.row(cid).unwrap().c_balance - 25.0).abs() < 1e-9);
}

#[test]
fn delivery_completes_the_oldest_pending_order() {
    let mut db = tiny_db();
    new_order(&mut db, 99, 1, 1, 1, 2, 1, &[1, 1], &[1, 1], &[2, 3]).unwrap();
    new_order(&mut db, 100, 1, 1, 1, 1, 1, &[1], &[1], &[4]).unwrap();

    let delivered = delivery(&mut db, 123, 1, 7).unwrap();
    assert_eq!(delivered[0], 3001, "oldest order goes first");
    assert_eq!(&delivered[1..], &[0; 9]);

    let pending_probe = NewOrder {
        no_d_id: 1,
        no_w_id: 1,
        ..NewOrder::default()
    };
    let remaining = db.new_order.get(NEW_ORDER_BY_DISTRICT, &pending_probe);
    assert_eq!(
        db.new_order.row(remaining.unwrap()).unwrap().no_o_id,
        3002,
        "the later order is still pending"
    );

    let oid = db
        .order
        .get(
            PRIMARY,
            &Order {
                o_id: 3001,
                o_d_id: 1,
                o_w_id: 1,
                ..Order::default()
            },
        )
        .unwrap();
    assert_eq!(db.order.row(oid).unwrap().o_carrier_id, 7);

    let line_probe = OrderLine {
        ol_o_id: 3001,
        ol_d_id: 1,
        ol_w_id: 1,
        ..OrderLine::default()
    };
    let mut amount_sum = 0.0;
    for id in db.order_line.slice(ORDER_LINE_BY_ORDER, &line_probe) {
        let line = db.order_line.row(id).unwrap();
        assert_eq!(line.ol_delivery_d, 123);
        amount_sum += line.ol_amount;
    }

    let cid = db
        .customer
        .get(PRIMARY, &customer(1, 1, 1, "", "", ""))
        .unwrap();
    let c = db.customer.row(cid).unwrap();
    assert!((c.c_balance - amount_sum).abs() < 1e-9);
    assert_eq!(c.c_delivery_cnt, 1);
}

#[test]
fn delivery_with_nothing_pending_writes_nothing() {
    let mut db = tiny_db();
    let before = Reference::capture(&db);

    let delivered = delivery(&mut db, 123, 1, 7).unwrap();
    assert_eq!(delivered, [0; 10]);
    assert_eq!(verify(&db, &before), 9);
}

#[test]
fn order_status_by_name_returns_most_recent_order() {
    let mut db = tiny_db();
    db.customer.insert(customer(1, 1, 2, "bea", "BARBARBAR", "GC"));
    db.customer.insert(customer(1, 1, 3, "Zoe", "BARBARBAR", "GC"));

    // Orders for the median customer (Alice, bea, Zoe -> bea, c_id 2).
    for o_id in [10, 30, 20] {
        db.order.insert(Order {
            o_id,
            o_d_id: 1,
            o_w_id: 1,
            o_c_id: 2,
            o_entry_d: o_id as i64,
            o_carrier_id: -1,
            o_ol_cnt: 1,
            o_all_local: 1,
        });
    }
    // A newer order for someone else must not win.
    db.order.insert(Order {
        o_id: 99,
        o_d_id: 1,
        o_w_id: 1,
        o_c_id: 1,
        o_entry_d: 99,
        o_carrier_id: -1,
        o_ol_cnt: 1,
        o_all_local: 1,
    });

    let got = order_status(
        &db,
        1,
        1,
        &CustomerSelector::ByLastName(FixedStr::from("BARBARBAR")),
    )
    .unwrap();
    assert_eq!(got, Some(30));
}

#[test]
fn order_status_by_id_without_orders_is_none() {
    let db = tiny_db();
    let got = order_status(&db, 1, 1, &CustomerSelector::ById(1)).unwrap();
    assert_eq!(got, None);
}

#[test]
fn stock_level_counts_distinct_low_items() {
    let mut db = tiny_db();
    // Twelve distinct items; items 1..=4 are below the threshold.
    for i in 1..=12 {
        if i > 1 {
            db.item.insert(item(i, 1.0, "plain"));
        }
        let quantity = if i <= 4 { 5 } else { 50 };
        if i == 1 {
            let sid = db.stock.get(PRIMARY, &stock(1, 1, 0, "")).unwrap();
            db.stock.update(sid, |s| s.s_quantity = quantity).unwrap();
        } else {
            db.stock.insert(stock(1, i, quantity, "plain"));
        }
    }
    // The last twenty orders reference each item at least once, some
    // repeatedly.
    for o_id in 2981..3001 {
        let i_id = (o_id - 2981) % 12 + 1;
        db.order_line.insert(OrderLine {
            ol_o_id: o_id,
            ol_d_id: 1,
            ol_w_id: 1,
            ol_number: 1,
            ol_i_id: i_id,
            ol_supply_w_id: 1,
            ol_delivery_d: 0,
            ol_quantity: 5,
            ol_amount: 1.0,
            ol_dist_info: FixedStr::from("dist"),
        });
    }

    assert_eq!(stock_level(&db, 1, 1, 10).unwrap(), 4);
    assert_eq!(stock_level(&db, 1, 1, 6).unwrap(), 4);
    assert_eq!(stock_level(&db, 1, 1, 5).unwrap(), 0);
}

#[test]
fn stock_level_scans_only_existing_orders_when_district_is_young() {
    let mut db = tiny_db();
    let did = db
        .district
        .get(PRIMARY, &district(1, 1, "", 0.0, 0))
        .unwrap();
    db.district.update(did, |d| d.d_next_o_id = 3).unwrap();

    let sid = db.stock.get(PRIMARY, &stock(1, 1, 0, "")).unwrap();
    db.stock.update(sid, |s| s.s_quantity = 1).unwrap();
    for o_id in 1..3 {
        db.order_line.insert(OrderLine {
            ol_o_id: o_id,
            ol_d_id: 1,
            ol_w_id: 1,
            ol_number: 1,
            ol_i_id: 1,
            ol_supply_w_id: 1,
            ol_delivery_d: 0,
            ol_quantity: 5,
            ol_amount: 1.0,
            ol_dist_info: FixedStr::from("dist"),
        });
    }

    assert_eq!(stock_level(&db, 1, 1, 10).unwrap(), 1);
}
