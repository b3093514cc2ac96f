//! Program records, the dispatch loop, and the loader surface.
//!
//! The engine consumes a pre-generated sequence of tagged program
//! records; all inputs were chosen ahead of time by the workload
//! generator. The dispatcher walks the sequence in order and invokes the
//! matching procedure. Loaders populate the initial table contents and
//! supply the program list; file-based fixture loaders live outside the
//! engine behind the [`Loader`] trait, with [`SeedLoader`] as the
//! built-in deterministic stand-in.

use crate::schema::{Config, Db, CUSTOMERS_PER_DISTRICT, DISTRICTS_PER_WAREHOUSE, ITEM_COUNT};
use crate::txn::{delivery, new_order, order_status, payment, stock_level, CustomerSelector};
use crate::verify::Reference;
use tempo_core::{
    Customer, Date, District, Error, FixedStr, History, Item, NewOrder, Order, OrderLine, Result,
    Stock, Warehouse,
};
use tracing::debug;

/// A pre-generated program invocation.
#[derive(Clone, Debug)]
pub enum Program {
    NewOrder {
        datetime: Date,
        w_id: i32,
        d_id: i32,
        c_id: i32,
        ol_cnt: i32,
        all_local: i32,
        item_ids: Vec<i32>,
        supply_w_ids: Vec<i32>,
        quantities: Vec<i32>,
    },
    PaymentById {
        datetime: Date,
        w_id: i32,
        d_id: i32,
        c_w_id: i32,
        c_d_id: i32,
        c_id: i32,
        h_amount: f64,
    },
    PaymentByName {
        datetime: Date,
        w_id: i32,
        d_id: i32,
        c_w_id: i32,
        c_d_id: i32,
        c_last: FixedStr<16>,
        h_amount: f64,
    },
    OrderStatusById {
        w_id: i32,
        d_id: i32,
        c_id: i32,
    },
    OrderStatusByName {
        w_id: i32,
        d_id: i32,
        c_last: FixedStr<16>,
    },
    Delivery {
        datetime: Date,
        w_id: i32,
        carrier_id: i32,
    },
    StockLevel {
        w_id: i32,
        d_id: i32,
        threshold: i32,
    },
}

/// Counters accumulated by a dispatch run.
#[derive(Clone, Copy, Debug, Default)]
pub struct RunStats {
    pub executed: usize,
    /// NewOrder invocations that aborted on a missing item.
    pub rolled_back: usize,
}

/// Executes one program record.
pub fn run_program(db: &mut Db, program: &Program, stats: &mut RunStats) -> Result<()> {
    match program {
        Program::NewOrder {
            datetime,
            w_id,
            d_id,
            c_id,
            ol_cnt,
            all_local,
            item_ids,
            supply_w_ids,
            quantities,
        } => {
            let result = new_order(
                db, *datetime, *w_id, *d_id, *c_id, *ol_cnt, *all_local, item_ids, supply_w_ids,
                quantities,
            )?;
            if !result.committed {
                debug!(w_id, d_id, c_id, "new order rolled back on missing item");
                stats.rolled_back += 1;
            }
        }
        Program::PaymentById {
            datetime,
            w_id,
            d_id,
            c_w_id,
            c_d_id,
            c_id,
            h_amount,
        } => {
            payment(
                db,
                *datetime,
                *w_id,
                *d_id,
                *c_w_id,
                *c_d_id,
                &CustomerSelector::ById(*c_id),
                *h_amount,
            )?;
        }
        Program::PaymentByName {
            datetime,
            w_id,
            d_id,
            c_w_id,
            c_d_id,
            c_last,
            h_amount,
        } => {
            payment(
                db,
                *datetime,
                *w_id,
                *d_id,
                *c_w_id,
                *c_d_id,
                &CustomerSelector::ByLastName(*c_last),
                *h_amount,
            )?;
        }
        Program::OrderStatusById { w_id, d_id, c_id } => {
            order_status(db, *w_id, *d_id, &CustomerSelector::ById(*c_id))?;
        }
        Program::OrderStatusByName { w_id, d_id, c_last } => {
            order_status(db, *w_id, *d_id, &CustomerSelector::ByLastName(*c_last))?;
        }
        Program::Delivery {
            datetime,
            w_id,
            carrier_id,
        } => {
            delivery(db, *datetime, *w_id, *carrier_id)?;
        }
        Program::StockLevel {
            w_id,
            d_id,
            threshold,
        } => {
            stock_level(db, *w_id, *d_id, *threshold)?;
        }
    }
    stats.executed += 1;
    Ok(())
}

/// Executes a program sequence in list order.
pub fn run_workload(db: &mut Db, programs: &[Program]) -> Result<RunStats> {
    let mut stats = RunStats::default();
    for program in programs {
        run_program(db, program, &mut stats)?;
    }
    Ok(stats)
}

/// Source of initial table contents, the program list, and optionally
/// the reference snapshots verification compares against.
pub trait Loader {
    /// Populates the nine tables.
    fn load(&mut self, db: &mut Db) -> Result<()>;

    /// Produces the pre-generated program sequence.
    fn programs(&mut self) -> Result<Vec<Program>>;

    /// Reference snapshots for verification, when the fixture set
    /// carries them.
    fn reference(&mut self) -> Result<Option<Reference>> {
        Ok(None)
    }
}

/// Composes a benchmark last name from its customer number, three
/// syllables per the classic scheme. Seeded customers share last names,
/// which is what exercises the by-name median selection.
pub fn last_name(num: i32) -> FixedStr<16> {
    const SYLLABLES: [&str; 10] = [
        "BAR", "OUGHT", "ABLE", "PRI", "PRES", "ESE", "ANTI", "CALLY", "ATION", "EING",
    ];
    let num = num.rem_euclid(1000);
    let mut name = String::new();
    name.push_str(SYLLABLES[(num / 100) as usize]);
    name.push_str(SYLLABLES[(num / 10 % 10) as usize]);
    name.push_str(SYLLABLES[(num % 10) as usize]);
    FixedStr::from(name.as_str())
}

/// Deterministic in-process loader.
///
/// Stands in for the external fixture loaders and workload generator:
/// every value comes from a fixed formula, so two runs over the same
/// config produce identical table contents and program lists.
pub struct SeedLoader {
    warehouses: i32,
    programs: usize,
    customers_per_district: i32,
    orders_per_district: i32,
    items: i32,
}

impl SeedLoader {
    /// Full benchmark shape: 3000 customers and orders per district,
    /// 100000 items.
    pub fn new(config: &Config) -> Self {
        Self {
            warehouses: config.warehouses.max(1),
            programs: config.programs,
            customers_per_district: CUSTOMERS_PER_DISTRICT,
            orders_per_district: CUSTOMERS_PER_DISTRICT,
            items: ITEM_COUNT,
        }
    }

    /// Scaled-down shape for tests and benches: 30 customers and orders
    /// per district, 200 items.
    pub fn sample(config: &Config) -> Self {
        Self {
            warehouses: config.warehouses.max(1),
            programs: config.programs,
            customers_per_district: 30,
            orders_per_district: 30,
            items: 200,
        }
    }

    fn order_line_count(o_id: i32) -> i32 {
        5 + o_id % 11
    }

    fn item_for_line(&self, o_id: i32, number: i32) -> i32 {
        (o_id * 31 + number * 17).rem_euclid(self.items) + 1
    }
}

impl Loader for SeedLoader {
    fn load(&mut self, db: &mut Db) -> Result<()> {
        // Loading twice would clobber the dense primary indexes.
        if !db.warehouse.is_empty() {
            return Err(Error::load_failed("database is already populated"));
        }
        for i in 1..=self.items {
            let mut data = FixedStr::new();
            if i % 7 == 0 {
                data.assign(&format!("original-batch-{}", i));
            } else {
                data.assign(&format!("batch-{}", i));
            }
            db.item.insert(Item {
                i_id: i,
                i_im_id: (i * 13).rem_euclid(10_000) + 1,
                i_name: FixedStr::from(format!("item-{}", i).as_str()),
                i_price: ((i * 100).rem_euclid(9_999) + 1) as f64 / 100.0,
                i_data: data,
            });
        }

        for w in 1..=self.warehouses {
            db.warehouse.insert(Warehouse {
                w_id: w,
                w_name: FixedStr::from(format!("WARE{}", w).as_str()),
                w_street_1: FixedStr::from("1 Depot Way"),
                w_street_2: FixedStr::from("Bay 9"),
                w_city: FixedStr::from("Springfield"),
                w_state: FixedStr::from("OR"),
                w_zip: FixedStr::from("970010000"),
                w_tax: (w % 5) as f64 / 100.0,
                w_ytd: 300_000.0,
            });

            for i in 1..=self.items {
                let mut data = FixedStr::new();
                if i % 13 == 0 {
                    data.assign(&format!("original-lot-{}-{}", w, i));
                } else {
                    data.assign(&format!("lot-{}-{}", w, i));
                }
                let mut s_dist = [FixedStr::new(); 10];
                for (k, slot) in s_dist.iter_mut().enumerate() {
                    slot.assign(&format!("dist-{}-{}-{}", w, k + 1, i));
                }
                db.stock.insert(Stock {
                    s_i_id: i,
                    s_w_id: w,
                    s_quantity: 10 + (i + w).rem_euclid(91),
                    s_dist,
                    s_ytd: 0,
                    s_order_cnt: 0,
                    s_remote_cnt: 0,
                    s_data: data,
                });
            }

            for d in 1..=DISTRICTS_PER_WAREHOUSE {
                db.district.insert(District {
                    d_id: d,
                    d_w_id: w,
                    d_name: FixedStr::from(format!("DIST{}", d).as_str()),
                    d_street_1: FixedStr::from("12 Market St"),
                    d_street_2: FixedStr::new(),
                    d_city: FixedStr::from("Springfield"),
                    d_state: FixedStr::from("OR"),
                    d_zip: FixedStr::from("970010000"),
                    d_tax: (d % 5) as f64 / 100.0,
                    d_ytd: 30_000.0,
                    d_next_o_id: self.orders_per_district + 1,
                });

                for c in 1..=self.customers_per_district {
                    let credit = if c % 10 == 0 { "BC" } else { "GC" };
                    db.customer.insert(Customer {
                        c_id: c,
                        c_d_id: d,
                        c_w_id: w,
                        c_first: FixedStr::from(format!("first-{}", c).as_str()),
                        c_middle: FixedStr::from("OE"),
                        c_last: last_name(c - 1),
                        c_street_1: FixedStr::from("7 Elm St"),
                        c_street_2: FixedStr::new(),
                        c_city: FixedStr::from("Springfield"),
                        c_state: FixedStr::from("OR"),
                        c_zip: FixedStr::from("970010000"),
                        c_phone: FixedStr::from("555-0100"),
                        c_since: 0,
                        c_credit: FixedStr::from(credit),
                        c_credit_lim: 50_000.0,
                        c_discount: (c % 50) as f64 / 100.0,
                        c_balance: -10.0,
                        c_ytd_payment: 10.0,
                        c_payment_cnt: 1,
                        c_delivery_cnt: 0,
                        c_data: FixedStr::from("seed customer"),
                    });
                    db.history.insert(History {
                        h_c_id: c,
                        h_c_d_id: d,
                        h_c_w_id: w,
                        h_d_id: d,
                        h_w_id: w,
                        h_date: 0,
                        h_amount: 10.0,
                        h_data: FixedStr::from("seed payment"),
                    });
                }

                // The most recent 30% of each district's orders are
                // still pending delivery.
                let pending_from =
                    self.orders_per_district - self.orders_per_district * 3 / 10 + 1;
                for o_id in 1..=self.orders_per_district {
                    let pending = o_id >= pending_from;
                    let ol_cnt = Self::order_line_count(o_id);
                    db.order.insert(Order {
                        o_id,
                        o_d_id: d,
                        o_w_id: w,
                        o_c_id: (o_id * 17).rem_euclid(self.customers_per_district) + 1,
                        o_entry_d: o_id as Date,
                        o_carrier_id: if pending { -1 } else { o_id % 10 + 1 },
                        o_ol_cnt: ol_cnt,
                        o_all_local: 1,
                    });
                    if pending {
                        db.new_order.insert(NewOrder {
                            no_o_id: o_id,
                            no_d_id: d,
                            no_w_id: w,
                        });
                    }
                    for number in 1..=ol_cnt {
                        db.order_line.insert(OrderLine {
                            ol_o_id: o_id,
                            ol_d_id: d,
                            ol_w_id: w,
                            ol_number: number,
                            ol_i_id: self.item_for_line(o_id, number),
                            ol_supply_w_id: w,
                            ol_delivery_d: if pending { 0 } else { o_id as Date },
                            ol_quantity: 5,
                            ol_amount: if pending {
                                ((o_id * number).rem_euclid(9_999) + 1) as f64 / 100.0
                            } else {
                                0.0
                            },
                            ol_dist_info: FixedStr::from(
                                format!("dist-{}-{}-{}", w, d, o_id).as_str(),
                            ),
                        });
                    }
                }
            }
        }
        Ok(())
    }

    fn programs(&mut self) -> Result<Vec<Program>> {
        let mut programs = Vec::with_capacity(self.programs);
        for i in 0..self.programs as i32 {
            let w_id = i.rem_euclid(self.warehouses) + 1;
            let d_id = i.rem_euclid(DISTRICTS_PER_WAREHOUSE) + 1;
            let c_id = (i * 17).rem_euclid(self.customers_per_district) + 1;
            let datetime = (1_000_000 + i) as Date;
            let mix = i.rem_euclid(100);
            let program = if mix < 45 {
                let ol_cnt = 5 + i.rem_euclid(11);
                let mut item_ids: Vec<i32> = (0..ol_cnt)
                    .map(|j| (i * 31 + j * 17).rem_euclid(self.items) + 1)
                    .collect();
                // A sprinkle of invalid items exercises the rollback
                // path the way generated workloads do.
                if i % 50 == 17 {
                    item_ids[ol_cnt as usize - 1] = -1;
                }
                Program::NewOrder {
                    datetime,
                    w_id,
                    d_id,
                    c_id,
                    ol_cnt,
                    all_local: 1,
                    item_ids,
                    supply_w_ids: vec![w_id; ol_cnt as usize],
                    quantities: (0..ol_cnt).map(|j| 1 + j.rem_euclid(10)).collect(),
                }
            } else if mix < 88 {
                let h_amount = (1 + i.rem_euclid(5_000)) as f64 / 100.0;
                if i % 2 == 0 {
                    Program::PaymentById {
                        datetime,
                        w_id,
                        d_id,
                        c_w_id: w_id,
                        c_d_id: d_id,
                        c_id,
                        h_amount,
                    }
                } else {
                    Program::PaymentByName {
                        datetime,
                        w_id,
                        d_id,
                        c_w_id: w_id,
                        c_d_id: d_id,
                        c_last: last_name((c_id - 1).rem_euclid(self.customers_per_district)),
                        h_amount,
                    }
                }
            } else if mix < 92 {
                if i % 2 == 0 {
                    Program::OrderStatusById { w_id, d_id, c_id }
                } else {
                    Program::OrderStatusByName {
                        w_id,
                        d_id,
                        c_last: last_name((c_id - 1).rem_euclid(self.customers_per_district)),
                    }
                }
            } else if mix < 96 {
                Program::Delivery {
                    datetime,
                    w_id,
                    carrier_id: i.rem_euclid(10) + 1,
                }
            } else {
                Program::StockLevel {
                    w_id,
                    d_id,
                    threshold: 10 + i.rem_euclid(11),
                }
            };
            programs.push(program);
        }
        Ok(programs)
    }
}
