//! Row types for the nine benchmark tables.
//!
//! Records are plain value aggregates. `Default` fills every column with
//! its unset sentinel (`i32::MIN`, `f64::MIN`, date 0, empty string), so
//! a default record doubles as an index probe with only the key fields
//! assigned. `approx_eq` is the record-level equality used by
//! verification: exact on integers, dates and strings, 0.01 absolute
//! tolerance on decimals.

use crate::fixstr::FixedStr;
use crate::types::{Date, DATE_UNSET, DECIMAL_UNSET, INT_UNSET};

/// Returns true if two decimals are equal within the 0.01 tolerance.
#[inline]
fn close(a: f64, b: f64) -> bool {
    libm::fabs(a - b) < 0.01
}

/// A warehouse row.
#[derive(Clone, Debug)]
pub struct Warehouse {
    pub w_id: i32,
    pub w_name: FixedStr<10>,
    pub w_street_1: FixedStr<20>,
    pub w_street_2: FixedStr<20>,
    pub w_city: FixedStr<20>,
    pub w_state: FixedStr<2>,
    pub w_zip: FixedStr<9>,
    pub w_tax: f64,
    pub w_ytd: f64,
}

impl Default for Warehouse {
    fn default() -> Self {
        Self {
            w_id: INT_UNSET,
            w_name: FixedStr::new(),
            w_street_1: FixedStr::new(),
            w_street_2: FixedStr::new(),
            w_city: FixedStr::new(),
            w_state: FixedStr::new(),
            w_zip: FixedStr::new(),
            w_tax: DECIMAL_UNSET,
            w_ytd: DECIMAL_UNSET,
        }
    }
}

impl Warehouse {
    pub fn approx_eq(&self, other: &Self) -> bool {
        self.w_id == other.w_id
            && self.w_name == other.w_name
            && self.w_street_1 == other.w_street_1
            && self.w_street_2 == other.w_street_2
            && self.w_city == other.w_city
            && self.w_state == other.w_state
            && self.w_zip == other.w_zip
            && close(self.w_tax, other.w_tax)
            && close(self.w_ytd, other.w_ytd)
    }
}

/// A district row. Ten districts belong to each warehouse.
#[derive(Clone, Debug)]
pub struct District {
    pub d_id: i32,
    pub d_w_id: i32,
    pub d_name: FixedStr<10>,
    pub d_street_1: FixedStr<20>,
    pub d_street_2: FixedStr<20>,
    pub d_city: FixedStr<20>,
    pub d_state: FixedStr<2>,
    pub d_zip: FixedStr<9>,
    pub d_tax: f64,
    pub d_ytd: f64,
    /// Next order id to assign; always 1 + the highest o_id ever
    /// inserted for this district.
    pub d_next_o_id: i32,
}

impl Default for District {
    fn default() -> Self {
        Self {
            d_id: INT_UNSET,
            d_w_id: INT_UNSET,
            d_name: FixedStr::new(),
            d_street_1: FixedStr::new(),
            d_street_2: FixedStr::new(),
            d_city: FixedStr::new(),
            d_state: FixedStr::new(),
            d_zip: FixedStr::new(),
            d_tax: DECIMAL_UNSET,
            d_ytd: DECIMAL_UNSET,
            d_next_o_id: INT_UNSET,
        }
    }
}

impl District {
    pub fn approx_eq(&self, other: &Self) -> bool {
        self.d_id == other.d_id
            && self.d_w_id == other.d_w_id
            && self.d_name == other.d_name
            && self.d_street_1 == other.d_street_1
            && self.d_street_2 == other.d_street_2
            && self.d_city == other.d_city
            && self.d_state == other.d_state
            && self.d_zip == other.d_zip
            && close(self.d_tax, other.d_tax)
            && close(self.d_ytd, other.d_ytd)
            && self.d_next_o_id == other.d_next_o_id
    }
}

/// A customer row.
#[derive(Clone, Debug)]
pub struct Customer {
    pub c_id: i32,
    pub c_d_id: i32,
    pub c_w_id: i32,
    pub c_first: FixedStr<16>,
    pub c_middle: FixedStr<2>,
    pub c_last: FixedStr<16>,
    pub c_street_1: FixedStr<20>,
    pub c_street_2: FixedStr<20>,
    pub c_city: FixedStr<20>,
    pub c_state: FixedStr<2>,
    pub c_zip: FixedStr<9>,
    pub c_phone: FixedStr<16>,
    pub c_since: Date,
    pub c_credit: FixedStr<2>,
    pub c_credit_lim: f64,
    pub c_discount: f64,
    pub c_balance: f64,
    pub c_ytd_payment: f64,
    pub c_payment_cnt: i32,
    pub c_delivery_cnt: i32,
    pub c_data: FixedStr<500>,
}

impl Default for Customer {
    fn default() -> Self {
        Self {
            c_id: INT_UNSET,
            c_d_id: INT_UNSET,
            c_w_id: INT_UNSET,
            c_first: FixedStr::new(),
            c_middle: FixedStr::new(),
            c_last: FixedStr::new(),
            c_street_1: FixedStr::new(),
            c_street_2: FixedStr::new(),
            c_city: FixedStr::new(),
            c_state: FixedStr::new(),
            c_zip: FixedStr::new(),
            c_phone: FixedStr::new(),
            c_since: DATE_UNSET,
            c_credit: FixedStr::new(),
            c_credit_lim: DECIMAL_UNSET,
            c_discount: DECIMAL_UNSET,
            c_balance: DECIMAL_UNSET,
            c_ytd_payment: DECIMAL_UNSET,
            c_payment_cnt: INT_UNSET,
            c_delivery_cnt: INT_UNSET,
            c_data: FixedStr::new(),
        }
    }
}

impl Customer {
    pub fn approx_eq(&self, other: &Self) -> bool {
        self.c_id == other.c_id
            && self.c_d_id == other.c_d_id
            && self.c_w_id == other.c_w_id
            && self.c_first == other.c_first
            && self.c_middle == other.c_middle
            && self.c_last == other.c_last
            && self.c_street_1 == other.c_street_1
            && self.c_street_2 == other.c_street_2
            && self.c_city == other.c_city
            && self.c_state == other.c_state
            && self.c_zip == other.c_zip
            && self.c_phone == other.c_phone
            && self.c_since == other.c_since
            && self.c_credit == other.c_credit
            && close(self.c_credit_lim, other.c_credit_lim)
            && close(self.c_discount, other.c_discount)
            && close(self.c_balance, other.c_balance)
            && close(self.c_ytd_payment, other.c_ytd_payment)
            && self.c_payment_cnt == other.c_payment_cnt
            && self.c_delivery_cnt == other.c_delivery_cnt
            && self.c_data == other.c_data
    }
}

/// An item row. The item table is read-only after loading.
#[derive(Clone, Debug)]
pub struct Item {
    pub i_id: i32,
    pub i_im_id: i32,
    pub i_name: FixedStr<24>,
    pub i_price: f64,
    pub i_data: FixedStr<50>,
}

impl Default for Item {
    fn default() -> Self {
        Self {
            i_id: INT_UNSET,
            i_im_id: INT_UNSET,
            i_name: FixedStr::new(),
            i_price: DECIMAL_UNSET,
            i_data: FixedStr::new(),
        }
    }
}

impl Item {
    pub fn approx_eq(&self, other: &Self) -> bool {
        self.i_id == other.i_id
            && self.i_im_id == other.i_im_id
            && self.i_name == other.i_name
            && close(self.i_price, other.i_price)
            && self.i_data == other.i_data
    }
}

/// A stock row, one per (item, warehouse) pair.
#[derive(Clone, Debug)]
pub struct Stock {
    pub s_i_id: i32,
    pub s_w_id: i32,
    pub s_quantity: i32,
    /// The ten district-specific descriptor strings; NewOrder copies the
    /// one for the ordering district into each order line.
    pub s_dist: [FixedStr<24>; 10],
    pub s_ytd: i32,
    pub s_order_cnt: i32,
    pub s_remote_cnt: i32,
    pub s_data: FixedStr<50>,
}

impl Default for Stock {
    fn default() -> Self {
        Self {
            s_i_id: INT_UNSET,
            s_w_id: INT_UNSET,
            s_quantity: INT_UNSET,
            s_dist: [FixedStr::new(); 10],
            s_ytd: INT_UNSET,
            s_order_cnt: INT_UNSET,
            s_remote_cnt: INT_UNSET,
            s_data: FixedStr::new(),
        }
    }
}

impl Stock {
    /// Returns the descriptor string for the given district (1-based).
    /// Out-of-range districts fall through to the last descriptor.
    pub fn dist_info(&self, d_id: i32) -> &FixedStr<24> {
        let slot = (d_id - 1).clamp(0, 9) as usize;
        &self.s_dist[slot]
    }

    pub fn approx_eq(&self, other: &Self) -> bool {
        self.s_i_id == other.s_i_id
            && self.s_w_id == other.s_w_id
            && self.s_quantity == other.s_quantity
            && self.s_dist == other.s_dist
            && self.s_ytd == other.s_ytd
            && self.s_order_cnt == other.s_order_cnt
            && self.s_remote_cnt == other.s_remote_cnt
            && self.s_data == other.s_data
    }
}

/// An order row.
#[derive(Clone, Debug)]
pub struct Order {
    pub o_id: i32,
    pub o_d_id: i32,
    pub o_w_id: i32,
    pub o_c_id: i32,
    pub o_entry_d: Date,
    /// -1 until the order is delivered.
    pub o_carrier_id: i32,
    pub o_ol_cnt: i32,
    /// 1 when every line is supplied by the home warehouse, else 0.
    pub o_all_local: i32,
}

impl Default for Order {
    fn default() -> Self {
        Self {
            o_id: INT_UNSET,
            o_d_id: INT_UNSET,
            o_w_id: INT_UNSET,
            o_c_id: INT_UNSET,
            o_entry_d: DATE_UNSET,
            o_carrier_id: INT_UNSET,
            o_ol_cnt: INT_UNSET,
            o_all_local: 0,
        }
    }
}

impl Order {
    pub fn approx_eq(&self, other: &Self) -> bool {
        self.o_id == other.o_id
            && self.o_d_id == other.o_d_id
            && self.o_w_id == other.o_w_id
            && self.o_c_id == other.o_c_id
            && self.o_entry_d == other.o_entry_d
            && self.o_carrier_id == other.o_carrier_id
            && self.o_ol_cnt == other.o_ol_cnt
            && self.o_all_local == other.o_all_local
    }
}

/// A pending-delivery marker; removed when its order is delivered.
#[derive(Clone, Debug)]
pub struct NewOrder {
    pub no_o_id: i32,
    pub no_d_id: i32,
    pub no_w_id: i32,
}

impl Default for NewOrder {
    fn default() -> Self {
        Self {
            no_o_id: INT_UNSET,
            no_d_id: INT_UNSET,
            no_w_id: INT_UNSET,
        }
    }
}

impl NewOrder {
    pub fn approx_eq(&self, other: &Self) -> bool {
        self.no_o_id == other.no_o_id
            && self.no_d_id == other.no_d_id
            && self.no_w_id == other.no_w_id
    }
}

/// An order line row.
#[derive(Clone, Debug)]
pub struct OrderLine {
    pub ol_o_id: i32,
    pub ol_d_id: i32,
    pub ol_w_id: i32,
    pub ol_number: i32,
    pub ol_i_id: i32,
    pub ol_supply_w_id: i32,
    /// Unset (0) until the line's order is delivered.
    pub ol_delivery_d: Date,
    pub ol_quantity: i32,
    pub ol_amount: f64,
    pub ol_dist_info: FixedStr<24>,
}

impl Default for OrderLine {
    fn default() -> Self {
        Self {
            ol_o_id: INT_UNSET,
            ol_d_id: INT_UNSET,
            ol_w_id: INT_UNSET,
            ol_number: INT_UNSET,
            ol_i_id: INT_UNSET,
            ol_supply_w_id: INT_UNSET,
            ol_delivery_d: DATE_UNSET,
            ol_quantity: INT_UNSET,
            ol_amount: DECIMAL_UNSET,
            ol_dist_info: FixedStr::new(),
        }
    }
}

impl OrderLine {
    pub fn approx_eq(&self, other: &Self) -> bool {
        self.ol_o_id == other.ol_o_id
            && self.ol_d_id == other.ol_d_id
            && self.ol_w_id == other.ol_w_id
            && self.ol_number == other.ol_number
            && self.ol_i_id == other.ol_i_id
            && self.ol_supply_w_id == other.ol_supply_w_id
            && self.ol_delivery_d == other.ol_delivery_d
            && self.ol_quantity == other.ol_quantity
            && close(self.ol_amount, other.ol_amount)
            && self.ol_dist_info == other.ol_dist_info
    }
}

/// A payment history row. History is append-only; rows are never probed,
/// only iterated at verification time.
#[derive(Clone, Debug)]
pub struct History {
    pub h_c_id: i32,
    pub h_c_d_id: i32,
    pub h_c_w_id: i32,
    pub h_d_id: i32,
    pub h_w_id: i32,
    pub h_date: Date,
    pub h_amount: f64,
    pub h_data: FixedStr<24>,
}

impl Default for History {
    fn default() -> Self {
        Self {
            h_c_id: INT_UNSET,
            h_c_d_id: INT_UNSET,
            h_c_w_id: INT_UNSET,
            h_d_id: INT_UNSET,
            h_w_id: INT_UNSET,
            h_date: DATE_UNSET,
            h_amount: DECIMAL_UNSET,
            h_data: FixedStr::new(),
        }
    }
}

impl History {
    pub fn approx_eq(&self, other: &Self) -> bool {
        self.h_c_id == other.h_c_id
            && self.h_c_d_id == other.h_c_d_id
            && self.h_c_w_id == other.h_c_w_id
            && self.h_d_id == other.h_d_id
            && self.h_w_id == other.h_w_id
            && self.h_date == other.h_date
            && close(self.h_amount, other.h_amount)
            && self.h_data == other.h_data
    }
}
