//! The five benchmark transaction procedures.
//!
//! Every procedure runs to completion against an exclusively borrowed
//! [`Db`](crate::schema::Db); there is no suspension point and no
//! isolation to honour. Procedures read and mutate rows only through the
//! tables' index surface.

mod delivery;
mod new_order;
mod order_status;
mod payment;
mod stock_level;

pub use delivery::delivery;
pub use new_order::{new_order, NewOrderResult};
pub use order_status::order_status;
pub use payment::payment;
pub use stock_level::stock_level;

use crate::schema::{Db, CUSTOMER_BY_NAME, PRIMARY};
use tempo_core::{Customer, FixedStr, Result, RowId};

/// How Payment and OrderStatus pick their customer.
#[derive(Clone, Debug)]
pub enum CustomerSelector {
    /// Direct lookup by customer id.
    ById(i32),
    /// Median match over everyone sharing a last name.
    ByLastName(FixedStr<16>),
}

/// Resolves a customer in a (warehouse, district).
///
/// By-name selection collects every customer with the last name, sorts
/// them by first name ignoring ASCII case, and picks the middle one;
/// with an even count it takes the element one below the upper median
/// (so 1, 2, 3 matches pick positions 0, 0, 1).
pub(crate) fn select_customer(
    db: &Db,
    c_w_id: i32,
    c_d_id: i32,
    selector: &CustomerSelector,
) -> Result<RowId> {
    match selector {
        CustomerSelector::ById(c_id) => {
            let probe = Customer {
                c_id: *c_id,
                c_d_id,
                c_w_id,
                ..Customer::default()
            };
            db.customer.find(PRIMARY, &probe)
        }
        CustomerSelector::ByLastName(c_last) => {
            let probe = Customer {
                c_w_id,
                c_d_id,
                c_last: *c_last,
                ..Customer::default()
            };
            let ids = db.customer.slice(CUSTOMER_BY_NAME, &probe);
            let mut matches: Vec<(RowId, FixedStr<16>)> = ids
                .iter()
                .filter_map(|&id| db.customer.row(id).map(|c| (id, c.c_first)))
                .collect();
            if matches.is_empty() {
                return db.customer.find(CUSTOMER_BY_NAME, &probe);
            }
            matches.sort_by(|a, b| a.1.cmp_ignore_ascii_case(&b.1));
            let mut mid = matches.len() / 2;
            if matches.len() % 2 == 0 {
                mid -= 1;
            }
            Ok(matches[mid].0)
        }
    }
}
