mod dealer;
pub use self::dealer::{Dealer, DealerId};

mod vendor;
pub use self::vendor::{Vendor, VendorId};

mod product;
pub use self::product::{Product, ProductId};

mod invoice;
pub use self::invoice::{Invoice, InvoiceId, InvoiceLineItem};

mod rebate;
pub use self::rebate::{RebateEarning, RebateEarningId};
