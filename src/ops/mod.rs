pub mod batch;
pub mod binify;
pub mod project;
pub mod utils;

pub use self::batch::{l2_norm, norm_batched, norm_sq_batched};
pub use self::binify::{bin_range_strings, binify, histogram, validate_edges};
pub use self::project::{column_max, rescale_to_reference};
pub use self::utils::{negative_part, positive_part, unit_edges, EPS};
