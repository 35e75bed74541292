mod result_set;
mod row;

pub use result_set::{ROW_NUMBER_COLUMN, ResultSet, build_result_set};
pub use row::CustomDbRow;
