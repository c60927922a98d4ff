pub mod error;
pub mod feature;
pub mod reader;

pub use error::{FormatError, ReadError};
pub use feature::{parse_features, FeatureRecord};
pub use reader::{classify_line, parse_deptree, read_deptree, Line, SegmentHeader, TreeReader};
