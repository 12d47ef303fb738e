pub mod scanner;
pub mod size;

pub use scanner::{scan_file, scan_pull_request};
pub use size::SizeLabel;
