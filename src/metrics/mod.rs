//! Metrics calculation modules for detection evaluation.

pub mod ap;
pub mod iou;
pub mod precision_recall;

pub use ap::{average_precision, mean_average_precision};
pub use iou::{box_iou, polygon_iou};
pub use precision_recall::cumulative_curve;
