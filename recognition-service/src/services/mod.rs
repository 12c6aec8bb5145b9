pub mod baidu;
pub mod metrics;

pub use baidu::BaiduClient;
pub use metrics::{get_metrics, init_metrics};
